//! Seats, observers and the room host.
//!
//! Player seats are 1-based (`u1`, `u2`, …) and bounded by the game's
//! capacity. Observer slots are 0-based (`o0`, `o1`, …) and unbounded; a
//! freed slot is reused by the next observer.

use std::{collections::HashMap, fmt, str::FromStr};

use super::{
    error::RoleError,
    value_object::{ClientId, ConnectionId, Timestamp},
};

/// A connected client holding a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub client_id: ClientId,
    pub connection_id: ConnectionId,
    pub connected_at: Timestamp,
}

/// Slot held by a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Player(u8),
    Observer(usize),
}

impl Role {
    /// Viewer id passed to the game engines (0 for observers)
    pub fn viewer_id(&self) -> u8 {
        match self {
            Role::Player(seat) => *seat,
            Role::Observer(_) => 0,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Role::Player(seat) => format!("Player{} connected", seat),
            Role::Observer(_) => "Observer".to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player(seat) => write!(f, "u{}", seat),
            Role::Observer(slot) => write!(f, "o{}", slot),
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let incorrect = || RoleError::IncorrectRole(s.to_string());
        let mut chars = s.chars();
        let kind = chars.next().ok_or_else(incorrect)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(incorrect());
        }
        match kind {
            'u' => digits.parse().map(Role::Player).map_err(|_| incorrect()),
            'o' => digits.parse().map(Role::Observer).map_err(|_| incorrect()),
            _ => Err(incorrect()),
        }
    }
}

/// One line of the user list broadcast to a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatEntry {
    pub role: Role,
    pub client_id: ClientId,
    pub connected_at: Timestamp,
    pub host: bool,
}

#[derive(Debug, Clone)]
pub struct Seats {
    /// Index `seat - 1`
    players: Vec<Option<Occupant>>,
    observers: Vec<Option<Occupant>>,
    host: Option<ConnectionId>,
    /// Last player seat of every client, reclaimed on reconnect
    remembered: HashMap<ClientId, u8>,
}

impl Seats {
    pub fn new(max_players: u8) -> Self {
        Self {
            players: vec![None; usize::from(max_players)],
            observers: Vec::new(),
            host: None,
            remembered: HashMap::new(),
        }
    }

    pub fn max_players(&self) -> u8 {
        self.players.len() as u8
    }

    fn occupants(&self) -> impl Iterator<Item = (Role, &Occupant)> {
        let players = self
            .players
            .iter()
            .zip(1u8..)
            .filter_map(|(slot, seat)| slot.as_ref().map(|o| (Role::Player(seat), o)));
        let observers = self
            .observers
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|o| (Role::Observer(index), o)));
        players.chain(observers)
    }

    /// Seat a client: its remembered seat if free, else the lowest free seat,
    /// else an observer slot. The first client of a hostless room hosts it.
    pub fn join(&mut self, occupant: Occupant) -> Result<Role, RoleError> {
        if self
            .occupants()
            .any(|(_, o)| o.client_id == occupant.client_id)
        {
            return Err(RoleError::ClientAlreadyConnected(
                occupant.client_id.to_string(),
            ));
        }

        let connection_id = occupant.connection_id;
        let remembered = self
            .remembered
            .get(&occupant.client_id)
            .copied()
            .filter(|&seat| self.is_free_seat(seat));
        let free_seat = remembered.or_else(|| {
            self.players
                .iter()
                .position(Option::is_none)
                .map(|index| index as u8 + 1)
        });

        let role = match free_seat {
            Some(seat) => {
                self.remembered.insert(occupant.client_id.clone(), seat);
                self.players[usize::from(seat - 1)] = Some(occupant);
                Role::Player(seat)
            }
            None => Role::Observer(self.place_observer(occupant)),
        };

        if self.host.is_none() {
            self.host = Some(connection_id);
        }
        Ok(role)
    }

    fn is_free_seat(&self, seat: u8) -> bool {
        seat >= 1
            && self
                .players
                .get(usize::from(seat - 1))
                .is_some_and(Option::is_none)
    }

    fn place_observer(&mut self, occupant: Occupant) -> usize {
        match self.observers.iter().position(Option::is_none) {
            Some(index) => {
                self.observers[index] = Some(occupant);
                index
            }
            None => {
                self.observers.push(Some(occupant));
                self.observers.len() - 1
            }
        }
    }

    /// Free the slot of a connection. Hosting passes to the lowest occupied
    /// seat, else to the first observer.
    pub fn leave(&mut self, connection_id: ConnectionId) -> Option<(Role, Occupant)> {
        let role = self.role_of(connection_id)?;
        let occupant = match role {
            Role::Player(seat) => self.players[usize::from(seat - 1)].take(),
            Role::Observer(index) => self.observers[index].take(),
        }?;

        if self.host == Some(connection_id) {
            let next = self.occupants().next().map(|(_, o)| o.connection_id);
            self.host = next;
        }
        Some((role, occupant))
    }

    pub fn role_of(&self, connection_id: ConnectionId) -> Option<Role> {
        self.occupants()
            .find(|(_, o)| o.connection_id == connection_id)
            .map(|(role, _)| role)
    }

    pub fn is_host(&self, connection_id: ConnectionId) -> bool {
        self.host == Some(connection_id)
    }

    pub fn host(&self) -> Option<ConnectionId> {
        self.host
    }

    /// Occupied player seats
    pub fn seated(&self) -> u8 {
        self.players.iter().filter(|slot| slot.is_some()).count() as u8
    }

    /// Every connection with the viewer id it sees the board as
    pub fn viewers(&self) -> Vec<(ConnectionId, u8)> {
        self.occupants()
            .map(|(role, o)| (o.connection_id, role.viewer_id()))
            .collect()
    }

    pub fn roles(&self) -> Vec<(ConnectionId, Role)> {
        self.occupants()
            .map(|(role, o)| (o.connection_id, role))
            .collect()
    }

    pub fn connections(&self) -> Vec<ConnectionId> {
        self.occupants().map(|(_, o)| o.connection_id).collect()
    }

    pub fn entries(&self) -> Vec<SeatEntry> {
        self.occupants()
            .map(|(role, o)| SeatEntry {
                role,
                client_id: o.client_id.clone(),
                connected_at: o.connected_at,
                host: self.host == Some(o.connection_id),
            })
            .collect()
    }

    fn occupant(&self, role: Role) -> Option<&Occupant> {
        match role {
            Role::Player(seat) if seat >= 1 => self
                .players
                .get(usize::from(seat - 1))
                .and_then(Option::as_ref),
            Role::Player(_) => None,
            Role::Observer(index) => self.observers.get(index).and_then(Option::as_ref),
        }
    }

    /// Re-seat the room. `roles[i]` names the occupant (`u<n>`, `o<n>` or
    /// empty) of seat `i + 1`; players not named become observers.
    ///
    /// Nothing changes unless every entry is valid.
    pub fn reassign(&mut self, roles: &[String]) -> Result<(), RoleError> {
        if roles.len() > self.players.len() {
            return Err(RoleError::TooManyRoles {
                given: roles.len(),
                max: self.players.len(),
            });
        }

        let mut picked: Vec<Option<Role>> = Vec::with_capacity(roles.len());
        for text in roles {
            if text.is_empty() {
                picked.push(None);
                continue;
            }
            let role: Role = text.parse()?;
            if picked.contains(&Some(role)) {
                return Err(RoleError::DuplicateRole(text.clone()));
            }
            if self.occupant(role).is_none() {
                return Err(RoleError::EmptySlot(text.clone()));
            }
            picked.push(Some(role));
        }

        let mut seated = vec![None; self.players.len()];
        for (index, role) in picked.iter().enumerate() {
            seated[index] = match role {
                Some(Role::Player(seat)) => self.players[usize::from(*seat - 1)].take(),
                Some(Role::Observer(slot)) => self.observers[*slot].take(),
                None => None,
            };
        }

        let displaced: Vec<Occupant> = self.players.iter_mut().filter_map(Option::take).collect();
        for occupant in displaced {
            self.remembered.remove(&occupant.client_id);
            self.place_observer(occupant);
        }
        for (occupant, seat) in seated.iter().zip(1u8..) {
            if let Some(occupant) = occupant {
                self.remembered.insert(occupant.client_id.clone(), seat);
            }
        }
        self.players = seated;
        Ok(())
    }
}
