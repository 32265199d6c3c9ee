//! Battleships: two fleets on 8x8 grids.
//!
//! Four layers are kept per room: own ships of player 1, tracking grid of
//! player 1, own ships of player 2, tracking grid of player 2.

use tracing::{debug, info};

use super::{BoardView, Coordinate, GameRules};
use crate::domain::{error::MoveError, random::RandomSource, round::MoveOutcome};

const SIZE: usize = 8;
const CELLS: usize = SIZE * SIZE;
/// Marker of a shot that hit water
pub const MISS: u8 = 3;
/// Ship cells of every fleet
pub const FLEET_CELLS: usize = 14;

const SHIPS_P1: usize = 0;
const TRACKING_P1: usize = 1;
const SHIPS_P2: usize = 2;
const TRACKING_P2: usize = 3;

fn ships_of(player: u8) -> usize {
    if player == 1 { SHIPS_P1 } else { SHIPS_P2 }
}

fn tracking_of(player: u8) -> usize {
    if player == 1 { TRACKING_P1 } else { TRACKING_P2 }
}

fn opponent_of(player: u8) -> u8 {
    if player == 1 { 2 } else { 1 }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battleships {
    layers: [[u8; CELLS]; 4],
}

impl Default for Battleships {
    fn default() -> Self {
        Self {
            layers: [[0; CELLS]; 4],
        }
    }
}

impl Battleships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fleet `layout` drawn with the owner's id
    fn fleet(layout: usize, owner: u8) -> [u8; CELLS] {
        LAYOUTS[layout].map(|cell| cell * owner)
    }

    pub fn layer(&self, index: usize) -> &[u8] {
        &self.layers[index]
    }

    /// Ship cells of `player` that have not been hit yet
    pub fn afloat(&self, player: u8) -> usize {
        self.layers[ships_of(player)]
            .iter()
            .filter(|&&cell| cell == player)
            .count()
    }
}

impl GameRules for Battleships {
    fn reset(&mut self, _players: u8, random: &dyn RandomSource) {
        self.layers = [[0; CELLS]; 4];
        self.layers[SHIPS_P1] = Self::fleet(random.pick_index(LAYOUTS.len()) % LAYOUTS.len(), 1);
        self.layers[SHIPS_P2] = Self::fleet(random.pick_index(LAYOUTS.len()) % LAYOUTS.len(), 2);
    }

    fn play(
        &mut self,
        player: u8,
        notation: &str,
        _roll: Option<u8>,
    ) -> Result<MoveOutcome, MoveError> {
        let position = Coordinate::parse(notation, SIZE, SIZE)?;
        let index = position.index(SIZE);
        let tracking = tracking_of(player);
        if self.layers[tracking][index] != 0 {
            debug!("Battleships: {} was already shot by player {}", notation, player);
            return Err(MoveError::Occupied(notation.to_string()));
        }

        let opponent = opponent_of(player);
        let target = ships_of(opponent);
        if self.layers[target][index] == opponent {
            self.layers[tracking][index] = opponent;
            self.layers[target][index] = opponent + MISS;
            if self.afloat(opponent) == 0 {
                info!("Battleships: player {} sank the whole fleet", player);
                return Ok(MoveOutcome::Won);
            }
            Ok(MoveOutcome::Again)
        } else {
            self.layers[tracking][index] = MISS;
            self.layers[target][index] = MISS;
            Ok(MoveOutcome::Pass)
        }
    }

    /// Players see their fleet and their tracking grid, observers both
    /// tracking grids.
    fn view(&self, viewer: u8) -> BoardView {
        let (first, second) = match viewer {
            1 => (SHIPS_P1, TRACKING_P1),
            2 => (SHIPS_P2, TRACKING_P2),
            _ => (TRACKING_P1, TRACKING_P2),
        };
        BoardView::Layers(vec![
            self.layers[first].to_vec(),
            self.layers[second].to_vec(),
        ])
    }
}

/// Fixed fleet layouts, row-major; 1 marks a ship cell
static LAYOUTS: [[u8; CELLS]; 10] = [
    [
        1, 0, 0, 0, 0, 0, 0, 0,
        1, 0, 0, 1, 1, 0, 1, 0,
        1, 0, 0, 0, 0, 0, 0, 0,
        1, 0, 0, 0, 0, 1, 0, 0,
        0, 0, 0, 1, 0, 1, 0, 0,
        0, 1, 0, 0, 0, 1, 0, 0,
        0, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 1,
    ],
    [
        1, 1, 1, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 1, 0,
        0, 0, 0, 0, 0, 0, 1, 0,
        0, 1, 0, 1, 0, 0, 0, 0,
        0, 0, 0, 1, 0, 1, 0, 0,
        0, 0, 0, 1, 0, 0, 0, 0,
        0, 1, 0, 0, 0, 1, 1, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
    ],
    [
        0, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 1, 1, 0,
        0, 0, 1, 0, 0, 0, 0, 0,
        0, 0, 1, 0, 1, 1, 0, 0,
        0, 0, 1, 0, 0, 0, 0, 1,
        0, 0, 1, 0, 0, 1, 0, 0,
        0, 0, 0, 0, 0, 1, 0, 0,
        0, 1, 0, 0, 0, 0, 0, 0,
    ],
    [
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 1, 1, 1, 0, 1,
        0, 1, 0, 0, 0, 0, 0, 0,
        0, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 1, 1, 1, 1, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 1, 0, 1, 0, 0,
        0, 1, 0, 0, 0, 1, 0, 0,
    ],
    [
        1, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 1, 0, 0, 1, 0,
        0, 0, 0, 0, 0, 0, 1, 0,
        0, 1, 1, 1, 0, 0, 1, 0,
        0, 0, 0, 0, 0, 0, 1, 0,
        0, 1, 0, 0, 0, 0, 0, 0,
        0, 1, 0, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 1, 0, 0,
    ],
    [
        0, 0, 0, 1, 0, 0, 0, 0,
        0, 1, 0, 1, 0, 1, 1, 0,
        0, 0, 0, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 1, 1,
        0, 0, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 1, 1, 1, 1, 0,
    ],
    [
        0, 1, 0, 0, 0, 1, 0, 0,
        0, 1, 0, 0, 0, 1, 0, 0,
        0, 0, 0, 1, 0, 1, 0, 0,
        1, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 1, 1, 1, 1, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 0, 1, 1,
    ],
    [
        0, 0, 1, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 1, 0, 0, 1, 0, 1, 0,
        0, 0, 0, 0, 0, 0, 1, 0,
        0, 0, 0, 1, 0, 0, 1, 0,
        0, 0, 0, 0, 0, 0, 1, 0,
        0, 1, 1, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 1, 1, 0,
    ],
    [
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 0, 1, 0,
        1, 1, 0, 0, 0, 0, 1, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 1, 0, 0, 1, 1, 1, 1,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 1, 0, 1, 1, 1, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
    ],
    [
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 1, 0, 1, 1, 1, 1, 0,
        0, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 0, 1, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 1, 0, 1,
        0, 0, 1, 0, 0, 1, 0, 1,
        0, 0, 0, 0, 0, 0, 0, 1,
    ],
];
