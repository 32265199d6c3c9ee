//! Per-room turn state machine primitives.
//!
//! `Inactive → Active → {Won(player) | Draw} → Active (next round) → …`

use serde::{Deserialize, Serialize};

/// Terminal-state flag of the current round.
///
/// On the wire this is `{ gameActive, playerWon?, draw? }`, the shape lobby
/// clients expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "RoundStateWire", from = "RoundStateWire")]
pub enum RoundState {
    #[default]
    Inactive,
    Active,
    Won(u8),
    Draw,
}

impl RoundState {
    pub fn is_active(&self) -> bool {
        matches!(self, RoundState::Active)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoundStateWire {
    game_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    player_won: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    draw: Option<bool>,
}

impl From<RoundState> for RoundStateWire {
    fn from(state: RoundState) -> Self {
        let (game_active, player_won, draw) = match state {
            RoundState::Inactive => (false, None, None),
            RoundState::Active => (true, None, None),
            RoundState::Won(player) => (false, Some(player), None),
            RoundState::Draw => (false, None, Some(true)),
        };
        Self {
            game_active,
            player_won,
            draw,
        }
    }
}

impl From<RoundStateWire> for RoundState {
    fn from(wire: RoundStateWire) -> Self {
        match (wire.game_active, wire.player_won, wire.draw) {
            (true, _, _) => RoundState::Active,
            (false, Some(player), _) => RoundState::Won(player),
            (false, None, Some(true)) => RoundState::Draw,
            (false, None, _) => RoundState::Inactive,
        }
    }
}

/// Turn pointers of a room. Seats are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Seat expected to move next
    pub player: u8,
    /// Seat that opened the current round
    pub player_begin: u8,
    /// Number of seats taking part
    pub players: u8,
}

impl Turn {
    pub fn new(players: u8) -> Self {
        Self {
            player: 1,
            player_begin: 1,
            players: players.max(1),
        }
    }

    /// Seat following `seat`, wrapping after the last one
    pub fn next_seat(&self, seat: u8) -> u8 {
        seat % self.players + 1
    }

    pub fn pass(&mut self) {
        self.player = self.next_seat(self.player);
    }

    /// Hand the opening move of the next round to the next seat.
    pub fn rotate_begin(&mut self) {
        self.player_begin = self.next_seat(self.player_begin);
        self.player = self.player_begin;
    }
}

/// What an accepted move means for the turn order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Turn passes to the next seat
    Pass,
    /// The same seat moves again
    Again,
    /// The mover won the round
    Won,
    /// The round ended without a winner
    Draw,
}

/// Kind of input the game expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextMove {
    /// Pick a cell
    Choice,
    /// Throw the dice
    Throw,
    /// Move a pawn with the last roll
    Move,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_state_wire_shape() {
        // テスト項目: RoundState が {gameActive, playerWon?, draw?} 形式でシリアライズされる
        // given (前提条件):
        let states = [
            RoundState::Inactive,
            RoundState::Active,
            RoundState::Won(2),
            RoundState::Draw,
        ];

        // when (操作):
        let json: Vec<String> = states
            .iter()
            .map(|state| serde_json::to_string(state).unwrap())
            .collect();

        // then (期待する結果):
        assert_eq!(json[0], r#"{"gameActive":false}"#);
        assert_eq!(json[1], r#"{"gameActive":true}"#);
        assert_eq!(json[2], r#"{"gameActive":false,"playerWon":2}"#);
        assert_eq!(json[3], r#"{"gameActive":false,"draw":true}"#);
    }

    #[test]
    fn test_turn_pass_wraps_around() {
        // テスト項目: 最後の席の次は 1 番目の席に戻る
        // given (前提条件):
        let mut turn = Turn::new(3);

        // when (操作):
        turn.pass();
        turn.pass();
        let third = turn.player;
        turn.pass();

        // then (期待する結果):
        assert_eq!(third, 3);
        assert_eq!(turn.player, 1);
    }

    #[test]
    fn test_turn_rotate_begin_moves_opening_seat() {
        // テスト項目: 新しいラウンドでは開始プレイヤーが次の席に移る
        // given (前提条件):
        let mut turn = Turn::new(2);
        turn.pass();

        // when (操作):
        turn.rotate_begin();

        // then (期待する結果):
        assert_eq!(turn.player_begin, 2);
        assert_eq!(turn.player, 2);

        turn.rotate_begin();
        assert_eq!(turn.player_begin, 1);
        assert_eq!(turn.player, 1);
    }
}
