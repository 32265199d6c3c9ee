//! Game rule engines.
//!
//! Every game implements [`GameRules`]; a room stores one [`GameEngine`]
//! and dispatches to it without knowing which game it is.

mod battleships;
mod connect_four;
mod coordinate;
mod descriptor;
mod man_dont_get_angry;
mod tictactoe;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    error::MoveError,
    random::RandomSource,
    round::{MoveOutcome, NextMove},
};

pub use battleships::Battleships;
pub use connect_four::ConnectFour;
pub use coordinate::Coordinate;
pub use descriptor::{BoardGeometry, DiceSpec, GameDescriptor, TrackTile};
pub use man_dont_get_angry::{LudoMove, ManDontGetAngry};
pub use tictactoe::TicTacToe;

/// The games served by this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    TicTacToe,
    ConnectFour,
    ManDontGetAngry,
    Battleships,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::TicTacToe,
        GameKind::ConnectFour,
        GameKind::ManDontGetAngry,
        GameKind::Battleships,
    ];

    /// Path segment used by the HTTP command layer
    pub fn route_name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn descriptor(&self) -> &'static GameDescriptor {
        match self {
            GameKind::TicTacToe => &descriptor::TIC_TAC_TOE,
            GameKind::ConnectFour => &descriptor::CONNECT_FOUR,
            GameKind::ManDontGetAngry => &descriptor::MAN_DONT_GET_ANGRY,
            GameKind::Battleships => &descriptor::BATTLESHIPS,
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_name())
    }
}

/// Unknown game name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Game doesn't exist!")]
pub struct UnknownGame(pub String);

impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TicTacToe" => Ok(GameKind::TicTacToe),
            "ConnectFour" => Ok(GameKind::ConnectFour),
            "ManDontGetAngry" => Ok(GameKind::ManDontGetAngry),
            "Battleships" | "BattleShips" | "Statki" => Ok(GameKind::Battleships),
            other => Err(UnknownGame(other.to_string())),
        }
    }
}

/// Board content returned to one viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardView {
    /// One flat board, row-major
    Single(Vec<u8>),
    /// Several flat layers (e.g. own fleet + tracking grid)
    Layers(Vec<Vec<u8>>),
}

/// Contract shared by all game engines.
///
/// `play` must validate everything before touching the board: an `Err`
/// leaves the engine exactly as it was.
pub trait GameRules {
    /// Clear boards and per-round data for a new round with `players` seats
    fn reset(&mut self, players: u8, random: &dyn RandomSource);

    /// Apply `notation` for `player`, who is known to hold the turn
    fn play(&mut self, player: u8, notation: &str, roll: Option<u8>)
    -> Result<MoveOutcome, MoveError>;

    /// Called after the turn has passed to `next_player`
    fn on_turn_passed(&mut self, _next_player: u8) {}

    /// Board perspective for `viewer` (0 = observer)
    fn view(&self, viewer: u8) -> BoardView;

    fn next_move(&self) -> NextMove {
        NextMove::Choice
    }

    /// Roll waiting to be used, if the game has dice
    fn pending_roll(&self) -> Option<u8> {
        None
    }
}

/// Engine of one room
#[derive(Debug, Clone)]
pub enum GameEngine {
    TicTacToe(TicTacToe),
    ConnectFour(ConnectFour),
    ManDontGetAngry(ManDontGetAngry),
    Battleships(Battleships),
}

impl GameEngine {
    /// Empty engine for a freshly opened room
    pub fn open(kind: GameKind) -> Self {
        let players = kind.descriptor().min_players;
        match kind {
            GameKind::TicTacToe => GameEngine::TicTacToe(TicTacToe::new()),
            GameKind::ConnectFour => GameEngine::ConnectFour(ConnectFour::new()),
            GameKind::ManDontGetAngry => {
                GameEngine::ManDontGetAngry(ManDontGetAngry::new(players))
            }
            GameKind::Battleships => GameEngine::Battleships(Battleships::new()),
        }
    }

    pub fn rules(&self) -> &dyn GameRules {
        match self {
            GameEngine::TicTacToe(engine) => engine,
            GameEngine::ConnectFour(engine) => engine,
            GameEngine::ManDontGetAngry(engine) => engine,
            GameEngine::Battleships(engine) => engine,
        }
    }

    pub fn rules_mut(&mut self) -> &mut dyn GameRules {
        match self {
            GameEngine::TicTacToe(engine) => engine,
            GameEngine::ConnectFour(engine) => engine,
            GameEngine::ManDontGetAngry(engine) => engine,
            GameEngine::Battleships(engine) => engine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_kind_parses_route_names_and_aliases() {
        // テスト項目: ルート名と別名からゲーム種別を解決できる
        // given (前提条件):
        let names = ["TicTacToe", "ConnectFour", "ManDontGetAngry", "Statki"];

        // when (操作):
        let kinds: Vec<GameKind> = names.iter().map(|n| n.parse().unwrap()).collect();

        // then (期待する結果):
        assert_eq!(
            kinds,
            vec![
                GameKind::TicTacToe,
                GameKind::ConnectFour,
                GameKind::ManDontGetAngry,
                GameKind::Battleships
            ]
        );
        assert_eq!(GameKind::Battleships.route_name(), "Battleships");
    }

    #[test]
    fn test_unknown_game_is_rejected() {
        // テスト項目: 未知のゲーム名はエラーになる
        // when (操作):
        let result = "Chess".parse::<GameKind>();

        // then (期待する結果):
        assert_eq!(result.unwrap_err().to_string(), "Game doesn't exist!");
    }
}
