//! TicTacToe: two players on a flat 3x3 board.

use tracing::{debug, info};

use super::{BoardView, Coordinate, GameRules};
use crate::domain::{error::MoveError, random::RandomSource, round::MoveOutcome};

const SIZE: usize = 3;

/// Rows, columns and both diagonals as cell indices
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicTacToe {
    board: [u8; SIZE * SIZE],
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a prepared board
    pub fn with_board(board: [u8; SIZE * SIZE]) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &[u8] {
        &self.board
    }

    /// Whether `player` owns a complete line
    pub fn is_won(&self, player: u8) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&cell| self.board[cell] == player))
    }

    pub fn is_full(&self) -> bool {
        !self.board.contains(&0)
    }
}

impl GameRules for TicTacToe {
    fn reset(&mut self, _players: u8, _random: &dyn RandomSource) {
        self.board = [0; SIZE * SIZE];
    }

    fn play(
        &mut self,
        player: u8,
        notation: &str,
        _roll: Option<u8>,
    ) -> Result<MoveOutcome, MoveError> {
        let position = Coordinate::parse(notation, SIZE, SIZE)?;
        let index = position.index(SIZE);
        if self.board[index] != 0 {
            debug!("TicTacToe: {} is already taken", notation);
            return Err(MoveError::Occupied(notation.to_string()));
        }

        self.board[index] = player;

        if self.is_won(player) {
            info!("TicTacToe: player {} won", player);
            Ok(MoveOutcome::Won)
        } else if self.is_full() {
            info!("TicTacToe: draw");
            Ok(MoveOutcome::Draw)
        } else {
            Ok(MoveOutcome::Pass)
        }
    }

    fn view(&self, _viewer: u8) -> BoardView {
        BoardView::Single(self.board.to_vec())
    }
}
