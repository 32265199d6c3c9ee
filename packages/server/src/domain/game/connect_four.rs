//! ConnectFour on an open 9x9 grid for up to four players.
//!
//! Any empty cell can be played. Four consecutive marks in a row, column or
//! diagonal win.

use tracing::{debug, info};

use super::{BoardView, Coordinate, GameRules};
use crate::domain::{error::MoveError, random::RandomSource, round::MoveOutcome};

const SIZE: usize = 9;
const LINE: usize = 4;
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectFour {
    board: [u8; SIZE * SIZE],
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self {
            board: [0; SIZE * SIZE],
        }
    }
}

impl ConnectFour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &[u8] {
        &self.board
    }

    fn cell(&self, row: isize, column: isize) -> Option<u8> {
        if (0..SIZE as isize).contains(&row) && (0..SIZE as isize).contains(&column) {
            Some(self.board[row as usize * SIZE + column as usize])
        } else {
            None
        }
    }

    /// Marks of `player` in a straight run from `(row, column)`, not counting
    /// the start cell.
    fn run(&self, player: u8, row: usize, column: usize, (dr, dc): (isize, isize)) -> usize {
        (1..LINE as isize)
            .take_while(|step| {
                self.cell(row as isize + dr * step, column as isize + dc * step) == Some(player)
            })
            .count()
    }

    /// Whether the mark at `(row, column)` completes a line for `player`
    fn completes_line(&self, player: u8, row: usize, column: usize) -> bool {
        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run(player, row, column, (dr, dc)) + self.run(player, row, column, (-dr, -dc))
                >= LINE
        })
    }

    /// Whether `player` has four in a row anywhere on the board
    pub fn is_won(&self, player: u8) -> bool {
        (0..SIZE).any(|row| {
            (0..SIZE).any(|column| {
                self.board[row * SIZE + column] == player
                    && self.completes_line(player, row, column)
            })
        })
    }

    pub fn is_full(&self) -> bool {
        !self.board.contains(&0)
    }
}

impl GameRules for ConnectFour {
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
            debug!("ConnectFour: {} is already taken", notation);
            return Err(MoveError::Occupied(notation.to_string()));
        }

        self.board[index] = player;

        if self.completes_line(player, position.row, position.column) {
            info!("ConnectFour: player {} won", player);
            Ok(MoveOutcome::Won)
        } else if self.is_full() {
            info!("ConnectFour: draw");
            Ok(MoveOutcome::Draw)
        } else {
            Ok(MoveOutcome::Pass)
        }
    }

    fn view(&self, _viewer: u8) -> BoardView {
        BoardView::Single(self.board.to_vec())
    }
}
