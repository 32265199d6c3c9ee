//! `a1`-style cell addressing shared by the grid games.

use crate::domain::error::MoveError;

/// Column/row pair on a `width × height` grid; `a1` is `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub column: usize,
    pub row: usize,
}

impl Coordinate {
    /// Parse `<column letter><row digit>` against the board bounds.
    pub fn parse(position: &str, width: usize, height: usize) -> Result<Self, MoveError> {
        let mut chars = position.chars();
        let (Some(column), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(MoveError::InvalidPosition(position.to_string()));
        };
        if !column.is_ascii_lowercase() || !row.is_ascii_digit() {
            return Err(MoveError::InvalidPosition(position.to_string()));
        }

        let column = column as i32 - 'a' as i32;
        if column >= width as i32 {
            return Err(MoveError::ColumnOutOfRange(column));
        }
        let row = row as i32 - '1' as i32;
        if row < 0 || row >= height as i32 {
            return Err(MoveError::RowOutOfRange(row));
        }

        Ok(Self {
            column: column as usize,
            row: row as usize,
        })
    }

    /// Row-major index into a flat board of the given width
    pub fn index(&self, width: usize) -> usize {
        self.row * width + self.column
    }
}
