//! Board coordinates
//!
//! Row 0 is black's back rank, row 7 is white's, matching the coordinates the
//! authority uses on the wire.

use std::fmt;
use std::str::FromStr;

pub const BOARD_SIZE: u8 = 8;

/// One cell of the 8x8 grid, immutable once created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Build a square from trusted coordinates.
    ///
    /// Panics if either coordinate is outside `0..8`; use [`Square::try_new`]
    /// for untrusted (wire) input.
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE, "square ({row}, {col}) off the board");
        Self { row, col }
    }

    /// Build a square from untrusted coordinates
    pub fn try_new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }
}

impl fmt::Display for Square {
    /// Algebraic notation: col 4, row 7 renders as "e1"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = BOARD_SIZE - self.row;
        write!(f, "{file}{rank}")
    }
}

/// Error parsing algebraic notation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("expected a square like \"e2\" (file a-h, rank 1-8), got {0:?}")]
pub struct ParseSquareError(String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSquareError(s.to_string());
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file.to_ascii_lowercase(), rank),
            _ => return Err(invalid()),
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        let col = file as u8 - b'a';
        let row = BOARD_SIZE - (rank as u8 - b'0');
        Ok(Square { row, col })
    }
}
