//! Display-side cache of the authority's last known board
//!
//! The snapshot is never a source of truth: it is mutated only by the
//! response reconciler and by the animation sequencer's phase-boundary
//! content swap. Lookups are direct array indexing.

use super::piece::{Piece, PieceColor, PieceKind};
use super::square::{Square, BOARD_SIZE};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    cells: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl BoardSnapshot {
    /// Board with no pieces at all
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Standard starting position, black on rows 0-1, white on rows 6-7
    pub fn initial() -> Self {
        use PieceKind::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Self::empty();
        for (col, kind) in back_rank.into_iter().enumerate() {
            let col = col as u8;
            board.set(Square::new(0, col), Some(Piece::new(kind, PieceColor::Black)));
            board.set(Square::new(1, col), Some(Piece::new(Pawn, PieceColor::Black)));
            board.set(Square::new(6, col), Some(Piece::new(Pawn, PieceColor::White)));
            board.set(Square::new(7, col), Some(Piece::new(kind, PieceColor::White)));
        }
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row() as usize][square.col() as usize] = piece;
    }

    /// Move the content of `from` onto `to`, leaving `from` empty.
    ///
    /// This is the single phase-boundary operation the animation sequencer
    /// runs; captures happen implicitly because `to` is overwritten.
    pub fn move_content(&mut self, from: Square, to: Square) {
        let piece = self.piece_at(from);
        self.set(to, piece);
        self.set(from, None);
    }

    /// True when every square strictly between the two columns on `row` is
    /// empty (castling path check)
    pub fn path_clear(&self, row: u8, from_col: u8, to_col: u8) -> bool {
        let (lo, hi) = if from_col < to_col {
            (from_col, to_col)
        } else {
            (to_col, from_col)
        };
        (lo + 1..hi).all(|col| self.piece_at(Square::new(row, col)).is_none())
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            write!(f, "{} ", BOARD_SIZE - row)?;
            for col in 0..BOARD_SIZE {
                match self.piece_at(Square::new(row, col)) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " ·")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}
