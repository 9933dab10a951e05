//! Selection state: at most one selected square at a time

use crate::board::{Piece, Square};

/// Currently selected square and the piece sitting on it.
///
/// Non-empty only between a completed first click (or drag start) and the
/// activation that resolves it; the session clears it before any round trip
/// begins.
#[derive(Debug, Default)]
pub struct Selection {
    selected: Option<(Square, Piece)>,
}

impl Selection {
    pub fn select(&mut self, square: Square, piece: Piece) {
        self.selected = Some((square, piece));
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn square(&self) -> Option<Square> {
        self.selected.map(|(square, _)| square)
    }

    pub fn piece(&self) -> Option<Piece> {
        self.selected.map(|(_, piece)| piece)
    }
}
