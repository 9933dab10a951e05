//! Board data model: squares, pieces, and the display snapshot

pub mod piece;
pub mod snapshot;
pub mod square;

pub use piece::{Piece, PieceColor, PieceKind};
pub use snapshot::BoardSnapshot;
pub use square::{ParseSquareError, Square};
