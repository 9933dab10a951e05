//! Compound-move (castling) detection and local prechecks
//!
//! A king sliding two columns is the only compound move the client knows
//! about. Before anything is animated or submitted, the rook and its path
//! are checked locally; the record built here captures the pre-move content
//! of the rook cells so a rejected attempt can restore all four touched
//! cells exactly.

use crate::board::{BoardSnapshot, Piece, PieceColor, PieceKind, Square};

pub const QUEENSIDE_ROOK_COL: u8 = 0;
pub const KINGSIDE_ROOK_COL: u8 = 7;

/// Local precondition failures; both surface the same user notice but log
/// differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CastlingError {
    #[error("expected rook is not on its origin square")]
    RookMissing,
    #[error("path between king and rook is blocked")]
    PathBlocked,
}

/// Ephemeral record of one castling attempt, alive from detection until the
/// attempt commits or rolls back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastlingRecord {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    pub original_rook_from: Option<Piece>,
    pub original_rook_to: Option<Piece>,
}

/// True iff `piece` is a king moving exactly two columns horizontally
pub fn is_castling_attempt(piece: Piece, from_col: u8, to_col: u8) -> bool {
    piece.kind == PieceKind::King && from_col.abs_diff(to_col) == 2
}

/// Validate a castling attempt and compute the paired rook transition.
///
/// The rook destination is a local guess; the authority's `castling_info`
/// remains the source of truth once the verdict arrives.
pub fn plan(
    board: &BoardSnapshot,
    player: PieceColor,
    king_from: Square,
    king_to: Square,
) -> Result<CastlingRecord, CastlingError> {
    let queenside = king_to.col() < king_from.col();
    let rook_col = if queenside { QUEENSIDE_ROOK_COL } else { KINGSIDE_ROOK_COL };
    let rook_from = Square::new(king_from.row(), rook_col);

    match board.piece_at(rook_from) {
        Some(piece) if piece.kind == PieceKind::Rook && piece.color == player => {}
        _ => return Err(CastlingError::RookMissing),
    }

    if !board.path_clear(king_from.row(), king_from.col(), rook_col) {
        return Err(CastlingError::PathBlocked);
    }

    let rook_to_col = if queenside { king_to.col() + 1 } else { king_to.col() - 1 };
    let rook_to = Square::new(king_from.row(), rook_to_col);

    Ok(CastlingRecord {
        king_from,
        king_to,
        rook_from,
        rook_to,
        original_rook_from: board.piece_at(rook_from),
        original_rook_to: board.piece_at(rook_to),
    })
}
