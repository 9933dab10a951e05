//! Wire types for the authority's move endpoint
//!
//! The authority omits keys it has nothing to say about, so every optional
//! field deserializes with a default.

use crate::board::PieceColor;
use serde::{Deserialize, Serialize};

use crate::board::Square;

/// One move intent, as submitted to `POST /move`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from_row: from.row(),
            from_col: from.col(),
            to_row: to.row(),
            to_col: to.col(),
        }
    }
}

/// Rook leg of a castling move, as confirmed by the authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CastlingInfo {
    pub row: u8,
    pub rook_from_col: u8,
    pub rook_to_col: u8,
}

/// The opponent's counter-move included in a successful verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OpponentMove {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    #[serde(default)]
    pub is_castling: bool,
    #[serde(default)]
    pub castling_info: Option<CastlingInfo>,
}

/// Verdict for one submitted move
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MoveResponse {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub move_analysis: Option<String>,
    #[serde(default)]
    pub ai_move_analysis: Option<String>,
    #[serde(default)]
    pub castling_info: Option<CastlingInfo>,
    #[serde(default)]
    pub game_over: Option<bool>,
    #[serde(default)]
    pub winner: Option<PieceColor>,
    #[serde(default)]
    pub current_turn: Option<PieceColor>,
    #[serde(default)]
    pub in_check: Option<bool>,
    #[serde(default)]
    pub ai_move: Option<OpponentMove>,
}
