//! Piece identity and the glyph mapping shared with the authority
//!
//! The authority renders the board with the twelve Unicode chess glyphs, so
//! the client derives piece type and color from glyphs and nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side a piece belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Capitalized name for banners ("White to move ...")
    pub fn capitalized(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => write!(f, "white"),
            PieceColor::Black => write!(f, "black"),
        }
    }
}

/// Error parsing a color from the command line
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("expected \"white\" or \"black\", got {0:?}")]
pub struct ParseColorError(String);

impl FromStr for PieceColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(PieceColor::White),
            "black" => Ok(PieceColor::Black),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// Kind of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// One piece as displayed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Display glyph for this piece (one of the twelve chess glyphs)
    pub fn glyph(self) -> char {
        use PieceColor::*;
        use PieceKind::*;
        match (self.kind, self.color) {
            (King, White) => '♔',
            (Queen, White) => '♕',
            (Rook, White) => '♖',
            (Bishop, White) => '♗',
            (Knight, White) => '♘',
            (Pawn, White) => '♙',
            (King, Black) => '♚',
            (Queen, Black) => '♛',
            (Rook, Black) => '♜',
            (Bishop, Black) => '♝',
            (Knight, Black) => '♞',
            (Pawn, Black) => '♟',
        }
    }

    /// Inverse of [`Piece::glyph`]; anything but the twelve glyphs is `None`
    pub fn from_glyph(glyph: char) -> Option<Piece> {
        use PieceColor::*;
        use PieceKind::*;
        let (kind, color) = match glyph {
            '♔' => (King, White),
            '♕' => (Queen, White),
            '♖' => (Rook, White),
            '♗' => (Bishop, White),
            '♘' => (Knight, White),
            '♙' => (Pawn, White),
            '♚' => (King, Black),
            '♛' => (Queen, Black),
            '♜' => (Rook, Black),
            '♝' => (Bishop, Black),
            '♞' => (Knight, Black),
            '♟' => (Pawn, Black),
            _ => return None,
        };
        Some(Piece { kind, color })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
