//! Optimistic chess client against a remote move authority
//!
//! The client applies every move speculatively: the board animates as soon
//! as the player commits an intent, the request travels to the authority in
//! the background with input gated, and the verdict either stands the move
//! up (plus the opponent's reply) or rolls every touched cell back exactly.
//!
//! [`game::GameSession`] is the single context object; nothing here is
//! global, so sessions can be created freely side by side.

pub mod board;
pub mod config;
pub mod game;
pub mod net;

pub use board::{BoardSnapshot, Piece, PieceColor, PieceKind, Square};
pub use game::{Activation, GameSession, MoveOutcome};
pub use net::{Authority, AuthorityError, HttpAuthority, MoveRequest, MoveResponse};
