//! Seam between the session and the remote rules authority
//!
//! The session never talks HTTP directly; it submits through this trait so
//! tests can script verdicts and failures deterministically.

use super::protocol::{MoveRequest, MoveResponse};
use async_trait::async_trait;

/// Errors for one round trip to the authority
#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    #[error("invalid authority endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authority unreachable: {0}")]
    Unreachable(String),
}

pub type AuthorityResult<T> = Result<T, AuthorityError>;

/// The remote rule/legality engine and opponent, seen as an opaque oracle.
///
/// One call is one round trip; the client never retries and never inspects
/// the verdict beyond the documented response fields.
#[async_trait]
pub trait Authority: Send + Sync + 'static {
    async fn submit_move(&self, request: MoveRequest) -> AuthorityResult<MoveResponse>;
}
