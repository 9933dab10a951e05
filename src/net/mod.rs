//! Networking: authority seam, wire types, HTTP transport

pub mod authority;
pub mod http;
pub mod protocol;

pub use authority::{Authority, AuthorityError, AuthorityResult};
pub use http::HttpAuthority;
pub use protocol::{CastlingInfo, MoveRequest, MoveResponse, OpponentMove};
