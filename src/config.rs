//! Command-line configuration

use crate::board::PieceColor;
use clap::Parser;
use url::Url;

/// Terminal client for a remote chess rules authority
#[derive(Debug, Clone, Parser)]
#[command(name = "chess-client", version, about)]
pub struct ClientConfig {
    /// Base URL of the move authority
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub server: Url,

    /// Side the local player controls
    #[arg(long, default_value = "white")]
    pub color: PieceColor,

    /// Skip the startup health probe
    #[arg(long)]
    pub no_health_check: bool,
}
