//! Terminal driver for the optimistic chess client
//!
//! Reads one command per line:
//!   `e2 e4`   submit a move (both squares at once)
//!   `e2`      select / deselect a square
//!   `new`     start a new game (asks again mid-game)
//!   `quit`    exit

use anyhow::Context;
use chess_client::config::ClientConfig;
use chess_client::game::{GameSession, StatusTone};
use chess_client::net::HttpAuthority;
use chess_client::{Activation, Square};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::parse();
    info!("[MAIN] connecting to {} as {}", config.server, config.color);

    let authority = HttpAuthority::new(config.server.clone());
    if !config.no_health_check {
        authority
            .health()
            .await
            .with_context(|| format!("authority at {} is not reachable", config.server))?;
    }

    let mut session = GameSession::new(Arc::new(authority), config.color);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render(&session);
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "new" => {
                if !session.new_game(false) {
                    println!("Game in progress; type `new!` to confirm.");
                }
                render(&session);
            }
            "new!" => {
                session.new_game(true);
                render(&session);
            }
            _ => {
                run_command(&mut session, line).await;
                render(&session);
            }
        }
    }
    Ok(())
}

/// Parse `from [to]` and drive the session through the full round trip
async fn run_command(session: &mut GameSession<HttpAuthority>, line: &str) {
    let mut squares = line.split_whitespace();
    let (first, second) = (squares.next(), squares.next());
    if squares.next().is_some() {
        println!("Expected at most two squares, e.g. `e2 e4`.");
        return;
    }

    for raw in [first, second].into_iter().flatten() {
        let square: Square = match raw.parse() {
            Ok(square) => square,
            Err(err) => {
                println!("{err}");
                return;
            }
        };
        if session.activate_square(square) == Activation::Submitted {
            if session.resolve_pending().await.is_some() {
                session.settle().await;
            }
            return;
        }
    }
}

fn render(session: &GameSession<HttpAuthority>) {
    println!("{}", session.board());
    println!("{}", session.banner());
    let now = Instant::now();
    for notice in session.status().visible(now) {
        match notice.tone {
            StatusTone::Error => println!("!! {}", notice.message),
            StatusTone::Success => println!("** {}", notice.message),
        }
    }
    if let Some(analysis) = session.analysis() {
        println!("analysis: {}", analysis.player);
        if let Some(opponent) = &analysis.opponent {
            println!("opponent: {opponent}");
        }
    }
    if let Some((square, piece)) = session
        .selection()
        .square()
        .zip(session.selection().piece())
    {
        println!("selected: {piece} on {square}");
    }
}
