//! End-to-end round trips through the session: speculative apply, verdicts,
//! rollback, the input gate, and the thinking indicator

mod common;

use chess_client::board::{Piece, PieceColor, PieceKind, Square};
use chess_client::game::session::{NOTICE_GAME_OVER, NOTICE_OWN_PIECE, NOTICE_TRANSPORT, NOTICE_WAIT};
use chess_client::game::StatusTone;
use chess_client::net::{MoveRequest, MoveResponse, OpponentMove};
use chess_client::{Activation, GameSession, MoveOutcome};
use common::{accepted, rejected, Scripted, ScriptedAuthority};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn submit(session: &mut GameSession<ScriptedAuthority>, from: &str, to: &str) {
    assert_eq!(session.activate_square(sq(from)), Activation::Selected(sq(from)));
    assert_eq!(session.activate_square(sq(to)), Activation::Submitted);
}

#[tokio::test(start_paused = true)]
async fn test_commit_with_opponent_reply() {
    let reply = MoveResponse {
        valid: true,
        current_turn: Some(PieceColor::White),
        ai_move: Some(OpponentMove {
            from_row: 1,
            from_col: 4,
            to_row: 3,
            to_col: 4,
            is_castling: false,
            castling_info: None,
        }),
        ..MoveResponse::default()
    };
    let authority = ScriptedAuthority::with([Scripted::Reply(reply)]);
    let mut session = GameSession::new(Arc::clone(&authority), PieceColor::White);
    let start = Instant::now();

    submit(&mut session, "e2", "e4");
    assert!(!session.can_move(), "gate must close at submission");
    assert_eq!(
        authority.requests(),
        vec![MoveRequest::new(sq("e2"), sq("e4"))]
    );

    let outcome = session.resolve_pending().await;
    assert_eq!(outcome, Some(MoveOutcome::Committed { game_over: false }));
    assert!(!session.can_move(), "gate stays closed until the reply animates");

    session.tick(start + Duration::from_secs(1));
    assert_eq!(
        session.board().piece_at(sq("e4")),
        Some(Piece::new(PieceKind::Pawn, PieceColor::White))
    );
    assert_eq!(
        session.board().piece_at(sq("e5")),
        Some(Piece::new(PieceKind::Pawn, PieceColor::Black))
    );
    assert_eq!(session.board().piece_at(sq("e2")), None);
    assert_eq!(session.board().piece_at(sq("e7")), None);
    assert!(session.can_move(), "gate reopens once the reply has drained");
    assert!(session.animations().is_highlighted(sq("e5"), start + Duration::from_secs(1)));
    assert!(!session.animations().is_highlighted(sq("e5"), start + Duration::from_secs(3)));
}

#[tokio::test(start_paused = true)]
async fn test_rejection_restores_board_exactly() {
    let authority = ScriptedAuthority::with([Scripted::Reply(rejected("Invalid move!"))]);
    let mut session = GameSession::new(authority, PieceColor::White);
    let before = session.board().clone();
    let start = Instant::now();

    submit(&mut session, "e2", "e5");
    assert_eq!(session.resolve_pending().await, Some(MoveOutcome::RolledBack));

    assert_eq!(*session.board(), before);
    // cancelled transitions must not fire later either
    session.tick(start + Duration::from_secs(5));
    assert_eq!(*session.board(), before);
    assert!(session.can_move(), "rollback reopens the gate");

    let notice = session.status().latest().unwrap();
    assert_eq!(notice.tone, StatusTone::Error);
    assert_eq!(notice.message, "Invalid move!");
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_rolls_back() {
    let authority = ScriptedAuthority::with([Scripted::Fail("connection refused".to_string())]);
    let mut session = GameSession::new(authority, PieceColor::White);
    let before = session.board().clone();

    submit(&mut session, "e2", "e4");
    assert_eq!(session.resolve_pending().await, Some(MoveOutcome::RolledBack));
    assert_eq!(*session.board(), before);
    assert!(session.can_move());
    assert_eq!(session.status().latest().unwrap().message, NOTICE_TRANSPORT);
}

#[tokio::test(start_paused = true)]
async fn test_second_intent_blocked_while_pending() {
    let authority = ScriptedAuthority::with([Scripted::Reply(accepted())]);
    let mut session = GameSession::new(Arc::clone(&authority), PieceColor::White);

    submit(&mut session, "e2", "e4");
    assert_eq!(session.activate_square(sq("d2")), Activation::Rejected);
    assert_eq!(session.status().latest().unwrap().message, NOTICE_WAIT);
    assert_eq!(authority.requests().len(), 1, "only one request may be in flight");

    session.resolve_pending().await;
    assert!(session.can_move());
}

#[tokio::test(start_paused = true)]
async fn test_selection_rules() {
    let authority = ScriptedAuthority::with([]);
    let mut session = GameSession::new(authority, PieceColor::White);

    // empty square as first activation does nothing, silently
    assert_eq!(session.activate_square(sq("e4")), Activation::Ignored);
    assert!(session.status().latest().is_none());

    // opponent piece cannot be picked up
    assert_eq!(session.activate_square(sq("e7")), Activation::Rejected);
    assert_eq!(
        session.status().latest().unwrap().message,
        "It's white's turn to move!"
    );

    // select, deselect on second activation of the same square
    assert_eq!(session.activate_square(sq("e2")), Activation::Selected(sq("e2")));
    assert_eq!(session.activate_square(sq("e2")), Activation::Deselected);
    assert!(!session.selection().is_selected());

    // selecting another own piece switches the selection
    assert_eq!(session.activate_square(sq("e2")), Activation::Selected(sq("e2")));
    assert_eq!(session.activate_square(sq("d2")), Activation::Reselected(sq("d2")));
    assert_eq!(session.selection().square(), Some(sq("d2")));
}

#[tokio::test(start_paused = true)]
async fn test_game_over_freezes_session() {
    let reply = MoveResponse {
        valid: true,
        game_over: Some(true),
        winner: Some(PieceColor::White),
        message: Some("Game Over! white wins!".to_string()),
        ..MoveResponse::default()
    };
    let authority = ScriptedAuthority::with([Scripted::Reply(reply)]);
    let mut session = GameSession::new(Arc::clone(&authority), PieceColor::White);

    submit(&mut session, "e2", "e4");
    assert_eq!(
        session.resolve_pending().await,
        Some(MoveOutcome::Committed { game_over: true })
    );
    assert_eq!(session.banner(), "white wins!");
    assert!(!session.can_move());

    // every further activation bounces with the game-over notice
    assert_eq!(session.activate_square(sq("d2")), Activation::Rejected);
    assert_eq!(session.status().latest().unwrap().message, NOTICE_GAME_OVER);
    assert_eq!(authority.requests().len(), 1);

    // once concluded, a new game needs no confirmation
    assert!(session.new_game(false));
    assert!(session.can_move());
    assert_eq!(session.banner(), "White to move (You are white)");
}

#[tokio::test(start_paused = true)]
async fn test_new_game_needs_confirmation_mid_game() {
    let authority = ScriptedAuthority::with([]);
    let mut session = GameSession::new(authority, PieceColor::White);

    assert!(!session.new_game(false));
    assert!(session.new_game(true));
}

#[tokio::test(start_paused = true)]
async fn test_thinking_indicator_only_after_delay() {
    //! A verdict inside 500 ms never shows the indicator; a slow one does,
    //! and it clears when the verdict lands
    let authority = ScriptedAuthority::with([
        Scripted::Reply(accepted()),
        Scripted::ReplyAfter(Duration::from_secs(1), accepted()),
    ]);
    let mut session = GameSession::new(authority, PieceColor::White);

    submit(&mut session, "e2", "e4");
    session.resolve_pending().await;
    assert!(!session.thinking_was_shown());

    submit(&mut session, "d2", "d4");
    session.resolve_pending().await;
    assert!(session.thinking_was_shown());
    assert!(!session.is_thinking(), "indicator clears with the verdict");
}

#[tokio::test(start_paused = true)]
async fn test_drag_and_drop_flow() {
    let authority = ScriptedAuthority::with([Scripted::Reply(accepted())]);
    let mut session = GameSession::new(authority, PieceColor::White);

    // dropping on an own piece is a capture attempt, not a reselect
    assert_eq!(session.drag_start(sq("b1")), Activation::Selected(sq("b1")));
    assert_eq!(session.drop_on(sq("d2")), Activation::Rejected);
    assert_eq!(session.status().latest().unwrap().message, NOTICE_OWN_PIECE);
    assert!(!session.selection().is_selected());

    assert_eq!(session.drag_start(sq("b1")), Activation::Selected(sq("b1")));
    assert_eq!(session.drop_on(sq("c3")), Activation::Submitted);
    assert_eq!(session.resolve_pending().await, Some(MoveOutcome::Committed { game_over: false }));
}

#[tokio::test(start_paused = true)]
async fn test_check_notice_rides_the_reply() {
    let reply = MoveResponse {
        valid: true,
        message: Some("white is in check!".to_string()),
        current_turn: Some(PieceColor::White),
        in_check: Some(true),
        ai_move: Some(OpponentMove {
            from_row: 0,
            from_col: 3,
            to_row: 4,
            to_col: 7,
            is_castling: false,
            castling_info: None,
        }),
        ..MoveResponse::default()
    };
    let authority = ScriptedAuthority::with([Scripted::Reply(reply)]);
    let mut session = GameSession::new(authority, PieceColor::White);

    submit(&mut session, "e2", "e4");
    session.resolve_pending().await;

    assert!(session.turn().in_check);
    let notice = session.status().latest().unwrap();
    assert_eq!(notice.tone, StatusTone::Success);
    assert_eq!(notice.message, "white is in check!");
}

#[tokio::test(start_paused = true)]
async fn test_resolve_without_pending_is_none() {
    let authority = ScriptedAuthority::with([]);
    let mut session = GameSession::new(authority, PieceColor::White);
    assert_eq!(session.resolve_pending().await, None);
}
