//! The game session: one context object holding all client-side state
//!
//! Everything the protocol needs lives on [`GameSession`]; there are no
//! module-level singletons, so multiple sessions (and tests) can coexist.
//!
//! A move attempt walks one path:
//! selection -> castling precheck -> speculative apply -> round trip
//! (gate closed) -> reconcile (commit or rollback, gate reopened).

use crate::board::{BoardSnapshot, Piece, PieceColor, Square};
use crate::game::animation::AnimationSequencer;
use crate::game::castling::{self, CastlingRecord};
use crate::game::input_gate::InputGate;
use crate::game::selection::Selection;
use crate::game::status::StatusFeed;
use crate::game::turn::TurnState;
use crate::net::{Authority, AuthorityError, MoveRequest, MoveResponse};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// How long a round trip may stay silent before the thinking indicator shows
pub const THINKING_DELAY: Duration = Duration::from_millis(500);
/// Stagger before the authority-confirmed rook leg of the player's castling
pub const ROOK_STAGGER: Duration = Duration::from_millis(300);
/// Stagger before the rook leg of the opponent's castling
pub const OPPONENT_ROOK_STAGGER: Duration = Duration::from_millis(600);

const SETTLE_POLL: Duration = Duration::from_millis(25);

pub const NOTICE_GAME_OVER: &str = "Game is over! Start a new game.";
pub const NOTICE_WAIT: &str = "Please wait for the opponent to complete their move.";
pub const NOTICE_INVALID_CASTLING: &str = "Invalid castling move! Path must be clear.";
pub const NOTICE_OWN_PIECE: &str = "Invalid move! Cannot capture your own piece.";
pub const NOTICE_TRANSPORT: &str = "Error making move!";

/// What one activation (click, drag, drop) did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Nothing to act on (empty square as first click, drop with no selection)
    Ignored,
    /// Refused; a status notice explains why
    Rejected,
    Selected(Square),
    Deselected,
    Reselected(Square),
    /// A move intent was handed to the authority
    Submitted,
}

/// Terminal result of one round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Committed { game_over: bool },
    RolledBack,
}

/// Why a move attempt never left the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LocalReject {
    GameOver,
    Busy,
    InvalidCastling,
    MissingPiece,
}

/// Analysis strings the authority attaches to a committed move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAnalysis {
    pub player: String,
    pub opponent: Option<String>,
}

/// Cell content captured before the speculative apply, for exact rollback
#[derive(Debug)]
pub(crate) struct RollbackState {
    pub from: Square,
    pub to: Square,
    pub original_from: Option<Piece>,
    pub original_to: Option<Piece>,
    pub castling: Option<CastlingRecord>,
}

/// The one in-flight round trip, held until resolved
#[derive(Debug)]
pub(crate) struct PendingRoundTrip {
    handle: JoinHandle<Result<MoveResponse, AuthorityError>>,
    pub rollback: RollbackState,
    thinking_deadline: Instant,
    pub tag: u64,
}

pub struct GameSession<A: Authority> {
    pub(crate) authority: Arc<A>,
    pub(crate) player_color: PieceColor,
    pub(crate) board: BoardSnapshot,
    pub(crate) selection: Selection,
    pub(crate) turn: TurnState,
    pub(crate) gate: InputGate,
    pub(crate) status: StatusFeed,
    pub(crate) animations: AnimationSequencer,
    pub(crate) pending: Option<PendingRoundTrip>,
    pub(crate) analysis: Option<MoveAnalysis>,
    pub(crate) thinking_visible: bool,
    pub(crate) thinking_was_shown: bool,
    /// Gate reopens only after the opponent's reply animation drains
    pub(crate) reopen_after_reply: bool,
    next_attempt: u64,
}

impl<A: Authority> GameSession<A> {
    /// Fresh session from the standard initial position
    pub fn new(authority: Arc<A>, player_color: PieceColor) -> Self {
        Self::with_position(authority, player_color, BoardSnapshot::initial(), TurnState::default())
    }

    /// Session resumed from a given position (server-rendered state, tests)
    pub fn with_position(
        authority: Arc<A>,
        player_color: PieceColor,
        board: BoardSnapshot,
        turn: TurnState,
    ) -> Self {
        Self {
            authority,
            player_color,
            board,
            selection: Selection::default(),
            turn,
            gate: InputGate::default(),
            status: StatusFeed::default(),
            animations: AnimationSequencer::default(),
            pending: None,
            analysis: None,
            thinking_visible: false,
            thinking_was_shown: false,
            reopen_after_reply: false,
            next_attempt: 0,
        }
    }

    // --- read-only surface ---

    pub fn board(&self) -> &BoardSnapshot {
        &self.board
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn status(&self) -> &StatusFeed {
        &self.status
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn animations(&self) -> &AnimationSequencer {
        &self.animations
    }

    pub fn analysis(&self) -> Option<&MoveAnalysis> {
        self.analysis.as_ref()
    }

    pub fn player_color(&self) -> PieceColor {
        self.player_color
    }

    pub fn can_move(&self) -> bool {
        self.gate.can_move()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Thinking indicator currently showing
    pub fn is_thinking(&self) -> bool {
        self.thinking_visible
    }

    /// Whether the last round trip ran long enough to show the indicator
    pub fn thinking_was_shown(&self) -> bool {
        self.thinking_was_shown
    }

    pub fn banner(&self) -> String {
        self.turn.banner(self.player_color)
    }

    // --- activation surface (clicks) ---

    /// Handle a square activation (click or tap)
    pub fn activate_square(&mut self, square: Square) -> Activation {
        if self.turn.game_over {
            self.status.error(NOTICE_GAME_OVER);
            return Activation::Rejected;
        }

        let Some(selected) = self.selection.square() else {
            return self.try_select(square);
        };

        // same square again: deselect, no move attempted
        if selected == square {
            debug!("[SESSION] deselected {square}");
            self.selection.clear();
            return Activation::Deselected;
        }

        // another piece of the same color: reselect
        if let (Some(own), Some(target)) = (self.selection.piece(), self.board.piece_at(square)) {
            if target.color == own.color {
                self.selection.clear();
                return match self.try_select(square) {
                    Activation::Selected(sq) => Activation::Reselected(sq),
                    other => other,
                };
            }
        }

        // anything else is a move attempt; selection clears regardless of
        // the outcome (rollback is a content operation, not a selection one)
        let result = self.submit_move(selected, square);
        self.selection.clear();
        match result {
            Ok(()) => Activation::Submitted,
            Err(_) => Activation::Rejected,
        }
    }

    fn try_select(&mut self, square: Square) -> Activation {
        let Some(piece) = self.board.piece_at(square) else {
            return Activation::Ignored;
        };
        if !self.gate.can_move() {
            self.status.error(NOTICE_WAIT);
            return Activation::Rejected;
        }
        if piece.color != self.turn.current_turn || piece.color != self.player_color {
            self.status
                .error(format!("It's {}'s turn to move!", self.turn.current_turn));
            return Activation::Rejected;
        }
        debug!("[SESSION] selected {:?} on {square}", piece.kind);
        self.selection.select(square, piece);
        Activation::Selected(square)
    }

    // --- activation surface (drag and drop) ---

    /// Drag start runs the same eligibility checks as a first click
    pub fn drag_start(&mut self, square: Square) -> Activation {
        if self.turn.game_over {
            self.status.error(NOTICE_GAME_OVER);
            return Activation::Rejected;
        }
        self.selection.clear();
        self.try_select(square)
    }

    /// Drag end always clears any leftover selection marker
    pub fn drag_end(&mut self) {
        self.selection.clear();
    }

    /// Drop resolves like a second click, except a same-color target is an
    /// own-piece capture notice rather than a reselect
    pub fn drop_on(&mut self, square: Square) -> Activation {
        let Some(from) = self.selection.square() else {
            return Activation::Ignored;
        };
        if let (Some(own), Some(target)) = (self.selection.piece(), self.board.piece_at(square)) {
            if target.color == own.color {
                self.status.error(NOTICE_OWN_PIECE);
                self.selection.clear();
                return Activation::Rejected;
            }
        }
        let result = self.submit_move(from, square);
        self.selection.clear();
        match result {
            Ok(()) => Activation::Submitted,
            Err(_) => Activation::Rejected,
        }
    }

    // --- move submission ---

    /// Speculatively apply a move and hand it to the authority.
    ///
    /// Exactly one request leaves per call; the gate closes here and reopens
    /// only when the round trip reaches a terminal outcome.
    fn submit_move(&mut self, from: Square, to: Square) -> Result<(), LocalReject> {
        if self.turn.game_over {
            self.status.error(NOTICE_GAME_OVER);
            return Err(LocalReject::GameOver);
        }
        if !self.gate.can_move() {
            self.status.error(NOTICE_WAIT);
            return Err(LocalReject::Busy);
        }
        let Some(moving) = self.board.piece_at(from) else {
            warn!("[SUBMIT] no piece on {from}, selection out of sync");
            return Err(LocalReject::MissingPiece);
        };

        let now = Instant::now();
        let tag = self.next_attempt;
        self.next_attempt += 1;

        // rollback state must capture cell content before any mutation
        let rollback_from = self.board.piece_at(from);
        let rollback_to = self.board.piece_at(to);

        let record = if castling::is_castling_attempt(moving, from.col(), to.col()) {
            match castling::plan(&self.board, self.player_color, from, to) {
                Ok(record) => Some(record),
                Err(err) => {
                    debug!("[SUBMIT] castling precheck failed: {err}");
                    self.status.error(NOTICE_INVALID_CASTLING);
                    return Err(LocalReject::InvalidCastling);
                }
            }
        } else {
            None
        };

        // speculative apply: the move looks committed before the verdict
        self.animations.begin(from, to, Duration::ZERO, Some(tag), now);
        if let Some(record) = &record {
            self.animations
                .begin(record.rook_from, record.rook_to, Duration::ZERO, Some(tag), now);
        }

        let request = MoveRequest::new(from, to);
        info!(
            "[SUBMIT] {from} -> {to} ({:?}{})",
            moving.kind,
            if record.is_some() { ", castling" } else { "" }
        );
        let authority = Arc::clone(&self.authority);
        let handle = tokio::spawn(async move { authority.submit_move(request).await });

        self.gate.close();
        self.thinking_was_shown = false;
        self.pending = Some(PendingRoundTrip {
            handle,
            rollback: RollbackState {
                from,
                to,
                original_from: rollback_from,
                original_to: rollback_to,
                castling: record,
            },
            thinking_deadline: now + THINKING_DELAY,
            tag,
        });
        Ok(())
    }

    /// Await the outstanding round trip, driving the thinking-indicator
    /// deadline; returns `None` when nothing is pending.
    pub async fn resolve_pending(&mut self) -> Option<MoveOutcome> {
        let mut pending = self.pending.take()?;

        let result = loop {
            tokio::select! {
                result = &mut pending.handle => break result,
                _ = tokio::time::sleep_until(pending.thinking_deadline), if !self.thinking_visible => {
                    debug!("[SESSION] no verdict after {THINKING_DELAY:?}, showing thinking indicator");
                    self.thinking_visible = true;
                    self.thinking_was_shown = true;
                }
            }
        };

        let outcome = match result {
            Ok(Ok(response)) => self.reconcile(response, &pending.rollback, pending.tag),
            Ok(Err(err)) => {
                warn!("[SESSION] round trip failed: {err}");
                self.fail_round_trip(&pending.rollback, pending.tag)
            }
            Err(err) => {
                error!("[SESSION] round trip task died: {err}");
                self.fail_round_trip(&pending.rollback, pending.tag)
            }
        };

        // the indicator never outlives a terminal outcome
        self.thinking_visible = false;
        Some(outcome)
    }

    // --- pumping ---

    /// Advance animations and notice expiry; reopens the gate once the
    /// opponent's reply has finished animating.
    pub fn tick(&mut self, now: Instant) {
        self.animations.tick(now, &mut self.board);
        self.status.prune(now);
        if self.reopen_after_reply && self.animations.is_idle() {
            self.reopen_after_reply = false;
            debug!("[SESSION] opponent reply animation drained, input reopened");
            self.gate.open();
        }
    }

    /// Pump until every transition has finished and the gate has settled
    pub async fn settle(&mut self) {
        loop {
            self.tick(Instant::now());
            if self.animations.is_idle() && !self.reopen_after_reply {
                return;
            }
            tokio::time::sleep(SETTLE_POLL).await;
        }
    }

    // --- new game ---

    /// Discard the session and restore the initial position.
    ///
    /// While a game is in progress this requires `confirmed`; once the game
    /// is over it does not. Mirrors a page reload: any in-flight request is
    /// abandoned.
    pub fn new_game(&mut self, confirmed: bool) -> bool {
        if !self.turn.game_over && !confirmed {
            debug!("[SESSION] new game refused without confirmation");
            return false;
        }
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
        self.board = BoardSnapshot::initial();
        self.selection.clear();
        self.turn = TurnState::default();
        self.gate = InputGate::default();
        self.status.clear();
        self.animations = AnimationSequencer::default();
        self.analysis = None;
        self.thinking_visible = false;
        self.thinking_was_shown = false;
        self.reopen_after_reply = false;
        info!("[SESSION] new game, player is {}", self.player_color);
        true
    }
}
