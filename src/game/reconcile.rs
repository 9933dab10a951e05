//! Verdict handling: commit, correct, or roll back a speculative move
//!
//! A speculative move is already animating (or applied) when the verdict
//! arrives. Committing means layering in everything the authority added:
//! the confirmed rook leg, the opponent's counter-move, turn and check
//! state. Rolling back means cancelling every transition of the attempt
//! and restoring the exact cell content captured at submission, in one
//! synchronous pass with the gate still closed.

use crate::board::Square;
use crate::game::session::{
    GameSession, MoveAnalysis, MoveOutcome, RollbackState, NOTICE_TRANSPORT,
    OPPONENT_ROOK_STAGGER, ROOK_STAGGER,
};
use crate::net::{Authority, CastlingInfo, MoveResponse, OpponentMove};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

impl<A: Authority> GameSession<A> {
    /// Fold one verdict into the session. Runs synchronously; no input can
    /// interleave because the gate is still closed from submission.
    pub(crate) fn reconcile(
        &mut self,
        response: MoveResponse,
        rollback: &RollbackState,
        tag: u64,
    ) -> MoveOutcome {
        if !response.valid {
            return self.reject(response, rollback, tag);
        }

        let now = Instant::now();

        if let Some(player) = response.move_analysis {
            self.analysis = Some(MoveAnalysis {
                player,
                opponent: response.ai_move_analysis,
            });
        }

        self.confirm_rook_leg(rollback, response.castling_info, tag, now);

        self.turn.update(response.current_turn, response.in_check);

        let mut awaiting_reply_animation = false;
        if let Some(reply) = response.ai_move {
            self.apply_opponent_move(reply, now);
            awaiting_reply_animation = true;
            if self.turn.in_check {
                let notice = response
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("{} is in check!", self.turn.current_turn));
                self.status.success(notice);
            }
        }

        let game_over = response.game_over.unwrap_or(false);
        if game_over {
            self.turn.conclude(response.winner);
            self.gate.freeze();
            let notice = response.message.unwrap_or_else(|| self.turn.banner(self.player_color));
            info!("[RECONCILE] game over: {notice}");
            self.status.success(notice);
        } else if awaiting_reply_animation {
            // input stays gated until the reply animation drains
            self.reopen_after_reply = true;
        } else {
            self.gate.open();
        }

        MoveOutcome::Committed { game_over }
    }

    /// Authority said no: restore every touched cell and surface the reason
    fn reject(&mut self, response: MoveResponse, rollback: &RollbackState, tag: u64) -> MoveOutcome {
        let notice = response.message.unwrap_or_else(|| "Invalid move!".to_string());
        info!("[RECONCILE] rejected {} -> {}: {notice}", rollback.from, rollback.to);
        self.roll_back(rollback, tag);
        self.status.error(notice);
        if response.game_over.unwrap_or(false) {
            // rejection and game-over can coincide (e.g. flag fall); the
            // board still reverts, but input locks for good
            self.turn.conclude(response.winner);
            self.gate.freeze();
        } else {
            self.gate.open();
        }
        MoveOutcome::RolledBack
    }

    /// Transport or task failure: same rollback, generic notice
    pub(crate) fn fail_round_trip(&mut self, rollback: &RollbackState, tag: u64) -> MoveOutcome {
        self.roll_back(rollback, tag);
        self.status.error(NOTICE_TRANSPORT);
        self.gate.open();
        MoveOutcome::RolledBack
    }

    /// Cancel the attempt's transitions and restore captured cell content.
    /// Restores are exact writes of the pre-move content, so it is correct
    /// whether or not the speculative swap had applied yet.
    fn roll_back(&mut self, rollback: &RollbackState, tag: u64) {
        self.animations.cancel_attempt(tag);
        self.board.set(rollback.from, rollback.original_from);
        self.board.set(rollback.to, rollback.original_to);
        if let Some(record) = &rollback.castling {
            self.board.set(record.rook_from, record.original_rook_from);
            self.board.set(record.rook_to, record.original_rook_to);
        }
        debug!("[RECONCILE] rolled back {} -> {}", rollback.from, rollback.to);
    }

    /// Reconcile the locally guessed rook leg with the authority's.
    ///
    /// On a match the speculative leg stands. On a mismatch (or when the
    /// client never detected the castling) the guessed leg is cancelled,
    /// its cells restored, and the authority's leg animated instead.
    fn confirm_rook_leg(
        &mut self,
        rollback: &RollbackState,
        confirmed: Option<CastlingInfo>,
        tag: u64,
        now: Instant,
    ) {
        let Some(info) = confirmed else {
            // verdict carries no rook leg; a stale local guess reverts
            if let Some(record) = &rollback.castling {
                warn!("[RECONCILE] authority dropped the rook leg, reverting local guess");
                self.animations.cancel_leg(tag, record.rook_from, record.rook_to);
                self.board.set(record.rook_from, record.original_rook_from);
                self.board.set(record.rook_to, record.original_rook_to);
            }
            return;
        };

        let (Some(rook_from), Some(rook_to)) = (
            Square::try_new(info.row, info.rook_from_col),
            Square::try_new(info.row, info.rook_to_col),
        ) else {
            warn!("[RECONCILE] rook leg out of range: {info:?}");
            return;
        };

        match &rollback.castling {
            Some(record) if record.rook_from == rook_from && record.rook_to == rook_to => {
                debug!("[RECONCILE] rook leg confirmed {rook_from} -> {rook_to}");
            }
            Some(record) => {
                info!(
                    "[RECONCILE] rook leg corrected: guessed {} -> {}, confirmed {rook_from} -> {rook_to}",
                    record.rook_from, record.rook_to
                );
                self.animations.cancel_leg(tag, record.rook_from, record.rook_to);
                self.board.set(record.rook_from, record.original_rook_from);
                self.board.set(record.rook_to, record.original_rook_to);
                self.animations.begin(rook_from, rook_to, ROOK_STAGGER, None, now);
            }
            None => {
                // client missed the compound move entirely; play the leg late
                self.animations.begin(rook_from, rook_to, ROOK_STAGGER, None, now);
            }
        }
    }

    /// Animate the opponent's counter-move and light up its squares
    fn apply_opponent_move(&mut self, reply: OpponentMove, now: Instant) {
        let (Some(from), Some(to)) = (
            Square::try_new(reply.from_row, reply.from_col),
            Square::try_new(reply.to_row, reply.to_col),
        ) else {
            warn!("[RECONCILE] opponent move out of range: {reply:?}");
            return;
        };

        info!("[RECONCILE] opponent plays {from} -> {to}");
        self.animations.highlight([from, to], now);
        self.animations.begin(from, to, Duration::ZERO, None, now);

        if reply.is_castling {
            if let Some(info) = reply.castling_info {
                if let (Some(rook_from), Some(rook_to)) = (
                    Square::try_new(info.row, info.rook_from_col),
                    Square::try_new(info.row, info.rook_to_col),
                ) {
                    self.animations
                        .begin(rook_from, rook_to, OPPONENT_ROOK_STAGGER, None, now);
                } else {
                    warn!("[RECONCILE] opponent rook leg out of range: {info:?}");
                }
            }
        }
    }
}
