//! Two-phase timed transitions
//!
//! A transition fades both cells out for 300 ms, performs the content swap
//! exactly once at the phase boundary, then fades back in for 300 ms. The
//! swap is a single named operation on the snapshot, so the displayed and
//! logical state can only become consistent at that boundary, never
//! mid-fade. Transitions belonging to one move attempt share a tag so a
//! rollback can cancel them atomically.
//!
//! The sequencer is deadline-driven: callers pump it with `tick`, and all
//! timestamps are `tokio::time::Instant` so the paused test clock applies.

use crate::board::{BoardSnapshot, Square};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Length of each fade phase
pub const PHASE_DURATION: Duration = Duration::from_millis(300);
/// How long the opponent's move markers stay lit
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);

/// Where a transition currently is in its two-phase sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Start delay (stagger) has not elapsed yet
    Pending,
    FadeOut,
    FadeIn,
    Done,
}

#[derive(Debug)]
struct Transition {
    from: Square,
    to: Square,
    starts_at: Instant,
    applied: bool,
    /// Move attempt this transition belongs to, for atomic cancellation
    tag: Option<u64>,
}

impl Transition {
    fn phase(&self, now: Instant) -> TransitionPhase {
        if now < self.starts_at {
            TransitionPhase::Pending
        } else if now < self.starts_at + PHASE_DURATION {
            TransitionPhase::FadeOut
        } else if now < self.starts_at + 2 * PHASE_DURATION {
            TransitionPhase::FadeIn
        } else {
            TransitionPhase::Done
        }
    }
}

#[derive(Debug)]
struct Highlight {
    square: Square,
    expires_at: Instant,
}

/// Schedules and drives all visual transitions for one session
#[derive(Debug, Default)]
pub struct AnimationSequencer {
    transitions: Vec<Transition>,
    highlights: Vec<Highlight>,
}

impl AnimationSequencer {
    /// Schedule a move transition; `delay` is the stagger before phase 1
    pub fn begin(&mut self, from: Square, to: Square, delay: Duration, tag: Option<u64>, now: Instant) {
        trace!("[ANIM] transition {from} -> {to} (+{delay:?})");
        self.transitions.push(Transition {
            from,
            to,
            starts_at: now + delay,
            applied: false,
            tag,
        });
    }

    /// Light up squares for the highlight window (opponent's move markers)
    pub fn highlight<I: IntoIterator<Item = Square>>(&mut self, squares: I, now: Instant) {
        let expires_at = now + HIGHLIGHT_DURATION;
        self.highlights
            .extend(squares.into_iter().map(|square| Highlight { square, expires_at }));
    }

    /// Advance every transition to `now`, performing each content swap
    /// exactly once at its phase boundary and retiring finished transitions.
    pub fn tick(&mut self, now: Instant, board: &mut BoardSnapshot) {
        for transition in &mut self.transitions {
            if !transition.applied && now >= transition.starts_at + PHASE_DURATION {
                board.move_content(transition.from, transition.to);
                transition.applied = true;
                trace!("[ANIM] applied {} -> {}", transition.from, transition.to);
            }
        }
        self.transitions
            .retain(|t| !(t.applied && t.phase(now) == TransitionPhase::Done));
        self.highlights.retain(|h| now < h.expires_at);
    }

    /// Drop every transition of one move attempt without applying the
    /// pending swaps; the caller restores cell content itself
    pub fn cancel_attempt(&mut self, tag: u64) {
        self.transitions.retain(|t| t.tag != Some(tag));
    }

    /// Drop a single leg of an attempt (used when the authority disagrees
    /// with the locally guessed rook destination)
    pub fn cancel_leg(&mut self, tag: u64, from: Square, to: Square) {
        self.transitions
            .retain(|t| !(t.tag == Some(tag) && t.from == from && t.to == to));
    }

    /// No transitions outstanding (highlights do not count)
    pub fn is_idle(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn phase_of(&self, square: Square, now: Instant) -> Option<TransitionPhase> {
        self.transitions
            .iter()
            .find(|t| t.from == square || t.to == square)
            .map(|t| t.phase(now))
    }

    pub fn is_highlighted(&self, square: Square, now: Instant) -> bool {
        self.highlights
            .iter()
            .any(|h| h.square == square && now < h.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, PieceColor, PieceKind};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn pawn_board() -> BoardSnapshot {
        let mut board = BoardSnapshot::empty();
        board.set(sq("e2"), Some(Piece::new(PieceKind::Pawn, PieceColor::White)));
        board
    }

    #[test]
    fn test_swap_happens_at_phase_boundary_only() {
        let mut board = pawn_board();
        let mut sequencer = AnimationSequencer::default();
        let start = Instant::now();
        sequencer.begin(sq("e2"), sq("e4"), Duration::ZERO, None, start);

        sequencer.tick(start + Duration::from_millis(100), &mut board);
        assert!(board.piece_at(sq("e2")).is_some(), "swap ran mid-fade");

        sequencer.tick(start + PHASE_DURATION, &mut board);
        assert!(board.piece_at(sq("e2")).is_none());
        assert!(board.piece_at(sq("e4")).is_some());
        assert!(!sequencer.is_idle(), "fade-in phase still running");

        sequencer.tick(start + 2 * PHASE_DURATION, &mut board);
        assert!(sequencer.is_idle());
    }

    #[test]
    fn test_apply_runs_exactly_once() {
        let mut board = pawn_board();
        let mut sequencer = AnimationSequencer::default();
        let start = Instant::now();
        sequencer.begin(sq("e2"), sq("e4"), Duration::ZERO, None, start);

        sequencer.tick(start + PHASE_DURATION, &mut board);
        let after_apply = board.clone();
        // further ticks inside the fade-in window must not re-run the swap
        sequencer.tick(start + PHASE_DURATION + Duration::from_millis(100), &mut board);
        assert_eq!(board, after_apply);
    }

    #[test]
    fn test_large_tick_still_applies() {
        //! A tick that jumps past both phases must not skip the swap
        let mut board = pawn_board();
        let mut sequencer = AnimationSequencer::default();
        let start = Instant::now();
        sequencer.begin(sq("e2"), sq("e4"), Duration::ZERO, None, start);

        sequencer.tick(start + Duration::from_secs(5), &mut board);
        assert!(board.piece_at(sq("e4")).is_some());
        assert!(sequencer.is_idle());
    }

    #[test]
    fn test_stagger_delays_both_phases() {
        let mut board = pawn_board();
        let mut sequencer = AnimationSequencer::default();
        let start = Instant::now();
        let delay = Duration::from_millis(300);
        sequencer.begin(sq("e2"), sq("e4"), delay, None, start);

        assert_eq!(sequencer.phase_of(sq("e2"), start), Some(TransitionPhase::Pending));
        sequencer.tick(start + PHASE_DURATION, &mut board);
        assert!(board.piece_at(sq("e2")).is_some(), "stagger ignored");
        sequencer.tick(start + delay + PHASE_DURATION, &mut board);
        assert!(board.piece_at(sq("e4")).is_some());
    }

    #[test]
    fn test_cancel_attempt_drops_unapplied_swaps() {
        let mut board = pawn_board();
        board.set(sq("h1"), Some(Piece::new(PieceKind::Rook, PieceColor::White)));
        let mut sequencer = AnimationSequencer::default();
        let start = Instant::now();
        sequencer.begin(sq("e2"), sq("e4"), Duration::ZERO, Some(7), start);
        sequencer.begin(sq("h1"), sq("f1"), Duration::ZERO, Some(7), start);

        sequencer.cancel_attempt(7);
        assert!(sequencer.is_idle());
        sequencer.tick(start + Duration::from_secs(1), &mut board);
        assert!(board.piece_at(sq("e2")).is_some());
        assert!(board.piece_at(sq("h1")).is_some());
    }

    #[test]
    fn test_highlights_expire() {
        let mut sequencer = AnimationSequencer::default();
        let start = Instant::now();
        sequencer.highlight([sq("e7"), sq("e5")], start);
        assert!(sequencer.is_highlighted(sq("e7"), start + Duration::from_secs(1)));
        assert!(!sequencer.is_highlighted(sq("e7"), start + HIGHLIGHT_DURATION));

        let mut board = BoardSnapshot::empty();
        sequencer.tick(start + HIGHLIGHT_DURATION, &mut board);
        assert!(!sequencer.is_highlighted(sq("e5"), start + Duration::from_secs(1)));
    }
}
