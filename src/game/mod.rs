//! Client-side game state and the optimistic move protocol

pub mod animation;
pub mod castling;
pub mod input_gate;
pub mod selection;
pub mod session;
pub mod status;
pub mod turn;

mod reconcile;

pub use animation::{AnimationSequencer, TransitionPhase, HIGHLIGHT_DURATION, PHASE_DURATION};
pub use input_gate::{GateState, InputGate};
pub use selection::Selection;
pub use session::{Activation, GameSession, MoveAnalysis, MoveOutcome};
pub use status::{StatusFeed, StatusNotice, StatusTone, STATUS_VISIBLE};
pub use turn::TurnState;
