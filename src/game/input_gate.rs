//! Input gate: single-flight lock over move submission

/// Gate position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// No round trip outstanding; moves may be attempted
    #[default]
    Open,
    /// A round trip or the opponent's reply animation is outstanding
    Closed,
    /// Game over; absorbing, the gate never reopens
    Frozen,
}

/// Boolean-with-a-latch lock over the move pipeline.
///
/// Closed at submission time so a second move intent can never be in flight;
/// frozen permanently once the authority declares the game concluded.
#[derive(Debug, Default)]
pub struct InputGate {
    state: GateState,
}

impl InputGate {
    pub fn can_move(&self) -> bool {
        self.state == GateState::Open
    }

    pub fn close(&mut self) {
        if self.state != GateState::Frozen {
            self.state = GateState::Closed;
        }
    }

    /// Reopen after a terminal outcome; a no-op once frozen
    pub fn open(&mut self) {
        if self.state != GateState::Frozen {
            self.state = GateState::Open;
        }
    }

    pub fn freeze(&mut self) {
        self.state = GateState::Frozen;
    }

    pub fn is_frozen(&self) -> bool {
        self.state == GateState::Frozen
    }

    pub fn state(&self) -> GateState {
        self.state
    }
}
