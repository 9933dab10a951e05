//! Turn and game-over state, echoed from the authority
//!
//! The client never advances the turn on its own: every field here is set
//! from a server response, or left at the initial values the page (or a new
//! game) starts from.

use crate::board::PieceColor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub current_turn: PieceColor,
    pub in_check: bool,
    pub game_over: bool,
    pub winner: Option<PieceColor>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            current_turn: PieceColor::White,
            in_check: false,
            game_over: false,
            winner: None,
        }
    }
}

impl TurnState {
    /// Fold in the turn fields of a verdict; absent fields leave state alone
    pub fn update(&mut self, current_turn: Option<PieceColor>, in_check: Option<bool>) {
        if let Some(turn) = current_turn {
            self.current_turn = turn;
        }
        if let Some(check) = in_check {
            self.in_check = check;
        }
    }

    /// Enter the absorbing game-over state
    pub fn conclude(&mut self, winner: Option<PieceColor>) {
        self.game_over = true;
        self.winner = winner;
        self.in_check = false;
    }

    /// Turn indicator line, e.g. `White to move (You are white)`
    pub fn banner(&self, player: PieceColor) -> String {
        if self.game_over {
            return match self.winner {
                Some(winner) => format!("{winner} wins!"),
                None => "Game over".to_string(),
            };
        }
        format!("{} to move (You are {player})", self.current_turn.capitalized())
    }
}
