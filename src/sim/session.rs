//! Play session scoring and reset lifecycle
//!
//! `Active` is the normal state. A fall, a win or the clear button moves
//! the session to `Cleared` and asks for exactly one delayed reset; while
//! `Cleared`, further triggers are absorbed until `reset` runs.

use serde::{Deserialize, Serialize};

use crate::consts::{CLEAR_RESET_DELAY, FALL_RESET_DELAY, SCORE_STEP, WIN_RESET_DELAY, WIN_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Active,
    /// A reset is pending
    Cleared,
}

/// Why a reset was scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    Fall,
    Win,
    Clear,
}

impl ResetCause {
    /// Seconds between the trigger and the reset
    pub fn delay(self) -> f64 {
        match self {
            ResetCause::Fall => FALL_RESET_DELAY,
            ResetCause::Win => WIN_RESET_DELAY,
            ResetCause::Clear => CLEAR_RESET_DELAY,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaySession {
    score: u32,
    state: SessionState,
}

impl PlaySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_cleared(&self) -> bool {
        self.state == SessionState::Cleared
    }

    /// Credit one consumed collectible, returning the new score
    pub fn credit_collectible(&mut self) -> u32 {
        self.score += SCORE_STEP;
        self.score
    }

    /// Win check: score threshold or nothing left to collect
    pub fn is_won(&self, remaining_collectibles: usize) -> bool {
        self.score >= WIN_SCORE || remaining_collectibles == 0
    }

    /// Enter `Cleared`, returning the reset delay. `None` if a reset is already pending.
    pub fn begin_clear(&mut self, cause: ResetCause) -> Option<f64> {
        match self.state {
            SessionState::Active => {
                self.state = SessionState::Cleared;
                Some(cause.delay())
            }
            SessionState::Cleared => None,
        }
    }

    /// Back to a fresh, active session
    pub fn reset(&mut self) {
        self.score = 0;
        self.state = SessionState::Active;
    }

    /// HUD text
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }
}
