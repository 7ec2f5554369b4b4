//! Fixed timestep driver
//!
//! Hosts feed variable frame times and pointer events; the game only ever
//! sees whole `SIM_DT` steps. Pointer events queued between frames are
//! delivered with the first substep of the next frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::scene::Game;

/// Raw pointer input in scene coordinates (origin bottom-left, y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer events in arrival order
    pub pointer: Vec<PointerEvent>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.pointer.is_empty()
    }
}

/// Frame-time accumulator
#[derive(Debug, Default)]
pub struct FixedStep {
    accumulator: f32,
    input: TickInput,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a pointer event for the next substep
    pub fn push(&mut self, event: PointerEvent) {
        self.input.pointer.push(event);
    }

    pub fn pending(&self) -> &TickInput {
        &self.input
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns the tick count.
    ///
    /// Long frames are clamped and capped at `MAX_SUBSTEPS` so a stalled
    /// host does not spiral.
    pub fn advance(&mut self, game: &mut Game, frame_dt: f32) -> u32 {
        // NaN would poison the accumulator for good
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, 0.1)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            game.tick(&input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Forget buffered time and input (after a host pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.input = TickInput::default();
    }
}
