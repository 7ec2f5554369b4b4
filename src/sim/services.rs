//! Collaborators shared by every scene
//!
//! Scenes come and go on each mode switch; these live for the whole game.

use rand_pcg::Pcg32;

use super::physics::PhysicsEngine;
use super::state::{EntityIds, GameEvent};
use crate::assets::AssetCatalog;
use crate::audio::{AudioManager, SoundEffect};
use crate::settings::Settings;

pub struct Services {
    pub settings: Settings,
    pub physics: Box<dyn PhysicsEngine>,
    pub audio: AudioManager,
    pub assets: AssetCatalog,
    /// Collectible placement
    pub rng: Pcg32,
    pub ids: EntityIds,
    /// Pending notifications for the host; unbounded until `Game::drain_events`
    pub events: Vec<GameEvent>,
    /// Simulation clock (seconds)
    pub clock: f64,
}

impl Services {
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Fire-and-forget sound cue
    pub fn play_sound(&mut self, effect: SoundEffect) -> bool {
        self.audio.play(effect, &self.assets)
    }
}
