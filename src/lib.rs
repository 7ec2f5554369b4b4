//! Path Roller - draw a track, roll a ball, collect coins
//!
//! Core modules:
//! - `scene`: Menu/Play mode switching (the `Game` entry point)
//! - `sim`: Path capture, play session, contacts, timers and physics
//! - `audio`: Sound cues over a pluggable backend
//! - `assets`: Bundled named resources
//! - `settings`: JSON configuration

pub mod assets;
pub mod audio;
pub mod error;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{AssetError, SettingsError};
pub use scene::{Game, Mode};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default scene dimensions (scene coordinates, y up)
    pub const SCENE_WIDTH: f32 = 800.0;
    pub const SCENE_HEIGHT: f32 = 600.0;

    /// Gravity in scene units/s² (9.8 m/s² at 150 units per meter)
    pub const GRAVITY: f32 = -9.8 * 150.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_MASS: f32 = 4.0;
    pub const BALL_FRICTION: f32 = 0.5;
    pub const BALL_RESTITUTION: f32 = 0.2;
    /// Horizontal offset of the spawn point from the stroke's left edge
    pub const BALL_SPAWN_INSET: f32 = 5.0;
    /// Speed cap so a single step never exceeds the ball radius
    pub const BALL_MAX_SPEED: f32 = 1800.0;

    /// Impulse applied per left/right tap
    pub const MOVE_FORCE: f32 = 500.0;

    /// Path boundary friction
    pub const PATH_FRICTION: f32 = 0.5;

    /// Ground strip along the bottom edge
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Collectibles
    pub const COLLECTIBLE_RADIUS: f32 = 10.0;
    pub const COLLECTIBLE_COUNT: usize = 5;
    /// Horizontal margin from the scene edges for random placement
    pub const COLLECTIBLE_MARGIN_X: f32 = 50.0;
    /// Gap kept below the top edge for random placement
    pub const COLLECTIBLE_TOP_GAP: f32 = 100.0;

    /// Scoring
    pub const SCORE_STEP: u32 = 10;
    pub const WIN_SCORE: u32 = 50;

    /// Reset delays (seconds)
    pub const FALL_RESET_DELAY: f64 = 2.0;
    pub const WIN_RESET_DELAY: f64 = 2.0;
    pub const CLEAR_RESET_DELAY: f64 = 1.0;

    /// Sticker lifetime (0.5s drift + 0.5s fade)
    pub const STICKER_LIFETIME: f64 = 1.0;

    /// Fade durations handed to the host on mode switches
    pub const FADE_TO_PLAY: f32 = 1.0;
    pub const FADE_TO_MENU: f32 = 0.5;
}

/// Axis-aligned bounds of a point set as (min, max), `None` when empty
pub fn bounding_box(points: &[Vec2]) -> Option<(Vec2, Vec2)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        assert!(bounding_box(&[]).is_none());

        let (min, max) = bounding_box(&[
            Vec2::new(100.0, 400.0),
            Vec2::new(300.0, 300.0),
            Vec2::new(250.0, 450.0),
        ])
        .unwrap();
        assert_eq!(min, Vec2::new(100.0, 300.0));
        assert_eq!(max, Vec2::new(300.0, 450.0));
    }
}
