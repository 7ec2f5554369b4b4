//! Game settings and preferences
//!
//! Loaded from an optional JSON file; every field has a default so partial
//! files are fine.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCENE_HEIGHT, SCENE_WIDTH};
use crate::error::SettingsError;

/// Smallest scene that still leaves room for the collectible spawn band
pub const MIN_SCENE_SIZE: f32 = 200.0;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scene ===
    /// Scene width in scene units
    pub scene_width: f32,
    /// Scene height in scene units
    pub scene_height: f32,
    /// RNG seed for collectible placement (random when absent)
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start muted
    pub muted: bool,

    // === Visual cues ===
    /// Collect/fall stickers
    pub stickers: bool,
    /// Reduced motion (suppresses stickers)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,
            seed: None,

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,

            stickers: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Scene size as a vector
    pub fn scene_size(&self) -> Vec2 {
        Vec2::new(self.scene_width, self.scene_height)
    }

    /// Effective sticker cues (respects reduced_motion)
    pub fn effective_stickers(&self) -> bool {
        self.stickers && !self.reduced_motion
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fits = |v: f32| v.is_finite() && v >= MIN_SCENE_SIZE;
        if !(fits(self.scene_width) && fits(self.scene_height)) {
            return Err(SettingsError::SceneTooSmall {
                width: self.scene_width,
                height: self.scene_height,
            });
        }

        for (field, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::VolumeOutOfRange { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(settings.muted);
        assert_eq!(settings.scene_width, SCENE_WIDTH);
        assert_eq!(settings.scene_height, SCENE_HEIGHT);
    }

    #[test]
    fn test_rejects_tiny_scene() {
        let err = Settings::from_json(r#"{ "scene_width": 100.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::SceneTooSmall { .. }));
    }

    #[test]
    fn test_rejects_non_finite_scene() {
        let settings = Settings {
            scene_height: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::SceneTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_volume() {
        let err = Settings::from_json(r#"{ "sfx_volume": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::VolumeOutOfRange { field: "sfx_volume", .. }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/path-roller/settings.json");
        assert_eq!(Settings::load_or_default(Some(path)), Settings::default());
    }

    #[test]
    fn test_reduced_motion_hides_stickers() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_stickers());
    }
}
