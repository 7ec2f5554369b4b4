//! Error types
//!
//! Nothing here is fatal to a running game: asset errors disable a single
//! effect, settings errors fall back to defaults at the call site.

use core::fmt;

/// Lookup failure in the bundled asset catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    NotFound { name: String },
    /// The host backend refused to play a resolved asset
    Playback { name: String, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "asset not found: {name}"),
            Self::Playback { name, reason } => {
                write!(f, "failed to play asset {name}: {reason}")
            }
        }
    }
}

impl std::error::Error for AssetError {}

/// Failure loading or validating `Settings`
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    SceneTooSmall { width: f32, height: f32 },
    VolumeOutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read settings: {e}"),
            Self::Parse(e) => write!(f, "invalid settings JSON: {e}"),
            Self::SceneTooSmall { width, height } => {
                write!(f, "scene {width}x{height} is too small to place collectibles")
            }
            Self::VolumeOutOfRange { field, value } => {
                write!(f, "{field} must be within 0.0..=1.0, got {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
