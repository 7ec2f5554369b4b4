//! Bundled asset catalog
//!
//! Sounds and images are referenced by name only. The catalog records which
//! names the host actually ships so a missing file turns into a logged,
//! skipped effect instead of a failure deeper in the host.

use std::collections::BTreeSet;

use crate::error::AssetError;

/// Background music loop
pub const MUSIC_LOOP: &str = "Guligulislowed.wav";
/// Played when the ball hits the ground
pub const FALL_SOUND: &str = "fallsound.wav";
/// Played when a collectible is consumed
pub const COLLECT_SOUND: &str = "collect.wav";
/// Sticker shown on collect
pub const PENGUIN_IMAGE: &str = "penguin";
/// Sticker shown on fall
pub const MONKE_IMAGE: &str = "monke";

/// Names of the resources available to the game
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    names: BTreeSet<String>,
}

impl AssetCatalog {
    /// Empty catalog (every lookup fails)
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every asset the game ships with
    pub fn bundled() -> Self {
        [MUSIC_LOOP, FALL_SOUND, COLLECT_SOUND, PENGUIN_IMAGE, MONKE_IMAGE]
            .into_iter()
            .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Look up an asset, returning its canonical name
    pub fn resolve<'a>(&'a self, name: &str) -> Result<&'a str, AssetError> {
        self.names
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AssetError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AssetCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_contains_all_cues() {
        let catalog = AssetCatalog::bundled();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.resolve(COLLECT_SOUND).unwrap(), COLLECT_SOUND);
        assert!(catalog.contains(MONKE_IMAGE));
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let mut catalog = AssetCatalog::bundled();
        assert!(catalog.remove(FALL_SOUND));
        assert_eq!(
            catalog.resolve(FALL_SOUND),
            Err(AssetError::NotFound {
                name: FALL_SOUND.to_string()
            })
        );
    }
}
