//! Audio cues
//!
//! The game never mixes audio itself: it resolves a named asset and hands it
//! to an `AudioBackend`. Failures are logged and the cue is skipped.

use crate::assets::{AssetCatalog, COLLECT_SOUND, FALL_SOUND, MUSIC_LOOP};
use crate::error::AssetError;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Looping background track (started on entering Play)
    Music,
    /// Ball hit the ground
    Fall,
    /// Collectible consumed
    Collect,
}

impl SoundEffect {
    /// Asset name in the bundle
    pub fn asset(self) -> &'static str {
        match self {
            SoundEffect::Music => MUSIC_LOOP,
            SoundEffect::Fall => FALL_SOUND,
            SoundEffect::Collect => COLLECT_SOUND,
        }
    }

    /// Base volume before master/channel scaling
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Music => 0.5,
            SoundEffect::Fall | SoundEffect::Collect => 1.0,
        }
    }

    pub fn looping(self) -> bool {
        matches!(self, SoundEffect::Music)
    }
}

/// Host audio output. Fire-and-forget: no completion or retry.
pub trait AudioBackend {
    /// Start playing a resolved asset
    fn play(&mut self, asset: &str, volume: f32, looping: bool) -> Result<(), AssetError>;

    /// Stop every looping sound (music)
    fn stop_loops(&mut self);
}

/// Backend that only logs; used by the native demo and headless runs
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, asset: &str, volume: f32, looping: bool) -> Result<(), AssetError> {
        log::debug!("play {asset} (volume {volume:.2}, looping {looping})");
        Ok(())
    }

    fn stop_loops(&mut self) {
        log::debug!("stop looping audio");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogAudio))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
        }
    }

    /// Apply volume/mute preferences
    pub fn configure(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume for an effect
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = match effect {
            SoundEffect::Music => self.music_volume,
            SoundEffect::Fall | SoundEffect::Collect => self.sfx_volume,
        };
        effect.base_volume() * self.master_volume * channel
    }

    /// Play a sound effect. Returns whether the backend accepted it.
    pub fn play(&mut self, effect: SoundEffect, assets: &AssetCatalog) -> bool {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return false;
        }

        let result = assets
            .resolve(effect.asset())
            .and_then(|asset| self.backend.play(asset, vol, effect.looping()));

        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Skipping {effect:?} sound: {e}");
                false
            }
        }
    }

    /// Stop the background loop
    pub fn stop_music(&mut self) {
        self.backend.stop_loops();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Backend that records every call for assertions
    #[derive(Clone, Default)]
    pub(crate) struct RecordingAudio {
        pub played: Rc<RefCell<Vec<(String, f32, bool)>>>,
        pub stops: Rc<RefCell<u32>>,
    }

    impl RecordingAudio {
        pub fn names(&self) -> Vec<String> {
            self.played.borrow().iter().map(|(n, _, _)| n.clone()).collect()
        }
    }

    impl AudioBackend for RecordingAudio {
        fn play(&mut self, asset: &str, volume: f32, looping: bool) -> Result<(), AssetError> {
            self.played
                .borrow_mut()
                .push((asset.to_string(), volume, looping));
            Ok(())
        }

        fn stop_loops(&mut self) {
            *self.stops.borrow_mut() += 1;
        }
    }

    #[test]
    fn test_play_scales_volume() {
        let recorder = RecordingAudio::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(0.5);
        audio.set_music_volume(0.5);

        assert!(audio.play(SoundEffect::Music, &AssetCatalog::bundled()));
        assert!(audio.play(SoundEffect::Collect, &AssetCatalog::bundled()));

        let played = recorder.played.borrow();
        assert_eq!(played[0], (MUSIC_LOOP.to_string(), 0.125, true));
        assert_eq!(played[1], (COLLECT_SOUND.to_string(), 0.5, false));
    }

    #[test]
    fn test_missing_asset_is_skipped() {
        let recorder = RecordingAudio::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        let mut assets = AssetCatalog::bundled();
        assets.remove(FALL_SOUND);

        assert!(!audio.play(SoundEffect::Fall, &assets));
        assert!(recorder.played.borrow().is_empty());
    }

    #[test]
    fn test_muted_plays_nothing() {
        let recorder = RecordingAudio::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_muted(true);

        assert!(!audio.play(SoundEffect::Collect, &AssetCatalog::bundled()));
        assert!(recorder.played.borrow().is_empty());
    }
}
