//! Scene controller
//!
//! `Game` owns the long-lived collaborators and exactly one active scene.
//! Switching mode tears the old scene down (physics cleared, world dropped)
//! before the new one is built from scratch.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::assets::AssetCatalog;
use crate::audio::{AudioBackend, AudioManager, LogAudio, SoundEffect};
use crate::consts::{FADE_TO_MENU, FADE_TO_PLAY};
use crate::settings::Settings;
use crate::sim::controls::{ControlKind, hit_test};
use crate::sim::physics::{BuiltinPhysics, Contact, PhysicsEngine};
use crate::sim::play::PlayScene;
use crate::sim::services::Services;
use crate::sim::state::{EntityIds, GameEvent, World};
use crate::sim::tick::{PointerEvent, TickInput};

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Menu,
    Play,
}

/// Mode switch requested by a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Menu,
    Play,
}

/// Title screen with a single start button
pub struct MenuScene {
    world: World,
}

impl MenuScene {
    pub fn new(svc: &mut Services) -> Self {
        Self {
            world: World::menu(svc.settings.scene_size(), &mut svc.ids),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn pointer_down(&self, pos: Vec2) -> Option<Navigation> {
        match hit_test(&self.world.controls, pos) {
            Some(ControlKind::Start) => Some(Navigation::Play),
            _ => None,
        }
    }
}

enum Scene {
    Menu(MenuScene),
    Play(PlayScene),
}

/// Game instance holding all state
pub struct Game {
    scene: Scene,
    svc: Services,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Game {
    /// Game with the built-in physics engine and a logging audio backend
    pub fn new(settings: Settings) -> Self {
        Self::with_collaborators(
            settings,
            Box::new(BuiltinPhysics::default()),
            Box::new(LogAudio),
            AssetCatalog::bundled(),
        )
    }

    /// Game driven by host-supplied physics, audio and assets. Starts in the menu.
    pub fn with_collaborators(
        settings: Settings,
        physics: Box<dyn PhysicsEngine>,
        audio_backend: Box<dyn AudioBackend>,
        assets: AssetCatalog,
    ) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Settings {
                    seed: settings.seed,
                    ..Settings::default()
                }
            }
        };
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Starting game (seed {seed})");

        let mut audio = AudioManager::new(audio_backend);
        audio.configure(&settings);

        let mut svc = Services {
            settings,
            physics,
            audio,
            assets,
            rng: Pcg32::seed_from_u64(seed),
            ids: EntityIds::new(),
            events: Vec::new(),
            clock: 0.0,
        };
        let scene = Scene::Menu(MenuScene::new(&mut svc));

        Self { scene, svc }
    }

    pub fn mode(&self) -> Mode {
        match self.scene {
            Scene::Menu(_) => Mode::Menu,
            Scene::Play(_) => Mode::Play,
        }
    }

    /// Replace whatever is active with a fresh menu
    pub fn enter_menu(&mut self) {
        self.svc.physics.clear();
        self.svc.audio.stop_music();
        self.scene = Scene::Menu(MenuScene::new(&mut self.svc));

        log::info!("Entered menu");
        self.svc.emit(GameEvent::ModeChanged {
            mode: Mode::Menu,
            fade_secs: FADE_TO_MENU,
        });
    }

    /// Replace whatever is active with a fresh play track
    pub fn enter_play(&mut self) {
        self.svc.physics.clear();
        self.svc.audio.stop_music();
        self.scene = Scene::Play(PlayScene::new(&mut self.svc));
        self.svc.play_sound(SoundEffect::Music);

        log::info!("Entered play");
        self.svc.emit(GameEvent::ModeChanged {
            mode: Mode::Play,
            fade_secs: FADE_TO_PLAY,
        });
    }

    fn navigate(&mut self, nav: Option<Navigation>) {
        match nav {
            Some(Navigation::Menu) => self.enter_menu(),
            Some(Navigation::Play) => self.enter_play(),
            None => {}
        }
    }

    // === Input ===

    pub fn pointer_down(&mut self, pos: Vec2) {
        let nav = match &mut self.scene {
            Scene::Menu(menu) => menu.pointer_down(pos),
            Scene::Play(play) => play.pointer_down(pos, &mut self.svc),
        };
        self.navigate(nav);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if let Scene::Play(play) = &mut self.scene {
            play.pointer_move(pos);
        }
    }

    pub fn pointer_up(&mut self) {
        if let Scene::Play(play) = &mut self.scene {
            play.pointer_up(&mut self.svc);
        }
    }

    /// Press a named control directly, bypassing hit testing
    pub fn press(&mut self, kind: ControlKind) {
        let nav = match &mut self.scene {
            Scene::Menu(_) => (kind == ControlKind::Start).then_some(Navigation::Play),
            Scene::Play(play) => play.activate(kind, &mut self.svc),
        };
        self.navigate(nav);
    }

    /// Contact-begin report from a host physics engine
    pub fn on_contact(&mut self, contact: Contact) {
        if let Scene::Play(play) = &mut self.scene {
            play.on_contact(contact, &mut self.svc);
        }
    }

    // === Simulation ===

    /// Advance one fixed step: input, physics and contacts, then timers
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        for event in &input.pointer {
            match *event {
                PointerEvent::Down(pos) => self.pointer_down(pos),
                PointerEvent::Move(pos) => self.pointer_move(pos),
                PointerEvent::Up(_) => self.pointer_up(),
            }
        }

        if let Scene::Play(play) = &mut self.scene {
            play.step(dt, &mut self.svc);
        }

        self.svc.clock += f64::from(dt);

        if let Scene::Play(play) = &mut self.scene {
            play.run_timers(&mut self.svc);
        }
    }

    /// Take every event emitted since the last call
    ///
    /// Events queue up until drained, so hosts should call this once per frame.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.svc.events)
    }

    // === Accessors ===

    /// Entities of the active scene
    pub fn world(&self) -> &World {
        match &self.scene {
            Scene::Menu(menu) => menu.world(),
            Scene::Play(play) => play.world(),
        }
    }

    pub fn play_scene(&self) -> Option<&PlayScene> {
        match &self.scene {
            Scene::Play(play) => Some(play),
            Scene::Menu(_) => None,
        }
    }

    /// Current score (Play only)
    pub fn score(&self) -> Option<u32> {
        self.play_scene().map(|p| p.session().score())
    }

    pub fn clock(&self) -> f64 {
        self.svc.clock
    }

    pub fn settings(&self) -> &Settings {
        &self.svc.settings
    }

    pub fn physics(&self) -> &dyn PhysicsEngine {
        self.svc.physics.as_ref()
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.svc.audio
    }
}
