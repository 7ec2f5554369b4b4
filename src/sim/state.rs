//! World state and core entity types
//!
//! A `World` is the whole entity set of the active mode. It is never patched
//! across a mode switch or a track reset: a fresh one is built and the old
//! one dropped, together with every physics body it registered.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::contact::Category;
use super::controls::{self, Control, ControlKind};
use super::physics::{BodyDesc, Material, PhysicsEngine, Shape};
use super::session::ResetCause;
use crate::assets::{MONKE_IMAGE, PENGUIN_IMAGE};
use crate::consts::*;
use crate::scene::Mode;

/// Entity identifier, also used as the physics body id
pub type EntityId = u32;

/// Game-lifetime id allocator; ids are never reused across worlds
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: EntityId,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Static strip along the bottom edge; touching it ends the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    pub id: EntityId,
    pub center: Vec2,
    pub half_size: Vec2,
}

impl Ground {
    pub fn new(id: EntityId, scene: Vec2) -> Self {
        Self {
            id,
            center: Vec2::new(scene.x / 2.0, GROUND_HEIGHT / 2.0),
            half_size: Vec2::new(scene.x / 2.0, GROUND_HEIGHT / 2.0),
        }
    }

    pub fn body_desc(&self) -> BodyDesc {
        BodyDesc::fixed(
            Category::Ground,
            Shape::Box {
                half_size: self.half_size,
            },
        )
        .with_position(self.center)
    }
}

/// The rolling ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: EntityId,
    /// Last position reported by the physics engine
    pub pos: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: BALL_RADIUS,
        }
    }

    pub fn body_desc(&self) -> BodyDesc {
        BodyDesc::dynamic(Category::Ball, Shape::Circle { radius: self.radius })
            .with_position(self.pos)
            .with_material(Material {
                friction: BALL_FRICTION,
                restitution: BALL_RESTITUTION,
                mass: BALL_MASS,
            })
    }
}

/// A coin waiting to be picked up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
}

impl Collectible {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: COLLECTIBLE_RADIUS,
        }
    }

    pub fn body_desc(&self) -> BodyDesc {
        BodyDesc::sensor(Category::Collectible, Shape::Circle { radius: self.radius })
            .with_position(self.pos)
    }
}

/// A finalized stroke turned into an immovable edge chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathBoundary {
    pub id: EntityId,
    pub points: Vec<Vec2>,
}

impl PathBoundary {
    pub fn body_desc(&self) -> BodyDesc {
        BodyDesc::fixed(
            Category::Path,
            Shape::EdgeChain {
                points: self.points.clone(),
            },
        )
        .with_material(Material {
            friction: PATH_FRICTION,
            ..Default::default()
        })
    }
}

/// Transient image cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StickerKind {
    /// Shown where a collectible was consumed
    Penguin,
    /// Shown where the ball hit the ground
    Monke,
}

impl StickerKind {
    pub fn image(self) -> &'static str {
        match self {
            StickerKind::Penguin => PENGUIN_IMAGE,
            StickerKind::Monke => MONKE_IMAGE,
        }
    }

    pub fn scale(self) -> f32 {
        match self {
            StickerKind::Penguin => 0.2,
            StickerKind::Monke => 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sticker {
    pub id: EntityId,
    pub kind: StickerKind,
    pub pos: Vec2,
}

/// Centered popup panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Popup {
    Help,
    Win,
}

impl Popup {
    pub fn text(self) -> &'static str {
        match self {
            Popup::Help => {
                "Draw a path to guide the ball.\nCollect coins for points.\nUse buttons to move the ball."
            }
            Popup::Win => "Well Done! 🎉",
        }
    }
}

/// Everything visible and interactive in the active mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub size: Vec2,
    pub ground: Option<Ground>,
    /// Back-to-front
    pub controls: Vec<Control>,
    pub collectibles: Vec<Collectible>,
    pub paths: Vec<PathBoundary>,
    pub ball: Option<Ball>,
    pub stickers: Vec<Sticker>,
    pub popup: Option<Popup>,
}

impl World {
    fn empty(size: Vec2) -> Self {
        Self {
            size,
            ground: None,
            controls: Vec::new(),
            collectibles: Vec::new(),
            paths: Vec::new(),
            ball: None,
            stickers: Vec::new(),
            popup: None,
        }
    }

    /// Title screen
    pub fn menu(size: Vec2, ids: &mut EntityIds) -> Self {
        Self {
            controls: controls::menu_controls(size, ids),
            ..Self::empty(size)
        }
    }

    /// Fresh play track: ground, controls and a new batch of collectibles
    pub fn play(size: Vec2, rng: &mut impl Rng, ids: &mut EntityIds) -> Self {
        let ground = Ground::new(ids.next_id(), size);
        let controls = controls::play_controls(size, ids);
        let collectibles = (0..COLLECTIBLE_COUNT)
            .map(|_| {
                let x = rng.random_range(COLLECTIBLE_MARGIN_X..=size.x - COLLECTIBLE_MARGIN_X);
                let y = rng.random_range(size.y / 3.0..=size.y - COLLECTIBLE_TOP_GAP);
                Collectible::new(ids.next_id(), Vec2::new(x, y))
            })
            .collect();

        Self {
            ground: Some(ground),
            controls,
            collectibles,
            ..Self::empty(size)
        }
    }

    /// Register every physical entity with the engine
    pub fn register_bodies(&self, physics: &mut dyn PhysicsEngine) {
        if let Some(ground) = &self.ground {
            physics.create_body(ground.id, ground.body_desc());
        }
        for c in &self.collectibles {
            physics.create_body(c.id, c.body_desc());
        }
        for p in &self.paths {
            physics.create_body(p.id, p.body_desc());
        }
        if let Some(ball) = &self.ball {
            physics.create_body(ball.id, ball.body_desc());
        }
    }

    /// Category of a physical entity, `None` for unknown ids
    pub fn category_of(&self, id: EntityId) -> Option<Category> {
        if self.ground.as_ref().is_some_and(|g| g.id == id) {
            Some(Category::Ground)
        } else if self.ball.as_ref().is_some_and(|b| b.id == id) {
            Some(Category::Ball)
        } else if self.collectibles.iter().any(|c| c.id == id) {
            Some(Category::Collectible)
        } else if self.paths.iter().any(|p| p.id == id) {
            Some(Category::Path)
        } else {
            None
        }
    }

    /// Remove a collectible, returning it if it was present
    pub fn take_collectible(&mut self, id: EntityId) -> Option<Collectible> {
        let idx = self.collectibles.iter().position(|c| c.id == id)?;
        Some(self.collectibles.remove(idx))
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.collectibles.len()
    }

    pub fn remove_sticker(&mut self, id: EntityId) -> bool {
        let before = self.stickers.len();
        self.stickers.retain(|s| s.id != id);
        self.stickers.len() != before
    }

    pub fn has_control(&self, kind: ControlKind) -> bool {
        self.controls.iter().any(|c| c.kind == kind)
    }
}

/// Notifications for the host (presentation, analytics, tests)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ModeChanged { mode: Mode, fade_secs: f32 },
    StrokeFinalized { path_id: EntityId, points: usize },
    /// Released with too few points to form a boundary
    StrokeDiscarded,
    BallSpawned { id: EntityId, pos: Vec2 },
    Nudged { impulse: Vec2 },
    CollectibleConsumed { id: EntityId, pos: Vec2 },
    ScoreChanged { score: u32 },
    Fell { pos: Vec2 },
    Won { score: u32 },
    ResetScheduled { cause: ResetCause, delay: f64 },
    TrackReset,
    StickerShown { id: EntityId, kind: StickerKind, pos: Vec2 },
    StickerRemoved { id: EntityId },
    PopupShown(Popup),
    PopupClosed,
}
