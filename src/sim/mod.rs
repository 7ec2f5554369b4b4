//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod contact;
pub mod controls;
pub mod physics;
pub mod play;
pub mod services;
pub mod session;
pub mod state;
pub mod stroke;
pub mod tick;
pub mod timer;

pub use contact::{Category, ContactOutcome, dispatch};
pub use controls::{Control, ControlKind, hit_test};
pub use physics::{BodyDesc, BodyType, BuiltinPhysics, Contact, Material, PhysicsEngine, Shape};
pub use play::PlayScene;
pub use services::Services;
pub use session::{PlaySession, ResetCause, SessionState};
pub use state::{
    Ball, Collectible, EntityId, EntityIds, GameEvent, Ground, PathBoundary, Popup, Sticker,
    StickerKind, World,
};
pub use stroke::{PathCapture, PathStroke};
pub use tick::{FixedStep, PointerEvent, TickInput};
pub use timer::{TimedAction, TimerQueue};
