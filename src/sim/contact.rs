//! Body categories and the contact dispatch table
//!
//! Hosts that speak collision bitmasks convert with `Category::bits` /
//! `Category::from_bits`; inside the game only the enum is used.

use serde::{Deserialize, Serialize};

use super::state::EntityId;

/// What a physics body represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Ground,
    Ball,
    Collectible,
    /// A finalized drawn path (collides, never reported to the session)
    Path,
}

impl Category {
    /// Host category bitmask
    pub fn bits(self) -> u32 {
        match self {
            Category::Ground => 1,
            Category::Ball => 2,
            Category::Collectible => 3,
            Category::Path => 0,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(Category::Ground),
            2 => Some(Category::Ball),
            3 => Some(Category::Collectible),
            0 => Some(Category::Path),
            _ => None,
        }
    }
}

/// What the play session should do about a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The ball touched this collectible
    Collect(EntityId),
    /// The ball touched the ground
    Fall,
    Ignored,
}

/// Pairwise dispatch, symmetric in its arguments
pub fn dispatch(a: (EntityId, Category), b: (EntityId, Category)) -> ContactOutcome {
    use Category::*;

    match (a.1, b.1) {
        (Ball, Collectible) => ContactOutcome::Collect(b.0),
        (Collectible, Ball) => ContactOutcome::Collect(a.0),
        (Ball, Ground) | (Ground, Ball) => ContactOutcome::Fall,
        _ => ContactOutcome::Ignored,
    }
}
