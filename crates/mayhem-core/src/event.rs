//! The replay event log.
//!
//! The event log is the sole channel by which the simulation's internal state
//! becomes visible: an ordered sequence of per-tick event batches that the
//! client-side interpolation layer consumes to render smooth motion and combat
//! text between discrete ticks. It carries enough information to reconstruct
//! positions, hp, stats, tint, and facing without re-running the simulation.
//!
//! The log is a closed tagged union — one [`Event`] variant per event kind
//! with a typed payload — serialized with an explicit `type` tag so web
//! clients can switch on it directly.
//!
//! # Example
//!
//! ```
//! use mayhem_core::event::{Event, FighterUpdate};
//!
//! let event = Event::Animation {
//!     fighter: 0,
//!     update: FighterUpdate { hp: Some(84), ..FighterUpdate::default() },
//! };
//!
//! let json = serde_json::to_string(&event).unwrap();
//! assert!(json.contains("\"type\":\"animation\""));
//! // Unset fields are skipped entirely.
//! assert!(!json.contains("tint"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::Stats;

/// All events emitted during one tick, in emission order.
pub type TickEvents = Vec<Event>;

/// One visible state change in the fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// A fighter entered the arena. Emitted once per fighter in roster order
    /// before tick 0.
    Spawn {
        /// Full initial state of the fighter.
        fighter: FighterSnapshot,
    },
    /// A partial state update for one fighter.
    Animation {
        /// Index of the fighter in roster order.
        fighter: usize,
        /// The fields that changed this event.
        update: FighterUpdate,
    },
    /// A projectile flew from one fighter to another.
    Projectile {
        /// Index of the firing fighter.
        from: usize,
        /// Index of the targeted fighter.
        to: usize,
        /// Client-side image reference for the projectile.
        image: String,
    },
    /// Floating combat text over a fighter (damage numbers, "missed", ...).
    Text {
        /// Index of the fighter the text is anchored to.
        fighter: usize,
        /// The text to display.
        text: String,
    },
    /// A one-shot particle effect anchored to a fighter.
    Particle {
        /// Index of the fighter the particle is anchored to.
        fighter: usize,
        /// Client-side image reference for the particle.
        image: String,
    },
}

/// Visual-only rotation pose of a fighter. No gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotationState {
    /// Standing normally.
    #[default]
    Neutral,
    /// Winding up a melee strike.
    Windup,
    /// Mid-swing.
    Swing,
}

/// Partial fighter state carried by an [`Event::Animation`].
///
/// Every field is optional; unset fields are omitted from the serialized
/// form, so a movement update and an hp update stay small and distinct.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FighterUpdate {
    /// New x position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// New y position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// New hit points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    /// New charge count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charges: Option<u32>,
    /// New full stat block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
    /// New RGBA tint overlay ([0, 0, 0, 0] clears it).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint: Option<[u8; 4]>,
    /// Whether the sprite now faces left.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flipped: Option<bool>,
    /// New rotation pose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RotationState>,
}

impl FighterUpdate {
    /// Builds a movement update from a position and facing.
    #[must_use]
    pub fn moved(position: glam::Vec2, flipped: bool) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            flipped: Some(flipped),
            ..Self::default()
        }
    }

    /// Builds a bare position update (crowding corrections, knockback).
    #[must_use]
    pub fn position(position: glam::Vec2) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Self::default()
        }
    }

    /// Builds an hp update.
    #[must_use]
    pub fn hp(hp: i32) -> Self {
        Self {
            hp: Some(hp),
            ..Self::default()
        }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Full initial state of one fighter, logged at spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FighterSnapshot {
    /// Display name.
    pub name: String,
    /// Team identifier.
    pub team: u32,
    /// Opaque cosmetic fields, passed through untouched for the client.
    pub appearance: BTreeMap<String, String>,
    /// Spawn x position.
    pub x: f32,
    /// Spawn y position.
    pub y: f32,
    /// Starting hit points.
    pub hp: i32,
    /// Starting stat block; fight-start passive deltas follow as animation
    /// updates in the same batch.
    pub stats: Stats,
    /// Image references for the carried equipment, in equipment order.
    pub equipment: Vec<String>,
}

// =============================================================================
// Tests
// =============================================================================
