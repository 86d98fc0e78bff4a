//! One fighter's mutable battle state.
//!
//! A [`FighterInBattle`] is constructed once per battle from a fighter
//! template, their chosen equipment, and a team id. It is owned exclusively
//! by the [`Fight`](crate::fight::Fight) for the duration of `simulate()` and
//! discarded afterwards — the meta-game layer persists only template data.
//!
//! Equipment index 0 is always the fighter's innate ability (fists by
//! default); it is scanned *last* during action selection so carried gear
//! outranks it on ties.

use glam::Vec2;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::ability::Ability;
use crate::event::{FighterSnapshot, RotationState};
use crate::stats::Stats;
use crate::status::StatusEffect;

/// Starting (and maximum) hit points.
pub const MAX_HP: i32 = 100;

/// One piece of equipment carried into battle.
///
/// The ability itself is stateless shared behavior; per-battle mutable state
/// (the periodic-effect timer) lives here, so no two fights or fighters ever
/// share equipment state.
#[derive(Debug, Clone)]
pub struct EquipmentInBattle {
    /// Display name.
    pub name: String,
    /// Client-side image reference.
    pub image: String,
    /// The behavior bundle.
    pub ability: Arc<dyn Ability>,
    /// Scratch timer for periodic `on_tick` behavior, in seconds.
    pub timer: f32,
}

impl EquipmentInBattle {
    /// Creates battle equipment from a name, image, and ability.
    #[must_use]
    pub fn new(name: &str, image: &str, ability: Arc<dyn Ability>) -> Self {
        Self {
            name: name.to_string(),
            image: image.to_string(),
            ability,
            timer: 0.0,
        }
    }
}

/// One fighter's complete mutable state during a battle.
#[derive(Debug, Clone)]
pub struct FighterInBattle {
    /// Display name.
    pub name: String,
    /// Team identifier.
    pub team: u32,
    /// Opaque cosmetic fields for the spawn snapshot.
    pub appearance: BTreeMap<String, String>,
    /// Hit points. The fighter is down at ≤ 0. Always an integer after any
    /// change; heals cap at [`MAX_HP`].
    pub hp: i32,
    /// Position in the [0, 100]² arena.
    pub position: Vec2,
    /// Seconds until the next action may fire. Never observed below 0.
    pub cooldown: f32,
    /// Resource consumed by charge-gated abilities.
    pub charges: u32,
    /// Current stat block (mutable by abilities mid-fight).
    pub stats: Stats,
    /// Active status effects, in application order.
    pub status_effects: Vec<StatusEffect>,
    /// Equipment in scan order; index 0 is the innate ability.
    pub equipment: Vec<EquipmentInBattle>,
    /// Ability names this fighter gets attuned-tier magnitudes for.
    pub attunements: BTreeSet<String>,
    /// Visual facing: `true` when the sprite faces left.
    pub flipped: bool,
    /// Visual rotation pose.
    pub rotation: RotationState,
}

impl FighterInBattle {
    /// Returns `true` once this fighter has fallen (hp ≤ 0).
    #[must_use]
    pub const fn is_down(&self) -> bool {
        self.hp <= 0
    }

    /// Returns `true` while any frozen effect is active.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.status_effects.iter().any(StatusEffect::is_frozen)
    }

    /// Returns `true` if this fighter is attuned to the named ability.
    #[must_use]
    pub fn is_attuned(&self, ability: &str) -> bool {
        self.attunements.contains(ability)
    }

    /// Hit points scaled by damage mitigation: `hp / damageTakenMultiplier`.
    #[must_use]
    pub fn effective_hp(&self) -> f32 {
        self.hp.max(0) as f32 / self.stats.damage_taken_multiplier()
    }

    /// Euclidean distance to another fighter.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f32 {
        self.position.distance(other.position)
    }

    /// Applies a status effect, refreshing the duration if an effect of the
    /// same name is already active (effects do not stack by name).
    pub fn add_status(&mut self, effect: StatusEffect) {
        if let Some(existing) = self
            .status_effects
            .iter_mut()
            .find(|s| s.name == effect.name)
        {
            existing.duration = existing.duration.max(effect.duration);
        } else {
            self.status_effects.push(effect);
        }
    }

    /// The tint overlay the client should currently show: the most recently
    /// applied effect's tint, or fully transparent with no effects.
    #[must_use]
    pub fn current_tint(&self) -> [u8; 4] {
        self.status_effects
            .last()
            .map_or([0, 0, 0, 0], |s| s.tint)
    }

    /// Builds the spawn snapshot for the event log.
    #[must_use]
    pub fn snapshot(&self) -> FighterSnapshot {
        FighterSnapshot {
            name: self.name.clone(),
            team: self.team,
            appearance: self.appearance.clone(),
            x: self.position.x,
            y: self.position.y,
            hp: self.hp,
            stats: self.stats,
            equipment: self.equipment.iter().map(|e| e.image.clone()).collect(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
