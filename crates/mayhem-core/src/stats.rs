//! Fighter stats and the derived combat formulas.
//!
//! Every fighter carries five named integer stats, nominally 0–10 but mutable
//! beyond that range at runtime by abilities. All derived formulas clamp their
//! output, so out-of-range stats degrade gracefully instead of producing
//! nonsense (negative speed, >100% damage reduction, and so on).
//!
//! # Example
//!
//! ```
//! use mayhem_core::stats::Stats;
//!
//! let stats = Stats { toughness: 10, ..Stats::default() };
//! assert!((stats.damage_taken_multiplier() - 0.75).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five fighter stats.
///
/// Stats drive the derived combat formulas below. They start in 0–10 from the
/// meta-game but abilities may push them outside that range mid-fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Scales melee damage.
    pub strength: i32,
    /// Scales ranged hit chance.
    pub accuracy: i32,
    /// Shortens the time spent gaining one charge.
    pub energy: i32,
    /// Movement rate across the arena.
    pub speed: i32,
    /// Reduces damage taken.
    pub toughness: i32,
}

impl Stats {
    /// Creates stats with every field set to `value`.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            accuracy: value,
            energy: value,
            speed: value,
            toughness: value,
        }
    }

    /// Movement speed in meters per second: `max(5 + speed, 1)`.
    #[must_use]
    pub fn speed_m_per_s(&self) -> f32 {
        (5.0 + self.speed as f32).max(1.0)
    }

    /// Seconds spent gaining one charge point: `max(6 − 0.4·energy, 1)`.
    #[must_use]
    pub fn time_to_charge(&self) -> f32 {
        (6.0 - 0.4 * self.energy as f32).max(1.0)
    }

    /// Melee damage multiplier: `max(0.5 + 0.1·strength, 0.25)`.
    #[must_use]
    pub fn melee_damage_multiplier(&self) -> f32 {
        (0.5 + 0.1 * self.strength as f32).max(0.25)
    }

    /// Chance for a ranged attack to land: `clamp(0.25 + 0.05·accuracy, 0, 1)`.
    #[must_use]
    pub fn ranged_hit_chance(&self) -> f32 {
        (0.25 + 0.05 * self.accuracy as f32).clamp(0.0, 1.0)
    }

    /// Multiplier applied to incoming damage: `max(1.25 − 0.05·toughness, 0.5)`.
    #[must_use]
    pub fn damage_taken_multiplier(&self) -> f32 {
        (1.25 - 0.05 * self.toughness as f32).max(0.5)
    }

    /// Returns the value of a single named stat.
    #[must_use]
    pub const fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Accuracy => self.accuracy,
            Stat::Energy => self.energy,
            Stat::Speed => self.speed,
            Stat::Toughness => self.toughness,
        }
    }

    /// Adds `delta` to a single named stat.
    pub fn add(&mut self, stat: Stat, delta: i32) {
        match stat {
            Stat::Strength => self.strength += delta,
            Stat::Accuracy => self.accuracy += delta,
            Stat::Energy => self.energy += delta,
            Stat::Speed => self.speed += delta,
            Stat::Toughness => self.toughness += delta,
        }
    }
}

/// Names one of the five stats.
///
/// Used by status-effect reverts and stat-change events, where a specific
/// stat must be addressed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    /// Melee damage scaling.
    Strength,
    /// Ranged hit chance scaling.
    Accuracy,
    /// Charge rate scaling.
    Energy,
    /// Movement rate scaling.
    Speed,
    /// Incoming damage scaling.
    Toughness,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strength => write!(f, "strength"),
            Self::Accuracy => write!(f, "accuracy"),
            Self::Energy => write!(f, "energy"),
            Self::Speed => write!(f, "speed"),
            Self::Toughness => write!(f, "toughness"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
