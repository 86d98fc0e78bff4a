//! Timed status effects and their clear behavior.
//!
//! A status effect is a named countdown with a visual tint overlay and a
//! closed [`ClearBehavior`] describing what happens when it expires. There are
//! no callback closures: everything an expiring effect can do is a variant of
//! the enum, which keeps the effect table serializable and the replay log
//! reconstructable.
//!
//! Durations count down by the tick length each tick. While a fighter is
//! frozen by a *different* effect, the countdown runs at half rate (as does
//! the fighter's action cooldown). When a duration reaches zero the clear
//! behavior fires before the effect is removed.

use serde::{Deserialize, Serialize};

use crate::stats::Stat;

/// Reserved effect name that halves cooldown and status decay for its owner.
pub const FROZEN: &str = "frozen";

/// What happens when a status effect expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClearBehavior {
    /// Nothing beyond removing the effect (and its tint).
    None,
    /// Apply a stat delta, typically reverting the delta applied on creation.
    ///
    /// `amount` is the signed delta added when the effect clears: an effect
    /// granting +3 strength registers `amount: -3` here.
    RevertStat {
        /// The stat to adjust.
        stat: Stat,
        /// Signed delta applied on clear.
        amount: i32,
    },
}

/// A timed effect on one fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffect {
    /// Effect name; `"frozen"` is reserved (see [`FROZEN`]).
    pub name: String,
    /// Remaining duration in seconds. Decremented by the tick length.
    pub duration: f32,
    /// RGBA color overlay for the client, no gameplay meaning.
    pub tint: [u8; 4],
    /// Fired when the duration reaches zero, before removal.
    pub on_clear: ClearBehavior,
}

impl StatusEffect {
    /// Creates a new status effect.
    #[must_use]
    pub fn new(name: &str, duration: f32, tint: [u8; 4], on_clear: ClearBehavior) -> Self {
        Self {
            name: name.to_string(),
            duration,
            tint,
            on_clear,
        }
    }

    /// Creates the reserved frozen effect with the standard ice tint.
    #[must_use]
    pub fn frozen(duration: f32) -> Self {
        Self::new(FROZEN, duration, [120, 180, 255, 160], ClearBehavior::None)
    }

    /// Creates a temporary stat buff that reverts itself on expiry.
    #[must_use]
    pub fn stat_buff(name: &str, duration: f32, tint: [u8; 4], stat: Stat, amount: i32) -> Self {
        Self::new(
            name,
            duration,
            tint,
            ClearBehavior::RevertStat {
                stat,
                amount: -amount,
            },
        )
    }

    /// Returns `true` if this is the reserved frozen effect.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.name == FROZEN
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_constructor_uses_reserved_name() {
        let effect = StatusEffect::frozen(2.0);
        assert!(effect.is_frozen());
        assert_eq!(effect.on_clear, ClearBehavior::None);
        assert!((effect.duration - 2.0).abs() < 1e-6);
    }

    #[test]
    fn stat_buff_registers_inverse_revert() {
        let effect = StatusEffect::stat_buff("rage", 5.0, [255, 60, 60, 120], Stat::Strength, 3);

        match effect.on_clear {
            ClearBehavior::RevertStat { stat, amount } => {
                assert_eq!(stat, Stat::Strength);
                assert_eq!(amount, -3);
            }
            ClearBehavior::None => panic!("expected RevertStat"),
        }
    }

    #[test]
    fn non_frozen_effects_are_not_frozen() {
        let effect = StatusEffect::new("burning", 1.0, [255, 120, 0, 150], ClearBehavior::None);
        assert!(!effect.is_frozen());
    }

    #[test]
    fn serialization_roundtrip() {
        let effect = StatusEffect::stat_buff("rage", 5.0, [255, 60, 60, 120], Stat::Strength, 3);
        let json = serde_json::to_string(&effect).unwrap();
        let back: StatusEffect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }
}
