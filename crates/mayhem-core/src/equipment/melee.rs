//! Melee attacks: strike when in range and ready, reposition otherwise.
//!
//! One generic [`MeleeAttack`] covers every melee weapon (and the innate
//! fists); the weapons differ only in their damage/cooldown tiers, knockback,
//! charge cost, and lifesteal fraction.
//!
//! The movement heuristic is the heart of melee play: a fighter whose
//! cooldown comfortably exceeds the time to reach their target backs off to
//! kite, one whose cooldown is nearly up closes in, and one already in range
//! with the strike imminent holds position and winds up.

use std::sync::Arc;

use crate::ability::{Ability, HookContext, Tiered};
use crate::event::RotationState;
use crate::fight::{Fight, MELEE_RANGE, MELEE_SLACK};

/// A close-range attack with pursuit movement.
#[derive(Debug, Clone, Copy)]
pub struct MeleeAttack {
    id: &'static str,
    damage: Tiered<f32>,
    cooldown: Tiered<f32>,
    charge_cost: u32,
    knockback: f32,
    /// Fraction of mitigated damage returned as healing.
    lifesteal: f32,
}

impl MeleeAttack {
    /// The innate fallback everyone carries at equipment slot 0.
    #[must_use]
    pub fn fists() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "fists",
            damage: Tiered::new(12.0, 15.0),
            cooldown: Tiered::new(2.5, 2.2),
            charge_cost: 0,
            knockback: 1.5,
            lifesteal: 0.0,
        })
    }

    /// Fast, low-damage blade.
    #[must_use]
    pub fn shiv() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "shiv",
            damage: Tiered::new(8.0, 10.0),
            cooldown: Tiered::new(1.2, 1.0),
            charge_cost: 0,
            knockback: 0.5,
            lifesteal: 0.0,
        })
    }

    /// Slow, heavy two-hander with serious knockback.
    #[must_use]
    pub fn battle_axe() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "battleAxe",
            damage: Tiered::new(30.0, 38.0),
            cooldown: Tiered::new(4.5, 4.0),
            charge_cost: 0,
            knockback: 3.5,
            lifesteal: 0.0,
        })
    }

    /// Quick blade that heals the wielder for half the damage dealt.
    #[must_use]
    pub fn vampire_dagger() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "vampireDagger",
            damage: Tiered::new(10.0, 12.0),
            cooldown: Tiered::new(1.5, 1.3),
            charge_cost: 0,
            knockback: 0.5,
            lifesteal: 0.5,
        })
    }

    /// Sustained damage per second this weapon projects in the owner's
    /// hands, melee multiplier included.
    fn dps(&self, fight: &Fight, owner: usize) -> f32 {
        let attuned = fight.is_attuned(owner, self.id);
        let multiplier = fight.fighter(owner).stats.melee_damage_multiplier();
        self.damage.pick(attuned) * multiplier / self.cooldown.pick(attuned)
    }
}

impl Ability for MeleeAttack {
    fn name(&self) -> &str {
        self.id
    }

    fn action_danger(&self, fight: &Fight, ctx: HookContext) -> f32 {
        self.dps(fight, ctx.fighter)
    }

    fn action_priority(&self, fight: &Fight, ctx: HookContext) -> Option<f32> {
        let target = fight.best_melee_target(ctx.fighter)?;
        let discount = 1.0 + fight.time_to_reach(ctx.fighter, target);
        Some(self.dps(fight, ctx.fighter) / discount)
    }

    fn when_prioritized(&self, fight: &mut Fight, ctx: HookContext) {
        let me = ctx.fighter;
        let Some(target) = fight.best_melee_target(me) else {
            return;
        };

        if fight.fighter(me).charges < self.charge_cost {
            fight.charge_or_back_off(me);
            return;
        }

        let attuned = fight.is_attuned(me, self.id);
        let wait = fight.fighter(me).cooldown;
        let in_range = fight.distance(me, target) <= MELEE_RANGE;

        if in_range && wait <= 0.0 {
            let multiplier = fight.fighter(me).stats.melee_damage_multiplier();
            let base = self.damage.pick(attuned) * multiplier;

            if self.charge_cost > 0 {
                fight.spend_charges(me, self.charge_cost);
            }
            fight.set_cooldown(me, self.cooldown.pick(attuned));
            fight.set_rotation(me, RotationState::Swing);
            // Lifesteal lands via on_hit_dealt once the hit resolves.
            fight.deal_damage(me, target, base, true);

            if self.knockback > 0.0 {
                fight.apply_knockback(me, target, self.knockback);
            }
            return;
        }

        if in_range && wait <= MELEE_SLACK {
            // Strike is imminent: hold ground and wind up.
            fight.set_rotation(me, RotationState::Windup);
            return;
        }

        fight.set_rotation(me, RotationState::Neutral);
        let target_pos = fight.fighter(target).position;
        if wait > fight.time_to_reach(me, target) + MELEE_SLACK {
            // Plenty of cooldown left: open the gap instead of trading.
            fight.move_away_from(me, target_pos);
        } else {
            fight.move_toward(me, target_pos);
        }
    }

    fn on_hit_dealt(&self, fight: &mut Fight, ctx: HookContext, _target: usize, damage: i32) {
        if self.lifesteal <= 0.0 || damage <= 0 {
            return;
        }
        let restored = (f64::from(damage) * f64::from(self.lifesteal)).ceil() as i32;
        fight.heal(ctx.fighter, restored);
    }
}

// =============================================================================
// Tests
// =============================================================================
