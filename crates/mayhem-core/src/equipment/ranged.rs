//! Ranged attacks: fire on cooldown, roll to hit, kite melee threats.
//!
//! Ranged weapons are the engine's only RNG consumers: each shot draws one
//! uniform value and compares it against the shooter's accuracy-derived hit
//! chance. A miss still spends the shot (cooldown, charges, projectile
//! event); only the damage is forfeit.
//!
//! Between shots a ranged fighter watches for enemies that could close to
//! melee before the next trigger pull and retreats from the nearest one.

use std::sync::Arc;

use crate::ability::{Ability, HookContext, Tiered};
use crate::fight::Fight;
use crate::status::StatusEffect;

/// A projectile attack with an accuracy roll.
#[derive(Debug, Clone, Copy)]
pub struct RangedAttack {
    id: &'static str,
    damage: Tiered<f32>,
    cooldown: Tiered<f32>,
    charge_cost: u32,
    projectile: &'static str,
    /// Frozen duration applied on hit, if any.
    freeze: Option<Tiered<f32>>,
}

impl RangedAttack {
    /// Steady mid-damage sidearm.
    #[must_use]
    pub fn laser_pistol() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "laserPistol",
            damage: Tiered::new(15.0, 18.0),
            cooldown: Tiered::new(2.0, 1.8),
            charge_cost: 0,
            projectile: "laser",
            freeze: None,
        })
    }

    /// Slow, charge-gated heavy bolt.
    #[must_use]
    pub fn crossbow() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "crossbow",
            damage: Tiered::new(35.0, 45.0),
            cooldown: Tiered::new(5.0, 4.5),
            charge_cost: 1,
            projectile: "bolt",
            freeze: None,
        })
    }

    /// Light bolt that freezes the target on hit.
    #[must_use]
    pub fn frost_wand() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "frostWand",
            damage: Tiered::new(8.0, 10.0),
            cooldown: Tiered::new(3.5, 3.0),
            charge_cost: 0,
            projectile: "frostBolt",
            freeze: Some(Tiered::new(2.0, 3.0)),
        })
    }

    /// Expected damage per second in the owner's hands: tier damage scaled
    /// by hit chance over the cooldown.
    fn dps(&self, fight: &Fight, owner: usize) -> f32 {
        let attuned = fight.is_attuned(owner, self.id);
        let hit_chance = fight.fighter(owner).stats.ranged_hit_chance();
        self.damage.pick(attuned) * hit_chance / self.cooldown.pick(attuned)
    }
}

impl Ability for RangedAttack {
    fn name(&self) -> &str {
        self.id
    }

    fn action_danger(&self, fight: &Fight, ctx: HookContext) -> f32 {
        self.dps(fight, ctx.fighter)
    }

    fn action_priority(&self, fight: &Fight, ctx: HookContext) -> Option<f32> {
        fight.best_ranged_target(ctx.fighter)?;
        Some(self.dps(fight, ctx.fighter))
    }

    fn when_prioritized(&self, fight: &mut Fight, ctx: HookContext) {
        let me = ctx.fighter;

        if fight.fighter(me).charges < self.charge_cost {
            fight.charge_or_back_off(me);
            return;
        }

        let wait = fight.fighter(me).cooldown;
        if wait > 0.0 {
            // Between shots: fall back from the nearest enemy who could
            // reach melee before the next trigger pull.
            let threat = fight
                .melee_threats_within(me, wait)
                .into_iter()
                .min_by(|&a, &b| fight.distance(me, a).total_cmp(&fight.distance(me, b)));
            if let Some(threat) = threat {
                let threat_pos = fight.fighter(threat).position;
                fight.move_away_from(me, threat_pos);
            }
            return;
        }

        let Some(target) = fight.best_ranged_target(me) else {
            return;
        };
        let attuned = fight.is_attuned(me, self.id);

        if self.charge_cost > 0 {
            fight.spend_charges(me, self.charge_cost);
        }
        fight.set_cooldown(me, self.cooldown.pick(attuned));
        fight.log_projectile(me, target, self.projectile);

        let hit_chance = fight.fighter(me).stats.ranged_hit_chance();
        let roll = fight.rng_mut().rand_real();
        if roll < hit_chance {
            fight.deal_damage(me, target, self.damage.pick(attuned), true);
            if let Some(freeze) = self.freeze {
                fight.apply_status(target, StatusEffect::frozen(freeze.pick(attuned)));
            }
        } else {
            fight.log_text(target, "missed");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::roster::{FighterTemplate, RosterEntry};
    use crate::stats::Stats;
    use glam::Vec2;

    fn duel(a_stats: Stats) -> Fight {
        let roster = vec![
            RosterEntry::new(FighterTemplate::new("A", a_stats), vec![], 0),
            RosterEntry::new(FighterTemplate::new("B", Stats::default()), vec![], 1),
        ];
        let mut fight = Fight::new(&roster, 0).unwrap();
        fight.fighter_mut(0).position = Vec2::new(20.0, 50.0);
        fight.fighter_mut(1).position = Vec2::new(80.0, 50.0);
        fight
    }

    #[test]
    fn sure_shot_hits_and_starts_cooldown() {
        // Accuracy 15 pushes hit chance to 1.0: no roll can miss.
        let mut fight = duel(Stats { accuracy: 15, ..Stats::default() });

        let pistol = RangedAttack::laser_pistol();
        pistol.when_prioritized(&mut fight, HookContext::new(0, 1));

        // Base 15, mitigation 1.25: ceil(18.75) = 19.
        assert_eq!(fight.fighter(1).hp, 81);
        assert!((fight.fighter(0).cooldown - 2.0).abs() < 1e-4);
    }

    #[test]
    fn shot_logs_a_projectile_either_way() {
        let mut fight = duel(Stats::default());

        let pistol = RangedAttack::laser_pistol();
        pistol.when_prioritized(&mut fight, HookContext::new(0, 1));

        let batch = fight.log().last().unwrap();
        assert!(batch
            .iter()
            .any(|e| matches!(e, Event::Projectile { image, .. } if image == "laser")));
    }

    #[test]
    fn hopeless_shot_misses_with_text() {
        // Accuracy -5 drags hit chance to 0.0: every roll misses.
        let mut fight = duel(Stats { accuracy: -5, ..Stats::default() });

        let pistol = RangedAttack::laser_pistol();
        pistol.when_prioritized(&mut fight, HookContext::new(0, 1));

        assert_eq!(fight.fighter(1).hp, 100);
        let batch = fight.log().last().unwrap();
        assert!(batch
            .iter()
            .any(|e| matches!(e, Event::Text { text, .. } if text == "missed")));
    }

    #[test]
    fn crossbow_charges_before_firing() {
        let mut fight = duel(Stats { accuracy: 15, ..Stats::default() });

        let crossbow = RangedAttack::crossbow();
        crossbow.when_prioritized(&mut fight, HookContext::new(0, 1));

        // No charge banked yet: the turn went to charging, not firing.
        assert_eq!(fight.fighter(0).charges, 1);
        assert_eq!(fight.fighter(1).hp, 100);

        fight.fighter_mut(0).cooldown = 0.0;
        crossbow.when_prioritized(&mut fight, HookContext::new(0, 1));

        assert_eq!(fight.fighter(0).charges, 0);
        // Base 35, mitigation 1.25: ceil(43.75) = 44.
        assert_eq!(fight.fighter(1).hp, 56);
    }

    #[test]
    fn frost_wand_freezes_on_hit() {
        let mut fight = duel(Stats { accuracy: 15, ..Stats::default() });

        let wand = RangedAttack::frost_wand();
        wand.when_prioritized(&mut fight, HookContext::new(0, 1));

        assert!(fight.fighter(1).is_frozen());
    }

    #[test]
    fn reloading_shooter_kites_closing_melee() {
        let mut fight = duel(Stats::default());
        fight.fighter_mut(0).cooldown = 10.0;
        fight.fighter_mut(1).position = Vec2::new(26.0, 50.0);

        let pistol = RangedAttack::laser_pistol();
        pistol.when_prioritized(&mut fight, HookContext::new(0, 1));

        // Retreated along -x, away from the closing enemy.
        assert!(fight.fighter(0).position.x < 20.0);
        assert_eq!(fight.fighter(1).hp, 100);
    }

    #[test]
    fn reloading_shooter_retreats_from_the_nearest_threat() {
        // Two enemies closing from opposite sides: the far one sits at a
        // lower roster index, but retreat is keyed to distance.
        let roster = vec![
            RosterEntry::new(FighterTemplate::new("A", Stats::default()), vec![], 0),
            RosterEntry::new(FighterTemplate::new("Far", Stats::default()), vec![], 1),
            RosterEntry::new(FighterTemplate::new("Near", Stats::default()), vec![], 1),
        ];
        let mut fight = Fight::new(&roster, 0).unwrap();
        fight.fighter_mut(0).position = Vec2::new(50.0, 50.0);
        fight.fighter_mut(0).cooldown = 10.0;
        fight.fighter_mut(1).position = Vec2::new(50.0, 90.0);
        fight.fighter_mut(2).position = Vec2::new(50.0, 44.0);

        let pistol = RangedAttack::laser_pistol();
        pistol.when_prioritized(&mut fight, HookContext::new(0, 1));

        // Moved +y, away from the near threat (and toward the far one).
        assert!(fight.fighter(0).position.y > 50.0);
    }

    #[test]
    fn reloading_shooter_stands_when_safe() {
        let mut fight = duel(Stats::default());
        fight.fighter_mut(0).cooldown = 0.5;

        let pistol = RangedAttack::laser_pistol();
        pistol.when_prioritized(&mut fight, HookContext::new(0, 1));

        assert!((fight.fighter(0).position.x - 20.0).abs() < 1e-4);
    }
}
