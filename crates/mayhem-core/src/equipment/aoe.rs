//! Area bursts: charge up, then hit every living enemy at once.
//!
//! No accuracy roll and no range limit — the cost is paid up front in
//! charges and a long cooldown, so the weapon's cadence is dominated by the
//! time spent standing still banking charges.

use std::sync::Arc;

use crate::ability::{Ability, HookContext, Tiered};
use crate::fight::Fight;

/// A charge-gated burst that strikes all living enemies.
#[derive(Debug, Clone, Copy)]
pub struct AoeAttack {
    id: &'static str,
    damage: Tiered<f32>,
    cooldown: Tiered<f32>,
    charge_cost: Tiered<u32>,
    knockback: f32,
    particle: &'static str,
}

impl AoeAttack {
    /// The shockwave gauntlet: moderate damage to the whole enemy roster,
    /// with a shove. Attunement cuts the charge cost in half.
    #[must_use]
    pub fn shockwave_gauntlet() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "shockwaveGauntlet",
            damage: Tiered::new(20.0, 26.0),
            cooldown: Tiered::new(6.0, 5.0),
            charge_cost: Tiered::new(2, 1),
            knockback: 2.0,
            particle: "shockwave",
        })
    }

    /// Damage per second across every living enemy, ignoring charge time.
    fn dps(&self, fight: &Fight, owner: usize) -> f32 {
        let attuned = fight.is_attuned(owner, self.id);
        let targets = fight.living_enemies(owner).len() as f32;
        self.damage.pick(attuned) * targets / self.cooldown.pick(attuned)
    }
}

impl Ability for AoeAttack {
    fn name(&self) -> &str {
        self.id
    }

    fn action_danger(&self, fight: &Fight, ctx: HookContext) -> f32 {
        self.dps(fight, ctx.fighter)
    }

    fn action_priority(&self, fight: &Fight, ctx: HookContext) -> Option<f32> {
        if !fight.has_living_enemies(ctx.fighter) {
            return None;
        }
        Some(self.dps(fight, ctx.fighter))
    }

    fn when_prioritized(&self, fight: &mut Fight, ctx: HookContext) {
        let me = ctx.fighter;
        let attuned = fight.is_attuned(me, self.id);
        let cost = self.charge_cost.pick(attuned);

        if fight.fighter(me).charges < cost {
            fight.charge_or_back_off(me);
            return;
        }

        if fight.fighter(me).cooldown > 0.0 {
            // Charged but recovering: drift toward the fray so the next
            // burst lands amid as many enemies as possible.
            if let Some(enemy) = fight.nearest_enemy(me) {
                let pos = fight.fighter(enemy).position;
                fight.move_toward(me, pos);
            }
            return;
        }

        fight.spend_charges(me, cost);
        fight.set_cooldown(me, self.cooldown.pick(attuned));
        fight.log_particle(me, self.particle);

        let base = self.damage.pick(attuned);
        for target in fight.living_enemies(me) {
            fight.deal_damage(me, target, base, true);
            fight.apply_knockback(me, target, self.knockback);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
