//! Utility equipment: periodic zaps, damage reflection, and healing.
//!
//! The odd ducks of the catalog. The zap helmet acts without ever being
//! prioritized (pure `on_tick`), the thorn mail only reacts to incoming
//! hits, and the medic bag is the one action in the game that targets a
//! teammate.

use std::sync::Arc;

use crate::ability::{Ability, HookContext, Tiered};
use crate::fight::{Fight, TICK_LENGTH};
use crate::fighter::MAX_HP;

// =============================================================================
// Zap helmet
// =============================================================================

/// Periodically zaps the nearest living enemy, no aim and no action
/// required.
#[derive(Debug, Clone, Copy)]
pub struct ZapHelmet {
    damage: Tiered<f32>,
    period: f32,
}

impl ZapHelmet {
    /// Stock zap helmet: a small shock every three seconds.
    #[must_use]
    pub fn stock() -> Arc<dyn Ability> {
        Arc::new(Self {
            damage: Tiered::new(5.0, 8.0),
            period: 3.0,
        })
    }
}

impl Ability for ZapHelmet {
    fn name(&self) -> &str {
        "zapHelmet"
    }

    fn passive_danger(&self, fight: &Fight, ctx: HookContext) -> f32 {
        let attuned = fight.is_attuned(ctx.fighter, self.name());
        self.damage.pick(attuned) / self.period
    }

    fn on_tick(&self, fight: &mut Fight, ctx: HookContext) {
        let me = ctx.fighter;

        let gear = &mut fight.fighter_mut(me).equipment[ctx.equipment];
        gear.timer += TICK_LENGTH;
        if gear.timer < self.period {
            return;
        }
        gear.timer -= self.period;

        let Some(target) = fight.nearest_enemy(me) else {
            return;
        };

        let attuned = fight.is_attuned(me, self.name());
        fight.log_projectile(me, target, "zap");
        fight.deal_damage(me, target, self.damage.pick(attuned), true);
    }
}

// =============================================================================
// Thorn mail
// =============================================================================

/// Reflects a fraction of every hit taken back at the attacker.
#[derive(Debug, Clone, Copy)]
pub struct ThornMail {
    reflect: Tiered<f32>,
}

impl ThornMail {
    /// Stock thorn mail.
    #[must_use]
    pub fn stock() -> Arc<dyn Ability> {
        Arc::new(Self {
            reflect: Tiered::new(0.25, 0.4),
        })
    }
}

impl Ability for ThornMail {
    fn name(&self) -> &str {
        "thornMail"
    }

    fn passive_danger(&self, fight: &Fight, ctx: HookContext) -> f32 {
        // Rough expected return assuming a few points of incoming dps.
        let attuned = fight.is_attuned(ctx.fighter, self.name());
        self.reflect.pick(attuned) * 4.0
    }

    fn on_hit_taken(&self, fight: &mut Fight, ctx: HookContext, attacker: usize, damage: i32) {
        if attacker == ctx.fighter || fight.fighter(attacker).is_down() {
            return;
        }

        let attuned = fight.is_attuned(ctx.fighter, self.name());
        let returned = damage as f32 * self.reflect.pick(attuned);
        if returned <= 0.0 {
            return;
        }

        fight.log_particle(attacker, "thorns");
        // Reflected damage never chains into further reactions.
        fight.deal_damage(ctx.fighter, attacker, returned, false);
    }
}

// =============================================================================
// Medic bag
// =============================================================================

/// Heals the most wounded living teammate (the carrier included).
#[derive(Debug, Clone, Copy)]
pub struct MedicBag {
    heal: Tiered<i32>,
    cooldown: Tiered<f32>,
    charge_cost: Tiered<u32>,
    /// Missing hp below which healing is not worth a turn.
    threshold: i32,
}

impl MedicBag {
    /// Stock medic bag.
    #[must_use]
    pub fn stock() -> Arc<dyn Ability> {
        Arc::new(Self {
            heal: Tiered::new(25, 40),
            cooldown: Tiered::new(4.0, 3.5),
            charge_cost: Tiered::new(2, 1),
            threshold: 25,
        })
    }

    /// The living teammate missing the most hp, ties broken by roster
    /// order. `None` when nobody is wounded past the threshold.
    fn most_wounded_ally(&self, fight: &Fight, me: usize) -> Option<usize> {
        let team = fight.fighter(me).team;
        let mut best: Option<(usize, i32)> = None;

        for (idx, fighter) in fight.fighters().iter().enumerate() {
            if fighter.team != team || fighter.is_down() {
                continue;
            }
            let missing = MAX_HP - fighter.hp;
            if missing < self.threshold {
                continue;
            }
            if best.map_or(true, |(_, top)| missing > top) {
                best = Some((idx, missing));
            }
        }

        best.map(|(idx, _)| idx)
    }
}

impl Ability for MedicBag {
    fn name(&self) -> &str {
        "medicBag"
    }

    fn action_priority(&self, fight: &Fight, ctx: HookContext) -> Option<f32> {
        let ally = self.most_wounded_ally(fight, ctx.fighter)?;
        let missing = MAX_HP - fight.fighter(ally).hp;
        // Scales past weapon dps as wounds deepen, so triage wins out when
        // it matters and loses when it does not.
        Some(missing as f32 / 10.0)
    }

    fn when_prioritized(&self, fight: &mut Fight, ctx: HookContext) {
        let me = ctx.fighter;
        let attuned = fight.is_attuned(me, self.name());
        let cost = self.charge_cost.pick(attuned);

        if fight.fighter(me).charges < cost {
            fight.charge_or_back_off(me);
            return;
        }
        if fight.fighter(me).cooldown > 0.0 {
            return;
        }
        let Some(ally) = self.most_wounded_ally(fight, me) else {
            return;
        };

        fight.spend_charges(me, cost);
        fight.set_cooldown(me, self.cooldown.pick(attuned));
        fight.log_particle(ally, "medic");
        fight.heal(ally, self.heal.pick(attuned));
    }
}

// =============================================================================
// Tests
// =============================================================================
