//! Passive gear: permanent stat boosts applied once at fight start.
//!
//! These abilities never act; their entire effect is a single
//! `on_fight_start` stat delta, visible in the spawn batch as a stats
//! animation update.

use std::sync::Arc;

use crate::ability::{Ability, HookContext, Tiered};
use crate::fight::Fight;
use crate::stats::Stat;

/// A flat boost to one stat for the whole fight.
#[derive(Debug, Clone, Copy)]
pub struct StatBoost {
    id: &'static str,
    stat: Stat,
    amount: Tiered<i32>,
}

impl StatBoost {
    /// Toughness boost.
    #[must_use]
    pub fn plate_armor() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "plateArmor",
            stat: Stat::Toughness,
            amount: Tiered::new(2, 3),
        })
    }

    /// Speed boost.
    #[must_use]
    pub fn winged_boots() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "wingedBoots",
            stat: Stat::Speed,
            amount: Tiered::new(2, 3),
        })
    }

    /// Strength boost.
    #[must_use]
    pub fn power_gauntlets() -> Arc<dyn Ability> {
        Arc::new(Self {
            id: "powerGauntlets",
            stat: Stat::Strength,
            amount: Tiered::new(2, 3),
        })
    }
}

impl Ability for StatBoost {
    fn name(&self) -> &str {
        self.id
    }

    fn on_fight_start(&self, fight: &mut Fight, ctx: HookContext) {
        let attuned = fight.is_attuned(ctx.fighter, self.id);
        fight.modify_stat(ctx.fighter, self.stat, self.amount.pick(attuned));
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::template_for;
    use crate::roster::{FighterTemplate, RosterEntry};
    use crate::stats::Stats;

    #[test]
    fn boost_applies_at_fight_start() {
        let roster = vec![
            RosterEntry::new(
                FighterTemplate::new("A", Stats::default()),
                vec![template_for("plateArmor").unwrap()],
                0,
            ),
            RosterEntry::new(FighterTemplate::new("B", Stats::default()), vec![], 1),
        ];
        let mut fight = Fight::new(&roster, 0).unwrap();

        let armor = StatBoost::plate_armor();
        armor.on_fight_start(&mut fight, HookContext::new(0, 1));

        assert_eq!(fight.fighter(0).stats.toughness, 2);
        assert_eq!(fight.fighter(1).stats.toughness, 0);
    }

    #[test]
    fn attunement_raises_the_boost() {
        let roster = vec![
            RosterEntry::new(
                FighterTemplate::new("A", Stats::default()).attuned_to("wingedBoots"),
                vec![template_for("wingedBoots").unwrap()],
                0,
            ),
            RosterEntry::new(FighterTemplate::new("B", Stats::default()), vec![], 1),
        ];
        let mut fight = Fight::new(&roster, 0).unwrap();

        let boots = StatBoost::winged_boots();
        boots.on_fight_start(&mut fight, HookContext::new(0, 1));

        assert_eq!(fight.fighter(0).stats.speed, 3);
    }

    #[test]
    fn boosts_never_act() {
        let roster = vec![
            RosterEntry::new(FighterTemplate::new("A", Stats::default()), vec![], 0),
            RosterEntry::new(FighterTemplate::new("B", Stats::default()), vec![], 1),
        ];
        let fight = Fight::new(&roster, 0).unwrap();

        let gauntlets = StatBoost::power_gauntlets();
        assert!(gauntlets
            .action_priority(&fight, HookContext::new(0, 1))
            .is_none());
    }
}
