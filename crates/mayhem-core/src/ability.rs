//! The ability hook contract.
//!
//! An ability is a named bundle of optional behavior hooks attached to a
//! piece of equipment (or innate to a fighter). The engine never knows what
//! any concrete ability does; it only invokes hooks at fixed phases of the
//! simulation:
//!
//! - **Scoring** (read-only): [`Ability::action_danger`],
//!   [`Ability::passive_danger`], [`Ability::action_priority`].
//! - **Acting** (mutating): [`Ability::when_prioritized`] — at most one per
//!   fighter per tick, the highest-scored action.
//! - **Lifecycle** (mutating): [`Ability::on_fight_start`],
//!   [`Ability::on_tick`].
//! - **Reactions** (mutating): [`Ability::on_hit_dealt`],
//!   [`Ability::on_hit_taken`] — fired once per equipment after a damaging
//!   hit; damage dealt *by* a reaction never re-fires reactions (depth is
//!   exactly one level).
//!
//! Hooks that read take `&Fight`; hooks that act take `&mut Fight`. Before
//! any mutating iteration the engine snapshots the `Arc<dyn Ability>` handles
//! it will call, so an ability that mutates the equipment list cannot
//! invalidate the iteration.
//!
//! # Attunement
//!
//! Many abilities carry a two-tier numeric table ([`Tiered`]): a base value
//! and an attuned value. Whether a fighter is attuned to an ability is a
//! boolean per (fighter, ability-name) pair computed from the roster; the
//! ability consults it with [`crate::fight::Fight::is_attuned`] to select the
//! tier. The engine supplies the flag, the ability supplies the numbers.

use crate::fight::Fight;

/// Where a hook is firing from: the owning fighter and the equipment index
/// the ability sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookContext {
    /// Index of the owning fighter in roster order.
    pub fighter: usize,
    /// Index of this ability's equipment in the owner's equipment list.
    pub equipment: usize,
}

impl HookContext {
    /// Creates a hook context.
    #[must_use]
    pub const fn new(fighter: usize, equipment: usize) -> Self {
        Self { fighter, equipment }
    }
}

/// Behavior bundle for one ability. Implement any subset of hooks; the
/// defaults are no-ops.
pub trait Ability: Send + Sync + std::fmt::Debug {
    /// The catalog name of this ability, matched against attunements.
    fn name(&self) -> &str;

    /// Context-free threat estimate of taking this action, in damage per
    /// second. Read by *other* fighters' targeting heuristics. Must not
    /// mutate state.
    fn action_danger(&self, _fight: &Fight, _ctx: HookContext) -> f32 {
        0.0
    }

    /// Threat contributed without taking an action (reflects, periodic
    /// zaps). Summed across all equipment. Must not mutate state.
    fn passive_danger(&self, _fight: &Fight, _ctx: HookContext) -> f32 {
        0.0
    }

    /// Utility score for executing this ability right now, or `None` if it
    /// offers no action. The engine picks the highest score across the
    /// owner's equipment, scanning the innate slot last; ties keep the
    /// earliest-scanned ability.
    fn action_priority(&self, _fight: &Fight, _ctx: HookContext) -> Option<f32> {
        None
    }

    /// Executes the chosen action this tick. May move the owner, spend
    /// cooldown/charges, deal damage, apply status effects, and log events.
    fn when_prioritized(&self, _fight: &mut Fight, _ctx: HookContext) {}

    /// One-time setup before tick 0, called in equipment order (permanent
    /// stat deltas from passive gear, etc.).
    fn on_fight_start(&self, _fight: &mut Fight, _ctx: HookContext) {}

    /// Per-tick passive behavior, independent of action selection. Skipped
    /// while the owner is down or has no living enemies.
    fn on_tick(&self, _fight: &mut Fight, _ctx: HookContext) {}

    /// Fired after the owner lands a damaging hit, once per piece of the
    /// owner's equipment. Damage dealt here does not re-fire reactions.
    fn on_hit_dealt(&self, _fight: &mut Fight, _ctx: HookContext, _target: usize, _damage: i32) {}

    /// Fired after the owner takes a damaging hit, once per piece of the
    /// owner's equipment. Damage dealt here does not re-fire reactions.
    fn on_hit_taken(&self, _fight: &mut Fight, _ctx: HookContext, _attacker: usize, _damage: i32) {
    }
}

/// A base/attuned pair of magnitudes.
///
/// Abilities store damage, cooldown, duration, and charge-cost values as
/// tiers and pick one with the owner's attunement flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiered<T> {
    /// Value used by non-attuned fighters.
    pub base: T,
    /// Value used by attuned fighters.
    pub attuned: T,
}

impl<T: Copy> Tiered<T> {
    /// Creates a tier pair.
    #[must_use]
    pub const fn new(base: T, attuned: T) -> Self {
        Self { base, attuned }
    }

    /// Selects the tier for the given attunement flag.
    #[must_use]
    pub fn pick(&self, attuned: bool) -> T {
        if attuned {
            self.attuned
        } else {
            self.base
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Inert;

    impl Ability for Inert {
        fn name(&self) -> &str {
            "inert"
        }
    }

    #[test]
    fn default_hooks_are_inert() {
        use crate::roster::{FighterTemplate, RosterEntry};
        use crate::stats::Stats;

        let roster = vec![RosterEntry::new(
            FighterTemplate::new("Ada", Stats::default()),
            vec![],
            0,
        )];
        let fight = Fight::new(&roster, 0).unwrap();

        let ability = Inert;
        let ctx = HookContext::new(0, 0);
        assert!((ability.action_danger(&fight, ctx)).abs() < f32::EPSILON);
        assert!((ability.passive_danger(&fight, ctx)).abs() < f32::EPSILON);
        assert!(ability.action_priority(&fight, ctx).is_none());
    }

    #[test]
    fn tiered_pick_selects_by_flag() {
        let tier = Tiered::<f32>::new(10.0, 14.0);
        assert!((tier.pick(false) - 10.0).abs() < f32::EPSILON);
        assert!((tier.pick(true) - 14.0).abs() < f32::EPSILON);
    }

    #[test]
    fn ability_trait_is_object_safe() {
        let boxed: Box<dyn Ability> = Box::new(Inert);
        assert_eq!(boxed.name(), "inert");
    }
}
