//! Fight orchestration: the tick loop, action selection, and placement.
//!
//! A [`Fight`] owns every combatant, the event log, the placement
//! accumulator, and the seeded RNG for the duration of one battle. The state
//! machine is `spawning → ticking → resolved`:
//!
//! - **spawning**: combatants are placed evenly around a circle, given a
//!   fixed initial cooldown (no instant alpha-strikes), and every ability's
//!   `on_fight_start` fires once in equipment order.
//! - **ticking**, per tick: (1) every living combatant decays its
//!   cooldown/effects and runs `on_tick` hooks, (2) every living combatant
//!   with a living enemy selects and executes its best action, (3) a fresh
//!   empty event batch is appended for the next tick.
//! - **resolved**: at most one team has living members, or the hard time cap
//!   elapsed.
//!
//! # Determinism
//!
//! The simulation is strictly single-threaded and synchronous. Combatants
//! are processed in roster order every pass; hook execution reads the live
//! (not-yet-this-tick) state of other combatants, so iteration order is part
//! of the observable contract, not an implementation detail. All randomness
//! flows through the owned [`FightRng`]. Two fights with the same roster and
//! seed produce identical event logs and placement orders.
//!
//! # Example
//!
//! ```
//! use mayhem_core::fight::Fight;
//! use mayhem_core::roster::{FighterTemplate, RosterEntry};
//! use mayhem_core::stats::Stats;
//!
//! let roster = vec![
//!     RosterEntry::new(FighterTemplate::new("Ada", Stats::uniform(5)), vec![], 0),
//!     RosterEntry::new(FighterTemplate::new("Grace", Stats::uniform(5)), vec![], 1),
//! ];
//!
//! let report = Fight::new(&roster, 42).unwrap().simulate();
//! assert_eq!(report.placement.len(), 2);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::ability::{Ability, HookContext};
use crate::equipment;
use crate::event::{Event, FighterUpdate, TickEvents};
use crate::fighter::{EquipmentInBattle, FighterInBattle, MAX_HP};
use crate::rng::FightRng;
use crate::roster::{FightError, RosterEntry};
use crate::status::{ClearBehavior, StatusEffect};

// =============================================================================
// Constants
// =============================================================================

/// Length of one simulation tick in seconds.
pub const TICK_LENGTH: f32 = 0.2;

/// Hard cap on simulated fight time in seconds.
pub const TIME_CAP: f32 = 300.0;

/// Side length of the square arena.
pub const ARENA_SIZE: f32 = 100.0;

/// Maximum distance at which a melee strike can land.
pub const MELEE_RANGE: f32 = 4.0;

/// Minimum separation enforced between living combatants after movement.
pub const CROWDING_DISTANCE: f32 = 3.0;

/// Cooldown applied to everyone at spawn.
pub const INITIAL_COOLDOWN: f32 = 3.0;

/// Radius of the spawn circle around the arena center.
pub const SPAWN_RADIUS: f32 = 25.0;

/// Slack window for melee timing: beyond this mismatch between cooldown and
/// travel time the fighter repositions instead of closing blindly.
pub const MELEE_SLACK: f32 = 0.7;

/// Tolerance for floating-point noise on timers. Anything at or below this
/// is observed as exactly zero.
pub(crate) const TIMER_EPSILON: f32 = 1e-4;

// =============================================================================
// Fight
// =============================================================================

/// Result of a completed simulation: the final team ranking and the full
/// replay log. Immutable and freely shareable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightReport {
    /// Teams from winner to first-eliminated.
    pub placement: Vec<u32>,
    /// Ordered per-tick event batches.
    pub log: Vec<TickEvents>,
}

/// One battle: combatants, event log, placement accumulator, and RNG.
#[derive(Debug, Clone)]
pub struct Fight {
    fighters: Vec<FighterInBattle>,
    rng: FightRng,
    log: Vec<TickEvents>,
    /// Eliminated teams, most recent first. Survivors are prepended at
    /// resolution, so the final order reads winner-first.
    placement: Vec<u32>,
    elapsed: f32,
}

impl Fight {
    /// Builds a fight from a roster and a seed.
    ///
    /// Every fighter receives their innate ability at equipment index 0,
    /// followed by their chosen equipment in roster order.
    ///
    /// # Errors
    ///
    /// Returns [`FightError::EmptyRoster`] for an empty roster and
    /// [`FightError::UnknownAbility`] when an ability id does not resolve in
    /// the catalog. These are caller bugs surfaced early; a constructed
    /// fight cannot fail.
    pub fn new(roster: &[RosterEntry], seed: u64) -> Result<Self, FightError> {
        if roster.is_empty() {
            return Err(FightError::EmptyRoster);
        }

        let mut fighters = Vec::with_capacity(roster.len());
        for entry in roster {
            let mut gear = Vec::with_capacity(entry.equipment.len() + 1);

            let innate_id = &entry.fighter.innate_ability;
            let innate = equipment::ability_for(innate_id).ok_or_else(|| {
                FightError::UnknownAbility {
                    id: innate_id.clone(),
                }
            })?;
            gear.push(EquipmentInBattle::new(innate_id, innate_id, innate));

            for template in &entry.equipment {
                let ability = equipment::ability_for(&template.ability).ok_or_else(|| {
                    FightError::UnknownAbility {
                        id: template.ability.clone(),
                    }
                })?;
                gear.push(EquipmentInBattle::new(
                    &template.name,
                    &template.image,
                    ability,
                ));
            }

            fighters.push(FighterInBattle {
                name: entry.fighter.name.clone(),
                team: entry.team,
                appearance: entry.fighter.appearance.clone(),
                hp: MAX_HP,
                position: Vec2::ZERO,
                cooldown: 0.0,
                charges: 0,
                stats: entry.fighter.stats,
                status_effects: Vec::new(),
                equipment: gear,
                attunements: entry.fighter.attunements.iter().cloned().collect(),
                flipped: false,
                rotation: crate::event::RotationState::Neutral,
            });
        }

        debug!(fighters = fighters.len(), seed, "fight constructed");
        Ok(Self {
            fighters,
            rng: FightRng::new(seed),
            log: vec![Vec::new()],
            placement: Vec::new(),
            elapsed: 0.0,
        })
    }

    /// Runs the battle to completion and returns the report.
    ///
    /// Pure computation: no I/O, no suspension points, no interleaving. The
    /// returned report is immutable and may be shared with any number of
    /// consumers.
    #[must_use]
    pub fn simulate(mut self) -> FightReport {
        self.spawn_fighters();

        while self.living_team_count() > 1 && self.elapsed < TIME_CAP {
            self.run_tick();
        }

        self.finish()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// All combatants, in roster order.
    #[must_use]
    pub fn fighters(&self) -> &[FighterInBattle] {
        &self.fighters
    }

    /// One combatant by roster index.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range index — an engine bug, not an input error.
    #[must_use]
    pub fn fighter(&self, i: usize) -> &FighterInBattle {
        &self.fighters[i]
    }

    /// Mutable access to one combatant. Used by ability hooks; external
    /// callers must not mutate battle state mid-fight.
    pub fn fighter_mut(&mut self, i: usize) -> &mut FighterInBattle {
        &mut self.fighters[i]
    }

    /// Simulated seconds elapsed so far.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The event log so far.
    #[must_use]
    pub fn log(&self) -> &[TickEvents] {
        &self.log
    }

    /// The fight's random number generator.
    pub fn rng_mut(&mut self) -> &mut FightRng {
        &mut self.rng
    }

    /// Whether fighter `i` is attuned to the named ability.
    #[must_use]
    pub fn is_attuned(&self, i: usize, ability: &str) -> bool {
        self.fighters[i].is_attuned(ability)
    }

    // =========================================================================
    // Event logging
    // =========================================================================

    /// Appends an event to the current tick's batch.
    pub fn log_event(&mut self, event: Event) {
        self.log
            .last_mut()
            .expect("log always has an open batch")
            .push(event);
    }

    /// Logs a partial state update for one fighter. Empty updates are
    /// dropped.
    pub fn log_animation(&mut self, fighter: usize, update: FighterUpdate) {
        if update.is_empty() {
            return;
        }
        self.log_event(Event::Animation { fighter, update });
    }

    /// Logs floating combat text over a fighter.
    pub fn log_text(&mut self, fighter: usize, text: impl Into<String>) {
        self.log_event(Event::Text {
            fighter,
            text: text.into(),
        });
    }

    /// Logs a one-shot particle on a fighter.
    pub fn log_particle(&mut self, fighter: usize, image: &str) {
        self.log_event(Event::Particle {
            fighter,
            image: image.to_string(),
        });
    }

    /// Logs a projectile between two fighters.
    pub fn log_projectile(&mut self, from: usize, to: usize, image: &str) {
        self.log_event(Event::Projectile {
            from,
            to,
            image: image.to_string(),
        });
    }

    // =========================================================================
    // Spawning
    // =========================================================================

    /// Places combatants on the spawn circle, applies the initial cooldown,
    /// logs spawn snapshots, and fires `on_fight_start` hooks.
    fn spawn_fighters(&mut self) {
        let count = self.fighters.len();
        let center = Vec2::splat(ARENA_SIZE / 2.0);

        for (i, fighter) in self.fighters.iter_mut().enumerate() {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            fighter.position = center + SPAWN_RADIUS * Vec2::new(angle.cos(), angle.sin());
            fighter.cooldown = INITIAL_COOLDOWN;
            // Face the arena center.
            fighter.flipped = fighter.position.x > center.x;
        }

        for i in 0..count {
            let snapshot = self.fighters[i].snapshot();
            self.log_event(Event::Spawn { fighter: snapshot });
        }

        // Fight-start setup after the snapshots: passive stat deltas arrive
        // as animation updates in the same batch.
        for i in 0..count {
            let hooks = self.ability_handles(i);
            for (slot, ability) in hooks.iter().enumerate() {
                ability.on_fight_start(self, HookContext::new(i, slot));
            }
        }

        debug!(fighters = count, "spawned");
    }

    // =========================================================================
    // Tick loop
    // =========================================================================

    /// Runs one tick: decay/`on_tick` pass, action pass, fresh batch.
    pub(crate) fn run_tick(&mut self) {
        trace!(elapsed = self.elapsed, "tick");
        let count = self.fighters.len();

        for i in 0..count {
            self.decay_and_tick_hooks(i);
        }
        for i in 0..count {
            self.act(i);
        }

        self.elapsed += TICK_LENGTH;
        self.log.push(Vec::new());
    }

    /// Decays cooldown and status durations for fighter `i`, fires expiring
    /// effects' clear behavior, then runs `on_tick` hooks.
    fn decay_and_tick_hooks(&mut self, i: usize) {
        if self.fighters[i].is_down() {
            return;
        }

        let frozen = self.fighters[i].is_frozen();
        let rate = if frozen { 0.5 } else { 1.0 };

        {
            let fighter = &mut self.fighters[i];
            fighter.cooldown = clamp_timer(fighter.cooldown - TICK_LENGTH * rate);

            for effect in &mut fighter.status_effects {
                // The frozen effect itself decays at full rate; only effects
                // frozen *by another* effect slow down.
                let effect_rate = if frozen && !effect.is_frozen() { 0.5 } else { 1.0 };
                effect.duration = clamp_timer(effect.duration - TICK_LENGTH * effect_rate);
            }
        }

        // Drain expired effects one at a time so a clear behavior observes
        // the list without the effect it is clearing.
        while let Some(idx) = self.fighters[i]
            .status_effects
            .iter()
            .position(|s| s.duration <= TIMER_EPSILON)
        {
            let effect = self.fighters[i].status_effects.remove(idx);
            self.clear_status(i, &effect);
        }

        if !self.fighters[i].is_down() && self.has_living_enemies(i) {
            let hooks = self.ability_handles(i);
            for (slot, ability) in hooks.iter().enumerate() {
                if self.fighters[i].is_down() {
                    break;
                }
                ability.on_tick(self, HookContext::new(i, slot));
            }
        }
    }

    /// Fires an expired effect's clear behavior and logs the visible result.
    fn clear_status(&mut self, i: usize, effect: &StatusEffect) {
        let mut update = FighterUpdate::default();

        if let ClearBehavior::RevertStat { stat, amount } = effect.on_clear {
            self.fighters[i].stats.add(stat, amount);
            update.stats = Some(self.fighters[i].stats);
        }

        update.tint = Some(self.fighters[i].current_tint());
        self.log_animation(i, update);
    }

    /// Scores every equipment's action and executes the winner.
    ///
    /// The innate slot 0 is scanned last; a strictly-greater comparison
    /// keeps the earliest-scanned ability on ties, so carried gear outranks
    /// the innate fallback and equipment-list order breaks ties.
    fn act(&mut self, i: usize) {
        if self.fighters[i].is_down() || !self.has_living_enemies(i) {
            return;
        }

        let count = self.fighters[i].equipment.len();
        let mut best: Option<(usize, f32)> = None;

        for slot in (1..count).chain(std::iter::once(0)) {
            let ability = Arc::clone(&self.fighters[i].equipment[slot].ability);
            if let Some(score) = ability.action_priority(self, HookContext::new(i, slot)) {
                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((slot, score));
                }
            }
        }

        if let Some((slot, _)) = best {
            let ability = Arc::clone(&self.fighters[i].equipment[slot].ability);
            ability.when_prioritized(self, HookContext::new(i, slot));
        }
    }

    /// Snapshots the ability handles of fighter `i`'s equipment so mutating
    /// hooks can run without holding a borrow of the equipment list.
    pub(crate) fn ability_handles(&self, i: usize) -> Vec<Arc<dyn Ability>> {
        self.fighters[i]
            .equipment
            .iter()
            .map(|e| Arc::clone(&e.ability))
            .collect()
    }

    // =========================================================================
    // Elimination and resolution
    // =========================================================================

    /// Records a fighter's fall; prepends their team to the placement list
    /// when its last member goes down (earlier eliminations rank lower).
    pub(crate) fn note_down(&mut self, i: usize) {
        debug!(fighter = %self.fighters[i].name, "fighter down");
        self.log_particle(i, "ko");

        let team = self.fighters[i].team;
        let team_alive = self
            .fighters
            .iter()
            .any(|f| f.team == team && !f.is_down());
        if !team_alive {
            debug!(team, "team eliminated");
            self.placement.insert(0, team);
        }
    }

    /// Number of distinct teams with at least one living member.
    #[must_use]
    pub fn living_team_count(&self) -> usize {
        self.fighters
            .iter()
            .filter(|f| !f.is_down())
            .map(|f| f.team)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Finalizes placement and hands the report over.
    ///
    /// Surviving teams (one on a clean victory, several on a time-cap tie)
    /// rank above every eliminated team, ordered by ascending team id — an
    /// arbitrary but deterministic order for the cap case.
    fn finish(self) -> FightReport {
        let survivors: BTreeSet<u32> = self
            .fighters
            .iter()
            .filter(|f| !f.is_down())
            .map(|f| f.team)
            .collect();

        let mut placement: Vec<u32> = survivors.into_iter().collect();
        placement.extend(&self.placement);

        debug!(?placement, elapsed = self.elapsed, "fight resolved");
        FightReport {
            placement,
            log: self.log,
        }
    }
}

/// Clamps a decremented timer so transient float noise below zero is never
/// observed by any other rule.
pub(crate) fn clamp_timer(value: f32) -> f32 {
    if value <= TIMER_EPSILON {
        0.0
    } else {
        value
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{FighterTemplate, RosterEntry};
    use crate::stats::Stats;

    fn duel_roster() -> Vec<RosterEntry> {
        vec![
            RosterEntry::new(FighterTemplate::new("Ada", Stats::default()), vec![], 0),
            RosterEntry::new(FighterTemplate::new("Grace", Stats::default()), vec![], 1),
        ]
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn empty_roster_is_rejected() {
            assert!(matches!(Fight::new(&[], 0), Err(FightError::EmptyRoster)));
        }

        #[test]
        fn unknown_ability_is_rejected() {
            let mut roster = duel_roster();
            roster[0].fighter.innate_ability = "voidBlade".to_string();

            match Fight::new(&roster, 0) {
                Err(FightError::UnknownAbility { id }) => assert_eq!(id, "voidBlade"),
                other => panic!("expected UnknownAbility, got {other:?}"),
            }
        }

        #[test]
        fn innate_ability_occupies_slot_zero() {
            let fight = Fight::new(&duel_roster(), 0).unwrap();
            for fighter in fight.fighters() {
                assert_eq!(fighter.equipment[0].name, "fists");
                assert_eq!(fighter.hp, MAX_HP);
            }
        }
    }

    mod spawn_tests {
        use super::*;

        #[test]
        fn spawn_places_fighters_on_circle_with_cooldown() {
            let mut fight = Fight::new(&duel_roster(), 7).unwrap();
            fight.spawn_fighters();

            let center = Vec2::splat(ARENA_SIZE / 2.0);
            for fighter in fight.fighters() {
                let radius = fighter.position.distance(center);
                assert!((radius - SPAWN_RADIUS).abs() < 1e-3);
                assert!((fighter.cooldown - INITIAL_COOLDOWN).abs() < 1e-6);
            }
        }

        #[test]
        fn spawn_logs_one_snapshot_per_fighter() {
            let mut fight = Fight::new(&duel_roster(), 7).unwrap();
            fight.spawn_fighters();

            let spawns = fight.log()[0]
                .iter()
                .filter(|e| matches!(e, Event::Spawn { .. }))
                .count();
            assert_eq!(spawns, 2);
        }
    }

    mod resolution_tests {
        use super::*;

        #[test]
        fn single_team_resolves_without_combat() {
            let roster = vec![RosterEntry::new(
                FighterTemplate::new("Solo", Stats::default()),
                vec![],
                3,
            )];
            let report = Fight::new(&roster, 0).unwrap().simulate();

            assert_eq!(report.placement, vec![3]);
            // Spawn batch only: the tick loop never ran.
            assert_eq!(report.log.len(), 1);
        }

        #[test]
        fn duel_produces_two_placements() {
            let report = Fight::new(&duel_roster(), 42).unwrap().simulate();

            let mut teams = report.placement.clone();
            teams.sort_unstable();
            assert_eq!(teams, vec![0, 1]);
        }

        #[test]
        fn fight_terminates_within_time_cap() {
            // Unkillable-ish: max toughness pacifists would still stop at the cap.
            let roster = vec![
                RosterEntry::new(
                    FighterTemplate::new("A", Stats { toughness: 10, ..Stats::default() }),
                    vec![],
                    0,
                ),
                RosterEntry::new(
                    FighterTemplate::new("B", Stats { toughness: 10, ..Stats::default() }),
                    vec![],
                    1,
                ),
            ];
            let report = Fight::new(&roster, 1).unwrap().simulate();

            let max_batches = (TIME_CAP / TICK_LENGTH) as usize + 2;
            assert!(report.log.len() <= max_batches);
            assert_eq!(report.placement.len(), 2);
        }
    }

    mod timer_tests {
        use super::*;

        #[test]
        fn clamp_timer_flushes_noise_to_zero() {
            assert_eq!(clamp_timer(-0.001), 0.0);
            assert_eq!(clamp_timer(0.0), 0.0);
            assert_eq!(clamp_timer(TIMER_EPSILON / 2.0), 0.0);
            assert!(clamp_timer(0.5) > 0.0);
        }

        #[test]
        fn cooldown_decays_by_tick_length() {
            let mut fight = Fight::new(&duel_roster(), 0).unwrap();
            fight.fighter_mut(0).cooldown = 1.0;
            fight.decay_and_tick_hooks(0);
            assert!((fight.fighter(0).cooldown - 0.8).abs() < 1e-5);
        }

        #[test]
        fn frozen_halves_cooldown_decay() {
            let mut fight = Fight::new(&duel_roster(), 0).unwrap();
            fight.fighter_mut(0).cooldown = 1.0;
            fight
                .fighter_mut(0)
                .add_status(StatusEffect::frozen(5.0));

            fight.decay_and_tick_hooks(0);
            assert!((fight.fighter(0).cooldown - 0.9).abs() < 1e-5);
            // The frozen effect itself decays at full rate.
            assert!((fight.fighter(0).status_effects[0].duration - 4.8).abs() < 1e-5);
        }

        #[test]
        fn expired_status_reverts_stats() {
            use crate::stats::Stat;

            let mut fight = Fight::new(&duel_roster(), 0).unwrap();
            fight.fighter_mut(0).stats.strength = 3;
            fight.fighter_mut(0).add_status(StatusEffect::stat_buff(
                "rage",
                0.1,
                [255, 60, 60, 120],
                Stat::Strength,
                3,
            ));

            fight.decay_and_tick_hooks(0);

            assert!(fight.fighter(0).status_effects.is_empty());
            assert_eq!(fight.fighter(0).stats.strength, 0);
        }
    }
}
