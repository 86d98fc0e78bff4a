//! Shared combat primitives: targeting, movement, damage, and resources.
//!
//! Every rule that more than one ability relies on lives here as a method on
//! [`Fight`], so concrete abilities stay thin: they pick targets and
//! magnitudes, and delegate the actual arithmetic to this module.
//!
//! # Architecture
//!
//! Three families of primitives:
//!
//! - **Targeting** (read-only): distances, threat estimates, and the
//!   value-per-effort heuristics melee and ranged attacks share.
//! - **Movement** (mutating): pursuit and retreat steps, wall reflection,
//!   and the pairwise crowding relaxation that runs after every displacement.
//! - **Resolution** (mutating): damage with mitigation rounding, healing,
//!   knockback, status application, and the charge economy.
//!
//! All of it is synchronous and deterministic; the only RNG consumer in this
//! module is nothing — rolls happen inside the abilities that need them.

use glam::Vec2;
use tracing::trace;

use crate::ability::HookContext;
use crate::event::FighterUpdate;
use crate::fight::{
    clamp_timer, Fight, ARENA_SIZE, CROWDING_DISTANCE, MELEE_RANGE, TICK_LENGTH,
};
use crate::fighter::MAX_HP;
use crate::stats::Stat;
use crate::status::StatusEffect;

/// Angle, in radians, by which knockback deviates from the attacker→target
/// line. A fixed skew so repeated knockbacks walk targets along arena walls
/// instead of pinning them into corners.
pub const KNOCKBACK_ANGLE: f32 = 0.4;

/// Maximum pairwise relaxation passes after a displacement.
const SEPARATION_PASSES: usize = 4;

impl Fight {
    // =========================================================================
    // Targeting
    // =========================================================================

    /// Euclidean distance between two fighters.
    #[must_use]
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        self.fighter(a).distance_to(self.fighter(b))
    }

    /// Indices of living fighters on other teams, in roster order.
    #[must_use]
    pub fn living_enemies(&self, i: usize) -> Vec<usize> {
        let team = self.fighter(i).team;
        self.fighters()
            .iter()
            .enumerate()
            .filter(|(_, f)| f.team != team && !f.is_down())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Whether any living enemy remains for fighter `i`.
    #[must_use]
    pub fn has_living_enemies(&self, i: usize) -> bool {
        let team = self.fighter(i).team;
        self.fighters()
            .iter()
            .any(|f| f.team != team && !f.is_down())
    }

    /// The closest living enemy, ties broken by roster order.
    #[must_use]
    pub fn nearest_enemy(&self, i: usize) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for enemy in self.living_enemies(i) {
            let dist = self.distance(i, enemy);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((enemy, dist));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Total threat a fighter projects: the sum of every equipment's action
    /// and passive danger estimates, in damage per second.
    #[must_use]
    pub fn danger(&self, i: usize) -> f32 {
        let mut total = 0.0;
        for (slot, gear) in self.fighter(i).equipment.iter().enumerate() {
            let ctx = HookContext::new(i, slot);
            total += gear.ability.action_danger(self, ctx);
            total += gear.ability.passive_danger(self, ctx);
        }
        total
    }

    /// How attractive a fighter is as a target: threat projected divided by
    /// effective hit points. High-danger, low-durability enemies score high.
    #[must_use]
    pub fn target_value(&self, i: usize) -> f32 {
        self.danger(i) / self.fighter(i).effective_hp().max(1.0)
    }

    /// Seconds for `mover` to walk into melee range of `target` at current
    /// speed. Zero when already in range.
    #[must_use]
    pub fn time_to_reach(&self, mover: usize, target: usize) -> f32 {
        let gap = (self.distance(mover, target) - MELEE_RANGE).max(0.0);
        gap / self.fighter(mover).stats.speed_m_per_s()
    }

    /// The best melee target for `attacker`: highest target value discounted
    /// by travel time, ties keeping the earliest roster index.
    #[must_use]
    pub fn best_melee_target(&self, attacker: usize) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for enemy in self.living_enemies(attacker) {
            let score = self.target_value(enemy) / (1.0 + self.time_to_reach(attacker, enemy));
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((enemy, score));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// The best ranged target for `attacker`: highest target value, distance
    /// ignored, ties keeping the earliest roster index.
    #[must_use]
    pub fn best_ranged_target(&self, attacker: usize) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for enemy in self.living_enemies(attacker) {
            let score = self.target_value(enemy);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((enemy, score));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Living enemies that could walk into melee range of `i` within
    /// `window` seconds. Ranged attackers use this to decide when to fall
    /// back instead of firing.
    #[must_use]
    pub fn melee_threats_within(&self, i: usize, window: f32) -> Vec<usize> {
        self.living_enemies(i)
            .into_iter()
            .filter(|&enemy| self.time_to_reach(enemy, i) < window)
            .collect()
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Walks fighter `i` one tick's worth of distance toward a point,
    /// stopping short of the crowding radius around it.
    pub fn move_toward(&mut self, i: usize, target: Vec2) {
        let offset = target - self.fighter(i).position;
        let gap = offset.length();

        let speed = self.fighter(i).stats.speed_m_per_s();
        let step = (speed * TICK_LENGTH).min(gap - CROWDING_DISTANCE).max(0.0);
        if step <= f32::EPSILON {
            return;
        }

        let dir = offset.try_normalize().unwrap_or(Vec2::X);
        self.apply_move(i, dir * step);
    }

    /// Walks fighter `i` one tick's worth of distance directly away from a
    /// point. Wall reflection keeps the retreat from pinning against the
    /// boundary.
    pub fn move_away_from(&mut self, i: usize, threat: Vec2) {
        let offset = self.fighter(i).position - threat;
        let dir = offset.try_normalize().unwrap_or(Vec2::X);
        let step = self.fighter(i).stats.speed_m_per_s() * TICK_LENGTH;
        self.apply_move(i, dir * step);
    }

    /// Applies a raw displacement: reflects any axis that would leave the
    /// walkable margin, clamps to the arena, updates facing, logs the move,
    /// then relaxes crowding for everyone.
    pub(crate) fn apply_move(&mut self, i: usize, mut delta: Vec2) {
        let pos = self.fighter(i).position;
        let lo = CROWDING_DISTANCE;
        let hi = ARENA_SIZE - CROWDING_DISTANCE;

        if !(lo..=hi).contains(&(pos.x + delta.x)) {
            delta.x = -delta.x;
        }
        if !(lo..=hi).contains(&(pos.y + delta.y)) {
            delta.y = -delta.y;
        }

        let fighter = self.fighter_mut(i);
        fighter.position = (pos + delta).clamp(Vec2::ZERO, Vec2::splat(ARENA_SIZE));
        if delta.x < 0.0 {
            fighter.flipped = true;
        } else if delta.x > 0.0 {
            fighter.flipped = false;
        }

        let update = FighterUpdate::moved(fighter.position, fighter.flipped);
        self.log_animation(i, update);
        self.separate_crowded();
    }

    /// Pushes overlapping living fighters apart pairwise until everyone is
    /// at least the crowding distance from everyone else (or the pass budget
    /// runs out). The horizontal component of each push is doubled so knots
    /// of fighters spread into a readable line rather than a pile.
    fn separate_crowded(&mut self) {
        let count = self.fighters().len();
        let before: Vec<Vec2> = self.fighters().iter().map(|f| f.position).collect();

        for _ in 0..SEPARATION_PASSES {
            let mut displaced = false;

            for i in 0..count {
                if self.fighter(i).is_down() {
                    continue;
                }
                for j in (i + 1)..count {
                    if self.fighter(j).is_down() {
                        continue;
                    }

                    let delta = self.fighter(j).position - self.fighter(i).position;
                    let dist = delta.length();
                    if dist >= CROWDING_DISTANCE - 1e-3 {
                        continue;
                    }

                    let dir = delta.try_normalize().unwrap_or(Vec2::X);
                    let mut shift = dir * ((CROWDING_DISTANCE - dist) / 2.0);
                    shift.x *= 2.0;

                    let bounds = Vec2::splat(ARENA_SIZE);
                    let pi = (self.fighter(i).position - shift).clamp(Vec2::ZERO, bounds);
                    let pj = (self.fighter(j).position + shift).clamp(Vec2::ZERO, bounds);
                    self.fighter_mut(i).position = pi;
                    self.fighter_mut(j).position = pj;
                    displaced = true;
                }
            }

            if !displaced {
                break;
            }
        }

        for i in 0..count {
            let after = self.fighter(i).position;
            if after != before[i] {
                self.log_animation(i, FighterUpdate::position(after));
            }
        }
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolves a damaging hit on `target`.
    ///
    /// `base` is the attacker-side damage (ability damage times any melee
    /// multiplier); it is scaled by the target's mitigation and rounded up,
    /// so every connecting hit deals at least 1. Logs the hp change and a
    /// damage number, records the fall on a living→down transition, then —
    /// if `trigger_reactions` — fires the attacker's `on_hit_dealt` and the
    /// target's `on_hit_taken` hooks. Reaction damage must pass
    /// `trigger_reactions = false`; the chain is exactly one level deep.
    pub fn deal_damage(&mut self, attacker: usize, target: usize, base: f32, trigger_reactions: bool) {
        if self.fighter(target).is_down() {
            return;
        }

        let mitigation = self.fighter(target).stats.damage_taken_multiplier();
        let amount = (base * mitigation).ceil() as i32;

        let fighter = self.fighter_mut(target);
        fighter.hp -= amount;
        let hp = fighter.hp;
        let down = fighter.is_down();

        trace!(attacker, target, amount, hp, "hit");
        self.log_animation(target, FighterUpdate::hp(hp));
        self.log_text(target, amount.to_string());

        if down {
            self.note_down(target);
        }

        if trigger_reactions {
            let dealt_hooks = self.ability_handles(attacker);
            for (slot, ability) in dealt_hooks.iter().enumerate() {
                ability.on_hit_dealt(self, HookContext::new(attacker, slot), target, amount);
            }
            let taken_hooks = self.ability_handles(target);
            for (slot, ability) in taken_hooks.iter().enumerate() {
                ability.on_hit_taken(self, HookContext::new(target, slot), attacker, amount);
            }
        }
    }

    /// Restores hit points, capped at [`MAX_HP`]. Down fighters cannot be
    /// healed back up.
    pub fn heal(&mut self, i: usize, amount: i32) {
        if self.fighter(i).is_down() {
            return;
        }

        let fighter = self.fighter_mut(i);
        fighter.hp = (fighter.hp + amount).min(MAX_HP);
        let hp = fighter.hp;

        self.log_animation(i, FighterUpdate::hp(hp));
        self.log_text(i, format!("+{amount}"));
    }

    /// Shoves `target` a fixed distance along the attacker→target line,
    /// skewed by [`KNOCKBACK_ANGLE`] so walls deflect rather than trap.
    pub fn apply_knockback(&mut self, attacker: usize, target: usize, distance: f32) {
        if self.fighter(target).is_down() {
            return;
        }

        let line = self.fighter(target).position - self.fighter(attacker).position;
        let dir = line.try_normalize().unwrap_or(Vec2::X);
        let (sin, cos) = KNOCKBACK_ANGLE.sin_cos();
        let skewed = Vec2::new(cos * dir.x - sin * dir.y, sin * dir.x + cos * dir.y);

        self.apply_move(target, skewed * distance);
    }

    /// Applies a status effect to a living fighter and logs the new tint.
    pub fn apply_status(&mut self, i: usize, effect: StatusEffect) {
        if self.fighter(i).is_down() {
            return;
        }

        self.fighter_mut(i).add_status(effect);
        let tint = self.fighter(i).current_tint();
        self.log_animation(
            i,
            FighterUpdate {
                tint: Some(tint),
                ..FighterUpdate::default()
            },
        );
    }

    /// Adjusts one stat in place and logs the full new stat block.
    pub fn modify_stat(&mut self, i: usize, stat: Stat, delta: i32) {
        self.fighter_mut(i).stats.add(stat, delta);
        let stats = self.fighter(i).stats;
        self.log_animation(
            i,
            FighterUpdate {
                stats: Some(stats),
                ..FighterUpdate::default()
            },
        );
    }

    /// Starts a cooldown. Negative inputs clamp to zero.
    pub fn set_cooldown(&mut self, i: usize, seconds: f32) {
        self.fighter_mut(i).cooldown = clamp_timer(seconds);
    }

    /// Spends charges. Abilities gate on their cost before prioritizing, so
    /// underflow is an engine bug.
    pub fn spend_charges(&mut self, i: usize, cost: u32) {
        let fighter = self.fighter_mut(i);
        debug_assert!(fighter.charges >= cost, "charge cost not gated");
        fighter.charges = fighter.charges.saturating_sub(cost);
        let charges = fighter.charges;
        self.log_animation(
            i,
            FighterUpdate {
                charges: Some(charges),
                ..FighterUpdate::default()
            },
        );
    }

    /// Sets the visual rotation pose if it changed.
    pub fn set_rotation(&mut self, i: usize, rotation: crate::event::RotationState) {
        if self.fighter(i).rotation == rotation {
            return;
        }
        self.fighter_mut(i).rotation = rotation;
        self.log_animation(
            i,
            FighterUpdate {
                rotation: Some(rotation),
                ..FighterUpdate::default()
            },
        );
    }

    /// The fallback turn for charge-gated abilities: disengage if pressed in
    /// melee by a scarier enemy, otherwise stand and bank a charge.
    pub fn charge_or_back_off(&mut self, i: usize) {
        if let Some(enemy) = self.nearest_enemy(i) {
            if self.distance(i, enemy) <= MELEE_RANGE && self.danger(enemy) > self.danger(i) {
                let threat = self.fighter(enemy).position;
                self.move_away_from(i, threat);
                return;
            }
        }
        self.gain_charge(i);
    }

    fn gain_charge(&mut self, i: usize) {
        let fighter = self.fighter_mut(i);
        fighter.charges += 1;
        fighter.cooldown = fighter.stats.time_to_charge();
        let charges = fighter.charges;

        self.log_animation(
            i,
            FighterUpdate {
                charges: Some(charges),
                ..FighterUpdate::default()
            },
        );
        self.log_particle(i, "charge");
    }
}

// =============================================================================
// Tests
// =============================================================================
