//! # Mayhem Core
//!
//! Deterministic tick-based combat simulation for the Mayhem Manager arcade
//! game. The crate takes a roster (fighter templates, equipment, teams) and
//! a seed, simulates the battle to completion, and returns a
//! [`FightReport`](fight::FightReport): the final team placement plus a
//! complete per-tick event log a client can replay.
//!
//! # Architecture
//!
//! ```text
//! roster + seed ──► Fight::new ──► simulate() ──► FightReport
//!                       │
//!          ┌────────────┼────────────────┐
//!          ▼            ▼                ▼
//!     fighter state   combat         equipment
//!     (hp, position,  primitives     catalog
//!      cooldowns,     (targeting,    (Ability hooks:
//!      statuses)      movement,      melee, ranged,
//!                     damage)        aoe, passive,
//!                                    utility)
//! ```
//!
//! The engine knows nothing about any concrete weapon: equipment behavior
//! lives behind the [`Ability`](ability::Ability) hook trait, and the fight
//! loop only scores, selects, and invokes hooks at fixed phases.
//!
//! # Determinism
//!
//! Identical rosters and seeds produce byte-identical reports. All
//! randomness flows through one seeded [`FightRng`](rng::FightRng); fighters
//! are processed strictly in roster order; no parallelism, no ambient time.
//! This is what makes replays, regression fixtures, and server/client
//! agreement possible.
//!
//! # Example
//!
//! ```
//! use mayhem_core::fight::Fight;
//! use mayhem_core::roster::{FighterTemplate, RosterEntry};
//! use mayhem_core::stats::Stats;
//!
//! let roster = vec![
//!     RosterEntry::new(FighterTemplate::new("Ada", Stats::uniform(4)), vec![], 0),
//!     RosterEntry::new(FighterTemplate::new("Grace", Stats::uniform(4)), vec![], 1),
//! ];
//!
//! let report = Fight::new(&roster, 7)?.simulate();
//! let rerun = Fight::new(&roster, 7)?.simulate();
//! assert_eq!(report, rerun);
//! # Ok::<(), mayhem_core::roster::FightError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod ability;
pub mod combat;
pub mod equipment;
pub mod event;
pub mod fight;
pub mod fighter;
pub mod rng;
pub mod roster;
pub mod stats;
pub mod status;

#[cfg(test)]
mod tests;

pub use ability::{Ability, HookContext, Tiered};
pub use event::{Event, FighterSnapshot, FighterUpdate, TickEvents};
pub use fight::{Fight, FightReport};
pub use fighter::{FighterInBattle, MAX_HP};
pub use roster::{EquipmentTemplate, FightError, FighterTemplate, RosterEntry};
pub use stats::{Stat, Stats};
pub use status::StatusEffect;
