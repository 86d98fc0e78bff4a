//! Roster input types supplied by the meta-game layer.
//!
//! The meta-game (drafts, training, team management) lives outside this
//! crate. Its only interface with the engine is the roster it hands to
//! [`Fight::new`](crate::fight::Fight::new): a list of fighter templates,
//! their chosen equipment templates, and a team id per entry. Cosmetic fields
//! are carried through to the event log untouched; the engine never reads
//! them.
//!
//! Roster problems are the only fallible path in the engine. They surface as
//! [`FightError`] at construction time — once a `Fight` exists, simulation
//! cannot fail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::stats::Stats;

/// Body slot an equipment template occupies. Meta-game data: the engine
/// carries it but never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentSlot {
    /// Helmets, hats.
    Head,
    /// Armor, mail, capes.
    Torso,
    /// Greaves.
    Legs,
    /// Boots.
    Feet,
    /// One hand; two-handed weapons occupy two.
    Hand,
}

/// Permanent fighter data owned by the meta-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FighterTemplate {
    /// Display name.
    pub name: String,
    /// Stat block at fight start.
    pub stats: Stats,
    /// Ability names this fighter is attuned to (higher-tier magnitudes).
    pub attunements: Vec<String>,
    /// Catalog id of the innate ability, always equipment slot 0 in battle.
    pub innate_ability: String,
    /// Opaque cosmetic fields, echoed into the spawn snapshot.
    pub appearance: BTreeMap<String, String>,
}

impl FighterTemplate {
    /// Creates a template with the default innate ability (fists) and no
    /// attunements or cosmetics.
    #[must_use]
    pub fn new(name: &str, stats: Stats) -> Self {
        Self {
            name: name.to_string(),
            stats,
            attunements: Vec::new(),
            innate_ability: "fists".to_string(),
            appearance: BTreeMap::new(),
        }
    }

    /// Adds an attunement and returns the template (builder style).
    #[must_use]
    pub fn attuned_to(mut self, ability: &str) -> Self {
        self.attunements.push(ability.to_string());
        self
    }
}

/// One piece of equipment chosen for a fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentTemplate {
    /// Catalog id of the ability this equipment grants.
    pub ability: String,
    /// Display name.
    pub name: String,
    /// Body slots occupied. Meta-game data, unread by the engine.
    pub slots: Vec<EquipmentSlot>,
    /// Client-side image reference.
    pub image: String,
}

/// One roster line: a fighter, their equipment, and their team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    /// The fighter template.
    pub fighter: FighterTemplate,
    /// Chosen equipment, in display order.
    pub equipment: Vec<EquipmentTemplate>,
    /// Team identifier; placement is reported per team.
    pub team: u32,
}

impl RosterEntry {
    /// Creates a roster entry.
    #[must_use]
    pub fn new(fighter: FighterTemplate, equipment: Vec<EquipmentTemplate>, team: u32) -> Self {
        Self {
            fighter,
            equipment,
            team,
        }
    }
}

/// Errors raised while constructing a fight from a roster.
///
/// These are the caller's bugs surfaced early: a well-formed roster can never
/// produce them, and a constructed fight never fails afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FightError {
    /// The roster contained no fighters at all.
    #[error("roster contains no fighters")]
    EmptyRoster,
    /// An equipment or innate ability id did not resolve in the catalog.
    #[error("unknown ability id `{id}`")]
    UnknownAbility {
        /// The unresolved catalog id.
        id: String,
    },
}

// =============================================================================
// Tests
// =============================================================================
