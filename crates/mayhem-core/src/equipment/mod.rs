//! The equipment catalog: every concrete ability the engine ships.
//!
//! Abilities are grouped by behavioral family, not by body slot:
//!
//! - [`melee`] — close-range strikes with pursuit/retreat movement.
//! - [`ranged`] — projectile attacks with accuracy rolls and kiting.
//! - [`aoe`] — charge-gated area bursts.
//! - [`passive`] — permanent stat boosts applied at fight start.
//! - [`utility`] — periodic zaps, damage reflection, and healing.
//!
//! The catalog is closed: rosters reference abilities by string id and
//! [`ability_for`] resolves them. Ability values (damage, cooldowns,
//! durations) are data on the concrete structs, each a base/attuned
//! [`Tiered`](crate::ability::Tiered) pair.

pub mod aoe;
pub mod melee;
pub mod passive;
pub mod ranged;
pub mod utility;

use std::sync::Arc;

use crate::ability::Ability;
use crate::roster::{EquipmentSlot, EquipmentTemplate};

/// Every ability id the catalog resolves, in display order.
pub const CATALOG_IDS: &[&str] = &[
    "fists",
    "shiv",
    "battleAxe",
    "vampireDagger",
    "laserPistol",
    "crossbow",
    "frostWand",
    "shockwaveGauntlet",
    "plateArmor",
    "wingedBoots",
    "powerGauntlets",
    "zapHelmet",
    "thornMail",
    "medicBag",
];

/// Resolves an ability id to its shared behavior bundle.
///
/// Returns `None` for ids outside the catalog; fight construction turns that
/// into [`FightError::UnknownAbility`](crate::roster::FightError).
#[must_use]
pub fn ability_for(id: &str) -> Option<Arc<dyn Ability>> {
    match id {
        "fists" => Some(melee::MeleeAttack::fists()),
        "shiv" => Some(melee::MeleeAttack::shiv()),
        "battleAxe" => Some(melee::MeleeAttack::battle_axe()),
        "vampireDagger" => Some(melee::MeleeAttack::vampire_dagger()),
        "laserPistol" => Some(ranged::RangedAttack::laser_pistol()),
        "crossbow" => Some(ranged::RangedAttack::crossbow()),
        "frostWand" => Some(ranged::RangedAttack::frost_wand()),
        "shockwaveGauntlet" => Some(aoe::AoeAttack::shockwave_gauntlet()),
        "plateArmor" => Some(passive::StatBoost::plate_armor()),
        "wingedBoots" => Some(passive::StatBoost::winged_boots()),
        "powerGauntlets" => Some(passive::StatBoost::power_gauntlets()),
        "zapHelmet" => Some(utility::ZapHelmet::stock()),
        "thornMail" => Some(utility::ThornMail::stock()),
        "medicBag" => Some(utility::MedicBag::stock()),
        _ => None,
    }
}

/// Builds the stock equipment template for a catalog id, for meta-game
/// layers that do not maintain their own item tables.
#[must_use]
pub fn template_for(id: &str) -> Option<EquipmentTemplate> {
    use EquipmentSlot::{Feet, Hand, Head, Torso};

    let (name, slots) = match id {
        "shiv" => ("Shiv", vec![Hand]),
        "battleAxe" => ("Battle Axe", vec![Hand, Hand]),
        "vampireDagger" => ("Vampire Dagger", vec![Hand]),
        "laserPistol" => ("Laser Pistol", vec![Hand]),
        "crossbow" => ("Crossbow", vec![Hand, Hand]),
        "frostWand" => ("Frost Wand", vec![Hand]),
        "shockwaveGauntlet" => ("Shockwave Gauntlet", vec![Hand]),
        "plateArmor" => ("Plate Armor", vec![Torso]),
        "wingedBoots" => ("Winged Boots", vec![Feet]),
        "powerGauntlets" => ("Power Gauntlets", vec![Hand]),
        "zapHelmet" => ("Zap Helmet", vec![Head]),
        "thornMail" => ("Thorn Mail", vec![Torso]),
        "medicBag" => ("Medic Bag", vec![Hand]),
        _ => return None,
    };

    Some(EquipmentTemplate {
        ability: id.to_string(),
        name: name.to_string(),
        slots,
        image: id.to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_id_resolves() {
        for id in CATALOG_IDS {
            let ability = ability_for(id)
                .unwrap_or_else(|| panic!("catalog id {id} does not resolve"));
            assert_eq!(ability.name(), *id);
        }
    }

    #[test]
    fn unknown_id_does_not_resolve() {
        assert!(ability_for("voidBlade").is_none());
        assert!(template_for("voidBlade").is_none());
    }

    #[test]
    fn templates_exist_for_all_carried_equipment() {
        // Everything except the innate fists has a stock template.
        for id in CATALOG_IDS.iter().filter(|id| **id != "fists") {
            let template = template_for(id).unwrap();
            assert_eq!(template.ability, *id);
            assert!(!template.slots.is_empty());
        }
    }
}
