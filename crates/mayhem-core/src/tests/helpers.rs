//! Shared fixtures for the cross-module suites.

use crate::equipment::template_for;
use crate::roster::{FighterTemplate, RosterEntry};
use crate::stats::Stats;

/// Installs a test subscriber so `RUST_LOG` works under `cargo test`.
/// Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fighter with no carried equipment.
pub fn bare(name: &str, team: u32) -> RosterEntry {
    RosterEntry::new(FighterTemplate::new(name, Stats::uniform(3)), vec![], team)
}

/// A fighter carrying the named catalog equipment.
pub fn armed(name: &str, team: u32, stats: Stats, gear: &[&str]) -> RosterEntry {
    let equipment = gear
        .iter()
        .map(|id| template_for(id).unwrap_or_else(|| panic!("no template for {id}")))
        .collect();
    RosterEntry::new(FighterTemplate::new(name, stats), equipment, team)
}

/// Two bare fighters on opposing teams.
pub fn duel_roster() -> Vec<RosterEntry> {
    vec![bare("Ada", 0), bare("Grace", 1)]
}

/// Four two-fighter teams with varied loadouts, exercising every ability
/// family (melee, ranged, aoe, passive, utility) and the RNG.
pub fn armed_roster() -> Vec<RosterEntry> {
    vec![
        armed("Brick", 0, Stats::uniform(4), &["battleAxe", "plateArmor"]),
        armed("Patch", 0, Stats::uniform(3), &["medicBag", "shiv"]),
        armed(
            "Sparks",
            1,
            Stats {
                accuracy: 7,
                ..Stats::uniform(3)
            },
            &["laserPistol", "zapHelmet"],
        ),
        armed("Needle", 1, Stats::uniform(4), &["vampireDagger"]),
        armed(
            "Frost",
            2,
            Stats {
                accuracy: 5,
                energy: 6,
                ..Stats::uniform(2)
            },
            &["frostWand", "crossbow"],
        ),
        armed("Wall", 2, Stats::uniform(4), &["thornMail", "wingedBoots"]),
        armed(
            "Boom",
            3,
            Stats {
                energy: 8,
                ..Stats::uniform(3)
            },
            &["shockwaveGauntlet"],
        ),
        armed("Fangs", 3, Stats::uniform(4), &["powerGauntlets", "shiv"]),
    ]
}
