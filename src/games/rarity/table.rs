//! Static rarity tables for both game versions.
//!
//! The staged game builds its table from tiers: stage `n` owns every tier up
//! to and including `n`. The classic game has a single table. Both append a
//! secret entry once every base entry has been discovered.

use std::collections::BTreeSet;

use super::config::GameVersion;

/// One weighted outcome of a draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RarityDef {
    pub name: &'static str,
    /// Relative probability weight. Need not sum to anything in particular.
    pub weight: f64,
    pub points: u64,
}

const fn r(name: &'static str, weight: f64, points: u64) -> RarityDef {
    RarityDef { name, weight, points }
}

const STAGE_1: &[RarityDef] = &[
    r("Average", 40.0, 0),
    r("Common", 25.0, 0),
    r("Uncommon", 15.0, 1),
    r("Slightly Rare", 10.0, 2),
    r("Rare", 5.0, 5),
    r("Very Rare", 2.5, 10),
    r("Super Rare", 1.5, 25),
    r("Ultra Rare", 0.7, 50),
    r("Epic", 0.2, 100),
    r("Legendary", 0.1, 250),
];

const STAGE_2: &[RarityDef] = &[
    r("Mythical", 0.08, 400),
    r("Super Mythical", 0.06, 600),
    r("Ultra Mythical", 0.04, 900),
];

const STAGE_3: &[RarityDef] = &[
    r("Chroma", 0.05, 1200),
    r("Super Chroma", 0.035, 1600),
    r("Ultra Chroma", 0.025, 2000),
];

const STAGE_4: &[RarityDef] = &[
    r("Ethereal", 0.03, 2500),
    r("Super Ethereal", 0.02, 3200),
    r("Ultra Ethereal", 0.012, 4000),
];

const STAGE_5: &[RarityDef] = &[
    r("Stellar", 0.015, 5000),
    r("Super Stellar", 0.01, 6500),
    r("Ultra Stellar", 0.007, 8000),
];

const STAGE_6: &[RarityDef] = &[
    r("Cosmic", 0.008, 10_000),
    r("Super Cosmic", 0.005, 13_000),
    r("Ultra Cosmic", 0.003, 16_000),
];

const STAGE_7: &[RarityDef] = &[
    r("Divine", 0.004, 20_000),
    r("Super Divine", 0.0025, 27_000),
    r("Ultra Divine", 0.0015, 35_000),
];

const STAGE_8: &[RarityDef] = &[
    r("Transcendent", 0.002, 45_000),
    r("Super Transcendent", 0.0012, 60_000),
    r("Ultra Transcendent", 0.0007, 80_000),
];

const STAGE_9: &[RarityDef] = &[
    r("Infinite", 0.0008, 100_000),
    r("Super Infinite", 0.0005, 140_000),
    r("Ultra Infinite", 0.0003, 200_000),
];

const STAGE_10: &[RarityDef] = &[
    r("Omega", 0.0004, 300_000),
    r("Super Omega", 0.00025, 450_000),
    r("Ultra Omega", 0.00015, 700_000),
    r("BEYOND RARE", 0.0001, 1_000_000),
];

const STAGE_TIERS: &[&[RarityDef]] = &[
    STAGE_1, STAGE_2, STAGE_3, STAGE_4, STAGE_5, STAGE_6, STAGE_7, STAGE_8, STAGE_9, STAGE_10,
];

pub const STAGED_SECRET: RarityDef = r("???GLITCHED???", 0.00005, 5_000_000);

/// Highest stage that still adds a tier. Later stages reuse the full table.
pub const MAX_TIER_STAGE: u32 = STAGE_TIERS.len() as u32;

const CLASSIC: &[RarityDef] = &[
    r("Average", 40.003, 0),
    r("Common", 20.0, 0),
    r("Uncommon", 17.6, 0),
    r("Slightly Rare", 10.0, 1),
    r("Rare", 5.0, 2),
    r("More Rare", 3.0, 2),
    r("Very Rare", 2.0, 3),
    r("Super Rare", 1.0, 5),
    r("Ultra Rare", 0.5, 8),
    r("Epic", 0.4, 10),
    r("More Epic", 0.2, 15),
    r("Very Epic", 0.15, 20),
    r("Super Epic", 0.12, 25),
    r("Ultra Epic", 0.1, 30),
    r("Legendary", 0.08, 40),
    r("Legendary +", 0.07, 50),
    r("Super Legendary", 0.06, 75),
    r("Ultra Legendary", 0.05, 90),
    r("Mythical", 0.045, 100),
    r("Ultra Mythical", 0.04, 150),
    r("Chroma", 0.03, 200),
    r("Super Chroma", 0.025, 250),
    r("Ultra Chroma", 0.022, 350),
    r("Magical", 0.02, 500),
    r("Super Magical", 0.018, 750),
    r("Ultra Magical", 0.016, 900),
    r("Extreme", 0.015, 1000),
    r("Ultra Extreme", 0.012, 1200),
    r("Ethereal", 0.01, 1500),
    r("Ultra Ethereal", 0.008, 1800),
    r("Stellar", 0.006, 2000),
    r("Ultra Stellar", 0.005, 2500),
    r("Extraordinary", 0.003, 3000),
    r("Ultra Extraordinary", 0.002, 4000),
    r("Unknown", 0.001, 5000),
];

pub const CLASSIC_SECRET: RarityDef = r("Glitched", 0.0005, 10_000);

/// An ordered rarity table. Order matters: the draw walks it front to back.
#[derive(Clone, Debug, PartialEq)]
pub struct RarityTable {
    entries: Vec<RarityDef>,
}

impl RarityTable {
    pub fn new(entries: Vec<RarityDef>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RarityDef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&RarityDef> {
        self.entries.iter().find(|d| d.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|d| d.name == name)
    }

    /// Whether every entry's name is in `discovered`.
    pub fn all_discovered(&self, discovered: &BTreeSet<String>) -> bool {
        self.entries.iter().all(|d| discovered.contains(d.name))
    }

    pub fn discovered_count(&self, discovered: &BTreeSet<String>) -> usize {
        self.entries
            .iter()
            .filter(|d| discovered.contains(d.name))
            .count()
    }
}

/// The secret entry for a version.
pub fn secret(version: GameVersion) -> RarityDef {
    match version {
        GameVersion::Staged => STAGED_SECRET,
        GameVersion::Classic => CLASSIC_SECRET,
    }
}

/// Table without the secret entry.
pub fn base_table(version: GameVersion, stage: u32) -> RarityTable {
    match version {
        GameVersion::Staged => {
            let tiers = stage.clamp(1, MAX_TIER_STAGE) as usize;
            let entries = STAGE_TIERS[..tiers]
                .iter()
                .flat_map(|tier| tier.iter().copied())
                .collect();
            RarityTable::new(entries)
        }
        GameVersion::Classic => RarityTable::new(CLASSIC.to_vec()),
    }
}

/// Table the draw runs against: the base table, plus the secret entry once
/// every base entry is in `discovered`.
pub fn table_for(version: GameVersion, stage: u32, discovered: &BTreeSet<String>) -> RarityTable {
    let mut table = base_table(version, stage);
    if table.all_discovered(discovered) {
        table.entries.push(secret(version));
    }
    table
}

/// Every rarity that can appear in any table of this version, secret last.
pub fn all_rarities(version: GameVersion) -> RarityTable {
    let mut table = base_table(version, MAX_TIER_STAGE);
    table.entries.push(secret(version));
    table
}
