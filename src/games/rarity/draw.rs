//! Weighted random draw.

use rand::Rng;

use super::config::GameVersion;
use super::effects::{ActiveEffects, EffectKind};
use super::table::{all_rarities, RarityDef, RarityTable};

/// Effect flags that change a draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub double_points: bool,
    pub golden_click: bool,
    pub luck_boost: bool,
    pub golden_mode: bool,
}

impl Modifiers {
    pub fn from_effects(effects: &ActiveEffects) -> Self {
        Self {
            double_points: effects.is_active(EffectKind::DoublePoints),
            golden_click: effects.is_active(EffectKind::GoldenClick),
            luck_boost: effects.is_active(EffectKind::LuckBoost),
            golden_mode: effects.is_active(EffectKind::GoldenMode),
        }
    }
}

/// The subset of a table a draw may land on, with adjusted weights.
#[derive(Clone, Debug)]
pub struct Eligible {
    pub entries: Vec<RarityDef>,
    pub total: f64,
}

impl Eligible {
    /// First entry whose cumulative weight reaches `roll`.
    pub fn pick(&self, roll: f64) -> Option<RarityDef> {
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.weight;
            if roll <= cumulative {
                return Some(*entry);
            }
        }
        self.entries.first().copied()
    }
}

/// Point value of the named floor rarity. Unknown names impose no floor.
pub fn floor_points(version: GameVersion, floor: &str) -> u64 {
    all_rarities(version).find(floor).map(|d| d.points).unwrap_or(0)
}

/// Build the eligible subset.
///
/// Golden Click (manual draws only) takes precedence over Golden Mode; both
/// restrict to entries worth at least `floor`. Luck Boost then doubles the
/// weight of every scoring entry. A restriction that would leave nothing falls
/// back to the whole table.
pub fn eligible(table: &RarityTable, mods: Modifiers, is_manual: bool, floor: u64) -> Eligible {
    let restrict = (mods.golden_click && is_manual) || mods.golden_mode;

    let mut entries: Vec<RarityDef> = if restrict {
        table
            .entries()
            .iter()
            .filter(|d| d.points >= floor)
            .copied()
            .collect()
    } else {
        Vec::new()
    };
    if entries.is_empty() {
        entries = table.entries().to_vec();
    }

    if mods.luck_boost {
        for entry in entries.iter_mut().filter(|d| d.points > 0) {
            entry.weight *= 2.0;
        }
    }

    let total = entries.iter().map(|d| d.weight).sum();
    Eligible { entries, total }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOutcome {
    pub rarity: RarityDef,
    pub points_awarded: u64,
    /// The draw spent an active Golden Click; the caller must clear it.
    pub consumed_golden_click: bool,
}

/// Perform one draw. Returns `None` only for an empty table.
pub fn draw<R: Rng + ?Sized>(
    table: &RarityTable,
    mods: Modifiers,
    is_manual: bool,
    floor: u64,
    rng: &mut R,
) -> Option<DrawOutcome> {
    let pool = eligible(table, mods, is_manual, floor);
    let roll = rng.random::<f64>() * pool.total;
    let rarity = pool.pick(roll)?;

    let points_awarded = if mods.double_points {
        rarity.points.saturating_mul(2)
    } else {
        rarity.points
    };

    Some(DrawOutcome {
        rarity,
        points_awarded,
        consumed_golden_click: mods.golden_click && is_manual,
    })
}
