//! Achievement catalogs. Every predicate is a pure function of the state.

use tracing::info;

use super::config::{GameConfig, GameVersion};
use super::shop::{self, ShopItem};
use super::state::{completion_percent, PlayerState};

pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    pub check: fn(&PlayerState, &GameConfig) -> bool,
}

const fn ach(
    id: &'static str,
    name: &'static str,
    desc: &'static str,
    check: fn(&PlayerState, &GameConfig) -> bool,
) -> AchievementDef {
    AchievementDef { id, name, desc, check }
}

fn found(s: &PlayerState, name: &str) -> bool {
    s.discovered.contains(name)
}

fn complete(s: &PlayerState, c: &GameConfig, pct: f64) -> bool {
    completion_percent(s, c) >= pct
}

const STAGED: &[AchievementDef] = &[
    ach("first_click", "First Click", "Click for the first time", |s, _| s.total_clicks >= 1),
    ach("clicks_100", "Clicker", "Click 100 times", |s, _| s.total_clicks >= 100),
    ach("clicks_1000", "Click Master", "Click 1,000 times", |s, _| s.total_clicks >= 1000),
    ach("clicks_10000", "Click Legend", "Click 10,000 times", |s, _| s.total_clicks >= 10_000),
    ach("rare_find", "Rare Hunter", "Find a Rare rarity", |s, _| found(s, "Rare")),
    ach("epic_find", "Epic Discovery", "Find an Epic rarity", |s, _| found(s, "Epic")),
    ach("legendary_find", "Legendary", "Find a Legendary rarity", |s, _| found(s, "Legendary")),
    ach("stage_2", "Stage 2", "Reach Stage 2", |s, _| s.stage >= 2),
    ach("stage_5", "Halfway", "Reach Stage 5", |s, _| s.stage >= 5),
    ach("stage_10", "Endgame", "Reach Stage 10", |s, _| s.stage >= 10),
    ach("auto_10", "Automation", "Own 10 auto clickers", |s, _| s.auto_clicker_count >= 10),
    ach("auto_50", "Factory", "Own 50 auto clickers", |s, _| s.auto_clicker_count >= 50),
    ach("auto_100", "Automation Master", "Own 100 auto clickers", |s, _| s.auto_clicker_count >= 100),
    ach("streak_7", "Week Streak", "Get a 7-day streak", |s, _| s.streak.count >= 7),
    ach("streak_30", "Month Streak", "Get a 30-day streak", |s, _| s.streak.count >= 30),
];

const CLASSIC: &[AchievementDef] = &[
    ach("first_rare", "Getting Started", "Unlock your first Rare rarity", |s, _| found(s, "Rare")),
    ach("first_epic", "Epic Discovery", "Unlock your first Epic rarity", |s, _| found(s, "Epic")),
    ach("first_legendary", "Legendary Hunter", "Unlock your first Legendary rarity", |s, _| found(s, "Legendary")),
    ach("first_mythical", "Myth Seeker", "Unlock your first Mythical rarity", |s, _| found(s, "Mythical")),
    ach("first_chroma", "Rainbow Chaser", "Unlock your first Chroma rarity", |s, _| found(s, "Chroma")),
    ach("first_ethereal", "Beyond Reality", "Unlock your first Ethereal rarity", |s, _| found(s, "Ethereal")),
    ach("first_stellar", "Star Gazer", "Unlock your first Stellar rarity", |s, _| found(s, "Stellar")),
    ach("first_unknown", "The Unknown", "Unlock the Unknown rarity", |s, _| found(s, "Unknown")),
    ach("glitched", "System Error", "Unlock the Glitched rarity", |s, _| found(s, "Glitched")),
    ach("complete_10", "Just Beginning", "Reach 10% completion", |s, c| complete(s, c, 10.0)),
    ach("complete_25", "Quarter Way", "Reach 25% completion", |s, c| complete(s, c, 25.0)),
    ach("complete_50", "Halfway There", "Reach 50% completion", |s, c| complete(s, c, 50.0)),
    ach("complete_75", "Almost Done", "Reach 75% completion", |s, c| complete(s, c, 75.0)),
    ach("complete_100", "Completionist", "Reach 100% completion", |s, c| complete(s, c, 100.0)),
    ach("first_purchase", "First Purchase", "Buy your first shop item", |s, _| !s.purchased_kinds.is_empty()),
    ach("all_shop", "Big Spender", "Purchase all shop item types", |s, _| {
        s.purchased_kinds.len() >= ShopItem::consumable_kinds().len()
    }),
    ach("first_bg", "Interior Designer", "Purchase your first background", |s, _| !s.owned_backgrounds.is_empty()),
    ach("all_perm_bg", "Background Master", "Own all permanent backgrounds", |s, c| {
        shop::backgrounds(c.version)
            .iter()
            .filter(|b| !b.is_seasonal())
            .all(|b| s.owned_backgrounds.contains(b.id))
    }),
    ach("clicks_100", "Clicker", "Reach 100 total clicks", |s, _| s.total_clicks >= 100),
    ach("clicks_1000", "Dedicated Clicker", "Reach 1,000 total clicks", |s, _| s.total_clicks >= 1000),
    ach("clicks_10000", "Click Master", "Reach 10,000 total clicks", |s, _| s.total_clicks >= 10_000),
    ach("first_upstage", "New Game+", "Upstage for the first time", |s, _| s.prestige_count >= 1),
];

pub fn catalog(version: GameVersion) -> &'static [AchievementDef] {
    match version {
        GameVersion::Staged => STAGED,
        GameVersion::Classic => CLASSIC,
    }
}

/// Unlock every achievement whose predicate now holds. Returns the newly
/// unlocked ones; already unlocked ids are never reported twice.
pub fn evaluate(state: &mut PlayerState, config: &GameConfig) -> Vec<&'static AchievementDef> {
    let mut unlocked = Vec::new();
    for def in catalog(config.version) {
        if state.achievements.contains(def.id) || !(def.check)(state, config) {
            continue;
        }
        state.achievements.insert(def.id.to_string());
        info!(achievement = def.id, "achievement unlocked");
        unlocked.push(def);
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn catalog_sizes_and_unique_ids() {
        assert_eq!(catalog(GameVersion::Staged).len(), 15);
        assert_eq!(catalog(GameVersion::Classic).len(), 22);
        for v in &[GameVersion::Staged, GameVersion::Classic] {
            let ids: BTreeSet<_> = catalog(*v).iter().map(|a| a.id).collect();
            assert_eq!(ids.len(), catalog(*v).len());
        }
    }

    #[test]
    fn evaluate_is_idempotent() {
        let config = GameConfig::staged();
        let mut s = PlayerState::new();
        assert!(evaluate(&mut s, &config).is_empty());

        s.total_clicks = 1;
        s.discovered.insert("Rare".into());
        let ids: Vec<_> = evaluate(&mut s, &config).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["first_click", "rare_find"]);
        assert!(evaluate(&mut s, &config).is_empty());
    }

    #[test]
    fn unlocked_survive_predicate_turning_false() {
        let config = GameConfig::staged();
        let mut s = PlayerState::new();
        s.auto_clicker_count = 10;
        evaluate(&mut s, &config);
        s.auto_clicker_count = 0;
        evaluate(&mut s, &config);
        assert!(s.achievements.contains("auto_10"));
    }

    #[test]
    fn classic_completion_achievement() {
        let config = GameConfig::classic();
        let mut s = PlayerState::new();
        for kind in ShopItem::consumable_kinds() {
            s.purchased_kinds.insert(kind.id().to_string());
        }
        let ids: Vec<_> = evaluate(&mut s, &config).iter().map(|a| a.id).collect();
        assert!(ids.contains(&"complete_10"));
        assert!(ids.contains(&"first_purchase"));
        assert!(ids.contains(&"all_shop"));
        assert!(!ids.contains(&"complete_25"));

        let seasonal = shop::backgrounds(GameVersion::Classic).iter().filter(|b| b.is_seasonal());
        for b in seasonal {
            s.owned_backgrounds.insert(b.id.to_string());
        }
        let ids: Vec<_> = evaluate(&mut s, &config).iter().map(|a| a.id).collect();
        assert!(ids.contains(&"complete_25"));
        assert!(!ids.contains(&"all_perm_bg"));
        assert!(!ids.contains(&"complete_50"));
    }

    #[test]
    fn streak_achievements() {
        let config = GameConfig::staged();
        let mut s = PlayerState::new();
        s.streak.count = 7;
        evaluate(&mut s, &config);
        assert!(s.achievements.contains("streak_7"));
        assert!(!s.achievements.contains("streak_30"));
    }
}
