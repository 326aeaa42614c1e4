/// Beyond Rare player state: the single aggregate every intent mutates.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::config::{GameConfig, GameVersion};
use super::effects::ActiveEffects;
use super::progression::StageRecord;
use super::shop::{self, ShopItem};
use super::table::{all_rarities, table_for};
use super::tasks::{DailyTasks, Streak};

pub const DEFAULT_COSMETIC: &str = "default";
const MAX_LOG: usize = 50;

/// A line in the in-game event log.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub points: u64,
    /// Clicks this stage (manual and auto).
    pub total_clicks: u64,
    pub stage: u32,
    pub discovered: BTreeSet<String>,
    pub purchase_count: u32,
    pub auto_clicker_count: u32,
    pub owned_backgrounds: BTreeSet<String>,
    pub owned_skins: BTreeSet<String>,
    pub active_background: String,
    pub active_skin: String,
    pub effects: ActiveEffects,
    pub achievements: BTreeSet<String>,
    pub daily: Option<DailyTasks>,
    pub streak: Streak,
    pub stage_history: Vec<StageRecord>,
    /// Permanent shop multiplier raised by each classic upstage.
    pub price_multiplier: f64,
    pub prestige_count: u32,
    /// Shop item kinds bought at least once (classic completion).
    pub purchased_kinds: BTreeSet<String>,
    pub user_id: String,
    pub username: String,
    /// Set once the stage-ready notice has been shown for the current stage.
    pub stage_ready_notified: bool,

    #[serde(skip)]
    pub log: Vec<LogEntry>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            points: 0,
            total_clicks: 0,
            stage: 1,
            discovered: BTreeSet::new(),
            purchase_count: 0,
            auto_clicker_count: 0,
            owned_backgrounds: BTreeSet::new(),
            owned_skins: BTreeSet::new(),
            active_background: DEFAULT_COSMETIC.into(),
            active_skin: DEFAULT_COSMETIC.into(),
            effects: ActiveEffects::default(),
            achievements: BTreeSet::new(),
            daily: None,
            streak: Streak::default(),
            stage_history: Vec::new(),
            price_multiplier: 1.0,
            prestige_count: 0,
            purchased_kinds: BTreeSet::new(),
            user_id: String::new(),
            username: String::new(),
            stage_ready_notified: false,
            log: Vec::new(),
        }
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    pub fn owns_background(&self, id: &str) -> bool {
        id == DEFAULT_COSMETIC || self.owned_backgrounds.contains(id)
    }

    pub fn owns_skin(&self, id: &str) -> bool {
        id == DEFAULT_COSMETIC || self.owned_skins.contains(id)
    }
}

/// Completion percentage shown on the stats tab and sent to the leaderboard.
///
/// Staged: share of the current table discovered. Classic: rarities 50%,
/// permanent backgrounds 25%, seasonal backgrounds 15%, shop item kinds 10%,
/// rounded to two decimals.
pub fn completion_percent(state: &PlayerState, config: &GameConfig) -> f64 {
    match config.version {
        GameVersion::Staged => {
            let table = table_for(config.version, state.stage, &state.discovered);
            if table.is_empty() {
                return 0.0;
            }
            table.discovered_count(&state.discovered) as f64 / table.len() as f64 * 100.0
        }
        GameVersion::Classic => {
            let rarities = all_rarities(config.version);
            let backgrounds = shop::backgrounds(config.version);
            let kinds = ShopItem::consumable_kinds().len();

            let owned_share = |seasonal: bool| {
                let pool: Vec<_> = backgrounds.iter().filter(|b| b.is_seasonal() == seasonal).collect();
                if pool.is_empty() {
                    return 0.0;
                }
                let owned = pool
                    .iter()
                    .filter(|b| state.owned_backgrounds.contains(b.id))
                    .count();
                owned as f64 / pool.len() as f64
            };

            let r = rarities.discovered_count(&state.discovered) as f64 / rarities.len() as f64;
            let permanent = owned_share(false);
            let seasonal = owned_share(true);
            let s = state.purchased_kinds.len().min(kinds) as f64 / kinds as f64;

            let total = r * 50.0 + permanent * 25.0 + seasonal * 15.0 + s * 10.0;
            ((total * 100.0).round() / 100.0).min(100.0)
        }
    }
}

/// Compact display form: `999`, `1.2K`, `3.4M`, `5.6B`.
pub fn format_number(n: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];
    for (scale, suffix) in UNITS {
        if n >= scale {
            return format!("{:.1}{}", n as f64 / scale as f64, suffix);
        }
    }
    n.to_string()
}

/// `"12.34%"`
pub fn format_percent(p: f64) -> String {
    format!("{:.2}%", p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = PlayerState::new();
        assert_eq!(s.stage, 1);
        assert_eq!(s.points, 0);
        assert!((s.price_multiplier - 1.0).abs() < 0.001);
        assert!(s.owns_background("default"));
        assert!(s.owns_skin("default"));
        assert!(!s.owns_skin("ocean"));
    }

    #[test]
    fn log_capped() {
        let mut s = PlayerState::new();
        for i in 0..80 {
            s.add_log(&format!("msg {}", i), false);
        }
        assert_eq!(s.log.len(), 50);
        assert_eq!(s.log[0].text, "msg 30");
    }

    #[test]
    fn format_number_units() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_200), "1.2K");
        assert_eq!(format_number(3_400_000), "3.4M");
        assert_eq!(format_number(5_600_000_000), "5.6B");
    }

    #[test]
    fn staged_completion_counts_current_table() {
        let config = GameConfig::staged();
        let mut s = PlayerState::new();
        assert!((completion_percent(&s, &config) - 0.0).abs() < 0.001);
        for name in ["Average", "Common", "Rare", "Epic", "Mythical"] {
            s.discovered.insert(name.into());
        }
        // Mythical is not in the stage 1 table.
        assert!((completion_percent(&s, &config) - 40.0).abs() < 0.001);
    }

    #[test]
    fn classic_completion_weights() {
        let config = GameConfig::classic();
        let mut s = PlayerState::new();
        for kind in ShopItem::consumable_kinds() {
            s.purchased_kinds.insert(kind.id().to_string());
        }
        assert!((completion_percent(&s, &config) - 10.0).abs() < 0.001);

        for b in shop::backgrounds(GameVersion::Classic).iter().filter(|b| b.is_seasonal()) {
            s.owned_backgrounds.insert(b.id.to_string());
        }
        assert!((completion_percent(&s, &config) - 25.0).abs() < 0.001);

        for d in all_rarities(GameVersion::Classic).entries() {
            s.discovered.insert(d.name.to_string());
        }
        assert!((completion_percent(&s, &config) - 75.0).abs() < 0.001);

        for b in shop::backgrounds(GameVersion::Classic) {
            s.owned_backgrounds.insert(b.id.to_string());
        }
        assert!((completion_percent(&s, &config) - 100.0).abs() < 0.001);
    }

    #[test]
    fn percent_format() {
        assert_eq!(format_percent(12.346), "12.35%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
