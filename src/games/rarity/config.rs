//! Typed balance and policy configuration.
//!
//! Every field has a default matching the staged game, so a partial JSON
//! document only needs to name what it overrides. The two shipped game
//! versions are available as [`GameConfig::staged`] and [`GameConfig::classic`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

/// Which rule set the engine plays by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVersion {
    /// Ten stages of additive rarity tiers, stage resets.
    #[default]
    Staged,
    /// One big table, upstage raises shop prices instead of adding tiers.
    Classic,
}

impl GameVersion {
    pub fn name(&self) -> &'static str {
        match self {
            GameVersion::Staged => "Beyond Rare",
            GameVersion::Classic => "Beyond Rare Classic",
        }
    }
}

/// What happens to the shared purchase counter when the player resets a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseCountPolicy {
    ResetOnAdvance,
    Monotonic,
}

/// How cosmetics unlock for purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockPolicy {
    /// `stage >= required_stage`
    StageGated,
    /// The required rarity has been discovered in the current run.
    RarityGated,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopPrices {
    pub auto_clicker: u64,
    pub double_points: u64,
    pub golden_click: u64,
    pub luck_boost: u64,
    pub time_freeze: u64,
    pub golden_mode: u64,
}

impl Default for ShopPrices {
    fn default() -> Self {
        Self {
            auto_clicker: 100,
            double_points: 200,
            golden_click: 400,
            luck_boost: 500,
            time_freeze: 250,
            golden_mode: 2000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub prices: ShopPrices,
    /// Per-purchase price growth (both curves).
    pub price_growth: f64,
    pub max_auto_clickers: u32,
    /// Factor applied to the permanent shop multiplier on a classic upstage.
    pub upstage_price_growth: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            prices: ShopPrices::default(),
            price_growth: 1.5,
            max_auto_clickers: 100,
            upstage_price_growth: 1.5,
        }
    }
}

/// Buff durations in milliseconds. Golden Click has none: it waits for a click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectDurations {
    pub double_points_ms: u64,
    pub luck_boost_ms: u64,
    pub time_freeze_ms: u64,
    pub golden_mode_ms: u64,
}

impl Default for EffectDurations {
    fn default() -> Self {
        Self {
            double_points_ms: 30_000,
            luck_boost_ms: 60_000,
            time_freeze_ms: 30_000,
            golden_mode_ms: 30_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoClickConfig {
    pub base_period_ms: u64,
    pub min_period_ms: u64,
    /// Ticks replayed at most per frame after a stall; older ones are dropped.
    pub max_catch_up_ticks: u32,
}

impl Default for AutoClickConfig {
    fn default() -> Self {
        Self {
            base_period_ms: 2000,
            min_period_ms: 200,
            max_catch_up_ticks: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub purchase_count_policy: PurchaseCountPolicy,
    pub unlock_policy: UnlockPolicy,
    /// Lowest rarity a Golden Click / Golden Mode draw may land on.
    pub golden_floor: String,
    /// `stage * stage_points_base * 2^(stage-1)` unlocks the next stage.
    pub stage_points_base: u64,
    /// Classic upstage needs every rarity up to and including this one.
    pub upstage_through: String,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            purchase_count_policy: PurchaseCountPolicy::ResetOnAdvance,
            unlock_policy: UnlockPolicy::StageGated,
            golden_floor: "Very Rare".into(),
            stage_points_base: 10_000,
            upstage_through: "Ultra Legendary".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub every_clicks: u64,
    pub interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            every_clicks: 50,
            interval_ms: 30_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyConfig {
    pub tasks_per_day: usize,
    pub streak_reward_base: u64,
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            tasks_per_day: 3,
            streak_reward_base: 50,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub version: GameVersion,
    pub economy: EconomyConfig,
    pub effects: EffectDurations,
    pub auto_click: AutoClickConfig,
    pub progression: ProgressionConfig,
    pub sync: SyncConfig,
    pub daily: DailyConfig,
}

impl GameConfig {
    pub fn staged() -> Self {
        Self::default()
    }

    pub fn classic() -> Self {
        Self {
            version: GameVersion::Classic,
            progression: ProgressionConfig {
                purchase_count_policy: PurchaseCountPolicy::Monotonic,
                unlock_policy: UnlockPolicy::RarityGated,
                golden_floor: "Epic".into(),
                ..ProgressionConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn for_version(version: GameVersion) -> Self {
        match version {
            GameVersion::Staged => Self::staged(),
            GameVersion::Classic => Self::classic(),
        }
    }

    /// Parse a JSON override document and validate it.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.economy.price_growth < 1.0 {
            return Err(ConfigError::Invalid {
                reason: format!("price_growth must be >= 1.0, got {}", self.economy.price_growth),
            });
        }
        if self.auto_click.min_period_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "auto_click.min_period_ms must be positive".into(),
            });
        }
        if self.daily.tasks_per_day == 0 {
            return Err(ConfigError::Invalid {
                reason: "daily.tasks_per_day must be positive".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_defaults_balance() {
        let c = GameConfig::staged();
        assert_eq!(c.economy.prices.auto_clicker, 100);
        assert_eq!(c.economy.prices.golden_mode, 2000);
        assert_eq!(c.economy.max_auto_clickers, 100);
        assert_eq!(c.effects.luck_boost_ms, 60_000);
        assert_eq!(c.progression.purchase_count_policy, PurchaseCountPolicy::ResetOnAdvance);
        assert_eq!(c.progression.unlock_policy, UnlockPolicy::StageGated);
        assert_eq!(c.progression.golden_floor, "Very Rare");
    }

    #[test]
    fn classic_swaps_policies() {
        let c = GameConfig::classic();
        assert_eq!(c.version, GameVersion::Classic);
        assert_eq!(c.progression.purchase_count_policy, PurchaseCountPolicy::Monotonic);
        assert_eq!(c.progression.unlock_policy, UnlockPolicy::RarityGated);
        assert_eq!(c.progression.golden_floor, "Epic");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = GameConfig::parse(r#"{ "economy": { "max_auto_clickers": 10 } }"#).unwrap();
        assert_eq!(c.economy.max_auto_clickers, 10);
        assert!((c.economy.price_growth - 1.5).abs() < 1e-12);
        assert_eq!(c.sync.every_clicks, 50);
    }

    #[test]
    fn policies_parse_from_snake_case() {
        let c = GameConfig::parse(
            r#"{ "progression": { "purchase_count_policy": "monotonic", "unlock_policy": "rarity_gated" } }"#,
        )
        .unwrap();
        assert_eq!(c.progression.purchase_count_policy, PurchaseCountPolicy::Monotonic);
        assert_eq!(c.progression.unlock_policy, UnlockPolicy::RarityGated);
    }

    #[test]
    fn invalid_growth_rejected() {
        let err = GameConfig::parse(r#"{ "economy": { "price_growth": 0.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(GameConfig::parse("{"), Err(ConfigError::Json { .. })));
    }
}
