//! Discovery bookkeeping and the stage / upstage reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::{GameConfig, GameVersion, PurchaseCountPolicy};
use super::effects::EffectScheduler;
use super::error::GameError;
use super::state::PlayerState;
use super::table::base_table;

/// Archived summary of a finished stage (staged) or run (classic).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    /// Stage number, or the run number for classic upstages.
    pub stage: u32,
    pub points: u64,
    pub rarities: Vec<String>,
    pub total_clicks: u64,
    pub completed_at: DateTime<Utc>,
}

/// Returns true if `name` was not discovered before.
pub fn record_discovery(state: &mut PlayerState, name: &str) -> bool {
    state.discovered.insert(name.to_string())
}

/// `stage * base * 2^(stage-1)`, saturating.
pub fn stage_points_threshold(stage: u32, base: u64) -> u64 {
    let doubling = 1u64
        .checked_shl(stage.saturating_sub(1))
        .unwrap_or(u64::MAX);
    base.saturating_mul(u64::from(stage)).saturating_mul(doubling)
}

pub fn can_advance_stage(state: &PlayerState, config: &GameConfig) -> bool {
    match config.version {
        GameVersion::Staged => {
            let table = base_table(config.version, state.stage);
            table.all_discovered(&state.discovered)
                || state.points
                    >= stage_points_threshold(state.stage, config.progression.stage_points_base)
        }
        GameVersion::Classic => {
            let table = base_table(config.version, state.stage);
            let through = &config.progression.upstage_through;
            let Some(last) = table.position(through) else {
                return false;
            };
            table.entries()[..=last]
                .iter()
                .all(|d| state.discovered.contains(d.name))
        }
    }
}

/// Archive the current stage and reset for the next one.
///
/// Staged: stage + 1 with points, clickers, discoveries and clicks cleared,
/// every effect cancelled. Classic: discoveries and clicks cleared, shop
/// multiplier raised, prestige count + 1; points and clickers stay.
/// Cosmetics and achievements always survive.
pub fn advance_stage(
    state: &mut PlayerState,
    scheduler: &mut EffectScheduler,
    config: &GameConfig,
    completed_at: DateTime<Utc>,
) -> Result<StageRecord, GameError> {
    if !can_advance_stage(state, config) {
        return Err(GameError::StageLocked { stage: state.stage });
    }

    let record = StageRecord {
        stage: match config.version {
            GameVersion::Staged => state.stage,
            GameVersion::Classic => state.prestige_count + 1,
        },
        points: state.points,
        rarities: state.discovered.iter().cloned().collect(),
        total_clicks: state.total_clicks,
        completed_at,
    };
    state.stage_history.push(record.clone());

    state.discovered.clear();
    state.total_clicks = 0;
    state.stage_ready_notified = false;
    if config.progression.purchase_count_policy == PurchaseCountPolicy::ResetOnAdvance {
        state.purchase_count = 0;
    }

    match config.version {
        GameVersion::Staged => {
            state.stage += 1;
            state.points = 0;
            state.auto_clicker_count = 0;
            scheduler.cancel_all(&mut state.effects);
            info!(stage = state.stage, "stage advanced");
        }
        GameVersion::Classic => {
            state.price_multiplier *= config.economy.upstage_price_growth;
            state.prestige_count += 1;
            info!(
                prestige_count = state.prestige_count,
                price_multiplier = state.price_multiplier,
                "upstaged"
            );
        }
    }
    Ok(record)
}

/// True exactly once per stage: the first time advancing becomes possible.
pub fn take_stage_ready_notice(state: &mut PlayerState, config: &GameConfig) -> bool {
    if state.stage_ready_notified || !can_advance_stage(state, config) {
        return false;
    }
    state.stage_ready_notified = true;
    true
}
