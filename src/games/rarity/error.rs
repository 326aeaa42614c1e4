//! Rejection reasons for Beyond Rare intents.
//!
//! None of these are fatal. Purchases and claims that fail leave the state
//! untouched; persistence and network failures only degrade to local play.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("not enough points: need {price}, have {points}")]
    InsufficientPoints { price: u64, points: u64 },

    #[error("auto clicker limit reached ({max})")]
    AutoClickerCap { max: u32 },

    #[error("{item} is still locked")]
    Locked { item: String },

    #[error("{item} is not on sale today")]
    OutOfSeason { item: String },

    #[error("stage {stage} is not complete yet")]
    StageLocked { stage: u32 },

    /// Unknown id, unowned cosmetic, or a reward that was already paid out.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),
}

impl GameError {
    /// Short message for the in-game log.
    pub fn player_message(&self) -> String {
        match self {
            GameError::InsufficientPoints { .. } => "Not enough points!".into(),
            GameError::AutoClickerCap { .. } => "Max auto clickers reached!".into(),
            GameError::Locked { item } => format!("{item} is locked"),
            GameError::OutOfSeason { item } => format!("{item} is out of season"),
            GameError::StageLocked { .. } => "Stage not complete yet".into(),
            GameError::InvalidTarget(_) => String::new(),
            GameError::PersistenceUnavailable(_) => "Playing locally (save failed)".into(),
            GameError::NetworkUnavailable(_) => "Offline".into(),
        }
    }

    /// Whether the player should hear about this rejection at all.
    /// Invalid targets are dropped silently.
    pub fn is_silent(&self) -> bool {
        matches!(self, GameError::InvalidTarget(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_points_mentions_both_amounts() {
        let e = GameError::InsufficientPoints { price: 150, points: 149 };
        let text = e.to_string();
        assert!(text.contains("150"));
        assert!(text.contains("149"));
        assert_eq!(e.player_message(), "Not enough points!");
    }

    #[test]
    fn invalid_target_is_silent() {
        assert!(GameError::InvalidTarget("task".into()).is_silent());
        assert!(!GameError::AutoClickerCap { max: 100 }.is_silent());
    }
}
