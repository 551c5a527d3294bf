//! Resolved engine configuration.
//!
//! The engine performs no configuration I/O of its own; a host supplies a
//! fully resolved [`GameConfig`] at startup and the engine treats it as a
//! read-only snapshot. Out-of-range values are rejected whole by
//! [`GameConfig::validate`] and the caller keeps its previous config.

use error::EngineError;
use serde::{Deserialize, Serialize};

/// Tunable scoring and unlock constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Base points awarded per correct answer.
    pub base_points: u32,
    /// Session health lost per wrong answer, in 0.0..=1.0.
    pub penalty_health_reduction: f64,
    /// Currency lost per wrong answer (only while the balance is positive).
    pub penalty_currency_loss: u64,

    /// Streak length at which the mid multiplier tier begins.
    pub combo_tier_mid: u32,
    /// Streak length at which the high multiplier tier begins.
    pub combo_tier_high: u32,
    /// Streak length at which the top multiplier tier begins.
    pub combo_tier_max: u32,
    /// Multiplier for the mid tier.
    pub multiplier_mid: f64,
    /// Multiplier for the high tier.
    pub multiplier_high: f64,
    /// Multiplier for the top tier.
    pub multiplier_max: f64,

    /// Session accuracy at or above which the bonus applies, in 0.0..=1.0.
    pub accuracy_bonus_threshold: f64,
    /// Bonus factor; 1.25 means 25% extra on top of multiplied points.
    pub accuracy_bonus_multiplier: f64,

    /// Correct answers per level unlock.
    pub cards_per_level: u32,
    /// Correct answers per power-up grant.
    pub cards_per_powerup: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_points: 10,
            penalty_health_reduction: 0.1,
            penalty_currency_loss: 1,
            combo_tier_mid: 5,
            combo_tier_high: 10,
            combo_tier_max: 20,
            multiplier_mid: 1.5,
            multiplier_high: 2.0,
            multiplier_max: 3.0,
            accuracy_bonus_threshold: 0.9,
            accuracy_bonus_multiplier: 1.25,
            cards_per_level: 50,
            cards_per_powerup: 100,
        }
    }
}

impl GameConfig {
    /// Reject out-of-range values. Called before a config is accepted; a
    /// failed validation leaves the previously active config in place.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.base_points == 0 {
            return Err(EngineError::Validation("base_points must be >= 1".into()));
        }
        if !(0.0..=1.0).contains(&self.penalty_health_reduction) {
            return Err(EngineError::Validation(
                "penalty_health_reduction must be within 0.0..=1.0".into(),
            ));
        }
        if !(self.combo_tier_mid < self.combo_tier_high && self.combo_tier_high < self.combo_tier_max)
        {
            return Err(EngineError::Validation(
                "combo tiers must be strictly increasing".into(),
            ));
        }
        if self.combo_tier_mid == 0 {
            return Err(EngineError::Validation("combo_tier_mid must be >= 1".into()));
        }
        if !(self.multiplier_mid >= 1.0
            && self.multiplier_high >= self.multiplier_mid
            && self.multiplier_max >= self.multiplier_high)
        {
            return Err(EngineError::Validation(
                "multipliers must be >= 1.0 and non-decreasing across tiers".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.accuracy_bonus_threshold) {
            return Err(EngineError::Validation(
                "accuracy_bonus_threshold must be within 0.0..=1.0".into(),
            ));
        }
        if self.accuracy_bonus_multiplier < 1.0 {
            return Err(EngineError::Validation(
                "accuracy_bonus_multiplier must be >= 1.0".into(),
            ));
        }
        if self.cards_per_level == 0 || self.cards_per_powerup == 0 {
            return Err(EngineError::Validation(
                "unlock intervals must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        GameConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn rejects_zero_base_points() {
        let cfg = GameConfig {
            base_points: 0,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_health_penalty() {
        let cfg = GameConfig {
            penalty_health_reduction: 1.5,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unordered_combo_tiers() {
        let cfg = GameConfig {
            combo_tier_mid: 10,
            combo_tier_high: 10,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_decreasing_multipliers() {
        let cfg = GameConfig {
            multiplier_high: 1.2,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
