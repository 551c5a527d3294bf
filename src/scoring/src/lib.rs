//! Pure scoring layer: streak multiplier, per-review score, wrong-answer
//! penalty. Stateless given explicit inputs; no persistence.

use config::GameConfig;
use serde::{Deserialize, Serialize};

/// Breakdown of the points earned by a single review.
///
/// Invariant: `total_points == round(base_points * multiplier) + bonus_points`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub base_points: u32,
    pub multiplier: f64,
    pub bonus_points: u64,
    pub total_points: u64,
    pub streak_broken: bool,
}

/// Penalties applied for a wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyResult {
    /// Health to subtract, pre-clamped so health cannot go below zero.
    pub health_reduction: f64,
    /// Currency lost. Zero when the balance is already empty.
    pub currency_lost: u64,
    /// The streak value just before the break.
    pub streak_lost: u32,
}

/// Step-function combo multiplier for a streak value.
///
/// Tier boundaries are inclusive of the higher multiplier: a streak exactly
/// at a boundary earns the upper tier.
pub fn combo_multiplier(streak: u32, config: &GameConfig) -> f64 {
    if streak >= config.combo_tier_max {
        config.multiplier_max
    } else if streak >= config.combo_tier_high {
        config.multiplier_high
    } else if streak >= config.combo_tier_mid {
        config.multiplier_mid
    } else {
        1.0
    }
}

/// Score a single review.
///
/// `streak_before` is the streak before this event; the multiplier reflects
/// the streak after a correct answer extends it. `session_accuracy` is the
/// post-increment session accuracy (the documented assumption for the
/// accuracy-bonus timing).
pub fn calculate_score(
    is_correct: bool,
    streak_before: u32,
    session_accuracy: f64,
    config: &GameConfig,
) -> ScoreResult {
    if !is_correct {
        return ScoreResult {
            base_points: 0,
            multiplier: 1.0,
            bonus_points: 0,
            total_points: 0,
            streak_broken: true,
        };
    }

    let base = config.base_points;
    let multiplier = combo_multiplier(streak_before + 1, config);
    let multiplied = (f64::from(base) * multiplier).round() as u64;

    // The bonus is computed from the already-rounded multiplied points, so
    // the displayed breakdown always sums exactly to the total.
    let bonus_points = if session_accuracy >= config.accuracy_bonus_threshold {
        (multiplied as f64 * (config.accuracy_bonus_multiplier - 1.0)).round() as u64
    } else {
        0
    };

    ScoreResult {
        base_points: base,
        multiplier,
        bonus_points,
        total_points: multiplied + bonus_points,
        streak_broken: false,
    }
}

/// Compute the penalty for a wrong answer.
///
/// `current_health` and the reduction are on the 0.0..=1.0 scale; the
/// reduction is clamped to the remaining health. Currency is lost only
/// while the balance is positive.
pub fn calculate_penalty(
    current_health: f64,
    balance: u64,
    streak_before: u32,
    config: &GameConfig,
) -> PenaltyResult {
    PenaltyResult {
        health_reduction: config.penalty_health_reduction.min(current_health.max(0.0)),
        currency_lost: if balance > 0 {
            config.penalty_currency_loss
        } else {
            0
        },
        streak_lost: streak_before,
    }
}
