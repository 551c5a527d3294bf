//! Progression tracking: the running totals, streak bookkeeping and the
//! monotonic threshold checks for level and power-up grants.

pub mod review;
pub mod state;

pub use review::{Ease, ReviewResult};
pub use state::ProgressionState;

use config::GameConfig;
use scoring::{PenaltyResult, ScoreResult, calculate_penalty, calculate_score};
use serde::{Deserialize, Serialize};

/// Everything a single processed review changed, for callers that need to
/// hand out rewards or drive presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub score: ScoreResult,
    /// Present only for wrong answers.
    pub penalty: Option<PenaltyResult>,
    /// Ordinal of the level whose unlock threshold this event crossed.
    pub level_unlocked: Option<u32>,
    /// True when this event crossed a power-up grant threshold.
    pub powerup_granted: bool,
}

/// Owns the [`ProgressionState`] aggregate. The sole mutator of the running
/// totals; persistence is pushed by the surrounding engine context.
#[derive(Debug, Clone, Default)]
pub struct ProgressionTracker {
    state: ProgressionState,
}

impl ProgressionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a persisted aggregate.
    pub fn from_state(state: ProgressionState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// Consume the tracker, yielding the aggregate for persistence.
    pub fn into_state(self) -> ProgressionState {
        self.state
    }

    /// Fold one review event into the aggregate.
    ///
    /// `balance` is the current currency balance, consulted only to decide
    /// whether a wrong answer costs currency. The returned outcome carries
    /// the score breakdown, the penalty (if any) and which unlock
    /// thresholds this event crossed.
    pub fn process_review(
        &mut self,
        result: &ReviewResult,
        config: &GameConfig,
        balance: u64,
    ) -> ReviewOutcome {
        let streak_before = self.state.current_streak;

        self.state.total_cards_reviewed = self.state.total_cards_reviewed.saturating_add(1);
        self.state.session_total = self.state.session_total.saturating_add(1);
        if result.is_correct {
            self.state.correct_answers = self.state.correct_answers.saturating_add(1);
            self.state.session_correct = self.state.session_correct.saturating_add(1);
        }
        self.state.session_accuracy =
            self.state.session_correct as f64 / self.state.session_total as f64;

        let score = calculate_score(
            result.is_correct,
            streak_before,
            self.state.session_accuracy,
            config,
        );

        let penalty = if result.is_correct {
            self.state.total_points = self.state.total_points.saturating_add(score.total_points);
            self.state.current_streak = streak_before.saturating_add(1);
            self.state.best_streak = self.state.best_streak.max(self.state.current_streak);
            None
        } else {
            let penalty =
                calculate_penalty(self.state.session_health, balance, streak_before, config);
            self.state.current_streak = 0;
            self.state.session_health =
                (self.state.session_health - penalty.health_reduction).clamp(0.0, 1.0);
            Some(penalty)
        };

        ReviewOutcome {
            score,
            penalty,
            level_unlocked: self.check_level_unlock(config),
            powerup_granted: self.check_powerup_grant(config),
        }
    }

    /// Unlock one level when `floor(correct / cards_per_level)` has moved
    /// past the count already unlocked. Guarded by the monotonic counter,
    /// so replaying the check against unchanged state grants nothing.
    pub fn check_level_unlock(&mut self, config: &GameConfig) -> Option<u32> {
        let earned = (self.state.correct_answers / u64::from(config.cards_per_level)) as u32;
        if earned > self.state.levels_unlocked {
            self.state.levels_unlocked += 1;
            Some(self.state.levels_unlocked)
        } else {
            None
        }
    }

    /// Same pattern as [`Self::check_level_unlock`] at the power-up
    /// boundary.
    pub fn check_powerup_grant(&mut self, config: &GameConfig) -> bool {
        let earned = (self.state.correct_answers / u64::from(config.cards_per_powerup)) as u32;
        if earned > self.state.powerups_granted {
            self.state.powerups_granted += 1;
            true
        } else {
            false
        }
    }

    /// Clear session-scoped fields only. Lifetime totals and the streak
    /// survive a session boundary.
    pub fn reset_session(&mut self) {
        self.state.session_health = 1.0;
        self.state.session_accuracy = 0.0;
        self.state.session_correct = 0;
        self.state.session_total = 0;
        self.state.sessions_played = self.state.sessions_played.saturating_add(1);
    }

    /// Record a first-time level completion.
    pub fn record_level_completed(&mut self) {
        self.state.levels_completed = self.state.levels_completed.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn correct() -> ReviewResult {
        ReviewResult::new("card", "deck", Ease::Good, SystemTime::now())
    }

    fn wrong() -> ReviewResult {
        ReviewResult::new("card", "deck", Ease::Again, SystemTime::now())
    }

    #[test]
    fn four_correct_then_one_wrong_matches_expected_sequence() {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();

        let mut streaks = Vec::new();
        let mut multipliers = Vec::new();
        for _ in 0..4 {
            let outcome = tracker.process_review(&correct(), &config, 0);
            streaks.push(tracker.state().current_streak);
            multipliers.push(outcome.score.multiplier);
        }
        let outcome = tracker.process_review(&wrong(), &config, 0);
        streaks.push(tracker.state().current_streak);

        assert_eq!(streaks, vec![1, 2, 3, 4, 0]);
        assert_eq!(multipliers, vec![1.0, 1.0, 1.0, 1.0]);
        let penalty = outcome.penalty.expect("wrong answer penalizes");
        assert_eq!(penalty.streak_lost, 4);
        assert!((tracker.state().session_health - 0.9).abs() < 1e-9);
    }

    #[test]
    fn points_accumulate_as_sum_of_event_totals() {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();

        let mut expected = 0u64;
        for i in 0..30 {
            let event = if i % 7 == 3 { wrong() } else { correct() };
            let outcome = tracker.process_review(&event, &config, 5);
            expected += outcome.score.total_points;
        }

        assert_eq!(tracker.state().total_points, expected);
        assert_eq!(tracker.state().total_cards_reviewed, 30);
    }

    #[test]
    fn level_unlocks_exactly_at_fifty_correct() {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();

        for i in 1..=49 {
            let outcome = tracker.process_review(&correct(), &config, 0);
            assert_eq!(outcome.level_unlocked, None, "no unlock at {i}");
        }
        let outcome = tracker.process_review(&correct(), &config, 0);
        assert_eq!(outcome.level_unlocked, Some(1));
        assert_eq!(tracker.state().levels_unlocked, 1);
    }

    #[test]
    fn powerup_granted_at_one_hundred_correct() {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();

        let mut grants = 0;
        for _ in 0..250 {
            let outcome = tracker.process_review(&correct(), &config, 0);
            if outcome.powerup_granted {
                grants += 1;
            }
        }
        assert_eq!(grants, 2);
        assert_eq!(tracker.state().powerups_granted, 2);
    }

    #[test]
    fn threshold_checks_are_idempotent_against_unchanged_state() {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();
        for _ in 0..50 {
            tracker.process_review(&correct(), &config, 0);
        }
        assert_eq!(tracker.state().levels_unlocked, 1);

        // Replaying the checks with no new correct answers grants nothing.
        assert_eq!(tracker.check_level_unlock(&config), None);
        assert!(!tracker.check_powerup_grant(&config));
        assert_eq!(tracker.state().levels_unlocked, 1);
    }

    #[test]
    fn wrong_answers_do_not_advance_thresholds() {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();
        for _ in 0..60 {
            let outcome = tracker.process_review(&wrong(), &config, 0);
            assert_eq!(outcome.level_unlocked, None);
        }
        assert_eq!(tracker.state().levels_unlocked, 0);
        assert_eq!(tracker.state().correct_answers, 0);
    }

    #[test]
    fn session_reset_clears_session_fields_only() {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();
        for _ in 0..10 {
            tracker.process_review(&correct(), &config, 0);
        }
        tracker.process_review(&wrong(), &config, 0);

        let lifetime_points = tracker.state().total_points;
        let best = tracker.state().best_streak;
        tracker.reset_session();

        let state = tracker.state();
        assert_eq!(state.session_health, 1.0);
        assert_eq!(state.session_accuracy, 0.0);
        assert_eq!(state.session_total, 0);
        assert_eq!(state.total_points, lifetime_points);
        assert_eq!(state.best_streak, best);
        assert_eq!(state.sessions_played, 1);
    }

    #[test]
    fn health_floors_at_zero() {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();
        for _ in 0..15 {
            tracker.process_review(&wrong(), &config, 0);
        }
        assert_eq!(tracker.state().session_health, 0.0);
        tracker.state().validate().expect("still structurally valid");
    }
}
