//! The unified progression aggregate.

use error::EngineError;
use serde::{Deserialize, Serialize};

/// Running totals across all decks and themes, plus the session-scoped
/// health and accuracy fields.
///
/// The lifetime counters are monotonic non-decreasing; `current_streak`
/// resets to zero on any wrong answer and `best_streak` is the maximum
/// `current_streak` ever observed. Session fields are cleared by a session
/// reset and never touch the lifetime totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub total_points: u64,
    pub total_cards_reviewed: u64,
    pub correct_answers: u64,
    pub current_streak: u32,
    pub best_streak: u32,
    /// Levels unlocked so far; also the monotonic guard for the
    /// 50-correct-answer threshold check.
    pub levels_unlocked: u32,
    pub levels_completed: u32,
    /// Power-ups granted so far; monotonic guard for the 100-correct
    /// threshold check.
    pub powerups_granted: u32,
    pub sessions_played: u32,

    /// Correct answers within the current session.
    pub session_correct: u64,
    /// Reviews within the current session.
    pub session_total: u64,
    /// session_correct / session_total; 0.0 until the first review of a
    /// session.
    pub session_accuracy: f64,
    /// Clamped to 0.0..=1.0; full at session start.
    pub session_health: f64,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            total_points: 0,
            total_cards_reviewed: 0,
            correct_answers: 0,
            current_streak: 0,
            best_streak: 0,
            levels_unlocked: 0,
            levels_completed: 0,
            powerups_granted: 0,
            sessions_played: 0,
            session_correct: 0,
            session_total: 0,
            session_accuracy: 0.0,
            session_health: 1.0,
        }
    }
}

impl ProgressionState {
    /// Structural integrity check, used on load and import.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.correct_answers > self.total_cards_reviewed {
            return Err(EngineError::Validation(
                "correct_answers exceeds total_cards_reviewed".into(),
            ));
        }
        if self.best_streak < self.current_streak {
            return Err(EngineError::Validation(
                "best_streak below current_streak".into(),
            ));
        }
        if self.session_correct > self.session_total {
            return Err(EngineError::Validation(
                "session_correct exceeds session_total".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.session_accuracy) {
            return Err(EngineError::Validation(
                "session_accuracy outside 0.0..=1.0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.session_health) {
            return Err(EngineError::Validation(
                "session_health outside 0.0..=1.0".into(),
            ));
        }
        Ok(())
    }
}
