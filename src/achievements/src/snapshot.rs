//! Numeric progress snapshot evaluated against the catalog.

use serde::{Deserialize, Serialize};

/// The fields achievements are measured against, copied out of the
/// progression and theme aggregates so this crate stays a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProgressSnapshot {
    pub total_cards_reviewed: u64,
    /// Max of current and best streak at evaluation time.
    pub best_streak: u64,
    /// Session accuracy in whole percent, 0..=100.
    pub session_accuracy_percent: u64,
    /// Accuracy milestones only count once a session has reviews.
    pub session_has_reviews: bool,
    pub levels_completed: u64,
    pub mario_coins: u64,
    pub zelda_hearts: u64,
    pub dkc_bananas: u64,
}

impl ProgressSnapshot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_defaults_to_zero() {
        let snap = ProgressSnapshot::new();
        assert_eq!(snap.total_cards_reviewed, 0);
        assert_eq!(snap.best_streak, 0);
        assert!(!snap.session_has_reviews);
    }
}
