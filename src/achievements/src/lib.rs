//! Achievement tracking
//!
//! A fixed catalog of milestone definitions evaluated against numeric
//! snapshots of the progression state. Unlocks are monotonic and permanent:
//! once true they are never re-evaluated, and the unlock date is stamped
//! exactly once.

pub mod achievement;
pub mod snapshot;

pub use achievement::{Achievement, AchievementId, all_achievements};
pub use snapshot::ProgressSnapshot;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Tracks unlock state for the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementBook {
    achievements: BTreeMap<AchievementId, Achievement>,
    /// Unlocks since the last drain, for notification layers. Transient,
    /// never persisted.
    #[serde(skip)]
    newly_unlocked: Vec<AchievementId>,
}

impl AchievementBook {
    /// A fresh book with the full default catalog, all locked.
    pub fn new() -> Self {
        let achievements = all_achievements()
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        Self {
            achievements,
            newly_unlocked: Vec::new(),
        }
    }

    pub fn get(&self, id: AchievementId) -> Option<&Achievement> {
        self.achievements.get(&id)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.achievements.get(&id).is_some_and(|a| a.unlocked)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.values()
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.values().filter(|a| a.unlocked)
    }

    /// Unlocks since the last call, clearing the list.
    pub fn drain_newly_unlocked(&mut self) -> Vec<AchievementId> {
        std::mem::take(&mut self.newly_unlocked)
    }

    /// Fraction of the catalog unlocked, 0.0..=1.0.
    pub fn completion(&self) -> f64 {
        let total = self.achievements.len();
        if total == 0 {
            return 0.0;
        }
        self.unlocked().count() as f64 / total as f64
    }

    /// Update progress from a snapshot and unlock every not-yet-unlocked
    /// achievement whose target was crossed. Returns the newly unlocked
    /// ids; the caller credits their currency rewards.
    pub fn check(&mut self, snap: &ProgressSnapshot, now: SystemTime) -> Vec<AchievementId> {
        let mut unlocked = Vec::new();

        for (id, achievement) in self.achievements.iter_mut() {
            if achievement.unlocked {
                continue;
            }
            let value = match measure(*id, snap) {
                Some(value) => value,
                None => continue,
            };
            achievement.progress = value.min(achievement.target);
            if value >= achievement.target {
                achievement.unlocked = true;
                achievement.unlock_date = Some(now);
                unlocked.push(*id);
                self.newly_unlocked.push(*id);
            }
        }

        unlocked
    }
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}

/// The snapshot field an achievement is measured against. `None` means the
/// milestone is not measurable right now (accuracy before any review).
fn measure(id: AchievementId, snap: &ProgressSnapshot) -> Option<u64> {
    use AchievementId::*;
    match id {
        Cards100 | Cards500 | Cards1000 | Cards5000 => Some(snap.total_cards_reviewed),
        Streak10 | Streak25 | Streak50 | Streak100 => Some(snap.best_streak),
        Accuracy90 | Accuracy95 | Accuracy100 => snap
            .session_has_reviews
            .then_some(snap.session_accuracy_percent),
        Levels1 | Levels5 | Levels10 | Levels25 => Some(snap.levels_completed),
        MarioCoins100 | MarioCoins500 => Some(snap.mario_coins),
        ZeldaHearts10 => Some(snap.zelda_hearts),
        DkcBananas100 | DkcBananas1000 => Some(snap.dkc_bananas),
    }
}
