//! Achievement definitions and types

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Unique identifier for an achievement
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AchievementId {
    // Cards-reviewed milestones
    Cards100,
    Cards500,
    Cards1000,
    Cards5000,

    // Streak milestones
    Streak10,
    Streak25,
    Streak50,
    Streak100,

    // Session accuracy milestones (percent)
    Accuracy90,
    Accuracy95,
    Accuracy100,

    // Levels-completed milestones
    Levels1,
    Levels5,
    Levels10,
    Levels25,

    // Theme-specific milestones
    MarioCoins100,
    MarioCoins500,
    ZeldaHearts10,
    DkcBananas100,
    DkcBananas1000,
}

/// A milestone with its unlock state.
///
/// Invariant: `unlocked` implies `progress >= target`, and the unlock date
/// is stamped exactly once, never cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    /// Currency credited when this unlocks.
    pub reward_currency: u64,
    pub target: u64,
    pub progress: u64,
    pub unlocked: bool,
    pub unlock_date: Option<SystemTime>,
}

impl Achievement {
    pub fn new(
        id: AchievementId,
        name: &str,
        description: &str,
        reward_currency: u64,
        target: u64,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            reward_currency,
            target,
            progress: 0,
            unlocked: false,
            unlock_date: None,
        }
    }

    /// Stable string id, used for audit sources.
    pub fn key(&self) -> &'static str {
        match self.id {
            AchievementId::Cards100 => "cards_100",
            AchievementId::Cards500 => "cards_500",
            AchievementId::Cards1000 => "cards_1000",
            AchievementId::Cards5000 => "cards_5000",
            AchievementId::Streak10 => "streak_10",
            AchievementId::Streak25 => "streak_25",
            AchievementId::Streak50 => "streak_50",
            AchievementId::Streak100 => "streak_100",
            AchievementId::Accuracy90 => "accuracy_90",
            AchievementId::Accuracy95 => "accuracy_95",
            AchievementId::Accuracy100 => "accuracy_100",
            AchievementId::Levels1 => "levels_1",
            AchievementId::Levels5 => "levels_5",
            AchievementId::Levels10 => "levels_10",
            AchievementId::Levels25 => "levels_25",
            AchievementId::MarioCoins100 => "mario_coins_100",
            AchievementId::MarioCoins500 => "mario_coins_500",
            AchievementId::ZeldaHearts10 => "zelda_hearts_10",
            AchievementId::DkcBananas100 => "dkc_bananas_100",
            AchievementId::DkcBananas1000 => "dkc_bananas_1000",
        }
    }
}

/// The full fixed catalog.
pub fn all_achievements() -> Vec<Achievement> {
    use AchievementId::*;
    vec![
        Achievement::new(Cards100, "First Steps", "Review 100 cards", 50, 100),
        Achievement::new(Cards500, "Getting Serious", "Review 500 cards", 100, 500),
        Achievement::new(Cards1000, "Dedicated Learner", "Review 1000 cards", 200, 1000),
        Achievement::new(Cards5000, "Study Master", "Review 5000 cards", 500, 5000),
        Achievement::new(Streak10, "On a Roll", "Reach a streak of 10", 25, 10),
        Achievement::new(Streak25, "Unstoppable", "Reach a streak of 25", 75, 25),
        Achievement::new(Streak50, "Streak Master", "Reach a streak of 50", 150, 50),
        Achievement::new(Streak100, "Perfect Memory", "Reach a streak of 100", 300, 100),
        Achievement::new(Accuracy90, "Sharp Mind", "Hit 90% session accuracy", 50, 90),
        Achievement::new(Accuracy95, "Near Perfect", "Hit 95% session accuracy", 100, 95),
        Achievement::new(Accuracy100, "Flawless", "Hit 100% session accuracy", 250, 100),
        Achievement::new(Levels1, "Level Up!", "Complete your first level", 25, 1),
        Achievement::new(Levels5, "Rising Star", "Complete 5 levels", 75, 5),
        Achievement::new(Levels10, "Veteran Player", "Complete 10 levels", 150, 10),
        Achievement::new(Levels25, "Level Champion", "Complete 25 levels", 300, 25),
        Achievement::new(MarioCoins100, "Coin Collector", "Collect 100 coins", 50, 100),
        Achievement::new(MarioCoins500, "Gold Hoarder", "Collect 500 coins", 150, 500),
        Achievement::new(ZeldaHearts10, "Heart Collector", "Collect 10 heart containers", 100, 10),
        Achievement::new(DkcBananas100, "Banana Bunch", "Collect 100 bananas", 50, 100),
        Achievement::new(DkcBananas1000, "Banana King", "Collect 1000 bananas", 200, 1000),
    ]
}
