//! Per-theme level registries.
//!
//! Each theme carries a fixed catalog of sixteen levels. The first level of
//! every theme starts unlocked; further levels open in order as progression
//! thresholds are crossed. Completion is permanent and records the best
//! accuracy ever achieved; replays pay out at half rate and never re-grant
//! a power-up.

pub mod catalog;

pub use catalog::LEVELS_PER_THEME;

use error::EngineError;
use powerups::PowerUpKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;
use theme::Theme;

pub const BASE_COMPLETION_CURRENCY: u64 = 50;

/// Accuracy-tiered completion bonus, highest tier first.
const COMPLETION_BONUS_TIERS: [(f64, u64); 4] = [(1.0, 100), (0.98, 75), (0.95, 50), (0.90, 25)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Derived id, stable across saves: `<theme>_<number>`.
    pub id: String,
    pub theme: Theme,
    /// 1-based position within the theme's catalog.
    pub number: u32,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
    pub completed: bool,
    pub best_accuracy: Option<f64>,
    pub completion_date: Option<SystemTime>,
    pub rewards_claimed: bool,
}

/// What one completion paid out.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelReward {
    pub level_id: String,
    pub currency: u64,
    pub powerup: Option<PowerUpKind>,
    pub first_completion: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRegistry {
    levels: BTreeMap<Theme, Vec<Level>>,
}

fn level_id(theme: Theme, number: u32) -> String {
    format!("{}_{number:02}", theme.key())
}

impl LevelRegistry {
    /// Full catalogs for every theme, with each theme's first level
    /// already unlocked.
    pub fn new() -> Self {
        let mut levels = BTreeMap::new();
        for theme in Theme::ALL {
            let catalog = catalog::catalog_for(theme);
            let entries = catalog
                .iter()
                .enumerate()
                .map(|(i, def)| {
                    let number = i as u32 + 1;
                    Level {
                        id: level_id(theme, number),
                        theme,
                        number,
                        name: def.name.to_string(),
                        description: def.description.to_string(),
                        unlocked: number == 1,
                        completed: false,
                        best_accuracy: None,
                        completion_date: None,
                        rewards_claimed: false,
                    }
                })
                .collect();
            levels.insert(theme, entries);
        }
        Self { levels }
    }

    pub fn levels(&self, theme: Theme) -> &[Level] {
        self.levels.get(&theme).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, id: &str) -> Option<&Level> {
        self.levels.values().flatten().find(|l| l.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Level> {
        self.levels.values_mut().flatten().find(|l| l.id == id)
    }

    pub fn unlocked_count(&self, theme: Theme) -> u32 {
        self.levels(theme).iter().filter(|l| l.unlocked).count() as u32
    }

    pub fn completed_count(&self, theme: Theme) -> u32 {
        self.levels(theme).iter().filter(|l| l.completed).count() as u32
    }

    /// Unlock the lowest-numbered locked level of `theme`. Returns the newly
    /// unlocked level, or `None` when the whole catalog is already open.
    pub fn unlock_next(&mut self, theme: Theme) -> Option<&Level> {
        let entries = self.levels.get_mut(&theme)?;
        let next = entries.iter_mut().find(|l| !l.unlocked)?;
        next.unlocked = true;
        Some(next)
    }

    /// Record a completion and compute its payout.
    ///
    /// Accuracy is clamped to 0.0..=1.0 before use. The first completion
    /// pays the base amount plus the highest accuracy-tier bonus reached
    /// and may carry a theme power-up chosen by the caller; replays pay
    /// half and never grant a power-up. Unknown and locked levels both
    /// fail as not found.
    pub fn complete(
        &mut self,
        id: &str,
        accuracy: f64,
        reward_powerup: Option<PowerUpKind>,
        now: SystemTime,
    ) -> Result<LevelReward, EngineError> {
        let level = self
            .get_mut(id)
            .ok_or_else(|| EngineError::NotFound(format!("level {id}")))?;
        if !level.unlocked {
            return Err(EngineError::NotFound(format!("level {id} is locked")));
        }

        let accuracy = accuracy.clamp(0.0, 1.0);
        let first_completion = !level.completed;

        level.completed = true;
        level.best_accuracy = Some(match level.best_accuracy {
            Some(best) => best.max(accuracy),
            None => accuracy,
        });
        if level.completion_date.is_none() {
            level.completion_date = Some(now);
        }

        let full = BASE_COMPLETION_CURRENCY + completion_bonus(accuracy);
        let currency = if first_completion { full } else { full / 2 };
        let powerup = if first_completion { reward_powerup } else { None };
        if first_completion {
            level.rewards_claimed = true;
        }

        Ok(LevelReward {
            level_id: level.id.clone(),
            currency,
            powerup,
            first_completion,
        })
    }

    /// Overlay saved unlock/completion state onto the built-in catalog.
    /// Names and descriptions always come from the catalog, so text
    /// updates survive old saves; unknown saved ids are ignored.
    pub fn merge_saved(&mut self, saved: &LevelRegistry) {
        for saved_level in saved.levels.values().flatten() {
            if let Some(level) = self.get_mut(&saved_level.id) {
                level.unlocked = level.unlocked || saved_level.unlocked;
                level.completed = level.completed || saved_level.completed;
                level.best_accuracy = match (level.best_accuracy, saved_level.best_accuracy) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
                level.completion_date = level.completion_date.or(saved_level.completion_date);
                level.rewards_claimed = level.rewards_claimed || saved_level.rewards_claimed;
            }
        }
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Highest bonus tier the accuracy reaches, or zero below every tier.
fn completion_bonus(accuracy: f64) -> u64 {
    COMPLETION_BONUS_TIERS
        .iter()
        .find(|(threshold, _)| accuracy >= *threshold)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0)
}
