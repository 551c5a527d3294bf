//! The durable profile aggregate and its versioning.

use achievements::AchievementBook;
use error::EngineError;
use levels::LevelRegistry;
use powerups::PowerUpRegistry;
use progression::ProgressionState;
use rewards::Ledger;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;
use theme::{Theme, ThemeState, default_theme_states};

/// Current on-disk format version.
pub const STATE_VERSION: u32 = 1;

fn default_version() -> u32 {
    1
}

/// Everything the engine persists for one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default = "default_version")]
    pub version: u32,
    pub progression: ProgressionState,
    pub achievements: AchievementBook,
    pub powerups: PowerUpRegistry,
    pub levels: LevelRegistry,
    pub ledger: Ledger,
    pub theme: Theme,
    pub theme_states: BTreeMap<Theme, ThemeState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            progression: ProgressionState::default(),
            achievements: AchievementBook::new(),
            powerups: PowerUpRegistry::new(),
            levels: LevelRegistry::new(),
            ledger: Ledger::new(),
            theme: Theme::default(),
            theme_states: default_theme_states(),
        }
    }
}

impl GameState {
    /// Migrate an older record to the current version. No-op for current
    /// or unknown versions; validation catches the latter.
    pub fn migrate(&mut self) {
        if self.version < STATE_VERSION {
            self.version = STATE_VERSION;
        }
    }

    /// Structural integrity check, run on every load and import.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.version > STATE_VERSION {
            return Err(EngineError::Validation(format!(
                "state version {} is newer than supported {STATE_VERSION}",
                self.version
            )));
        }
        self.progression.validate()?;
        for theme in Theme::ALL {
            if !self.theme_states.contains_key(&theme) {
                return Err(EngineError::Validation(format!(
                    "missing theme state for {}",
                    theme.key()
                )));
            }
        }
        for active in self.powerups.active() {
            if active.remaining_secs > active.duration_secs as f64 {
                return Err(EngineError::Validation(format!(
                    "active power-up {} exceeds its duration",
                    active.id
                )));
            }
        }
        Ok(())
    }
}

/// The active theme and every theme's counters, persisted on their own so
/// a theme switch never rewrites the main record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeRecord {
    pub theme: Theme,
    pub states: BTreeMap<Theme, ThemeState>,
}

impl Default for ThemeRecord {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            states: default_theme_states(),
        }
    }
}

/// One line of the append-only review audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub card_id: String,
    pub deck_id: String,
    pub is_correct: bool,
    pub ease: u8,
    pub points_awarded: u64,
    pub streak_after: u32,
    pub timestamp: SystemTime,
}
