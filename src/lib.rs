//! Retro Recall: a progression and rewards engine for spaced-repetition
//! study, skinned as a retro platformer.
//!
//! The numeric core (scoring, streaks, thresholds, currency) is shared by
//! every theme; themes only flavor presentation, collectibles and power-up
//! kinds. See [`engine::GameEngine`] for the orchestrating entry point.

pub mod engine;
pub mod themes;

pub use engine::{CompletionReport, GameEngine, ReviewReport};
pub use themes::{
    AnimationDescriptor, AnimationKind, DashboardStats, LevelViewDescriptor, ThemeCounter,
    ThemeEngine, engine_for,
};

pub use achievements::{Achievement, AchievementBook, AchievementId};
pub use config::GameConfig;
pub use error::EngineError;
pub use levels::{Level, LevelRegistry, LevelReward};
pub use powerups::{Activation, ActivePowerUp, PowerUp, PowerUpKind, PowerUpRegistry};
pub use progression::{Ease, ProgressionState, ReviewOutcome, ReviewResult};
pub use rewards::{ItemKind, Ledger, OwnedItem, ShopItem, shop_catalog};
pub use scoring::{PenaltyResult, ScoreResult};
pub use store::{GameState, Persistence, Store};
pub use theme::{Theme, ThemeState};
