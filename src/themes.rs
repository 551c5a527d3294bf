//! Theme presentation engines.
//!
//! Everything a front end needs to skin the same numeric core three ways:
//! animation cues, collectible drips, dashboard copy and the per-theme
//! accuracy reward tiers. Swapping the active engine never touches the
//! scoring or progression math.

use levels::Level;
use powerups::PowerUpKind;
use progression::ProgressionState;
use theme::{Theme, ThemeState};

/// Visual cue categories a front end can map to sprites or sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    CoinPop,
    PowerUpGlow,
    FireworkBurst,
    Stumble,
    RupeeSparkle,
    SwordFlourish,
    TriforceFlash,
    HeartLoss,
    BananaToss,
    BarrelBlast,
    KongPose,
    BananaDrop,
}

/// One requested animation, with an intensity a renderer may scale by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationDescriptor {
    pub kind: AnimationKind,
    /// 1..=3, rising with streak milestones.
    pub intensity: u8,
}

/// Which per-theme counter a collectible drip lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCounter {
    Coins,
    Hearts,
    Bananas,
}

/// Ready-to-render dashboard copy for the active theme.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub theme: Theme,
    pub headline: String,
    pub collectible_label: &'static str,
    pub collectible_count: u64,
    pub points: u64,
    pub streak: u32,
    pub health_percent: u32,
}

/// Themed framing around one level entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelViewDescriptor {
    pub banner: String,
    pub subtitle: String,
    pub completed: bool,
}

/// The seam between the numeric core and a theme's presentation.
pub trait ThemeEngine: Sync {
    fn theme(&self) -> Theme;

    fn animation_for_correct(&self, streak: u32) -> AnimationDescriptor;

    fn animation_for_wrong(&self) -> AnimationDescriptor;

    /// Counter and amount dripped into the theme state for one correct
    /// answer at the given streak.
    fn collectible_for_correct(&self, streak: u32) -> (ThemeCounter, u64);

    fn level_view(&self, level: &Level) -> LevelViewDescriptor;

    fn dashboard_stats(&self, progression: &ProgressionState, state: &ThemeState)
    -> DashboardStats;

    /// The power-up a first-time level completion at this accuracy earns,
    /// if any.
    fn reward_for_accuracy(&self, accuracy: f64) -> Option<PowerUpKind>;
}

/// Intensity tiers shared by all engines: bigger cues at the combo tiers.
fn intensity_for(streak: u32) -> u8 {
    match streak {
        0..=4 => 1,
        5..=9 => 2,
        _ => 3,
    }
}

fn health_percent(progression: &ProgressionState) -> u32 {
    (progression.session_health * 100.0).round() as u32
}

pub struct MarioEngine;
pub struct ZeldaEngine;
pub struct DkcEngine;

pub static MARIO_ENGINE: MarioEngine = MarioEngine;
pub static ZELDA_ENGINE: ZeldaEngine = ZeldaEngine;
pub static DKC_ENGINE: DkcEngine = DkcEngine;

pub fn engine_for(theme: Theme) -> &'static dyn ThemeEngine {
    match theme {
        Theme::Mario => &MARIO_ENGINE,
        Theme::Zelda => &ZELDA_ENGINE,
        Theme::Dkc => &DKC_ENGINE,
    }
}

impl ThemeEngine for MarioEngine {
    fn theme(&self) -> Theme {
        Theme::Mario
    }

    fn animation_for_correct(&self, streak: u32) -> AnimationDescriptor {
        let kind = match streak {
            0..=4 => AnimationKind::CoinPop,
            5..=9 => AnimationKind::PowerUpGlow,
            _ => AnimationKind::FireworkBurst,
        };
        AnimationDescriptor {
            kind,
            intensity: intensity_for(streak),
        }
    }

    fn animation_for_wrong(&self) -> AnimationDescriptor {
        AnimationDescriptor {
            kind: AnimationKind::Stumble,
            intensity: 1,
        }
    }

    fn collectible_for_correct(&self, streak: u32) -> (ThemeCounter, u64) {
        // One coin per correct answer, a bunch at every tenth streak step.
        let amount = if streak > 0 && streak % 10 == 0 { 5 } else { 1 };
        (ThemeCounter::Coins, amount)
    }

    fn level_view(&self, level: &Level) -> LevelViewDescriptor {
        LevelViewDescriptor {
            banner: format!("🍄 {}", level.name),
            subtitle: level.description.clone(),
            completed: level.completed,
        }
    }

    fn dashboard_stats(
        &self,
        progression: &ProgressionState,
        state: &ThemeState,
    ) -> DashboardStats {
        DashboardStats {
            theme: Theme::Mario,
            headline: format!("World {} — Mushroom Kingdom", progression.levels_unlocked.max(1)),
            collectible_label: "Coins",
            collectible_count: state.coins,
            points: progression.total_points,
            streak: progression.current_streak,
            health_percent: health_percent(progression),
        }
    }

    fn reward_for_accuracy(&self, accuracy: f64) -> Option<PowerUpKind> {
        if accuracy >= 1.0 {
            Some(PowerUpKind::Star)
        } else if accuracy >= 0.98 {
            Some(PowerUpKind::FireFlower)
        } else if accuracy >= 0.95 {
            Some(PowerUpKind::Mushroom)
        } else {
            None
        }
    }
}

impl ThemeEngine for ZeldaEngine {
    fn theme(&self) -> Theme {
        Theme::Zelda
    }

    fn animation_for_correct(&self, streak: u32) -> AnimationDescriptor {
        let kind = match streak {
            0..=4 => AnimationKind::RupeeSparkle,
            5..=9 => AnimationKind::SwordFlourish,
            _ => AnimationKind::TriforceFlash,
        };
        AnimationDescriptor {
            kind,
            intensity: intensity_for(streak),
        }
    }

    fn animation_for_wrong(&self) -> AnimationDescriptor {
        AnimationDescriptor {
            kind: AnimationKind::HeartLoss,
            intensity: 1,
        }
    }

    fn collectible_for_correct(&self, streak: u32) -> (ThemeCounter, u64) {
        // Hearts come slowly: one per five-streak milestone.
        let amount = if streak > 0 && streak % 5 == 0 { 1 } else { 0 };
        (ThemeCounter::Hearts, amount)
    }

    fn level_view(&self, level: &Level) -> LevelViewDescriptor {
        LevelViewDescriptor {
            banner: format!("🗡 {}", level.name),
            subtitle: level.description.clone(),
            completed: level.completed,
        }
    }

    fn dashboard_stats(
        &self,
        progression: &ProgressionState,
        state: &ThemeState,
    ) -> DashboardStats {
        DashboardStats {
            theme: Theme::Zelda,
            headline: "Hyrule — A Link to Your Decks".to_string(),
            collectible_label: "Hearts",
            collectible_count: state.hearts,
            points: progression.total_points,
            streak: progression.current_streak,
            health_percent: health_percent(progression),
        }
    }

    fn reward_for_accuracy(&self, accuracy: f64) -> Option<PowerUpKind> {
        (accuracy >= 0.95).then_some(PowerUpKind::HeartContainer)
    }
}

impl ThemeEngine for DkcEngine {
    fn theme(&self) -> Theme {
        Theme::Dkc
    }

    fn animation_for_correct(&self, streak: u32) -> AnimationDescriptor {
        let kind = match streak {
            0..=4 => AnimationKind::BananaToss,
            5..=9 => AnimationKind::BarrelBlast,
            _ => AnimationKind::KongPose,
        };
        AnimationDescriptor {
            kind,
            intensity: intensity_for(streak),
        }
    }

    fn animation_for_wrong(&self) -> AnimationDescriptor {
        AnimationDescriptor {
            kind: AnimationKind::BananaDrop,
            intensity: 1,
        }
    }

    fn collectible_for_correct(&self, streak: u32) -> (ThemeCounter, u64) {
        // Bananas drop generously, doubled through hot streaks.
        let amount = if streak >= 10 { 2 } else { 1 };
        (ThemeCounter::Bananas, amount)
    }

    fn level_view(&self, level: &Level) -> LevelViewDescriptor {
        LevelViewDescriptor {
            banner: format!("🍌 {}", level.name),
            subtitle: level.description.clone(),
            completed: level.completed,
        }
    }

    fn dashboard_stats(
        &self,
        progression: &ProgressionState,
        state: &ThemeState,
    ) -> DashboardStats {
        DashboardStats {
            theme: Theme::Dkc,
            headline: "Kong Country — Barrels of Cards".to_string(),
            collectible_label: "Bananas",
            collectible_count: state.bananas,
            points: progression.total_points,
            streak: progression.current_streak,
            health_percent: health_percent(progression),
        }
    }

    fn reward_for_accuracy(&self, accuracy: f64) -> Option<PowerUpKind> {
        (accuracy >= 0.95).then_some(PowerUpKind::GoldenBanana)
    }
}
