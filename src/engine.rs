//! The top-level engine: owns every live aggregate, orchestrates one review
//! at a time and pushes durable state through the store.

use crate::themes::{AnimationDescriptor, DashboardStats, ThemeCounter, engine_for};
use achievements::{AchievementBook, AchievementId, ProgressSnapshot};
use config::GameConfig;
use error::EngineError;
use levels::{Level, LevelRegistry, LevelReward};
use log::{debug, info, warn};
use powerups::{Activation, ActivePowerUp, PowerUpKind, PowerUpRegistry};
use progression::{Ease, ProgressionState, ProgressionTracker, ReviewOutcome, ReviewResult};
use rewards::{Ledger, OwnedItem};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::SystemTime;
use store::{GameState, LoadOutcome, Persistence, ReviewRecord, Store, ThemeRecord};
use theme::{Theme, ThemeState};

/// Everything one processed review produced, ready for presentation.
#[derive(Debug, Clone)]
pub struct ReviewReport {
    pub outcome: ReviewOutcome,
    pub animation: AnimationDescriptor,
    /// Kind granted by a crossed power-up threshold, if any.
    pub powerup_granted: Option<PowerUpKind>,
    /// Id of the level a crossed threshold unlocked, if any.
    pub level_unlocked: Option<String>,
    pub achievements_unlocked: Vec<AchievementId>,
    pub persistence: Persistence,
}

/// Result of completing a level, including the achievement fallout.
#[derive(Debug, Clone)]
pub struct CompletionReport {
    pub reward: LevelReward,
    pub achievements_unlocked: Vec<AchievementId>,
    pub persistence: Persistence,
}

pub struct GameEngine {
    config: GameConfig,
    tracker: ProgressionTracker,
    achievements: AchievementBook,
    powerups: PowerUpRegistry,
    levels: LevelRegistry,
    ledger: Ledger,
    theme: Theme,
    theme_states: BTreeMap<Theme, ThemeState>,
    store: Store,
    /// True when the last load had to fall back to defaults.
    recovered: bool,
}

impl GameEngine {
    /// Open (or create) the profile stored under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, EngineError> {
        let mut store = Store::new(dir)?;
        let LoadOutcome { state, recovered } = store.load_or_recover()?;
        if recovered {
            warn!("profile restored from defaults after corruption");
        }
        let config = store.load_settings_or_recover()?;

        // Rebuild the level registry from the built-in catalog so text
        // changes reach old saves, keeping all saved progress.
        let mut levels = LevelRegistry::new();
        levels.merge_saved(&state.levels);

        info!(
            "profile opened: {} cards reviewed, {} points, theme {}",
            state.progression.total_cards_reviewed,
            state.progression.total_points,
            state.theme.key()
        );

        Ok(Self {
            config,
            tracker: ProgressionTracker::from_state(state.progression),
            achievements: state.achievements,
            powerups: state.powerups,
            levels,
            ledger: state.ledger,
            theme: state.theme,
            theme_states: state.theme_states,
            store,
            recovered,
        })
    }

    pub fn recovered(&self) -> bool {
        self.recovered
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn progression(&self) -> &ProgressionState {
        self.tracker.state()
    }

    pub fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    pub fn powerups(&self) -> &PowerUpRegistry {
        &self.powerups
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn levels(&self, theme: Theme) -> &[Level] {
        self.levels.levels(theme)
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    /// Replace the active configuration after validation. A failed
    /// validation leaves the current config in place.
    pub fn set_config(&mut self, config: GameConfig) -> Result<Persistence, EngineError> {
        config.validate()?;
        self.config = config;
        self.store.save_settings(&self.config)
    }

    /// Fold one answered card into the whole system: scoring, streaks,
    /// thresholds, collectibles, achievements, currency and persistence.
    pub fn process_review(
        &mut self,
        card_id: &str,
        deck_id: &str,
        ease: Ease,
        now: SystemTime,
    ) -> Result<ReviewReport, EngineError> {
        let result = ReviewResult::new(card_id, deck_id, ease, now);
        let outcome = self
            .tracker
            .process_review(&result, &self.config, self.ledger.balance());

        let presentation = engine_for(self.theme);
        let animation = if result.is_correct {
            presentation.animation_for_correct(self.tracker.state().current_streak)
        } else {
            presentation.animation_for_wrong()
        };

        if result.is_correct {
            let (counter, amount) =
                presentation.collectible_for_correct(self.tracker.state().current_streak);
            self.bump_counter(counter, amount);
        } else if outcome.penalty.is_some() {
            self.ledger
                .apply_penalty(self.config.penalty_currency_loss, now);
        }

        let level_unlocked = outcome.level_unlocked.and_then(|ordinal| {
            let unlocked = self.levels.unlock_next(self.theme);
            match unlocked {
                Some(level) => {
                    info!("level {} unlocked ({} total)", level.id, ordinal);
                    Some(level.id.clone())
                }
                // Catalog exhausted for this theme; the counter still moved.
                None => None,
            }
        });

        let powerup_granted = if outcome.powerup_granted {
            let kind = self.next_granted_kind();
            self.powerups.grant(kind, self.theme, now);
            info!("power-up granted: {}", kind.key());
            Some(kind)
        } else {
            None
        };

        let achievements_unlocked = self.settle_achievements(now);

        let record = ReviewRecord {
            card_id: result.card_id.clone(),
            deck_id: result.deck_id.clone(),
            is_correct: result.is_correct,
            ease: result.ease.as_number(),
            points_awarded: outcome.score.total_points,
            streak_after: self.tracker.state().current_streak,
            timestamp: now,
        };
        if let Err(err) = self.store.append_review(&record) {
            // Audit log trouble must not block gameplay.
            warn!("review log append failed: {err}");
        }

        let persistence = self.commit()?;
        debug!(
            "review processed: +{} points, streak {}",
            outcome.score.total_points,
            self.tracker.state().current_streak
        );

        Ok(ReviewReport {
            outcome,
            animation,
            powerup_granted,
            level_unlocked,
            achievements_unlocked,
            persistence,
        })
    }

    /// Advance active power-up timers. Expired effects are returned and
    /// the trimmed registry is committed so an expired timer can never
    /// come back after a reload.
    pub fn tick(&mut self, delta_secs: f64) -> Result<Vec<ActivePowerUp>, EngineError> {
        let expired = self.powerups.tick(delta_secs);
        if !expired.is_empty() {
            for active in &expired {
                info!("power-up expired: {}", active.id);
            }
            self.commit()?;
        }
        Ok(expired)
    }

    /// Switch the active theme. Only the theme record moves; progression,
    /// points and unlocks are untouched.
    pub fn set_theme(&mut self, theme: Theme) -> Result<Persistence, EngineError> {
        self.theme = theme;
        info!("theme switched to {}", theme.key());
        self.store.save_theme(&ThemeRecord {
            theme: self.theme,
            states: self.theme_states.clone(),
        })
    }

    /// Start a new study session: health and session accuracy reset,
    /// lifetime totals and the streak survive.
    pub fn reset_session(&mut self) -> Result<Persistence, EngineError> {
        self.tracker.reset_session();
        self.commit()
    }

    /// Complete a level at the given accuracy. The theme engine picks the
    /// power-up tier; replays pay half and never re-grant.
    pub fn complete_level(
        &mut self,
        level_id: &str,
        accuracy: f64,
        now: SystemTime,
    ) -> Result<CompletionReport, EngineError> {
        let level_theme = self
            .levels
            .get(level_id)
            .map(|l| l.theme)
            .ok_or_else(|| EngineError::NotFound(format!("level {level_id}")))?;
        let tier = engine_for(level_theme).reward_for_accuracy(accuracy.clamp(0.0, 1.0));

        let reward = self.levels.complete(level_id, accuracy, tier, now)?;
        if reward.first_completion {
            self.tracker.record_level_completed();
        }
        if reward.currency > 0 {
            self.ledger
                .add_currency(reward.currency, &format!("level:{level_id}"), now);
        }
        if let Some(kind) = reward.powerup {
            self.powerups.grant(kind, level_theme, now);
        }
        info!(
            "level {} completed at {:.0}%: +{} currency",
            level_id,
            accuracy.clamp(0.0, 1.0) * 100.0,
            reward.currency
        );

        let achievements_unlocked = self.settle_achievements(now);
        let persistence = self.commit()?;
        Ok(CompletionReport {
            reward,
            achievements_unlocked,
            persistence,
        })
    }

    /// Use one unit of an inventory power-up.
    pub fn activate_powerup(
        &mut self,
        powerup_id: &str,
        now: SystemTime,
    ) -> Result<Activation, EngineError> {
        let activation = self.powerups.activate(powerup_id, now)?;
        self.commit()?;
        Ok(activation)
    }

    pub fn add_currency(
        &mut self,
        amount: u64,
        source: &str,
        now: SystemTime,
    ) -> Result<u64, EngineError> {
        let balance = self.ledger.add_currency(amount, source, now);
        self.commit()?;
        Ok(balance)
    }

    pub fn spend_currency(
        &mut self,
        amount: u64,
        item_id: &str,
        now: SystemTime,
    ) -> Result<u64, EngineError> {
        let balance = self.ledger.spend_currency(amount, item_id, now)?;
        self.commit()?;
        Ok(balance)
    }

    pub fn unlock_item(
        &mut self,
        item_id: &str,
        now: SystemTime,
    ) -> Result<OwnedItem, EngineError> {
        let owned = self.ledger.unlock_item(item_id, now)?.clone();
        self.commit()?;
        Ok(owned)
    }

    pub fn equip_item(
        &mut self,
        item_id: &str,
        now: SystemTime,
    ) -> Result<Persistence, EngineError> {
        self.ledger.equip_item(item_id, now)?;
        self.commit()
    }

    /// Dashboard copy for the active theme.
    pub fn dashboard(&self) -> DashboardStats {
        let state = self
            .theme_states
            .get(&self.theme)
            .cloned()
            .unwrap_or_else(|| ThemeState::new(self.theme));
        engine_for(self.theme).dashboard_stats(self.tracker.state(), &state)
    }

    /// Serialize the whole profile to pretty JSON.
    pub fn export_json(&self) -> Result<String, EngineError> {
        Store::export_json(&self.game_state())
    }

    /// Replace the whole profile from exported JSON. The payload is fully
    /// validated first; on any failure the live state is untouched.
    pub fn import_json(&mut self, json: &str) -> Result<Persistence, EngineError> {
        let state = Store::import_json(json)?;

        let mut levels = LevelRegistry::new();
        levels.merge_saved(&state.levels);

        self.tracker = ProgressionTracker::from_state(state.progression);
        self.achievements = state.achievements;
        self.powerups = state.powerups;
        self.levels = levels;
        self.ledger = state.ledger;
        self.theme = state.theme;
        self.theme_states = state.theme_states;
        info!("profile imported");
        self.commit()
    }

    /// Retry queued writes and push one final save.
    pub fn shutdown(&mut self) -> Result<Persistence, EngineError> {
        let flushed = self.store.flush_pending()?;
        if flushed > 0 {
            info!("flushed {flushed} queued write(s)");
        }
        self.commit()
    }

    // --- internals ---

    fn game_state(&self) -> GameState {
        GameState {
            version: store::STATE_VERSION,
            progression: self.tracker.state().clone(),
            achievements: self.achievements.clone(),
            powerups: self.powerups.clone(),
            levels: self.levels.clone(),
            ledger: self.ledger.clone(),
            theme: self.theme,
            theme_states: self.theme_states.clone(),
        }
    }

    /// Write the full record plus the hot progression record. Reports
    /// `Queued` when either write had to be deferred.
    fn commit(&mut self) -> Result<Persistence, EngineError> {
        let state = self.game_state();
        let a = self.store.save_state(&state)?;
        let b = self.store.save_progression(&state.progression)?;
        Ok(if a == Persistence::Committed && b == Persistence::Committed {
            Persistence::Committed
        } else {
            Persistence::Queued
        })
    }

    /// Deterministic grant rotation: the nth grant takes the nth kind of
    /// the active theme's cycle.
    fn next_granted_kind(&self) -> PowerUpKind {
        let cycle = PowerUpKind::for_theme(self.theme);
        let ordinal = self.tracker.state().powerups_granted.saturating_sub(1) as usize;
        cycle[ordinal % cycle.len()]
    }

    fn bump_counter(&mut self, counter: ThemeCounter, amount: u64) {
        if amount == 0 {
            return;
        }
        let state = self
            .theme_states
            .entry(self.theme)
            .or_insert_with(|| ThemeState::new(self.theme));
        match counter {
            ThemeCounter::Coins => state.coins = state.coins.saturating_add(amount),
            ThemeCounter::Hearts => state.hearts = state.hearts.saturating_add(amount),
            ThemeCounter::Bananas => state.bananas = state.bananas.saturating_add(amount),
        }
    }

    /// Evaluate the achievement catalog against current progress and credit
    /// every fresh unlock's currency reward.
    fn settle_achievements(&mut self, now: SystemTime) -> Vec<AchievementId> {
        let progression = self.tracker.state();
        let mario = self.theme_states.get(&Theme::Mario);
        let zelda = self.theme_states.get(&Theme::Zelda);
        let dkc = self.theme_states.get(&Theme::Dkc);
        let snapshot = ProgressSnapshot {
            total_cards_reviewed: progression.total_cards_reviewed,
            best_streak: u64::from(progression.best_streak.max(progression.current_streak)),
            // Truncated to a whole percent: a 99.5% session is not flawless.
            session_accuracy_percent: (progression.session_accuracy * 100.0) as u64,
            session_has_reviews: progression.session_total > 0,
            levels_completed: u64::from(progression.levels_completed),
            mario_coins: mario.map_or(0, |s| s.coins),
            zelda_hearts: zelda.map_or(0, |s| s.hearts),
            dkc_bananas: dkc.map_or(0, |s| s.bananas),
        };

        let unlocked = self.achievements.check(&snapshot, now);
        for id in &unlocked {
            if let Some(achievement) = self.achievements.get(*id) {
                let reward = achievement.reward_currency;
                let source = format!("achievement:{}", achievement.key());
                info!("achievement unlocked: {} (+{reward})", achievement.name);
                self.ledger.add_currency(reward, &source, now);
            }
        }
        unlocked
    }
}
