//! Property checks over the numeric core.

use config::GameConfig;
use progression::{Ease, ProgressionTracker, ReviewResult};
use proptest::prelude::*;
use scoring::{calculate_score, combo_multiplier};
use std::time::SystemTime;

fn review(correct: bool) -> ReviewResult {
    let ease = if correct { Ease::Good } else { Ease::Again };
    ReviewResult::new("card", "deck", ease, SystemTime::UNIX_EPOCH)
}

proptest! {
    #[test]
    fn multiplier_is_a_monotonic_step_function(streak in 0u32..10_000) {
        let config = GameConfig::default();
        let m = combo_multiplier(streak, &config);
        prop_assert!([1.0, 1.5, 2.0, 3.0].contains(&m));
        prop_assert!(combo_multiplier(streak + 1, &config) >= m);
    }

    #[test]
    fn score_total_always_decomposes(
        streak in 0u32..200,
        accuracy in 0.0f64..=1.0,
    ) {
        let config = GameConfig::default();
        let score = calculate_score(true, streak, accuracy, &config);
        let multiplied = (f64::from(score.base_points) * score.multiplier).round() as u64;
        prop_assert_eq!(score.total_points, multiplied + score.bonus_points);
        prop_assert!(score.total_points >= u64::from(config.base_points));
    }

    #[test]
    fn lifetime_points_equal_sum_of_event_totals(events in proptest::collection::vec(any::<bool>(), 1..200)) {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();

        let mut expected = 0u64;
        for correct in &events {
            let outcome = tracker.process_review(&review(*correct), &config, 100);
            expected += outcome.score.total_points;
        }

        prop_assert_eq!(tracker.state().total_points, expected);
        prop_assert_eq!(tracker.state().total_cards_reviewed, events.len() as u64);
        tracker.state().validate().expect("state stays valid");
    }

    #[test]
    fn unlock_counts_follow_the_floor_rule(events in proptest::collection::vec(any::<bool>(), 1..400)) {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();
        for correct in &events {
            tracker.process_review(&review(*correct), &config, 0);
        }

        let correct = tracker.state().correct_answers;
        prop_assert_eq!(
            u64::from(tracker.state().levels_unlocked),
            correct / u64::from(config.cards_per_level)
        );
        prop_assert_eq!(
            u64::from(tracker.state().powerups_granted),
            correct / u64::from(config.cards_per_powerup)
        );
    }

    #[test]
    fn session_health_stays_in_range(events in proptest::collection::vec(any::<bool>(), 1..100)) {
        let config = GameConfig::default();
        let mut tracker = ProgressionTracker::new();
        for correct in &events {
            tracker.process_review(&review(*correct), &config, 0);
            let health = tracker.state().session_health;
            prop_assert!((0.0..=1.0).contains(&health));
        }
    }

    #[test]
    fn ledger_balance_tracks_signed_transaction_sum(
        credits in proptest::collection::vec(0u64..1_000, 0..30),
        penalties in proptest::collection::vec(0u64..50, 0..30),
    ) {
        let mut ledger = rewards::Ledger::new();
        let now = SystemTime::UNIX_EPOCH;
        for c in &credits {
            ledger.add_currency(*c, "prop", now);
        }
        for p in &penalties {
            ledger.apply_penalty(*p, now);
        }

        let signed: i64 = ledger.transactions().iter().map(|t| t.amount).sum();
        prop_assert_eq!(ledger.balance() as i64, signed);
        prop_assert!(signed >= 0);
    }
}
