//! Durability flows through the real filesystem: reopen, corruption
//! recovery, partial records and JSON export/import.

use pretty_assertions::assert_eq;
use retro_recall::{Ease, GameConfig, GameEngine, Theme};
use std::fs;
use std::time::SystemTime;

fn now() -> SystemTime {
    SystemTime::UNIX_EPOCH
}

#[test]
fn profile_roundtrips_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut engine = GameEngine::open(dir.path()).expect("open");
        for i in 0..25 {
            let ease = if i % 5 == 4 { Ease::Again } else { Ease::Good };
            engine
                .process_review(&format!("card-{i}"), "deck", ease, now())
                .expect("review");
        }
        engine.complete_level("mario_01", 0.97, now()).expect("complete");
        engine.shutdown().expect("shutdown");
    }

    let engine = GameEngine::open(dir.path()).expect("reopen");
    let state = engine.progression();
    assert_eq!(state.total_cards_reviewed, 25);
    assert_eq!(state.correct_answers, 20);
    assert_eq!(state.levels_completed, 1);
    assert!(engine.levels(Theme::Mario)[0].completed);
    assert!(engine.balance() > 0);
}

#[test]
fn corrupt_main_save_recovers_to_defaults_with_backup() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut engine = GameEngine::open(dir.path()).expect("open");
        engine
            .process_review("card-1", "deck", Ease::Good, now())
            .expect("review");
    }

    // Clobber both the main and the hot progression record.
    fs::write(dir.path().join("state.sav"), b"zzzz").expect("clobber");
    fs::remove_file(dir.path().join("progression.sav")).expect("remove");

    let engine = GameEngine::open(dir.path()).expect("recover");
    assert!(engine.recovered());
    assert_eq!(engine.progression().total_cards_reviewed, 0);

    let backups = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("state.sav.corrupt-")
        })
        .count();
    assert_eq!(backups, 1);
}

#[test]
fn hot_progression_record_wins_when_newer() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut engine = GameEngine::open(dir.path()).expect("open");
        for i in 0..5 {
            engine
                .process_review(&format!("card-{i}"), "deck", Ease::Good, now())
                .expect("review");
        }
    }

    // Simulate a crash that lost the main record but kept the hot one.
    fs::write(dir.path().join("state.sav"), b"torn write").expect("clobber");

    let engine = GameEngine::open(dir.path()).expect("recover");
    assert!(engine.recovered());
    // The progression overlay restored the lifetime counters.
    assert_eq!(engine.progression().total_cards_reviewed, 5);
    assert_eq!(engine.progression().correct_answers, 5);
}

#[test]
fn theme_record_survives_alone() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut engine = GameEngine::open(dir.path()).expect("open");
        engine.set_theme(Theme::Zelda).expect("switch");
    }

    let engine = GameEngine::open(dir.path()).expect("reopen");
    assert_eq!(engine.theme(), Theme::Zelda);
}

#[test]
fn settings_survive_alone() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut engine = GameEngine::open(dir.path()).expect("open");
        let custom = GameConfig {
            base_points: 25,
            ..GameConfig::default()
        };
        engine.set_config(custom).expect("set config");
    }

    let engine = GameEngine::open(dir.path()).expect("reopen");
    assert_eq!(engine.config().base_points, 25);
}

#[test]
fn corrupt_settings_fall_back_to_defaults_without_blocking_open() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut engine = GameEngine::open(dir.path()).expect("open");
        let custom = GameConfig {
            base_points: 25,
            ..GameConfig::default()
        };
        engine.set_config(custom).expect("set config");
        engine
            .process_review("card-1", "deck", Ease::Good, now())
            .expect("review");
    }

    fs::write(dir.path().join("settings.sav"), b"zzzz").expect("clobber");

    // The profile still opens; only the settings reverted to defaults.
    let engine = GameEngine::open(dir.path()).expect("reopen");
    assert_eq!(engine.config().base_points, 10);
    assert_eq!(engine.progression().total_cards_reviewed, 1);

    let backups = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("settings.sav.corrupt-")
        })
        .count();
    assert_eq!(backups, 1);
}

#[test]
fn export_then_import_is_lossless() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut engine = GameEngine::open(dir.path()).expect("open");
    for i in 0..30 {
        let ease = if i % 4 == 0 { Ease::Again } else { Ease::Easy };
        engine
            .process_review(&format!("card-{i}"), "deck", ease, now())
            .expect("review");
    }
    engine.set_theme(Theme::Dkc).expect("switch");

    let exported = engine.export_json().expect("export");

    let dir2 = tempfile::tempdir().expect("tempdir");
    let mut fresh = GameEngine::open(dir2.path()).expect("open");
    fresh.import_json(&exported).expect("import");

    assert_eq!(fresh.progression(), engine.progression());
    assert_eq!(fresh.theme(), Theme::Dkc);
    assert_eq!(fresh.balance(), engine.balance());
    // A second export of the imported profile is bit-identical.
    assert_eq!(fresh.export_json().expect("re-export"), exported);
}

#[test]
fn import_of_tampered_counters_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut engine = GameEngine::open(dir.path()).expect("open");
    engine
        .process_review("card-1", "deck", Ease::Good, now())
        .expect("review");

    let mut exported = engine.export_json().expect("export");
    // Push correct_answers past total_cards_reviewed.
    exported = exported.replace("\"correct_answers\": 1", "\"correct_answers\": 99");

    let before = engine.progression().clone();
    assert!(engine.import_json(&exported).is_err());
    assert_eq!(engine.progression(), &before);
}

#[test]
fn review_log_grows_one_line_per_review() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut engine = GameEngine::open(dir.path()).expect("open");
    for i in 0..4 {
        engine
            .process_review(&format!("card-{i}"), "deck", Ease::Good, now())
            .expect("review");
    }

    let log = fs::read_to_string(dir.path().join("reviews.log")).expect("read log");
    assert_eq!(log.lines().count(), 4);
    for line in log.lines() {
        let value: serde_json::Value = serde_json::from_str(line).expect("json line");
        assert_eq!(value["deck_id"], "deck");
    }
}
