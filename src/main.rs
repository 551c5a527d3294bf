//! Interactive demo shell around [`retro_recall::GameEngine`].
//!
//! Reads one command per line from stdin and prints what the engine did.
//! The profile directory defaults to `./profile` and is created on first
//! run; pass a path argument to use another one.

use anyhow::{Context, Result};
use retro_recall::{Activation, Ease, GameEngine, Theme};
use std::io::{self, BufRead, Write};
use std::time::SystemTime;

const HELP: &str = "\
commands:
  c               answer a card correctly
  w               answer a card wrong
  stats           show the themed dashboard
  theme <name>    switch theme (mario, zelda, dkc)
  levels          list the active theme's levels
  complete <id> <percent>   finish a level at that accuracy
  powerups        list inventory and active effects
  use <id>        activate a power-up
  shop            list the shop catalog
  buy <id>        buy a shop item
  export          print the profile as JSON
  reset           start a new session
  quit";

fn main() -> Result<()> {
    env_logger::init();

    let dir = std::env::args().nth(1).unwrap_or_else(|| "profile".into());
    let mut engine = GameEngine::open(&dir).context("failed to open profile")?;
    if engine.recovered() {
        println!("(previous save was corrupt; starting from a fresh profile)");
    }

    println!("retro_recall demo — type 'help' for commands");
    print_dashboard(&engine);

    let stdin = io::stdin();
    let mut card_counter = 0u64;
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let now = SystemTime::now();

        match parts.as_slice() {
            [] => {}
            ["help"] => println!("{HELP}"),
            ["quit"] | ["q"] => break,
            ["c"] | ["w"] => {
                card_counter += 1;
                let ease = if parts[0] == "c" { Ease::Good } else { Ease::Again };
                let card = format!("card-{card_counter}");
                match engine.process_review(&card, "demo-deck", ease, now) {
                    Ok(report) => {
                        println!(
                            "+{} points (x{:.1}), streak {}",
                            report.outcome.score.total_points,
                            report.outcome.score.multiplier,
                            engine.progression().current_streak
                        );
                        if let Some(id) = &report.level_unlocked {
                            println!("★ level unlocked: {id}");
                        }
                        if let Some(kind) = report.powerup_granted {
                            println!("★ power-up earned: {}", kind.meta().name);
                        }
                        for id in &report.achievements_unlocked {
                            if let Some(a) = engine.achievements().get(*id) {
                                println!("🏆 {} — {}", a.name, a.description);
                            }
                        }
                    }
                    Err(err) => eprintln!("error: {err}"),
                }
            }
            ["stats"] => print_dashboard(&engine),
            ["theme", name] => match parse_theme(name) {
                Some(theme) => match engine.set_theme(theme) {
                    Ok(_) => print_dashboard(&engine),
                    Err(err) => eprintln!("error: {err}"),
                },
                None => eprintln!("unknown theme '{name}'"),
            },
            ["levels"] => {
                for level in engine.levels(engine.theme()) {
                    let view = retro_recall::engine_for(level.theme).level_view(level);
                    let marker = if level.completed {
                        "✓"
                    } else if level.unlocked {
                        "·"
                    } else {
                        "🔒"
                    };
                    println!("{marker} {} [{}]", view.banner, level.id);
                }
            }
            ["complete", id, percent] => match percent.parse::<f64>() {
                Ok(pct) => match engine.complete_level(id, pct / 100.0, now) {
                    Ok(report) => {
                        println!("+{} currency", report.reward.currency);
                        if let Some(kind) = report.reward.powerup {
                            println!("★ reward: {}", kind.meta().name);
                        }
                    }
                    Err(err) => eprintln!("error: {err}"),
                },
                Err(_) => eprintln!("usage: complete <id> <percent>"),
            },
            ["powerups"] => {
                for p in engine.powerups().inventory() {
                    println!("{} x{} [{}]", p.kind.meta().name, p.quantity, p.id);
                }
                for a in engine.powerups().active() {
                    println!("⏳ {} — {:.0}s left", a.kind.meta().name, a.remaining_secs);
                }
            }
            ["use", id] => match engine.activate_powerup(id, now) {
                Ok(Activation::Instant(kind)) => println!("used {}", kind.meta().name),
                Ok(Activation::Timed(active)) => {
                    println!("{} active for {}s", active.kind.meta().name, active.duration_secs)
                }
                Err(err) => eprintln!("error: {err}"),
            },
            ["shop"] => {
                for item in retro_recall::shop_catalog() {
                    let owned = if engine.ledger().owns(item.id) { " (owned)" } else { "" };
                    println!("{} — {} coins [{}]{owned}", item.name, item.price, item.id);
                }
            }
            ["buy", id] => match engine.unlock_item(id, now) {
                Ok(item) => println!("bought {}", item.name),
                Err(err) => eprintln!("error: {err}"),
            },
            ["export"] => match engine.export_json() {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("error: {err}"),
            },
            ["reset"] => match engine.reset_session() {
                Ok(_) => println!("new session started"),
                Err(err) => eprintln!("error: {err}"),
            },
            _ => eprintln!("unknown command; type 'help'"),
        }
    }

    engine.shutdown().context("failed to save on exit")?;
    Ok(())
}

fn parse_theme(name: &str) -> Option<Theme> {
    Theme::ALL.into_iter().find(|t| t.key() == name)
}

fn print_dashboard(engine: &GameEngine) {
    let stats = engine.dashboard();
    println!("{}", stats.headline);
    println!(
        "  points {} | streak {} | health {}% | {} {} | balance {}",
        stats.points,
        stats.streak,
        stats.health_percent,
        stats.collectible_label,
        stats.collectible_count,
        engine.balance()
    );
}
