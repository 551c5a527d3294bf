//! Durable persistence for profile state.
//!
//! All records live in one directory and are written atomically: encode to
//! a temporary file, flush, then rename over the target. Writes retry a
//! bounded number of times with backoff; a write that still fails is queued
//! in memory and retried on the next flush, so gameplay continues through
//! transient storage trouble. A record that fails its decode or integrity
//! check on load is treated as corrupt, backed up, and replaced with
//! defaults rather than crashing the profile.

pub mod state;

pub use state::{GameState, ReviewRecord, STATE_VERSION, ThemeRecord};

use config::GameConfig;
use error::EngineError;
use log::{info, warn};
use progression::ProgressionState;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const STATE_FILE: &str = "state.sav";
const PROGRESSION_FILE: &str = "progression.sav";
const THEME_FILE: &str = "theme.sav";
const SETTINGS_FILE: &str = "settings.sav";
const REVIEWS_FILE: &str = "reviews.log";

const WRITE_ATTEMPTS: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_millis(10);

/// How a save request ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// On disk now.
    Committed,
    /// Write failed after retries; held in memory for the next flush.
    Queued,
}

/// Result of loading a profile.
#[derive(Debug)]
pub struct LoadOutcome {
    pub state: GameState,
    /// True when a corrupt record was backed up and replaced with defaults.
    pub recovered: bool,
}

pub struct Store {
    dir: PathBuf,
    /// Latest unwritten bytes per file; newer saves replace older ones.
    pending: BTreeMap<PathBuf, Vec<u8>>,
}

impl Store {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, EngineError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            pending: BTreeMap::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    // --- full state ---

    pub fn save_state(&mut self, state: &GameState) -> Result<Persistence, EngineError> {
        self.save_record(STATE_FILE, state)
    }

    /// Load the main record. `Ok(None)` when no save exists yet;
    /// [`EngineError::Corruption`] when one exists but fails to decode or
    /// validate.
    pub fn load_state(&self) -> Result<Option<GameState>, EngineError> {
        let mut state: GameState = match self.load_record(STATE_FILE)? {
            Some(state) => state,
            None => return Ok(None),
        };
        state.migrate();
        state.validate()?;
        Ok(Some(state))
    }

    /// Load the profile, falling back to defaults on corruption. The bad
    /// file is renamed aside for inspection, never deleted. The hot
    /// progression record and theme record overlay the main one when they
    /// carry newer data.
    pub fn load_or_recover(&mut self) -> Result<LoadOutcome, EngineError> {
        let (mut state, recovered) = match self.load_state() {
            Ok(Some(state)) => (state, false),
            Ok(None) => (GameState::default(), false),
            Err(EngineError::Corruption(reason)) => {
                warn!("state record corrupt ({reason}); restoring defaults");
                self.backup_corrupt(STATE_FILE)?;
                (GameState::default(), true)
            }
            Err(err) => return Err(err),
        };

        match self.load_progression() {
            Ok(Some(progression))
                if progression.total_cards_reviewed > state.progression.total_cards_reviewed =>
            {
                info!("progression record is newer than the main save; overlaying");
                state.progression = progression;
            }
            Ok(_) => {}
            Err(err) => warn!("ignoring unreadable progression record: {err}"),
        }

        match self.load_theme() {
            Ok(Some(record)) => {
                state.theme = record.theme;
                state.theme_states = record.states;
            }
            Ok(None) => {}
            Err(err) => warn!("ignoring unreadable theme record: {err}"),
        }

        state.validate()?;
        Ok(LoadOutcome { state, recovered })
    }

    // --- partial records ---

    pub fn save_progression(&mut self, p: &ProgressionState) -> Result<Persistence, EngineError> {
        self.save_record(PROGRESSION_FILE, p)
    }

    pub fn load_progression(&self) -> Result<Option<ProgressionState>, EngineError> {
        match self.load_record::<ProgressionState>(PROGRESSION_FILE)? {
            Some(p) => {
                p.validate()?;
                Ok(Some(p))
            }
            None => Ok(None),
        }
    }

    pub fn save_theme(&mut self, record: &ThemeRecord) -> Result<Persistence, EngineError> {
        self.save_record(THEME_FILE, record)
    }

    pub fn load_theme(&self) -> Result<Option<ThemeRecord>, EngineError> {
        self.load_record(THEME_FILE)
    }

    pub fn save_settings(&mut self, cfg: &GameConfig) -> Result<Persistence, EngineError> {
        self.save_record(SETTINGS_FILE, cfg)
    }

    pub fn load_settings(&self) -> Result<Option<GameConfig>, EngineError> {
        match self.load_record::<GameConfig>(SETTINGS_FILE)? {
            Some(cfg) => {
                cfg.validate()?;
                Ok(Some(cfg))
            }
            None => Ok(None),
        }
    }

    /// Load settings, falling back to defaults when the record is corrupt
    /// or fails validation. The bad file is renamed aside like a corrupt
    /// main record; a broken settings file never blocks the profile.
    pub fn load_settings_or_recover(&mut self) -> Result<GameConfig, EngineError> {
        match self.load_settings() {
            Ok(Some(cfg)) => Ok(cfg),
            Ok(None) => Ok(GameConfig::default()),
            Err(EngineError::Corruption(reason)) | Err(EngineError::Validation(reason)) => {
                warn!("settings record unusable ({reason}); restoring defaults");
                self.backup_corrupt(SETTINGS_FILE)?;
                Ok(GameConfig::default())
            }
            Err(err) => Err(err),
        }
    }

    // --- review audit log ---

    /// Append one line to the JSONL review log.
    pub fn append_review(&self, record: &ReviewRecord) -> Result<(), EngineError> {
        let line = serde_json::to_string(record)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(REVIEWS_FILE))?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    // --- JSON export / import ---

    pub fn export_json(state: &GameState) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(state)?)
    }

    /// Parse and fully validate an exported profile. Nothing is applied on
    /// failure.
    pub fn import_json(json: &str) -> Result<GameState, EngineError> {
        let mut state: GameState = serde_json::from_str(json)?;
        state.migrate();
        state.validate()?;
        Ok(state)
    }

    // --- pending queue ---

    /// Retry every queued write. Stops at the first file that still fails,
    /// leaving it and the rest queued. Returns how many committed.
    pub fn flush_pending(&mut self) -> Result<usize, EngineError> {
        let mut flushed = 0;
        while let Some((path, bytes)) = self.pending.pop_first() {
            if let Err(err) = write_atomic(&path, &bytes) {
                self.pending.insert(path, bytes);
                if flushed > 0 {
                    warn!("pending flush stopped early: {err}");
                    return Ok(flushed);
                }
                return Err(err);
            }
            flushed += 1;
        }
        Ok(flushed)
    }

    // --- internals ---

    fn save_record<T: Serialize>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<Persistence, EngineError> {
        let bytes = bincode::serde::encode_to_vec(value, bincode::config::standard())?;
        let path = self.dir.join(name);
        match write_atomic(&path, &bytes) {
            Ok(()) => {
                self.pending.remove(&path);
                Ok(Persistence::Committed)
            }
            Err(err) => {
                warn!("write of {name} failed after retries, queueing: {err}");
                self.pending.insert(path, bytes);
                Ok(Persistence::Queued)
            }
        }
    }

    fn load_record<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, EngineError> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let (value, _) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
        Ok(Some(value))
    }

    fn backup_corrupt(&self, name: &str) -> Result<(), EngineError> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(());
        }
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let backup = self.dir.join(format!("{name}.corrupt-{stamp}"));
        fs::rename(&path, &backup)?;
        warn!("backed up corrupt record to {}", backup.display());
        Ok(())
    }
}

/// Write-to-temp then rename, with bounded retries and backoff.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), EngineError> {
    let temp = path.with_extension("tmp");
    let mut last_err = None;
    for attempt in 0..WRITE_ATTEMPTS {
        if attempt > 0 {
            std::thread::sleep(BACKOFF_BASE * 2u32.pow(attempt - 1));
        }
        match try_write(&temp, path, bytes) {
            Ok(()) => return Ok(()),
            Err(err) => {
                warn!(
                    "write attempt {}/{WRITE_ATTEMPTS} for {} failed: {err}",
                    attempt + 1,
                    path.display()
                );
                last_err = Some(err);
            }
        }
    }
    Err(EngineError::TransientStorage(
        last_err.map(|e| e.to_string()).unwrap_or_default(),
    ))
}

fn try_write(temp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(temp)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()?;
    fs::rename(temp, path)
}
