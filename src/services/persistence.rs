//! Persistence adapter: a key-value state capability plus a debounced
//! writer that coalesces bursts of mutations into one write.
//!
//! The capability is a trait so the shell can run against a durable file
//! store, fall back to a purely in-memory store when no data directory is
//! available, and tests can substitute a fake.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::types::errors::PersistenceError;
use crate::types::state::BrowserState;

/// Key under which the shell state blob is stored.
pub const STATE_KEY: &str = "browser_state";

/// Quiet period after the last mutation before the state is written.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Key-value persistence capability.
pub trait StateStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// File-backed store: one `<key>.json` per key under a data directory.
/// Writes go through a temp file and rename so a crash mid-write never
/// leaves a truncated state file.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: PathBuf) -> Result<Self, PersistenceError> {
        fs::create_dir_all(&dir).map_err(|e| PersistenceError::Io(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStore for FileStateStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| PersistenceError::Io(e.to_string()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(|e| PersistenceError::Io(e.to_string()))?;
        if fs::rename(&tmp, &path).is_err() {
            // Rename can fail across filesystems; fall back to a plain write.
            fs::write(&path, value).map_err(|e| PersistenceError::Io(e.to_string()))?;
        }
        Ok(())
    }
}

/// In-memory store: the local fallback and the unit-test double.
#[derive(Default)]
pub struct MemoryStateStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Trailing-debounce writer over a `StateStore`.
///
/// `schedule` replaces any pending payload and restamps the clock;
/// `flush_due` (pumped from the event loop) writes once the quiet period
/// has elapsed; `flush` forces the write at shutdown. A crash between
/// mutation and flush loses at most the debounce window.
pub struct DebouncedStateWriter {
    store: Box<dyn StateStore>,
    delay: Duration,
    pending: Option<(String, Instant)>,
    writes: u64,
}

impl DebouncedStateWriter {
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self::with_delay(store, SAVE_DEBOUNCE)
    }

    pub fn with_delay(store: Box<dyn StateStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: None,
            writes: 0,
        }
    }

    pub fn store(&self) -> &dyn StateStore {
        self.store.as_ref()
    }

    pub fn schedule(&mut self, payload: String) {
        self.pending = Some((payload, Instant::now()));
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of writes that actually reached the store.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Writes the pending payload if the quiet period has elapsed.
    pub fn flush_due(&mut self) {
        let due = match &self.pending {
            Some((_, at)) => at.elapsed() >= self.delay,
            None => false,
        };
        if due {
            self.flush();
        }
    }

    /// Writes any pending payload immediately.
    pub fn flush(&mut self) {
        if let Some((payload, _)) = self.pending.take() {
            match self.store.write(STATE_KEY, &payload) {
                Ok(()) => self.writes += 1,
                Err(e) => warn!(error = %e, "failed to persist state"),
            }
        }
    }
}

/// Loads the persisted state. Absent or corrupt payloads log and return
/// `None`; the caller falls back to a single default tab.
pub fn load_state(store: &dyn StateStore) -> Option<BrowserState> {
    let payload = match store.read(STATE_KEY) {
        Ok(Some(p)) => p,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "failed to read persisted state");
            return None;
        }
    };
    match serde_json::from_str::<BrowserState>(&payload) {
        Ok(state) => Some(state),
        Err(e) => {
            warn!(error = %e, "persisted state is corrupt, starting fresh");
            None
        }
    }
}
