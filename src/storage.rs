//! Durable key-value storage for the high score.

use derive_more::{Display, Error};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, instrument, warn};

/// Storage slot holding the best score on this device.
pub const HIGH_SCORE_KEY: &str = "wordChainHighScore";

/// A string key-value store.
pub trait KeyValueStore: Send {
    /// Reads a value. Missing keys yield `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store.
///
/// Clones share the same entries, so a test can keep a handle while a
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::new(format!("Memory store poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::new(format!("Memory store poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// Every write rewrites the whole file; other keys in it are preserved.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at `path`. The file is created on first write.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        debug!("Opening JSON file store");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<config dir>/word_chain/store.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("word_chain").join("store.json"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            StoreError::new(format!(
                "Failed to read store {}: {}",
                self.path.display(),
                e
            ))
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StoreError::new(format!(
                "Failed to parse store {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| StoreError::new(format!("Failed to encode store: {}", e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            StoreError::new(format!(
                "Failed to write store {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(key, "Store entry written");
        Ok(())
    }
}

/// The high score slot of a [`KeyValueStore`].
pub struct HighScoreBook {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for HighScoreBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScoreBook").finish_non_exhaustive()
    }
}

impl HighScoreBook {
    /// Wraps a store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Reads the persisted high score.
    ///
    /// Missing, unreadable or non-numeric values count as 0.
    #[instrument(skip(self))]
    pub fn load(&self) -> u32 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(value)) => value.trim().parse().unwrap_or_else(|e| {
                warn!(value = %value, error = %e, "Ignoring malformed high score");
                0
            }),
            Ok(None) => {
                debug!("No high score stored yet");
                0
            }
            Err(e) => {
                warn!(error = %e, "Failed to read high score");
                0
            }
        }
    }

    /// Persists a new high score. Failures are logged and otherwise ignored,
    /// so play continues with the in-memory value.
    #[instrument(skip(self))]
    pub fn record(&mut self, score: u32) {
        match self.store.set(HIGH_SCORE_KEY, &score.to_string()) {
            Ok(()) => info!(score, "High score saved"),
            Err(e) => warn!(error = %e, score, "Failed to save high score"),
        }
    }

    /// Clears the high score back to 0.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.set(HIGH_SCORE_KEY, "0")?;
        info!("High score reset");
        Ok(())
    }
}

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Store error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
