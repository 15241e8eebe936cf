//! Game configuration.

use crate::games::word_chain::{Difficulty, SessionSettings};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "WORD_CHAIN_CONFIG";

/// Config file used when neither `--config` nor the environment names one.
pub const DEFAULT_CONFIG_FILE: &str = "word_chain.toml";

/// Configuration for a game, read from TOML. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Human player's name.
    player_name: String,

    /// Opponent display name.
    opponent_name: String,

    /// Difficulty (easy, normal or hard).
    difficulty: Difficulty,

    /// Seconds per turn before difficulty scaling.
    base_time_limit_secs: u32,

    /// Dictionary API base URL; the word is appended as a path segment.
    dictionary_url: String,

    /// Word source API base URL.
    word_source_url: String,

    /// Candidates requested when the opponent searches for a reply.
    opponent_candidate_limit: u32,

    /// Candidates requested for a hint.
    hint_candidate_limit: u32,

    /// Timeout for each HTTP request.
    request_timeout_secs: u64,

    /// High score store location. Defaults to the platform config dir.
    store_path: Option<PathBuf>,

    /// Log file for the terminal UI.
    log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        let session = SessionSettings::default();
        Self {
            player_name: session.player_name,
            opponent_name: session.opponent_name,
            difficulty: session.difficulty,
            base_time_limit_secs: session.base_time_limit_secs,
            dictionary_url: "https://api.dictionaryapi.dev/api/v2/entries/en".to_string(),
            word_source_url: "https://api.datamuse.com/words".to_string(),
            opponent_candidate_limit: session.opponent_candidate_limit,
            hint_candidate_limit: session.hint_candidate_limit,
            request_timeout_secs: 10,
            store_path: None,
            log_file: PathBuf::from("word_chain.log"),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(player = %config.player_name, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolves the config file: an explicit path must exist; otherwise
    /// [`CONFIG_ENV_VAR`] or [`DEFAULT_CONFIG_FILE`] is used if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the chosen file cannot be read or parsed.
    #[instrument]
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = std::env::var_os(CONFIG_ENV_VAR)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
                Self::load_or_default(path)
            }
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for empty names, a zero time limit or zero
    /// candidate limits.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_name.trim().is_empty() {
            return Err(ConfigError::new("Player name must not be empty".to_string()));
        }
        if self.opponent_name.trim().is_empty() {
            return Err(ConfigError::new(
                "Opponent name must not be empty".to_string(),
            ));
        }
        if self.base_time_limit_secs == 0 {
            return Err(ConfigError::new(
                "Time limit must be at least one second".to_string(),
            ));
        }
        if self.opponent_candidate_limit == 0 || self.hint_candidate_limit == 0 {
            return Err(ConfigError::new(
                "Candidate limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Store location: the configured path, else the platform default.
    pub fn resolved_store_path(&self) -> Option<PathBuf> {
        self.store_path
            .clone()
            .or_else(crate::storage::JsonFileStore::default_path)
    }

    /// Session settings derived from this config.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            player_name: self.player_name.trim().to_string(),
            opponent_name: self.opponent_name.trim().to_string(),
            difficulty: self.difficulty,
            base_time_limit_secs: self.base_time_limit_secs,
            opponent_candidate_limit: self.opponent_candidate_limit,
            hint_candidate_limit: self.hint_candidate_limit,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
