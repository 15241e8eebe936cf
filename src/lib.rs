//! Word Chain library - a word-chain game against a computer opponent.
//!
//! The human and the opponent take turns supplying words; each must start
//! with the last letter of the previous word and may appear only once. Words
//! are checked against a public dictionary, the opponent draws its replies
//! from a public word-finding API, and every human turn runs against a clock.
//!
//! # Architecture
//!
//! - **Games**: the turn state machine ([`GameSession`]), scoring, streaks,
//!   achievements and the turn clock. Pure logic, no I/O.
//! - **Lookup**: the [`DictionaryOracle`] and [`WordSource`] collaborators and
//!   their HTTP clients.
//! - **Storage**: the persisted high score behind a [`KeyValueStore`].
//! - **TUI**: the terminal adapter and the [`Orchestrator`] that wires the
//!   session to lookups and the clock.
//!
//! # Example
//!
//! ```no_run
//! use word_chain::{GameSession, HighScoreBook, MemoryStore, SessionSettings};
//!
//! let mut session = GameSession::new(
//!     SessionSettings::default(),
//!     HighScoreBook::new(MemoryStore::new()),
//! );
//! if let Ok(Some(request)) = session.submit("apple") {
//!     // Look the word up, then report back.
//!     let _opponent = session.resolve_validation(request, true);
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod export;
mod games;
mod lookup;
mod storage;
mod tui;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{CONFIG_ENV_VAR, ConfigError, DEFAULT_CONFIG_FILE, GameConfig};

// Crate-level exports - Export
pub use export::{
    SUMMARY_TITLE, history_line, render_summary, summary_file_name, write_summary,
};

// Crate-level exports - Game types
pub use games::word_chain::{
    Achievement, AchievementTracker, Award, ChainState, Countdown, Difficulty, GameSession,
    HINT_COST, HintRequest, LONG_WORD_THRESHOLD, MAX_HINTS, OpponentRequest,
    STREAK_BONUS_THRESHOLD, STREAK_MASTER_THRESHOLD, ScoreState, SessionSettings, Snapshot,
    Speaker, TimerTick, TurnError, TurnPhase, TurnRecord, TurnTimer, ValidationRequest,
    format_remaining, normalize, streak_bonus,
};

// Crate-level exports - Lookups
pub use lookup::{DatamuseClient, DictionaryApiClient, DictionaryOracle, LookupError, WordSource};

// Crate-level exports - Storage
pub use storage::{
    HIGH_SCORE_KEY, HighScoreBook, JsonFileStore, KeyValueStore, MemoryStore, StoreError,
};

// Crate-level exports - TUI
pub use tui::{
    Action, App, GameEvent, NOTIFICATION_TTL, Orchestrator, PlayerCommand, draw, run_tui,
};
