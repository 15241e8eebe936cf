//! Outbound word lookups: the dictionary oracle and the opponent's word source.
//!
//! Both traits are infallible by contract. Implementations fail closed: a
//! dictionary that cannot be reached says the word does not exist, and a
//! word source that cannot be reached returns no candidates.

mod datamuse;
mod dictionary;

pub use datamuse::DatamuseClient;
pub use dictionary::DictionaryApiClient;

use derive_more::{Display, Error};
use tracing::{error, instrument};

/// Decides whether a word is a real word.
#[async_trait::async_trait]
pub trait DictionaryOracle: Send + Sync {
    /// Whether the dictionary has at least one entry for the lowercased word.
    /// Any transport or lookup failure yields `false`.
    async fn check_word_exists(&self, word: &str) -> bool;
}

/// Supplies candidate words for the opponent and for hints.
#[async_trait::async_trait]
pub trait WordSource: Send + Sync {
    /// Up to `limit` candidates starting with `letter`, in the source's own
    /// order. Failures yield an empty list; callers filter used words.
    async fn find_words(&self, letter: char, limit: u32) -> Vec<String>;
}

/// Lookup error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Lookup error: {} at {}:{}", message, file, line)]
pub struct LookupError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LookupError {
    /// Creates a new lookup error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "Lookup error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Parses a configured base URL.
pub(crate) fn parse_base_url(base_url: &str) -> Result<reqwest::Url, LookupError> {
    reqwest::Url::parse(base_url)
        .map_err(|e| LookupError::new(format!("Invalid base URL '{}': {}", base_url, e)))
}

/// Builds the shared HTTP client with a request timeout.
pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LookupError::new(format!("Failed to build HTTP client: {}", e)))
}
