//! The chain of words exchanged so far.

use super::error::TurnError;
use super::types::TurnRecord;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Case-normalizes a word: surrounding whitespace trimmed, lowercased.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Chain history plus the set of words that may no longer be played.
///
/// Every word in the history appears exactly once in the used set, and the
/// last word is always the most recent history entry.
#[derive(Debug, Clone, Default)]
pub struct ChainState {
    last_word: Option<String>,
    used_words: HashSet<String>,
    history: Vec<TurnRecord>,
}

impl ChainState {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently played word, if the chain has started.
    pub fn last_word(&self) -> Option<&str> {
        self.last_word.as_deref()
    }

    /// Every accepted word in play order.
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Used words in the order they were played.
    pub fn used_words(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|record| record.word().as_str())
    }

    /// Number of words in the chain.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether no word has been played yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Whether the (normalized) word has already been played.
    pub fn is_used(&self, word: &str) -> bool {
        self.used_words.contains(word)
    }

    /// The letter the next word must start with.
    pub fn required_letter(&self) -> Option<char> {
        self.last_word.as_deref().and_then(|word| word.chars().last())
    }

    /// Whether `word` may follow the current last word (case-insensitive).
    pub fn follows_chain(&self, word: &str) -> bool {
        match self.required_letter() {
            None => true,
            Some(required) => word
                .chars()
                .next()
                .is_some_and(|first| first.to_lowercase().eq(required.to_lowercase())),
        }
    }

    /// Appends an accepted word.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::DuplicateWord`] if the word is already in the chain.
    #[instrument(skip(self), fields(word = %record.word()))]
    pub fn record(&mut self, record: TurnRecord) -> Result<(), TurnError> {
        if !self.used_words.insert(record.word().clone()) {
            return Err(TurnError::DuplicateWord);
        }
        self.last_word = Some(record.word().clone());
        self.history.push(record);
        debug!(chain_length = self.history.len(), "Word appended to chain");
        Ok(())
    }

    /// Normalizes candidates from a word source and keeps, in source order,
    /// those that start with `letter` and have not been played. Duplicates
    /// within the candidates collapse to their first occurrence.
    pub fn playable_candidates(
        &self,
        letter: char,
        candidates: impl IntoIterator<Item = String>,
    ) -> Vec<String> {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .map(|candidate| normalize(&candidate))
            .filter(|word| {
                word.chars()
                    .next()
                    .is_some_and(|first| first.to_lowercase().eq(letter.to_lowercase()))
            })
            .filter(|word| !self.is_used(word))
            .filter(|word| seen.insert(word.clone()))
            .collect()
    }
}
