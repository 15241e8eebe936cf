//! Shared fakes for the word chain tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::time::Duration;
use word_chain::{
    DictionaryOracle, GameSession, HighScoreBook, MemoryStore, SessionSettings, WordSource,
};

/// Dictionary that knows a fixed set of words, optionally answering slowly.
#[derive(Debug, Clone, Default)]
pub struct FakeOracle {
    words: HashSet<String>,
    delay: Option<Duration>,
}

impl FakeOracle {
    pub fn new(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait::async_trait]
impl DictionaryOracle for FakeOracle {
    async fn check_word_exists(&self, word: &str) -> bool {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.words.contains(word)
    }
}

/// Word source answering from a fixed letter-to-words table, in table order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    words: HashMap<char, Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, letter: char, words: &[&str]) -> Self {
        self.words
            .insert(letter, words.iter().map(|w| w.to_string()).collect());
        self
    }
}

#[async_trait::async_trait]
impl WordSource for ScriptedSource {
    async fn find_words(&self, letter: char, limit: u32) -> Vec<String> {
        self.words
            .get(&letter)
            .map(|words| words.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default()
    }
}

/// Settings with a recognizable player name.
pub fn settings() -> SessionSettings {
    SessionSettings {
        player_name: "Ada".to_string(),
        ..SessionSettings::default()
    }
}

/// A fresh session backed by an in-memory store, plus a handle on the store.
pub fn new_session(settings: SessionSettings) -> (GameSession, MemoryStore) {
    let store = MemoryStore::new();
    let session = GameSession::new(settings, HighScoreBook::new(store.clone()));
    (session, store)
}

/// Submits a word and accepts it, returning the opponent ticket.
pub fn play_accepted(session: &mut GameSession, word: &str) -> word_chain::OpponentRequest {
    let request = session
        .submit(word)
        .expect("Submission rejected")
        .expect("Submission ignored");
    session
        .resolve_validation(request, true)
        .expect("Word rejected")
        .expect("Stale validation")
}
