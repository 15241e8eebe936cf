//! Tests for the key-value stores and the high score book.

use tempfile::TempDir;
use word_chain::{HIGH_SCORE_KEY, HighScoreBook, JsonFileStore, KeyValueStore, MemoryStore};

#[test]
fn test_memory_store_clones_share_entries() {
    let store = MemoryStore::new();
    let mut writer = store.clone();
    writer.set("k", "v").expect("Write failed");
    assert_eq!(store.get("k").expect("Read failed").as_deref(), Some("v"));
    assert_eq!(store.get("missing").expect("Read failed"), None);
}

#[test]
fn test_json_store_missing_file_reads_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::new(dir.path().join("store.json"));
    assert_eq!(store.get(HIGH_SCORE_KEY).expect("Read failed"), None);
}

#[test]
fn test_json_store_creates_parent_dirs_and_persists() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("store.json");

    let mut store = JsonFileStore::new(&path);
    store.set(HIGH_SCORE_KEY, "42").expect("Write failed");
    store.set("other", "value").expect("Write failed");

    let reopened = JsonFileStore::new(&path);
    assert_eq!(
        reopened.get(HIGH_SCORE_KEY).expect("Read failed").as_deref(),
        Some("42")
    );
    assert_eq!(
        reopened.get("other").expect("Read failed").as_deref(),
        Some("value")
    );
}

#[test]
fn test_json_store_rejects_corrupt_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");
    std::fs::write(&path, "not json").expect("Write failed");

    let store = JsonFileStore::new(&path);
    assert!(store.get(HIGH_SCORE_KEY).is_err());
}

#[test]
fn test_high_score_book_defaults_to_zero() {
    let book = HighScoreBook::new(MemoryStore::new());
    assert_eq!(book.load(), 0);
}

#[test]
fn test_high_score_book_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");

    let mut book = HighScoreBook::new(JsonFileStore::new(&path));
    book.record(27);

    let reopened = HighScoreBook::new(JsonFileStore::new(&path));
    assert_eq!(reopened.load(), 27);
}

#[test]
fn test_high_score_book_corrupt_file_reads_zero() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{{{").expect("Write failed");

    let book = HighScoreBook::new(JsonFileStore::new(&path));
    assert_eq!(book.load(), 0);
}

#[test]
fn test_high_score_book_reset() {
    let store = MemoryStore::with_entry(HIGH_SCORE_KEY, "99");
    let mut book = HighScoreBook::new(store.clone());
    assert_eq!(book.load(), 99);

    book.reset().expect("Reset failed");
    assert_eq!(book.load(), 0);
    assert_eq!(
        store.get(HIGH_SCORE_KEY).expect("Read failed").as_deref(),
        Some("0")
    );
}
