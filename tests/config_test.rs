//! Tests for configuration loading and validation.

use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use word_chain::{Difficulty, GameConfig};

#[test]
fn test_defaults() {
    let config = GameConfig::default();
    assert_eq!(config.player_name(), "Player");
    assert_eq!(config.opponent_name(), "Qbit");
    assert_eq!(*config.difficulty(), Difficulty::Normal);
    assert_eq!(*config.base_time_limit_secs(), 30);
    assert_eq!(
        config.dictionary_url(),
        "https://api.dictionaryapi.dev/api/v2/entries/en"
    );
    assert_eq!(config.word_source_url(), "https://api.datamuse.com/words");
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("word_chain.toml");
    std::fs::write(
        &path,
        r#"
player_name = "Ada"
difficulty = "hard"
base_time_limit_secs = 45
"#,
    )
    .expect("Write failed");

    let config = GameConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.player_name(), "Ada");
    assert_eq!(*config.difficulty(), Difficulty::Hard);
    assert_eq!(*config.base_time_limit_secs(), 45);
    assert_eq!(config.opponent_name(), "Qbit");

    let settings = config.session_settings();
    assert_eq!(settings.player_name, "Ada");
    assert_eq!(settings.difficulty.time_limit(settings.base_time_limit_secs), 31);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("word_chain.toml");
    std::fs::write(&path, "difficulty = \"impossible\"").expect("Write failed");

    let result = GameConfig::from_file(&path);
    assert!(result.is_err());
}

#[test]
fn test_load_or_default_without_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config =
        GameConfig::load_or_default(dir.path().join("absent.toml")).expect("Load failed");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_explicit_path_must_exist() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("absent.toml");
    assert!(GameConfig::resolve(Some(missing.as_path())).is_err());
}

#[test]
fn test_validate_rejects_bad_values() {
    let blank = GameConfig::default().with_player_name("  ".to_string());
    assert!(blank.validate().is_err());

    let no_time = GameConfig::default().with_base_time_limit_secs(0);
    assert!(no_time.validate().is_err());

    let no_candidates = GameConfig::default().with_hint_candidate_limit(0);
    assert!(no_candidates.validate().is_err());
}

#[test]
fn test_store_path_override() {
    let config = GameConfig::default().with_store_path(Some(PathBuf::from("/tmp/scores.json")));
    assert_eq!(
        config.resolved_store_path(),
        Some(PathBuf::from("/tmp/scores.json"))
    );
}

#[test]
fn test_session_settings_trim_names() {
    let config = GameConfig::default()
        .with_player_name("  Grace ".to_string())
        .with_difficulty(Difficulty::Easy);
    let settings = config.session_settings();
    assert_eq!(settings.player_name, "Grace");
    assert_eq!(settings.difficulty, Difficulty::Easy);
    assert_eq!(settings.opponent_candidate_limit, 100);
    assert_eq!(settings.hint_candidate_limit, 5);
}
