//! Tests for chain bookkeeping and candidate filtering.

use word_chain::{ChainState, Speaker, TurnError, TurnRecord, normalize};

fn human(word: &str, points: u32) -> TurnRecord {
    TurnRecord::new(Speaker::Human, word.to_string(), points)
}

fn opponent(word: &str) -> TurnRecord {
    TurnRecord::new(Speaker::Opponent, word.to_string(), 0)
}

#[test]
fn test_normalize_trims_and_lowercases() {
    assert_eq!(normalize("  Apple \n"), "apple");
    assert_eq!(normalize("   "), "");
}

#[test]
fn test_empty_chain_accepts_any_letter() {
    let chain = ChainState::new();
    assert!(chain.is_empty());
    assert_eq!(chain.required_letter(), None);
    assert!(chain.follows_chain("zebra"));
}

#[test]
fn test_record_updates_last_word_and_history() {
    let mut chain = ChainState::new();
    chain.record(human("apple", 7)).expect("Record failed");
    chain.record(opponent("egg")).expect("Record failed");

    assert_eq!(chain.len(), 2);
    assert_eq!(chain.last_word(), Some("egg"));
    assert_eq!(chain.required_letter(), Some('g'));
    assert_eq!(chain.used_words().collect::<Vec<_>>(), vec!["apple", "egg"]);
    assert_eq!(*chain.history()[0].points_awarded(), 7);
    assert_eq!(*chain.history()[1].speaker(), Speaker::Opponent);
}

#[test]
fn test_record_rejects_duplicates() {
    let mut chain = ChainState::new();
    chain.record(human("apple", 7)).expect("Record failed");
    let result = chain.record(opponent("apple"));
    assert_eq!(result, Err(TurnError::DuplicateWord));
    assert_eq!(chain.len(), 1);
}

#[test]
fn test_follows_chain_is_case_insensitive() {
    let mut chain = ChainState::new();
    chain.record(human("apple", 7)).expect("Record failed");
    assert!(chain.follows_chain("elephant"));
    assert!(chain.follows_chain("Elephant"));
    assert!(!chain.follows_chain("tiger"));
    assert!(!chain.follows_chain(""));
}

#[test]
fn test_playable_candidates_filters_and_keeps_order() {
    let mut chain = ChainState::new();
    chain.record(human("apple", 7)).expect("Record failed");
    chain.record(opponent("egg")).expect("Record failed");
    chain.record(human("goose", 7)).expect("Record failed");

    let candidates = vec![
        "Eagle".to_string(),
        "egg".to_string(),
        "tiger".to_string(),
        "ear".to_string(),
        "eagle".to_string(),
    ];
    let playable = chain.playable_candidates('e', candidates);
    assert_eq!(playable, vec!["eagle", "ear"]);
}

#[test]
fn test_playable_candidates_empty_when_all_used() {
    let mut chain = ChainState::new();
    chain.record(human("eel", 4)).expect("Record failed");
    let playable = chain.playable_candidates('e', vec!["eel".to_string()]);
    assert!(playable.is_empty());
}
