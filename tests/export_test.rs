//! Tests for the match summary export.

use tempfile::TempDir;
use word_chain::{
    SUMMARY_TITLE, Speaker, TurnRecord, history_line, render_summary, summary_file_name,
    write_summary,
};

fn history() -> Vec<TurnRecord> {
    vec![
        TurnRecord::new(Speaker::Human, "apple".to_string(), 7),
        TurnRecord::new(Speaker::Opponent, "eagle".to_string(), 0),
        TurnRecord::new(Speaker::Human, "elephant".to_string(), 12),
    ]
}

#[test]
fn test_history_lines() {
    let records = history();
    assert_eq!(history_line(&records[0], "Ada", "Qbit"), "Ada: apple (+7 points)");
    assert_eq!(history_line(&records[1], "Ada", "Qbit"), "Qbit: eagle");
}

#[test]
fn test_render_summary_layout() {
    let summary = render_summary("Ada", "Qbit", &history());
    let expected = format!(
        "{}\n\nPlayer: Ada\n\n1. Ada: apple (+7 points)\n2. Qbit: eagle\n3. Ada: elephant (+12 points)\n",
        SUMMARY_TITLE
    );
    assert_eq!(summary, expected);
}

#[test]
fn test_render_summary_empty_history() {
    let summary = render_summary("Ada", "Qbit", &[]);
    assert_eq!(summary, format!("{}\n\nPlayer: Ada\n\n", SUMMARY_TITLE));
}

#[test]
fn test_summary_file_name() {
    assert_eq!(summary_file_name("Ada"), "ada.txt");
    assert_eq!(summary_file_name(" Ada Lovelace "), "ada-lovelace.txt");
}

#[test]
fn test_write_summary() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_summary(dir.path(), "Ada", "Qbit", &history()).expect("Export failed");
    assert_eq!(path, dir.path().join("ada.txt"));

    let content = std::fs::read_to_string(&path).expect("Read failed");
    assert!(content.starts_with(SUMMARY_TITLE));
    assert!(content.contains("3. Ada: elephant (+12 points)"));
}
