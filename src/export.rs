//! Plain-text match summary.

use crate::games::word_chain::{Speaker, TurnRecord};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Title line of every summary.
pub const SUMMARY_TITLE: &str = "Word Chain Game - Match Summary";

/// One history line, e.g. `"Ada: apple (+7 points)"` or `"Qbit: egg"`.
pub fn history_line(record: &TurnRecord, player_name: &str, opponent_name: &str) -> String {
    match record.speaker() {
        Speaker::Human => format!(
            "{}: {} (+{} points)",
            player_name,
            record.word(),
            record.points_awarded()
        ),
        Speaker::Opponent => format!("{}: {}", opponent_name, record.word()),
    }
}

/// Renders the summary: title, player line, then the numbered chain.
pub fn render_summary(player_name: &str, opponent_name: &str, history: &[TurnRecord]) -> String {
    let mut summary = format!("{}\n\nPlayer: {}\n\n", SUMMARY_TITLE, player_name);
    for (index, record) in history.iter().enumerate() {
        summary.push_str(&format!(
            "{}. {}\n",
            index + 1,
            history_line(record, player_name, opponent_name)
        ));
    }
    summary
}

/// File name for a player's summary: lowercased, whitespace replaced by `-`.
pub fn summary_file_name(player_name: &str) -> String {
    let stem: String = player_name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect::<String>()
        .to_lowercase();
    format!("{}.txt", stem)
}

/// Writes the summary into `dir` and returns the file path.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
#[instrument(skip(history), fields(dir = %dir.as_ref().display(), words = history.len()))]
pub fn write_summary(
    dir: impl AsRef<Path>,
    player_name: &str,
    opponent_name: &str,
    history: &[TurnRecord],
) -> std::io::Result<PathBuf> {
    let path = dir.as_ref().join(summary_file_name(player_name));
    std::fs::write(&path, render_summary(player_name, opponent_name, history))?;
    info!(path = %path.display(), "Match summary exported");
    Ok(path)
}
