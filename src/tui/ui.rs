//! Stateless UI rendering for the word chain.

use super::app::App;
use crate::export::history_line;
use crate::games::word_chain::{Snapshot, TurnPhase, format_remaining};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Scoreboard
            Constraint::Length(4), // Message
            Constraint::Min(6),    // History + used words
            Constraint::Length(3), // Input
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Word Chain")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let Some(snapshot) = app.snapshot() else {
        let waiting = Paragraph::new("Starting game...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(waiting, chunks[2]);
        return;
    };

    draw_scoreboard(frame, chunks[1], snapshot);
    draw_message(frame, chunks[2], app, snapshot);
    draw_chain(frame, chunks[3], snapshot);
    draw_input(frame, chunks[4], app, snapshot);
    draw_help(frame, chunks[5], snapshot);
}

fn draw_scoreboard(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let clock_style = if snapshot.remaining_seconds <= 5 && snapshot.game_active {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let line = Line::from(vec![
        Span::styled(
            format!("Player: {}", snapshot.player_name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  Difficulty: {}", snapshot.difficulty)),
        Span::raw(format!("  Points: {}", snapshot.points)),
        Span::raw(format!("  Streak: {}", snapshot.streak)),
        Span::raw(format!("  Correct Words: {}", snapshot.correct_word_count)),
        Span::styled(
            format!("  High Score: {}", snapshot.high_score),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("  Time: {}", format_remaining(snapshot.remaining_seconds)),
            clock_style,
        ),
    ]);

    let scoreboard = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(scoreboard, area);
}

fn draw_message(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let mut lines = Vec::new();

    // Validating already carries "Checking word..." in the message.
    let message = match snapshot.phase {
        TurnPhase::OpponentThinking => format!(
            "{} {} is thinking...",
            snapshot.message, snapshot.opponent_name
        ),
        _ => snapshot.message.clone(),
    };
    let message_style = match snapshot.phase {
        TurnPhase::PlayerWin => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        TurnPhase::PlayerLoss => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Yellow),
    };
    lines.push(Line::from(Span::styled(message, message_style)));

    for achievement in app.notifications() {
        lines.push(Line::from(Span::styled(
            format!(
                "Achievement Unlocked: {}! ({})",
                achievement,
                achievement.description()
            ),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(note) = app.status_note() {
        lines.push(Line::from(Span::raw(note.to_string())));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_chain(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let history: Vec<Line> = snapshot
        .history
        .iter()
        .map(|record| {
            Line::from(history_line(
                record,
                &snapshot.player_name,
                &snapshot.opponent_name,
            ))
        })
        .collect();
    // Keep the most recent lines visible.
    let visible = usize::from(columns[0].height.saturating_sub(2));
    let skip = history.len().saturating_sub(visible);
    let history = Paragraph::new(history.into_iter().skip(skip).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title("Game History"));
    frame.render_widget(history, columns[0]);

    let used = if snapshot.used_words.is_empty() {
        "No words used yet".to_string()
    } else {
        snapshot.used_words.join(", ")
    };
    let used = Paragraph::new(used)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Used Words"));
    frame.render_widget(used, columns[1]);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let title = if !snapshot.game_active {
        "Game Over!".to_string()
    } else {
        match snapshot.required_letter {
            Some(letter) => format!(
                "Enter a word starting with '{}'",
                letter.to_uppercase()
            ),
            None => "Enter any word to start the chain".to_string(),
        }
    };
    let input = Paragraph::new(format!("{}_", app.input()))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(input, area);
}

fn draw_help(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let help = if snapshot.game_active {
        "Enter: submit  Tab: hint (-5 points)  Ctrl-N: new game  Esc: quit"
    } else {
        "n: new game  e: export summary  q: quit"
    };
    let paragraph = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
