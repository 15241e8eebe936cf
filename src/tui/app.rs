//! Application state and key handling.

use super::orchestrator::{GameEvent, PlayerCommand};
use crate::games::word_chain::{Achievement, Snapshot, TurnPhase};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long an achievement popup stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond redrawing.
    None,
    /// Forward a command to the orchestrator.
    Send(PlayerCommand),
    /// Write the match summary to disk.
    Export,
    /// Leave the game.
    Quit,
}

/// Main application state.
#[derive(Debug, Default)]
pub struct App {
    snapshot: Option<Snapshot>,
    input: String,
    notifications: Vec<(Achievement, Instant)>,
    status_note: Option<String>,
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest session snapshot, once the orchestrator has published one.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Text typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Achievement popups still on screen.
    pub fn notifications(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.notifications.iter().map(|(achievement, _)| *achievement)
    }

    /// Extra status line from the adapter itself (e.g. export results).
    pub fn status_note(&self) -> Option<&str> {
        self.status_note.as_deref()
    }

    /// Records a note shown under the game message.
    pub fn set_status_note(&mut self, note: impl Into<String>) {
        self.status_note = Some(note.into());
    }

    /// Handles a game event from the orchestrator.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");
        match event {
            GameEvent::StateChanged(snapshot) => self.snapshot = Some(*snapshot),
            GameEvent::AchievementUnlocked(achievement) => {
                self.notifications.push((achievement, Instant::now()));
            }
            GameEvent::GameOver { player_won } => {
                debug!(player_won, "Game over received");
                self.input.clear();
            }
        }
    }

    /// Drops popups older than [`NOTIFICATION_TTL`].
    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications
            .retain(|(_, shown)| now.duration_since(*shown) < NOTIFICATION_TTL);
    }

    fn game_active(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.game_active)
    }

    /// Whether the session would take a submission right now.
    fn accepting_words(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| !s.busy && s.phase == TurnPhase::AwaitingPlayerInput)
    }

    /// Maps a key press to an action.
    ///
    /// While playing: letters edit the word, Enter submits, Tab asks for a
    /// hint, Ctrl-N restarts and Esc quits. After the game ends: `n` starts
    /// a new game, `e` exports the summary and `q` quits.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Action::Quit,
                KeyCode::Char('n') => self.new_game(),
                KeyCode::Char('e') => Action::Export,
                _ => Action::None,
            };
        }

        if !self.game_active() {
            return match key.code {
                KeyCode::Char('n') | KeyCode::Char('N') => self.new_game(),
                KeyCode::Char('e') | KeyCode::Char('E') => Action::Export,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter if !self.accepting_words() => {
                debug!("Lookup in flight, keeping input");
                Action::None
            }
            KeyCode::Enter => {
                let word = std::mem::take(&mut self.input);
                self.status_note = None;
                Action::Send(PlayerCommand::Submit(word))
            }
            KeyCode::Tab => Action::Send(PlayerCommand::Hint),
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::Char(c) if !c.is_control() => {
                self.input.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn new_game(&mut self) -> Action {
        self.input.clear();
        self.notifications.clear();
        self.status_note = None;
        Action::Send(PlayerCommand::NewGame)
    }
}
