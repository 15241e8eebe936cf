//! Terminal UI: a thin adapter that forwards key presses to the
//! orchestrator and renders the snapshots it publishes.

mod app;
mod orchestrator;
mod ui;

pub use app::{Action, App, NOTIFICATION_TTL};
pub use orchestrator::{GameEvent, Orchestrator, PlayerCommand};
pub use ui::draw;

use crate::export::write_summary;
use crate::games::word_chain::GameSession;
use crate::lookup::{DictionaryOracle, WordSource};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// Runs the terminal game until the player quits.
///
/// Tracing should already be routed away from the terminal.
#[instrument(skip_all)]
pub async fn run_tui(
    session: GameSession,
    oracle: Arc<dyn DictionaryOracle>,
    source: Arc<dyn WordSource>,
) -> Result<()> {
    info!("Starting word chain TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let orchestrator = Orchestrator::spawn(session, oracle, source, command_rx, event_tx);

    let res = run_app(&mut terminal, App::new(), command_tx, &mut event_rx).await;

    match orchestrator.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "Orchestrator ended with error"),
        Err(e) => warn!(error = %e, "Orchestrator task failed"),
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    command_tx: mpsc::UnboundedSender<PlayerCommand>,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    loop {
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }
        app.prune_notifications(Instant::now());

        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(50))? {
            tokio::task::yield_now().await;
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Action::None => {}
            Action::Send(command) => {
                if command_tx.send(command).is_err() {
                    anyhow::bail!("Orchestrator stopped");
                }
            }
            Action::Export => export(&mut app),
            Action::Quit => {
                info!("User quit");
                // The orchestrator may already be gone after an error.
                let _ = command_tx.send(PlayerCommand::Quit);
                return Ok(());
            }
        }
    }
}

fn export(app: &mut App) {
    let Some(snapshot) = app.snapshot() else {
        return;
    };
    let note = match write_summary(
        ".",
        &snapshot.player_name,
        &snapshot.opponent_name,
        &snapshot.history,
    ) {
        Ok(path) => format!("Summary saved to {}", path.display()),
        Err(e) => {
            warn!(error = %e, "Export failed");
            format!("Export failed: {}", e)
        }
    };
    app.set_status_note(note);
}
