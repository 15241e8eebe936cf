//! Tests for the orchestrator loop, on tokio's paused clock.

mod common;

use common::{FakeOracle, ScriptedSource, new_session, settings};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use word_chain::{
    Achievement, GameEvent, Orchestrator, PlayerCommand, SessionSettings, Snapshot, TurnPhase,
};

struct Harness {
    commands: mpsc::UnboundedSender<PlayerCommand>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    handle: JoinHandle<anyhow::Result<()>>,
}

fn start(settings: SessionSettings, oracle: FakeOracle, source: ScriptedSource) -> Harness {
    let (session, _store) = new_session(settings);
    let (commands, command_rx) = mpsc::unbounded_channel();
    let (event_tx, events) = mpsc::unbounded_channel();
    let handle = Orchestrator::spawn(
        session,
        Arc::new(oracle),
        Arc::new(source),
        command_rx,
        event_tx,
    );
    Harness {
        commands,
        events,
        handle,
    }
}

impl Harness {
    /// Waits for the next event, failing after a minute of game time.
    async fn next_event(&mut self) -> GameEvent {
        tokio::time::timeout(Duration::from_secs(60), self.events.recv())
            .await
            .expect("Timed out waiting for event")
            .expect("Event channel closed")
    }

    /// Waits for a snapshot satisfying the predicate.
    async fn snapshot_where(&mut self, predicate: impl Fn(&Snapshot) -> bool) -> Snapshot {
        loop {
            if let GameEvent::StateChanged(snapshot) = self.next_event().await {
                if predicate(&snapshot) {
                    return *snapshot;
                }
            }
        }
    }

    /// Waits for the game-over event.
    async fn game_over(&mut self) -> bool {
        loop {
            if let GameEvent::GameOver { player_won } = self.next_event().await {
                return player_won;
            }
        }
    }

    async fn quit(self) {
        self.commands
            .send(PlayerCommand::Quit)
            .expect("Orchestrator gone");
        self.handle
            .await
            .expect("Orchestrator panicked")
            .expect("Orchestrator failed");
    }
}

#[tokio::test(start_paused = true)]
async fn test_publishes_initial_snapshot() {
    let mut harness = start(settings(), FakeOracle::default(), ScriptedSource::new());
    let snapshot = harness.snapshot_where(|_| true).await;
    assert_eq!(snapshot.phase, TurnPhase::AwaitingPlayerInput);
    assert_eq!(snapshot.remaining_seconds, 30);
    harness.quit().await;
}

#[tokio::test(start_paused = true)]
async fn test_word_accepted_and_opponent_replies() {
    let oracle = FakeOracle::new(&["apple"]);
    let source = ScriptedSource::new().with('e', &["apple", "eagle", "ear"]);
    let mut harness = start(settings(), oracle, source);

    harness
        .commands
        .send(PlayerCommand::Submit("Apple".to_string()))
        .expect("Orchestrator gone");

    let snapshot = harness
        .snapshot_where(|s| s.history.len() == 2)
        .await;
    assert_eq!(snapshot.last_word.as_deref(), Some("eagle"));
    assert_eq!(snapshot.points, 7);
    assert_eq!(snapshot.phase, TurnPhase::AwaitingPlayerInput);
    assert_eq!(snapshot.message, "Qbit's turn: eagle");
    assert_eq!(snapshot.remaining_seconds, 30);
    harness.quit().await;
}

#[tokio::test(start_paused = true)]
async fn test_invalid_word_keeps_playing() {
    let mut harness = start(settings(), FakeOracle::default(), ScriptedSource::new());
    harness
        .commands
        .send(PlayerCommand::Submit("zzqx".to_string()))
        .expect("Orchestrator gone");

    let snapshot = harness
        .snapshot_where(|s| s.message == "That's not a valid word! Try again.")
        .await;
    assert_eq!(snapshot.phase, TurnPhase::AwaitingPlayerInput);
    assert!(!snapshot.busy);
    assert!(snapshot.game_active);
    harness.quit().await;
}

#[tokio::test(start_paused = true)]
async fn test_timeout_ends_game_with_loss() {
    let base = SessionSettings {
        base_time_limit_secs: 3,
        ..settings()
    };
    let mut harness = start(base, FakeOracle::default(), ScriptedSource::new());

    let started = tokio::time::Instant::now();
    assert!(!harness.game_over().await);
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    harness.quit().await;
}

#[tokio::test(start_paused = true)]
async fn test_timeout_beats_slow_dictionary() {
    let base = SessionSettings {
        base_time_limit_secs: 2,
        ..settings()
    };
    let oracle = FakeOracle::new(&["apple"]).with_delay(Duration::from_secs(10));
    let mut harness = start(base, oracle, ScriptedSource::new().with('e', &["eagle"]));

    harness
        .commands
        .send(PlayerCommand::Submit("apple".to_string()))
        .expect("Orchestrator gone");
    assert!(!harness.game_over().await);

    // Let the dictionary answer arrive after the loss.
    tokio::time::sleep(Duration::from_secs(15)).await;
    let mut last = None;
    while let Ok(event) = harness.events.try_recv() {
        if let GameEvent::StateChanged(snapshot) = event {
            last = Some(*snapshot);
        }
    }
    if let Some(snapshot) = last {
        assert_eq!(snapshot.phase, TurnPhase::PlayerLoss);
        assert!(snapshot.history.is_empty());
    }
    harness.quit().await;
}

#[tokio::test(start_paused = true)]
async fn test_opponent_exhausted_ends_game_with_win() {
    let oracle = FakeOracle::new(&["apple"]);
    let mut harness = start(settings(), oracle, ScriptedSource::new());

    harness
        .commands
        .send(PlayerCommand::Submit("apple".to_string()))
        .expect("Orchestrator gone");
    assert!(harness.game_over().await);
    harness.quit().await;
}

#[tokio::test(start_paused = true)]
async fn test_achievement_event_published() {
    let oracle = FakeOracle::new(&["adventurous"]);
    let source = ScriptedSource::new().with('s', &["sun"]);
    let mut harness = start(settings(), oracle, source);

    harness
        .commands
        .send(PlayerCommand::Submit("adventurous".to_string()))
        .expect("Orchestrator gone");
    loop {
        if let GameEvent::AchievementUnlocked(achievement) = harness.next_event().await {
            assert_eq!(achievement, Achievement::VocabularyMaster);
            break;
        }
    }
    harness.quit().await;
}

#[tokio::test(start_paused = true)]
async fn test_hint_delivered_and_charged() {
    let oracle = FakeOracle::new(&["apple"]);
    let source = ScriptedSource::new().with('e', &["eagle", "ear", "echo", "egg"]);
    let mut harness = start(settings(), oracle, source);

    harness
        .commands
        .send(PlayerCommand::Submit("apple".to_string()))
        .expect("Orchestrator gone");
    harness.snapshot_where(|s| s.history.len() == 2).await;

    harness
        .commands
        .send(PlayerCommand::Hint)
        .expect("Orchestrator gone");
    let snapshot = harness.snapshot_where(|s| !s.hints.is_empty()).await;
    assert_eq!(snapshot.hints, vec!["ear", "echo", "egg"]);
    assert_eq!(snapshot.points, 2);
    harness.quit().await;
}

#[tokio::test(start_paused = true)]
async fn test_new_game_after_loss() {
    let base = SessionSettings {
        base_time_limit_secs: 1,
        ..settings()
    };
    let mut harness = start(base, FakeOracle::default(), ScriptedSource::new());
    assert!(!harness.game_over().await);

    harness
        .commands
        .send(PlayerCommand::NewGame)
        .expect("Orchestrator gone");
    let snapshot = harness.snapshot_where(|s| s.game_active).await;
    assert_eq!(snapshot.phase, TurnPhase::AwaitingPlayerInput);
    assert_eq!(snapshot.remaining_seconds, 1);
    harness.quit().await;
}

#[tokio::test(start_paused = true)]
async fn test_closing_command_channel_stops_loop() {
    let harness = start(settings(), FakeOracle::default(), ScriptedSource::new());
    let Harness {
        commands,
        events: _events,
        handle,
    } = harness;
    drop(commands);
    handle
        .await
        .expect("Orchestrator panicked")
        .expect("Orchestrator failed");
}
