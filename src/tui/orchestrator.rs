//! Game orchestration: owns the session, runs lookups and the turn clock.

use crate::games::word_chain::{
    Achievement, Countdown, GameSession, HintRequest, OpponentRequest, Snapshot, TimerTick,
    TurnError, ValidationRequest,
};
use crate::lookup::{DictionaryOracle, WordSource};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Requests from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Submit a word.
    Submit(String),
    /// Ask for a hint.
    Hint,
    /// Throw the current game away and start over.
    NewGame,
    /// Stop the orchestrator.
    Quit,
}

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Session state changed.
    StateChanged(Box<Snapshot>),
    /// An achievement was unlocked by the latest word.
    AchievementUnlocked(Achievement),
    /// The game ended.
    GameOver {
        /// `true` if the opponent ran out of words.
        player_won: bool,
    },
}

/// A finished lookup, tagged with the ticket it answers.
#[derive(Debug)]
enum Completion {
    Validation(ValidationRequest, bool),
    Opponent(OpponentRequest, Vec<String>),
    Hint(HintRequest, Vec<String>),
}

/// Drives a [`GameSession`]: forwards player commands, runs lookups on
/// spawned tasks, ticks the clock and publishes a snapshot after every
/// transition.
pub struct Orchestrator {
    session: GameSession,
    oracle: Arc<dyn DictionaryOracle>,
    source: Arc<dyn WordSource>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    completion_tx: mpsc::UnboundedSender<Completion>,
}

impl Orchestrator {
    /// Creates an orchestrator and the receiver for its lookup completions.
    fn new(
        session: GameSession,
        oracle: Arc<dyn DictionaryOracle>,
        source: Arc<dyn WordSource>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        (
            Self {
                session,
                oracle,
                source,
                event_tx,
                completion_tx,
            },
            completion_rx,
        )
    }

    /// Spawns the orchestrator loop.
    ///
    /// The loop ends on [`PlayerCommand::Quit`], when the command channel
    /// closes, or when the UI stops listening for events.
    pub fn spawn(
        session: GameSession,
        oracle: Arc<dyn DictionaryOracle>,
        source: Arc<dyn WordSource>,
        commands: mpsc::UnboundedReceiver<PlayerCommand>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> JoinHandle<Result<()>> {
        let (orchestrator, completions) = Self::new(session, oracle, source, event_tx);
        tokio::spawn(orchestrator.run(commands, completions))
    }

    /// Runs the game loop.
    #[instrument(skip_all)]
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<PlayerCommand>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) -> Result<()> {
        info!("Starting game orchestration");
        let mut countdown = Countdown::new();
        countdown.sync(self.session.timer());
        self.publish()?;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    None | Some(PlayerCommand::Quit) => {
                        info!("Orchestrator stopping");
                        return Ok(());
                    }
                    Some(command) => self.handle_command(command)?,
                },
                Some(completion) = completions.recv() => self.handle_completion(completion)?,
                () = countdown.tick() => self.handle_tick()?,
            }
            countdown.sync(self.session.timer());
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) -> Result<()> {
        debug!(?command, "Handling player command");
        match command {
            PlayerCommand::Submit(text) => match self.session.submit(&text) {
                Ok(Some(request)) => self.dispatch_validation(request),
                Ok(None) => debug!("Submission ignored"),
                Err(e) => debug!(error = %e, "Submission rejected"),
            },
            PlayerCommand::Hint => {
                if let Some(request) = self.session.request_hint() {
                    self.dispatch_hint(request);
                }
            }
            PlayerCommand::NewGame => self.session.new_game(),
            PlayerCommand::Quit => {}
        }
        self.publish()
    }

    fn handle_completion(&mut self, completion: Completion) -> Result<()> {
        match completion {
            Completion::Validation(request, exists) => {
                match self.session.resolve_validation(request, exists) {
                    Ok(Some(opponent)) => {
                        self.dispatch_opponent(opponent);
                        for achievement in self.session.snapshot().new_achievements {
                            self.send(GameEvent::AchievementUnlocked(achievement))?;
                        }
                    }
                    Ok(None) => return Ok(()),
                    Err(e) => debug!(error = %e, "Word rejected"),
                }
            }
            Completion::Opponent(request, candidates) => {
                match self.session.resolve_opponent(request, candidates) {
                    Ok(Some(word)) => debug!(word = %word, "Opponent played"),
                    Ok(None) => return Ok(()),
                    Err(TurnError::OpponentExhausted { .. }) => {
                        self.publish()?;
                        return self.send(GameEvent::GameOver { player_won: true });
                    }
                    Err(e) => debug!(error = %e, "Opponent reply rejected"),
                }
            }
            Completion::Hint(request, candidates) => {
                let hints = self.session.resolve_hint(request, candidates);
                debug!(count = hints.len(), "Hints resolved");
            }
        }
        self.publish()
    }

    fn handle_tick(&mut self) -> Result<()> {
        match self.session.tick() {
            TimerTick::Idle => Ok(()),
            TimerTick::Running(_) => self.publish(),
            TimerTick::Expired => {
                self.publish()?;
                self.send(GameEvent::GameOver { player_won: false })
            }
        }
    }

    fn dispatch_validation(&self, request: ValidationRequest) {
        let oracle = Arc::clone(&self.oracle);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let exists = oracle.check_word_exists(request.word()).await;
            if tx.send(Completion::Validation(request, exists)).is_err() {
                debug!("Orchestrator gone, dropping dictionary result");
            }
        });
    }

    fn dispatch_opponent(&self, request: OpponentRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let candidates = source.find_words(request.letter(), request.limit()).await;
            if tx.send(Completion::Opponent(request, candidates)).is_err() {
                debug!("Orchestrator gone, dropping opponent candidates");
            }
        });
    }

    fn dispatch_hint(&self, request: HintRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let candidates = source.find_words(request.letter(), request.limit()).await;
            if tx.send(Completion::Hint(request, candidates)).is_err() {
                debug!("Orchestrator gone, dropping hint candidates");
            }
        });
    }

    fn publish(&self) -> Result<()> {
        self.send(GameEvent::StateChanged(Box::new(self.session.snapshot())))
    }

    fn send(&self, event: GameEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .map_err(|_| anyhow::anyhow!("UI event channel closed"))
    }
}
