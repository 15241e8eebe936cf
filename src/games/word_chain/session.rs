//! Turn state machine for one game against the opponent.
//!
//! The session never performs I/O itself. Operations that need a lookup hand
//! back a request ticket; the caller runs the lookup and feeds the answer to
//! the matching `resolve_*` method. Tickets carry the turn number they were
//! issued on, and answers for any other turn are dropped, so a lookup that
//! outlives a timeout or a new game cannot touch the fresh state.
//!
//! ```text
//! AwaitingPlayerInput ──submit──▶ Validating ──accept──▶ OpponentThinking
//!        ▲     │                      │                       │
//!        │     └──timeout──▶ PlayerLoss ◀──timeout──┘         │
//!        │                                                    │
//!        └────────────────── opponent reply ◀─────────────────┤
//!                                                             └──no reply──▶ PlayerWin
//! ```

use super::achievements::{Achievement, AchievementTracker};
use super::chain::{ChainState, normalize};
use super::error::TurnError;
use super::scoring::{HINT_COST, ScoreState};
use super::timer::{TimerTick, TurnTimer};
use super::types::{Difficulty, Speaker, TurnRecord};
use crate::storage::HighScoreBook;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Most hints shown per request.
pub const MAX_HINTS: usize = 3;

/// Where the turn cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The human may submit a word or ask for a hint.
    AwaitingPlayerInput,
    /// The dictionary is checking the human's word. The clock keeps running.
    Validating,
    /// The opponent is looking for a reply. The clock is held.
    OpponentThinking,
    /// The opponent ran out of words.
    PlayerWin,
    /// The human ran out of time.
    PlayerLoss,
}

impl TurnPhase {
    /// Whether the game has ended.
    pub fn is_over(self) -> bool {
        matches!(self, Self::PlayerWin | Self::PlayerLoss)
    }

    /// Whether it is still the human's turn (the clock applies).
    pub fn is_human_turn(self) -> bool {
        matches!(self, Self::AwaitingPlayerInput | Self::Validating)
    }
}

/// Fixed parameters of a session, chosen at game start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Human player's name.
    pub player_name: String,
    /// Opponent display name.
    pub opponent_name: String,
    /// Scoring and clock difficulty.
    pub difficulty: Difficulty,
    /// Unscaled seconds per turn.
    pub base_time_limit_secs: u32,
    /// How many candidates the opponent asks the word source for.
    pub opponent_candidate_limit: u32,
    /// How many candidates a hint asks the word source for.
    pub hint_candidate_limit: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            opponent_name: "Qbit".to_string(),
            difficulty: Difficulty::default(),
            base_time_limit_secs: 30,
            opponent_candidate_limit: 100,
            hint_candidate_limit: 5,
        }
    }
}

/// Ticket for checking a submitted word against the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    turn: u64,
    word: String,
}

impl ValidationRequest {
    /// Turn the request was issued on.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// The normalized word to look up.
    pub fn word(&self) -> &str {
        &self.word
    }
}

/// Ticket for fetching the opponent's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentRequest {
    turn: u64,
    letter: char,
    limit: u32,
}

impl OpponentRequest {
    /// Turn the request was issued on.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Letter the reply must start with.
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Candidates to ask the word source for.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// Ticket for fetching hint candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintRequest {
    turn: u64,
    letter: char,
    limit: u32,
}

impl HintRequest {
    /// Turn the request was issued on.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Letter the hints must start with.
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Candidates to ask the word source for.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Human player's name.
    pub player_name: String,
    /// Opponent display name.
    pub opponent_name: String,
    /// Session difficulty.
    pub difficulty: Difficulty,
    /// Current phase.
    pub phase: TurnPhase,
    /// Most recent word in the chain.
    pub last_word: Option<String>,
    /// Letter the next word must start with.
    pub required_letter: Option<char>,
    /// Played words in play order.
    pub used_words: Vec<String>,
    /// Full chain.
    pub history: Vec<TurnRecord>,
    /// Current points.
    pub points: u32,
    /// Current streak.
    pub streak: u32,
    /// Dictionary-confirmed submissions.
    pub correct_word_count: u32,
    /// Best score on this device.
    pub high_score: u32,
    /// Seconds left on the clock.
    pub remaining_seconds: u32,
    /// Seconds per turn after difficulty scaling.
    pub time_limit: u32,
    /// Whether the game is still being played.
    pub game_active: bool,
    /// Whether a lookup is in flight.
    pub busy: bool,
    /// Feedback for the player.
    pub message: String,
    /// Hints from the latest hint request.
    pub hints: Vec<String>,
    /// Achievements unlocked by the latest accepted word.
    pub new_achievements: Vec<Achievement>,
    /// Achievements unlocked this session.
    pub achievements: Vec<Achievement>,
    /// Turn counter.
    pub turn: u64,
}

/// One game against the opponent.
#[derive(Debug)]
pub struct GameSession {
    settings: SessionSettings,
    chain: ChainState,
    score: ScoreState,
    timer: TurnTimer,
    achievements: AchievementTracker,
    new_achievements: Vec<Achievement>,
    hints: Vec<String>,
    phase: TurnPhase,
    turn: u64,
    busy: bool,
    message: String,
    high_scores: HighScoreBook,
}

impl GameSession {
    /// Starts a game: reads the persisted high score once and starts the
    /// human's first turn.
    #[instrument(skip(high_scores), fields(player = %settings.player_name, difficulty = %settings.difficulty))]
    pub fn new(settings: SessionSettings, high_scores: HighScoreBook) -> Self {
        let limit = settings
            .difficulty
            .time_limit(settings.base_time_limit_secs);
        let high_score = high_scores.load();
        info!(time_limit = limit, high_score, "Starting word chain game");

        let mut session = Self {
            settings,
            chain: ChainState::new(),
            score: ScoreState::new(high_score),
            timer: TurnTimer::new(limit),
            achievements: AchievementTracker::new(),
            new_achievements: Vec::new(),
            hints: Vec::new(),
            phase: TurnPhase::AwaitingPlayerInput,
            turn: 0,
            busy: false,
            message: String::new(),
            high_scores,
        };
        session.timer.restart();
        session
    }

    /// Session settings.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The chain so far.
    pub fn chain(&self) -> &ChainState {
        &self.chain
    }

    /// Current score.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Turn clock.
    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Turn counter used to tag lookups.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Whether a lookup is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Latest player-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Submits a word for the human's turn.
    ///
    /// Returns `Ok(None)` when the submission is ignored: a lookup is already
    /// in flight or the human cannot play right now. Returns a ticket when the
    /// word should be checked against the dictionary.
    ///
    /// # Errors
    ///
    /// [`TurnError::EmptyInput`] and [`TurnError::DuplicateWord`]. Neither
    /// touches the streak.
    #[instrument(skip(self), fields(turn = self.turn, phase = ?self.phase))]
    pub fn submit(&mut self, raw: &str) -> Result<Option<ValidationRequest>, TurnError> {
        if self.phase != TurnPhase::AwaitingPlayerInput || self.busy {
            debug!(busy = self.busy, "Ignoring submission");
            return Ok(None);
        }

        self.new_achievements.clear();
        let word = normalize(raw);
        if word.is_empty() {
            return Err(self.reject(TurnError::EmptyInput));
        }
        if self.chain.is_used(&word) {
            return Err(self.reject(TurnError::DuplicateWord));
        }

        debug!(word = %word, "Dispatching dictionary check");
        self.busy = true;
        self.phase = TurnPhase::Validating;
        self.message = "Checking word...".to_string();
        Ok(Some(ValidationRequest {
            turn: self.turn,
            word,
        }))
    }

    /// Applies the dictionary's verdict on a submitted word.
    ///
    /// Returns `Ok(None)` if the ticket is stale. On acceptance, scores the
    /// word and returns the ticket for the opponent's reply.
    ///
    /// # Errors
    ///
    /// [`TurnError::InvalidWord`] and [`TurnError::WrongStartingLetter`]; both
    /// reset the streak and hand the turn back to the human.
    #[instrument(skip(self, request), fields(turn = self.turn, word = %request.word))]
    pub fn resolve_validation(
        &mut self,
        request: ValidationRequest,
        exists: bool,
    ) -> Result<Option<OpponentRequest>, TurnError> {
        if !self.is_current(request.turn, TurnPhase::Validating) {
            debug!(ticket_turn = request.turn, "Discarding stale dictionary result");
            return Ok(None);
        }
        self.busy = false;
        self.phase = TurnPhase::AwaitingPlayerInput;

        if !exists {
            return Err(self.reject(TurnError::InvalidWord));
        }
        self.score.record_valid_word();

        if !self.chain.follows_chain(&request.word) {
            let required = self.chain.required_letter().unwrap_or_default();
            return Err(self.reject(TurnError::WrongStartingLetter { required }));
        }

        let word = request.word;
        let base = self.settings.difficulty.points_for(&word);
        let award = self.score.award(base);
        if let Err(e) = self
            .chain
            .record(TurnRecord::new(Speaker::Human, word.clone(), award.total()))
        {
            return Err(self.reject(e));
        }
        if self.score.raise_high_score() {
            self.high_scores.record(self.score.high_score());
        }
        self.new_achievements = self.achievements.evaluate(&word, &self.score);

        info!(
            word = %word,
            points = award.total(),
            total = self.score.points(),
            streak = self.score.streak(),
            "Word accepted"
        );
        self.message = award.message();
        self.hints.clear();
        self.timer.reset_held();
        self.phase = TurnPhase::OpponentThinking;
        self.busy = true;

        let letter = word.chars().last().unwrap_or_default();
        Ok(Some(OpponentRequest {
            turn: self.turn,
            letter,
            limit: self.settings.opponent_candidate_limit,
        }))
    }

    /// Plays the opponent's reply: the first candidate, in source order, that
    /// starts with the required letter and is not yet in the chain.
    ///
    /// Returns `Ok(None)` if the ticket is stale, otherwise the word played.
    ///
    /// # Errors
    ///
    /// [`TurnError::OpponentExhausted`] if no candidate qualifies. The game is
    /// then won by the human.
    #[instrument(skip(self, request, candidates), fields(turn = self.turn, letter = %request.letter, candidates = candidates.len()))]
    pub fn resolve_opponent(
        &mut self,
        request: OpponentRequest,
        candidates: Vec<String>,
    ) -> Result<Option<String>, TurnError> {
        if !self.is_current(request.turn, TurnPhase::OpponentThinking) {
            debug!(ticket_turn = request.turn, "Discarding stale opponent result");
            return Ok(None);
        }
        self.busy = false;

        let reply = self
            .chain
            .playable_candidates(request.letter, candidates)
            .into_iter()
            .next();

        let Some(word) = reply else {
            info!("Opponent found no word, player wins");
            self.end(TurnPhase::PlayerWin);
            return Err(self.reject(TurnError::OpponentExhausted {
                opponent: self.settings.opponent_name.clone(),
            }));
        };

        if let Err(e) = self
            .chain
            .record(TurnRecord::new(Speaker::Opponent, word.clone(), 0))
        {
            return Err(self.reject(e));
        }
        info!(word = %word, "Opponent replied");
        self.message = format!("{}'s turn: {}", self.settings.opponent_name, word);
        self.turn += 1;
        self.phase = TurnPhase::AwaitingPlayerInput;
        self.timer.restart();
        Ok(Some(word))
    }

    /// Ends the game on an expired clock. Only applies during the human's
    /// turn; returns the resulting error, or `None` if it did not apply.
    #[instrument(skip(self), fields(turn = self.turn, phase = ?self.phase))]
    pub fn on_timeout(&mut self) -> Option<TurnError> {
        if !self.phase.is_human_turn() {
            debug!("Timeout outside the human's turn ignored");
            return None;
        }
        info!(
            pending_lookup = self.busy,
            points = self.score.points(),
            "Turn timed out"
        );
        self.end(TurnPhase::PlayerLoss);
        Some(self.reject(TurnError::Timeout {
            opponent: self.settings.opponent_name.clone(),
        }))
    }

    /// Advances the clock one second, ending the game when it runs out.
    pub fn tick(&mut self) -> TimerTick {
        if !self.phase.is_human_turn() {
            return TimerTick::Idle;
        }
        let tick = self.timer.tick();
        if tick == TimerTick::Expired {
            self.on_timeout();
        }
        tick
    }

    /// Asks for hint candidates. Available only while waiting for the human
    /// with a word already in the chain and no lookup in flight.
    #[instrument(skip(self), fields(turn = self.turn, phase = ?self.phase))]
    pub fn request_hint(&mut self) -> Option<HintRequest> {
        if self.phase != TurnPhase::AwaitingPlayerInput || self.busy {
            debug!(busy = self.busy, "Hint unavailable");
            return None;
        }
        let letter = self.chain.required_letter()?;
        self.busy = true;
        debug!(%letter, "Dispatching hint lookup");
        Some(HintRequest {
            turn: self.turn,
            letter,
            limit: self.settings.hint_candidate_limit,
        })
    }

    /// Delivers up to [`MAX_HINTS`] unused words and charges [`HINT_COST`]
    /// points when at least one is delivered. Streak and turn are untouched.
    #[instrument(skip(self, request, candidates), fields(turn = self.turn, candidates = candidates.len()))]
    pub fn resolve_hint(&mut self, request: HintRequest, candidates: Vec<String>) -> Vec<String> {
        if !self.is_current(request.turn, TurnPhase::AwaitingPlayerInput) {
            debug!(ticket_turn = request.turn, "Discarding stale hint result");
            return Vec::new();
        }
        self.busy = false;

        let hints: Vec<String> = self
            .chain
            .playable_candidates(request.letter, candidates)
            .into_iter()
            .take(MAX_HINTS)
            .collect();
        if hints.is_empty() {
            debug!("No hints available");
            return hints;
        }

        let charged = self.score.charge(HINT_COST);
        info!(hints = hints.len(), charged, "Hint delivered");
        self.message = format!("Hint: Try words like {}", hints.join(", "));
        self.hints = hints.clone();
        hints
    }

    /// Discards the chain, score and achievements and starts a fresh game with
    /// the same settings. The high score carries over; in-flight lookups are
    /// invalidated.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn new_game(&mut self) {
        info!(player = %self.settings.player_name, "Starting new game");
        self.chain = ChainState::new();
        self.score = ScoreState::new(self.score.high_score());
        self.achievements = AchievementTracker::new();
        self.new_achievements.clear();
        self.hints.clear();
        self.turn += 1;
        self.busy = false;
        self.phase = TurnPhase::AwaitingPlayerInput;
        self.message.clear();
        self.timer.restart();
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_name: self.settings.player_name.clone(),
            opponent_name: self.settings.opponent_name.clone(),
            difficulty: self.settings.difficulty,
            phase: self.phase,
            last_word: self.chain.last_word().map(str::to_string),
            required_letter: self.chain.required_letter(),
            used_words: self.chain.used_words().map(str::to_string).collect(),
            history: self.chain.history().to_vec(),
            points: self.score.points(),
            streak: self.score.streak(),
            correct_word_count: self.score.correct_word_count(),
            high_score: self.score.high_score(),
            remaining_seconds: self.timer.remaining(),
            time_limit: self.timer.limit(),
            game_active: !self.phase.is_over(),
            busy: self.busy,
            message: self.message.clone(),
            hints: self.hints.clone(),
            new_achievements: self.new_achievements.clone(),
            achievements: self.achievements.unlocked().to_vec(),
            turn: self.turn,
        }
    }

    fn is_current(&self, turn: u64, phase: TurnPhase) -> bool {
        self.busy && self.turn == turn && self.phase == phase
    }

    fn end(&mut self, phase: TurnPhase) {
        self.phase = phase;
        self.busy = false;
        self.turn += 1;
        self.timer.stop();
    }

    fn reject(&mut self, error: TurnError) -> TurnError {
        if error.is_terminal() {
            info!(error = %error, "Game over");
        } else {
            warn!(error = %error, streak = self.score.streak(), "Word rejected");
        }
        if error.resets_streak() {
            self.score.reset_streak();
        }
        self.message = error.to_string();
        error
    }
}
