//! Word chain: alternate words with the opponent, each starting with the
//! last letter of the previous one.

mod achievements;
mod chain;
mod error;
mod scoring;
mod session;
mod timer;
mod types;

pub use achievements::{
    Achievement, AchievementTracker, LONG_WORD_THRESHOLD, STREAK_MASTER_THRESHOLD,
};
pub use chain::{ChainState, normalize};
pub use error::TurnError;
pub use scoring::{Award, HINT_COST, STREAK_BONUS_THRESHOLD, ScoreState, streak_bonus};
pub use session::{
    GameSession, HintRequest, MAX_HINTS, OpponentRequest, SessionSettings, Snapshot, TurnPhase,
    ValidationRequest,
};
pub use timer::{Countdown, TimerTick, TurnTimer, format_remaining};
pub use types::{Difficulty, Speaker, TurnRecord};
