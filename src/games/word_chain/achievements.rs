//! One-time achievements unlocked by accepted words.

use super::scoring::ScoreState;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{info, instrument};

/// Words strictly longer than this unlock [`Achievement::VocabularyMaster`].
pub const LONG_WORD_THRESHOLD: usize = 8;

/// Streak at which [`Achievement::StreakMaster`] unlocks.
pub const STREAK_MASTER_THRESHOLD: u32 = 5;

/// Achievements a player can unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Achievement {
    /// Used a word longer than eight letters.
    #[strum(to_string = "Vocabulary Master")]
    VocabularyMaster,
    /// Reached a five-word streak.
    #[strum(to_string = "Streak Master")]
    StreakMaster,
}

impl Achievement {
    /// Short description for display.
    pub fn description(self) -> &'static str {
        match self {
            Self::VocabularyMaster => "Use a word longer than 8 letters",
            Self::StreakMaster => "Maintain a 5-word streak",
        }
    }

    /// Whether accepting `word` with the resulting `score` earns this achievement.
    pub fn is_earned_by(self, word: &str, score: &ScoreState) -> bool {
        match self {
            Self::VocabularyMaster => word.chars().count() > LONG_WORD_THRESHOLD,
            Self::StreakMaster => score.streak() >= STREAK_MASTER_THRESHOLD,
        }
    }
}

/// Tracks which achievements have fired this session.
#[derive(Debug, Clone, Default)]
pub struct AchievementTracker {
    unlocked: Vec<Achievement>,
}

impl AchievementTracker {
    /// Creates a tracker with nothing unlocked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates an accepted word, returning only achievements unlocked by it.
    /// Each achievement is reported at most once per tracker.
    #[instrument(skip(self, score), fields(streak = score.streak()))]
    pub fn evaluate(&mut self, word: &str, score: &ScoreState) -> Vec<Achievement> {
        let fresh: Vec<Achievement> = Achievement::iter()
            .filter(|achievement| !self.is_unlocked(*achievement))
            .filter(|achievement| achievement.is_earned_by(word, score))
            .collect();

        for achievement in &fresh {
            info!(%achievement, "Achievement unlocked");
        }
        self.unlocked.extend(fresh.iter().copied());
        fresh
    }

    /// Whether the achievement has fired.
    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    /// Achievements unlocked so far, in unlock order.
    pub fn unlocked(&self) -> &[Achievement] {
        &self.unlocked
    }
}
