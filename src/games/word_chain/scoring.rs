//! Score bookkeeping: points, streaks and the high score.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Streak length at which accepted words earn a bonus.
pub const STREAK_BONUS_THRESHOLD: u32 = 3;

/// Points deducted for a delivered hint.
pub const HINT_COST: u32 = 5;

/// Bonus for a word worth `base` points accepted at streak `streak`:
/// half the base points, rounded down, once the streak reaches
/// [`STREAK_BONUS_THRESHOLD`].
pub fn streak_bonus(base: u32, streak: u32) -> u32 {
    if streak >= STREAK_BONUS_THRESHOLD {
        base / 2
    } else {
        0
    }
}

/// Points earned by one accepted word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Award {
    /// Length-times-multiplier points.
    pub base: u32,
    /// Streak bonus on top of the base.
    pub bonus: u32,
}

impl Award {
    /// Base plus bonus.
    pub fn total(&self) -> u32 {
        self.base.saturating_add(self.bonus)
    }

    /// The message shown after the word is accepted.
    pub fn message(&self) -> String {
        if self.bonus > 0 {
            format!("+{} points (+{} streak bonus)!", self.base, self.bonus)
        } else {
            format!("+{} points!", self.base)
        }
    }
}

/// Running score for one session.
///
/// `high_score` never decreases: it is seeded from storage and only ever
/// raised to the current points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    points: u32,
    streak: u32,
    correct_word_count: u32,
    high_score: u32,
}

impl ScoreState {
    /// Creates a zeroed score carrying a previously persisted high score.
    pub fn new(high_score: u32) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    /// Current points.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Consecutive accepted human words.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Submissions the dictionary confirmed as real words.
    pub fn correct_word_count(&self) -> u32 {
        self.correct_word_count
    }

    /// Best points ever reached on this device.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Counts a submission the dictionary confirmed.
    pub fn record_valid_word(&mut self) {
        self.correct_word_count = self.correct_word_count.saturating_add(1);
    }

    /// Extends the streak and adds `base` points plus any streak bonus.
    #[instrument(skip(self), fields(streak = self.streak, points = self.points))]
    pub fn award(&mut self, base: u32) -> Award {
        self.streak = self.streak.saturating_add(1);
        let award = Award::new(base, streak_bonus(base, self.streak));
        self.points = self.points.saturating_add(award.total());
        debug!(
            base = award.base,
            bonus = award.bonus,
            total = self.points,
            streak = self.streak,
            "Points awarded"
        );
        award
    }

    /// Breaks the streak.
    pub fn reset_streak(&mut self) {
        if self.streak > 0 {
            debug!(streak = self.streak, "Streak reset");
        }
        self.streak = 0;
    }

    /// Deducts up to `cost` points, flooring at zero. Returns the amount taken.
    #[instrument(skip(self), fields(points = self.points))]
    pub fn charge(&mut self, cost: u32) -> u32 {
        let before = self.points;
        self.points = self.points.saturating_sub(cost);
        before - self.points
    }

    /// Raises the high score to the current points if they exceed it.
    /// Returns `true` when a new high score was set.
    pub fn raise_high_score(&mut self) -> bool {
        if self.points > self.high_score {
            info!(
                previous = self.high_score,
                high_score = self.points,
                "New high score"
            );
            self.high_score = self.points;
            true
        } else {
            false
        }
    }
}
