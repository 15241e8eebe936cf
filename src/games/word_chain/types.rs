//! Core domain types for the word chain.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// Who played a word in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The human at the keyboard.
    Human,
    /// The computer opponent.
    Opponent,
}

/// One accepted word in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct TurnRecord {
    /// Who played the word.
    speaker: Speaker,
    /// The word, case-normalized.
    word: String,
    /// Points awarded for the word, streak bonus included. Always 0 for the opponent.
    points_awarded: u32,
}

/// Difficulty chosen at game start.
///
/// Fixes the scoring multiplier and scales the per-turn time limit:
///
/// | Difficulty | Multiplier | Time limit |
/// |------------|------------|------------|
/// | Easy       | x1         | x1.3       |
/// | Normal     | x1.5       | x1         |
/// | Hard       | x2         | x0.7       |
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Relaxed clock, base points.
    Easy,
    /// The default.
    #[default]
    Normal,
    /// Short clock, double points.
    Hard,
}

impl Difficulty {
    /// Multiplier in halves, so point arithmetic stays integral.
    const fn multiplier_halves(self) -> u32 {
        match self {
            Self::Easy => 2,
            Self::Normal => 3,
            Self::Hard => 4,
        }
    }

    /// Time scaling in tenths.
    const fn time_scale_tenths(self) -> u32 {
        match self {
            Self::Easy => 13,
            Self::Normal => 10,
            Self::Hard => 7,
        }
    }

    /// Returns the scoring multiplier.
    pub fn multiplier(self) -> f64 {
        f64::from(self.multiplier_halves()) / 2.0
    }

    /// Returns the time-limit scaling factor.
    pub fn time_scale(self) -> f64 {
        f64::from(self.time_scale_tenths()) / 10.0
    }

    /// Base points for a word: `floor(length × multiplier)`.
    #[instrument]
    pub fn points_for(self, word: &str) -> u32 {
        let length = u32::try_from(word.chars().count()).unwrap_or(u32::MAX);
        length.saturating_mul(self.multiplier_halves()) / 2
    }

    /// Per-turn time limit for a configured base: `floor(base × scale)`.
    ///
    /// Never drops below one second.
    #[instrument]
    pub fn time_limit(self, base_secs: u32) -> u32 {
        (base_secs.saturating_mul(self.time_scale_tenths()) / 10).max(1)
    }
}
