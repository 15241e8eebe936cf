//! Turn errors.

use derive_more::{Display, Error};

/// Why a turn did not go the human's way.
///
/// The display text is the message shown to the player. Everything except
/// [`TurnError::Timeout`] and [`TurnError::OpponentExhausted`] lets the human
/// try again immediately.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TurnError {
    /// Nothing was typed.
    #[display("Please enter a word!")]
    EmptyInput,
    /// The word is already in the chain.
    #[display("That word has already been used! Try another.")]
    DuplicateWord,
    /// The dictionary has no entry for the word, or could not be reached.
    #[display("That's not a valid word! Try again.")]
    InvalidWord,
    /// The word does not start with the last letter of the previous word.
    #[display("Your word must start with the letter '{required}'!")]
    WrongStartingLetter {
        /// The letter the word must start with.
        required: char,
    },
    /// The turn clock ran out.
    #[display("Time's up! {opponent} wins!")]
    Timeout {
        /// Opponent display name.
        opponent: String,
    },
    /// The opponent could not find a reply.
    #[display("{opponent} couldn't find a word. You win!")]
    OpponentExhausted {
        /// Opponent display name.
        opponent: String,
    },
}

impl TurnError {
    /// Whether this error ends the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::OpponentExhausted { .. })
    }

    /// Whether this error breaks the human's streak.
    pub fn resets_streak(&self) -> bool {
        matches!(self, Self::InvalidWord | Self::WrongStartingLetter { .. })
    }
}
