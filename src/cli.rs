//! Command-line interface for word_chain.

use crate::games::word_chain::Difficulty;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Word Chain - take turns with the computer, each word starting with the
/// last letter of the one before.
#[derive(Parser, Debug)]
#[command(name = "word_chain")]
#[command(about = "Word-chain game against a dictionary-backed opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to $WORD_CHAIN_CONFIG or word_chain.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Player name
        #[arg(short, long)]
        name: Option<String>,

        /// Difficulty: easy, normal or hard
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Base seconds per turn, before difficulty scaling
        #[arg(short, long)]
        time_limit: Option<u32>,
    },

    /// Ask the dictionary whether a word exists
    Check {
        /// Word to look up
        word: String,
    },

    /// Show the persisted high score
    HighScore {
        /// Reset the high score to 0
        #[arg(long)]
        reset: bool,
    },
}
