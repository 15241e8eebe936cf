//! Word Chain - unified CLI.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use word_chain::{
    Cli, Command, DatamuseClient, Difficulty, DictionaryApiClient, GameConfig, GameSession,
    HighScoreBook, JsonFileStore, MemoryStore, run_tui,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            name,
            difficulty,
            time_limit,
        } => run_play(config, name, difficulty, time_limit).await,
        Command::Check { word } => run_check(config, word).await,
        Command::HighScore { reset } => run_high_score(config, reset),
    }
}

/// Routes logs to stderr for the one-shot commands.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the high score book at the configured location, or in memory when
/// the platform has no config directory.
fn open_high_scores(config: &GameConfig) -> HighScoreBook {
    match config.resolved_store_path() {
        Some(path) => {
            info!(path = %path.display(), "Using high score store");
            HighScoreBook::new(JsonFileStore::new(path))
        }
        None => {
            warn!("No config directory available, high score will not persist");
            HighScoreBook::new(MemoryStore::new())
        }
    }
}

/// Run the terminal game.
async fn run_play(
    config: GameConfig,
    name: Option<String>,
    difficulty: Option<Difficulty>,
    time_limit: Option<u32>,
) -> Result<()> {
    let mut config = config;
    if let Some(name) = name {
        config = config.with_player_name(name);
    }
    if let Some(difficulty) = difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(time_limit) = time_limit {
        config = config.with_base_time_limit_secs(time_limit);
    }
    config.validate()?;

    // Log to a file so the terminal stays clean
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let oracle = Arc::new(DictionaryApiClient::new(
        config.dictionary_url(),
        config.request_timeout(),
    )?);
    let source = Arc::new(DatamuseClient::new(
        config.word_source_url(),
        config.request_timeout(),
    )?);

    let session = GameSession::new(config.session_settings(), open_high_scores(&config));
    run_tui(session, oracle, source).await
}

/// Look a single word up.
async fn run_check(config: GameConfig, word: String) -> Result<()> {
    init_stderr_logging();
    let client = DictionaryApiClient::new(config.dictionary_url(), config.request_timeout())?;
    let exists = client.lookup(&word).await?;
    if exists {
        println!("'{}' is a valid word", word.trim().to_lowercase());
    } else {
        println!("'{}' is not in the dictionary", word.trim().to_lowercase());
    }
    Ok(())
}

/// Show or reset the high score.
fn run_high_score(config: GameConfig, reset: bool) -> Result<()> {
    init_stderr_logging();
    let mut book = open_high_scores(&config);
    if reset {
        book.reset()?;
        println!("High score reset");
    } else {
        println!("High score: {}", book.load());
    }
    Ok(())
}
