//! Strictly Hanoi - Unified CLI
//!
//! Plays the puzzle in the terminal and reports on the leaderboard.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_hanoi::{HanoiConfig, Leaderboard, ScoreRepository, ScoreStore, run_lobby};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,strictly_hanoi=debug";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = HanoiConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(&config),
        Command::Scores { limit, json } => {
            run_scores(&config, limit.unwrap_or(*config.leaderboard_size()), json)
        }
        Command::Unlocks => run_unlocks(&config),
    }
}

/// Run the terminal UI, logging to a file so the screen stays clean.
#[instrument(skip(config))]
fn run_play(config: &HanoiConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_path())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(db_path = %config.db_path(), "Starting Strictly Hanoi");
    let leaderboard = Leaderboard::from_open(
        ScoreRepository::open(config.db_path()),
        *config.leaderboard_size(),
    );
    run_lobby(leaderboard)
}

/// Print the top scores.
#[instrument(skip(config))]
fn run_scores(config: &HanoiConfig, limit: usize, json: bool) -> Result<()> {
    initialize_stderr_tracing();

    let store = ScoreRepository::open(config.db_path())?;
    let records = store.top_scores(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No scores yet.");
        return Ok(());
    }
    for (rank, record) in records.iter().enumerate() {
        println!(
            "{}. {} - {} ({} moves) - {:.1} pts - {}",
            rank + 1,
            record.name(),
            record.difficulty(),
            record.moves(),
            record.score(),
            record.date_played()
        );
    }
    Ok(())
}

/// Print the difficulties open for selection.
#[instrument(skip(config))]
fn run_unlocks(config: &HanoiConfig) -> Result<()> {
    initialize_stderr_tracing();

    let leaderboard = Leaderboard::from_open(
        ScoreRepository::open(config.db_path()),
        *config.leaderboard_size(),
    );
    for difficulty in leaderboard.unlocked().iter() {
        println!("{} ({} disks)", difficulty, difficulty.disk_count());
    }
    Ok(())
}

fn initialize_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
