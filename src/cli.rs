//! Command-line interface for strictly_hanoi.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Strictly Hanoi - Tower of Hanoi with a persistent leaderboard
#[derive(Parser, Debug)]
#[command(name = "strictly_hanoi")]
#[command(about = "Tower of Hanoi with scoring and difficulty unlocks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it is missing)
    #[arg(long, global = true, default_value = "hanoi.toml")]
    pub config: PathBuf,

    /// Override the score database path from the config file
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Print the leaderboard
    Scores {
        /// Number of entries to print (defaults to the configured size)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the difficulties currently open for selection
    Unlocks,
}
