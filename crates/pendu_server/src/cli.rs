//! Command-line interface for pendu.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Pendu - hangman with accounts, streaks and achievements
#[derive(Parser, Debug)]
#[command(name = "pendu")]
#[command(about = "Hangman game server and terminal client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML); missing file means defaults
    #[arg(short, long, default_value = pendu_server::DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Settings that override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct StorageArgs {
    /// Path to the database file (created if it doesn't exist)
    #[arg(long)]
    pub db_path: Option<String>,

    /// Word list (TOML) to use instead of the embedded one
    #[arg(long)]
    pub words_path: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the REST API server
    Serve {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Play in the terminal against the local database
    Play {
        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Print the leaderboard as JSON
    Leaderboard {
        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Print a player's statistics as JSON
    Stats {
        /// Player name
        player: String,

        #[command(flatten)]
        storage: StorageArgs,
    },
}
