//! Command-line interface for starmoon.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use starmoon::{AudioBackend, ConfigOverrides, FirstPlayer};

/// Star & Moon - two-player tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "starmoon")]
#[command(about = "Two-player tic-tac-toe with saved names, symbols and scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(long, global = true, default_value = "starmoon.toml")]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the game in the terminal
    Play(PlayArgs),

    /// Print saved preferences and statistics
    Stats {
        /// Path to the database file
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
}

/// Flags for `play`; each overrides the config file.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Path to the database file (created if it doesn't exist)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Seat that opens each game
    #[arg(long, value_enum)]
    pub first_player: Option<FirstPlayer>,

    /// How audio cues are played
    #[arg(long, value_enum)]
    pub audio: Option<AudioBackend>,

    /// File to write logs to
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl From<PlayArgs> for ConfigOverrides {
    fn from(args: PlayArgs) -> Self {
        Self {
            db_path: args.db_path,
            log_file: args.log_file,
            first_player: args.first_player,
            audio: args.audio,
        }
    }
}
