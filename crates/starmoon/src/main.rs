//! Star & Moon - terminal launcher
//!
//! Opens the game UI or prints saved statistics.

#![warn(missing_docs)]

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use starmoon::{AppConfig, ConfigOverrides, SessionStore};
use starmoon_tictactoe::Player;
use tracing::{info, instrument};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        None => run_play(&cli.config, PlayArgs::default()).await,
        Some(Command::Play(args)) => run_play(&cli.config, args).await,
        Some(Command::Stats { db_path }) => run_stats(&cli.config, db_path),
    }
}

/// Run the terminal game
async fn run_play(config_path: &Path, args: PlayArgs) -> Result<()> {
    let config = AppConfig::load_or_default(config_path)?.with_overrides(args.into());
    starmoon::init_file_logging(config.log_file())?;
    info!(?config, "Starting starmoon");
    starmoon::run_tui(config).await
}

/// Print saved preferences and statistics
#[instrument(skip_all)]
fn run_stats(config_path: &Path, db_path: Option<std::path::PathBuf>) -> Result<()> {
    let config = AppConfig::load_or_default(config_path)?.with_overrides(ConfigOverrides {
        db_path,
        ..Default::default()
    });

    let Some(session) = SessionStore::load_saved(config.db_path())
        .with_context(|| format!("Failed to open database {}", config.db_path().display()))?
    else {
        println!("Nothing saved yet at {}", config.db_path().display());
        return Ok(());
    };
    let stats = session.statistics();

    println!("Database: {}", config.db_path().display());
    for player in Player::ALL {
        let profile = session.profile(player);
        println!(
            "{} {:<24} wins: {}",
            profile.symbol(),
            profile.name(),
            stats.wins(player)
        );
    }
    println!("   {:<24} draws: {}", "", stats.draws());
    println!("   {:<24} games: {}", "", stats.total_games());
    println!(
        "Sound: {}",
        if *session.sound_enabled() { "on" } else { "off" }
    );
    Ok(())
}
