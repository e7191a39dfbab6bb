//! Terminal UI for Star & Moon.

mod controller;
mod input;
mod layout;
mod screen;
mod screens;

pub use controller::TuiController;
pub use input::{digit_position, move_cursor};
pub use layout::{center_rect, pad_right};
pub use screen::{Screen, ScreenTransition};
pub use screens::{BoardScreen, DialogChoice, MAX_NAME_CHARS, SetupField, SetupScreen};

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::audio::CuePlayer;
use crate::config::AppConfig;
use crate::db::PreferenceRepository;
use crate::session_store::SessionStore;
use crate::table::TableState;

/// Opens the database, restores the session, and runs the UI until quit.
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated, or if the terminal
/// cannot be set up. Write failures during play are logged, not returned.
#[instrument(skip(config))]
pub async fn run_tui(config: AppConfig) -> Result<()> {
    let repository = PreferenceRepository::open(config.database_url())
        .with_context(|| format!("Failed to open database {}", config.db_path().display()))?;
    let store = SessionStore::new(repository);
    let table = TableState::new(store.load(), (*config.first_player()).into());
    let cues = CuePlayer::spawn(*config.audio());
    let mut controller = TuiController::new(table, store, cues);

    info!("Starting Star & Moon TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "UI loop failed");
    }
    info!("Star & Moon TUI exited");
    result
}
