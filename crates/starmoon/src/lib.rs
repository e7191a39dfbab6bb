//! Star & Moon: two-player tic-tac-toe for the terminal.
//!
//! Names, symbols, the sound flag and running win/draw counts are saved to a
//! SQLite file and restored on the next launch.
//!
//! # Architecture
//!
//! - **Table**: [`TableState::apply`] turns a [`Command`] into new state plus
//!   a list of [`Effect`]s
//! - **Session store**: typed preferences over a [`KeyValueStore`]
//! - **Database**: [`PreferenceRepository`], diesel over SQLite
//! - **Audio**: [`CuePlayer`] plays cues on a worker thread
//! - **TUI**: setup and board screens driven by [`TuiController`]
//!
//! # Example
//!
//! ```
//! use starmoon::{Command, MemoryStore, SessionStore, TableState};
//! use starmoon_tictactoe::{Player, Position};
//!
//! let store = SessionStore::new(MemoryStore::new());
//! let mut table = TableState::new(store.load(), Player::X);
//! table.apply(Command::Start);
//!
//! for effect in table.apply(Command::Place(Position::Center)) {
//!     effect.persist(&store);
//! }
//! assert_eq!(table.to_move(), Some(Player::O));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod audio;
mod config;
mod db;
mod logging;
mod session_store;
mod table;
mod tui;

// Crate-level exports - Audio
pub use audio::{AudioBackend, BellSink, Cue, CuePlayer, CueSink};
#[cfg(feature = "audio")]
pub use audio::ToneSink;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, ConfigOverrides, FirstPlayer};

// Crate-level exports - Database
pub use db::{DbError, DbErrorKind, NewPreference, Preference, PreferenceRepository};

// Crate-level exports - Logging
pub use logging::{DEFAULT_FILTER, init_file_logging};

// Crate-level exports - Session store
pub use session_store::{
    KeyValueStore, MemoryStore, SavedSession, SessionStore, StatisticsError, keys,
    parse_statistics,
};

// Crate-level exports - Table state machine
pub use table::{Command, Effect, PreferenceChange, Stage, TableState};

// Crate-level exports - TUI
pub use tui::{
    BoardScreen, DialogChoice, MAX_NAME_CHARS, Screen, ScreenTransition, SetupField, SetupScreen,
    TuiController, center_rect, digit_position, move_cursor, pad_right, run_tui,
};
