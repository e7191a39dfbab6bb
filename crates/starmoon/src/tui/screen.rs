//! Screen trait and transition type for the UI state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::table::{Command, TableState};

/// The result of handling a key on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Nothing for the controller to do.
    Stay,
    /// Apply a command to the table.
    Command(Command),
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen.
///
/// Screens own only view state (focus, cursor, dialogs). Game state lives in
/// the [`TableState`] the controller passes in.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, table: &TableState);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, table: &TableState) -> ScreenTransition;

    /// Called after the controller applied a command from this screen.
    fn after_command(&mut self, _table: &TableState) {}
}
