//! TUI controller: owns the table, routes keys, and carries out effects.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::audio::CuePlayer;
use crate::session_store::SessionStore;
use crate::table::{Command, Effect, Stage, TableState};
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::screens::{BoardScreen, SetupScreen};

/// Active screen, tracking the table's stage.
#[derive(Debug)]
enum ActiveScreen {
    Setup(SetupScreen),
    Board(BoardScreen),
}

impl ActiveScreen {
    fn for_stage(stage: Stage) -> Self {
        match stage {
            Stage::Setup => ActiveScreen::Setup(SetupScreen::new()),
            Stage::Playing => ActiveScreen::Board(BoardScreen::new()),
        }
    }

    fn stage(&self) -> Stage {
        match self {
            ActiveScreen::Setup(_) => Stage::Setup,
            ActiveScreen::Board(_) => Stage::Playing,
        }
    }

    fn screen(&self) -> &dyn Screen {
        match self {
            ActiveScreen::Setup(s) => s,
            ActiveScreen::Board(s) => s,
        }
    }

    fn screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            ActiveScreen::Setup(s) => s,
            ActiveScreen::Board(s) => s,
        }
    }
}

/// Controller that drives the UI state machine.
///
/// Call [`TuiController::run`] to start the event loop.
#[derive(Debug)]
pub struct TuiController {
    table: TableState,
    store: SessionStore,
    cues: CuePlayer,
    screen: ActiveScreen,
}

impl TuiController {
    /// Creates a controller on the screen matching the table's stage.
    #[instrument(skip_all)]
    pub fn new(table: TableState, store: SessionStore, cues: CuePlayer) -> Self {
        info!("Creating TuiController");
        let screen = ActiveScreen::for_stage(*table.stage());
        Self {
            table,
            store,
            cues,
            screen,
        }
    }

    /// The current table state.
    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// The preference store effects are written to.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Stage of the screen currently shown.
    pub fn screen_stage(&self) -> Stage {
        self.screen.stage()
    }

    /// Draws the active screen.
    pub fn render(&self, frame: &mut Frame) {
        self.screen.screen().render(frame, &self.table);
    }

    /// Applies `command` and carries out its effects.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, command: Command) {
        let effects = self.table.apply(command);
        for effect in &effects {
            match effect {
                Effect::Cue(cue) => self.cues.play(*cue),
                other => other.persist(&self.store),
            }
        }

        if self.screen.stage() != *self.table.stage() {
            debug!(stage = ?self.table.stage(), "Switching screen");
            self.screen = ActiveScreen::for_stage(*self.table.stage());
        }
        self.screen.screen_mut().after_command(&self.table);
    }

    /// Routes a key press. Returns `false` once the user has asked to quit.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.screen.screen_mut().handle_key(key, &self.table) {
            ScreenTransition::Stay => true,
            ScreenTransition::Command(command) => {
                self.dispatch(command);
                true
            }
            ScreenTransition::Quit => {
                info!("Quit requested");
                false
            }
        }
    }

    /// Runs the event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting event loop");

        loop {
            terminal.draw(|f| self.render(f))?;

            // Poll for input with short timeout to keep the loop responsive.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if !self.handle_key(key) {
                    return Ok(());
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }
}
