//! Board screen: the grid, turn banner, statistics, rules and result dialog.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use starmoon_tictactoe::{GameStatus, Player, Position, Square};
use tracing::{debug, info, instrument};

use crate::table::{Command, TableState};
use crate::tui::input::{digit_position, move_cursor};
use crate::tui::layout::{center_rect, pad_right};
use crate::tui::screen::{Screen, ScreenTransition};

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;

const RULES: &str = "Players take turns placing their symbol on an empty cell. \
Three in a row, column or diagonal wins. \
A full board with no line is a draw.";

/// Buttons of the result dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    /// Clear the board and play again.
    NewGame,
    /// Dismiss the dialog and look at the final board.
    Close,
}

impl DialogChoice {
    fn toggle(self) -> Self {
        match self {
            Self::NewGame => Self::Close,
            Self::Close => Self::NewGame,
        }
    }
}

/// State for the board screen.
#[derive(Debug)]
pub struct BoardScreen {
    cursor: Position,
    dialog: Option<DialogChoice>,
    was_over: bool,
}

impl Default for BoardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardScreen {
    /// Creates the screen with the cursor on the center cell.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing BoardScreen");
        Self {
            cursor: Position::Center,
            dialog: None,
            was_over: false,
        }
    }

    /// The highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// The selected dialog button, if the dialog is open.
    pub fn dialog(&self) -> Option<DialogChoice> {
        self.dialog
    }

    fn handle_dialog_key(&mut self, key: KeyEvent, choice: DialogChoice) -> ScreenTransition {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.dialog = Some(choice.toggle());
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.dialog = None;
                match choice {
                    DialogChoice::NewGame => ScreenTransition::Command(Command::Reset),
                    DialogChoice::Close => ScreenTransition::Stay,
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.dialog = None;
                ScreenTransition::Command(Command::Reset)
            }
            KeyCode::Esc => {
                self.dialog = None;
                ScreenTransition::Stay
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, table: &TableState) {
        let grid_area = center_rect(area, CELL_WIDTH * 3 + 2, CELL_HEIGHT * 3 + 2);
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(grid_area);
        frame.render_widget(block, grid_area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(CELL_HEIGHT); 3])
            .split(inner);

        let winning_line = table.game().winning_line();
        for (r, row_area) in rows.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(CELL_WIDTH); 3])
                .split(*row_area);
            for (c, cell_area) in cols.iter().enumerate() {
                if let Some(pos) = Position::from_row_col(r, c) {
                    let winning = winning_line.is_some_and(|line| line.contains(pos));
                    self.render_cell(frame, *cell_area, table, pos, winning);
                }
            }
        }
    }

    fn render_cell(
        &self,
        frame: &mut Frame,
        area: Rect,
        table: &TableState,
        pos: Position,
        winning: bool,
    ) {
        let (text, base_style) = match table.game().board().get(pos) {
            Square::Empty => (
                (pos.to_index() + 1).to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            Square::Occupied(player) => (
                table.profile(player).symbol().glyph().to_string(),
                Style::default()
                    .fg(player_color(player))
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let highlight = if winning {
            Some(Style::default().bg(Color::Green).fg(Color::Black))
        } else if pos == self.cursor && !table.game().is_over() {
            Some(Style::default().bg(Color::White).fg(Color::Black))
        } else {
            None
        };
        let style = highlight.map_or(base_style, |h| base_style.patch(h));

        let cell = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
            .alignment(Alignment::Center)
            .style(highlight.unwrap_or_default());
        frame.render_widget(cell, area);
    }

    fn render_side(&self, frame: &mut Frame, area: Rect, table: &TableState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(3)])
            .split(area);

        let stats = table.statistics();
        let mut lines: Vec<Line> = Player::ALL
            .iter()
            .map(|p| {
                Line::from(vec![
                    Span::styled(
                        pad_right(&table.profile(*p).label(), 24),
                        Style::default().fg(player_color(*p)),
                    ),
                    Span::raw(format!("{:>4}", stats.wins(*p))),
                ])
            })
            .collect();
        lines.push(Line::from(vec![
            Span::raw(pad_right("Draws", 24)),
            Span::raw(format!("{:>4}", stats.draws())),
        ]));
        let stats_panel =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Score"));
        frame.render_widget(stats_panel, chunks[0]);

        let rules = Paragraph::new(RULES)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title("Rules"));
        frame.render_widget(rules, chunks[1]);
    }

    fn render_dialog(&self, frame: &mut Frame, table: &TableState, choice: DialogChoice) {
        let message = match table.game().status() {
            GameStatus::Won { player, .. } => format!("{} wins!", table.profile(player).label()),
            GameStatus::Draw => "Draw!".to_string(),
            GameStatus::InProgress => return,
        };

        let button = |label: &'static str, selected: bool| {
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Span::styled(label, style)
        };

        let area = center_rect(frame.area(), 36, 7);
        frame.render_widget(Clear, area);
        let dialog = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                message,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                button("[ New game ]", choice == DialogChoice::NewGame),
                Span::raw("  "),
                button("[ Close ]", choice == DialogChoice::Close),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Game over")
                .style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(dialog, area);
    }
}

fn player_color(player: Player) -> Color {
    match player {
        Player::X => Color::Blue,
        Player::O => Color::Magenta,
    }
}

impl Screen for BoardScreen {
    #[instrument(skip(self, frame, table))]
    fn render(&self, frame: &mut Frame, table: &TableState) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
            ])
            .split(area);

        let banner = Paragraph::new(table.banner())
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(31), Constraint::Length(32)])
            .split(chunks[1]);
        self.render_grid(frame, body[0], table);
        self.render_side(frame, body[1], table);

        let sound = if *table.sound_enabled() { "on" } else { "off" };
        let help = Paragraph::new(format!(
            "←↑↓→/1-9: Move | Enter: Place | R: Reset | C: Players | S: Sound ({}) | Q: Quit",
            sound
        ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        if let Some(choice) = self.dialog {
            self.render_dialog(frame, table, choice);
        }
    }

    #[instrument(skip(self, key, _table))]
    fn handle_key(&mut self, key: KeyEvent, _table: &TableState) -> ScreenTransition {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return ScreenTransition::Quit;
        }
        if let Some(choice) = self.dialog {
            return self.handle_dialog_key(key, choice);
        }

        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = move_cursor(self.cursor, key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                ScreenTransition::Command(Command::Place(self.cursor))
            }
            KeyCode::Char('r') | KeyCode::Char('R') => ScreenTransition::Command(Command::Reset),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                ScreenTransition::Command(Command::ChangePlayers)
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                ScreenTransition::Command(Command::ToggleSound)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                info!("Leaving board screen");
                ScreenTransition::Quit
            }
            code => match digit_position(code) {
                Some(pos) => {
                    self.cursor = pos;
                    ScreenTransition::Command(Command::Place(pos))
                }
                None => ScreenTransition::Stay,
            },
        }
    }

    fn after_command(&mut self, table: &TableState) {
        let over = table.game().is_over();
        if over && !self.was_over {
            debug!("Game over, opening result dialog");
            self.dialog = Some(DialogChoice::NewGame);
        } else if !over {
            self.dialog = None;
        }
        self.was_over = over;
    }
}
