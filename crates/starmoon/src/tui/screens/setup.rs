//! Setup screen: names, symbols, sound, and the start button.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use starmoon_tictactoe::Player;
use tracing::{debug, instrument};

use crate::table::{Command, TableState};
use crate::tui::layout::pad_right;
use crate::tui::screen::{Screen, ScreenTransition};

/// Longest name the form accepts, in characters.
pub const MAX_NAME_CHARS: usize = 20;

/// Focusable rows of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    /// Seat X name.
    XName,
    /// Seat X symbol.
    XSymbol,
    /// Seat O name.
    OName,
    /// Seat O symbol.
    OSymbol,
    /// Sound flag.
    Sound,
    /// Start button.
    Start,
}

impl SetupField {
    const ORDER: [SetupField; 6] = [
        SetupField::XName,
        SetupField::XSymbol,
        SetupField::OName,
        SetupField::OSymbol,
        SetupField::Sound,
        SetupField::Start,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// State for the setup screen.
#[derive(Debug)]
pub struct SetupScreen {
    focus: SetupField,
}

impl Default for SetupScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupScreen {
    /// Creates the screen with the first name field focused.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing SetupScreen");
        Self {
            focus: SetupField::XName,
        }
    }

    /// The focused row.
    pub fn focus(&self) -> SetupField {
        self.focus
    }

    fn edit_name(&self, player: Player, key: KeyCode, table: &TableState) -> ScreenTransition {
        let mut name = table.profile(player).name().clone();
        match key {
            KeyCode::Char(c) if !c.is_control() => {
                if name.chars().count() >= MAX_NAME_CHARS {
                    return ScreenTransition::Stay;
                }
                name.push(c);
            }
            KeyCode::Backspace => {
                if name.pop().is_none() {
                    return ScreenTransition::Stay;
                }
            }
            _ => return ScreenTransition::Stay,
        }
        ScreenTransition::Command(Command::Rename(player, name))
    }

    fn row(&self, field: SetupField, table: &TableState) -> ListItem<'static> {
        let focused = self.focus == field;
        let text = match field {
            SetupField::XName | SetupField::OName => {
                let player = if field == SetupField::XName {
                    Player::X
                } else {
                    Player::O
                };
                let cursor = if focused { "_" } else { "" };
                format!(
                    "{} name:    {}{}",
                    player,
                    table.profile(player).name(),
                    cursor
                )
            }
            SetupField::XSymbol | SetupField::OSymbol => {
                let player = if field == SetupField::XSymbol {
                    Player::X
                } else {
                    Player::O
                };
                let glyph = pad_right(table.profile(player).symbol().glyph(), 2);
                format!("{} symbol:  ◀ {} ▶", player, glyph)
            }
            SetupField::Sound => format!(
                "Sound:     [ {} ]",
                if *table.sound_enabled() { "on" } else { "off" }
            ),
            SetupField::Start => {
                if table.can_start() {
                    "[ Start game ]".to_string()
                } else {
                    "[ Start game ]  both players need a name".to_string()
                }
            }
        };

        let style = if field == SetupField::Start && !table.can_start() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        ListItem::new(Line::from(Span::styled(text, style)))
    }
}

impl Screen for SetupScreen {
    #[instrument(skip(self, frame, table))]
    fn render(&self, frame: &mut Frame, table: &TableState) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Star & Moon Tic-Tac-Toe")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = SetupField::ORDER
            .iter()
            .map(|field| self.row(*field, table))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Players"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.focus.index()));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let help = Paragraph::new("↑↓/Tab: Move | Type: Name | ←→: Symbol | Enter: Select | Esc: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, table))]
    fn handle_key(&mut self, key: KeyEvent, table: &TableState) -> ScreenTransition {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return ScreenTransition::Quit;
        }

        match key.code {
            KeyCode::Esc => return ScreenTransition::Quit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return ScreenTransition::Stay;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                return ScreenTransition::Stay;
            }
            _ => {}
        }

        match self.focus {
            SetupField::XName | SetupField::OName => {
                let player = if self.focus == SetupField::XName {
                    Player::X
                } else {
                    Player::O
                };
                if key.code == KeyCode::Enter {
                    self.focus = self.focus.next();
                    return ScreenTransition::Stay;
                }
                self.edit_name(player, key.code, table)
            }
            SetupField::XSymbol | SetupField::OSymbol => {
                let player = if self.focus == SetupField::XSymbol {
                    Player::X
                } else {
                    Player::O
                };
                match key.code {
                    KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                        ScreenTransition::Command(Command::PickSymbol(
                            player,
                            table.neighbour_symbol(player, true),
                        ))
                    }
                    KeyCode::Left => ScreenTransition::Command(Command::PickSymbol(
                        player,
                        table.neighbour_symbol(player, false),
                    )),
                    _ => ScreenTransition::Stay,
                }
            }
            SetupField::Sound => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                    ScreenTransition::Command(Command::ToggleSound)
                }
                _ => ScreenTransition::Stay,
            },
            SetupField::Start => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => ScreenTransition::Command(Command::Start),
                _ => ScreenTransition::Stay,
            },
        }
    }
}
