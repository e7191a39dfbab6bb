//! Win detection logic for tic-tac-toe.

use super::super::{Board, Line, Player, Position, Square};
use tracing::instrument;

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    Line::new(Position::TopLeft, Position::TopCenter, Position::TopRight),
    Line::new(Position::MiddleLeft, Position::Center, Position::MiddleRight),
    Line::new(
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ),
    // Columns
    Line::new(Position::TopLeft, Position::MiddleLeft, Position::BottomLeft),
    Line::new(Position::TopCenter, Position::Center, Position::BottomCenter),
    Line::new(
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ),
    // Diagonals
    Line::new(Position::TopLeft, Position::Center, Position::BottomRight),
    Line::new(Position::TopRight, Position::Center, Position::BottomLeft),
];

/// Checks if there is a winner on the board.
///
/// Returns the player and the first completed line in [`LINES`] order,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Player, Line)> {
    for line in LINES {
        let [a, b, c] = line.positions();
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            return sq.player().map(|player| (player, line));
        }
    }

    None
}
