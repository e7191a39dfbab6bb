//! Game rules for tic-tac-toe.
//!
//! Pure functions for classifying a board. Rules are separated from board
//! storage so the typestate engine and the invariants can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner};

use super::{Board, GameStatus};
use tracing::instrument;

/// Classifies a board as in progress, won or drawn.
///
/// Total over every board: a win is reported for the first completed line
/// in [`LINES`] order, a full board with no completed line is a draw, and
/// anything else is in progress.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some((player, line)) = check_winner(board) {
        return GameStatus::Won { player, line };
    }
    if is_full(board) {
        return GameStatus::Draw;
    }
    GameStatus::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position, Square};

    fn board_from(marks: &str) -> Board {
        let mut squares = [Square::Empty; 9];
        for (i, c) in marks.chars().enumerate() {
            squares[i] = match c {
                'X' => Square::Occupied(Player::X),
                'O' => Square::Occupied(Player::O),
                _ => Square::Empty,
            };
        }
        Board::from_squares(squares)
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        assert_eq!(evaluate(&board_from("XOXOXOOXO")), GameStatus::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        let status = evaluate(&board_from("XXXOOXOXO"));
        assert!(matches!(status, GameStatus::Won { player: Player::X, .. }));
    }

    #[test]
    fn test_first_line_in_order_is_reported() {
        // Top row and left column are both complete; the row comes first.
        let status = evaluate(&board_from("XXXXOOX.O"));
        match status {
            GameStatus::Won { line, .. } => assert_eq!(line.indices(), [0, 1, 2]),
            other => panic!("expected win, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let board = board_from("XO.OX...X");
        assert_eq!(evaluate(&board), evaluate(&board.clone()));
        assert!(matches!(
            evaluate(&board),
            GameStatus::Won { line, .. } if line.contains(Position::Center)
        ));
    }
}
