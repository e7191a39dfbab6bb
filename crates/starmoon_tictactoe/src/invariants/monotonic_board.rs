//! Monotonic board invariant: squares never change once set.

use super::super::{Board, GameInProgress, Square};
use super::Invariant;

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Replaying the history onto an empty board must never hit an occupied
/// square and must reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<GameInProgress> for MonotonicBoardInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut reconstructed = Board::new();

        for mov in game.history() {
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.player));
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic and match the move history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameResult, GameSetup, Move, Player, Position};

    #[test]
    fn test_single_move_holds() {
        let game = GameSetup::new().start(Player::X);
        let action = Move::new(Player::X, Position::Center);

        match game.make_move(action) {
            Ok(GameResult::InProgress(game)) => assert!(MonotonicBoardInvariant::holds(&game)),
            other => panic!("Expected in-progress game, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupted_board_violates() {
        let game = GameSetup::new().start(Player::X);
        let action = Move::new(Player::X, Position::Center);

        let Ok(GameResult::InProgress(mut game)) = game.make_move(action) else {
            panic!("Expected in-progress game");
        };
        game.board.set(Position::Center, Square::Occupied(Player::O));

        assert!(!MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_mark_missing_from_history_violates() {
        let game = GameSetup::new().start(Player::X);
        let action = Move::new(Player::X, Position::Center);

        let Ok(GameResult::InProgress(mut game)) = game.make_move(action) else {
            panic!("Expected in-progress game");
        };
        game.board.set(Position::TopLeft, Square::Occupied(Player::O));

        assert!(!MonotonicBoardInvariant::holds(&game));
    }
}
