//! Balanced marks invariant: the first player leads by at most one mark.

use super::super::GameInProgress;
use super::Invariant;

/// Invariant: the first player has the same number of marks as the second
/// player, or exactly one more.
pub struct BalancedMarksInvariant;

impl Invariant<GameInProgress> for BalancedMarksInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let first = game.first_player();
        let leader = game.board().count(first);
        let trailer = game.board().count(first.opponent());
        leader == trailer || leader == trailer + 1
    }

    fn description() -> &'static str {
        "First player leads by at most one mark"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameSetup, Player, Position, Square};

    #[test]
    fn test_fresh_game_is_balanced() {
        let game = GameSetup::new().start(Player::O);
        assert!(BalancedMarksInvariant::holds(&game));
    }

    #[test]
    fn test_second_player_ahead_violates() {
        let mut game = GameSetup::new().start(Player::X);
        game.board.set(Position::Center, Square::Occupied(Player::O));
        assert!(!BalancedMarksInvariant::holds(&game));
    }
}
