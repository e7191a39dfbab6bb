//! Alternating turn invariant: seats alternate, starting with the first player.

use super::super::GameInProgress;
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// Move history must alternate seats, the first move belongs to the
/// configured first player, and `to_move` is the seat owed the next turn.
pub struct AlternatingTurnInvariant;

impl Invariant<GameInProgress> for AlternatingTurnInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let first = game.first_player();
        let history = game.history();

        if let Some(opening) = history.first()
            && opening.player != first
        {
            return false;
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        let expected_next = if history.len() % 2 == 0 {
            first
        } else {
            first.opponent()
        };

        game.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns starting with the first player"
    }
}
