//! Cumulative results across games.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Outcome, Player};

/// Win and draw counters.
///
/// Counters only ever go up. Deserialization is strict: all three fields
/// are required, unknown fields are refused, and values must fit in `u32`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(deny_unknown_fields)]
pub struct Statistics {
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl Statistics {
    /// Creates statistics with explicit counts.
    pub fn new(x_wins: u32, o_wins: u32, draws: u32) -> Self {
        Self {
            x_wins,
            o_wins,
            draws,
        }
    }

    /// Counts one finished game.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: &Outcome) {
        let counter = match outcome.winner() {
            Some(Player::X) => &mut self.x_wins,
            Some(Player::O) => &mut self.o_wins,
            None => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
        debug!(x_wins = self.x_wins, o_wins = self.o_wins, draws = self.draws, "Statistics updated");
    }

    /// Wins for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Total finished games.
    pub fn total_games(&self) -> u64 {
        u64::from(self.x_wins) + u64::from(self.o_wins) + u64::from(self.draws)
    }
}
