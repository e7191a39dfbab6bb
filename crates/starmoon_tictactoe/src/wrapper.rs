//! Serializable turn controller over the typestate phases.
//!
//! [`AnyGame`] is the state machine the UI drives: it is either awaiting a
//! player's move or finished. Every transition takes the game by value and
//! hands back the next one, so a rejected move simply returns the same game.

use super::action::{Move, MoveError};
use super::position::Position;
use super::types::{Board, GameStatus, Line, Player};
use super::typestate::{GameFinished, GameInProgress, GameResult, GameSetup};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Serializable wrapper for a game in any playable phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyGame {
    /// Awaiting the move of [`GameInProgress::to_move`].
    InProgress(GameInProgress),
    /// Finished; the board is frozen until [`AnyGame::reset`].
    Finished(GameFinished),
}

/// Result of a move request against an [`AnyGame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The mark was placed.
    Accepted {
        /// The game after the move.
        game: AnyGame,
        /// The applied move.
        mov: Move,
    },
    /// The request was illegal; `game` is unchanged.
    Rejected {
        /// The unchanged game.
        game: AnyGame,
        /// Why the request was ignored.
        reason: MoveError,
    },
}

impl Placement {
    /// Returns the game after the request, accepted or not.
    pub fn game(&self) -> &AnyGame {
        match self {
            Placement::Accepted { game, .. } | Placement::Rejected { game, .. } => game,
        }
    }

    /// Consumes the placement, returning the game.
    pub fn into_game(self) -> AnyGame {
        match self {
            Placement::Accepted { game, .. } | Placement::Rejected { game, .. } => game,
        }
    }

    /// Returns true if the move was applied.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Placement::Accepted { .. })
    }
}

impl From<GameInProgress> for AnyGame {
    fn from(game: GameInProgress) -> Self {
        AnyGame::InProgress(game)
    }
}

impl From<GameFinished> for AnyGame {
    fn from(game: GameFinished) -> Self {
        AnyGame::Finished(game)
    }
}

impl From<GameResult> for AnyGame {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::InProgress(g) => g.into(),
            GameResult::Finished(g) => g.into(),
        }
    }
}

impl AnyGame {
    /// Creates an empty game awaiting `first_player`.
    #[instrument]
    pub fn new(first_player: Player) -> Self {
        GameSetup::new().start(first_player).into()
    }

    /// Requests a mark at `pos` for the player on turn.
    ///
    /// Occupied squares and finished games are rejected without touching
    /// the state.
    #[instrument(skip(self))]
    pub fn place(self, pos: Position) -> Placement {
        match self {
            AnyGame::InProgress(game) => {
                let mov = Move::new(game.to_move(), pos);
                match game.clone().make_move(mov) {
                    Ok(result) => {
                        debug!(%mov, "Move accepted");
                        Placement::Accepted {
                            game: result.into(),
                            mov,
                        }
                    }
                    Err(reason) => {
                        debug!(%reason, "Move rejected");
                        Placement::Rejected {
                            game: AnyGame::InProgress(game),
                            reason,
                        }
                    }
                }
            }
            finished @ AnyGame::Finished(_) => {
                debug!(position = %pos, "Move rejected, game is over");
                Placement::Rejected {
                    game: finished,
                    reason: MoveError::GameOver,
                }
            }
        }
    }

    /// Requests a mark at a raw board index (0-8).
    #[instrument(skip(self))]
    pub fn place_index(self, index: usize) -> Placement {
        match Position::from_index(index) {
            Some(pos) => self.place(pos),
            None => Placement::Rejected {
                game: self,
                reason: MoveError::OutOfBounds(index),
            },
        }
    }

    /// Returns a fresh game with the same first player.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Self {
        Self::new(self.first_player())
    }

    /// Returns the board for any game phase.
    pub fn board(&self) -> &Board {
        match self {
            AnyGame::InProgress(g) => g.board(),
            AnyGame::Finished(g) => g.board(),
        }
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        match self {
            AnyGame::InProgress(g) => g.history(),
            AnyGame::Finished(g) => g.history(),
        }
    }

    /// Returns the player who opened this game.
    pub fn first_player(&self) -> Player {
        match self {
            AnyGame::InProgress(g) => g.first_player(),
            AnyGame::Finished(g) => g.first_player(),
        }
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        match self {
            AnyGame::InProgress(_) => GameStatus::InProgress,
            AnyGame::Finished(g) => (*g.outcome()).into(),
        }
    }

    /// Returns true if the game is over.
    pub fn is_over(&self) -> bool {
        matches!(self, AnyGame::Finished(_))
    }

    /// Returns the player on turn, if the game is in progress.
    pub fn to_move(&self) -> Option<Player> {
        match self {
            AnyGame::InProgress(g) => Some(g.to_move()),
            AnyGame::Finished(_) => None,
        }
    }

    /// Returns the winning line, if the game was won.
    pub fn winning_line(&self) -> Option<Line> {
        match self.status() {
            GameStatus::Won { line, .. } => Some(line),
            _ => None,
        }
    }
}

impl Default for AnyGame {
    fn default() -> Self {
        Self::new(Player::X)
    }
}
