//! Phase-specific typestate structs for tic-tac-toe.
//!
//! Each phase is its own type with phase-specific fields. A finished game
//! always carries an [`Outcome`], and only an in-progress game can accept
//! moves.

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, TicTacToeInvariants};
use super::rules;
use super::{Board, GameStatus, Outcome, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - ready to start.
///
/// The board is always empty.
#[derive(Debug, Clone, Default)]
pub struct GameSetup {
    board: Board,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the game with the first player (consumes setup, returns in-progress).
    #[instrument(skip(self))]
    pub fn start(self, first_player: Player) -> GameInProgress {
        GameInProgress {
            board: self.board,
            history: Vec::new(),
            to_move: first_player,
            first_player,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - can accept moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) to_move: Player,
    pub(crate) first_player: Player,
}

impl GameInProgress {
    /// Checks that `action` may be applied to this game.
    ///
    /// # Errors
    ///
    /// [`MoveError::SquareOccupied`] if the target is taken,
    /// [`MoveError::WrongPlayer`] if `action.player` is not on turn.
    #[instrument(skip(self))]
    pub fn validate(&self, action: &Move) -> Result<(), MoveError> {
        if !self.board.is_empty(action.position) {
            return Err(MoveError::SquareOccupied(action.position));
        }
        if action.player != self.to_move {
            return Err(MoveError::WrongPlayer(action.player));
        }
        Ok(())
    }

    /// Makes a move, consuming self and transitioning to the next state.
    ///
    /// Preconditions are always checked. Invariants are re-checked after the
    /// move in debug builds.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn make_move(self, action: Move) -> Result<GameResult, MoveError> {
        self.validate(&action)?;

        let mut game = self;
        game.board
            .set(action.position, Square::Occupied(action.player));
        game.history.push(action);
        game.to_move = game.to_move.opponent();

        #[cfg(debug_assertions)]
        TicTacToeInvariants::check_all(&game).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let outcome = match rules::evaluate(&game.board) {
            GameStatus::InProgress => {
                debug!(next = %game.to_move, "Game continues");
                return Ok(GameResult::InProgress(game));
            }
            GameStatus::Won { player, line } => Outcome::Winner { player, line },
            GameStatus::Draw => Outcome::Draw,
        };

        debug!(%outcome, "Game finished");
        Ok(GameResult::Finished(GameFinished {
            board: game.board,
            history: game.history,
            outcome,
            first_player: game.first_player,
        }))
    }

    /// Returns the current player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the player who opened this game.
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns valid positions.
    #[instrument(skip(self))]
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Replays moves from an empty board opened by `first_player`.
    ///
    /// Stops at the first move that finishes the game; later moves are ignored.
    #[instrument]
    pub fn replay(first_player: Player, moves: &[Move]) -> Result<GameResult, MoveError> {
        let mut game = GameSetup::new().start(first_player);

        for action in moves {
            match game.make_move(*action)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) => return Ok(GameResult::Finished(g)),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
///
/// The board is frozen: there is no way to place a mark on a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFinished {
    board: Board,
    history: Vec<Move>,
    outcome: Outcome,
    first_player: Player,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the player who opened this game.
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Restarts the game (consumes finished, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
