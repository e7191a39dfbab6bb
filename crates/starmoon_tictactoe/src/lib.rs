//! Star & Moon tic-tac-toe - pure game logic.
//!
//! Nothing in this crate performs I/O. The application crate owns
//! persistence, rendering and audio, and drives the state machine here
//! through [`AnyGame::place`] and [`AnyGame::reset`].
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Square`], [`Player`], [`Position`], [`Line`]
//! - **Rules**: [`rules::evaluate`] classifies any board as in-progress, won or drawn
//! - **Typestate**: [`GameSetup`] → [`GameInProgress`] → [`GameFinished`]
//! - **Turn controller**: [`AnyGame`], the serializable wrapper used by the UI
//! - **Statistics**: [`Statistics`], monotonic win/draw counters
//! - **Profiles**: [`PlayerProfile`] and the fixed symbol [`PALETTE`]
//!
//! # Example
//!
//! ```
//! use starmoon_tictactoe::{AnyGame, GameStatus, Player, Position};
//!
//! let mut game = AnyGame::new(Player::X);
//! for pos in [0, 4, 1, 3, 2] {
//!     game = game.place(Position::from_index(pos).unwrap()).into_game();
//! }
//! assert!(matches!(game.status(), GameStatus::Won { player: Player::X, .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod invariants;
mod position;
mod profile;
mod stats;
mod types;
mod typestate;
mod wrapper;

pub mod rules;

pub use action::{Move, MoveError};
pub use invariants::{
    AlternatingTurnInvariant, BalancedMarksInvariant, Invariant, InvariantSet,
    InvariantViolation, MonotonicBoardInvariant, TicTacToeInvariants,
};
pub use position::Position;
pub use profile::{PALETTE, PlayerProfile, Symbol};
pub use stats::Statistics;
pub use types::{Board, GameStatus, Line, Outcome, Player, Square};
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup};
pub use wrapper::{AnyGame, Placement};
