//! Screen implementations.

mod board;
mod setup;

pub use board::{BoardScreen, DialogChoice};
pub use setup::{MAX_NAME_CHARS, SetupField, SetupScreen};
