//! Preference store errors.

use derive_more::{Display, Error};
use tracing::instrument;

/// Which preference store operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// The database file could not be opened.
    #[display("open")]
    Open,
    /// Schema migrations could not be applied.
    #[display("migration")]
    Migrate,
    /// A stored value could not be read.
    #[display("read")]
    Read,
    /// A value could not be written.
    #[display("write")]
    Write,
}

/// Preference store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Preference store {} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failed operation.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Reading the value under `key` failed.
    #[track_caller]
    pub fn read(key: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(DbErrorKind::Read, format!("key '{}': {}", key, cause))
    }

    /// Writing the value under `key` failed.
    #[track_caller]
    pub fn write(key: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(DbErrorKind::Write, format!("key '{}': {}", key, cause))
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Read, format!("Diesel error: {}", err))
    }
}
