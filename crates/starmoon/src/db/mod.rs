//! Durable key-value storage for preferences and statistics.

mod error;
mod models;
mod repository;
mod schema;

pub use error::{DbError, DbErrorKind};
pub use models::{NewPreference, Preference};
pub use repository::PreferenceRepository;
