//! Database repository for the preferences table.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::KeyValueStore;
use crate::db::{DbError, DbErrorKind, NewPreference, Preference, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite-backed key-value repository.
///
/// Each call opens its own connection, so the repository is cheap to clone
/// and holds no open handle between events.
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    db_path: String,
}

impl PreferenceRepository {
    /// Creates a repository for the database at `db_path` and applies any
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Opening PreferenceRepository");
        let repo = Self { db_path };
        repo.run_migrations()?;
        Ok(repo)
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| {
                DbError::new(
                    DbErrorKind::Open,
                    format!("Failed to connect to '{}': {}", self.db_path, e),
                )
            })
    }

    /// Applies pending schema migrations.
    #[instrument(skip(self))]
    fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| {
                DbError::new(DbErrorKind::Migrate, format!("Migration failed: {}", e))
            })?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Loads a single row by key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find(&self, key: &str) -> Result<Option<Preference>, DbError> {
        let mut conn = self.connection()?;

        let row = schema::preferences::table
            .find(key)
            .select(Preference::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| DbError::read(key, e))?;

        debug!(found = row.is_some(), "Preference lookup");
        Ok(row)
    }

    /// Inserts or replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, value))]
    pub fn upsert(&self, key: &str, value: &str) -> Result<Preference, DbError> {
        let mut conn = self.connection()?;
        let row = NewPreference::new(
            key.to_string(),
            value.to_string(),
            chrono::Utc::now().naive_utc(),
        );

        let stored = diesel::insert_into(schema::preferences::table)
            .values(&row)
            .on_conflict(schema::preferences::key)
            .do_update()
            .set(&row)
            .returning(Preference::as_returning())
            .get_result(&mut conn)
            .map_err(|e| DbError::write(key, e))?;

        debug!(key = %stored.key(), "Preference stored");
        Ok(stored)
    }

    /// Lists every stored row ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<Preference>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::preferences::table
            .order(schema::preferences::key.asc())
            .select(Preference::as_select())
            .load(&mut conn)?;

        info!(count = rows.len(), "Preferences loaded");
        Ok(rows)
    }
}

impl KeyValueStore for PreferenceRepository {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.find(key)?.map(|row| row.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.upsert(key, value).map(|_| ())
    }
}
