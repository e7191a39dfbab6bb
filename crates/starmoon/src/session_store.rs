//! Typed access to persisted preferences and statistics.
//!
//! Values live in a [`KeyValueStore`] under fixed keys. Reads never fail: a
//! missing or malformed value yields the documented default. Writes are
//! fire-and-forget; a failed write is logged and the session carries on.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use derive_getters::Getters;
use derive_more::{Display, Error};
use starmoon_tictactoe::{PALETTE, Player, PlayerProfile, Statistics, Symbol};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, PreferenceRepository};

/// Storage keys.
pub mod keys {
    /// Display name of seat X.
    pub const PLAYER_X_NAME: &str = "player_x_name";
    /// Display name of seat O.
    pub const PLAYER_O_NAME: &str = "player_o_name";
    /// Glyph of seat X.
    pub const PLAYER_X_SYMBOL: &str = "player_x_symbol";
    /// Glyph of seat O.
    pub const PLAYER_O_SYMBOL: &str = "player_o_symbol";
    /// `true` or `false`.
    pub const SOUND_ENABLED: &str = "sound_enabled";
    /// JSON-encoded win/draw counters.
    pub const STATISTICS: &str = "statistics";
}

/// Durable string key-value storage.
pub trait KeyValueStore: std::fmt::Debug + Send {
    /// Reads the value under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, DbError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), DbError>;
}

/// In-process store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        let values = self
            .values
            .lock()
            .map_err(|e| DbError::read(key, format!("memory store poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DbError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| DbError::write(key, format!("memory store poisoned: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Everything restored at startup.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SavedSession {
    player_x: PlayerProfile,
    player_o: PlayerProfile,
    sound_enabled: bool,
    statistics: Statistics,
}

impl SavedSession {
    /// Returns the profile of `player`.
    pub fn profile(&self, player: Player) -> &PlayerProfile {
        match player {
            Player::X => &self.player_x,
            Player::O => &self.player_o,
        }
    }
}

impl Default for SavedSession {
    fn default() -> Self {
        Self {
            player_x: PlayerProfile::default_for(Player::X),
            player_o: PlayerProfile::default_for(Player::O),
            sound_enabled: true,
            statistics: Statistics::default(),
        }
    }
}

/// A stored statistics value that could not be used.
#[derive(Debug, Clone, Display, Error)]
#[display("Statistics error: {} at {}:{}", message, file, line)]
pub struct StatisticsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StatisticsError {
    /// Creates a new statistics error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Parses a stored statistics value.
///
/// Only a JSON object with exactly `x_wins`, `o_wins` and `draws`, each an
/// integer in `u32` range and each given once, is accepted.
///
/// # Errors
///
/// Returns [`StatisticsError`] describing the first problem found.
#[instrument(skip(raw))]
pub fn parse_statistics(raw: &str) -> Result<Statistics, StatisticsError> {
    if !raw.trim_start().starts_with('{') {
        return Err(StatisticsError::new("not a JSON object"));
    }
    serde_json::from_str(raw).map_err(|e| StatisticsError::new(e.to_string()))
}

fn name_key(player: Player) -> &'static str {
    match player {
        Player::X => keys::PLAYER_X_NAME,
        Player::O => keys::PLAYER_O_NAME,
    }
}

fn symbol_key(player: Player) -> &'static str {
    match player {
        Player::X => keys::PLAYER_X_SYMBOL,
        Player::O => keys::PLAYER_O_SYMBOL,
    }
}

/// Typed preferences over a [`KeyValueStore`].
#[derive(Debug)]
pub struct SessionStore {
    store: Box<dyn KeyValueStore>,
}

impl SessionStore {
    /// Wraps a key-value store.
    #[instrument(skip(store))]
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Reads a raw value, treating storage errors as absence.
    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read preference, using default");
                None
            }
        }
    }

    /// Writes a raw value, logging failures.
    fn write(&self, key: &str, value: &str) {
        match self.store.set(key, value) {
            Ok(()) => debug!(key, "Preference written"),
            Err(e) => warn!(key, error = %e, "Failed to write preference"),
        }
    }

    /// Display name of `player`. Any stored text is accepted, blank included.
    #[instrument(skip(self))]
    pub fn player_name(&self, player: Player) -> String {
        self.read(name_key(player))
            .unwrap_or_else(|| PlayerProfile::default_for(player).name().clone())
    }

    /// Persists the display name of `player`.
    #[instrument(skip(self))]
    pub fn set_player_name(&self, player: Player, name: &str) {
        self.write(name_key(player), name);
    }

    /// Symbol of `player`; values outside the palette fall back to the default.
    #[instrument(skip(self))]
    pub fn player_symbol(&self, player: Player) -> Symbol {
        match self.read(symbol_key(player)) {
            None => Symbol::default_for(player),
            Some(raw) => Symbol::parse(&raw).unwrap_or_else(|| {
                warn!(%player, value = %raw, "Stored symbol is not in the palette");
                Symbol::default_for(player)
            }),
        }
    }

    /// Persists the symbol of `player`.
    #[instrument(skip(self))]
    pub fn set_player_symbol(&self, player: Player, symbol: Symbol) {
        self.write(symbol_key(player), symbol.glyph());
    }

    /// Whether audio cues are on. Only `true` and `false` are recognised.
    #[instrument(skip(self))]
    pub fn sound_enabled(&self) -> bool {
        match self.read(keys::SOUND_ENABLED).as_deref() {
            None => true,
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                warn!(value = %other, "Stored sound flag is not a boolean");
                true
            }
        }
    }

    /// Persists the sound flag.
    #[instrument(skip(self))]
    pub fn set_sound_enabled(&self, enabled: bool) {
        self.write(keys::SOUND_ENABLED, if enabled { "true" } else { "false" });
    }

    /// Win and draw counters; malformed values load as zeros.
    #[instrument(skip(self))]
    pub fn statistics(&self) -> Statistics {
        let Some(raw) = self.read(keys::STATISTICS) else {
            return Statistics::default();
        };
        parse_statistics(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Stored statistics are malformed, starting from zero");
            Statistics::default()
        })
    }

    /// Persists the counters.
    #[instrument(skip(self))]
    pub fn set_statistics(&self, statistics: &Statistics) {
        match serde_json::to_string(statistics) {
            Ok(json) => self.write(keys::STATISTICS, &json),
            Err(e) => warn!(error = %e, "Failed to encode statistics"),
        }
    }

    /// Profile of `player` as stored.
    pub fn profile(&self, player: Player) -> PlayerProfile {
        PlayerProfile::new(self.player_name(player), self.player_symbol(player))
    }

    /// Restores the session saved in the database at `db_path`.
    ///
    /// Returns `None` without creating the file when nothing has been saved
    /// there yet.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if an existing file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.display()))]
    pub fn load_saved(db_path: &Path) -> Result<Option<SavedSession>, DbError> {
        if !db_path.exists() {
            info!("No saved database");
            return Ok(None);
        }
        let repository = PreferenceRepository::open(db_path.to_string_lossy().into_owned())?;
        Ok(Some(Self::new(repository).load()))
    }

    /// Restores every stored value.
    ///
    /// If both seats come back with the same glyph, seat O is moved to the
    /// first palette glyph seat X does not use.
    #[instrument(skip(self))]
    pub fn load(&self) -> SavedSession {
        let player_x = self.profile(Player::X);
        let mut player_o = self.profile(Player::O);

        if player_x.symbol() == player_o.symbol() {
            let free = (0..PALETTE.len())
                .filter_map(Symbol::from_index)
                .find(|s| s != player_x.symbol())
                .unwrap_or_else(|| Symbol::default_for(Player::O));
            warn!(
                clash = %player_x.symbol(),
                replacement = %free,
                "Both seats stored the same symbol"
            );
            player_o.set_symbol(free);
        }

        let session = SavedSession {
            player_x,
            player_o,
            sound_enabled: self.sound_enabled(),
            statistics: self.statistics(),
        };
        info!(
            x = %session.player_x.label(),
            o = %session.player_o.label(),
            sound = session.sound_enabled,
            games = session.statistics.total_games(),
            "Session restored"
        );
        session
    }
}
