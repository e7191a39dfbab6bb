//! Launcher configuration: optional TOML file overridden by CLI flags.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use starmoon_tictactoe::Player;
use tracing::{debug, info, instrument};

use crate::audio::AudioBackend;

/// Which seat opens each game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    /// Seat X opens.
    #[default]
    X,
    /// Seat O opens.
    O,
}

impl From<FirstPlayer> for Player {
    fn from(first: FirstPlayer) -> Self {
        match first {
            FirstPlayer::X => Player::X,
            FirstPlayer::O => Player::O,
        }
    }
}

/// Resolved launcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite file holding preferences and statistics.
    #[serde(default = "default_db_path")]
    db_path: PathBuf,

    /// Log file; the terminal belongs to the UI.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Seat that opens each game.
    #[serde(default)]
    first_player: FirstPlayer,

    /// Audio backend for cues.
    #[serde(default)]
    audio: AudioBackend,
}

#[instrument]
fn default_db_path() -> PathBuf {
    PathBuf::from("starmoon.db")
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("starmoon.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_file: default_log_file(),
            first_player: FirstPlayer::default(),
            audio: AudioBackend::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--db-path`
    pub db_path: Option<PathBuf>,
    /// `--log-file`
    pub log_file: Option<PathBuf>,
    /// `--first-player`
    pub first_player: Option<FirstPlayer>,
    /// `--audio`
    pub audio: Option<AudioBackend>,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(db_path = %config.db_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise the defaults.
    ///
    /// A file that exists but cannot be parsed is an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(db_path) = overrides.db_path {
            self.db_path = db_path;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = log_file;
        }
        if let Some(first_player) = overrides.first_player {
            self.first_player = first_player;
        }
        if let Some(audio) = overrides.audio {
            self.audio = audio;
        }
        self
    }

    /// Database path as the string diesel expects.
    pub fn database_url(&self) -> String {
        self.db_path.to_string_lossy().into_owned()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str("first_player = \"o\"\naudio = \"silent\"\n")
            .expect("valid config");
        assert_eq!(*config.first_player(), FirstPlayer::O);
        assert_eq!(*config.audio(), AudioBackend::Silent);
        assert_eq!(config.db_path(), &PathBuf::from("starmoon.db"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<AppConfig>("colour = \"blue\"\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = AppConfig::default().with_overrides(ConfigOverrides {
            db_path: Some(PathBuf::from("other.db")),
            audio: Some(AudioBackend::Tone),
            ..Default::default()
        });
        assert_eq!(config.database_url(), "other.db");
        assert_eq!(*config.audio(), AudioBackend::Tone);
        assert_eq!(*config.first_player(), FirstPlayer::X);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_or_default("/definitely/not/here/starmoon.toml")
            .expect("defaults");
        assert_eq!(config, AppConfig::default());
    }
}
