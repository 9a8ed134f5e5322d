//! Application configuration loaded from TOML.

use crate::settings::{FirstPlayer, Level};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for the game application.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Directory holding the persisted registries.
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,

    /// Opponent difficulty.
    #[serde(default)]
    level: Level,

    /// Who plays X. Asked interactively when unset.
    #[serde(default)]
    first_player: Option<FirstPlayer>,

    /// Rebuild registries at startup even if files exist.
    #[serde(default)]
    rebuild: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            level: Level::default(),
            first_player: None,
            rebuild: false,
        }
    }
}

impl OracleConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(level = %config.level, data_dir = %config.data_dir.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the data directory.
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    /// Overrides the difficulty.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Overrides who moves first.
    pub fn with_first_player(mut self, first_player: FirstPlayer) -> Self {
        self.first_player = Some(first_player);
        self
    }

    /// Forces a registry rebuild.
    pub fn with_rebuild(mut self, rebuild: bool) -> Self {
        self.rebuild = rebuild;
        self
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
    fn test_empty_toml_is_default() {
        let config: OracleConfig = toml::from_str("").unwrap();
        assert_eq!(config, OracleConfig::default());
    }

    #[test]
    fn test_parses_all_fields() {
        let config: OracleConfig = toml::from_str(
            r#"
            data_dir = "/tmp/oracle"
            level = "medium"
            first_player = "computer"
            rebuild = true
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir(), &PathBuf::from("/tmp/oracle"));
        assert_eq!(*config.level(), Level::Medium);
        assert_eq!(*config.first_player(), Some(FirstPlayer::Computer));
        assert!(*config.rebuild());
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(toml::from_str::<OracleConfig>("level = \"brutal\"").is_err());
    }

    #[test]
    fn test_overrides() {
        let config = OracleConfig::default()
            .with_level(Level::Easy)
            .with_first_player(FirstPlayer::User);
        assert_eq!(*config.level(), Level::Easy);
        assert_eq!(*config.first_player(), Some(FirstPlayer::User));
    }
}
