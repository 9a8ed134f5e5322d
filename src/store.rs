//! On-disk storage for the two solved registries.

use derive_more::{Display, Error};
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tictactoe_oracle_core::{OracleError, Registry, Symbol, classify_all};
use tracing::{debug, info, instrument, warn};

/// Both registries: one per symbol the computer may play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStore {
    computer_x: Registry,
    computer_o: Registry,
}

impl RegistryStore {
    /// File name holding the registry for a computer playing `symbol`.
    pub fn file_name(symbol: Symbol) -> &'static str {
        match symbol {
            Symbol::X => "registry_x.json",
            Symbol::O => "registry_o.json",
        }
    }

    /// Solves both registries from scratch. The two builds share nothing.
    #[instrument]
    pub fn build() -> Result<Self, StoreError> {
        let computer_x = classify_all(Symbol::X)?;
        let computer_o = classify_all(Symbol::O)?;
        info!(
            x_entries = computer_x.len(),
            o_entries = computer_o.len(),
            "Registries built"
        );
        Ok(Self {
            computer_x,
            computer_o,
        })
    }

    /// Loads both registries from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a file is missing, unreadable, corrupt, or
    /// was solved for the other symbol.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        Ok(Self {
            computer_x: load_registry(dir, Symbol::X)?,
            computer_o: load_registry(dir, Symbol::O)?,
        })
    }

    /// Writes both registries into `dir`, creating it if needed.
    ///
    /// Both files are staged next to their targets first; existing
    /// registries are only replaced once both staged writes succeed.
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<(), StoreError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            StoreError::new(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let mut staged = Vec::with_capacity(2);
        for registry in [&self.computer_x, &self.computer_o] {
            let target = dir.join(Self::file_name(registry.computer()));
            let staging = staging_path(&target);
            if let Err(e) = write_json(&staging, registry) {
                warn!(path = %staging.display(), "Staging failed, discarding staged files");
                for (path, _) in &staged {
                    let _ = std::fs::remove_file(path);
                }
                return Err(e);
            }
            staged.push((staging, target));
        }

        for (staging, target) in &staged {
            std::fs::rename(staging, target).map_err(|e| {
                StoreError::new(format!("Failed to replace {}: {}", target.display(), e))
            })?;
        }
        info!("Registries saved");
        Ok(())
    }

    /// Loads the registries from `dir` unless `rebuild` is set or a file is
    /// missing, in which case both are rebuilt and saved.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn load_or_build(dir: impl AsRef<Path>, rebuild: bool) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let present = [Symbol::X, Symbol::O]
            .iter()
            .all(|&s| dir.join(Self::file_name(s)).is_file());

        if present && !rebuild {
            debug!("Loading existing registries");
            return Self::load(dir);
        }

        if rebuild {
            info!("Rebuilding registries on request");
        } else {
            info!("Registries missing, building");
        }
        let store = Self::build()?;
        store.save(dir)?;
        Ok(store)
    }

    /// Registry for a computer playing `symbol`.
    pub fn for_computer(&self, symbol: Symbol) -> &Registry {
        match symbol {
            Symbol::X => &self.computer_x,
            Symbol::O => &self.computer_o,
        }
    }
}

fn load_registry(dir: &Path, symbol: Symbol) -> Result<Registry, StoreError> {
    let path = dir.join(RegistryStore::file_name(symbol));
    let registry: Registry = read_json(&path)?;
    if registry.computer() != symbol {
        warn!(path = %path.display(), found = %registry.computer(), "Registry symbol mismatch");
        return Err(StoreError::new(format!(
            "{} holds the registry for computer {}, expected {}",
            path.display(),
            registry.computer(),
            symbol
        )));
    }
    registry.validate()?;
    debug!(path = %path.display(), entries = registry.len(), "Registry loaded");
    Ok(registry)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| StoreError::new(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| StoreError::new(format!("Failed to parse {}: {}", path.display(), e)))
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string(value)
        .map_err(|e| StoreError::new(format!("Failed to serialize {}: {}", path.display(), e)))?;
    std::fs::write(path, content)
        .map_err(|e| StoreError::new(format!("Failed to write {}: {}", path.display(), e)))
}

/// Registry storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<OracleError> for StoreError {
    #[track_caller]
    fn from(err: OracleError) -> Self {
        Self::new(err.to_string())
    }
}
