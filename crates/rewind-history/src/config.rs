/// Configuration for history managers.
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// Maximum number of past snapshots kept when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 50;

/// Environment variable that overrides the configured capacity.
pub const CAPACITY_ENV_VAR: &str = "REWIND_HISTORY_CAPACITY";

/// Configuration for the history system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Max snapshots retained for undo. Redo entries are not counted.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl HistoryConfig {
    /// Rejects configurations no history can satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::ZeroCapacity`] when `capacity` is 0.
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        Ok(())
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON,
    /// or describes an invalid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read history config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse history config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid history config: {}", path.display()))?;
        Ok(config)
    }

    /// Loads config from `path`, falling back to defaults on any error.
    ///
    /// Never writes to disk; a broken file is left as it is.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default history config: {e:#}");
                Self::default()
            }
        }
    }

    /// Applies the `REWIND_HISTORY_CAPACITY` environment variable, if set.
    ///
    /// Values that are not a positive integer are ignored.
    pub fn with_env_override(self) -> Self {
        match std::env::var(CAPACITY_ENV_VAR) {
            Ok(raw) => self.with_capacity_override(&raw),
            Err(_) => self,
        }
    }

    fn with_capacity_override(mut self, raw: &str) -> Self {
        match raw.trim().parse::<usize>() {
            Ok(capacity) if capacity > 0 => self.capacity = capacity,
            _ => tracing::warn!("Ignoring invalid {CAPACITY_ENV_VAR} value: {raw:?}"),
        }
        self
    }
}
