//! # Storage Configuration
//!
//! Tunables for [`crate::ComponentSet`], loadable from TOML:
//!
//! ```toml
//! initial_capacity = 4096
//! duplicates = "replace"
//! ```
//!
//! Every key is optional; unknown keys are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Largest accepted `initial_capacity`.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// What an insert does when the identifier is already present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the stored record, drop the new one.
    #[default]
    Keep,
    /// Overwrite the stored record.
    Replace,
    /// Fail with [`crate::StorageError::DuplicateId`].
    Reject,
}

/// Construction parameters for a [`crate::ComponentSet`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Records reserved up front.
    pub initial_capacity: usize,
    /// Insert behavior for identifiers already present.
    pub duplicates: DuplicatePolicy,
}

impl StorageConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input or unknown keys, and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`StorageConfig::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            initial_capacity = config.initial_capacity,
            duplicates = ?config.duplicates,
            "storage configuration loaded"
        );
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `initial_capacity` exceeds
    /// [`MAX_INITIAL_CAPACITY`].
    pub fn validate(&self) -> ConfigResult<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "initial_capacity {} exceeds maximum {MAX_INITIAL_CAPACITY}",
                self.initial_capacity
            )));
        }
        Ok(())
    }
}
