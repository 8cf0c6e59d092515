//! # Error Types
//!
//! Recoverable errors raised around the intersection engine.
//!
//! Iteration itself never fails: a lookup that misses yields the exhausted
//! iterator. Errors only come from building containers and loading
//! configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or filling a [`crate::ComponentSet`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A record with this identifier is already stored and the set rejects
    /// duplicates.
    ///
    /// Holds the identifier's `Debug` rendering, for display only. The error
    /// type is shared by sets of every identifier type, so the typed value is
    /// not kept; match on the variant and use the identifier you inserted.
    #[error("duplicate identifier: {0}")]
    DuplicateId(String),

    /// Records handed over as sorted are not strictly ascending.
    #[error("records not strictly ordered by identifier at position {position}")]
    Unordered {
        /// Index of the first record that is not greater than its predecessor.
        position: usize,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised while loading a [`crate::StorageConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or does not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
