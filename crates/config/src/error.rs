//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing, and validation.
//!
//! Malformed card layout fields never produce an error: they are corrected
//! to their defaults by the normalizer. Only the two entity identifiers are
//! mandatory.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// One or both entity identifiers are missing from the card.
    #[error("you need to define 'entity_min' and 'entity_max'")]
    MissingEntities,

    /// Invalid cell metrics.
    #[error("invalid cell metrics: {reason}")]
    InvalidCellMetrics {
        /// The reason the metrics are invalid.
        reason: String,
    },

    /// Invalid debounce window.
    #[error("invalid debounce window: {reason}")]
    InvalidDebounce {
        /// The reason the window is invalid.
        reason: String,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

impl ConfigError {
    /// Returns `true` if this error must abort rendering of the card.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_config::ConfigError;
    ///
    /// assert!(ConfigError::MissingEntities.is_fatal_for_card());
    /// assert!(!ConfigError::NoHomeDirectory.is_fatal_for_card());
    /// ```
    #[must_use]
    pub fn is_fatal_for_card(&self) -> bool {
        matches!(self, Self::MissingEntities)
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
