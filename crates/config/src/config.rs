//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates the card,
//! the host settings and the layout tuning of the rangecard application.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rangecard_protocol::LayoutTuning;

use crate::card::{CardConfig, RawCardConfig, normalize};
use crate::error::{ConfigError, Result};
use crate::host::{CellMetrics, HostConfig};
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Default debounce window for external state updates, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Longest accepted debounce window, in milliseconds.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

/// The main configuration struct for the rangecard application.
///
/// The card itself is kept exactly as written; it is normalized by
/// [`Config::card_config`] so that key presence stays observable.
///
/// # Examples
///
/// ```
/// use rangecard_config::{Config, HostSizing, RawCardConfig};
///
/// let config = Config {
///     card: RawCardConfig::new()
///         .with("entity_min", "input_number.low")
///         .with("entity_max", "input_number.high"),
///     ..Default::default()
/// };
/// assert_eq!(config.host.sizing, HostSizing::Fill);
/// assert_eq!(config.debounce_ms, 500);
/// assert!(config.card_config().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The card, as written by the user.
    #[serde(default)]
    pub card: RawCardConfig,

    /// How the card is hosted.
    #[serde(default)]
    pub host: HostConfig,

    /// Pixel size of a terminal cell.
    #[serde(default)]
    pub cell: CellMetrics,

    /// Layout engine constants.
    #[serde(default)]
    pub tuning: LayoutTuning,

    /// Debounce window for external state updates, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Initial entity values of the in-memory store.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub states: BTreeMap<String, f64>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            card: RawCardConfig::default(),
            host: HostConfig::default(),
            cell: CellMetrics::default(),
            tuning: LayoutTuning::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            states: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    ///
    /// This is equivalent to `Config::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./rangecard.json5` or `./rangecard.json`
    /// 2. User: `~/.config/rangecard/config.json5` or `~/.config/rangecard/config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rangecard_config::Config;
    ///
    /// # async fn example() -> rangecard_config::Result<()> {
    /// let config = Config::load().await?;
    /// println!("Debounce window: {:?}", config.debounce());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: Config = read_config_file(path)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Saves the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the host-side settings.
    ///
    /// The card is not validated here: its layout fields are corrected by the
    /// normalizer and the missing-entity error is reported by
    /// [`Config::card_config`], where the card is about to be rendered.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell metrics or the debounce window are out of
    /// range.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_config::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.debounce_ms = 60_000;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.cell.validate()?;
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::InvalidDebounce {
                reason: format!(
                    "{} ms is above the maximum of {MAX_DEBOUNCE_MS} ms",
                    self.debounce_ms
                ),
            });
        }
        Ok(())
    }

    /// Normalizes the card.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntities`] if either entity is missing.
    pub fn card_config(&self) -> Result<CardConfig> {
        normalize(&self.card)
    }

    /// Returns the debounce window.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
