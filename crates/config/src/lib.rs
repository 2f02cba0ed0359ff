//! Configuration management for the rangecard application.
//!
//! This crate turns what the user wrote into values the rest of the
//! application can trust.
//!
//! # Overview
//!
//! - [`card`]: the card configuration and its normalizer
//! - [`style`]: presentation settings of the card
//! - [`coerce`]: lenient readers for untyped card values
//! - [`host`]: host sizing and terminal cell metrics
//! - [`config`]: the application config file
//! - [`persistence`]: config file discovery, reading and writing
//! - [`error`]: error types for configuration operations
//!
//! # Examples
//!
//! ```
//! use rangecard_config::{HeightSetting, Orientation, RawCardConfig, normalize};
//!
//! let raw = RawCardConfig::new()
//!     .with("entity_min", "input_number.low")
//!     .with("entity_max", "input_number.high")
//!     .with("orientation", "VERTICAL")
//!     .with("vertical_height", "280px");
//!
//! let card = normalize(&raw)?;
//! assert_eq!(card.layout.orientation, Orientation::Vertical);
//! assert_eq!(card.layout.height_setting, HeightSetting::FixedPixels(280.0));
//! # Ok::<(), rangecard_config::ConfigError>(())
//! ```

pub mod card;
pub mod coerce;
pub mod config;
pub mod error;
pub mod host;
pub mod persistence;
pub mod style;

// Re-export primary types at crate root for convenience
pub use card::{CardConfig, DisplayConfig, RangeConfig, RawCardConfig, normalize, normalize_layout};
pub use config::Config;
pub use error::{ConfigError, Result};
pub use host::{CellMetrics, HostConfig, HostSizing};
pub use rangecard_protocol::{HeightSetting, LayoutConfig, Orientation};
pub use style::{ColorConfig, HandleConfig, HandleSize, StyleConfig};
