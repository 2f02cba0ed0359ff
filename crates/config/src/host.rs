//! Host sizing and terminal cell metrics.
//!
//! The card is hosted in a terminal. [`HostSizing`] describes how much room
//! the surroundings offer the card, and [`CellMetrics`] converts between the
//! pixel quantities of the card configuration and terminal cells.
//!
//! # Host sizing modes
//!
//! - `fill`: the card gets the whole terminal.
//! - `rows`: the card gets a fixed number of rows, like a grid cell.
//! - `stack`: the card is stacked with no rows allotted; its host offers no
//!   sizing context at all.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default cell width in pixels.
pub const DEFAULT_CELL_WIDTH_PX: u16 = 8;

/// Default cell height in pixels.
pub const DEFAULT_CELL_HEIGHT_PX: u16 = 16;

/// Largest accepted cell dimension in pixels.
pub const MAX_CELL_PX: u16 = 64;

/// How much room the surroundings offer the card.
///
/// # Examples
///
/// ```
/// use rangecard_config::HostSizing;
///
/// let sizing: HostSizing = serde_json::from_str(r#""stack""#).unwrap();
/// assert_eq!(sizing, HostSizing::Stack);
///
/// let sizing: HostSizing = serde_json::from_str(r#"{"rows": 12}"#).unwrap();
/// assert_eq!(sizing.offered_rows(40), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostSizing {
    /// The whole terminal.
    #[default]
    Fill,
    /// A fixed number of rows.
    Rows(u16),
    /// No rows allotted.
    Stack,
}

impl HostSizing {
    /// Returns the rows offered to the card in a terminal of `terminal_rows`.
    #[must_use]
    pub fn offered_rows(self, terminal_rows: u16) -> u16 {
        match self {
            Self::Fill => terminal_rows,
            Self::Rows(rows) => rows.min(terminal_rows),
            Self::Stack => 0,
        }
    }
}

/// Host settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// How much room the card is offered.
    #[serde(default)]
    pub sizing: HostSizing,
}

/// Pixel size of one terminal cell.
///
/// # Examples
///
/// ```
/// use rangecard_config::CellMetrics;
///
/// let cell = CellMetrics::default();
/// assert_eq!(cell.rows_to_px(3), 48);
/// assert_eq!(cell.px_to_rows(276), 17);
/// assert_eq!(cell.px_to_columns(14), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMetrics {
    /// Cell width in pixels.
    #[serde(default = "default_width")]
    pub width_px: u16,
    /// Cell height in pixels.
    #[serde(default = "default_height")]
    pub height_px: u16,
}

fn default_width() -> u16 {
    DEFAULT_CELL_WIDTH_PX
}

fn default_height() -> u16 {
    DEFAULT_CELL_HEIGHT_PX
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_CELL_WIDTH_PX,
            height_px: DEFAULT_CELL_HEIGHT_PX,
        }
    }
}

impl CellMetrics {
    /// Converts rows to pixels.
    #[must_use]
    pub fn rows_to_px(&self, rows: u16) -> u32 {
        u32::from(rows) * u32::from(self.height_px)
    }

    /// Converts pixels to whole rows, rounding down. Never less than one row.
    #[must_use]
    pub fn px_to_rows(&self, px: u32) -> u16 {
        let rows = px / u32::from(self.height_px.max(1));
        u16::try_from(rows).unwrap_or(u16::MAX).max(1)
    }

    /// Converts pixels to rows, rounding up, so the result covers `px`.
    #[must_use]
    pub fn px_to_rows_covering(&self, px: u32) -> u16 {
        let rows = px.div_ceil(u32::from(self.height_px.max(1)));
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    /// Converts pixels to whole columns, rounding to nearest. Never less than one column.
    #[must_use]
    pub fn px_to_columns(&self, px: u32) -> u16 {
        let width = u32::from(self.width_px.max(1));
        let columns = px.saturating_add(width / 2) / width;
        u16::try_from(columns).unwrap_or(u16::MAX).max(1)
    }

    /// Validates the metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or above 64 pixels.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width_px", self.width_px), ("height_px", self.height_px)] {
            if value == 0 || value > MAX_CELL_PX {
                return Err(ConfigError::InvalidCellMetrics {
                    reason: format!("{name} {value} is outside 1..={MAX_CELL_PX}"),
                });
            }
        }
        Ok(())
    }
}
