//! Widget components for the rangecard TUI.
//!
//! Rendering follows a functional approach: each widget is a function that
//! draws state into a buffer, which keeps rendering easy to test.
//!
//! # Modules
//!
//! - [`slider`]: the interactive state of the two-handle range control
//! - [`card`]: splits the card into regions and draws it
//! - [`notice`]: notices shown in place of the card
//!
//! # Example
//!
//! ```
//! use rangecard_config::{CellMetrics, RawCardConfig};
//! use rangecard_tui::card::SliderCard;
//! use rangecard_tui::theme::Theme;
//! use rangecard_tui::widgets;
//! use ratatui::{buffer::Buffer, layout::Rect};
//!
//! let raw = RawCardConfig::new()
//!     .with("entity_min", "input_number.low")
//!     .with("entity_max", "input_number.high");
//! let card = SliderCard::from_raw(&raw).unwrap();
//!
//! let area = Rect::new(0, 0, 40, 4);
//! let mut buf = Buffer::empty(area);
//! let cell = CellMetrics::default();
//! let regions = widgets::card_regions(&card, &cell, area);
//! widgets::render_card(&card, &Theme::default(), &cell, &regions, &mut buf);
//! ```

pub mod card;
pub mod notice;
pub mod slider;

// Re-export primary rendering functions for convenience
pub use card::{CardRegions, card_regions, render_card, values_line};
pub use notice::{ENTITIES_NOT_FOUND, render_error_notice, render_too_small};
pub use slider::RangeSlider;

#[cfg(test)]
mod tests;
