//! Terminal UI for the rangecard application.
//!
//! This crate provides a Ratatui-based terminal rendition of a dual-handle
//! range slider card whose vertical track adapts to the room its host gives
//! it.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`card`]: The card controller: configuration, values and layout state
//! - [`debounce`]: Single-slot delayed refresh
//! - [`layout`]: Conversion between terminal cells and layout pixels
//! - [`theme`]: Colors from the card's style
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//! - [`widgets`]: Rendering and the interactive range control
//!
//! # Example
//!
//! ```no_run
//! use rangecard_config::Config;
//! use rangecard_protocol::MemoryStore;
//! use rangecard_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let config = Config::load().await?;
//!     let mut app = App::new(config, MemoryStore::new());
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod card;
pub mod debounce;
pub mod event;
pub mod layout;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use card::{RefreshOutcome, SliderCard};
pub use debounce::Debouncer;
