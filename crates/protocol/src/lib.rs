//! Shared protocol types for the rangecard application.
//!
//! This crate defines the core types used across all rangecard components,
//! including the canonical layout configuration, measured geometry, layout
//! results, messages, and the contracts for the two external value holders.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`layout`]: Canonical layout configuration, measurements, and results
//! - [`entity`]: Value source/sink contracts and range control events
//! - [`memory`]: An in-memory value store implementing both contracts
//! - [`message`]: TUI event messages
//!
//! # Examples
//!
//! Reading and writing the two bound values through the in-memory store:
//!
//! ```
//! use rangecard_protocol::{MemoryStore, ValueSink, ValueSource};
//!
//! let store = MemoryStore::new();
//! store.insert("input_number.low", 20.0);
//! store.insert("input_number.high", 80.0);
//!
//! store.set_value("input_number.low", 25.0);
//! assert_eq!(store.lookup("input_number.low"), Some(25.0));
//! assert_eq!(store.lookup("input_number.missing"), None);
//! ```

pub mod entity;
pub mod layout;
pub mod memory;
pub mod message;

// Re-export primary types at crate root for convenience
pub use entity::{ControlEvent, Handle, ValueSink, ValueSource};
pub use layout::{
    HeightSetting, LayoutConfig, LayoutResult, LayoutTuning, MeasuredGeometry, Orientation,
};
pub use memory::MemoryStore;
pub use message::Message;
