//! Adaptive layout engine for the rangecard slider.
//!
//! Given the canonical [`LayoutConfig`](rangecard_protocol::LayoutConfig), the
//! card's measured geometry, and the previous pass's result, the engine
//! computes the pixel height of the vertical track and decides whether the
//! card's container must be pinned to an explicit height.
//!
//! # Overview
//!
//! - [`engine`]: The layout pass ([`compute_layout`])
//! - [`reliability`]: Deciding whether a host measurement can be trusted
//!
//! # Feedback loops
//!
//! A host without a sizing context reports a tiny height. Trusting it makes
//! the card collapse, which shrinks the host further. When the measurement is
//! unreliable the engine pins the container to a height derived only from
//! configuration, and a later measurement that merely reads back that pin is
//! recognized as self-induced. Re-running the engine on such a measurement
//! yields the same result, so the resize/measure cycle settles after a single
//! extra pass.
//!
//! # Examples
//!
//! ```
//! use rangecard_layout::compute_layout;
//! use rangecard_protocol::{LayoutConfig, LayoutTuning, MeasuredGeometry};
//!
//! let config = LayoutConfig::vertical();
//! let tuning = LayoutTuning::default();
//!
//! // The host reports no usable height: pin the container to the fallback.
//! let first = compute_layout(&config, Some(&MeasuredGeometry::new(0.0, 50.0)), None, &tuning)
//!     .unwrap();
//! assert_eq!(first.track_height_px, 276);
//! assert_eq!(first.forced_container_height_px, Some(350));
//!
//! // The pinned container now measures 350px; the answer does not change.
//! let second = compute_layout(
//!     &config,
//!     Some(&MeasuredGeometry::new(350.0, 50.0)),
//!     Some(&first),
//!     &tuning,
//! )
//! .unwrap();
//! assert_eq!(first, second);
//! ```

pub mod engine;
pub mod reliability;

pub use engine::{compute_layout, effective_max_height};
pub use reliability::{HostReliability, assess_host};
