//! Layout configuration, measurements, and results.
//!
//! These types are the inputs and outputs of the adaptive layout engine.
//! A [`LayoutConfig`] is derived once per configuration change, a
//! [`MeasuredGeometry`] is taken on every layout pass, and each pass produces
//! a fresh [`LayoutResult`] that replaces the previous one.

use serde::{Deserialize, Serialize};

/// Lowest allowed vertical track height in pixels.
pub const MIN_TRACK_HEIGHT_PX: u32 = 30;

/// Default upper bound for the vertical track height in pixels.
pub const DEFAULT_MAX_TRACK_HEIGHT_PX: u32 = 1000;

/// Lowest allowed track thickness in pixels.
pub const MIN_THICKNESS_PX: u32 = 2;

/// Highest allowed track thickness in pixels.
pub const MAX_THICKNESS_PX: u32 = 200;

/// Default track thickness in pixels.
pub const DEFAULT_THICKNESS_PX: u32 = 4;

/// Default share of the available space used by the vertical track.
pub const DEFAULT_SCALE_PERCENT: u32 = 100;

/// The direction the slider track runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Inline track running left to right.
    #[default]
    Horizontal,
    /// Space-constrained track running bottom to top.
    Vertical,
}

impl Orientation {
    /// Returns `true` for [`Orientation::Vertical`].
    #[must_use]
    pub fn is_vertical(self) -> bool {
        self == Self::Vertical
    }
}

/// How the vertical track height is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightSetting {
    /// Adapt to the space offered by the host.
    #[default]
    Auto,
    /// Use the given pixel height (still bounded and scaled).
    FixedPixels(f64),
}

/// The canonical layout configuration.
///
/// Built by the configuration normalizer; every field already satisfies its
/// invariant, so the layout engine never has to validate it.
///
/// # Examples
///
/// ```
/// use rangecard_protocol::{HeightSetting, LayoutConfig, Orientation};
///
/// let config = LayoutConfig::default();
/// assert_eq!(config.orientation, Orientation::Horizontal);
/// assert_eq!(config.height_setting, HeightSetting::Auto);
/// assert_eq!((config.min_height_px, config.max_height_px), (30, 1000));
/// assert!(!config.user_supplied_max);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Track direction.
    pub orientation: Orientation,
    /// Auto or fixed vertical height.
    pub height_setting: HeightSetting,
    /// Lower bound for the vertical track, always `>= 30`.
    pub min_height_px: u32,
    /// Upper bound for the vertical track, always `>= min_height_px`.
    pub max_height_px: u32,
    /// Track thickness, always `>= 2`.
    pub thickness_px: u32,
    /// Share of the available space used by the vertical track, in `1..=100`.
    pub scale_percent: u32,
    /// Whether the user wrote a max bound at all.
    ///
    /// An explicit max is honored even when the host cannot be measured.
    pub user_supplied_max: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            height_setting: HeightSetting::Auto,
            min_height_px: MIN_TRACK_HEIGHT_PX,
            max_height_px: DEFAULT_MAX_TRACK_HEIGHT_PX,
            thickness_px: DEFAULT_THICKNESS_PX,
            scale_percent: DEFAULT_SCALE_PERCENT,
            user_supplied_max: false,
        }
    }
}

impl LayoutConfig {
    /// Returns a vertical auto-height configuration with default bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_protocol::{LayoutConfig, Orientation};
    ///
    /// let config = LayoutConfig::vertical();
    /// assert_eq!(config.orientation, Orientation::Vertical);
    /// ```
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
            ..Self::default()
        }
    }
}

/// Sizes measured on a single layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasuredGeometry {
    /// Height of the card's host box, `None` when it cannot be measured.
    pub host_height: Option<f64>,
    /// Combined height of the title and values regions.
    ///
    /// The engine adds its own fixed allowance on top of this.
    pub chrome_height: f64,
}

impl MeasuredGeometry {
    /// Creates a measurement with a known host height.
    #[must_use]
    pub fn new(host_height: f64, chrome_height: f64) -> Self {
        Self {
            host_height: Some(host_height),
            chrome_height,
        }
    }

    /// Creates a measurement for a host without any sizing context.
    #[must_use]
    pub fn unmeasured(chrome_height: f64) -> Self {
        Self {
            host_height: None,
            chrome_height,
        }
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Height assigned to the vertical track.
    pub track_height_px: u32,
    /// Height the card's container must be pinned to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_container_height_px: Option<u32>,
}

impl LayoutResult {
    /// Creates a result without a pinned container height.
    #[must_use]
    pub fn unpinned(track_height_px: u32) -> Self {
        Self {
            track_height_px,
            forced_container_height_px: None,
        }
    }

    /// Returns `true` when the container height is pinned.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.forced_container_height_px.is_some()
    }
}

/// Tuning constants for the layout engine.
///
/// The defaults are empirical values; all of them can be overridden from the
/// configuration file.
///
/// # Examples
///
/// ```
/// use rangecard_protocol::LayoutTuning;
///
/// let tuning: LayoutTuning = serde_json::from_str(r#"{"unmeasured_fallback_px": 400}"#).unwrap();
/// assert_eq!(tuning.unmeasured_fallback_px, 400);
/// assert_eq!(tuning.reliability_threshold_px, 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutTuning {
    /// Host heights below this are treated as noise.
    #[serde(default = "default_reliability_threshold")]
    pub reliability_threshold_px: u32,
    /// Max bound used when the host is unmeasurable and no max was given.
    #[serde(default = "default_unmeasured_fallback")]
    pub unmeasured_fallback_px: u32,
    /// Margin allowance not captured by measuring the chrome regions.
    #[serde(default = "default_chrome_allowance")]
    pub chrome_allowance_px: u32,
    /// Base height for the first pass, before anything was measured.
    #[serde(default = "default_provisional_height")]
    pub provisional_height_px: u32,
}

fn default_reliability_threshold() -> u32 {
    80
}

fn default_unmeasured_fallback() -> u32 {
    350
}

fn default_chrome_allowance() -> u32 {
    24
}

fn default_provisional_height() -> u32 {
    350
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            reliability_threshold_px: default_reliability_threshold(),
            unmeasured_fallback_px: default_unmeasured_fallback(),
            chrome_allowance_px: default_chrome_allowance(),
            provisional_height_px: default_provisional_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_default_is_horizontal() {
        assert_eq!(Orientation::default(), Orientation::Horizontal);
        assert!(!Orientation::Horizontal.is_vertical());
        assert!(Orientation::Vertical.is_vertical());
    }

    #[test]
    fn layout_config_defaults_satisfy_invariants() {
        let config = LayoutConfig::default();
        assert!(config.min_height_px >= MIN_TRACK_HEIGHT_PX);
        assert!(config.max_height_px >= config.min_height_px);
        assert!(config.thickness_px >= MIN_THICKNESS_PX);
        assert!((1..=100).contains(&config.scale_percent));
    }

    #[test]
    fn tuning_defaults() {
        let tuning = LayoutTuning::default();
        assert_eq!(tuning.reliability_threshold_px, 80);
        assert_eq!(tuning.unmeasured_fallback_px, 350);
        assert_eq!(tuning.chrome_allowance_px, 24);
        assert_eq!(tuning.provisional_height_px, 350);
    }

    #[test]
    fn tuning_deserializes_from_empty_object() {
        let tuning: LayoutTuning = serde_json::from_str("{}").unwrap();
        assert_eq!(tuning, LayoutTuning::default());
    }

    #[test]
    fn unpinned_result_serializes_without_forced_height() {
        let json = serde_json::to_string(&LayoutResult::unpinned(120)).unwrap();
        assert_eq!(json, r#"{"track_height_px":120}"#);
    }

    #[test]
    fn pinned_result_reports_pin() {
        let result = LayoutResult {
            track_height_px: 276,
            forced_container_height_px: Some(350),
        };
        assert!(result.is_pinned());
        assert!(!LayoutResult::unpinned(276).is_pinned());
    }
}
