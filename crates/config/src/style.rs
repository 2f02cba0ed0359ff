//! Presentation settings of the card: colors, handle geometry, offsets.
//!
//! None of these fields affect the layout engine. They are normalized with
//! the same lenient rules as the layout fields and never produce an error.
//!
//! | Key | Default |
//! |-----|---------|
//! | `color_base`, `color_track`, `color_connect`, `color_handle`, `color_text` | theme |
//! | `handle_width`, `handle_height` | 14 (`4..=200`) |
//! | `handle_border` | 2 |
//! | `handle_{width,height}_{horizontal,vertical}` | the base size |
//! | `handle_y_offset_horizontal` | 2 (positive moves down) |
//! | `handle_x_offset_vertical` | 0 (positive moves right) |

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::card::RawCardConfig;
use crate::coerce::{clamp_percent, coerce_number, floor_px, non_empty_string};

/// Lowest allowed handle width or height in pixels.
pub const MIN_HANDLE_PX: u32 = 4;

/// Highest allowed handle width or height in pixels.
pub const MAX_HANDLE_PX: u32 = 200;

/// Default handle width and height in pixels.
pub const DEFAULT_HANDLE_PX: u32 = 14;

/// Default handle border in pixels.
pub const DEFAULT_HANDLE_BORDER_PX: u32 = 2;

/// Default downward offset of horizontal handles in pixels.
pub const DEFAULT_HANDLE_Y_OFFSET_PX: f64 = 2.0;

/// Color overrides; `None` means "use the theme color".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Background under the whole slider.
    pub base: Option<String>,
    /// Unselected part of the track.
    pub track: Option<String>,
    /// Selected range between the handles.
    pub connect: Option<String>,
    /// Handle fill.
    pub handle: Option<String>,
    /// Title and values text.
    pub text: Option<String>,
}

/// Handle size for one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleSize {
    /// Width in pixels, at least 4.
    pub width_px: u32,
    /// Height in pixels, at least 4.
    pub height_px: u32,
}

impl Default for HandleSize {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_HANDLE_PX,
            height_px: DEFAULT_HANDLE_PX,
        }
    }
}

/// Handle geometry for both orientations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleConfig {
    /// Border width in pixels.
    pub border_px: u32,
    /// Handle size on a horizontal track.
    pub horizontal: HandleSize,
    /// Handle size on a vertical track.
    pub vertical: HandleSize,
    /// Vertical offset of horizontal handles; positive moves down.
    pub y_offset_horizontal_px: f64,
    /// Horizontal offset of vertical handles; positive moves right.
    pub x_offset_vertical_px: f64,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            border_px: DEFAULT_HANDLE_BORDER_PX,
            horizontal: HandleSize::default(),
            vertical: HandleSize::default(),
            y_offset_horizontal_px: DEFAULT_HANDLE_Y_OFFSET_PX,
            x_offset_vertical_px: 0.0,
        }
    }
}

/// All presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Track width as a percentage of the card in horizontal orientation.
    pub horizontal_percent: u32,
    /// Color overrides.
    pub colors: ColorConfig,
    /// Handle geometry.
    pub handles: HandleConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            horizontal_percent: 100,
            colors: ColorConfig::default(),
            handles: HandleConfig::default(),
        }
    }
}

impl StyleConfig {
    /// Reads the presentation fields of a raw card. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_config::{RawCardConfig, StyleConfig};
    ///
    /// let raw = RawCardConfig::new()
    ///     .with("handle_width", 20)
    ///     .with("handle_height_vertical", 8)
    ///     .with("color_connect", "green");
    /// let style = StyleConfig::from_raw(&raw);
    ///
    /// assert_eq!(style.handles.horizontal.width_px, 20);
    /// assert_eq!(style.handles.vertical.height_px, 8);
    /// assert_eq!(style.handles.vertical.width_px, 20);
    /// assert_eq!(style.colors.connect.as_deref(), Some("green"));
    /// ```
    #[must_use]
    pub fn from_raw(raw: &RawCardConfig) -> Self {
        let base = HandleSize {
            width_px: handle_px(raw.get("handle_width"), DEFAULT_HANDLE_PX),
            height_px: handle_px(raw.get("handle_height"), DEFAULT_HANDLE_PX),
        };
        let sized = |suffix: &str| HandleSize {
            width_px: handle_px(raw.get(&format!("handle_width_{suffix}")), base.width_px),
            height_px: handle_px(raw.get(&format!("handle_height_{suffix}")), base.height_px),
        };

        let border_px = raw
            .get("handle_border")
            .and_then(coerce_number)
            .map_or(DEFAULT_HANDLE_BORDER_PX, floor_px);

        let color = |key: &str| raw.get(key).and_then(non_empty_string);

        Self {
            horizontal_percent: clamp_percent(raw.get("slider_pct_horizontal"), 100),
            colors: ColorConfig {
                base: color("color_base"),
                track: color("color_track"),
                connect: color("color_connect"),
                handle: color("color_handle"),
                text: color("color_text"),
            },
            handles: HandleConfig {
                border_px,
                horizontal: sized("horizontal"),
                vertical: sized("vertical"),
                y_offset_horizontal_px: offset_px(
                    raw,
                    "handle_y_offset_horizontal",
                    DEFAULT_HANDLE_Y_OFFSET_PX,
                ),
                x_offset_vertical_px: offset_px(raw, "handle_x_offset_vertical", 0.0),
            },
        }
    }
}

/// Zero and unreadable sizes use `fallback`; readable ones are clamped to `4..=200`.
fn handle_px(value: Option<&Value>, fallback: u32) -> u32 {
    match value.and_then(coerce_number) {
        Some(px) if px != 0.0 => floor_px(px).clamp(MIN_HANDLE_PX, MAX_HANDLE_PX),
        _ => fallback,
    }
}

/// Absent offsets use `default`; present but unreadable ones are zero.
fn offset_px(raw: &RawCardConfig, key: &str, default: f64) -> f64 {
    raw.get(key)
        .map_or(default, |value| coerce_number(value).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_card() {
        assert_eq!(StyleConfig::from_raw(&RawCardConfig::new()), StyleConfig::default());
    }

    #[test]
    fn handle_sizes_are_floored() {
        let raw = RawCardConfig::new()
            .with("handle_width", 2)
            .with("handle_height", "9.7");
        let style = StyleConfig::from_raw(&raw);
        assert_eq!(style.handles.horizontal.width_px, 4);
        assert_eq!(style.handles.horizontal.height_px, 9);
    }

    #[test]
    fn huge_handle_sizes_are_capped() {
        let raw = RawCardConfig::new()
            .with("handle_width", 1e12)
            .with("handle_height_vertical", "4294967296");
        let style = StyleConfig::from_raw(&raw);
        assert_eq!(style.handles.horizontal.width_px, MAX_HANDLE_PX);
        assert_eq!(style.handles.vertical.width_px, MAX_HANDLE_PX);
        assert_eq!(style.handles.vertical.height_px, MAX_HANDLE_PX);
        assert_eq!(style.handles.horizontal.height_px, DEFAULT_HANDLE_PX);
    }

    #[test]
    fn invalid_override_falls_back_to_base() {
        let raw = RawCardConfig::new()
            .with("handle_width", 18)
            .with("handle_width_horizontal", "wide")
            .with("handle_width_vertical", 0);
        let style = StyleConfig::from_raw(&raw);
        assert_eq!(style.handles.horizontal.width_px, 18);
        assert_eq!(style.handles.vertical.width_px, 18);
    }

    #[test]
    fn border_may_be_zero() {
        let raw = RawCardConfig::new().with("handle_border", 0);
        assert_eq!(StyleConfig::from_raw(&raw).handles.border_px, 0);

        let raw = RawCardConfig::new().with("handle_border", "thick");
        assert_eq!(StyleConfig::from_raw(&raw).handles.border_px, 2);
    }

    #[test]
    fn offsets() {
        let raw = RawCardConfig::new()
            .with("handle_y_offset_horizontal", "oops")
            .with("handle_x_offset_vertical", -3);
        let style = StyleConfig::from_raw(&raw);
        assert_eq!(style.handles.y_offset_horizontal_px, 0.0);
        assert_eq!(style.handles.x_offset_vertical_px, -3.0);
    }

    #[test]
    fn blank_colors_use_theme() {
        let raw = RawCardConfig::new()
            .with("color_base", "   ")
            .with("color_text", " white ");
        let style = StyleConfig::from_raw(&raw);
        assert_eq!(style.colors.base, None);
        assert_eq!(style.colors.text.as_deref(), Some("white"));
    }

    #[test]
    fn horizontal_percent() {
        let raw = RawCardConfig::new().with("slider_pct_horizontal", 60);
        assert_eq!(StyleConfig::from_raw(&raw).horizontal_percent, 60);
    }
}
