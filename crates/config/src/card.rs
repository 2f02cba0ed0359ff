//! Card configuration and its normalizer.
//!
//! The user writes the card as a loose JSON object ([`RawCardConfig`]).
//! [`normalize`] turns it into a [`CardConfig`] whose every field satisfies
//! its invariant. Malformed fields are silently replaced by their defaults;
//! only the two entity identifiers are mandatory.
//!
//! # Fields
//!
//! | Key | Default | Notes |
//! |-----|---------|-------|
//! | `entity_min`, `entity_max` | required | the two bound entities |
//! | `orientation` | `horizontal` | `vertical` (any case) or horizontal |
//! | `vertical_height` | `auto` | `auto`, a number, or `"280px"` |
//! | `vertical_height_min` | 30 | floored at 30 |
//! | `vertical_height_max` | 1000 | floored at the min |
//! | `thickness` | 4 | `2..=200` |
//! | `slider_pct_vertical` | 100 | `1..=100` |
//! | `slider_pct_horizontal` | 100 | `1..=100` |
//! | `min`, `max`, `step` | 0, 100, 1 | slider range |
//! | `name`, `unit`, `decimals` | `Range Slider`, `%`, 1 | value display |
//!
//! Colors, handle geometry and offsets are described in [`crate::style`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use rangecard_protocol::layout::{
    DEFAULT_MAX_TRACK_HEIGHT_PX, DEFAULT_SCALE_PERCENT, DEFAULT_THICKNESS_PX, MAX_THICKNESS_PX,
    MIN_THICKNESS_PX, MIN_TRACK_HEIGHT_PX,
};
use rangecard_protocol::{HeightSetting, LayoutConfig, Orientation};

use crate::coerce::{PxValue, clamp_percent, coerce_number, floor_px, non_empty_string, parse_px};
use crate::error::{ConfigError, Result};
use crate::style::StyleConfig;

/// Key of the explicit max bound; its mere presence records user intent.
pub const VERTICAL_HEIGHT_MAX_KEY: &str = "vertical_height_max";

/// Largest number of decimals shown for values.
pub const MAX_DECIMALS: usize = 10;

/// The card configuration exactly as written by the user.
///
/// `null` values are treated like absent keys, except for
/// [`VERTICAL_HEIGHT_MAX_KEY`] whose presence alone counts.
///
/// # Examples
///
/// ```
/// use rangecard_config::RawCardConfig;
///
/// let raw = RawCardConfig::new()
///     .with("entity_min", "input_number.low")
///     .with("entity_max", "input_number.high")
///     .with("orientation", "vertical");
/// assert!(raw.contains_key("orientation"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCardConfig(Map<String, Value>);

impl RawCardConfig {
    /// Creates an empty card configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this configuration with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the value for `key`, treating `null` as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Returns `true` if `key` was written at all, even as `null`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns `key` read as a number, or `fallback` if absent or unreadable.
    pub(crate) fn number_or(&self, key: &str, fallback: f64) -> f64 {
        match self.get(key) {
            None => fallback,
            Some(value) => coerce_number(value).unwrap_or_else(|| {
                debug!(field = key, %value, "unreadable number, using default");
                fallback
            }),
        }
    }

    fn string_or(&self, key: &str, fallback: &str) -> String {
        self.get(key)
            .and_then(non_empty_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    fn entity(&self, key: &str) -> Option<String> {
        self.get(key).and_then(non_empty_string)
    }
}

impl From<Map<String, Value>> for RawCardConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The slider's numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Lowest selectable value.
    pub min: f64,
    /// Highest selectable value, always greater than `min`.
    pub max: f64,
    /// Step between selectable values, always positive.
    pub step: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

impl RangeConfig {
    /// Returns the span between the range bounds.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamps `value` into the range and snaps it to the nearest step.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_config::RangeConfig;
    ///
    /// let range = RangeConfig { min: 0.0, max: 10.0, step: 0.5 };
    /// assert_eq!(range.snap(3.3), 3.5);
    /// assert_eq!(range.snap(-4.0), 0.0);
    /// assert_eq!(range.snap(12.0), 10.0);
    /// ```
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

/// How the two values are labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Card title.
    pub name: String,
    /// Unit appended to both values.
    pub unit: String,
    /// Number of decimals shown.
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            name: "Range Slider".to_string(),
            unit: "%".to_string(),
            decimals: 1,
        }
    }
}

impl DisplayConfig {
    /// Formats a value with the configured decimals and unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_config::DisplayConfig;
    ///
    /// let display = DisplayConfig::default();
    /// assert_eq!(display.format_value(42.0), "42.0%");
    /// ```
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        format!("{value:.prec$}{unit}", prec = self.decimals, unit = self.unit)
    }
}

/// The normalized card configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Entity bound to the lower handle.
    pub entity_min: String,
    /// Entity bound to the upper handle.
    pub entity_max: String,
    /// Canonical layout parameters.
    pub layout: LayoutConfig,
    /// Slider range.
    pub range: RangeConfig,
    /// Value labels.
    pub display: DisplayConfig,
    /// Colors, handle geometry and horizontal width.
    pub style: StyleConfig,
}

impl CardConfig {
    /// Returns the entity ids as a `[low, high]` pair.
    #[must_use]
    pub fn entities(&self) -> [&str; 2] {
        [&self.entity_min, &self.entity_max]
    }
}

impl TryFrom<&RawCardConfig> for CardConfig {
    type Error = ConfigError;

    fn try_from(raw: &RawCardConfig) -> Result<Self> {
        normalize(raw)
    }
}

/// Normalizes a raw card configuration.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEntities`] if `entity_min` or `entity_max`
/// is absent or empty. No other field can cause an error.
///
/// # Examples
///
/// ```
/// use rangecard_config::{RawCardConfig, normalize};
/// use rangecard_protocol::{HeightSetting, Orientation};
///
/// let raw = RawCardConfig::new()
///     .with("entity_min", "input_number.low")
///     .with("entity_max", "input_number.high")
///     .with("orientation", "Vertical")
///     .with("vertical_height", "280px")
///     .with("vertical_height_min", "45px")
///     .with("thickness", 1);
///
/// let card = normalize(&raw).unwrap();
/// assert_eq!(card.layout.orientation, Orientation::Vertical);
/// assert_eq!(card.layout.height_setting, HeightSetting::FixedPixels(280.0));
/// assert_eq!(card.layout.min_height_px, 45);
/// assert_eq!(card.layout.thickness_px, 2);
/// assert!(!card.layout.user_supplied_max);
///
/// assert!(normalize(&RawCardConfig::new()).is_err());
/// ```
pub fn normalize(raw: &RawCardConfig) -> Result<CardConfig> {
    let (Some(entity_min), Some(entity_max)) = (raw.entity("entity_min"), raw.entity("entity_max"))
    else {
        return Err(ConfigError::MissingEntities);
    };

    Ok(CardConfig {
        entity_min,
        entity_max,
        layout: normalize_layout(raw),
        range: normalize_range(raw),
        display: normalize_display(raw),
        style: StyleConfig::from_raw(raw),
    })
}

/// Normalizes the layout fields of a card. Never fails.
///
/// # Examples
///
/// ```
/// use rangecard_config::{RawCardConfig, normalize_layout};
///
/// let layout = normalize_layout(&RawCardConfig::new().with("vertical_height_min", "bogus"));
/// assert_eq!(layout.min_height_px, 30);
/// ```
#[must_use]
pub fn normalize_layout(raw: &RawCardConfig) -> LayoutConfig {
    let orientation = match raw.get("orientation").and_then(Value::as_str) {
        Some(s) if s.eq_ignore_ascii_case("vertical") => Orientation::Vertical,
        _ => Orientation::Horizontal,
    };

    let height_setting = match raw.get("vertical_height").and_then(parse_px) {
        Some(PxValue::Pixels(px)) => HeightSetting::FixedPixels(px),
        _ => HeightSetting::Auto,
    };

    let min_height_px =
        bound_px(raw, "vertical_height_min", MIN_TRACK_HEIGHT_PX).max(MIN_TRACK_HEIGHT_PX);
    let max_height_px =
        bound_px(raw, VERTICAL_HEIGHT_MAX_KEY, DEFAULT_MAX_TRACK_HEIGHT_PX).max(min_height_px);

    let thickness = raw.number_or("thickness", f64::from(DEFAULT_THICKNESS_PX));
    let thickness_px = if thickness == 0.0 {
        DEFAULT_THICKNESS_PX
    } else {
        floor_px(thickness).clamp(MIN_THICKNESS_PX, MAX_THICKNESS_PX)
    };

    LayoutConfig {
        orientation,
        height_setting,
        min_height_px,
        max_height_px,
        thickness_px,
        scale_percent: clamp_percent(raw.get("slider_pct_vertical"), DEFAULT_SCALE_PERCENT),
        user_supplied_max: raw.contains_key(VERTICAL_HEIGHT_MAX_KEY),
    }
}

/// Reads a height bound; `auto`, zero and unreadable values use `fallback`.
fn bound_px(raw: &RawCardConfig, key: &str, fallback: u32) -> u32 {
    match raw.get(key).map(|value| (value, parse_px(value))) {
        None => fallback,
        Some((_, Some(PxValue::Pixels(px)))) if px != 0.0 => floor_px(px),
        Some((value, _)) => {
            debug!(field = key, %value, fallback, "unusable height bound, using default");
            fallback
        }
    }
}

fn normalize_range(raw: &RawCardConfig) -> RangeConfig {
    let defaults = RangeConfig::default();
    let mut min = raw.number_or("min", defaults.min);
    let mut max = raw.number_or("max", defaults.max);
    let step = Some(raw.number_or("step", defaults.step))
        .filter(|s| *s > 0.0)
        .unwrap_or(defaults.step);

    if min > max {
        std::mem::swap(&mut min, &mut max);
    }
    if min == max {
        max = min + step;
    }

    RangeConfig { min, max, step }
}

fn normalize_display(raw: &RawCardConfig) -> DisplayConfig {
    let defaults = DisplayConfig::default();
    let decimals = match raw.get("decimals").and_then(coerce_number) {
        Some(d) => d.floor().clamp(0.0, MAX_DECIMALS as f64) as usize,
        None => defaults.decimals,
    };

    DisplayConfig {
        name: raw.string_or("name", &defaults.name),
        unit: raw
            .get("unit")
            .and_then(Value::as_str)
            .map_or(defaults.unit, str::to_string),
        decimals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> RawCardConfig {
        RawCardConfig::new()
            .with("entity_min", "input_number.low")
            .with("entity_max", "input_number.high")
    }

    #[test]
    fn missing_entities_is_fatal() {
        assert!(matches!(
            normalize(&RawCardConfig::new()),
            Err(ConfigError::MissingEntities)
        ));
        assert!(normalize(&RawCardConfig::new().with("entity_min", "a")).is_err());
        assert!(normalize(&RawCardConfig::new().with("entity_max", "b")).is_err());
        assert!(
            normalize(
                &RawCardConfig::new()
                    .with("entity_min", "  ")
                    .with("entity_max", "b")
            )
            .is_err()
        );
    }

    #[test]
    fn minimal_card_uses_defaults() {
        let card = normalize(&base()).unwrap();
        assert_eq!(card.entities(), ["input_number.low", "input_number.high"]);
        assert_eq!(card.layout, LayoutConfig::default());
        assert_eq!(card.range, RangeConfig::default());
        assert_eq!(card.display, DisplayConfig::default());
    }

    #[test]
    fn orientation_is_case_insensitive_with_silent_fallback() {
        let vertical = normalize_layout(&base().with("orientation", "VERTICAL"));
        assert_eq!(vertical.orientation, Orientation::Vertical);

        let sideways = normalize_layout(&base().with("orientation", "diagonal"));
        assert_eq!(sideways.orientation, Orientation::Horizontal);

        let numeric = normalize_layout(&base().with("orientation", 3));
        assert_eq!(numeric.orientation, Orientation::Horizontal);
    }

    #[test]
    fn height_setting_variants() {
        let auto = normalize_layout(&base().with("vertical_height", "Auto"));
        assert_eq!(auto.height_setting, HeightSetting::Auto);

        let number = normalize_layout(&base().with("vertical_height", 280));
        assert_eq!(number.height_setting, HeightSetting::FixedPixels(280.0));

        let string = normalize_layout(&base().with("vertical_height", "280"));
        assert_eq!(string.height_setting, HeightSetting::FixedPixels(280.0));

        let garbage = normalize_layout(&base().with("vertical_height", "tall"));
        assert_eq!(garbage.height_setting, HeightSetting::Auto);
    }

    #[test]
    fn bounds_parse_with_fallbacks() {
        let layout = normalize_layout(&base().with("vertical_height_min", "45px"));
        assert_eq!(layout.min_height_px, 45);

        let layout = normalize_layout(&base().with("vertical_height_min", "bogus"));
        assert_eq!(layout.min_height_px, 30);

        let layout = normalize_layout(&base().with("vertical_height_min", 10));
        assert_eq!(layout.min_height_px, 30);

        let layout = normalize_layout(&base().with("vertical_height_min", "auto"));
        assert_eq!(layout.min_height_px, 30);
    }

    #[test]
    fn max_is_floored_at_min() {
        let layout = normalize_layout(
            &base()
                .with("vertical_height_min", 400)
                .with("vertical_height_max", "200px"),
        );
        assert_eq!(layout.min_height_px, 400);
        assert_eq!(layout.max_height_px, 400);
    }

    #[test]
    fn zero_or_invalid_max_uses_default() {
        let layout = normalize_layout(&base().with("vertical_height_max", 0));
        assert_eq!(layout.max_height_px, 1000);

        let layout = normalize_layout(&base().with("vertical_height_max", "huge"));
        assert_eq!(layout.max_height_px, 1000);
    }

    #[test]
    fn user_supplied_max_tracks_key_presence() {
        assert!(!normalize_layout(&base()).user_supplied_max);
        assert!(normalize_layout(&base().with("vertical_height_max", 600)).user_supplied_max);
        // Present but invalid still records intent.
        assert!(normalize_layout(&base().with("vertical_height_max", "nope")).user_supplied_max);
        assert!(normalize_layout(&base().with("vertical_height_max", json!(null))).user_supplied_max);
    }

    #[test]
    fn thickness_defaults_and_floor() {
        assert_eq!(normalize_layout(&base()).thickness_px, 4);
        assert_eq!(normalize_layout(&base().with("thickness", 8)).thickness_px, 8);
        assert_eq!(normalize_layout(&base().with("thickness", 1)).thickness_px, 2);
        assert_eq!(normalize_layout(&base().with("thickness", 0)).thickness_px, 4);
        assert_eq!(normalize_layout(&base().with("thickness", "wide")).thickness_px, 4);
    }

    #[test]
    fn huge_thickness_is_capped() {
        let layout = normalize_layout(&base().with("thickness", 1e12));
        assert_eq!(layout.thickness_px, MAX_THICKNESS_PX);
        let layout = normalize_layout(&base().with("thickness", "99999999999"));
        assert_eq!(layout.thickness_px, MAX_THICKNESS_PX);
    }

    #[test]
    fn vertical_percent_is_clamped() {
        let layout = normalize_layout(&base().with("slider_pct_vertical", 150));
        assert_eq!(layout.scale_percent, 100);
        let layout = normalize_layout(&base().with("slider_pct_vertical", "33.4"));
        assert_eq!(layout.scale_percent, 33);
    }

    #[test]
    fn range_is_repaired() {
        let card = normalize(&base().with("min", 50).with("max", 10).with("step", -2)).unwrap();
        assert_eq!(card.range.min, 10.0);
        assert_eq!(card.range.max, 50.0);
        assert_eq!(card.range.step, 1.0);

        let card = normalize(&base().with("min", 5).with("max", 5).with("step", 0.5)).unwrap();
        assert_eq!(card.range.max, 5.5);
    }

    #[test]
    fn display_fields() {
        let card = normalize(
            &base()
                .with("name", "Comfort band")
                .with("unit", " °C")
                .with("decimals", "2.9"),
        )
        .unwrap();
        assert_eq!(card.display.name, "Comfort band");
        assert_eq!(card.display.decimals, 2);
        assert_eq!(card.display.format_value(21.456), "21.46 °C");

        let card = normalize(&base().with("decimals", -3).with("unit", "")).unwrap();
        assert_eq!(card.display.decimals, 0);
        assert_eq!(card.display.format_value(7.6), "8");

        let card = normalize(&base().with("decimals", "lots")).unwrap();
        assert_eq!(card.display.decimals, 1);

        let card = normalize(&base().with("decimals", 1e9)).unwrap();
        assert_eq!(card.display.decimals, MAX_DECIMALS);
    }

    #[test]
    fn deserializes_from_json_object() {
        let raw: RawCardConfig = serde_json::from_value(json!({
            "entity_min": "a",
            "entity_max": "b",
            "vertical_height_max": 500
        }))
        .unwrap();
        let card = CardConfig::try_from(&raw).unwrap();
        assert_eq!(card.layout.max_height_px, 500);
        assert!(card.layout.user_supplied_max);
    }
}
