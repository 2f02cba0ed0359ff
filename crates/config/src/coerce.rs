//! Lenient coercion of user-written card values.
//!
//! Card fields arrive as untyped JSON. Numbers may be written as numbers or
//! as strings, pixel quantities may carry a `px` suffix, and anything that
//! cannot be read is reported as `None` so the caller can fall back to the
//! field's default.

use serde_json::Value;

/// A pixel quantity as written by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PxValue {
    /// The keyword `auto` (any case).
    Auto,
    /// A finite number of pixels.
    Pixels(f64),
}

/// Parses a pixel quantity: a number, a numeric string, or a numeric string
/// suffixed with `px`, or the keyword `auto`.
///
/// Returns `None` for anything else, including non-finite numbers.
///
/// # Examples
///
/// ```
/// use rangecard_config::coerce::{PxValue, parse_px};
/// use serde_json::json;
///
/// assert_eq!(parse_px(&json!(280)), Some(PxValue::Pixels(280.0)));
/// assert_eq!(parse_px(&json!(" 45px ")), Some(PxValue::Pixels(45.0)));
/// assert_eq!(parse_px(&json!("AUTO")), Some(PxValue::Auto));
/// assert_eq!(parse_px(&json!("bogus")), None);
/// ```
#[must_use]
pub fn parse_px(value: &Value) -> Option<PxValue> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).map(PxValue::Pixels),
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            if s == "auto" {
                return Some(PxValue::Auto);
            }
            let digits = s.strip_suffix("px").unwrap_or(&s).trim_end();
            parse_finite(digits).map(PxValue::Pixels)
        }
        _ => None,
    }
}

/// Reads a plain number, written either as a JSON number or a numeric string.
///
/// # Examples
///
/// ```
/// use rangecard_config::coerce::coerce_number;
/// use serde_json::json;
///
/// assert_eq!(coerce_number(&json!(4)), Some(4.0));
/// assert_eq!(coerce_number(&json!("2.5")), Some(2.5));
/// assert_eq!(coerce_number(&json!("4px")), None);
/// assert_eq!(coerce_number(&json!(true)), None);
/// ```
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_finite(s.trim()),
        _ => None,
    }
}

/// Reads a percentage, rounded to the nearest integer and clamped to `1..=100`.
///
/// Unreadable values yield `fallback`.
///
/// # Examples
///
/// ```
/// use rangecard_config::coerce::clamp_percent;
/// use serde_json::json;
///
/// assert_eq!(clamp_percent(Some(&json!(49.6)), 100), 50);
/// assert_eq!(clamp_percent(Some(&json!(0)), 100), 1);
/// assert_eq!(clamp_percent(Some(&json!("250")), 100), 100);
/// assert_eq!(clamp_percent(Some(&json!("half")), 100), 100);
/// assert_eq!(clamp_percent(None, 80), 80);
/// ```
#[must_use]
pub fn clamp_percent(value: Option<&Value>, fallback: u32) -> u32 {
    match value.and_then(coerce_number) {
        Some(n) => n.round().clamp(1.0, 100.0) as u32,
        None => fallback,
    }
}

/// Reads a trimmed, non-empty string.
///
/// # Examples
///
/// ```
/// use rangecard_config::coerce::non_empty_string;
/// use serde_json::json;
///
/// assert_eq!(non_empty_string(&json!("  #ff8800 ")), Some("#ff8800".to_string()));
/// assert_eq!(non_empty_string(&json!("   ")), None);
/// assert_eq!(non_empty_string(&json!(12)), None);
/// ```
#[must_use]
pub fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Floors a finite pixel quantity into `u32`, saturating at the type's bounds.
#[must_use]
pub fn floor_px(px: f64) -> u32 {
    if px.is_nan() {
        return 0;
    }
    px.floor().clamp(0.0, f64::from(u32::MAX)) as u32
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
