//! The layout pass.
//!
//! [`compute_layout`] is a pure function of the configuration, the current
//! measurement, and the previous pass's result. It is total: every input
//! combination yields a result, nothing here can fail.

use rangecard_protocol::{
    HeightSetting, LayoutConfig, LayoutResult, LayoutTuning, MeasuredGeometry, Orientation,
};
use tracing::debug;

use crate::reliability::{HostReliability, assess_host};

/// Computes the vertical track height and the optional pinned container height.
///
/// Returns `None` in horizontal orientation, where there is nothing to size:
/// the presentation layer clears both vertical slots.
///
/// In vertical orientation:
///
/// - A fixed height is bounded by the configured limits and scaled by the
///   percentage; the measurement is ignored.
/// - An auto height without any measurement reuses `previous`, or, on the very
///   first pass, falls back to a provisional height so the track never renders
///   empty.
/// - An auto height with a measurement is fitted into the host (reliable) or
///   into the effective max bound with the container pinned (unreliable).
///
/// # Examples
///
/// ```
/// use rangecard_layout::compute_layout;
/// use rangecard_protocol::{HeightSetting, LayoutConfig, LayoutTuning, MeasuredGeometry};
///
/// let tuning = LayoutTuning::default();
///
/// let config = LayoutConfig::vertical();
/// let result = compute_layout(&config, Some(&MeasuredGeometry::new(500.0, 50.0)), None, &tuning)
///     .unwrap();
/// assert_eq!(result.track_height_px, 426);
/// assert_eq!(result.forced_container_height_px, None);
///
/// let config = LayoutConfig {
///     height_setting: HeightSetting::FixedPixels(600.0),
///     scale_percent: 50,
///     ..LayoutConfig::vertical()
/// };
/// let result = compute_layout(&config, None, None, &tuning).unwrap();
/// assert_eq!(result.track_height_px, 300);
/// ```
#[must_use]
pub fn compute_layout(
    config: &LayoutConfig,
    geometry: Option<&MeasuredGeometry>,
    previous: Option<&LayoutResult>,
    tuning: &LayoutTuning,
) -> Option<LayoutResult> {
    if config.orientation == Orientation::Horizontal {
        return None;
    }

    let result = match (config.height_setting, geometry) {
        (HeightSetting::FixedPixels(px), _) => LayoutResult::unpinned(fixed_height(config, px)),
        (HeightSetting::Auto, Some(geometry)) => adaptive_height(config, geometry, previous, tuning),
        (HeightSetting::Auto, None) => match previous {
            Some(previous) => *previous,
            None => LayoutResult::unpinned(provisional_height(config, tuning)),
        },
    };

    Some(result)
}

/// Returns the upper bound the track is fitted into.
///
/// Without a usable measurement and without an explicit max from the user,
/// the conservative fallback budget replaces the generic default max. An
/// explicit max is always honored.
///
/// # Examples
///
/// ```
/// use rangecard_layout::{HostReliability, effective_max_height};
/// use rangecard_protocol::{LayoutConfig, LayoutTuning};
///
/// let tuning = LayoutTuning::default();
/// let defaulted = LayoutConfig::vertical();
/// assert_eq!(effective_max_height(&defaulted, HostReliability::Unreliable, &tuning), 350);
/// assert_eq!(effective_max_height(&defaulted, HostReliability::Reliable(500.0), &tuning), 1000);
///
/// let explicit = LayoutConfig { max_height_px: 600, user_supplied_max: true, ..defaulted };
/// assert_eq!(effective_max_height(&explicit, HostReliability::Unreliable, &tuning), 600);
/// ```
#[must_use]
pub fn effective_max_height(
    config: &LayoutConfig,
    reliability: HostReliability,
    tuning: &LayoutTuning,
) -> u32 {
    match reliability {
        HostReliability::Unreliable if !config.user_supplied_max => config
            .min_height_px
            .max(tuning.unmeasured_fallback_px),
        _ => config.max_height_px,
    }
}

fn adaptive_height(
    config: &LayoutConfig,
    geometry: &MeasuredGeometry,
    previous: Option<&LayoutResult>,
    tuning: &LayoutTuning,
) -> LayoutResult {
    let reliability = assess_host(geometry.host_height, previous, tuning);
    let effective_max = effective_max_height(config, reliability, tuning);

    // The unreliable branch sizes against the pin, never against the measurement.
    let (effective_height, forced) = match reliability {
        HostReliability::Reliable(height) => (height, None),
        HostReliability::Unreliable => (f64::from(effective_max), Some(effective_max)),
    };

    let chrome = geometry.chrome_height.max(0.0) + f64::from(tuning.chrome_allowance_px);
    let available = clamp_px(effective_height - chrome, config.min_height_px, effective_max);
    let track = scale(available, config.scale_percent).clamp(config.min_height_px, available);

    debug!(
        reliable = reliability.is_reliable(),
        host_height = ?geometry.host_height,
        effective_max,
        available,
        track,
        "computed adaptive track height"
    );

    LayoutResult {
        track_height_px: track,
        forced_container_height_px: forced,
    }
}

fn fixed_height(config: &LayoutConfig, px: f64) -> u32 {
    let bounded = if px.is_nan() {
        f64::from(config.min_height_px)
    } else {
        px.clamp(
            f64::from(config.min_height_px),
            f64::from(config.max_height_px),
        )
    };
    let scaled = bounded * f64::from(config.scale_percent) / 100.0;
    clamp_px(scaled, config.min_height_px, config.max_height_px)
}

fn provisional_height(config: &LayoutConfig, tuning: &LayoutTuning) -> u32 {
    let base = tuning.provisional_height_px.min(config.max_height_px);
    scale(base, config.scale_percent).max(config.min_height_px)
}

/// Floors `value` and clamps it into `min..=max`.
fn clamp_px(value: f64, min: u32, max: u32) -> u32 {
    if value.is_nan() {
        return min;
    }
    value.floor().clamp(f64::from(min), f64::from(max)) as u32
}

/// Returns `floor(px * percent / 100)`.
fn scale(px: u32, percent: u32) -> u32 {
    let scaled = u64::from(px) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
