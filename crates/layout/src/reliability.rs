//! Host measurement reliability.
//!
//! Hosts without a sizing context report a height of zero or a few pixels
//! of padding. Below the configured threshold a measurement is noise, not a
//! size to fit into. The threshold is a hysteresis boundary, not a physical
//! quantity.

use rangecard_protocol::{LayoutResult, LayoutTuning};

/// A pinned height read back within this distance counts as self-induced.
const SELF_PIN_TOLERANCE_PX: f64 = 0.5;

/// Outcome of judging a host measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostReliability {
    /// The host offers a real height to size against.
    Reliable(f64),
    /// The host offers no usable sizing signal.
    Unreliable,
}

impl HostReliability {
    /// Returns `true` for [`HostReliability::Reliable`].
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        matches!(self, Self::Reliable(_))
    }
}

/// Judges whether `host_height` can be trusted.
///
/// The measurement is unreliable when it is absent, not finite, zero, below
/// [`LayoutTuning::reliability_threshold_px`], or when it only reads back the
/// container height pinned by `previous`.
///
/// # Examples
///
/// ```
/// use rangecard_layout::{HostReliability, assess_host};
/// use rangecard_protocol::{LayoutResult, LayoutTuning};
///
/// let tuning = LayoutTuning::default();
/// assert_eq!(assess_host(None, None, &tuning), HostReliability::Unreliable);
/// assert_eq!(assess_host(Some(79.0), None, &tuning), HostReliability::Unreliable);
/// assert_eq!(assess_host(Some(80.0), None, &tuning), HostReliability::Reliable(80.0));
///
/// let pinned = LayoutResult { track_height_px: 276, forced_container_height_px: Some(350) };
/// assert_eq!(assess_host(Some(350.0), Some(&pinned), &tuning), HostReliability::Unreliable);
/// ```
#[must_use]
pub fn assess_host(
    host_height: Option<f64>,
    previous: Option<&LayoutResult>,
    tuning: &LayoutTuning,
) -> HostReliability {
    let Some(height) = host_height.filter(|h| h.is_finite() && *h > 0.0) else {
        return HostReliability::Unreliable;
    };

    if height < f64::from(tuning.reliability_threshold_px) {
        return HostReliability::Unreliable;
    }

    let self_pinned = previous
        .and_then(|p| p.forced_container_height_px)
        .is_some_and(|pin| (height - f64::from(pin)).abs() < SELF_PIN_TOLERANCE_PX);
    if self_pinned {
        return HostReliability::Unreliable;
    }

    HostReliability::Reliable(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> LayoutTuning {
        LayoutTuning::default()
    }

    #[test]
    fn zero_and_negative_are_unreliable() {
        assert_eq!(
            assess_host(Some(0.0), None, &tuning()),
            HostReliability::Unreliable
        );
        assert_eq!(
            assess_host(Some(-12.0), None, &tuning()),
            HostReliability::Unreliable
        );
    }

    #[test]
    fn non_finite_is_unreliable() {
        assert_eq!(
            assess_host(Some(f64::NAN), None, &tuning()),
            HostReliability::Unreliable
        );
        assert_eq!(
            assess_host(Some(f64::INFINITY), None, &tuning()),
            HostReliability::Unreliable
        );
    }

    #[test]
    fn threshold_is_inclusive_lower_bound() {
        assert!(!assess_host(Some(79.9), None, &tuning()).is_reliable());
        assert!(assess_host(Some(80.0), None, &tuning()).is_reliable());
    }

    #[test]
    fn custom_threshold() {
        let tuning = LayoutTuning {
            reliability_threshold_px: 200,
            ..LayoutTuning::default()
        };
        assert!(!assess_host(Some(150.0), None, &tuning).is_reliable());
        assert!(assess_host(Some(200.0), None, &tuning).is_reliable());
    }

    #[test]
    fn unpinned_previous_does_not_matter() {
        let previous = LayoutResult::unpinned(350);
        assert_eq!(
            assess_host(Some(350.0), Some(&previous), &tuning()),
            HostReliability::Reliable(350.0)
        );
    }

    #[test]
    fn reading_back_the_pin_is_unreliable() {
        let previous = LayoutResult {
            track_height_px: 276,
            forced_container_height_px: Some(350),
        };
        assert!(!assess_host(Some(350.2), Some(&previous), &tuning()).is_reliable());
        // A different height means the host really changed.
        assert_eq!(
            assess_host(Some(500.0), Some(&previous), &tuning()),
            HostReliability::Reliable(500.0)
        );
    }
}
