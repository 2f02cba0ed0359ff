//! Property tests for the layout engine.

use proptest::prelude::*;
use rangecard_layout::{HostReliability, assess_host, compute_layout};
use rangecard_protocol::{HeightSetting, LayoutConfig, LayoutTuning, MeasuredGeometry, Orientation};

prop_compose! {
    /// Configurations shaped the way the normalizer produces them.
    fn arb_config()(
        min in 30u32..1500,
        extra in 0u32..3000,
        user_supplied_max in any::<bool>(),
        scale_percent in 1u32..=100,
        fixed in prop::option::of(-100.0f64..6000.0),
    ) -> LayoutConfig {
        let max_height_px = if user_supplied_max { min + extra } else { min.max(1000) };
        LayoutConfig {
            orientation: Orientation::Vertical,
            height_setting: fixed.map_or(HeightSetting::Auto, HeightSetting::FixedPixels),
            min_height_px: min,
            max_height_px,
            thickness_px: 4,
            scale_percent,
            user_supplied_max,
        }
    }
}

prop_compose! {
    fn arb_geometry()(
        host in prop::option::of(0.0f64..2500.0),
        chrome in 0.0f64..400.0,
    ) -> MeasuredGeometry {
        MeasuredGeometry { host_height: host, chrome_height: chrome }
    }
}

/// A host whose box reports the pinned height when pinned, otherwise the
/// height its surroundings offer.
fn remeasure(offered: MeasuredGeometry, pin: Option<u32>) -> MeasuredGeometry {
    MeasuredGeometry {
        host_height: pin.map(f64::from).or(offered.host_height),
        ..offered
    }
}

proptest! {
    /// The track height never leaves the configured bounds.
    #[test]
    fn track_height_within_bounds(config in arb_config(), geometry in arb_geometry()) {
        let tuning = LayoutTuning::default();
        let result = compute_layout(&config, Some(&geometry), None, &tuning).unwrap();

        prop_assert!(result.track_height_px >= config.min_height_px);
        prop_assert!(result.track_height_px <= config.max_height_px);

        let unreliable = !assess_host(geometry.host_height, None, &tuning).is_reliable();
        if config.height_setting == HeightSetting::Auto && unreliable && !config.user_supplied_max {
            let fallback = config.min_height_px.max(tuning.unmeasured_fallback_px);
            prop_assert!(result.track_height_px <= fallback);
        }
    }

    /// The container is pinned exactly when the measurement is unreliable.
    #[test]
    fn pinned_iff_unreliable(config in arb_config(), geometry in arb_geometry()) {
        let config = LayoutConfig { height_setting: HeightSetting::Auto, ..config };
        let tuning = LayoutTuning::default();
        let result = compute_layout(&config, Some(&geometry), None, &tuning).unwrap();
        let reliability = assess_host(geometry.host_height, None, &tuning);

        prop_assert_eq!(result.is_pinned(), reliability == HostReliability::Unreliable);
    }

    /// Applying the pinned height and measuring again changes nothing.
    #[test]
    fn converges_after_one_pass(config in arb_config(), offered in arb_geometry()) {
        let tuning = LayoutTuning::default();
        let first = compute_layout(&config, Some(&offered), None, &tuning).unwrap();

        let measured = remeasure(offered, first.forced_container_height_px);
        let second = compute_layout(&config, Some(&measured), Some(&first), &tuning).unwrap();
        prop_assert_eq!(first, second);

        let measured = remeasure(offered, second.forced_container_height_px);
        let third = compute_layout(&config, Some(&measured), Some(&second), &tuning).unwrap();
        prop_assert_eq!(second, third);
    }

    /// A larger scale percentage never yields a shorter track.
    #[test]
    fn monotonic_in_scale_percent(
        config in arb_config(),
        geometry in arb_geometry(),
        p1 in 1u32..=100,
        p2 in 1u32..=100,
    ) {
        let (low, high) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        let tuning = LayoutTuning::default();

        let at = |scale_percent| {
            let config = LayoutConfig { scale_percent, ..config.clone() };
            compute_layout(&config, Some(&geometry), None, &tuning).unwrap().track_height_px
        };
        prop_assert!(at(low) <= at(high));
    }

    /// An explicit max bound replaces the fallback budget.
    #[test]
    fn explicit_max_overrides_fallback(
        min in 30u32..500,
        extra in 0u32..2000,
        host in 0.0f64..79.0,
        chrome in 0.0f64..100.0,
    ) {
        let config = LayoutConfig {
            min_height_px: min,
            max_height_px: min + extra,
            user_supplied_max: true,
            ..LayoutConfig::vertical()
        };
        let geometry = MeasuredGeometry::new(host, chrome);
        let result = compute_layout(&config, Some(&geometry), None, &LayoutTuning::default()).unwrap();
        prop_assert_eq!(result.forced_container_height_px, Some(min + extra));
    }
}

#[test]
fn defaulted_max_uses_fallback_when_unreliable() {
    let result = compute_layout(
        &LayoutConfig::vertical(),
        Some(&MeasuredGeometry::new(40.0, 50.0)),
        None,
        &LayoutTuning::default(),
    )
    .unwrap();
    assert_eq!(result.forced_container_height_px, Some(350));
}
