use super::*;
use proptest::prelude::*;

#[test]
fn endpoints_and_midpoint() {
    assert_eq!(
        map_to_color(-1.0, 1.0, -1.0).unwrap(),
        OverlayColor { r: 0, g: 0, b: 255 }
    );
    // The midpoint takes the lower branch: full (attenuated) green, no blue.
    assert_eq!(
        map_to_color(-1.0, 1.0, 0.0).unwrap(),
        OverlayColor { r: 0, g: 51, b: 0 }
    );
    assert_eq!(
        map_to_color(-1.0, 1.0, 1.0).unwrap(),
        OverlayColor { r: 255, g: 0, b: 0 }
    );
}

#[test]
fn quarter_points_truncate() {
    assert_eq!(
        map_to_color(-1.0, 1.0, -0.5).unwrap(),
        OverlayColor { r: 0, g: 25, b: 127 }
    );
    assert_eq!(
        map_to_color(-1.0, 1.0, 0.5).unwrap(),
        OverlayColor { r: 127, g: 25, b: 0 }
    );
}

#[test]
fn just_above_midpoint_switches_branch() {
    let c = map_to_color(-1.0, 1.0, 1e-9).unwrap();
    assert_eq!(c.b, 0);
    assert_eq!(c.r, 0);
    assert_eq!(c.g, 50);
}

#[test]
fn degenerate_and_inverted_ranges_fail() {
    assert!(matches!(
        HeatmapMapper::new(0.5, 0.5, SignalPolicy::Reject),
        Err(AuraError::DegenerateRange(_))
    ));
    assert!(matches!(
        HeatmapMapper::new(1.0, -1.0, SignalPolicy::Reject),
        Err(AuraError::Validation(_))
    ));
    assert!(HeatmapMapper::new(f64::NAN, 1.0, SignalPolicy::Reject).is_err());
}

#[test]
fn out_of_range_policies() {
    let reject = HeatmapMapper::new(-1.0, 1.0, SignalPolicy::Reject).unwrap();
    assert!(matches!(
        reject.map(1.5),
        Err(AuraError::SignalOutOfRange { .. })
    ));

    let clamp = HeatmapMapper::new(-1.0, 1.0, SignalPolicy::Clamp).unwrap();
    assert_eq!(clamp.map(3.0).unwrap(), clamp.map(1.0).unwrap());
    assert_eq!(clamp.map(-3.0).unwrap(), clamp.map(-1.0).unwrap());

    let extrapolate = HeatmapMapper::new(-1.0, 1.0, SignalPolicy::Extrapolate).unwrap();
    let c = extrapolate.map(2.0).unwrap();
    assert_eq!(c.r, 510);
    assert_eq!(c.g, -51);
    let c = extrapolate.map(-2.0).unwrap();
    assert_eq!(c.b, 510);
    assert_eq!(c.g, -51);
}

#[test]
fn non_finite_samples_are_rejected_under_every_policy() {
    for policy in [
        SignalPolicy::Reject,
        SignalPolicy::Clamp,
        SignalPolicy::Extrapolate,
    ] {
        let m = HeatmapMapper::new(-1.0, 1.0, policy).unwrap();
        assert!(m.map(f64::NAN).is_err());
        assert!(m.map(f64::INFINITY).is_err());
    }
}

#[test]
fn channel_accessor_follows_rgb_order() {
    let c = OverlayColor { r: 1, g: 2, b: 3 };
    assert_eq!(c.components(), [1, 2, 3]);
    assert_eq!((c.channel(0), c.channel(1), c.channel(2)), (1, 2, 3));
}

proptest! {
    #[test]
    fn lower_half_blue_is_non_increasing(a in -1.0f64..=0.0, b in -1.0f64..=0.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c_lo = map_to_color(-1.0, 1.0, lo).unwrap();
        let c_hi = map_to_color(-1.0, 1.0, hi).unwrap();
        prop_assert_eq!(c_lo.r, 0);
        prop_assert!(c_hi.b <= c_lo.b);
        prop_assert!((0..=255).contains(&c_lo.b));
    }

    #[test]
    fn upper_half_red_is_non_decreasing(a in 1e-6f64..=1.0, b in 1e-6f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c_lo = map_to_color(-1.0, 1.0, lo).unwrap();
        let c_hi = map_to_color(-1.0, 1.0, hi).unwrap();
        prop_assert_eq!(c_lo.b, 0);
        prop_assert!(c_lo.r <= c_hi.r);
        prop_assert!((0..=255).contains(&c_hi.r));
    }
}

#[test]
#[should_panic(expected = "channel index 3 out of range")]
fn channel_index_past_blue_panics() {
    let _ = OverlayColor { r: 1, g: 2, b: 3 }.channel(3);
}
