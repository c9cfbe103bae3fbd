use super::*;

const ALL: [Easing; 17] = [
    Easing::LinearEasing,
    Easing::EaseIn,
    Easing::EaseOut,
    Easing::EaseInOut,
    Easing::FastOutSlowInEasing,
    Easing::LinearOutSlowInEasing,
    Easing::FastOutLinearEasing,
    Easing::Power1In,
    Easing::Power1Out,
    Easing::Power1InOut,
    Easing::Power2In,
    Easing::Power2Out,
    Easing::Power2InOut,
    Easing::Power3In,
    Easing::Power3Out,
    Easing::Power3InOut,
    Easing::BackOut(1.7),
];

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::LinearEasing.transform(0.0), 0.0);
    assert_eq!(Easing::LinearEasing.transform(0.5), 0.5);
    assert_eq!(Easing::LinearEasing.transform(1.0), 1.0);
}

#[test]
fn every_curve_maps_end_points_exactly() {
    for easing in ALL {
        assert_eq!(easing.transform(0.0), 0.0, "start of {easing:?}");
        assert_eq!(easing.transform(1.0), 1.0, "end of {easing:?}");
    }
}

#[test]
fn monotonic_curves_stay_in_range() {
    for easing in ALL.iter().filter(|easing| !matches!(easing, Easing::BackOut(_))) {
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = easing.transform(step as f32 / 20.0);
            assert!(value >= previous - 1e-4, "{easing:?} decreased at step {step}");
            assert!((0.0..=1.0001).contains(&value));
            previous = value;
        }
    }
}

#[test]
fn power_out_curves_front_load_progress() {
    assert!((Easing::Power2Out.transform(0.5) - 0.875).abs() < 1e-6);
    assert!((Easing::Power3Out.transform(0.5) - 0.9375).abs() < 1e-6);
    assert!((Easing::Power1InOut.transform(0.5) - 0.5).abs() < 1e-6);
    assert!(Easing::Power3In.transform(0.5) < 0.1);
}

#[test]
fn back_out_overshoots_before_settling() {
    let peak = (1..20)
        .map(|step| Easing::BackOut(1.7).transform(step as f32 / 20.0))
        .fold(0.0f32, f32::max);
    assert!(peak > 1.0);
}

#[test]
fn cubic_bezier_midpoint_matches_css_ease_in_out() {
    assert!((Easing::EaseInOut.transform(0.5) - 0.5).abs() < 1e-3);
    assert!(Easing::FastOutSlowInEasing.transform(0.5) > 0.5);
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::FastOutSlowInEasing);
    assert_eq!(spec.delay_millis, 0);
    assert_eq!(AnimationSpec::linear(120).with_delay(40).delay_millis, 40);
}

#[test]
fn repeat_counts_cycles() {
    assert_eq!(Repeat::Once.cycles(), Some(1));
    assert_eq!(Repeat::Count(1).cycles(), Some(2));
    assert_eq!(Repeat::Infinite.cycles(), None);
}
