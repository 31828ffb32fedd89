use super::*;
use crate::animation::pulse::{DotSample, pulse_at};
use crate::spiral::layout::layout_dots;
use crate::spiral::tier::Tier;

fn radius_and_opacity(dot: &Dot, t: f64) -> (f64, f64) {
    let [r, o] = dot_oscillators(dot, 3.0, 3.0);
    (r.value_at(t).unwrap(), o.value_at(t).unwrap())
}

#[test]
fn every_oscillator_is_running_at_time_zero() {
    for dot in layout_dots(&Tier::SMALL, 3.0) {
        for osc in dot_oscillators(&dot, 3.0, 3.0) {
            assert!(osc.begin < 0.0);
            assert!(osc.value_at(0.0).is_some());
        }
    }
}

#[test]
fn peak_keyframe_lands_on_closed_form_peak() {
    for dot in layout_dots(&Tier::SMALL, 3.0).iter().step_by(7) {
        let t = dot.phase_offset + 3.0 / 4.0;
        let (r, o) = radius_and_opacity(dot, t);
        let s = DotSample::at(t, dot.phase_offset, 3.0, 3.0);
        assert!((r - 4.5).abs() < 1e-6);
        assert!((o - 1.0).abs() < 1e-6);
        assert!((r - s.radius).abs() < 1e-6);
        assert!((o - s.opacity).abs() < 1e-6);
    }
}

#[test]
fn quarter_points_agree_with_closed_form() {
    let dot = layout_dots(&Tier::SMALL, 3.0)[11];
    for k in 0..4 {
        let t = dot.phase_offset + f64::from(k) * 0.75;
        let (r, o) = radius_and_opacity(&dot, t);
        let s = DotSample::from_pulse(pulse_at(t, dot.phase_offset, 3.0), 3.0);
        assert!((r - s.radius).abs() < 1e-6, "k={k}");
        assert!((o - s.opacity).abs() < 1e-6, "k={k}");
    }
}

#[test]
fn spline_tracks_sine_between_quarter_points() {
    let dot = layout_dots(&Tier::SMALL, 3.0)[3];
    for i in 0..120 {
        let t = f64::from(i) * 0.025;
        let (_, o) = radius_and_opacity(&dot, t);
        let s = DotSample::at(t, dot.phase_offset, 3.0, 3.0);
        assert!((o - s.opacity).abs() < 0.05, "t={t} spline={o} sine={}", s.opacity);
    }
}

#[test]
fn value_before_begin_is_none() {
    let osc = Oscillator {
        attr: AnimatedAttr::Opacity,
        values: [0.3, 1.0, 0.3],
        dur: 2.0,
        begin: 1.0,
        ease: CubicBezierEase::LOADER,
    };
    assert_eq!(osc.value_at(0.5), None);
    assert_eq!(osc.value_at(1.0), Some(0.3));
}

#[test]
fn attribute_strings_match_smil_syntax() {
    let dot = layout_dots(&Tier::SPARSE, 3.0)[0];
    let [r, o] = dot_oscillators(&dot, 4.0, 3.0);
    assert_eq!(r.attr.svg_name(), "r");
    assert_eq!(r.values_attr(), "2;6;2");
    assert_eq!(o.values_attr(), "0.3;1;0.3");
    assert_eq!(o.key_splines_attr(), "0.4 0 0.6 1;0.4 0 0.6 1");
}
