use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in [CubicBezierEase::LOADER, CubicBezierEase::new(0.0, 0.0, 1.0, 1.0)] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-0.5), 0.0);
        assert_eq!(ease.apply(1.5), 1.0);
    }
}

#[test]
fn loader_curve_is_symmetric_about_midpoint() {
    let e = CubicBezierEase::LOADER;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-9);
    for p in [0.1, 0.2, 0.3, 0.4] {
        assert!((e.apply(p) + e.apply(1.0 - p) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn monotonic_spot_check() {
    let e = CubicBezierEase::LOADER;
    let mut prev = 0.0;
    for i in 1..=20 {
        let v = e.apply(f64::from(i) / 20.0);
        assert!(v > prev);
        prev = v;
    }
}

#[test]
fn linear_control_points_give_identity() {
    let e = CubicBezierEase::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
    for p in [0.1, 0.25, 0.6, 0.9] {
        assert!((e.apply(p) - p).abs() < 1e-9);
    }
}

#[test]
fn key_spline_formats_like_smil() {
    assert_eq!(CubicBezierEase::LOADER.key_spline(), "0.4 0 0.6 1");
}
