use super::*;

#[test]
fn local_time_is_always_non_negative() {
    for t in [-7.25, -3.0, 0.0, 0.1, 2.9, 3.0, 100.5] {
        let local = local_time(t, 1.2, 3.0);
        assert!((0.0..3.0).contains(&local), "t={t} local={local}");
    }
}

#[test]
fn quarter_period_after_offset_is_peak() {
    let (offset, duration) = (0.7, 3.0);
    let s = DotSample::at(offset + duration / 4.0, offset, duration, 2.0);
    assert!((s.opacity - 1.0).abs() < 1e-9);
    assert!((s.radius - 3.0).abs() < 1e-9);
}

#[test]
fn three_quarters_after_offset_is_trough() {
    let (offset, duration) = (0.7, 3.0);
    let p = pulse_at(offset + 0.75 * duration, offset, duration);
    assert!(p.abs() < 1e-9);
    let s = DotSample::from_pulse(p, 2.0);
    assert!((s.opacity - 0.3).abs() < 1e-9);
    assert!((s.radius - 1.0).abs() < 1e-9);
}

#[test]
fn pulse_repeats_exactly_each_period() {
    for t in [0.0, 0.5, 1.25, 2.75] {
        assert_eq!(pulse_at(t, 0.9, 3.0), pulse_at(t + 3.0, 0.9, 3.0));
    }
}

#[test]
fn pulse_stays_in_unit_range() {
    for i in 0..300 {
        let p = pulse_at(f64::from(i) * 0.01, 0.3, 3.0);
        assert!((0.0..=1.0).contains(&p));
    }
}
