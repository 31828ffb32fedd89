use super::*;

#[test]
fn background_is_the_first_and_only_fill() {
    let opts = SpiralOptions::default();
    let plan = plan_frame(0.4, 64, &opts, Background::Solid(opts.bg_color));
    assert_eq!(plan.extent, 64);
    assert_eq!(plan.ops.len(), 81);
    assert_eq!(plan.ops[0], PaintOp::FillBackground(Color::NIGHT));
    assert!(
        plan.ops[1..]
            .iter()
            .all(|op| matches!(op, PaintOp::FillCircle { .. }))
    );
}

#[test]
fn color_key_replaces_background_paint() {
    let opts = SpiralOptions::default();
    let plan = plan_frame(0.0, 32, &opts, Background::ColorKey(Color::MAGENTA_KEY));
    assert_eq!(plan.ops[0], PaintOp::FillBackground(Color::MAGENTA_KEY));
}

#[test]
fn sampled_dots_scale_with_pixel_extent() {
    let opts = SpiralOptions::default();
    let full = sample_dots(1.0, 400, &opts);
    let half = sample_dots(1.0, 200, &opts);
    assert_eq!(full.len(), half.len());
    for (a, b) in full.iter().zip(&half) {
        assert!((a.center.x / 2.0 - b.center.x).abs() < 1e-9);
        assert!((a.radius / 2.0 - b.radius).abs() < 1e-9);
        assert_eq!(a.opacity, b.opacity);
    }
}

#[test]
fn sampled_dot_peaks_a_quarter_period_after_its_offset() {
    let opts = SpiralOptions::default();
    let tier = Tier::for_extent(64);
    let dots = layout_dots(&tier, opts.duration);
    let target = &dots[17];
    let t = target.phase_offset + opts.duration / 4.0;
    let sampled = sample_dots(t, 64, &opts)[17];
    let scale = 64.0 / LOGICAL_EXTENT;
    assert!((sampled.opacity - 1.0).abs() < 1e-9);
    assert!((sampled.radius - 1.5 * tier.dot_radius * scale).abs() < 1e-9);
}

#[test]
fn dot_alpha_combines_colour_alpha_and_opacity() {
    let opts = SpiralOptions {
        dot_color: Color::rgba(255, 255, 255, 128),
        ..SpiralOptions::default()
    };
    let plan = plan_frame(0.0, 400, &opts, Background::Solid(Color::NIGHT));
    for op in &plan.ops[1..] {
        let PaintOp::FillCircle { color, .. } = op else {
            panic!("expected circle");
        };
        assert!(color.a <= 128);
        assert!(color.a >= 38);
    }
}
