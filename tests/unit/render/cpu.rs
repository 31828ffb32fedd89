use super::*;
use crate::spiral::layout::{LOGICAL_EXTENT, layout_dots};
use crate::spiral::tier::Tier;

fn opts() -> SpiralOptions {
    SpiralOptions::default()
}

#[test]
fn acquire_rejects_degenerate_and_oversized_surfaces() {
    assert!(matches!(
        Surface::acquire(0, 10),
        Err(LoaderError::SurfaceUnavailable(_))
    ));
    assert!(matches!(
        Surface::acquire(70_000, 10),
        Err(LoaderError::SurfaceUnavailable(_))
    ));
    let s = Surface::acquire(64, 64).unwrap();
    assert_eq!((s.width(), s.height()), (64, 64));
    assert_eq!(s.data().len(), 64 * 64 * 4);
}

#[test]
fn frame_is_opaque_with_background_in_corners() {
    let o = opts();
    let frame = render_frame_rgba(64, 0.5, &o, Background::Solid(o.bg_color)).unwrap();
    assert!(frame.premultiplied);
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
    assert_eq!(frame.pixel(0, 0), [0x01, 0x01, 0x09, 255]);
    assert_eq!(frame.pixel(63, 63), [0x01, 0x01, 0x09, 255]);
}

#[test]
fn translucent_dots_leave_every_pixel_opaque() {
    let o = opts();
    for extent in [32, 64, 120] {
        for t in [0.0, 0.5, 1.3, 2.9] {
            for bg in [
                Background::Solid(o.bg_color),
                Background::ColorKey(Color::MAGENTA_KEY),
            ] {
                let frame = render_frame_rgba(extent, t, &o, bg).unwrap();
                let translucent = frame.data.chunks_exact(4).filter(|px| px[3] != 255).count();
                assert_eq!(translucent, 0, "extent={extent} t={t} bg={bg:?}");
            }
        }
    }
}

#[test]
fn peaking_dot_centre_is_painted_with_dot_colour() {
    let o = opts();
    let tier = Tier::for_extent(400);
    let dots = layout_dots(&tier, o.duration);
    let dot = &dots[300];
    let t = dot.phase_offset + o.duration / 4.0;
    let frame = render_frame_rgba(400, t, &o, Background::Solid(o.bg_color)).unwrap();

    let scale = 400.0 / LOGICAL_EXTENT;
    let px = frame.pixel(
        (dot.center.x * scale).floor() as u32,
        (dot.center.y * scale).floor() as u32,
    );
    // Fully opaque at the peak, so the centre pixel is close to the dot colour.
    assert!(px[0].abs_diff(0x70) <= 24, "{px:?}");
    assert!(px[2].abs_diff(0xD2) <= 24, "{px:?}");
}

#[test]
fn frames_repeat_after_one_period() {
    let o = opts();
    let bg = Background::Solid(o.bg_color);
    for t in [0.0, 0.5, 1.75] {
        let a = render_frame_rgba(64, t, &o, bg).unwrap();
        let b = render_frame_rgba(64, t + o.duration, &o, bg).unwrap();
        assert_eq!(a, b, "t={t}");
    }
}

#[test]
fn previous_surface_contents_never_leak() {
    let o = opts();
    let mut surface = Surface::acquire(48, 48).unwrap();
    render_frame(&mut surface, 1.0, &o, Background::ColorKey(Color::MAGENTA_KEY)).unwrap();
    render_frame(&mut surface, 0.25, &o, Background::Solid(o.bg_color)).unwrap();
    let reused = surface.snapshot();
    let fresh = render_frame_rgba(48, 0.25, &o, Background::Solid(o.bg_color)).unwrap();
    assert_eq!(reused, fresh);
}

#[test]
fn color_key_background_is_exact_sentinel() {
    let o = opts();
    let frame = render_frame_rgba(32, 0.0, &o, Background::ColorKey(Color::MAGENTA_KEY)).unwrap();
    assert_eq!(frame.pixel(0, 0), [255, 0, 255, 255]);
}

#[test]
fn plan_extent_mismatch_is_rejected() {
    let o = opts();
    let mut surface = Surface::acquire(32, 32).unwrap();
    let plan = plan_frame(0.0, 64, &o, Background::Solid(o.bg_color));
    assert!(surface.execute(&plan).is_err());
}
