use super::*;
use crate::animation::pulse::pulse_at;

fn doc(extent: u32) -> LottieDocument {
    animation_document(extent, &SpiralOptions::default()).unwrap()
}

#[test]
fn document_header_matches_timing() {
    let d = doc(64);
    assert_eq!(d.frame_rate, 60.0);
    assert_eq!(d.in_point, 0.0);
    assert_eq!(d.out_point, 180.0);
    assert_eq!((d.width, d.height), (64, 64));
    assert_eq!(d.name, "mahana-ai-loader");
}

#[test]
fn one_layer_per_dot_plus_background_at_the_bottom() {
    let d = doc(64);
    assert_eq!(d.layers.len(), 80 + 1);
    let bg = d.layers.last().unwrap();
    assert_eq!(bg.kind, 1);
    assert_eq!(bg.solid_color.as_deref(), Some("#010109"));
    assert_eq!(bg.solid_width, Some(64));
    assert!(d.layers[..80].iter().all(|l| l.kind == 4 && l.shapes.is_some()));
    let indices: Vec<u32> = d.layers.iter().map(|l| l.index).collect();
    assert_eq!(indices, (1..=81).collect::<Vec<_>>());
}

#[test]
fn keyframes_bracket_the_loop_and_carry_the_loader_ease() {
    let d = doc(32);
    let kf = d.layers[0].transform.opacity.keyframes().unwrap();
    assert!(kf.first().unwrap().t <= 0.0);
    assert!(kf.last().unwrap().t >= d.out_point);
    for pair in kf.windows(2) {
        assert!((pair[1].t - pair[0].t - 90.0).abs() < 1e-9);
    }
    let o = kf[0].o.as_ref().unwrap();
    let i = kf[0].i.as_ref().unwrap();
    assert_eq!((o.x[0], o.y[0]), (0.4, 0.0));
    assert_eq!((i.x[0], i.y[0]), (0.6, 1.0));
    assert!(kf.last().unwrap().o.is_none());
}

#[test]
fn opacity_peaks_where_the_closed_form_pulse_peaks() {
    let options = SpiralOptions::default();
    let d = animation_document(120, &options).unwrap();
    let tier = Tier::for_extent(120);
    let dots = layout_dots(&tier, options.duration);
    for (layer, dot) in d.layers.iter().zip(&dots).step_by(17) {
        let kf = layer.transform.opacity.keyframes().unwrap();
        for k in kf.iter().filter(|k| (k.s[0] - 100.0).abs() < 1e-9) {
            let secs = k.t / LOTTIE_FRAME_RATE;
            let pulse = pulse_at(secs, dot.phase_offset, options.duration);
            assert!((pulse - 1.0).abs() < 1e-9, "dot {} t={secs}", dot.index);
        }
        for k in kf.iter().filter(|k| (k.s[0] - 30.0).abs() < 1e-9) {
            let secs = k.t / LOTTIE_FRAME_RATE;
            let pulse = pulse_at(secs, dot.phase_offset, options.duration);
            assert!(pulse.abs() < 1e-9, "dot {} t={secs}", dot.index);
        }
    }
}

#[test]
fn ellipse_size_is_scaled_like_the_raster_backend() {
    let d = doc(200);
    let Some(ShapeItem::Group { it, .. }) = d.layers[0].shapes.as_ref().and_then(|s| s.first())
    else {
        panic!("dot layer has no group");
    };
    let ShapeItem::Ellipse { s, .. } = &it[0] else {
        panic!("first item is not an ellipse");
    };
    let values: Vec<f64> = s.keyframes().unwrap().iter().map(|k| k.s[0]).collect();
    // dense tier: r = 2, scale 0.5 -> diameters 1.0 and 3.0
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!((min - 1.0).abs() < 1e-9);
    assert!((max - 3.0).abs() < 1e-9);
}

#[test]
fn document_round_trips_through_json() {
    let artifact = export_animation_document(32, &SpiralOptions::default()).unwrap();
    assert_eq!(artifact.mime, "application/json");
    let parsed: LottieDocument = serde_json::from_slice(&artifact.bytes).unwrap();
    assert_eq!(parsed, doc(32));

    let raw: serde_json::Value = serde_json::from_slice(&artifact.bytes).unwrap();
    assert_eq!(raw["fr"], 60.0);
    assert_eq!(raw["layers"][0]["ty"], 4);
    assert_eq!(raw["layers"][0]["shapes"][0]["ty"], "gr");
    assert_eq!(raw["layers"][0]["shapes"][0]["it"][0]["ty"], "el");
}

#[test]
fn invalid_duration_is_rejected() {
    let options = SpiralOptions {
        duration: -1.0,
        ..SpiralOptions::default()
    };
    assert!(animation_document(64, &options).is_err());
}
