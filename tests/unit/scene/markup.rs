use super::*;
use crate::scene::model::build_scene;
use crate::spiral::options::SpiralOptions;

#[test]
fn animated_markup_carries_smil_attributes() {
    let scene = build_scene(32, &SpiralOptions::default()).unwrap();
    let svg = scene.to_markup();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 400 400\""));
    assert!(svg.contains("width=\"100%\" height=\"100%\""));
    assert!(svg.contains("preserveAspectRatio=\"xMidYMid meet\""));
    assert_eq!(svg.matches("<circle ").count(), 45);
    assert_eq!(svg.matches("<animate ").count(), 90);
    assert!(svg.contains("attributeName=\"r\" values=\"2;6;2\" dur=\"3s\""));
    assert!(svg.contains("attributeName=\"opacity\" values=\"0.3;1;0.3\""));
    assert!(svg.contains("keySplines=\"0.4 0 0.6 1;0.4 0 0.6 1\""));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn frozen_markup_has_no_animations_and_explicit_size() {
    let scene = build_scene(64, &SpiralOptions::default()).unwrap().freeze_at(1.0);
    let svg = scene.to_markup_with(&MarkupOpts {
        pixel_size: Some(64),
        background: Some(Color::NIGHT),
    });
    assert!(svg.contains("width=\"64\" height=\"64\""));
    assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"400\" height=\"400\" fill=\"#010109\"/>"));
    assert!(!svg.contains("<animate"));
    assert_eq!(svg.matches(" opacity=\"").count(), 80);
}

#[test]
fn translucent_fill_uses_fill_opacity() {
    assert_eq!(
        paint_attrs(Color::rgba(255, 0, 0, 51)),
        " fill=\"#ff0000\" fill-opacity=\"0.2\""
    );
}

#[test]
fn insert_after_root_open_places_fragment_first() {
    let out = insert_after_root_open("<svg a=\"1\"><circle/></svg>", "<style/>").unwrap();
    assert_eq!(out, "<svg a=\"1\"><style/><circle/></svg>");
    assert!(insert_after_root_open("<g/>", "<style/>").is_none());
}
