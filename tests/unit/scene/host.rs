use super::*;
use crate::spiral::tier::Tier;

#[test]
fn new_host_is_empty() {
    let host = PreviewHost::new();
    assert!(host.scene().is_none());
    assert!(host.key().is_none());
}

#[test]
fn mount_replaces_previous_scene() {
    let mut host = PreviewHost::new();
    let opts = SpiralOptions::default();
    assert_eq!(host.mount(400, &opts).unwrap().circles.len(), 600);
    assert_eq!(host.mount(32, &opts).unwrap().circles.len(), 45);
    assert_eq!(host.scene().unwrap().tier, Tier::SPARSE);
}

#[test]
fn sync_rebuilds_only_on_key_change() {
    let mut host = PreviewHost::new();
    let opts = SpiralOptions::default();
    assert!(host.sync(96, &opts).unwrap());
    assert!(!host.sync(96, &opts).unwrap());

    let recoloured = SpiralOptions {
        dot_color: Color::rgb(0, 200, 0),
        ..opts
    };
    assert!(host.sync(96, &recoloured).unwrap());

    let new_bg = SpiralOptions {
        bg_color: Color::PAPER,
        ..recoloured
    };
    assert!(!host.sync(96, &new_bg).unwrap());

    let slower = SpiralOptions {
        duration: 6.0,
        ..new_bg
    };
    assert!(host.sync(96, &slower).unwrap());
}

#[test]
fn clamped_extents_share_a_key() {
    let mut host = PreviewHost::new();
    let opts = SpiralOptions::default();
    assert!(host.sync(500, &opts).unwrap());
    assert!(!host.sync(400, &opts).unwrap());
}

#[test]
fn failed_mount_leaves_host_empty() {
    let mut host = PreviewHost::new();
    host.mount(64, &SpiralOptions::default()).unwrap();
    let bad = SpiralOptions {
        duration: -1.0,
        ..SpiralOptions::default()
    };
    assert!(host.mount(64, &bad).is_err());
    assert!(host.scene().is_none());
    host.unmount();
    assert!(host.scene().is_none());
}
