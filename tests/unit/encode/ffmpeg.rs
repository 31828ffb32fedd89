use super::*;

fn cfg(w: u32, h: u32) -> SinkConfig {
    SinkConfig::new(w, h, Fps::new(15, 1).unwrap())
}

#[test]
fn temp_file_guard_removes_file_unless_disarmed() {
    let path = temp_output_path();
    std::fs::write(&path, b"x").unwrap();
    drop(TempFileGuard(Some(path.clone())));
    assert!(!path.exists());

    let kept = temp_output_path();
    std::fs::write(&kept, b"x").unwrap();
    let mut guard = TempFileGuard(Some(kept.clone()));
    assert_eq!(guard.disarm(), Some(kept.clone()));
    drop(guard);
    assert!(kept.exists());
    std::fs::remove_file(kept).unwrap();
}

#[test]
fn temp_paths_are_unique() {
    assert_ne!(temp_output_path(), temp_output_path());
}

#[test]
fn palette_filter_reserves_transparency_only_when_keyed() {
    assert!(palette_filter(&cfg(4, 4)).contains("reserve_transparent=0"));
    let keyed = cfg(4, 4).with_transparent_key(Some(crate::foundation::color::Color::MAGENTA_KEY));
    assert!(palette_filter(&keyed).contains("reserve_transparent=1"));
}

#[test]
fn missing_program_is_a_worker_resource_error() {
    let mut sink = FfmpegGifSink::new("/nonexistent/spiral-loader-ffmpeg");
    assert!(matches!(
        sink.begin(cfg(4, 4)),
        Err(LoaderError::WorkerResourceUnavailable(_))
    ));
    assert!(!is_ffmpeg_runnable(Path::new("/nonexistent/spiral-loader-ffmpeg")));
}

#[test]
fn encodes_gif_when_ffmpeg_is_available() {
    let program = PathBuf::from("ffmpeg");
    if !is_ffmpeg_runnable(&program) {
        return;
    }
    let mut sink = FfmpegGifSink::new(program);
    sink.begin(cfg(8, 8)).unwrap();
    for i in 0..3 {
        let frame = FrameRGBA {
            width: 8,
            height: 8,
            data: [40 * i as u8, 0, 0, 255].repeat(64),
            premultiplied: true,
        };
        sink.push_frame(FrameIndex(i), &frame).unwrap();
    }
    let bytes = sink.finish().unwrap();
    assert_eq!(&bytes[..3], b"GIF");
}
