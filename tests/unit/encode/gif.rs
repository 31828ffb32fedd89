use std::io::Cursor;

use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;

use super::*;
use crate::foundation::color::Color;
use crate::foundation::core::Fps;

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

fn decode(bytes: &[u8]) -> Vec<image::Frame> {
    GifDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn encodes_frames_in_order() {
    let mut sink = GifSink::new();
    sink.begin(SinkConfig::new(8, 8, Fps::new(15, 1).unwrap()))
        .unwrap();
    sink.push_frame(FrameIndex(0), &solid(8, 8, [255, 0, 0, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &solid(8, 8, [0, 0, 255, 255]))
        .unwrap();
    let bytes = sink.finish().unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");

    let frames = decode(&bytes);
    assert_eq!(frames.len(), 2);
    let first = frames[0].buffer().get_pixel(3, 3).0;
    let second = frames[1].buffer().get_pixel(3, 3).0;
    assert!(first[0] > 200 && first[2] < 50, "{first:?}");
    assert!(second[2] > 200 && second[0] < 50, "{second:?}");
}

#[test]
fn key_colour_is_transparent_in_output() {
    let mut sink = GifSink::new();
    let cfg = SinkConfig::new(4, 4, Fps::new(15, 1).unwrap())
        .with_transparent_key(Some(Color::MAGENTA_KEY));
    sink.begin(cfg).unwrap();
    let mut frame = solid(4, 4, [0xFF, 0x00, 0xFF, 255]);
    frame.data[..4].copy_from_slice(&[0x70, 0x42, 0xD2, 255]);
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    let frames = decode(&sink.finish().unwrap());

    let buf = frames[0].buffer();
    assert_eq!(buf.get_pixel(3, 3).0[3], 0);
    assert_eq!(buf.get_pixel(0, 0).0[3], 255);
}

#[test]
fn keyed_frame_does_not_show_the_previous_frame_through() {
    let mut sink = GifSink::new();
    let cfg = SinkConfig::new(4, 4, Fps::new(15, 1).unwrap())
        .with_transparent_key(Some(Color::MAGENTA_KEY));
    sink.begin(cfg).unwrap();
    sink.push_frame(FrameIndex(0), &solid(4, 4, [255, 0, 0, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &solid(4, 4, [0xFF, 0x00, 0xFF, 255]))
        .unwrap();
    let frames = decode(&sink.finish().unwrap());

    assert_eq!(frames.len(), 2);
    assert!(frames[1].buffer().pixels().all(|px| px.0[3] == 0));
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = GifSink::new();
    sink.begin(SinkConfig::new(2, 2, Fps::new(15, 1).unwrap()))
        .unwrap();
    sink.push_frame(FrameIndex(1), &solid(2, 2, [0, 0, 0, 255]))
        .unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &solid(2, 2, [0, 0, 0, 255])),
        Err(LoaderError::EncodingFailed(_))
    ));
}
