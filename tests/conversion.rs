//! Pixel format conversion tests that need no fixture.

use ffmpeg_next::format::Pixel;
use framepick::{FramepickError, RgbConverter, SampleDepth};

#[test]
fn unknown_source_format_fails_to_initialise() {
    let result = RgbConverter::new(Pixel::None, 2, 2);
    match result {
        Err(FramepickError::ConversionInit(message)) => {
            assert!(message.contains("RGB24"), "{message}")
        }
        Err(other) => panic!("expected ConversionInit, got {other:?}"),
        Ok(_) => panic!("expected ConversionInit, got a converter"),
    }
}

#[test]
fn converts_a_synthetic_yuv_frame() {
    ffmpeg_next::init().unwrap();

    let mut frame = ffmpeg_next::frame::Video::new(Pixel::YUV420P, 4, 2);
    // Mid-gray: Y = 128, neutral chroma.
    for plane in 0..3 {
        frame.data_mut(plane).fill(128);
    }

    let mut converter = RgbConverter::for_frame(&frame).expect("Failed to build converter");
    assert_eq!(converter.source_format(), Pixel::YUV420P);

    let rgb = converter.convert(&frame).expect("Failed to convert frame");
    assert_eq!((rgb.width(), rgb.height()), (4, 2));
    assert_eq!(rgb.depth(), SampleDepth::Rgb);
    assert_eq!(rgb.data().len(), 4 * 2 * 3);
    assert!(rgb.data().iter().all(|&sample| sample.abs_diff(rgb.data()[0]) <= 2));
}
