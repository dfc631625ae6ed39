//! Colour and grayscale encoder tests.

use framepick::{
    ChannelWeights, FramepickError, PixelBuffer, SampleDepth, encode_color, encode_grayscale,
};

fn rgb_buffer(width: u32, height: u32) -> PixelBuffer {
    let data = (0..SampleDepth::Rgb.buffer_len(width, height).unwrap())
        .map(|index| (index * 37 % 256) as u8)
        .collect();
    PixelBuffer::new(width, height, SampleDepth::Rgb, data).expect("valid RGB buffer")
}

#[test]
fn output_lengths_follow_dimensions() {
    for (width, height) in [(1, 1), (2, 3), (7, 5), (64, 48)] {
        let rgb = rgb_buffer(width, height);
        let gray = encode_grayscale(&rgb, ChannelWeights::BT601).unwrap();
        let color = encode_color(rgb).unwrap();

        assert_eq!(gray.data().len(), (width * height) as usize);
        assert_eq!(color.data().len(), (width * height * 3) as usize);
        assert_eq!((gray.width(), gray.height()), (width, height));
        assert_eq!(gray.depth(), SampleDepth::Gray);
    }
}

#[test]
fn color_encoding_is_a_pass_through() {
    let rgb = rgb_buffer(4, 3);
    let original = rgb.data().to_vec();
    let color = encode_color(rgb).unwrap();
    assert_eq!(color.data(), original.as_slice());
    assert_eq!(color.depth(), SampleDepth::Rgb);
}

#[test]
fn white_with_bt601_weights_is_255() {
    assert_eq!(ChannelWeights::BT601.luminance(255, 255, 255), 255);
}

#[test]
fn in_range_sums_are_floored_not_rounded() {
    let weights = ChannelWeights::new(0.5, 0.25, 0.125);
    // 0.5*3 + 0.25*3 + 0.125*3 = 2.625
    assert_eq!(weights.luminance(3, 3, 3), 2);
    // 0.5*255 = 127.5
    assert_eq!(weights.luminance(255, 0, 0), 127);

    let thirds = ChannelWeights::new(0.33, 0.33, 0.33);
    for (red, green, blue) in [(0, 0, 0), (10, 200, 45), (255, 255, 255), (1, 2, 3)] {
        let sum = 0.33_f32 * red as f32 + 0.33_f32 * green as f32 + 0.33_f32 * blue as f32;
        assert_eq!(thirds.luminance(red, green, blue), sum.floor() as u8);
    }
}

#[test]
fn grayscale_applies_weights_per_pixel_in_order() {
    let rgb = PixelBuffer::new(
        2,
        2,
        SampleDepth::Rgb,
        vec![
            255, 0, 0, //
            0, 255, 0, //
            0, 0, 255, //
            100, 100, 100,
        ],
    )
    .unwrap();

    let red_only = encode_grayscale(&rgb, ChannelWeights::new(1.0, 0.0, 0.0)).unwrap();
    assert_eq!(red_only.data(), &[255, 0, 0, 100]);

    let blue_only = encode_grayscale(&rgb, ChannelWeights::new(0.0, 0.0, 1.0)).unwrap();
    assert_eq!(blue_only.data(), &[0, 0, 255, 100]);
}

#[test]
fn out_of_range_sums_saturate() {
    let loud = ChannelWeights::new(1.0, 1.0, 1.0);
    assert_eq!(loud.luminance(200, 200, 200), 255);

    let negative = ChannelWeights::new(-1.0, 0.0, 0.0);
    assert_eq!(negative.luminance(50, 0, 0), 0);

    let nan = ChannelWeights::new(f32::NAN, 0.0, 0.0);
    assert_eq!(nan.luminance(10, 10, 10), 0);
}

#[test]
fn range_check_flags_risky_weights() {
    assert!(ChannelWeights::BT601.is_in_range());
    assert!(ChannelWeights::new(0.33, 0.33, 0.33).is_in_range());
    assert!(!ChannelWeights::new(1.0, 1.0, 1.0).is_in_range());
    assert!(!ChannelWeights::new(0.5, -0.1, 0.5).is_in_range());
}

#[test]
fn non_finite_weights_are_out_of_range() {
    assert!(!ChannelWeights::new(f32::NAN, 0.0, 0.0).is_in_range());
    assert!(!ChannelWeights::new(0.2, f32::NAN, 0.2).is_in_range());
    assert!(!ChannelWeights::new(0.0, 0.0, f32::INFINITY).is_in_range());
    assert!(!ChannelWeights::new(f32::NEG_INFINITY, 0.0, 0.0).is_in_range());
}

#[test]
fn grayscale_rejects_grayscale_input() {
    let gray = PixelBuffer::new(2, 2, SampleDepth::Gray, vec![0; 4]).unwrap();
    let result = encode_grayscale(&gray, ChannelWeights::BT601);
    assert!(matches!(
        result,
        Err(FramepickError::UnexpectedSampleDepth {
            expected: SampleDepth::Rgb,
            found: SampleDepth::Gray,
        })
    ));
    assert!(encode_color(gray).is_err());
}

#[test]
fn buffer_rejects_wrong_length() {
    let result = PixelBuffer::new(2, 3, SampleDepth::Rgb, vec![0; 17]);
    let error = result.unwrap_err();
    assert!(matches!(
        error,
        FramepickError::BufferSizeMismatch {
            expected: 18,
            actual: 17,
            ..
        }
    ));
}

#[test]
fn changing_weights_leaves_color_untouched() {
    let rgb = rgb_buffer(5, 4);
    let first = encode_grayscale(&rgb, ChannelWeights::BT601).unwrap();
    let second = encode_grayscale(&rgb, ChannelWeights::new(0.2126, 0.7152, 0.0722)).unwrap();
    assert_ne!(first.data(), second.data());

    let before = rgb.data().to_vec();
    let color = encode_color(rgb).unwrap();
    assert_eq!(color.data(), before.as_slice());
}
