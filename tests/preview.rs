//! Display preparation tests.

use framepick::{
    FramepickError, PixelBuffer, SampleDepth,
    preview::{self, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH},
};

#[test]
fn grayscale_expands_to_equal_channels() {
    let gray = PixelBuffer::new(3, 1, SampleDepth::Gray, vec![0, 128, 255]).unwrap();
    let image = preview::to_rgb_image(&gray).unwrap();

    assert_eq!(image.dimensions(), (3, 1));
    assert_eq!(image.get_pixel(1, 0).0, [128, 128, 128]);
    assert_eq!(image.get_pixel(2, 0).0, [255, 255, 255]);
}

#[test]
fn rgb_keeps_sample_order() {
    let rgb = PixelBuffer::new(1, 1, SampleDepth::Rgb, vec![1, 2, 3]).unwrap();
    let image = preview::to_rgb_image(&rgb).unwrap();
    assert_eq!(image.get_pixel(0, 0).0, [1, 2, 3]);
}

#[test]
fn both_depths_scale_to_the_default_surface() {
    let gray = PixelBuffer::new(64, 48, SampleDepth::Gray, vec![90; 64 * 48]).unwrap();
    let rgb = PixelBuffer::new(64, 48, SampleDepth::Rgb, vec![90; 64 * 48 * 3]).unwrap();

    for buffer in [&gray, &rgb] {
        let scaled =
            preview::scale_to_surface(buffer, DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
                .unwrap();
        assert_eq!(scaled.dimensions(), (800, 600));
        // A flat image stays flat under bilinear scaling.
        let centre = scaled.get_pixel(400, 300).0;
        assert!(centre.iter().all(|&sample| sample.abs_diff(90) <= 1), "{centre:?}");
    }
}

#[test]
fn scaling_ignores_aspect_ratio() {
    let rgb = PixelBuffer::new(10, 10, SampleDepth::Rgb, vec![0; 300]).unwrap();
    let scaled = preview::scale_to_surface(&rgb, 40, 5).unwrap();
    assert_eq!(scaled.dimensions(), (40, 5));
}

#[test]
fn empty_surface_or_image_is_rejected() {
    let rgb = PixelBuffer::new(2, 2, SampleDepth::Rgb, vec![0; 12]).unwrap();
    assert!(matches!(
        preview::scale_to_surface(&rgb, 0, 10),
        Err(FramepickError::InvalidPixelMap(_))
    ));

    let empty = PixelBuffer::new(0, 0, SampleDepth::Gray, Vec::new()).unwrap();
    assert!(preview::scale_to_surface(&empty, 80, 48).is_err());
}
