//! Assertion helpers for tests.

use colfind::rendering::Frame;

/// Assert bytes are a PNG image and decode them
pub fn assert_png(bytes: &[u8]) -> image::RgbaImage {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    image::load_from_memory(bytes)
        .expect("PNG should decode")
        .to_rgba8()
}

/// Assert a frame pixel has the expected color
pub fn assert_pixel(frame: &Frame, x: u32, y: u32, expected: [u8; 4]) {
    let actual = frame.image.pixel(x, y);
    assert_eq!(
        actual, expected,
        "Pixel ({x}, {y}) is {actual:?}, expected {expected:?}"
    );
}

/// Number of frame pixels with exactly this color
pub fn count_pixels(frame: &Frame, rgba: [u8; 4]) -> usize {
    frame
        .image
        .as_bytes()
        .chunks_exact(4)
        .filter(|p| *p == rgba)
        .count()
}
