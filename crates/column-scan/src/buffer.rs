//! RGBA pixel buffer shared by every stage of the pipeline.
//!
//! [`PixelBuffer`] owns a tightly packed `width * height * 4` byte array in
//! row-major, top-to-bottom order. Buffers are never resized in place: any
//! stage that changes dimensions allocates a new buffer.

use std::fmt;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Error type for buffer construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The byte slice does not hold exactly `width * height * 4` bytes.
    LengthMismatch {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
        /// Number of bytes actually supplied
        actual: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::LengthMismatch {
                width,
                height,
                actual,
            } => write!(
                f,
                "pixel data length mismatch: {}x{} needs {} bytes, got {}",
                width,
                height,
                byte_len(*width, *height),
                actual
            ),
        }
    }
}

impl std::error::Error for BufferError {}

#[inline]
fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

/// An owned RGBA image, 8 bits per channel.
///
/// # Example
///
/// ```
/// use column_scan::PixelBuffer;
///
/// let buffer = PixelBuffer::filled(2, 3, [10, 20, 30, 255]);
/// assert_eq!(buffer.width(), 2);
/// assert_eq!(buffer.height(), 3);
/// assert_eq!(buffer.as_bytes().len(), 2 * 3 * 4);
/// assert_eq!(buffer.pixel(1, 2), [10, 20, 30, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zeroed (transparent black) buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; byte_len(width, height)],
        }
    }

    /// Create a buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap raw RGBA bytes.
    ///
    /// Fails when `pixels.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BufferError> {
        if pixels.len() != byte_len(width, height) {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer and return the raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read pixel `(x, y)` as `[r, g, b, a]`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Overwrite pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.pixels[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// The bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize * CHANNELS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let buffer = PixelBuffer::new(3, 2);
        assert_eq!(buffer.as_bytes().len(), 24);
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_rgba_rejects_wrong_length() {
        let err = PixelBuffer::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            BufferError::LengthMismatch {
                width: 2,
                height: 2,
                actual: 15
            }
        );
        assert_eq!(
            err.to_string(),
            "pixel data length mismatch: 2x2 needs 16 bytes, got 15"
        );
    }

    #[test]
    fn test_zero_sized_buffer() {
        let buffer = PixelBuffer::from_rgba(0, 7, Vec::new()).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.as_bytes().is_empty());
    }

    #[test]
    fn test_pixel_roundtrip_and_row() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.set_pixel(2, 1, [1, 2, 3, 4]);
        assert_eq!(buffer.pixel(2, 1), [1, 2, 3, 4]);
        assert_eq!(buffer.row(1)[8..12], [1, 2, 3, 4]);
        assert_eq!(buffer.row(0), &[0; 12]);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = PixelBuffer::filled(2, 2, [9, 9, 9, 255]);
        let mut copy = original.clone();
        copy.set_pixel(0, 0, [0, 0, 0, 0]);
        assert_eq!(original.pixel(0, 0), [9, 9, 9, 255]);
        assert_ne!(original, copy);
    }
}
