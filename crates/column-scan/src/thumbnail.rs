//! Fixed-size nearest-neighbor thumbnails.

use crate::buffer::{PixelBuffer, CHANNELS};

/// Default edge length of a cached thumbnail.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 500;

/// Resample `source` into a `size x size` buffer.
///
/// Target pixel `(tx, ty)` copies source pixel
/// `(tx * width / size, ty * height / size)` with integer division, so
/// sampling always rounds toward the top-left of each source block. All four
/// channels are copied verbatim.
///
/// A source with zero width or height produces a zeroed thumbnail.
///
/// # Example
///
/// ```
/// use column_scan::{thumbnail, PixelBuffer};
///
/// let source = PixelBuffer::filled(3, 7, [1, 2, 3, 4]);
/// let thumb = thumbnail(&source, 10);
/// assert_eq!(thumb.width(), 10);
/// assert_eq!(thumb.height(), 10);
/// assert_eq!(thumb.pixel(9, 9), [1, 2, 3, 4]);
/// ```
pub fn thumbnail(source: &PixelBuffer, size: u32) -> PixelBuffer {
    let mut target = PixelBuffer::new(size, size);
    if source.is_empty() || size == 0 {
        return target;
    }

    let size64 = size as u64;
    let source_x: Vec<u32> = (0..size)
        .map(|tx| (tx as u64 * source.width() as u64 / size64) as u32)
        .collect();

    let src = source.as_bytes();
    let row_bytes = size as usize * CHANNELS;
    for (ty, row) in target.as_bytes_mut().chunks_exact_mut(row_bytes).enumerate() {
        let sy = (ty as u64 * source.height() as u64 / size64) as u32;
        for (tx, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let i = source.index(source_x[tx], sy);
            px.copy_from_slice(&src[i..i + CHANNELS]);
        }
    }
    target
}
