//! Luminance conversion.
//!
//! One definition of "gray" is shared by the smear filter and the column
//! detector so both stages agree on pixel brightness.

use crate::buffer::PixelBuffer;

/// Rec. 601 luma: `0.299 R + 0.587 G + 0.114 B`, truncated toward zero.
///
/// Evaluated in integer thousandths, which makes the truncation exact
/// (pure white maps to 255, not 254).
///
/// # Example
///
/// ```
/// use column_scan::luminance;
///
/// assert_eq!(luminance(255, 255, 255), 255);
/// assert_eq!(luminance(0, 0, 0), 0);
/// assert_eq!(luminance(255, 0, 0), 76);
/// ```
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Luminance of pixel `(x, y)`; the alpha channel is ignored.
#[inline]
pub fn luminance_at(buffer: &PixelBuffer, x: u32, y: u32) -> u8 {
    let [r, g, b, _] = buffer.pixel(x, y);
    luminance(r, g, b)
}
