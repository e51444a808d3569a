//! Vertical smear filter.
//!
//! Exaggerates vertical structure by blending each pixel with a decaying
//! memory of the pixels above it in the same column, so that column gutters
//! and rules survive while horizontal text strokes wash out.
//!
//! # Weights
//!
//! At row `y` the output is a weighted sum of the grayscale samples in the
//! window `y - n ..= y`, with `n = min(y, max_lookback)`:
//!
//! ```text
//! row:     y     y-1    y-2   ...   y-n+1     y-n
//! weight:  1/2   1/4    1/8   ...   1/2^n     1/2^n
//! ```
//!
//! The oldest row takes the remaining weight so the weights always sum to
//! one. Inside the lookback window this is exactly the recurrence
//! `p[y] = g[y] / 2 + p[y - 1] / 2` with `p[0] = g[0]`; the cap only limits
//! how far back a bright pixel can leak in very tall images.
//!
//! The sum is evaluated in fixed point (`2^max_lookback` denominator) and
//! truncated once, so a constant column stays exactly constant.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::gray::luminance;

/// Default number of rows a pixel can influence below itself.
pub const DEFAULT_MAX_LOOKBACK: u32 = 40;

/// Largest lookback the fixed-point accumulator supports without overflow.
pub const MAX_SUPPORTED_LOOKBACK: u32 = 48;

/// Exponential-decay blend down each column.
///
/// # Example
///
/// ```
/// use column_scan::{PixelBuffer, VerticalSmear};
///
/// let input = PixelBuffer::filled(4, 4, [255, 255, 255, 0]);
/// let output = VerticalSmear::new().apply(&input);
///
/// assert_eq!(output.width(), 4);
/// assert_eq!(output.height(), 4);
/// // Constant input stays constant; alpha is forced opaque.
/// assert_eq!(output.pixel(3, 3), [255, 255, 255, 255]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalSmear {
    max_lookback: u32,
}

impl Default for VerticalSmear {
    fn default() -> Self {
        Self::new()
    }
}

impl VerticalSmear {
    pub fn new() -> Self {
        Self {
            max_lookback: DEFAULT_MAX_LOOKBACK,
        }
    }

    /// Set the lookback cap, clamped to `1..=MAX_SUPPORTED_LOOKBACK`.
    #[inline]
    pub fn max_lookback(mut self, rows: u32) -> Self {
        self.max_lookback = rows.clamp(1, MAX_SUPPORTED_LOOKBACK);
        self
    }

    #[inline]
    pub fn lookback(&self) -> u32 {
        self.max_lookback
    }

    /// Produce the smeared buffer. Output dimensions always match the input.
    pub fn apply(&self, input: &PixelBuffer) -> PixelBuffer {
        let width = input.width() as usize;
        let height = input.height() as usize;
        let mut output = PixelBuffer::new(input.width(), input.height());
        if input.is_empty() {
            return output;
        }

        let gray: Vec<u8> = input
            .as_bytes()
            .chunks_exact(CHANNELS)
            .map(|px| luminance(px[0], px[1], px[2]))
            .collect();

        let lookback = self.max_lookback as usize;
        let shift = self.max_lookback;
        let out = output.as_bytes_mut();
        let mut column = vec![0u8; height];

        for x in 0..width {
            for (y, sample) in column.iter_mut().enumerate() {
                *sample = gray[y * width + x];
            }

            for y in 0..height {
                let n = y.min(lookback);
                let mut acc = (column[y - n] as u64) << (lookback - n);
                for v in 0..n {
                    acc += (column[y - v] as u64) << (lookback - 1 - v);
                }
                let value = (acc >> shift) as u8;

                let i = (y * width + x) * CHANNELS;
                out[i] = value;
                out[i + 1] = value;
                out[i + 2] = value;
                out[i + 3] = 255;
            }
        }

        output
    }
}
