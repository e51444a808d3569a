//! ColumnPipeline builder -- smear and detect in one call.

use crate::buffer::PixelBuffer;
use crate::detect::ColumnDetector;
use crate::smear::VerticalSmear;

/// Output of [`ColumnPipeline::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Smeared grayscale variant of the input, same dimensions.
    pub processed: PixelBuffer,
    /// Detected boundaries in row-then-leftmost order.
    pub boundaries: Vec<u32>,
}

/// Runs the vertical smear and the column detector over one image.
///
/// The smear produces the processed variant for display; detection runs on
/// the unsmeared input. The builder is reusable across images.
///
/// # Example
///
/// ```
/// use column_scan::{ColumnPipeline, PixelBuffer};
///
/// let pipeline = ColumnPipeline::new().threshold(30).max_lookback(16);
/// let image = PixelBuffer::filled(8, 8, [255, 255, 255, 255]);
/// let result = pipeline.process(&image);
///
/// assert_eq!(result.processed.width(), 8);
/// assert!(result.boundaries.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnPipeline {
    smear: VerticalSmear,
    detector: ColumnDetector,
}

impl ColumnPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detector's edge threshold.
    #[inline]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.detector = self.detector.threshold(threshold);
        self
    }

    /// Set the smear lookback cap.
    #[inline]
    pub fn max_lookback(mut self, rows: u32) -> Self {
        self.smear = self.smear.max_lookback(rows);
        self
    }

    pub fn smear(&self) -> &VerticalSmear {
        &self.smear
    }

    pub fn detector(&self) -> &ColumnDetector {
        &self.detector
    }

    pub fn process(&self, image: &PixelBuffer) -> ScanResult {
        ScanResult {
            processed: self.smear.apply(image),
            boundaries: self.detector.detect(image),
        }
    }
}
