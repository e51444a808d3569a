//! Column boundary detection by horizontal gradient thresholding.

use crate::buffer::PixelBuffer;
use crate::gray::luminance_at;

/// Default luminance difference that counts as an edge.
pub const DEFAULT_THRESHOLD: u8 = 20;

/// Scans each row for the leftmost strong horizontal luminance step.
///
/// For every row, interior columns `1..=width-2` are compared against their
/// left and right neighbours. The first column whose difference to either
/// neighbour exceeds the threshold is recorded and the rest of the row is
/// skipped, so each row contributes at most one entry.
///
/// The output is the concatenation of those per-row hits in row order. It is
/// not deduplicated: a straight rule running down the page yields the same
/// x-coordinate once per row.
///
/// # Example
///
/// ```
/// use column_scan::{ColumnDetector, PixelBuffer};
///
/// // White in columns 0-1, black in columns 2-3.
/// let mut image = PixelBuffer::filled(4, 4, [255, 255, 255, 255]);
/// for y in 0..4 {
///     image.set_pixel(2, y, [0, 0, 0, 255]);
///     image.set_pixel(3, y, [0, 0, 0, 255]);
/// }
///
/// assert_eq!(ColumnDetector::new().detect(&image), vec![1, 1, 1, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDetector {
    threshold: u8,
}

impl Default for ColumnDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnDetector {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Set the edge threshold. Differences strictly greater than this count.
    #[inline]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    pub fn edge_threshold(&self) -> u8 {
        self.threshold
    }

    /// Detect boundaries in `image`. Images narrower than three pixels have
    /// no interior columns and yield an empty sequence.
    pub fn detect(&self, image: &PixelBuffer) -> Vec<u32> {
        let mut boundaries = Vec::new();
        if image.width() < 3 {
            return boundaries;
        }

        let threshold = self.threshold as i16;
        for y in 0..image.height() {
            if let Some(x) = self.first_edge_in_row(image, y, threshold) {
                boundaries.push(x);
            }
        }
        boundaries
    }

    fn first_edge_in_row(&self, image: &PixelBuffer, y: u32, threshold: i16) -> Option<u32> {
        (1..image.width() - 1).find(|&x| {
            let current = luminance_at(image, x, y) as i16;
            let left = luminance_at(image, x - 1, y) as i16;
            let right = luminance_at(image, x + 1, y) as i16;
            (current - left).abs() > threshold || (current - right).abs() > threshold
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn striped(width: u32, height: u32, dark_columns: &[u32]) -> PixelBuffer {
        let mut image = PixelBuffer::filled(width, height, WHITE);
        for y in 0..height {
            for &x in dark_columns {
                image.set_pixel(x, y, BLACK);
            }
        }
        image
    }

    #[test]
    fn test_uniform_image_has_no_boundaries() {
        let image = PixelBuffer::filled(16, 8, [90, 120, 30, 255]);
        assert!(ColumnDetector::new().detect(&image).is_empty());
    }

    #[test]
    fn test_only_leftmost_edge_per_row() {
        // Two separate dark rules; only the first is reported per row.
        let image = striped(12, 3, &[4, 9]);
        assert_eq!(ColumnDetector::new().detect(&image), vec![3, 3, 3]);
    }

    #[test]
    fn test_border_columns_are_never_reported() {
        // Edges only between x=0/x=1 and x=width-2/x=width-1.
        let image = striped(6, 2, &[0, 5]);
        let boundaries = ColumnDetector::new().detect(&image);
        assert_eq!(boundaries, vec![1, 1]);
        assert!(boundaries.iter().all(|&x| x != 0 && x != 5));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut image = PixelBuffer::filled(3, 1, [100, 100, 100, 255]);
        image.set_pixel(2, 0, [120, 120, 120, 255]);
        assert!(ColumnDetector::new().threshold(20).detect(&image).is_empty());
        assert_eq!(ColumnDetector::new().threshold(19).detect(&image), vec![1]);
    }

    #[test]
    fn test_rows_without_edges_contribute_nothing() {
        let mut image = PixelBuffer::filled(5, 3, WHITE);
        image.set_pixel(2, 1, BLACK);
        assert_eq!(ColumnDetector::new().detect(&image), vec![1]);
    }

    #[test]
    fn test_narrow_images() {
        for width in 0..3 {
            let image = striped(width, 4, &[]);
            assert!(ColumnDetector::new().detect(&image).is_empty());
        }
    }
}
