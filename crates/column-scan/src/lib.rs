//! column-scan: column boundary detection for scanned document pages
//!
//! This library holds the numeric core of colfind: an owned RGBA buffer, a
//! shared luminance definition, a decaying vertical smear, a gradient-based
//! column detector and a nearest-neighbor thumbnailer. It has no
//! dependencies and does no I/O.
//!
//! # Quick Start
//!
//! ```
//! use column_scan::{ColumnPipeline, PixelBuffer};
//!
//! let rgba = vec![255u8; 6 * 2 * 4];
//! let image = PixelBuffer::from_rgba(6, 2, rgba).unwrap();
//!
//! let result = ColumnPipeline::new().process(&image);
//! assert_eq!(result.processed.height(), 2);
//! assert!(result.boundaries.is_empty());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! RGBA input
//!     |
//!     +---> luminance ---> VerticalSmear ---> processed buffer (display)
//!     |
//!     +---> luminance ---> ColumnDetector --> boundaries (x per row)
//!
//! either buffer ---> thumbnail(size) ---> size x size cache entry
//! ```
//!
//! Detection always runs on the unsmeared input; the processed buffer is
//! only used for display.

pub mod buffer;
pub mod detect;
pub mod gray;
pub mod pipeline;
pub mod smear;
pub mod thumbnail;


pub use buffer::{BufferError, PixelBuffer, CHANNELS};
pub use detect::{ColumnDetector, DEFAULT_THRESHOLD};
pub use gray::{luminance, luminance_at};
pub use pipeline::{ColumnPipeline, ScanResult};
pub use smear::{VerticalSmear, DEFAULT_MAX_LOOKBACK, MAX_SUPPORTED_LOOKBACK};
pub use thumbnail::{thumbnail, DEFAULT_THUMBNAIL_SIZE};
