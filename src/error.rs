use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a source file into an image record.
///
/// Always non-fatal: the offending file is skipped and ingestion continues.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Degenerate image {path}: {width}x{height}")]
    DegenerateImage {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("Invalid pixel data: {0}")]
    PixelData(#[from] column_scan::BufferError),

    #[error("Processed buffer is {processed:?}, original is {original:?}")]
    BufferMismatch {
        original: (u32, u32),
        processed: (u32, u32),
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// The offscreen surface for the current viewport could not be created.
    /// Rendering cannot continue without it.
    #[error("Missing render surface for {width}x{height} viewport")]
    MissingSurface { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XML parse error: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("Unexpected root element: {0}")]
    UnexpectedRoot(String),

    #[error("Invalid column value: {0:?}")]
    InvalidColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
