//! Turning files into image records.
//!
//! Decoding sits behind the [`Decoder`] trait so the processing stages only
//! ever see `(width, height, RGBA bytes)`. A record enters the collection
//! only after smearing and detection have both finished; files that fail
//! at any step are skipped and reported.

use crate::error::IngestError;
use crate::models::{ImageCollection, RecordContent, RecordId};
use column_scan::{ColumnPipeline, PixelBuffer};
use std::path::{Path, PathBuf};

/// Decoded pixels, 4 bytes per pixel in RGBA order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub trait Decoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, IngestError>;
}

/// Decodes any raster format enabled in the `image` crate features
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDecoder;

impl Decoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, IngestError> {
        let image = image::open(path).map_err(|e| IngestError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(DecodedImage {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// A file that did not make it into the collection
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: IngestError,
}

/// Outcome of ingesting a batch of files
#[derive(Debug, Default)]
pub struct IngestReport {
    pub added: Vec<RecordId>,
    pub skipped: Vec<SkippedFile>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Run the processing pipeline over an already decoded image
pub fn process(pipeline: &ColumnPipeline, source_name: &str, image: PixelBuffer) -> RecordContent {
    let scan = pipeline.process(&image);
    tracing::debug!(
        source = source_name,
        width = image.width(),
        height = image.height(),
        boundaries = scan.boundaries.len(),
        "Processed image"
    );
    RecordContent {
        source_name: source_name.to_string(),
        original: image,
        processed: scan.processed,
        boundaries: scan.boundaries,
    }
}

/// Decode and process one file
pub fn load(
    decoder: &dyn Decoder,
    pipeline: &ColumnPipeline,
    path: &Path,
) -> Result<RecordContent, IngestError> {
    let decoded = decoder.decode(path)?;
    if decoded.width == 0 || decoded.height == 0 {
        return Err(IngestError::DegenerateImage {
            path: path.to_path_buf(),
            width: decoded.width,
            height: decoded.height,
        });
    }
    let image = PixelBuffer::from_rgba(decoded.width, decoded.height, decoded.rgba)?;
    Ok(process(pipeline, &source_name(path), image))
}

/// Ingest files in order, appending each successfully processed one
pub fn ingest_files<P: AsRef<Path>>(
    decoder: &dyn Decoder,
    pipeline: &ColumnPipeline,
    collection: &mut ImageCollection,
    paths: &[P],
) -> IngestReport {
    let mut report = IngestReport::default();
    for path in paths {
        let path = path.as_ref();
        let added = load(decoder, pipeline, path).and_then(|content| {
            let boundaries = content.boundaries.len();
            collection.push(content).map(|id| (id, boundaries))
        });
        match added {
            Ok((id, boundaries)) => {
                tracing::info!(path = %path.display(), record = %id, boundaries, "Added image");
                report.added.push(id);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Skipping file");
                report.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }
    report
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
