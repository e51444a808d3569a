use crate::error::IngestError;
use column_scan::PixelBuffer;

/// Stable identifier of an image record within one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

impl RecordId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which of a record's two buffers a thumbnail was made from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Original,
    Processed,
}

/// One ingested image and everything derived from it
#[derive(Debug, Clone)]
pub struct ImageRecord {
    id: RecordId,
    source_name: String,
    original: PixelBuffer,
    processed: PixelBuffer,
    boundaries: Vec<u32>,
}

impl ImageRecord {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    pub fn processed(&self) -> &PixelBuffer {
        &self.processed
    }

    pub fn buffer(&self, kind: BufferKind) -> &PixelBuffer {
        match kind {
            BufferKind::Original => &self.original,
            BufferKind::Processed => &self.processed,
        }
    }

    /// Detected boundaries in detection order
    pub fn boundaries(&self) -> &[u32] {
        &self.boundaries
    }

    pub fn width(&self) -> u32 {
        self.original.width()
    }

    pub fn height(&self) -> u32 {
        self.original.height()
    }
}

/// Fully processed content for a new record
#[derive(Debug, Clone)]
pub struct RecordContent {
    pub source_name: String,
    pub original: PixelBuffer,
    pub processed: PixelBuffer,
    pub boundaries: Vec<u32>,
}

impl RecordContent {
    fn check_dimensions(&self) -> Result<(), IngestError> {
        let original = (self.original.width(), self.original.height());
        let processed = (self.processed.width(), self.processed.height());
        if original != processed {
            return Err(IngestError::BufferMismatch {
                original,
                processed,
            });
        }
        Ok(())
    }
}

/// Insertion-ordered set of image records.
///
/// Records enter only once every pipeline stage has finished, so readers
/// never observe a partially processed image.
#[derive(Debug, Default)]
pub struct ImageCollection {
    records: Vec<ImageRecord>,
    next_id: u64,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its id.
    ///
    /// Fails with [`IngestError::BufferMismatch`] if `original` and
    /// `processed` differ in dimensions.
    pub fn push(&mut self, content: RecordContent) -> Result<RecordId, IngestError> {
        content.check_dimensions()?;
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(ImageRecord {
            id,
            source_name: content.source_name,
            original: content.original,
            processed: content.processed,
            boundaries: content.boundaries,
        });
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Replace a record's buffers and boundaries, keeping its id and position.
    /// Returns `Ok(false)` when the id is unknown.
    pub fn replace(&mut self, id: RecordId, content: RecordContent) -> Result<bool, IngestError> {
        content.check_dimensions()?;
        let found = match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.source_name = content.source_name;
                record.original = content.original;
                record.processed = content.processed;
                record.boundaries = content.boundaries;
                true
            }
            None => false,
        };
        Ok(found)
    }

    pub fn remove(&mut self, id: RecordId) -> Option<ImageRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
