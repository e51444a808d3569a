use crate::models::{BufferKind, ImageRecord, RecordId};
use crate::rendering::ThumbnailSource;
use column_scan::PixelBuffer;
use std::collections::HashMap;

/// Base-size thumbnails, keyed by record and buffer kind.
///
/// Entries are generated on first request and stay valid until the record's
/// buffers are replaced or the record is removed; zoom changes only rescale
/// them at draw time.
pub struct ThumbnailCache {
    size: u32,
    cache: HashMap<(RecordId, BufferKind), PixelBuffer>,
}

impl ThumbnailCache {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            cache: HashMap::new(),
        }
    }

    /// Edge length of every cached thumbnail
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Return the cached thumbnail, generating it on a miss
    pub fn get_or_generate(&mut self, record: &ImageRecord, kind: BufferKind) -> &PixelBuffer {
        let size = self.size;
        self.cache.entry((record.id(), kind)).or_insert_with(|| {
            tracing::debug!(record = %record.id(), ?kind, size, "Generating thumbnail");
            column_scan::thumbnail(record.buffer(kind), size)
        })
    }

    pub fn get(&self, id: RecordId, kind: BufferKind) -> Option<&PixelBuffer> {
        self.cache.get(&(id, kind))
    }

    /// Drop both thumbnails of a record
    pub fn invalidate(&mut self, id: RecordId) {
        self.cache.remove(&(id, BufferKind::Original));
        self.cache.remove(&(id, BufferKind::Processed));
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new(column_scan::DEFAULT_THUMBNAIL_SIZE)
    }
}

impl ThumbnailSource for ThumbnailCache {
    fn thumbnail(&mut self, record: &ImageRecord, kind: BufferKind) -> &PixelBuffer {
        self.get_or_generate(record, kind)
    }
}
