pub mod ingest;
pub mod session;
pub mod thumbnail_cache;

pub use ingest::{DecodedImage, Decoder, FileDecoder, IngestReport, SkippedFile};
pub use session::Session;
pub use thumbnail_cache::ThumbnailCache;
