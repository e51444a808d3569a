pub mod annotate;
pub mod compositor;
pub mod encode;
pub mod layout;

pub use annotate::{BoundaryAnnotator, BoundaryLines, CellGeometry, NoAnnotation, Segment, SpanPairs};
pub use compositor::{CanvasCompositor, Frame, ThumbnailSource};
pub use encode::encode_frame;
pub use layout::{CanvasLayout, CellPlacement};
