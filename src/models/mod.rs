pub mod config;
pub mod record;
pub mod view_state;

pub use config::{AnnotationStyle, AppConfig, Color, DetectionConfig, DisplayConfig};
pub use record::{BufferKind, ImageCollection, ImageRecord, RecordContent, RecordId};
pub use view_state::{ScrollCommand, ScrollInfo, ViewState, Viewport};
