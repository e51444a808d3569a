use super::ingest::{self, Decoder, FileDecoder, IngestReport};
use super::thumbnail_cache::ThumbnailCache;
use crate::error::{IngestError, RenderError};
use crate::models::{
    AppConfig, ImageCollection, ImageRecord, RecordId, ScrollCommand, ScrollInfo, ViewState,
    Viewport,
};
use crate::rendering::{CanvasCompositor, Frame};
use column_scan::{ColumnPipeline, PixelBuffer};
use std::path::{Path, PathBuf};

/// Everything a viewer window holds: the image collection, cached
/// thumbnails, view state and the compositor.
///
/// Every shell event (files dropped, wheel, scrollbar, resize) maps to one
/// method here. Events that change the canvas height re-clamp the scroll
/// offset so it always stays inside the valid range.
pub struct Session {
    config: AppConfig,
    pipeline: ColumnPipeline,
    decoder: Box<dyn Decoder>,
    collection: ImageCollection,
    thumbnails: ThumbnailCache,
    view: ViewState,
    compositor: CanvasCompositor,
}

impl Session {
    pub fn new(config: AppConfig, viewport: Viewport) -> Self {
        let display = &config.display;
        Self {
            pipeline: config.pipeline(),
            decoder: Box::new(FileDecoder),
            collection: ImageCollection::new(),
            thumbnails: ThumbnailCache::new(display.thumbnail_size),
            view: ViewState::new(viewport, display.min_zoom, display.max_zoom),
            compositor: CanvasCompositor::new(display.clone()),
            config,
        }
    }

    /// Use a different decoder for [`open_files`](Self::open_files)
    pub fn with_decoder(mut self, decoder: Box<dyn Decoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Replace the compositor, e.g. to install a custom annotator
    pub fn with_compositor(mut self, compositor: CanvasCompositor) -> Self {
        self.compositor = compositor;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn collection(&self) -> &ImageCollection {
        &self.collection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn thumbnails(&self) -> &ThumbnailCache {
        &self.thumbnails
    }

    pub fn open_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> IngestReport {
        let report = ingest::ingest_files(
            self.decoder.as_ref(),
            &self.pipeline,
            &mut self.collection,
            paths,
        );
        tracing::info!(
            added = report.added.len(),
            skipped = report.skipped.len(),
            total = self.collection.len(),
            "Ingested files"
        );
        report
    }

    /// Add an image that was decoded elsewhere
    pub fn add_image(
        &mut self,
        source_name: &str,
        image: PixelBuffer,
    ) -> Result<RecordId, IngestError> {
        check_dimensions(source_name, &image)?;
        let content = ingest::process(&self.pipeline, source_name, image);
        self.collection.push(content)
    }

    /// Swap a record's original image, re-running the pipeline and dropping
    /// its cached thumbnails. Returns `Ok(false)` for an unknown id.
    pub fn replace_original(
        &mut self,
        id: RecordId,
        image: PixelBuffer,
    ) -> Result<bool, IngestError> {
        let Some(record) = self.collection.get(id) else {
            return Ok(false);
        };
        let source_name = record.source_name().to_string();
        check_dimensions(&source_name, &image)?;

        let content = ingest::process(&self.pipeline, &source_name, image);
        self.collection.replace(id, content)?;
        self.thumbnails.invalidate(id);
        self.clamp_scroll();
        Ok(true)
    }

    pub fn remove(&mut self, id: RecordId) -> Option<ImageRecord> {
        let removed = self.collection.remove(id)?;
        self.thumbnails.invalidate(id);
        self.clamp_scroll();
        tracing::debug!(record = %id, "Removed image");
        Some(removed)
    }

    /// Height of the full canvas at the current zoom and viewport width
    pub fn canvas_height(&self) -> u32 {
        self.compositor
            .layout(&self.collection, &self.view)
            .canvas_height
    }

    /// Wheel event: positive deltas zoom in by one step, negative out.
    /// Returns true if the zoom factor changed.
    pub fn zoom_by(&mut self, wheel_delta: i32) -> bool {
        let changed = self.view.zoom_by(wheel_delta, self.config.display.zoom_step);
        if changed {
            tracing::debug!(zoom = self.view.zoom(), "Zoom changed");
            self.clamp_scroll();
        }
        changed
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.view.set_zoom(zoom);
        self.clamp_scroll();
    }

    pub fn scroll(&mut self, command: ScrollCommand) {
        let canvas_height = self.canvas_height();
        self.view
            .scroll(command, canvas_height, self.config.display.scroll_line);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.view.resize(Viewport::new(width, height));
        self.clamp_scroll();
    }

    pub fn scroll_info(&self) -> ScrollInfo {
        self.view.scroll_info(self.canvas_height())
    }

    pub fn render(&mut self) -> Result<Frame, RenderError> {
        self.compositor
            .render(&self.collection, &self.view, &mut self.thumbnails)
    }

    fn clamp_scroll(&mut self) {
        let canvas_height = self.canvas_height();
        self.view.clamp_scroll(canvas_height);
    }
}

fn check_dimensions(source_name: &str, image: &PixelBuffer) -> Result<(), IngestError> {
    if image.is_empty() {
        return Err(IngestError::DegenerateImage {
            path: PathBuf::from(source_name),
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BufferKind;
    use pretty_assertions::assert_eq;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.display.thumbnail_size = 20;
        config.display.spacing = 10;
        config.display.debug_cross = false;
        config
    }

    fn session(width: u32, height: u32) -> Session {
        Session::new(config(), Viewport::new(width, height))
    }

    fn gray(value: u8) -> PixelBuffer {
        PixelBuffer::filled(20, 20, [value, value, value, 255])
    }

    #[test]
    fn test_add_image_runs_pipeline() {
        let mut session = session(100, 100);
        let mut image = gray(255);
        for y in 0..20 {
            image.set_pixel(10, y, [0, 0, 0, 255]);
        }
        let id = session.add_image("line.png", image).unwrap();

        let record = session.collection().get(id).unwrap();
        assert_eq!(record.boundaries(), vec![9; 20].as_slice());
        assert_eq!(record.processed().pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_add_degenerate_image_fails() {
        let mut session = session(100, 100);
        let result = session.add_image("empty", PixelBuffer::new(0, 3));
        assert!(matches!(result, Err(IngestError::DegenerateImage { .. })));
        assert!(session.collection().is_empty());
    }

    #[test]
    fn test_replace_original_invalidates_thumbnails() {
        let mut session = session(100, 100);
        let id = session.add_image("a.png", gray(0)).unwrap();
        session.render().unwrap();
        assert_eq!(session.thumbnails().len(), 2);
        assert_eq!(
            session
                .thumbnails()
                .get(id, BufferKind::Original)
                .unwrap()
                .pixel(0, 0),
            [0, 0, 0, 255]
        );

        assert!(session.replace_original(id, gray(200)).unwrap());
        assert!(session.thumbnails().is_empty());

        let frame = session.render().unwrap();
        assert_eq!(frame.image.pixel(15, 15), [200, 200, 200, 255]);
        assert_eq!(
            session
                .thumbnails()
                .get(id, BufferKind::Processed)
                .unwrap()
                .pixel(0, 0),
            [200, 200, 200, 255]
        );
    }

    #[test]
    fn test_replace_unknown_record() {
        let mut session = session(100, 100);
        let id = session.add_image("a.png", gray(0)).unwrap();
        session.remove(id);
        assert!(!session.replace_original(id, gray(1)).unwrap());
    }

    #[test]
    fn test_remove_clamps_scroll() {
        // One cell per row, 30px per row
        let mut session = session(40, 50);
        let a = session.add_image("a.png", gray(0)).unwrap();
        session.add_image("b.png", gray(0)).unwrap();
        assert_eq!(session.canvas_height(), 120);

        session.scroll(ScrollCommand::Bottom);
        assert_eq!(session.view().scroll_y(), 70);

        session.remove(a);
        assert_eq!(session.canvas_height(), 60);
        assert_eq!(session.view().scroll_y(), 10);
    }

    #[test]
    fn test_zoom_uses_configured_step() {
        let mut session = session(800, 600);
        assert!(session.zoom_by(120));
        assert!((session.view().zoom() - 1.1).abs() < 1e-6);
        assert!(session.zoom_by(-120));
        assert!(session.zoom_by(-120));
        assert!((session.view().zoom() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_keeps_cached_thumbnails() {
        let mut session = session(100, 100);
        let id = session.add_image("a.png", gray(40)).unwrap();
        session.render().unwrap();
        assert_eq!(session.thumbnails().len(), 2);
        let original = session
            .thumbnails()
            .get(id, BufferKind::Original)
            .unwrap()
            .clone();
        let processed = session
            .thumbnails()
            .get(id, BufferKind::Processed)
            .unwrap()
            .clone();

        assert!(session.zoom_by(120));
        session.render().unwrap();
        session.set_zoom(2.0);
        session.render().unwrap();

        assert_eq!(session.thumbnails().len(), 2);
        assert_eq!(
            session.thumbnails().get(id, BufferKind::Original),
            Some(&original)
        );
        assert_eq!(
            session.thumbnails().get(id, BufferKind::Processed),
            Some(&processed)
        );
    }

    #[test]
    fn test_session_from_config_with_nan_zoom_bound() {
        let config = AppConfig::from_yaml("display:\n  max_zoom: .nan\n").unwrap();
        let mut session = Session::new(config, Viewport::default());
        assert_eq!(session.view().zoom(), 1.0);
        session.set_zoom(150.0);
        assert_eq!(session.view().zoom(), 100.0);
    }

    #[test]
    fn test_scroll_info_tracks_canvas() {
        let mut session = session(40, 50);
        session.add_image("a.png", gray(0)).unwrap();
        session.scroll(ScrollCommand::LineDown);
        assert_eq!(
            session.scroll_info(),
            ScrollInfo {
                range: 60,
                page: 50,
                position: 10
            }
        );
    }

    #[test]
    fn test_resize_rewraps_and_clamps() {
        let mut session = session(40, 50);
        session.add_image("a.png", gray(0)).unwrap();
        session.scroll(ScrollCommand::Bottom);
        assert_eq!(session.view().scroll_y(), 10);

        session.resize(200, 50);
        assert_eq!(session.canvas_height(), 30);
        assert_eq!(session.view().scroll_y(), 0);

        let frame = session.render().unwrap();
        assert_eq!((frame.image.width(), frame.image.height()), (200, 50));
    }
}
