//! Offscreen canvas compositor.
//!
//! Each pass clears a viewport-sized surface, draws the thumbnails of every
//! visible cell scaled to the current zoom, strokes debug crosses and
//! boundary annotations, and copies the finished surface out as a [`Frame`].

use super::annotate::{annotator_for, debug_cross, BoundaryAnnotator, CellGeometry, Segment};
use super::layout::{self, CanvasLayout};
use crate::error::RenderError;
use crate::models::{BufferKind, Color, DisplayConfig, ImageCollection, ImageRecord, ViewState};
use column_scan::PixelBuffer;
use tiny_skia::{
    ColorU8, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Supplies the base-size thumbnail for a record's buffer
pub trait ThumbnailSource {
    fn thumbnail(&mut self, record: &ImageRecord, kind: BufferKind) -> &PixelBuffer;
}

/// One rendered viewport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub image: PixelBuffer,
    /// Full canvas height the frame was cut from, for the scrollbar range
    pub canvas_height: u32,
}

pub struct CanvasCompositor {
    surface: Option<Pixmap>,
    display: DisplayConfig,
    annotator: Box<dyn BoundaryAnnotator>,
}

impl CanvasCompositor {
    pub fn new(display: DisplayConfig) -> Self {
        let annotator = annotator_for(display.annotation, display.corner_mark);
        Self {
            surface: None,
            display,
            annotator,
        }
    }

    /// Replace the configured annotator
    pub fn with_annotator(mut self, annotator: Box<dyn BoundaryAnnotator>) -> Self {
        self.annotator = annotator;
        self
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Dimensions of the current offscreen surface, if one is allocated
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface.as_ref().map(|s| (s.width(), s.height()))
    }

    pub fn layout(&self, collection: &ImageCollection, view: &ViewState) -> CanvasLayout {
        let size = layout::cell_size(self.display.thumbnail_size, view.zoom());
        layout::layout(
            collection.iter(),
            size,
            self.display.spacing,
            view.viewport().width,
        )
    }

    pub fn render(
        &mut self,
        collection: &ImageCollection,
        view: &ViewState,
        thumbnails: &mut impl ThumbnailSource,
    ) -> Result<Frame, RenderError> {
        let viewport = view.viewport();
        let canvas = self.layout(collection, view);
        let surface = ensure_surface(&mut self.surface, viewport.width, viewport.height)?;
        surface.fill(to_skia(self.display.background));

        let scroll = view.scroll_y() as f32;
        let size = canvas.cell_size as f32;
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..Default::default()
        };

        let mut crosses = Vec::new();
        let mut annotations = Vec::new();
        let mut drawn = 0usize;

        for cell in canvas.visible(view.scroll_y() as i64, viewport.height) {
            let Some(record) = collection.get(cell.record) else {
                continue;
            };
            let (x, y) = (cell.x as f32, cell.y as f32);

            let thumb = thumbnails.thumbnail(record, cell.kind);
            let Some(pixmap) = to_pixmap(thumb) else {
                continue;
            };
            let scale = size / pixmap.width() as f32;
            surface.draw_pixmap(
                0,
                0,
                pixmap.as_ref(),
                &paint,
                Transform::from_scale(scale, scale).post_translate(x, y - scroll),
                None,
            );
            drawn += 1;

            if self.display.debug_cross {
                crosses.push(debug_cross(x, y, size));
            }
            if cell.kind == BufferKind::Processed {
                let geometry = CellGeometry {
                    x,
                    y,
                    size,
                    zoom: view.zoom(),
                    image_width: record.width(),
                };
                self.annotator
                    .annotate(&geometry, record.boundaries(), &mut annotations);
            }
        }

        stroke_segments(surface, &crosses, self.display.cross_color, scroll);
        stroke_segments(surface, &annotations, self.display.annotation_color, scroll);

        tracing::debug!(
            cells = drawn,
            segments = crosses.len() + annotations.len(),
            canvas_height = canvas.canvas_height,
            scroll = view.scroll_y(),
            "Composited frame"
        );

        Ok(Frame {
            image: to_buffer(surface),
            canvas_height: canvas.canvas_height,
        })
    }
}

/// Reuse the surface when the viewport is unchanged, otherwise reallocate it.
fn ensure_surface(
    slot: &mut Option<Pixmap>,
    width: u32,
    height: u32,
) -> Result<&mut Pixmap, RenderError> {
    let stale = slot
        .as_ref()
        .map_or(true, |s| s.width() != width || s.height() != height);
    if stale {
        *slot = Pixmap::new(width, height);
        if slot.is_some() {
            tracing::debug!(width, height, "Allocated render surface");
        }
    }
    slot.as_mut()
        .ok_or(RenderError::MissingSurface { width, height })
}

fn stroke_segments(surface: &mut Pixmap, segments: &[Segment], color: Color, scroll: f32) {
    let mut builder = PathBuilder::new();
    for segment in segments {
        builder.move_to(segment.x0, segment.y0);
        builder.line_to(segment.x1, segment.y1);
    }
    let Some(path) = builder.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = false;

    let stroke = Stroke {
        width: 1.0,
        ..Default::default()
    };
    // Half-pixel offset puts integer coordinates on pixel centers
    let transform = Transform::from_translate(0.5, 0.5 - scroll);
    surface.stroke_path(&path, &paint, &stroke, transform, None);
}

fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255)
}

fn to_pixmap(buffer: &PixelBuffer) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(buffer.width(), buffer.height())?;
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(buffer.as_bytes().chunks_exact(4))
    {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

fn to_buffer(pixmap: &Pixmap) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(pixmap.width(), pixmap.height());
    for (dst, src) in buffer
        .as_bytes_mut()
        .chunks_exact_mut(4)
        .zip(pixmap.pixels())
    {
        let c = src.demultiply();
        dst.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    buffer
}
