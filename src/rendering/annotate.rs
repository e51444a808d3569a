//! Boundary overlays drawn on top of the processed thumbnail.
//!
//! An annotator turns a record's boundary list into line segments in canvas
//! coordinates. The compositor strokes whatever it gets back, so the way a
//! boundary sequence is interpreted lives entirely here.

use crate::models::AnnotationStyle;

/// A straight line in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Segment {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// The processed cell an annotation is anchored to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    /// Top-left corner in canvas coordinates
    pub x: f32,
    pub y: f32,
    /// On-screen edge length
    pub size: f32,
    pub zoom: f32,
    /// Width of the source image the boundaries were measured on
    pub image_width: u32,
}

pub trait BoundaryAnnotator {
    /// Append the overlay for `boundaries` on `cell` to `out`.
    fn annotate(&self, cell: &CellGeometry, boundaries: &[u32], out: &mut Vec<Segment>);
}

/// Reads the boundary list as `(offset, width)` pairs.
///
/// Each pair gets an L-shaped mark at its top-left corner `(offset, 0)`, a
/// mirrored mark at its bottom-right corner `(offset + width, cell bottom)`
/// and a diagonal joining the two. Offsets and widths scale by zoom only,
/// not by the thumbnail's downsampling ratio. A trailing unpaired entry is
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanPairs {
    /// Arm length of the corner marks before zoom
    pub corner_mark: f32,
}

impl BoundaryAnnotator for SpanPairs {
    fn annotate(&self, cell: &CellGeometry, boundaries: &[u32], out: &mut Vec<Segment>) {
        let mark = self.corner_mark * cell.zoom;
        for pair in boundaries.chunks_exact(2) {
            let left = cell.x + pair[0] as f32 * cell.zoom;
            let top = cell.y;
            let right = left + pair[1] as f32 * cell.zoom;
            let bottom = cell.y + cell.size;

            out.push(Segment::new(left, top, left + mark, top));
            out.push(Segment::new(left, top, left, top + mark));

            out.push(Segment::new(right - mark, bottom, right, bottom));
            out.push(Segment::new(right, bottom - mark, right, bottom));

            out.push(Segment::new(left, top, right, bottom));
        }
    }
}

/// One vertical line per distinct boundary, mapped from image columns into
/// the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryLines;

impl BoundaryAnnotator for BoundaryLines {
    fn annotate(&self, cell: &CellGeometry, boundaries: &[u32], out: &mut Vec<Segment>) {
        if cell.image_width == 0 {
            return;
        }
        let mut columns = boundaries.to_vec();
        columns.sort_unstable();
        columns.dedup();

        let scale = cell.size / cell.image_width as f32;
        for column in columns {
            let x = cell.x + column as f32 * scale;
            out.push(Segment::new(x, cell.y, x, cell.y + cell.size));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoAnnotation;

impl BoundaryAnnotator for NoAnnotation {
    fn annotate(&self, _cell: &CellGeometry, _boundaries: &[u32], _out: &mut Vec<Segment>) {}
}

/// Build the annotator selected in the display config
pub fn annotator_for(style: AnnotationStyle, corner_mark: f32) -> Box<dyn BoundaryAnnotator> {
    match style {
        AnnotationStyle::SpanPairs => Box::new(SpanPairs { corner_mark }),
        AnnotationStyle::BoundaryLines => Box::new(BoundaryLines),
        AnnotationStyle::None => Box::new(NoAnnotation),
    }
}

/// Diagonal from a cell's top-left to its bottom-right corner
pub fn debug_cross(x: f32, y: f32, size: f32) -> Segment {
    Segment::new(x, y, x + size, y + size)
}
