//! Cell layout for the thumbnail canvas.
//!
//! Every record occupies two square cells in row-major scan order, original
//! first, then processed. Cells flow left to right and wrap when the next
//! cell would cross the viewport's right edge, so a record's two cells may
//! land on different rows.
//!
//! Positions are in canvas coordinates (scroll offset not applied).

use crate::models::{BufferKind, ImageRecord, RecordId};

/// Where one thumbnail goes on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlacement {
    pub record: RecordId,
    pub kind: BufferKind,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasLayout {
    /// Edge length of every cell on screen
    pub cell_size: u32,
    /// Cells in placement order
    pub cells: Vec<CellPlacement>,
    /// Bottom edge of the last placed cell, 0 when there are no cells
    pub canvas_height: u32,
}

impl CanvasLayout {
    pub fn cell(&self, record: RecordId, kind: BufferKind) -> Option<&CellPlacement> {
        self.cells
            .iter()
            .find(|c| c.record == record && c.kind == kind)
    }

    /// Cells that intersect the vertical band `[top, top + height)`
    pub fn visible(&self, top: i64, height: u32) -> impl Iterator<Item = &CellPlacement> {
        let size = self.cell_size as i64;
        let bottom = top + height as i64;
        self.cells
            .iter()
            .filter(move |c| c.y + size > top && c.y < bottom)
    }
}

/// On-screen cell edge length for a base thumbnail size and zoom factor
pub fn cell_size(thumbnail_size: u32, zoom: f32) -> u32 {
    ((thumbnail_size as f32 * zoom) as u32).max(1)
}

/// Lay out `records` for a viewport of the given width.
pub fn layout<'a>(
    records: impl IntoIterator<Item = &'a ImageRecord>,
    cell_size: u32,
    spacing: u32,
    viewport_width: u32,
) -> CanvasLayout {
    let size = cell_size as i64;
    let gap = spacing as i64;
    let right_edge = viewport_width as i64;

    let mut x = gap;
    let mut y = gap;
    let mut cells = Vec::new();

    for record in records {
        for kind in [BufferKind::Original, BufferKind::Processed] {
            cells.push(CellPlacement {
                record: record.id(),
                kind,
                x,
                y,
            });
            x += size + gap;
            if x + size > right_edge {
                x = gap;
                y += size + gap;
            }
        }
    }

    let canvas_height = cells
        .last()
        .map(|c| (c.y + size).clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0);

    CanvasLayout {
        cell_size,
        cells,
        canvas_height,
    }
}
