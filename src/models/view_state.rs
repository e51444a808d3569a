//! Zoom, scroll and viewport state owned by the host shell.
//!
//! The compositor is stateless with respect to these values: a [`ViewState`]
//! is passed into every render call and never cached.

/// Size of the visible drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Scrollbar commands understood by [`ViewState::scroll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    Top,
    Bottom,
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    /// Jump to an absolute position (thumb drag)
    To(i32),
    /// Move by a relative amount (wheel or trackpad)
    By(i32),
}

/// Scrollbar parameters for the host: range is the canvas height, page the
/// viewport height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollInfo {
    pub range: u32,
    pub page: u32,
    pub position: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    zoom: f32,
    scroll_y: i32,
    viewport: Viewport,
    min_zoom: f32,
    max_zoom: f32,
}

impl ViewState {
    /// Start at zoom 1.0 (clamped into `[min_zoom, max_zoom]`), scrolled to top.
    pub fn new(viewport: Viewport, min_zoom: f32, max_zoom: f32) -> Self {
        Self {
            zoom: 1.0_f32.max(min_zoom).min(max_zoom),
            scroll_y: 0,
            viewport,
            min_zoom,
            max_zoom,
        }
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[inline]
    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Set the zoom factor, clamped to the bounds. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.max(self.min_zoom).min(self.max_zoom);
    }

    /// Apply a wheel delta: positive zooms in by `step`, negative zooms out.
    /// Returns true if the zoom factor changed.
    pub fn zoom_by(&mut self, wheel_delta: i32, step: f32) -> bool {
        let before = self.zoom;
        match wheel_delta.signum() {
            1 => self.set_zoom(self.zoom + step),
            -1 => self.set_zoom(self.zoom - step),
            _ => {}
        }
        self.zoom != before
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Largest valid scroll offset for a canvas of the given height
    pub fn max_scroll(&self, canvas_height: u32) -> i32 {
        let overflow = canvas_height as i64 - self.viewport.height as i64;
        overflow.clamp(0, i32::MAX as i64) as i32
    }

    /// Apply a scroll command, clamped to `[0, canvas_height - viewport_height]`.
    pub fn scroll(&mut self, command: ScrollCommand, canvas_height: u32, line: i32) {
        let page = self.viewport.height.min(i32::MAX as u32) as i32;
        let max = self.max_scroll(canvas_height);
        let target = match command {
            ScrollCommand::Top => 0,
            ScrollCommand::Bottom => max,
            ScrollCommand::LineUp => self.scroll_y.saturating_sub(line),
            ScrollCommand::LineDown => self.scroll_y.saturating_add(line),
            ScrollCommand::PageUp => self.scroll_y.saturating_sub(page),
            ScrollCommand::PageDown => self.scroll_y.saturating_add(page),
            ScrollCommand::To(position) => position,
            ScrollCommand::By(delta) => self.scroll_y.saturating_add(delta),
        };
        self.scroll_y = target.clamp(0, max);
    }

    /// Re-clamp the scroll offset after the canvas or viewport changed size
    pub fn clamp_scroll(&mut self, canvas_height: u32) {
        self.scroll_y = self.scroll_y.clamp(0, self.max_scroll(canvas_height));
    }

    pub fn scroll_info(&self, canvas_height: u32) -> ScrollInfo {
        ScrollInfo {
            range: canvas_height,
            page: self.viewport.height,
            position: self.scroll_y,
        }
    }
}
