//! Viewport zoom and screen/canvas coordinate mapping.
//!
//! Zoom is a view-only scale expressed in whole percent. It changes how big
//! the canvas surface is drawn and how pointer deltas map back to canvas
//! units; it never touches element coordinates.

use crate::canvas::CanvasSize;
use crate::model::Point;

pub const MIN_ZOOM_PERCENT: u32 = 50;
pub const MAX_ZOOM_PERCENT: u32 = 200;
pub const ZOOM_STEP_PERCENT: u32 = 10;

#[derive(Debug, Clone)]
pub struct Viewport {
    zoom_percent: u32,
}

impl Viewport {
    pub fn new() -> Self {
        Self { zoom_percent: 100 }
    }

    pub fn with_zoom(zoom_percent: u32) -> Self {
        let mut viewport = Self::new();
        viewport.set_zoom_percent(zoom_percent);
        viewport
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    /// Scale factor (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        f64::from(self.zoom_percent) / 100.0
    }

    /// Sets the zoom, constrained to 50–200%. Returns true if it changed.
    pub fn set_zoom_percent(&mut self, zoom_percent: u32) -> bool {
        let zoom_percent = zoom_percent.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT);
        let changed = zoom_percent != self.zoom_percent;
        self.zoom_percent = zoom_percent;
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom_percent(self.zoom_percent.saturating_add(ZOOM_STEP_PERCENT))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom_percent(self.zoom_percent.saturating_sub(ZOOM_STEP_PERCENT))
    }

    /// Converts a pointer delta in screen pixels to canvas units.
    pub fn screen_delta_to_canvas(&self, dx: f64, dy: f64) -> (f64, f64) {
        let scale = self.scale();
        (dx / scale, dy / scale)
    }

    /// Converts a pixel position relative to the canvas surface's top-left
    /// corner to canvas coordinates.
    pub fn screen_to_canvas(&self, px: f64, py: f64) -> Point {
        let (x, y) = self.screen_delta_to_canvas(px, py);
        Point::new(x, y)
    }

    /// Rendered pixel size of the canvas surface.
    pub fn surface_size(&self, size: CanvasSize) -> (f64, f64) {
        let scale = self.scale();
        (size.width() * scale, size.height() * scale)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_limits_and_steps() {
        let mut vp = Viewport::new();
        for _ in 0..20 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom_percent(), MAX_ZOOM_PERCENT);
        assert!(!vp.zoom_in());

        for _ in 0..20 {
            vp.zoom_out();
        }
        assert_eq!(vp.zoom_percent(), MIN_ZOOM_PERCENT);

        assert!(vp.zoom_in());
        assert_eq!(vp.zoom_percent(), 60);

        assert!(vp.set_zoom_percent(5));
        assert_eq!(vp.zoom_percent(), MIN_ZOOM_PERCENT);
    }

    #[test]
    fn test_delta_scaling() {
        let vp = Viewport::with_zoom(200);
        assert_eq!(vp.screen_delta_to_canvas(50.0, -20.0), (25.0, -10.0));

        let vp = Viewport::with_zoom(50);
        assert_eq!(vp.screen_delta_to_canvas(50.0, -20.0), (100.0, -40.0));
        assert_eq!(vp.surface_size(CanvasSize::FourBySix), (300.0, 200.0));
    }
}
