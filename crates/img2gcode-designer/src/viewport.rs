//! Viewport transformation for canvas rendering.
//!
//! Maps canvas pixels to screen pixels through the affine transform
//! `[zoom, 0, 0, zoom, pan_x, pan_y]`:
//!
//! ```text
//! screen_x = canvas_x * zoom + pan_x
//! screen_y = canvas_y * zoom + pan_y
//! ```

use std::fmt;

use img2gcode_core::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use serde::{Deserialize, Serialize};

/// Zoom and pan state of the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Rebuilds a viewport from a stored transform. Skew components are
    /// ignored and the zoom is clamped.
    pub fn from_transform(transform: [f64; 6]) -> Self {
        Self {
            zoom: clamp_zoom(transform[0]),
            pan_x: transform[4],
            pan_y: transform[5],
        }
    }

    pub fn transform(&self) -> [f64; 6] {
        [self.zoom, 0.0, 0.0, self.zoom, self.pan_x, self.pan_y]
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta amount in screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zooms so that the canvas point under `(screen_x, screen_y)` stays
    /// under it. The new zoom is clamped first.
    pub fn zoom_to_point(&mut self, screen_x: f64, screen_y: f64, new_zoom: f64) {
        let new_zoom = clamp_zoom(new_zoom);
        let (canvas_x, canvas_y) = self.screen_to_canvas(screen_x, screen_y);
        self.zoom = new_zoom;
        self.pan_x = screen_x - canvas_x * new_zoom;
        self.pan_y = screen_y - canvas_y * new_zoom;
    }

    /// Zoom and pan that `zoom_to_point` would produce, without applying.
    pub fn zoomed_at(&self, screen_x: f64, screen_y: f64, new_zoom: f64) -> Viewport {
        let mut target = *self;
        target.zoom_to_point(screen_x, screen_y, new_zoom);
        target
    }

    pub fn zoom_in_at(&mut self, screen_x: f64, screen_y: f64) {
        self.zoom_to_point(screen_x, screen_y, self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out_at(&mut self, screen_x: f64, screen_y: f64) {
        self.zoom_to_point(screen_x, screen_y, self.zoom / ZOOM_STEP);
    }

    pub fn canvas_to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.zoom + self.pan_x, y * self.zoom + self.pan_y)
    }

    pub fn screen_to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.pan_x) / self.zoom, (y - self.pan_y) / self.zoom)
    }

    /// Viewport that shows the canvas rectangle `(x, y, w, h)` centred in a
    /// view of `view_w` × `view_h` pixels, keeping `padding` (fraction of
    /// the view) free on each side.
    pub fn fitted(x: f64, y: f64, w: f64, h: f64, view_w: f64, view_h: f64, padding: f64) -> Option<Viewport> {
        if w <= 0.0 || h <= 0.0 || view_w <= 0.0 || view_h <= 0.0 {
            return None;
        }
        let padding_factor = 1.0 - padding * 2.0;
        let zoom = clamp_zoom((view_w * padding_factor / w).min(view_h * padding_factor / h));
        Some(Viewport {
            zoom,
            pan_x: view_w / 2.0 - (x + w / 2.0) * zoom,
            pan_y: view_h / 2.0 - (y + h / 2.0) * zoom,
        })
    }

    /// Resets to 1:1 with no pan.
    pub fn reset(&mut self) {
        *self = Viewport::new();
    }

    /// Linear interpolation toward `target`, `t` in [0, 1].
    pub fn lerp(&self, target: &Viewport, t: f64) -> Viewport {
        let t = t.clamp(0.0, 1.0);
        Viewport {
            zoom: self.zoom + (target.zoom - self.zoom) * t,
            pan_x: self.pan_x + (target.pan_x - self.pan_x) * t,
            pan_y: self.pan_y + (target.pan_y - self.pan_y) * t,
        }
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Pan: ({:.1}, {:.1})",
            self.zoom * 100.0,
            self.pan_x,
            self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
