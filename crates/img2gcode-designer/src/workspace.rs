//! Physical workspace and its mapping onto the canvas.
//!
//! The workspace is measured in millimetres with (0, 0) at the bottom-left.
//! The canvas drawing area is a fixed pixel size; the workspace is scaled by
//! a single pixels-per-mm ratio so it always fits, and is placed at a fixed
//! margin that leaves room for the rulers.

use std::cell::Cell;

use img2gcode_core::constants::{
    CANVAS_MARGIN_PX, DEFAULT_CANVAS_HEIGHT_PX, DEFAULT_CANVAS_WIDTH_PX, DEFAULT_WORKSPACE_HEIGHT_MM,
    DEFAULT_WORKSPACE_WIDTH_MM, MAX_WORKSPACE_MM, MIN_WORKSPACE_MM,
};
use img2gcode_core::ValidationError;
use serde::{Deserialize, Serialize};

use crate::model::Point;

/// Pixel rectangle on the canvas occupied by the workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsableArea {
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Workspace size as stored with a project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    width_mm: f64,
    height_mm: f64,
    canvas_width: f64,
    canvas_height: f64,
    usable: Cell<Option<UsableArea>>,
}

impl WorkspaceConfig {
    pub fn new(width_mm: f64, height_mm: f64) -> Result<Self, ValidationError> {
        let mut ws = Self::default();
        ws.set_size(width_mm, height_mm)?;
        Ok(ws)
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    pub fn size(&self) -> WorkspaceSize {
        WorkspaceSize {
            width_mm: self.width_mm,
            height_mm: self.height_mm,
        }
    }

    /// Drawing area in pixels, margins excluded.
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    /// Size of the canvas element: drawing area plus a margin on each side.
    pub fn element_size(&self) -> (f64, f64) {
        (
            self.canvas_width + 2.0 * CANVAS_MARGIN_PX,
            self.canvas_height + 2.0 * CANVAS_MARGIN_PX,
        )
    }

    /// Resizes the workspace. Both sides must lie within the supported
    /// range; on error nothing changes.
    pub fn set_size(&mut self, width_mm: f64, height_mm: f64) -> Result<(), ValidationError> {
        check_dimension("Workspace width", width_mm)?;
        check_dimension("Workspace height", height_mm)?;
        self.width_mm = width_mm;
        self.height_mm = height_mm;
        self.usable.set(None);
        tracing::debug!("Workspace resized to {} × {} mm", width_mm, height_mm);
        Ok(())
    }

    pub fn set_canvas_size(&mut self, width_px: f64, height_px: f64) {
        if width_px > 0.0 && height_px > 0.0 {
            self.canvas_width = width_px;
            self.canvas_height = height_px;
            self.usable.set(None);
        }
    }

    pub fn pixels_per_mm(&self) -> f64 {
        (self.canvas_width / self.width_mm).min(self.canvas_height / self.height_mm)
    }

    /// Usable area, recomputed after any resize.
    pub fn usable_area(&self) -> UsableArea {
        if let Some(area) = self.usable.get() {
            return area;
        }
        let ppm = self.pixels_per_mm();
        let area = UsableArea {
            offset_x: CANVAS_MARGIN_PX,
            offset_y: CANVAS_MARGIN_PX,
            width: self.width_mm * ppm,
            height: self.height_mm * ppm,
        };
        self.usable.set(Some(area));
        area
    }

    /// Workspace millimetres to canvas pixels.
    pub fn mm_to_px(&self, p: Point) -> (f64, f64) {
        let area = self.usable_area();
        let ppm = self.pixels_per_mm();
        (
            area.offset_x + p.x * ppm,
            area.offset_y + area.height - p.y * ppm,
        )
    }

    /// Canvas pixels to workspace millimetres.
    pub fn px_to_mm(&self, x_px: f64, y_px: f64) -> Point {
        let area = self.usable_area();
        let ppm = self.pixels_per_mm();
        Point::new(
            (x_px - area.offset_x) / ppm,
            (area.offset_y + area.height - y_px) / ppm,
        )
    }

    pub fn mm_to_px_len(&self, mm: f64) -> f64 {
        mm * self.pixels_per_mm()
    }

    pub fn px_to_mm_len(&self, px: f64) -> f64 {
        px / self.pixels_per_mm()
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width_mm).contains(&p.x) && (0.0..=self.height_mm).contains(&p.y)
    }
}

fn check_dimension(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(MIN_WORKSPACE_MM..=MAX_WORKSPACE_MM).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: MIN_WORKSPACE_MM,
            max: MAX_WORKSPACE_MM,
        });
    }
    Ok(())
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_WORKSPACE_WIDTH_MM,
            height_mm: DEFAULT_WORKSPACE_HEIGHT_MM,
            canvas_width: DEFAULT_CANVAS_WIDTH_PX,
            canvas_height: DEFAULT_CANVAS_HEIGHT_PX,
            usable: Cell::new(None),
        }
    }
}
