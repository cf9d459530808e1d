//! Selection operations for Canvas.

use img2gcode_core::ValidationError;

use crate::model::{DesignerShape, Point};

use super::Canvas;

/// Rounds `value` to the nearest multiple of `increment`. A non-positive
/// increment leaves the value untouched.
pub fn snap_to_grid(value: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return value;
    }
    (value / increment).round() * increment
}

impl Canvas {
    /// Moves the selection by (dx, dy). With `snap` set, each object's
    /// bottom-left corner lands on the nearest grid increment.
    pub fn move_selected(&mut self, dx: f64, dy: f64, snap: Option<f64>) -> Vec<u64> {
        let mut moved = Vec::new();
        for obj in self.objects.iter_mut().filter(|o| o.selected) {
            let (mut tx, mut ty) = (dx, dy);
            if let Some(increment) = snap {
                let b = obj.shape.bounds();
                tx = snap_to_grid(b.min_x + dx, increment) - b.min_x;
                ty = snap_to_grid(b.min_y + dy, increment) - b.min_y;
            }
            obj.shape.translate(tx, ty);
            moved.push(obj.id);
        }
        moved
    }

    /// Moves the selection so its bounding box starts at `(x, y)`.
    pub fn set_selection_position(&mut self, x: f64, y: f64) -> Result<(), ValidationError> {
        let bounds = self.selection_bounds().ok_or(ValidationError::NoSelection)?;
        let (dx, dy) = (x - bounds.min_x, y - bounds.min_y);
        for obj in self.objects.iter_mut().filter(|o| o.selected) {
            obj.shape.translate(dx, dy);
        }
        Ok(())
    }

    /// Scales the selection so its bounding box becomes `width` × `height`,
    /// keeping the bottom-left corner fixed.
    pub fn resize_selected(&mut self, width: f64, height: f64) -> Result<(), ValidationError> {
        let bounds = self.selection_bounds().ok_or(ValidationError::NoSelection)?;
        for (field, value) in [("Width", width), ("Height", height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::OutOfRange {
                    field,
                    value,
                    min: f64::MIN_POSITIVE,
                    max: f64::MAX,
                });
            }
        }
        let sx = if bounds.width() > 0.0 { width / bounds.width() } else { 1.0 };
        let sy = if bounds.height() > 0.0 { height / bounds.height() } else { 1.0 };
        let anchor = Point::new(bounds.min_x, bounds.min_y);
        for obj in self.objects.iter_mut().filter(|o| o.selected) {
            obj.shape.scale(sx, sy, anchor);
        }
        Ok(())
    }

    pub fn rotate_selected(&mut self, degrees: f64) -> Result<(), ValidationError> {
        if self.selected_count() == 0 {
            return Err(ValidationError::NoSelection);
        }
        for obj in self.objects.iter_mut().filter(|o| o.selected) {
            obj.shape.rotate(degrees);
        }
        Ok(())
    }

    /// Removes the selected objects and returns their ids.
    pub fn delete_selected(&mut self) -> Result<Vec<u64>, ValidationError> {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return Err(ValidationError::NoSelection);
        }
        self.objects.retain(|o| !o.selected);
        Ok(ids)
    }

    /// Copies the selection offset by (dx, dy); the copies become the new
    /// selection. Returns the new ids.
    pub fn duplicate_selected(&mut self, dx: f64, dy: f64) -> Result<Vec<u64>, ValidationError> {
        let originals: Vec<_> = self
            .objects
            .iter()
            .filter(|o| o.selected)
            .cloned()
            .collect();
        if originals.is_empty() {
            return Err(ValidationError::NoSelection);
        }
        self.deselect_all();
        let mut ids = Vec::with_capacity(originals.len());
        for mut copy in originals {
            copy.id = self.generate_id();
            copy.name = format!("{} copy", copy.name);
            copy.shape.translate(dx, dy);
            copy.selected = true;
            ids.push(copy.id);
            self.objects.push(copy);
        }
        Ok(ids)
    }
}
