//! Object operations for designer state.

use img2gcode_core::{AppEvent, ObjectEvent, ValidationError};

use super::DesignerState;
use crate::error::DesignerResult;
use crate::model::{DesignCircle, DesignLine, DesignPath, DesignRectangle, DesignText, Point, Shape};

/// Where new objects are placed, in mm.
const INSERT_AT: Point = Point { x: 10.0, y: 10.0 };
const DEFAULT_TEXT: &str = "Text";
const DEFAULT_TEXT_SIZE_MM: f64 = 10.0;
const DEFAULT_RECT_SIZE_MM: (f64, f64) = (50.0, 30.0);
const DEFAULT_CIRCLE_RADIUS_MM: f64 = 15.0;
const DEFAULT_LINE_LENGTH_MM: f64 = 50.0;
const DUPLICATE_OFFSET_MM: f64 = 10.0;

impl DesignerState {
    /// Adds `shape` and makes it the only selected object.
    pub fn add_object(&mut self, shape: Shape) -> u64 {
        let kind = shape.shape_type().to_string();
        let id = self.canvas.add_shape(shape);
        self.canvas.select(id, false);
        self.publish(AppEvent::Object(ObjectEvent::Added { id, kind }));
        self.publish_selection();
        self.mark_modified();
        id
    }

    pub fn add_text(&mut self) -> u64 {
        let font = self.settings.selected_font.clone();
        self.add_object(Shape::Text(DesignText::new(
            DEFAULT_TEXT,
            font,
            DEFAULT_TEXT_SIZE_MM,
            INSERT_AT,
        )))
    }

    pub fn add_rectangle(&mut self) -> u64 {
        let (w, h) = DEFAULT_RECT_SIZE_MM;
        self.add_object(Shape::Rectangle(DesignRectangle::new(INSERT_AT.x, INSERT_AT.y, w, h)))
    }

    pub fn add_circle(&mut self) -> u64 {
        let r = DEFAULT_CIRCLE_RADIUS_MM;
        self.add_object(Shape::Circle(DesignCircle::new(
            Point::new(INSERT_AT.x + r, INSERT_AT.y + r),
            r,
        )))
    }

    pub fn add_line(&mut self) -> u64 {
        self.add_object(Shape::Line(DesignLine::new(
            INSERT_AT,
            Point::new(INSERT_AT.x + DEFAULT_LINE_LENGTH_MM, INSERT_AT.y),
        )))
    }

    /// Adds a freehand stroke through `points`; at least two are needed.
    pub fn add_freehand(&mut self, points: Vec<Point>) -> DesignerResult<u64> {
        if points.len() < 2 {
            let result = Err(ValidationError::OutOfRange {
                field: "Freehand point count",
                value: points.len() as f64,
                min: 2.0,
                max: f64::MAX,
            }
            .into());
            return self.report("add freehand", result);
        }
        Ok(self.add_object(Shape::Path(DesignPath::new(points))))
    }

    /// Updates a text object's content and size.
    pub fn set_text(&mut self, id: u64, text: &str, font_size_mm: f64) -> DesignerResult<()> {
        let result: DesignerResult<()> = match self.canvas.get_mut(id).map(|o| &mut o.shape) {
            Some(Shape::Text(t)) => {
                t.text = text.to_string();
                if font_size_mm > 0.0 {
                    t.font_size = font_size_mm;
                }
                Ok(())
            }
            _ => Err(img2gcode_core::Error::not_found("Text object", id.to_string()).into()),
        };
        if result.is_ok() {
            self.publish(AppEvent::Object(ObjectEvent::Modified { id }));
            self.mark_modified();
        }
        self.report("edit text", result)
    }

    pub fn select(&mut self, id: u64, multi: bool) -> bool {
        let found = self.canvas.select(id, multi);
        self.publish_selection();
        self.refresh_dimensions();
        found
    }

    pub fn select_all(&mut self) {
        self.canvas.select_all();
        self.publish_selection();
        self.refresh_dimensions();
    }

    pub fn deselect_all(&mut self) {
        self.canvas.deselect_all();
        self.publish_selection();
        self.refresh_dimensions();
    }

    pub fn select_at(&mut self, point: Point, tolerance: f64, multi: bool) -> Option<u64> {
        let hit = self.canvas.select_at(point, tolerance, multi);
        self.publish_selection();
        self.refresh_dimensions();
        hit
    }

    /// Deletes the selection. An empty selection is a validation error.
    pub fn delete_selected(&mut self) -> DesignerResult<Vec<u64>> {
        let result: DesignerResult<Vec<u64>> = self.canvas.delete_selected().map_err(Into::into);
        if let Ok(ids) = &result {
            for &id in ids {
                self.publish(AppEvent::Object(ObjectEvent::Removed { id }));
            }
            self.publish_selection();
            self.mark_modified();
        }
        self.report("delete", result)
    }

    pub fn duplicate_selected(&mut self) -> DesignerResult<Vec<u64>> {
        let result: DesignerResult<Vec<u64>> = self
            .canvas
            .duplicate_selected(DUPLICATE_OFFSET_MM, DUPLICATE_OFFSET_MM)
            .map_err(Into::into);
        if let Ok(ids) = &result {
            for &id in ids {
                let kind = self
                    .canvas
                    .get(id)
                    .map(|o| o.shape_type().to_string())
                    .unwrap_or_default();
                self.publish(AppEvent::Object(ObjectEvent::Added { id, kind }));
            }
            self.publish_selection();
            self.mark_modified();
        }
        self.report("duplicate", result)
    }

    /// Removes every design object after the user confirms. Returns the
    /// number removed; zero when declined.
    pub fn clear_canvas(&mut self) -> usize {
        if self.canvas.design_count() == 0 {
            return 0;
        }
        if !self.prompt.confirm("Clear all objects from the canvas?") {
            return 0;
        }
        let count = self.canvas.clear_design();
        self.publish(AppEvent::Object(ObjectEvent::Cleared { count }));
        self.mark_modified();
        count
    }

    /// Moves the selection by (dx, dy) mm, snapping when enabled.
    pub fn move_selected(&mut self, dx: f64, dy: f64) -> DesignerResult<()> {
        let snap = self
            .options
            .snap_to_grid
            .then_some(self.options.grid_spacing_mm);
        let moved = self.canvas.move_selected(dx, dy, snap);
        if moved.is_empty() {
            return self.report("move", Err(ValidationError::NoSelection.into()));
        }
        for id in moved {
            self.publish(AppEvent::Object(ObjectEvent::Modified { id }));
        }
        self.mark_modified();
        Ok(())
    }

    /// Places the selection's bottom-left corner at (x, y) mm.
    pub fn set_selection_position(&mut self, x: f64, y: f64) -> DesignerResult<()> {
        let result = self.canvas.set_selection_position(x, y).map_err(Into::into);
        self.after_selection_edit("position", result)
    }

    pub fn resize_selected(&mut self, width_mm: f64, height_mm: f64) -> DesignerResult<()> {
        let result = self
            .canvas
            .resize_selected(width_mm, height_mm)
            .map_err(Into::into);
        self.after_selection_edit("resize", result)
    }

    pub fn rotate_selected(&mut self, degrees: f64) -> DesignerResult<()> {
        let result = self.canvas.rotate_selected(degrees).map_err(Into::into);
        self.after_selection_edit("rotate", result)
    }

    fn after_selection_edit(&mut self, context: &str, result: DesignerResult<()>) -> DesignerResult<()> {
        if result.is_ok() {
            for id in self.canvas.selected_ids() {
                self.publish(AppEvent::Object(ObjectEvent::Modified { id }));
            }
            self.mark_modified();
        }
        self.report(context, result)
    }

    fn publish_selection(&self) {
        self.publish(AppEvent::Object(ObjectEvent::SelectionChanged {
            ids: self.canvas.selected_ids(),
        }));
    }
}
