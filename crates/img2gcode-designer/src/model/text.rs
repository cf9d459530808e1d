use lyon::math::{point, Box2D};
use lyon::path::{Path, Winding};
use serde::{Deserialize, Serialize};

use super::{has_rotation, path_bounds, rotation_about, Bounds, DesignerShape, Point};

/// Average advance of a glyph relative to the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// A text object. Glyph outlines are produced by the front end; the model
/// keeps an estimated extent so selection and export have a box to work with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignText {
    pub text: String,
    pub font_family: String,
    /// Font size in millimetres
    pub font_size: f64,
    /// Baseline start of the first line, bottom-left of the text box
    pub origin: Point,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale")]
    pub scale_y: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl DesignText {
    pub fn new(text: impl Into<String>, font_family: impl Into<String>, font_size: f64, origin: Point) -> Self {
        Self {
            text: text.into(),
            font_family: font_family.into(),
            font_size,
            origin,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Estimated (width, height) in millimetres, scale applied.
    pub fn extent(&self) -> (f64, f64) {
        let longest = self
            .text
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let lines = self.text.lines().count().max(1);
        (
            longest as f64 * self.font_size * CHAR_WIDTH_FACTOR * self.scale_x,
            lines as f64 * self.font_size * self.scale_y,
        )
    }

    fn box_center(&self) -> Point {
        let (w, h) = self.extent();
        Point::new(self.origin.x + w / 2.0, self.origin.y + h / 2.0)
    }
}

impl DesignerShape for DesignText {
    fn render(&self) -> Path {
        let (w, h) = self.extent();
        let mut builder = Path::builder();
        builder.add_rectangle(
            &Box2D::new(
                point(self.origin.x as f32, self.origin.y as f32),
                point((self.origin.x + w) as f32, (self.origin.y + h) as f32),
            ),
            Winding::Positive,
        );
        let path = builder.build();
        if has_rotation(self.rotation) {
            return path.transformed(&rotation_about(self.box_center(), self.rotation));
        }
        path
    }

    fn bounds(&self) -> Bounds {
        if has_rotation(self.rotation) {
            return path_bounds(&self.render());
        }
        let (w, h) = self.extent();
        Bounds::new(self.origin.x, self.origin.y, self.origin.x + w, self.origin.y + h)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.origin.x += dx;
        self.origin.y += dy;
    }

    fn scale(&mut self, sx: f64, sy: f64, anchor: Point) {
        self.scale_x *= sx.abs();
        self.scale_y *= sy.abs();
        self.origin = Point::new(
            anchor.x + (self.origin.x - anchor.x) * sx,
            anchor.y + (self.origin.y - anchor.y) * sy,
        );
    }

    fn rotate(&mut self, degrees: f64) {
        self.rotation = (self.rotation + degrees) % 360.0;
    }
}
