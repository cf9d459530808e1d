use lyon::math::{point, Box2D};
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{has_rotation, path_bounds, rotation_about, Bounds, DesignerShape, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRectangle {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    #[serde(default)]
    pub corner_radius: f64,
    /// Rotation angle in degrees
    #[serde(default)]
    pub rotation: f64,
}

impl DesignRectangle {
    /// Rectangle with its bottom-left corner at (x, y).
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center: Point::new(x + width / 2.0, y + height / 2.0),
            corner_radius: 0.0,
            rotation: 0.0,
        }
    }

    /// Corner radius limited to half the shorter side.
    pub fn effective_corner_radius(&self) -> f64 {
        self.corner_radius
            .clamp(0.0, self.width.min(self.height) / 2.0)
    }

    /// Bottom-left corner of the unrotated rectangle.
    pub fn origin(&self) -> Point {
        Point::new(
            self.center.x - self.width / 2.0,
            self.center.y - self.height / 2.0,
        )
    }
}

impl DesignerShape for DesignRectangle {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        let o = self.origin();
        let rect = Box2D::new(
            point(o.x as f32, o.y as f32),
            point((o.x + self.width) as f32, (o.y + self.height) as f32),
        );

        let radius = self.effective_corner_radius();
        if radius > 0.0 {
            builder.add_rounded_rectangle(
                &rect,
                &lyon::path::builder::BorderRadii::new(radius as f32),
                lyon::path::Winding::Positive,
            );
        } else {
            builder.add_rectangle(&rect, lyon::path::Winding::Positive);
        }
        let path = builder.build();

        if has_rotation(self.rotation) {
            return path.transformed(&rotation_about(self.center, self.rotation));
        }
        path
    }

    fn bounds(&self) -> Bounds {
        if has_rotation(self.rotation) {
            return path_bounds(&self.render());
        }
        let o = self.origin();
        Bounds::new(o.x, o.y, o.x + self.width, o.y + self.height)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center.x += dx;
        self.center.y += dy;
    }

    fn scale(&mut self, sx: f64, sy: f64, anchor: Point) {
        self.width *= sx.abs();
        self.height *= sy.abs();
        self.corner_radius *= sx.abs().min(sy.abs());
        self.center = Point::new(
            anchor.x + (self.center.x - anchor.x) * sx,
            anchor.y + (self.center.y - anchor.y) * sy,
        );
    }

    fn rotate(&mut self, degrees: f64) {
        self.rotation = (self.rotation + degrees) % 360.0;
    }
}
