use lyon::math::{point, vector, Angle};
use lyon::path::{Path, Winding};
use serde::{Deserialize, Serialize};

use super::{has_rotation, path_bounds, rotate_point, rotation_about, Bounds, DesignerShape, Point};

/// Circle, or an ellipse once it has been scaled unevenly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignCircle {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl DesignCircle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius_x: radius,
            radius_y: radius,
            rotation: 0.0,
        }
    }

    pub fn is_circle(&self) -> bool {
        (self.radius_x - self.radius_y).abs() < 1e-9
    }
}

impl DesignerShape for DesignCircle {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        builder.add_ellipse(
            point(self.center.x as f32, self.center.y as f32),
            vector(self.radius_x as f32, self.radius_y as f32),
            Angle::radians(0.0),
            Winding::Positive,
        );
        let path = builder.build();
        if has_rotation(self.rotation) && !self.is_circle() {
            return path.transformed(&rotation_about(self.center, self.rotation));
        }
        path
    }

    fn bounds(&self) -> Bounds {
        if has_rotation(self.rotation) && !self.is_circle() {
            return path_bounds(&self.render());
        }
        Bounds::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center.x += dx;
        self.center.y += dy;
    }

    fn scale(&mut self, sx: f64, sy: f64, anchor: Point) {
        self.radius_x *= sx.abs();
        self.radius_y *= sy.abs();
        self.center = Point::new(
            anchor.x + (self.center.x - anchor.x) * sx,
            anchor.y + (self.center.y - anchor.y) * sy,
        );
    }

    fn rotate(&mut self, degrees: f64) {
        self.rotation = (self.rotation + degrees) % 360.0;
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let local = rotate_point(p, self.center, -self.rotation);
        let rx = self.radius_x + tolerance;
        let ry = self.radius_y + tolerance;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let dx = (local.x - self.center.x) / rx;
        let dy = (local.y - self.center.y) / ry;
        dx * dx + dy * dy <= 1.0
    }
}
