use lyon::math::{point, Box2D};
use lyon::path::{Path, Winding};
use serde::{Deserialize, Serialize};

use super::{has_rotation, path_bounds, rotation_about, Bounds, DesignerShape, Point};

/// Raster image placed on the workspace.
///
/// The pixels travel with the object as a `data:` URL so a saved project is
/// self-contained. `width_mm`/`height_mm` are the unscaled placement size;
/// `scale_x`/`scale_y` record later resizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignImage {
    pub data_url: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Bottom-left corner
    pub origin: Point,
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default = "unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale")]
    pub scale_y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub grayscale: bool,
}

fn unit_scale() -> f64 {
    1.0
}

impl DesignImage {
    pub fn display_width(&self) -> f64 {
        self.width_mm * self.scale_x
    }

    pub fn display_height(&self) -> f64 {
        self.height_mm * self.scale_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.display_width() / 2.0,
            self.origin.y + self.display_height() / 2.0,
        )
    }
}

impl DesignerShape for DesignImage {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        builder.add_rectangle(
            &Box2D::new(
                point(self.origin.x as f32, self.origin.y as f32),
                point(
                    (self.origin.x + self.display_width()) as f32,
                    (self.origin.y + self.display_height()) as f32,
                ),
            ),
            Winding::Positive,
        );
        let path = builder.build();
        if has_rotation(self.rotation) {
            return path.transformed(&rotation_about(self.center(), self.rotation));
        }
        path
    }

    fn bounds(&self) -> Bounds {
        if has_rotation(self.rotation) {
            return path_bounds(&self.render());
        }
        Bounds::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.display_width(),
            self.origin.y + self.display_height(),
        )
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
