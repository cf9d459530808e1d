//! Shape model.
//!
//! All geometry is in workspace millimetres with the origin at the
//! bottom-left corner and +Y pointing up. Rotations are in degrees,
//! counter-clockwise, around the shape's own centre.

use lyon::math::Transform;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

mod circle;
mod line;
mod path;
mod raster;
mod rectangle;
mod text;

pub use circle::DesignCircle;
pub use line::DesignLine;
pub use path::DesignPath;
pub use raster::DesignImage;
pub use rectangle::DesignRectangle;
pub use text::DesignText;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned bounding box in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Bounds::new(first.x, first.y, first.x, first.y);
        for p in iter {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.min_x - tolerance
            && p.x <= self.max_x + tolerance
            && p.y >= self.min_y - tolerance
            && p.y <= self.max_y + tolerance
    }
}

/// Behaviour shared by every shape variant.
pub trait DesignerShape {
    /// Outline as a lyon path, rotation applied.
    fn render(&self) -> Path;
    fn bounds(&self) -> Bounds;
    fn translate(&mut self, dx: f64, dy: f64);
    /// Scales about `anchor`, which stays fixed.
    fn scale(&mut self, sx: f64, sy: f64, anchor: Point);
    /// Rotates by `degrees` around the shape centre.
    fn rotate(&mut self, degrees: f64);

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.bounds().contains(p, tolerance)
    }
}

/// Bounding box of a rendered outline.
pub(crate) fn path_bounds(path: &Path) -> Bounds {
    let bb = lyon::algorithms::aabb::bounding_box(path.iter());
    Bounds::new(
        bb.min.x as f64,
        bb.min.y as f64,
        bb.max.x as f64,
        bb.max.y as f64,
    )
}

/// Rotation around `center`, in degrees.
pub(crate) fn rotation_about(center: Point, degrees: f64) -> Transform {
    Transform::translation(-center.x as f32, -center.y as f32)
        .then_rotate(lyon::math::Angle::radians(degrees.to_radians() as f32))
        .then_translate(lyon::math::vector(center.x as f32, center.y as f32))
}

pub(crate) fn has_rotation(degrees: f64) -> bool {
    (degrees % 360.0).abs() > 1e-6
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Text,
    Rect,
    Circle,
    Line,
    Path,
    Image,
}

impl ShapeType {
    pub fn label(self) -> &'static str {
        match self {
            ShapeType::Text => "Text",
            ShapeType::Rect => "Rectangle",
            ShapeType::Circle => "Circle",
            ShapeType::Line => "Line",
            ShapeType::Path => "Path",
            ShapeType::Image => "Image",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A drawable object. Serialized with a `type` tag so stored projects read
/// `{"type": "rect", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Text(DesignText),
    #[serde(rename = "rect")]
    Rectangle(DesignRectangle),
    Circle(DesignCircle),
    Line(DesignLine),
    Path(DesignPath),
    Image(DesignImage),
}

impl DesignerShape for Shape {
    fn render(&self) -> Path {
        match self {
            Shape::Text(s) => s.render(),
            Shape::Rectangle(s) => s.render(),
            Shape::Circle(s) => s.render(),
            Shape::Line(s) => s.render(),
            Shape::Path(s) => s.render(),
            Shape::Image(s) => s.render(),
        }
    }

    fn bounds(&self) -> Bounds {
        match self {
            Shape::Text(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Path(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Text(s) => s.translate(dx, dy),
            Shape::Rectangle(s) => s.translate(dx, dy),
            Shape::Circle(s) => s.translate(dx, dy),
            Shape::Line(s) => s.translate(dx, dy),
            Shape::Path(s) => s.translate(dx, dy),
            Shape::Image(s) => s.translate(dx, dy),
        }
    }

    fn scale(&mut self, sx: f64, sy: f64, anchor: Point) {
        match self {
            Shape::Text(s) => s.scale(sx, sy, anchor),
            Shape::Rectangle(s) => s.scale(sx, sy, anchor),
            Shape::Circle(s) => s.scale(sx, sy, anchor),
            Shape::Line(s) => s.scale(sx, sy, anchor),
            Shape::Path(s) => s.scale(sx, sy, anchor),
            Shape::Image(s) => s.scale(sx, sy, anchor),
        }
    }

    fn rotate(&mut self, degrees: f64) {
        match self {
            Shape::Text(s) => s.rotate(degrees),
            Shape::Rectangle(s) => s.rotate(degrees),
            Shape::Circle(s) => s.rotate(degrees),
            Shape::Line(s) => s.rotate(degrees),
            Shape::Path(s) => s.rotate(degrees),
            Shape::Image(s) => s.rotate(degrees),
        }
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self {
            Shape::Line(s) => s.contains_point(p, tolerance),
            Shape::Circle(s) => s.contains_point(p, tolerance),
            other => other.bounds().contains(p, tolerance),
        }
    }
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Text(_) => ShapeType::Text,
            Shape::Rectangle(_) => ShapeType::Rect,
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Line(_) => ShapeType::Line,
            Shape::Path(_) => ShapeType::Path,
            Shape::Image(_) => ShapeType::Image,
        }
    }

    /// Rotation angle in degrees; zero for shapes that bake rotation into
    /// their points.
    pub fn rotation(&self) -> f64 {
        match self {
            Shape::Text(s) => s.rotation,
            Shape::Rectangle(s) => s.rotation,
            Shape::Circle(s) => s.rotation,
            Shape::Image(s) => s.rotation,
            Shape::Line(_) | Shape::Path(_) => 0.0,
        }
    }
}

/// Rotates `p` around `center` by `angle_deg`.
pub fn rotate_point(p: Point, center: Point, angle_deg: f64) -> Point {
    let angle_rad = angle_deg.to_radians();
    let s = angle_rad.sin();
    let c = angle_rad.cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point {
        x: center.x + dx * c - dy * s,
        y: center.y + dx * s + dy * c,
    }
}
