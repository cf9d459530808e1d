use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{rotate_point, Bounds, DesignerShape, Point};

/// Straight segment. Rotation is applied to the end points directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignLine {
    pub start: Point,
    pub end: Point,
}

impl DesignLine {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Shortest distance from `p` to the segment.
    pub fn distance_to_point(&self, p: Point) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq < f64::EPSILON {
            return self.start.distance_to(&p);
        }
        let t = (((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len_sq).clamp(0.0, 1.0);
        let proj = Point::new(self.start.x + t * dx, self.start.y + t * dy);
        proj.distance_to(&p)
    }
}

impl DesignerShape for DesignLine {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(self.start.x as f32, self.start.y as f32));
        builder.line_to(point(self.end.x as f32, self.end.y as f32));
        builder.end(false);
        builder.build()
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.start.x, self.start.y, self.end.x, self.end.y)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.start.x += dx;
        self.start.y += dy;
        self.end.x += dx;
        self.end.y += dy;
    }

    fn scale(&mut self, sx: f64, sy: f64, anchor: Point) {
        for p in [&mut self.start, &mut self.end] {
            p.x = anchor.x + (p.x - anchor.x) * sx;
            p.y = anchor.y + (p.y - anchor.y) * sy;
        }
    }

    fn rotate(&mut self, degrees: f64) {
        let center = self.midpoint();
        self.start = rotate_point(self.start, center, degrees);
        self.end = rotate_point(self.end, center, degrees);
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.distance_to_point(p) <= tolerance.max(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_uses_segment_distance() {
        let line = DesignLine::new(Point::new(0.0, 0.0), Point::new(50.0, 0.0));
        assert!(line.contains_point(Point::new(25.0, 0.3), 0.5));
        assert!(!line.contains_point(Point::new(25.0, 3.0), 0.5));
        assert!(!line.contains_point(Point::new(55.0, 0.0), 0.5));
    }

    #[test]
    fn test_rotate_about_midpoint() {
        let mut line = DesignLine::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        line.rotate(90.0);
        assert!((line.start.x - 5.0).abs() < 1e-9);
        assert!((line.start.y + 5.0).abs() < 1e-9);
        assert!((line.length() - 10.0).abs() < 1e-9);
    }
}
