use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{rotate_point, Bounds, DesignerShape, Point};

/// Freehand stroke recorded as a polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPath {
    pub points: Vec<Point>,
    #[serde(default)]
    pub closed: bool,
}

impl DesignPath {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl DesignerShape for DesignPath {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            builder.begin(point(first.x as f32, first.y as f32));
            for p in iter {
                builder.line_to(point(p.x as f32, p.y as f32));
            }
            builder.end(self.closed);
        }
        builder.build()
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.points).unwrap_or(Bounds::new(0.0, 0.0, 0.0, 0.0))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }

    fn scale(&mut self, sx: f64, sy: f64, anchor: Point) {
        for p in &mut self.points {
            p.x = anchor.x + (p.x - anchor.x) * sx;
            p.y = anchor.y + (p.y - anchor.y) * sy;
        }
    }

    fn rotate(&mut self, degrees: f64) {
        let center = self.bounds().center();
        for p in &mut self.points {
            *p = rotate_point(*p, center, degrees);
        }
    }
}
