//! Grid and ruler overlays.

use img2gcode_core::constants::RULER_TICK_MM;

use crate::canvas::Canvas;
use crate::model::{DesignLine, DesignText, Point, Shape};
use crate::object::{OverlayKind, Style};
use crate::workspace::WorkspaceConfig;

const GRID_COLOR: &str = "#e0e0e0";
const RULER_COLOR: &str = "#666666";
const TICK_LEN_MM: f64 = 3.0;
const LABEL_SIZE_MM: f64 = 3.0;

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Shape {
    Shape::Line(DesignLine::new(Point::new(x1, y1), Point::new(x2, y2)))
}

fn thin(color: &str) -> Style {
    Style {
        fill: None,
        stroke: Some(color.to_string()),
        stroke_width: 0.1,
    }
}

/// Positions from 0 to `limit` inclusive every `step`.
fn stops(limit: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 { (limit / step).floor() as usize } else { 0 };
    (0..=count).map(move |i| i as f64 * step)
}

/// Replaces the grid with lines every `spacing` mm; returns the line count.
/// A non-positive spacing only removes the old grid.
pub fn rebuild_grid(canvas: &mut Canvas, workspace: &WorkspaceConfig, spacing: f64) -> usize {
    canvas.remove_overlays(OverlayKind::Grid);
    if spacing <= 0.0 {
        return 0;
    }
    let (w, h) = (workspace.width_mm(), workspace.height_mm());
    let mut count = 0;
    for x in stops(w, spacing) {
        canvas.add_overlay(OverlayKind::Grid, line(x, 0.0, x, h), thin(GRID_COLOR));
        count += 1;
    }
    for y in stops(h, spacing) {
        canvas.add_overlay(OverlayKind::Grid, line(0.0, y, w, y), thin(GRID_COLOR));
        count += 1;
    }
    tracing::debug!("Grid rebuilt with {} lines", count);
    count
}

pub fn remove_grid(canvas: &mut Canvas) -> usize {
    canvas.remove_overlays(OverlayKind::Grid)
}

/// Replaces the rulers along the bottom and left edges, with a labelled
/// tick every 10 mm.
pub fn rebuild_rulers(canvas: &mut Canvas, workspace: &WorkspaceConfig) {
    canvas.remove_overlays(OverlayKind::Ruler);
    let (w, h) = (workspace.width_mm(), workspace.height_mm());

    for x in stops(w, RULER_TICK_MM) {
        canvas.add_overlay(OverlayKind::Ruler, line(x, 0.0, x, -TICK_LEN_MM), thin(RULER_COLOR));
        canvas.add_overlay(
            OverlayKind::Ruler,
            Shape::Text(DesignText::new(
                format!("{}", x),
                "sans-serif",
                LABEL_SIZE_MM,
                Point::new(x, -TICK_LEN_MM - LABEL_SIZE_MM),
            )),
            Style::filled(RULER_COLOR),
        );
    }
    for y in stops(h, RULER_TICK_MM) {
        canvas.add_overlay(OverlayKind::Ruler, line(0.0, y, -TICK_LEN_MM, y), thin(RULER_COLOR));
        canvas.add_overlay(
            OverlayKind::Ruler,
            Shape::Text(DesignText::new(
                format!("{}", y),
                "sans-serif",
                LABEL_SIZE_MM,
                Point::new(-TICK_LEN_MM - 2.0 * LABEL_SIZE_MM, y),
            )),
            Style::filled(RULER_COLOR),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_count() {
        let mut canvas = Canvas::new();
        let ws = WorkspaceConfig::new(100.0, 50.0).unwrap();
        assert_eq!(rebuild_grid(&mut canvas, &ws, 10.0), 11 + 6);
        assert_eq!(rebuild_grid(&mut canvas, &ws, 25.0), 5 + 3);
        assert_eq!(canvas.overlays(OverlayKind::Grid).count(), 8);
        assert_eq!(canvas.design_count(), 0);
    }

    #[test]
    fn test_rulers_have_label_per_tick() {
        let mut canvas = Canvas::new();
        let ws = WorkspaceConfig::new(20.0, 10.0).unwrap();
        rebuild_rulers(&mut canvas, &ws);
        assert_eq!(canvas.overlays(OverlayKind::Ruler).count(), (3 + 2) * 2);
    }
}
