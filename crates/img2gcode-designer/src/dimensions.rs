//! Dimension readout and indicator overlays for the current selection.

use img2gcode_core::units::{format_length, MeasurementSystem};

use crate::canvas::Canvas;
use crate::model::{Bounds, DesignLine, DesignText, Point, Shape};
use crate::object::{OverlayKind, Style};

/// Gap between the selection box and its indicator lines, in mm.
const INDICATOR_GAP_MM: f64 = 5.0;
const LABEL_SIZE_MM: f64 = 4.0;
const INDICATOR_COLOR: &str = "#e53935";

/// Size and position of the selection bounding box in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionDimensions {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub bottom: f64,
}

impl SelectionDimensions {
    pub fn from_bounds(b: &Bounds) -> Self {
        Self {
            width: b.width(),
            height: b.height(),
            left: b.min_x,
            bottom: b.min_y,
        }
    }

    pub fn of_selection(canvas: &Canvas) -> Option<Self> {
        canvas.selection_bounds().map(|b| Self::from_bounds(&b))
    }

    pub fn describe(&self, system: MeasurementSystem) -> String {
        format!(
            "W: {}  H: {}  X: {}  Y: {}",
            format_length(self.width, system),
            format_length(self.height, system),
            format_length(self.left, system),
            format_length(self.bottom, system)
        )
    }
}

/// Drops the old indicator overlays and, when `show` is set and something
/// is selected, draws new ones: a width line with its label below the
/// selection and a height line with its label to the right.
pub fn refresh_indicators(canvas: &mut Canvas, show: bool, system: MeasurementSystem) -> Option<SelectionDimensions> {
    canvas.remove_overlays(OverlayKind::Indicator);
    let dims = SelectionDimensions::of_selection(canvas)?;
    if !show {
        return Some(dims);
    }

    let right = dims.left + dims.width;
    let top = dims.bottom + dims.height;
    let below = dims.bottom - INDICATOR_GAP_MM;
    let beside = right + INDICATOR_GAP_MM;
    let stroke = Style {
        fill: None,
        stroke: Some(INDICATOR_COLOR.to_string()),
        stroke_width: 0.2,
    };

    canvas.add_overlay(
        OverlayKind::Indicator,
        Shape::Line(DesignLine::new(Point::new(dims.left, below), Point::new(right, below))),
        stroke.clone(),
    );
    canvas.add_overlay(
        OverlayKind::Indicator,
        Shape::Text(DesignText::new(
            format_length(dims.width, system),
            "sans-serif",
            LABEL_SIZE_MM,
            Point::new(dims.left + dims.width / 2.0, below - LABEL_SIZE_MM - 1.0),
        )),
        Style::filled(INDICATOR_COLOR),
    );
    canvas.add_overlay(
        OverlayKind::Indicator,
        Shape::Line(DesignLine::new(Point::new(beside, dims.bottom), Point::new(beside, top))),
        stroke,
    );
    canvas.add_overlay(
        OverlayKind::Indicator,
        Shape::Text(DesignText::new(
            format_length(dims.height, system),
            "sans-serif",
            LABEL_SIZE_MM,
            Point::new(beside + 1.0, dims.bottom + dims.height / 2.0),
        )),
        Style::filled(INDICATOR_COLOR),
    );
    Some(dims)
}
