//! Canvas objects: a shape plus identity, style and overlay marker.

use serde::{Deserialize, Serialize};

use crate::model::{Bounds, DesignerShape, Shape, ShapeType};

/// Stroke and fill of an object. Colours are CSS colour strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

fn default_stroke_width() -> f64 {
    0.2
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: Some("#000000".to_string()),
            stroke_width: default_stroke_width(),
        }
    }
}

impl Style {
    pub fn filled(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            stroke: None,
            stroke_width: 0.0,
        }
    }
}

/// Helper objects drawn by the editor itself. They are never saved or
/// exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Grid,
    Ruler,
    Indicator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    pub id: u64,
    pub name: String,
    pub shape: Shape,
    #[serde(default)]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayKind>,
    #[serde(skip)]
    pub selected: bool,
}

impl CanvasObject {
    pub fn new(id: u64, shape: Shape) -> Self {
        let name = format!("{} {}", shape.shape_type(), id);
        let style = match shape.shape_type() {
            ShapeType::Text => Style::filled("#000000"),
            _ => Style::default(),
        };
        Self {
            id,
            name,
            shape,
            style,
            overlay: None,
            selected: false,
        }
    }

    pub fn overlay(id: u64, kind: OverlayKind, shape: Shape, style: Style) -> Self {
        Self {
            id,
            name: format!("{:?}", kind).to_lowercase(),
            shape,
            style,
            overlay: Some(kind),
            selected: false,
        }
    }

    pub fn is_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape.shape_type()
    }

    pub fn bounds(&self) -> Bounds {
        self.shape.bounds()
    }
}
