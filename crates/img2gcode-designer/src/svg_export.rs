//! SVG export.
//!
//! Writes the design objects as an SVG document sized in millimetres with a
//! `viewBox` in the same units, so one user unit is one millimetre. The
//! document's Y axis points down; every coordinate is flipped against the
//! workspace height. Overlays are never exported.

use std::fmt::Write as _;
use std::path::Path;

use lyon::path::Event;

use crate::canvas::Canvas;
use crate::error::{DesignerError, DesignerResult};
use crate::model::{DesignImage, DesignText, DesignerShape, Shape};
use crate::object::{CanvasObject, Style};
use crate::workspace::WorkspaceConfig;

/// Escapes text for use in XML content and attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn style_attrs(style: &Style) -> String {
    format!(
        r#"fill="{}" stroke="{}" stroke-width="{}""#,
        escape_xml(style.fill.as_deref().unwrap_or("none")),
        escape_xml(style.stroke.as_deref().unwrap_or("none")),
        fmt_num(style.stroke_width)
    )
}

/// Path data for an outline, Y flipped against `height`.
fn path_data(shape: &Shape, height: f64) -> String {
    let y = |v: f32| fmt_num(height - f64::from(v));
    let x = |v: f32| fmt_num(f64::from(v));
    let mut d = String::new();
    for event in shape.render().iter() {
        match event {
            Event::Begin { at } => {
                let _ = write!(d, "M{} {} ", x(at.x), y(at.y));
            }
            Event::Line { to, .. } => {
                let _ = write!(d, "L{} {} ", x(to.x), y(to.y));
            }
            Event::Quadratic { ctrl, to, .. } => {
                let _ = write!(d, "Q{} {} {} {} ", x(ctrl.x), y(ctrl.y), x(to.x), y(to.y));
            }
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {} ",
                    x(ctrl1.x),
                    y(ctrl1.y),
                    x(ctrl2.x),
                    y(ctrl2.y),
                    x(to.x),
                    y(to.y)
                );
            }
            Event::End { close, .. } => {
                if close {
                    d.push_str("Z ");
                }
            }
        }
    }
    d.trim_end().to_string()
}

fn text_element(text: &DesignText, style: &Style, height: f64) -> String {
    let (w, h) = text.extent();
    let cx = text.origin.x + w / 2.0;
    let cy = height - (text.origin.y + h / 2.0);
    let lines: Vec<&str> = text.text.lines().collect();
    let count = lines.len().max(1);

    let mut transform = String::new();
    if text.rotation.abs() > 1e-9 {
        let _ = write!(
            transform,
            "rotate({} {} {}) ",
            fmt_num(-text.rotation),
            fmt_num(cx),
            fmt_num(cy)
        );
    }
    let _ = write!(
        transform,
        "translate({} {}) scale({} {})",
        fmt_num(text.origin.x),
        fmt_num(height - text.origin.y),
        fmt_num(text.scale_x),
        fmt_num(text.scale_y)
    );

    let mut out = format!(
        r#"<text transform="{}" font-family="{}" font-size="{}" {}>"#,
        transform,
        escape_xml(&text.font_family),
        fmt_num(text.font_size),
        style_attrs(style)
    );
    for (i, line) in lines.iter().enumerate() {
        let baseline = -((count - 1 - i) as f64) * text.font_size;
        let _ = write!(
            out,
            r#"<tspan x="0" y="{}">{}</tspan>"#,
            fmt_num(baseline),
            escape_xml(line)
        );
    }
    out.push_str("</text>");
    out
}

fn image_element(img: &DesignImage, height: f64) -> String {
    let w = img.display_width();
    let h = img.display_height();
    let center = img.center();
    let mut out = format!(
        r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none" href="{}""#,
        fmt_num(img.origin.x),
        fmt_num(height - (img.origin.y + h)),
        fmt_num(w),
        fmt_num(h),
        escape_xml(&img.data_url)
    );
    if img.rotation.abs() > 1e-9 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            fmt_num(-img.rotation),
            fmt_num(center.x),
            fmt_num(height - center.y)
        );
    }
    out.push_str("/>");
    out
}

fn object_element(obj: &CanvasObject, height: f64) -> String {
    match &obj.shape {
        Shape::Text(text) => text_element(text, &obj.style, height),
        Shape::Image(img) => image_element(img, height),
        other => format!(
            r#"<path id="obj-{}" d="{}" {}/>"#,
            obj.id,
            path_data(other, height),
            style_attrs(&obj.style)
        ),
    }
}

/// Renders the design objects of `canvas` as an SVG document.
pub fn export_svg(canvas: &Canvas, workspace: &WorkspaceConfig) -> String {
    let w = fmt_num(workspace.width_mm());
    let h = fmt_num(workspace.height_mm());
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#
    );
    for obj in canvas.design_objects() {
        out.push_str("  ");
        out.push_str(&object_element(obj, workspace.height_mm()));
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}

/// Writes the exported document to `path`; returns the number of objects
/// written.
pub fn write_svg(canvas: &Canvas, workspace: &WorkspaceConfig, path: impl AsRef<Path>) -> DesignerResult<usize> {
    let path = path.as_ref();
    let count = canvas.design_count();
    if count == 0 {
        return Err(DesignerError::Export("nothing to export".to_string()));
    }
    std::fs::write(path, export_svg(canvas, workspace)).map_err(|e| DesignerError::io(path, e))?;
    tracing::info!("Exported {} objects to {}", count, path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DesignLine, DesignRectangle, Point};
    use crate::object::{OverlayKind, Style};

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a<b & "c""#), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_rectangle_is_flipped() {
        let mut canvas = Canvas::new();
        canvas.add_shape(Shape::Rectangle(DesignRectangle::new(10.0, 10.0, 30.0, 20.0)));
        let ws = WorkspaceConfig::new(100.0, 100.0).unwrap();
        let svg = export_svg(&canvas, &ws);
        assert!(svg.contains(r#"width="100mm""#));
        assert!(svg.contains("M10 90"));
        assert!(svg.contains("70"));
    }

    #[test]
    fn test_overlays_and_markup_in_text() {
        let mut canvas = Canvas::new();
        canvas.add_shape(Shape::Text(DesignText::new("<Hi>", "Arial", 10.0, Point::new(0.0, 0.0))));
        canvas.add_overlay(
            OverlayKind::Grid,
            Shape::Line(DesignLine::new(Point::new(0.0, 0.0), Point::new(0.0, 5.0))),
            Style::default(),
        );
        let ws = WorkspaceConfig::default();
        let svg = export_svg(&canvas, &ws);
        assert!(svg.contains("&lt;Hi&gt;"));
        assert_eq!(svg.matches("<path").count(), 0);
    }

    #[test]
    fn test_write_empty_design_fails() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = Canvas::new();
        let err = write_svg(&canvas, &WorkspaceConfig::default(), dir.path().join("out.svg"));
        assert!(matches!(err, Err(DesignerError::Export(_))));
    }
}
