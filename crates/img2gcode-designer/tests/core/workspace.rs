use img2gcode_core::constants::{CANVAS_MARGIN_PX, MAX_WORKSPACE_MM, MIN_WORKSPACE_MM};
use img2gcode_designer::model::Point;
use img2gcode_designer::workspace::WorkspaceConfig;
use proptest::prelude::*;

#[test]
fn test_default_workspace_fits_canvas() {
    let ws = WorkspaceConfig::default();
    let (cw, ch) = ws.canvas_size();
    let area = ws.usable_area();
    assert!(area.width <= cw + 1e-9);
    assert!(area.height <= ch + 1e-9);
    assert_eq!(area.offset_x, CANVAS_MARGIN_PX);
    assert_eq!(ws.element_size(), (cw + 60.0, ch + 60.0));
}

#[test]
fn test_top_right_corner_maps_to_area_corner() {
    let ws = WorkspaceConfig::new(300.0, 200.0).unwrap();
    let area = ws.usable_area();
    let (x, y) = ws.mm_to_px(Point::new(300.0, 200.0));
    assert!((x - (area.offset_x + area.width)).abs() < 1e-9);
    assert!((y - area.offset_y).abs() < 1e-9);
}

#[test]
fn test_bounds_are_inclusive() {
    assert!(WorkspaceConfig::new(MIN_WORKSPACE_MM, MAX_WORKSPACE_MM).is_ok());
    assert!(WorkspaceConfig::new(9.99, 100.0).is_err());
    assert!(WorkspaceConfig::new(100.0, f64::NAN).is_err());
}

proptest! {
    #[test]
    fn prop_ppm_is_tighter_ratio(w in 10.0f64..2000.0, h in 10.0f64..2000.0) {
        let ws = WorkspaceConfig::new(w, h).unwrap();
        let (cw, ch) = ws.canvas_size();
        let ppm = ws.pixels_per_mm();
        prop_assert!((ppm - (cw / w).min(ch / h)).abs() < 1e-12);
        let area = ws.usable_area();
        prop_assert!(area.width <= cw + 1e-6);
        prop_assert!(area.height <= ch + 1e-6);
    }

    #[test]
    fn prop_mm_px_round_trip(
        w in 10.0f64..2000.0,
        h in 10.0f64..2000.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let ws = WorkspaceConfig::new(w, h).unwrap();
        let p = Point::new(fx * w, fy * h);
        let (x, y) = ws.mm_to_px(p);
        let back = ws.px_to_mm(x, y);
        prop_assert!((back.x - p.x).abs() < 1e-6);
        prop_assert!((back.y - p.y).abs() < 1e-6);
    }
}
