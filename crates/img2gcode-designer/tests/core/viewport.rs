use img2gcode_core::constants::{MAX_ZOOM, MIN_ZOOM};
use img2gcode_designer::viewport::Viewport;

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.transform(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn test_zoom_clamped_at_both_ends() {
    let mut vp = Viewport::new();
    for _ in 0..100 {
        vp.zoom_in_at(400.0, 300.0);
    }
    assert_eq!(vp.zoom(), MAX_ZOOM);
    for _ in 0..200 {
        vp.zoom_out_at(400.0, 300.0);
    }
    assert_eq!(vp.zoom(), MIN_ZOOM);
}

#[test]
fn test_clamped_zoom_still_keeps_anchor() {
    let mut vp = Viewport::new();
    vp.set_pan(40.0, 25.0);
    let anchor = vp.screen_to_canvas(120.0, 80.0);
    vp.zoom_to_point(120.0, 80.0, 1000.0);
    assert_eq!(vp.zoom(), MAX_ZOOM);
    let after = vp.screen_to_canvas(120.0, 80.0);
    assert!((anchor.0 - after.0).abs() < 1e-9);
    assert!((anchor.1 - after.1).abs() < 1e-9);
}

#[test]
fn test_pan_adjusts_translation() {
    let mut vp = Viewport::new();
    vp.set_zoom(2.0);
    vp.pan_by(15.0, -5.0);
    assert_eq!(vp.transform(), [2.0, 0.0, 0.0, 2.0, 15.0, -5.0]);
    assert_eq!(vp.canvas_to_screen(10.0, 10.0), (35.0, 15.0));
}

#[test]
fn test_from_transform_clamps_zoom() {
    let vp = Viewport::from_transform([40.0, 0.0, 0.0, 40.0, 1.0, 2.0]);
    assert_eq!(vp.zoom(), MAX_ZOOM);
    assert_eq!((vp.pan_x(), vp.pan_y()), (1.0, 2.0));
}
