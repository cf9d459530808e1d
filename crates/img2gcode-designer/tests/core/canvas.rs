use img2gcode_designer::canvas::{snap_to_grid, Canvas};
use img2gcode_designer::model::{DesignCircle, DesignRectangle, Point, Shape};
use img2gcode_designer::object::OverlayKind;
use img2gcode_designer::overlays::rebuild_grid;
use img2gcode_designer::workspace::WorkspaceConfig;

#[test]
fn test_select_all_skips_overlays() {
    let mut canvas = Canvas::new();
    let ws = WorkspaceConfig::new(50.0, 50.0).unwrap();
    rebuild_grid(&mut canvas, &ws, 10.0);
    canvas.add_shape(Shape::Rectangle(DesignRectangle::new(0.0, 0.0, 10.0, 10.0)));
    canvas.add_shape(Shape::Circle(DesignCircle::new(Point::new(30.0, 30.0), 5.0)));
    canvas.select_all();
    assert_eq!(canvas.selected_count(), 2);
    assert!(canvas.overlays(OverlayKind::Grid).all(|o| !o.selected));
}

#[test]
fn test_selection_bounds_union() {
    let mut canvas = Canvas::new();
    canvas.add_shape(Shape::Rectangle(DesignRectangle::new(0.0, 0.0, 10.0, 10.0)));
    canvas.add_shape(Shape::Circle(DesignCircle::new(Point::new(30.0, 30.0), 5.0)));
    canvas.select_all();
    let b = canvas.selection_bounds().unwrap();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (0.0, 0.0, 35.0, 35.0));
}

#[test]
fn test_snap_rounds_to_nearest_increment() {
    assert_eq!(snap_to_grid(12.4, 5.0), 10.0);
    assert_eq!(snap_to_grid(12.5, 5.0), 15.0);
    assert_eq!(snap_to_grid(0.0, 10.0), 0.0);
}
