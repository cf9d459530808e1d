use std::sync::Arc;

use img2gcode_core::{shared_store, EventBus, MemoryStore};
use img2gcode_designer::svg_export::{export_svg, write_svg};
use img2gcode_designer::{AutoConfirm, DesignerState};

#[test]
fn test_export_writes_design_objects_only() {
    let mut state = DesignerState::new(
        shared_store(MemoryStore::new()),
        Arc::new(EventBus::new()),
        Box::new(AutoConfirm(true)),
    );
    state.add_rectangle();
    state.add_text();
    state.add_circle();

    let svg = export_svg(&state.canvas, &state.workspace);
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(r#"viewBox="0 0 400 400""#));
    assert_eq!(svg.matches("<path").count(), 2);
    assert_eq!(svg.matches("<text").count(), 1);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("design.svg");
    assert_eq!(write_svg(&state.canvas, &state.workspace, &out).unwrap(), 3);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), svg);
}
