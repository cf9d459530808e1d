use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use img2gcode_core::{shared_store, EventBus, EventCategory, EventFilter, MemoryStore};
use img2gcode_designer::model::{Point, ShapeType};
use img2gcode_designer::object::OverlayKind;
use img2gcode_designer::{AutoConfirm, AutoSaveOutcome, DesignerState};

fn new_state() -> DesignerState {
    DesignerState::new(
        shared_store(MemoryStore::new()),
        Arc::new(EventBus::new()),
        Box::new(AutoConfirm(true)),
    )
}

#[test]
fn test_designer_state_new() {
    let state = new_state();
    assert_eq!(state.canvas.design_count(), 0);
    assert_eq!(state.project_name, "Untitled");
    assert!(state.canvas.overlays(OverlayKind::Grid).count() > 0);
    assert!(state.canvas.overlays(OverlayKind::Ruler).count() > 0);
    assert!(!state.is_modified);
}

#[test]
fn test_default_objects_are_selected_and_placed() {
    let mut state = new_state();
    let id = state.add_rectangle();
    assert_eq!(state.canvas.selected_ids(), vec![id]);
    let dims = state.selection_dimensions().unwrap();
    assert_eq!((dims.left, dims.bottom, dims.width, dims.height), (10.0, 10.0, 50.0, 30.0));
    assert!(state.is_modified);

    let circle = state.add_circle();
    assert_eq!(state.canvas.selected_ids(), vec![circle]);
    let b = state.canvas.get(circle).unwrap().bounds();
    assert_eq!((b.min_x, b.min_y, b.width()), (10.0, 10.0, 30.0));

    let text = state.add_text();
    assert_eq!(state.canvas.get(text).unwrap().shape_type(), ShapeType::Text);
    let line = state.add_line();
    assert_eq!(state.canvas.get(line).unwrap().bounds().width(), 50.0);
}

#[test]
fn test_dimension_indicators_follow_selection() {
    let mut state = new_state();
    state.add_rectangle();
    assert_eq!(state.canvas.overlays(OverlayKind::Indicator).count(), 4);
    state.move_selected(5.0, 0.0).unwrap();
    assert_eq!(state.canvas.overlays(OverlayKind::Indicator).count(), 4);
    state.deselect_all();
    assert_eq!(state.canvas.overlays(OverlayKind::Indicator).count(), 0);
}

#[test]
fn test_delete_without_selection_is_logged() {
    let mut state = new_state();
    let err = state.delete_selected().unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(state.error_log.len(), 1);
    assert_eq!(state.error_log.latest().unwrap().context, "delete");
}

#[test]
fn test_duplicate_offsets_by_ten() {
    let mut state = new_state();
    state.add_rectangle();
    let copies = state.duplicate_selected().unwrap();
    let dims = state.selection_dimensions().unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!((dims.left, dims.bottom), (20.0, 20.0));
    assert_eq!(state.canvas.design_count(), 2);
}

#[test]
fn test_clear_respects_confirmation() {
    let mut state = new_state();
    state.add_rectangle();
    state.add_circle();
    state.set_prompt(Box::new(AutoConfirm(false)));
    assert_eq!(state.clear_canvas(), 0);
    assert_eq!(state.canvas.design_count(), 2);
    state.set_prompt(Box::new(AutoConfirm(true)));
    assert_eq!(state.clear_canvas(), 2);
    assert_eq!(state.canvas.design_count(), 0);
    assert!(state.canvas.overlays(OverlayKind::Ruler).count() > 0);
}

#[test]
fn test_snap_on_move() {
    let mut state = new_state();
    state.set_snap_to_grid(true);
    state.add_rectangle();
    state.move_selected(7.0, 2.0).unwrap();
    let dims = state.selection_dimensions().unwrap();
    assert_eq!((dims.left, dims.bottom), (20.0, 10.0));
}

#[test]
fn test_freehand_needs_two_points() {
    let mut state = new_state();
    assert!(state.add_freehand(vec![Point::new(0.0, 0.0)]).is_err());
    let id = state
        .add_freehand(vec![Point::new(0.0, 0.0), Point::new(5.0, 8.0), Point::new(9.0, 1.0)])
        .unwrap();
    assert_eq!(state.canvas.get(id).unwrap().shape_type(), ShapeType::Path);
}

#[test]
fn test_workspace_resize_rejected_out_of_range() {
    let mut state = new_state();
    let before = state.workspace.size();
    assert!(state.set_workspace_size(5000.0, 100.0).is_err());
    assert_eq!(state.workspace.size(), before);
    state.set_workspace_size(200.0, 100.0).unwrap();
    assert_eq!(state.workspace.width_mm(), 200.0);
}

#[test]
fn test_grid_spacing_below_minimum_rejected() {
    let mut state = new_state();
    let grid_before = state.canvas.overlays(OverlayKind::Grid).count();
    let errors_before = state.error_log.len();
    assert!(state.set_grid(true, 0.01).is_err());
    assert_eq!(state.options.grid_spacing_mm, 10.0);
    assert_eq!(state.canvas.overlays(OverlayKind::Grid).count(), grid_before);
    assert_eq!(state.error_log.len(), errors_before + 1);

    state.set_grid(true, 0.5).unwrap();
    assert_eq!(state.canvas.overlays(OverlayKind::Grid).count(), 801 + 801);
}

#[test]
fn test_zoom_events_and_clamp() {
    let mut state = new_state();
    let zooms = Arc::new(AtomicUsize::new(0));
    let counter = zooms.clone();
    state
        .events()
        .subscribe(EventFilter::Categories(vec![EventCategory::View]), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    for _ in 0..30 {
        state.zoom_in();
    }
    assert_eq!(state.viewport.zoom(), 10.0);
    assert!(zooms.load(Ordering::SeqCst) > 0);
}

#[test]
fn test_animation_last_write_wins() {
    let mut state = new_state();
    let first = state.animate_zoom_at(100.0, 100.0, 4.0);
    assert!(state.step_animation(first));
    let second = state.animate_zoom_at(100.0, 100.0, 0.5);
    assert!(!state.step_animation(first));
    while state.step_animation(second) {}
    assert!((state.viewport.zoom() - 0.5).abs() < 1e-9);
}

#[test]
fn test_fit_workspace_centres_area() {
    let mut state = new_state();
    state.fit_workspace();
    let area = state.workspace.usable_area();
    let (w, h) = state.workspace.element_size();
    let (cx, cy) = state
        .viewport
        .canvas_to_screen(area.offset_x + area.width / 2.0, area.offset_y + area.height / 2.0);
    assert!((cx - w / 2.0).abs() < 1e-9);
    assert!((cy - h / 2.0).abs() < 1e-9);
}

#[test]
fn test_auto_save_skips_untitled_and_saves_named() {
    let mut state = new_state();
    state.auto_save.set_interval(Duration::from_secs(60));
    let start = Instant::now();
    assert_eq!(state.auto_save_tick(start), AutoSaveOutcome::NotDue);
    state.add_rectangle();
    assert_eq!(
        state.auto_save_tick(start + Duration::from_secs(61)),
        AutoSaveOutcome::Skipped
    );

    state.save_project("Sign").unwrap();
    state.add_circle();
    assert_eq!(
        state.auto_save_tick(start + Duration::from_secs(122)),
        AutoSaveOutcome::Saved("Sign".to_string())
    );
    let saved = state.projects().get("Sign").unwrap().unwrap();
    assert_eq!(saved.objects.len(), 2);
}
