use std::sync::Arc;

use image::{ImageFormat, Rgba, RgbaImage};
use img2gcode_core::{shared_store, EventBus, MemoryStore};
use img2gcode_designer::image_pipeline::{decode_data_url, encode_png_data_url};
use img2gcode_designer::{AutoConfirm, DesignerState, Shape};

fn new_state() -> DesignerState {
    DesignerState::new(
        shared_store(MemoryStore::new()),
        Arc::new(EventBus::new()),
        Box::new(AutoConfirm(true)),
    )
}

#[test]
fn test_large_image_is_scaled_down_to_fit() {
    let mut state = new_state();
    let ppm = state.workspace.pixels_per_mm();
    let px = (1000.0 * ppm) as u32;
    let url = encode_png_data_url(&RgbaImage::new(px, 10)).unwrap();
    let id = state.add_image_data_url(&url).unwrap();
    let b = state.canvas.get(id).unwrap().bounds();
    assert!(b.max_x <= state.workspace.width_mm() - 10.0 + 1e-6);
    assert_eq!(state.canvas.selected_ids(), vec![id]);
}

#[test]
fn test_small_image_keeps_natural_size() {
    let mut state = new_state();
    let ppm = state.workspace.pixels_per_mm();
    let url = encode_png_data_url(&RgbaImage::new(30, 15)).unwrap();
    let id = state.add_image_data_url(&url).unwrap();
    match &state.canvas.get(id).unwrap().shape {
        Shape::Image(img) => {
            assert_eq!(img.scale_x, 1.0);
            assert!((img.display_width() - 30.0 / ppm).abs() < 1e-9);
        }
        other => panic!("expected image, got {:?}", other.shape_type()),
    }
}

#[test]
fn test_grayscale_setting_applies_on_insert() {
    let mut state = new_state();
    state.set_grayscale(true);
    let url = encode_png_data_url(&RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))).unwrap();
    let id = state.add_image_data_url(&url).unwrap();
    let Shape::Image(img) = &state.canvas.get(id).unwrap().shape else {
        panic!("expected image");
    };
    let decoded = decode_data_url(&img.data_url).unwrap();
    assert_eq!(decoded.get_pixel(0, 0).0, [76, 76, 76, 255]);
}

#[test]
fn test_broken_image_is_logged() {
    let mut state = new_state();
    assert!(state.add_image_data_url("data:image/png;base64,Zm9v").is_err());
    assert_eq!(state.error_log.len(), 1);
    assert_eq!(state.canvas.design_count(), 0);
}

#[test]
fn test_add_image_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    let mut state = new_state();
    state.add_image_file(&path).unwrap();
    assert_eq!(state.canvas.design_count(), 1);
    assert!(state.add_image_file(dir.path().join("missing.png")).is_err());
}
