//! Raster image loading.
//!
//! Images enter the designer as `data:` URLs. They are decoded into an RGBA
//! buffer, optionally converted to grayscale with the Rec. 601 luminance
//! weights, re-encoded as PNG and placed on the workspace scaled to fit.

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, RgbaImage};
use img2gcode_core::constants::IMAGE_FIT_MARGIN_MM;

use crate::error::{DesignerError, DesignerResult};
use crate::model::{DesignImage, Point};
use crate::workspace::WorkspaceConfig;

/// Reads an image file and returns it as a base64 `data:` URL whose MIME
/// type comes from the detected format.
pub fn read_file_as_data_url(path: impl AsRef<Path>) -> DesignerResult<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DesignerError::io(path, e))?;
    let format = image::guess_format(&bytes)?;
    Ok(to_data_url(format.to_mime_type(), &bytes))
}

fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

/// Splits a base64 `data:` URL into its MIME type and payload bytes.
pub fn parse_data_url(url: &str) -> DesignerResult<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| DesignerError::InvalidDataUrl("missing data: prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DesignerError::InvalidDataUrl("missing payload".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| DesignerError::InvalidDataUrl("only base64 payloads are supported".to_string()))?;
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| DesignerError::InvalidDataUrl(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

pub fn decode_data_url(url: &str) -> DesignerResult<RgbaImage> {
    let (_, bytes) = parse_data_url(url)?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Luminance of one pixel, `round(0.299 R + 0.587 G + 0.114 B)`.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

/// Replaces each pixel's colour with its luminance; alpha is preserved.
pub fn to_grayscale(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let y = luminance(r, g, b);
        pixel.0 = [y, y, y, a];
    }
}

pub fn encode_png_data_url(image: &RgbaImage) -> DesignerResult<String> {
    let mut bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgba8(image.clone()).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(to_data_url("image/png", &bytes))
}

/// Scale that fits an image of `w_mm` × `h_mm` inside the workspace minus
/// the fit margin on every side. Never above 1.
pub fn fit_scale(w_mm: f64, h_mm: f64, workspace: &WorkspaceConfig) -> f64 {
    let avail_w = workspace.width_mm() - 2.0 * IMAGE_FIT_MARGIN_MM;
    let avail_h = workspace.height_mm() - 2.0 * IMAGE_FIT_MARGIN_MM;
    let mut scale: f64 = 1.0;
    if w_mm > 0.0 && avail_w > 0.0 {
        scale = scale.min(avail_w / w_mm);
    }
    if h_mm > 0.0 && avail_h > 0.0 {
        scale = scale.min(avail_h / h_mm);
    }
    scale
}

/// Decodes `data_url`, applies grayscale when asked, and returns an image
/// object placed at the fit margin with its natural size scaled to fit.
pub fn prepare_image(data_url: &str, grayscale: bool, workspace: &WorkspaceConfig) -> DesignerResult<DesignImage> {
    let mut raster = decode_data_url(data_url)?;
    if grayscale {
        to_grayscale(&mut raster);
    }
    let (pw, ph) = raster.dimensions();
    let ppm = workspace.pixels_per_mm();
    let natural_w = f64::from(pw) / ppm;
    let natural_h = f64::from(ph) / ppm;
    let scale = fit_scale(natural_w, natural_h, workspace);
    tracing::debug!(
        "Prepared {}x{} px image: {:.1} × {:.1} mm at scale {:.3}",
        pw,
        ph,
        natural_w,
        natural_h,
        scale
    );

    Ok(DesignImage {
        data_url: encode_png_data_url(&raster)?,
        pixel_width: pw,
        pixel_height: ph,
        origin: Point::new(IMAGE_FIT_MARGIN_MM, IMAGE_FIT_MARGIN_MM),
        width_mm: natural_w,
        height_mm: natural_h,
        scale_x: scale,
        scale_y: scale,
        rotation: 0.0,
        grayscale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_url(w: u32, h: u32) -> String {
        let img = RgbaImage::from_pixel(w, h, Rgba([200, 100, 50, 128]));
        encode_png_data_url(&img).unwrap()
    }

    #[test]
    fn test_luminance_formula() {
        assert_eq!(luminance(200, 100, 50), 124);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(0, 0, 0), 0);
    }

    #[test]
    fn test_grayscale_preserves_alpha() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 128]));
        to_grayscale(&mut img);
        assert_eq!(img.get_pixel(1, 1).0, [124, 124, 124, 128]);
    }

    #[test]
    fn test_fit_scale_never_enlarges() {
        let ws = WorkspaceConfig::new(400.0, 400.0).unwrap();
        assert_eq!(fit_scale(10.0, 10.0, &ws), 1.0);
        assert!((fit_scale(760.0, 100.0, &ws) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_prepare_image_grayscale() {
        let ws = WorkspaceConfig::default();
        let placed = prepare_image(&sample_url(3, 2), true, &ws).unwrap();
        assert_eq!((placed.pixel_width, placed.pixel_height), (3, 2));
        assert!(placed.grayscale);
        let decoded = decode_data_url(&placed.data_url).unwrap();
        assert_eq!(decoded.get_pixel(0, 0).0, [124, 124, 124, 128]);
    }

    #[test]
    fn test_invalid_data_url() {
        assert!(matches!(
            parse_data_url("http://example.com/a.png"),
            Err(DesignerError::InvalidDataUrl(_))
        ));
        assert!(decode_data_url("data:image/png;base64,AAAA").is_err());
    }

    #[test]
    fn test_read_file_detects_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.bin");
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        img.save_with_format(&path, ImageFormat::Png).unwrap();
        let url = read_file_as_data_url(&path).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }
}
