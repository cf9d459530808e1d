//! Application-wide constants.
//!
//! Workspace limits, viewport limits and persistence limits shared by the
//! designer, settings and profile crates.

/// Default workspace width in millimetres.
pub const DEFAULT_WORKSPACE_WIDTH_MM: f64 = 400.0;
/// Default workspace height in millimetres.
pub const DEFAULT_WORKSPACE_HEIGHT_MM: f64 = 400.0;
/// Smallest accepted workspace edge in millimetres.
pub const MIN_WORKSPACE_MM: f64 = 10.0;
/// Largest accepted workspace edge in millimetres.
pub const MAX_WORKSPACE_MM: f64 = 2000.0;

/// Drawing area of the canvas in pixels (excluding the ruler margin).
pub const DEFAULT_CANVAS_WIDTH_PX: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT_PX: f64 = 600.0;
/// Pixel margin around the usable area, reserved for the rulers.
pub const CANVAS_MARGIN_PX: f64 = 30.0;

/// Viewport zoom limits.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
/// Multiplicative step for zoom in/out.
pub const ZOOM_STEP: f64 = 1.2;
/// Number of frames used by zoom and fit animations.
pub const ZOOM_ANIMATION_FRAMES: u32 = 12;
/// Fraction of the viewport kept free on each side when fitting the workspace.
pub const VIEW_PADDING: f64 = 0.05;

/// Default grid spacing in millimetres.
pub const DEFAULT_GRID_SPACING_MM: f64 = 10.0;
/// Finest accepted grid spacing; bounds the number of grid overlays.
pub const MIN_GRID_SPACING_MM: f64 = 0.5;
/// Ruler tick spacing in millimetres.
pub const RULER_TICK_MM: f64 = 10.0;

/// Margin kept free around an inserted image, in millimetres.
pub const IMAGE_FIT_MARGIN_MM: f64 = 10.0;

/// Project names are limited to this many characters.
pub const MAX_PROJECT_NAME_LEN: usize = 50;
/// Largest serialized project accepted by save.
pub const MAX_PROJECT_BYTES: usize = 4 * 1024 * 1024;
/// Name used for a design that has never been saved.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled";
/// Auto-save interval in seconds.
pub const DEFAULT_AUTO_SAVE_SECS: u64 = 60;

/// Local storage quota (bytes) emulated by the in-memory and file stores.
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Number of entries retained by the rolling error log.
pub const ERROR_LOG_CAPACITY: usize = 50;
