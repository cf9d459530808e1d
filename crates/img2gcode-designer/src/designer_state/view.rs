//! Viewport and workspace controls for designer state.

use img2gcode_core::constants::{MIN_GRID_SPACING_MM, VIEW_PADDING, ZOOM_STEP};
use img2gcode_core::{AppEvent, ValidationError, ViewEvent};

use super::DesignerState;
use crate::animation::AnimationToken;
use crate::error::DesignerResult;
use crate::overlays::{rebuild_grid, rebuild_rulers, remove_grid};
use crate::viewport::Viewport;

impl DesignerState {
    /// Centre of the canvas element in screen pixels.
    fn view_center(&self) -> (f64, f64) {
        let (w, h) = self.workspace.element_size();
        (w / 2.0, h / 2.0)
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        let zoom_changed = (viewport.zoom() - self.viewport.zoom()).abs() > f64::EPSILON;
        self.viewport = viewport;
        if zoom_changed {
            self.publish(AppEvent::View(ViewEvent::Zoomed {
                zoom: viewport.zoom(),
            }));
        }
        self.publish(AppEvent::View(ViewEvent::Panned {
            pan_x: viewport.pan_x(),
            pan_y: viewport.pan_y(),
        }));
    }

    /// Zooms about a screen point; the zoom is clamped.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, zoom: f64) {
        self.animator.cancel();
        let target = self.viewport.zoomed_at(screen_x, screen_y, zoom);
        self.apply_viewport(target);
    }

    pub fn zoom_in(&mut self) {
        let (cx, cy) = self.view_center();
        self.zoom_at(cx, cy, self.viewport.zoom() * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        let (cx, cy) = self.view_center();
        self.zoom_at(cx, cy, self.viewport.zoom() / ZOOM_STEP);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.animator.cancel();
        let mut target = self.viewport;
        target.pan_by(dx, dy);
        self.apply_viewport(target);
    }

    pub fn reset_view(&mut self) {
        self.animator.cancel();
        self.apply_viewport(Viewport::new());
    }

    /// Viewport that shows the whole usable area centred with padding.
    pub fn fit_workspace_viewport(&self) -> Viewport {
        let area = self.workspace.usable_area();
        let (w, h) = self.workspace.element_size();
        Viewport::fitted(area.offset_x, area.offset_y, area.width, area.height, w, h, VIEW_PADDING)
            .unwrap_or_default()
    }

    pub fn fit_workspace(&mut self) {
        self.animator.cancel();
        let target = self.fit_workspace_viewport();
        self.apply_viewport(target);
    }

    /// Starts an animated transition to `target`, replacing any running
    /// one. Drive it with [`DesignerState::step_animation`].
    pub fn animate_to(&mut self, target: Viewport) -> AnimationToken {
        self.animator.start(self.viewport, target)
    }

    pub fn animate_zoom_at(&mut self, screen_x: f64, screen_y: f64, zoom: f64) -> AnimationToken {
        let target = self.viewport.zoomed_at(screen_x, screen_y, zoom);
        self.animate_to(target)
    }

    /// Applies the next frame. Returns false once the animation is done or
    /// was superseded.
    pub fn step_animation(&mut self, token: AnimationToken) -> bool {
        match self.animator.step(token) {
            Some(frame) => {
                self.apply_viewport(frame);
                true
            }
            None => false,
        }
    }

    /// Resizes the workspace. Out-of-range sizes are rejected and logged;
    /// the workspace stays as it was.
    pub fn set_workspace_size(&mut self, width_mm: f64, height_mm: f64) -> DesignerResult<()> {
        let result: DesignerResult<()> = self
            .workspace
            .set_size(width_mm, height_mm)
            .map_err(Into::into);
        if result.is_ok() {
            self.rebuild_overlays();
            self.publish(AppEvent::View(ViewEvent::WorkspaceResized { width_mm, height_mm }));
            self.is_modified = true;
        }
        self.report("resize workspace", result)
    }

    pub fn set_grid(&mut self, enabled: bool, spacing_mm: f64) -> DesignerResult<()> {
        if !(spacing_mm.is_finite() && spacing_mm >= MIN_GRID_SPACING_MM) {
            let err = ValidationError::OutOfRange {
                field: "Grid spacing",
                value: spacing_mm,
                min: MIN_GRID_SPACING_MM,
                max: f64::MAX,
            };
            return self.report("grid", Err(err.into()));
        }
        self.options.grid_enabled = enabled;
        self.options.grid_spacing_mm = spacing_mm;
        self.rebuild_overlays();
        Ok(())
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.options.snap_to_grid = enabled;
    }

    pub fn set_show_dimensions(&mut self, show: bool) {
        self.options.show_dimensions = show;
        self.refresh_dimensions();
    }

    /// Regenerates grid and rulers for the current workspace.
    pub fn rebuild_overlays(&mut self) {
        if self.options.grid_enabled {
            rebuild_grid(&mut self.canvas, &self.workspace, self.options.grid_spacing_mm);
        } else {
            remove_grid(&mut self.canvas);
        }
        rebuild_rulers(&mut self.canvas, &self.workspace);
    }
}
