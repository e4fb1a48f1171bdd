//! Camera transformations - zoom to cursor, fit to view, view resets.
//!
//! All functions here are pure: they take a camera and return a new one.
//! The session decides when to apply the result and commit it to the tab.

use crate::constants::{
    DEFAULT_CAMERA, FIT_MARGIN, FIT_MIN_VIEW, FIT_TOP_PAD, MAX_SCALE, MIN_SCALE, ZOOM_EPSILON,
};
use crate::input::InputOutcome;
use crate::input::coords::{CanvasPoint, ScreenPoint, Viewport};
use crate::profile_scope;
use crate::session::{ChangeReason, Session};
use crate::types::{Camera, Item};

/// Clamp a scale into `[MIN_SCALE, MAX_SCALE]`. Non-finite input maps to 1.0.
#[inline]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    }
}

/// Multiplicative zoom factor for a wheel delta: `exp(delta * sensitivity)`.
#[inline]
pub fn wheel_zoom_factor(wheel_delta: f64, sensitivity: f64) -> f64 {
    (wheel_delta * sensitivity).exp()
}

impl Camera {
    /// Same camera with its scale clamped into range. A non-finite offset
    /// falls back to the default camera's.
    pub fn clamped(self) -> Camera {
        let tx = if self.tx.is_finite() { self.tx } else { DEFAULT_CAMERA.0 };
        let ty = if self.ty.is_finite() { self.ty } else { DEFAULT_CAMERA.1 };
        Camera::new(tx, ty, clamp_scale(self.scale))
    }

    /// Zoom by `factor` keeping the world point under `anchor` fixed.
    ///
    /// The anchor stays put even when the scale saturates at a bound, because
    /// the translate is solved against the clamped scale.
    pub fn zoomed_around(&self, anchor: CanvasPoint, factor: f64) -> Camera {
        if !factor.is_finite() || factor <= 0.0 || (factor - 1.0).abs() < ZOOM_EPSILON {
            return *self;
        }

        let before = self.canvas_to_world(anchor);
        let scale = clamp_scale(self.scale * factor);
        let mut next = Camera::new(self.tx, self.ty, scale);
        let after = next.canvas_to_world(anchor);

        next.tx += (after.x - before.x) * scale;
        next.ty += (after.y - before.y) * scale;
        next
    }
}

/// Camera that fits `item` into the viewport, leaving room for the chrome.
///
/// The item's center lands on the visual center of the area below the top
/// bar.
pub fn fit_to_view(item: &Item, viewport: &Viewport) -> Camera {
    let view_w = (viewport.width - FIT_MARGIN * 2.0).max(FIT_MIN_VIEW);
    let view_h = (viewport.height - FIT_MARGIN * 2.0 - FIT_TOP_PAD).max(FIT_MIN_VIEW);

    let scale = clamp_scale((view_w / item.w).min(view_h / item.h));

    let target_x = viewport.width / 2.0;
    let target_y = (viewport.height + FIT_TOP_PAD) / 2.0;

    Camera::new(target_x - item.x * scale, target_y - item.y * scale, scale)
}

/// Camera with the default translate offset placed around the canvas center.
pub fn centered_view(current: &Camera, viewport: &Viewport) -> Camera {
    let default = Camera::default();
    Camera::new(
        viewport.width / 2.0 - default.tx,
        viewport.height / 2.0 - default.ty,
        current.scale,
    )
}

impl Session {
    /// Zoom around the pointer. Ignored while panning, since the pan owns
    /// the camera until release.
    pub fn handle_wheel(&mut self, position: ScreenPoint, delta: f64) -> InputOutcome {
        profile_scope!("handle_wheel");

        if self.input_state.is_panning() {
            return InputOutcome::Ignored;
        }

        let factor = wheel_zoom_factor(delta, self.zoom_sensitivity);
        let anchor = self.viewport.screen_to_canvas(position);
        let next = self.camera.zoomed_around(anchor, factor);
        if next == self.camera {
            return InputOutcome::Ignored;
        }

        self.set_camera(next);
        self.mark_dirty_quiet(ChangeReason::Zoom);
        InputOutcome::Handled
    }
}
