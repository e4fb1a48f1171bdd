//! Coordinate frames and the conversions between them.
//!
//! Three frames are kept apart by type:
//!
//! - [`ScreenPoint`]: window coordinates, as delivered by pointer events.
//! - [`CanvasPoint`]: relative to the canvas area's top-left corner.
//! - [`WorldPoint`]: zoom/pan independent, where items live.
//!
//! The camera maps world to canvas (`canvas = world * scale + (tx, ty)`), the
//! [`Viewport`] adds the canvas origin on top. Nothing outside this module
//! builds one frame's point out of another frame's numbers.

use crate::types::Camera;
use std::ops::Sub;

/// A point in window coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// A point relative to the canvas area's origin
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

/// A point in world space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Difference of two screen points, in screen pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenDelta {
    pub dx: f64,
    pub dy: f64,
}

impl ScreenPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl CanvasPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl WorldPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ScreenDelta {
    /// Euclidean length in pixels
    #[inline]
    pub fn length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

impl Sub for ScreenPoint {
    type Output = ScreenDelta;

    fn sub(self, rhs: Self) -> ScreenDelta {
        ScreenDelta {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl Camera {
    /// Map a world point into the canvas frame.
    #[inline]
    pub fn world_to_canvas(&self, p: WorldPoint) -> CanvasPoint {
        CanvasPoint::new(p.x * self.scale + self.tx, p.y * self.scale + self.ty)
    }

    /// Map a canvas point back into world space.
    #[inline]
    pub fn canvas_to_world(&self, p: CanvasPoint) -> WorldPoint {
        WorldPoint::new((p.x - self.tx) / self.scale, (p.y - self.ty) / self.scale)
    }

    /// Convert a screen-pixel delta into world units (for drags and resizes).
    #[inline]
    pub fn delta_to_world(&self, delta: ScreenDelta) -> (f64, f64) {
        (delta.dx / self.scale, delta.dy / self.scale)
    }

    /// Shift the translate by a screen-pixel delta (pans are not scaled).
    #[inline]
    pub fn translated(&self, delta: ScreenDelta) -> Camera {
        Camera::new(self.tx + delta.dx, self.ty + delta.dy, self.scale)
    }
}

/// Canvas placement within the window plus its size.
///
/// Together with a [`Camera`] this is everything needed to move between the
/// three coordinate frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Canvas top-left corner in window coordinates
    pub origin: ScreenPoint,
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: ScreenPoint::default(),
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn new(origin: ScreenPoint, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    #[inline]
    pub fn screen_to_canvas(&self, p: ScreenPoint) -> CanvasPoint {
        CanvasPoint::new(p.x - self.origin.x, p.y - self.origin.y)
    }

    #[inline]
    pub fn canvas_to_screen(&self, p: CanvasPoint) -> ScreenPoint {
        ScreenPoint::new(p.x + self.origin.x, p.y + self.origin.y)
    }

    #[inline]
    pub fn screen_to_world(&self, camera: &Camera, p: ScreenPoint) -> WorldPoint {
        camera.canvas_to_world(self.screen_to_canvas(p))
    }

    #[inline]
    pub fn world_to_screen(&self, camera: &Camera, p: WorldPoint) -> ScreenPoint {
        self.canvas_to_screen(camera.world_to_canvas(p))
    }

    /// Center of the canvas area in the canvas frame
    #[inline]
    pub fn center(&self) -> CanvasPoint {
        CanvasPoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// World point currently shown at the center of the canvas
    pub fn world_center(&self, camera: &Camera) -> WorldPoint {
        camera.canvas_to_world(self.center())
    }
}
