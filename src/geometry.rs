//! Coordinate and zoom value types shared by every other module.
//!
//! Two coordinate spaces are in play. Scene space is the diagram's own
//! logical space and never changes with zoom or scroll. View space is the
//! on-screen pixel space of the visible viewport, with `(0, 0)` at its
//! top-left corner:
//!
//! ```text
//! view = scene * zoom - viewport.origin
//! ```
//!
//! The viewport origin is the scroll offset measured in zoomed content pixels.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in scene (diagram) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
}

impl ScenePoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in view (on-screen pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewPoint {
    pub x: f64,
    pub y: f64,
}

impl ViewPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height, in whatever space the owner documents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The visible rectangle of the canvas.
///
/// `x` / `y` are the scroll offset in zoomed content pixels; `width` /
/// `height` are the on-screen size in view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The same rectangle moved by `(dx, dy)` content pixels.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }

    /// The on-screen size of the viewport.
    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The center of the viewport in view coordinates.
    #[must_use]
    pub fn view_center(self) -> ViewPoint {
        ViewPoint::new(self.width * 0.5, self.height * 0.5)
    }
}

/// A zoom factor: positive and finite, `1.0` being natural scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomFactor(f64);

impl ZoomFactor {
    /// Natural scale.
    pub const ONE: Self = Self(1.0);

    /// Wrap a raw factor, rejecting zero, negatives, NaN and infinities.
    #[must_use]
    pub fn new(factor: f64) -> Option<Self> {
        if factor.is_finite() && factor > 0.0 { Some(Self(factor)) } else { None }
    }

    /// Factor for a whole-number percentage (`150` → `1.5`).
    #[must_use]
    pub fn from_percent(percent: u32) -> Option<Self> {
        Self::new(f64::from(percent) / 100.0)
    }

    /// The raw factor.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// The factor as a rounded whole-number percentage (`1.5` → `150`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Linear interpolation toward `target`; `progress` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, target: Self, progress: f64) -> Self {
        let t = progress.clamp(0.0, 1.0);
        Self(self.0 + t * (target.0 - self.0))
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self::ONE
    }
}

/// Inclusive `[min, max]` range a canvas accepts for its zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    min: ZoomFactor,
    max: ZoomFactor,
}

impl ZoomBounds {
    /// Build bounds; `None` unless `min <= max`.
    #[must_use]
    pub fn new(min: ZoomFactor, max: ZoomFactor) -> Option<Self> {
        if min <= max { Some(Self { min, max }) } else { None }
    }

    #[must_use]
    pub fn min(self) -> ZoomFactor {
        self.min
    }

    #[must_use]
    pub fn max(self) -> ZoomFactor {
        self.max
    }

    /// Clamp a factor into the bounds.
    #[must_use]
    pub fn clamp(self, factor: ZoomFactor) -> ZoomFactor {
        if factor < self.min {
            self.min
        } else if factor > self.max {
            self.max
        } else {
            factor
        }
    }

    /// Clamp a raw computed factor. Non-finite or non-positive values land on
    /// the nearest bound (`min` for zero, negatives and NaN; `max` for +inf).
    #[must_use]
    pub fn clamp_raw(self, factor: f64) -> ZoomFactor {
        match ZoomFactor::new(factor) {
            Some(factor) => self.clamp(factor),
            None if factor.is_infinite() && factor.is_sign_positive() => self.max,
            None => self.min,
        }
    }

    #[must_use]
    pub fn contains(self, factor: ZoomFactor) -> bool {
        self.min <= factor && factor <= self.max
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: ZoomFactor(crate::consts::DEFAULT_ZOOM_MIN),
            max: ZoomFactor(crate::consts::DEFAULT_ZOOM_MAX),
        }
    }
}
