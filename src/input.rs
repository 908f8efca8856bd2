//! Wheel input: events, modifier keys, and the pan-vs-zoom controller.
//!
//! A wheel event is either a pan or a zoom, never both. Without the zoom
//! modifier the wheel scrolls the viewport (Shift turns vertical scrolling
//! horizontal); with it, the wheel zooms by one multiplier step anchored at
//! the pointer.
//!
//! A multi-notch event applies the multiplier once, not once per notch, so
//! trackpads reporting large deltas do not compound into runaway zoom. Pan
//! offsets do scale with the notch count.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::animator::ZoomAnimator;
use crate::canvas::Canvas;
use crate::consts::{DEFAULT_PAN_STEP_PX, DEFAULT_ZOOM_MULTIPLIER};
use crate::geometry::{ScenePoint, ViewPoint, ZoomFactor};
use crate::lock;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Which key turns the wheel into a zoom gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomModifier {
    /// Ctrl (Windows / Linux convention).
    #[default]
    Ctrl,
    /// Meta / Command (macOS convention).
    Meta,
}

impl ZoomModifier {
    /// Whether `modifiers` includes this key. Other keys may be held too.
    #[must_use]
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Ctrl => modifiers.ctrl,
            Self::Meta => modifiers.meta,
        }
    }
}

/// Axis the input device reported the rotation on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelAxis {
    #[default]
    Vertical,
    Horizontal,
}

/// One wheel event.
#[derive(Debug, Clone, Copy)]
pub struct WheelEvent {
    /// Signed notch count; negative is "up" / away from the user.
    pub delta: i32,
    /// Pointer position in view coordinates.
    pub position: ViewPoint,
    pub axis: WheelAxis,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// A vertical wheel event with no modifiers held.
    #[must_use]
    pub fn vertical(delta: i32, position: ViewPoint) -> Self {
        Self { delta, position, axis: WheelAxis::Vertical, modifiers: Modifiers::default() }
    }

    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    #[must_use]
    pub fn with_axis(self, axis: WheelAxis) -> Self {
        Self { axis, ..self }
    }
}

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// What the controller did with a wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelOutcome {
    /// Viewport scrolled by `offset` content pixels along `axis` (before clamping).
    Panned { axis: WheelAxis, offset: f64 },
    /// Zoom retargeted to `target`, anchored at the scene point under the pointer.
    Zoomed { target: ZoomFactor, anchor: ScenePoint },
    /// Zero delta: nothing changed, but the event is still handled.
    Consumed,
    /// Modifier combination the controller does not handle; pass it on.
    Rejected,
}

impl WheelOutcome {
    /// Whether the host should stop propagating the event.
    #[must_use]
    pub fn is_consumed(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Tuning for [`ZoomInputController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSettings {
    /// Ratio per zoom step; must be greater than `1.0`.
    pub zoom_multiplier: f64,
    /// Pan distance per notch, in view pixels.
    pub pan_step_px: f64,
    pub zoom_modifier: ZoomModifier,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            zoom_multiplier: DEFAULT_ZOOM_MULTIPLIER,
            pan_step_px: DEFAULT_PAN_STEP_PX,
            zoom_modifier: ZoomModifier::default(),
        }
    }
}

/// Turns wheel events into pans or anchored zoom requests.
pub struct ZoomInputController<C> {
    canvas: Arc<Mutex<C>>,
    animator: Arc<ZoomAnimator<C>>,
    settings: InputSettings,
}

impl<C: Canvas + 'static> ZoomInputController<C> {
    #[must_use]
    pub fn new(canvas: Arc<Mutex<C>>, animator: Arc<ZoomAnimator<C>>, settings: InputSettings) -> Self {
        Self { canvas, animator, settings }
    }

    #[must_use]
    pub fn settings(&self) -> InputSettings {
        self.settings
    }

    /// Classify and apply one wheel event.
    pub fn on_wheel(&self, event: WheelEvent) -> WheelOutcome {
        let outcome = if self.settings.zoom_modifier.is_held(event.modifiers) {
            self.zoom_from_wheel(event)
        } else {
            self.pan_from_wheel(event)
        };
        trace!(delta = event.delta, x = event.position.x, y = event.position.y, ?outcome, "wheel event");
        outcome
    }

    /// Zoom one step toward `direction`, compounding on the in-flight target.
    /// Without an anchor the run centers on the viewport.
    pub fn zoom_step(&self, direction: ZoomDirection, anchor: Option<ScenePoint>) -> ZoomFactor {
        let base = self.animator.target_zoom().get();
        let raw = match direction {
            ZoomDirection::In => base * self.settings.zoom_multiplier,
            ZoomDirection::Out => base / self.settings.zoom_multiplier,
        };
        let target = lock(&self.canvas).zoom_bounds().clamp_raw(raw);
        self.animator.retarget(target, anchor);
        target
    }

    fn zoom_from_wheel(&self, event: WheelEvent) -> WheelOutcome {
        let direction = match event.delta.signum() {
            -1 => ZoomDirection::In,
            1 => ZoomDirection::Out,
            _ => return WheelOutcome::Consumed,
        };
        let anchor = lock(&self.canvas).view_to_scene(event.position);
        let target = self.zoom_step(direction, Some(anchor));
        WheelOutcome::Zoomed { target, anchor }
    }

    fn pan_from_wheel(&self, event: WheelEvent) -> WheelOutcome {
        let Modifiers { shift, ctrl, alt, .. } = event.modifiers;
        let axis = match (shift, ctrl, alt) {
            (false, false, false) => event.axis,
            (true, false, false) => WheelAxis::Horizontal,
            _ => return WheelOutcome::Rejected,
        };
        if event.delta == 0 {
            return WheelOutcome::Consumed;
        }

        let offset = f64::from(event.delta) * self.settings.pan_step_px;
        let mut canvas = lock(&self.canvas);
        let viewport = canvas.visible_viewport();
        let moved = match axis {
            WheelAxis::Vertical => viewport.translated(0.0, offset),
            WheelAxis::Horizontal => viewport.translated(offset, 0.0),
        };
        canvas.scroll_to(moved);
        WheelOutcome::Panned { axis, offset }
    }
}
