//! Diagram viewer facade.
//!
//! [`DiagramViewer`] owns the shared canvas, the zoom animator, the wheel
//! controller and the zoom-changed channel, and exposes the toolbar-level
//! commands: step zoom, typed zoom level, current level and export.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::debug;

use crate::animator::ZoomAnimator;
use crate::canvas::Canvas;
use crate::events::ZoomEvents;
use crate::export::{self, ExportError, ExportFormat, Paint};
use crate::geometry::ZoomFactor;
use crate::indicator::ZoomLevelTarget;
use crate::input::{InputSettings, WheelEvent, WheelOutcome, ZoomDirection, ZoomInputController};
use crate::lock;
use crate::scheduler::AnimationScheduler;

pub struct DiagramViewer<C> {
    canvas: Arc<Mutex<C>>,
    animator: Arc<ZoomAnimator<C>>,
    input: ZoomInputController<C>,
    events: ZoomEvents,
}

impl<C: Canvas + 'static> DiagramViewer<C> {
    #[must_use]
    pub fn new(canvas: C, scheduler: Arc<dyn AnimationScheduler>, settings: InputSettings) -> Self {
        let events = ZoomEvents::new(canvas.zoom_factor());
        let canvas = Arc::new(Mutex::new(canvas));
        let animator = ZoomAnimator::new(Arc::clone(&canvas), scheduler, events.clone());
        let input = ZoomInputController::new(Arc::clone(&canvas), Arc::clone(&animator), settings);
        Self { canvas, animator, input, events }
    }

    pub fn on_wheel(&self, event: WheelEvent) -> WheelOutcome {
        self.input.on_wheel(event)
    }

    /// Animated zoom in by one step around the viewport center.
    pub fn zoom_in(&self) -> ZoomFactor {
        self.input.zoom_step(ZoomDirection::In, None)
    }

    /// Animated zoom out by one step around the viewport center.
    pub fn zoom_out(&self) -> ZoomFactor {
        self.input.zoom_step(ZoomDirection::Out, None)
    }

    /// Jump to `percent` without animation, clamped to the canvas bounds.
    /// Returns the factor applied.
    pub fn set_zoom_level(&self, percent: u32) -> ZoomFactor {
        let factor = lock(&self.canvas).zoom_bounds().clamp_raw(f64::from(percent) / 100.0);
        debug!(percent, factor = factor.get(), "zoom level set");
        self.animator.jump_to(factor);
        factor
    }

    /// Current factor as a rounded percentage.
    #[must_use]
    pub fn zoom_level(&self) -> u32 {
        self.zoom_factor().percent()
    }

    #[must_use]
    pub fn zoom_factor(&self) -> ZoomFactor {
        lock(&self.canvas).zoom_factor()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Settled-zoom notifications.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ZoomFactor> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn animator(&self) -> &Arc<ZoomAnimator<C>> {
        &self.animator
    }

    /// Run `f` with exclusive access to the canvas, e.g. to resize it.
    ///
    /// The canvas lock is held while `f` runs, so `f` must not call back
    /// into this viewer, its animator or its indicator; doing so deadlocks.
    /// Read what you need inside `f` and act on it after it returns.
    pub fn with_canvas<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut lock(&self.canvas))
    }

    /// Paint `painter` at the last settled zoom and write it to `path`.
    pub fn export(&self, path: &Path, painter: &dyn Paint) -> Result<ExportFormat, ExportError> {
        export::export_to_path(path, painter, self.events.latest())
    }
}

impl<C: Canvas + 'static> ZoomLevelTarget for DiagramViewer<C> {
    fn set_zoom_level(&self, percent: u32) -> ZoomFactor {
        DiagramViewer::set_zoom_level(self, percent)
    }
}
