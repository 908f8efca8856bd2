//! Anchored zoom animation.
//!
//! DESIGN
//! ======
//! A [`ZoomAnimator`] owns at most one zoom run at a time. A run interpolates
//! linearly from the factor the canvas had when the run began to the latest
//! requested target, and on every tick scrolls the canvas so that the run's
//! anchor point keeps its on-screen position.
//!
//! Retargeting a running animation only moves the target. The source, the
//! anchor and the scheduler clock are left alone, so a burst of wheel notches
//! merges into one continuous run instead of restarting from zero each time.
//!
//! CONCURRENCY
//! ===========
//! `retarget` arrives from input dispatch and `tick` from the scheduler, so
//! the run record sits behind one mutex and source, target and anchor change
//! together. Lock order is always run state, then canvas.

#[cfg(test)]
#[path = "animator_test.rs"]
mod animator_test;

use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, trace};

use crate::canvas::Canvas;
use crate::events::ZoomEvents;
use crate::geometry::{ScenePoint, ZoomFactor};
use crate::lock;
use crate::scheduler::{Animatable, AnimationScheduler};

/// One in-flight zoom transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRun {
    /// Canvas factor when the run began.
    pub source: ZoomFactor,
    /// Factor the run settles on.
    pub target: ZoomFactor,
    /// Scene point held still on screen for the whole run.
    pub anchor: ScenePoint,
}

/// Begin / update / end bookkeeping for the current run.
///
/// `epoch` counts runs so ticks scheduled for an earlier run are recognised
/// and dropped.
#[derive(Debug, Default)]
struct AnimationState {
    run: Option<ZoomRun>,
    epoch: u64,
}

impl AnimationState {
    fn begin(&mut self, run: ZoomRun) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.run = Some(run);
        self.epoch
    }

    /// Move the target of the running run. Returns `false` when idle.
    fn update_target(&mut self, target: ZoomFactor) -> bool {
        match self.run.as_mut() {
            Some(run) => {
                run.target = target;
                true
            }
            None => false,
        }
    }

    fn end(&mut self) -> Option<ZoomRun> {
        self.run.take()
    }

    fn current(&self) -> Option<ZoomRun> {
        self.run
    }
}

/// Animates zoom changes on a shared canvas, keeping an anchor point fixed on screen.
pub struct ZoomAnimator<C> {
    canvas: Arc<Mutex<C>>,
    state: Mutex<AnimationState>,
    scheduler: Arc<dyn AnimationScheduler>,
    events: ZoomEvents,
    this: Weak<Self>,
}

impl<C: Canvas + 'static> ZoomAnimator<C> {
    #[must_use]
    pub fn new(canvas: Arc<Mutex<C>>, scheduler: Arc<dyn AnimationScheduler>, events: ZoomEvents) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            canvas,
            state: Mutex::new(AnimationState::default()),
            scheduler,
            events,
            this: this.clone(),
        })
    }

    /// Request a new target factor.
    ///
    /// When idle this starts a run from the canvas's current factor, anchored
    /// at `anchor` or, without one, at the scene point under the viewport
    /// center. When already running only the target moves.
    ///
    /// `factor` is trusted to be within the canvas bounds.
    pub fn retarget(&self, factor: ZoomFactor, anchor: Option<ScenePoint>) {
        let mut state = lock(&self.state);
        if state.update_target(factor) {
            trace!(target = factor.get(), "zoom run retargeted");
            return;
        }

        let run = {
            let canvas = lock(&self.canvas);
            let anchor = anchor.unwrap_or_else(|| canvas.view_to_scene(canvas.visible_viewport().view_center()));
            ZoomRun { source: canvas.zoom_factor(), target: factor, anchor }
        };
        let epoch = state.begin(run);
        drop(state);

        debug!(
            source = run.source.get(),
            target = run.target.get(),
            anchor_x = run.anchor.x,
            anchor_y = run.anchor.y,
            "zoom run started"
        );
        self.scheduler.start(Arc::new(RunDriver { animator: self.this.clone(), epoch }));
    }

    /// The factor the canvas is heading to: the run's target while running,
    /// the canvas's current factor otherwise.
    #[must_use]
    pub fn target_zoom(&self) -> ZoomFactor {
        let state = lock(&self.state);
        match state.current() {
            Some(run) => run.target,
            None => lock(&self.canvas).zoom_factor(),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        lock(&self.state).current().is_some()
    }

    /// Snapshot of the in-flight run, if any.
    #[must_use]
    pub fn run(&self) -> Option<ZoomRun> {
        lock(&self.state).current()
    }

    /// Apply `factor` immediately, ending any run in progress, and keep the
    /// scene point under the viewport center where it is.
    pub fn jump_to(&self, factor: ZoomFactor) {
        let mut state = lock(&self.state);
        if let Some(run) = state.end() {
            debug!(target = run.target.get(), "zoom run superseded by immediate zoom");
        }
        {
            let mut canvas = lock(&self.canvas);
            let anchor = canvas.view_to_scene(canvas.visible_viewport().view_center());
            apply_anchored_zoom(&mut *canvas, factor, anchor);
        }
        drop(state);
        self.events.publish(factor);
    }

    /// Advance run `epoch` to `progress`. Ticks for any other run are ignored.
    fn tick_run(&self, epoch: u64, progress: f64) {
        let mut state = lock(&self.state);
        let Some(run) = state.current().filter(|_| state.epoch == epoch) else {
            trace!(progress, epoch, "stale zoom tick dropped");
            return;
        };

        let settled = progress >= 1.0;
        let zoom = if settled { run.target } else { run.source.lerp(run.target, progress) };
        apply_anchored_zoom(&mut *lock(&self.canvas), zoom, run.anchor);

        if settled {
            state.end();
            drop(state);
            debug!(zoom = zoom.get(), "zoom run settled");
            self.events.publish(zoom);
        }
    }
}

/// The scheduler-facing handle for a single run.
///
/// Holds the animator weakly: a scheduler may keep a finished or superseded
/// driver around, and that must not keep the animator alive.
struct RunDriver<C> {
    animator: Weak<ZoomAnimator<C>>,
    epoch: u64,
}

impl<C: Canvas + 'static> Animatable for RunDriver<C> {
    fn tick(&self, progress: f64) {
        match self.animator.upgrade() {
            Some(animator) => animator.tick_run(self.epoch, progress),
            None => trace!(progress, epoch = self.epoch, "zoom tick after animator dropped"),
        }
    }
}

/// Set `zoom` on the canvas and scroll so `anchor` keeps its view position.
fn apply_anchored_zoom<C: Canvas + ?Sized>(canvas: &mut C, zoom: ZoomFactor, anchor: ScenePoint) {
    let old_view_anchor = canvas.scene_to_view(anchor);
    let viewport = canvas.visible_viewport();
    canvas.set_zoom_factor(zoom);
    let new_view_anchor = canvas.scene_to_view(anchor);
    canvas.scroll_to(viewport.translated(new_view_anchor.x - old_view_anchor.x, new_view_anchor.y - old_view_anchor.y));
}
