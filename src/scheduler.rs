//! Animation clock.
//!
//! A scheduler drives one [`Animatable`] at a time with monotonically
//! increasing progress values in `[0, 1]`, ending with exactly `1.0`.
//! [`TokioScheduler`] ticks from a tokio task at a fixed frame interval;
//! [`SteppedScheduler`] hands the progress values to whoever owns the frame
//! loop (a host render loop, or a test).

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

use crate::lock;

/// Something that advances with animation progress.
pub trait Animatable: Send + Sync {
    /// Advance to `progress` in `[0, 1]`. Never re-entered concurrently.
    fn tick(&self, progress: f64);
}

/// Host animation clock.
pub trait AnimationScheduler: Send + Sync {
    /// Begin ticking `animation` from progress `0` to `1`.
    fn start(&self, animation: Arc<dyn Animatable>);

    /// Whether any started run has not yet received its final tick.
    fn is_running(&self) -> bool;
}

/// Progress of a run after `elapsed`, capped at `1.0`. A zero duration
/// completes immediately.
#[must_use]
pub fn progress_at(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

// =============================================================================
// TOKIO SCHEDULER
// =============================================================================

/// Ticks each run from a dedicated tokio task at `frame_interval` until
/// `duration` has elapsed.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
    duration: Duration,
    frame_interval: Duration,
    in_flight: Arc<AtomicUsize>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new(handle: Handle, duration: Duration, frame_interval: Duration) -> Self {
        Self {
            handle,
            duration,
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A scheduler on the runtime of the calling task.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn current(duration: Duration, frame_interval: Duration) -> Self {
        Self::new(Handle::current(), duration, frame_interval)
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl AnimationScheduler for TokioScheduler {
    fn start(&self, animation: Arc<dyn Animatable>) {
        let duration = self.duration;
        let frame_interval = self.frame_interval;
        let in_flight = Arc::clone(&self.in_flight);
        in_flight.fetch_add(1, Ordering::SeqCst);
        self.handle.spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(frame_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let progress = progress_at(started.elapsed(), duration);
                if progress >= 1.0 {
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    animation.tick(progress);
                    break;
                }
                animation.tick(progress);
            }
            trace!(duration_ms = duration.as_millis(), "animation run finished");
        });
    }

    fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

// =============================================================================
// STEPPED SCHEDULER
// =============================================================================

/// A scheduler whose ticks are issued explicitly through [`SteppedScheduler::step`].
#[derive(Default)]
pub struct SteppedScheduler {
    active: Mutex<Option<Arc<dyn Animatable>>>,
    runs_started: AtomicUsize,
}

impl SteppedScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick the active animation. A progress of `1.0` or more ends the run.
    /// Returns `false` when nothing was running.
    pub fn step(&self, progress: f64) -> bool {
        let animation = {
            let mut active = lock(&self.active);
            if progress >= 1.0 { active.take() } else { active.clone() }
        };
        match animation {
            Some(animation) => {
                animation.tick(progress);
                true
            }
            None => false,
        }
    }

    /// Tick with `1.0`, completing the active run.
    pub fn finish(&self) -> bool {
        self.step(1.0)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        lock(&self.active).is_some()
    }

    /// How many times [`AnimationScheduler::start`] has been called.
    #[must_use]
    pub fn runs_started(&self) -> usize {
        self.runs_started.load(Ordering::SeqCst)
    }
}

impl AnimationScheduler for SteppedScheduler {
    fn start(&self, animation: Arc<dyn Animatable>) {
        self.runs_started.fetch_add(1, Ordering::SeqCst);
        *lock(&self.active) = Some(animation);
    }

    fn is_running(&self) -> bool {
        self.is_active()
    }
}
