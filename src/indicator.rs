//! Editable zoom percentage display.
//!
//! The indicator shows the settled zoom factor as a whole-number percentage
//! and accepts typed levels. Typed levels apply immediately, without
//! animation. Anything unparsable or outside `(0, 1000)` resets to 100%
//! rather than restoring the previous value.

#[cfg(test)]
#[path = "indicator_test.rs"]
mod indicator_test;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::consts::{DEFAULT_ZOOM_LEVEL, MAX_TYPED_ZOOM_LEVEL, ZOOM_PRESETS};
use crate::geometry::ZoomFactor;

/// Receiver of typed zoom levels.
pub trait ZoomLevelTarget {
    /// Apply `percent` immediately, without animation. Returns the factor
    /// actually applied, which may be clamped.
    fn set_zoom_level(&self, percent: u32) -> ZoomFactor;
}

impl<T: ZoomLevelTarget + ?Sized> ZoomLevelTarget for Arc<T> {
    fn set_zoom_level(&self, percent: u32) -> ZoomFactor {
        (**self).set_zoom_level(percent)
    }
}

/// Parse typed zoom text: whitespace anywhere and the first `%` are ignored.
/// Returns `None` unless the result is an integer in `(0, 1000)`.
#[must_use]
pub fn parse_zoom_level(input: &str) -> Option<u32> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.replacen('%', "", 1);
    match digits.parse::<u32>() {
        Ok(level) if level > 0 && level < MAX_TYPED_ZOOM_LEVEL => Some(level),
        _ => None,
    }
}

/// Display text for a factor, e.g. `"150%"`.
#[must_use]
pub fn format_zoom_level(factor: ZoomFactor) -> String {
    format!("{}%", factor.percent())
}

/// Percentage display bound to a zoom-changed channel and a level target.
pub struct ZoomLevelIndicator<T> {
    target: T,
    updates: watch::Receiver<ZoomFactor>,
    text: String,
}

impl<T: ZoomLevelTarget> ZoomLevelIndicator<T> {
    #[must_use]
    pub fn new(target: T, mut updates: watch::Receiver<ZoomFactor>) -> Self {
        let text = format_zoom_level(*updates.borrow_and_update());
        Self { target, updates, text }
    }

    /// Current display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Preset options shown next to the free-text field.
    #[must_use]
    pub fn presets(&self) -> Vec<String> {
        ZOOM_PRESETS.iter().map(|level| format!("{level}%")).collect()
    }

    /// Pull the latest settled factor, if it changed. Returns whether the
    /// text was updated.
    pub fn refresh(&mut self) -> bool {
        if !matches!(self.updates.has_changed(), Ok(true)) {
            return false;
        }
        let factor = *self.updates.borrow_and_update();
        self.text = format_zoom_level(factor);
        true
    }

    /// Commit typed text. Returns the percentage actually applied, after
    /// the target clamps it.
    pub fn commit(&mut self, input: &str) -> u32 {
        let level = if let Some(level) = parse_zoom_level(input) {
            debug!(level, "zoom level entered");
            level
        } else {
            warn!(input, fallback = DEFAULT_ZOOM_LEVEL, "invalid zoom level; resetting");
            DEFAULT_ZOOM_LEVEL
        };
        let applied = self.target.set_zoom_level(level);
        // The channel stays quiet when the applied factor was already published.
        self.updates.mark_unchanged();
        self.text = format_zoom_level(applied);
        applied.percent()
    }
}
