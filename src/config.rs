//! Viewer configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;
use std::time::Duration;

use crate::consts::{
    DEFAULT_FRAME_MS, DEFAULT_PAN_STEP_PX, DEFAULT_ZOOM_ANIMATION_MS, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN,
    DEFAULT_ZOOM_MULTIPLIER,
};
use crate::geometry::{ZoomBounds, ZoomFactor};
use crate::input::{InputSettings, ZoomModifier};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: cannot parse '{value}'")]
    Parse { key: &'static str, value: String },
    #[error("ZOOM_MULTIPLIER must be a finite number greater than 1, got {0}")]
    InvalidMultiplier(f64),
    #[error("zoom bounds must satisfy 0 < ZOOM_MIN <= ZOOM_MAX, got {min}..{max}")]
    InvalidZoomBounds { min: f64, max: f64 },
    #[error("PAN_STEP_PX must be a positive finite number, got {0}")]
    InvalidPanStep(f64),
    #[error("unknown ZOOM_MODIFIER: {0} (expected 'ctrl' or 'meta')")]
    UnknownModifier(String),
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub zoom_multiplier: f64,
    pub zoom_bounds: ZoomBounds,
    pub pan_step_px: f64,
    /// Length of one animated zoom run.
    pub animation: Duration,
    /// Tick spacing of the tokio scheduler.
    pub frame_interval: Duration,
    pub zoom_modifier: ZoomModifier,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_multiplier: DEFAULT_ZOOM_MULTIPLIER,
            zoom_bounds: ZoomBounds::default(),
            pan_step_px: DEFAULT_PAN_STEP_PX,
            animation: Duration::from_millis(DEFAULT_ZOOM_ANIMATION_MS),
            frame_interval: Duration::from_millis(DEFAULT_FRAME_MS),
            zoom_modifier: ZoomModifier::default(),
        }
    }
}

impl ViewerConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `ZOOM_MULTIPLIER`: ratio per zoom step, default 1.1
    /// - `ZOOM_MIN` / `ZOOM_MAX`: zoom limits, default 0.1 / 10.0
    /// - `PAN_STEP_PX`: pan distance per wheel notch, default 64
    /// - `ZOOM_ANIMATION_MS`: zoom run length, default 250
    /// - `ZOOM_FRAME_MS`: scheduler tick spacing, default 16
    /// - `ZOOM_MODIFIER`: `ctrl` (default) or `meta`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let zoom_multiplier = env_parse(get("ZOOM_MULTIPLIER"), "ZOOM_MULTIPLIER", DEFAULT_ZOOM_MULTIPLIER)?;
        if !(zoom_multiplier.is_finite() && zoom_multiplier > 1.0) {
            return Err(ConfigError::InvalidMultiplier(zoom_multiplier));
        }

        let min = env_parse(get("ZOOM_MIN"), "ZOOM_MIN", DEFAULT_ZOOM_MIN)?;
        let max = env_parse(get("ZOOM_MAX"), "ZOOM_MAX", DEFAULT_ZOOM_MAX)?;
        let zoom_bounds = match (ZoomFactor::new(min), ZoomFactor::new(max)) {
            (Some(lo), Some(hi)) => ZoomBounds::new(lo, hi),
            _ => None,
        }
        .ok_or(ConfigError::InvalidZoomBounds { min, max })?;

        let pan_step_px = env_parse(get("PAN_STEP_PX"), "PAN_STEP_PX", DEFAULT_PAN_STEP_PX)?;
        if !(pan_step_px.is_finite() && pan_step_px > 0.0) {
            return Err(ConfigError::InvalidPanStep(pan_step_px));
        }

        let animation_ms = env_parse(get("ZOOM_ANIMATION_MS"), "ZOOM_ANIMATION_MS", DEFAULT_ZOOM_ANIMATION_MS)?;
        let frame_ms = env_parse(get("ZOOM_FRAME_MS"), "ZOOM_FRAME_MS", DEFAULT_FRAME_MS)?;
        let zoom_modifier = parse_modifier(get("ZOOM_MODIFIER").as_deref())?;

        Ok(Self {
            zoom_multiplier,
            zoom_bounds,
            pan_step_px,
            animation: Duration::from_millis(animation_ms),
            frame_interval: Duration::from_millis(frame_ms),
            zoom_modifier,
        })
    }

    /// The subset the wheel controller needs.
    #[must_use]
    pub fn input_settings(&self) -> InputSettings {
        InputSettings {
            zoom_multiplier: self.zoom_multiplier,
            pan_step_px: self.pan_step_px,
            zoom_modifier: self.zoom_modifier,
        }
    }
}

fn env_parse<T: FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) => Ok(value),
        Err(_) => Err(ConfigError::Parse { key, value: raw }),
    }
}

fn parse_modifier(raw: Option<&str>) -> Result<ZoomModifier, ConfigError> {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        None | Some("ctrl" | "control") => Ok(ZoomModifier::Ctrl),
        Some("meta" | "cmd" | "command") => Ok(ZoomModifier::Meta),
        Some(other) => Err(ConfigError::UnknownModifier(other.to_string())),
    }
}
