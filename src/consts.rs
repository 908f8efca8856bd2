//! Shared numeric constants for the zoom controller.

// ── Zoom ────────────────────────────────────────────────────────

/// Ratio applied per wheel event (or toolbar step) when zooming.
pub const DEFAULT_ZOOM_MULTIPLIER: f64 = 1.1;

/// Smallest zoom factor a canvas accepts by default.
pub const DEFAULT_ZOOM_MIN: f64 = 0.1;

/// Largest zoom factor a canvas accepts by default.
pub const DEFAULT_ZOOM_MAX: f64 = 10.0;

// ── Panning ─────────────────────────────────────────────────────

/// Scroll distance in view pixels for one wheel notch.
pub const DEFAULT_PAN_STEP_PX: f64 = 64.0;

// ── Animation ───────────────────────────────────────────────────

/// Duration of one zoom run, start to settle.
pub const DEFAULT_ZOOM_ANIMATION_MS: u64 = 250;

/// Interval between animation ticks (roughly 60 fps).
pub const DEFAULT_FRAME_MS: u64 = 16;

// ── Indicator ───────────────────────────────────────────────────

/// Preset zoom levels offered by the indicator, in percent.
pub const ZOOM_PRESETS: [u32; 8] = [25, 50, 75, 100, 125, 150, 200, 300];

/// Level the indicator falls back to on invalid input, in percent.
pub const DEFAULT_ZOOM_LEVEL: u32 = 100;

/// Exclusive upper limit for typed zoom levels, in percent.
pub const MAX_TYPED_ZOOM_LEVEL: u32 = 1000;
