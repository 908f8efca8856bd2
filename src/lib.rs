//! Animated, pointer-anchored zoom and pan for diagram canvases.
//!
//! The crate owns the view side of a diagram viewer: turning raw wheel input
//! into pan or zoom gestures, animating zoom changes so that the scene point
//! under the pointer stays put, and keeping a percentage indicator in sync
//! with the settled zoom factor. Diagram content, layout and painting belong
//! to the host and reach this crate only through the [`canvas::Canvas`] and
//! [`export::Paint`] traits.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Scene/view points, viewport rectangle, zoom factor and bounds |
//! | [`canvas`] | Scene/view transform collaborator and the in-crate [`canvas::SceneCanvas`] |
//! | [`scheduler`] | Animation clock: tokio-driven and manually stepped schedulers |
//! | [`animator`] | [`animator::ZoomAnimator`], the anchored zoom transition |
//! | [`input`] | Wheel events, modifiers and [`input::ZoomInputController`] |
//! | [`indicator`] | [`indicator::ZoomLevelIndicator`], the editable percentage display |
//! | [`events`] | Typed zoom-changed channel |
//! | [`viewer`] | [`viewer::DiagramViewer`] facade wiring everything together |
//! | [`export`] | Export surfaces (SVG, JSON) and the [`export::Paint`] boundary |
//! | [`config`] | Environment-driven [`config::ViewerConfig`] |
//! | [`consts`] | Shared numeric defaults |

pub mod animator;
pub mod canvas;
pub mod config;
pub mod consts;
pub mod events;
pub mod export;
pub mod geometry;
pub mod indicator;
pub mod input;
pub mod scheduler;
pub mod viewer;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
