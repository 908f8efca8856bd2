//! The scene/view transform collaborator and its in-crate implementation.
//!
//! [`Canvas`] is the boundary the zoom controller drives: coordinate
//! conversion, the zoom factor and the visible viewport. Hosts with their
//! own scroll container implement it directly; [`SceneCanvas`] is a plain
//! model of a scrollable, zoomable canvas for hosts that render themselves.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use crate::geometry::{ScenePoint, Size, ViewPoint, Viewport, ZoomBounds, ZoomFactor};

/// A zoomable, scrollable canvas.
pub trait Canvas: Send {
    /// Project a scene point into view coordinates at the current zoom/scroll.
    fn scene_to_view(&self, point: ScenePoint) -> ViewPoint;

    /// Inverse of [`Canvas::scene_to_view`].
    fn view_to_scene(&self, point: ViewPoint) -> ScenePoint;

    /// The factor currently applied to the transform.
    fn zoom_factor(&self) -> ZoomFactor;

    /// Replace the zoom factor. Does not scroll; callers follow up with
    /// [`Canvas::scroll_to`] when the visible region should move.
    fn set_zoom_factor(&mut self, factor: ZoomFactor);

    /// The configured zoom limits.
    fn zoom_bounds(&self) -> ZoomBounds;

    /// The currently visible rectangle.
    fn visible_viewport(&self) -> Viewport;

    /// Scroll so that `viewport`'s origin becomes the visible origin, clamped
    /// to the scrollable range.
    fn scroll_to(&mut self, viewport: Viewport);

    fn zoom_min_factor(&self) -> ZoomFactor {
        self.zoom_bounds().min()
    }

    fn zoom_max_factor(&self) -> ZoomFactor {
        self.zoom_bounds().max()
    }
}

/// Zoom + scroll state over a content area of fixed scene size.
///
/// The scrollable range along each axis is `[0, content * zoom - viewport]`,
/// collapsing to `0` when the zoomed content fits on screen.
#[derive(Debug, Clone)]
pub struct SceneCanvas {
    zoom: ZoomFactor,
    bounds: ZoomBounds,
    content: Size,
    viewport: Viewport,
}

impl SceneCanvas {
    /// A canvas at natural scale, scrolled to the top-left corner.
    #[must_use]
    pub fn new(content: Size, screen: Size, bounds: ZoomBounds) -> Self {
        Self {
            zoom: bounds.clamp(ZoomFactor::ONE),
            bounds,
            content,
            viewport: Viewport::new(0.0, 0.0, screen.width, screen.height),
        }
    }

    /// Scene-space size of the diagram.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content
    }

    /// Replace the diagram size (after a relayout) and re-clamp the scroll offset.
    pub fn set_content_size(&mut self, content: Size) {
        self.content = content;
        self.scroll_to(self.viewport);
    }

    /// Resize the on-screen viewport and re-clamp the scroll offset.
    pub fn resize(&mut self, screen: Size) {
        self.viewport.width = screen.width;
        self.viewport.height = screen.height;
        self.scroll_to(self.viewport);
    }

    /// Largest scroll offset along each axis at the current zoom.
    #[must_use]
    pub fn max_scroll(&self) -> (f64, f64) {
        let zoom = self.zoom.get();
        let max_x = (self.content.width * zoom - self.viewport.width).max(0.0);
        let max_y = (self.content.height * zoom - self.viewport.height).max(0.0);
        (max_x, max_y)
    }
}

impl Canvas for SceneCanvas {
    fn scene_to_view(&self, point: ScenePoint) -> ViewPoint {
        let zoom = self.zoom.get();
        ViewPoint::new(point.x * zoom - self.viewport.x, point.y * zoom - self.viewport.y)
    }

    fn view_to_scene(&self, point: ViewPoint) -> ScenePoint {
        let zoom = self.zoom.get();
        ScenePoint::new((point.x + self.viewport.x) / zoom, (point.y + self.viewport.y) / zoom)
    }

    fn zoom_factor(&self) -> ZoomFactor {
        self.zoom
    }

    fn set_zoom_factor(&mut self, factor: ZoomFactor) {
        self.zoom = factor;
    }

    fn zoom_bounds(&self) -> ZoomBounds {
        self.bounds
    }

    fn visible_viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, viewport: Viewport) {
        let (max_x, max_y) = self.max_scroll();
        self.viewport.x = viewport.x.clamp(0.0, max_x);
        self.viewport.y = viewport.y.clamp(0.0, max_y);
    }
}
