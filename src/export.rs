//! Export: the painting boundary plus SVG and JSON writers.
//!
//! The host owns diagram content and paints it through [`Paint`] onto a
//! [`Surface`] in scene units. Export records one pass into a
//! [`DisplayList`] and serialises it. The output format is picked from the
//! file extension.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::geometry::{ScenePoint, Size, ZoomFactor};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format for {}: expected .svg or .json", .path.display())]
    UnknownExtension { path: PathBuf },
    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("export serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// PAINTING BOUNDARY
// =============================================================================

/// Drawing primitives, in scene units.
pub trait Surface {
    fn rect(&mut self, origin: ScenePoint, size: Size);
    fn line(&mut self, from: ScenePoint, to: ScenePoint);
    fn text(&mut self, at: ScenePoint, text: &str);
}

/// Diagram content that can paint itself.
pub trait Paint {
    /// Scene-space extent of everything [`Paint::paint`] draws.
    fn bounds(&self) -> Size;
    fn paint(&self, surface: &mut dyn Surface);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Rect { origin: ScenePoint, size: Size },
    Line { from: ScenePoint, to: ScenePoint },
    Text { at: ScenePoint, text: String },
}

/// A [`Surface`] that records operations in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Run one paint pass of `painter` into a fresh list.
    #[must_use]
    pub fn record(painter: &dyn Paint) -> Self {
        let mut list = Self::default();
        painter.paint(&mut list);
        list
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

impl Surface for DisplayList {
    fn rect(&mut self, origin: ScenePoint, size: Size) {
        self.ops.push(DrawOp::Rect { origin, size });
    }

    fn line(&mut self, from: ScenePoint, to: ScenePoint) {
        self.ops.push(DrawOp::Line { from, to });
    }

    fn text(&mut self, at: ScenePoint, text: &str) {
        self.ops.push(DrawOp::Text { at, text: text.to_string() });
    }
}

// =============================================================================
// FORMATS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Json,
}

impl ExportFormat {
    /// Pick the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("json") => Ok(Self::Json),
            _ => Err(ExportError::UnknownExtension { path: path.to_path_buf() }),
        }
    }
}

/// JSON document layout.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDocument {
    pub zoom: f64,
    pub bounds: Size,
    pub ops: Vec<DrawOp>,
}

/// Render `list` as a standalone SVG document.
///
/// The drawing keeps scene units through `viewBox`; the outer width and
/// height are scaled by `zoom` so the file opens at the on-screen size.
#[must_use]
pub fn render_svg(list: &DisplayList, bounds: Size, zoom: ZoomFactor) -> String {
    let z = zoom.get();
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
        bounds.width * z,
        bounds.height * z,
        bounds.width,
        bounds.height
    );
    for op in list.ops() {
        let element = match op {
            DrawOp::Rect { origin, size } => format!(
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"black\"/>\n",
                origin.x, origin.y, size.width, size.height
            ),
            DrawOp::Line { from, to } => format!(
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\"/>\n",
                from.x, from.y, to.x, to.y
            ),
            DrawOp::Text { at, text } => {
                format!("  <text x=\"{}\" y=\"{}\">{}</text>\n", at.x, at.y, escape_xml(text))
            }
        };
        out.push_str(&element);
    }
    out.push_str("</svg>\n");
    out
}

/// Render `list` as pretty-printed JSON.
pub fn render_json(list: &DisplayList, bounds: Size, zoom: ZoomFactor) -> Result<String, ExportError> {
    let doc = JsonDocument { zoom: zoom.get(), bounds, ops: list.ops.clone() };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Paint `painter` once and write it to `path` in the format its extension
/// names. Returns the format written.
pub fn export_to_path(path: &Path, painter: &dyn Paint, zoom: ZoomFactor) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let list = DisplayList::record(painter);
    let bounds = painter.bounds();
    let body = match format {
        ExportFormat::Svg => render_svg(&list, bounds, zoom),
        ExportFormat::Json => render_json(&list, bounds, zoom)?,
    };
    fs::write(path, body)?;
    info!(path = %path.display(), ?format, ops = list.ops().len(), zoom = zoom.get(), "diagram exported");
    Ok(format)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
