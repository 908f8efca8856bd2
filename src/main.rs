use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use zoomview::canvas::{Canvas, SceneCanvas};
use zoomview::config::ViewerConfig;
use zoomview::export::{Paint, Surface};
use zoomview::geometry::{ScenePoint, Size, ViewPoint};
use zoomview::indicator::ZoomLevelIndicator;
use zoomview::input::{Modifiers, WheelEvent, ZoomModifier};
use zoomview::scheduler::TokioScheduler;
use zoomview::viewer::DiagramViewer;

const SCREEN: Size = Size { width: 800.0, height: 600.0 };

/// A small node-and-edge diagram for the scripted session.
struct DemoDiagram;

impl Paint for DemoDiagram {
    fn bounds(&self) -> Size {
        Size::new(1600.0, 1200.0)
    }

    fn paint(&self, surface: &mut dyn Surface) {
        let nodes = [(100.0, 100.0, "source"), (700.0, 500.0, "filter"), (1300.0, 900.0, "sink")];
        for pair in nodes.windows(2) {
            let (x1, y1, _) = pair[0];
            let (x2, y2, _) = pair[1];
            surface.line(ScenePoint::new(x1 + 80.0, y1 + 30.0), ScenePoint::new(x2 + 80.0, y2 + 30.0));
        }
        for (x, y, label) in nodes {
            surface.rect(ScenePoint::new(x, y), Size::new(160.0, 60.0));
            surface.text(ScenePoint::new(x + 12.0, y + 36.0), label);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match ViewerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        multiplier = config.zoom_multiplier,
        animation_ms = config.animation.as_millis(),
        modifier = ?config.zoom_modifier,
        "zoomview demo starting"
    );

    let canvas = SceneCanvas::new(DemoDiagram.bounds(), SCREEN, config.zoom_bounds);
    let scheduler = Arc::new(TokioScheduler::current(config.animation, config.frame_interval));
    let viewer = Arc::new(DiagramViewer::new(canvas, scheduler, config.input_settings()));
    let mut indicator = ZoomLevelIndicator::new(Arc::clone(&viewer), viewer.subscribe());
    let mut settled = viewer.subscribe();

    let zoom_keys = match config.zoom_modifier {
        ZoomModifier::Ctrl => Modifiers { ctrl: true, ..Modifiers::default() },
        ZoomModifier::Meta => Modifiers { meta: true, ..Modifiers::default() },
    };
    let pointer = ViewPoint::new(500.0, 350.0);
    let script = [
        WheelEvent::vertical(3, pointer),
        WheelEvent::vertical(2, pointer).with_modifiers(Modifiers { shift: true, ..Modifiers::default() }),
        WheelEvent::vertical(-1, pointer).with_modifiers(zoom_keys),
        WheelEvent::vertical(-1, pointer).with_modifiers(zoom_keys),
        WheelEvent::vertical(-1, pointer).with_modifiers(zoom_keys),
    ];
    for event in script {
        let outcome = viewer.on_wheel(event);
        tracing::info!(delta = event.delta, ?outcome, "wheel");
    }

    let wait = config.animation + Duration::from_secs(1);
    match tokio::time::timeout(wait, settled.changed()).await {
        Ok(Ok(())) => {
            indicator.refresh();
            tracing::info!(level = indicator.text(), "zoom settled");
        }
        Ok(Err(e)) => tracing::warn!(error = %e, "zoom channel closed"),
        Err(_) => tracing::warn!(waited_ms = wait.as_millis(), "zoom did not settle in time"),
    }

    let applied = indicator.commit(" 150 % ");
    let viewport = viewer.with_canvas(|c| c.visible_viewport());
    tracing::info!(applied, zoom = viewer.zoom_level(), x = viewport.x, y = viewport.y, "typed zoom level applied");

    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        match viewer.export(&path, &DemoDiagram) {
            Ok(format) => tracing::info!(path = %path.display(), ?format, "export complete"),
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "export failed");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
