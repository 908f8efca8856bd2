#![allow(clippy::float_cmp)]

use super::*;
use crate::canvas::SceneCanvas;
use crate::events::ZoomEvents;
use crate::geometry::{Size, Viewport, ZoomBounds};
use crate::scheduler::SteppedScheduler;

// =============================================================
// Helpers
// =============================================================

struct Rig {
    canvas: Arc<Mutex<SceneCanvas>>,
    scheduler: Arc<SteppedScheduler>,
    animator: Arc<ZoomAnimator<SceneCanvas>>,
    input: ZoomInputController<SceneCanvas>,
}

fn rig_with(content: Size, screen: Size, settings: InputSettings) -> Rig {
    let canvas = Arc::new(Mutex::new(SceneCanvas::new(content, screen, ZoomBounds::default())));
    let scheduler = Arc::new(SteppedScheduler::new());
    let animator = ZoomAnimator::new(Arc::clone(&canvas), scheduler.clone(), ZoomEvents::new(ZoomFactor::ONE));
    let input = ZoomInputController::new(Arc::clone(&canvas), Arc::clone(&animator), settings);
    Rig { canvas, scheduler, animator, input }
}

fn big_rig() -> Rig {
    let rig = rig_with(Size::new(4000.0, 3000.0), Size::new(800.0, 600.0), InputSettings::default());
    rig.canvas.lock().unwrap().scroll_to(Viewport::new(600.0, 400.0, 800.0, 600.0));
    rig
}

fn zf(f: f64) -> ZoomFactor {
    ZoomFactor::new(f).unwrap()
}

fn pt(x: f64, y: f64) -> ViewPoint {
    ViewPoint::new(x, y)
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Modifiers::default() }
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Modifiers::default() }
}

fn viewport(rig: &Rig) -> Viewport {
    rig.canvas.lock().unwrap().visible_viewport()
}

fn zoom(rig: &Rig) -> ZoomFactor {
    rig.canvas.lock().unwrap().zoom_factor()
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

#[test]
fn zoom_modifier_checks_its_own_key() {
    assert!(ZoomModifier::Ctrl.is_held(ctrl()));
    assert!(!ZoomModifier::Meta.is_held(ctrl()));
    assert!(ZoomModifier::Meta.is_held(Modifiers { meta: true, shift: true, ..Modifiers::default() }));
}

#[test]
fn outcome_consumption() {
    assert!(WheelOutcome::Consumed.is_consumed());
    assert!(WheelOutcome::Panned { axis: WheelAxis::Vertical, offset: 1.0 }.is_consumed());
    assert!(!WheelOutcome::Rejected.is_consumed());
}

// =============================================================
// Pan
// =============================================================

#[test]
fn wheel_without_modifier_pans_vertically() {
    let rig = big_rig();
    let outcome = rig.input.on_wheel(WheelEvent::vertical(2, pt(10.0, 10.0)));
    assert_eq!(outcome, WheelOutcome::Panned { axis: WheelAxis::Vertical, offset: 128.0 });
    let vp = viewport(&rig);
    assert_eq!((vp.x, vp.y), (600.0, 528.0));
}

#[test]
fn wheel_up_pans_toward_origin_and_clamps() {
    let rig = big_rig();
    rig.input.on_wheel(WheelEvent::vertical(-100, pt(10.0, 10.0)));
    let vp = viewport(&rig);
    assert_eq!((vp.x, vp.y), (600.0, 0.0));
}

#[test]
fn shift_turns_vertical_wheel_horizontal() {
    let rig = big_rig();
    let outcome = rig.input.on_wheel(WheelEvent::vertical(1, pt(0.0, 0.0)).with_modifiers(shift()));
    assert_eq!(outcome, WheelOutcome::Panned { axis: WheelAxis::Horizontal, offset: 64.0 });
    let vp = viewport(&rig);
    assert_eq!((vp.x, vp.y), (664.0, 400.0));
}

#[test]
fn horizontal_axis_pans_horizontally() {
    let rig = big_rig();
    rig.input.on_wheel(WheelEvent::vertical(-1, pt(0.0, 0.0)).with_axis(WheelAxis::Horizontal));
    let vp = viewport(&rig);
    assert_eq!((vp.x, vp.y), (536.0, 400.0));
}

#[test]
fn pan_step_is_configurable() {
    let settings = InputSettings { pan_step_px: 10.0, ..InputSettings::default() };
    let rig = rig_with(Size::new(4000.0, 3000.0), Size::new(800.0, 600.0), settings);
    rig.input.on_wheel(WheelEvent::vertical(3, pt(0.0, 0.0)));
    assert_eq!(viewport(&rig).y, 30.0);
}

#[test]
fn alt_wheel_is_rejected() {
    let rig = big_rig();
    let alt = Modifiers { alt: true, ..Modifiers::default() };
    let outcome = rig.input.on_wheel(WheelEvent::vertical(1, pt(0.0, 0.0)).with_modifiers(alt));
    assert_eq!(outcome, WheelOutcome::Rejected);
    let vp = viewport(&rig);
    assert_eq!((vp.x, vp.y), (600.0, 400.0));
}

#[test]
fn ctrl_wheel_is_rejected_when_zoom_key_is_meta() {
    let settings = InputSettings { zoom_modifier: ZoomModifier::Meta, ..InputSettings::default() };
    let rig = rig_with(Size::new(4000.0, 3000.0), Size::new(800.0, 600.0), settings);
    let outcome = rig.input.on_wheel(WheelEvent::vertical(-1, pt(0.0, 0.0)).with_modifiers(ctrl()));
    assert_eq!(outcome, WheelOutcome::Rejected);
    assert!(!rig.animator.is_running());
}

#[test]
fn zero_delta_pan_is_consumed_noop() {
    let rig = big_rig();
    assert_eq!(rig.input.on_wheel(WheelEvent::vertical(0, pt(0.0, 0.0))), WheelOutcome::Consumed);
    let vp = viewport(&rig);
    assert_eq!((vp.x, vp.y), (600.0, 400.0));
}

#[test]
fn pan_never_changes_zoom() {
    let rig = big_rig();
    for delta in [-3, -1, 1, 5] {
        rig.input.on_wheel(WheelEvent::vertical(delta, pt(100.0, 100.0)));
        rig.input.on_wheel(WheelEvent::vertical(delta, pt(100.0, 100.0)).with_modifiers(shift()));
    }
    assert_eq!(zoom(&rig), ZoomFactor::ONE);
    assert!(!rig.animator.is_running());
    assert_eq!(rig.scheduler.runs_started(), 0);
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn ctrl_wheel_up_zooms_in_at_pointer() {
    let rig = rig_with(Size::new(400.0, 400.0), Size::new(400.0, 400.0), InputSettings::default());
    let outcome = rig.input.on_wheel(WheelEvent::vertical(-1, pt(200.0, 200.0)).with_modifiers(ctrl()));
    assert_eq!(outcome, WheelOutcome::Zoomed { target: zf(1.1), anchor: ScenePoint::new(200.0, 200.0) });

    rig.scheduler.finish();
    assert_eq!(zoom(&rig), zf(1.1));
    let view = rig.canvas.lock().unwrap().scene_to_view(ScenePoint::new(200.0, 200.0));
    assert!((view.x - 200.0).abs() < 1e-9);
    assert!((view.y - 200.0).abs() < 1e-9);
}

#[test]
fn ctrl_wheel_down_zooms_out() {
    let rig = big_rig();
    let outcome = rig.input.on_wheel(WheelEvent::vertical(1, pt(400.0, 300.0)).with_modifiers(ctrl()));
    let WheelOutcome::Zoomed { target, .. } = outcome else {
        panic!("expected zoom, got {outcome:?}");
    };
    assert_eq!(target, zf(1.0 / 1.1));
}

#[test]
fn zoom_request_does_not_scroll_before_ticks() {
    let rig = big_rig();
    rig.input.on_wheel(WheelEvent::vertical(-1, pt(100.0, 100.0)).with_modifiers(ctrl()));
    let vp = viewport(&rig);
    assert_eq!((vp.x, vp.y), (600.0, 400.0));
    assert_eq!(zoom(&rig), ZoomFactor::ONE);
    assert!(rig.animator.is_running());
}

#[test]
fn anchor_is_pointer_in_scene_space() {
    let rig = big_rig();
    let outcome = rig.input.on_wheel(WheelEvent::vertical(-1, pt(100.0, 50.0)).with_modifiers(ctrl()));
    let WheelOutcome::Zoomed { anchor, .. } = outcome else {
        panic!("expected zoom, got {outcome:?}");
    };
    assert_eq!(anchor, ScenePoint::new(700.0, 450.0));
    assert_eq!(rig.animator.run().unwrap().anchor, anchor);
}

#[test]
fn multi_notch_event_applies_multiplier_once() {
    let rig = big_rig();
    rig.input.on_wheel(WheelEvent::vertical(-5, pt(100.0, 100.0)).with_modifiers(ctrl()));
    assert_eq!(rig.animator.target_zoom(), zf(1.1));
}

#[test]
fn rapid_notches_compound_on_inflight_target() {
    let rig = big_rig();
    for _ in 0..3 {
        rig.input.on_wheel(WheelEvent::vertical(-1, pt(100.0, 100.0)).with_modifiers(ctrl()));
        rig.scheduler.step(0.1);
    }
    assert_eq!(rig.animator.target_zoom(), zf(1.1 * 1.1 * 1.1));
    assert_eq!(rig.scheduler.runs_started(), 1);

    rig.scheduler.finish();
    assert_eq!(zoom(&rig), zf(1.1 * 1.1 * 1.1));
}

#[test]
fn zero_delta_zoom_is_consumed_noop() {
    let rig = big_rig();
    let outcome = rig.input.on_wheel(WheelEvent::vertical(0, pt(100.0, 100.0)).with_modifiers(ctrl()));
    assert_eq!(outcome, WheelOutcome::Consumed);
    assert!(!rig.animator.is_running());
}

#[test]
fn repeated_zoom_in_settles_exactly_at_max() {
    let rig = big_rig();
    for _ in 0..60 {
        rig.input.on_wheel(WheelEvent::vertical(-1, pt(400.0, 300.0)).with_modifiers(ctrl()));
    }
    rig.scheduler.finish();
    assert_eq!(zoom(&rig), ZoomBounds::default().max());

    for _ in 0..5 {
        rig.input.on_wheel(WheelEvent::vertical(-1, pt(400.0, 300.0)).with_modifiers(ctrl()));
        rig.scheduler.finish();
        assert_eq!(zoom(&rig), ZoomBounds::default().max());
    }
}

#[test]
fn repeated_zoom_out_settles_exactly_at_min() {
    let rig = big_rig();
    for _ in 0..60 {
        rig.input.on_wheel(WheelEvent::vertical(3, pt(400.0, 300.0)).with_modifiers(ctrl()));
    }
    rig.scheduler.finish();
    assert_eq!(zoom(&rig), ZoomBounds::default().min());
}

#[test]
fn ctrl_shift_wheel_still_zooms() {
    let rig = big_rig();
    let mods = Modifiers { ctrl: true, shift: true, ..Modifiers::default() };
    let outcome = rig.input.on_wheel(WheelEvent::vertical(-1, pt(0.0, 0.0)).with_modifiers(mods));
    assert!(matches!(outcome, WheelOutcome::Zoomed { .. }));
}

#[test]
fn zoom_step_without_anchor_uses_viewport_center() {
    let rig = big_rig();
    let target = rig.input.zoom_step(ZoomDirection::In, None);
    assert_eq!(target, zf(1.1));
    assert_eq!(rig.animator.run().unwrap().anchor, ScenePoint::new(1000.0, 700.0));
}
