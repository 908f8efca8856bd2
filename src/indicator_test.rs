use std::sync::Mutex;

use super::*;
use crate::events::ZoomEvents;
use crate::geometry::ZoomBounds;

// =============================================================
// Helpers
// =============================================================

#[derive(Default)]
struct RecordingTarget {
    levels: Mutex<Vec<u32>>,
}

impl ZoomLevelTarget for RecordingTarget {
    fn set_zoom_level(&self, percent: u32) -> ZoomFactor {
        self.levels.lock().unwrap().push(percent);
        ZoomFactor::from_percent(percent).unwrap()
    }
}

/// Clamps like a canvas and publishes what it applied.
struct ClampingTarget {
    bounds: ZoomBounds,
    events: ZoomEvents,
}

impl ZoomLevelTarget for ClampingTarget {
    fn set_zoom_level(&self, percent: u32) -> ZoomFactor {
        let applied = self.bounds.clamp_raw(f64::from(percent) / 100.0);
        self.events.publish(applied);
        applied
    }
}

fn zf(f: f64) -> ZoomFactor {
    ZoomFactor::new(f).unwrap()
}

fn indicator(events: &ZoomEvents) -> (Arc<RecordingTarget>, ZoomLevelIndicator<Arc<RecordingTarget>>) {
    let target = Arc::new(RecordingTarget::default());
    let indicator = ZoomLevelIndicator::new(Arc::clone(&target), events.subscribe());
    (target, indicator)
}

// =============================================================
// parse_zoom_level
// =============================================================

#[test]
fn parse_plain_and_percent_forms() {
    assert_eq!(parse_zoom_level("150"), Some(150));
    assert_eq!(parse_zoom_level("150%"), Some(150));
    assert_eq!(parse_zoom_level(" 1 5 0 % "), Some(150));
}

#[test]
fn parse_rejects_bounds() {
    assert_eq!(parse_zoom_level("0"), None);
    assert_eq!(parse_zoom_level("1000%"), None);
    assert_eq!(parse_zoom_level("999%"), Some(999));
    assert_eq!(parse_zoom_level("1%"), Some(1));
}

#[test]
fn parse_rejects_garbage() {
    assert_eq!(parse_zoom_level(""), None);
    assert_eq!(parse_zoom_level("%"), None);
    assert_eq!(parse_zoom_level("abc"), None);
    assert_eq!(parse_zoom_level("-50%"), None);
    assert_eq!(parse_zoom_level("12.5%"), None);
    assert_eq!(parse_zoom_level("50%%"), None);
}

#[test]
fn format_rounds_to_whole_percent() {
    assert_eq!(format_zoom_level(zf(1.5)), "150%");
    assert_eq!(format_zoom_level(zf(1.1 * 1.1)), "121%");
    assert_eq!(format_zoom_level(zf(0.255)), "26%");
}

// =============================================================
// Display
// =============================================================

#[test]
fn initial_text_reflects_current_factor() {
    let events = ZoomEvents::new(zf(1.25));
    let (_target, indicator) = indicator(&events);
    assert_eq!(indicator.text(), "125%");
}

#[test]
fn presets_are_fixed_list() {
    let events = ZoomEvents::new(ZoomFactor::ONE);
    let (_target, indicator) = indicator(&events);
    assert_eq!(indicator.presets(), ["25%", "50%", "75%", "100%", "125%", "150%", "200%", "300%"]);
}

#[test]
fn refresh_picks_up_settled_changes_only_once() {
    let events = ZoomEvents::new(ZoomFactor::ONE);
    let (_target, mut indicator) = indicator(&events);
    assert!(!indicator.refresh());

    events.publish(zf(1.5));
    assert!(indicator.refresh());
    assert_eq!(indicator.text(), "150%");
    assert!(!indicator.refresh());
}

#[test]
fn republishing_same_factor_does_not_wake_indicator() {
    let events = ZoomEvents::new(zf(2.0));
    let (_target, mut indicator) = indicator(&events);
    events.publish(zf(2.0));
    assert!(!indicator.refresh());
}

// =============================================================
// Commit
// =============================================================

#[test]
fn commit_valid_level_forwards_it() {
    let events = ZoomEvents::new(ZoomFactor::ONE);
    let (target, mut indicator) = indicator(&events);
    assert_eq!(indicator.commit("150%"), 150);
    assert_eq!(indicator.text(), "150%");
    assert_eq!(*target.levels.lock().unwrap(), vec![150]);
}

#[test]
fn commit_shows_clamped_level_not_typed_one() {
    let events = ZoomEvents::new(ZoomFactor::ONE);
    let target = ClampingTarget { bounds: ZoomBounds::default(), events: events.clone() };
    let mut indicator = ZoomLevelIndicator::new(target, events.subscribe());

    assert_eq!(indicator.commit("5%"), 10);
    assert_eq!(indicator.text(), "10%");
    assert!(!indicator.refresh());

    // Same clamped factor again: nothing is published, text must still be right.
    assert_eq!(indicator.commit("2%"), 10);
    assert_eq!(indicator.text(), "10%");
    assert!(!indicator.refresh());

    assert_eq!(indicator.commit("4000"), 100);
    assert_eq!(indicator.commit("999"), 999);
    assert_eq!(indicator.text(), "999%");
}

#[test]
fn commit_invalid_level_resets_to_100_not_previous() {
    let events = ZoomEvents::new(ZoomFactor::ONE);
    let (target, mut indicator) = indicator(&events);
    indicator.commit("300");
    assert_eq!(indicator.commit("nonsense"), 100);
    assert_eq!(indicator.text(), "100%");
    assert_eq!(indicator.commit("5000%"), 100);
    assert_eq!(*target.levels.lock().unwrap(), vec![300, 100, 100]);
}
