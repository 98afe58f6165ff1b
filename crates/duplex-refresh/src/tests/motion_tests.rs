use super::*;
use crate::motion::{MAX_PROGRESS_ANGLE, STARTING_PROGRESS_ALPHA};

fn thresholds() -> Thresholds {
    Thresholds::resolve(&RefreshConfig::new().with_trigger_distance(100.0), 800.0)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn no_pull_rests() {
    let frame = compute_frame(0.0, Edge::Top, &thresholds());
    assert_eq!(frame.target_offset, -40.0);
    assert_eq!(frame.arc_end, 0.0);
    assert_eq!(frame.arrow_scale, 0.0);
    assert!(approx(frame.rotation, -0.125));
    assert_eq!(frame.alpha_target, AlphaTarget::Starting);
    assert_eq!(frame.alpha_target.value(), STARTING_PROGRESS_ALPHA);
}

#[test]
fn half_pull() {
    let th = thresholds();
    let top = compute_frame(50.0, Edge::Top, &th);
    assert!(approx(top.drag_percent, 0.5));
    assert!(approx(top.target_offset, -8.0));
    assert!(approx(top.arc_end, 0.1 * 5.0 / 3.0 * 0.8));

    let bottom = compute_frame(50.0, Edge::Bottom, &th);
    assert!(approx(bottom.target_offset, 768.0));
    assert_eq!(compute_frame(-50.0, Edge::Bottom, &th), bottom);
}

#[test]
fn trigger_reaches_hover_with_full_arc() {
    let frame = compute_frame(100.0, Edge::Top, &thresholds());
    assert!(approx(frame.target_offset, 24.0));
    assert!(approx(frame.arc_end, MAX_PROGRESS_ANGLE));
    assert_eq!(frame.arrow_scale, 1.0);
    assert_eq!(frame.alpha_target, AlphaTarget::Max);
}

#[test]
fn travel_is_capped_past_twice_the_slingshot() {
    let th = thresholds();
    let capped = compute_frame(228.0, Edge::Top, &th);
    assert!(approx(capped.tension, 0.5));
    assert!(approx(capped.target_offset, 88.0));
    assert_eq!(compute_frame(1000.0, Edge::Top, &th).target_offset, capped.target_offset);
}

#[test]
fn offsets_are_monotonic_and_arc_bounded() {
    let th = thresholds();
    let mut last = EdgeMap::new(f32::MIN, f32::MAX);
    for step in 0..=600 {
        let pull = step as f32 * 0.5;
        let top = compute_frame(pull, Edge::Top, &th);
        let bottom = compute_frame(pull, Edge::Bottom, &th);
        assert!(top.target_offset >= last.top);
        assert!(bottom.target_offset <= last.bottom);
        assert!(top.arc_end <= MAX_PROGRESS_ANGLE);
        assert!(top.arrow_scale <= 1.0);
        last = EdgeMap::new(top.target_offset, bottom.target_offset);
    }
}

#[test]
fn scale_follows_pull_only_in_scale_mode() {
    let plain = thresholds();
    assert_eq!(compute_frame(30.0, Edge::Top, &plain).scale, 1.0);

    let scaled = Thresholds::resolve(
        &RefreshConfig::new()
            .with_trigger_distance(100.0)
            .with_scale_with_drag(true),
        800.0,
    );
    assert!(approx(compute_frame(30.0, Edge::Top, &scaled).scale, 0.3));
    assert_eq!(compute_frame(300.0, Edge::Top, &scaled).scale, 1.0);
}
