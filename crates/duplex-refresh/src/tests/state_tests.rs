use super::*;
use crate::motion::{MAX_ALPHA, STARTING_PROGRESS_ALPHA};
use duplex_animation::AnimationEnd;

const FRAME_NANOS: u64 = 16_000_000;

fn thresholds(scale_with_drag: bool) -> Thresholds {
    Thresholds::resolve(
        &RefreshConfig::new()
            .with_trigger_distance(100.0)
            .with_scale_with_drag(scale_with_drag),
        800.0,
    )
}

fn controller(edge: Edge, th: &Thresholds) -> EdgeController {
    EdgeController::new(edge, Box::new(IndicatorModel::new()), th)
}

/// Runs frames until the controller goes quiet, collecting refresh events.
fn run_until_idle(controller: &mut EdgeController, th: &Thresholds, start: u64) -> Vec<RefreshEvent> {
    let mut events = Vec::new();
    let mut time = start;
    for _ in 0..200 {
        if !controller.needs_frame() {
            break;
        }
        events.extend(controller.on_frame(time, th));
        time += FRAME_NANOS;
    }
    assert!(!controller.needs_frame(), "animations did not settle");
    events
}

#[test]
fn starts_hidden_at_rest() {
    let th = thresholds(false);
    let top = controller(Edge::Top, &th);
    let state = top.state();
    assert_eq!(state.phase, EdgePhase::Idle);
    assert!(!state.visible);
    assert_eq!(state.offset, -40.0);
    assert_eq!(state.alpha, MAX_ALPHA);
    assert!(!top.needs_frame());
}

#[test]
fn short_pull_returns_to_rest_without_refreshing() {
    let th = thresholds(false);
    let mut top = controller(Edge::Top, &th);

    top.begin_drag(DragSource::Touch);
    assert_eq!(top.indicator().alpha(), STARTING_PROGRESS_ALPHA);
    top.move_spinner(60.0, &th);
    assert!(top.indicator().is_visible());
    assert!(top.state().being_dragged);

    top.finish_spinner(60.0, &th);
    assert_eq!(top.phase(), EdgePhase::Cancelling);
    assert!(top.is_returning_to_start());
    assert_eq!(top.running_transition(), Some(TransitionKind::ReturnToStart));

    let events = run_until_idle(&mut top, &th, 0);
    assert!(events.is_empty());
    let state = top.state();
    assert_eq!(state.phase, EdgePhase::Idle);
    assert!(!state.visible);
    assert_eq!(state.offset, -40.0);
    assert!(!state.refreshing);
    assert!(!top.is_returning_to_start());
}

#[test]
fn long_pull_settles_then_refreshes_once() {
    let th = thresholds(false);
    let mut bottom = controller(Edge::Bottom, &th);

    bottom.begin_drag(DragSource::Touch);
    bottom.move_spinner(120.0, &th);
    bottom.finish_spinner(120.0, &th);
    assert_eq!(bottom.phase(), EdgePhase::Settling);
    assert!(bottom.is_refreshing());

    let events = run_until_idle(&mut bottom, &th, 0);
    assert_eq!(events, vec![RefreshEvent { edge: Edge::Bottom }]);
    assert_eq!(bottom.phase(), EdgePhase::Refreshing);
    assert!(bottom.indicator().is_spinning());
    assert_eq!(bottom.indicator().offset(), 736.0);
    assert_eq!(bottom.indicator().alpha(), MAX_ALPHA);

    bottom.set_refreshing(false, false, &th);
    assert_eq!(bottom.phase(), EdgePhase::EndingRefresh);
    assert!(run_until_idle(&mut bottom, &th, 1_000_000_000).is_empty());
    assert_eq!(bottom.phase(), EdgePhase::Idle);
    assert!(!bottom.indicator().is_visible());
    assert!(!bottom.indicator().is_spinning());
    assert_eq!(bottom.indicator().offset(), 800.0);
}

#[test]
fn programmatic_refresh_is_idempotent_and_silent() {
    let th = thresholds(false);
    let mut top = controller(Edge::Top, &th);

    top.set_refreshing(true, false, &th);
    let first = top.completion();
    assert_eq!(top.running_transition(), Some(TransitionKind::ScaleUp));
    assert_eq!(top.indicator().offset(), 24.0);
    assert_eq!(top.indicator().scale(), 0.0);

    top.set_refreshing(true, false, &th);
    let second = top.completion();
    assert!(first.is_some());
    assert!(second.is_some());
    assert!(first.as_ref().is_some_and(|c| !c.is_resolved()));

    assert!(run_until_idle(&mut top, &th, 0).is_empty());
    assert_eq!(first.and_then(|c| c.outcome()), Some(AnimationEnd::Finished));
    assert_eq!(top.phase(), EdgePhase::Refreshing);
    assert_eq!(top.indicator().scale(), 1.0);
}

#[test]
fn programmatic_refresh_can_notify() {
    let th = thresholds(false);
    let mut top = controller(Edge::Top, &th);
    top.set_refreshing(true, true, &th);
    assert_eq!(
        run_until_idle(&mut top, &th, 0),
        vec![RefreshEvent { edge: Edge::Top }]
    );
}

#[test]
fn ending_refresh_mid_settle_cancels_the_settle() {
    let th = thresholds(false);
    let mut top = controller(Edge::Top, &th);
    top.begin_drag(DragSource::Touch);
    top.move_spinner(150.0, &th);
    top.finish_spinner(150.0, &th);
    let settle = top.completion();
    top.on_frame(0, &th);

    top.set_refreshing(false, false, &th);
    assert_eq!(
        settle.and_then(|c| c.outcome()),
        Some(AnimationEnd::Cancelled)
    );
    assert!(run_until_idle(&mut top, &th, FRAME_NANOS).is_empty());
    assert_eq!(top.phase(), EdgePhase::Idle);
}

#[test]
fn scale_mode_shrinks_back_to_rest() {
    let th = thresholds(true);
    let mut top = controller(Edge::Top, &th);
    top.begin_drag(DragSource::NestedScroll);
    top.move_spinner(50.0, &th);
    assert_eq!(top.indicator().scale(), 0.5);
    assert!(top.state().nested_dragging);

    top.finish_spinner(50.0, &th);
    assert_eq!(top.running_transition(), Some(TransitionKind::ScaleDownToStart));
    run_until_idle(&mut top, &th, 0);
    assert_eq!(top.indicator().scale(), 0.0);
    assert_eq!(top.indicator().offset(), -40.0);
    assert!(!top.indicator().is_visible());
}

#[test]
fn crossing_the_trigger_fades_to_full_alpha() {
    let th = thresholds(false);
    let mut top = controller(Edge::Top, &th);
    top.begin_drag(DragSource::Touch);
    top.move_spinner(150.0, &th);
    assert!(top.needs_frame());
    assert_eq!(top.running_transition(), None);

    run_until_idle(&mut top, &th, 0);
    assert_eq!(top.indicator().alpha(), MAX_ALPHA);
    assert_eq!(top.phase(), EdgePhase::Dragging);
}

#[test]
fn non_positive_release_never_triggers() {
    let th = thresholds(false);
    let mut top = controller(Edge::Top, &th);
    top.begin_drag(DragSource::Touch);
    top.move_spinner(10.0, &th);
    top.finish_spinner(-300.0, &th);
    assert!(!top.is_refreshing());
    assert_eq!(top.phase(), EdgePhase::Cancelling);
}

#[test]
fn force_reset_drops_refresh() {
    let th = thresholds(false);
    let mut top = controller(Edge::Top, &th);
    top.set_refreshing(true, false, &th);
    run_until_idle(&mut top, &th, 0);
    assert!(top.indicator().is_spinning());

    top.force_reset(&th);
    assert!(!top.is_refreshing());
    assert_eq!(top.phase(), EdgePhase::Idle);
    assert!(!top.indicator().is_spinning());
    assert!(!top.needs_frame());
}

#[test]
fn drags_are_ignored_while_refreshing() {
    let th = thresholds(false);
    let mut top = controller(Edge::Top, &th);
    top.set_refreshing(true, false, &th);
    run_until_idle(&mut top, &th, 0);

    top.begin_drag(DragSource::Touch);
    top.move_spinner(10.0, &th);
    assert!(!top.is_dragging());
    assert_eq!(top.indicator().offset(), 24.0);
}
