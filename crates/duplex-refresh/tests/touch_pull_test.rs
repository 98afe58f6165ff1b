//! End-to-end touch pulls against the container, driven through a host-like
//! dispatch of intercept and touch passes.

use std::task::Poll;

use duplex_animation::AnimationEnd;
use duplex_foundation::{MotionAction, MotionEvent};
use duplex_refresh::{Edge, EdgePhase, TransitionKind};
use duplex_testing::{assert_approx_eq, poll_completion, two_pointers, SwipeTestRule};

const TRIGGER: f32 = 100.0;
const TOP_REST: f32 = -40.0;
const TOP_HOVER: f32 = 24.0;
const BOTTOM_REST: f32 = 800.0;
const BOTTOM_HOVER: f32 = 736.0;

fn rule() -> SwipeTestRule {
    SwipeTestRule::with_trigger(TRIGGER)
}

#[test]
fn short_pull_returns_to_rest_without_refreshing() {
    let mut rule = rule();

    rule.pull(Edge::Top, 60.0);
    assert_eq!(rule.phase(Edge::Top), EdgePhase::Cancelling);

    rule.wait_for_idle();
    let state = rule.state(Edge::Top);
    assert_eq!(state.phase, EdgePhase::Idle);
    assert!(!state.visible);
    assert_approx_eq(state.offset, TOP_REST, 0.01, "top offset after cancel");
    assert_eq!(rule.refresh_count(Edge::Top), 0);
    assert!(rule.refresh_events().is_empty());

    let log = rule.indicator_log(Edge::Top);
    assert_eq!(log.started(TransitionKind::ReturnToStart), 1);
    assert_eq!(log.started(TransitionKind::ScaleDown), 1);
    assert_eq!(log.started(TransitionKind::Settle), 0);
}

#[test]
fn long_pull_refreshes_once_after_settling() {
    let mut rule = rule();

    rule.pull(Edge::Top, 120.0);
    assert_eq!(rule.phase(Edge::Top), EdgePhase::Settling);
    assert!(rule.container().is_refreshing(Edge::Top));

    // The listener waits for the indicator to reach its hover offset.
    rule.advance_time(100);
    assert_eq!(rule.refresh_count(Edge::Top), 0);

    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Top), 1);
    assert_eq!(rule.refresh_events().len(), 1);
    assert_eq!(rule.refresh_events()[0].edge, Edge::Top);

    let state = rule.state(Edge::Top);
    assert_eq!(state.phase, EdgePhase::Refreshing);
    assert!(state.visible);
    assert_eq!(state.alpha, 255);
    assert_approx_eq(state.offset, TOP_HOVER, 0.01, "top offset while refreshing");
    assert!(rule.indicator_log(Edge::Top).model.spinning);

    rule.advance_time(1_000);
    assert_eq!(rule.refresh_count(Edge::Top), 1);
    assert!(rule.indicator_log(Edge::Top).model.spinning);

    rule.container_mut().set_refreshing(Edge::Top, false);
    assert_eq!(rule.phase(Edge::Top), EdgePhase::EndingRefresh);
    rule.wait_for_idle();

    let state = rule.state(Edge::Top);
    assert_eq!(state.phase, EdgePhase::Idle);
    assert!(!state.visible);
    assert!(!state.refreshing);
    assert_approx_eq(state.offset, TOP_REST, 0.01, "top offset after refresh");
    let log = rule.indicator_log(Edge::Top);
    assert_eq!(log.spin_starts, 1);
    assert_eq!(log.spin_stops, 1);
    assert_eq!(rule.refresh_count(Edge::Top), 1);
}

#[test]
fn pull_just_short_of_trigger_does_not_refresh() {
    let mut rule = rule();

    rule.pull(Edge::Top, TRIGGER - 0.5);
    rule.wait_for_idle();

    assert_eq!(rule.refresh_count(Edge::Top), 0);
    assert!(!rule.state(Edge::Top).visible);
}

#[test]
fn indicator_follows_the_finger_while_dragging() {
    let mut rule = rule();
    let travel = rule.finger_travel(Edge::Top, 30.0);

    rule.drag_without_release(400.0, 400.0 + travel);

    assert!(rule.is_intercepted());
    let state = rule.state(Edge::Top);
    assert_eq!(state.phase, EdgePhase::Dragging);
    assert!(state.being_dragged);
    assert!(!state.nested_dragging);
    assert!(state.visible);
    assert_eq!(state.alpha, 76);
    assert_approx_eq(state.offset, TOP_REST + 64.0 * 0.3, 0.01, "partial top offset");
    assert_eq!(rule.container().drag_session().locked, Some(Edge::Top));
}

#[test]
fn bottom_pull_loads_more() {
    let mut rule = rule();

    rule.pull(Edge::Bottom, 120.0);
    rule.wait_for_idle();

    assert_eq!(rule.refresh_count(Edge::Bottom), 1);
    assert_eq!(rule.refresh_count(Edge::Top), 0);
    let state = rule.state(Edge::Bottom);
    assert_eq!(state.phase, EdgePhase::Refreshing);
    assert_approx_eq(state.offset, BOTTOM_HOVER, 0.01, "bottom offset while loading");

    let top = rule.state(Edge::Top);
    assert_eq!(top.phase, EdgePhase::Idle);
    assert!(!top.visible);

    rule.container_mut().set_refreshing(Edge::Bottom, false);
    rule.wait_for_idle();
    let state = rule.state(Edge::Bottom);
    assert!(!state.visible);
    assert_approx_eq(state.offset, BOTTOM_REST, 0.01, "bottom offset after loading");
}

#[test]
fn both_edges_refresh_independently() {
    let mut rule = rule();

    rule.pull(Edge::Top, 120.0);
    rule.wait_for_idle();
    rule.pull(Edge::Bottom, 120.0);
    rule.wait_for_idle();

    assert!(rule.container().is_refreshing(Edge::Top));
    assert!(rule.container().is_refreshing(Edge::Bottom));
    assert_eq!(rule.refresh_count(Edge::Top), 1);
    assert_eq!(rule.refresh_count(Edge::Bottom), 1);

    rule.container_mut().set_refreshing(Edge::Top, false);
    rule.wait_for_idle();
    assert!(!rule.state(Edge::Top).visible);
    assert_eq!(rule.phase(Edge::Bottom), EdgePhase::Refreshing);
}

#[test]
fn refreshing_edge_is_not_pulled_again() {
    let mut rule = rule();
    rule.pull(Edge::Top, 120.0);
    rule.wait_for_idle();

    rule.pull(Edge::Top, 200.0);
    rule.wait_for_idle();

    assert!(!rule.is_intercepted());
    assert_eq!(rule.refresh_count(Edge::Top), 1);
    assert_approx_eq(rule.state(Edge::Top).offset, TOP_HOVER, 0.01, "top stays put");
}

#[test]
fn content_that_can_scroll_keeps_the_pull() {
    let mut rule = rule();
    rule.list().set_max_scroll(500.0);

    // At the top of a long list only the top edge may be pulled.
    rule.pull(Edge::Bottom, 120.0);
    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Bottom), 0);
    assert!(!rule.state(Edge::Bottom).visible);

    rule.pull(Edge::Top, 120.0);
    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Top), 1);
}

#[test]
fn child_scroll_callback_overrides_content() {
    let mut rule = rule();
    rule.container_mut()
        .set_on_child_scroll_callback(Some(Box::new(|edge: Edge| edge == Edge::Top)));

    rule.pull(Edge::Top, 120.0);
    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Top), 0);

    rule.pull(Edge::Bottom, 120.0);
    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Bottom), 1);

    rule.container_mut().set_on_child_scroll_callback(None);
    assert!(!rule.container().can_child_scroll(Edge::Top));
}

#[test]
fn releasing_behind_the_lock_point_never_triggers() {
    let mut rule = rule();
    let travel = rule.finger_travel(Edge::Top, 150.0);
    rule.drag_without_release(400.0, 400.0 + travel);

    // Back above where the stream locked: the container lets go of the move.
    assert!(!rule.touch_move(390.0));
    rule.touch_up(390.0);
    assert_eq!(rule.phase(Edge::Top), EdgePhase::Cancelling);

    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Top), 0);
    assert!(!rule.state(Edge::Top).visible);
}

#[test]
fn cancelled_stream_never_triggers() {
    let mut rule = rule();
    let travel = rule.finger_travel(Edge::Top, 150.0);
    rule.drag_without_release(400.0, 400.0 + travel);

    rule.touch_cancel(400.0 + travel);
    assert_eq!(rule.phase(Edge::Top), EdgePhase::Cancelling);
    assert!(rule.container().drag_session().locked.is_none());

    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Top), 0);
    assert!(!rule.container().is_refreshing(Edge::Top));
    assert!(!rule.state(Edge::Top).visible);
}

#[test]
fn second_pointer_takes_over_the_pull() {
    let mut rule = rule();

    rule.touch_down(400.0);
    assert!(rule.touch_move(420.0));
    assert_eq!(rule.container().drag_session().initial_motion_y, 408.0);

    rule.dispatch(&two_pointers(MotionAction::PointerDown, (0, 420.0), (1, 300.0), 1));
    assert_eq!(rule.container().drag_session().active_pointer, Some(1));

    rule.dispatch(&two_pointers(MotionAction::Move, (0, 420.0), (1, 500.0), 0));
    assert_approx_eq(
        rule.state(Edge::Top).offset,
        TOP_REST + 64.0 * 0.46,
        0.01,
        "offset follows the second pointer",
    );

    // The first pointer lifting leaves the second in charge.
    rule.dispatch(&two_pointers(MotionAction::PointerUp, (0, 420.0), (1, 700.0), 0));
    assert_eq!(rule.container().drag_session().active_pointer, Some(1));

    rule.dispatch(&MotionEvent::single(MotionAction::Up, 1, 0.0, 700.0));
    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Top), 1);
}

#[test]
fn lifting_the_active_pointer_hands_over_to_the_other() {
    let mut rule = rule();

    rule.touch_down(400.0);
    rule.touch_move(420.0);
    rule.dispatch(&two_pointers(MotionAction::PointerDown, (0, 420.0), (1, 430.0), 1));
    rule.dispatch(&two_pointers(MotionAction::PointerUp, (0, 420.0), (1, 430.0), 1));

    assert_eq!(rule.container().drag_session().active_pointer, Some(0));
}

#[test]
fn new_touch_interrupts_the_return_animation() {
    let mut rule = rule();
    rule.pull(Edge::Top, 60.0);
    rule.advance_time(32);
    let mut returning = rule
        .container()
        .animation_completion(Edge::Top)
        .expect("return animation running");

    rule.pull(Edge::Top, 120.0);
    assert_eq!(poll_completion(&mut returning), Poll::Ready(AnimationEnd::Cancelled));

    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Top), 1);
}

#[test]
fn disallow_intercept_keeps_stream_with_content() {
    let mut rule = rule();

    rule.touch_down(400.0);
    rule.container_mut().request_disallow_intercept_touch_event(true);
    for y in [420.0, 500.0, 700.0] {
        assert!(!rule.touch_move(y));
    }
    rule.touch_up(700.0);
    rule.wait_for_idle();
    assert!(!rule.state(Edge::Top).visible);

    // A fresh stream clears the request.
    rule.pull(Edge::Top, 120.0);
    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Top), 1);
}

#[test]
fn disallow_intercept_is_ignored_for_content_without_nested_scrolling() {
    let mut rule = rule();
    rule.list().set_nested_scrolling_enabled(false);

    rule.touch_down(400.0);
    rule.container_mut().request_disallow_intercept_touch_event(true);
    assert!(rule.touch_move(420.0));
}

#[test]
fn disabled_container_ignores_pulls() {
    let mut rule = rule();
    rule.container_mut().set_enabled(false);

    rule.pull(Edge::Top, 120.0);
    rule.pull(Edge::Bottom, 120.0);
    rule.wait_for_idle();

    assert_eq!(rule.refresh_count(Edge::Top), 0);
    assert_eq!(rule.refresh_count(Edge::Bottom), 0);
    assert!(!rule.state(Edge::Top).visible);

    rule.container_mut().set_enabled(true);
    rule.pull(Edge::Top, 120.0);
    rule.wait_for_idle();
    assert_eq!(rule.refresh_count(Edge::Top), 1);
}

#[test]
fn disabling_drops_refresh_in_progress() {
    let mut rule = rule();
    rule.pull(Edge::Top, 120.0);
    rule.wait_for_idle();

    rule.container_mut().set_enabled(false);

    assert!(!rule.container().is_refreshing(Edge::Top));
    let state = rule.state(Edge::Top);
    assert!(!state.visible);
    assert_eq!(state.phase, EdgePhase::Idle);
    assert!(!rule.indicator_log(Edge::Top).model.spinning);
}

#[test]
fn completion_resolves_when_settling_finishes() {
    let mut rule = rule();
    rule.pull(Edge::Top, 120.0);
    let mut settle = rule
        .container()
        .animation_completion(Edge::Top)
        .expect("settle animation running");

    assert_eq!(poll_completion(&mut settle), Poll::Pending);
    rule.wait_for_idle();
    assert_eq!(poll_completion(&mut settle), Poll::Ready(AnimationEnd::Finished));
    assert!(rule.container().animation_completion(Edge::Top).is_none());
}

#[test]
fn detaching_cancels_animations_synchronously() {
    let mut rule = rule();
    rule.pull(Edge::Top, 120.0);
    let mut settle = rule
        .container()
        .animation_completion(Edge::Top)
        .expect("settle animation running");

    rule.container_mut().on_detached_from_window();

    assert_eq!(poll_completion(&mut settle), Poll::Ready(AnimationEnd::Cancelled));
    assert!(!rule.container().needs_frame());
    assert!(!rule.container().is_refreshing(Edge::Top));
    assert!(!rule.state(Edge::Top).visible);
    rule.advance_time(500);
    assert_eq!(rule.refresh_count(Edge::Top), 0);
}
