use super::*;
use duplex_animation::Easing;

#[test]
fn settle_moves_to_hover_and_hides_arrow() {
    let settle = Transition::settle(50.0, 24.0);
    assert_eq!(settle.kind(), TransitionKind::Settle);
    assert_eq!(settle.spec().duration_millis, 200);
    assert_eq!(settle.spec().easing, Easing::Decelerate(2.0));

    let start = settle.sample(0.0);
    assert_eq!(start.offset, Some(50.0));
    assert_eq!(start.arrow_scale, Some(1.0));
    assert_eq!(start.scale, None);

    let end = settle.sample(1.0);
    assert_eq!(end.offset, Some(24.0));
    assert_eq!(end.arrow_scale, Some(0.0));
}

#[test]
fn scale_transitions() {
    assert_eq!(Transition::scale_up().spec().duration_millis, 400);
    assert_eq!(Transition::scale_up().sample(0.25).scale, Some(0.25));

    let down = Transition::scale_down();
    assert_eq!(down.spec().duration_millis, 150);
    assert_eq!(down.sample(0.25).scale, Some(0.75));
    assert_eq!(down.sample(0.25).offset, None);
}

#[test]
fn return_to_start_only_moves() {
    let back = Transition::return_to_start(40.0, -40.0);
    assert_eq!(back.spec().duration_millis, 200);
    let mid = back.sample(0.5);
    assert_eq!(mid.offset, Some(0.0));
    assert_eq!(mid.scale, None);
}

#[test]
fn scale_down_to_start_shrinks_from_current_scale() {
    let back = Transition::scale_down_to_start(40.0, -40.0, 0.5);
    assert_eq!(back.spec().duration_millis, 150);
    let mid = back.sample(0.5);
    assert_eq!(mid.offset, Some(0.0));
    assert_eq!(mid.scale, Some(0.25));
    assert_eq!(back.sample(1.0).scale, Some(0.0));
}

#[test]
fn alpha_fades_between_targets() {
    let fade = Transition::alpha(76, 255);
    assert_eq!(fade.spec().duration_millis, 300);
    assert_eq!(fade.target_alpha(), 255);
    assert_eq!(fade.sample(0.0).alpha, Some(76));
    assert_eq!(fade.sample(1.0).alpha, Some(255));
    assert_eq!(fade.sample(0.5).offset, None);
}
