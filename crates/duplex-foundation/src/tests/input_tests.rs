use crate::input::*;

#[test]
fn pointer_lookup_by_id() {
    let event = MotionEvent::new(
        MotionAction::PointerUp,
        [PointerSample::new(3, 0.0, 10.0), PointerSample::new(7, 0.0, 40.0)],
    )
    .with_action_index(1);

    assert_eq!(event.pointer_count(), 2);
    assert_eq!(event.find_pointer_index(7), Some(1));
    assert_eq!(event.find_pointer_index(9), None);
    assert_eq!(event.action_pointer_id(), Some(7));
    assert_eq!(event.y(1), Some(40.0));
    assert_eq!(event.y(2), None);
}

#[test]
fn single_pointer_event() {
    let event = MotionEvent::single(MotionAction::Down, 0, 5.0, 12.0).at_time(42);
    assert_eq!(event.pointer_id(0), Some(0));
    assert_eq!(event.x(0), Some(5.0));
    assert_eq!(event.event_time_millis, 42);
}
