//! Single-pointer motion event shorthands.

use duplex_foundation::{MotionAction, MotionEvent, PointerId, PointerSample};

/// Pointer id used by the single-pointer helpers.
pub const PRIMARY_POINTER: PointerId = 0;

pub fn down(y: f32) -> MotionEvent {
    MotionEvent::single(MotionAction::Down, PRIMARY_POINTER, 0.0, y)
}

pub fn move_to(y: f32) -> MotionEvent {
    MotionEvent::single(MotionAction::Move, PRIMARY_POINTER, 0.0, y)
}

pub fn up(y: f32) -> MotionEvent {
    MotionEvent::single(MotionAction::Up, PRIMARY_POINTER, 0.0, y)
}

pub fn cancel(y: f32) -> MotionEvent {
    MotionEvent::single(MotionAction::Cancel, PRIMARY_POINTER, 0.0, y)
}

/// `action` for two pointers at `(id, y)` each, naming pointer `action_index`.
pub fn two_pointers(
    action: MotionAction,
    first: (PointerId, f32),
    second: (PointerId, f32),
    action_index: usize,
) -> MotionEvent {
    MotionEvent::new(
        action,
        [
            PointerSample::new(first.0, 0.0, first.1),
            PointerSample::new(second.0, 0.0, second.1),
        ],
    )
    .with_action_index(action_index)
}
