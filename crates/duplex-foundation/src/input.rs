//! Multi-pointer motion events.
//!
//! The container reasons about pointer ids the way touch platforms report
//! them: every event carries the full set of pointers currently down, and
//! `PointerDown`/`PointerUp` name the changed pointer through `action_index`.

use duplex_ui_graphics::Point;
use smallvec::SmallVec;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionAction {
    /// First pointer went down; starts a stream.
    Down,
    Move,
    /// Last pointer went up; ends the stream.
    Up,
    Cancel,
    /// An additional pointer went down.
    PointerDown,
    /// A non-last pointer went up.
    PointerUp,
}

/// Position of one pointer within an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub position: Point,
}

impl PointerSample {
    pub fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    /// Index of the pointer that changed for `PointerDown`/`PointerUp`.
    pub action_index: usize,
    pub pointers: SmallVec<[PointerSample; 4]>,
    pub event_time_millis: u64,
}

impl MotionEvent {
    pub fn new(action: MotionAction, pointers: impl IntoIterator<Item = PointerSample>) -> Self {
        Self {
            action,
            action_index: 0,
            pointers: pointers.into_iter().collect(),
            event_time_millis: 0,
        }
    }

    /// Event with a single pointer at `(x, y)`.
    pub fn single(action: MotionAction, id: PointerId, x: f32, y: f32) -> Self {
        Self::new(action, [PointerSample::new(id, x, y)])
    }

    pub fn with_action_index(mut self, action_index: usize) -> Self {
        self.action_index = action_index;
        self
    }

    pub fn at_time(mut self, event_time_millis: u64) -> Self {
        self.event_time_millis = event_time_millis;
        self
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_id(&self, index: usize) -> Option<PointerId> {
        self.pointers.get(index).map(|p| p.id)
    }

    pub fn find_pointer_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }

    /// Id of the pointer named by `action_index`.
    pub fn action_pointer_id(&self) -> Option<PointerId> {
        self.pointer_id(self.action_index)
    }

    pub fn x(&self, index: usize) -> Option<f32> {
        self.pointers.get(index).map(|p| p.position.x)
    }

    pub fn y(&self, index: usize) -> Option<f32> {
        self.pointers.get(index).map(|p| p.position.y)
    }
}
