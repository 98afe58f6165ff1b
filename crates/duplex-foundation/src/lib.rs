//! Input plumbing shared by the duplex refresh container and its hosts
//!
//! - [`input`]: multi-pointer motion events in the shape touch platforms emit.
//! - [`gesture_constants`]: slop and drag-rate thresholds.
//! - [`nested_scroll`]: the nested-scrolling parent/child protocol.

pub mod gesture_constants;
pub mod input;
pub mod nested_scroll;

pub use gesture_constants::*;
pub use input::{MotionAction, MotionEvent, PointerId, PointerSample};
pub use nested_scroll::{
    NestedScrollingChildHelper, NestedScrollingParent, ScrollAxes, ScrollDelta, Velocity,
};

pub mod prelude {
    pub use crate::input::{MotionAction, MotionEvent, PointerId, PointerSample};
    pub use crate::nested_scroll::{
        NestedScrollingChildHelper, NestedScrollingParent, ScrollAxes, ScrollDelta, Velocity,
    };
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod input_tests;

#[cfg(test)]
#[path = "tests/nested_scroll_tests.rs"]
mod nested_scroll_tests;
