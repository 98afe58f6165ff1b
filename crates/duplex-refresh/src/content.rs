//! The scrollable child the container wraps.

use crate::edge::Edge;

pub trait ScrollableContent {
    /// Whether the content can scroll further in `direction`: negative toward
    /// its start (revealing content above), positive toward its end.
    fn can_scroll_vertically(&self, direction: i32) -> bool;

    /// Whether the content takes part in nested scrolling.
    fn is_nested_scrolling_enabled(&self) -> bool {
        false
    }
}

/// Replaces the content's own answer to "can the content still scroll toward
/// this edge".
pub type ChildScrollCallback = Box<dyn Fn(Edge) -> bool>;

/// Called when an edge's refresh fires.
pub type RefreshListener = Box<dyn FnMut()>;
