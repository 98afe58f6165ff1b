//! The two edges an indicator can live on.

use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Pull down at the top of the content to refresh.
    Top,
    /// Pull up at the bottom of the content to load more.
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 2] = [Edge::Top, Edge::Bottom];

    /// Direction the indicator travels away from its rest offset: `+1` for the
    /// top indicator (downward), `-1` for the bottom one.
    pub fn sign(self) -> f32 {
        match self {
            Edge::Top => 1.0,
            Edge::Bottom => -1.0,
        }
    }

    pub fn opposite(self) -> Edge {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// Edge pulled by a finger moving `delta_y` pixels (positive is downward).
    pub fn pulled_by(delta_y: f32) -> Option<Edge> {
        if delta_y > 0.0 {
            Some(Edge::Top)
        } else if delta_y < 0.0 {
            Some(Edge::Bottom)
        } else {
            None
        }
    }

    /// Scroll direction the content must not be able to scroll in for this
    /// edge to take a pull: `-1` (toward the start) for top, `1` for bottom.
    pub fn content_scroll_direction(self) -> i32 {
        match self {
            Edge::Top => -1,
            Edge::Bottom => 1,
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edge::Top => f.write_str("top"),
            Edge::Bottom => f.write_str("bottom"),
        }
    }
}

/// One value per edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeMap<T> {
    pub top: T,
    pub bottom: T,
}

impl<T> EdgeMap<T> {
    pub fn new(top: T, bottom: T) -> Self {
        Self { top, bottom }
    }

    pub fn from_fn(mut f: impl FnMut(Edge) -> T) -> Self {
        Self {
            top: f(Edge::Top),
            bottom: f(Edge::Bottom),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Edge, &T) -> U) -> EdgeMap<U> {
        EdgeMap {
            top: f(Edge::Top, &self.top),
            bottom: f(Edge::Bottom, &self.bottom),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Edge, &T)> {
        [(Edge::Top, &self.top), (Edge::Bottom, &self.bottom)].into_iter()
    }
}

impl<T> Index<Edge> for EdgeMap<T> {
    type Output = T;

    fn index(&self, edge: Edge) -> &T {
        match edge {
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
        }
    }
}

impl<T> IndexMut<Edge> for EdgeMap<T> {
    fn index_mut(&mut self, edge: Edge) -> &mut T {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
        }
    }
}
