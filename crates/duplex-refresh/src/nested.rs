//! Bookkeeping for one nested-scroll session.
//!
//! Pulls arriving through nested scrolling are accumulated as a single
//! magnitude attributed to the edge that first received them. Scrolling back
//! toward rest gives the accumulated distance back before the content scrolls
//! again.

use crate::edge::{Edge, EdgeMap};
use duplex_foundation::{ScrollAxes, ScrollDelta};

/// Consumption decided in the pre-scroll pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreScrollStep {
    pub edge: Edge,
    /// Signed like the offered delta.
    pub consumed_y: f32,
    /// Accumulated pull left afterwards.
    pub remaining: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NestedScrollSession {
    in_progress: bool,
    axes: ScrollAxes,
    total_unconsumed: f32,
    locked: Option<Edge>,
    parent_offset_in_window: ScrollDelta,
}

impl NestedScrollSession {
    pub fn begin(&mut self, axes: ScrollAxes) {
        *self = Self {
            in_progress: true,
            axes,
            ..Self::default()
        };
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn axes(&self) -> ScrollAxes {
        self.axes
    }

    pub fn total_unconsumed(&self) -> f32 {
        self.total_unconsumed
    }

    pub fn locked_edge(&self) -> Option<Edge> {
        self.locked
    }

    pub fn parent_offset_in_window(&self) -> ScrollDelta {
        self.parent_offset_in_window
    }

    pub fn set_parent_offset_in_window(&mut self, offset: ScrollDelta) {
        self.parent_offset_in_window = offset;
    }

    /// Takes back up to the accumulated pull from a delta `dy` moving the
    /// locked edge's indicator toward rest. Reaching zero releases the lock.
    pub fn take_back(&mut self, dy: f32) -> Option<PreScrollStep> {
        let edge = self.locked?;
        if self.total_unconsumed <= 0.0 {
            return None;
        }
        // Positive dy scrolls content up, which pushes the top indicator back.
        let toward_rest = match edge {
            Edge::Top => dy > 0.0,
            Edge::Bottom => dy < 0.0,
        };
        if !toward_rest {
            return None;
        }
        let taken = dy.abs().min(self.total_unconsumed);
        self.total_unconsumed = (self.total_unconsumed - dy.abs()).max(0.0);
        if self.total_unconsumed == 0.0 {
            self.locked = None;
        }
        Some(PreScrollStep {
            edge,
            consumed_y: taken.copysign(dy),
            remaining: self.total_unconsumed,
        })
    }

    /// Adds a delta the content could not scroll. Negative `dy` (content at
    /// its start) pulls the top edge, positive the bottom one. Returns the
    /// pulled edge and its accumulated pull.
    pub fn accumulate(&mut self, dy: f32, allowed: EdgeMap<bool>) -> Option<(Edge, f32)> {
        if !self.in_progress {
            return None;
        }
        let edge = Edge::pulled_by(-dy)?;
        if !allowed[edge] {
            return None;
        }
        if self.locked.is_some_and(|locked| locked != edge) {
            return None;
        }
        self.total_unconsumed += dy.abs();
        self.locked = Some(edge);
        log::trace!("nested pull on {edge}: {}", self.total_unconsumed);
        Some((edge, self.total_unconsumed))
    }

    /// Forgets the pull held for `edge`, if it is the locked one.
    pub fn release(&mut self, edge: Edge) {
        if self.locked == Some(edge) {
            self.clear_pull();
        }
    }

    /// Forgets any accumulated pull. The session itself stays open until the
    /// content stops it.
    pub fn clear_pull(&mut self) {
        self.total_unconsumed = 0.0;
        self.locked = None;
    }

    /// Ends the session, returning the edge to release if anything is still
    /// accumulated.
    pub fn end(&mut self) -> Option<(Edge, f32)> {
        let pending = match self.locked {
            Some(edge) if self.total_unconsumed > 0.0 => Some((edge, self.total_unconsumed)),
            _ => None,
        };
        *self = Self::default();
        pending
    }
}

