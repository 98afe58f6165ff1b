//! Nested-scrolling protocol.
//!
//! A scrolling child offers every vertical delta to its parent twice: once
//! before it scrolls (`pre_scroll`, the parent may consume part of it) and once
//! after (`scroll`, carrying whatever the child could not consume). A parent
//! that is itself nested forwards to its own ancestor through a
//! [`NestedScrollingChildHelper`].

use std::cell::RefCell;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::rc::{Rc, Weak};

/// Bit set of scroll axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScrollAxes(u8);

impl ScrollAxes {
    pub const NONE: Self = Self(0);
    pub const HORIZONTAL: Self = Self(1);
    pub const VERTICAL: Self = Self(1 << 1);

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True when every axis in `other` is also set here.
    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    pub fn is_vertical(self) -> bool {
        self.contains(Self::VERTICAL)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for ScrollAxes {
    fn default() -> Self {
        Self::NONE
    }
}

/// Scroll distance in pixels. Positive `y` scrolls content upward (finger
/// moving up), matching the platform convention.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollDelta {
    pub x: f32,
    pub y: f32,
}

impl ScrollDelta {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn vertical(y: f32) -> Self {
        Self { x: 0.0, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for ScrollDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for ScrollDelta {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for ScrollDelta {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for ScrollDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Fling velocity in pixels per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Parent side of the nested-scrolling protocol.
pub trait NestedScrollingParent {
    /// Asked when a descendant starts a nested scroll. Returning `true` accepts
    /// the session.
    fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool;

    /// Called once after `on_start_nested_scroll` accepted.
    fn on_nested_scroll_accepted(&mut self, axes: ScrollAxes);

    /// Offered before the child scrolls. Returns the part of `delta` consumed.
    fn on_nested_pre_scroll(&mut self, delta: ScrollDelta) -> ScrollDelta;

    /// Offered after the child scrolled. Returns the part of `unconsumed`
    /// this parent (or its ancestors) consumed.
    fn on_nested_scroll(&mut self, consumed: ScrollDelta, unconsumed: ScrollDelta) -> ScrollDelta;

    fn on_stop_nested_scroll(&mut self);

    fn on_nested_pre_fling(&mut self, _velocity: Velocity) -> bool {
        false
    }

    fn on_nested_fling(&mut self, _velocity: Velocity, _consumed: bool) -> bool {
        false
    }

    /// Axes of the session in progress, `ScrollAxes::NONE` when idle.
    fn nested_scroll_axes(&self) -> ScrollAxes;
}

/// Child side of the protocol: tracks whether nested scrolling is enabled and
/// which parent accepted the current session.
///
/// The parent is held weakly so a parent that also owns the child does not
/// form a cycle.
#[derive(Default)]
pub struct NestedScrollingChildHelper {
    enabled: bool,
    parent: Option<Weak<RefCell<dyn NestedScrollingParent>>>,
    active_axes: Option<ScrollAxes>,
}

impl NestedScrollingChildHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disabling while a session is active stops it first.
    pub fn set_nested_scrolling_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.stop_nested_scroll();
        }
        self.enabled = enabled;
    }

    pub fn is_nested_scrolling_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_parent<P: NestedScrollingParent + 'static>(&mut self, parent: &Rc<RefCell<P>>) {
        let parent: Rc<RefCell<dyn NestedScrollingParent>> = parent.clone();
        self.set_dyn_parent(&parent);
    }

    pub fn set_dyn_parent(&mut self, parent: &Rc<RefCell<dyn NestedScrollingParent>>) {
        self.stop_nested_scroll();
        self.parent = Some(Rc::downgrade(parent));
    }

    pub fn clear_parent(&mut self) {
        self.stop_nested_scroll();
        self.parent = None;
    }

    /// True while a parent has accepted a session and it has not been stopped.
    pub fn has_nested_scrolling_parent(&self) -> bool {
        self.active_axes.is_some() && self.live_parent().is_some()
    }

    pub fn start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        if self.has_nested_scrolling_parent() {
            return true;
        }
        if !self.enabled {
            return false;
        }
        let Some(parent) = self.live_parent() else {
            return false;
        };
        let accepted = with_parent(&parent, |p| {
            if p.on_start_nested_scroll(axes) {
                p.on_nested_scroll_accepted(axes);
                true
            } else {
                false
            }
        })
        .unwrap_or(false);
        if accepted {
            self.active_axes = Some(axes);
        }
        accepted
    }

    pub fn stop_nested_scroll(&mut self) {
        if self.active_axes.take().is_none() {
            return;
        }
        if let Some(parent) = self.live_parent() {
            with_parent(&parent, |p| p.on_stop_nested_scroll());
        }
    }

    /// Offers `delta` to the parent before scrolling. Returns what it consumed.
    pub fn dispatch_nested_pre_scroll(&mut self, delta: ScrollDelta) -> ScrollDelta {
        if delta.is_zero() {
            return ScrollDelta::ZERO;
        }
        self.active_parent()
            .and_then(|parent| with_parent(&parent, |p| p.on_nested_pre_scroll(delta)))
            .unwrap_or(ScrollDelta::ZERO)
    }

    /// Offers the leftover of a scroll to the parent.
    ///
    /// Returns how far this child moved in the window as a result, which is
    /// the negation of what the parent chain consumed.
    pub fn dispatch_nested_scroll(
        &mut self,
        consumed: ScrollDelta,
        unconsumed: ScrollDelta,
    ) -> ScrollDelta {
        if consumed.is_zero() && unconsumed.is_zero() {
            return ScrollDelta::ZERO;
        }
        let parent_consumed = self
            .active_parent()
            .and_then(|parent| with_parent(&parent, |p| p.on_nested_scroll(consumed, unconsumed)))
            .unwrap_or(ScrollDelta::ZERO);
        -parent_consumed
    }

    pub fn dispatch_nested_pre_fling(&mut self, velocity: Velocity) -> bool {
        self.active_parent()
            .and_then(|parent| with_parent(&parent, |p| p.on_nested_pre_fling(velocity)))
            .unwrap_or(false)
    }

    pub fn dispatch_nested_fling(&mut self, velocity: Velocity, consumed: bool) -> bool {
        self.active_parent()
            .and_then(|parent| with_parent(&parent, |p| p.on_nested_fling(velocity, consumed)))
            .unwrap_or(false)
    }

    /// Stops any session; called when the owner leaves the window.
    pub fn on_detached_from_window(&mut self) {
        self.stop_nested_scroll();
    }

    fn live_parent(&self) -> Option<Rc<RefCell<dyn NestedScrollingParent>>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    fn active_parent(&self) -> Option<Rc<RefCell<dyn NestedScrollingParent>>> {
        if !self.enabled || self.active_axes.is_none() {
            return None;
        }
        self.live_parent()
    }
}

impl std::fmt::Debug for NestedScrollingChildHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NestedScrollingChildHelper")
            .field("enabled", &self.enabled)
            .field("has_parent", &self.live_parent().is_some())
            .field("active_axes", &self.active_axes)
            .finish()
    }
}

fn with_parent<R>(
    parent: &Rc<RefCell<dyn NestedScrollingParent>>,
    f: impl FnOnce(&mut dyn NestedScrollingParent) -> R,
) -> Option<R> {
    match parent.try_borrow_mut() {
        Ok(mut parent) => Some(f(&mut *parent)),
        Err(_) => {
            log::warn!("nested scroll parent is already borrowed, dropping dispatch");
            None
        }
    }
}
