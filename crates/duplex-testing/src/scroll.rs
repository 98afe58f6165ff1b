//! Fake nested-scrolling participants.

use std::cell::RefCell;
use std::rc::Rc;

use duplex_foundation::{
    NestedScrollingChildHelper, NestedScrollingParent, ScrollAxes, ScrollDelta, Velocity,
};
use duplex_refresh::ScrollableContent;

/// What happened to one `scroll_by` call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollReport {
    /// Taken by the parent chain before the list scrolled.
    pub pre_consumed: f32,
    /// Scrolled by the list itself.
    pub scrolled: f32,
    /// Left over and offered to the parent chain afterwards.
    pub unconsumed: f32,
    /// How far the parent chain moved the list in the window.
    pub offset_in_window: f32,
}

/// A vertically scrolling list of fixed length that speaks the child side of
/// the nested-scrolling protocol.
#[derive(Debug)]
pub struct FakeScrollingList {
    scroll_offset: f32,
    max_scroll: f32,
    helper: NestedScrollingChildHelper,
}

impl FakeScrollingList {
    /// List scrolled to the top that can scroll `max_scroll` pixels.
    pub fn new(max_scroll: f32) -> Self {
        let mut helper = NestedScrollingChildHelper::new();
        helper.set_nested_scrolling_enabled(true);
        Self {
            scroll_offset: 0.0,
            max_scroll: max_scroll.max(0.0),
            helper,
        }
    }

    pub fn set_parent<P: NestedScrollingParent + 'static>(&mut self, parent: &Rc<RefCell<P>>) {
        self.helper.set_parent(parent);
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll);
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    pub fn set_max_scroll(&mut self, max_scroll: f32) {
        self.max_scroll = max_scroll.max(0.0);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll);
    }

    pub fn can_scroll(&self, direction: i32) -> bool {
        if direction < 0 {
            self.scroll_offset > 0.0
        } else {
            self.scroll_offset < self.max_scroll
        }
    }

    pub fn helper(&self) -> &NestedScrollingChildHelper {
        &self.helper
    }

    pub fn set_nested_scrolling_enabled(&mut self, enabled: bool) {
        self.helper.set_nested_scrolling_enabled(enabled);
    }

    pub fn start_nested_scroll(&mut self) -> bool {
        self.helper.start_nested_scroll(ScrollAxes::VERTICAL)
    }

    pub fn stop_nested_scroll(&mut self) {
        self.helper.stop_nested_scroll();
    }

    /// Scrolls by `dy` (positive moves content up), offering the delta to the
    /// parent chain before and after scrolling itself.
    pub fn scroll_by(&mut self, dy: f32) -> ScrollReport {
        let pre = self.helper.dispatch_nested_pre_scroll(ScrollDelta::vertical(dy));
        let remaining = dy - pre.y;

        let target = (self.scroll_offset + remaining).clamp(0.0, self.max_scroll);
        let scrolled = target - self.scroll_offset;
        self.scroll_offset = target;

        let unconsumed = remaining - scrolled;
        let offset = self.helper.dispatch_nested_scroll(
            ScrollDelta::vertical(scrolled),
            ScrollDelta::vertical(unconsumed),
        );
        ScrollReport {
            pre_consumed: pre.y,
            scrolled,
            unconsumed,
            offset_in_window: offset.y,
        }
    }

    /// Offers a fling to the parent chain; returns whether anyone took it.
    pub fn fling(&mut self, velocity_y: f32) -> bool {
        let velocity = Velocity::new(0.0, velocity_y);
        if self.helper.dispatch_nested_pre_fling(velocity) {
            return true;
        }
        let can_scroll = self.can_scroll(if velocity_y < 0.0 { -1 } else { 1 });
        self.helper.dispatch_nested_fling(velocity, can_scroll)
    }
}

/// Shares a [`FakeScrollingList`] with the container as its content.
#[derive(Clone)]
pub struct FakeListContent(pub Rc<RefCell<FakeScrollingList>>);

impl ScrollableContent for FakeListContent {
    fn can_scroll_vertically(&self, direction: i32) -> bool {
        self.0
            .try_borrow()
            .map(|list| list.can_scroll(direction))
            .unwrap_or(false)
    }

    fn is_nested_scrolling_enabled(&self) -> bool {
        self.0
            .try_borrow()
            .map(|list| list.helper().is_nested_scrolling_enabled())
            .unwrap_or(false)
    }
}

/// Outer nested-scrolling parent with a scroll budget it consumes from.
#[derive(Debug, Default)]
pub struct FakeAncestor {
    /// Pixels of pre-scroll it will still take, in either direction.
    pub pre_scroll_budget: f32,
    /// Pixels of leftover scroll it will still take.
    pub scroll_budget: f32,
    pub accept_vertical: bool,
    pub consume_flings: bool,
    pub started: usize,
    pub stopped: usize,
    pub pre_scrolls: Vec<ScrollDelta>,
    pub scrolls: Vec<ScrollDelta>,
    pub flings: Vec<Velocity>,
    axes: ScrollAxes,
}

impl FakeAncestor {
    /// Accepts vertical sessions and consumes nothing.
    pub fn accepting() -> Self {
        Self {
            accept_vertical: true,
            ..Self::default()
        }
    }

    pub fn with_pre_scroll_budget(mut self, budget: f32) -> Self {
        self.pre_scroll_budget = budget;
        self
    }

    pub fn with_scroll_budget(mut self, budget: f32) -> Self {
        self.scroll_budget = budget;
        self
    }

    pub fn consuming_flings(mut self) -> Self {
        self.consume_flings = true;
        self
    }

    fn take(budget: &mut f32, dy: f32) -> f32 {
        let taken = dy.abs().min(*budget);
        *budget -= taken;
        taken.copysign(dy)
    }
}

impl NestedScrollingParent for FakeAncestor {
    fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        self.accept_vertical && axes.is_vertical()
    }

    fn on_nested_scroll_accepted(&mut self, axes: ScrollAxes) {
        self.started += 1;
        self.axes = axes;
    }

    fn on_nested_pre_scroll(&mut self, delta: ScrollDelta) -> ScrollDelta {
        self.pre_scrolls.push(delta);
        ScrollDelta::vertical(Self::take(&mut self.pre_scroll_budget, delta.y))
    }

    fn on_nested_scroll(&mut self, _consumed: ScrollDelta, unconsumed: ScrollDelta) -> ScrollDelta {
        self.scrolls.push(unconsumed);
        ScrollDelta::vertical(Self::take(&mut self.scroll_budget, unconsumed.y))
    }

    fn on_stop_nested_scroll(&mut self) {
        self.stopped += 1;
        self.axes = ScrollAxes::NONE;
    }

    fn on_nested_pre_fling(&mut self, velocity: Velocity) -> bool {
        self.flings.push(velocity);
        self.consume_flings
    }

    fn on_nested_fling(&mut self, _velocity: Velocity, _consumed: bool) -> bool {
        self.consume_flings
    }

    fn nested_scroll_axes(&self) -> ScrollAxes {
        self.axes
    }
}
