//! Headless test rule for the duplex refresh container.
//!
//! [`SwipeTestRule`] plays the host: it owns the container, routes touch
//! events the way a view hierarchy does (interception first, then the
//! container once it claims the stream), drives frames on a simulated clock
//! and wires a [`FakeScrollingList`] in as both content and nested-scrolling
//! child.
//!
//! ```
//! use duplex_refresh::{Edge, RefreshConfig};
//! use duplex_testing::SwipeTestRule;
//!
//! let mut rule = SwipeTestRule::new(RefreshConfig::new().with_trigger_distance(100.0));
//! rule.pull(Edge::Top, 120.0);
//! rule.wait_for_idle();
//! assert_eq!(rule.refresh_count(Edge::Top), 1);
//! ```

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::events;
use crate::indicator::{IndicatorLog, RecordingIndicator};
use crate::scroll::{FakeListContent, FakeScrollingList, ScrollReport};
use duplex_foundation::{MotionAction, MotionEvent};
use duplex_refresh::{
    DuplexSwipeRefresh, Edge, EdgeMap, EdgePhase, IndicatorState, RefreshConfig, RefreshEvent,
};
use duplex_ui_graphics::{EdgeInsets, Size};

/// Simulated frame interval.
pub const FRAME_MILLIS: u64 = 16;

/// Default container size.
pub const VIEWPORT: Size = Size::new(400.0, 800.0);

/// Finger steps used by [`SwipeTestRule::drag`].
const DRAG_STEPS: usize = 10;

/// Upper bound on frames [`SwipeTestRule::wait_for_idle`] runs.
const MAX_IDLE_FRAMES: usize = 1_000;

pub struct SwipeTestRule {
    container: Rc<RefCell<DuplexSwipeRefresh>>,
    list: Rc<RefCell<FakeScrollingList>>,
    logs: EdgeMap<Rc<RefCell<IndicatorLog>>>,
    refresh_counts: EdgeMap<Rc<Cell<usize>>>,
    events: Vec<RefreshEvent>,
    frame_time_nanos: u64,
    intercepted: bool,
}

impl SwipeTestRule {
    /// Rule around a container built from `config`, measured to [`VIEWPORT`]
    /// and holding a list that cannot scroll at all.
    ///
    /// # Panics
    ///
    /// When `config` does not validate.
    pub fn new(config: RefreshConfig) -> Self {
        let top = RecordingIndicator::new();
        let bottom = RecordingIndicator::new();
        let logs = EdgeMap::new(top.log(), bottom.log());

        let mut container =
            DuplexSwipeRefresh::with_indicators(config, Box::new(top), Box::new(bottom))
                .unwrap_or_else(|err| panic!("invalid refresh config: {err}"));
        container.measure(VIEWPORT, EdgeInsets::default());

        let refresh_counts = EdgeMap::from_fn(|_| Rc::new(Cell::new(0)));
        for edge in Edge::ALL {
            let count = Rc::clone(&refresh_counts[edge]);
            container.set_on_refresh_listener(edge, move || count.set(count.get() + 1));
        }

        let list = Rc::new(RefCell::new(FakeScrollingList::new(0.0)));
        container.set_content(Box::new(FakeListContent(Rc::clone(&list))));

        let container = Rc::new(RefCell::new(container));
        list.borrow_mut().set_parent(&container);

        Self {
            container,
            list,
            logs,
            refresh_counts,
            events: Vec::new(),
            frame_time_nanos: 0,
            intercepted: false,
        }
    }

    /// Rule with a trigger distance of `trigger` pixels and defaults
    /// otherwise.
    pub fn with_trigger(trigger: f32) -> Self {
        Self::new(RefreshConfig::new().with_trigger_distance(trigger))
    }

    pub fn container(&self) -> Ref<'_, DuplexSwipeRefresh> {
        self.container.borrow()
    }

    pub fn container_mut(&self) -> RefMut<'_, DuplexSwipeRefresh> {
        self.container.borrow_mut()
    }

    /// Shared handle, for wiring ancestors or extra children.
    pub fn handle(&self) -> Rc<RefCell<DuplexSwipeRefresh>> {
        Rc::clone(&self.container)
    }

    pub fn list(&self) -> RefMut<'_, FakeScrollingList> {
        self.list.borrow_mut()
    }

    pub fn indicator_log(&self, edge: Edge) -> Ref<'_, IndicatorLog> {
        self.logs[edge].borrow()
    }

    pub fn state(&self, edge: Edge) -> IndicatorState {
        self.container.borrow().indicator_state(edge)
    }

    pub fn phase(&self, edge: Edge) -> EdgePhase {
        self.container.borrow().edge_phase(edge)
    }

    /// How many times `edge`'s refresh listener fired.
    pub fn refresh_count(&self, edge: Edge) -> usize {
        self.refresh_counts[edge].get()
    }

    /// Refresh events returned by frames so far, oldest first.
    pub fn refresh_events(&self) -> &[RefreshEvent] {
        &self.events
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Runs one frame.
    pub fn frame(&mut self) {
        self.frame_time_nanos += FRAME_MILLIS * 1_000_000;
        let events = self
            .container
            .borrow_mut()
            .advance_frame(self.frame_time_nanos);
        self.events.extend(events);
    }

    /// Runs frames covering at least `millis` of simulated time.
    pub fn advance_time(&mut self, millis: u64) {
        let frames = millis.div_ceil(FRAME_MILLIS);
        for _ in 0..frames {
            self.frame();
        }
    }

    /// Runs frames until no animation is left.
    ///
    /// # Panics
    ///
    /// When animations are still running after a generous number of frames.
    pub fn wait_for_idle(&mut self) {
        for _ in 0..MAX_IDLE_FRAMES {
            if !self.container.borrow().needs_frame() {
                log::trace!("idle at {}ms", self.frame_time_nanos / 1_000_000);
                return;
            }
            self.frame();
        }
        panic!("container still animating after {MAX_IDLE_FRAMES} frames");
    }

    /// Routes `event` like a parent view would. Returns whether the
    /// container handled it.
    pub fn dispatch(&mut self, event: &MotionEvent) -> bool {
        if event.action == MotionAction::Down {
            self.intercepted = false;
        }
        log::trace!(
            "dispatching {:?} at {:?} (intercepted: {})",
            event.action,
            event.y(0),
            self.intercepted
        );
        let handled = if self.intercepted {
            self.container.borrow_mut().on_touch_event(event)
        } else {
            let intercepted = self.container.borrow_mut().on_intercept_touch_event(event);
            self.intercepted = intercepted;
            intercepted
        };
        if matches!(event.action, MotionAction::Up | MotionAction::Cancel) {
            self.intercepted = false;
        }
        handled
    }

    /// Whether the container claimed the stream in progress.
    pub fn is_intercepted(&self) -> bool {
        self.intercepted
    }

    pub fn touch_down(&mut self, y: f32) -> bool {
        self.dispatch(&events::down(y))
    }

    pub fn touch_move(&mut self, y: f32) -> bool {
        self.dispatch(&events::move_to(y))
    }

    pub fn touch_up(&mut self, y: f32) -> bool {
        self.dispatch(&events::up(y))
    }

    pub fn touch_cancel(&mut self, y: f32) -> bool {
        self.dispatch(&events::cancel(y))
    }

    /// Presses at `from_y` and moves to `to_y` in even steps without lifting.
    pub fn drag_without_release(&mut self, from_y: f32, to_y: f32) {
        self.touch_down(from_y);
        let step = (to_y - from_y) / DRAG_STEPS as f32;
        for i in 1..=DRAG_STEPS {
            self.touch_move(from_y + step * i as f32);
        }
    }

    /// Presses at `from_y`, moves to `to_y` and lifts there.
    pub fn drag(&mut self, from_y: f32, to_y: f32) {
        self.drag_without_release(from_y, to_y);
        self.touch_up(to_y);
    }

    /// Finger travel that pulls `edge` by `overscroll` pixels, slop included.
    pub fn finger_travel(&self, edge: Edge, overscroll: f32) -> f32 {
        let slop = self.container.borrow().thresholds().touch_slop;
        edge.sign() * (slop + overscroll / duplex_foundation::DRAG_RATE)
    }

    /// Drags from the middle of the viewport so that `edge` is pulled by
    /// `overscroll` pixels at release.
    pub fn pull(&mut self, edge: Edge, overscroll: f32) {
        let from = VIEWPORT.height / 2.0;
        let to = from + self.finger_travel(edge, overscroll);
        self.drag(from, to);
    }

    /// Starts a nested-scroll session from the list.
    pub fn start_nested_scroll(&mut self) -> bool {
        self.list.borrow_mut().start_nested_scroll()
    }

    /// Scrolls the list by `dy`; positive moves content up.
    pub fn nested_scroll_by(&mut self, dy: f32) -> ScrollReport {
        self.list.borrow_mut().scroll_by(dy)
    }

    pub fn stop_nested_scroll(&mut self) {
        self.list.borrow_mut().stop_nested_scroll();
    }

    /// Full nested gesture: start, scroll through `deltas`, stop.
    pub fn nested_scroll(&mut self, deltas: &[f32]) -> Vec<ScrollReport> {
        self.start_nested_scroll();
        let reports = deltas.iter().map(|dy| self.nested_scroll_by(*dy)).collect();
        self.stop_nested_scroll();
        reports
    }
}
