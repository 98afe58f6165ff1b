//! The duplex swipe-refresh container.
//!
//! [`DuplexSwipeRefresh`] wraps exactly one scrollable child and owns two
//! indicators. Hosts feed it touch events, nested-scroll callbacks from the
//! child and frame timestamps; it moves the indicators and reports refreshes
//! through listeners and the return value of [`DuplexSwipeRefresh::advance_frame`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::classifier::{DragSession, GestureClassifier, IndicatorAction, TouchOutcome};
use crate::config::{hover_travel_between, ConfigError, IndicatorSize, RefreshConfig, Thresholds};
use crate::content::{ChildScrollCallback, RefreshListener, ScrollableContent};
use crate::edge::{Edge, EdgeMap};
use crate::indicator::{Indicator, IndicatorModel};
use crate::layout::{self, DrawLayer, RefreshLayout, DRAW_ORDER};
use crate::nested::NestedScrollSession;
use crate::state::{DragSource, EdgeController, EdgePhase, IndicatorState, RefreshEvent};
use duplex_animation::Completion;
use duplex_foundation::{
    MotionAction, MotionEvent, NestedScrollingChildHelper, NestedScrollingParent, ScrollAxes,
    ScrollDelta, Velocity,
};
use duplex_ui_graphics::{Color, EdgeInsets, Size};
use smallvec::SmallVec;

pub struct DuplexSwipeRefresh {
    config: RefreshConfig,
    thresholds: Thresholds,
    size: Size,
    padding: EdgeInsets,
    edges: EdgeMap<EdgeController>,
    classifier: GestureClassifier,
    nested: NestedScrollSession,
    child_helper: NestedScrollingChildHelper,
    content: Option<Box<dyn ScrollableContent>>,
    child_scroll_callback: Option<ChildScrollCallback>,
    listeners: EdgeMap<Option<RefreshListener>>,
    disallow_intercept: bool,
}

impl DuplexSwipeRefresh {
    /// Container with headless [`IndicatorModel`]s.
    pub fn new(config: RefreshConfig) -> Result<Self, ConfigError> {
        Self::with_indicators(
            config,
            Box::new(IndicatorModel::new()),
            Box::new(IndicatorModel::new()),
        )
    }

    pub fn with_indicators(
        config: RefreshConfig,
        top: Box<dyn Indicator>,
        bottom: Box<dyn Indicator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let thresholds = Thresholds::resolve(&config, 0.0);
        let mut edges = EdgeMap::new(
            EdgeController::new(Edge::Top, top, &thresholds),
            EdgeController::new(Edge::Bottom, bottom, &thresholds),
        );
        for edge in Edge::ALL {
            edges[edge].apply_style(&config);
        }
        let mut child_helper = NestedScrollingChildHelper::new();
        child_helper.set_nested_scrolling_enabled(true);
        Ok(Self {
            classifier: GestureClassifier::new(thresholds.touch_slop),
            config,
            thresholds,
            size: Size::ZERO,
            padding: EdgeInsets::default(),
            edges,
            nested: NestedScrollSession::default(),
            child_helper,
            content: None,
            child_scroll_callback: None,
            listeners: EdgeMap::default(),
            disallow_intercept: false,
        })
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn set_content(&mut self, content: Box<dyn ScrollableContent>) {
        self.content = Some(content);
    }

    /// Overrides the content's scroll answers; `None` restores them.
    pub fn set_on_child_scroll_callback(&mut self, callback: Option<ChildScrollCallback>) {
        self.child_scroll_callback = callback;
    }

    /// Whether the content can still scroll toward `edge`, in which case a
    /// pull in that direction belongs to the content.
    pub fn can_child_scroll(&self, edge: Edge) -> bool {
        if let Some(callback) = &self.child_scroll_callback {
            return callback(edge);
        }
        self.content
            .as_ref()
            .is_some_and(|content| content.can_scroll_vertically(edge.content_scroll_direction()))
    }

    pub fn set_on_refresh_listener(&mut self, edge: Edge, listener: impl FnMut() + 'static) {
        self.listeners[edge] = Some(Box::new(listener));
    }

    pub fn set_on_top_refresh_listener(&mut self, listener: impl FnMut() + 'static) {
        self.set_on_refresh_listener(Edge::Top, listener);
    }

    pub fn set_on_bottom_refresh_listener(&mut self, listener: impl FnMut() + 'static) {
        self.set_on_refresh_listener(Edge::Bottom, listener);
    }

    pub fn clear_refresh_listener(&mut self, edge: Edge) {
        self.listeners[edge] = None;
    }

    pub fn is_refreshing(&self, edge: Edge) -> bool {
        self.edges[edge].is_refreshing()
    }

    /// Shows or hides `edge`'s refresh without firing its listener.
    pub fn set_refreshing(&mut self, edge: Edge, refreshing: bool) {
        self.set_refreshing_with_notify(edge, refreshing, false);
    }

    pub fn set_refreshing_with_notify(&mut self, edge: Edge, refreshing: bool, notify: bool) {
        if refreshing && self.classifier.session().locked == Some(edge) {
            self.classifier.clear();
        }
        if refreshing {
            self.nested.release(edge);
        }
        self.edges[edge].set_refreshing(refreshing, notify, &self.thresholds);
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Disabling drops any gesture and refresh in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if !enabled {
            self.force_reset();
        }
    }

    /// The container left the window: everything stops synchronously.
    pub fn on_detached_from_window(&mut self) {
        self.force_reset();
        self.nested = NestedScrollSession::default();
        self.child_helper.on_detached_from_window();
    }

    fn force_reset(&mut self) {
        self.classifier.clear();
        self.nested.clear_pull();
        for edge in Edge::ALL {
            self.edges[edge].force_reset(&self.thresholds);
        }
    }

    pub fn indicator(&self, edge: Edge) -> &dyn Indicator {
        self.edges[edge].indicator()
    }

    pub fn indicator_state(&self, edge: Edge) -> IndicatorState {
        self.edges[edge].state()
    }

    pub fn edge_phase(&self, edge: Edge) -> EdgePhase {
        self.edges[edge].phase()
    }

    pub fn drag_session(&self) -> &DragSession {
        self.classifier.session()
    }

    pub fn nested_session(&self) -> &NestedScrollSession {
        &self.nested
    }

    /// Observer for `edge`'s animation in flight.
    pub fn animation_completion(&self, edge: Edge) -> Option<Completion> {
        self.edges[edge].completion()
    }

    pub fn needs_frame(&self) -> bool {
        self.edges.iter().any(|(_, edge)| edge.needs_frame())
    }

    /// Advances both indicators to `frame_time_nanos`, fires the listeners of
    /// refreshes that became active and returns them.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) -> SmallVec<[RefreshEvent; 2]> {
        let mut events = SmallVec::new();
        for edge in Edge::ALL {
            if let Some(event) = self.edges[edge].on_frame(frame_time_nanos, &self.thresholds) {
                if let Some(listener) = self.listeners[edge].as_mut() {
                    listener();
                }
                events.push(event);
            }
        }
        events
    }

    fn is_returning_to_start(&self) -> bool {
        self.edges
            .iter()
            .any(|(_, edge)| edge.is_returning_to_start())
    }

    fn lockable_edges(&self) -> EdgeMap<bool> {
        EdgeMap::from_fn(|edge| !self.edges[edge].is_refreshing() && !self.can_child_scroll(edge))
    }

    /// Watches a touch stream on its way to the content. Returns `true` once
    /// the container takes the stream over.
    pub fn on_intercept_touch_event(&mut self, event: &MotionEvent) -> bool {
        if event.action == MotionAction::Down {
            self.disallow_intercept = false;
        }
        if !self.touch_gate(event) || self.disallow_intercept {
            return false;
        }
        let lockable = self.lockable_edges();
        let outcome = self.classifier.intercept(event, lockable);
        self.apply_touch_outcome(outcome);
        outcome.handled
    }

    /// Handles a touch stream addressed to the container.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        if !self.touch_gate(event) {
            return false;
        }
        let lockable = self.lockable_edges();
        let outcome = self.classifier.touch(event, lockable);
        self.apply_touch_outcome(outcome);
        outcome.handled
    }

    /// Content asks the container to keep out of the current stream. Ignored
    /// when the content does not take part in nested scrolling, so its
    /// vertical pulls are not lost.
    pub fn request_disallow_intercept_touch_event(&mut self, disallow: bool) {
        let nested_content = self
            .content
            .as_ref()
            .is_some_and(|content| content.is_nested_scrolling_enabled());
        if nested_content {
            self.disallow_intercept = disallow;
        }
    }

    fn touch_gate(&mut self, event: &MotionEvent) -> bool {
        if event.action == MotionAction::Down {
            for edge in Edge::ALL {
                self.edges[edge].clear_returning_to_start();
            }
        }
        self.config.enabled && !self.is_returning_to_start() && !self.nested.is_in_progress()
    }

    fn apply_touch_outcome(&mut self, outcome: TouchOutcome) {
        if let Some(edge) = outcome.lock {
            self.edges[edge].begin_drag(DragSource::Touch);
        }
        match outcome.action {
            IndicatorAction::None => {}
            IndicatorAction::ResetToRest => {
                for edge in Edge::ALL {
                    if !self.edges[edge].is_refreshing() {
                        self.edges[edge].reset(&self.thresholds);
                    }
                }
            }
            IndicatorAction::Drag { edge, overscroll } => {
                self.edges[edge].move_spinner(overscroll, &self.thresholds);
            }
            IndicatorAction::Release { edge, overscroll } => {
                self.edges[edge].finish_spinner(overscroll, &self.thresholds);
            }
            IndicatorAction::Cancel { edge } => {
                self.edges[edge].finish_spinner(0.0, &self.thresholds);
            }
        }
    }

    /// Sets the container size and padding, re-resolving the offsets that
    /// depend on the height.
    pub fn measure(&mut self, size: Size, padding: EdgeInsets) -> Size {
        self.size = size;
        self.padding = padding;
        self.refresh_thresholds();
        layout::measure_content(size, padding)
    }

    pub fn layout(&self) -> RefreshLayout {
        layout::layout(
            self.size,
            self.padding,
            self.thresholds.diameter,
            EdgeMap::from_fn(|edge| self.edges[edge].indicator().offset()),
        )
    }

    pub fn draw_order(&self) -> [DrawLayer; 3] {
        DRAW_ORDER
    }

    fn refresh_thresholds(&mut self) {
        self.thresholds = Thresholds::resolve(&self.config, self.size.height);
        self.classifier.set_touch_slop(self.thresholds.touch_slop);
        for edge in Edge::ALL {
            self.edges[edge].relocate(&self.thresholds);
        }
    }

    pub fn progress_view_start_offset(&self, edge: Edge) -> f32 {
        self.thresholds.rest[edge]
    }

    pub fn progress_view_end_offset(&self, edge: Edge) -> f32 {
        self.thresholds.hover[edge]
    }

    /// Distance from rest at which `edge`'s indicator hovers while refreshing.
    pub fn set_progress_view_end_target(&mut self, edge: Edge, travel: f32) {
        if !travel.is_finite() {
            log::warn!("ignoring non-finite {edge} end target {travel}");
            return;
        }
        self.config.hover_travel[edge] = Some(travel);
        self.refresh_thresholds();
    }

    /// Custom absolute rest (`start`) and hover (`end`) offsets for `edge`.
    pub fn set_progress_view_offset(&mut self, edge: Edge, scale: bool, start: f32, end: f32) {
        if !start.is_finite() || !end.is_finite() {
            log::warn!("ignoring non-finite {edge} offsets {start}..{end}");
            return;
        }
        if hover_travel_between(edge, start, end).is_none() {
            log::warn!("ignoring {edge} offsets {start}..{end}: hover lies behind rest");
            return;
        }
        self.config = self.config.clone().with_offsets(edge, start, end);
        self.config.scale_with_drag = scale;
        self.refresh_thresholds();
        self.edges[edge].reset(&self.thresholds);
    }

    /// Switches scale-with-drag; both indicators are reset.
    pub fn set_progress_view_scale(&mut self, scale: bool) {
        self.config.scale_with_drag = scale;
        self.refresh_thresholds();
        for edge in Edge::ALL {
            self.edges[edge].force_reset(&self.thresholds);
        }
    }

    pub fn set_distance_to_trigger_sync(&mut self, distance: f32) {
        if !(distance.is_finite() && distance > 0.0) {
            log::warn!("ignoring trigger distance {distance}");
            return;
        }
        self.config.trigger_distance = Some(distance);
        self.refresh_thresholds();
    }

    pub fn set_slingshot_distance(&mut self, distance: f32) {
        if !(distance.is_finite() && distance > 0.0) {
            log::warn!("ignoring slingshot distance {distance}");
            return;
        }
        self.config.slingshot_distance = Some(distance);
        self.refresh_thresholds();
    }

    pub fn set_size(&mut self, size: IndicatorSize) {
        self.config.indicator_size = size;
        self.refresh_thresholds();
        for edge in Edge::ALL {
            self.edges[edge].apply_style(&self.config);
        }
    }

    /// Raw-style variant of [`set_size`](Self::set_size); unknown styles are
    /// ignored.
    pub fn set_size_style(&mut self, style: i32) {
        if let Some(size) = IndicatorSize::from_style(style) {
            self.set_size(size);
        }
    }

    pub fn progress_circle_diameter(&self) -> f32 {
        self.thresholds.diameter
    }

    pub fn set_progress_background_color(&mut self, color: Color) {
        self.config.background_color = color;
        for edge in Edge::ALL {
            self.edges[edge].apply_style(&self.config);
        }
    }

    /// First color is also the arc color while pulling. An empty list is
    /// ignored.
    pub fn set_color_scheme_colors(&mut self, colors: &[Color]) {
        if colors.is_empty() {
            log::warn!("ignoring empty color scheme");
            return;
        }
        self.config.color_scheme = colors.iter().copied().collect();
        for edge in Edge::ALL {
            self.edges[edge].apply_style(&self.config);
        }
    }

    // Child side of nested scrolling: the container forwards to its own
    // nested-scrolling parent.

    pub fn set_nested_scrolling_parent<P: NestedScrollingParent + 'static>(
        &mut self,
        parent: &Rc<RefCell<P>>,
    ) {
        self.child_helper.set_parent(parent);
    }

    pub fn set_nested_scrolling_enabled(&mut self, enabled: bool) {
        self.child_helper.set_nested_scrolling_enabled(enabled);
    }

    pub fn is_nested_scrolling_enabled(&self) -> bool {
        self.child_helper.is_nested_scrolling_enabled()
    }

    pub fn has_nested_scrolling_parent(&self) -> bool {
        self.child_helper.has_nested_scrolling_parent()
    }

    pub fn start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        self.child_helper.start_nested_scroll(axes)
    }

    pub fn stop_nested_scroll(&mut self) {
        self.child_helper.stop_nested_scroll();
    }

    pub fn dispatch_nested_pre_scroll(&mut self, delta: ScrollDelta) -> ScrollDelta {
        self.child_helper.dispatch_nested_pre_scroll(delta)
    }

    pub fn dispatch_nested_scroll(
        &mut self,
        consumed: ScrollDelta,
        unconsumed: ScrollDelta,
    ) -> ScrollDelta {
        self.child_helper.dispatch_nested_scroll(consumed, unconsumed)
    }

    pub fn dispatch_nested_pre_fling(&mut self, velocity: Velocity) -> bool {
        self.child_helper.dispatch_nested_pre_fling(velocity)
    }

    pub fn dispatch_nested_fling(&mut self, velocity: Velocity, consumed: bool) -> bool {
        self.child_helper.dispatch_nested_fling(velocity, consumed)
    }
}

impl NestedScrollingParent for DuplexSwipeRefresh {
    fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        self.config.enabled && !self.is_returning_to_start() && axes.is_vertical()
    }

    fn on_nested_scroll_accepted(&mut self, axes: ScrollAxes) {
        self.nested.begin(axes);
        self.child_helper.start_nested_scroll(ScrollAxes::VERTICAL);
    }

    fn on_nested_pre_scroll(&mut self, delta: ScrollDelta) -> ScrollDelta {
        let mut consumed = ScrollDelta::ZERO;
        if let Some(step) = self.nested.take_back(delta.y) {
            consumed.y = step.consumed_y;
            let edge = &mut self.edges[step.edge];
            if step.remaining > 0.0 {
                edge.move_spinner(step.remaining, &self.thresholds);
            } else {
                edge.reset(&self.thresholds);
            }
        }
        consumed += self.child_helper.dispatch_nested_pre_scroll(delta - consumed);
        consumed
    }

    fn on_nested_scroll(&mut self, consumed: ScrollDelta, unconsumed: ScrollDelta) -> ScrollDelta {
        // Ancestors first; whatever they scroll shifts us in the window.
        let offset = self.child_helper.dispatch_nested_scroll(consumed, unconsumed);
        self.nested.set_parent_offset_in_window(offset);

        let dy = unconsumed.y + offset.y;
        let enabled = self.config.enabled;
        let allowed = EdgeMap::from_fn(|edge| enabled && !self.edges[edge].is_refreshing());
        if let Some((edge, total)) = self.nested.accumulate(dy, allowed) {
            let controller = &mut self.edges[edge];
            if controller.drag_source() != Some(DragSource::NestedScroll) {
                controller.begin_drag(DragSource::NestedScroll);
            }
            controller.move_spinner(total, &self.thresholds);
        }
        -offset
    }

    fn on_stop_nested_scroll(&mut self) {
        if let Some((edge, total)) = self.nested.end() {
            self.edges[edge].finish_spinner(total, &self.thresholds);
        }
        for edge in Edge::ALL {
            let controller = &mut self.edges[edge];
            if controller.drag_source() == Some(DragSource::NestedScroll) {
                controller.finish_spinner(0.0, &self.thresholds);
            }
        }
        self.child_helper.stop_nested_scroll();
    }

    fn on_nested_pre_fling(&mut self, velocity: Velocity) -> bool {
        self.child_helper.dispatch_nested_pre_fling(velocity)
    }

    fn on_nested_fling(&mut self, velocity: Velocity, consumed: bool) -> bool {
        self.child_helper.dispatch_nested_fling(velocity, consumed)
    }

    fn nested_scroll_axes(&self) -> ScrollAxes {
        self.nested.axes()
    }
}

impl std::fmt::Debug for DuplexSwipeRefresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuplexSwipeRefresh")
            .field("enabled", &self.config.enabled)
            .field("size", &self.size)
            .field("top", &self.edges.top)
            .field("bottom", &self.edges.bottom)
            .field("drag", self.classifier.session())
            .field("nested", &self.nested)
            .finish()
    }
}
