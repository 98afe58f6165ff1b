//! Per-edge indicator state machine.
//!
//! Every change to an indicator goes through an [`EdgeController`]: drags move
//! it directly, everything else runs as a [`Transition`] sampled on the host's
//! frames. At most one main transition runs per edge; starting another cancels
//! the previous run's completion. Fades run in a separate slot that any main
//! transition clears.

use crate::config::{RefreshConfig, Thresholds};
use crate::edge::Edge;
use crate::indicator::{AnimationPhase, Indicator};
use crate::motion::{compute_frame, AlphaTarget, MAX_ALPHA, STARTING_PROGRESS_ALPHA};
use crate::transition::{Transition, TransitionKind, VisualUpdate};
use duplex_animation::{completion_pair, Completion, CompletionSignal, Tween};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgePhase {
    Idle,
    Dragging,
    /// Released short of the trigger, heading back to rest.
    Cancelling,
    /// Heading to the hover offset before spinning.
    Settling,
    Refreshing,
    /// Refresh turned off, shrinking away.
    EndingRefresh,
}

/// What is moving an indicator under the user's finger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    Touch,
    NestedScroll,
}

/// A refresh the host should perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshEvent {
    pub edge: Edge,
}

/// Snapshot of one edge for hosts and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorState {
    pub phase: EdgePhase,
    pub visible: bool,
    pub offset: f32,
    pub scale: f32,
    pub alpha: u8,
    pub refreshing: bool,
    pub being_dragged: bool,
    pub nested_dragging: bool,
}

struct RunningTransition {
    transition: Transition,
    tween: Tween,
    signal: CompletionSignal,
}

impl RunningTransition {
    fn new(transition: Transition) -> Self {
        let (signal, _) = completion_pair();
        Self {
            tween: Tween::new(transition.spec()),
            transition,
            signal,
        }
    }
}

pub struct EdgeController {
    edge: Edge,
    indicator: Box<dyn Indicator>,
    phase: EdgePhase,
    refreshing: bool,
    notify: bool,
    drag: Option<DragSource>,
    current_offset: f32,
    main: Option<RunningTransition>,
    alpha: Option<RunningTransition>,
    returning_to_start: bool,
}

impl EdgeController {
    pub fn new(edge: Edge, indicator: Box<dyn Indicator>, thresholds: &Thresholds) -> Self {
        let mut controller = Self {
            edge,
            indicator,
            phase: EdgePhase::Idle,
            refreshing: false,
            notify: false,
            drag: None,
            current_offset: thresholds.rest[edge],
            main: None,
            alpha: None,
            returning_to_start: false,
        };
        controller.reset(thresholds);
        controller
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn phase(&self) -> EdgePhase {
        self.phase
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn drag_source(&self) -> Option<DragSource> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_returning_to_start(&self) -> bool {
        self.returning_to_start
    }

    pub fn clear_returning_to_start(&mut self) {
        self.returning_to_start = false;
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn indicator(&self) -> &dyn Indicator {
        self.indicator.as_ref()
    }

    pub fn needs_frame(&self) -> bool {
        self.main.is_some() || self.alpha.is_some()
    }

    /// Observer for the main transition in flight, if any.
    pub fn completion(&self) -> Option<Completion> {
        self.main.as_ref().map(|run| run.signal.completion())
    }

    pub fn running_transition(&self) -> Option<TransitionKind> {
        self.main.as_ref().map(|run| run.transition.kind())
    }

    pub fn state(&self) -> IndicatorState {
        IndicatorState {
            phase: self.phase,
            visible: self.indicator.is_visible(),
            offset: self.indicator.offset(),
            scale: self.indicator.scale(),
            alpha: self.indicator.alpha(),
            refreshing: self.refreshing,
            being_dragged: self.drag == Some(DragSource::Touch),
            nested_dragging: self.drag == Some(DragSource::NestedScroll),
        }
    }

    pub fn apply_style(&mut self, config: &RefreshConfig) {
        self.indicator.set_background_color(config.background_color);
        self.indicator.set_color_scheme(&config.color_scheme);
        self.indicator.set_size(config.indicator_size);
    }

    /// Drops every animation and hides the indicator at its rest offset.
    pub fn reset(&mut self, thresholds: &Thresholds) {
        self.cancel_main();
        self.cancel_alpha();
        self.indicator.stop_spinning();
        self.indicator.set_visible(false);
        self.indicator.set_alpha(MAX_ALPHA);
        self.indicator
            .set_scale(if thresholds.scale_with_drag { 0.0 } else { 1.0 });
        self.move_to(thresholds.rest[self.edge]);
        self.drag = None;
        self.returning_to_start = false;
        self.set_phase(EdgePhase::Idle);
    }

    /// Reset that also drops a refresh in progress.
    pub fn force_reset(&mut self, thresholds: &Thresholds) {
        self.refreshing = false;
        self.notify = false;
        self.reset(thresholds);
    }

    /// Puts an idle indicator back on its rest offset, e.g. after the rest
    /// offset moved with the container height.
    pub fn relocate(&mut self, thresholds: &Thresholds) {
        if self.phase == EdgePhase::Idle {
            self.move_to(thresholds.rest[self.edge]);
        }
    }

    pub fn begin_drag(&mut self, source: DragSource) {
        if self.refreshing {
            return;
        }
        self.cancel_main();
        self.indicator.stop_spinning();
        if source == DragSource::Touch {
            self.cancel_alpha();
            self.indicator.set_alpha(STARTING_PROGRESS_ALPHA);
        }
        self.drag = Some(source);
        self.set_phase(EdgePhase::Dragging);
    }

    /// Follows a pull of `overscroll` pixels.
    pub fn move_spinner(&mut self, overscroll: f32, thresholds: &Thresholds) {
        if self.refreshing {
            return;
        }
        let frame = compute_frame(overscroll, self.edge, thresholds);

        self.indicator.set_arrow_enabled(true);
        if !self.indicator.is_visible() {
            self.indicator.set_visible(true);
        }
        self.indicator.set_scale(frame.scale);

        let alpha = self.indicator.alpha();
        match frame.alpha_target {
            AlphaTarget::Starting => {
                if alpha > STARTING_PROGRESS_ALPHA && !self.alpha_running_to(STARTING_PROGRESS_ALPHA)
                {
                    self.start_alpha(STARTING_PROGRESS_ALPHA);
                }
            }
            AlphaTarget::Max => {
                if alpha < MAX_ALPHA && !self.alpha_running_to(MAX_ALPHA) {
                    self.start_alpha(MAX_ALPHA);
                }
            }
        }

        self.indicator.set_arc(0.0, frame.arc_end);
        self.indicator.set_arrow_scale(frame.arrow_scale);
        self.indicator.set_progress_rotation(frame.rotation);
        self.move_to(frame.target_offset);
    }

    /// Ends a drag with a final pull of `overscroll` pixels toward the
    /// content; non-positive pulls never trigger.
    pub fn finish_spinner(&mut self, overscroll: f32, thresholds: &Thresholds) {
        self.drag = None;
        if self.refreshing {
            return;
        }
        if overscroll > thresholds.trigger {
            self.update_refreshing(true, true, thresholds);
            return;
        }

        self.refreshing = false;
        self.indicator.set_arc(0.0, 0.0);
        let rest = thresholds.rest[self.edge];
        let transition = if thresholds.scale_with_drag {
            Transition::scale_down_to_start(self.current_offset, rest, self.indicator.scale())
        } else {
            Transition::return_to_start(self.current_offset, rest)
        };
        self.start_main(transition);
        self.returning_to_start = true;
        self.indicator.set_arrow_enabled(false);
        self.set_phase(EdgePhase::Cancelling);
    }

    /// Programmatic refresh toggle. Turning a refresh on jumps the indicator
    /// to its hover offset and grows it there; `notify` decides whether the
    /// refresh event fires once it is showing.
    pub fn set_refreshing(&mut self, refreshing: bool, notify: bool, thresholds: &Thresholds) {
        if refreshing && !self.refreshing {
            self.refreshing = true;
            self.notify = notify;
            self.drag = None;
            self.move_to(thresholds.hover[self.edge]);
            self.indicator.set_visible(true);
            self.indicator.set_scale(0.0);
            self.start_main(Transition::scale_up());
            self.indicator.set_alpha(MAX_ALPHA);
            self.set_phase(EdgePhase::Settling);
        } else {
            self.update_refreshing(refreshing, notify, thresholds);
        }
    }

    fn update_refreshing(&mut self, refreshing: bool, notify: bool, thresholds: &Thresholds) {
        if self.refreshing == refreshing {
            return;
        }
        self.notify = notify;
        self.refreshing = refreshing;
        if refreshing {
            let hover = thresholds.hover[self.edge];
            self.start_main(Transition::settle(self.current_offset, hover));
            self.set_phase(EdgePhase::Settling);
        } else {
            self.start_main(Transition::scale_down());
            self.set_phase(EdgePhase::EndingRefresh);
        }
    }

    /// Advances running transitions to `frame_time_nanos`.
    pub fn on_frame(&mut self, frame_time_nanos: u64, thresholds: &Thresholds) -> Option<RefreshEvent> {
        if let Some(run) = self.alpha.as_mut() {
            let sample = run.tween.sample(frame_time_nanos);
            let update = run.transition.sample(sample.eased);
            self.apply(update);
            if sample.finished {
                if let Some(run) = self.alpha.take() {
                    self.indicator
                        .on_animation_event(run.transition.kind(), AnimationPhase::End);
                    run.signal.finish();
                }
            }
        }

        let run = self.main.as_mut()?;
        let sample = run.tween.sample(frame_time_nanos);
        let update = run.transition.sample(sample.eased);
        self.apply(update);
        if !sample.finished {
            return None;
        }
        let run = self.main.take()?;
        let kind = run.transition.kind();
        self.indicator.on_animation_event(kind, AnimationPhase::End);
        run.signal.finish();
        self.complete(kind, thresholds)
    }

    fn complete(&mut self, kind: TransitionKind, thresholds: &Thresholds) -> Option<RefreshEvent> {
        match kind {
            TransitionKind::Settle | TransitionKind::ScaleUp => {
                if !self.refreshing {
                    self.reset(thresholds);
                    return None;
                }
                self.cancel_alpha();
                self.indicator.set_alpha(MAX_ALPHA);
                self.indicator.start_spinning();
                self.move_to(thresholds.hover[self.edge]);
                self.set_phase(EdgePhase::Refreshing);
                if self.notify {
                    log::debug!("{} refresh triggered", self.edge);
                    Some(RefreshEvent { edge: self.edge })
                } else {
                    None
                }
            }
            TransitionKind::ReturnToStart => {
                self.start_main(Transition::scale_down());
                None
            }
            TransitionKind::ScaleDown | TransitionKind::ScaleDownToStart => {
                self.reset(thresholds);
                None
            }
            TransitionKind::Alpha => None,
        }
    }

    fn apply(&mut self, update: VisualUpdate) {
        if let Some(offset) = update.offset {
            self.move_to(offset);
        }
        if let Some(scale) = update.scale {
            self.indicator.set_scale(scale);
        }
        if let Some(alpha) = update.alpha {
            self.indicator.set_alpha(alpha);
        }
        if let Some(arrow_scale) = update.arrow_scale {
            self.indicator.set_arrow_scale(arrow_scale);
        }
    }

    fn move_to(&mut self, offset: f32) {
        self.indicator.set_offset(offset);
        self.current_offset = offset;
    }

    fn start_main(&mut self, transition: Transition) {
        self.cancel_main();
        self.cancel_alpha();
        self.indicator
            .on_animation_event(transition.kind(), AnimationPhase::Start);
        self.main = Some(RunningTransition::new(transition));
    }

    fn cancel_main(&mut self) {
        if let Some(run) = self.main.take() {
            self.indicator
                .on_animation_event(run.transition.kind(), AnimationPhase::End);
            run.signal.cancel();
        }
    }

    fn start_alpha(&mut self, target: u8) {
        self.cancel_alpha();
        let transition = Transition::alpha(self.indicator.alpha(), target);
        self.indicator
            .on_animation_event(transition.kind(), AnimationPhase::Start);
        self.alpha = Some(RunningTransition::new(transition));
    }

    fn cancel_alpha(&mut self) {
        if let Some(run) = self.alpha.take() {
            self.indicator
                .on_animation_event(run.transition.kind(), AnimationPhase::End);
            run.signal.cancel();
        }
    }

    fn alpha_running_to(&self, target: u8) -> bool {
        self.alpha
            .as_ref()
            .is_some_and(|run| run.transition.target_alpha() == target)
    }

    fn set_phase(&mut self, phase: EdgePhase) {
        if self.phase != phase {
            log::debug!("{} indicator: {:?} -> {:?}", self.edge, self.phase, phase);
            self.phase = phase;
        }
    }
}

impl std::fmt::Debug for EdgeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeController")
            .field("edge", &self.edge)
            .field("phase", &self.phase)
            .field("refreshing", &self.refreshing)
            .field("drag", &self.drag)
            .field("current_offset", &self.current_offset)
            .field("main", &self.running_transition())
            .finish()
    }
}
