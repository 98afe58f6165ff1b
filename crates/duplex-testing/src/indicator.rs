//! Indicator that records what the container asks of it.

use std::cell::RefCell;
use std::rc::Rc;

use duplex_refresh::{AnimationPhase, Indicator, IndicatorModel, IndicatorSize, TransitionKind};
use duplex_ui_graphics::Color;

#[derive(Debug, Default)]
pub struct IndicatorLog {
    pub model: IndicatorModel,
    pub spin_starts: usize,
    pub spin_stops: usize,
    pub animation_events: Vec<(TransitionKind, AnimationPhase)>,
}

impl IndicatorLog {
    /// How many runs of `kind` were started.
    pub fn started(&self, kind: TransitionKind) -> usize {
        self.count(kind, AnimationPhase::Start)
    }

    pub fn ended(&self, kind: TransitionKind) -> usize {
        self.count(kind, AnimationPhase::End)
    }

    fn count(&self, kind: TransitionKind, phase: AnimationPhase) -> usize {
        self.animation_events
            .iter()
            .filter(|(k, p)| *k == kind && *p == phase)
            .count()
    }
}

/// [`Indicator`] backed by an [`IndicatorModel`] whose log stays readable
/// after the indicator is handed to the container.
#[derive(Clone, Default)]
pub struct RecordingIndicator {
    log: Rc<RefCell<IndicatorLog>>,
}

impl RecordingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Rc<RefCell<IndicatorLog>> {
        Rc::clone(&self.log)
    }
}

impl Indicator for RecordingIndicator {
    fn set_visible(&mut self, visible: bool) {
        self.log.borrow_mut().model.set_visible(visible);
    }

    fn is_visible(&self) -> bool {
        self.log.borrow().model.is_visible()
    }

    fn set_offset(&mut self, offset: f32) {
        self.log.borrow_mut().model.set_offset(offset);
    }

    fn offset(&self) -> f32 {
        self.log.borrow().model.offset()
    }

    fn set_scale(&mut self, scale: f32) {
        self.log.borrow_mut().model.set_scale(scale);
    }

    fn scale(&self) -> f32 {
        self.log.borrow().model.scale()
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.log.borrow_mut().model.set_alpha(alpha);
    }

    fn alpha(&self) -> u8 {
        self.log.borrow().model.alpha()
    }

    fn set_arc(&mut self, start: f32, end: f32) {
        self.log.borrow_mut().model.set_arc(start, end);
    }

    fn set_arrow_enabled(&mut self, enabled: bool) {
        self.log.borrow_mut().model.set_arrow_enabled(enabled);
    }

    fn set_arrow_scale(&mut self, scale: f32) {
        self.log.borrow_mut().model.set_arrow_scale(scale);
    }

    fn set_progress_rotation(&mut self, rotation: f32) {
        self.log.borrow_mut().model.set_progress_rotation(rotation);
    }

    fn start_spinning(&mut self) {
        let mut log = self.log.borrow_mut();
        log.spin_starts += 1;
        log.model.start_spinning();
    }

    fn stop_spinning(&mut self) {
        let mut log = self.log.borrow_mut();
        if log.model.is_spinning() {
            log.spin_stops += 1;
        }
        log.model.stop_spinning();
    }

    fn is_spinning(&self) -> bool {
        self.log.borrow().model.is_spinning()
    }

    fn set_background_color(&mut self, color: Color) {
        self.log.borrow_mut().model.set_background_color(color);
    }

    fn set_color_scheme(&mut self, colors: &[Color]) {
        self.log.borrow_mut().model.set_color_scheme(colors);
    }

    fn set_size(&mut self, size: IndicatorSize) {
        self.log.borrow_mut().model.set_size(size);
    }

    fn on_animation_event(&mut self, kind: TransitionKind, phase: AnimationPhase) {
        self.log.borrow_mut().animation_events.push((kind, phase));
    }
}
