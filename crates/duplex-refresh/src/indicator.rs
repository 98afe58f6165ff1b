//! The progress indicator as seen by the container.
//!
//! The container only moves, scales and fades the indicator and feeds it a
//! progress value; drawing the arc is the implementor's business.

use crate::config::IndicatorSize;
use crate::motion::MAX_ALPHA;
use crate::transition::TransitionKind;
use duplex_ui_graphics::Color;
use smallvec::SmallVec;

/// Lifecycle notification for one animation run on an indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationPhase {
    Start,
    End,
}

pub trait Indicator {
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;

    /// Top of the indicator in container coordinates.
    fn set_offset(&mut self, offset: f32);
    fn offset(&self) -> f32;

    fn set_scale(&mut self, scale: f32);
    fn scale(&self) -> f32;

    fn set_alpha(&mut self, alpha: u8);
    fn alpha(&self) -> u8;

    /// Arc trim as fractions of a full turn.
    fn set_arc(&mut self, start: f32, end: f32);
    fn set_arrow_enabled(&mut self, enabled: bool);
    fn set_arrow_scale(&mut self, scale: f32);
    fn set_progress_rotation(&mut self, rotation: f32);

    fn start_spinning(&mut self);
    fn stop_spinning(&mut self);
    fn is_spinning(&self) -> bool;

    fn set_background_color(&mut self, color: Color);
    fn set_color_scheme(&mut self, colors: &[Color]);
    fn set_size(&mut self, size: IndicatorSize);

    /// Called once when an animation run starts and once when it ends,
    /// whether it finished or was superseded.
    fn on_animation_event(&mut self, _kind: TransitionKind, _phase: AnimationPhase) {}
}

/// Headless indicator that stores everything it is told, for a renderer to
/// read back.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorModel {
    pub visible: bool,
    pub offset: f32,
    pub scale: f32,
    pub alpha: u8,
    pub arc_start: f32,
    pub arc_end: f32,
    pub arrow_enabled: bool,
    pub arrow_scale: f32,
    pub rotation: f32,
    pub spinning: bool,
    pub background_color: Color,
    pub color_scheme: SmallVec<[Color; 4]>,
    pub size: IndicatorSize,
}

impl Default for IndicatorModel {
    fn default() -> Self {
        Self {
            visible: false,
            offset: 0.0,
            scale: 1.0,
            alpha: MAX_ALPHA,
            arc_start: 0.0,
            arc_end: 0.0,
            arrow_enabled: false,
            arrow_scale: 0.0,
            rotation: 0.0,
            spinning: false,
            background_color: Color::WHITE,
            color_scheme: SmallVec::new(),
            size: IndicatorSize::Default,
        }
    }
}

impl IndicatorModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Indicator for IndicatorModel {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    fn offset(&self) -> f32 {
        self.offset
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    fn alpha(&self) -> u8 {
        self.alpha
    }

    fn set_arc(&mut self, start: f32, end: f32) {
        self.arc_start = start;
        self.arc_end = end;
    }

    fn set_arrow_enabled(&mut self, enabled: bool) {
        self.arrow_enabled = enabled;
    }

    fn set_arrow_scale(&mut self, scale: f32) {
        self.arrow_scale = scale;
    }

    fn set_progress_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    fn start_spinning(&mut self) {
        self.spinning = true;
    }

    fn stop_spinning(&mut self) {
        self.spinning = false;
    }

    fn is_spinning(&self) -> bool {
        self.spinning
    }

    fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    fn set_color_scheme(&mut self, colors: &[Color]) {
        self.color_scheme = colors.iter().copied().collect();
    }

    fn set_size(&mut self, size: IndicatorSize) {
        self.size = size;
    }
}
