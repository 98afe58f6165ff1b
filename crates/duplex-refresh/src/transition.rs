//! Indicator animations as plain values.
//!
//! A [`Transition`] knows where it starts and ends and maps an eased fraction
//! to the visual properties it touches. It never mutates anything itself; the
//! edge controller applies the [`VisualUpdate`] and runs the completion step.

use duplex_animation::{AnimationSpec, Easing, Lerp};

pub const DECELERATE_INTERPOLATION_FACTOR: f32 = 2.0;
pub const SCALE_DOWN_DURATION: u64 = 150;
pub const ALPHA_ANIMATION_DURATION: u64 = 300;
pub const ANIMATE_TO_TRIGGER_DURATION: u64 = 200;
pub const ANIMATE_TO_START_DURATION: u64 = 200;
/// Duration of the scale-up shown for a programmatic refresh.
pub const MEDIUM_ANIMATION_DURATION: u64 = 400;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Released past the trigger: move to the hover offset.
    Settle,
    /// Programmatic refresh: grow in place at the hover offset.
    ScaleUp,
    /// Shrink to nothing.
    ScaleDown,
    /// Released short of the trigger: slide back to rest.
    ReturnToStart,
    /// Released short of the trigger while scaling with the drag.
    ScaleDownToStart,
    /// Fade toward the starting or full alpha.
    Alpha,
}

/// Properties a transition sets on a given frame. `None` leaves the
/// indicator's value alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisualUpdate {
    pub offset: Option<f32>,
    pub scale: Option<f32>,
    pub alpha: Option<u8>,
    pub arrow_scale: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    kind: TransitionKind,
    spec: AnimationSpec,
    from_offset: f32,
    to_offset: f32,
    from_scale: f32,
    from_alpha: u8,
    to_alpha: u8,
}

impl Transition {
    fn new(kind: TransitionKind, spec: AnimationSpec) -> Self {
        Self {
            kind,
            spec,
            from_offset: 0.0,
            to_offset: 0.0,
            from_scale: 1.0,
            from_alpha: 0,
            to_alpha: 0,
        }
    }

    pub fn settle(from_offset: f32, hover_offset: f32) -> Self {
        Self {
            from_offset,
            to_offset: hover_offset,
            ..Self::new(
                TransitionKind::Settle,
                AnimationSpec::tween(
                    ANIMATE_TO_TRIGGER_DURATION,
                    Easing::Decelerate(DECELERATE_INTERPOLATION_FACTOR),
                ),
            )
        }
    }

    pub fn scale_up() -> Self {
        Self::new(
            TransitionKind::ScaleUp,
            AnimationSpec::linear(MEDIUM_ANIMATION_DURATION),
        )
    }

    pub fn scale_down() -> Self {
        Self::new(
            TransitionKind::ScaleDown,
            AnimationSpec::linear(SCALE_DOWN_DURATION),
        )
    }

    pub fn return_to_start(from_offset: f32, rest_offset: f32) -> Self {
        Self {
            from_offset,
            to_offset: rest_offset,
            ..Self::new(
                TransitionKind::ReturnToStart,
                AnimationSpec::tween(
                    ANIMATE_TO_START_DURATION,
                    Easing::Decelerate(DECELERATE_INTERPOLATION_FACTOR),
                ),
            )
        }
    }

    pub fn scale_down_to_start(from_offset: f32, rest_offset: f32, from_scale: f32) -> Self {
        Self {
            from_offset,
            to_offset: rest_offset,
            from_scale,
            ..Self::new(
                TransitionKind::ScaleDownToStart,
                AnimationSpec::linear(SCALE_DOWN_DURATION),
            )
        }
    }

    pub fn alpha(from_alpha: u8, to_alpha: u8) -> Self {
        Self {
            from_alpha,
            to_alpha,
            ..Self::new(
                TransitionKind::Alpha,
                AnimationSpec::linear(ALPHA_ANIMATION_DURATION),
            )
        }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Alpha this transition ends at; only meaningful for
    /// [`TransitionKind::Alpha`].
    pub fn target_alpha(&self) -> u8 {
        self.to_alpha
    }

    /// Visuals at eased `fraction` in `[0, 1]`.
    pub fn sample(&self, fraction: f32) -> VisualUpdate {
        let offset = self.from_offset.lerp(&self.to_offset, fraction);
        match self.kind {
            TransitionKind::Settle => VisualUpdate {
                offset: Some(offset),
                arrow_scale: Some(1.0 - fraction),
                ..VisualUpdate::default()
            },
            TransitionKind::ScaleUp => VisualUpdate {
                scale: Some(fraction),
                ..VisualUpdate::default()
            },
            TransitionKind::ScaleDown => VisualUpdate {
                scale: Some(1.0 - fraction),
                ..VisualUpdate::default()
            },
            TransitionKind::ReturnToStart => VisualUpdate {
                offset: Some(offset),
                ..VisualUpdate::default()
            },
            TransitionKind::ScaleDownToStart => VisualUpdate {
                offset: Some(offset),
                scale: Some(self.from_scale.lerp(&0.0, fraction)),
                ..VisualUpdate::default()
            },
            TransitionKind::Alpha => VisualUpdate {
                alpha: Some(self.from_alpha.lerp(&self.to_alpha, fraction)),
                ..VisualUpdate::default()
            },
        }
    }
}
