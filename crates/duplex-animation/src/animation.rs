//! Time-based tweens with easing curves.
//!
//! A [`Tween`] is anchored on the first frame it sees, so a freshly started
//! animation always reports fraction `0.0` on its first frame.

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for u8 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        let start = *self as f32;
        (start + (*target as f32 - start) * fraction)
            .round()
            .clamp(0.0, 255.0) as u8
    }
}

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Decelerating power curve, `1 - (1 - t)^(2 * factor)`.
    ///
    /// A factor of `1.0` is the classic quadratic ease-out; larger factors
    /// front-load more of the motion.
    Decelerate(f32),
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::Decelerate(factor) => decelerate(*factor, fraction),
        }
    }
}

fn decelerate(factor: f32, fraction: f32) -> f32 {
    let fraction = fraction.clamp(0.0, 1.0);
    let remaining = 1.0 - fraction;
    if (factor - 1.0).abs() < f32::EPSILON {
        1.0 - remaining * remaining
    } else {
        1.0 - remaining.powf(2.0 * factor)
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }
}

/// One frame's worth of tween progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    /// Elapsed fraction of the duration, clamped to [0, 1].
    pub linear: f32,
    /// `linear` passed through the spec's easing.
    pub eased: f32,
    /// True once the full duration has elapsed.
    pub finished: bool,
}

/// Progress clock for a single tween run.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
}

impl Tween {
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            spec,
            start_time_nanos: None,
        }
    }

    /// Samples the tween at `frame_time_nanos`.
    ///
    /// Frame times earlier than the anchor are treated as the anchor itself.
    pub fn sample(&mut self, frame_time_nanos: u64) -> TweenSample {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let duration_nanos = (self.spec.duration_millis * 1_000_000).max(1);
        let linear = (elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        let finished = elapsed_nanos >= duration_nanos;

        TweenSample {
            linear,
            eased: if finished {
                1.0
            } else {
                self.spec.easing.transform(linear)
            },
            finished,
        }
    }
}
