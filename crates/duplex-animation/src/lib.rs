//! Animation primitives for the duplex refresh container
//!
//! Animations here own no clock. The host's frame loop pushes frame timestamps
//! into a [`Tween`], which answers with the interpolated fraction; whoever owns
//! the tween decides what the fraction means. Each animation run can hand out a
//! [`Completion`] future that resolves once, either finished or cancelled.

mod animation;
mod completion;

pub use animation::*;
pub use completion::*;

pub mod prelude {
    pub use crate::animation::{AnimationSpec, Easing, Lerp, Tween, TweenSample};
    pub use crate::completion::{completion_pair, AnimationEnd, Completion, CompletionSignal};
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod animation_tests;

#[cfg(test)]
#[path = "tests/completion_tests.rs"]
mod completion_tests;
