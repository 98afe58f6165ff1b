//! Assertion helpers for indicator geometry and completion futures.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use duplex_animation::{AnimationEnd, Completion};
use futures_task::noop_waker;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Polls a completion once without an executor.
pub fn poll_completion(completion: &mut Completion) -> Poll<AnimationEnd> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    Pin::new(completion).poll(&mut cx)
}
