use crate::completion::*;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

fn poll_once(completion: &mut Completion) -> Poll<AnimationEnd> {
    let waker = futures_task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    Pin::new(completion).poll(&mut cx)
}

#[test]
fn finish_resolves_all_observers() {
    let (signal, mut first) = completion_pair();
    let mut second = signal.completion();
    assert_eq!(poll_once(&mut first), Poll::Pending);

    signal.finish();

    assert_eq!(poll_once(&mut first), Poll::Ready(AnimationEnd::Finished));
    assert_eq!(poll_once(&mut second), Poll::Ready(AnimationEnd::Finished));
}

#[test]
fn dropping_signal_cancels() {
    let (signal, completion) = completion_pair();
    drop(signal);
    assert_eq!(completion.outcome(), Some(AnimationEnd::Cancelled));
}

#[test]
fn first_resolution_wins() {
    let (signal, completion) = completion_pair();
    let observer = signal.completion();
    signal.finish();
    assert_eq!(completion.outcome(), Some(AnimationEnd::Finished));
    assert!(observer.is_resolved());
}

#[test]
fn explicit_cancel_is_reported() {
    let (signal, mut completion) = completion_pair();
    signal.cancel();
    assert_eq!(
        poll_once(&mut completion),
        Poll::Ready(AnimationEnd::Cancelled)
    );
}
