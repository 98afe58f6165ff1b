//! One-shot completion channel for animation runs.
//!
//! Every animation run gets its own `(CompletionSignal, Completion)` pair. The
//! owner of the run keeps the signal and resolves it exactly once; observers
//! hold [`Completion`] handles, which are futures. Dropping an unresolved
//! signal counts as cancellation, so replacing a running animation by simply
//! overwriting its slot still wakes anyone waiting on the old run.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// How an animation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The run reached the end of its duration.
    Finished,
    /// The run was superseded, reset or torn down before it finished.
    Cancelled,
}

#[derive(Default)]
struct CompletionState {
    outcome: Option<AnimationEnd>,
    wakers: Vec<Waker>,
}

/// Resolving side of a completion channel. Not cloneable.
pub struct CompletionSignal {
    state: Rc<RefCell<CompletionState>>,
}

/// Observing side of a completion channel.
#[derive(Clone)]
pub struct Completion {
    state: Rc<RefCell<CompletionState>>,
}

/// Creates a fresh, unresolved completion channel.
pub fn completion_pair() -> (CompletionSignal, Completion) {
    let state = Rc::new(RefCell::new(CompletionState::default()));
    (
        CompletionSignal {
            state: Rc::clone(&state),
        },
        Completion { state },
    )
}

impl CompletionSignal {
    /// Resolves the run as finished.
    pub fn finish(self) {
        self.resolve(AnimationEnd::Finished);
    }

    /// Resolves the run as cancelled.
    pub fn cancel(self) {
        self.resolve(AnimationEnd::Cancelled);
    }

    /// Returns an observer for this run.
    pub fn completion(&self) -> Completion {
        Completion {
            state: Rc::clone(&self.state),
        }
    }

    fn resolve(&self, end: AnimationEnd) {
        let wakers = {
            let mut state = self.state.borrow_mut();
            if state.outcome.is_some() {
                return;
            }
            state.outcome = Some(end);
            std::mem::take(&mut state.wakers)
        };
        if end == AnimationEnd::Cancelled {
            log::trace!("animation run cancelled, waking {} observer(s)", wakers.len());
        }
        for waker in wakers {
            waker.wake();
        }
    }
}

impl Drop for CompletionSignal {
    fn drop(&mut self) {
        self.resolve(AnimationEnd::Cancelled);
    }
}

impl std::fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("outcome", &self.state.borrow().outcome)
            .finish()
    }
}

impl Completion {
    /// The outcome, if the run has been resolved.
    pub fn outcome(&self) -> Option<AnimationEnd> {
        self.state.borrow().outcome
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome().is_some()
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("outcome", &self.outcome())
            .finish()
    }
}

impl Future for Completion {
    type Output = AnimationEnd;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        match state.outcome {
            Some(end) => Poll::Ready(end),
            None => {
                if !state.wakers.iter().any(|w| w.will_wake(cx.waker())) {
                    state.wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
        }
    }
}
