//! Timeline of what the simulated user does.

use std::collections::VecDeque;

use duplex_foundation::gesture_constants::DRAG_RATE;
use duplex_foundation::{MotionAction, MotionEvent};
use duplex_refresh::Edge;

const FINGER: u64 = 0;
const FINGER_X: f32 = 200.0;
const DRAG_STEPS: usize = 12;

#[derive(Clone, Debug)]
pub enum Step {
    /// Finger drag pulling `edge` by `overscroll` pixels at release.
    Pull { edge: Edge, overscroll: f32 },
    /// Scroll the feed all the way toward `edge`.
    Jump(Edge),
    /// Tap on a feed row.
    Tap(usize),
    /// Fling-free nested scroll of `dy` split over `steps` frames.
    NestedScroll { dy: f32, steps: usize },
}

#[derive(Clone, Debug)]
pub struct Cue {
    pub at_millis: u64,
    pub step: Step,
}

/// One frame's worth of input.
#[derive(Clone, Debug)]
pub enum Input {
    Touch(MotionEvent),
    Jump(Edge),
    Tap(usize),
    NestedStart,
    NestedScroll(f32),
    NestedStop,
}

pub fn scenario() -> Vec<Cue> {
    let cue = |at_millis, step| Cue { at_millis, step };
    vec![
        cue(500, Step::Pull { edge: Edge::Top, overscroll: 180.0 }),
        cue(5_000, Step::Jump(Edge::Bottom)),
        cue(5_100, Step::Pull { edge: Edge::Bottom, overscroll: 180.0 }),
        cue(10_000, Step::Jump(Edge::Top)),
        cue(10_100, Step::Tap(0)),
        cue(15_000, Step::Tap(1)),
        cue(20_000, Step::Jump(Edge::Top)),
        cue(20_100, Step::Pull { edge: Edge::Top, overscroll: 40.0 }),
        cue(21_000, Step::NestedScroll { dy: -260.0, steps: 10 }),
    ]
}

impl Step {
    /// Inputs for this step, one per frame, for a finger starting at
    /// `anchor_y` and a container with `touch_slop`.
    pub fn inputs(&self, anchor_y: f32, touch_slop: f32) -> VecDeque<Input> {
        match *self {
            Step::Pull { edge, overscroll } => {
                let travel = edge.sign() * (touch_slop + overscroll / DRAG_RATE);
                let touch = |action, y| Input::Touch(MotionEvent::single(action, FINGER, FINGER_X, y));
                let mut inputs = VecDeque::with_capacity(DRAG_STEPS + 2);
                inputs.push_back(touch(MotionAction::Down, anchor_y));
                for i in 1..=DRAG_STEPS {
                    let y = anchor_y + travel * i as f32 / DRAG_STEPS as f32;
                    inputs.push_back(touch(MotionAction::Move, y));
                }
                inputs.push_back(touch(MotionAction::Up, anchor_y + travel));
                inputs
            }
            Step::Jump(edge) => VecDeque::from([Input::Jump(edge)]),
            Step::Tap(index) => VecDeque::from([Input::Tap(index)]),
            Step::NestedScroll { dy, steps } => {
                let steps = steps.max(1);
                let mut inputs = VecDeque::with_capacity(steps + 2);
                inputs.push_back(Input::NestedStart);
                inputs.extend((0..steps).map(|_| Input::NestedScroll(dy / steps as f32)));
                inputs.push_back(Input::NestedStop);
                inputs
            }
        }
    }
}
