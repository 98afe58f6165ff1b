//! Raw touch stream classification.
//!
//! Decides whether a pointer stream pulls the top indicator, the bottom
//! indicator, or belongs to the content. The classifier only tracks pointers
//! and distances; the container applies its [`TouchOutcome`]s to the edges.

use crate::edge::{Edge, EdgeMap};
use duplex_foundation::gesture_constants::DRAG_RATE;
use duplex_foundation::{MotionAction, MotionEvent, PointerId};

/// State of the touch stream in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSession {
    pub active_pointer: Option<PointerId>,
    pub initial_down_y: f32,
    pub initial_motion_y: f32,
    pub locked: Option<Edge>,
}

impl DragSession {
    pub fn is_being_dragged(&self) -> bool {
        self.locked.is_some()
    }

    /// Pull for a pointer at `y`, signed so that positive pulls `edge` toward
    /// the content.
    pub fn overscroll(&self, edge: Edge, y: f32) -> f32 {
        (y - self.initial_motion_y) * DRAG_RATE * edge.sign()
    }
}

/// What the indicators should do in response to one event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IndicatorAction {
    None,
    /// A stream started; idle indicators go back to rest.
    ResetToRest,
    Drag { edge: Edge, overscroll: f32 },
    Release { edge: Edge, overscroll: f32 },
    /// Stream cancelled mid-drag; never triggers.
    Cancel { edge: Edge },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchOutcome {
    /// Whether the container claims the event.
    pub handled: bool,
    /// Edge the stream locked onto with this event.
    pub lock: Option<Edge>,
    pub action: IndicatorAction,
}

impl TouchOutcome {
    fn declined() -> Self {
        Self {
            handled: false,
            lock: None,
            action: IndicatorAction::None,
        }
    }

    fn new(handled: bool, action: IndicatorAction) -> Self {
        Self {
            handled,
            lock: None,
            action,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GestureClassifier {
    session: DragSession,
    touch_slop: f32,
}

impl GestureClassifier {
    pub fn new(touch_slop: f32) -> Self {
        Self {
            session: DragSession::default(),
            touch_slop,
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    pub fn set_touch_slop(&mut self, touch_slop: f32) {
        self.touch_slop = touch_slop;
    }

    /// Forgets the stream in progress.
    pub fn clear(&mut self) {
        self.session = DragSession::default();
    }

    /// Interception pass: watches the stream on its way to the content and
    /// claims it once it locks onto an edge in `lockable`.
    pub fn intercept(&mut self, event: &MotionEvent, lockable: EdgeMap<bool>) -> TouchOutcome {
        match event.action {
            MotionAction::Down => self.on_down(event),
            MotionAction::Move => {
                let Some(active) = self.session.active_pointer else {
                    log::error!("got move event without an active pointer id");
                    return TouchOutcome::declined();
                };
                let Some(y) = event.find_pointer_index(active).and_then(|i| event.y(i)) else {
                    return TouchOutcome::declined();
                };
                let lock = self.start_dragging(y, lockable);
                TouchOutcome {
                    handled: self.session.is_being_dragged(),
                    lock,
                    action: IndicatorAction::None,
                }
            }
            MotionAction::PointerUp => {
                self.on_secondary_pointer_up(event);
                TouchOutcome::new(self.session.is_being_dragged(), IndicatorAction::None)
            }
            MotionAction::Up | MotionAction::Cancel => {
                let action = match self.session.locked {
                    Some(edge) => IndicatorAction::Cancel { edge },
                    None => IndicatorAction::None,
                };
                self.clear();
                TouchOutcome::new(false, action)
            }
            MotionAction::PointerDown => {
                TouchOutcome::new(self.session.is_being_dragged(), IndicatorAction::None)
            }
        }
    }

    /// Touch pass: the stream is addressed to the container itself.
    pub fn touch(&mut self, event: &MotionEvent, lockable: EdgeMap<bool>) -> TouchOutcome {
        match event.action {
            MotionAction::Down => {
                let mut outcome = self.on_down(event);
                outcome.handled = self.session.active_pointer.is_some();
                outcome
            }
            MotionAction::Move => {
                let Some(y) = self.active_y(event) else {
                    log::error!("got move event but have an invalid active pointer id");
                    return TouchOutcome::declined();
                };
                let lock = self.start_dragging(y, lockable);
                let Some(edge) = self.session.locked else {
                    return TouchOutcome {
                        handled: true,
                        lock,
                        action: IndicatorAction::None,
                    };
                };
                let overscroll = self.session.overscroll(edge, y);
                if overscroll > 0.0 {
                    TouchOutcome {
                        handled: true,
                        lock,
                        action: IndicatorAction::Drag { edge, overscroll },
                    }
                } else {
                    // Finger went back past the lock point; the content gets it.
                    TouchOutcome {
                        handled: false,
                        lock,
                        action: IndicatorAction::None,
                    }
                }
            }
            MotionAction::PointerDown => {
                let Some(id) = event.action_pointer_id() else {
                    log::error!("got pointer down event but have an invalid action index");
                    return TouchOutcome::declined();
                };
                self.session.active_pointer = Some(id);
                TouchOutcome::new(true, IndicatorAction::None)
            }
            MotionAction::PointerUp => {
                self.on_secondary_pointer_up(event);
                TouchOutcome::new(true, IndicatorAction::None)
            }
            MotionAction::Up => {
                let Some(y) = self.active_y(event) else {
                    log::error!("got up event but don't have an active pointer id");
                    return TouchOutcome::declined();
                };
                let action = match self.session.locked {
                    Some(edge) => IndicatorAction::Release {
                        edge,
                        overscroll: self.session.overscroll(edge, y),
                    },
                    None => IndicatorAction::None,
                };
                self.clear();
                TouchOutcome::new(false, action)
            }
            MotionAction::Cancel => {
                let action = match self.session.locked {
                    Some(edge) => IndicatorAction::Cancel { edge },
                    None => IndicatorAction::None,
                };
                self.clear();
                TouchOutcome::new(false, action)
            }
        }
    }

    fn on_down(&mut self, event: &MotionEvent) -> TouchOutcome {
        self.session = DragSession {
            active_pointer: event.pointer_id(0),
            ..DragSession::default()
        };
        match event.y(0) {
            Some(y) => {
                self.session.initial_down_y = y;
                TouchOutcome::new(false, IndicatorAction::ResetToRest)
            }
            None => TouchOutcome::declined(),
        }
    }

    fn active_y(&self, event: &MotionEvent) -> Option<f32> {
        let active = self.session.active_pointer?;
        event.find_pointer_index(active).and_then(|i| event.y(i))
    }

    /// Locks the stream once it travelled past the slop toward an edge that
    /// may be pulled.
    fn start_dragging(&mut self, y: f32, lockable: EdgeMap<bool>) -> Option<Edge> {
        if self.session.locked.is_some() {
            return None;
        }
        let diff = y - self.session.initial_down_y;
        if diff.abs() <= self.touch_slop {
            return None;
        }
        let edge = Edge::pulled_by(diff)?;
        if !lockable[edge] {
            return None;
        }
        // Travel starts counting at the slop boundary, not at the down point.
        self.session.initial_motion_y = self.session.initial_down_y + edge.sign() * self.touch_slop;
        self.session.locked = Some(edge);
        log::debug!("touch stream locked to {edge} indicator");
        Some(edge)
    }

    fn on_secondary_pointer_up(&mut self, event: &MotionEvent) {
        let lifted = event.action_pointer_id();
        if lifted.is_some() && lifted == self.session.active_pointer {
            let new_index = if event.action_index == 0 { 1 } else { 0 };
            self.session.active_pointer = event.pointer_id(new_index);
        }
    }
}
