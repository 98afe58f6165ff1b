//! Dual-edge pull-to-refresh container logic
//!
//! A headless rendition of a swipe-to-refresh container that works at both
//! ends of its content: pulling down at the top refreshes, pulling up at the
//! bottom loads more. The container cooperates with nested scrolling so lists
//! that scroll themselves still hand their overscroll to the indicators.
//!
//! - [`classifier`]: which edge, if any, a raw touch stream pulls.
//! - [`nested`]: accumulation of nested-scroll overscroll.
//! - [`motion`]: pull distance to indicator visuals.
//! - [`state`]: per-edge lifecycle and animations.
//! - [`container`]: [`DuplexSwipeRefresh`], which wires them together.

pub mod classifier;
pub mod config;
pub mod container;
pub mod content;
pub mod edge;
pub mod indicator;
pub mod layout;
pub mod motion;
pub mod nested;
pub mod state;
pub mod transition;

pub use classifier::{DragSession, GestureClassifier, IndicatorAction, TouchOutcome};
pub use config::{ConfigError, IndicatorSize, RefreshConfig, Thresholds};
pub use container::DuplexSwipeRefresh;
pub use content::{ChildScrollCallback, RefreshListener, ScrollableContent};
pub use edge::{Edge, EdgeMap};
pub use indicator::{AnimationPhase, Indicator, IndicatorModel};
pub use layout::{DrawLayer, RefreshLayout};
pub use motion::{compute_frame, AlphaTarget, MotionFrame};
pub use nested::{NestedScrollSession, PreScrollStep};
pub use state::{DragSource, EdgeController, EdgePhase, IndicatorState, RefreshEvent};
pub use transition::{Transition, TransitionKind, VisualUpdate};

pub mod prelude {
    pub use crate::config::{IndicatorSize, RefreshConfig};
    pub use crate::container::DuplexSwipeRefresh;
    pub use crate::content::ScrollableContent;
    pub use crate::edge::Edge;
    pub use crate::indicator::{Indicator, IndicatorModel};
    pub use crate::state::{EdgePhase, RefreshEvent};
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "tests/motion_tests.rs"]
mod motion_tests;

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod transition_tests;

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod state_tests;

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod classifier_tests;

#[cfg(test)]
#[path = "tests/nested_tests.rs"]
mod nested_tests;

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod layout_tests;
