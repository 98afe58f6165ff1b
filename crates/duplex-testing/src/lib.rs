//! Testing utilities and harness for the duplex refresh container

pub mod assertions;
pub mod events;
pub mod indicator;
pub mod rule;
pub mod scroll;

pub use assertions::*;
pub use events::*;
pub use indicator::{IndicatorLog, RecordingIndicator};
pub use rule::SwipeTestRule;
pub use scroll::{FakeAncestor, FakeListContent, FakeScrollingList, ScrollReport};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::events::*;
    pub use crate::indicator::{IndicatorLog, RecordingIndicator};
    pub use crate::rule::SwipeTestRule;
    pub use crate::scroll::{FakeAncestor, FakeListContent, FakeScrollingList, ScrollReport};
}
