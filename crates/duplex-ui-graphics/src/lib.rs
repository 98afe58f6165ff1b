//! Pure math/data shared by the duplex refresh crates
//!
//! Geometry primitives, colors and density-independent units. Nothing in here
//! knows about gestures or indicators.

mod color;
mod geometry;
mod unit;

pub use color::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::unit::Dp;
}

#[cfg(test)]
#[path = "tests/graphics_tests.rs"]
mod tests;
