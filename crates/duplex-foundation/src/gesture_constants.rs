//! Shared gesture constants for consistent touch handling.
//!
//! Distances are in logical pixels; multiply by the display density before
//! comparing against physical coordinates.

use duplex_ui_graphics::Dp;

/// Touch slop in logical pixels.
///
/// A pointer has to travel further than this from its down position before a
/// vertical drag is recognised. Matches the platform touch slop of 8dp.
pub const TOUCH_SLOP: Dp = Dp(8.0);

/// Ratio between finger travel and indicator travel while pulling.
///
/// Indicators move half as far as the finger, which is what gives the pull its
/// resistance.
pub const DRAG_RATE: f32 = 0.5;

/// Touch slop in physical pixels for the given display density.
pub fn scaled_touch_slop(density: f32) -> f32 {
    TOUCH_SLOP.to_px(density)
}
