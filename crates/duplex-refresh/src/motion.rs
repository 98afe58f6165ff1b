//! Pure mapping from pull distance to indicator visuals.

use crate::config::Thresholds;
use crate::edge::Edge;

pub const MAX_ALPHA: u8 = 255;
/// Alpha of an indicator that is being pulled but has not reached the trigger.
pub const STARTING_PROGRESS_ALPHA: u8 = 76;
/// Longest arc the indicator shows while pulling, as a fraction of a turn.
pub const MAX_PROGRESS_ANGLE: f32 = 0.8;

/// Alpha an indicator should be heading to at a given pull.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphaTarget {
    Starting,
    Max,
}

impl AlphaTarget {
    pub fn value(self) -> u8 {
        match self {
            AlphaTarget::Starting => STARTING_PROGRESS_ALPHA,
            AlphaTarget::Max => MAX_ALPHA,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionFrame {
    pub target_offset: f32,
    /// Indicator scale when scaling with the drag, `1.0` otherwise.
    pub scale: f32,
    pub alpha_target: AlphaTarget,
    pub arc_end: f32,
    pub arrow_scale: f32,
    pub rotation: f32,
    pub drag_percent: f32,
    pub tension: f32,
}

/// Computes where and how `edge`'s indicator is drawn for a pull of
/// `overscroll` pixels. Only the magnitude of `overscroll` matters.
pub fn compute_frame(overscroll: f32, edge: Edge, thresholds: &Thresholds) -> MotionFrame {
    let distance = overscroll.abs();
    let trigger = thresholds.trigger;

    let drag_percent = (distance / trigger).min(1.0);
    let adjusted_percent = (drag_percent - 0.4).max(0.0) * 5.0 / 3.0;
    let extra_os = distance - trigger;
    let slingshot = thresholds.slingshot(edge);
    let tension_slingshot_percent = if slingshot > 0.0 {
        extra_os.clamp(0.0, slingshot * 2.0) / slingshot
    } else {
        0.0
    };
    let quarter = tension_slingshot_percent / 4.0;
    let tension = (quarter - quarter * quarter) * 2.0;
    let extra_move = slingshot * tension * 2.0;

    let travel = slingshot * drag_percent + extra_move;
    let target_offset = thresholds.rest[edge] + edge.sign() * travel;

    MotionFrame {
        target_offset,
        scale: if thresholds.scale_with_drag {
            drag_percent
        } else {
            1.0
        },
        alpha_target: if distance < trigger {
            AlphaTarget::Starting
        } else {
            AlphaTarget::Max
        },
        arc_end: (adjusted_percent * MAX_PROGRESS_ANGLE).min(MAX_PROGRESS_ANGLE),
        arrow_scale: adjusted_percent.min(1.0),
        rotation: (-0.25 + 0.4 * adjusted_percent + tension * 2.0) * 0.5,
        drag_percent,
        tension,
    }
}
