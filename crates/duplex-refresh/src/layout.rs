//! Placement of the content and the two indicators.

use crate::edge::{Edge, EdgeMap};
use duplex_ui_graphics::{EdgeInsets, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefreshLayout {
    pub content: Rect,
    pub indicators: EdgeMap<Rect>,
}

/// What gets drawn, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawLayer {
    Content,
    Indicator(Edge),
}

/// Indicators always draw above the content.
pub const DRAW_ORDER: [DrawLayer; 3] = [
    DrawLayer::Content,
    DrawLayer::Indicator(Edge::Top),
    DrawLayer::Indicator(Edge::Bottom),
];

/// Size the content is measured at: the container minus padding.
pub fn measure_content(container: Size, padding: EdgeInsets) -> Size {
    Size::new(
        (container.width - padding.horizontal_sum()).max(0.0),
        (container.height - padding.vertical_sum()).max(0.0),
    )
}

/// Lays out the content inside the padding and each indicator horizontally
/// centred with its top at `offsets[edge]`.
pub fn layout(
    container: Size,
    padding: EdgeInsets,
    diameter: f32,
    offsets: EdgeMap<f32>,
) -> RefreshLayout {
    let content = Rect::from_size(container).inset(padding);
    let left = (container.width - diameter) / 2.0;
    RefreshLayout {
        content,
        indicators: offsets.map(|_, offset| Rect::new(left, *offset, diameter, diameter)),
    }
}
