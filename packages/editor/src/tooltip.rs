//! Placement of the "can only be changed through chat" tooltip.
//!
//! The tooltip is absolutely positioned in page coordinates. It is centred
//! under its anchor, pushed back inside the viewport horizontally, and
//! flipped above the anchor when there is no room below.

use crate::dom::{Point, Rect, Size, Viewport};

/// Compute the page position of a tooltip of `tooltip` size anchored to
/// `anchor` (viewport coordinates).
pub fn place_tooltip(anchor: Rect, tooltip: Size, viewport: Viewport, margin: f64) -> Point {
    let mut left = anchor.left + viewport.scroll_x + anchor.width / 2.0 - tooltip.width / 2.0;
    let mut top = anchor.bottom() + viewport.scroll_y + margin;

    if left < viewport.scroll_x {
        left = viewport.scroll_x + margin;
    }
    if left + tooltip.width > viewport.width + viewport.scroll_x {
        left = viewport.width + viewport.scroll_x - tooltip.width - margin;
    }
    if top + tooltip.height > viewport.height + viewport.scroll_y {
        top = anchor.top + viewport.scroll_y - tooltip.height - margin;
    }
    if top < viewport.scroll_y {
        top = viewport.scroll_y + margin;
    }

    Point { x: left, y: top }
}
