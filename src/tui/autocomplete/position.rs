//! Positioning helper for anchoring the results panel.

use ratatui::layout::{Position, Rect};

/// Document coordinates of an element's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offset {
    pub left: u16,
    pub top: u16,
}

/// Returns the document offset of `element`: its on-screen origin plus the
/// current scroll offset.
pub fn offset_of(element: Rect, scroll: Position) -> Offset {
    Offset {
        left: element.x.saturating_add(scroll.x),
        top: element.y.saturating_add(scroll.y),
    }
}

/// Calculates the panel rectangle directly beneath the input.
///
/// The panel is as wide as the input, tall enough for `content_height`
/// rows plus borders, and clipped to `bounds`. Returns an empty rect when
/// there is no room left below the input.
pub fn panel_area(anchor: Offset, input: Rect, content_height: u16, bounds: Rect) -> Rect {
    let x = anchor.left.max(bounds.x);
    let y = anchor.top.saturating_add(input.height);
    if y >= bounds.bottom() || x >= bounds.right() {
        return Rect::new(x, y, 0, 0);
    }

    let width = input.width.min(bounds.right() - x);
    let height = content_height
        .saturating_add(2) // borders
        .min(bounds.bottom() - y);

    Rect::new(x, y, width, height)
}
