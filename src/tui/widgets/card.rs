//! Item card widget: one selectable row of the results panel.
//!
//! Cards are stateless. Each carries an element id of the form
//! `<prefix><index>`; pointer activity over a card is reported to the
//! controller as a [`CardEvent`] naming that id.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Text,
    widgets::{Paragraph, Widget},
};

/// Pointer activity reported by a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    /// The pointer entered the card.
    HoverEnter(String),
    /// The pointer left the card.
    HoverLeave(String),
    /// The card was clicked.
    Activate(String),
}

/// Builds the element id for the row at `index`.
pub fn row_id(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}")
}

/// Recovers a row index from an element id.
///
/// Returns `None` unless `id` is exactly `prefix` followed by an unsigned integer.
pub fn index_from_id(id: &str, prefix: &str) -> Option<usize> {
    let digits = id.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A single result row.
pub struct ItemCard<'a> {
    body: Text<'a>,
    active: bool,
}

impl<'a> ItemCard<'a> {
    /// Creates a new card.
    pub fn new(body: Text<'a>, active: bool) -> Self {
        Self { body, active }
    }

    /// Number of terminal rows the card occupies.
    pub fn height(body: &Text<'_>) -> u16 {
        body.height().clamp(1, u16::MAX as usize) as u16
    }
}

impl Widget for ItemCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.active {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default()
        };

        // Fill the full row so the highlight spans the panel width
        buf.set_style(area, style);
        if area.width == 0 {
            return;
        }

        // First column is a gutter for the active marker
        let body_area = Rect::new(area.x + 1, area.y, area.width - 1, area.height);
        Paragraph::new(self.body).style(style).render(body_area, buf);

        if self.active {
            buf.set_string(area.x, area.y, "▌", Style::default().fg(Color::Cyan).bg(Color::DarkGray));
        }
    }
}
