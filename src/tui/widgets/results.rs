//! Results panel widget for the TUI.
//!
//! Draws the filtered rows as item cards beneath the search input, or the
//! no-results placeholder when a query matches nothing.

use super::card::ItemCard;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Text,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

fn panel_block(count: usize) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(format!(" Results ({count}) "))
}

/// Returns the area inside the panel borders.
pub fn panel_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Total content height for rows of the given heights, at least one line for
/// the placeholder.
pub fn content_height(heights: &[u16]) -> u16 {
    heights
        .iter()
        .fold(0u16, |acc, h| acc.saturating_add(*h))
        .max(1)
}

/// Places rows top to bottom inside `inner`, scrolled so the highlighted row
/// is fully visible. Returns `(row index, area)` pairs for the rows drawn.
pub fn layout_rows(inner: Rect, heights: &[u16], highlight: Option<usize>) -> Vec<(usize, Rect)> {
    if inner.is_empty() || heights.is_empty() {
        return Vec::new();
    }

    let mut first = 0;
    if let Some(h) = highlight.filter(|&h| h < heights.len()) {
        while first < h {
            let span: u32 = heights[first..=h].iter().map(|&x| x as u32).sum();
            if span <= inner.height as u32 {
                break;
            }
            first += 1;
        }
    }

    let mut placed = Vec::new();
    let mut y = inner.y;
    for (index, &height) in heights.iter().enumerate().skip(first) {
        let remaining = inner.bottom() - y;
        if remaining == 0 {
            break;
        }
        // Only the first visible row may be clipped
        if height > remaining && !placed.is_empty() {
            break;
        }
        let height = height.min(remaining);
        placed.push((index, Rect::new(inner.x, y, inner.width, height)));
        y += height;
    }
    placed
}

/// Results panel widget.
pub struct ResultsPanel<'a> {
    rows: Vec<Text<'a>>,
    highlight: Option<usize>,
    no_result_text: &'a str,
}

impl<'a> ResultsPanel<'a> {
    /// Creates a new results panel from rendered row bodies.
    pub fn new(rows: Vec<Text<'a>>, highlight: Option<usize>, no_result_text: &'a str) -> Self {
        Self {
            rows,
            highlight,
            no_result_text,
        }
    }

    /// Heights of each row body.
    pub fn heights(rows: &[Text<'_>]) -> Vec<u16> {
        rows.iter().map(ItemCard::height).collect()
    }
}

impl Widget for ResultsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = panel_block(self.rows.len());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            Paragraph::new(self.no_result_text)
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let heights = Self::heights(&self.rows);
        let placed = layout_rows(inner, &heights, self.highlight);
        let mut rows: Vec<Option<Text<'_>>> = self.rows.into_iter().map(Some).collect();

        for (index, row_area) in placed {
            if let Some(body) = rows[index].take() {
                ItemCard::new(body, self.highlight == Some(index)).render(row_area, buf);
            }
        }
    }
}
