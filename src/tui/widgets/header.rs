//! Header widget for the TUI.
//!
//! Displays the application name, version, and collection size.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Header bar widget.
pub struct Header<'a> {
    source: &'a str,
    item_count: usize,
    match_count: Option<usize>,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    ///
    /// `match_count` is shown only while a query is active.
    pub fn new(source: &'a str, item_count: usize, match_count: Option<usize>) -> Self {
        Self {
            source,
            item_count,
            match_count,
        }
    }

    fn status_text(&self) -> String {
        match self.match_count {
            Some(matches) => format!(" {}/{} [{}] ", matches, self.item_count, self.source),
            None => format!(" {} items [{}] ", self.item_count, self.source),
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        let left_text = format!(" typeahead v{}", env!("CARGO_PKG_VERSION"));
        buf.set_span(area.x, area.y, &Span::styled(left_text, style), area.width);

        let right_text = self.status_text();
        let right_width = right_text.chars().count() as u16;
        if right_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            buf.set_string(right_x, area.y, &right_text, style);
        }
    }
}
