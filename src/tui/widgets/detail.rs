//! Selection detail widget.
//!
//! Displays every field of the last committed item.

use crate::items::{value_text, Item};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Pane showing the selected item.
pub struct SelectionDetail<'a> {
    item: Option<&'a Item>,
    primary_key: &'a str,
}

impl<'a> SelectionDetail<'a> {
    /// Creates a new detail pane.
    pub fn new(item: Option<&'a Item>, primary_key: &'a str) -> Self {
        Self { item, primary_key }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let Some(item) = self.item else {
            return vec![Line::from(Span::styled(
                "Nothing selected. Type, then pick a row with Enter or a click.",
                Style::default().fg(Color::DarkGray),
            ))];
        };

        let label_style = Style::default().fg(Color::Cyan);
        item.fields()
            .map(|(name, value)| {
                let value_style = if name == self.primary_key {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{name}: "), label_style),
                    Span::styled(value_text(value), value_style),
                ])
            })
            .collect()
    }
}

impl Widget for SelectionDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Selection ");

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_selection_hint() {
        let area = Rect::new(0, 0, 80, 4);
        let mut buf = Buffer::empty(area);
        SelectionDetail::new(None, "id").render(area, &mut buf);
        assert!(screen(&buf).contains("Nothing selected"));
    }

    #[test]
    fn test_fields_listed_in_order() {
        let item = Item::from_value(json!({"id": 2, "name": "Bob", "tags": ["a", "b"]})).unwrap();
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        SelectionDetail::new(Some(&item), "id").render(area, &mut buf);

        let text = screen(&buf);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].contains("id: 2"));
        assert!(lines[2].contains("name: Bob"));
        assert!(lines[3].contains("tags: a,b"));
    }
}
