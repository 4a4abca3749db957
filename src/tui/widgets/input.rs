//! Search input widget for the TUI.
//!
//! Provides the editable text state driven by the autocomplete controller and
//! the bordered input bar with a placeholder and a clear affordance.

use crate::tui::autocomplete::SearchInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Glyph drawn for the clear affordance.
pub const CLEAR_GLYPH: &str = "✕";

/// Calculates the scroll offset needed to keep the cursor visible.
///
/// Returns the number of characters to skip from the start of the text.
pub fn calculate_scroll_offset(cursor: usize, available_width: usize) -> usize {
    cursor.saturating_sub(available_width)
}

/// Returns the cell occupied by the clear affordance for an input drawn in
/// `area`, or an empty rect when there is nothing to clear.
pub fn clear_area(area: Rect, has_text: bool) -> Rect {
    if !has_text || area.width < 4 || area.height < 3 {
        return Rect::default();
    }
    Rect::new(area.right() - 3, area.y + 1, 1, 1)
}

/// Input state for text editing.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input text.
    text: String,
    /// Cursor position (character index).
    cursor: usize,
}

impl InputState {
    /// Creates a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor. Returns true if one was removed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
        true
    }

    /// Deletes the character at the cursor. Returns true if one was removed.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
        true
    }

    /// Deletes the word before the cursor. Returns true if anything was removed.
    pub fn delete_word(&mut self) -> bool {
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        if start == self.cursor {
            return false;
        }

        let from = self.byte_index(start);
        let to = self.byte_index(self.cursor);
        self.text.replace_range(from..to, "");
        self.cursor = start;
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl SearchInput for InputState {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    fn apply_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('w') if ctrl => self.delete_word(),
            KeyCode::Char('u') if ctrl => {
                let changed = !self.text.is_empty();
                self.set_text("");
                changed
            }
            KeyCode::Char(_) if ctrl => false,
            KeyCode::Char(c) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => false,
        }
    }
}

/// Input bar widget.
pub struct InputBar<'a> {
    state: &'a InputState,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputBar<'a> {
    /// Creates a new input bar widget.
    pub fn new(state: &'a InputState, placeholder: &'a str, focused: bool) -> Self {
        Self {
            state,
            placeholder,
            focused,
        }
    }

    /// Screen position of the terminal cursor for an input drawn in `area`.
    pub fn cursor_position(state: &InputState, area: Rect) -> (u16, u16) {
        // Border (1) + prompt "> " (2)
        let available_width = area.width.saturating_sub(6) as usize;
        let offset = calculate_scroll_offset(state.cursor, available_width);
        let x = area.x + 3 + (state.cursor - offset) as u16;
        (x.min(area.right().saturating_sub(2)), area.y + 1)
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search ");

        let prompt_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        // Border left (1) + prompt (2) + clear glyph with padding (2) + border right (1)
        let available_width = area.width.saturating_sub(6) as usize;
        let scroll_offset = calculate_scroll_offset(self.state.cursor, available_width);

        let body = if self.state.is_empty() {
            Span::styled(self.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            let visible: String = self
                .state
                .text
                .chars()
                .skip(scroll_offset)
                .take(available_width)
                .collect();
            Span::raw(visible)
        };

        let line = Line::from(vec![Span::styled("> ", prompt_style), body]);
        Paragraph::new(line).block(block).render(area, buf);

        let clear = clear_area(area, !self.state.is_empty());
        if !clear.is_empty() {
            buf.set_string(clear.x, clear.y, CLEAR_GLYPH, Style::default().fg(Color::Red));
        }
    }
}
