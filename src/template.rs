//! Row templates for rendering matched items.
//!
//! A template is a list of lines containing `{field}` placeholders. The
//! first line is emphasized. Without a template, the primary key is shown
//! on the first line and every other field as `name: value` below it.

use crate::error::{Result, TypeaheadError};
use crate::items::Item;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Text},
};
use regex::Regex;

/// Renders items into multi-line row bodies.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    lines: Vec<String>,
    primary_key: String,
    placeholder: Regex,
}

impl ItemTemplate {
    /// Creates a template from configured lines.
    ///
    /// An empty `lines` list selects the default field listing.
    pub fn new(lines: Vec<String>, primary_key: impl Into<String>) -> Result<Self> {
        let placeholder = Regex::new(r"\{([A-Za-z0-9_\-]+)\}")
            .map_err(|e| TypeaheadError::internal(format!("Invalid placeholder pattern: {e}")))?;

        for line in &lines {
            if line.matches('{').count() != line.matches('}').count() {
                return Err(TypeaheadError::config(format!(
                    "Unbalanced braces in template line: '{line}'"
                )));
            }
        }

        Ok(Self {
            lines,
            primary_key: primary_key.into(),
            placeholder,
        })
    }

    /// Renders an item into styled text.
    pub fn render(&self, item: &Item) -> Text<'static> {
        let raw_lines = if self.lines.is_empty() {
            self.default_lines(item)
        } else {
            self.lines.iter().map(|l| self.substitute(l, item)).collect()
        };

        let head_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let lines = raw_lines
            .into_iter()
            .enumerate()
            .map(|(idx, text)| {
                if idx == 0 {
                    Line::from(text).style(head_style)
                } else {
                    Line::raw(text)
                }
            })
            .collect::<Vec<_>>();

        Text::from(lines)
    }

    /// Replaces every `{field}` with the field's text; unknown fields become empty.
    fn substitute(&self, line: &str, item: &Item) -> String {
        self.placeholder
            .replace_all(line, |caps: &regex::Captures<'_>| {
                item.field_text(&caps[1]).unwrap_or_default()
            })
            .into_owned()
    }

    fn default_lines(&self, item: &Item) -> Vec<String> {
        let mut lines = vec![item.field_text(&self.primary_key).unwrap_or_default()];
        lines.extend(
            item.fields()
                .filter(|(name, _)| *name != self.primary_key)
                .map(|(name, value)| format!("{name}: {}", crate::items::value_text(value))),
        );
        lines
    }
}
