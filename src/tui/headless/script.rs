//! Script language for headless runs.
//!
//! A script is a list of steps separated by commas or newlines. Blank lines
//! and lines starting with `#` are skipped.
//!
//! ```text
//! type:al                 one keystroke per character
//! key:down                a named key, optionally prefixed with ctrl+
//! hover:5x6               move the pointer to column 5, row 6
//! click:5x6               left click
//! resize:100x30           resize the screen
//! assert:contains:Alice   screen text, case-insensitive
//! assert:not-contains:Bob
//! assert:state:highlight=1
//! assert:row:0=Alice      body of filtered row 0
//! ```

use super::PanelSnapshot;
use crate::error::{Result, TypeaheadError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Position;

/// One line of a script, kept with its source text for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub source: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Key(KeyEvent),
    Type(String),
    Hover(Position),
    Click(Position),
    Resize(u16, u16),
    Expect(Expectation),
}

/// Something that must hold after the preceding steps.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    OnScreen(String),
    OffScreen(String),
    /// A field of the panel snapshot, compared as text. Absent values read as `none`.
    State { field: String, value: String },
    /// The rendered body of a filtered row contains the text.
    Row { index: usize, text: String },
}

impl Expectation {
    pub fn holds(&self, screen: &str, snapshot: &PanelSnapshot) -> bool {
        match self {
            Self::OnScreen(text) => screen.to_lowercase().contains(&text.to_lowercase()),
            Self::OffScreen(text) => !screen.to_lowercase().contains(&text.to_lowercase()),
            Self::State { field, value } => snapshot.field(field).as_deref() == Some(value.as_str()),
            Self::Row { index, text } => snapshot
                .rows
                .get(*index)
                .is_some_and(|row| row.text.contains(text.as_str())),
        }
    }
}

/// Parses a whole script.
pub fn parse_script(input: &str) -> Result<Vec<Step>> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            parse_action(part).map(|action| Step {
                source: part.to_string(),
                action,
            })
        })
        .collect()
}

/// Parses a single step such as `key:down` or `click:5x6`.
pub fn parse_action(input: &str) -> Result<Action> {
    let (kind, value) = input.split_once(':').ok_or_else(|| {
        TypeaheadError::config(format!("Invalid step '{input}': expected kind:value"))
    })?;
    let value = value.trim();

    match kind.trim().to_lowercase().as_str() {
        "key" => parse_key(value).map(Action::Key),
        "type" => Ok(Action::Type(value.to_string())),
        "hover" => parse_cell(value, "hover").map(|(x, y)| Action::Hover(Position::new(x, y))),
        "click" => parse_cell(value, "click").map(|(x, y)| Action::Click(Position::new(x, y))),
        "resize" => parse_cell(value, "resize").map(|(w, h)| Action::Resize(w, h)),
        "assert" => parse_expectation(value).map(Action::Expect),
        other => Err(TypeaheadError::config(format!(
            "Unknown step '{other}'. Expected key, type, hover, click, resize or assert"
        ))),
    }
}

fn parse_key(value: &str) -> Result<KeyEvent> {
    let (modifiers, name) = match value.split_once('+') {
        Some((modifier, name)) if modifier.eq_ignore_ascii_case("ctrl") => {
            (KeyModifiers::CONTROL, name)
        }
        Some((modifier, _)) => {
            return Err(TypeaheadError::config(format!(
                "Unknown modifier '{modifier}': only ctrl is supported"
            )))
        }
        None => (KeyModifiers::NONE, value),
    };

    let code = match name.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => {
                    return Err(TypeaheadError::config(format!("Unknown key '{name}'")));
                }
            }
        }
    };

    Ok(KeyEvent::new(code, modifiers))
}

/// Parses `AxB`, the shape shared by cells and screen sizes.
fn parse_cell(value: &str, kind: &str) -> Result<(u16, u16)> {
    let invalid = || TypeaheadError::config(format!("Invalid {kind} '{value}': expected AxB"));
    let (a, b) = value.split_once('x').ok_or_else(invalid)?;
    let a = a.trim().parse().map_err(|_| invalid())?;
    let b = b.trim().parse().map_err(|_| invalid())?;
    Ok((a, b))
}

fn parse_expectation(value: &str) -> Result<Expectation> {
    let (kind, rest) = value.split_once(':').ok_or_else(|| {
        TypeaheadError::config(format!("Invalid assertion '{value}': expected kind:value"))
    })?;

    match kind.trim().to_lowercase().as_str() {
        "contains" => Ok(Expectation::OnScreen(rest.to_string())),
        "not-contains" => Ok(Expectation::OffScreen(rest.to_string())),
        "state" => {
            let (field, value) = split_assignment(rest)?;
            Ok(Expectation::State {
                field: field.to_string(),
                value: value.to_string(),
            })
        }
        "row" => {
            let (index, text) = split_assignment(rest)?;
            let index = index.parse().map_err(|_| {
                TypeaheadError::config(format!("Invalid row index '{index}' in '{value}'"))
            })?;
            Ok(Expectation::Row {
                index,
                text: text.to_string(),
            })
        }
        other => Err(TypeaheadError::config(format!(
            "Unknown assertion '{other}'. Expected contains, not-contains, state or row"
        ))),
    }
}

fn split_assignment(value: &str) -> Result<(&str, &str)> {
    value
        .split_once('=')
        .map(|(left, right)| (left.trim(), right.trim()))
        .ok_or_else(|| TypeaheadError::config(format!("Invalid assertion '{value}': expected name=value")))
}
