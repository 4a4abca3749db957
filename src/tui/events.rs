//! Event handling for the TUI.
//!
//! Processes keyboard, mouse and terminal events using crossterm.

use crate::error::{Result, TypeaheadError};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The mouse moved or a button was used.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A periodic tick.
    Tick,
}

impl From<CrosstermEvent> for Event {
    fn from(event: CrosstermEvent) -> Self {
        match event {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Self::Key(key),
            CrosstermEvent::Mouse(mouse) => Self::Mouse(mouse),
            CrosstermEvent::Resize(width, height) => Self::Resize(width, height),
            _ => Self::Tick,
        }
    }
}

/// Handles terminal events.
pub struct EventHandler {
    /// Timeout for polling events.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new event handler with default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Creates a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Polls for the next event.
    ///
    /// Returns `Event::Tick` if no event is available within the tick rate.
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)
            .map_err(|e| TypeaheadError::internal(format!("Failed to poll events: {e}")))?
        {
            let event = event::read()
                .map_err(|e| TypeaheadError::internal(format!("Failed to read event: {e}")))?;
            Ok(event.into())
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
