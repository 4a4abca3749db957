//! Terminal User Interface for typeahead.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
pub mod autocomplete;
mod events;
pub mod headless;
pub mod ui;
pub mod widgets;

pub use app::{App, HostMessage};
pub use events::{Event, EventHandler};

use crate::error::{Result, TypeaheadError};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::info;

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| TypeaheadError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
            TypeaheadError::internal(format!("Failed to enter alternate screen: {e}"))
        })?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
            .map_err(|e| TypeaheadError::internal(format!("Failed to create terminal: {e}")))
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| TypeaheadError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| TypeaheadError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| TypeaheadError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    fn draw(&mut self, app: &mut App) -> Result<()> {
        self.terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| TypeaheadError::internal(format!("Failed to draw: {e}")))?;
        Ok(())
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self, app: &mut App) -> Result<()> {
        // Restore the terminal before the default hook prints the panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        // Element areas are known only after the first frame
        self.draw(app)?;
        app.mount();

        let result = self.event_loop(app);

        app.unmount();
        let _ = panic::take_hook();

        result
    }

    fn event_loop(&mut self, app: &mut App) -> Result<()> {
        while app.running {
            self.draw(app)?;
            let event = self.event_handler.next()?;
            app.handle_event(event);
        }
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the interactive TUI.
pub fn run(mut app: App) -> Result<()> {
    let mut tui = Tui::new()?;
    info!("Starting interactive session");
    tui.run(&mut app)
}
