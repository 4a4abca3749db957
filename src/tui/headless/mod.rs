//! Headless mode for testing and automation.
//!
//! Drives the app against an in-memory backend from a script of keystrokes,
//! pointer moves and assertions, then reports the autocomplete panel state.

mod report;
mod script;

pub use report::{panel_lines, render, screen_text};
pub use script::{parse_action, parse_script, Action, Expectation, Step};

use crate::cli::{Cli, OutputFormat};
use crate::error::{Result, TypeaheadError};
use crate::tui::app::App;
use crate::tui::autocomplete::SearchInput;
use crate::tui::{ui, Event};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::layout::{Position, Rect};
use ratatui::text::Text;
use ratatui::Terminal;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Configuration for headless mode execution.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub width: u16,
    pub height: u16,
    pub output_format: OutputFormat,
    /// Stop at the first failed assertion.
    pub fail_fast: bool,
    /// Path to write output (None = stdout).
    pub output_file: Option<std::path::PathBuf>,
}

impl HeadlessConfig {
    /// Creates a HeadlessConfig from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (width, height) = cli.parse_screen_size().map_err(TypeaheadError::config)?;
        let output_format = cli.parse_output_format().map_err(TypeaheadError::config)?;

        Ok(Self {
            width,
            height,
            output_format,
            fail_fast: cli.fail_fast,
            output_file: cli.output_file.clone(),
        })
    }
}

/// One row of the filtered set as the panel shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSnapshot {
    /// Element id of the row.
    pub id: String,
    /// Primary key of the item behind the row.
    pub key: String,
    /// Rendered body, lines joined with ` / `.
    pub text: String,
    pub highlighted: bool,
}

/// The autocomplete state after a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub input_text: String,
    pub query: String,
    /// Element with keyboard focus: `None`, `Input` or `Results`.
    pub focus: String,
    pub panel_open: bool,
    /// Open and with rows or the placeholder to draw.
    pub panel_visible: bool,
    pub highlight: Option<usize>,
    pub result_count: usize,
    pub rows: Vec<RowSnapshot>,
    /// Primary key of the last selection.
    pub selected_key: Option<String>,
    pub listener_count: usize,
    pub running: bool,
}

impl PanelSnapshot {
    pub fn capture(app: &App) -> Self {
        let ac = &app.autocomplete;
        let rows = (0..ac.filtered_len())
            .map(|index| RowSnapshot {
                id: ac.row_id(index),
                key: ac
                    .filtered_item(index)
                    .and_then(|item| item.field_text(ac.primary_key()))
                    .unwrap_or_default(),
                text: ac.row_body(index).map(|body| flatten(&body)).unwrap_or_default(),
                highlighted: ac.highlight() == Some(index),
            })
            .collect();

        Self {
            input_text: ac.input().text().to_string(),
            query: ac.query().to_string(),
            focus: format!("{:?}", ac.focus()),
            panel_open: ac.is_open(),
            panel_visible: ac.is_panel_visible(),
            highlight: ac.highlight(),
            result_count: ac.filtered_len(),
            rows,
            selected_key: app.selected_key(),
            listener_count: app.document.listener_count(),
            running: app.running,
        }
    }

    /// Reads a top-level field as text. Absent values read as `none`.
    pub fn field(&self, name: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        match value.get(name)? {
            serde_json::Value::Null => Some("none".to_string()),
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// One-line description used in text and frame reports.
    pub fn summary(&self) -> String {
        let panel = if !self.panel_open {
            "closed"
        } else if self.result_count == 0 && !self.query.is_empty() {
            "no results"
        } else {
            "open"
        };
        let highlight = self
            .highlight
            .map_or_else(|| "none".to_string(), |i| i.to_string());

        format!(
            "query {:?} | panel {} | highlight {} | {} results | focus {}",
            self.query, panel, highlight, self.result_count, self.focus
        )
    }
}

fn flatten(body: &Text<'_>) -> String {
    body.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Screen and state after one step.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Step source, or `initial`.
    pub label: String,
    pub summary: String,
    pub screen: String,
}

/// Outcome of a headless run.
#[derive(Debug)]
pub struct RunReport {
    pub snapshot: PanelSnapshot,
    pub screen: String,
    /// Lines inside the results panel, empty while it is hidden.
    pub panel: Vec<String>,
    /// Filled only for frames output.
    pub frames: Vec<Frame>,
    pub steps_run: usize,
    pub passed: usize,
    /// Source text of each failed assertion.
    pub failures: Vec<String>,
    pub duration: Duration,
}

/// Runs the app in headless mode.
pub struct HeadlessRunner {
    config: HeadlessConfig,
    terminal: Terminal<TestBackend>,
    app: App,
    steps: Vec<Step>,
    frames: Vec<Frame>,
    passed: usize,
    failures: Vec<String>,
}

impl HeadlessRunner {
    /// Creates a new headless runner around the given application.
    pub fn new(config: HeadlessConfig, app: App) -> Result<Self> {
        let backend = TestBackend::new(config.width, config.height);
        let terminal = Terminal::new(backend).map_err(|e| {
            TypeaheadError::internal(format!("Failed to create test terminal: {e}"))
        })?;

        Ok(Self {
            config,
            terminal,
            app,
            steps: Vec::new(),
            frames: Vec::new(),
            passed: 0,
            failures: Vec::new(),
        })
    }

    /// Loads steps from a string (comma-separated or newline-separated).
    pub fn load_steps(&mut self, input: &str) -> Result<()> {
        self.steps = parse_script(input)?;
        Ok(())
    }

    /// Loads steps from a script file, or stdin for `-`.
    pub fn load_script(&mut self, path: &str) -> Result<()> {
        let content = if path == "-" {
            std::io::read_to_string(std::io::stdin())
                .map_err(|e| TypeaheadError::internal(format!("Failed to read stdin: {e}")))?
        } else {
            std::fs::read_to_string(path).map_err(|e| {
                TypeaheadError::config(format!("Failed to read script file {path}: {e}"))
            })?
        };

        self.load_steps(&content)
    }

    /// Runs every step and reports the final state.
    pub fn run(mut self) -> Result<RunReport> {
        let started = Instant::now();

        // Element areas are known only after the first frame
        self.draw()?;
        self.app.mount();
        self.record_frame("initial")?;

        let steps = std::mem::take(&mut self.steps);
        let mut steps_run = 0;

        for step in steps {
            debug!("Headless step: {}", step.source);

            if let Action::Expect(expectation) = &step.action {
                let screen = screen_text(self.terminal.backend().buffer());
                if expectation.holds(&screen, &PanelSnapshot::capture(&self.app)) {
                    self.passed += 1;
                } else {
                    info!("Assertion failed: {}", step.source);
                    self.failures.push(step.source.clone());
                    if self.config.fail_fast {
                        break;
                    }
                }
            } else {
                self.apply(&step.action)?;
            }
            steps_run += 1;

            self.draw()?;
            if self.config.output_format == OutputFormat::Frames {
                self.record_frame(&step.source)?;
            }
            if !self.app.running {
                break;
            }
        }

        self.draw()?;
        let buffer = self.terminal.backend().buffer();
        let screen = screen_text(buffer);
        let panel = if self.app.autocomplete.is_panel_visible() {
            panel_lines(buffer, self.app.autocomplete.drawn_panel())
        } else {
            Vec::new()
        };

        Ok(RunReport {
            snapshot: PanelSnapshot::capture(&self.app),
            screen,
            panel,
            frames: self.frames,
            steps_run,
            passed: self.passed,
            failures: self.failures,
            duration: started.elapsed(),
        })
    }

    fn apply(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Key(key) => self.app.handle_event(Event::Key(*key)),
            Action::Type(text) => {
                for c in text.chars() {
                    let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
                    self.app.handle_event(Event::Key(key));
                }
            }
            Action::Hover(cell) => self.pointer(MouseEventKind::Moved, *cell),
            Action::Click(cell) => self.pointer(MouseEventKind::Down(MouseButton::Left), *cell),
            Action::Resize(width, height) => {
                self.terminal
                    .resize(Rect::new(0, 0, *width, *height))
                    .map_err(|e| TypeaheadError::internal(format!("Resize failed: {e}")))?;
                self.app.handle_event(Event::Resize(*width, *height));
            }
            Action::Expect(_) => {}
        }
        Ok(())
    }

    fn pointer(&mut self, kind: MouseEventKind, cell: Position) {
        self.app.handle_event(Event::Mouse(MouseEvent {
            kind,
            column: cell.x,
            row: cell.y,
            modifiers: KeyModifiers::NONE,
        }));
    }

    fn draw(&mut self) -> Result<()> {
        let app = &mut self.app;
        self.terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| TypeaheadError::internal(format!("Failed to render: {e}")))?;
        Ok(())
    }

    fn record_frame(&mut self, label: &str) -> Result<()> {
        self.draw()?;
        self.frames.push(Frame {
            label: label.to_string(),
            summary: PanelSnapshot::capture(&self.app).summary(),
            screen: screen_text(self.terminal.backend().buffer()),
        });
        Ok(())
    }
}

/// Runs headless mode from CLI arguments. Returns the process exit code.
pub fn run_headless(cli: &Cli, app: App) -> Result<i32> {
    cli.validate_headless().map_err(TypeaheadError::config)?;

    let config = HeadlessConfig::from_cli(cli)?;
    let mut runner = HeadlessRunner::new(config.clone(), app)?;

    if let Some(ref steps) = cli.events {
        runner.load_steps(steps)?;
    } else if let Some(ref script_path) = cli.script {
        runner.load_script(script_path)?;
    }

    let report = runner.run()?;
    let output = render(&report, config.output_format);

    if let Some(ref path) = config.output_file {
        std::fs::write(path, &output).map_err(|e| {
            TypeaheadError::internal(format!("Failed to write output file: {e}"))
        })?;
    } else {
        print!("{}", output);
    }

    Ok(if report.failures.is_empty() { 0 } else { 1 })
}
