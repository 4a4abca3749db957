//! Reports for headless runs: the final panel state as text, JSON, or one
//! frame per step.

use super::{Frame, PanelSnapshot, RunReport};
use crate::cli::OutputFormat;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use serde::Serialize;

/// Renders the buffer as plain text, trailing blanks trimmed.
pub fn screen_text(buffer: &Buffer) -> String {
    let mut lines = region_lines(buffer, buffer.area);
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    format!("{}\n", lines.join("\n"))
}

/// Lines of the buffer covered by the results panel.
pub fn panel_lines(buffer: &Buffer, panel: Rect) -> Vec<String> {
    region_lines(buffer, panel.intersection(buffer.area))
}

fn region_lines(buffer: &Buffer, area: Rect) -> Vec<String> {
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    state: &'a PanelSnapshot,
    panel: &'a [String],
    screen: Vec<&'a str>,
    events_executed: usize,
    duration_ms: u64,
    assertions: Assertions<'a>,
}

#[derive(Serialize)]
struct Assertions<'a> {
    passed: usize,
    failed: usize,
    failures: &'a [String],
}

/// Formats a finished run.
pub fn render(report: &RunReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => text(report),
        OutputFormat::Json => json(report),
        OutputFormat::Frames => frames(report),
    }
}

fn text(report: &RunReport) -> String {
    let mut out = format!(
        "{}\n{}\nEvents: {} executed in {}ms",
        report.screen,
        report.snapshot.summary(),
        report.steps_run,
        report.duration.as_millis()
    );
    if report.passed > 0 || !report.failures.is_empty() {
        out.push_str(&format!(
            " | Assertions: {} passed, {} failed",
            report.passed,
            report.failures.len()
        ));
    }
    out.push('\n');
    for failure in &report.failures {
        out.push_str(&format!("FAILED {failure}\n"));
    }
    out
}

fn json(report: &RunReport) -> String {
    let doc = JsonReport {
        state: &report.snapshot,
        panel: &report.panel,
        screen: report.screen.lines().collect(),
        events_executed: report.steps_run,
        duration_ms: report.duration.as_millis() as u64,
        assertions: Assertions {
            passed: report.passed,
            failed: report.failures.len(),
            failures: &report.failures,
        },
    };

    serde_json::to_string_pretty(&doc)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {e}\"}}"))
}

fn frames(report: &RunReport) -> String {
    let mut out = String::new();
    for (number, frame) in report.frames.iter().enumerate() {
        out.push_str(&frame_header(number, frame));
        out.push_str(&frame.screen);
        out.push('\n');
    }
    out.push_str(&format!(
        "{} frames, {} passed, {} failed\n",
        report.frames.len(),
        report.passed,
        report.failures.len()
    ));
    out
}

fn frame_header(number: usize, frame: &Frame) -> String {
    format!("--- {} {} | {} ---\n", number, frame.label, frame.summary)
}
