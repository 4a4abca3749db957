//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components. The areas drawn are
//! recorded on the controller so pointer events can be hit tested.

use super::app::App;
use super::autocomplete::{panel_area, Focus, SearchInput};
use super::widgets::{detail, header, input, results};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Text,
    Frame,
};

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Selection detail
        ])
        .split(area);

    render_header(frame, main_layout[0], app);
    render_input(frame, main_layout[1], app);
    render_detail(frame, main_layout[2], app);

    // Drawn last so it floats over the detail pane
    render_results(frame, area, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let ac = &app.autocomplete;
    let match_count = (!ac.query().is_empty()).then(|| ac.filtered_len());
    let widget = header::Header::new(&app.source, ac.items().len(), match_count);
    frame.render_widget(widget, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.autocomplete.focus() == Focus::Input;
    let state = app.autocomplete.input();
    let clear = input::clear_area(area, !state.text().is_empty());

    frame.render_widget(input::InputBar::new(state, &app.placeholder, focused), area);

    if focused {
        frame.set_cursor_position(input::InputBar::cursor_position(state, area));
    }

    app.autocomplete.set_input_area(area, clear);
}

fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let widget = detail::SelectionDetail::new(app.selected.as_ref(), app.autocomplete.primary_key());
    frame.render_widget(widget, area);
}

fn render_results(frame: &mut Frame, bounds: Rect, app: &mut App) {
    let ac = &app.autocomplete;
    if !ac.is_panel_visible() {
        app.autocomplete.clear_panel_layout();
        return;
    }

    let rows: Vec<Text<'static>> = (0..ac.filtered_len())
        .filter_map(|index| ac.row_body(index))
        .collect();
    let heights = results::ResultsPanel::heights(&rows);

    let panel = panel_area(
        ac.panel_anchor(),
        ac.input_area(),
        results::content_height(&heights),
        bounds,
    );
    if panel.is_empty() {
        app.autocomplete.clear_panel_layout();
        return;
    }

    let highlight = ac.highlight();
    let placed = results::layout_rows(results::panel_inner(panel), &heights, highlight);
    let widget = results::ResultsPanel::new(rows, highlight, ac.no_result_text());
    frame.render_widget(widget, panel);

    app.autocomplete.set_panel_layout(panel, placed);
}
