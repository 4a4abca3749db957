//! End-to-end keyboard and pointer navigation through the results panel.
//!
//! With no template each row lists the primary key and then one line per
//! field, so a row is four lines tall. At the default 80x24 size the panel
//! title sits on line 4 and the first row starts on line 5.

use super::common::run_events;

fn state(events: &str) -> serde_json::Value {
    let (code, stdout, stderr) = run_events(events, &["--output", "json"]);
    assert_eq!(code, 0, "stdout: {}\nstderr: {}", stdout, stderr);
    serde_json::from_str(&stdout).unwrap()
}

#[test]
fn test_keyboard_select_writes_name() {
    let state = state("type:al,key:down,key:down,key:enter");

    assert_eq!(state["input_text"], "Alan Price");
    assert_eq!(state["selected_key"], "3");
    assert_eq!(state["panel_open"], false);
    assert_eq!(state["focus"], "Input");
}

#[test]
fn test_down_at_last_row_stays() {
    let state = state("type:al,key:down,key:down,key:down");

    assert_eq!(state["highlight"], 1);
    assert_eq!(state["focus"], "Results");
}

#[test]
fn test_up_from_first_row_returns_to_input() {
    let state = state("type:al,key:down,key:up");

    assert!(state["highlight"].is_null());
    assert_eq!(state["focus"], "Input");
    assert_eq!(state["panel_open"], true);
}

#[test]
fn test_escape_closes_and_keeps_text() {
    let state = state("type:al,key:down,key:esc");

    assert_eq!(state["input_text"], "al");
    assert_eq!(state["panel_open"], false);
    assert!(state["highlight"].is_null());
    assert_eq!(state["focus"], "Input");
}

#[test]
fn test_no_results_shows_placeholder() {
    let (code, stdout, _) = run_events(
        "type:a,type:zz,assert:contains:No items matches the result.",
        &["--output", "json"],
    );

    assert_eq!(code, 0, "stdout: {}", stdout);
    assert!(stdout.contains(r#""result_count": 0"#));
}

#[test]
fn test_click_row_selects_it() {
    let state = state("type:al,hover:5x10,click:5x10");

    assert_eq!(state["input_text"], "Alan Price");
    assert_eq!(state["selected_key"], "3");
}

#[test]
fn test_hover_highlights_row() {
    let state = state("type:al,hover:5x6");

    assert_eq!(state["highlight"], 0);
    assert_eq!(state["panel_open"], true);
}

#[test]
fn test_outside_click_closes_panel() {
    let state = state("type:al,click:40x20");

    assert_eq!(state["panel_open"], false);
    assert_eq!(state["input_text"], "al");
}

#[test]
fn test_clear_glyph_resets_input() {
    let state = state("type:al,click:77x2");

    assert_eq!(state["input_text"], "");
    assert_eq!(state["panel_open"], false);
    assert_eq!(state["result_count"], 0);
}

#[test]
fn test_single_document_listener_while_mounted() {
    let state = state("type:al,key:esc,type:i,key:down,key:enter");

    assert_eq!(state["listener_count"], 1);
    assert_eq!(state["input_text"], "Alice Moreau");
}
