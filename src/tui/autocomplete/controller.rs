//! The autocomplete controller.
//!
//! Owns the filtered set, highlight index, panel visibility and keyboard
//! focus, and turns keyboard, mouse and document events into transitions:
//!
//! | From | Event | To |
//! |------|-------|----|
//! | any | input focus | open |
//! | any | query change | open without highlight, or closed when the query is empty |
//! | open | ArrowDown on input | highlighted(0), focus moves to the panel |
//! | highlighted(i) | ArrowDown / ArrowUp on panel | highlighted(i±1), clamped; Up from 0 returns to the input |
//! | highlighted(i) | Enter / click row i | closed, row i committed |
//! | open | Escape or outside click | closed |
//! | any | reset | closed, query cleared |
//!
//! Highlight and visibility are plain state: the rendering layer reads them
//! and decides how rows look.

use super::document::{Document, DocumentEvent, Subscription};
use super::options::{
    AutocompleteOptions, ChangeEvent, ChangeHandler, ElementHandle, ReadyHandler, RenderItem,
    ResetHandler, SelectHandler,
};
use super::position::{offset_of, Offset};
use crate::error::{Result, TypeaheadError};
use crate::filter::filter_indices;
use crate::items::{validate_primary_key, Item};
use crate::tui::widgets::card::{index_from_id, row_id, CardEvent};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::text::Text;
use tracing::debug;

/// A text input the controller can drive.
pub trait SearchInput {
    /// Returns the current text.
    fn text(&self) -> &str;

    /// Replaces the text, moving the cursor to the end.
    fn set_text(&mut self, text: &str);

    /// Applies an editing key. Returns true if the text changed.
    fn apply_key(&mut self, key: KeyEvent) -> bool;
}

/// Which element receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Input,
    Results,
}

/// Observable state of the results panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    OpenNoHighlight,
    OpenHighlighted(usize),
}

struct Handlers {
    on_change: ChangeHandler,
    on_select: Option<SelectHandler>,
    on_ready: Option<ReadyHandler>,
    reset: Option<ResetHandler>,
}

/// Screen areas recorded by the last render, used for hit testing.
#[derive(Debug, Default)]
struct Layout {
    input: Rect,
    clear: Rect,
    panel: Rect,
    rows: Vec<(usize, Rect)>,
}

/// Autocomplete behaviour around an injected text input.
pub struct Autocomplete<I: SearchInput> {
    input: I,
    items: Vec<Item>,
    primary_key: String,
    render_item: RenderItem,
    query: String,
    filtered: Vec<usize>,
    highlight: Option<usize>,
    visible: bool,
    focus: Focus,
    anchor: Offset,
    scroll: Position,
    layout: Layout,
    hovered: Option<String>,
    handlers: Handlers,
    no_result_text: String,
    item_id_prefix: String,
    subscription: Option<Subscription>,
    ready_fired: bool,
    /// Set by a commit so the host echoing the selection into the query
    /// does not reopen the panel.
    awaiting_commit_echo: bool,
}

fn contains(area: Rect, pos: Position) -> bool {
    pos.x >= area.x && pos.x < area.right() && pos.y >= area.y && pos.y < area.bottom()
}

impl<I: SearchInput> Autocomplete<I> {
    /// Builds a controller around `input`.
    ///
    /// Fails if no `on_change` handler was given or the primary key is
    /// missing or duplicated in the collection.
    pub fn new(mut input: I, options: AutocompleteOptions) -> Result<Self> {
        let AutocompleteOptions {
            items,
            primary_key,
            render_item,
            value,
            on_change,
            on_select,
            on_ready,
            reset,
            no_result_text,
            item_id_prefix,
        } = options;

        let on_change = on_change
            .ok_or_else(|| TypeaheadError::config("An on_change handler is required"))?;
        validate_primary_key(&items, &primary_key)?;

        input.set_text(&value);
        let filtered = filter_indices(&items, &value);

        Ok(Self {
            input,
            items,
            primary_key,
            render_item,
            query: value,
            filtered,
            highlight: None,
            visible: false,
            focus: Focus::None,
            anchor: Offset::default(),
            scroll: Position::default(),
            layout: Layout::default(),
            hovered: None,
            handlers: Handlers {
                on_change,
                on_select,
                on_ready,
                reset,
            },
            no_result_text,
            item_id_prefix,
            subscription: None,
            ready_fired: false,
            awaiting_commit_echo: false,
        })
    }

    // === Lifecycle ===

    /// Registers the document listener and fires `on_ready` the first time.
    pub fn mount(&mut self, document: &mut Document) {
        if self.subscription.is_none() {
            self.subscription = Some(document.subscribe());
        }

        if !self.ready_fired {
            self.ready_fired = true;
            let input = ElementHandle {
                id: self.input_id(),
                area: self.layout.input,
            };
            let panel = ElementHandle {
                id: self.panel_id(),
                area: self.layout.panel,
            };
            if let Some(on_ready) = self.handlers.on_ready.as_mut() {
                on_ready(&input, &panel);
            }
        }
    }

    /// Removes the document listener.
    pub fn unmount(&mut self, document: &mut Document) {
        if let Some(subscription) = self.subscription.take() {
            document.unsubscribe(subscription.id());
        }
    }

    /// Returns true while the document listener is registered.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    // === Host-driven updates ===

    /// Applies the host's controlled value.
    ///
    /// A keystroke edits the input right away and reports the new text
    /// through `on_change`, but `query` only follows once the host echoes it
    /// here. A host that rejects a change calls `set_value(query)` with the
    /// current query, which puts the input text back in step.
    pub fn set_value(&mut self, value: &str) {
        let keep_closed = std::mem::take(&mut self.awaiting_commit_echo);

        if self.input.text() != value {
            self.input.set_text(value);
        }
        if self.query == value {
            return;
        }

        self.query = value.to_string();
        self.refilter(keep_closed);
    }

    /// Replaces the item collection.
    pub fn set_items(&mut self, items: Vec<Item>) -> Result<()> {
        validate_primary_key(&items, &self.primary_key)?;
        self.items = items;
        self.refilter(false);
        Ok(())
    }

    /// Clears the query, results and highlight, and notifies the host.
    pub fn reset(&mut self) {
        self.query.clear();
        self.input.set_text("");
        self.filtered.clear();
        self.highlight = None;
        self.hovered = None;
        self.visible = false;
        self.awaiting_commit_echo = false;
        debug!("Autocomplete reset");

        if let Some(reset) = self.handlers.reset.as_mut() {
            reset();
        }
    }

    /// Records where the input and its clear affordance were drawn.
    pub fn set_input_area(&mut self, input: Rect, clear: Rect) {
        self.layout.input = input;
        self.layout.clear = clear;
    }

    /// Records where the panel and its rows were drawn.
    pub fn set_panel_layout(&mut self, panel: Rect, rows: Vec<(usize, Rect)>) {
        self.layout.panel = panel;
        self.layout.rows = rows;
    }

    /// Forgets the panel layout after the panel was hidden.
    pub fn clear_panel_layout(&mut self) {
        self.layout.panel = Rect::default();
        self.layout.rows.clear();
    }

    /// Sets the document scroll offset used when anchoring the panel.
    pub fn set_scroll(&mut self, scroll: Position) {
        self.scroll = scroll;
    }

    // === Focus ===

    /// Gives keyboard focus to the input and opens the panel under it.
    pub fn focus_input(&mut self) {
        self.awaiting_commit_echo = false;
        self.focus = Focus::Input;
        self.anchor = offset_of(self.layout.input, self.scroll);
        self.visible = true;
    }

    /// Moves keyboard focus away from the autocomplete.
    pub fn blur(&mut self) {
        self.focus = Focus::None;
    }

    // === Keyboard ===

    /// Handles a key press on whichever element has focus.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.awaiting_commit_echo = false;
        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Results => self.handle_results_key(key),
            Focus::None => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Down {
            if !self.filtered.is_empty() {
                self.visible = true;
                self.highlight = Some(0);
                self.focus = Focus::Results;
                debug!("Focus moved to first result");
            }
            return;
        }

        if self.input.apply_key(key) {
            let event = ChangeEvent {
                key,
                value: self.input.text().to_string(),
            };
            (self.handlers.on_change)(&event);
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => match self.highlight {
                Some(i) if i > 0 => self.highlight = Some(i - 1),
                _ => {
                    self.highlight = None;
                    self.focus_input();
                }
            },
            KeyCode::Down => {
                if let Some(last) = self.filtered.len().checked_sub(1) {
                    self.highlight = Some(match self.highlight {
                        Some(i) => (i + 1).min(last),
                        None => 0,
                    });
                }
            }
            KeyCode::Enter => {
                if let Some(i) = self.highlight {
                    self.commit(i);
                }
            }
            _ => {}
        }
    }

    // === Mouse ===

    /// Handles pointer movement and clicks.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let pos = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Moved => {
                let target = self.card_at(pos);
                if target == self.hovered {
                    return;
                }
                if let Some(previous) = self.hovered.take() {
                    self.handle_card_event(CardEvent::HoverLeave(previous));
                }
                if let Some(id) = target {
                    self.hovered = Some(id.clone());
                    self.handle_card_event(CardEvent::HoverEnter(id));
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.awaiting_commit_echo = false;
                if contains(self.layout.clear, pos) {
                    self.reset();
                } else if contains(self.layout.input, pos) {
                    self.focus_input();
                } else if let Some(id) = self.card_at(pos) {
                    self.handle_card_event(CardEvent::Activate(id));
                }
            }
            _ => {}
        }
    }

    /// Routes a card event to the matching handler.
    pub fn handle_card_event(&mut self, event: CardEvent) {
        match event {
            CardEvent::HoverEnter(id) => self.on_hover_enter(&id),
            CardEvent::HoverLeave(id) => self.on_hover_leave(&id),
            CardEvent::Activate(id) => self.on_activate(&id),
        }
    }

    /// Highlight follows the pointer onto a row.
    pub fn on_hover_enter(&mut self, id: &str) {
        if !self.visible {
            return;
        }
        if let Some(index) = self.row_index(id) {
            self.highlight = Some(index);
        }
    }

    /// Clears the highlight if the pointer leaves the highlighted row.
    pub fn on_hover_leave(&mut self, id: &str) {
        if let Some(index) = self.row_index(id) {
            if self.highlight == Some(index) {
                self.highlight = None;
            }
        }
    }

    /// Commits the clicked row.
    pub fn on_activate(&mut self, id: &str) {
        if !self.visible {
            return;
        }
        if let Some(index) = self.row_index(id) {
            self.commit(index);
        }
    }

    fn row_index(&self, id: &str) -> Option<usize> {
        index_from_id(id, &self.item_id_prefix).filter(|&i| i < self.filtered.len())
    }

    fn card_at(&self, pos: Position) -> Option<String> {
        if !self.is_panel_visible() {
            return None;
        }
        self.layout
            .rows
            .iter()
            .find(|(_, area)| contains(*area, pos))
            .map(|(index, _)| row_id(&self.item_id_prefix, *index))
    }

    // === Document listener ===

    /// Drains pending document events: Escape and outside clicks close the panel.
    pub fn handle_document_events(&mut self) {
        let Some(subscription) = self.subscription.as_mut() else {
            return;
        };

        let mut pending = Vec::new();
        while let Some(event) = subscription.try_next() {
            pending.push(event);
        }

        for event in pending {
            match event {
                DocumentEvent::Key(key) if key.code == KeyCode::Esc => self.hide(),
                DocumentEvent::Click(pos) if !self.hit_self(pos) => self.hide(),
                _ => {}
            }
        }
    }

    fn hit_self(&self, pos: Position) -> bool {
        contains(self.layout.input, pos)
            || (self.is_panel_visible() && contains(self.layout.panel, pos))
    }

    fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.highlight = None;
        self.hovered = None;
        if self.focus == Focus::Results {
            self.focus = Focus::Input;
        }
        debug!("Results panel hidden");
    }

    // === Internals ===

    fn refilter(&mut self, keep_closed: bool) {
        self.filtered = filter_indices(&self.items, &self.query);
        self.highlight = None;
        // Row ids now point at different items
        self.hovered = None;
        if self.focus == Focus::Results {
            self.focus = Focus::Input;
        }

        if self.query.is_empty() {
            self.visible = false;
        } else if !self.filtered.is_empty() && !keep_closed {
            self.visible = true;
        }

        debug!(
            "Query {:?} matched {} of {} items",
            self.query,
            self.filtered.len(),
            self.items.len()
        );
    }

    fn commit(&mut self, index: usize) {
        let Some(&item_index) = self.filtered.get(index) else {
            return;
        };

        self.highlight = None;
        self.hovered = None;
        self.visible = false;
        self.focus = Focus::Input;
        self.awaiting_commit_echo = true;
        debug!("Committed row {}", index);

        if let Some(on_select) = self.handlers.on_select.as_mut() {
            on_select(&self.items[item_index]);
        }
    }

    // === Derived state ===

    /// Returns the panel state.
    pub fn state(&self) -> PanelState {
        match (self.visible, self.highlight) {
            (false, _) => PanelState::Closed,
            (true, None) => PanelState::OpenNoHighlight,
            (true, Some(i)) => PanelState::OpenHighlighted(i),
        }
    }

    /// Returns true if the panel is open.
    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Returns true if the panel has something to draw: rows or the placeholder.
    pub fn is_panel_visible(&self) -> bool {
        self.visible && (!self.filtered.is_empty() || !self.query.is_empty())
    }

    /// Returns true if the panel shows the no-results placeholder.
    pub fn shows_no_results(&self) -> bool {
        self.visible && self.filtered.is_empty() && !self.query.is_empty()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn no_result_text(&self) -> &str {
        &self.no_result_text
    }

    /// Returns where the panel is anchored, as computed on the last input focus.
    pub fn panel_anchor(&self) -> Offset {
        self.anchor
    }

    /// Returns the input area recorded by the last render.
    pub fn input_area(&self) -> Rect {
        self.layout.input
    }

    /// Returns the panel area recorded by the last render, empty while hidden.
    pub fn drawn_panel(&self) -> Rect {
        self.layout.panel
    }

    /// Number of rows in the filtered set.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Iterates over the filtered set in order.
    pub fn filtered_items(&self) -> impl Iterator<Item = &Item> {
        self.filtered.iter().map(|&idx| &self.items[idx])
    }

    /// Returns the filtered row at `index`.
    pub fn filtered_item(&self, index: usize) -> Option<&Item> {
        self.filtered.get(index).map(|&idx| &self.items[idx])
    }

    /// Renders the body of the filtered row at `index`.
    pub fn row_body(&self, index: usize) -> Option<Text<'static>> {
        self.filtered_item(index).map(|item| (self.render_item)(item))
    }

    /// Element id of the row at `index`.
    pub fn row_id(&self, index: usize) -> String {
        row_id(&self.item_id_prefix, index)
    }

    pub fn input_id(&self) -> String {
        format!("{}input", self.item_id_prefix)
    }

    pub fn panel_id(&self) -> String {
        format!("{}results", self.item_id_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::input::InputState;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        changes: Vec<String>,
        selected: Vec<Item>,
        ready: Vec<(String, String)>,
        resets: usize,
    }

    fn people() -> Vec<Item> {
        vec![
            json!({"id": 1, "name": "Alice", "address": "NY"}),
            json!({"id": 2, "name": "Bob", "address": "LA"}),
            json!({"id": 3, "name": "Alan", "address": "SF"}),
            json!({"id": 4, "name": "Carla", "address": "Austin"}),
        ]
        .into_iter()
        .map(|v| Item::from_value(v).unwrap())
        .collect()
    }

    fn setup() -> (Autocomplete<InputState>, Rc<RefCell<Calls>>, Document) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let (c1, c2, c3, c4) = (calls.clone(), calls.clone(), calls.clone(), calls.clone());

        let options = AutocompleteOptions::new(people(), "id", |item| {
            Text::raw(item.field_text("name").unwrap_or_default())
        })
        .on_change(move |e| c1.borrow_mut().changes.push(e.value.clone()))
        .on_select(move |item| c2.borrow_mut().selected.push(item.clone()))
        .on_ready(move |input, panel| {
            c3.borrow_mut()
                .ready
                .push((input.id.clone(), panel.id.clone()))
        })
        .reset(move || c4.borrow_mut().resets += 1);

        let mut ac = Autocomplete::new(InputState::new(), options).unwrap();
        ac.set_input_area(Rect::new(0, 1, 40, 3), Rect::new(37, 2, 1, 1));
        let mut document = Document::new();
        ac.mount(&mut document);
        ac.focus_input();
        (ac, calls, document)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Types text the way a host echoing `on_change` would.
    fn type_text(ac: &mut Autocomplete<InputState>, text: &str) {
        for c in text.chars() {
            ac.handle_key(key(KeyCode::Char(c)));
            let value = ac.input().text().to_string();
            ac.set_value(&value);
        }
    }

    fn names(ac: &Autocomplete<InputState>) -> Vec<String> {
        ac.filtered_items()
            .map(|i| i.field_text("name").unwrap())
            .collect()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Lays rows out one line each under the input, as the renderer would.
    fn layout_rows(ac: &mut Autocomplete<InputState>) {
        let rows = (0..ac.filtered_len())
            .map(|i| (i, Rect::new(1, 5 + i as u16, 38, 1)))
            .collect();
        ac.set_panel_layout(Rect::new(0, 4, 40, ac.filtered_len() as u16 + 2), rows);
    }

    #[test]
    fn test_missing_on_change_is_config_error() {
        let options = AutocompleteOptions::new(people(), "id", |_| Text::default());
        let err = Autocomplete::new(InputState::new(), options).err().unwrap();
        assert_eq!(err.category(), "Configuration Error");
    }

    #[test]
    fn test_duplicate_primary_key_rejected() {
        let mut items = people();
        items.push(Item::from_value(json!({"id": 1, "name": "Dup"})).unwrap());
        let options = AutocompleteOptions::new(items, "id", |_| Text::default()).on_change(|_| {});
        assert!(Autocomplete::new(InputState::new(), options).is_err());
    }

    #[test]
    fn test_on_ready_fires_once() {
        let (mut ac, calls, mut document) = setup();
        ac.mount(&mut document);
        assert_eq!(
            calls.borrow().ready,
            vec![(
                "autocomplete-input".to_string(),
                "autocomplete-results".to_string()
            )]
        );
        assert_eq!(document.listener_count(), 1);
    }

    #[test]
    fn test_unmount_removes_listener() {
        let (mut ac, _, mut document) = setup();
        ac.unmount(&mut document);
        assert!(!ac.is_mounted());
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn test_typing_delegates_change_and_filters() {
        let (mut ac, calls, _) = setup();
        type_text(&mut ac, "al");

        assert_eq!(calls.borrow().changes, vec!["a", "al"]);
        assert_eq!(names(&ac), vec!["Alice", "Alan"]);
        assert_eq!(ac.state(), PanelState::OpenNoHighlight);
    }

    #[test]
    fn test_change_not_fired_without_text_change() {
        let (mut ac, calls, _) = setup();
        ac.handle_key(key(KeyCode::Backspace));
        ac.handle_key(key(KeyCode::Left));
        assert!(calls.borrow().changes.is_empty());
    }

    #[test]
    fn test_arrow_down_from_input_highlights_first() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "a");
        ac.handle_key(key(KeyCode::Down));

        assert_eq!(ac.state(), PanelState::OpenHighlighted(0));
        assert_eq!(ac.focus(), Focus::Results);
    }

    #[test]
    fn test_arrow_down_stops_at_last_row() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "a");
        let n = ac.filtered_len();
        assert_eq!(n, 4);

        ac.handle_key(key(KeyCode::Down));
        for _ in 0..n - 1 {
            ac.handle_key(key(KeyCode::Down));
        }
        assert_eq!(ac.highlight(), Some(n - 1));

        ac.handle_key(key(KeyCode::Down));
        assert_eq!(ac.highlight(), Some(n - 1));
    }

    #[test]
    fn test_arrow_down_on_empty_set_is_noop() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "zz");
        ac.handle_key(key(KeyCode::Down));
        assert_eq!(ac.focus(), Focus::Input);
        assert_eq!(ac.highlight(), None);
    }

    #[test]
    fn test_arrow_up_walks_back_to_input() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "a");
        ac.handle_key(key(KeyCode::Down));
        ac.handle_key(key(KeyCode::Down));
        assert_eq!(ac.highlight(), Some(1));

        ac.handle_key(key(KeyCode::Up));
        assert_eq!(ac.highlight(), Some(0));

        ac.handle_key(key(KeyCode::Up));
        assert_eq!(ac.highlight(), None);
        assert_eq!(ac.focus(), Focus::Input);
        assert!(ac.is_open());
    }

    #[test]
    fn test_enter_commits_highlighted_row() {
        let (mut ac, calls, _) = setup();
        type_text(&mut ac, "a");
        ac.handle_key(key(KeyCode::Down));
        ac.handle_key(key(KeyCode::Down));
        ac.handle_key(key(KeyCode::Enter));

        let calls = calls.borrow();
        assert_eq!(calls.selected.len(), 1);
        assert_eq!(calls.selected[0].field_text("name"), Some("Bob".to_string()));
        assert_eq!(ac.state(), PanelState::Closed);
        assert_eq!(ac.focus(), Focus::Input);
    }

    #[test]
    fn test_commit_echo_keeps_panel_closed() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "bo");
        ac.handle_key(key(KeyCode::Down));
        ac.handle_key(key(KeyCode::Enter));

        // Host writes the selection back into the input
        ac.set_value("Bob");
        assert_eq!(ac.state(), PanelState::Closed);
        assert_eq!(ac.filtered_len(), 1);

        // Further typing reopens as usual
        ac.handle_key(key(KeyCode::Backspace));
        let value = ac.input().text().to_string();
        ac.set_value(&value);
        assert!(ac.is_open());
    }

    #[test]
    fn test_escape_closes_without_touching_query() {
        let (mut ac, _, mut document) = setup();
        type_text(&mut ac, "al");
        ac.handle_key(key(KeyCode::Down));

        document.dispatch(DocumentEvent::Key(key(KeyCode::Esc)));
        ac.handle_document_events();

        assert_eq!(ac.state(), PanelState::Closed);
        assert_eq!(ac.query(), "al");
        assert_eq!(names(&ac), vec!["Alice", "Alan"]);
        assert_eq!(ac.focus(), Focus::Input);
    }

    #[test]
    fn test_escape_after_unmount_is_ignored() {
        let (mut ac, _, mut document) = setup();
        type_text(&mut ac, "al");
        ac.unmount(&mut document);

        document.dispatch(DocumentEvent::Key(key(KeyCode::Esc)));
        ac.handle_document_events();
        assert!(ac.is_open());
    }

    #[test]
    fn test_outside_click_closes() {
        let (mut ac, _, mut document) = setup();
        type_text(&mut ac, "al");
        layout_rows(&mut ac);

        document.dispatch(DocumentEvent::Click(Position::new(5, 2)));
        ac.handle_document_events();
        assert!(ac.is_open(), "click on the input is not outside");

        document.dispatch(DocumentEvent::Click(Position::new(60, 20)));
        ac.handle_document_events();
        assert!(!ac.is_open());
    }

    #[test]
    fn test_no_results_keeps_panel_open() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "zz");

        assert!(ac.is_open());
        assert!(ac.shows_no_results());
        assert_eq!(ac.no_result_text(), "No items matches the result.");
    }

    #[test]
    fn test_clearing_query_closes_panel() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "a");
        ac.set_value("");
        assert_eq!(ac.state(), PanelState::Closed);
        assert_eq!(ac.filtered_len(), 0);
    }

    #[test]
    fn test_query_change_resets_highlight() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "a");
        ac.handle_key(key(KeyCode::Down));
        ac.handle_key(key(KeyCode::Down));

        ac.set_value("al");
        assert_eq!(ac.state(), PanelState::OpenNoHighlight);
        assert_eq!(ac.focus(), Focus::Input);
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "a");

        ac.on_hover_enter("autocomplete-2");
        assert_eq!(ac.highlight(), Some(2));

        ac.on_hover_leave("autocomplete-1");
        assert_eq!(ac.highlight(), Some(2), "leaving another row keeps highlight");

        ac.on_hover_leave("autocomplete-2");
        assert_eq!(ac.highlight(), None);
    }

    #[test]
    fn test_bad_ids_are_noops() {
        let (mut ac, calls, _) = setup();
        type_text(&mut ac, "a");

        ac.on_hover_enter("autocomplete-input");
        ac.on_hover_enter("autocomplete-99");
        ac.on_activate("garbage");
        ac.on_activate("autocomplete-4");

        assert_eq!(ac.highlight(), None);
        assert!(calls.borrow().selected.is_empty());
        assert!(ac.is_open());
    }

    #[test]
    fn test_click_commits_row() {
        let (mut ac, calls, _) = setup();
        type_text(&mut ac, "al");

        ac.on_activate("autocomplete-1");
        let calls = calls.borrow();
        assert_eq!(calls.selected.len(), 1);
        assert_eq!(calls.selected[0].field_text("name"), Some("Alan".to_string()));
        assert!(!ac.is_open());
    }

    #[test]
    fn test_mouse_routing_over_rows() {
        let (mut ac, calls, _) = setup();
        type_text(&mut ac, "a");
        layout_rows(&mut ac);

        ac.handle_mouse(mouse(MouseEventKind::Moved, 3, 6));
        assert_eq!(ac.highlight(), Some(1));

        ac.handle_mouse(mouse(MouseEventKind::Moved, 3, 7));
        assert_eq!(ac.highlight(), Some(2));

        ac.handle_mouse(mouse(MouseEventKind::Moved, 70, 20));
        assert_eq!(ac.highlight(), None);

        ac.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 3, 8));
        assert_eq!(
            calls.borrow().selected[0].field_text("name"),
            Some("Carla".to_string())
        );
    }

    #[test]
    fn test_hover_reenters_row_after_commit() {
        let (mut ac, calls, _) = setup();
        type_text(&mut ac, "a");
        layout_rows(&mut ac);

        ac.handle_mouse(mouse(MouseEventKind::Moved, 3, 6));
        ac.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 3, 6));
        assert_eq!(calls.borrow().selected.len(), 1);
        assert!(!ac.is_open());

        // Pointer stays on the row while the query is retyped
        ac.handle_key(key(KeyCode::Backspace));
        ac.set_value("");
        type_text(&mut ac, "a");
        layout_rows(&mut ac);

        ac.handle_mouse(mouse(MouseEventKind::Moved, 4, 6));
        assert_eq!(ac.highlight(), Some(1));
    }

    #[test]
    fn test_hover_reenters_row_after_refilter() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "a");
        layout_rows(&mut ac);

        ac.handle_mouse(mouse(MouseEventKind::Moved, 3, 5));
        assert_eq!(ac.highlight(), Some(0));

        type_text(&mut ac, "l");
        layout_rows(&mut ac);
        assert_eq!(ac.highlight(), None);

        ac.handle_mouse(mouse(MouseEventKind::Moved, 4, 5));
        assert_eq!(ac.highlight(), Some(0));
    }

    #[test]
    fn test_hover_reenters_row_after_escape() {
        let (mut ac, _, mut document) = setup();
        type_text(&mut ac, "a");
        layout_rows(&mut ac);
        ac.handle_mouse(mouse(MouseEventKind::Moved, 3, 7));

        document.dispatch(DocumentEvent::Key(key(KeyCode::Esc)));
        ac.handle_document_events();
        assert!(!ac.is_open());

        ac.focus_input();
        ac.handle_mouse(mouse(MouseEventKind::Moved, 4, 7));
        assert_eq!(ac.highlight(), Some(2));
    }

    #[test]
    fn test_rejected_change_resyncs_input() {
        let (mut ac, calls, _) = setup();
        type_text(&mut ac, "al");

        // The host drops this keystroke instead of echoing it
        ac.handle_key(key(KeyCode::Char('x')));
        assert_eq!(calls.borrow().changes.last().map(String::as_str), Some("alx"));
        assert_eq!(ac.input().text(), "alx");
        assert_eq!(ac.query(), "al");

        let query = ac.query().to_string();
        ac.set_value(&query);
        assert_eq!(ac.input().text(), "al");
        assert_eq!(ac.filtered_len(), 2);
    }

    #[test]
    fn test_clear_affordance_resets() {
        let (mut ac, calls, _) = setup();
        type_text(&mut ac, "al");

        ac.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 37, 2));

        assert_eq!(ac.query(), "");
        assert_eq!(ac.input().text(), "");
        assert_eq!(ac.filtered_len(), 0);
        assert_eq!(ac.highlight(), None);
        assert_eq!(ac.state(), PanelState::Closed);
        assert_eq!(calls.borrow().resets, 1);
    }

    #[test]
    fn test_focus_reanchors_panel() {
        let (mut ac, _, _) = setup();
        ac.set_input_area(Rect::new(2, 5, 30, 3), Rect::default());
        ac.set_scroll(Position::new(0, 4));
        ac.focus_input();
        assert_eq!(ac.panel_anchor(), Offset { left: 2, top: 9 });
    }

    #[test]
    fn test_set_items_refilters() {
        let (mut ac, _, _) = setup();
        type_text(&mut ac, "al");
        ac.handle_key(key(KeyCode::Down));

        let items = vec![Item::from_value(json!({"id": 9, "name": "Sal"})).unwrap()];
        ac.set_items(items).unwrap();
        assert_eq!(names(&ac), vec!["Sal"]);
        assert_eq!(ac.highlight(), None);
    }
}
