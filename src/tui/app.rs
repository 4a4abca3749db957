//! Application state for the TUI.
//!
//! The host side of the autocomplete: it owns the controlled value, reacts
//! to the controller's callbacks and remembers the last selection.

use super::autocomplete::{Autocomplete, AutocompleteOptions, Document, DocumentEvent, Focus};
use super::widgets::input::InputState;
use crate::config::Settings;
use crate::error::Result;
use crate::items::Item;
use crate::template::ItemTemplate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

/// Callbacks from the controller, delivered to the host after each event.
#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    /// The controller mounted.
    Ready,
    /// A keystroke changed the input text.
    Changed(String),
    /// A row was committed.
    Selected(Item),
    /// The clear affordance was activated.
    Reset,
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// The autocomplete controller.
    pub autocomplete: Autocomplete<InputState>,
    /// Document-level listener registry.
    pub document: Document,
    /// The last committed item.
    pub selected: Option<Item>,
    /// Field written into the input on selection.
    pub select_field: String,
    /// Placeholder for the empty input.
    pub placeholder: String,
    /// Display name of the item source.
    pub source: String,
    messages: UnboundedReceiver<HostMessage>,
}

impl App {
    /// Creates the application around the given items.
    pub fn new(items: Vec<Item>, settings: &Settings) -> Result<Self> {
        let template = ItemTemplate::new(settings.template.clone(), &settings.primary_key)?;
        let (tx, messages) = mpsc::unbounded_channel();

        let (on_change, on_select, on_ready, on_reset) =
            (tx.clone(), tx.clone(), tx.clone(), tx);

        let options = AutocompleteOptions::new(items, &settings.primary_key, move |item| {
            template.render(item)
        })
        .no_result_text(&settings.no_result_text)
        .item_id_prefix(&settings.item_id_prefix)
        .on_change(move |event| {
            let _ = on_change.send(HostMessage::Changed(event.value.clone()));
        })
        .on_select(move |item| {
            let _ = on_select.send(HostMessage::Selected(item.clone()));
        })
        .on_ready(move |_, _| {
            let _ = on_ready.send(HostMessage::Ready);
        })
        .reset(move || {
            let _ = on_reset.send(HostMessage::Reset);
        });

        let autocomplete = Autocomplete::new(InputState::new(), options)?;
        info!("Loaded {} items", autocomplete.items().len());

        Ok(Self {
            running: true,
            autocomplete,
            document: Document::new(),
            selected: None,
            select_field: settings.select_field.clone(),
            placeholder: settings.placeholder.clone(),
            source: settings
                .items_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| settings.items_path.display().to_string()),
            messages,
        })
    }

    /// Mounts the controller. Call after the first render so element areas are known.
    pub fn mount(&mut self) {
        self.autocomplete.mount(&mut self.document);
        self.process_messages();
    }

    /// Unmounts the controller.
    pub fn unmount(&mut self) {
        self.autocomplete.unmount(&mut self.document);
    }

    /// Handles an event and updates application state.
    pub fn handle_event(&mut self, event: super::Event) {
        use super::Event;

        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => {
                // Terminal resize is handled automatically by ratatui
            }
            Event::Tick => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.running = false;
                return;
            }
            KeyCode::Tab => {
                if self.autocomplete.focus() == Focus::None {
                    self.autocomplete.focus_input();
                } else {
                    self.autocomplete.blur();
                }
                return;
            }
            _ => {}
        }

        self.autocomplete.handle_key(key);
        self.document.dispatch(DocumentEvent::Key(key));
        self.autocomplete.handle_document_events();
        self.process_messages();
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved => self.autocomplete.handle_mouse(mouse),
            MouseEventKind::Down(MouseButton::Left) => {
                self.autocomplete.handle_mouse(mouse);
                self.document
                    .dispatch(DocumentEvent::Click(Position::new(mouse.column, mouse.row)));
                self.autocomplete.handle_document_events();
            }
            _ => return,
        }
        self.process_messages();
    }

    /// Applies pending controller callbacks.
    pub fn process_messages(&mut self) {
        while let Ok(message) = self.messages.try_recv() {
            debug!("Host message: {:?}", message);
            match message {
                HostMessage::Ready => self.autocomplete.focus_input(),
                HostMessage::Changed(value) => self.autocomplete.set_value(&value),
                HostMessage::Selected(item) => {
                    let value = item.field_text(&self.select_field).unwrap_or_default();
                    info!("Selected {:?}", value);
                    self.selected = Some(item);
                    self.autocomplete.set_value(&value);
                }
                HostMessage::Reset => self.autocomplete.set_value(""),
            }
        }
    }

    /// Primary key text of the last selection.
    pub fn selected_key(&self) -> Option<String> {
        self.selected
            .as_ref()
            .and_then(|item| item.field_text(self.autocomplete.primary_key()))
    }
}
