//! Construction-time options and host callbacks for the autocomplete controller.

use crate::items::Item;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, text::Text};

/// Placeholder shown when a non-empty query matches nothing.
pub const DEFAULT_NO_RESULT_TEXT: &str = "No items matches the result.";

/// Prefix used to encode row indices into element ids.
pub const DEFAULT_ITEM_ID_PREFIX: &str = "autocomplete-";

/// A keystroke that changed the input text, delegated to the host as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The key that produced the change.
    pub key: KeyEvent,
    /// The input text after the key was applied.
    pub value: String,
}

/// Identity and on-screen area of a mounted element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    pub id: String,
    pub area: Rect,
}

pub type RenderItem = Box<dyn Fn(&Item) -> Text<'static>>;
pub type ChangeHandler = Box<dyn FnMut(&ChangeEvent)>;
pub type SelectHandler = Box<dyn FnMut(&Item)>;
pub type ReadyHandler = Box<dyn FnMut(&ElementHandle, &ElementHandle)>;
pub type ResetHandler = Box<dyn FnMut()>;

/// Options for building an [`Autocomplete`](super::Autocomplete).
///
/// `items`, `primary_key` and `render_item` are given up front; `on_change`
/// must be set before construction, every other callback defaults to a no-op.
pub struct AutocompleteOptions {
    pub(crate) items: Vec<Item>,
    pub(crate) primary_key: String,
    pub(crate) render_item: RenderItem,
    pub(crate) value: String,
    pub(crate) on_change: Option<ChangeHandler>,
    pub(crate) on_select: Option<SelectHandler>,
    pub(crate) on_ready: Option<ReadyHandler>,
    pub(crate) reset: Option<ResetHandler>,
    pub(crate) no_result_text: String,
    pub(crate) item_id_prefix: String,
}

impl AutocompleteOptions {
    /// Creates options for the given collection.
    pub fn new<F>(items: Vec<Item>, primary_key: impl Into<String>, render_item: F) -> Self
    where
        F: Fn(&Item) -> Text<'static> + 'static,
    {
        Self {
            items,
            primary_key: primary_key.into(),
            render_item: Box::new(render_item),
            value: String::new(),
            on_change: None,
            on_select: None,
            on_ready: None,
            reset: None,
            no_result_text: DEFAULT_NO_RESULT_TEXT.to_string(),
            item_id_prefix: DEFAULT_ITEM_ID_PREFIX.to_string(),
        }
    }

    /// Sets the initial controlled value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the handler fired on every text-changing keystroke.
    pub fn on_change(mut self, handler: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Sets the handler fired when a row is committed.
    pub fn on_select(mut self, handler: impl FnMut(&Item) + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    /// Sets the handler fired once after the initial mount.
    pub fn on_ready(mut self, handler: impl FnMut(&ElementHandle, &ElementHandle) + 'static) -> Self {
        self.on_ready = Some(Box::new(handler));
        self
    }

    /// Sets the handler fired when the clear affordance is activated.
    pub fn reset(mut self, handler: impl FnMut() + 'static) -> Self {
        self.reset = Some(Box::new(handler));
        self
    }

    /// Sets the no-results placeholder text.
    pub fn no_result_text(mut self, text: impl Into<String>) -> Self {
        self.no_result_text = text.into();
        self
    }

    /// Sets the element id prefix for rows.
    pub fn item_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.item_id_prefix = prefix.into();
        self
    }
}
