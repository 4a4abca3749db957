//! Autocomplete controller and its supporting pieces.
//!
//! The controller wraps a [`SearchInput`], filters an item collection as the
//! query changes and manages the results panel beneath the input.

mod controller;
mod document;
mod options;
mod position;

pub use controller::{Autocomplete, Focus, PanelState, SearchInput};
pub use document::{Document, DocumentEvent, Subscription, SubscriptionId};
pub use options::{
    AutocompleteOptions, ChangeEvent, ElementHandle, DEFAULT_ITEM_ID_PREFIX,
    DEFAULT_NO_RESULT_TEXT,
};
pub use position::{offset_of, panel_area, Offset};
