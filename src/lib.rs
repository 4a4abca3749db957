//! typeahead - search a JSON collection as you type.
//!
//! The library exposes the autocomplete controller, its filter engine and the
//! terminal host built around them.

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod items;
pub mod logging;
pub mod template;
pub mod tui;
