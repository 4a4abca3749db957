//! TUI widgets for typeahead.
//!
//! Contains reusable UI components.

pub mod card;
pub mod detail;
pub mod header;
pub mod input;
pub mod results;
