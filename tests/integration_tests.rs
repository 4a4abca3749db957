//! Integration tests for typeahead.
//!
//! These drive the built binary in headless mode against the fixtures in
//! `tests/fixtures`.
//!
//! Run with: `cargo test --test integration_tests`

mod tui;
