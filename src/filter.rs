//! Filter engine for the autocomplete box.
//!
//! Matching is a case-insensitive substring search over the whole record:
//! every field value is flattened to text, joined with a space, and the
//! query must appear somewhere in that string. Cost is O(items × fields)
//! per call, which is fine for small in-memory collections but not suited
//! to large datasets.

use crate::items::Item;

/// Returns the items matching `query`, in their original relative order.
///
/// An empty query matches nothing: results only appear once typing begins.
pub fn filter<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    filter_indices(items, query)
        .into_iter()
        .map(|idx| &items[idx])
        .collect()
}

/// Returns the positions of the items matching `query`, in ascending order.
pub fn filter_indices(items: &[Item], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches(item, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// Checks a single item against an already-lowercased needle.
fn matches(item: &Item, needle: &str) -> bool {
    item.values_text().to_lowercase().contains(needle)
}
