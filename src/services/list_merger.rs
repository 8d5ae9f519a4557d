use crate::models::item::{Item, ItemList, ScannedItemPayload};
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ListError {
    #[error("Nothing to copy: this item has no name yet")]
    NothingToCopy,
    #[error("Item not found: {0}")]
    NotFound(String),
}

/// Decode the JSON batch handed over by the camera screen.
///
/// Expected format: `[{"id": "...", "text": "...", "input": "..."}]`, every
/// field optional. A malformed payload is treated as an empty batch.
pub fn parse_incoming(payload: &str, mut next_id: impl FnMut() -> String) -> Vec<Item> {
    match serde_json::from_str::<Vec<ScannedItemPayload>>(payload) {
        Ok(batch) => batch
            .into_iter()
            .map(|p| p.into_item(&mut next_id))
            .collect(),
        Err(e) => {
            warn!(error = %e, "Ignoring malformed scanned item payload");
            Vec::new()
        }
    }
}

/// Append incoming items to `current`, skipping blank names and names
/// already present (trimmed, case-insensitive). Existing items keep their order and
/// edits; accepted items keep their input order.
pub fn merge(current: ItemList, incoming: impl IntoIterator<Item = Item>) -> ItemList {
    let mut seen: HashSet<String> = current.iter().map(Item::dedup_key).collect();
    let mut merged = current;

    for item in incoming {
        if item.text.trim().is_empty() {
            continue;
        }
        if !seen.insert(item.dedup_key()) {
            debug!(text = %item.text, "Skipping duplicate item");
            continue;
        }
        merged.push(item);
    }

    merged
}

/// Prepend a blank row for manual entry
pub fn add_manual(current: ItemList, id: impl Into<String>) -> ItemList {
    let mut items = Vec::with_capacity(current.len() + 1);
    items.push(Item::new(id, ""));
    items.extend(current);
    items
}

/// Quantity may only contain ASCII digits (empty clears it)
pub fn is_valid_qty(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Replace the quantity of item `id`. Non-digit input leaves the list unchanged.
pub fn set_qty(mut items: ItemList, id: &str, value: &str) -> ItemList {
    if !is_valid_qty(value) {
        warn!(id, value, "Rejected non-numeric quantity");
        return items;
    }

    if let Some(item) = items.iter_mut().find(|i| i.id == id) {
        item.qty = value.to_string();
    }
    items
}

/// Replace the name of item `id`, unfiltered
pub fn set_name(mut items: ItemList, id: &str, value: &str) -> ItemList {
    if let Some(item) = items.iter_mut().find(|i| i.id == id) {
        item.text = value.to_string();
    }
    items
}

/// Remove item `id`; no-op when absent
pub fn remove(mut items: ItemList, id: &str) -> ItemList {
    items.retain(|i| i.id != id);
    items
}

/// Text to put on the clipboard for an item
pub fn copy_name(item: &Item) -> Result<String, ListError> {
    let name = item.text.trim();
    if name.is_empty() {
        return Err(ListError::NothingToCopy);
    }
    Ok(name.to_string())
}
