use serde::{Deserialize, Serialize};

use crate::models::item::Item;

/// Result of one scan event, reported back to the host UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// A new item was appended to the list
    Added { item: Item },
    /// The recognized name is already on the list
    AlreadyListed { name: String },
    /// OCR failed or returned nothing usable; the host should ask for a retry
    NoTextFound,
    /// Another scan is still in flight, this one was not started
    Busy,
}

impl ScanOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, ScanOutcome::Added { .. })
    }
}
