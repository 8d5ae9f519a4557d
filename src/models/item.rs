use serde::{Deserialize, Serialize};

/// A single row of the restock list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    /// Product name, editable by the user
    pub text: String,
    /// Quantity as typed, digits only
    pub qty: String,
}

impl Item {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            qty: String::new(),
        }
    }

    /// Key used for duplicate detection at merge time (trimmed, case-folded)
    pub fn dedup_key(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// Ordered list of items as shown on the list screen
pub type ItemList = Vec<Item>;

/// Item id as sent by the camera screen (string or number)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PayloadId {
    Text(String),
    Number(serde_json::Number),
}

impl PayloadId {
    fn into_string(self) -> String {
        match self {
            PayloadId::Text(s) => s,
            PayloadId::Number(n) => n.to_string(),
        }
    }
}

/// Raw item shape handed over from the camera screen
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScannedItemPayload {
    #[serde(default)]
    pub id: Option<PayloadId>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
}

impl ScannedItemPayload {
    /// Normalize to an [`Item`]: `input` becomes `qty`, text is trimmed.
    /// `fallback_id` is used when the payload carries no id.
    pub fn into_item(self, fallback_id: impl FnOnce() -> String) -> Item {
        let id = match self.id {
            Some(id) => id.into_string(),
            None => fallback_id(),
        };

        Item {
            id,
            text: self.text.unwrap_or_default().trim().to_string(),
            qty: self.input.unwrap_or_default(),
        }
    }
}
