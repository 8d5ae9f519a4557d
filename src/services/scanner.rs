use crate::models::item::{Item, ItemList};
use crate::models::scan_result::ScanOutcome;
use crate::services::id_generator::IdGenerator;
use crate::services::list_merger::{self, ListError};
use crate::services::ocr::{product_name, TextRecognizer};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// In-memory state of the list screen: the item list plus the scan busy flag.
///
/// Every mutation runs to completion under the lock; the lock is never held
/// across the OCR request.
#[derive(Debug, Default)]
pub struct ListScreen {
    items: Mutex<ItemList>,
    busy: AtomicBool,
    ids: IdGenerator,
}

/// Clears the busy flag when the scan finishes, whatever the outcome
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: ItemList) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    /// Snapshot of the current list
    pub fn items(&self) -> ItemList {
        self.items.lock().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn update(&self, apply: impl FnOnce(ItemList) -> ItemList) -> ItemList {
        let mut items = self.items.lock();
        let current = std::mem::take(&mut *items);
        *items = apply(current);
        items.clone()
    }

    /// Merge a JSON batch handed over from the camera screen
    pub fn receive(&self, payload: &str) -> ItemList {
        let incoming = list_merger::parse_incoming(payload, || self.ids.next_id());
        self.update(|current| list_merger::merge(current, incoming))
    }

    /// Add a blank row at the top; returns its id
    pub fn add_manual(&self) -> String {
        let id = self.ids.next_id();
        self.update(|current| list_merger::add_manual(current, id.clone()));
        id
    }

    pub fn set_qty(&self, id: &str, value: &str) -> ItemList {
        self.update(|current| list_merger::set_qty(current, id, value))
    }

    pub fn set_name(&self, id: &str, value: &str) -> ItemList {
        self.update(|current| list_merger::set_name(current, id, value))
    }

    pub fn remove(&self, id: &str) -> ItemList {
        self.update(|current| list_merger::remove(current, id))
    }

    pub fn copy_name(&self, id: &str) -> Result<String, ListError> {
        let items = self.items.lock();
        let item = items
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| ListError::NotFound(id.to_string()))?;
        list_merger::copy_name(item)
    }

    /// Run one scan event: OCR the image, extract a name and merge it.
    ///
    /// A scan requested while another is in flight is not started.
    pub async fn scan<R>(&self, recognizer: &R, image: &[u8]) -> ScanOutcome
    where
        R: TextRecognizer + ?Sized,
    {
        if self.busy.swap(true, Ordering::AcqRel) {
            info!("Scan already in progress, ignoring request");
            return ScanOutcome::Busy;
        }
        let _busy = BusyGuard(&self.busy);

        let raw = match recognizer.recognize(image).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Text recognition failed");
                return ScanOutcome::NoTextFound;
            }
        };

        let name = product_name(&raw);
        if name.is_empty() {
            info!("No text found in image");
            return ScanOutcome::NoTextFound;
        }

        let candidate = Item::new(self.ids.next_id(), name.clone());
        let mut added = false;
        self.update(|current| {
            let before = current.len();
            let merged = list_merger::merge(current, [candidate.clone()]);
            added = merged.len() > before;
            merged
        });

        if added {
            info!(%name, "Added scanned item");
            ScanOutcome::Added { item: candidate }
        } else {
            info!(%name, "Scanned item already listed");
            ScanOutcome::AlreadyListed { name }
        }
    }
}
