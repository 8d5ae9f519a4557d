use crate::models::item::ItemList;
use crate::services::scanner::ListScreen;
use std::sync::Arc;

/// State wrapper for the list screen (Arc so scans can run on other tasks)
pub type ListScreenState = Arc<ListScreen>;

pub fn init_list_screen() -> ListScreenState {
    Arc::new(ListScreen::new())
}

pub fn get_items(state: &ListScreenState) -> ItemList {
    state.items()
}

/// Merge the JSON batch handed over from the camera screen
pub fn receive_scanned_items(state: &ListScreenState, payload: String) -> ItemList {
    state.receive(&payload)
}

/// Add a blank row at the top and return its id so the host can focus it
pub fn add_manual_item(state: &ListScreenState) -> String {
    state.add_manual()
}

/// Update quantity; non-digit input is ignored and the current list returned
pub fn change_qty(state: &ListScreenState, id: String, value: String) -> ItemList {
    state.set_qty(&id, &value)
}

pub fn change_name(state: &ListScreenState, id: String, value: String) -> ItemList {
    state.set_name(&id, &value)
}

pub fn delete_item(state: &ListScreenState, id: String) -> ItemList {
    state.remove(&id)
}

/// Text to put on the clipboard, or an error message for the host alert
pub fn copy_item_name(state: &ListScreenState, id: String) -> Result<String, String> {
    state.copy_name(&id).map_err(|e| e.to_string())
}
