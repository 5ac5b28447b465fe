//! localStorage persistence for the chat collection and UI flags.
//!
//! All access degrades silently when storage is unavailable; a corrupt
//! collection is logged and treated as empty.

use contracts::chat::Chat;
use web_sys::window;

const CHATS_KEY: &str = "chats";
const ACTIVE_CHAT_KEY: &str = "activeChatId";
const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Load the persisted chat collection.
pub fn load_chats() -> Vec<Chat> {
    let raw = match get_local_storage().and_then(|s| s.get_item(CHATS_KEY).ok().flatten()) {
        Some(raw) => raw,
        None => return Vec::new(),
    };
    match serde_json::from_str(&raw) {
        Ok(chats) => chats,
        Err(e) => {
            log::warn!("Discarding unreadable chat collection: {}", e);
            Vec::new()
        }
    }
}

/// Persist the chat collection.
pub fn save_chats(chats: &[Chat]) {
    if let Some(storage) = get_local_storage() {
        match serde_json::to_string(chats) {
            Ok(json) => {
                let _ = storage.set_item(CHATS_KEY, &json);
            }
            Err(e) => log::warn!("Failed to serialize chat collection: {}", e),
        }
    }
}

/// Load the id of the last active chat.
pub fn load_active_chat_id() -> Option<String> {
    get_local_storage()?.get_item(ACTIVE_CHAT_KEY).ok()?
}

/// Persist the id of the active chat.
pub fn save_active_chat_id(id: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACTIVE_CHAT_KEY, id);
    }
}

/// Load the sidebar-collapsed flag.
pub fn load_sidebar_collapsed() -> bool {
    get_local_storage()
        .and_then(|s| s.get_item(SIDEBAR_COLLAPSED_KEY).ok().flatten())
        .map(|v| v == "true")
        .unwrap_or(false)
}

/// Persist the sidebar-collapsed flag.
pub fn save_sidebar_collapsed(collapsed: bool) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(SIDEBAR_COLLAPSED_KEY, if collapsed { "true" } else { "false" });
    }
}
