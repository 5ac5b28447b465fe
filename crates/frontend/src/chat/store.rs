//! Chat collection store.
//!
//! A `Copy` context of signals, provided at the app root. Every mutation is
//! written through to localStorage so a reload restores the collection and
//! the active selection.

use contracts::chat::Chat;
use leptos::prelude::*;

use crate::shared::storage;

/// Pick the chat that becomes active after a deletion: the most recently
/// updated survivor.
fn next_active(chats: &[Chat]) -> Option<String> {
    chats
        .iter()
        .max_by_key(|c| c.last_activity())
        .map(|c| c.id.clone())
}

/// Sidebar ordering: most recent activity first.
pub fn sorted_by_recency(chats: &[Chat]) -> Vec<Chat> {
    let mut sorted = chats.to_vec();
    sorted.sort_by_key(|c| std::cmp::Reverse(c.last_activity()));
    sorted
}

#[derive(Clone, Copy)]
pub struct ChatStore {
    pub chats: RwSignal<Vec<Chat>>,
    pub active_id: RwSignal<Option<String>>,
    pub sidebar_collapsed: RwSignal<bool>,
}

impl ChatStore {
    /// Restore the store from localStorage. Guarantees at least one chat and
    /// an active id pointing at an existing chat.
    pub fn load() -> Self {
        let chats = storage::load_chats();
        let active_id = storage::load_active_chat_id()
            .filter(|id| chats.iter().any(|c| &c.id == id))
            .or_else(|| chats.first().map(|c| c.id.clone()));

        let store = Self {
            chats: RwSignal::new(chats),
            active_id: RwSignal::new(active_id),
            sidebar_collapsed: RwSignal::new(storage::load_sidebar_collapsed()),
        };
        if store.chats.with_untracked(|chats| chats.is_empty()) {
            store.create_chat();
        }
        store
    }

    fn persist(&self) {
        self.chats.with_untracked(|chats| storage::save_chats(chats));
        if let Some(id) = self.active_id.get_untracked() {
            storage::save_active_chat_id(&id);
        }
    }

    pub fn create_chat(&self) {
        let chat = Chat::new();
        let id = chat.id.clone();
        self.chats.update(|chats| chats.insert(0, chat));
        self.active_id.set(Some(id));
        self.persist();
    }

    pub fn select_chat(&self, id: &str) {
        let exists = self.chats.with_untracked(|chats| chats.iter().any(|c| c.id == id));
        if exists {
            self.active_id.set(Some(id.to_string()));
            self.persist();
        }
    }

    pub fn delete_chat(&self, id: &str) {
        self.chats.update(|chats| chats.retain(|c| c.id != id));
        if self.active_id.get_untracked().as_deref() == Some(id) {
            let next = self.chats.with_untracked(|chats| next_active(chats));
            self.active_id.set(next);
        }
        self.persist();
    }

    /// Apply a mutation to one chat, stamp its `updated_at` and persist.
    pub fn update_chat(&self, id: &str, f: impl FnOnce(&mut Chat)) {
        self.chats.update(|chats| {
            if let Some(chat) = chats.iter_mut().find(|c| c.id == id) {
                f(chat);
                chat.touch();
            }
        });
        self.persist();
    }

    pub fn rename_chat(&self, id: &str, title: String) {
        let title = title.trim().to_string();
        if title.is_empty() {
            return;
        }
        self.update_chat(id, |chat| chat.title = title);
    }

    pub fn active_chat(&self) -> Option<Chat> {
        let id = self.active_id.get()?;
        self.chats.get().into_iter().find(|c| c.id == id)
    }

    pub fn active_chat_untracked(&self) -> Option<Chat> {
        let id = self.active_id.get_untracked()?;
        self.chats
            .with_untracked(|chats| chats.iter().find(|c| c.id == id).cloned())
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_collapsed.update(|collapsed| *collapsed = !*collapsed);
        storage::save_sidebar_collapsed(self.sidebar_collapsed.get_untracked());
    }
}

pub fn use_chat_store() -> ChatStore {
    use_context::<ChatStore>().expect("ChatStore not found. Provide it at the app root.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_with_activity(updated_at: i64) -> Chat {
        let mut chat = Chat::new();
        chat.updated_at = updated_at;
        chat
    }

    #[test]
    fn test_sorted_by_recency_newest_first() {
        let old = chat_with_activity(100);
        let new = chat_with_activity(300);
        let mid = chat_with_activity(200);
        let sorted = sorted_by_recency(&[old.clone(), new.clone(), mid.clone()]);
        assert_eq!(
            sorted.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec![new.id.as_str(), mid.id.as_str(), old.id.as_str()]
        );
    }

    #[test]
    fn test_next_active_prefers_latest_survivor() {
        let a = chat_with_activity(100);
        let b = chat_with_activity(500);
        assert_eq!(next_active(&[a, b.clone()]), Some(b.id));
        assert_eq!(next_active(&[]), None);
    }
}
