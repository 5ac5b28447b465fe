//! Client-side chat thread model.
//!
//! Chats live entirely in the browser: the collection is persisted to
//! localStorage and never leaves the client. A chat is bound to at most one
//! uploaded document via the backend-issued session id.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to a freshly created chat until the first prompt renames it.
pub const DEFAULT_TITLE: &str = "New chat";

/// Auto-title length, in characters.
const TITLE_MAX_CHARS: usize = 30;

/// Sidebar preview length, in characters.
const PREVIEW_MAX_CHARS: usize = 60;

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Metadata of the document bound to a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub filename: String,
    pub size: u64,
}

/// A single message in a chat thread.
///
/// Messages are immutable once appended, except the transient typing
/// placeholder which is replaced in place when the answer (or an error)
/// arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub typing: bool,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            typing: false,
            sources: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            typing: false,
            sources,
        }
    }

    /// Placeholder shown while a prompt request is in flight.
    pub fn typing() -> Self {
        Self {
            role: ChatRole::Assistant,
            content: String::new(),
            typing: true,
            sources: Vec::new(),
        }
    }
}

/// A persisted chat thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub file_meta: Option<FileMeta>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub preview: String,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

impl Chat {
    pub fn new() -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            session_id: None,
            file_meta: None,
            created_at: now,
            updated_at: now,
            preview: String::new(),
        }
    }

    /// Prompts are only allowed once a document has been ingested.
    pub fn can_prompt(&self) -> bool {
        self.session_id.is_some()
    }

    /// Recency key for the sidebar ordering.
    pub fn last_activity(&self) -> i64 {
        if self.updated_at != 0 {
            self.updated_at
        } else {
            self.created_at
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn has_typing(&self) -> bool {
        self.messages.iter().any(|m| m.typing)
    }

    /// Replace the first typing placeholder in place.
    ///
    /// Returns `false` when no placeholder is present, in which case nothing
    /// is appended either: every submitted prompt resolves its placeholder
    /// exactly once.
    pub fn resolve_typing(&mut self, message: ChatMessage) -> bool {
        match self.messages.iter_mut().find(|m| m.typing) {
            Some(slot) => {
                *slot = message;
                true
            }
            None => false,
        }
    }

    /// Bind the backend session issued for an uploaded document.
    pub fn bind_session(&mut self, session_id: String, file_meta: FileMeta) {
        self.session_id = Some(session_id);
        self.file_meta = Some(file_meta);
    }

    /// Rename a still-default-titled chat from the first prompt.
    pub fn auto_title(&mut self, prompt: &str) {
        if self.title.is_empty() || self.title == DEFAULT_TITLE {
            let title = truncate_chars(prompt.trim(), TITLE_MAX_CHARS);
            if !title.is_empty() {
                self.title = title;
            }
        }
    }

    /// Record the latest prompt as the sidebar preview.
    pub fn note_prompt(&mut self, prompt: &str) {
        self.preview = truncate_chars(prompt.trim(), PREVIEW_MAX_CHARS);
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chat_has_no_session() {
        let chat = Chat::new();
        assert_eq!(chat.title, DEFAULT_TITLE);
        assert!(chat.messages.is_empty());
        assert!(!chat.can_prompt());
    }

    #[test]
    fn test_bind_session_enables_prompting() {
        let mut chat = Chat::new();
        chat.bind_session(
            "abc".to_string(),
            FileMeta {
                filename: "doc.pdf".to_string(),
                size: 1024,
            },
        );
        assert!(chat.can_prompt());
        assert_eq!(chat.session_id.as_deref(), Some("abc"));
        assert_eq!(chat.file_meta.as_ref().unwrap().filename, "doc.pdf");
    }

    #[test]
    fn test_typing_placeholder_resolved_exactly_once() {
        let mut chat = Chat::new();
        chat.push_message(ChatMessage::user("question"));
        chat.push_message(ChatMessage::typing());
        assert!(chat.has_typing());

        let resolved = chat.resolve_typing(ChatMessage::assistant("answer", vec![]));
        assert!(resolved);
        assert!(!chat.has_typing());
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].content, "answer");

        // A second resolution finds no placeholder and appends nothing.
        let resolved = chat.resolve_typing(ChatMessage::assistant("late", vec![]));
        assert!(!resolved);
        assert_eq!(chat.messages.len(), 2);
    }

    #[test]
    fn test_resolve_typing_keeps_sources() {
        let mut chat = Chat::new();
        chat.push_message(ChatMessage::typing());
        chat.resolve_typing(ChatMessage::assistant("answer", vec!["doc.pdf".to_string()]));
        assert_eq!(chat.messages[0].sources, vec!["doc.pdf".to_string()]);
    }

    #[test]
    fn test_auto_title_truncates_to_30_chars() {
        let mut chat = Chat::new();
        chat.auto_title("What does section four of the agreement say?");
        assert_eq!(chat.title.chars().count(), 30);
        assert_eq!(chat.title, "What does section four of the ");
    }

    #[test]
    fn test_auto_title_is_multibyte_safe() {
        let mut chat = Chat::new();
        chat.auto_title(&"é".repeat(40));
        assert_eq!(chat.title.chars().count(), 30);
    }

    #[test]
    fn test_auto_title_never_overwrites_user_title() {
        let mut chat = Chat::new();
        chat.title = "My contract".to_string();
        chat.auto_title("Something else entirely");
        assert_eq!(chat.title, "My contract");
    }

    #[test]
    fn test_note_prompt_sets_preview() {
        let mut chat = Chat::new();
        chat.note_prompt("  short question  ");
        assert_eq!(chat.preview, "short question");
    }

    #[test]
    fn test_chat_collection_round_trips_through_serde() {
        let mut a = Chat::new();
        a.push_message(ChatMessage::user("hello"));
        a.bind_session(
            "abc".to_string(),
            FileMeta {
                filename: "doc.pdf".to_string(),
                size: 42,
            },
        );
        a.auto_title("hello");
        let b = Chat::new();
        let chats = vec![a, b];

        let json = serde_json::to_string(&chats).unwrap();
        let restored: Vec<Chat> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, chats);
    }

    #[test]
    fn test_message_roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        let json = serde_json::to_value(ChatMessage::assistant("hi", vec![])).unwrap();
        assert_eq!(json["role"], "assistant");
    }
}
