use super::types::{Message, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Messages of the open thread, shared between the UI and reveal callbacks
#[derive(Debug, Clone)]
pub struct MessageStorage {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStorage {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add(&self, message: Message) {
        self.messages.write().push(message);
    }

    /// Replace everything with a freshly fetched thread
    pub fn replace_all(&self, messages: Vec<Message>) {
        debug!("Loaded {} messages", messages.len());
        *self.messages.write() = messages;
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// Conversation messages, upload notices left out
    pub fn visible(&self) -> Vec<Message> {
        self.messages
            .read()
            .iter()
            .filter(|m| !m.is_file_notice())
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Change the content of the message with `id`
    ///
    /// Blank content is ignored. Returns false when nothing changed.
    pub fn edit(&self, id: i64, content: impl Into<String>) -> bool {
        let content = content.into();
        if content.trim().is_empty() {
            return false;
        }

        let mut messages = self.messages.write();
        match messages.iter_mut().find(|m| m.id == Some(id)) {
            Some(message) => {
                message.content = content;
                true
            }
            None => false,
        }
    }

    /// Store a regenerated reply to the user message `user_id`
    ///
    /// The bot message directly after the user message is replaced; when
    /// there is none the reply is appended.
    pub fn replace_reply(&self, user_id: i64, reply: Message) {
        let mut messages = self.messages.write();
        let slot = messages
            .iter()
            .position(|m| m.id == Some(user_id))
            .map(|i| i + 1)
            .filter(|&next| messages.get(next).is_some_and(|m| m.sender == Sender::Bot));

        match slot {
            Some(next) => {
                debug!("Replacing reply to message {}", user_id);
                messages[next] = reply;
            }
            None => messages.push(reply),
        }
    }

    /// Messages that reply to `parent_id`
    pub fn replies_to(&self, parent_id: i64) -> Vec<Message> {
        self.messages
            .read()
            .iter()
            .filter(|m| m.parent_message_id == Some(parent_id))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over message content
    pub fn search(&self, query: &str) -> Vec<Message> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.messages
            .read()
            .iter()
            .filter(|m| m.content.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}

impl Default for MessageStorage {
    fn default() -> Self {
        Self::new()
    }
}
