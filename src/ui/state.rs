//! Chat state management
//!
//! This module provides the central state behind the chat view: the open
//! thread's messages, the input box, and the bot reply currently being
//! "typed" out.

use crate::config::RevealConfig;
use crate::messages::{Message, MessageStorage};
use crate::reveal::{RevealScheduler, RevealSlot};
use crate::{GenbotError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender as ChannelSender};
use tracing::{debug, warn};
use uuid::Uuid;

/// Progress reported by a running reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// Text revealed so far
    Progress { text: String, reveal_id: Uuid },
    /// Every word has been shown
    Complete { reveal_id: Uuid },
}

/// The bot reply being typed out
#[derive(Debug, Clone, Default)]
pub struct TypingResponse {
    /// Text revealed so far
    pub text: String,
    /// Whether the reveal is in progress
    pub is_typing: bool,
    /// The reveal this text belongs to
    pub reveal_id: Option<Uuid>,
}

/// Central chat state
pub struct ChatState {
    /// Messages of the open thread
    pub messages: MessageStorage,

    /// Current text input
    pub input_text: String,

    /// Message the next input replies to
    pub replying_to: Option<Message>,

    /// Reply currently being revealed
    pub typing: TypingResponse,

    /// Last error message shown to the user
    pub last_error: Option<String>,

    /// Reply to store once its reveal completes
    pending_reply: Option<(Uuid, Message)>,

    reveal: RevealSlot,
    reveal_event_tx: ChannelSender<RevealEvent>,
    reveal_event_rx: Receiver<RevealEvent>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(RevealConfig::default())
    }
}

impl ChatState {
    pub fn new(config: RevealConfig) -> Self {
        let (reveal_event_tx, reveal_event_rx) = unbounded();
        Self {
            messages: MessageStorage::new(),
            input_text: String::new(),
            replying_to: None,
            typing: TypingResponse::default(),
            last_error: None,
            pending_reply: None,
            reveal: RevealSlot::new(RevealScheduler::new(config)),
            reveal_event_tx,
            reveal_event_rx,
        }
    }

    /// Turn the input box into a user message
    ///
    /// Returns `None` when the input is blank. The message is stored and
    /// returned so the caller can send it to the backend.
    pub fn submit_input(&mut self) -> Option<Message> {
        if self.input_text.trim().is_empty() {
            return None;
        }

        let mut message = Message::user(std::mem::take(&mut self.input_text));
        if let Some(parent) = self.replying_to.take().and_then(|m| m.id) {
            message = message.replying_to(parent);
        }

        self.messages.add(message.clone());
        Some(message)
    }

    /// Type out a bot reply; it is stored once the reveal completes
    ///
    /// A reply that is still being typed is stored immediately and its
    /// reveal cancelled.
    pub fn reveal_bot_reply(&mut self, reply: Message) -> Result<Uuid> {
        self.finish_pending();

        // Events are tagged with our own id so stale ones can be ignored
        let reveal_id = Uuid::new_v4();
        let progress_tx = self.reveal_event_tx.clone();
        let complete_tx = self.reveal_event_tx.clone();

        self.reveal.start(
            Some(reply.content.as_str()),
            move |text| {
                let _ = progress_tx.send(RevealEvent::Progress {
                    text: text.to_string(),
                    reveal_id,
                });
            },
            move || {
                let _ = complete_tx.send(RevealEvent::Complete { reveal_id });
            },
        )?;

        self.typing = TypingResponse {
            text: String::new(),
            is_typing: true,
            reveal_id: Some(reveal_id),
        };
        self.pending_reply = Some((reveal_id, reply));
        Ok(reveal_id)
    }

    /// Apply reveal progress; call once per frame
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.reveal_event_rx.try_recv() {
            match event {
                RevealEvent::Progress { text, reveal_id } => {
                    if self.typing.reveal_id == Some(reveal_id) {
                        self.typing.text = text;
                    }
                }
                RevealEvent::Complete { reveal_id } => {
                    if self.typing.reveal_id == Some(reveal_id) {
                        self.typing.is_typing = false;
                        self.store_pending(reveal_id);
                    }
                }
            }
        }
    }

    /// Stop typing and show the whole reply at once
    pub fn skip_reveal(&mut self) {
        self.finish_pending();
    }

    /// Show a thread fetched from the backend in place of the current one
    pub fn load_thread(&mut self, messages: Vec<Message>) {
        self.reveal.cancel();
        self.pending_reply = None;
        self.typing = TypingResponse::default();
        self.replying_to = None;
        self.messages.replace_all(messages);
    }

    /// Leave the current thread
    pub fn clear_chat(&mut self) {
        self.reveal.cancel();
        self.pending_reply = None;
        self.typing = TypingResponse::default();
        self.messages.clear();
        self.input_text.clear();
        self.replying_to = None;
    }

    /// Record an error for display
    pub fn set_error(&mut self, error: &GenbotError) {
        warn!("Chat error: {}", error);
        self.last_error = Some(error.user_message());
    }

    pub fn is_typing(&self) -> bool {
        self.typing.is_typing
    }

    /// Cancel the running reveal and store its reply right away
    fn finish_pending(&mut self) {
        self.reveal.cancel();
        if let Some((reveal_id, reply)) = self.pending_reply.take() {
            debug!(%reveal_id, "Storing reply without finishing reveal");
            self.typing = TypingResponse::default();
            self.messages.add(reply);
        }
    }

    fn store_pending(&mut self, reveal_id: Uuid) {
        match self.pending_reply.take() {
            Some((id, reply)) if id == reveal_id => self.messages.add(reply),
            other => self.pending_reply = other,
        }
    }
}
