//! Plain-text export of a chat thread

use super::types::{ChatThread, Message, Sender, User};
use crate::format::replace_images;
use crate::{GenbotError, Result};
use chrono::{DateTime, Utc};

/// Name shown for bot messages in an export
const BOT_NAME: &str = "GenBot AI";

/// Placeholder for embedded images, which would otherwise dump base64
const IMAGE_PLACEHOLDER: &str = "[Generated Image]";

/// A rendered chat export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExport {
    /// Suggested file name
    pub filename: String,
    /// Export contents
    pub text: String,
}

/// Export `messages` of `thread` as a plain-text transcript
///
/// Upload notices are left out of the transcript and the count. Fails only
/// when the thread has no messages at all.
pub fn export_chat(
    thread: &ChatThread,
    user: &User,
    messages: &[Message],
    exported_at: DateTime<Utc>,
    rule_width: usize,
) -> Result<ChatExport> {
    if messages.is_empty() {
        return Err(GenbotError::InvalidInput("No messages to export".to_string()));
    }
    let visible: Vec<&Message> = messages.iter().filter(|m| !m.is_file_notice()).collect();

    let mut text = String::new();
    text.push_str("GenBot Chat Export\n");
    text.push_str(&format!("Session: {}\n", thread.title));
    text.push_str(&format!("User: {}\n", user.display_name));
    text.push_str(&format!("Exported: {}\n", export_time(&exported_at)));
    text.push_str(&format!("Messages: {}\n", visible.len()));
    text.push_str(&"=".repeat(rule_width));
    text.push_str("\n\n");

    for message in visible {
        let sender = match message.sender {
            Sender::User => user.display_name.as_str(),
            Sender::Bot => BOT_NAME,
        };
        let content = replace_images(&message.content, IMAGE_PLACEHOLDER);
        text.push_str(&format!(
            "[{}] {}:\n{}\n\n",
            export_time(&message.timestamp),
            sender,
            content
        ));
    }

    Ok(ChatExport {
        filename: export_filename(&thread.title),
        text,
    })
}

/// `My chat!` becomes `My_chat__chat_export.txt`
pub fn export_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_chat_export.txt", stem)
}

fn export_time(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
