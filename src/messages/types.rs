use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Marker the backend puts in messages that announce an uploaded file
pub const FILE_NOTICE_MARKER: &str = "📎 File:";

/// Title used when a thread is started without any input
pub const DEFAULT_THREAD_TITLE: &str = "New Chat";

/// Maximum number of characters of the first input used as a thread title
const THREAD_TITLE_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Backend id; `None` until the server has stored the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_message_id: Option<i64>,
}

impl Message {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            parent_message_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Sender::Bot, content)
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Mark this message as a reply to `parent`
    pub fn replying_to(mut self, parent: i64) -> Self {
        self.parent_message_id = Some(parent);
        self
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Whether this is an upload notice rather than conversation
    pub fn is_file_notice(&self) -> bool {
        self.content.contains(FILE_NOTICE_MARKER)
    }
}

/// A conversation thread owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatThread {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ChatThread {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
            avatar: None,
        }
    }
}

/// Acknowledgement returned after a file upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
}

impl FileUpload {
    /// Title for a thread created to hold this upload
    pub fn thread_title(&self) -> String {
        format!("File: {}", self.file_name)
    }
}

/// Title for a new thread started from `input`
pub fn thread_title_from_input(input: &str) -> String {
    if input.is_empty() {
        return DEFAULT_THREAD_TITLE.to_string();
    }
    input.chars().take(THREAD_TITLE_LIMIT).collect()
}

/// Short timestamp for message bubbles, e.g. `Oct 16, 14:05`
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%b %-d, %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let json = r#"{
            "id": 7,
            "content": "hi",
            "sender": "bot",
            "timestamp": "2024-03-05T09:07:00Z",
            "parentMessageId": 3
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.id, Some(7));
        assert_eq!(message.sender, Sender::Bot);
        assert_eq!(message.parent_message_id, Some(3));

        let value = serde_json::to_value(Message::user("yo")).unwrap();
        assert_eq!(value["sender"], "user");
        assert!(value.get("id").is_none());
        assert!(value.get("parentMessageId").is_none());
    }

    #[test]
    fn test_file_notice() {
        assert!(Message::bot("📎 File: notes.txt uploaded").is_file_notice());
        assert!(!Message::bot("File: notes.txt").is_file_notice());
    }

    #[test]
    fn test_thread_title_from_input() {
        assert_eq!(thread_title_from_input(""), "New Chat");
        assert_eq!(thread_title_from_input("short"), "short");

        let long = "x".repeat(80);
        assert_eq!(thread_title_from_input(&long).chars().count(), 50);

        let accented = "é".repeat(60);
        assert_eq!(thread_title_from_input(&accented), "é".repeat(50));
    }

    #[test]
    fn test_upload_thread_title() {
        let upload = FileUpload {
            file_name: "report.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            file_size: 1024,
        };
        assert_eq!(upload.thread_title(), "File: report.pdf");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 10, 6, 9, 5, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Oct 6, 09:05");
    }

    #[test]
    fn test_user_deserializes_without_avatar() {
        let user: User =
            serde_json::from_str(r#"{"id":1,"username":"ada","displayName":"Ada"}"#).unwrap();
        assert_eq!(user, User::new(1, "ada", "Ada"));
    }
}
