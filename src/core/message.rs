//! # Conversation Messages
//!
//! A message is immutable once appended to the conversation. The list is
//! ordered by append order, which is also chronological order.
//!
//! The JSON shape (`text`, `sender`, `timestamp`) is what gets written to
//! session storage, so field names are part of the storage format.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Source {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Source,
    /// ISO-8601 UTC, millisecond precision (`2024-05-01T10:00:00.000Z`).
    pub timestamp: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Source::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Source::Bot)
    }

    fn new(text: impl Into<String>, sender: Source) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: now_timestamp(),
        }
    }
}

/// Current time in the storage timestamp format.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialization_shape() {
        let msg = Message {
            text: "Hi".to_string(),
            sender: Source::User,
            timestamp: "2024-05-01T10:00:00.000Z".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"text":"Hi","sender":"user","timestamp":"2024-05-01T10:00:00.000Z"}"#
        );
    }

    #[test]
    fn test_bot_sender_serializes_as_bot() {
        let json = serde_json::to_string(&Source::Bot).unwrap();
        assert_eq!(json, r#""bot""#);
    }

    #[test]
    fn test_timestamp_is_utc_millis() {
        let msg = Message::user("hello");
        assert!(msg.timestamp.ends_with('Z'));
        // 2024-05-01T10:00:00.000Z
        assert_eq!(msg.timestamp.len(), 24);
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
    }
}
