//! Wire types for the chat service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::phrases::FALLBACK_REPLY;

/// Body of `POST {base}/chat/{topic}`.
///
/// The identity fields are part of the route contract but this client
/// never collects them, so they always go out empty.
#[derive(Serialize, Debug, PartialEq)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub user_name: &'a str,
    pub email: &'a str,
}

impl<'a> ChatRequest<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            user_name: "",
            email: "",
        }
    }
}

/// Response from a chat route. Some routes answer with `message` instead
/// of `reply`, so both are read. Either may hold a non-string (some routes
/// put a status code in `message`), which must not hide the other.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

fn non_empty_text(field: Option<Value>) -> Option<String> {
    match field {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    }
}

impl ChatResponse {
    /// `reply`, else `message`, else the fallback. Only non-empty strings count.
    pub fn into_reply_text(self) -> String {
        non_empty_text(self.reply)
            .or_else(|| non_empty_text(self.message))
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }
}

/// Body of `POST {base}/chat/mail`.
#[derive(Serialize, Debug, PartialEq)]
pub struct MailRequest<'a> {
    pub message: &'a str,
    pub email: &'a str,
}
