use std::fmt;

use async_trait::async_trait;

use crate::core::topic::Topic;

/// Errors from the chat service, classified by what the user should be told.
///
/// Variants carry enough detail for logging; the conversation copy for each
/// class lives in `core::phrases::error_reply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The service rejected the request (4xx, e.g. 422 for malformed input).
    ClientRequest { status: u16, body: String },
    /// The service failed while handling the request (5xx).
    ServerInternal { status: u16, body: String },
    /// The request went out but no response came back (refused, timed out, dropped).
    Unreachable(String),
    /// Anything else: bad URL, unexpected status class, failed request task.
    Unknown(String),
}

impl ChatError {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400..=499 => ChatError::ClientRequest { status, body },
            500..=599 => ChatError::ServerInternal { status, body },
            _ => ChatError::Unknown(format!("unexpected HTTP status {status}: {body}")),
        }
    }

    /// Classifies a transport-level failure from reqwest.
    pub fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_builder() {
            ChatError::Unknown(format!("invalid request: {error}"))
        } else if error.is_timeout() {
            ChatError::Unreachable(format!("request timeout: {error}"))
        } else if error.is_connect() {
            ChatError::Unreachable(format!("connection failed: {error}"))
        } else if error.is_request() || error.is_body() {
            ChatError::Unreachable(format!("no response: {error}"))
        } else {
            ChatError::Unknown(format!("request failed: {error}"))
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::ClientRequest { status, body } => {
                write!(f, "request rejected (HTTP {status}): {body}")
            }
            ChatError::ServerInternal { status, body } => {
                write!(f, "server error (HTTP {status}): {body}")
            }
            ChatError::Unreachable(msg) => write!(f, "unreachable: {msg}"),
            ChatError::Unknown(msg) => write!(f, "unknown error: {msg}"),
        }
    }
}

impl std::error::Error for ChatError {}

/// A reply from the chat endpoint, already resolved to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
}

/// Advisory connection indicator driven by the health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No probe has completed yet.
    #[default]
    Unknown,
    Connected,
    Offline,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Unknown => "Checking",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Offline => "Offline",
        }
    }
}

/// The remote chat service: topic chat routes, mail relay, and health probe.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Posts a user message to the route bound to `topic`.
    async fn send_chat(&self, topic: Topic, message: &str) -> Result<Reply, ChatError>;

    /// Asks the mail relay to deliver `message` to `email`.
    async fn send_mail(&self, message: &str, email: &str) -> Result<(), ChatError>;

    /// Probes liveness. Never fails; any problem reads as `Offline`.
    async fn check_health(&self) -> ConnectionStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ChatError::from_status(422, "bad".into()),
            ChatError::ClientRequest { status: 422, .. }
        ));
        assert!(matches!(
            ChatError::from_status(404, String::new()),
            ChatError::ClientRequest { status: 404, .. }
        ));
        assert!(matches!(
            ChatError::from_status(500, String::new()),
            ChatError::ServerInternal { status: 500, .. }
        ));
        assert!(matches!(
            ChatError::from_status(503, String::new()),
            ChatError::ServerInternal { status: 503, .. }
        ));
        assert!(matches!(
            ChatError::from_status(302, String::new()),
            ChatError::Unknown(_)
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ChatError::ServerInternal {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "server error (HTTP 500): boom");
        assert_eq!(
            ChatError::Unreachable("refused".into()).to_string(),
            "unreachable: refused"
        );
    }

    #[test]
    fn test_connection_labels() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Unknown);
        assert_eq!(ConnectionStatus::Connected.label(), "Connected");
        assert_eq!(ConnectionStatus::Offline.label(), "Offline");
    }
}
