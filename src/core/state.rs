//! # Application State
//!
//! Core conversation state. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── messages: Vec<Message>              // the conversation, append order
//! ├── active_topic: Topic                 // selects the backend route
//! ├── draft_input: String                 // unsent input
//! ├── is_loading: bool                    // a send is in flight
//! ├── loading_phrase: String              // "working" copy for the spinner
//! ├── greeting: String                    // landing page greeting
//! ├── email_draft: Option<EmailDraft>     // Some while the email modal is open
//! ├── connection: ConnectionStatus        // advisory health indicator
//! ├── status_message: String              // title bar note
//! └── phrase_seed: u64                    // drives phrase selection
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Only `messages` and `active_topic` outlive the process (see session.rs).

use crate::client::ConnectionStatus;
use crate::core::email::EmailDraft;
use crate::core::message::{Message, Source};
use crate::core::phrases::{GREETINGS, next_seed, pick_phrase};
use crate::core::session::SessionSnapshot;
use crate::core::topic::Topic;

pub struct App {
    pub messages: Vec<Message>,
    pub active_topic: Topic,
    pub draft_input: String,
    pub is_loading: bool,
    pub loading_phrase: String,
    pub greeting: String,
    pub email_draft: Option<EmailDraft>,
    pub connection: ConnectionStatus,
    pub status_message: String,
    pub phrase_seed: u64,
}

impl App {
    pub fn new(seed: u64) -> Self {
        Self::from_snapshot(SessionSnapshot::default(), seed)
    }

    /// Rehydrates a conversation. The greeting is picked once, here.
    pub fn from_snapshot(snapshot: SessionSnapshot, seed: u64) -> Self {
        let mut app = Self {
            messages: snapshot.messages,
            active_topic: snapshot.active_topic,
            draft_input: String::new(),
            is_loading: false,
            loading_phrase: String::new(),
            greeting: String::new(),
            email_draft: None,
            connection: ConnectionStatus::Unknown,
            status_message: String::new(),
            phrase_seed: seed,
        };
        let greeting_seed = app.take_seed();
        app.greeting = pick_phrase(GREETINGS, greeting_seed).to_string();
        app
    }

    /// The persisted subset of the state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            active_topic: self.active_topic,
        }
    }

    /// Returns the current seed and advances it.
    pub fn take_seed(&mut self) -> u64 {
        let seed = self.phrase_seed;
        self.phrase_seed = next_seed(seed);
        seed
    }

    pub fn last_bot_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.sender == Source::Bot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(0);
        assert!(app.messages.is_empty());
        assert_eq!(app.active_topic, Topic::General);
        assert!(!app.is_loading);
        assert!(app.email_draft.is_none());
        assert_eq!(app.connection, ConnectionStatus::Unknown);
        assert_eq!(app.greeting, GREETINGS[0]);
        assert_ne!(app.phrase_seed, 0);
    }

    #[test]
    fn test_from_snapshot_keeps_conversation() {
        let snapshot = SessionSnapshot {
            messages: vec![Message::user("Hi"), Message::bot("Hello")],
            active_topic: Topic::Admissions,
        };
        let app = App::from_snapshot(snapshot.clone(), 5);
        assert_eq!(app.snapshot(), snapshot);
        assert_eq!(app.last_bot_message().map(|m| m.text.as_str()), Some("Hello"));
    }

    #[test]
    fn test_take_seed_advances() {
        let mut app = App::new(1);
        let a = app.take_seed();
        let b = app.take_seed();
        assert_ne!(a, b);
    }
}
