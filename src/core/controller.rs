//! # Session Controller
//!
//! Binds the pure reducer to a [`SessionStore`]: every dispatched action
//! that changes the persisted part of the state is written back
//! immediately. The TUI dispatches actions and performs the returned
//! effects itself; the async helpers here run a whole cycle against a
//! [`ChatBackend`] and are what the tests drive.

use log::warn;

use crate::client::{ChatBackend, ChatError, Reply};
use crate::core::action::{Action, Effect, update};
use crate::core::session::SessionStore;
use crate::core::state::App;
use crate::core::topic::Topic;

pub struct SessionController<S: SessionStore> {
    app: App,
    store: S,
}

impl<S: SessionStore> SessionController<S> {
    /// Rehydrates from `store`. `seed` drives greeting and loading phrases.
    pub fn new(store: S, seed: u64) -> Self {
        let app = App::from_snapshot(store.load(), seed);
        Self { app, store }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Applies `action` and persists the snapshot if it changed.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        // Messages are append-only between clears, so count and topic
        // are enough to detect a change.
        let before = (self.app.messages.len(), self.app.active_topic);
        let effect = update(&mut self.app, action);
        if (self.app.messages.len(), self.app.active_topic) != before {
            self.persist();
        }
        effect
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.app.snapshot()) {
            warn!("Failed to persist session: {}", e);
        }
    }

    pub fn switch_topic(&mut self, topic: Topic) {
        self.dispatch(Action::SwitchTopic(topic));
    }

    pub fn start_new_chat(&mut self) {
        self.dispatch(Action::NewChat);
    }

    /// Runs one send cycle. Returns `None` when the send was a no-op
    /// (blank text, or a send already in flight).
    ///
    /// Failures are also recorded in the conversation as bot messages;
    /// the returned result is for callers that want the classification.
    pub async fn send_message(
        &mut self,
        backend: &dyn ChatBackend,
        text: &str,
    ) -> Option<Result<Reply, ChatError>> {
        let Effect::SendChat { topic, message } = self.dispatch(Action::Submit(text.to_string()))
        else {
            return None;
        };

        let result = backend.send_chat(topic, &message).await;
        self.dispatch(Action::ReplyReceived(result.clone()));
        Some(result)
    }

    /// Emails `message_text` to `recipient` through the mail relay.
    ///
    /// Opens a draft for `message_text` unless one for that text is already
    /// open. Returns `None` when the recipient does not validate; the draft
    /// stays open in that case, as it does after a failed delivery.
    pub async fn request_email_delivery(
        &mut self,
        backend: &dyn ChatBackend,
        message_text: &str,
        recipient: &str,
    ) -> Option<Result<(), ChatError>> {
        let has_draft = self
            .app
            .email_draft
            .as_ref()
            .is_some_and(|d| d.target_message_text == message_text);
        if !has_draft {
            self.dispatch(Action::OpenEmail(message_text.to_string()));
        }
        self.dispatch(Action::EmailInput(recipient.to_string()));

        let Effect::SendMail { message, email } = self.dispatch(Action::SubmitEmail) else {
            return None;
        };

        let result = backend.send_mail(&message, &email).await;
        self.dispatch(Action::EmailResult(result.clone()));
        Some(result)
    }
}
