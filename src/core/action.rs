//! # Actions
//!
//! Everything that can happen in the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The service answers? That's `Action::ReplyReceived(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller must
//! perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! A single send cycle:
//!
//! ```text
//! IDLE --Submit(non-empty), not loading--> SENDING   (Effect::SendChat)
//! SENDING --ReplyReceived(Ok)-->  IDLE (reply appended)
//! SENDING --ReplyReceived(Err)--> IDLE (error copy appended)
//! ```

use log::{debug, info, warn};

use crate::client::{ChatError, ConnectionStatus, Reply};
use crate::core::email::EmailDraft;
use crate::core::message::Message;
use crate::core::phrases::{LOADING_PHRASES, error_reply, pick_phrase};
use crate::core::state::App;
use crate::core::topic::Topic;

#[derive(Debug, Clone)]
pub enum Action {
    /// The input box content changed.
    DraftChanged(String),
    /// User submitted a message.
    Submit(String),
    /// The chat request finished, one way or the other.
    ReplyReceived(Result<Reply, ChatError>),
    SwitchTopic(Topic),
    NewChat,
    /// Open the email modal for a message's text.
    OpenEmail(String),
    /// The recipient field changed.
    EmailInput(String),
    SubmitEmail,
    EmailResult(Result<(), ChatError>),
    /// Cancel: close the modal and drop the draft.
    CloseEmail,
    HealthChecked(ConnectionStatus),
    Quit,
}

/// I/O requested by `update()`. The caller performs it and feeds the
/// outcome back as another action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SendChat { topic: Topic, message: String },
    SendMail { message: String, email: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::DraftChanged(text) => {
            app.draft_input = text;
            Effect::None
        }
        Action::Submit(text) => {
            if app.is_loading {
                debug!("Submit ignored: a send is already in flight");
                return Effect::None;
            }
            if text.trim().is_empty() {
                return Effect::None;
            }

            app.messages.push(Message::user(text.clone()));
            app.draft_input.clear();
            app.is_loading = true;
            let seed = app.take_seed();
            app.loading_phrase = pick_phrase(LOADING_PHRASES, seed).to_string();
            app.status_message.clear();

            info!("Sending message on topic {}", app.active_topic.id());
            Effect::SendChat {
                topic: app.active_topic,
                message: text,
            }
        }
        Action::ReplyReceived(result) => {
            let text = match result {
                Ok(reply) => reply.text,
                Err(e) => {
                    warn!("Chat request failed: {}", e);
                    error_reply(&e).to_string()
                }
            };
            app.messages.push(Message::bot(text));
            app.is_loading = false;
            app.loading_phrase.clear();
            Effect::None
        }
        Action::SwitchTopic(topic) => {
            // No confirmation when a send is in flight; its reply lands in
            // the new conversation and clears the loading flag.
            app.active_topic = topic;
            app.messages.clear();
            app.draft_input.clear();
            app.status_message = format!("Topic: {}", topic.name());
            info!("Switched topic to {}", topic.id());
            Effect::None
        }
        Action::NewChat => {
            app.active_topic = Topic::default();
            app.messages.clear();
            app.draft_input.clear();
            app.status_message = String::from("New Chat");
            info!("Started a new chat");
            Effect::None
        }
        Action::OpenEmail(text) => {
            app.email_draft = Some(EmailDraft::new(text));
            Effect::None
        }
        Action::EmailInput(recipient) => {
            if let Some(draft) = app.email_draft.as_mut() {
                draft.set_recipient(recipient);
            }
            Effect::None
        }
        Action::SubmitEmail => match app.email_draft.as_mut() {
            Some(draft) if draft.can_submit() => {
                draft.sending = true;
                Effect::SendMail {
                    message: draft.target_message_text.clone(),
                    email: draft.recipient_email.clone(),
                }
            }
            _ => {
                debug!("Email submit ignored: no valid draft ready");
                Effect::None
            }
        },
        Action::EmailResult(Ok(())) => {
            app.email_draft = None;
            app.status_message = String::from("Email sent");
            Effect::None
        }
        Action::EmailResult(Err(e)) => {
            warn!("Email delivery failed: {}", e);
            if let Some(draft) = app.email_draft.as_mut() {
                draft.sending = false;
            }
            app.status_message = String::from("Email failed. Try again.");
            Effect::None
        }
        Action::CloseEmail => {
            app.email_draft = None;
            Effect::None
        }
        Action::HealthChecked(status) => {
            app.connection = status;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
