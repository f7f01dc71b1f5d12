//! # UI Copy
//!
//! Phrase pools for the greeting and "working" indicator, quick actions
//! for the landing page, and the conversation copy for each send failure.
//!
//! Phrase selection is a pure function of the pool and a seed, so tests
//! can pin the choice. Seeds advance through a `StdRng` seeded from the
//! previous value.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::client::ChatError;

pub const GREETINGS: &[&str] = &[
    "Hey! What can I help you with?",
    "Hi there! Ask me anything",
    "What's up? How can I help?",
    "Hey! What do you need?",
    "Hi! I'm here to help",
    "Hello! What brings you here?",
];

pub const LOADING_PHRASES: &[&str] = &[
    "Getting your answer...",
    "Let me check that for you...",
    "Looking that up...",
    "One moment...",
    "Searching...",
    "Just a sec...",
];

/// A canned prompt shown on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub query: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction { label: "Campus tour", query: "Give me a campus tour guide" },
    QuickAction { label: "Food spots", query: "Best food places near PCE?" },
    QuickAction { label: "Scholarships", query: "What scholarships are available?" },
    QuickAction { label: "Events", query: "What events happen at PCE?" },
    QuickAction { label: "Placements", query: "Recent placement stats" },
    QuickAction { label: "Study tips", query: "Study resources and tips" },
];

/// Bot text when a successful response carries no usable reply.
pub const FALLBACK_REPLY: &str =
    "I received your message but couldn't generate a proper response.";

pub const CLIENT_REQUEST_REPLY: &str =
    "There was an issue with your request. Please try rephrasing your question.";
pub const SERVER_INTERNAL_REPLY: &str =
    "I encountered an internal error. Please try again in a moment.";
pub const UNREACHABLE_REPLY: &str = "Cannot reach the server. Please check your connection.";
pub const UNKNOWN_ERROR_REPLY: &str =
    "I'm having trouble connecting right now. Please try again.";

/// Picks a phrase from `pool`. Empty pools yield `""`.
pub fn pick_phrase<'a>(pool: &[&'a str], seed: u64) -> &'a str {
    if pool.is_empty() {
        return "";
    }
    pool[(seed % pool.len() as u64) as usize]
}

/// Advances a phrase seed. Same input, same output.
pub fn next_seed(seed: u64) -> u64 {
    StdRng::seed_from_u64(seed).random::<u64>()
}

/// Fresh seed for production use.
pub fn random_seed() -> u64 {
    rand::random::<u64>()
}

/// Conversation copy for a failed send.
pub fn error_reply(error: &ChatError) -> &'static str {
    match error {
        ChatError::ClientRequest { .. } => CLIENT_REQUEST_REPLY,
        ChatError::ServerInternal { .. } => SERVER_INTERNAL_REPLY,
        ChatError::Unreachable(_) => UNREACHABLE_REPLY,
        ChatError::Unknown(_) => UNKNOWN_ERROR_REPLY,
    }
}
