//! # Email Draft
//!
//! State behind the "email this response" modal. The draft only exists
//! while the modal is open.
//!
//! Recipient validation runs on every keystroke. An empty field is
//! `Neutral` rather than `Invalid`, so the view doesn't flag an error
//! before the user has typed anything.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Result of validating the recipient field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailValidity {
    /// Nothing typed yet.
    #[default]
    Neutral,
    Invalid,
    Valid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub target_message_text: String,
    pub recipient_email: String,
    pub validity: EmailValidity,
    /// A mail relay request is in flight.
    pub sending: bool,
}

impl EmailDraft {
    pub fn new(target_message_text: String) -> Self {
        Self {
            target_message_text,
            recipient_email: String::new(),
            validity: EmailValidity::Neutral,
            sending: false,
        }
    }

    /// Replaces the recipient and re-runs validation.
    pub fn set_recipient(&mut self, recipient: String) {
        self.validity = validate_email(&recipient);
        self.recipient_email = recipient;
    }

    pub fn is_valid(&self) -> bool {
        self.validity == EmailValidity::Valid
    }

    /// Submission needs a valid recipient and no send already in flight.
    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.sending
    }
}

/// Validates `localpart@domain.tld`: one `@`, no whitespace, and a `.`
/// with characters on both sides somewhere after the `@`.
pub fn validate_email(input: &str) -> EmailValidity {
    if input.is_empty() {
        EmailValidity::Neutral
    } else if EMAIL_PATTERN.is_match(input) {
        EmailValidity::Valid
    } else {
        EmailValidity::Invalid
    }
}
