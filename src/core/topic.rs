//! # Topics
//!
//! A topic is a conversation category. Each one is bound to its own backend
//! route and its own set of suggested prompts. Switching topics starts a
//! fresh conversation.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    #[default]
    General,
    Academics,
    Navigation,
    Admissions,
}

impl Topic {
    /// All topics in sidebar order.
    pub const ALL: [Topic; 4] = [
        Topic::General,
        Topic::Academics,
        Topic::Navigation,
        Topic::Admissions,
    ];

    /// Stable identifier, used in session storage and config.
    pub fn id(self) -> &'static str {
        match self {
            Topic::General => "general",
            Topic::Academics => "academics",
            Topic::Navigation => "navigation",
            Topic::Admissions => "admissions",
        }
    }

    pub fn from_id(id: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.id() == id.trim())
    }

    pub fn name(self) -> &'static str {
        match self {
            Topic::General => "General",
            Topic::Academics => "Academics",
            Topic::Navigation => "Navigation",
            Topic::Admissions => "Admissions",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Topic::General => "AI-Powered Assistant",
            Topic::Academics => "Programs & Faculty",
            Topic::Navigation => "Campus Locations",
            Topic::Admissions => "Eligibility & Fees",
        }
    }

    /// Path of the chat route relative to the API base URL.
    /// Navigation is served by the campus-nav route.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Topic::General => "chat/general",
            Topic::Academics => "chat/academics",
            Topic::Navigation => "chat/campus-nav",
            Topic::Admissions => "chat/admissions",
        }
    }

    pub fn suggested_prompts(self) -> &'static [&'static str] {
        match self {
            Topic::General => &[
                "What makes PCE unique?",
                "Tell me about campus facilities",
                "Recent placement statistics?",
            ],
            Topic::Academics => &[
                "Available B.Tech programs?",
                "Computer Science curriculum",
                "Faculty qualifications",
            ],
            Topic::Navigation => &[
                "Where is the library?",
                "How to reach the auditorium?",
                "Campus layout guide",
            ],
            Topic::Admissions => &[
                "Admission process overview",
                "Fee structure details",
                "Application deadlines",
            ],
        }
    }

    /// Cycles to the next topic (wraps around)
    pub fn next(self) -> Topic {
        match self {
            Topic::General => Topic::Academics,
            Topic::Academics => Topic::Navigation,
            Topic::Navigation => Topic::Admissions,
            Topic::Admissions => Topic::General,
        }
    }

    /// Cycles to the previous topic (wraps around)
    pub fn prev(self) -> Topic {
        match self {
            Topic::General => Topic::Admissions,
            Topic::Academics => Topic::General,
            Topic::Navigation => Topic::Academics,
            Topic::Admissions => Topic::Navigation,
        }
    }
}
