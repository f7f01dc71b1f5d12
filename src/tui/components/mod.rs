//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: brand, topic, status note, connection indicator
//! - `Sidebar`: topic list and "New Chat"
//! - `Message`: a single conversation entry
//! - `LandingPage`: greeting and prompts for an empty conversation
//! - `EmailModal`: overlay over the core email draft
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: the message composer
//! - `MessageList`: scrollable conversation view (state in `MessageListState`)
//!
//! Components receive external data as props (struct fields), never by
//! reaching into `App` themselves.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── sidebar.rs       (Topic list)
//! ├── landing.rs       (Empty-conversation page)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! ├── email_modal.rs   (Email overlay)
//! └── input_box/       (Message composer)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod email_modal;
pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod sidebar;

pub use email_modal::EmailModal;
pub use input_box::{InputBox, InputEvent};
pub use landing::{LandingPage, LandingState, landing_prompts};
pub use message_list::{MessageList, MessageListState};
pub use sidebar::{SIDEBAR_WIDTH, Sidebar};
