//! # Core Application Logic
//!
//! This module contains the conversation session controller.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • SessionStore         │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   client   │
//!     │  Adapter   │ ── performs effects ──▶  │ (reqwest)  │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all conversation state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`controller`]: Reducer + injected session store
//! - [`session`]: Session-scoped persistence
//! - [`email`]: Email draft and recipient validation
//! - [`phrases`]: UI copy and phrase selection
//! - [`topic`]: The fixed topic set
//! - [`message`]: Conversation messages
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod controller;
pub mod email;
pub mod message;
pub mod phrases;
pub mod session;
pub mod state;
pub mod topic;
