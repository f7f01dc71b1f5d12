//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::client::{ChatBackend, ChatError, ConnectionStatus, Reply};
use crate::core::controller::SessionController;
use crate::core::session::MemorySessionStore;
use crate::core::topic::Topic;

/// A backend that replays queued results and records what it was asked.
///
/// Chat calls with an empty queue answer `"ok"`; mail calls succeed.
pub struct ScriptedBackend {
    chat_results: Mutex<VecDeque<Result<Reply, ChatError>>>,
    mail_results: Mutex<VecDeque<Result<(), ChatError>>>,
    health: Mutex<ConnectionStatus>,
    chat_log: Mutex<Vec<(Topic, String)>>,
    mail_log: Mutex<Vec<(String, String)>>,
    health_calls: AtomicUsize,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            chat_results: Mutex::new(VecDeque::new()),
            mail_results: Mutex::new(VecDeque::new()),
            health: Mutex::new(ConnectionStatus::Offline),
            chat_log: Mutex::new(Vec::new()),
            mail_log: Mutex::new(Vec::new()),
            health_calls: AtomicUsize::new(0),
        }
    }

    pub fn push_reply(&self, text: &str) {
        self.push_chat_result(Ok(Reply {
            text: text.to_string(),
        }));
    }

    pub fn push_chat_result(&self, result: Result<Reply, ChatError>) {
        self.chat_results.lock().unwrap().push_back(result);
    }

    pub fn push_mail_result(&self, result: Result<(), ChatError>) {
        self.mail_results.lock().unwrap().push_back(result);
    }

    pub fn set_health(&self, status: ConnectionStatus) {
        *self.health.lock().unwrap() = status;
    }

    pub fn chat_calls(&self) -> Vec<(Topic, String)> {
        self.chat_log.lock().unwrap().clone()
    }

    pub fn mail_calls(&self) -> Vec<(String, String)> {
        self.mail_log.lock().unwrap().clone()
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send_chat(&self, topic: Topic, message: &str) -> Result<Reply, ChatError> {
        self.chat_log
            .lock()
            .unwrap()
            .push((topic, message.to_string()));
        self.chat_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(Reply {
                    text: "ok".to_string(),
                })
            })
    }

    async fn send_mail(&self, message: &str, email: &str) -> Result<(), ChatError> {
        self.mail_log
            .lock()
            .unwrap()
            .push((message.to_string(), email.to_string()));
        self.mail_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn check_health(&self) -> ConnectionStatus {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        *self.health.lock().unwrap()
    }
}

/// Creates a controller over an empty in-memory store with a fixed seed.
pub fn test_controller() -> SessionController<MemorySessionStore> {
    SessionController::new(MemorySessionStore::default(), 0)
}
