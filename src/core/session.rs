//! # Session Persistence
//!
//! The conversation survives a restart of the client within one terminal
//! session, and no longer.
//!
//! Storage is a flat key/value area holding two keys, each a JSON-encoded
//! string: `chatMessages` (the message array) and `activeTopic` (the topic
//! id). Loading is best-effort per key: anything missing or corrupt falls
//! back to its default and never fails the caller.
//!
//! `FileSessionStore` keeps the area in `<dir>/session-<scope>.json`, where
//! the scope identifies the terminal session that launched the client. All
//! writes use atomic rename (write `.tmp`, then `rename()`).

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use crate::core::message::Message;
use crate::core::topic::Topic;

pub const MESSAGES_KEY: &str = "chatMessages";
pub const TOPIC_KEY: &str = "activeTopic";

/// The persisted part of the conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub active_topic: Topic,
}

/// Where the controller keeps its snapshot.
pub trait SessionStore {
    /// Reads the stored snapshot, falling back to defaults. Never fails.
    fn load(&self) -> SessionSnapshot;

    /// Replaces the stored snapshot.
    fn save(&mut self, snapshot: &SessionSnapshot) -> io::Result<()>;

    /// Forgets the stored snapshot.
    fn clear(&mut self) -> io::Result<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn load(&self) -> SessionSnapshot {
        (**self).load()
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> io::Result<()> {
        (**self).save(snapshot)
    }

    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }
}

type Entries = BTreeMap<String, String>;

fn encode(snapshot: &SessionSnapshot) -> io::Result<Entries> {
    let messages = serde_json::to_string(&snapshot.messages)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let topic = serde_json::to_string(snapshot.active_topic.id())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut entries = Entries::new();
    entries.insert(MESSAGES_KEY.to_string(), messages);
    entries.insert(TOPIC_KEY.to_string(), topic);
    Ok(entries)
}

fn decode(entries: &Entries) -> SessionSnapshot {
    let messages = match entries.get(MESSAGES_KEY) {
        Some(raw) => serde_json::from_str::<Vec<Message>>(raw).unwrap_or_else(|e| {
            warn!("Discarding corrupt {}: {}", MESSAGES_KEY, e);
            Vec::new()
        }),
        None => Vec::new(),
    };

    let active_topic = entries
        .get(TOPIC_KEY)
        .and_then(|raw| decode_topic(raw))
        .unwrap_or_default();

    SessionSnapshot {
        messages,
        active_topic,
    }
}

/// Accepts a JSON-encoded id (`"\"academics\""`) or a bare one (`academics`).
fn decode_topic(raw: &str) -> Option<Topic> {
    let topic = serde_json::from_str::<String>(raw)
        .ok()
        .and_then(|id| Topic::from_id(&id))
        .or_else(|| Topic::from_id(raw));
    if topic.is_none() {
        warn!("Ignoring unknown {}: {}", TOPIC_KEY, raw);
    }
    topic
}

// ============================================================================
// In-memory store
// ============================================================================

/// Store backed by a map. Used by tests and `--ephemeral` runs.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    entries: Entries,
}

impl MemorySessionStore {
    /// Raw value of a storage key, as it would sit in the storage area.
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_entry(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionSnapshot {
        decode(&self.entries)
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> io::Result<()> {
        self.entries = encode(snapshot)?;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.entries.clear();
        Ok(())
    }
}

// ============================================================================
// File store
// ============================================================================

/// Store backed by one JSON object file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store for the terminal session this process belongs to, under `dir`.
    pub fn for_current_session(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("session-{}.json", session_scope()));
        debug!("Session store at {}", path.display());
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> io::Result<Entries> {
        let json = fs::read_to_string(&self.path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> SessionSnapshot {
        match self.read_entries() {
            Ok(entries) => decode(&entries),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored session at {}", self.path.display());
                SessionSnapshot::default()
            }
            Err(e) => {
                warn!("Failed to read session {}: {}", self.path.display(), e);
                SessionSnapshot::default()
            }
        }
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, &encode(snapshot)?)
    }

    fn clear(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Identifies the terminal session: the parent process (the shell) on unix.
pub fn session_scope() -> String {
    #[cfg(unix)]
    {
        std::os::unix::process::parent_id().to_string()
    }
    #[cfg(not(unix))]
    {
        String::from("default")
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
