//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.campus-chat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The chat service URL is the one exception: it is baked in at build time
//! (`CHAT_API_URL`, see `build.rs`) and cannot be overridden here.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::topic::Topic;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Topic to open on startup. Unset keeps the topic of the stored session.
    pub start_topic: Option<Topic>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HealthConfig {
    pub interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    pub dir: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Base URL of the chat service, fixed at build time.
pub fn api_base_url() -> &'static str {
    option_env!("CHAT_API_URL").unwrap_or(DEFAULT_API_URL)
}

/// Default session directory: `<temp>/campus-chat`, cleared with the OS temp dir.
pub fn default_session_dir() -> PathBuf {
    std::env::temp_dir().join("campus-chat")
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub start_topic: Option<Topic>,
    pub log_level: LevelFilter,
    pub health_interval_secs: u64,
    pub health_timeout_secs: u64,
    pub session_dir: PathBuf,
    /// Discard the stored conversation on startup.
    pub fresh: bool,
    /// Keep the conversation in memory only.
    pub ephemeral: bool,
}

/// Flags from the command line (None/false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub topic: Option<Topic>,
    pub fresh: bool,
    pub ephemeral: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.campus-chat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".campus-chat").join("config.toml"))
}

/// Load config from `~/.campus-chat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChatConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ChatConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ChatConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ChatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# campus-chat configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_topic = "general"            # "general", "academics", "navigation", "admissions"
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"

# [health]
# interval_secs = 30                 # How often to probe the service
# timeout_secs = 5                   # Probe timeout

# [session]
# dir = "/tmp/campus-chat"           # Or set CAMPUS_CHAT_SESSION_DIR
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Start topic: CLI → env → config → none
    let start_topic = cli
        .topic
        .or_else(|| {
            std::env::var("CAMPUS_CHAT_TOPIC")
                .ok()
                .and_then(|id| Topic::from_id(&id))
        })
        .or(config.general.start_topic);

    // Log level: env → config → default
    let log_level = std::env::var("CAMPUS_CHAT_LOG_LEVEL")
        .ok()
        .or_else(|| config.general.log_level.clone())
        .map(|level| parse_log_level(&level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Session dir: env → config → default
    let session_dir = std::env::var("CAMPUS_CHAT_SESSION_DIR")
        .ok()
        .or_else(|| config.session.dir.clone())
        .map(PathBuf::from)
        .unwrap_or_else(default_session_dir);

    ResolvedConfig {
        api_base_url: api_base_url().to_string(),
        start_topic,
        log_level,
        health_interval_secs: config
            .health
            .interval_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_HEALTH_INTERVAL_SECS),
        health_timeout_secs: config
            .health
            .timeout_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_HEALTH_TIMEOUT_SECS),
        session_dir,
        fresh: cli.fresh,
        ephemeral: cli.ephemeral,
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or_else(|_| {
        warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
        DEFAULT_LOG_LEVEL
    })
}
