pub mod backend;
pub mod health;
pub mod http;
pub mod types;

pub use backend::{ChatBackend, ChatError, ConnectionStatus, Reply};
pub use health::HealthMonitor;
pub use http::HttpBackend;
