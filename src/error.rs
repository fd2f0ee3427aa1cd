use thiserror::Error;

/// Failures reported by the primary store adapter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Primary store unavailable: {0}")]
    Unavailable(String),
    #[error("Store validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

/// The only failure the order pipeline lets through to its caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order validation error: {0}")]
    ValidationError(String),
}

/// Durable fallback write failures.
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("Fallback file I/O failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Fallback record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification transport error: {0}")]
    Transport(String),
    #[error("Notification rejected with status {0}")]
    Rejected(u16),
}

impl From<reqwest::Error> for NotificationError {
    fn from(e: reqwest::Error) -> Self {
        NotificationError::Transport(e.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Failures that stop the service from starting or shutting down cleanly.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Notifier setup failed: {0}")]
    Notifier(#[from] NotificationError),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
