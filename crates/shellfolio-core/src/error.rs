//! Error types for shellfolio.

use thiserror::Error;

/// Failures of the key/value persistence port.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors a command handler may return. The registry turns every one of
/// these into an `error` output line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("{0}: no such challenge")]
    UnknownChallenge(String),

    #[error("Permission denied: {0}")]
    Locked(String),

    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Usage(_) => "usage",
            CommandError::UnknownChallenge(_) => "unknown_challenge",
            CommandError::Locked(_) => "locked",
            CommandError::Failed(_) => "failed",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
