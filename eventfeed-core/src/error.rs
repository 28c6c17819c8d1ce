//! Error types for the eventfeed ecosystem.

use thiserror::Error;

/// Errors that can occur in eventfeed sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Invalid issue payload: {0}")]
    InvalidPayload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for eventfeed operations.
pub type SyncResult<T> = Result<T, SyncError>;
