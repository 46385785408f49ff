//! Error types for the board.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for board operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching a snapshot or running the board.
///
/// Every retrieval and decode failure ends up in the display state as a single
/// message: the `Display` text of this type.
#[derive(Debug, Error)]
pub enum Error {
    /// The snapshot server answered with a non-success status
    #[error("failed to load snapshot from {url} ({status})")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The request never produced a response
    #[error("failed to reach snapshot source: {0}")]
    Transport(String),

    /// The fetch did not finish within its budget
    #[error("snapshot fetch timed out after {:.1}s", .0.as_secs_f64())]
    Timeout(std::time::Duration),

    /// Reading a local snapshot file failed
    #[error("failed to read snapshot file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot was retrieved but could not be decoded
    #[error(transparent)]
    Snapshot(#[from] rankdown_core::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The HTTP server failed to bind or serve
    #[error("server error: {0}")]
    Server(#[source] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}
