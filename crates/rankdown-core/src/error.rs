//! Error types for snapshot decoding.

use thiserror::Error;

/// Result type for rankdown-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a snapshot document.
///
/// Resolution, aggregation and validation never fail; only turning raw bytes
/// into a [`Snapshot`](crate::Snapshot) can.
#[derive(Debug, Error)]
pub enum Error {
    /// The document is not valid JSON, or a field has the wrong JSON type.
    #[error("invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed, but its top level is not an object.
    #[error("invalid snapshot: expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}
