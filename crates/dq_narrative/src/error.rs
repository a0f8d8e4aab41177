//! Error types for the narrative client.

use thiserror::Error;

/// Errors raised while talking to the narrative service.
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// The HTTP client could not be built
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request failed or the response body could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service returned HTTP {status}")]
    Http { status: u16 },

    /// The KPI payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for narrative operations.
pub type NarrativeResult<T> = std::result::Result<T, NarrativeError>;
