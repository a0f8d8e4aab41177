//! Error types for dataset I/O.

use arrow_schema::ArrowError;
use dq_engine::EngineError;
use thiserror::Error;

/// Errors that can occur while reading or writing datasets.
#[derive(Debug, Error)]
pub enum IoError {
    /// File system error
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    /// Arrow CSV reading or writing failed
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Loaded data does not form a valid dataset
    #[error("Invalid dataset: {0}")]
    DatasetError(#[from] EngineError),

    /// Arrow array could not be converted
    #[error("Type conversion error: {0}")]
    TypeConversionError(String),
}

/// Result type alias for dataset I/O operations.
pub type Result<T> = std::result::Result<T, IoError>;
