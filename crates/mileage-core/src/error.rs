//! Error types for the mileage-core library.

use thiserror::Error;

/// Main error type for the mileage library.
#[derive(Error, Debug)]
pub enum MileageError {
    /// Record completeness or consistency error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Transcript event stream error.
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised when turning parsed fields into logbook records.
///
/// The transcript parser itself never fails; these come from the
/// completeness and consistency checks applied by callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Required field is missing.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Field validation failed.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Failed to parse a value.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Errors related to the transcript event stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The downstream receiver was dropped before the stream finished.
    #[error("update channel closed")]
    Closed,
}

/// Result type for the mileage library.
pub type Result<T> = std::result::Result<T, MileageError>;
