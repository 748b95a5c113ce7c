//! Error types for the training crate.

use thiserror::Error;

/// Errors that can occur while preparing or running a training job.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainError {
    /// Invalid configuration or inconsistent shapes; raised before any execution.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Circuit template could not be built or resolved.
    #[error("Circuit error: {0}")]
    Circuit(#[from] vqc_ir::IrError),

    /// The executor failed or returned an invalid histogram.
    #[error("Execution error: {0}")]
    Execution(#[from] vqc_hal::HalError),

    /// Arithmetic precondition violated (zero shots, empty batch).
    #[error("Numeric error: {0}")]
    Numeric(String),

    /// Dataset content is invalid.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// CSV decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML decoding failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for training operations.
pub type TrainResult<T> = Result<T, TrainError>;
