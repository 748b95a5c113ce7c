//! Error types for the HAL crate.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while executing a circuit.
///
/// All variants are execution errors: they abort the objective evaluation
/// that issued the call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Circuit exceeds executor capabilities.
    #[error("Circuit exceeds executor capabilities: {0}")]
    CircuitTooLarge(String),

    /// Engine output line does not match `<bitstring>: <count>`.
    #[error("Malformed engine output on line {line}: {reason}")]
    MalformedOutput {
        /// 1-based line number within the engine output.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Histogram total differs from the requested shot count.
    #[error("Histogram holds {got} shots, expected {expected}")]
    ShotMismatch {
        /// Requested shot count.
        expected: u32,
        /// Sum of all counts.
        got: u64,
    },

    /// External engine exited unsuccessfully.
    #[error("Engine process failed ({status}): {stderr}")]
    ProcessFailed {
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// Executor call did not finish in time.
    #[error("Execution timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error talking to the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic executor error.
    #[error("Executor error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
