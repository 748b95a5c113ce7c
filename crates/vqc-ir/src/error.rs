//! Error types for the IR crate.

use thiserror::Error;

/// Structural errors raised while building or resolving a circuit.
///
/// Every variant is a configuration problem: it is detected before any
/// circuit reaches an executor and is not recoverable by retrying.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Template requested with fewer than one qubit.
    #[error("Circuit needs at least 1 qubit, got {0}")]
    InvalidQubitCount(u32),

    /// Template requested with no trainable rotation gates.
    #[error("Gate set is empty; at least one of rx, ry, rz is required")]
    EmptyGateSet,

    /// Gate name is not a trainable rotation.
    #[error("Unknown rotation gate '{0}' (expected rx, ry or rz)")]
    UnknownGate(String),

    /// Feature vector length does not match the qubit count.
    #[error("Expected {expected} features (one per qubit), got {got}")]
    FeatureCountMismatch {
        /// Number of qubits in the template.
        expected: usize,
        /// Length of the supplied feature vector.
        got: usize,
    },

    /// Number of parameter slots differs from the length of the value stream.
    #[error("Template has {slots} parameter slots but {values} values were supplied")]
    SlotCountMismatch {
        /// Parameter slots in the template.
        slots: usize,
        /// Values in the concatenated stream.
        values: usize,
    },

    /// A value in the stream is NaN or infinite.
    #[error("Value for slot {slot} is not finite: {value}")]
    NonFiniteValue {
        /// Slot index that received the value.
        slot: usize,
        /// The offending value.
        value: f64,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
