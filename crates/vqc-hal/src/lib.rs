//! Circuit Execution Layer for the Variational Quantum Classifier
//!
//! This crate defines the single capability the classifier needs from a
//! quantum engine: run a resolved circuit for a number of shots with a
//! seed, and return the outcome histogram.
//!
//! # Overview
//!
//! - A common [`CircuitExecutor`] trait, async and `Send + Sync`
//! - [`Counts`] for bitstring histograms
//! - [`ProcessExecutor`] which drives an external engine binary
//! - [`ExecutionPolicy`] and [`execute_with_policy`] for per-call timeout
//!   and retry
//!
//! # Supported Executors
//!
//! | Executor | Crate | Notes |
//! |----------|-------|-------|
//! | Local statevector | `vqc-adapter-sim` | In-process, exact |
//! | External engine | `vqc-hal` ([`ProcessExecutor`]) | `-f <file> -s <shots> -r <seed>` |
//!
//! # Implementing a Custom Executor
//!
//! ```ignore
//! use async_trait::async_trait;
//! use vqc_hal::{CircuitExecutor, Counts, HalResult};
//! use vqc_ir::CircuitInstance;
//!
//! struct AlwaysZero;
//!
//! #[async_trait]
//! impl CircuitExecutor for AlwaysZero {
//!     fn name(&self) -> &str { "zero" }
//!
//!     async fn execute(&self, c: &CircuitInstance, shots: u32, _seed: u64) -> HalResult<Counts> {
//!         let zeros = "0".repeat(c.num_qubits() as usize);
//!         Ok([(zeros, u64::from(shots))].into_iter().collect())
//!     }
//! }
//! ```

pub mod error;
pub mod executor;
pub mod parse;
pub mod process;
pub mod result;

pub use error::{HalError, HalResult};
pub use executor::{CircuitExecutor, ExecutionPolicy, execute_with_policy};
pub use parse::parse_counts;
pub use process::ProcessExecutor;
pub use result::Counts;
