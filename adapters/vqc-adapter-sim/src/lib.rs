//! Local Statevector Executor for the Variational Quantum Classifier
//!
//! This crate provides an in-process [`CircuitExecutor`] for testing and
//! small-scale training runs. It uses exact statevector simulation and
//! draws measurement outcomes with a seeded generator.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector representation
//! - **Classifier Gate Set**: `h`, `rx`, `ry`, `rz`, `crz`, `cz`
//! - **Seeded Sampling**: Equal (circuit, shots, seed) give equal counts
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```rust
//! use vqc_adapter_sim::SimulatorExecutor;
//! use vqc_hal::CircuitExecutor;
//! use vqc_ir::{CircuitTemplate, RotationGate};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let template = CircuitTemplate::build(2, 1, &[RotationGate::Ry])?;
//! let circuit = template.resolve(&[0.1, 0.7], &[0.2, 0.4, 0.6, 0.8])?;
//!
//! let counts = SimulatorExecutor::new().execute(&circuit, 1000, 42).await?;
//! assert_eq!(counts.total_shots(), 1000);
//! # Ok(())
//! # }
//! ```
//!
//! [`CircuitExecutor`]: vqc_hal::CircuitExecutor

mod simulator;
mod statevector;

pub use simulator::SimulatorExecutor;
pub use statevector::Statevector;
