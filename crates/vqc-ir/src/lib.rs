//! Circuit Representation for the Variational Quantum Classifier
//!
//! This crate provides the typed intermediate representation used to build
//! classifier circuits: a data-independent [`CircuitTemplate`] whose
//! rotations read numbered parameter slots, and the [`CircuitInstance`]
//! produced by resolving a template against one feature vector and one set
//! of trainable angles.
//!
//! # Overview
//!
//! Resolution is a structural substitution pass over the template's
//! instruction list, never text formatting. The text form of a resolved
//! circuit (OpenQASM 2.0 dialect) is produced only when a circuit is handed
//! to an external engine.
//!
//! # Core Components
//!
//! - **Qubits and classical bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] for the circuit vocabulary and
//!   [`RotationGate`] for the trainable gate set
//! - **Angles**: [`Angle`] is either an unresolved slot or a value in turns
//! - **Instructions**: [`Instruction`] combining a gate with its operands
//! - **Template**: [`CircuitTemplate`] skeleton with slot layout
//! - **Instance**: [`CircuitInstance`] fully resolved circuit
//!
//! # Example
//!
//! ```rust
//! use vqc_ir::{CircuitTemplate, RotationGate};
//!
//! let template = CircuitTemplate::build(2, 1, &[RotationGate::Ry]).unwrap();
//! let circuit = template.resolve(&[0.25, 0.5], &[0.1, 0.2, 0.3, 0.4]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert!(circuit.to_text().contains("ry(0.1) q[0];"));
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod template;

pub use circuit::CircuitInstance;
pub use error::{IrError, IrResult};
pub use gate::{Angle, RotationGate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
pub use template::{CircuitTemplate, normalize_turns, pairwise_products};
