//! Fully resolved circuits and their text form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gate::Angle;
use crate::instruction::{Instruction, InstructionKind};

/// A circuit with every rotation angle resolved.
///
/// Instances are created per objective evaluation and discarded after
/// execution. Two instances built from the same template and inputs compare
/// equal and render to byte-identical text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitInstance {
    num_qubits: u32,
    instructions: Vec<Instruction>,
}

impl CircuitInstance {
    pub(crate) fn new(num_qubits: u32, instructions: Vec<Instruction>) -> Self {
        Self {
            num_qubits,
            instructions,
        }
    }

    /// Number of qubits (and classical bits).
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of gate instructions (excluding measurements).
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| !i.is_measure()).count()
    }

    /// Resolved angles in emission order.
    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.instructions
            .iter()
            .filter_map(|i| i.as_gate().and_then(|g| g.angle()))
            .filter_map(|a| a.as_turns())
    }

    /// Render the circuit in the OpenQASM 2.0 dialect read by the external engine.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CircuitInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OPENQASM 2.0;")?;
        writeln!(f, "include \"qelib1.inc\";")?;
        writeln!(f, "qreg q[{}];", self.num_qubits)?;
        writeln!(f, "creg c[{}];", self.num_qubits)?;

        for inst in &self.instructions {
            match &inst.kind {
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(inst.clbits.iter()) {
                        writeln!(f, "measure {q} -> {c};")?;
                    }
                }
                InstructionKind::Gate(gate) => {
                    let qubits = inst
                        .qubits
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    match gate.angle() {
                        Some(Angle::Turns(t)) => writeln!(f, "{}({t}) {qubits};", gate.name())?,
                        // Templates are never rendered; keep the slot visible if one is.
                        Some(Angle::Slot(s)) => writeln!(f, "{}({{{s}}}) {qubits};", gate.name())?,
                        None => writeln!(f, "{} {qubits};", gate.name())?,
                    }
                }
            }
        }
        Ok(())
    }
}
