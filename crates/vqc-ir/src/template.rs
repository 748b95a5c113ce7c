//! Data-independent circuit skeleton for the variational classifier.
//!
//! A [`CircuitTemplate`] is built once from structural parameters and then
//! resolved for every (feature vector, parameter vector) pair. Every
//! rotation in the template reads one numbered slot; slots are numbered in
//! emission order, which fixes the layout of the value stream:
//!
//! ```text
//! [ features | pair values | features | pair values | trainable angles ]
//!     n          n(n-1)/2       n         n(n-1)/2      n·|G|·(L+1)
//! ```
//!
//! # Example
//!
//! ```rust
//! use vqc_ir::{CircuitTemplate, RotationGate};
//!
//! let template = CircuitTemplate::build(3, 4, &[RotationGate::Ry, RotationGate::Rz]).unwrap();
//! assert_eq!(template.num_trainable(), 3 * 2 * 5);
//!
//! let features = [0.1, 0.2, 0.3];
//! let angles = vec![0.0; template.num_trainable()];
//! let circuit = template.resolve(&features, &angles).unwrap();
//! assert!(circuit.to_text().starts_with("OPENQASM 2.0;"));
//! ```

use serde::{Deserialize, Serialize};

use crate::circuit::CircuitInstance;
use crate::error::{IrError, IrResult};
use crate::gate::{Angle, RotationGate, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// Number of decimal places kept for resolved angles.
pub const ANGLE_DECIMALS: i32 = 3;

/// Structural skeleton with numbered parameter slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitTemplate {
    num_qubits: u32,
    layers: u32,
    gates: Vec<RotationGate>,
    instructions: Vec<Instruction>,
    num_slots: usize,
}

impl CircuitTemplate {
    /// Build the skeleton for `num_qubits` qubits, `layers` entangling
    /// layers and the trainable rotation set `gates`.
    pub fn build(num_qubits: u32, layers: u32, gates: &[RotationGate]) -> IrResult<Self> {
        if num_qubits < 1 {
            return Err(IrError::InvalidQubitCount(num_qubits));
        }
        if gates.is_empty() {
            return Err(IrError::EmptyGateSet);
        }

        let mut builder = SlotBuilder::default();
        let qubits: Vec<QubitId> = (0..num_qubits).map(QubitId).collect();

        // Feature map, applied twice.
        for _ in 0..2 {
            for &q in &qubits {
                builder.fixed(Instruction::single_qubit_gate(StandardGate::H, q));
            }
            for &q in &qubits {
                builder.single(StandardGate::Rz(Angle::Slot(0)), q);
            }
            for (i, j) in unordered_pairs(num_qubits) {
                builder.pair(StandardGate::CRz(Angle::Slot(0)), QubitId(i), QubitId(j));
            }
        }

        // Initial variational block.
        builder.rotations(gates, &qubits);

        for _ in 0..layers {
            for i in 0..num_qubits.saturating_sub(1) {
                builder.fixed(Instruction::two_qubit_gate(
                    StandardGate::CZ,
                    QubitId(i),
                    QubitId(i + 1),
                ));
            }
            // Close the ring; for two qubits the chain already couples both.
            if num_qubits > 2 {
                builder.fixed(Instruction::two_qubit_gate(
                    StandardGate::CZ,
                    QubitId(0),
                    QubitId(num_qubits - 1),
                ));
            }
            builder.rotations(gates, &qubits);
        }

        for &q in &qubits {
            builder.fixed(Instruction::measure(q, ClbitId(q.0)));
        }

        Ok(Self {
            num_qubits,
            layers,
            gates: gates.to_vec(),
            num_slots: builder.next_slot,
            instructions: builder.instructions,
        })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of entangling layers.
    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// Trainable rotation set.
    pub fn gates(&self) -> &[RotationGate] {
        &self.gates
    }

    /// Skeleton instructions with unresolved slots.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Total number of parameter slots.
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Number of slots filled from the feature vector (features and pair values, twice).
    pub fn num_feature_slots(&self) -> usize {
        let n = self.num_qubits as usize;
        2 * (n + n * (n - 1) / 2)
    }

    /// Number of trainable rotation angles: `qubits × |gates| × (layers + 1)`.
    pub fn num_trainable(&self) -> usize {
        self.num_qubits as usize * self.gates.len() * (self.layers as usize + 1)
    }

    /// Concatenate the raw (unnormalized) value stream for one sample.
    pub fn value_stream(&self, features: &[f64], angles: &[f64]) -> IrResult<Vec<f64>> {
        let n = self.num_qubits as usize;
        if features.len() != n {
            return Err(IrError::FeatureCountMismatch {
                expected: n,
                got: features.len(),
            });
        }

        let pairs = pairwise_products(features);
        let mut stream = Vec::with_capacity(2 * (features.len() + pairs.len()) + angles.len());
        stream.extend_from_slice(features);
        stream.extend_from_slice(&pairs);
        stream.extend_from_slice(features);
        stream.extend_from_slice(&pairs);
        stream.extend_from_slice(angles);
        Ok(stream)
    }

    /// Substitute `features` and trainable `angles` into the skeleton.
    ///
    /// Every value is reduced modulo one turn and rounded to
    /// [`ANGLE_DECIMALS`] places before insertion. Fails if the slot count
    /// does not equal the length of the concatenated value stream.
    pub fn resolve(&self, features: &[f64], angles: &[f64]) -> IrResult<CircuitInstance> {
        let stream = self.value_stream(features, angles)?;
        if stream.len() != self.num_slots {
            return Err(IrError::SlotCountMismatch {
                slots: self.num_slots,
                values: stream.len(),
            });
        }

        let instructions = self
            .instructions
            .iter()
            .map(|inst| match inst.slot() {
                Some(slot) => {
                    let value = stream[slot];
                    if !value.is_finite() {
                        return Err(IrError::NonFiniteValue { slot, value });
                    }
                    Ok(inst.with_angle(Angle::Turns(normalize_turns(value))))
                }
                None => Ok(inst.clone()),
            })
            .collect::<IrResult<Vec<_>>>()?;

        Ok(CircuitInstance::new(self.num_qubits, instructions))
    }
}

/// Reduce a value to `[0, 1)` turns and round to [`ANGLE_DECIMALS`] places.
///
/// Rounding can carry a value just below one up to exactly `1.0`, which is
/// the same rotation as `0.0`.
pub fn normalize_turns(value: f64) -> f64 {
    let scale = 10f64.powi(ANGLE_DECIMALS);
    let rounded = (value.rem_euclid(1.0) * scale).round() / scale;
    // Avoid printing "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Pair values for every unordered qubit pair `(i, j)`, `i < j`, in
/// lexicographic order: `(1 - x_i) * (1 - x_j)`.
pub fn pairwise_products(features: &[f64]) -> Vec<f64> {
    let n = u32::try_from(features.len()).unwrap_or(u32::MAX);
    unordered_pairs(n)
        .map(|(i, j)| (1.0 - features[i as usize]) * (1.0 - features[j as usize]))
        .collect()
}

fn unordered_pairs(n: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Appends instructions while handing out consecutive slot numbers.
#[derive(Default)]
struct SlotBuilder {
    instructions: Vec<Instruction>,
    next_slot: usize,
}

impl SlotBuilder {
    fn take_slot(&mut self) -> Angle {
        let slot = self.next_slot;
        self.next_slot += 1;
        Angle::Slot(slot)
    }

    fn fixed(&mut self, inst: Instruction) {
        self.instructions.push(inst);
    }

    fn single(&mut self, gate: StandardGate, qubit: QubitId) {
        let angle = self.take_slot();
        self.instructions
            .push(Instruction::single_qubit_gate(gate.with_angle(angle), qubit));
    }

    fn pair(&mut self, gate: StandardGate, control: QubitId, target: QubitId) {
        let angle = self.take_slot();
        self.instructions.push(Instruction::two_qubit_gate(
            gate.with_angle(angle),
            control,
            target,
        ));
    }

    fn rotations(&mut self, gates: &[RotationGate], qubits: &[QubitId]) {
        for gate in gates {
            for &q in qubits {
                let angle = self.take_slot();
                self.instructions
                    .push(Instruction::single_qubit_gate(gate.with_angle(angle), q));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_qubits_rejected() {
        let err = CircuitTemplate::build(0, 1, &[RotationGate::Ry]).unwrap_err();
        assert!(matches!(err, IrError::InvalidQubitCount(0)));
    }

    #[test]
    fn test_empty_gate_set_rejected() {
        let err = CircuitTemplate::build(2, 1, &[]).unwrap_err();
        assert!(matches!(err, IrError::EmptyGateSet));
    }

    #[test]
    fn test_slot_count_three_qubits() {
        let t = CircuitTemplate::build(3, 4, &[RotationGate::Ry, RotationGate::Rz]).unwrap();
        // 2 * (3 features + 3 pairs) + 3 * 2 * 5 angles
        assert_eq!(t.num_feature_slots(), 12);
        assert_eq!(t.num_trainable(), 30);
        assert_eq!(t.num_slots(), 42);
    }

    #[test]
    fn test_slots_numbered_in_emission_order() {
        let t = CircuitTemplate::build(3, 1, &[RotationGate::Ry]).unwrap();
        let slots: Vec<usize> = t.instructions().iter().filter_map(Instruction::slot).collect();
        let expected: Vec<usize> = (0..t.num_slots()).collect();
        assert_eq!(slots, expected);
    }

    #[test]
    fn test_ring_closure() {
        let count_cz = |n: u32| {
            CircuitTemplate::build(n, 1, &[RotationGate::Ry])
                .unwrap()
                .instructions()
                .iter()
                .filter(|i| i.name() == "cz")
                .count()
        };
        assert_eq!(count_cz(1), 0);
        assert_eq!(count_cz(2), 1);
        assert_eq!(count_cz(3), 3);
        assert_eq!(count_cz(4), 4);
    }

    #[test]
    fn test_pairwise_products_order() {
        let p = pairwise_products(&[0.5, 0.25, 0.0]);
        assert_eq!(p, vec![0.5 * 0.75, 0.5 * 1.0, 0.75 * 1.0]);
    }

    #[test]
    fn test_normalize_turns() {
        assert_eq!(normalize_turns(1.25), 0.25);
        assert_eq!(normalize_turns(-0.25), 0.75);
        assert_eq!(normalize_turns(0.12345), 0.123);
        assert_eq!(normalize_turns(3.0), 0.0);
        assert_eq!(normalize_turns(0.9996), 1.0);
    }

    #[test]
    fn test_feature_length_checked() {
        let t = CircuitTemplate::build(3, 0, &[RotationGate::Ry]).unwrap();
        let err = t.resolve(&[0.1, 0.2], &[0.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            IrError::FeatureCountMismatch {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn test_angle_count_checked() {
        let t = CircuitTemplate::build(2, 1, &[RotationGate::Ry]).unwrap();
        // Passing the bias along with the angles is a layout error.
        let err = t.resolve(&[0.1, 0.2], &[0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            IrError::SlotCountMismatch {
                slots: 10,
                values: 11
            }
        ));
    }

    #[test]
    fn test_resolved_circuit_binds_every_slot() {
        let t = CircuitTemplate::build(3, 2, &[RotationGate::Ry, RotationGate::Rz]).unwrap();
        let c = t
            .resolve(&[0.1, 0.2, 0.3], &vec![0.4; t.num_trainable()])
            .unwrap();
        let unbound = c
            .instructions()
            .iter()
            .filter_map(Instruction::as_gate)
            .filter_map(|g| g.angle())
            .filter(|a| a.is_slot())
            .count();
        assert_eq!(unbound, 0);
        assert_eq!(c.num_gates(), t.instructions().iter().filter(|i| !i.is_measure()).count());
    }

    #[test]
    fn test_non_finite_rejected() {
        let t = CircuitTemplate::build(1, 0, &[RotationGate::Rx]).unwrap();
        let err = t.resolve(&[0.1], &[f64::NAN]).unwrap_err();
        assert!(matches!(err, IrError::NonFiniteValue { slot: 2, .. }));
    }
}
