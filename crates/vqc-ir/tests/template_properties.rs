//! Property-based tests for template resolution.
//!
//! Resolution must be a pure function of (template, features, angles): the
//! same inputs give equal instances and byte-identical text.

use proptest::prelude::*;
use vqc_ir::{CircuitTemplate, RotationGate, normalize_turns};

fn arb_gate_set() -> impl Strategy<Value = Vec<RotationGate>> {
    prop::sample::subsequence(vec![RotationGate::Rx, RotationGate::Ry, RotationGate::Rz], 1..=3)
}

/// Template plus a matching feature vector and angle vector.
fn arb_inputs() -> impl Strategy<Value = (CircuitTemplate, Vec<f64>, Vec<f64>)> {
    (1_u32..=4, 0_u32..=3, arb_gate_set()).prop_flat_map(|(n, layers, gates)| {
        let template = CircuitTemplate::build(n, layers, &gates).unwrap();
        let n_angles = template.num_trainable();
        (
            Just(template),
            prop::collection::vec(-10.0_f64..10.0, n as usize),
            prop::collection::vec(-10.0_f64..10.0, n_angles),
        )
    })
}

proptest! {
    #[test]
    fn resolve_is_deterministic((template, features, angles) in arb_inputs()) {
        let a = template.resolve(&features, &angles).unwrap();
        let b = template.resolve(&features, &angles).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.to_text().into_bytes(), b.to_text().into_bytes());
    }

    #[test]
    fn resolved_angles_are_fractional_turns((template, features, angles) in arb_inputs()) {
        let circuit = template.resolve(&features, &angles).unwrap();
        let mut count = 0;
        for turns in circuit.angles() {
            prop_assert!((0.0..=1.0).contains(&turns));
            // Three decimal places survive a round trip through the text form.
            prop_assert!(((turns * 1000.0).round() - turns * 1000.0).abs() < 1e-6);
            count += 1;
        }
        prop_assert_eq!(count, template.num_slots());
    }

    #[test]
    fn trainable_angles_fill_the_tail((template, features, angles) in arb_inputs()) {
        let circuit = template.resolve(&features, &angles).unwrap();
        let resolved: Vec<f64> = circuit.angles().collect();
        let tail = &resolved[template.num_feature_slots()..];
        let expected: Vec<f64> = angles.iter().map(|&v| normalize_turns(v)).collect();
        prop_assert_eq!(tail, expected.as_slice());
    }
}

#[test]
fn text_form_of_single_qubit_circuit() {
    let template = CircuitTemplate::build(1, 1, &[RotationGate::Ry]).unwrap();
    let circuit = template.resolve(&[0.25], &[0.5, 1.125]).unwrap();

    let expected = "\
OPENQASM 2.0;
include \"qelib1.inc\";
qreg q[1];
creg c[1];
h q[0];
rz(0.25) q[0];
h q[0];
rz(0.25) q[0];
ry(0.5) q[0];
ry(0.125) q[0];
measure q[0] -> c[0];
";
    assert_eq!(circuit.to_text(), expected);
}

#[test]
fn text_form_uses_control_target_order() {
    let template = CircuitTemplate::build(2, 1, &[RotationGate::Rz]).unwrap();
    let circuit = template
        .resolve(&[0.5, 0.5], &[0.0, 0.0, 0.0, 0.0])
        .unwrap();
    let text = circuit.to_text();

    // (1 - 0.5) * (1 - 0.5)
    assert!(text.contains("crz(0.25) q[0], q[1];"));
    assert!(text.contains("cz q[0], q[1];"));
    assert_eq!(text.matches("measure").count(), 2);
}
