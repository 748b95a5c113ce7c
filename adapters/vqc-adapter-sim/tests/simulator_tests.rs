//! Integration tests for the statevector executor on classifier circuits.

use vqc_adapter_sim::SimulatorExecutor;
use vqc_hal::{CircuitExecutor, HalError};
use vqc_ir::{CircuitTemplate, RotationGate};

fn template() -> CircuitTemplate {
    CircuitTemplate::build(3, 2, &[RotationGate::Ry, RotationGate::Rz]).unwrap()
}

fn angles(n: usize) -> Vec<f64> {
    (0..n).map(|i| 0.37 * i as f64).collect()
}

#[tokio::test]
async fn test_histogram_holds_all_shots() {
    let t = template();
    let circuit = t.resolve(&[0.1, 0.5, 0.9], &angles(t.num_trainable())).unwrap();

    let counts = SimulatorExecutor::new()
        .execute(&circuit, 1000, 11)
        .await
        .unwrap();
    assert_eq!(counts.total_shots(), 1000);
    for (bits, _) in counts.iter() {
        assert_eq!(bits.len(), 3);
    }
}

#[tokio::test]
async fn test_same_seed_same_counts() {
    let t = template();
    let circuit = t.resolve(&[0.2, 0.4, 0.6], &angles(t.num_trainable())).unwrap();
    let sim = SimulatorExecutor::new();

    let a = sim.execute(&circuit, 500, 99).await.unwrap();
    let b = sim.execute(&circuit, 500, 99).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_different_seeds_vary() {
    let t = template();
    let circuit = t.resolve(&[0.2, 0.4, 0.6], &angles(t.num_trainable())).unwrap();
    let sim = SimulatorExecutor::new();

    let mut histograms = Vec::new();
    for seed in 0..5 {
        histograms.push(sim.execute(&circuit, 500, seed).await.unwrap());
    }
    assert!(histograms.windows(2).any(|w| w[0] != w[1]));
}

#[tokio::test]
async fn test_too_wide_rejected() {
    let t = CircuitTemplate::build(4, 0, &[RotationGate::Ry]).unwrap();
    let circuit = t.resolve(&[0.0; 4], &[0.0; 4]).unwrap();

    let err = SimulatorExecutor::with_max_qubits(3)
        .execute(&circuit, 10, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::CircuitTooLarge(_)));
}

#[tokio::test]
async fn test_zero_shots_rejected() {
    let t = CircuitTemplate::build(1, 0, &[RotationGate::Ry]).unwrap();
    let circuit = t.resolve(&[0.0], &[0.0]).unwrap();

    let err = SimulatorExecutor::new()
        .execute(&circuit, 0, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::InvalidShots(_)));
}

#[tokio::test]
async fn test_zero_features_zero_angles_stay_in_ground_state() {
    // H Rz(0) H Rz(0) Ry(0) is the identity.
    let t = CircuitTemplate::build(1, 0, &[RotationGate::Ry]).unwrap();
    let circuit = t.resolve(&[0.0], &[0.0]).unwrap();

    let counts = SimulatorExecutor::new()
        .execute(&circuit, 200, 5)
        .await
        .unwrap();
    assert_eq!(counts.get("0"), 200);
}

#[tokio::test]
async fn test_half_turn_rotation_flips_qubit() {
    let t = CircuitTemplate::build(1, 0, &[RotationGate::Rx]).unwrap();
    let circuit = t.resolve(&[0.0], &[0.5]).unwrap();

    let counts = SimulatorExecutor::new()
        .execute(&circuit, 200, 5)
        .await
        .unwrap();
    assert_eq!(counts.get("1"), 200);
}
