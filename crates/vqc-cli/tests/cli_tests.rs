//! End-to-end tests that run the `vqc` binary.

use std::process::{Command, Output};

fn vqc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vqc"))
        .args(args)
        .output()
        .expect("failed to run vqc")
}

#[test]
fn test_version() {
    let out = vqc(&["version"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    assert!(stdout.contains("vqc-train"));
}

#[test]
fn test_circuit_prints_qasm() {
    let out = vqc(&[
        "circuit", "--qubits", "2", "--layers", "1", "--gates", "ry,rz", "--features", "0.25,0.5",
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("OPENQASM 2.0;"));
    assert!(stdout.contains("qreg q[2];"));
}

#[test]
fn test_circuit_wrong_feature_count_fails() {
    let out = vqc(&["circuit", "--qubits", "3", "--features", "0.1,0.2"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
}

#[test]
fn test_train_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.csv");
    let mut csv = String::from("a,b,label\n");
    for i in 0..12 {
        let x = f64::from(i) / 12.0;
        csv.push_str(&format!("{x},{},{}\n", 1.0 - x, u8::from(x >= 0.5)));
    }
    std::fs::write(&data, csv).unwrap();
    let config = dir.path().join("run.yaml");
    std::fs::write(&config, "shots: 40\ncircuit:\n  qubits: 2\n  layers: 1\n").unwrap();
    let report = dir.path().join("report.json");

    let out = vqc(&[
        "train",
        "--data",
        data.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--iterations",
        "2",
        "--report",
        report.to_str().unwrap(),
    ]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Test accuracy"));
    assert!(report.exists());
}
