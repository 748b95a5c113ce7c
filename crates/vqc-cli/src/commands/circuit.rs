//! Circuit command implementation.

use anyhow::{Context, Result};
use console::style;

use vqc_ir::{CircuitTemplate, RotationGate};

/// Execute the circuit command.
pub fn execute(
    qubits: u32,
    layers: u32,
    gates: &str,
    features: &[f64],
    params: Option<&[f64]>,
) -> Result<()> {
    let text = render(qubits, layers, gates, features, params)?;
    print!("{text}");
    Ok(())
}

/// Resolve the template for one feature vector and return its text form.
fn render(
    qubits: u32,
    layers: u32,
    gates: &str,
    features: &[f64],
    params: Option<&[f64]>,
) -> Result<String> {
    let gates = RotationGate::parse_list(gates).context("Invalid gate list")?;
    let template = CircuitTemplate::build(qubits, layers, &gates)?;

    let zeros;
    let angles = match params {
        Some(p) => p,
        None => {
            zeros = vec![0.0; template.num_trainable()];
            &zeros
        }
    };

    let circuit = template.resolve(features, angles)?;
    eprintln!(
        "{} {} qubits, {} layers, {} slots ({} trainable), {} gates",
        style("→").cyan().bold(),
        template.num_qubits(),
        template.layers(),
        template.num_slots(),
        style(template.num_trainable()).yellow(),
        circuit.num_gates()
    );
    Ok(circuit.to_text())
}
