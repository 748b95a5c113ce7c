//! Simulator executor implementation.

use std::time::Instant;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use vqc_hal::{CircuitExecutor, Counts, HalError, HalResult};
use vqc_ir::CircuitInstance;

use crate::statevector::Statevector;

/// Local statevector executor.
///
/// The state is prepared once per call and `shots` outcomes are drawn from
/// it with a generator seeded by the call's seed, so equal inputs give
/// equal histograms. Supports circuits up to ~20 qubits (limited by memory).
#[derive(Debug, Clone)]
pub struct SimulatorExecutor {
    /// Maximum number of qubits supported.
    max_qubits: u32,
}

impl SimulatorExecutor {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self { max_qubits: 20 }
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self { max_qubits }
    }

    /// Maximum circuit width accepted.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// Run simulation synchronously.
    #[instrument(skip(circuit), fields(qubits = circuit.num_qubits()))]
    fn run_simulation(circuit: &CircuitInstance, shots: u32, seed: u64) -> Counts {
        let start = Instant::now();

        let mut sv = Statevector::new(circuit.num_qubits() as usize);
        for inst in circuit.instructions() {
            sv.apply(inst);
        }

        let cdf = sv.cumulative();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tallies = vec![0u64; cdf.len()];
        for _ in 0..shots {
            tallies[Statevector::sample(&cdf, &mut rng)] += 1;
        }

        let counts: Counts = tallies
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(outcome, &n)| (sv.outcome_to_bitstring(outcome), n))
            .collect();

        if let Some((bits, n)) = counts.most_frequent() {
            debug!(
                "Simulation completed in {:?}; {} outcomes, mode {} ({} shots)",
                start.elapsed(),
                counts.len(),
                bits,
                n
            );
        }
        counts
    }
}

impl Default for SimulatorExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CircuitExecutor for SimulatorExecutor {
    fn name(&self) -> &str {
        "simulator"
    }

    async fn execute(&self, circuit: &CircuitInstance, shots: u32, seed: u64) -> HalResult<Counts> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shot count must be positive".into()));
        }
        if circuit.num_qubits() > self.max_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }

        let circuit = circuit.clone();
        tokio::task::spawn_blocking(move || Self::run_simulation(&circuit, shots, seed))
            .await
            .map_err(|e| HalError::Backend(format!("simulation task failed: {e}")))
    }
}
