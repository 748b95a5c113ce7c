//! Training configuration.
//!
//! Every setting has a default, so a YAML file only needs the keys it
//! changes:
//!
//! ```yaml
//! seed: 8092
//! iterations: 50
//! circuit: { qubits: 3, layers: 4, gates: [ry, rz] }
//! execution: { failure: penalize, timeout_secs: 30 }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use vqc_hal::ExecutionPolicy;
use vqc_ir::RotationGate;

use crate::error::{TrainError, TrainResult};
use crate::risk::RiskConfig;
use crate::spsa::SpsaConfig;
use crate::split::SplitConfig;

/// Complete configuration of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Seed of the single random source.
    pub seed: u64,
    /// Shots per circuit execution.
    pub shots: u32,
    /// SPSA iteration budget.
    pub iterations: u32,
    /// Circuit structure.
    pub circuit: CircuitConfig,
    /// SPSA gains.
    pub spsa: SpsaConfig,
    /// Risk surrogate.
    pub risk: RiskConfig,
    /// Initial angle range.
    pub init: InitConfig,
    /// Train/test splitting.
    pub split: SplitConfig,
    /// Executor call handling.
    pub execution: ExecutionConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: 8092,
            shots: 1000,
            iterations: 50,
            circuit: CircuitConfig::default(),
            spsa: SpsaConfig::default(),
            risk: RiskConfig::default(),
            init: InitConfig::default(),
            split: SplitConfig::default(),
            execution: ExecutionConfig::default(),
        }
    }
}

/// Structural circuit parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    /// Number of qubits, equal to the number of features.
    pub qubits: u32,
    /// Number of entangling layers.
    pub layers: u32,
    /// Trainable rotation set.
    pub gates: Vec<RotationGate>,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            qubits: 3,
            layers: 4,
            gates: vec![RotationGate::Ry, RotationGate::Rz],
        }
    }
}

/// Uniform range for the initial rotation angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    /// Inclusive lower bound.
    pub low: f64,
    /// Exclusive upper bound.
    pub high: f64,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self { low: 0.0, high: 1.0 }
    }
}

/// What to do with a sample whose execution failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Abort the training run.
    #[default]
    Abort,
    /// Score the sample as a maximal loss and a misclassification.
    Penalize,
}

/// Executor call handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Per-call timeout in seconds; `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Retries after a failed call.
    pub retries: u32,
    /// First retry delay in milliseconds, doubled per retry.
    pub backoff_ms: u64,
    /// Failure handling once retries are exhausted.
    pub failure: FailurePolicy,
    /// Per-sample executions in flight at once.
    pub max_concurrency: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(60),
            retries: 0,
            backoff_ms: 100,
            failure: FailurePolicy::Abort,
            max_concurrency: 8,
        }
    }
}

impl ExecutionConfig {
    /// The timeout/retry policy for individual executor calls.
    pub fn policy(&self) -> ExecutionPolicy {
        ExecutionPolicy::fail_fast()
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
            .with_retries(self.retries, Duration::from_millis(self.backoff_ms))
    }
}

impl TrainingConfig {
    /// Parse a YAML document; missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> TrainResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> TrainResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> TrainResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check every setting; the first violation is reported.
    pub fn validate(&self) -> TrainResult<()> {
        let fail = |msg: String| Err(TrainError::Configuration(msg));

        if self.circuit.qubits < 1 {
            return fail("circuit.qubits must be at least 1".into());
        }
        if self.circuit.gates.is_empty() {
            return fail("circuit.gates must name at least one rotation".into());
        }
        if self.shots == 0 {
            return fail("shots must be positive".into());
        }
        if self.iterations == 0 {
            return fail("iterations must be positive".into());
        }
        for (name, value) in [
            ("spsa.a", self.spsa.a),
            ("spsa.c", self.spsa.c),
            ("spsa.z", self.spsa.bias_step()),
            ("spsa.alpha", self.spsa.alpha),
            ("spsa.gamma", self.spsa.gamma),
            ("risk.scale", self.risk.scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return fail(format!("{name} must be positive, got {value}"));
            }
        }
        if !(self.risk.epsilon.is_finite() && self.risk.epsilon >= 0.0) {
            return fail(format!("risk.epsilon must be non-negative, got {}", self.risk.epsilon));
        }
        if !(self.split.train_fraction > 0.0 && self.split.train_fraction < 1.0) {
            return fail(format!(
                "split.train_fraction must lie in (0, 1), got {}",
                self.split.train_fraction
            ));
        }
        if !(self.split.tolerance >= 0.0) {
            return fail(format!(
                "split.tolerance must be non-negative, got {}",
                self.split.tolerance
            ));
        }
        if self.split.max_attempts == 0 {
            return fail("split.max_attempts must be positive".into());
        }
        if !(self.init.low.is_finite()
            && self.init.high.is_finite()
            && (self.init.high - self.init.low).is_finite())
        {
            return fail(format!(
                "init range [{}, {}) must be finite",
                self.init.low, self.init.high
            ));
        }
        if !(self.init.low < self.init.high) {
            return fail(format!(
                "init.low ({}) must be below init.high ({})",
                self.init.low, self.init.high
            ));
        }
        if self.execution.max_concurrency == 0 {
            return fail("execution.max_concurrency must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = TrainingConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.spsa.bias_step(), 2.5 / 24.0);
    }

    #[test]
    fn test_partial_yaml() {
        let cfg = TrainingConfig::from_yaml_str(
            "
iterations: 12
circuit:
  qubits: 2
  gates: [rx]
execution:
  failure: penalize
  timeout_secs: null
",
        )
        .unwrap();
        assert_eq!(cfg.iterations, 12);
        assert_eq!(cfg.circuit.qubits, 2);
        assert_eq!(cfg.circuit.layers, 4);
        assert_eq!(cfg.circuit.gates, vec![RotationGate::Rx]);
        assert_eq!(cfg.execution.failure, FailurePolicy::Penalize);
        assert_eq!(cfg.execution.timeout_secs, None);
        assert_eq!(cfg.execution.retries, 0);
        assert_eq!(cfg.shots, 1000);
    }

    #[test]
    fn test_yaml_round_trip() {
        let cfg = TrainingConfig::default();
        let back = TrainingConfig::from_yaml_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_unknown_gate_rejected() {
        let err = TrainingConfig::from_yaml_str("circuit: { gates: [cx] }").unwrap_err();
        assert!(matches!(err, TrainError::Yaml(_)));
    }

    #[test]
    fn test_policy() {
        let exec = ExecutionConfig {
            timeout_secs: Some(5),
            retries: 2,
            backoff_ms: 250,
            ..ExecutionConfig::default()
        };
        let policy = exec.policy();
        assert_eq!(policy.timeout, Some(Duration::from_secs(5)));
        assert_eq!(policy.retries, 2);
        assert_eq!(policy.backoff, Duration::from_millis(250));
    }

    #[test]
    fn test_validation_rules() {
        let check = |edit: fn(&mut TrainingConfig)| {
            let mut cfg = TrainingConfig::default();
            edit(&mut cfg);
            matches!(cfg.validate(), Err(TrainError::Configuration(_)))
        };
        assert!(check(|c| c.circuit.qubits = 0));
        assert!(check(|c| c.circuit.gates.clear()));
        assert!(check(|c| c.shots = 0));
        assert!(check(|c| c.iterations = 0));
        assert!(check(|c| c.spsa.a = 0.0));
        assert!(check(|c| c.spsa.c = -0.1));
        assert!(check(|c| c.spsa.z = Some(0.0)));
        assert!(check(|c| c.risk.scale = f64::NAN));
        assert!(check(|c| c.split.train_fraction = 1.0));
        assert!(check(|c| c.split.tolerance = -0.01));
        assert!(check(|c| c.split.max_attempts = 0));
        assert!(check(|c| c.init.low = 2.0));
        assert!(check(|c| c.init.high = f64::INFINITY));
        assert!(check(|c| c.init.low = f64::NAN));
        assert!(check(|c| {
            c.init.low = -1e308;
            c.init.high = 1e308;
        }));
        assert!(check(|c| c.spsa.alpha = -0.5));
        assert!(check(|c| c.spsa.gamma = 0.0));
        assert!(check(|c| c.spsa.alpha = f64::INFINITY));
        assert!(check(|c| c.execution.max_concurrency = 0));
    }
}
