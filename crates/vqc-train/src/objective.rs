//! One evaluation pass of the classifier over a dataset.

use futures::stream::{self, StreamExt, TryStreamExt};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vqc_hal::{CircuitExecutor, ExecutionPolicy, execute_with_policy};
use vqc_ir::CircuitTemplate;

use crate::config::{FailurePolicy, TrainingConfig};
use crate::dataset::{Dataset, Sample};
use crate::error::{TrainError, TrainResult};
use crate::estimator::estimate;
use crate::params::ParameterVector;
use crate::risk::{Label, RiskConfig, accuracy, empirical_risk};

/// Loss charged for a penalized sample.
const PENALTY_LOSS: f64 = 1.0;

/// Risk and accuracy of one parameter vector on one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Mean smoothed loss.
    pub risk: f64,
    /// Fraction of correctly assigned labels.
    pub accuracy: f64,
    /// Samples whose execution failed and were penalized.
    pub failures: usize,
}

/// Evaluates the smoothed risk of a frozen parameter vector.
pub struct RiskObjective<'a, E: ?Sized> {
    template: &'a CircuitTemplate,
    executor: &'a E,
    shots: u32,
    risk: &'a RiskConfig,
    policy: ExecutionPolicy,
    failure: FailurePolicy,
    max_concurrency: usize,
}

impl<'a, E: CircuitExecutor + ?Sized> RiskObjective<'a, E> {
    /// Bind a template and executor to the settings in `config`.
    pub fn new(template: &'a CircuitTemplate, executor: &'a E, config: &'a TrainingConfig) -> Self {
        Self {
            template,
            executor,
            shots: config.shots,
            risk: &config.risk,
            policy: config.execution.policy(),
            failure: config.execution.failure,
            max_concurrency: config.execution.max_concurrency.max(1),
        }
    }

    /// Run every sample of `data` through the circuit with `params` and
    /// score the results.
    ///
    /// One seed per sample is drawn from `rng` before any execution starts,
    /// so the outcome does not depend on completion order.
    pub async fn evaluate<R: Rng + ?Sized>(
        &self,
        data: &Dataset,
        params: &ParameterVector,
        rng: &mut R,
    ) -> TrainResult<Evaluation> {
        if data.is_empty() {
            return Err(TrainError::Numeric("cannot evaluate an empty dataset".into()));
        }
        let qubits = self.template.num_qubits() as usize;
        if data.num_features() != Some(qubits) {
            return Err(TrainError::Configuration(format!(
                "dataset has {} features but the circuit has {} qubits",
                data.num_features().unwrap_or(0),
                qubits
            )));
        }
        if params.angles().len() != self.template.num_trainable() {
            return Err(TrainError::Configuration(format!(
                "parameter vector has {} angles, circuit expects {}",
                params.angles().len(),
                self.template.num_trainable()
            )));
        }

        let seeds: Vec<u64> = (0..data.len()).map(|_| rng.r#gen()).collect();
        let angles = params.angles();

        let estimates: Vec<Option<f64>> = stream::iter(data.samples().iter().zip(seeds).enumerate())
            .map(|(idx, (sample, seed))| self.score_sample(idx, sample, angles, seed))
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;

        self.summarize(&data.labels(), &estimates, params.bias())
    }

    async fn score_sample(
        &self,
        idx: usize,
        sample: &Sample,
        angles: &[f64],
        seed: u64,
    ) -> TrainResult<Option<f64>> {
        match self.estimate_sample(sample, angles, seed).await {
            Ok(p) => Ok(Some(p)),
            Err(TrainError::Execution(e)) if self.failure == FailurePolicy::Penalize => {
                warn!("sample {} penalized: {}", idx, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn estimate_sample(&self, sample: &Sample, angles: &[f64], seed: u64) -> TrainResult<f64> {
        let circuit = self.template.resolve(&sample.features, angles)?;
        let counts =
            execute_with_policy(self.executor, &circuit, self.shots, seed, &self.policy).await?;
        estimate(&counts, self.shots)
    }

    /// Combine per-sample estimates; `None` entries count as penalized.
    fn summarize(
        &self,
        labels: &[Label],
        estimates: &[Option<f64>],
        bias: f64,
    ) -> TrainResult<Evaluation> {
        let (scored_labels, scored): (Vec<Label>, Vec<f64>) = labels
            .iter()
            .zip(estimates)
            .filter_map(|(&y, p)| p.map(|p| (y, p)))
            .unzip();
        let failures = labels.len() - scored.len();

        let evaluation = if failures == 0 {
            Evaluation {
                risk: empirical_risk(labels, &scored, bias, self.risk)?,
                accuracy: accuracy(labels, &scored, bias)?,
                failures,
            }
        } else if scored.is_empty() {
            Evaluation {
                risk: PENALTY_LOSS,
                accuracy: 0.0,
                failures,
            }
        } else {
            let n = labels.len() as f64;
            let m = scored.len() as f64;
            Evaluation {
                risk: (empirical_risk(&scored_labels, &scored, bias, self.risk)? * m
                    + PENALTY_LOSS * failures as f64)
                    / n,
                accuracy: accuracy(&scored_labels, &scored, bias)? * m / n,
                failures,
            }
        };

        debug!(
            "evaluated {} samples: risk {:.6}, accuracy {:.4}, {} penalized",
            labels.len(),
            evaluation.risk,
            evaluation.accuracy,
            failures
        );
        Ok(evaluation)
    }
}
