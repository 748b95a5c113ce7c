//! The training loop.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use vqc_hal::CircuitExecutor;
use vqc_ir::CircuitTemplate;

use crate::config::TrainingConfig;
use crate::dataset::Dataset;
use crate::error::TrainResult;
use crate::objective::{Evaluation, RiskObjective};
use crate::params::ParameterVector;
use crate::spsa::{IterationRecord, SpsaOptimizer};
use crate::split::{Split, balanced_split};

/// Summary of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Configuration the run used.
    pub config: TrainingConfig,
    /// One record per completed iteration.
    pub iterations: Vec<IterationRecord>,
    /// Parameters after the last iteration.
    pub parameters: ParameterVector,
    /// Wall-clock start.
    pub started_at: DateTime<Utc>,
    /// Wall-clock end.
    pub finished_at: DateTime<Utc>,
    /// Elapsed seconds.
    pub elapsed_secs: f64,
}

impl TrainingReport {
    /// The monitoring signal of the last iteration.
    pub fn final_loss(&self) -> Option<f64> {
        self.iterations.last().map(|r| r.loss)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> TrainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON form to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> TrainResult<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

/// Trains a classifier against one executor.
///
/// All randomness (initial angles, splits, perturbations and executor
/// seeds) is drawn from one generator seeded from the configuration.
pub struct Trainer<E> {
    config: TrainingConfig,
    template: CircuitTemplate,
    executor: E,
    rng: StdRng,
    params: ParameterVector,
    optimizer: SpsaOptimizer,
}

impl<E: CircuitExecutor> Trainer<E> {
    /// Validate `config`, build the circuit template and draw the initial
    /// parameters.
    pub fn new(config: TrainingConfig, executor: E) -> TrainResult<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, executor, rng)
    }

    /// Like [`Trainer::new`] with an explicit random source.
    pub fn with_rng(config: TrainingConfig, executor: E, mut rng: StdRng) -> TrainResult<Self> {
        config.validate()?;
        let template = CircuitTemplate::build(
            config.circuit.qubits,
            config.circuit.layers,
            &config.circuit.gates,
        )?;
        let params = ParameterVector::random(
            template.num_trainable(),
            config.init.low,
            config.init.high,
            &mut rng,
        );
        let optimizer = SpsaOptimizer::new(config.spsa.clone(), config.iterations);

        debug!(
            "template: {} qubits, {} layers, {} slots, {} trainable angles",
            template.num_qubits(),
            template.layers(),
            template.num_slots(),
            template.num_trainable()
        );

        Ok(Self {
            config,
            template,
            executor,
            rng,
            params,
            optimizer,
        })
    }

    /// The run configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// The circuit template.
    pub fn template(&self) -> &CircuitTemplate {
        &self.template
    }

    /// Current parameters.
    pub fn parameters(&self) -> &ParameterVector {
        &self.params
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> u32 {
        self.optimizer.iteration()
    }

    /// Split `data` into balanced train and test sets using the run's
    /// random source.
    pub fn split(&mut self, data: &Dataset) -> TrainResult<Split> {
        balanced_split(data, &self.config.split, &mut self.rng)
    }

    /// Run one SPSA iteration on `train`.
    ///
    /// Returns `None` once the iteration budget is spent.
    pub async fn step(&mut self, train: &Dataset) -> TrainResult<Option<IterationRecord>> {
        let Some(proposal) = self.optimizer.propose(&self.params, &mut self.rng) else {
            return Ok(None);
        };

        let objective = RiskObjective::new(&self.template, &self.executor, &self.config);
        let plus = objective
            .evaluate(train, &proposal.plus, &mut self.rng)
            .await?;
        let minus = objective
            .evaluate(train, &proposal.minus, &mut self.rng)
            .await?;

        let record = self
            .optimizer
            .update(&mut self.params, &proposal, plus.risk, minus.risk);
        info!(
            "iteration {}/{}: c_k={:.5} a_k={:.5} z_k={:.5} loss={:.6}",
            record.iteration,
            self.optimizer.max_iterations(),
            record.c_k,
            record.a_k,
            record.z_k,
            record.loss
        );
        Ok(Some(record))
    }

    /// Run all remaining iterations.
    pub async fn train(&mut self, train: &Dataset) -> TrainResult<TrainingReport> {
        self.train_with(train, |_| {}).await
    }

    /// Run all remaining iterations, calling `on_iteration` after each.
    #[instrument(skip_all, fields(samples = train.len()))]
    pub async fn train_with<F>(
        &mut self,
        train: &Dataset,
        mut on_iteration: F,
    ) -> TrainResult<TrainingReport>
    where
        F: FnMut(&IterationRecord),
    {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut iterations = Vec::new();
        while let Some(record) = self.step(train).await? {
            on_iteration(&record);
            iterations.push(record);
        }

        Ok(TrainingReport {
            config: self.config.clone(),
            iterations,
            parameters: self.params.clone(),
            started_at,
            finished_at: Utc::now(),
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }

    /// Risk and accuracy of the current, unperturbed parameters on `data`.
    pub async fn evaluate(&mut self, data: &Dataset) -> TrainResult<Evaluation> {
        RiskObjective::new(&self.template, &self.executor, &self.config)
            .evaluate(data, &self.params, &mut self.rng)
            .await
    }
}
