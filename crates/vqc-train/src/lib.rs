//! SPSA Training for the Variational Quantum Classifier
//!
//! This crate trains a binary classifier whose decision function is a
//! parameterized circuit. The optimizer never sees a gradient: each
//! iteration perturbs all parameters at once and compares the smoothed
//! risk on both sides of the perturbation.
//!
//! # Pipeline
//!
//! ```text
//! Dataset ──→ balanced_split ──→ train set
//!                                   │
//!          ┌────────────────────────┘
//!          ▼
//!   SpsaOptimizer::propose ──→ θ ± c_k·δ
//!          │
//!          ▼  (per sample, concurrently)
//!   CircuitTemplate::resolve ──→ CircuitExecutor::execute ──→ estimate
//!          │
//!          ▼
//!   empirical_risk ──→ SpsaOptimizer::update
//! ```
//!
//! # Components
//!
//! - [`estimate`]: odd-parity share of a histogram
//! - [`empirical_risk`], [`accuracy`]: smoothed risk and decision accuracy
//! - [`SpsaOptimizer`]: gain schedules, perturbations and the update rule
//! - [`balanced_split`]: bounded, class-balanced train/test split
//! - [`RiskObjective`]: one evaluation pass through an executor
//! - [`Trainer`]: ties it together under a [`TrainingConfig`]
//!
//! # Example
//!
//! ```ignore
//! use vqc_adapter_sim::SimulatorExecutor;
//! use vqc_train::{Dataset, Trainer, TrainingConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let data = Dataset::from_csv_path("iris.csv", 3)?;
//!     let mut trainer = Trainer::new(TrainingConfig::default(), SimulatorExecutor::new())?;
//!
//!     let split = trainer.split(&data)?;
//!     let report = trainer.train(&split.train).await?;
//!     println!("final loss: {:?}", report.final_loss());
//!
//!     let test = trainer.evaluate(&split.test).await?;
//!     println!("test accuracy: {:.3}", test.accuracy);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod estimator;
pub mod objective;
pub mod params;
pub mod risk;
pub mod spsa;
pub mod split;
pub mod trainer;

pub use config::{CircuitConfig, ExecutionConfig, FailurePolicy, InitConfig, TrainingConfig};
pub use dataset::{Dataset, Sample};
pub use error::{TrainError, TrainResult};
pub use estimator::{estimate, is_odd_parity};
pub use objective::{Evaluation, RiskObjective};
pub use params::ParameterVector;
pub use risk::{Label, RiskConfig, accuracy, assign_label, empirical_risk, margin, sample_loss};
pub use spsa::{
    Gains, IterationRecord, Proposal, SpsaConfig, SpsaOptimizer, gradient_estimate, rademacher,
};
pub use split::{Split, SplitConfig, SplitStrategy, balanced_split, train_size};
pub use trainer::{Trainer, TrainingReport};
