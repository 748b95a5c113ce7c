//! Simultaneous Perturbation Stochastic Approximation.
//!
//! Each iteration `k = 1..=K` perturbs every parameter at once along a
//! Rademacher direction `δ`, evaluates the objective on both sides, and
//! steps against the two-point gradient estimate
//!
//! ```text
//!   g = δ · (L(θ + c_k·δ) − L(θ − c_k·δ)) / (2·c_k)
//! ```
//!
//! Rotation angles move by `a_k·g`; the bias moves by the smaller `z_k·g`.
//! The gains decay as `c_k = c / k^γ`, `a_k = a / k^α`, `z_k = z / k^α`.
//! There is no convergence test: the optimizer runs exactly `K` iterations.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::params::ParameterVector;

/// SPSA gain hyperparameters.
///
/// Defaults are Spall's decay exponents with the step sizes used for the
/// classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpsaConfig {
    /// Angle step numerator.
    pub a: f64,
    /// Perturbation size numerator.
    pub c: f64,
    /// Step decay exponent.
    pub alpha: f64,
    /// Perturbation decay exponent.
    pub gamma: f64,
    /// Bias step numerator; `None` means `a / 24`.
    pub z: Option<f64>,
}

impl Default for SpsaConfig {
    fn default() -> Self {
        Self {
            a: 2.5,
            c: 0.1,
            alpha: 0.602,
            gamma: 0.101,
            z: None,
        }
    }
}

impl SpsaConfig {
    /// The bias step numerator in effect.
    pub fn bias_step(&self) -> f64 {
        self.z.unwrap_or(self.a / 24.0)
    }

    /// Gains for iteration `k` (1-based).
    pub fn gains(&self, k: u32) -> Gains {
        let k = f64::from(k.max(1));
        let decay = k.powf(self.alpha);
        Gains {
            c_k: self.c / k.powf(self.gamma),
            a_k: self.a / decay,
            z_k: self.bias_step() / decay,
        }
    }
}

/// Step and perturbation sizes for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gains {
    /// Perturbation size.
    pub c_k: f64,
    /// Angle step size.
    pub a_k: f64,
    /// Bias step size.
    pub z_k: f64,
}

/// Draw a Rademacher vector: each component ±1 with equal probability.
pub fn rademacher<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Vec<f64> {
    (0..dim)
        .map(|_| if rng.r#gen::<bool>() { 1.0 } else { -1.0 })
        .collect()
}

/// Two-point gradient estimate `δ · (loss₊ − loss₋) / (2·c_k)`.
pub fn gradient_estimate(delta: &[f64], loss_plus: f64, loss_minus: f64, c_k: f64) -> Vec<f64> {
    let diff = (loss_plus - loss_minus) / (2.0 * c_k);
    delta.iter().map(|&d| d * diff).collect()
}

/// The two evaluation points of one iteration.
#[derive(Debug, Clone)]
pub struct Proposal {
    /// Iteration number, 1-based.
    pub iteration: u32,
    /// Gains for this iteration.
    pub gains: Gains,
    /// The perturbation direction.
    pub delta: Vec<f64>,
    /// `θ + c_k·δ`.
    pub plus: ParameterVector,
    /// `θ − c_k·δ`.
    pub minus: ParameterVector,
}

/// Outcome of one completed iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Iteration number, 1-based.
    pub iteration: u32,
    /// Perturbation size used.
    pub c_k: f64,
    /// Angle step size used.
    pub a_k: f64,
    /// Bias step size used.
    pub z_k: f64,
    /// Objective at `θ + c_k·δ`.
    pub loss_plus: f64,
    /// Objective at `θ − c_k·δ`.
    pub loss_minus: f64,
    /// Monitoring signal `(loss₊ + loss₋) / 2`.
    pub loss: f64,
}

/// Fixed-budget SPSA driver.
///
/// The optimizer never evaluates the objective itself: [`propose`] hands
/// out the two points to evaluate and [`update`] consumes their losses.
/// Between the two calls the current parameters are read-only.
///
/// [`propose`]: SpsaOptimizer::propose
/// [`update`]: SpsaOptimizer::update
#[derive(Debug, Clone)]
pub struct SpsaOptimizer {
    config: SpsaConfig,
    max_iterations: u32,
    iteration: u32,
}

impl SpsaOptimizer {
    /// Create an optimizer that runs exactly `max_iterations` iterations.
    pub fn new(config: SpsaConfig, max_iterations: u32) -> Self {
        Self {
            config,
            max_iterations,
            iteration: 0,
        }
    }

    /// The gain configuration.
    pub fn config(&self) -> &SpsaConfig {
        &self.config
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// The iteration budget `K`.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Check if the budget is exhausted.
    pub fn is_done(&self) -> bool {
        self.iteration >= self.max_iterations
    }

    /// Draw a perturbation and return the two points to evaluate, or
    /// `None` once `K` iterations have completed.
    pub fn propose<R: Rng + ?Sized>(
        &self,
        theta: &ParameterVector,
        rng: &mut R,
    ) -> Option<Proposal> {
        if self.is_done() {
            return None;
        }
        let iteration = self.iteration + 1;
        let gains = self.config.gains(iteration);
        let delta = rademacher(theta.dim(), rng);
        Some(Proposal {
            iteration,
            gains,
            plus: theta.shifted(&delta, gains.c_k),
            minus: theta.shifted(&delta, -gains.c_k),
            delta,
        })
    }

    /// Apply the update for `proposal` given the losses at its two points.
    pub fn update(
        &mut self,
        theta: &mut ParameterVector,
        proposal: &Proposal,
        loss_plus: f64,
        loss_minus: f64,
    ) -> IterationRecord {
        let Gains { c_k, a_k, z_k } = proposal.gains;
        let g = gradient_estimate(&proposal.delta, loss_plus, loss_minus, c_k);

        let values = theta.values_mut();
        let bias = values.len() - 1;
        for (i, (v, gi)) in values.iter_mut().zip(&g).enumerate() {
            let step = if i == bias { z_k } else { a_k };
            *v -= step * gi;
        }

        self.iteration = proposal.iteration;
        IterationRecord {
            iteration: proposal.iteration,
            c_k,
            a_k,
            z_k,
            loss_plus,
            loss_minus,
            loss: (loss_plus + loss_minus) / 2.0,
        }
    }

    /// Run the remaining iterations against a synchronous objective.
    pub fn minimize<R, F>(
        &mut self,
        theta: &mut ParameterVector,
        rng: &mut R,
        mut objective: F,
    ) -> Vec<IterationRecord>
    where
        R: Rng + ?Sized,
        F: FnMut(&ParameterVector) -> f64,
    {
        let mut records = Vec::with_capacity((self.max_iterations - self.iteration) as usize);
        while let Some(proposal) = self.propose(theta, rng) {
            let loss_plus = objective(&proposal.plus);
            let loss_minus = objective(&proposal.minus);
            records.push(self.update(theta, &proposal, loss_plus, loss_minus));
        }
        records
    }
}
