//! Smoothed empirical risk and decision accuracy.
//!
//! For a sample with label `y ∈ {-1, +1}` and class-1 probability `p`,
//! the misclassification margin is
//!
//! ```text
//!          √R · ( y·(0.5 − p) + 0.5·y·b )
//!   x  =  ────────────────────────────────
//!            √(2·p·(1 − p)) + ε
//! ```
//!
//! and the sample loss is the logistic `1 / (1 + e^(−x))`, a smooth stand-in
//! for the 0/1 loss whose sharpness grows with the scale `R`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TrainError, TrainResult};

/// Binary class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Class 0 in the input data, `-1` internally.
    Negative,
    /// Class 1 in the input data, `+1` internally.
    Positive,
}

impl Label {
    /// Map a `{0, 1}` input label.
    pub fn from_binary(value: i64) -> Option<Self> {
        match value {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }

    /// The signed value, `-1.0` or `+1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Label::Negative => -1.0,
            Label::Positive => 1.0,
        }
    }

    /// Check if this is the positive class.
    pub fn is_positive(self) -> bool {
        self == Label::Positive
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Negative => write!(f, "-1"),
            Label::Positive => write!(f, "+1"),
        }
    }
}

/// Risk surrogate hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Sharpness `R` of the surrogate.
    pub scale: f64,
    /// Guard added to the denominator for `p` near 0 or 1.
    pub epsilon: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            scale: 200.0,
            epsilon: 1e-10,
        }
    }
}

/// Misclassification margin of one sample; positive means wrong side.
pub fn margin(label: Label, probability: f64, bias: f64, config: &RiskConfig) -> f64 {
    let y = label.sign();
    let p = probability;
    let numerator = y * (0.5 - p) + 0.5 * y * bias;
    let denominator = (2.0 * p * (1.0 - p)).sqrt() + config.epsilon;
    config.scale.sqrt() * numerator / denominator
}

/// Logistic loss of one sample, in `[0, 1]`.
pub fn sample_loss(label: Label, probability: f64, bias: f64, config: &RiskConfig) -> f64 {
    1.0 / (1.0 + (-margin(label, probability, bias, config)).exp())
}

/// Predicted label: `+1` iff `p > (1 − p) − b`.
pub fn assign_label(probability: f64, bias: f64) -> Label {
    if probability > (1.0 - probability) - bias {
        Label::Positive
    } else {
        Label::Negative
    }
}

/// Mean sample loss over a batch.
pub fn empirical_risk(
    labels: &[Label],
    probabilities: &[f64],
    bias: f64,
    config: &RiskConfig,
) -> TrainResult<f64> {
    check_batch(labels, probabilities)?;
    let total: f64 = labels
        .iter()
        .zip(probabilities)
        .map(|(&y, &p)| sample_loss(y, p, bias, config))
        .sum();
    Ok(total / labels.len() as f64)
}

/// Fraction of samples whose assigned label equals the true label.
pub fn accuracy(labels: &[Label], probabilities: &[f64], bias: f64) -> TrainResult<f64> {
    check_batch(labels, probabilities)?;
    let correct = labels
        .iter()
        .zip(probabilities)
        .filter(|&(&y, &p)| assign_label(p, bias) == y)
        .count();
    Ok(correct as f64 / labels.len() as f64)
}

fn check_batch(labels: &[Label], probabilities: &[f64]) -> TrainResult<()> {
    if labels.is_empty() {
        return Err(TrainError::Numeric("empty batch".into()));
    }
    if labels.len() != probabilities.len() {
        return Err(TrainError::Numeric(format!(
            "{} labels but {} probabilities",
            labels.len(),
            probabilities.len()
        )));
    }
    Ok(())
}
