//! The trainable parameter vector.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{TrainError, TrainResult};

/// Rotation angles followed by the scalar decision bias.
///
/// The length is fixed for the lifetime of a training run. The angle
/// prefix feeds the circuit's trainable slots; the bias only enters the
/// risk and the decision rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    values: Vec<f64>,
}

impl ParameterVector {
    /// Create a vector from angles and a bias.
    pub fn new(angles: Vec<f64>, bias: f64) -> Self {
        let mut values = angles;
        values.push(bias);
        Self { values }
    }

    /// Create a vector from raw values; the last element is the bias.
    pub fn from_values(values: Vec<f64>) -> TrainResult<Self> {
        if values.is_empty() {
            return Err(TrainError::Configuration(
                "parameter vector needs at least the bias element".into(),
            ));
        }
        Ok(Self { values })
    }

    /// Draw `num_angles` angles uniformly from `low..high`; the bias starts at zero.
    pub fn random<R: Rng + ?Sized>(num_angles: usize, low: f64, high: f64, rng: &mut R) -> Self {
        let angles = (0..num_angles).map(|_| rng.gen_range(low..high)).collect();
        Self::new(angles, 0.0)
    }

    /// Total length, bias included.
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// All values, bias last.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// The rotation angles (every element but the last).
    pub fn angles(&self) -> &[f64] {
        self.values.split_last().map_or(&[], |(_, angles)| angles)
    }

    /// The decision bias.
    pub fn bias(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// `self + scale · direction`, elementwise.
    pub fn shifted(&self, direction: &[f64], scale: f64) -> Self {
        debug_assert_eq!(direction.len(), self.values.len());
        Self {
            values: self
                .values
                .iter()
                .zip(direction)
                .map(|(&v, &d)| v + scale * d)
                .collect(),
        }
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_layout() {
        let p = ParameterVector::new(vec![0.1, 0.2, 0.3], -0.5);
        assert_eq!(p.dim(), 4);
        assert_eq!(p.angles(), &[0.1, 0.2, 0.3]);
        assert_eq!(p.bias(), -0.5);
    }

    #[test]
    fn test_random_init() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = ParameterVector::random(12, 0.0, 1.0, &mut rng);
        assert_eq!(p.dim(), 13);
        assert!(p.angles().iter().all(|a| (0.0..1.0).contains(a)));
        assert_eq!(p.bias(), 0.0);

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ParameterVector::random(12, 0.0, 1.0, &mut rng), p);
    }

    #[test]
    fn test_shifted() {
        let p = ParameterVector::new(vec![1.0, 2.0], 0.0);
        let q = p.shifted(&[1.0, -1.0, 1.0], 0.5);
        assert_eq!(q.as_slice(), &[1.5, 1.5, 0.5]);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(ParameterVector::from_values(vec![]).is_err());
        let p = ParameterVector::from_values(vec![0.7]).unwrap();
        assert!(p.angles().is_empty());
        assert_eq!(p.bias(), 0.7);
    }
}
