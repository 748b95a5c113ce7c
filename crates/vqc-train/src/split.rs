//! Class-balanced train/test splitting.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dataset::Dataset;
use crate::error::{TrainError, TrainResult};

/// Splitter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Share of samples placed in the train set, in `(0, 1)`.
    pub train_fraction: f64,
    /// Allowed gap between the train and full positive ratios.
    pub tolerance: f64,
    /// Shuffles tried before falling back to stratified slicing.
    pub max_attempts: u32,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_fraction: 0.8,
            tolerance: 0.02,
            max_attempts: 1000,
        }
    }
}

/// How a split was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// A random shuffle met the tolerance.
    Shuffled,
    /// Deterministic stratified slicing after every shuffle failed.
    Stratified,
}

/// A disjoint train/test partition of a dataset.
#[derive(Debug, Clone)]
pub struct Split {
    /// Training samples.
    pub train: Dataset,
    /// Held-out samples.
    pub test: Dataset,
    /// Shuffles drawn.
    pub attempts: u32,
    /// How the split was produced.
    pub strategy: SplitStrategy,
}

/// Number of training samples for `n` samples: `⌈n · fraction⌉`, at most `n`.
pub fn train_size(n: usize, fraction: f64) -> usize {
    // The small offset keeps products like 10 × 0.7 = 7.000000000000001 at 7.
    let raw = (n as f64 * fraction - 1e-9).ceil();
    (raw.max(0.0) as usize).min(n)
}

/// Split `dataset` so the train positive ratio stays within
/// `config.tolerance` of the overall ratio.
///
/// Samples keep their labels: indices are shuffled, never features and
/// labels separately.
pub fn balanced_split<R: Rng + ?Sized>(
    dataset: &Dataset,
    config: &SplitConfig,
    rng: &mut R,
) -> TrainResult<Split> {
    if dataset.is_empty() {
        return Err(TrainError::Dataset("cannot split an empty dataset".into()));
    }

    let n = dataset.len();
    let n_train = train_size(n, config.train_fraction);
    let target = dataset.positive_ratio();
    let labels = dataset.labels();

    let mut order: Vec<usize> = (0..n).collect();
    for attempt in 1..=config.max_attempts {
        order.shuffle(rng);
        let (train, test) = order.split_at(n_train);
        let positives = train.iter().filter(|&&i| labels[i].is_positive()).count();
        let ratio = if n_train == 0 {
            target
        } else {
            positives as f64 / n_train as f64
        };
        if (ratio - target).abs() <= config.tolerance {
            debug!(
                "split {}/{} accepted after {} shuffles (ratio {:.4}, target {:.4})",
                train.len(),
                test.len(),
                attempt,
                ratio,
                target
            );
            return Ok(Split {
                train: dataset.select(train),
                test: dataset.select(test),
                attempts: attempt,
                strategy: SplitStrategy::Shuffled,
            });
        }
    }

    warn!(
        "no shuffle within tolerance {} after {} attempts; using stratified split",
        config.tolerance, config.max_attempts
    );
    let (train, test) = stratified_indices(dataset, n_train);
    Ok(Split {
        train: dataset.select(&train),
        test: dataset.select(&test),
        attempts: config.max_attempts,
        strategy: SplitStrategy::Stratified,
    })
}

/// Deterministic fallback: take positives and negatives in dataset order so
/// the train slice holds `round(n_train · ratio)` positives where possible.
fn stratified_indices(dataset: &Dataset, n_train: usize) -> (Vec<usize>, Vec<usize>) {
    let (positives, negatives): (Vec<usize>, Vec<usize>) =
        (0..dataset.len()).partition(|&i| dataset.samples()[i].label.is_positive());

    let wanted = (n_train as f64 * dataset.positive_ratio()).round() as usize;
    let take_pos = wanted
        .min(positives.len())
        .max(n_train.saturating_sub(negatives.len()));
    let take_neg = n_train - take_pos;

    let mut train: Vec<usize> = positives[..take_pos]
        .iter()
        .chain(&negatives[..take_neg])
        .copied()
        .collect();
    train.sort_unstable();

    let test = (0..dataset.len())
        .filter(|i| train.binary_search(i).is_err())
        .collect();
    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Sample;
    use crate::risk::Label;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dataset(pos: usize, neg: usize) -> Dataset {
        let samples = (0..pos + neg)
            .map(|i| {
                let label = if i < pos { Label::Positive } else { Label::Negative };
                Sample::new(vec![i as f64], label)
            })
            .collect();
        Dataset::new(samples).unwrap()
    }

    #[test]
    fn test_train_size() {
        assert_eq!(train_size(10, 0.8), 8);
        assert_eq!(train_size(10, 0.7), 7);
        assert_eq!(train_size(11, 0.8), 9);
        assert_eq!(train_size(1, 0.8), 1);
        assert_eq!(train_size(100, 0.5), 50);
    }

    #[test]
    fn test_shuffled_split_within_tolerance() {
        let ds = dataset(40, 60);
        let mut rng = StdRng::seed_from_u64(5);
        let split = balanced_split(&ds, &SplitConfig::default(), &mut rng).unwrap();

        assert_eq!(split.strategy, SplitStrategy::Shuffled);
        assert_eq!(split.train.len(), 80);
        assert_eq!(split.test.len(), 20);
        assert!((split.train.positive_ratio() - 0.4).abs() <= 0.02);
    }

    #[test]
    fn test_labels_travel_with_features() {
        let ds = dataset(30, 20);
        let mut rng = StdRng::seed_from_u64(8);
        let split = balanced_split(&ds, &SplitConfig::default(), &mut rng).unwrap();
        for s in split.train.samples().iter().chain(split.test.samples()) {
            let expected = if (s.features[0] as usize) < 30 {
                Label::Positive
            } else {
                Label::Negative
            };
            assert_eq!(s.label, expected);
        }
    }

    #[test]
    fn test_stratified_fallback() {
        // Zero tolerance on 7 samples with 3 positives cannot be met.
        let ds = dataset(3, 4);
        let config = SplitConfig {
            tolerance: 0.0,
            max_attempts: 20,
            ..SplitConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let split = balanced_split(&ds, &config, &mut rng).unwrap();

        assert_eq!(split.strategy, SplitStrategy::Stratified);
        assert_eq!(split.attempts, 20);
        // ⌈7 · 0.8⌉ = 6 train samples, round(6 · 3/7) = 3 positives
        assert_eq!(split.train.len(), 6);
        assert_eq!(split.train.num_positive(), 3);
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.test.samples()[0].features, vec![6.0]);
    }

    #[test]
    fn test_single_class() {
        let ds = dataset(5, 0);
        let mut rng = StdRng::seed_from_u64(1);
        let split = balanced_split(&ds, &SplitConfig::default(), &mut rng).unwrap();
        assert_eq!(split.attempts, 1);
        assert_eq!(split.train.len() + split.test.len(), 5);
    }

    #[test]
    fn test_empty_dataset() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = balanced_split(&Dataset::default(), &SplitConfig::default(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, TrainError::Dataset(_)));
    }
}
