//! Property-based tests for the balanced splitter.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use vqc_train::{Dataset, Label, Sample, SplitConfig, SplitStrategy, balanced_split, train_size};

/// Dataset whose single feature is the sample index.
fn indexed(labels: &[bool]) -> Dataset {
    let samples = labels
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let label = if pos { Label::Positive } else { Label::Negative };
            Sample::new(vec![i as f64], label)
        })
        .collect();
    Dataset::new(samples).unwrap()
}

proptest! {
    #[test]
    fn split_is_a_partition(
        labels in prop::collection::vec(any::<bool>(), 1..120),
        fraction in 0.1_f64..0.9,
        tolerance in 0.0_f64..0.1,
        seed in any::<u64>(),
    ) {
        let data = indexed(&labels);
        let config = SplitConfig { train_fraction: fraction, tolerance, max_attempts: 50 };
        let mut rng = StdRng::seed_from_u64(seed);
        let split = balanced_split(&data, &config, &mut rng).unwrap();

        prop_assert_eq!(split.train.len() + split.test.len(), data.len());
        prop_assert_eq!(split.train.len(), train_size(data.len(), fraction));

        let mut seen: Vec<usize> = split
            .train
            .samples()
            .iter()
            .chain(split.test.samples())
            .map(|s| s.features[0] as usize)
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..data.len()).collect::<Vec<_>>());

        for s in split.train.samples().iter().chain(split.test.samples()) {
            let idx = s.features[0] as usize;
            prop_assert_eq!(s.label.is_positive(), labels[idx]);
        }

        if split.strategy == SplitStrategy::Shuffled {
            let gap = (split.train.positive_ratio() - data.positive_ratio()).abs();
            prop_assert!(gap <= tolerance);
        }
    }
}
