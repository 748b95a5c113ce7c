//! Measurement histograms.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Outcome-count histogram: bitstring → number of shots that produced it.
///
/// Bitstrings not present have an implicit count of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Get the count for a bitstring (zero if absent).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes recorded.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over (bitstring, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Outcomes sorted by count (descending), ties broken by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Check that the histogram holds exactly `shots` shots.
    pub fn verify_total(&self, shots: u32) -> HalResult<()> {
        let got = self.total_shots();
        if got == u64::from(shots) {
            Ok(())
        } else {
            Err(HalError::ShotMismatch {
                expected: shots,
                got,
            })
        }
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bits, n) in iter {
            counts.insert(bits, n);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("11", 1);
        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("00"), 0);
        assert_eq!(counts.total_shots(), 6);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_sorted_and_most_frequent() {
        let counts: Counts = [("00", 10), ("11", 40), ("01", 40)].into_iter().collect();
        let sorted = counts.sorted();
        assert_eq!(sorted[0].0, "01");
        assert_eq!(sorted[1].0, "11");
        assert_eq!(counts.most_frequent().map(|(b, _)| b.as_str()), Some("01"));
    }

    #[test]
    fn test_verify_total() {
        let counts: Counts = [("0", 600), ("1", 400)].into_iter().collect();
        assert!(counts.verify_total(1000).is_ok());
        assert!(matches!(
            counts.verify_total(999),
            Err(HalError::ShotMismatch {
                expected: 999,
                got: 1000
            })
        ));
    }
}
