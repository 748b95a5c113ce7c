//! Labeled datasets and CSV loading.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use crate::error::{TrainError, TrainResult};
use crate::risk::Label;

/// One labeled feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Feature values, one per qubit.
    pub features: Vec<f64>,
    /// Class label.
    pub label: Label,
}

impl Sample {
    /// Create a sample.
    pub fn new(features: Vec<f64>, label: Label) -> Self {
        Self { features, label }
    }
}

/// Ordered, immutable collection of samples sharing one feature width.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Create a dataset, checking that every sample has the same width.
    pub fn new(samples: Vec<Sample>) -> TrainResult<Self> {
        if let Some(first) = samples.first() {
            let width = first.features.len();
            if let Some((row, s)) = samples
                .iter()
                .enumerate()
                .find(|(_, s)| s.features.len() != width)
            {
                return Err(TrainError::Dataset(format!(
                    "sample {} has {} features, expected {}",
                    row + 1,
                    s.features.len(),
                    width
                )));
            }
        }
        Ok(Self { samples })
    }

    /// Load a CSV file with a header row.
    ///
    /// The first `variables` columns are features, the next one the
    /// `{0, 1}` label. Further columns are ignored.
    pub fn from_csv_path(path: impl AsRef<Path>, variables: usize) -> TrainResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file, variables)
    }

    /// Load CSV data from any reader; see [`Dataset::from_csv_path`].
    pub fn from_reader<R: Read>(reader: R, variables: usize) -> TrainResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut samples = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            samples.push(parse_row(&record?, idx + 1, variables)?);
        }
        Self::new(samples)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Feature width, or `None` for an empty dataset.
    pub fn num_features(&self) -> Option<usize> {
        self.samples.first().map(|s| s.features.len())
    }

    /// The samples in order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Labels in sample order.
    pub fn labels(&self) -> Vec<Label> {
        self.samples.iter().map(|s| s.label).collect()
    }

    /// Number of positive samples.
    pub fn num_positive(&self) -> usize {
        self.samples.iter().filter(|s| s.label.is_positive()).count()
    }

    /// Fraction of positive samples; zero for an empty dataset.
    pub fn positive_ratio(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.num_positive() as f64 / self.samples.len() as f64
        }
    }

    /// A new dataset with the samples at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            samples: indices.iter().map(|&i| self.samples[i].clone()).collect(),
        }
    }
}

fn parse_row(record: &StringRecord, row: usize, variables: usize) -> TrainResult<Sample> {
    let field = |col: usize| {
        record.get(col).ok_or_else(|| {
            TrainError::Dataset(format!(
                "row {row}: expected {} columns, found {}",
                variables + 1,
                record.len()
            ))
        })
    };
    let number = |col: usize| -> TrainResult<f64> {
        let text = field(col)?;
        text.parse::<f64>().map_err(|_| {
            TrainError::Dataset(format!("row {row}, column {}: invalid number '{text}'", col + 1))
        })
    };

    let features = (0..variables).map(&number).collect::<TrainResult<Vec<_>>>()?;
    let raw = number(variables)?;
    let label = Some(raw)
        .filter(|r| r.fract() == 0.0)
        .and_then(|r| Label::from_binary(r as i64))
        .ok_or_else(|| {
            TrainError::Dataset(format!("row {row}: label must be 0 or 1, got {raw}"))
        })?;
    Ok(Sample::new(features, label))
}
