//! Class-1 probability from a measurement histogram.

use vqc_hal::Counts;

use crate::error::{TrainError, TrainResult};

/// Check if a bitstring has an odd number of set bits.
pub fn is_odd_parity(bitstring: &str) -> bool {
    bitstring.bytes().filter(|&b| b == b'1').count() % 2 == 1
}

/// Fraction of `shots` that landed on odd-parity outcomes.
///
/// Outcomes absent from the histogram count as zero.
pub fn estimate(counts: &Counts, shots: u32) -> TrainResult<f64> {
    if shots == 0 {
        return Err(TrainError::Numeric(
            "cannot estimate a probability from zero shots".into(),
        ));
    }
    let odd: u64 = counts
        .iter()
        .filter(|(bits, _)| is_odd_parity(bits))
        .map(|(_, n)| n)
        .sum();
    Ok(odd as f64 / f64::from(shots))
}
