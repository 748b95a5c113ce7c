//! Parser for the engine's histogram output.
//!
//! The engine prints one line per outcome, exactly `<bitstring>: <count>`,
//! and terminates at end of stream. Every bitstring has one character per
//! qubit. Zero-count lines are permitted; blank lines are skipped.

use crate::error::{HalError, HalResult};
use crate::result::Counts;

/// Parse engine output for a `num_qubits`-wide circuit into a histogram
/// and check it holds `shots` shots.
pub fn parse_counts(output: &str, shots: u32, num_qubits: u32) -> HalResult<Counts> {
    let width = num_qubits as usize;
    let mut counts = Counts::new();

    for (idx, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let malformed = |reason: String| HalError::MalformedOutput {
            line: idx + 1,
            reason,
        };

        let (bits, count) = line
            .split_once(": ")
            .ok_or_else(|| malformed(format!("expected '<bitstring>: <count>', got '{line}'")))?;

        if bits.is_empty() || !bits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(malformed(format!("invalid bitstring '{bits}'")));
        }
        if bits.len() != width {
            return Err(malformed(format!(
                "bitstring '{bits}' has width {}, circuit has {width} qubits",
                bits.len()
            )));
        }
        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(format!("invalid count '{count}'")));
        }
        let n: u64 = count
            .parse()
            .map_err(|_| malformed(format!("count '{count}' out of range")))?;
        counts.insert(bits, n);
    }

    counts.verify_total(shots)?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine_output() {
        let out = "000: 120\n001: 0\n010: 380\n111: 500\n";
        let counts = parse_counts(out, 1000, 3).unwrap();
        assert_eq!(counts.get("010"), 380);
        assert_eq!(counts.get("001"), 0);
        assert_eq!(counts.total_shots(), 1000);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let counts = parse_counts("\n0: 4\n\n1: 6\n\n", 10, 1).unwrap();
        assert_eq!(counts.get("1"), 6);
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_counts("00 12\n", 12, 2).unwrap_err();
        assert!(matches!(err, HalError::MalformedOutput { line: 1, .. }));
    }

    #[test]
    fn test_padding_rejected() {
        for out in [" 01: 5\n", "01 : 5\n", "01:5\n", "01:  5\n", "01: 5 \n"] {
            let err = parse_counts(out, 5, 2).unwrap_err();
            assert!(
                matches!(err, HalError::MalformedOutput { line: 1, .. }),
                "accepted {out:?}"
            );
        }
    }

    #[test]
    fn test_bad_bitstring() {
        let err = parse_counts("00: 6\n0_: 6\n", 12, 2).unwrap_err();
        assert!(matches!(err, HalError::MalformedOutput { line: 2, .. }));
    }

    #[test]
    fn test_bad_count() {
        for out in ["00: -3\n", "00: +3\n", "00: 3x\n", "00: \n"] {
            let err = parse_counts(out, 3, 2).unwrap_err();
            assert!(matches!(err, HalError::MalformedOutput { line: 1, .. }));
        }
    }

    #[test]
    fn test_width_must_match_qubits() {
        let err = parse_counts("00: 1\n1: 1\n", 2, 2).unwrap_err();
        assert!(matches!(err, HalError::MalformedOutput { line: 2, .. }));

        let err = parse_counts("0: 1000\n", 1000, 3).unwrap_err();
        assert!(matches!(err, HalError::MalformedOutput { line: 1, .. }));
    }

    #[test]
    fn test_total_must_match_shots() {
        let err = parse_counts("0: 10\n1: 10\n", 25, 1).unwrap_err();
        assert!(matches!(
            err,
            HalError::ShotMismatch {
                expected: 25,
                got: 20
            }
        ));
    }
}
