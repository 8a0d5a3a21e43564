//! Determinism verification.
//!
//! Runs a generator several times and checks that every run produces the
//! same bytes, reporting the first differing offset otherwise.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the first run's output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// If non-deterministic, the first difference found.
    pub diff_info: Option<DiffInfo>,
}

/// The first byte difference found between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Byte offset of the difference.
    pub offset: usize,
    /// Byte from the first run, `None` past its end.
    pub expected: Option<u8>,
    /// Byte from the differing run, `None` past its end.
    pub actual: Option<u8>,
    /// Which run (0-indexed) differed.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |b: Option<u8>| b.map_or_else(|| "EOF".to_string(), |b| format!("0x{:02X}", b));
        write!(
            f,
            "Difference at byte {}: expected {}, got {} (run {})",
            self.offset,
            show(self.expected),
            show(self.actual),
            self.run_index
        )
    }
}

impl DeterminismResult {
    /// Panics with the diff when the output was not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!("non-deterministic output over {} runs: {}", self.runs, diff);
        }
    }
}

/// Runs `generate` `runs` times (at least 2) and compares the outputs.
pub fn verify_determinism<F, T>(mut generate: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> T,
    T: AsRef<[u8]>,
{
    let runs = runs.max(2);
    let first = generate().as_ref().to_vec();
    let hash = blake3::hash(&first).to_hex().to_string();

    for run_index in 1..runs {
        let output = generate();
        if let Some(offset) = find_first_difference(&first, output.as_ref()) {
            return DeterminismResult {
                is_deterministic: false,
                runs: run_index + 1,
                output_size: first.len(),
                hash,
                diff_info: Some(DiffInfo {
                    offset,
                    expected: first.get(offset).copied(),
                    actual: output.as_ref().get(offset).copied(),
                    run_index,
                }),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_size: first.len(),
        hash,
        diff_info: None,
    }
}

/// Offset of the first differing byte, including a length mismatch.
pub fn find_first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_runs_are_deterministic() {
        let result = verify_determinism(|| vec![1u8, 2, 3], 3);
        assert!(result.is_deterministic);
        assert_eq!(result.runs, 3);
        assert_eq!(result.output_size, 3);
        assert_eq!(result.hash, blake3::hash(&[1, 2, 3]).to_hex().to_string());
    }

    #[test]
    fn test_changing_output_is_reported() {
        let mut counter = 0u8;
        let result = verify_determinism(
            || {
                counter += 1;
                vec![0u8, counter]
            },
            3,
        );
        assert!(!result.is_deterministic);
        let diff = result.diff_info.unwrap();
        assert_eq!(diff.offset, 1);
        assert_eq!(diff.expected, Some(1));
        assert_eq!(diff.actual, Some(2));
    }

    #[test]
    fn test_length_mismatch_is_a_difference() {
        assert_eq!(find_first_difference(b"abc", b"ab"), Some(2));
        assert_eq!(find_first_difference(b"abc", b"abc"), None);
    }
}
