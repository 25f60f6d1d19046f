//! Execution results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Computational-basis outcome of a full-register measurement.
///
/// Bit `i` is the result of measuring qubit `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    bits: Vec<bool>,
}

impl MeasurementOutcome {
    /// Create an outcome from per-qubit results.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create an outcome from a basis-state index over `num_qubits` qubits.
    pub fn from_index(index: usize, num_qubits: u32) -> Self {
        let bits = (0..num_qubits)
            .map(|q| q < usize::BITS && (index >> q) & 1 == 1)
            .collect();
        Self { bits }
    }

    /// Per-qubit results.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of measured qubits.
    pub fn num_qubits(&self) -> usize {
        self.bits.len()
    }

    /// Pack the outcome into an integer, qubit `i` at bit `i`.
    ///
    /// Returns `None` for registers wider than 64 qubits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.bits.len() > 64 {
            return None;
        }
        Some(
            self.bits
                .iter()
                .enumerate()
                .filter(|(_, b)| **b)
                .fold(0u64, |acc, (i, _)| acc | (1u64 << i)),
        )
    }
}

impl fmt::Display for MeasurementOutcome {
    /// Bitstring with qubit 0 leftmost.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Result of executing one circuit on a backend handle.
#[derive(Debug, Clone)]
pub struct Execution {
    /// Wall-clock time spent applying gates and measuring.
    pub elapsed: Duration,
    /// Outcome of the terminal measurement, if the circuit measured.
    pub outcome: Option<MeasurementOutcome>,
}

impl Execution {
    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}
