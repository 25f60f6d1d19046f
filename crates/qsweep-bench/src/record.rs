//! Trial records and their CSV layout.

use serde::{Deserialize, Serialize};

/// Value written in place of a time (and measurement) for a failed trial.
pub const SENTINEL: f64 = -999.0;

/// What happened in one trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrialOutcome {
    Completed {
        seconds: f64,
        /// Packed measurement result, qubit `i` at bit `i`.
        measurement: Option<u64>,
    },
    Failed {
        reason: String,
    },
}

/// One row of benchmark output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// `{backend}_{generator}`.
    pub name: String,
    pub num_qubits: u32,
    /// Absent for width-only generators.
    pub depth: Option<u32>,
    pub outcome: TrialOutcome,
}

impl BenchmarkRecord {
    pub fn completed(
        name: impl Into<String>,
        num_qubits: u32,
        depth: Option<u32>,
        seconds: f64,
        measurement: Option<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            depth,
            outcome: TrialOutcome::Completed {
                seconds,
                measurement,
            },
        }
    }

    pub fn failed(
        name: impl Into<String>,
        num_qubits: u32,
        depth: Option<u32>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            depth,
            outcome: TrialOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, TrialOutcome::Failed { .. })
    }

    /// Elapsed seconds, or [`SENTINEL`] for a failed trial.
    pub fn time(&self) -> f64 {
        match self.outcome {
            TrialOutcome::Completed { seconds, .. } => seconds,
            TrialOutcome::Failed { .. } => SENTINEL,
        }
    }
}

/// Column layout of a result file. Fixed for the lifetime of a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RecordSchema {
    pub depth: bool,
    pub measurement: bool,
}

impl RecordSchema {
    pub fn new(depth: bool, measurement: bool) -> Self {
        Self { depth, measurement }
    }

    pub fn header(&self) -> Vec<&'static str> {
        let mut header = vec!["name", "num_qubits"];
        if self.depth {
            header.push("depth");
        }
        header.push("time");
        if self.measurement {
            header.push("measurement");
        }
        header
    }

    pub fn to_row(&self, record: &BenchmarkRecord) -> Vec<String> {
        let mut row = vec![record.name.clone(), record.num_qubits.to_string()];
        if self.depth {
            // Width-only records never reach a depth schema.
            row.push(record.depth.map_or_else(String::new, |d| d.to_string()));
        }
        row.push(record.time().to_string());
        if self.measurement {
            let value = match record.outcome {
                TrialOutcome::Completed {
                    measurement: Some(bits),
                    ..
                } => bits.to_string(),
                _ => SENTINEL.to_string(),
            };
            row.push(value);
        }
        row
    }
}
