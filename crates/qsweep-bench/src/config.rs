//! Sweep configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. Default values
//! 2. A YAML file ([`SweepConfig::from_file`])
//! 3. Environment variables with the `QSWEEP_` prefix
//! 4. Explicit overrides applied by the caller (the CLI flags)
//!
//! ```yaml
//! samples: 10
//! qubits: { start: 4, end: 13 }
//! depths: { range: { min: 1, max: 20 } }
//! output: sycamore.csv
//! single: off
//! convention: parity-start
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{BenchError, BenchResult};
use crate::generator::CircuitGenerator;
use crate::record::RecordSchema;
use crate::topology::CouplingConvention;

/// Widest register whose measurement still packs into a `u64` column.
pub const MAX_MEASURED_WIDTH: u32 = 64;

/// Everything a sweep needs besides the generator and the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Trials per (width, depth) cell.
    #[serde(default = "default_samples")]
    pub samples: u32,

    /// Qubit widths to sweep.
    #[serde(default)]
    pub qubits: QubitRange,

    /// Depths to sweep, written as `{ range: { min, max } }` or `{ list: [..] }`.
    #[serde(default, with = "serde_yaml_ng::with::singleton_map")]
    pub depths: DepthSchedule,

    /// CSV output path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Restrict the sweep to its largest width and/or depth.
    #[serde(default)]
    pub single: SingleMode,

    /// Seed for circuit generation. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Add a `measurement` column holding the packed outcome.
    #[serde(default)]
    pub record_measurement: bool,

    /// Coupling rule for grid generators.
    #[serde(default)]
    pub convention: CouplingConvention,
}

/// Half-open range of qubit widths, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitRange {
    #[serde(default = "default_min_qubits")]
    pub start: u32,
    #[serde(default = "default_qubit_end")]
    pub end: u32,
}

impl QubitRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// `start..=max`.
    pub fn inclusive(start: u32, max: u32) -> Self {
        Self {
            start,
            end: max.saturating_add(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Largest width in the range.
    pub fn max(&self) -> Option<u32> {
        (!self.is_empty()).then(|| self.end - 1)
    }
}

impl Default for QubitRange {
    fn default() -> Self {
        Self {
            start: default_min_qubits(),
            end: default_qubit_end(),
        }
    }
}

/// The depths visited for each width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthSchedule {
    /// Every depth in `min..=max`, narrowed to a generator's sparse set.
    Range { min: u32, max: u32 },
    /// Exactly these depths, in ascending order.
    List(Vec<u32>),
}

impl Default for DepthSchedule {
    fn default() -> Self {
        DepthSchedule::Range { min: 1, max: 20 }
    }
}

/// Which axes single mode collapses to their largest value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleMode {
    #[default]
    Off,
    Width,
    Depth,
    Both,
}

impl SingleMode {
    pub fn single_width(self) -> bool {
        matches!(self, SingleMode::Width | SingleMode::Both)
    }

    pub fn single_depth(self) -> bool {
        matches!(self, SingleMode::Depth | SingleMode::Both)
    }

    pub fn is_on(self) -> bool {
        self != SingleMode::Off
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SingleMode::Off => "off",
            SingleMode::Width => "width",
            SingleMode::Depth => "depth",
            SingleMode::Both => "both",
        }
    }
}

impl fmt::Display for SingleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SingleMode {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" | "false" | "no" => Ok(SingleMode::Off),
            "width" => Ok(SingleMode::Width),
            "depth" => Ok(SingleMode::Depth),
            "both" | "true" | "yes" => Ok(SingleMode::Both),
            other => Err(BenchError::Configuration(format!(
                "unknown single mode '{other}' (expected off, width, depth or both)"
            ))),
        }
    }
}

fn default_samples() -> u32 {
    100
}

fn default_min_qubits() -> u32 {
    4
}

fn default_qubit_end() -> u32 {
    29
}

fn default_output() -> PathBuf {
    PathBuf::from("benchmark_data.csv")
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            qubits: QubitRange::default(),
            depths: DepthSchedule::default(),
            output: default_output(),
            single: SingleMode::Off,
            seed: None,
            record_measurement: false,
            convention: CouplingConvention::default(),
        }
    }
}

impl SweepConfig {
    /// Load a configuration file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> BenchResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: SweepConfig = serde_yaml_ng::from_str(&contents)?;
        Ok(config)
    }

    /// Defaults or `config_file`, then environment overrides.
    ///
    /// Not validated: callers apply their own overrides first.
    pub fn load(config_file: Option<&Path>) -> BenchResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.merge_env())
    }

    /// Apply `QSWEEP_SAMPLES`, `QSWEEP_OUTPUT` and `QSWEEP_SEED` when set.
    /// Unparseable values are logged and ignored.
    pub fn merge_env(mut self) -> Self {
        if let Ok(v) = std::env::var("QSWEEP_SAMPLES") {
            match v.parse() {
                Ok(samples) => self.samples = samples,
                Err(_) => warn!(value = %v, "ignoring invalid QSWEEP_SAMPLES"),
            }
        }
        if let Ok(v) = std::env::var("QSWEEP_OUTPUT") {
            self.output = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("QSWEEP_SEED") {
            match v.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => warn!(value = %v, "ignoring invalid QSWEEP_SEED"),
            }
        }
        self
    }

    /// Reject bounds that cannot produce a meaningful sweep.
    pub fn validate(&self) -> BenchResult<()> {
        if self.samples == 0 {
            return Err(BenchError::Configuration(
                "samples must be greater than 0".to_string(),
            ));
        }
        if self.qubits.start < 1 {
            return Err(BenchError::Configuration(
                "qubit range must start at 1 or more".to_string(),
            ));
        }
        if self.qubits.is_empty() {
            return Err(BenchError::Configuration(format!(
                "qubit range {}..{} is empty",
                self.qubits.start, self.qubits.end
            )));
        }

        match &self.depths {
            DepthSchedule::Range { min, max } => {
                if *min < 1 {
                    return Err(BenchError::Configuration(
                        "minimum depth must be at least 1".to_string(),
                    ));
                }
                if min > max {
                    return Err(BenchError::Configuration(format!(
                        "minimum depth {min} exceeds maximum depth {max}"
                    )));
                }
            }
            DepthSchedule::List(depths) => {
                if depths.is_empty() {
                    return Err(BenchError::Configuration(
                        "depth list must not be empty".to_string(),
                    ));
                }
                if depths.contains(&0) {
                    return Err(BenchError::Configuration(
                        "depth list must not contain 0".to_string(),
                    ));
                }
            }
        }

        if self.record_measurement {
            let widest = self.widths().last().copied().unwrap_or(0);
            if widest > MAX_MEASURED_WIDTH {
                return Err(BenchError::Configuration(format!(
                    "measurement column supports at most {MAX_MEASURED_WIDTH} qubits, sweep reaches {widest}"
                )));
            }
        }

        Ok(())
    }

    /// CSV layout for a sweep of `generator` under this configuration.
    pub fn schema_for(&self, generator: &dyn CircuitGenerator) -> RecordSchema {
        RecordSchema::new(generator.uses_depth(), self.record_measurement)
    }

    /// Widths in sweep order.
    pub fn widths(&self) -> Vec<u32> {
        match self.qubits.max() {
            Some(max) if self.single.single_width() => vec![max],
            _ => (self.qubits.start..self.qubits.end).collect(),
        }
    }

    /// Depth cells in sweep order for `generator`. `None` marks the single
    /// depth-less cell of a width-only generator.
    pub fn depths_for(&self, generator: &dyn CircuitGenerator) -> BenchResult<Vec<Option<u32>>> {
        if !generator.uses_depth() {
            return Ok(vec![None]);
        }

        let mut depths: Vec<u32> = match &self.depths {
            DepthSchedule::List(list) => list.clone(),
            DepthSchedule::Range { min, max } => match generator.sparse_depths() {
                Some(sparse) => sparse
                    .iter()
                    .copied()
                    .filter(|d| (*min..=*max).contains(d))
                    .collect(),
                None => (*min..=*max).collect(),
            },
        };
        depths.sort_unstable();
        depths.dedup();

        if self.single.single_depth() {
            depths = depths.last().copied().into_iter().collect();
        }
        if depths.is_empty() {
            return Err(BenchError::Configuration(format!(
                "no depths selected for generator '{}'",
                generator.name()
            )));
        }
        Ok(depths.into_iter().map(Some).collect())
    }
}
