//! Error types for the benchmark harness.

use qsweep_ir::IrError;
use thiserror::Error;

/// Errors raised by generators, the sweep runner and result sinks.
///
/// Backend failures never appear here: the runner absorbs every
/// [`HalError`](qsweep_hal::HalError) into a sentinel record.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BenchError {
    /// Invalid sweep bounds. Raised before any trial runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A generator could not build a circuit for the given parameters.
    #[error("Generation error: {0}")]
    Generation(String),

    /// The circuit builder rejected an instruction.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// The configuration file could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// The result sink could not serialize or write a row.
    #[error("Sink error: {0}")]
    Sink(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;
