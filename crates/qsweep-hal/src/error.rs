//! Error types for the HAL crate.

use thiserror::Error;

/// Failures raised by a backend adapter.
///
/// Every variant is a backend failure from the harness's point of view: it is
/// caught per trial, recorded as a sentinel row and followed by recycling the
/// backend handle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The backend could not allocate a register.
    #[error("Allocation failed: {0}")]
    AllocationFailed(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// The circuit addresses qubits the handle does not have.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// Gate execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Measurement failed.
    #[error("Measurement failed: {0}")]
    MeasurementFailed(String),

    /// Backend-side time limit exceeded.
    #[error("Timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// Unsupported gate or feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
