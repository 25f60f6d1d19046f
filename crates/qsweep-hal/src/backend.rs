//! The backend trait.
//!
//! ## Method table
//!
//! | Method | Required | Returns |
//! |--------|----------|---------|
//! | `name()` | yes | `&str` |
//! | `allocate()` | yes | `HalResult<Handle>` |
//! | `width()` | yes | `u32` |
//! | `reset()` | yes | `HalResult<()>` |
//! | `apply_single_qubit_gate()` | yes | `HalResult<()>` |
//! | `apply_multi_qubit_gate()` | yes | `HalResult<()>` |
//! | `measure_all()` | yes | `HalResult<MeasurementOutcome>` |
//! | `dispose()` | yes | `()` |
//! | `execute()` | provided | `HalResult<Execution>` |
//!
//! Everything is synchronous. A handle is exclusively owned by the caller
//! between `allocate` and `dispose`; `dispose` consumes it so a disposed
//! handle cannot be reused.

use std::time::Instant;

use qsweep_ir::{Circuit, Instruction, MultiQubitGate, QubitId, SingleQubitGate};
use tracing::trace;

use crate::error::{HalError, HalResult};
use crate::result::{Execution, MeasurementOutcome};

/// A simulation engine that can be driven gate by gate.
pub trait Backend {
    /// A register of qubits owned by the caller.
    type Handle;

    /// Get the backend name.
    fn name(&self) -> &str;

    /// Allocate a fresh register of `num_qubits` qubits in |0...0>.
    fn allocate(&mut self, num_qubits: u32) -> HalResult<Self::Handle>;

    /// Number of qubits held by `handle`.
    fn width(&self, handle: &Self::Handle) -> u32;

    /// Return `handle` to |0...0> without reallocating.
    fn reset(&mut self, handle: &mut Self::Handle) -> HalResult<()>;

    /// Apply a one-qubit gate.
    fn apply_single_qubit_gate(
        &mut self,
        handle: &mut Self::Handle,
        qubit: QubitId,
        gate: SingleQubitGate,
    ) -> HalResult<()>;

    /// Apply a two- or three-qubit gate. Controls precede the target.
    fn apply_multi_qubit_gate(
        &mut self,
        handle: &mut Self::Handle,
        qubits: &[QubitId],
        gate: MultiQubitGate,
    ) -> HalResult<()>;

    /// Measure every qubit in the computational basis.
    fn measure_all(&mut self, handle: &mut Self::Handle) -> HalResult<MeasurementOutcome>;

    /// Release a register. Never fails.
    fn dispose(&mut self, handle: Self::Handle);

    /// Run a whole circuit on `handle` and time it.
    ///
    /// The clock brackets gate application and measurement only. A circuit
    /// wider than the handle is rejected before the clock starts. Any
    /// `Measure` instruction measures the full register.
    fn execute(&mut self, handle: &mut Self::Handle, circuit: &Circuit) -> HalResult<Execution> {
        let width = self.width(handle);
        if circuit.num_qubits() > width {
            return Err(HalError::InvalidOperand(format!(
                "circuit '{}' needs {} qubits, handle has {}",
                circuit.name(),
                circuit.num_qubits(),
                width
            )));
        }

        let start = Instant::now();
        let mut outcome = None;

        for instruction in circuit.instructions() {
            match instruction {
                Instruction::Single { gate, qubit } => {
                    self.apply_single_qubit_gate(handle, *qubit, *gate)?;
                }
                Instruction::Multi { gate, qubits } => {
                    self.apply_multi_qubit_gate(handle, qubits, *gate)?;
                }
                Instruction::Measure { .. } => {
                    outcome = Some(self.measure_all(handle)?);
                }
            }
        }

        let elapsed = start.elapsed();
        trace!(
            circuit = circuit.name(),
            gates = circuit.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "circuit executed"
        );

        Ok(Execution { elapsed, outcome })
    }
}
