//! qsweep Backend Abstraction Layer
//!
//! This crate defines the contract between the benchmark harness and whatever
//! simulation engine is being measured. The harness never touches amplitudes
//! or gate matrices; it only drives a [`Backend`] through the lifecycle below.
//!
//! ```text
//!   allocate(n) ──→ reset() ──→ execute(circuit) ──→ reset() ──→ ... ──→ dispose()
//!                      │             │
//!                      │             ├─ apply_single_qubit_gate()
//!                      │             ├─ apply_multi_qubit_gate()
//!                      │             └─ measure_all()
//!                      └── any HalError ──→ dispose() ──→ allocate(n)
//! ```
//!
//! # Implementing a Backend
//!
//! ```ignore
//! use qsweep_hal::{Backend, HalResult, MeasurementOutcome};
//! use qsweep_ir::{MultiQubitGate, QubitId, SingleQubitGate};
//!
//! struct MyBackend;
//!
//! impl Backend for MyBackend {
//!     type Handle = MyRegister;
//!
//!     fn name(&self) -> &str { "mine" }
//!
//!     fn allocate(&mut self, num_qubits: u32) -> HalResult<MyRegister> { todo!() }
//!     fn reset(&mut self, handle: &mut MyRegister) -> HalResult<()> { todo!() }
//!     fn apply_single_qubit_gate(
//!         &mut self, handle: &mut MyRegister, qubit: QubitId, gate: SingleQubitGate,
//!     ) -> HalResult<()> { todo!() }
//!     fn apply_multi_qubit_gate(
//!         &mut self, handle: &mut MyRegister, qubits: &[QubitId], gate: MultiQubitGate,
//!     ) -> HalResult<()> { todo!() }
//!     fn measure_all(&mut self, handle: &mut MyRegister) -> HalResult<MeasurementOutcome> { todo!() }
//!     fn dispose(&mut self, handle: MyRegister) {}
//! }
//! ```

pub mod backend;
pub mod error;
pub mod result;

pub use backend::Backend;
pub use error::{HalError, HalResult};
pub use result::{Execution, MeasurementOutcome};
