//! qsweep Local Statevector Simulator
//!
//! The reference [`Backend`](qsweep_hal::Backend) used by the benchmark
//! harness and its tests. It keeps the full statevector in memory, so it is
//! exact but bounded by RAM.
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | 16 KiB |
//! | 15 | 512 KiB |
//! | 20 | 16 MiB |
//! | 25 | 512 MiB |
//! | 30 | 16 GiB |
//!
//! # Example
//!
//! ```
//! use qsweep_adapter_sim::SimulatorBackend;
//! use qsweep_hal::Backend;
//! use qsweep_ir::{Circuit, MultiQubitGate, QubitId, SingleQubitGate};
//!
//! let mut circuit = Circuit::new("bell", 2);
//! circuit
//!     .apply_single(SingleQubitGate::H, QubitId(0))
//!     .unwrap()
//!     .apply_multi(MultiQubitGate::CX, &[QubitId(0), QubitId(1)])
//!     .unwrap()
//!     .measure_all();
//!
//! let mut backend = SimulatorBackend::new().with_seed(7);
//! let mut handle = backend.allocate(2).unwrap();
//! let execution = backend.execute(&mut handle, &circuit).unwrap();
//!
//! let bits = execution.outcome.unwrap().to_u64().unwrap();
//! assert!(bits == 0b00 || bits == 0b11);
//! backend.dispose(handle);
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimHandle, SimulatorBackend};
