//! qsweep Circuit Representation
//!
//! This crate provides the data structures that benchmark generators emit and
//! backend adapters consume. A circuit is an ordered list of instructions over
//! a fixed number of qubits, built once and then only read.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a qubit in `[0, num_qubits)`
//! - **Gates**: [`SingleQubitGate`] and [`MultiQubitGate`] are closed enumerations,
//!   so every backend maps the same finite set onto its own primitives
//! - **Instructions**: [`Instruction`] pairs a gate with its operands, or measures
//! - **Circuit**: [`Circuit`] validating builder API
//!
//! # Example: Building a Bell Pair
//!
//! ```rust
//! use qsweep_ir::{Circuit, MultiQubitGate, QubitId, SingleQubitGate};
//!
//! let mut circuit = Circuit::new("bell", 2);
//! circuit.apply_single(SingleQubitGate::H, QubitId(0)).unwrap();
//! circuit
//!     .apply_multi(MultiQubitGate::CX, &[QubitId(0), QubitId(1)])
//!     .unwrap();
//! circuit.measure_all();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates and their adjoints |
//! | `SqrtX`, `SqrtY`, `SqrtW` | 1 | Square roots of X, Y and W = (X + Y)/√2 |
//! | `CX`, `CY`, `CZ` | 2 | Controlled Paulis |
//! | `AntiCX`, `AntiCY`, `AntiCZ` | 2 | Controlled Paulis firing on a \|0⟩ control |
//! | `Swap`, `ISwap` | 2 | SWAP and iSWAP |
//! | `CPhase(θ)` | 2 | Controlled phase diag(1, 1, 1, e^{iθ}) |
//! | `CCX`, `CCY`, `CCZ` | 3 | Doubly-controlled Paulis |
//! | `AntiCCX`, `AntiCCY`, `AntiCCZ` | 3 | Doubly-controlled Paulis firing on \|00⟩ controls |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{MultiQubitGate, SingleQubitGate};
pub use instruction::Instruction;
pub use qubit::QubitId;
