//! Gate kinds.
//!
//! Both enumerations are closed: a backend adapter implements one `match` per
//! enumeration and thereby supports every circuit a generator can emit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-qubit gates emitted by the benchmark generators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SingleQubitGate {
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate, RX(π/2).
    SqrtX,
    /// sqrt(Y) gate, RY(π/2).
    SqrtY,
    /// sqrt(W) gate, a π/2 rotation about W = (X + Y)/√2.
    SqrtW,
    /// Z rotation diag(e^{-iθ/2}, e^{iθ/2}).
    Rz(f64),
}

impl SingleQubitGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            SingleQubitGate::X => "x",
            SingleQubitGate::Y => "y",
            SingleQubitGate::Z => "z",
            SingleQubitGate::H => "h",
            SingleQubitGate::S => "s",
            SingleQubitGate::Sdg => "sdg",
            SingleQubitGate::T => "t",
            SingleQubitGate::Tdg => "tdg",
            SingleQubitGate::SqrtX => "sqrt_x",
            SingleQubitGate::SqrtY => "sqrt_y",
            SingleQubitGate::SqrtW => "sqrt_w",
            SingleQubitGate::Rz(_) => "rz",
        }
    }

    /// The rotation angle for `Rz`, `None` for fixed gates.
    pub fn angle(self) -> Option<f64> {
        match self {
            SingleQubitGate::Rz(theta) => Some(theta),
            _ => None,
        }
    }

    /// The adjoint gate, when it is itself in this enumeration.
    ///
    /// The square-root gates have no adjoint here and return `None`.
    pub fn inverse(self) -> Option<Self> {
        use SingleQubitGate as G;

        match self {
            G::X | G::Y | G::Z | G::H => Some(self),
            G::S => Some(G::Sdg),
            G::Sdg => Some(G::S),
            G::T => Some(G::Tdg),
            G::Tdg => Some(G::T),
            G::Rz(theta) => Some(G::Rz(-theta)),
            G::SqrtX | G::SqrtY | G::SqrtW => None,
        }
    }
}

impl fmt::Display for SingleQubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingleQubitGate::Rz(theta) => write!(f, "rz({theta})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Two- and three-qubit gates emitted by the benchmark generators.
///
/// Operand order is controls first, target last. `Swap`, `ISwap`, `CZ`,
/// `CPhase` and `CCZ` are symmetric under exchange of their operands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MultiQubitGate {
    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// X on the target when the control is |0⟩.
    AntiCX,
    /// Y on the target when the control is |0⟩.
    AntiCY,
    /// Z on the target when the control is |0⟩.
    AntiCZ,
    /// SWAP gate.
    Swap,
    /// iSWAP gate: exchanges |01⟩ and |10⟩ with a phase of i.
    ISwap,
    /// Controlled phase gate diag(1, 1, 1, e^{iθ}).
    CPhase(f64),

    // Three-qubit gates
    /// Toffoli gate.
    CCX,
    /// Doubly-controlled Y.
    CCY,
    /// Doubly-controlled Z.
    CCZ,
    /// X on the target when both controls are |0⟩.
    AntiCCX,
    /// Y on the target when both controls are |0⟩.
    AntiCCY,
    /// Z on the target when both controls are |0⟩.
    AntiCCZ,
}

impl MultiQubitGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            MultiQubitGate::CX => "cx",
            MultiQubitGate::CY => "cy",
            MultiQubitGate::CZ => "cz",
            MultiQubitGate::AntiCX => "acx",
            MultiQubitGate::AntiCY => "acy",
            MultiQubitGate::AntiCZ => "acz",
            MultiQubitGate::Swap => "swap",
            MultiQubitGate::ISwap => "iswap",
            MultiQubitGate::CPhase(_) => "cp",
            MultiQubitGate::CCX => "ccx",
            MultiQubitGate::CCY => "ccy",
            MultiQubitGate::CCZ => "ccz",
            MultiQubitGate::AntiCCX => "accx",
            MultiQubitGate::AntiCCY => "accy",
            MultiQubitGate::AntiCCZ => "accz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            MultiQubitGate::CX
            | MultiQubitGate::CY
            | MultiQubitGate::CZ
            | MultiQubitGate::AntiCX
            | MultiQubitGate::AntiCY
            | MultiQubitGate::AntiCZ
            | MultiQubitGate::Swap
            | MultiQubitGate::ISwap
            | MultiQubitGate::CPhase(_) => 2,

            MultiQubitGate::CCX
            | MultiQubitGate::CCY
            | MultiQubitGate::CCZ
            | MultiQubitGate::AntiCCX
            | MultiQubitGate::AntiCCY
            | MultiQubitGate::AntiCCZ => 3,
        }
    }

    /// The phase angle for `CPhase`, `None` for unparameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            MultiQubitGate::CPhase(theta) => Some(*theta),
            _ => None,
        }
    }

    /// The adjoint gate. Every gate but `ISwap` is self-inverse or, for
    /// `CPhase`, inverted by negating its angle.
    pub fn inverse(&self) -> Option<Self> {
        match self {
            MultiQubitGate::ISwap => None,
            MultiQubitGate::CPhase(theta) => Some(MultiQubitGate::CPhase(-theta)),
            other => Some(*other),
        }
    }
}

impl fmt::Display for MultiQubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiQubitGate::CPhase(theta) => write!(f, "cp({theta})"),
            other => f.write_str(other.name()),
        }
    }
}
