//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{MultiQubitGate, SingleQubitGate};
use crate::qubit::QubitId;

/// A single step of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// A single-qubit gate on one target.
    Single {
        /// The gate.
        gate: SingleQubitGate,
        /// Target qubit.
        qubit: QubitId,
    },
    /// A two- or three-qubit gate; controls first, target last.
    Multi {
        /// The gate.
        gate: MultiQubitGate,
        /// Operand qubits, `gate.num_qubits()` of them.
        qubits: Vec<QubitId>,
    },
    /// Measurement of the listed qubits in the computational basis.
    Measure {
        /// Measured qubits.
        qubits: Vec<QubitId>,
    },
}

impl Instruction {
    /// Create a single-qubit gate instruction.
    pub fn single(gate: SingleQubitGate, qubit: QubitId) -> Self {
        Instruction::Single { gate, qubit }
    }

    /// Create a multi-qubit gate instruction.
    pub fn multi(gate: MultiQubitGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Instruction::Multi {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a measurement instruction.
    pub fn measure(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Instruction::Measure {
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Qubits this instruction operates on.
    pub fn qubits(&self) -> &[QubitId] {
        match self {
            Instruction::Single { qubit, .. } => std::slice::from_ref(qubit),
            Instruction::Multi { qubits, .. } | Instruction::Measure { qubits } => qubits,
        }
    }

    /// Check if this is a single-qubit gate.
    pub fn is_single(&self) -> bool {
        matches!(self, Instruction::Single { .. })
    }

    /// Check if this is a multi-qubit gate.
    pub fn is_multi(&self) -> bool {
        matches!(self, Instruction::Multi { .. })
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, Instruction::Measure { .. })
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Single { gate, .. } => gate.name(),
            Instruction::Multi { gate, .. } => gate.name(),
            Instruction::Measure { .. } => "measure",
        }
    }
}
