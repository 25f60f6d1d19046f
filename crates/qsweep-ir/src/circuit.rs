//! Circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{MultiQubitGate, SingleQubitGate};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A quantum circuit: an ordered list of instructions over a fixed register.
///
/// Every builder method validates its operands, so a finished circuit only
/// references qubits in `[0, num_qubits)` and every multi-qubit gate has
/// distinct operands of the right arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Register width.
    num_qubits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
    /// Packed outcome (qubit `i` is bit `i`) a correct backend must measure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_outcome: Option<u64>,
}

impl Circuit {
    /// Create a new empty circuit over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
            expected_outcome: None,
        }
    }

    /// Create an empty circuit with room for `capacity` instructions.
    pub fn with_capacity(name: impl Into<String>, num_qubits: u32, capacity: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: Vec::with_capacity(capacity),
            expected_outcome: None,
        }
    }

    /// Apply a single-qubit gate.
    pub fn apply_single(&mut self, gate: SingleQubitGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit, gate.name())?;
        self.instructions.push(Instruction::single(gate, qubit));
        Ok(self)
    }

    /// Apply a two- or three-qubit gate. Controls first, target last.
    pub fn apply_multi(&mut self, gate: MultiQubitGate, qubits: &[QubitId]) -> IrResult<&mut Self> {
        let expected = gate.num_qubits();
        if qubits.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected,
                got: qubits.len() as u32,
            });
        }
        for (i, &q) in qubits.iter().enumerate() {
            self.check_qubit(q, gate.name())?;
            if qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }
        self.instructions
            .push(Instruction::multi(gate, qubits.iter().copied()));
        Ok(self)
    }

    /// Measure every qubit of the register.
    pub fn measure_all(&mut self) -> &mut Self {
        self.instructions
            .push(Instruction::measure((0..self.num_qubits).map(QubitId)));
        self
    }

    /// Record the outcome a deterministic circuit must produce.
    pub fn expect_outcome(&mut self, outcome: u64) -> &mut Self {
        self.expected_outcome = Some(outcome);
        self
    }

    /// Append every instruction of `other`, which must have the same width.
    pub fn append(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits != self.num_qubits {
            return Err(IrError::WidthMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        self.instructions.extend_from_slice(&other.instructions);
        Ok(self)
    }

    /// The adjoint circuit: gates reversed and each replaced by its inverse.
    ///
    /// Fails on measurements and on gates without an adjoint in the gate set.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let mut inverse = Circuit::with_capacity(
            format!("{}_inverse", self.name),
            self.num_qubits,
            self.instructions.len(),
        );
        for inst in self.instructions.iter().rev() {
            let inverted = match inst {
                Instruction::Single { gate, qubit } => {
                    gate.inverse().map(|g| Instruction::single(g, *qubit))
                }
                Instruction::Multi { gate, qubits } => gate
                    .inverse()
                    .map(|g| Instruction::multi(g, qubits.iter().copied())),
                Instruction::Measure { .. } => None,
            };
            let inverted = inverted.ok_or_else(|| IrError::NotInvertible {
                name: inst.name().to_string(),
            })?;
            inverse.instructions.push(inverted);
        }
        Ok(inverse)
    }

    fn check_qubit(&self, qubit: QubitId, gate_name: &str) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: Some(gate_name.to_string()),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outcome a correct backend must measure, if the circuit is deterministic.
    pub fn expected_outcome(&self) -> Option<u64> {
        self.expected_outcome
    }

    /// Get the register width.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of single-qubit gate instructions.
    pub fn num_single_qubit_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_single()).count()
    }

    /// Number of two- and three-qubit gate instructions.
    pub fn num_multi_qubit_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_multi()).count()
    }

    /// Number of qubits measured across all measurement instructions.
    pub fn num_measured_qubits(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.is_measure())
            .map(|i| i.qubits().len())
            .sum()
    }

    /// Instruction counts keyed by instruction name.
    pub fn gate_counts(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Serialize the circuit as pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_build_and_count() {
        let mut circuit = Circuit::new("test", 3);
        circuit
            .apply_single(SingleQubitGate::H, QubitId(0))
            .unwrap()
            .apply_single(SingleQubitGate::T, QubitId(2))
            .unwrap();
        circuit
            .apply_multi(MultiQubitGate::CPhase(PI / 2.0), &[QubitId(1), QubitId(0)])
            .unwrap();
        circuit.measure_all();

        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.num_single_qubit_gates(), 2);
        assert_eq!(circuit.num_multi_qubit_gates(), 1);
        assert_eq!(circuit.num_measured_qubits(), 3);
        assert_eq!(circuit.gate_counts()["cp"], 1);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::new("test", 2);
        let err = circuit
            .apply_single(SingleQubitGate::X, QubitId(2))
            .unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { num_qubits: 2, .. }));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_arity_mismatch() {
        let mut circuit = Circuit::new("test", 3);
        let err = circuit
            .apply_multi(MultiQubitGate::CCX, &[QubitId(0), QubitId(1)])
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 3,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_operand() {
        let mut circuit = Circuit::new("test", 3);
        let err = circuit
            .apply_multi(MultiQubitGate::Swap, &[QubitId(1), QubitId(1)])
            .unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { qubit: QubitId(1), .. }));
    }

    #[test]
    fn test_measure_all_on_empty_register() {
        let mut circuit = Circuit::new("empty", 0);
        circuit.measure_all();
        assert_eq!(circuit.num_measured_qubits(), 0);
    }

    #[test]
    fn test_inverse_reverses_and_adjoints() {
        let mut circuit = Circuit::new("fwd", 3);
        circuit
            .apply_single(SingleQubitGate::T, QubitId(0))
            .unwrap()
            .apply_multi(MultiQubitGate::CPhase(0.5), &[QubitId(0), QubitId(2)])
            .unwrap()
            .apply_multi(MultiQubitGate::AntiCCX, &[QubitId(1), QubitId(2), QubitId(0)])
            .unwrap();

        let inverse = circuit.inverse().unwrap();
        assert_eq!(
            inverse.instructions(),
            &[
                Instruction::multi(MultiQubitGate::AntiCCX, [QubitId(1), QubitId(2), QubitId(0)]),
                Instruction::multi(MultiQubitGate::CPhase(-0.5), [QubitId(0), QubitId(2)]),
                Instruction::single(SingleQubitGate::Tdg, QubitId(0)),
            ]
        );
    }

    #[test]
    fn test_inverse_rejects_measurement_and_iswap() {
        let mut measured = Circuit::new("m", 1);
        measured.measure_all();
        assert!(matches!(measured.inverse(), Err(IrError::NotInvertible { .. })));

        let mut iswap = Circuit::new("i", 2);
        iswap
            .apply_multi(MultiQubitGate::ISwap, &[QubitId(0), QubitId(1)])
            .unwrap();
        assert!(matches!(iswap.inverse(), Err(IrError::NotInvertible { .. })));
    }

    #[test]
    fn test_append_checks_width() {
        let mut wide = Circuit::new("wide", 3);
        let mut narrow = Circuit::new("narrow", 2);
        narrow.apply_single(SingleQubitGate::H, QubitId(1)).unwrap();
        assert!(matches!(
            wide.append(&narrow),
            Err(IrError::WidthMismatch { expected: 3, got: 2 })
        ));

        let mut same = Circuit::new("same", 2);
        same.append(&narrow).unwrap().append(&narrow).unwrap();
        assert_eq!(same.len(), 2);
    }

    #[test]
    fn test_expected_outcome_serialized_only_when_set() {
        let mut circuit = Circuit::new("e", 2);
        assert!(!circuit.to_json().unwrap().contains("expected_outcome"));
        circuit.expect_outcome(2);
        let parsed: Circuit = serde_json::from_str(&circuit.to_json().unwrap()).unwrap();
        assert_eq!(parsed.expected_outcome(), Some(2));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut circuit = Circuit::new("json", 2);
        circuit.apply_single(SingleQubitGate::SqrtW, QubitId(1)).unwrap();
        circuit
            .apply_multi(MultiQubitGate::ISwap, &[QubitId(0), QubitId(1)])
            .unwrap();
        circuit.measure_all();

        let json = circuit.to_json().unwrap();
        let parsed: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, circuit);
    }
}
