//! Layers of single-qubit gates with no entanglement.

use qsweep_ir::{Circuit, QubitId, SingleQubitGate};
use rand::{Rng, RngCore};

use super::{CircuitGenerator, SPARSE_DEPTHS};
use crate::error::BenchResult;

const LAYER_GATES: &[SingleQubitGate] = &[
    SingleQubitGate::H,
    SingleQubitGate::X,
    SingleQubitGate::Y,
    SingleQubitGate::Z,
    SingleQubitGate::T,
];

/// Baseline for per-gate overhead: every layer applies a random gate to
/// each qubit and nothing else.
#[derive(Debug, Clone, Default)]
pub struct SingleQubitLayers;

impl SingleQubitLayers {
    pub fn new() -> Self {
        Self
    }
}

impl CircuitGenerator for SingleQubitLayers {
    fn name(&self) -> &str {
        "single-qubits"
    }

    fn sparse_depths(&self) -> Option<&[u32]> {
        Some(SPARSE_DEPTHS)
    }

    fn generate(
        &mut self,
        num_qubits: u32,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> BenchResult<Circuit> {
        let mut circuit = Circuit::with_capacity(
            format!("single-qubits_{num_qubits}_{depth}"),
            num_qubits,
            depth as usize * num_qubits as usize + 1,
        );
        for _layer in 0..depth {
            for q in 0..num_qubits {
                let gate = LAYER_GATES[rng.gen_range(0..LAYER_GATES.len())];
                circuit.apply_single(gate, QubitId(q))?;
            }
        }
        circuit.measure_all();
        Ok(circuit)
    }
}
