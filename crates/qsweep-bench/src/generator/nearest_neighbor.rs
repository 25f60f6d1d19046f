//! Grid circuits with random nearest-neighbor entanglers.

use qsweep_ir::{Circuit, MultiQubitGate, QubitId, SingleQubitGate};
use rand::{Rng, RngCore};

use super::CircuitGenerator;
use crate::error::BenchResult;
use crate::sequence::GateSequenceCycler;
use crate::topology::{CouplingCache, CouplingConvention};

const NN_SINGLES: &[SingleQubitGate] = &[
    SingleQubitGate::X,
    SingleQubitGate::Y,
    SingleQubitGate::Z,
    SingleQubitGate::H,
    SingleQubitGate::S,
    SingleQubitGate::T,
];

const NN_PAIRS: &[MultiQubitGate] = &[
    MultiQubitGate::Swap,
    MultiQubitGate::CX,
    MultiQubitGate::CY,
    MultiQubitGate::CZ,
];

/// Uses the Sycamore coupling schedule, but draws single-qubit gates
/// without memory and picks a random two-qubit gate per coupling.
#[derive(Debug)]
pub struct NearestNeighborGrid {
    convention: CouplingConvention,
    couplings: CouplingCache,
}

impl NearestNeighborGrid {
    pub fn new(convention: CouplingConvention) -> Self {
        Self {
            convention,
            couplings: CouplingCache::default(),
        }
    }
}

impl CircuitGenerator for NearestNeighborGrid {
    fn name(&self) -> &str {
        "nearest-neighbor"
    }

    fn generate(
        &mut self,
        num_qubits: u32,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> BenchResult<Circuit> {
        let table = self.couplings.get(num_qubits, self.convention);
        let mut cycler = GateSequenceCycler::new(self.convention.default_sequence());
        let mut circuit =
            Circuit::new(format!("nearest-neighbor_{num_qubits}_{depth}"), num_qubits);

        for _layer in 0..depth {
            for q in 0..num_qubits {
                let gate = NN_SINGLES[rng.gen_range(0..NN_SINGLES.len())];
                circuit.apply_single(gate, QubitId(q))?;
            }

            let pattern = cycler.advance();
            for &(b1, b2) in table.pairs(pattern) {
                let gate = NN_PAIRS[rng.gen_range(0..NN_PAIRS.len())];
                circuit.apply_multi(gate, &[QubitId(b1), QubitId(b2)])?;
            }
        }

        circuit.measure_all();
        Ok(circuit)
    }
}
