//! Mirror circuits: a random permutation state, random layers, then the
//! exact inverse of those layers. A correct backend measures the starting
//! permutation with certainty, which the circuit records as its expected
//! outcome.

use qsweep_ir::{Circuit, QubitId, SingleQubitGate};
use rand::{Rng, RngCore};

use super::{CircuitGenerator, RandomUniversal};
use crate::config::MAX_MEASURED_WIDTH;
use crate::error::{BenchError, BenchResult};

/// Extended random layers followed by their adjoint.
#[derive(Debug, Clone)]
pub struct MirrorValidation {
    layers: RandomUniversal,
}

impl MirrorValidation {
    pub fn new() -> Self {
        Self {
            layers: RandomUniversal::extended(),
        }
    }
}

impl Default for MirrorValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl CircuitGenerator for MirrorValidation {
    fn name(&self) -> &str {
        "mirror"
    }

    fn generate(
        &mut self,
        num_qubits: u32,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> BenchResult<Circuit> {
        if num_qubits > MAX_MEASURED_WIDTH {
            return Err(BenchError::Generation(format!(
                "mirror outcome of {num_qubits} qubits does not fit in {MAX_MEASURED_WIDTH} bits"
            )));
        }

        let permutation: u64 = match num_qubits {
            MAX_MEASURED_WIDTH => rng.r#gen(),
            n => rng.gen_range(0..1u64 << n),
        };

        let mut forward = Circuit::new("forward", num_qubits);
        for _layer in 0..depth {
            self.layers.append_layer(&mut forward, rng)?;
        }
        let backward = forward.inverse()?;

        let mut circuit = Circuit::with_capacity(
            format!("mirror_{num_qubits}_{depth}"),
            num_qubits,
            num_qubits as usize + 2 * forward.len() + 1,
        );
        for q in 0..num_qubits {
            if (permutation >> q) & 1 == 1 {
                circuit.apply_single(SingleQubitGate::X, QubitId(q))?;
            }
        }
        circuit.append(&forward)?.append(&backward)?;
        circuit.measure_all().expect_outcome(permutation);
        Ok(circuit)
    }
}
