//! Quantum Fourier transform.
//!
//! Uses the full multi-qubit register: for each qubit `j`, a controlled
//! phase `pi / 2^(j - k)` with every lower qubit `k`, then a Hadamard on `j`.

use std::f64::consts::PI;

use qsweep_ir::{Circuit, MultiQubitGate, QubitId, SingleQubitGate};
use rand::RngCore;

use super::CircuitGenerator;
use crate::error::BenchResult;

/// Width-only QFT generator. Deterministic; the RNG is unused.
#[derive(Debug, Clone, Copy, Default)]
pub struct Qft;

impl CircuitGenerator for Qft {
    fn name(&self) -> &str {
        "qft"
    }

    fn uses_depth(&self) -> bool {
        false
    }

    fn generate(
        &mut self,
        num_qubits: u32,
        _depth: u32,
        _rng: &mut dyn RngCore,
    ) -> BenchResult<Circuit> {
        let pairs = (num_qubits as usize * num_qubits.saturating_sub(1) as usize) / 2;
        let mut circuit = Circuit::with_capacity(
            format!("qft_{num_qubits}"),
            num_qubits,
            pairs + num_qubits as usize + 1,
        );

        for j in 0..num_qubits {
            for k in 0..j {
                let theta = PI / 2f64.powi((j - k) as i32);
                circuit.apply_multi(MultiQubitGate::CPhase(theta), &[QubitId(j), QubitId(k)])?;
            }
            circuit.apply_single(SingleQubitGate::H, QubitId(j))?;
        }
        circuit.measure_all();

        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsweep_ir::Instruction;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_qft3_gate_counts() {
        let mut rng = SmallRng::seed_from_u64(0);
        let circuit = Qft.generate(3, 0, &mut rng).unwrap();

        assert_eq!(circuit.num_single_qubit_gates(), 3);
        assert_eq!(circuit.num_multi_qubit_gates(), 3);
        assert_eq!(circuit.num_measured_qubits(), 3);
        assert_eq!(circuit.gate_counts()["cp"], 3);
        assert_eq!(circuit.gate_counts()["h"], 3);
    }

    #[test]
    fn test_qft_angles_halve_with_distance() {
        let mut rng = SmallRng::seed_from_u64(0);
        let circuit = Qft.generate(3, 0, &mut rng).unwrap();
        let angles: Vec<f64> = circuit
            .instructions()
            .iter()
            .filter_map(|inst| match inst {
                Instruction::Multi { gate, .. } => gate.angle(),
                _ => None,
            })
            .collect();
        // (1,0), (2,0), (2,1)
        assert_eq!(angles, vec![PI / 2.0, PI / 4.0, PI / 2.0]);
    }

    #[test]
    fn test_qft_single_qubit_is_hadamard_only() {
        let mut rng = SmallRng::seed_from_u64(0);
        let circuit = Qft.generate(1, 0, &mut rng).unwrap();
        assert_eq!(circuit.num_multi_qubit_gates(), 0);
        assert_eq!(circuit.num_single_qubit_gates(), 1);
    }
}
