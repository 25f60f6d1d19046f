//! Dense random circuits: every qubit gets a random Pauli basis change and
//! an arbitrary Z rotation on each layer, so no single-qubit gate is
//! Clifford and the state stays dense.

use std::f64::consts::TAU;

use qsweep_ir::{Circuit, QubitId, SingleQubitGate};
use rand::{Rng, RngCore};

use super::{CircuitGenerator, RandomUniversal};
use crate::error::BenchResult;

use SingleQubitGate::{H, S, Sdg};

/// Gate sequences mapping one Pauli eigenbasis to another:
/// X to Y, X to Z, Y to Z, Y to X, Z to X, Z to Y.
const BASIS_CHANGES: &[&[SingleQubitGate]] = &[&[S], &[H], &[Sdg, H], &[Sdg], &[H], &[H, S]];

/// Basis change plus `rz(theta)` per qubit, then the extended entangling pass.
#[derive(Debug, Clone)]
pub struct DenseRandom {
    entanglers: RandomUniversal,
}

impl DenseRandom {
    pub fn new() -> Self {
        Self {
            entanglers: RandomUniversal::extended(),
        }
    }
}

impl Default for DenseRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl CircuitGenerator for DenseRandom {
    fn name(&self) -> &str {
        "dense"
    }

    fn generate(
        &mut self,
        num_qubits: u32,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> BenchResult<Circuit> {
        let mut circuit = Circuit::with_capacity(
            format!("dense_{num_qubits}_{depth}"),
            num_qubits,
            (depth as usize) * (num_qubits as usize * 4) + 1,
        );

        for _layer in 0..depth {
            for q in 0..num_qubits {
                for &gate in BASIS_CHANGES[rng.gen_range(0..BASIS_CHANGES.len())] {
                    circuit.apply_single(gate, QubitId(q))?;
                }
                circuit.apply_single(SingleQubitGate::Rz(rng.gen_range(0.0..TAU)), QubitId(q))?;
            }
            self.entanglers.append_entanglers(&mut circuit, rng)?;
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
    fn test_every_qubit_rotated_each_layer() {
        let mut rng = SmallRng::seed_from_u64(11);
        let circuit = DenseRandom::new().generate(5, 3, &mut rng).unwrap();

        let rotations: Vec<(u32, f64)> = circuit
            .instructions()
            .iter()
            .filter_map(|inst| match inst {
                Instruction::Single { gate, qubit } => gate.angle().map(|a| (qubit.0, a)),
                _ => None,
            })
            .collect();
        assert_eq!(rotations.len(), 15);
        for q in 0..5 {
            assert_eq!(rotations.iter().filter(|(r, _)| *r == q).count(), 3);
        }
        assert!(rotations.iter().all(|(_, a)| (0.0..TAU).contains(a)));
    }

    #[test]
    fn test_only_basis_change_singles() {
        let mut rng = SmallRng::seed_from_u64(2);
        let circuit = DenseRandom::new().generate(6, 4, &mut rng).unwrap();
        for inst in circuit.instructions() {
            if let Instruction::Single { gate, .. } = inst {
                assert!(matches!(gate, H | S | Sdg | SingleQubitGate::Rz(_)), "{gate}");
            }
        }
        assert!(circuit.num_multi_qubit_gates() >= 4);
        assert!(circuit.instructions().last().unwrap().is_measure());
    }
}
