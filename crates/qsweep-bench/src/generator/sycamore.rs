//! Sycamore-style grid circuits.

use std::f64::consts::FRAC_PI_6;

use qsweep_ir::{Circuit, MultiQubitGate, QubitId, SingleQubitGate};
use rand::RngCore;

use super::CircuitGenerator;
use crate::error::BenchResult;
use crate::selector::SingleQubitGateSelector;
use crate::sequence::GateSequenceCycler;
use crate::topology::{CouplingCache, CouplingConvention};

const SYCAMORE_SINGLES: [SingleQubitGate; 3] = [
    SingleQubitGate::SqrtX,
    SingleQubitGate::SqrtY,
    SingleQubitGate::SqrtW,
];

/// Each layer applies a no-repeat `{sqrt_x, sqrt_y, sqrt_w}` gate to every
/// qubit, then `cp(pi/6)` followed by `iswap` on each coupling of the
/// layer's pattern.
#[derive(Debug)]
pub struct SycamoreGrid {
    convention: CouplingConvention,
    selector: SingleQubitGateSelector,
    couplings: CouplingCache,
}

impl SycamoreGrid {
    pub fn new(convention: CouplingConvention) -> BenchResult<Self> {
        Ok(Self {
            convention,
            selector: SingleQubitGateSelector::new(&SYCAMORE_SINGLES)?,
            couplings: CouplingCache::default(),
        })
    }
}

impl CircuitGenerator for SycamoreGrid {
    fn name(&self) -> &str {
        "sycamore"
    }

    fn generate(
        &mut self,
        num_qubits: u32,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> BenchResult<Circuit> {
        let table = self.couplings.get(num_qubits, self.convention);
        let mut cycler = GateSequenceCycler::new(self.convention.default_sequence());
        let mut last_gates: Vec<Option<SingleQubitGate>> = vec![None; num_qubits as usize];

        let mut circuit = Circuit::new(format!("sycamore_{num_qubits}_{depth}"), num_qubits);

        for _layer in 0..depth {
            self.selector.select_layer(&mut last_gates, rng);
            for (q, gate) in last_gates.iter().enumerate() {
                if let Some(gate) = gate {
                    circuit.apply_single(*gate, QubitId(q as u32))?;
                }
            }

            let pattern = cycler.advance();
            for &(b1, b2) in table.pairs(pattern) {
                let pair = [QubitId(b1), QubitId(b2)];
                circuit.apply_multi(MultiQubitGate::CPhase(FRAC_PI_6), &pair)?;
                circuit.apply_multi(MultiQubitGate::ISwap, &pair)?;
            }
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

    fn singles_per_layer(circuit: &Circuit, num_qubits: usize) -> Vec<Vec<SingleQubitGate>> {
        let singles: Vec<SingleQubitGate> = circuit
            .instructions()
            .iter()
            .filter_map(|inst| match inst {
                Instruction::Single { gate, .. } => Some(*gate),
                _ => None,
            })
            .collect();
        singles.chunks(num_qubits).map(<[_]>::to_vec).collect()
    }

    #[test]
    fn test_no_qubit_repeats_its_previous_gate() {
        let mut generator = SycamoreGrid::new(CouplingConvention::Simple).unwrap();
        let mut rng = SmallRng::seed_from_u64(21);
        let circuit = generator.generate(9, 12, &mut rng).unwrap();

        let layers = singles_per_layer(&circuit, 9);
        assert_eq!(layers.len(), 12);
        for pair in layers.windows(2) {
            assert!(pair[0].iter().zip(&pair[1]).all(|(a, b)| a != b));
        }
    }

    #[test]
    fn test_couplings_come_as_cphase_then_iswap() {
        let mut generator = SycamoreGrid::new(CouplingConvention::Simple).unwrap();
        let mut rng = SmallRng::seed_from_u64(2);
        let circuit = generator.generate(16, 4, &mut rng).unwrap();

        let multis: Vec<&Instruction> = circuit.instructions().iter().filter(|i| i.is_multi()).collect();
        assert!(!multis.is_empty());
        assert_eq!(multis.len() % 2, 0);
        for pair in multis.chunks(2) {
            assert_eq!(pair[0].name(), "cp");
            assert_eq!(pair[1].name(), "iswap");
            assert_eq!(pair[0].qubits(), pair[1].qubits());
        }
    }

    #[test]
    fn test_single_qubit_width_has_no_couplings() {
        for convention in [CouplingConvention::Simple, CouplingConvention::ParityStart] {
            let mut generator = SycamoreGrid::new(convention).unwrap();
            let mut rng = SmallRng::seed_from_u64(0);
            let circuit = generator.generate(1, 5, &mut rng).unwrap();
            assert_eq!(circuit.num_multi_qubit_gates(), 0);
            assert_eq!(circuit.num_single_qubit_gates(), 5);
        }
    }

    #[test]
    fn test_parity_start_convention_generates() {
        let mut generator = SycamoreGrid::new(CouplingConvention::ParityStart).unwrap();
        let mut rng = SmallRng::seed_from_u64(8);
        let circuit = generator.generate(12, 8, &mut rng).unwrap();
        assert!(circuit.num_multi_qubit_gates() > 0);
        assert_eq!(circuit.num_measured_qubits(), 12);
    }
}
