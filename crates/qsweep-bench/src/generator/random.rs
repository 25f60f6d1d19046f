//! Random universal circuits.
//!
//! Each layer gives every qubit a uniformly random single-qubit gate, then
//! partitions the register into random disjoint groups of two (or three)
//! and applies a random entangling gate to each group.

use qsweep_ir::{Circuit, MultiQubitGate, QubitId, SingleQubitGate};
use rand::{Rng, RngCore};

use super::{CircuitGenerator, SPARSE_DEPTHS};
use crate::error::BenchResult;

const STANDARD_SINGLES: &[SingleQubitGate] = &[
    SingleQubitGate::H,
    SingleQubitGate::X,
    SingleQubitGate::Y,
    SingleQubitGate::Z,
    SingleQubitGate::T,
];

const STANDARD_PAIRS: &[MultiQubitGate] = &[
    MultiQubitGate::Swap,
    MultiQubitGate::CX,
    MultiQubitGate::CZ,
];

const EXTENDED_SINGLES: &[SingleQubitGate] = &[
    SingleQubitGate::H,
    SingleQubitGate::X,
    SingleQubitGate::Y,
    SingleQubitGate::Z,
    SingleQubitGate::T,
    SingleQubitGate::S,
    SingleQubitGate::Tdg,
    SingleQubitGate::Sdg,
];

const EXTENDED_PAIRS: &[MultiQubitGate] = &[
    MultiQubitGate::Swap,
    MultiQubitGate::CX,
    MultiQubitGate::CZ,
    MultiQubitGate::CY,
    MultiQubitGate::AntiCX,
    MultiQubitGate::AntiCZ,
    MultiQubitGate::AntiCY,
];

const EXTENDED_TRIPLES: &[MultiQubitGate] = &[
    MultiQubitGate::CCX,
    MultiQubitGate::CCY,
    MultiQubitGate::CCZ,
    MultiQubitGate::AntiCCX,
    MultiQubitGate::AntiCCY,
    MultiQubitGate::AntiCCZ,
];

/// Random-pairing generator over fixed gate sets.
#[derive(Debug, Clone)]
pub struct RandomUniversal {
    name: &'static str,
    singles: &'static [SingleQubitGate],
    pairs: &'static [MultiQubitGate],
    triples: &'static [MultiQubitGate],
    sparse: bool,
}

impl RandomUniversal {
    /// `{h, x, y, z, t}` singles and `{swap, cx, cz}` pairs over the full depth range.
    pub fn standard() -> Self {
        Self {
            name: "random",
            singles: STANDARD_SINGLES,
            pairs: STANDARD_PAIRS,
            triples: &[],
            sparse: false,
        }
    }

    /// Adds phase adjoints, controlled-Y, anti-controls and three-qubit
    /// gates, sampled at the sparse depths.
    pub fn extended() -> Self {
        Self {
            name: "random-extended",
            singles: EXTENDED_SINGLES,
            pairs: EXTENDED_PAIRS,
            triples: EXTENDED_TRIPLES,
            sparse: true,
        }
    }

    /// Draw an entangling gate from the union of both sets. A triple drawn
    /// when no third qubit is left is replaced by a pair gate.
    fn draw_gate(&self, remaining: usize, rng: &mut dyn RngCore) -> MultiQubitGate {
        let pick = rng.gen_range(0..self.pairs.len() + self.triples.len());
        if pick < self.pairs.len() {
            return self.pairs[pick];
        }
        if remaining == 0 {
            return self.pairs[rng.gen_range(0..self.pairs.len())];
        }
        self.triples[pick - self.pairs.len()]
    }

    /// One random single gate per qubit, then one entangling pass.
    pub(crate) fn append_layer(
        &self,
        circuit: &mut Circuit,
        rng: &mut dyn RngCore,
    ) -> BenchResult<()> {
        for q in 0..circuit.num_qubits() {
            let gate = self.singles[rng.gen_range(0..self.singles.len())];
            circuit.apply_single(gate, QubitId(q))?;
        }
        self.append_entanglers(circuit, rng)
    }

    /// Partition the register into random disjoint groups and apply an
    /// entangling gate to each. An odd qubit out is left idle.
    pub(crate) fn append_entanglers(
        &self,
        circuit: &mut Circuit,
        rng: &mut dyn RngCore,
    ) -> BenchResult<()> {
        let mut available: Vec<u32> = (0..circuit.num_qubits()).collect();
        while available.len() >= 2 {
            let q1 = available.remove(rng.gen_range(0..available.len()));
            let q2 = available.remove(rng.gen_range(0..available.len()));

            let gate = self.draw_gate(available.len(), rng);
            if gate.num_qubits() == 3 {
                let q3 = available.remove(rng.gen_range(0..available.len()));
                circuit.apply_multi(gate, &[QubitId(q1), QubitId(q2), QubitId(q3)])?;
            } else {
                circuit.apply_multi(gate, &[QubitId(q1), QubitId(q2)])?;
            }
        }
        Ok(())
    }
}

impl CircuitGenerator for RandomUniversal {
    fn name(&self) -> &str {
        self.name
    }

    fn sparse_depths(&self) -> Option<&[u32]> {
        self.sparse.then_some(SPARSE_DEPTHS)
    }

    fn generate(
        &mut self,
        num_qubits: u32,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> BenchResult<Circuit> {
        let mut circuit = Circuit::with_capacity(
            format!("{}_{num_qubits}_{depth}", self.name),
            num_qubits,
            (depth as usize) * (num_qubits as usize * 3 / 2) + 1,
        );

        for _layer in 0..depth {
            self.append_layer(&mut circuit, rng)?;
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

    fn entangled_qubits(circuit: &Circuit) -> Vec<u32> {
        let mut qubits: Vec<u32> = circuit
            .instructions()
            .iter()
            .filter(|inst| inst.is_multi())
            .flat_map(|inst| inst.qubits().iter().map(|q| q.0))
            .collect();
        qubits.sort_unstable();
        qubits
    }

    #[test]
    fn test_even_width_pairs_every_qubit() {
        let mut generator = RandomUniversal::standard();
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let circuit = generator.generate(6, 1, &mut rng).unwrap();
            assert_eq!(circuit.num_multi_qubit_gates(), 3);
            assert_eq!(entangled_qubits(&circuit), vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_odd_width_leaves_one_unpaired() {
        let mut generator = RandomUniversal::standard();
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let circuit = generator.generate(5, 1, &mut rng).unwrap();
            assert_eq!(circuit.num_multi_qubit_gates(), 2);
            let qubits = entangled_qubits(&circuit);
            assert_eq!(qubits.len(), 4);
            let mut dedup = qubits.clone();
            dedup.dedup();
            assert_eq!(dedup, qubits);
        }
    }

    #[test]
    fn test_layer_shape() {
        let mut generator = RandomUniversal::standard();
        let mut rng = SmallRng::seed_from_u64(3);
        let circuit = generator.generate(4, 3, &mut rng).unwrap();
        assert_eq!(circuit.num_single_qubit_gates(), 12);
        assert_eq!(circuit.num_multi_qubit_gates(), 6);
        assert!(matches!(
            circuit.instructions().last(),
            Some(Instruction::Measure { qubits }) if qubits.len() == 4
        ));
    }

    #[test]
    fn test_extended_groups_are_disjoint_within_layer() {
        let mut generator = RandomUniversal::extended();
        for seed in 0..30 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let circuit = generator.generate(7, 1, &mut rng).unwrap();
            let qubits = entangled_qubits(&circuit);
            let mut dedup = qubits.clone();
            dedup.dedup();
            assert_eq!(dedup, qubits);
            assert!(qubits.len() >= 6);
        }
    }

    #[test]
    fn test_extended_eventually_draws_triples() {
        let mut generator = RandomUniversal::extended();
        let mut rng = SmallRng::seed_from_u64(17);
        let circuit = generator.generate(9, 20, &mut rng).unwrap();
        assert!(
            circuit
                .instructions()
                .iter()
                .any(|inst| inst.qubits().len() == 3 && inst.is_multi())
        );
    }

    #[test]
    fn test_zero_depth_is_measurement_only() {
        let mut generator = RandomUniversal::standard();
        let mut rng = SmallRng::seed_from_u64(0);
        let circuit = generator.generate(4, 0, &mut rng).unwrap();
        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.num_measured_qubits(), 4);
    }

    #[test]
    fn test_sparse_depths() {
        assert!(RandomUniversal::standard().sparse_depths().is_none());
        assert_eq!(
            RandomUniversal::extended().sparse_depths(),
            Some(&[5, 10, 15, 20][..])
        );
    }
}
