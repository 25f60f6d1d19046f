//! Property-based tests for the grid topology, pattern cycler and gate selector.

use proptest::prelude::*;
use qsweep_bench::generator::GeneratorKind;
use qsweep_bench::{
    CouplingConvention, CouplingTable, GateSequenceCycler, GridDimensions, SingleQubitGateSelector,
};
use qsweep_ir::SingleQubitGate;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn arb_convention() -> impl Strategy<Value = CouplingConvention> {
    prop_oneof![
        Just(CouplingConvention::Simple),
        Just(CouplingConvention::ParityStart),
    ]
}

fn arb_gate_set() -> impl Strategy<Value = Vec<SingleQubitGate>> {
    let all = vec![
        SingleQubitGate::X,
        SingleQubitGate::Y,
        SingleQubitGate::Z,
        SingleQubitGate::H,
        SingleQubitGate::S,
        SingleQubitGate::T,
        SingleQubitGate::SqrtX,
        SingleQubitGate::SqrtY,
        SingleQubitGate::SqrtW,
    ];
    prop::sample::subsequence(all, 2..=9)
}

proptest! {
    #[test]
    fn prop_factorize_is_exact(n in 1u32..=1000) {
        let dims = GridDimensions::factorize(n);
        prop_assert!(dims.col_len >= 1);
        prop_assert_eq!(dims.row_len * dims.col_len, n);
        prop_assert!(dims.col_len <= dims.row_len);
    }

    #[test]
    fn prop_factorize_picks_largest_divisor_below_sqrt(n in 1u32..=1000) {
        let dims = GridDimensions::factorize(n);
        let bound = n.isqrt();
        for better in (dims.col_len + 1)..=bound {
            prop_assert_ne!(n % better, 0);
        }
    }

    #[test]
    fn prop_partner_stays_on_grid(
        n in 1u32..=200,
        pattern in 0u8..8,
        convention in arb_convention(),
        row_seed in any::<u32>(),
        col_seed in any::<u32>(),
    ) {
        let dims = GridDimensions::factorize(n);
        let row = row_seed % dims.row_len;
        let col = col_seed % dims.col_len;
        if let Some((r, c)) = dims.partner(row, col, pattern, convention) {
            prop_assert!(r < dims.row_len);
            prop_assert!(c < dims.col_len);
        }
    }

    #[test]
    fn prop_coupled_qubits_are_in_range(n in 1u32..=200, convention in arb_convention()) {
        let table = CouplingTable::new(n, convention);
        for pattern in 0u8..8 {
            for &(a, b) in table.pairs(pattern) {
                prop_assert!(a < n && b < n && a != b);
            }
        }
    }

    #[test]
    fn prop_cycler_has_period_eight(initial in any::<[u8; 8]>()) {
        let mut cycler = GateSequenceCycler::new(initial);
        let emitted: Vec<u8> = (0..8).map(|_| cycler.advance()).collect();
        prop_assert_eq!(cycler.order(), initial);
        prop_assert_eq!(emitted, initial.to_vec());
    }

    #[test]
    fn prop_selector_never_repeats(gates in arb_gate_set(), seed in any::<u64>(), layers in 2usize..50) {
        let selector = SingleQubitGateSelector::new(&gates).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut previous = None;
        for _ in 0..layers {
            let gate = selector.select(previous, &mut rng);
            prop_assert!(gates.contains(&gate));
            prop_assert_ne!(Some(gate), previous);
            previous = Some(gate);
        }
    }

    #[test]
    fn prop_every_generator_ends_with_full_measurement(
        n in 1u32..=12,
        depth in 0u32..6,
        seed in any::<u64>(),
        convention in arb_convention(),
    ) {
        for kind in GeneratorKind::ALL {
            let mut generator = kind.build(convention).unwrap();
            let mut rng = SmallRng::seed_from_u64(seed);
            let circuit = generator.generate(n, depth, &mut rng).unwrap();
            let last = circuit.instructions().last().unwrap();
            prop_assert!(last.is_measure());
            prop_assert_eq!(last.qubits().len(), n as usize);
        }
    }
}
