//! Behavioral tests for the statevector backend through the `Backend` trait.

use proptest::prelude::*;
use qsweep_adapter_sim::SimulatorBackend;
use qsweep_hal::Backend;
use qsweep_ir::{Circuit, MultiQubitGate, QubitId, SingleQubitGate};

fn ghz(n: u32) -> Circuit {
    let mut circuit = Circuit::new("ghz", n);
    circuit.apply_single(SingleQubitGate::H, QubitId(0)).unwrap();
    for q in 1..n {
        circuit
            .apply_multi(MultiQubitGate::CX, &[QubitId(q - 1), QubitId(q)])
            .unwrap();
    }
    circuit.measure_all();
    circuit
}

#[test]
fn test_ghz_outcomes_are_all_zero_or_all_one() {
    let mut backend = SimulatorBackend::new().with_seed(11);
    let mut handle = backend.allocate(4).unwrap();
    let circuit = ghz(4);

    for _ in 0..50 {
        backend.reset(&mut handle).unwrap();
        let execution = backend.execute(&mut handle, &circuit).unwrap();
        let bits = execution.outcome.unwrap().to_u64().unwrap();
        assert!(bits == 0 || bits == 0b1111, "unexpected outcome {bits:b}");
    }
    backend.dispose(handle);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let circuit = ghz(3);
    let run = |seed| {
        let mut backend = SimulatorBackend::new().with_seed(seed);
        let mut handle = backend.allocate(3).unwrap();
        (0..20)
            .map(|_| {
                backend.reset(&mut handle).unwrap();
                backend
                    .execute(&mut handle, &circuit)
                    .unwrap()
                    .outcome
                    .unwrap()
                    .to_u64()
                    .unwrap()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn test_reset_clears_previous_trial() {
    let mut backend = SimulatorBackend::new();
    let mut handle = backend.allocate(2).unwrap();
    backend
        .apply_single_qubit_gate(&mut handle, QubitId(1), SingleQubitGate::X)
        .unwrap();
    backend.reset(&mut handle).unwrap();

    let outcome = backend.measure_all(&mut handle).unwrap();
    assert_eq!(outcome.to_u64(), Some(0));
}

#[test]
fn test_execute_without_measurement_has_no_outcome() {
    let mut backend = SimulatorBackend::new();
    let mut handle = backend.allocate(1).unwrap();
    let mut circuit = Circuit::new("h", 1);
    circuit.apply_single(SingleQubitGate::H, QubitId(0)).unwrap();

    let execution = backend.execute(&mut handle, &circuit).unwrap();
    assert!(execution.outcome.is_none());
}

proptest! {
    #[test]
    fn prop_random_circuits_stay_normalized(
        ops in prop::collection::vec((0u8..6, 0u32..4, 1u32..4), 1..40)
    ) {
        let mut circuit = Circuit::new("random", 4);
        for (kind, a, offset) in ops {
            let b = (a + offset) % 4;
            match kind {
                0 => { circuit.apply_single(SingleQubitGate::H, QubitId(a)).unwrap(); }
                1 => { circuit.apply_single(SingleQubitGate::SqrtW, QubitId(a)).unwrap(); }
                2 => { circuit.apply_single(SingleQubitGate::T, QubitId(a)).unwrap(); }
                3 => { circuit.apply_multi(MultiQubitGate::ISwap, &[QubitId(a), QubitId(b)]).unwrap(); }
                4 => { circuit.apply_multi(MultiQubitGate::AntiCY, &[QubitId(a), QubitId(b)]).unwrap(); }
                _ => { circuit.apply_multi(MultiQubitGate::CPhase(0.3), &[QubitId(a), QubitId(b)]).unwrap(); }
            }
        }

        let mut backend = SimulatorBackend::new();
        let mut handle = backend.allocate(4).unwrap();
        backend.execute(&mut handle, &circuit).unwrap();

        let norm: f64 = handle.amplitudes().iter().map(|a| a.norm_sqr()).sum();
        prop_assert!((norm - 1.0).abs() < 1e-9);
    }
}
