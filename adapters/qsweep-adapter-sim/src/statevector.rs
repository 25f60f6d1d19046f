//! Statevector simulation engine.

use std::collections::TryReserveError;
use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;
use qsweep_ir::{MultiQubitGate, SingleQubitGate};
use rand::Rng;

/// A 2x2 unitary in row-major order.
type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];
const PAULI_Y: Matrix2 = [[ZERO, Complex64::new(0.0, -1.0)], [I, ZERO]];
const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]];

/// The full-register amplitude vector of an n-qubit state.
///
/// Basis index bit `q` is the value of qubit `q`.
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Allocate |0...0>, reporting allocator refusal instead of aborting.
    ///
    /// Widths whose amplitude count does not fit in `usize` fail as a
    /// capacity overflow.
    pub fn try_new(num_qubits: usize) -> Result<Self, TryReserveError> {
        let size = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .unwrap_or(usize::MAX);
        let mut amplitudes = Vec::new();
        amplitudes.try_reserve_exact(size)?;
        amplitudes.resize(size, ZERO);
        amplitudes[0] = ONE;
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Return to |0...0> in place.
    pub fn reset(&mut self) {
        self.amplitudes.fill(ZERO);
        self.amplitudes[0] = ONE;
    }

    pub fn apply_single(&mut self, gate: SingleQubitGate, qubit: usize) {
        match gate {
            SingleQubitGate::X => self.apply_x(qubit),
            SingleQubitGate::Z => self.apply_phase(qubit, Complex64::new(-1.0, 0.0)),
            SingleQubitGate::S => self.apply_phase(qubit, I),
            SingleQubitGate::Sdg => self.apply_phase(qubit, -I),
            SingleQubitGate::T => self.apply_phase(qubit, Complex64::from_polar(1.0, PI_4)),
            SingleQubitGate::Tdg => self.apply_phase(qubit, Complex64::from_polar(1.0, -PI_4)),
            other => self.apply_matrix(qubit, &single_matrix(other)),
        }
    }

    /// Apply a multi-qubit gate. Controls come first, the target last.
    pub fn apply_multi(&mut self, gate: MultiQubitGate, qubits: &[usize]) {
        use MultiQubitGate as G;

        match (gate, qubits) {
            (G::Swap, &[a, b]) => self.apply_swap(a, b, ONE),
            (G::ISwap, &[a, b]) => self.apply_swap(a, b, I),
            (G::CPhase(theta), &[a, b]) => {
                let mask = (1 << a) | (1 << b);
                let phase = Complex64::from_polar(1.0, theta);
                for (i, amp) in self.amplitudes.iter_mut().enumerate() {
                    if i & mask == mask {
                        *amp *= phase;
                    }
                }
            }
            (G::CX | G::AntiCX | G::CCX | G::AntiCCX, _) => self.apply_controlled(gate, qubits, &PAULI_X),
            (G::CY | G::AntiCY | G::CCY | G::AntiCCY, _) => self.apply_controlled(gate, qubits, &PAULI_Y),
            (G::CZ | G::AntiCZ | G::CCZ | G::AntiCCZ, _) => self.apply_controlled(gate, qubits, &PAULI_Z),
            // Arity is enforced by the IR builder.
            _ => {}
        }
    }

    /// Sample a basis state and collapse onto it.
    pub fn measure_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut outcome = self.amplitudes.len() - 1;
        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                outcome = i;
                break;
            }
        }

        self.amplitudes.fill(ZERO);
        self.amplitudes[outcome] = ONE;
        outcome
    }

    // =========================================================================
    // Kernels
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, phase: Complex64) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    fn apply_matrix(&mut self, qubit: usize, m: &Matrix2) {
        self.apply_masked(0, 0, qubit, m);
    }

    fn apply_controlled(&mut self, gate: MultiQubitGate, qubits: &[usize], m: &Matrix2) {
        let Some((&target, controls)) = qubits.split_last() else {
            return;
        };
        let control_mask = controls.iter().fold(0usize, |acc, &c| acc | (1 << c));
        let required = if is_anti_controlled(gate) { 0 } else { control_mask };
        self.apply_masked(control_mask, required, target, m);
    }

    /// Apply `m` to `target` on every basis pair where `index & control_mask == required`.
    fn apply_masked(&mut self, control_mask: usize, required: usize, target: usize, m: &Matrix2) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask == 0 && i & control_mask == required {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    /// Exchange |01> and |10>, multiplying both by `phase`.
    fn apply_swap(&mut self, q1: usize, q2: usize, phase: Complex64) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if i & mask1 != 0 && i & mask2 == 0 {
                let j = (i & !mask1) | mask2;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = phase * self.amplitudes[j];
                self.amplitudes[j] = phase * tmp;
            }
        }
    }
}

const PI_4: f64 = std::f64::consts::FRAC_PI_4;

fn is_anti_controlled(gate: MultiQubitGate) -> bool {
    use MultiQubitGate as G;
    matches!(
        gate,
        G::AntiCX | G::AntiCY | G::AntiCZ | G::AntiCCX | G::AntiCCY | G::AntiCCZ
    )
}

fn single_matrix(gate: SingleQubitGate) -> Matrix2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    let half = |re: f64, im: f64| Complex64::new(re / 2.0, im / 2.0);
    match gate {
        SingleQubitGate::H => [[h, h], [h, -h]],
        SingleQubitGate::Y => PAULI_Y,
        SingleQubitGate::SqrtX => [[half(1.0, 1.0), half(1.0, -1.0)], [half(1.0, -1.0), half(1.0, 1.0)]],
        SingleQubitGate::SqrtY => [[half(1.0, 1.0), half(-1.0, -1.0)], [half(1.0, 1.0), half(1.0, 1.0)]],
        SingleQubitGate::SqrtW => [[h, half(-1.0, -1.0)], [half(1.0, -1.0), h]],
        SingleQubitGate::Rz(theta) => [
            [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
            [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
        ],
        // Diagonal and X gates have dedicated kernels.
        SingleQubitGate::X => PAULI_X,
        SingleQubitGate::Z => PAULI_Z,
        SingleQubitGate::S => [[ONE, ZERO], [ZERO, I]],
        SingleQubitGate::Sdg => [[ONE, ZERO], [ZERO, -I]],
        SingleQubitGate::T => [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, PI_4)]],
        SingleQubitGate::Tdg => [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, -PI_4)]],
    }
}
