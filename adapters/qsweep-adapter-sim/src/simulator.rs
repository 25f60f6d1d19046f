//! Simulator backend implementation.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument, trace};

use qsweep_hal::{Backend, HalError, HalResult, MeasurementOutcome};
use qsweep_ir::{MultiQubitGate, QubitId, SingleQubitGate};

use crate::statevector::Statevector;

/// Default register limit. 20 qubits is 16 MiB of amplitudes.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// A register allocated by [`SimulatorBackend`].
pub struct SimHandle {
    id: u64,
    state: Statevector,
    started: Instant,
}

impl SimHandle {
    /// Allocation serial number, unique per backend.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current amplitudes.
    pub fn amplitudes(&self) -> &[num_complex::Complex64] {
        self.state.amplitudes()
    }
}

/// Local statevector backend.
///
/// Measurements are drawn from a `StdRng`, seeded when requested so that
/// runs are reproducible.
pub struct SimulatorBackend {
    max_qubits: u32,
    time_limit: Option<Duration>,
    rng: StdRng,
    next_id: u64,
    live: usize,
}

impl SimulatorBackend {
    /// Create a simulator with default settings.
    pub fn new() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            time_limit: None,
            rng: StdRng::from_entropy(),
            next_id: 0,
            live: 0,
        }
    }

    /// Set the largest register [`Backend::allocate`] accepts.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Seed the measurement RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Fail any trial that runs longer than `limit` since its last reset.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// Number of handles allocated and not yet disposed.
    pub fn live_handles(&self) -> usize {
        self.live
    }

    fn check_deadline(&self, handle: &SimHandle) -> HalResult<()> {
        if let Some(limit) = self.time_limit {
            let elapsed = handle.started.elapsed();
            if elapsed > limit {
                return Err(HalError::Timeout(elapsed));
            }
        }
        Ok(())
    }

    fn resolve(&self, handle: &SimHandle, qubit: QubitId) -> HalResult<usize> {
        let index = qubit.index();
        if index >= handle.state.num_qubits() {
            return Err(HalError::InvalidOperand(format!(
                "qubit {} outside {}-qubit register",
                qubit,
                handle.state.num_qubits()
            )));
        }
        Ok(index)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    type Handle = SimHandle;

    fn name(&self) -> &str {
        "sim"
    }

    #[instrument(skip(self))]
    fn allocate(&mut self, num_qubits: u32) -> HalResult<SimHandle> {
        if num_qubits > self.max_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "{} qubits requested but simulator only supports {}",
                num_qubits, self.max_qubits
            )));
        }
        if num_qubits >= usize::BITS {
            return Err(HalError::CircuitTooLarge(format!(
                "{num_qubits} qubits exceed the addressable statevector size"
            )));
        }

        let state = Statevector::try_new(num_qubits as usize)
            .map_err(|e| HalError::AllocationFailed(e.to_string()))?;

        let id = self.next_id;
        self.next_id += 1;
        self.live += 1;
        debug!(id, num_qubits, "allocated register");

        Ok(SimHandle {
            id,
            state,
            started: Instant::now(),
        })
    }

    fn width(&self, handle: &SimHandle) -> u32 {
        handle.state.num_qubits() as u32
    }

    fn reset(&mut self, handle: &mut SimHandle) -> HalResult<()> {
        handle.state.reset();
        handle.started = Instant::now();
        Ok(())
    }

    fn apply_single_qubit_gate(
        &mut self,
        handle: &mut SimHandle,
        qubit: QubitId,
        gate: SingleQubitGate,
    ) -> HalResult<()> {
        self.check_deadline(handle)?;
        let q = self.resolve(handle, qubit)?;
        handle.state.apply_single(gate, q);
        Ok(())
    }

    fn apply_multi_qubit_gate(
        &mut self,
        handle: &mut SimHandle,
        qubits: &[QubitId],
        gate: MultiQubitGate,
    ) -> HalResult<()> {
        self.check_deadline(handle)?;
        if qubits.len() != gate.num_qubits() as usize {
            return Err(HalError::InvalidOperand(format!(
                "{} takes {} qubits, got {}",
                gate.name(),
                gate.num_qubits(),
                qubits.len()
            )));
        }

        let mut resolved = [0usize; 3];
        for (slot, &qubit) in resolved.iter_mut().zip(qubits) {
            *slot = self.resolve(handle, qubit)?;
        }
        let resolved = &resolved[..qubits.len()];
        if resolved
            .iter()
            .enumerate()
            .any(|(i, q)| resolved[..i].contains(q))
        {
            return Err(HalError::InvalidOperand(format!(
                "{} applied to repeated qubits",
                gate.name()
            )));
        }

        handle.state.apply_multi(gate, resolved);
        Ok(())
    }

    fn measure_all(&mut self, handle: &mut SimHandle) -> HalResult<MeasurementOutcome> {
        self.check_deadline(handle)?;
        let index = handle.state.measure_all(&mut self.rng);
        trace!(id = handle.id, index, "measured register");
        Ok(MeasurementOutcome::from_index(index, self.width(handle)))
    }

    fn dispose(&mut self, handle: SimHandle) {
        self.live = self.live.saturating_sub(1);
        debug!(id = handle.id, "disposed register");
    }
}
