//! The (width x depth x sample) sweep.
//!
//! One backend handle lives per width. It is reset before every trial,
//! recycled (disposed and reallocated) after any backend failure, and
//! disposed when the sweep moves to the next width. Backend failures become
//! sentinel records; only configuration and sink errors end a sweep early.

use std::time::{Duration, Instant};

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use qsweep_hal::{Backend, Execution, MeasurementOutcome};
use qsweep_ir::Circuit;

use crate::config::SweepConfig;
use crate::error::BenchResult;
use crate::generator::CircuitGenerator;
use crate::record::{BenchmarkRecord, TrialOutcome};
use crate::sink::ResultSink;
use crate::stats::TrialStatistics;

/// Position of the sweep, reported once per (width, depth) cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepProgress {
    /// Completed share of the cell grid, in `[0, 1)`.
    pub fraction: f64,
    pub cell: usize,
    pub total_cells: usize,
    pub num_qubits: u32,
    pub depth: Option<u32>,
}

/// Hooks for progress display. Observers cannot affect the sweep.
pub trait SweepObserver {
    fn on_progress(&mut self, _progress: &SweepProgress) {}

    fn on_record(&mut self, _record: &BenchmarkRecord) {}

    fn on_finish(&mut self, _summary: &SweepSummary) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SweepObserver for NoopObserver {}

/// Results of one (width, depth) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSummary {
    pub num_qubits: u32,
    pub depth: Option<u32>,
    pub trials: usize,
    pub failures: usize,
    /// Over successful trials only.
    pub statistics: Option<TrialStatistics>,
}

/// Results of a whole sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub name: String,
    pub cells: Vec<CellSummary>,
    pub elapsed: Duration,
}

impl SweepSummary {
    pub fn total_trials(&self) -> usize {
        self.cells.iter().map(|c| c.trials).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.cells.iter().map(|c| c.failures).sum()
    }
}

/// Drives a generator and a backend over the configured sweep.
pub struct BenchmarkRunner<R: RngCore = StdRng> {
    config: SweepConfig,
    rng: R,
}

impl BenchmarkRunner<StdRng> {
    /// Seed from `config.seed`, or from OS entropy when unset.
    pub fn from_config(config: SweepConfig) -> BenchResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: RngCore> BenchmarkRunner<R> {
    /// Validates `config` so that no trial runs under invalid bounds.
    pub fn new(config: SweepConfig, rng: R) -> BenchResult<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn run_sweep<B, S>(
        &mut self,
        generator: &mut dyn CircuitGenerator,
        backend: &mut B,
        sink: &mut S,
    ) -> BenchResult<SweepSummary>
    where
        B: Backend,
        S: ResultSink + ?Sized,
    {
        self.run_sweep_observed(generator, backend, sink, &mut NoopObserver)
    }

    #[instrument(skip_all, fields(generator = generator.name(), backend = backend.name()))]
    pub fn run_sweep_observed<B, S>(
        &mut self,
        generator: &mut dyn CircuitGenerator,
        backend: &mut B,
        sink: &mut S,
        observer: &mut dyn SweepObserver,
    ) -> BenchResult<SweepSummary>
    where
        B: Backend,
        S: ResultSink + ?Sized,
    {
        let start = Instant::now();
        let name = format!("{}_{}", backend.name(), generator.name());
        let widths = self.config.widths();
        let depths = self.config.depths_for(&*generator)?;
        let total_cells = widths.len() * depths.len();
        let mut cells = Vec::with_capacity(total_cells);

        info!(
            widths = widths.len(),
            depths = depths.len(),
            samples = self.config.samples,
            "starting sweep"
        );

        for (width_idx, &num_qubits) in widths.iter().enumerate() {
            info!(num_qubits, "starting width");
            let mut handle = match backend.allocate(num_qubits) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    warn!(num_qubits, error = %e, "allocation failed, will retry per trial");
                    None
                }
            };

            for (depth_idx, &depth) in depths.iter().enumerate() {
                let cell = width_idx * depths.len() + depth_idx;
                observer.on_progress(&SweepProgress {
                    fraction: cell as f64 / total_cells as f64,
                    cell,
                    total_cells,
                    num_qubits,
                    depth,
                });

                let mut times = Vec::new();
                let mut failures = 0;

                for sample in 0..self.config.samples {
                    let record =
                        self.run_trial(&name, generator, backend, &mut handle, num_qubits, depth);
                    debug!(num_qubits, ?depth, sample, time = record.time(), "trial done");

                    match &record.outcome {
                        TrialOutcome::Completed { seconds, .. } => times.push(*seconds),
                        TrialOutcome::Failed { .. } => failures += 1,
                    }

                    if let Err(e) = sink.append(&record) {
                        if let Some(handle) = handle.take() {
                            backend.dispose(handle);
                        }
                        return Err(e);
                    }
                    observer.on_record(&record);
                }

                cells.push(CellSummary {
                    num_qubits,
                    depth,
                    trials: self.config.samples as usize,
                    failures,
                    statistics: TrialStatistics::from_samples(&times),
                });
            }

            if let Some(handle) = handle.take() {
                backend.dispose(handle);
            }
        }

        let summary = SweepSummary {
            name,
            cells,
            elapsed: start.elapsed(),
        };
        info!(
            trials = summary.total_trials(),
            failures = summary.total_failures(),
            elapsed_s = summary.elapsed.as_secs_f64(),
            "sweep finished"
        );
        observer.on_finish(&summary);
        Ok(summary)
    }

    /// Run one trial. Never fails: every problem becomes a sentinel record.
    fn run_trial<B: Backend>(
        &mut self,
        name: &str,
        generator: &mut dyn CircuitGenerator,
        backend: &mut B,
        handle: &mut Option<B::Handle>,
        num_qubits: u32,
        depth: Option<u32>,
    ) -> BenchmarkRecord {
        let circuit = match generator.generate(num_qubits, depth.unwrap_or(0), &mut self.rng) {
            Ok(circuit) => circuit,
            Err(e) => {
                warn!(num_qubits, ?depth, error = %e, "circuit generation failed");
                return BenchmarkRecord::failed(name, num_qubits, depth, e.to_string());
            }
        };

        if handle.is_none() {
            match backend.allocate(num_qubits) {
                Ok(fresh) => *handle = Some(fresh),
                Err(e) => {
                    warn!(num_qubits, error = %e, "allocation failed");
                    return BenchmarkRecord::failed(name, num_qubits, depth, e.to_string());
                }
            }
        }
        let Some(current) = handle.as_mut() else {
            return BenchmarkRecord::failed(name, num_qubits, depth, "no backend handle");
        };

        let result = backend
            .reset(current)
            .and_then(|()| backend.execute(current, &circuit))
            .map_err(|e| e.to_string())
            .and_then(|execution| verify_outcome(&circuit, execution));

        match result {
            Ok(execution) => {
                let measurement = if self.config.record_measurement {
                    execution.outcome.as_ref().and_then(MeasurementOutcome::to_u64)
                } else {
                    None
                };
                BenchmarkRecord::completed(
                    name,
                    num_qubits,
                    depth,
                    execution.elapsed_secs(),
                    measurement,
                )
            }
            Err(reason) => {
                warn!(num_qubits, ?depth, error = %reason, "backend failure, recycling handle");
                if let Some(old) = handle.take() {
                    backend.dispose(old);
                }
                match backend.allocate(num_qubits) {
                    Ok(fresh) => *handle = Some(fresh),
                    Err(alloc) => warn!(num_qubits, error = %alloc, "reallocation failed"),
                }
                BenchmarkRecord::failed(name, num_qubits, depth, reason)
            }
        }
    }
}

/// A circuit with an expected outcome fails unless the backend measured it.
fn verify_outcome(circuit: &Circuit, execution: Execution) -> Result<Execution, String> {
    let Some(expected) = circuit.expected_outcome() else {
        return Ok(execution);
    };
    match execution.outcome.as_ref().and_then(MeasurementOutcome::to_u64) {
        Some(measured) if measured == expected => Ok(execution),
        Some(measured) => Err(format!(
            "outcome check failed: expected {expected}, measured {measured}"
        )),
        None => Err(format!("outcome check failed: expected {expected}, nothing measured")),
    }
}
