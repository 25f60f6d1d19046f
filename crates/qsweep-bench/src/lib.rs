//! Circuit generators and sweep harness for qsweep.
//!
//! The crate has two halves:
//!
//! - **Generation**: [`topology`] factors a width into a near-square grid and
//!   tabulates nearest-neighbor couplings, [`sequence`] rotates the coupling
//!   pattern per layer, [`selector`] picks single-qubit gates without
//!   immediate repeats, and [`generator`] composes them into circuits.
//! - **Harness**: [`runner`] sweeps widths, depths and samples against a
//!   [`Backend`](qsweep_hal::Backend), isolating per-trial failures, and
//!   writes every trial through a [`sink`] as soon as it finishes.
//!
//! # Example
//!
//! ```
//! use qsweep_adapter_sim::SimulatorBackend;
//! use qsweep_bench::config::{DepthSchedule, QubitRange, SweepConfig};
//! use qsweep_bench::generator::GeneratorKind;
//! use qsweep_bench::runner::BenchmarkRunner;
//! use qsweep_bench::sink::MemorySink;
//! use qsweep_bench::topology::CouplingConvention;
//!
//! let config = SweepConfig {
//!     samples: 2,
//!     qubits: QubitRange::new(4, 6),
//!     depths: DepthSchedule::Range { min: 1, max: 3 },
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut generator = GeneratorKind::Sycamore.build(CouplingConvention::Simple).unwrap();
//! let mut runner = BenchmarkRunner::from_config(config).unwrap();
//! let mut sink = MemorySink::default();
//! let summary = runner
//!     .run_sweep(generator.as_mut(), &mut SimulatorBackend::new(), &mut sink)
//!     .unwrap();
//!
//! assert_eq!(sink.records.len(), 2 * 3 * 2);
//! assert_eq!(summary.total_failures(), 0);
//! assert_eq!(sink.records[0].name, "sim_sycamore");
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod record;
pub mod runner;
pub mod selector;
pub mod sequence;
pub mod sink;
pub mod stats;
pub mod topology;

pub use config::{DepthSchedule, QubitRange, SingleMode, SweepConfig};
pub use error::{BenchError, BenchResult};
pub use generator::{CircuitGenerator, GeneratorKind};
pub use record::{BenchmarkRecord, RecordSchema, SENTINEL, TrialOutcome};
pub use runner::{
    BenchmarkRunner, CellSummary, NoopObserver, SweepObserver, SweepProgress, SweepSummary,
};
pub use selector::SingleQubitGateSelector;
pub use sequence::GateSequenceCycler;
pub use sink::{CsvResultSink, MemorySink, ResultSink};
pub use stats::TrialStatistics;
pub use topology::{CouplingConvention, CouplingTable, GridDimensions};
