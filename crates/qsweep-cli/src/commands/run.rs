//! Run command implementation.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use qsweep_adapter_sim::SimulatorBackend;
use qsweep_bench::generator::GeneratorKind;
use qsweep_bench::{
    BenchmarkRecord, BenchmarkRunner, CouplingConvention, CsvResultSink, DepthSchedule,
    QubitRange, SingleMode, SweepConfig, SweepObserver, SweepProgress, SweepSummary,
};
use qsweep_hal::Backend;

use super::common::{build_generator, print_statistics, time_limit};

/// Arguments of `qsweep run`. Unset flags fall back to the config file,
/// then to `QSWEEP_*` environment variables, then to built-in defaults.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Circuit generator (see `qsweep variants`)
    #[arg(long)]
    pub variant: GeneratorKind,

    /// Trials per (width, depth) cell
    #[arg(short = 'n', long)]
    pub samples: Option<u32>,

    /// Largest qubit width, inclusive
    #[arg(short, long)]
    pub qubits: Option<u32>,

    /// Smallest qubit width
    #[arg(long)]
    pub min_qubits: Option<u32>,

    /// Largest depth, inclusive
    #[arg(short, long, conflicts_with = "depths")]
    pub depth: Option<u32>,

    /// Explicit comma-separated depth list
    #[arg(long, value_delimiter = ',')]
    pub depths: Vec<u32>,

    /// CSV output file (appended to)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Only sweep the largest width, depth, or both
    #[arg(long)]
    pub single: Option<SingleMode>,

    /// Seed for circuit generation and measurement sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Record the measured bitstring of each trial
    #[arg(long)]
    pub measurement: bool,

    /// Coupling convention for grid generators
    #[arg(long)]
    pub convention: Option<CouplingConvention>,

    /// YAML sweep configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Simulator width limit
    #[arg(long, default_value_t = qsweep_adapter_sim::DEFAULT_MAX_QUBITS)]
    pub max_sim_qubits: u32,

    /// Per-trial time limit in seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Write a JSON summary of the sweep to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl RunArgs {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut SweepConfig) {
        if let Some(samples) = self.samples {
            config.samples = samples;
        }

        match (self.min_qubits, self.qubits) {
            (min, Some(max)) => {
                config.qubits = QubitRange::inclusive(min.unwrap_or(config.qubits.start), max);
            }
            (Some(min), None) => config.qubits = QubitRange::new(min, config.qubits.end),
            (None, None) => {}
        }

        if let Some(max) = self.depth {
            let min = match config.depths {
                DepthSchedule::Range { min, .. } => min,
                DepthSchedule::List(_) => 1,
            };
            config.depths = DepthSchedule::Range { min, max };
        } else if !self.depths.is_empty() {
            config.depths = DepthSchedule::List(self.depths.clone());
        }

        if let Some(out) = &self.out {
            config.output.clone_from(out);
        }
        if let Some(single) = self.single {
            config.single = single;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.measurement {
            config.record_measurement = true;
        }
        if let Some(convention) = self.convention {
            config.convention = convention;
        }
    }
}

/// Progress bar over sweep cells.
struct ProgressObserver {
    bar: ProgressBar,
    failures: usize,
}

impl ProgressObserver {
    fn new() -> Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        Ok(Self { bar, failures: 0 })
    }
}

impl SweepObserver for ProgressObserver {
    fn on_progress(&mut self, progress: &SweepProgress) {
        self.bar.set_length(progress.total_cells as u64);
        self.bar.set_position(progress.cell as u64);
        let depth = progress
            .depth
            .map_or_else(String::new, |d| format!(" depth {d}"));
        self.bar
            .set_message(format!("{} qubits{depth}", progress.num_qubits));
    }

    fn on_record(&mut self, record: &BenchmarkRecord) {
        if record.is_failure() {
            self.failures += 1;
        }
    }

    fn on_finish(&mut self, _summary: &SweepSummary) {
        self.bar.finish_and_clear();
    }
}

/// Execute the run command.
pub fn execute(args: &RunArgs) -> Result<()> {
    let mut config = SweepConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    let mut generator = build_generator(args.variant, config.convention)?;

    let mut backend = SimulatorBackend::new().with_max_qubits(args.max_sim_qubits);
    if let Some(secs) = args.time_limit {
        backend = backend.with_time_limit(time_limit(secs)?);
    }
    if let Some(seed) = config.seed {
        backend = backend.with_seed(seed);
    }

    let mut runner = BenchmarkRunner::from_config(config.clone())?;
    let schema = config.schema_for(generator.as_ref());
    let mut sink = CsvResultSink::open(&config.output, schema)
        .with_context(|| format!("failed to open {}", config.output.display()))?;

    println!(
        "{} Sweeping {} on {} ({} samples per cell)",
        style("→").cyan().bold(),
        style(generator.name()).green(),
        style(backend.name()).green(),
        config.samples
    );
    info!(
        output = %config.output.display(),
        columns = %sink.schema().header().join(","),
        "appending results"
    );
    if let Some(widest) = config.qubits.max().filter(|&w| w > backend.max_qubits()) {
        println!(
            "{} Widths {}..={} exceed the simulator limit of {} qubits and will be recorded as failures",
            style("!").yellow().bold(),
            backend.max_qubits() + 1,
            widest,
            backend.max_qubits()
        );
    }

    let mut observer = ProgressObserver::new()?;
    let summary =
        runner.run_sweep_observed(generator.as_mut(), &mut backend, &mut sink, &mut observer)?;

    println!(
        "{} Wrote {} rows to {} in {:.2?} ({} failed)",
        style("→").cyan().bold(),
        sink.rows_written(),
        style(config.output.display()).yellow(),
        summary.elapsed,
        observer.failures,
    );

    if config.single.is_on() {
        print_statistics(&summary);
    }

    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
        println!(
            "{} Summary written to {}",
            style("→").cyan().bold(),
            style(path.display()).yellow()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        run: RunArgs,
    }

    fn parse(args: &[&str]) -> RunArgs {
        let mut argv = vec!["run"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).unwrap().run
    }

    #[test]
    fn test_apply_qubit_bounds() {
        let mut config = SweepConfig::default();
        parse(&["--variant", "random", "--qubits", "8"]).apply(&mut config);
        assert_eq!(config.qubits, QubitRange::inclusive(4, 8));
        assert_eq!(config.widths(), vec![4, 5, 6, 7, 8]);

        let mut config = SweepConfig::default();
        parse(&["--variant", "random", "--min-qubits", "2", "--qubits", "3"]).apply(&mut config);
        assert_eq!(config.widths(), vec![2, 3]);
    }

    #[test]
    fn test_apply_depths() {
        let mut config = SweepConfig::default();
        parse(&["--variant", "random", "--depth", "6"]).apply(&mut config);
        assert_eq!(config.depths, DepthSchedule::Range { min: 1, max: 6 });

        let mut config = SweepConfig::default();
        parse(&["--variant", "random", "--depths", "3,9"]).apply(&mut config);
        assert_eq!(config.depths, DepthSchedule::List(vec![3, 9]));
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut config = SweepConfig {
            samples: 7,
            seed: Some(3),
            ..SweepConfig::default()
        };
        parse(&["--variant", "qft", "--out", "x.csv"]).apply(&mut config);
        assert_eq!(config.samples, 7);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.output, PathBuf::from("x.csv"));
        assert!(!config.record_measurement);
    }
}
