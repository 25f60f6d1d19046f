//! Helpers shared by commands.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use console::style;

use qsweep_bench::generator::{CircuitGenerator, GeneratorKind};
use qsweep_bench::{CouplingConvention, SweepSummary};

/// Build a generator, naming the variant on failure.
pub fn build_generator(
    kind: GeneratorKind,
    convention: CouplingConvention,
) -> Result<Box<dyn CircuitGenerator>> {
    kind.build(convention)
        .with_context(|| format!("failed to build generator '{kind}'"))
}

/// Convert a `--time-limit` value in seconds.
pub fn time_limit(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        bail!("time limit must be a positive number of seconds, got {secs}");
    }
    Ok(Duration::from_secs_f64(secs))
}

/// Print per-cell statistics for a single-width or single-depth sweep.
pub fn print_statistics(summary: &SweepSummary) {
    println!();
    println!(
        "  {:>6} {:>6} {:>7} {:>12} {:>12} {:>12} {:>12} {:>12}",
        style("qubits").bold(),
        style("depth").bold(),
        style("fails").bold(),
        style("mean").bold(),
        style("std dev").bold(),
        style("q1").bold(),
        style("median").bold(),
        style("q3").bold(),
    );
    for cell in &summary.cells {
        let depth = cell
            .depth
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        match cell.statistics {
            Some(stats) => println!(
                "  {:>6} {:>6} {:>7} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
                cell.num_qubits,
                depth,
                cell.failures,
                stats.mean,
                stats.std_dev,
                stats.first_quartile,
                stats.median,
                stats.third_quartile,
            ),
            None => println!(
                "  {:>6} {:>6} {:>7} {}",
                cell.num_qubits,
                depth,
                cell.failures,
                style("all trials failed").red()
            ),
        }
    }
}
