//! qsweep Command-Line Interface
//!
//! Sweeps generated benchmark circuits over qubit widths and depths on the
//! local statevector backend and appends the trial times to a CSV file.
//!
//! ```text
//! qsweep run --variant sycamore --qubits 12 --depth 20 --samples 10 --out sycamore.csv
//! qsweep generate --variant qft --qubits 4
//! qsweep variants
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{generate, run, variants, version};

/// qsweep - quantum circuit execution benchmarks
#[derive(Parser)]
#[command(name = "qsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a benchmark sweep and append results to a CSV file
    Run(run::RunArgs),

    /// Print one generated circuit as JSON
    Generate(generate::GenerateArgs),

    /// List available circuit generators
    Variants,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run(args) => run::execute(&args),
        Commands::Generate(args) => generate::execute(&args),
        Commands::Variants => {
            variants::execute();
            Ok(())
        }
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
