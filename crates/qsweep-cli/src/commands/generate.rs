//! Generate command implementation.

use anyhow::{Result, bail};
use clap::Args;
use rand::SeedableRng;
use rand::rngs::StdRng;

use qsweep_bench::CouplingConvention;
use qsweep_bench::generator::GeneratorKind;

use super::common::build_generator;

/// Arguments of `qsweep generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Circuit generator (see `qsweep variants`)
    #[arg(long)]
    pub variant: GeneratorKind,

    /// Qubit width
    #[arg(short, long)]
    pub qubits: u32,

    /// Layer count (ignored by width-only generators)
    #[arg(short, long, default_value_t = 1)]
    pub depth: u32,

    /// Seed for gate selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Coupling convention for grid generators
    #[arg(long, default_value_t = CouplingConvention::Simple)]
    pub convention: CouplingConvention,
}

/// Execute the generate command, printing the circuit as JSON on stdout.
pub fn execute(args: &GenerateArgs) -> Result<()> {
    if args.qubits == 0 {
        bail!("--qubits must be at least 1");
    }

    let mut generator = build_generator(args.variant, args.convention)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let circuit = generator.generate(args.qubits, args.depth, &mut rng)?;
    println!("{}", circuit.to_json()?);
    Ok(())
}
