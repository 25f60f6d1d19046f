//! Variants command implementation.

use console::style;

use qsweep_bench::CouplingConvention;
use qsweep_bench::generator::GeneratorKind;

/// Execute the variants command.
pub fn execute() {
    println!("{}", style("Available generators:").bold());
    println!();

    for kind in GeneratorKind::ALL {
        let shape = match kind.build(CouplingConvention::default()) {
            Ok(generator) if !generator.uses_depth() => "width only".to_string(),
            Ok(generator) => match generator.sparse_depths() {
                Some(depths) => format!(
                    "depths {}",
                    depths
                        .iter()
                        .map(u32::to_string)
                        .collect::<Vec<_>>()
                        .join(",")
                ),
                None => "width x depth".to_string(),
            },
            Err(_) => "unavailable".to_string(),
        };
        println!(
            "  {:<18} {:<16} {}",
            style(kind.as_str()).green(),
            style(shape).dim(),
            kind.description()
        );
    }

    println!();
    println!(
        "Grid conventions: {} (default), {}",
        CouplingConvention::Simple,
        CouplingConvention::ParityStart
    );
}
