//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit execution benchmarks",
        style("qsweep").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsweep-ir           Circuit intermediate representation");
    println!("  qsweep-hal          Backend adapter contract");
    println!("  qsweep-bench        Generators and sweep harness");
    println!("  qsweep-adapter-sim  Statevector backend");
    println!("  qsweep-cli          Command-line interface");
    println!();
    println!("License: {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
