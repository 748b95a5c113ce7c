//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - SPSA training for a variational quantum classifier",
        style("VQC").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  vqc-ir           Circuit template and instruction IR");
    println!("  vqc-hal          Executor capability, engine process, output parser");
    println!("  vqc-adapter-sim  Seeded statevector simulator");
    println!("  vqc-train        Estimator, risk, SPSA, splitter, trainer");
    println!("  vqc-cli          Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
