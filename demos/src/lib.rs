//! qasp Demo Suite
//!
//! Command-line drivers for the two algorithm families of `qasp`, run on
//! the local statevector simulator:
//!
//! - **Search with known m**: optimal Grover iterations
//! - **Search with unknown m**: exponential search
//! - **Hand-built oracle**: an oracle with auxiliary qubits that checks the
//!   reduct of a small logic program
//! - **Counting**: amplitude estimation of the number of models
//! - **Navigation**: weighted counting after fixing some atoms
//!
//! Problem instances live in [`problems`].

pub mod problems;

use console::style;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use qasp_adapter_sim::SimulatorBackend;
use qasp_ir::Circuit;

/// Install a `tracing` subscriber; `verbose` counts `-v` flags.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// A simulator, reproducible when `seed` is given.
pub fn simulator(seed: Option<u64>) -> SimulatorBackend {
    debug!(?seed, "statevector simulator");
    match seed {
        Some(seed) => SimulatorBackend::with_seed(seed),
        None => SimulatorBackend::new(),
    }
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print a logic program, one rule per line.
pub fn print_program(program: &str) {
    for rule in program.lines().map(str::trim).filter(|l| !l.is_empty()) {
        println!("    {}", style(rule).italic());
    }
}

/// Print size and gate counts of a circuit.
pub fn print_circuit(circuit: &Circuit) {
    print_result("Name", circuit.name());
    print_result("Qubits", circuit.num_qubits());
    print_result("Classical bits", circuit.num_clbits());
    print_result("Depth", circuit.depth());
    let ops: Vec<String> = circuit
        .count_ops()
        .into_iter()
        .map(|(name, n)| format!("{name}×{n}"))
        .collect();
    print_result("Gates", ops.join(" "));
}
