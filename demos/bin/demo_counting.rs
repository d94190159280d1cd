//! Quantum Counting
//!
//! Estimates the number of stable models of the running example by phase
//! estimation. `--precision 5` gives the sharper estimate.

use clap::Parser;

use qasp::{Estimator, Oracle, counting_qubits, walsh_hadamard};
use qasp_demos::problems::{CHOICE_PROGRAM, choice_models, choice_variables};
use qasp_demos::{
    init_logging, print_circuit, print_header, print_program, print_result, print_section,
    print_success, simulator,
};

#[derive(Parser, Debug)]
#[command(name = "demo-counting")]
#[command(about = "Estimate the number of stable models with quantum counting")]
struct Args {
    /// Measured bits of the estimate (default: ceil(n/2) + 1)
    #[arg(short = 'm', long)]
    precision: Option<u32>,

    /// Probability bound of an estimate outside the interval
    #[arg(long, default_value_t = 1.0 / 6.0)]
    eps: f64,

    /// Seed for the simulator (entropy when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let variables = choice_variables();
    let n = variables.len() as u32;
    let m = args.precision.unwrap_or(n.div_ceil(2) + 1);

    print_header("Quantum Counting");
    print_section("Problem Setup");
    print_program(CHOICE_PROGRAM);
    print_result("Variables", n);
    print_result("Precision (bits)", m);
    print_result("Counting qubits", counting_qubits(m, args.eps)?);

    let algorithm = walsh_hadamard(n)?;
    let oracle = Oracle::from_models(&choice_models(), Some(&variables))?;

    let mut backend = simulator(args.seed);
    let result = Estimator::new(&mut backend).exec_count(&algorithm, &oracle, m, args.eps, &[])?;

    print_section("Used Circuit");
    print_circuit(&result.circuit.circuit);

    print_section("Result");
    print_result("Measured bits", &result.bits);
    print_result("Phase", format!("{:.4}", result.phase));
    print_result("Stable models", format!("{:.2}", result.value));
    println!();
    print_success("Counting complete!");

    if args.json {
        let summary = serde_json::json!({
            "bits": result.bits,
            "phase": result.phase,
            "value": result.value,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
