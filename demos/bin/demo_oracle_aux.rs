//! Grover Search with a Hand-Built Oracle
//!
//! The oracle checks stability of a candidate through the reduct, using six
//! auxiliary qubits that are neither reflected over nor measured.

use clap::Parser;

use qasp::Amplifier;
use qasp_demos::problems::{REDUCT_PROGRAM, reduct_algorithm, reduct_oracle};
use qasp_demos::{
    init_logging, print_circuit, print_header, print_program, print_result, print_section,
    print_success, print_warning, simulator,
};

#[derive(Parser, Debug)]
#[command(name = "demo-oracle-aux")]
#[command(about = "Grover search with an oracle using auxiliary qubits")]
struct Args {
    /// Seed for the simulator (entropy when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let algorithm = reduct_algorithm()?;
    let (oracle, aux) = reduct_oracle()?;
    let m = 1;

    print_header("Grover Search (hand-built oracle)");
    print_section("Problem Setup");
    print_program(REDUCT_PROGRAM);
    print_result("Variables", oracle.search_variables(&aux).join(", "));
    print_result("Auxiliary qubits", aux.len());
    print_result("Stable models", m);

    print_section("Oracle");
    print_circuit(oracle.circuit());

    let mut backend = simulator(args.seed);
    let result = Amplifier::new(&mut backend).find_one_known_m(&algorithm, &oracle, m, &aux)?;

    print_section("Used Circuit");
    print_circuit(&result.circuits[0].circuit);

    print_section("Result");
    print_result("Sampling attempts", result.attempts);
    match &result.model {
        Some(model) => {
            print_result("Stable model", model);
            println!();
            print_success("Search complete!");
        }
        None => print_warning("No stable model found within the attempt limit"),
    }
    Ok(())
}
