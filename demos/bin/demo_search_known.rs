//! Grover Search with a Known Number of Models
//!
//! Builds the oracle of the running example from its stable models and
//! finds one of them with the optimal number of amplification iterations.

use clap::Parser;

use qasp::{Amplifier, Oracle, SearchConfig, optimal_iterations, walsh_hadamard};
use qasp_demos::problems::{CHOICE_PROGRAM, choice_models, choice_variables};
use qasp_demos::{
    init_logging, print_circuit, print_header, print_program, print_result, print_section,
    print_success, print_warning, simulator,
};

#[derive(Parser, Debug)]
#[command(name = "demo-search-known")]
#[command(about = "Find a stable model with Grover search and a known model count")]
struct Args {
    /// Seed for the simulator (entropy when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of samples drawn
    #[arg(long, default_value = "1024")]
    max_attempts: u64,

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

    let models = choice_models();
    let variables = choice_variables();
    let n = variables.len();
    let m = models.len() as u64;

    print_header("Grover Search (known m)");
    print_section("Problem Setup");
    print_program(CHOICE_PROGRAM);
    print_result("Variables", n);
    print_result("Stable models", m);
    print_result("Optimal iterations", optimal_iterations(n, m)?);

    let algorithm = walsh_hadamard(n as u32)?;
    let oracle = Oracle::from_models(&models, Some(&variables))?;
    print_section("Oracle");
    print_circuit(oracle.circuit());

    let mut backend = simulator(args.seed);
    let result = Amplifier::new(&mut backend)
        .with_config(SearchConfig::default().with_max_attempts(args.max_attempts))
        .find_one_known_m(&algorithm, &oracle, m, &[])?;

    print_section("Used Circuit");
    for amp in &result.circuits {
        print_circuit(&amp.circuit);
    }

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

    if args.json {
        let summary = serde_json::json!({
            "attempts": result.attempts,
            "iterations": result.circuits[0].iterations,
            "model": result.model,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
