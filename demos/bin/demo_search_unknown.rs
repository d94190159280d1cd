//! Exponential Search
//!
//! Finds a stable model of the running example without knowing how many
//! there are, growing the guessed number of iterations geometrically.

use clap::Parser;

use qasp::{Amplifier, Oracle, SearchConfig, walsh_hadamard};
use qasp_demos::problems::{CHOICE_PROGRAM, choice_models};
use qasp_demos::{
    init_logging, print_circuit, print_header, print_program, print_result, print_section,
    print_success, print_warning, simulator,
};

#[derive(Parser, Debug)]
#[command(name = "demo-search-unknown")]
#[command(about = "Find a stable model with exponential search (unknown model count)")]
struct Args {
    /// Growth factor of the iteration guess
    #[arg(short, long, default_value = "1.5")]
    growth: f64,

    /// Maximum number of rounds
    #[arg(long, default_value = "64")]
    max_rounds: u32,

    /// Seed for the search and the simulator (entropy when absent)
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

    let models = choice_models();
    let oracle = Oracle::from_models(&models, None)?;
    let n = oracle.num_qubits();
    let algorithm = walsh_hadamard(n as u32)?;

    let mut config = SearchConfig::default()
        .with_growth(args.growth)
        .with_max_rounds(args.max_rounds);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    print_header("Exponential Search (unknown m)");
    print_section("Problem Setup");
    print_program(CHOICE_PROGRAM);
    print_result("Variables", oracle.qubit_names().join(", "));
    print_result("Growth factor", config.growth);

    let mut backend = simulator(args.seed);
    let result = Amplifier::new(&mut backend)
        .with_config(config)
        .find_one_unknown_m(&algorithm, &oracle, &[])?;

    print_section("Used Circuits");
    for (i, amp) in result.circuits.iter().enumerate() {
        println!("  #{i}: {} iterations", amp.iterations);
        print_circuit(&amp.circuit);
    }

    print_section("Result");
    print_result("Rounds", result.attempts);
    match &result.model {
        Some(model) => {
            print_result("Stable model", model);
            println!();
            print_success("Search complete!");
        }
        None => print_warning("No stable model found within the round limit"),
    }

    if args.json {
        let iterations: Vec<u64> = result.circuits.iter().map(|c| c.iterations).collect();
        let summary = serde_json::json!({
            "rounds": result.attempts,
            "iterations": iterations,
            "model": result.model,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
