//! Counting After Navigation
//!
//! Fixes the atoms of a navigation route through the initializer weights and
//! estimates how many stable models remain.

use clap::Parser;

use qasp::{Estimator, Oracle, from_weights, scaled_count};
use qasp_demos::problems::{
    CHOICE_PROGRAM, NAVIGATION_ROUTE, choice_models, choice_variables, navigation_scale,
    navigation_weights,
};
use qasp_demos::{
    init_logging, print_circuit, print_header, print_program, print_result, print_section,
    print_success, simulator,
};

#[derive(Parser, Debug)]
#[command(name = "demo-navigation")]
#[command(about = "Count the stable models left after navigating a route")]
struct Args {
    /// Measured bits of the estimate
    #[arg(short = 'm', long, default_value = "5")]
    precision: u32,

    /// Probability bound of an estimate outside the interval
    #[arg(long, default_value_t = 1.0 / 6.0)]
    eps: f64,

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

    let variables = choice_variables();
    let weights = navigation_weights();
    let route: Vec<String> = NAVIGATION_ROUTE
        .iter()
        .map(|&(atom, value)| if value { atom.to_string() } else { format!("not {atom}") })
        .collect();
    let scale = navigation_scale(variables.len(), NAVIGATION_ROUTE.len());

    print_header("Counting After Navigation");
    print_section("Problem Setup");
    print_program(CHOICE_PROGRAM);
    print_result("Route", format!("<{}>", route.join(", ")));
    print_result("Weights", format!("{weights:?}"));

    let algorithm = from_weights(&weights)?;
    let oracle = Oracle::from_models(&choice_models(), Some(&variables))?;

    let mut backend = simulator(args.seed);
    let result = Estimator::new(&mut backend).exec_count_with(
        &algorithm,
        &oracle,
        args.precision,
        args.eps,
        &[],
        scaled_count(scale),
    )?;

    print_section("Used Circuit");
    print_circuit(&result.circuit.circuit);

    print_section("Result");
    print_result("Measured bits", &result.bits);
    print_result("Stable models on the route", format!("{:.2}", result.value));
    println!();
    print_success("Navigation count complete!");
    Ok(())
}
