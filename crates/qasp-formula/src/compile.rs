//! Phase-oracle synthesis from boolean formulas.
//!
//! The oracle is synthesized from the truth table: every satisfying
//! assignment gets its own multi-controlled Z, conjugated by X gates on the
//! qubits that are false in that assignment.

use std::collections::BTreeSet;

use tracing::debug;

use qasp_ir::{Circuit, QubitId};

use crate::ast::Expr;
use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse;

/// Largest number of variables accepted for truth-table synthesis.
pub const MAX_VARIABLES: usize = 20;

/// Compile `formula` into a circuit that flips the phase of exactly the
/// satisfying assignments.
///
/// Qubit `i` is a one-qubit register named `var_order[i]`; in a basis-state
/// index, bit `i` is the value of that variable.
pub fn phase_oracle<S: AsRef<str>>(formula: &str, var_order: &[S]) -> FormulaResult<Circuit> {
    let expr = parse(formula)?;
    phase_oracle_expr(&expr, var_order)
}

/// [`phase_oracle`] for an already parsed expression.
pub fn phase_oracle_expr<S: AsRef<str>>(expr: &Expr, var_order: &[S]) -> FormulaResult<Circuit> {
    let names = check_variable_order(expr, var_order)?;
    let solutions = satisfying_assignments(expr, &names);

    let mut circuit = Circuit::new("oracle");
    let qubits: Vec<QubitId> = names
        .iter()
        .flat_map(|name| circuit.add_qreg(*name, 1))
        .collect();

    for &assignment in &solutions {
        let zeros: Vec<QubitId> = qubits
            .iter()
            .enumerate()
            .filter(|&(i, _)| (assignment >> i) & 1 == 0)
            .map(|(_, &q)| q)
            .collect();
        for &q in &zeros {
            circuit.x(q)?;
        }
        circuit.mcz(&qubits)?;
        for &q in &zeros {
            circuit.x(q)?;
        }
    }

    debug!(
        formula = %expr,
        variables = names.len(),
        solutions = solutions.len(),
        ops = circuit.num_ops(),
        "phase oracle synthesized"
    );
    Ok(circuit)
}

/// Basis-state indices (bit `i` = `var_order[i]`) on which `expr` holds.
pub fn satisfying_assignments(expr: &Expr, var_order: &[&str]) -> Vec<usize> {
    (0..1usize << var_order.len())
        .filter(|&assignment| {
            expr.eval(&|name: &str| {
                var_order
                    .iter()
                    .position(|v| *v == name)
                    .is_some_and(|i| (assignment >> i) & 1 == 1)
            })
        })
        .collect()
}

fn check_variable_order<'a, S: AsRef<str>>(
    expr: &Expr,
    var_order: &'a [S],
) -> FormulaResult<Vec<&'a str>> {
    if var_order.is_empty() {
        return Err(FormulaError::EmptyVariableOrder);
    }
    if var_order.len() > MAX_VARIABLES {
        return Err(FormulaError::TooManyVariables {
            got: var_order.len(),
            max: MAX_VARIABLES,
        });
    }

    let mut seen = BTreeSet::new();
    let names: Vec<&str> = var_order.iter().map(AsRef::as_ref).collect();
    for name in &names {
        if !seen.insert(*name) {
            return Err(FormulaError::DuplicateVariable((*name).to_string()));
        }
    }
    if let Some(missing) = expr.variables().into_iter().find(|v| !seen.contains(v)) {
        return Err(FormulaError::UndefinedVariable(missing.to_string()));
    }
    Ok(names)
}
