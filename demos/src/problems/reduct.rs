//! A hand-built oracle that checks stability through the reduct.
//!
//! For the program
//!
//! ```text
//! p :- not q.
//! q.
//! ```
//!
//! the oracle computes, on auxiliary qubits, the least model of the reduct
//! with respect to the candidate `{p, q}` assignment and flips the phase when
//! it equals the candidate. The only stable model is `{q}`.

use qasp::{Model, Oracle, QaspResult, walsh_hadamard, with_auxiliary};
use qasp_ir::{Circuit, QubitId};

/// Source text of the program.
pub const REDUCT_PROGRAM: &str = "
    p :- not q.
    q.
";

const NAMES: [&str; 8] = [
    "p",
    "q",
    "p_if_not_q",
    "p_in_reduct",
    "q_in_reduct",
    "p_equal",
    "q_equal",
    "equal",
];

/// Uniform superposition over `p, q`, identity on the six auxiliary qubits.
pub fn reduct_algorithm() -> QaspResult<Circuit> {
    let mut algorithm = with_auxiliary(&walsh_hadamard(2)?, 6);
    algorithm.set_name("WH x Id");
    Ok(algorithm)
}

/// The oracle and the indices of its auxiliary qubits.
pub fn reduct_oracle() -> QaspResult<(Oracle, Vec<usize>)> {
    let mut circuit = Circuit::new("Oracle");
    let p = circuit.add_qreg(NAMES[0], 1)[0];
    let q = circuit.add_qreg(NAMES[1], 1)[0];
    let p_if_not_q = circuit.add_qreg(NAMES[2], 1)[0];
    let p_in_reduct = circuit.add_qreg(NAMES[3], 1)[0];
    let q_in_reduct = circuit.add_qreg(NAMES[4], 1)[0];
    let p_equal = circuit.add_qreg(NAMES[5], 1)[0];
    let q_equal = circuit.add_qreg(NAMES[6], 1)[0];
    let equal = circuit.add_qreg(NAMES[7], 1)[0];
    let all: Vec<QubitId> = (0..NAMES.len() as u32).map(QubitId).collect();

    // p_if_not_q = ¬q
    circuit.x(p_if_not_q)?.cx(q, p_if_not_q)?;
    circuit.barrier(all.iter().copied())?;

    // least model of the reduct
    circuit.cx(p_if_not_q, p_in_reduct)?.x(q_in_reduct)?;
    circuit.barrier(all.iter().copied())?;

    // x_equal = (x == x_in_reduct)
    for (atom, reduct, eq) in [(p, p_in_reduct, p_equal), (q, q_in_reduct, q_equal)] {
        circuit.ccx(atom, reduct, eq)?;
        circuit.x(atom)?.x(reduct)?;
        circuit.ccx(atom, reduct, eq)?;
        circuit.x(atom)?.x(reduct)?;
    }
    circuit.barrier(all.iter().copied())?;
    let undo = circuit.inverse()?;

    // phase flip when both atoms agree with the reduct
    circuit.x(equal)?.h(equal)?;
    circuit.ccx(p_equal, q_equal, equal)?;
    circuit.h(equal)?.x(equal)?;
    circuit.barrier(all.iter().copied())?;

    circuit.compose(&undo, &all)?;

    let oracle = Oracle::new(
        |candidate: &Model| {
            let q_true = candidate.value("q") == Some(true);
            let expected: Model = [("p", !q_true), ("q", true)].into_iter().collect();
            *candidate == expected
        },
        circuit,
        NAMES.map(String::from).to_vec(),
    )?;
    Ok((oracle, (2..NAMES.len()).collect()))
}
