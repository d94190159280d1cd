//! Initialization algorithms.
//!
//! The search and estimation engines take the state-preparation operator
//! `A` as a plain circuit; these are the two preparations used in practice
//! plus auxiliary padding for oracles that need scratch qubits.

use qasp_ir::Circuit;

use crate::error::{QaspError, QaspResult};

/// Uniform superposition over `n` qubits: `H` on each.
pub fn walsh_hadamard(n: u32) -> QaspResult<Circuit> {
    let mut circuit = Circuit::new("WH");
    for q in circuit.add_qreg("q", n) {
        circuit.h(q)?;
    }
    Ok(circuit)
}

/// Independent bits where qubit `i` reads 1 with probability `weights[i]`.
pub fn from_weights(weights: &[f64]) -> QaspResult<Circuit> {
    if let Some((index, &weight)) = weights
        .iter()
        .enumerate()
        .find(|&(_, w)| !(0.0..=1.0).contains(w))
    {
        return Err(QaspError::InvalidWeight { index, weight });
    }

    let mut circuit = Circuit::new("Rot");
    let qubits = circuit.add_qreg("q", weights.len() as u32);
    for (&q, &w) in qubits.iter().zip(weights) {
        circuit.ry(2.0 * (1.0 - w).sqrt().acos(), q)?;
    }
    Ok(circuit)
}

/// `algorithm` followed by `n_aux` idle qubits in register `aux`.
pub fn with_auxiliary(algorithm: &Circuit, n_aux: u32) -> Circuit {
    let mut padded = algorithm.clone();
    padded.add_qreg("aux", n_aux);
    padded
}
