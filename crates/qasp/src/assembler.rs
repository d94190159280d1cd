//! Circuit assembly for amplitude amplification.
//!
//! Everything here is a pure function of its inputs: circuits are taken by
//! reference and new circuits are returned. Both engines share [`augment`]
//! and [`build_iterate`].
//!
//! Outcome strings of an [`AmplificationCircuit`] list the measured qubits
//! in ascending index order from left to right.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use qasp_ir::{Circuit, QubitId};

use crate::error::{QaspError, QaspResult};

/// Role of every qubit in a search register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitLayout {
    /// Qubits reflected over by the iterate, augmentation qubit included.
    pub search: Vec<QubitId>,
    /// Scratch qubits of the oracle; never measured, never reflected over.
    pub aux: Vec<QubitId>,
    /// The augmentation qubit, always the last one when present.
    pub augmentation: Option<QubitId>,
}

impl QubitLayout {
    /// Partition `num_qubits` qubits.
    ///
    /// `aux_qubits` index the qubits before augmentation. With `augmented`
    /// set, the last of the `num_qubits` is the augmentation qubit.
    pub fn new(num_qubits: usize, aux_qubits: &[usize], augmented: bool) -> QaspResult<Self> {
        let original = if augmented {
            num_qubits.checked_sub(1).ok_or(QaspError::NoSearchQubits)?
        } else {
            num_qubits
        };

        for (i, &a) in aux_qubits.iter().enumerate() {
            if a >= original {
                return Err(QaspError::AuxiliaryOutOfRange {
                    index: a,
                    num_qubits: original,
                });
            }
            if aux_qubits[..i].contains(&a) {
                return Err(QaspError::DuplicateAuxiliary(a));
            }
        }
        if aux_qubits.len() == original {
            return Err(QaspError::NoSearchQubits);
        }

        let aux: Vec<QubitId> = aux_qubits.iter().map(|&a| QubitId(a as u32)).collect();
        let search = (0..num_qubits as u32)
            .map(QubitId)
            .filter(|q| !aux.contains(q))
            .collect();
        Ok(Self {
            search,
            aux,
            augmentation: augmented.then(|| QubitId(original as u32)),
        })
    }

    /// Search qubits other than the augmentation qubit, in index order.
    pub fn measured(&self) -> Vec<QubitId> {
        self.search
            .iter()
            .copied()
            .filter(|&q| Some(q) != self.augmentation)
            .collect()
    }

    /// Number of search qubits excluding the augmentation qubit.
    pub fn num_measured(&self) -> usize {
        self.search.len() - usize::from(self.augmentation.is_some())
    }

    /// The same layout with every qubit moved up by `offset`.
    pub fn shifted(&self, offset: u32) -> Self {
        let shift = |q: &QubitId| QubitId(q.0 + offset);
        Self {
            search: self.search.iter().map(shift).collect(),
            aux: self.aux.iter().map(shift).collect(),
            augmentation: self.augmentation.as_ref().map(shift),
        }
    }
}

/// A sampled-ready amplification circuit and how it was built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmplificationCircuit {
    /// The circuit, measuring into register `result`.
    pub circuit: Circuit,
    /// Qubit roles.
    pub layout: QubitLayout,
    /// Number of iterates applied after initialization.
    pub iterations: u64,
}

/// Append an augmentation qubit in equal superposition.
///
/// The returned algorithm has register `aug` as its last qubit; the returned
/// oracle is the input oracle controlled on that qubit.
pub fn augment(algorithm: &Circuit, oracle: &Circuit) -> QaspResult<(Circuit, Circuit)> {
    check_sizes(algorithm, oracle)?;

    let mut algorithm_aug = algorithm.clone();
    algorithm_aug.set_name("AlgorithmAug");
    let aug = algorithm_aug.add_qreg("aug", 1)[0];
    algorithm_aug.h(aug)?;

    let mut oracle_aug = oracle.empty_like("OracleAug");
    let aug = oracle_aug.add_qreg("aug", 1)[0];
    let mapping: Vec<QubitId> = std::iter::once(aug)
        .chain((0..oracle.num_qubits() as u32).map(QubitId))
        .collect();
    oracle_aug.compose(&oracle.controlled()?, &mapping)?;

    Ok((algorithm_aug, oracle_aug))
}

/// The amplification iterate `Q = A (2|0><0| - I) A† S_f`.
///
/// The zero reflection acts on `search_qubits` only. Its sign is an explicit
/// global phase of π so that controlled powers of `Q` have eigenphases
/// `±2θ`, where `sin²θ` is the probability of a marked outcome.
pub fn build_iterate(
    algorithm: &Circuit,
    oracle: &Circuit,
    search_qubits: &[QubitId],
) -> QaspResult<Circuit> {
    check_sizes(algorithm, oracle)?;
    if search_qubits.is_empty() {
        return Err(QaspError::NoSearchQubits);
    }

    let all: Vec<QubitId> = (0..algorithm.num_qubits() as u32).map(QubitId).collect();
    let mut iterate = algorithm.empty_like("Q");
    iterate.compose(oracle, &all)?;
    iterate.compose(&algorithm.inverse()?, &all)?;
    for &q in search_qubits {
        iterate.x(q)?;
    }
    iterate.mcz(search_qubits)?;
    for &q in search_qubits {
        iterate.x(q)?;
    }
    iterate.global_phase(PI)?;
    iterate.compose(algorithm, &all)?;
    Ok(iterate)
}

/// Initialization, `iterations` iterates, then measurement of every
/// non-auxiliary, non-augmentation qubit into register `result`.
///
/// With `augmented` set, `algorithm` and `oracle` must already carry the
/// augmentation qubit as their last qubit (see [`augment`]).
pub fn compose_amplification_circuit(
    algorithm: &Circuit,
    oracle: &Circuit,
    iterations: u64,
    augmented: bool,
    aux_qubits: &[usize],
) -> QaspResult<AmplificationCircuit> {
    check_sizes(algorithm, oracle)?;
    let layout = QubitLayout::new(algorithm.num_qubits(), aux_qubits, augmented)?;
    let measured = layout.measured();

    let all: Vec<QubitId> = (0..algorithm.num_qubits() as u32).map(QubitId).collect();
    let mut circuit = algorithm.empty_like("Amp");
    let result = circuit.add_creg("result", measured.len() as u32);
    circuit.compose(algorithm, &all)?;
    if iterations > 0 {
        let iterate = build_iterate(algorithm, oracle, &layout.search)?;
        for _ in 0..iterations {
            circuit.compose(&iterate, &all)?;
        }
    }
    for (&clbit, &qubit) in result.iter().zip(measured.iter().rev()) {
        circuit.measure(qubit, clbit)?;
    }

    debug!(
        qubits = circuit.num_qubits(),
        search = layout.search.len(),
        aux = layout.aux.len(),
        augmented,
        iterations,
        ops = circuit.num_ops(),
        "amplification circuit assembled"
    );
    Ok(AmplificationCircuit {
        circuit,
        layout,
        iterations,
    })
}

/// Amplification circuit for a known solution count `m`, augmenting first
/// when more than half of the search space is marked.
pub fn optimal_amplification_circuit(
    algorithm: &Circuit,
    oracle: &Circuit,
    m: u64,
    aux_qubits: &[usize],
) -> QaspResult<AmplificationCircuit> {
    check_sizes(algorithm, oracle)?;
    let n = QubitLayout::new(algorithm.num_qubits(), aux_qubits, false)?.num_measured();
    let iterations = optimal_iterations(n, m)?;

    if augment_needed(n, m) {
        let (algorithm, oracle) = augment(algorithm, oracle)?;
        compose_amplification_circuit(&algorithm, &oracle, iterations, true, aux_qubits)
    } else {
        compose_amplification_circuit(algorithm, oracle, iterations, false, aux_qubits)
    }
}

/// `round(acos(a) / (2 asin(a)))` with `a = sqrt(m / 2^n)`.
///
/// `n` counts search qubits without augmentation or auxiliary qubits.
pub fn optimal_iterations(n: usize, m: u64) -> QaspResult<u64> {
    check_solution_count(n, m)?;
    let amplitude = (m as f64 / search_space(n)).sqrt();
    Ok((amplitude.acos() / (2.0 * amplitude.asin())).round() as u64)
}

/// Whether more than half of the `2^n` states are marked.
pub fn augment_needed(n: usize, m: u64) -> bool {
    m as f64 > search_space(n) / 2.0
}

fn search_space(n: usize) -> f64 {
    2f64.powi(n as i32)
}

fn check_solution_count(n: usize, m: u64) -> QaspResult<()> {
    let max = u32::try_from(n)
        .ok()
        .and_then(|n| 1u64.checked_shl(n))
        .unwrap_or(u64::MAX);
    if m == 0 || m > max {
        return Err(QaspError::InvalidSolutionCount { m, n, max });
    }
    Ok(())
}

pub(crate) fn check_sizes(algorithm: &Circuit, oracle: &Circuit) -> QaspResult<()> {
    if algorithm.num_qubits() != oracle.num_qubits() {
        return Err(QaspError::QubitCountMismatch {
            algorithm: algorithm.num_qubits(),
            oracle: oracle.num_qubits(),
        });
    }
    Ok(())
}
