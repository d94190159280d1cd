//! Error types for the core crate.

use thiserror::Error;

/// Errors produced while assembling, sampling or decoding search and
/// estimation circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QaspError {
    /// Circuit construction failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qasp_ir::IrError),

    /// Oracle formula could not be compiled.
    #[error("Formula error: {0}")]
    Formula(#[from] qasp_formula::FormulaError),

    /// The backend rejected or failed to run a circuit.
    #[error("Backend error: {0}")]
    Hal(#[from] qasp_hal::HalError),

    /// A measurement outcome could not be decoded.
    #[error("Cannot decode outcome '{outcome}': {reason}")]
    Decode {
        /// The offending outcome string.
        outcome: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Solution count outside `1..=2^n`.
    #[error("Solution count {m} is invalid for {n} search qubits (expected 1..={max})")]
    InvalidSolutionCount {
        /// Requested solution count.
        m: u64,
        /// Number of search qubits.
        n: usize,
        /// Largest admissible count, `2^n`.
        max: u64,
    },

    /// Estimation accuracy parameter out of range.
    #[error("Estimation precision must satisfy {0}")]
    InvalidPrecision(String),

    /// Algorithm and oracle disagree on the number of qubits.
    #[error("Algorithm has {algorithm} qubits but oracle has {oracle}")]
    QubitCountMismatch {
        /// Qubits of the initialization circuit.
        algorithm: usize,
        /// Qubits of the oracle circuit.
        oracle: usize,
    },

    /// Auxiliary qubit index not in the circuit.
    #[error("Auxiliary qubit {index} out of range for a {num_qubits}-qubit circuit")]
    AuxiliaryOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of qubits of the circuit.
        num_qubits: usize,
    },

    /// Auxiliary qubit listed twice.
    #[error("Auxiliary qubit {0} listed more than once")]
    DuplicateAuxiliary(usize),

    /// No qubit left to search over.
    #[error("Every qubit is auxiliary; nothing left to search over")]
    NoSearchQubits,

    /// A model does not assign the oracle's variables.
    #[error("Invalid model set: {0}")]
    InvalidModels(String),

    /// Invalid initialization weights.
    #[error("Weight {weight} for qubit {index} is outside [0, 1]")]
    InvalidWeight {
        /// Qubit index of the weight.
        index: usize,
        /// The offending weight.
        weight: f64,
    },

    /// Search configuration rejected by [`crate::SearchConfig::validate`].
    #[error("Invalid search configuration: {0}")]
    Config(String),

    /// Configuration could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for core operations.
pub type QaspResult<T> = Result<T, QaspError>;
