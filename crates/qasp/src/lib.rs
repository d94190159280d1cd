//! `qasp`: amplitude amplification and amplitude estimation over model
//! sets.
//!
//! A problem is given as an explicit set of satisfying [`Model`]s over named
//! boolean variables. [`Oracle::from_models`] turns it into a classical
//! predicate plus a phase-marking circuit. From there:
//!
//! - [`Amplifier`] finds one model, either with a known solution count
//!   (optimal Grover iterations) or with the exponential search that needs
//!   no count at all;
//! - [`Estimator`] runs phase estimation on the amplification iterate and
//!   returns an [`Interval`] guaranteed to hold the solution count (or any
//!   quantity derived from the marked probability) with high probability.
//!
//! Circuits are sampled through any [`qasp_hal::Backend`].
//!
//! # Example
//!
//! ```rust
//! use qasp::{Amplifier, Model, Oracle, walsh_hadamard};
//! use qasp_adapter_sim::SimulatorBackend;
//!
//! let models: Vec<Model> = vec![
//!     [("p", true), ("q", false), ("r", true)].into_iter().collect(),
//!     [("p", false), ("q", true), ("r", true)].into_iter().collect(),
//! ];
//! let oracle = Oracle::from_models(&models, None).unwrap();
//! let algorithm = walsh_hadamard(3).unwrap();
//!
//! let mut backend = SimulatorBackend::with_seed(7);
//! let result = Amplifier::new(&mut backend)
//!     .find_one_known_m(&algorithm, &oracle, 2, &[])
//!     .unwrap();
//! assert!(models.contains(result.model.as_ref().unwrap()));
//! ```
//!
//! # Conventions
//!
//! Outcome strings of amplification circuits list the measured variables in
//! qubit index order, left to right. Estimation outcomes list counting bits
//! most significant first.

pub mod algorithm;
pub mod amplification;
pub mod assembler;
pub mod config;
pub mod error;
pub mod estimation;
pub mod interval;
pub mod model;
pub mod oracle;

pub use algorithm::{from_weights, walsh_hadamard, with_auxiliary};
pub use amplification::{Amplifier, SearchResult};
pub use assembler::{
    AmplificationCircuit, QubitLayout, augment, augment_needed, build_iterate,
    compose_amplification_circuit, optimal_amplification_circuit, optimal_iterations,
};
pub use config::SearchConfig;
pub use error::{QaspError, QaspResult};
pub use estimation::{
    EstimationCircuit, EstimationResult, Estimator, MAX_COUNTING_QUBITS, build_circuit,
    counting_qubits, decode, decode_with, scaled_count, solution_count,
};
pub use interval::Interval;
pub use model::{Literal, Model};
pub use oracle::{Oracle, Predicate};
