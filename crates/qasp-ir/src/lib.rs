//! qasp Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures used by the qasp
//! amplitude amplification and estimation engines.
//!
//! # Overview
//!
//! A [`Circuit`] is a flat list of [`Instruction`]s over densely numbered
//! qubits and classical bits. Every gate has a single target (or none, for a
//! global phase) plus an arbitrary list of controls, so multi-controlled
//! operations such as the reflections of Grover iterates are first class.
//!
//! Whole-circuit transformations return new circuits and leave their input
//! untouched:
//!
//! - [`Circuit::compose`] appends another circuit under an explicit qubit mapping
//! - [`Circuit::controlled`] adds a control qubit at index 0
//! - [`Circuit::inverse`] builds the adjoint
//! - [`Circuit::repeat`] concatenates copies
//!
//! # Example: Controlled Oracle
//!
//! ```rust
//! use qasp_ir::{Circuit, QubitId};
//!
//! let mut oracle = Circuit::new("oracle");
//! let p = oracle.add_qreg("p", 1)[0];
//! let q = oracle.add_qreg("q", 1)[0];
//! oracle.cz(p, q).unwrap();
//!
//! let controlled = oracle.controlled().unwrap();
//! assert_eq!(controlled.num_qubits(), 3);
//! assert_eq!(controlled.qubit_register(QubitId(1)), Some(("p", 0)));
//! ```
//!
//! # Conventions
//!
//! [`Circuit::inverse_qft`] omits the final swap network: after it, qubit 0
//! holds the most significant bit of the estimated phase.

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
