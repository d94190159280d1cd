//! qasp Hardware Abstraction Layer
//!
//! A small, synchronous interface between the amplitude amplification and
//! estimation engines and whatever samples their circuits.
//!
//! - [`Backend`] runs a circuit for a number of shots
//! - [`Capabilities`] describes the limits a backend enforces
//! - [`Counts`] and [`ExecutionResult`] carry the measured histogram
//! - [`BackendConfig`] and [`BackendFactory`] build backends from JSON settings
//!
//! # Bitstring convention
//!
//! Bitstrings in [`Counts`] list classical bits with clbit 0 as the
//! rightmost character.
//!
//! # Implementing a Backend
//!
//! ```rust
//! use qasp_hal::{Backend, Capabilities, Counts, ExecutionResult, HalResult};
//! use qasp_ir::Circuit;
//!
//! struct AllZeros {
//!     caps: Capabilities,
//! }
//!
//! impl Backend for AllZeros {
//!     fn name(&self) -> &str {
//!         "all-zeros"
//!     }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.caps
//!     }
//!
//!     fn run(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         self.validate(circuit, shots)?;
//!         let mut counts = Counts::new();
//!         counts.insert("0".repeat(circuit.num_clbits()), u64::from(shots));
//!         Ok(ExecutionResult::new(counts, shots))
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
