//! qasp Local Statevector Simulator
//!
//! Exact statevector simulation of qasp circuits with sampled terminal
//! measurements. Gates may carry any number of controls, and a controlled
//! global phase acts as a relative phase on the all-ones control subspace.
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```rust
//! use qasp_adapter_sim::SimulatorBackend;
//! use qasp_hal::Backend;
//! use qasp_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! let mut backend = SimulatorBackend::with_seed(7);
//! let result = backend.run(&circuit, 100).unwrap();
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 100);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
