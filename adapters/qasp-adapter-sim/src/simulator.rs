//! Simulator backend implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, instrument};

use qasp_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, Counts, ExecutionResult, HalError,
    HalResult,
};
use qasp_ir::{Circuit, ClbitId, QubitId};

use crate::statevector::{Statevector, sample_index};

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local simulator backend.
///
/// Each [`run`](Backend::run) evolves the statevector once and then samples
/// the terminal measurements `shots` times. Sampling draws from an owned
/// [`StdRng`], so a seeded backend replays the same outcomes.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Source of measurement randomness.
    rng: StdRng,
}

impl SimulatorBackend {
    /// Create a new simulator backend seeded from system entropy.
    pub fn new() -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, None)
    }

    /// Create a simulator whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, Some(seed))
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(BackendConfig::new("simulator"), max_qubits, None)
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: Option<u64>) -> Self {
        let mut capabilities = Capabilities::simulator(max_qubits);
        capabilities.name.clone_from(&config.name);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            capabilities,
            rng,
        }
    }

    /// Collect `(qubit, clbit)` pairs, rejecting gates after a measurement.
    fn terminal_measurements(circuit: &Circuit) -> HalResult<Vec<(QubitId, ClbitId)>> {
        let mut measured: Vec<(QubitId, ClbitId)> = Vec::new();
        for inst in circuit.instructions() {
            if inst.is_measure() {
                if let (Some(&q), Some(&c)) = (inst.targets.first(), inst.clbits.first()) {
                    measured.push((q, c));
                }
            } else if inst.is_gate() {
                if let Some(q) = inst
                    .qubits()
                    .find(|q| measured.iter().any(|(m, _)| m == q))
                {
                    return Err(HalError::Unsupported(format!(
                        "'{}' acts on {q} after it was measured; only terminal measurements are simulated",
                        inst.name()
                    )));
                }
            }
        }
        Ok(measured)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a basis state as a bitstring with clbit 0 rightmost.
fn outcome_to_bitstring(outcome: usize, measured: &[(QubitId, ClbitId)], num_clbits: usize) -> String {
    let mut bits = vec![b'0'; num_clbits];
    for &(q, c) in measured {
        if (outcome >> q.index()) & 1 == 1 {
            bits[num_clbits - 1 - c.index()] = b'1';
        }
    }
    bits.into_iter().map(char::from).collect()
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name(), qubits = circuit.num_qubits()))]
    fn run(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        self.validate(circuit, shots)?;
        if circuit.num_clbits() == 0 {
            return Err(HalError::InvalidCircuit(format!(
                "circuit '{}' has no classical bits to read out",
                circuit.name()
            )));
        }
        let measured = Self::terminal_measurements(circuit)?;

        let start = Instant::now();
        let sv = Statevector::from_circuit(circuit);
        let cumulative = sv.cumulative_probabilities();
        debug!(ops = circuit.num_ops(), "statevector evolved");

        let mut counts = Counts::new();
        for _ in 0..shots {
            let outcome = sample_index(&cumulative, self.rng.r#gen::<f64>());
            counts.insert(
                outcome_to_bitstring(outcome, &measured, circuit.num_clbits()),
                1,
            );
        }

        let elapsed = start.elapsed();
        debug!(distinct = counts.len(), ?elapsed, "sampling completed");

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            Some(v) => u32::try_from(v)
                .map_err(|_| HalError::Configuration(format!("max_qubits {v} out of range")))?,
            None => DEFAULT_MAX_QUBITS,
        };
        let seed = config.extra_u64("seed")?;
        Ok(Self::build(config, max_qubits, seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert_eq!(backend.name(), "simulator");
    }

    #[test]
    fn test_outcome_to_bitstring_puts_clbit0_right() {
        let measured = [(QubitId(0), ClbitId(0)), (QubitId(2), ClbitId(1))];
        // qubit 0 = 1, qubit 2 = 0
        assert_eq!(outcome_to_bitstring(0b001, &measured, 2), "01");
        // qubit 0 = 0, qubit 2 = 1
        assert_eq!(outcome_to_bitstring(0b100, &measured, 2), "10");
        // unmeasured clbit stays 0
        assert_eq!(outcome_to_bitstring(0b111, &measured[..1], 3), "001");
    }

    #[test]
    fn test_from_config() {
        let config = BackendConfig::new("sim")
            .with_extra("max_qubits", serde_json::json!(8))
            .with_extra("seed", serde_json::json!(42));
        let backend = SimulatorBackend::from_config(config).unwrap();
        assert_eq!(backend.capabilities().num_qubits, 8);
        assert_eq!(backend.name(), "sim");

        let bad = BackendConfig::new("sim").with_extra("max_qubits", serde_json::json!(-1));
        assert!(SimulatorBackend::from_config(bad).is_err());
    }

    #[test]
    fn test_rejects_mid_circuit_measurement() {
        let mut circuit = Circuit::with_size("mid", 1, 1);
        circuit
            .h(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .x(QubitId(0))
            .unwrap();
        let mut backend = SimulatorBackend::with_seed(1);
        assert!(matches!(
            backend.run(&circuit, 10),
            Err(HalError::Unsupported(_))
        ));
    }
}
