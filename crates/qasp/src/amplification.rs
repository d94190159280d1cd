//! Amplitude amplification: known-`m` search and exponential search.
//!
//! Both searches sample one shot at a time from a [`Backend`], decode the
//! outcome into a [`Model`] over the oracle's non-auxiliary variables and
//! stop at the first model the classical predicate accepts. Sampling is
//! bounded by [`SearchConfig`]; an exhausted search returns a result whose
//! `model` is `None`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};

use qasp_hal::Backend;
use qasp_ir::Circuit;

use crate::assembler::{
    AmplificationCircuit, augment, compose_amplification_circuit, optimal_amplification_circuit,
};
use crate::config::SearchConfig;
use crate::error::{QaspError, QaspResult};
use crate::model::Model;
use crate::oracle::Oracle;

/// Outcome of a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Every sampled circuit, in construction order.
    pub circuits: Vec<AmplificationCircuit>,
    /// Sampling attempts for a known-`m` search; rounds for an exponential
    /// search.
    pub attempts: u64,
    /// The accepted model, or `None` when the configured ceiling was hit.
    pub model: Option<Model>,
}

impl SearchResult {
    /// Whether a model was found.
    pub fn is_found(&self) -> bool {
        self.model.is_some()
    }
}

/// Drives amplitude amplification searches on a backend.
pub struct Amplifier<'a, B: Backend + ?Sized> {
    backend: &'a mut B,
    config: SearchConfig,
}

impl<'a, B: Backend + ?Sized> Amplifier<'a, B> {
    /// Create an amplifier with the default configuration.
    pub fn new(backend: &'a mut B) -> Self {
        Self {
            backend,
            config: SearchConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search with a known number `m` of solutions.
    ///
    /// Builds the optimal circuit once and resamples it until a model is
    /// accepted. `attempts` of the result counts samples, not iterates.
    #[instrument(skip(self, algorithm, oracle), fields(backend = self.backend.name()))]
    pub fn find_one_known_m(
        &mut self,
        algorithm: &Circuit,
        oracle: &Oracle,
        m: u64,
        aux_qubits: &[usize],
    ) -> QaspResult<SearchResult> {
        self.config.validate()?;
        let amp = optimal_amplification_circuit(algorithm, oracle.circuit(), m, aux_qubits)?;
        let names = oracle.search_variables(aux_qubits);
        debug!(
            iterations = amp.iterations,
            augmented = amp.layout.augmentation.is_some(),
            "known-m circuit ready"
        );

        for attempt in 1..=self.config.max_attempts {
            if let Some(model) = self.sample_model(&amp.circuit, oracle, &names)? {
                info!(attempt, %model, "solution found");
                return Ok(SearchResult {
                    circuits: vec![amp],
                    attempts: attempt,
                    model: Some(model),
                });
            }
        }

        warn!(
            max_attempts = self.config.max_attempts,
            "known-m search exhausted without a solution"
        );
        Ok(SearchResult {
            circuits: vec![amp],
            attempts: self.config.max_attempts,
            model: None,
        })
    }

    /// Exponential search when the number of solutions is unknown.
    ///
    /// Randomness comes from [`SearchConfig::seed`], or from entropy when no
    /// seed is configured.
    pub fn find_one_unknown_m(
        &mut self,
        algorithm: &Circuit,
        oracle: &Oracle,
        aux_qubits: &[usize],
    ) -> QaspResult<SearchResult> {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.find_one_unknown_m_with_rng(algorithm, oracle, aux_qubits, rng)
    }

    /// Exponential search drawing iteration counts from `rng`.
    ///
    /// Round `l` samples the zero-iteration circuit, then a fresh circuit
    /// with `j` iterates, `j` uniform in `1..=ceil(c^l)`. Every circuit is
    /// augmented. `attempts` of the result is the number of rounds.
    #[instrument(skip(self, algorithm, oracle, rng), fields(backend = self.backend.name()))]
    pub fn find_one_unknown_m_with_rng<R: Rng>(
        &mut self,
        algorithm: &Circuit,
        oracle: &Oracle,
        aux_qubits: &[usize],
        mut rng: R,
    ) -> QaspResult<SearchResult> {
        self.config.validate()?;
        let (algorithm, oracle_circuit) = augment(algorithm, oracle.circuit())?;
        let names = oracle.search_variables(aux_qubits);

        let base = compose_amplification_circuit(&algorithm, &oracle_circuit, 0, true, aux_qubits)?;
        let search_qubits = base.layout.search.len();
        let mut circuits = vec![base];

        for round in 1..=self.config.max_rounds {
            let bound = self.round_bound(round, search_qubits);
            trace!(round, bound, "exponential search round");

            if let Some(model) = self.sample_model(&circuits[0].circuit, oracle, &names)? {
                info!(rounds = round, iterations = 0, %model, "solution found");
                return Ok(found(circuits, round, model));
            }

            let j = rng.gen_range(1..=bound);
            let amp =
                compose_amplification_circuit(&algorithm, &oracle_circuit, j, true, aux_qubits)?;
            let sampled = self.sample_model(&amp.circuit, oracle, &names)?;
            circuits.push(amp);
            if let Some(model) = sampled {
                info!(rounds = round, iterations = j, %model, "solution found");
                return Ok(found(circuits, round, model));
            }
        }

        warn!(
            max_rounds = self.config.max_rounds,
            "exponential search exhausted without a solution"
        );
        Ok(SearchResult {
            circuits,
            attempts: u64::from(self.config.max_rounds),
            model: None,
        })
    }

    /// `ceil(c^l)`, limited by `max_iterations` when set and by
    /// `ceil(sqrt(2^search_qubits))` otherwise.
    fn round_bound(&self, round: u32, search_qubits: usize) -> u64 {
        let cap = self
            .config
            .max_iterations
            .unwrap_or_else(|| saturating_u64(2f64.powf(search_qubits as f64 / 2.0).ceil()));
        let guess = saturating_u64(self.config.growth.powf(f64::from(round)).ceil());
        guess.min(cap).max(1)
    }

    /// Draw one shot and return the decoded model if the oracle accepts it.
    fn sample_model(
        &mut self,
        circuit: &Circuit,
        oracle: &Oracle,
        names: &[String],
    ) -> QaspResult<Option<Model>> {
        let outcome = sample_one(&mut *self.backend, circuit)?;
        let model = Model::from_bits(&outcome, names)?;
        let accepted = oracle.accepts(&model);
        trace!(%outcome, %model, accepted, "sampled");
        Ok(accepted.then_some(model))
    }
}

fn saturating_u64(x: f64) -> u64 {
    if x >= u64::MAX as f64 {
        u64::MAX
    } else {
        x as u64
    }
}

fn found(circuits: Vec<AmplificationCircuit>, round: u32, model: Model) -> SearchResult {
    SearchResult {
        circuits,
        attempts: u64::from(round),
        model: Some(model),
    }
}

/// Run `circuit` for a single shot and return the outcome string.
pub(crate) fn sample_one<B: Backend + ?Sized>(
    backend: &mut B,
    circuit: &Circuit,
) -> QaspResult<String> {
    let result = backend.run(circuit, 1)?;
    result
        .counts
        .most_frequent()
        .map(|(bits, _)| bits.to_string())
        .ok_or_else(|| QaspError::Decode {
            outcome: String::new(),
            reason: format!("backend '{}' returned no outcome", backend.name()),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use qasp_hal::{Capabilities, Counts, ExecutionResult, HalResult};
    use rand::rngs::StdRng;

    use super::*;
    use crate::algorithm::walsh_hadamard;

    /// Replays a fixed list of outcomes, then repeats the last one.
    struct ScriptedBackend {
        caps: Capabilities,
        outcomes: VecDeque<String>,
        last: String,
        runs: usize,
    }

    impl ScriptedBackend {
        fn new(outcomes: &[&str]) -> Self {
            Self {
                caps: Capabilities::simulator(16),
                outcomes: outcomes.iter().map(|s| s.to_string()).collect(),
                last: outcomes.last().map(|s| s.to_string()).unwrap_or_default(),
                runs: 0,
            }
        }
    }

    impl Backend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        fn run(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
            self.validate(circuit, shots)?;
            self.runs += 1;
            let outcome = self.outcomes.pop_front().unwrap_or_else(|| self.last.clone());
            let mut counts = Counts::new();
            counts.insert(outcome, u64::from(shots));
            Ok(ExecutionResult::new(counts, shots))
        }
    }

    fn pqr_oracle() -> Oracle {
        let models: Vec<Model> = vec![
            [("p", true), ("q", false), ("r", true)].into_iter().collect(),
            [("p", false), ("q", true), ("r", true)].into_iter().collect(),
        ];
        Oracle::from_models(&models, None).unwrap()
    }

    #[test]
    fn test_known_m_counts_attempts() {
        let mut backend = ScriptedBackend::new(&["000", "111", "101"]);
        let algorithm = walsh_hadamard(3).unwrap();
        let result = Amplifier::new(&mut backend)
            .find_one_known_m(&algorithm, &pqr_oracle(), 2, &[])
            .unwrap();

        assert_eq!(result.attempts, 3);
        assert_eq!(result.circuits.len(), 1);
        assert_eq!(result.circuits[0].iterations, 1);
        let expected: Model = [("p", true), ("q", false), ("r", true)].into_iter().collect();
        assert_eq!(result.model, Some(expected));
        assert_eq!(backend.runs, 3);
    }

    #[test]
    fn test_known_m_gives_up() {
        let mut backend = ScriptedBackend::new(&["000"]);
        let algorithm = walsh_hadamard(3).unwrap();
        let result = Amplifier::new(&mut backend)
            .with_config(SearchConfig::default().with_max_attempts(5))
            .find_one_known_m(&algorithm, &pqr_oracle(), 2, &[])
            .unwrap();

        assert!(!result.is_found());
        assert_eq!(result.attempts, 5);
        assert_eq!(backend.runs, 5);
    }

    #[test]
    fn test_unknown_m_records_every_circuit() {
        // round 1: base, j-circuit; round 2: base accepts
        let mut backend = ScriptedBackend::new(&["000", "111", "011"]);
        let algorithm = walsh_hadamard(3).unwrap();
        let result = Amplifier::new(&mut backend)
            .find_one_unknown_m_with_rng(&algorithm, &pqr_oracle(), &[], StdRng::seed_from_u64(3))
            .unwrap();

        assert_eq!(result.attempts, 2);
        assert_eq!(result.circuits.len(), 2);
        assert_eq!(result.circuits[0].iterations, 0);
        // ceil(1.5) = 2
        assert!((1..=2).contains(&result.circuits[1].iterations));
        assert!(result.circuits.iter().all(|c| c.layout.augmentation.is_some()));
        assert!(result.is_found());
    }

    #[test]
    fn test_unknown_m_gives_up() {
        let mut backend = ScriptedBackend::new(&["111"]);
        let algorithm = walsh_hadamard(3).unwrap();
        let config = SearchConfig::default()
            .with_max_rounds(3)
            .with_max_iterations(2)
            .with_seed(11);
        let result = Amplifier::new(&mut backend)
            .with_config(config)
            .find_one_unknown_m(&algorithm, &pqr_oracle(), &[])
            .unwrap();

        assert!(!result.is_found());
        assert_eq!(result.attempts, 3);
        assert_eq!(result.circuits.len(), 4);
        assert!(result.circuits[1..].iter().all(|c| c.iterations <= 2));
        assert_eq!(backend.runs, 6);
    }

    #[test]
    fn test_round_bound() {
        let mut backend = ScriptedBackend::new(&["0"]);
        let amp = Amplifier::new(&mut backend);
        assert_eq!(amp.round_bound(1, 8), 2);
        assert_eq!(amp.round_bound(2, 8), 3);
        assert_eq!(amp.round_bound(3, 8), 4);
        // sqrt(2^8) = 16
        assert_eq!(amp.round_bound(10, 8), 16);
        assert_eq!(amp.round_bound(60, 8), 16);
        // sqrt(2^3) = 2.83
        assert_eq!(amp.round_bound(10, 3), 3);
        assert_eq!(amp.round_bound(10_000, 64), 1 << 32);
        let capped = amp.with_config(SearchConfig::default().with_max_iterations(40));
        assert_eq!(capped.round_bound(3, 8), 4);
        assert_eq!(capped.round_bound(10, 8), 40);
    }

    #[test]
    fn test_malformed_outcome_is_decode_error() {
        let mut backend = ScriptedBackend::new(&["01"]);
        let algorithm = walsh_hadamard(3).unwrap();
        let err = Amplifier::new(&mut backend)
            .find_one_known_m(&algorithm, &pqr_oracle(), 2, &[])
            .unwrap_err();
        assert!(matches!(err, QaspError::Decode { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut backend = ScriptedBackend::new(&["101"]);
        let algorithm = walsh_hadamard(3).unwrap();
        let err = Amplifier::new(&mut backend)
            .with_config(SearchConfig::default().with_growth(0.5))
            .find_one_unknown_m(&algorithm, &pqr_oracle(), &[])
            .unwrap_err();
        assert!(matches!(err, QaspError::Config(_)));
    }
}
