//! End-to-end amplitude amplification on the statevector simulator.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use qasp::{Amplifier, Model, Oracle, SearchConfig, augment, walsh_hadamard};
use qasp_adapter_sim::{SimulatorBackend, Statevector};
use qasp_ir::{Circuit, QubitId};

fn model(p: bool, q: bool, r: bool) -> Model {
    [("p", p), ("q", q), ("r", r)].into_iter().collect()
}

fn pqr_models() -> Vec<Model> {
    vec![model(true, false, true), model(false, true, true)]
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn known_m_finds_a_model_in_one_attempt() {
    init_tracing();
    let models = pqr_models();
    let oracle = Oracle::from_models(&models, None).unwrap();
    let algorithm = walsh_hadamard(3).unwrap();

    for seed in 0..4 {
        let mut backend = SimulatorBackend::with_seed(seed);
        let result = Amplifier::new(&mut backend)
            .find_one_known_m(&algorithm, &oracle, 2, &[])
            .unwrap();

        // one iterate rotates |ψ⟩ onto the marked subspace exactly
        assert_eq!(result.circuits[0].iterations, 1);
        assert_eq!(result.attempts, 1);
        assert!(models.contains(result.model.as_ref().unwrap()));
    }
}

#[test]
fn known_m_with_most_states_marked_augments() {
    let models = vec![
        model(false, false, false),
        model(true, false, false),
        model(false, true, false),
        model(true, true, false),
        model(true, true, true),
    ];
    let oracle = Oracle::from_models(&models, None).unwrap();
    let algorithm = walsh_hadamard(3).unwrap();

    let mut backend = SimulatorBackend::with_seed(5);
    let result = Amplifier::new(&mut backend)
        .find_one_known_m(&algorithm, &oracle, 5, &[])
        .unwrap();

    let amp = &result.circuits[0];
    assert_eq!(amp.layout.search.len(), 4);
    assert_eq!(amp.layout.augmentation, Some(QubitId(3)));
    assert_eq!(amp.circuit.num_clbits(), 3);
    assert!(models.contains(result.model.as_ref().unwrap()));

    let (_, oracle_aug) = augment(&algorithm, oracle.circuit()).unwrap();
    assert_eq!(oracle_aug.name(), "OracleAug");
    assert!(
        oracle_aug
            .instructions()
            .iter()
            .all(|i| i.controls.contains(&QubitId(3)))
    );
}

#[test]
fn unknown_m_finds_a_model_with_seeded_rng() {
    init_tracing();
    let models = pqr_models();
    let oracle = Oracle::from_models(&models, None).unwrap();
    let algorithm = walsh_hadamard(3).unwrap();

    for seed in 0..8 {
        let mut backend = SimulatorBackend::with_seed(seed);
        let result = Amplifier::new(&mut backend)
            .find_one_unknown_m_with_rng(&algorithm, &oracle, &[], StdRng::seed_from_u64(seed))
            .unwrap();

        assert!(result.attempts >= 1);
        assert_eq!(result.circuits[0].iterations, 0);
        assert!(models.contains(result.model.as_ref().unwrap()));
    }
}

#[test]
fn unknown_m_is_reproducible_from_config_seed() {
    let oracle = Oracle::from_models(&pqr_models(), None).unwrap();
    let algorithm = walsh_hadamard(3).unwrap();
    let config = SearchConfig::default().with_seed(42);

    let run = || {
        let mut backend = SimulatorBackend::with_seed(9);
        Amplifier::new(&mut backend)
            .with_config(config.clone())
            .find_one_unknown_m(&algorithm, &oracle, &[])
            .unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a.attempts, b.attempts);
    assert_eq!(a.model, b.model);
    let iterations = |r: &qasp::SearchResult| -> Vec<u64> {
        r.circuits.iter().map(|c| c.iterations).collect()
    };
    assert_eq!(iterations(&a), iterations(&b));
}

#[test]
fn auxiliary_qubits_are_neither_measured_nor_reflected() {
    // marks p = 1 through a scratch copy on qubit 1
    let mut circuit = Circuit::new("copy_oracle");
    let p = circuit.add_qreg("p", 1)[0];
    let scratch = circuit.add_qreg("scratch", 1)[0];
    circuit.add_qreg("q", 1);
    circuit.cx(p, scratch).unwrap();
    circuit.z(scratch).unwrap();
    circuit.cx(p, scratch).unwrap();

    let target: Model = [("p", true), ("q", false)].into_iter().collect();
    let oracle = Oracle::new(
        |m: &Model| m.value("p") == Some(true),
        circuit,
        ["p", "scratch", "q"].map(String::from).to_vec(),
    )
    .unwrap();

    let algorithm = {
        let mut a = Circuit::new("A");
        let qs = a.add_qreg("q", 3);
        a.h(qs[0]).unwrap();
        a
    };

    let mut backend = SimulatorBackend::with_seed(3);
    let result = Amplifier::new(&mut backend)
        .find_one_known_m(&algorithm, &oracle, 1, &[1])
        .unwrap();

    assert_eq!(result.circuits[0].layout.measured(), vec![QubitId(0), QubitId(2)]);
    assert_eq!(result.circuits[0].circuit.num_clbits(), 2);
    assert_eq!(result.model, Some(target));
}

proptest! {
    /// Encoding a model as a bitstring and decoding it is the identity.
    #[test]
    fn model_bitstring_roundtrip(values in prop::collection::vec(any::<bool>(), 1..8)) {
        let names: Vec<String> = (0..values.len()).map(|i| format!("v{i}")).collect();
        let model: Model = names.iter().cloned().zip(values).collect();
        let bits = model.to_bits(&names).unwrap();
        prop_assert_eq!(Model::from_bits(&bits, &names).unwrap(), model);
    }

    /// The marking circuit negates exactly the basis states of the models.
    #[test]
    fn oracle_marks_exactly_its_models(mask in 1u8..=255) {
        let names = ["a", "b", "c"];
        let models: Vec<Model> = (0..8usize)
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| names.iter().enumerate().map(|(k, n)| (*n, (i >> k) & 1 == 1)).collect())
            .collect();
        let oracle = Oracle::from_models(&models, None).unwrap();

        let mut circuit = walsh_hadamard(3).unwrap();
        circuit
            .compose(oracle.circuit(), &[QubitId(0), QubitId(1), QubitId(2)])
            .unwrap();
        let sv = Statevector::from_circuit(&circuit);
        for (i, amp) in sv.amplitudes().iter().enumerate() {
            let marked = mask & (1 << i) != 0;
            prop_assert_eq!(amp.re < 0.0, marked);
        }
    }
}

#[test]
fn unknown_m_exhausts_default_rounds_when_nothing_is_accepted() {
    let marking = Oracle::from_models(&pqr_models(), None).unwrap();
    let oracle = Oracle::new(
        |_: &Model| false,
        marking.circuit().clone(),
        marking.qubit_names().to_vec(),
    )
    .unwrap();
    let algorithm = walsh_hadamard(3).unwrap();
    let config = SearchConfig::default();
    let max_rounds = config.max_rounds;

    let mut backend = SimulatorBackend::with_seed(9);
    let result = Amplifier::new(&mut backend)
        .with_config(config)
        .find_one_unknown_m(&algorithm, &oracle, &[])
        .unwrap();

    assert!(result.model.is_none());
    assert_eq!(result.attempts, u64::from(max_rounds));
    assert_eq!(result.circuits.len(), max_rounds as usize + 1);
    // 3 variables + augmentation: sqrt(16) = 4
    assert!(result.circuits.iter().all(|c| c.iterations <= 4));
}
