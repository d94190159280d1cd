//! Tests for the statevector simulator backend.

use proptest::prelude::*;

use qasp_adapter_sim::{SimulatorBackend, Statevector};
use qasp_hal::{Backend, HalError};
use qasp_ir::{Circuit, ClbitId, QubitId};

fn ghz(n: u32) -> Circuit {
    let mut circuit = Circuit::with_size("ghz", n, n);
    circuit.h(QubitId(0)).unwrap();
    for i in 0..n - 1 {
        circuit.cx(QubitId(i), QubitId(i + 1)).unwrap();
    }
    for i in 0..n {
        circuit.measure(QubitId(i), ClbitId(i)).unwrap();
    }
    circuit
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

#[test]
fn bell_state_only_correlated_outcomes() {
    let mut backend = SimulatorBackend::with_seed(11);
    let result = backend.run(&ghz(2), 1000).unwrap();

    assert_eq!(result.shots, 1000);
    let counts = &result.counts;
    assert_eq!(counts.get("00") + counts.get("11"), 1000);
    assert!(counts.get("00") > 0);
    assert!(counts.get("11") > 0);
}

#[test]
fn ghz_state_only_all_equal_outcomes() {
    let mut backend = SimulatorBackend::with_seed(5);
    let result = backend.run(&ghz(4), 500).unwrap();
    assert_eq!(
        result.counts.get("0000") + result.counts.get("1111"),
        500
    );
}

#[test]
fn clbit_zero_is_rightmost_character() {
    // q0 = 1, q1 = 0, q2 = 1, q3 = 1
    let mut circuit = Circuit::with_size("basis", 4, 4);
    circuit
        .x(QubitId(0))
        .unwrap()
        .x(QubitId(2))
        .unwrap()
        .x(QubitId(3))
        .unwrap();
    for i in 0..4 {
        circuit.measure(QubitId(i), ClbitId(i)).unwrap();
    }

    let mut backend = SimulatorBackend::with_seed(0);
    let result = backend.run(&circuit, 3).unwrap();
    assert_eq!(result.counts.get("1101"), 3);
}

#[test]
fn reversed_measurement_reads_in_qubit_order() {
    // q0 = 1, q1 = 1, q2 = 0 measured as clbit k <- q(2 - k)
    let mut circuit = Circuit::with_size("reversed", 3, 3);
    circuit.x(QubitId(0)).unwrap().x(QubitId(1)).unwrap();
    for k in 0..3 {
        circuit.measure(QubitId(2 - k), ClbitId(k)).unwrap();
    }

    let mut backend = SimulatorBackend::with_seed(0);
    let result = backend.run(&circuit, 1).unwrap();
    assert_eq!(result.counts.get("110"), 1);
}

#[test]
fn seeded_backends_are_reproducible() {
    let circuit = {
        let mut c = Circuit::with_size("uniform", 3, 3);
        for i in 0..3 {
            c.h(QubitId(i)).unwrap();
            c.measure(QubitId(i), ClbitId(i)).unwrap();
        }
        c
    };

    let mut a = SimulatorBackend::with_seed(42);
    let mut b = SimulatorBackend::with_seed(42);
    for _ in 0..5 {
        let ra = a.run(&circuit, 1).unwrap();
        let rb = b.run(&circuit, 1).unwrap();
        assert_eq!(ra.counts, rb.counts);
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn too_many_qubits_is_rejected() {
    let mut backend = SimulatorBackend::with_max_qubits(5);
    let circuit = Circuit::with_size("big", 10, 1);
    assert!(matches!(
        backend.run(&circuit, 100),
        Err(HalError::CircuitTooLarge(_))
    ));
}

#[test]
fn zero_shots_is_rejected() {
    let mut backend = SimulatorBackend::with_seed(1);
    assert!(matches!(
        backend.run(&ghz(2), 0),
        Err(HalError::InvalidShots(_))
    ));
}

#[test]
fn circuit_without_clbits_is_rejected() {
    let mut backend = SimulatorBackend::with_seed(1);
    let mut circuit = Circuit::with_size("silent", 1, 0);
    circuit.h(QubitId(0)).unwrap();
    assert!(matches!(
        backend.run(&circuit, 1),
        Err(HalError::InvalidCircuit(_))
    ));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn evolution_preserves_norm(angles in prop::collection::vec(-3.0_f64..3.0, 1..8)) {
        let mut circuit = Circuit::with_size("rot", 3, 0);
        for (i, &theta) in angles.iter().enumerate() {
            let q = QubitId((i % 3) as u32);
            circuit.ry(theta, q).unwrap();
            circuit.cp(theta, q, QubitId(((i + 1) % 3) as u32)).unwrap();
            circuit.h(q).unwrap();
        }
        let total: f64 = Statevector::from_circuit(&circuit).probabilities().iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}
