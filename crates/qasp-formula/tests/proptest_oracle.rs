//! Property-based tests for formula parsing and phase-oracle synthesis.

use proptest::prelude::*;

use qasp_adapter_sim::Statevector;
use qasp_formula::{Expr, parse, phase_oracle_expr, satisfying_assignments};
use qasp_ir::{Circuit, QubitId};

const VARS: [&str; 3] = ["a", "b", "c"];

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Expr::Const),
        prop::sample::select(VARS.to_vec()).prop_map(|v| Expr::Var(v.to_string())),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| Expr::Not(Box::new(e))),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::And(Box::new(l), Box::new(r))),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::Xor(Box::new(l), Box::new(r))),
            (inner.clone(), inner).prop_map(|(l, r)| Expr::Or(Box::new(l), Box::new(r))),
        ]
    })
}

proptest! {
    /// Printing a formula and parsing it back yields the same tree.
    #[test]
    fn test_display_parse_roundtrip(expr in arb_expr()) {
        let text = expr.to_string();
        prop_assert_eq!(parse(&text).unwrap(), expr);
    }

    /// The oracle negates exactly the satisfying basis states of |+++⟩.
    #[test]
    fn test_oracle_marks_satisfying_assignments(expr in arb_expr()) {
        let oracle = phase_oracle_expr(&expr, &VARS).unwrap();

        let mut circuit = Circuit::with_size("check", 3, 0);
        for q in 0..3 {
            circuit.h(QubitId(q)).unwrap();
        }
        circuit
            .compose(&oracle, &[QubitId(0), QubitId(1), QubitId(2)])
            .unwrap();

        let solutions = satisfying_assignments(&expr, &VARS);
        let sv = Statevector::from_circuit(&circuit);
        for (i, amp) in sv.amplitudes().iter().enumerate() {
            let expected = if solutions.contains(&i) { -1.0 } else { 1.0 };
            prop_assert!((amp.re * 8f64.sqrt() - expected).abs() < 1e-9);
            prop_assert!(amp.im.abs() < 1e-9);
        }
    }
}

#[test]
fn marks_models_of_the_running_example() {
    let expr = parse("(p & ~q & r) | (~p & q & r)").unwrap();
    let oracle = phase_oracle_expr(&expr, &["p", "q", "r"]).unwrap();

    let mut circuit = Circuit::with_size("check", 3, 0);
    for q in 0..3 {
        circuit.h(QubitId(q)).unwrap();
    }
    circuit
        .compose(&oracle, &[QubitId(0), QubitId(1), QubitId(2)])
        .unwrap();

    let sv = Statevector::from_circuit(&circuit);
    let negative: Vec<usize> = sv
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(_, a)| a.re < 0.0)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(negative, vec![0b101, 0b110]);
}
