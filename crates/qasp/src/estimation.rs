//! Amplitude estimation by phase estimation of the amplification iterate.
//!
//! A counting register of `t` qubits controls powers `Q^(2^idx)` of the
//! iterate built on the augmented algorithm; an inverse QFT (without swap)
//! turns the kicked-back phase into a binary fraction whose `m` most
//! significant bits are measured. [`decode`] maps those bits to an interval
//! of phases and an interval of derived values.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use qasp_hal::Backend;
use qasp_ir::{Circuit, QubitId};

use crate::amplification::sample_one;
use crate::assembler::{QubitLayout, augment, build_iterate};
use crate::error::{QaspError, QaspResult};
use crate::interval::Interval;
use crate::oracle::Oracle;

/// Largest counting register accepted by [`build_circuit`]; the circuit
/// holds `2^t - 1` controlled iterates.
pub const MAX_COUNTING_QUBITS: u32 = 16;

/// Width `t = m + ceil(log2(2 + 1/(2 eps)))` of the counting register, at
/// most [`MAX_COUNTING_QUBITS`].
pub fn counting_qubits(m: u32, eps: f64) -> QaspResult<u32> {
    if m == 0 {
        return Err(QaspError::InvalidPrecision("m > 0".into()));
    }
    if !(eps.is_finite() && eps > 0.0) {
        return Err(QaspError::InvalidPrecision(format!("eps > 0, got {eps}")));
    }
    let extra = (2.0 + 1.0 / (2.0 * eps)).log2().ceil() as u32;
    let t = m.saturating_add(extra);
    if t > MAX_COUNTING_QUBITS {
        return Err(QaspError::InvalidPrecision(format!(
            "{t} counting qubits for m = {m}, eps = {eps}; at most {MAX_COUNTING_QUBITS}"
        )));
    }
    Ok(t)
}

/// An estimation circuit and its qubit roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationCircuit {
    /// The circuit, measuring into register `result`.
    pub circuit: Circuit,
    /// Counting qubits `0..t`; qubit 0 receives the most significant bit.
    pub counting: Vec<QubitId>,
    /// Number of measured counting bits.
    pub precision: u32,
    /// Roles of the qubits of the augmented algorithm, in circuit indices.
    pub layout: QubitLayout,
}

impl EstimationCircuit {
    /// Search qubits of the iterate, augmentation qubit included.
    pub fn num_search_qubits(&self) -> usize {
        self.layout.search.len()
    }
}

/// Build the estimation circuit for `m` output bits with failure
/// probability at most `eps`.
///
/// The algorithm and oracle are always augmented. Outcome character `i` is
/// counting bit `i`, most significant first.
pub fn build_circuit(
    algorithm: &Circuit,
    oracle: &Circuit,
    m: u32,
    eps: f64,
    aux_qubits: &[usize],
) -> QaspResult<EstimationCircuit> {
    let t = counting_qubits(m, eps)?;
    let (algorithm, oracle) = augment(algorithm, oracle)?;
    let inner = QubitLayout::new(algorithm.num_qubits(), aux_qubits, true)?;
    let iterate = build_iterate(&algorithm, &oracle, &inner.search)?;

    let mut circuit = Circuit::new("Est");
    let count = circuit.add_qreg("count", t);
    let work = circuit.add_qubits_from(&algorithm);
    let result = circuit.add_creg("result", m);

    for &q in &count {
        circuit.h(q)?;
    }
    circuit.compose(&algorithm, &work)?;

    let mut power = iterate.controlled()?;
    for (idx, &control) in count.iter().enumerate() {
        let mapping: Vec<QubitId> = std::iter::once(control)
            .chain(work.iter().copied())
            .collect();
        circuit.compose(&power, &mapping)?;
        if idx + 1 < count.len() {
            power = power.repeat(2);
        }
    }

    circuit.compose(&Circuit::inverse_qft(t)?, &count)?;
    for (i, &q) in count.iter().take(m as usize).enumerate() {
        circuit.measure(q, result[m as usize - 1 - i])?;
    }

    debug!(
        counting_qubits = t,
        precision = m,
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        "estimation circuit assembled"
    );
    Ok(EstimationCircuit {
        circuit,
        counting: count,
        precision: m,
        layout: inner.shifted(t),
    })
}

/// Default value map: `N sin²(p/2)` with `N = 2^num_search_qubits`, the
/// number of marked states of the augmented search space.
pub fn solution_count(num_search_qubits: usize) -> impl Fn(f64) -> f64 {
    let n = 2f64.powi(num_search_qubits as i32);
    move |phase| n * (phase / 2.0).sin().powi(2)
}

/// `scale · sin²(p/2)`, for weighted or conditional quantities.
pub fn scaled_count(scale: f64) -> impl Fn(f64) -> f64 {
    move |phase| scale * (phase / 2.0).sin().powi(2)
}

/// Decode measured bits with the default [`solution_count`] map.
pub fn decode(bits: &str, num_search_qubits: usize) -> QaspResult<(Interval, Interval)> {
    decode_with(bits, solution_count(num_search_qubits))
}

/// Decode measured bits into a phase interval and a value interval.
///
/// With `φ = Σ bit[i]·2^-(i+1)`, the phase interval is
/// `[2πφ, 2π(φ + 2^-m))` when `φ ≤ 1/2`, and its reflection
/// `(2π - 2π(φ + 2^-m), 2π - 2πφ]` otherwise. The value interval applies
/// `count_fn` to both endpoints.
pub fn decode_with(
    bits: &str,
    count_fn: impl Fn(f64) -> f64,
) -> QaspResult<(Interval, Interval)> {
    if bits.is_empty() {
        return Err(QaspError::Decode {
            outcome: String::new(),
            reason: "no bits measured".into(),
        });
    }

    let mut phi = 0.0;
    let mut weight = 1.0;
    for c in bits.chars() {
        weight /= 2.0;
        match c {
            '0' => {}
            '1' => phi += weight,
            other => {
                return Err(QaspError::Decode {
                    outcome: bits.to_string(),
                    reason: format!("unexpected character '{other}'"),
                });
            }
        }
    }

    let (lower, upper) = (2.0 * PI * phi, 2.0 * PI * (phi + weight));
    let phase = if phi <= 0.5 {
        Interval::closed_open(lower, upper)
    } else {
        Interval::open_closed(2.0 * PI - upper, 2.0 * PI - lower)
    };
    Ok((phase, phase.map(count_fn)))
}

/// Result of [`Estimator::exec_count`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationResult {
    /// The sampled circuit.
    pub circuit: EstimationCircuit,
    /// The measured outcome, most significant bit first.
    pub bits: String,
    /// Interval of the iterate's eigenphase.
    pub phase: Interval,
    /// Interval of the derived value.
    pub value: Interval,
}

/// Runs amplitude estimation on a backend.
pub struct Estimator<'a, B: Backend + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: Backend + ?Sized> Estimator<'a, B> {
    /// Create an estimator.
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Estimate the number of solutions of `oracle`.
    pub fn exec_count(
        &mut self,
        algorithm: &Circuit,
        oracle: &Oracle,
        m: u32,
        eps: f64,
        aux_qubits: &[usize],
    ) -> QaspResult<EstimationResult> {
        let circuit = build_circuit(algorithm, oracle.circuit(), m, eps, aux_qubits)?;
        let count_fn = solution_count(circuit.num_search_qubits());
        self.sample_and_decode(circuit, count_fn)
    }

    /// Estimate with a custom value map.
    pub fn exec_count_with(
        &mut self,
        algorithm: &Circuit,
        oracle: &Oracle,
        m: u32,
        eps: f64,
        aux_qubits: &[usize],
        count_fn: impl Fn(f64) -> f64,
    ) -> QaspResult<EstimationResult> {
        let circuit = build_circuit(algorithm, oracle.circuit(), m, eps, aux_qubits)?;
        self.sample_and_decode(circuit, count_fn)
    }

    #[instrument(skip_all, fields(backend = self.backend.name(), precision = circuit.precision))]
    fn sample_and_decode(
        &mut self,
        circuit: EstimationCircuit,
        count_fn: impl Fn(f64) -> f64,
    ) -> QaspResult<EstimationResult> {
        let bits = sample_one(&mut *self.backend, &circuit.circuit)?;
        let (phase, value) = decode_with(&bits, count_fn)?;
        info!(%bits, %phase, %value, "estimate decoded");
        Ok(EstimationResult {
            circuit,
            bits,
            phase,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::algorithm::walsh_hadamard;

    #[test]
    fn test_counting_qubits() {
        // log2(2 + 3) = 2.32
        assert_eq!(counting_qubits(3, 1.0 / 6.0).unwrap(), 6);
        // log2(2 + 0.5) = 1.32
        assert_eq!(counting_qubits(4, 1.0).unwrap(), 6);
        assert!(matches!(
            counting_qubits(0, 0.1),
            Err(QaspError::InvalidPrecision(_))
        ));
        assert!(counting_qubits(3, 0.0).is_err());
        assert!(counting_qubits(3, f64::NAN).is_err());
    }

    #[test]
    fn test_counting_register_is_bounded() {
        assert_eq!(counting_qubits(14, 1.0).unwrap(), MAX_COUNTING_QUBITS);
        assert!(matches!(
            counting_qubits(15, 1.0),
            Err(QaspError::InvalidPrecision(_))
        ));
        assert!(counting_qubits(3, 1e-12).is_err());
        assert!(counting_qubits(u32::MAX, 1.0).is_err());

        let algorithm = walsh_hadamard(1).unwrap();
        let mut oracle = Circuit::with_size("oracle", 1, 0);
        oracle.z(QubitId(0)).unwrap();
        assert!(matches!(
            build_circuit(&algorithm, &oracle, 40, 0.1, &[]),
            Err(QaspError::InvalidPrecision(_))
        ));
    }

    #[test]
    fn test_decode_quarter_turn() {
        let (phase, value) = decode("0100", 3).unwrap();
        assert!(phase.contains(FRAC_PI_2));
        assert!(phase.lower_closed && !phase.upper_closed);
        assert!((phase.width() - 2.0 * PI / 16.0).abs() < 1e-12);
        assert!((value.lower - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_decode_reflects_upper_half() {
        // φ = 3/4 is read as 2π - 3π/2
        let (phase, _) = decode("11", 2).unwrap();
        assert!(!phase.lower_closed && phase.upper_closed);
        assert!(phase.lower.abs() < 1e-12);
        assert!((phase.upper - FRAC_PI_2).abs() < 1e-12);

        // φ = 1/2 stays in the lower half
        let (half, _) = decode("1", 1).unwrap();
        assert!(half.lower_closed);
        assert!((half.lower - PI).abs() < 1e-12);
    }

    #[test]
    fn test_decode_is_total() {
        for x in 0..32u32 {
            let bits = format!("{x:05b}");
            let (phase, value) = decode(&bits, 2).unwrap();
            assert!(phase.lower >= -1e-12);
            assert!(phase.upper <= PI + 2.0 * PI / 32.0 + 1e-12);
            assert!((phase.width() - 2.0 * PI / 32.0).abs() < 1e-12);
            assert!(value.lower.is_finite() && value.upper.is_finite());
        }
        assert!(decode("", 2).is_err());
        assert!(matches!(decode("01a", 2), Err(QaspError::Decode { .. })));
    }

    #[test]
    fn test_scaled_count() {
        let f = scaled_count(8.0);
        assert!((f(PI) - 8.0).abs() < 1e-12);
        assert!((f(FRAC_PI_2) - 4.0).abs() < 1e-12);
        assert!((solution_count(3)(FRAC_PI_2) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_circuit_layout() {
        let algorithm = walsh_hadamard(2).unwrap();
        let mut oracle = Circuit::with_size("oracle", 2, 0);
        oracle.cz(QubitId(0), QubitId(1)).unwrap();

        let est = build_circuit(&algorithm, &oracle, 2, 0.25, &[]).unwrap();
        // t = 2 + ceil(log2(4)) = 4
        assert_eq!(est.counting.len(), 4);
        assert_eq!(est.circuit.num_qubits(), 4 + 3);
        assert_eq!(est.circuit.num_clbits(), 2);
        assert_eq!(est.num_search_qubits(), 3);
        assert_eq!(est.layout.augmentation, Some(QubitId(6)));
        assert_eq!(est.circuit.qubit_register(QubitId(0)), Some(("count", 0)));
        assert_eq!(est.circuit.qubit_register(QubitId(6)), Some(("aug", 0)));

        let measures: Vec<(u32, u32)> = est
            .circuit
            .instructions()
            .iter()
            .filter(|i| i.is_measure())
            .map(|i| (i.targets[0].0, i.clbits[0].0))
            .collect();
        assert_eq!(measures, vec![(0, 1), (1, 0)]);
    }
}
