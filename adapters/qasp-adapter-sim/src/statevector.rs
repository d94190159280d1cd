//! Statevector simulation engine.

use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use qasp_ir::{Circuit, Instruction, InstructionKind, StandardGate};

const ONE: Complex64 = Complex64::new(1.0, 0.0);
const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// How a single-target gate acts on the amplitude pair `(|..0..⟩, |..1..⟩)`.
#[derive(Debug, Clone, Copy)]
enum Kernel {
    Identity,
    /// Exchange the pair (X).
    Flip,
    /// Multiply the pair by `(d0, d1)`.
    Diagonal(Complex64, Complex64),
    /// General 2x2 matrix, row major.
    Dense([[Complex64; 2]; 2]),
}

impl Kernel {
    fn of(gate: &StandardGate) -> Self {
        match *gate {
            StandardGate::I => Kernel::Identity,
            StandardGate::X => Kernel::Flip,
            StandardGate::Y => Kernel::Dense([[ZERO, -I], [I, ZERO]]),
            StandardGate::Z => Kernel::Diagonal(ONE, -ONE),
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                Kernel::Dense([[h, h], [h, -h]])
            }
            StandardGate::S => Kernel::Diagonal(ONE, I),
            StandardGate::Sdg => Kernel::Diagonal(ONE, -I),
            StandardGate::T => Kernel::Diagonal(ONE, Complex64::from_polar(1.0, PI / 4.0)),
            StandardGate::Tdg => Kernel::Diagonal(ONE, Complex64::from_polar(1.0, -PI / 4.0)),
            StandardGate::Rx(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new(0.0, -(theta / 2.0).sin());
                Kernel::Dense([[c, s], [s, c]])
            }
            StandardGate::Ry(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new((theta / 2.0).sin(), 0.0);
                Kernel::Dense([[c, -s], [s, c]])
            }
            StandardGate::Rz(theta) => Kernel::Diagonal(
                Complex64::from_polar(1.0, -theta / 2.0),
                Complex64::from_polar(1.0, theta / 2.0),
            ),
            StandardGate::P(theta) => Kernel::Diagonal(ONE, Complex64::from_polar(1.0, theta)),
            // Handled without a target in `apply`.
            StandardGate::GlobalPhase(_) => Kernel::Identity,
        }
    }
}

/// A statevector representing a quantum state.
///
/// Basis index bit `q` holds the value of qubit `q`.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Evolve |0...0⟩ through every gate of `circuit`.
    ///
    /// Measurements and barriers leave the state untouched.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut sv = Self::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst);
        }
        sv
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) {
        let InstructionKind::Gate(gate) = &instruction.kind else {
            return;
        };
        let ctrl_mask = instruction
            .controls
            .iter()
            .fold(0usize, |mask, q| mask | (1 << q.index()));

        if let StandardGate::GlobalPhase(theta) = *gate {
            self.apply_controlled_phase(ctrl_mask, Complex64::from_polar(1.0, theta));
            return;
        }
        if let Some(target) = instruction.targets.first() {
            self.apply_controlled(Kernel::of(gate), ctrl_mask, target.index());
        }
    }

    fn apply_controlled_phase(&mut self, ctrl_mask: usize, phase: Complex64) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & ctrl_mask == ctrl_mask {
                *amp *= phase;
            }
        }
    }

    fn apply_controlled(&mut self, kernel: Kernel, ctrl_mask: usize, target: usize) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask != 0 || i & ctrl_mask != ctrl_mask {
                continue;
            }
            let j = i | tgt_mask;
            match kernel {
                Kernel::Identity => return,
                Kernel::Flip => self.amplitudes.swap(i, j),
                Kernel::Diagonal(d0, d1) => {
                    self.amplitudes[i] *= d0;
                    self.amplitudes[j] *= d1;
                }
                Kernel::Dense(m) => {
                    let a = self.amplitudes[i];
                    let b = self.amplitudes[j];
                    self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                    self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
                }
            }
        }
    }

    /// Running sum of basis-state probabilities, for inverse-CDF sampling.
    pub fn cumulative_probabilities(&self) -> Vec<f64> {
        let mut total = 0.0;
        self.amplitudes
            .iter()
            .map(|amp| {
                total += amp.norm_sqr();
                total
            })
            .collect()
    }
}

/// Pick the basis state whose cumulative interval contains `r * total`.
pub(crate) fn sample_index(cumulative: &[f64], r: f64) -> usize {
    let total = cumulative.last().copied().unwrap_or(0.0);
    let x = r * total;
    cumulative
        .partition_point(|&c| c <= x)
        .min(cumulative.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qasp_ir::QubitId;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], ONE));
        assert!(sv.amplitudes[1..].iter().all(|&a| approx_eq(a, ZERO)));
    }

    #[test]
    fn test_bell_state() {
        let mut circuit = Circuit::with_size("bell", 2, 0);
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let sv = Statevector::from_circuit(&circuit);

        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes[0], h));
        assert!(approx_eq(sv.amplitudes[1], ZERO));
        assert!(approx_eq(sv.amplitudes[2], ZERO));
        assert!(approx_eq(sv.amplitudes[3], h));
    }

    #[test]
    fn test_multi_controlled_z_flips_only_all_ones() {
        let mut circuit = Circuit::with_size("mcz", 3, 0);
        for q in 0..3 {
            circuit.h(QubitId(q)).unwrap();
        }
        circuit.mcz(&[QubitId(0), QubitId(1), QubitId(2)]).unwrap();
        let sv = Statevector::from_circuit(&circuit);

        for (i, amp) in sv.amplitudes().iter().enumerate() {
            let sign = if i == 7 { -1.0 } else { 1.0 };
            assert!(approx_eq(*amp, Complex64::new(sign / 8f64.sqrt(), 0.0)));
        }
    }

    #[test]
    fn test_controlled_global_phase_is_relative() {
        let mut circuit = Circuit::with_size("cphase", 1, 0);
        circuit.h(QubitId(0)).unwrap().global_phase(PI).unwrap();
        let controlled = circuit.controlled().unwrap();

        let mut prep = Circuit::with_size("prep", 2, 0);
        prep.h(QubitId(0)).unwrap();
        prep.compose(&controlled, &[QubitId(0), QubitId(1)]).unwrap();
        let sv = Statevector::from_circuit(&prep);

        // |0⟩|0⟩ untouched; control set gives -|1⟩|+⟩.
        let h = FRAC_1_SQRT_2;
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(h, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(-0.5, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], ZERO));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(-0.5, 0.0)));
    }

    #[test]
    fn test_ry_weight() {
        let w: f64 = 0.3;
        let mut circuit = Circuit::with_size("rot", 1, 0);
        circuit.ry(2.0 * (1.0 - w).sqrt().acos(), QubitId(0)).unwrap();
        let probs = Statevector::from_circuit(&circuit).probabilities();
        assert!((probs[1] - w).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_restores_zero_state() {
        let mut circuit = Circuit::with_size("mix", 3, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .ry(0.7, QubitId(1))
            .unwrap()
            .ccx(QubitId(0), QubitId(1), QubitId(2))
            .unwrap()
            .t(QubitId(2))
            .unwrap()
            .cp(1.1, QubitId(2), QubitId(0))
            .unwrap();
        let mut round_trip = circuit.clone();
        round_trip
            .compose(&circuit.inverse().unwrap(), &[QubitId(0), QubitId(1), QubitId(2)])
            .unwrap();

        let sv = Statevector::from_circuit(&round_trip);
        assert!(approx_eq(sv.amplitudes[0], ONE));
    }

    #[test]
    fn test_sample_index() {
        let cumulative = [0.0, 0.25, 0.25, 1.0];
        assert_eq!(sample_index(&cumulative, 0.0), 1);
        assert_eq!(sample_index(&cumulative, 0.1), 1);
        assert_eq!(sample_index(&cumulative, 0.25), 3);
        assert_eq!(sample_index(&cumulative, 0.99), 3);
    }
}
