//! Quantum gate types.
//!
//! Every gate acts on at most one target qubit. Multi-qubit operations
//! (CNOT, Toffoli, multi-controlled Z, ...) are expressed as a single-target
//! gate together with a list of control qubits on the [`Instruction`].
//!
//! [`Instruction`]: crate::instruction::Instruction

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate diag(1, e^{iθ}).
    P(f64),
    /// Global phase e^{iθ}.
    ///
    /// Acts on no target. Once controlled it becomes a relative phase on the
    /// subspace where every control is set, which is why it is tracked at all.
    GlobalPhase(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::GlobalPhase(_) => "gphase",
        }
    }

    /// Number of target qubits (controls excluded).
    #[inline]
    pub fn num_targets(&self) -> usize {
        match self {
            StandardGate::GlobalPhase(_) => 0,
            _ => 1,
        }
    }

    /// Rotation angle, for parameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::GlobalPhase(t) => Some(*t),
            _ => None,
        }
    }

    /// The adjoint gate.
    pub fn inverse(&self) -> Self {
        match *self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::Rx(t) => StandardGate::Rx(-t),
            StandardGate::Ry(t) => StandardGate::Ry(-t),
            StandardGate::Rz(t) => StandardGate::Rz(-t),
            StandardGate::P(t) => StandardGate::P(-t),
            StandardGate::GlobalPhase(t) => StandardGate::GlobalPhase(-t),
            g @ (StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H) => g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_targets(), 1);
        assert_eq!(StandardGate::GlobalPhase(PI).num_targets(), 0);
        assert_eq!(StandardGate::Ry(0.5).angle(), Some(0.5));
        assert_eq!(StandardGate::X.angle(), None);
        assert_eq!(StandardGate::GlobalPhase(PI).name(), "gphase");
    }

    #[test]
    fn test_inverse_is_involution() {
        let gates = [
            StandardGate::X,
            StandardGate::H,
            StandardGate::S,
            StandardGate::Tdg,
            StandardGate::Ry(0.3),
            StandardGate::P(-1.2),
            StandardGate::GlobalPhase(PI),
        ];
        for g in gates {
            assert_eq!(g.inverse().inverse(), g);
        }
        assert_eq!(StandardGate::S.inverse(), StandardGate::Sdg);
        assert_eq!(StandardGate::Rz(0.7).inverse(), StandardGate::Rz(-0.7));
    }
}
