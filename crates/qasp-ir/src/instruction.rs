//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A (possibly controlled) gate.
    Gate(StandardGate),
    /// Measurement of `targets[i]` into `clbits[i]`.
    Measure,
    /// Barrier (no effect on the state).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Control qubits; the gate fires on the subspace where all are |1⟩.
    pub controls: Vec<QubitId>,
    /// Target qubits.
    pub targets: Vec<QubitId>,
    /// Classical bits written by a measurement.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(
        gate: StandardGate,
        controls: impl IntoIterator<Item = QubitId>,
        targets: impl IntoIterator<Item = QubitId>,
    ) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            controls: controls.into_iter().collect(),
            targets: targets.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create an uncontrolled single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [], [qubit])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            controls: vec![],
            targets: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            controls: vec![],
            targets: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// All qubits touched by this instruction, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls.iter().chain(self.targets.iter()).copied()
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the name of the instruction, prefixed by one `c` per control.
    pub fn name(&self) -> String {
        match &self.kind {
            InstructionKind::Gate(g) => match self.controls.len() {
                0 => g.name().to_string(),
                1 => format!("c{}", g.name()),
                n => format!("mc{n}{}", g.name()),
            },
            InstructionKind::Measure => "measure".into(),
            InstructionKind::Barrier => "barrier".into(),
        }
    }

    /// The same instruction with one more control qubit, prepended.
    ///
    /// Barriers are extended to cover the control; measurements have no
    /// controlled form and yield `None`.
    pub fn with_control(&self, control: QubitId) -> Option<Self> {
        match self.kind {
            InstructionKind::Gate(_) => {
                let mut controls = Vec::with_capacity(self.controls.len() + 1);
                controls.push(control);
                controls.extend_from_slice(&self.controls);
                Some(Self {
                    controls,
                    ..self.clone()
                })
            }
            InstructionKind::Barrier => {
                let mut inst = self.clone();
                inst.targets.insert(0, control);
                Some(inst)
            }
            InstructionKind::Measure => None,
        }
    }

    /// The adjoint instruction, `None` for measurements.
    pub fn inverse(&self) -> Option<Self> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(Self {
                kind: InstructionKind::Gate(g.inverse()),
                ..self.clone()
            }),
            InstructionKind::Barrier => Some(self.clone()),
            InstructionKind::Measure => None,
        }
    }

    /// Rewrite every qubit operand through `map`.
    pub fn remap(&self, map: impl Fn(QubitId) -> QubitId) -> Self {
        Self {
            kind: self.kind.clone(),
            controls: self.controls.iter().map(|&q| map(q)).collect(),
            targets: self.targets.iter().map(|&q| map(q)).collect(),
            clbits: self.clbits.clone(),
        }
    }
}
