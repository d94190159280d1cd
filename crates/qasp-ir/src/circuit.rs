//! High-level circuit builder API.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// Instructions are kept as a flat list in application order. Qubits and
/// classical bits are numbered densely from zero, so a [`QubitId`] doubles as
/// the qubit's bit position in a basis-state index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// An empty circuit with the same qubits and classical bits as `self`.
    pub fn empty_like(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            instructions: vec![],
        }
    }

    fn next_qubit_id(&self) -> QubitId {
        QubitId(self.qubits.len() as u32)
    }

    fn next_clbit_id(&self) -> ClbitId {
        ClbitId(self.clbits.len() as u32)
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.next_qubit_id();
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = self.next_qubit_id();
                self.qubits.push(Qubit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    /// Append a copy of every qubit of `other`, register labels included.
    ///
    /// Returns the new ids in `other`'s qubit order, ready to be used as a
    /// [`Circuit::compose`] mapping.
    pub fn add_qubits_from(&mut self, other: &Circuit) -> Vec<QubitId> {
        other
            .qubits
            .iter()
            .map(|q| {
                let id = self.next_qubit_id();
                self.qubits.push(Qubit {
                    id,
                    register: q.register.clone(),
                    index: q.index,
                });
                id
            })
            .collect()
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = self.next_clbit_id();
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = self.next_clbit_id();
                self.clbits.push(Clbit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    /// Validate an instruction against this circuit and append it.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name());

        let mut seen = Vec::with_capacity(instruction.controls.len() + instruction.targets.len());
        for q in instruction.qubits() {
            if q.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit: q,
                    gate_name: gate_name(),
                });
            }
            if seen.contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: gate_name(),
                });
            }
            seen.push(q);
        }

        for &c in &instruction.clbits {
            if c.index() >= self.clbits.len() {
                return Err(IrError::ClbitNotFound { clbit: c });
            }
        }

        let expected = match &instruction.kind {
            InstructionKind::Gate(g) => g.num_targets(),
            InstructionKind::Measure => {
                if instruction.clbits.len() != 1 {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: "measure".into(),
                        expected: 1,
                        got: instruction.clbits.len(),
                    });
                }
                1
            }
            InstructionKind::Barrier => instruction.targets.len(),
        };
        if instruction.targets.len() != expected {
            return Err(IrError::QubitCountMismatch {
                gate_name: instruction.name(),
                expected,
                got: instruction.targets.len(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))
    }

    /// Multiply the state by `e^{iθ}`.
    pub fn global_phase(&mut self, theta: f64) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::GlobalPhase(theta), [], []))
    }

    // =========================================================================
    // Controlled gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::X, [control], [target]))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::Z, [control], [target]))
    }

    /// Apply controlled phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::P(theta), [control], [target]))
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::X, [c1, c2], [target]))
    }

    /// Apply an X gate controlled on every qubit in `controls`.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(
            StandardGate::X,
            controls.iter().copied(),
            [target],
        ))
    }

    /// Flip the phase of the all-ones state of `qubits`.
    ///
    /// The last qubit is used as the target; the operation is symmetric.
    pub fn mcz(&mut self, qubits: &[QubitId]) -> IrResult<&mut Self> {
        let Some((&target, controls)) = qubits.split_last() else {
            return Err(IrError::QubitCountMismatch {
                gate_name: "mcz".into(),
                expected: 1,
                got: 0,
            });
        };
        self.apply(Instruction::gate(
            StandardGate::Z,
            controls.iter().copied(),
            [target],
        ))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate with explicit controls and targets.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        controls: impl IntoIterator<Item = QubitId>,
        targets: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, controls, targets))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Whole-circuit transformations
    // =========================================================================

    /// Append `other`, sending its qubit `i` to `mapping[i]` of this circuit.
    ///
    /// Classical bits are taken over by index.
    pub fn compose(&mut self, other: &Circuit, mapping: &[QubitId]) -> IrResult<&mut Self> {
        if mapping.len() != other.num_qubits() {
            return Err(IrError::MappingMismatch {
                circuit: other.name.clone(),
                expected: other.num_qubits(),
                got: mapping.len(),
            });
        }
        for (i, q) in mapping.iter().enumerate() {
            if mapping[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: None,
                });
            }
        }

        for inst in &other.instructions {
            self.apply(inst.remap(|q| mapping[q.index()]))?;
        }
        Ok(self)
    }

    /// A copy of this circuit controlled on a new qubit.
    ///
    /// The control becomes qubit 0; every original qubit `i` moves to `i + 1`
    /// and keeps its register label.
    pub fn controlled(&self) -> IrResult<Circuit> {
        if self.has_measurements() {
            return Err(IrError::NonUnitary(self.name.clone()));
        }

        let mut out = Circuit::new(format!("c_{}", self.name));
        let control = out.add_qubit();
        for q in &self.qubits {
            let id = QubitId(q.id.0 + 1);
            out.qubits.push(Qubit {
                id,
                register: q.register.clone(),
                index: q.index,
            });
        }
        out.clbits = self.clbits.clone();

        for inst in &self.instructions {
            let shifted = inst.remap(|q| QubitId(q.0 + 1));
            let controlled = shifted
                .with_control(control)
                .ok_or_else(|| IrError::NonUnitary(self.name.clone()))?;
            out.instructions.push(controlled);
        }
        Ok(out)
    }

    /// The adjoint circuit: instructions reversed, each one inverted.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let instructions = self
            .instructions
            .iter()
            .rev()
            .map(|inst| {
                inst.inverse()
                    .ok_or_else(|| IrError::NonUnitary(self.name.clone()))
            })
            .collect::<IrResult<Vec<_>>>()?;

        Ok(Circuit {
            name: format!("{}_dg", self.name),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            instructions,
        })
    }

    /// This circuit applied `times` times in a row.
    pub fn repeat(&self, times: usize) -> Circuit {
        let mut instructions = Vec::with_capacity(self.instructions.len() * times);
        for _ in 0..times {
            instructions.extend(self.instructions.iter().cloned());
        }
        Circuit {
            name: self.name.clone(),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            instructions,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the circuit.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Count instructions by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Get the circuit depth.
    ///
    /// Barriers synchronise their qubits without adding a layer; uncontrolled
    /// global phases touch no qubit and are free.
    pub fn depth(&self) -> usize {
        let mut qubit_depth = vec![0usize; self.qubits.len()];
        let mut clbit_depth = vec![0usize; self.clbits.len()];

        for inst in &self.instructions {
            let start = inst
                .qubits()
                .map(|q| qubit_depth[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_depth[c.index()]))
                .max();
            let Some(start) = start else { continue };

            let level = if inst.is_barrier() { start } else { start + 1 };
            for q in inst.qubits() {
                qubit_depth[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_depth[c.index()] = level;
            }
        }

        qubit_depth
            .into_iter()
            .chain(clbit_depth)
            .max()
            .unwrap_or(0)
    }

    /// Check whether the circuit contains any measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// Get the instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Register name and position of a qubit, if it belongs to a register.
    pub fn qubit_register(&self, qubit: QubitId) -> Option<(&str, u32)> {
        let q = self.qubits.get(qubit.index())?;
        Some((q.register.as_deref()?, q.index?))
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create an inverse QFT circuit on `n` qubits, without the final swaps.
    ///
    /// Applied to `Σ_y e^{2πiφy}|y⟩` (qubit `j` weighing `2^j` in `y`), qubit 0
    /// ends up holding the most significant bit of `φ` and qubit `n - 1` the
    /// least significant one.
    pub fn inverse_qft(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("iqft", n, 0);

        for j in (0..n).rev() {
            for k in (j + 1)..n {
                let angle = -PI / f64::from(1u32 << (k - j));
                circuit.cp(angle, QubitId(k), QubitId(j))?;
            }
            circuit.h(QubitId(j))?;
        }

        Ok(circuit)
    }
}
