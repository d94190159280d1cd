//! Oracles: a classical predicate paired with its phase-marking circuit.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use qasp_ir::Circuit;

use crate::error::{QaspError, QaspResult};
use crate::model::Model;

/// Classical side of an oracle.
pub type Predicate = Arc<dyn Fn(&Model) -> bool + Send + Sync>;

/// A predicate over models together with a circuit that flips the phase of
/// the basis states it accepts.
///
/// `qubit_names[i]` is the variable carried by qubit `i` of the circuit.
#[derive(Clone)]
pub struct Oracle {
    predicate: Predicate,
    circuit: Circuit,
    qubit_names: Vec<String>,
}

impl Oracle {
    /// Wrap a hand-built marking circuit.
    pub fn new(
        predicate: impl Fn(&Model) -> bool + Send + Sync + 'static,
        circuit: Circuit,
        qubit_names: Vec<String>,
    ) -> QaspResult<Self> {
        if qubit_names.len() != circuit.num_qubits() {
            return Err(QaspError::InvalidModels(format!(
                "{} qubit names given for a {}-qubit oracle",
                qubit_names.len(),
                circuit.num_qubits()
            )));
        }
        Ok(Self {
            predicate: Arc::new(predicate),
            circuit,
            qubit_names,
        })
    }

    /// Build an oracle accepting exactly `models`.
    ///
    /// Qubit `i` carries `var_order[i]`; without an explicit order the
    /// variables of the first model are used in name order.
    pub fn from_models(models: &[Model], var_order: Option<&[String]>) -> QaspResult<Self> {
        let first = models
            .first()
            .ok_or_else(|| QaspError::InvalidModels("empty model set".into()))?;
        let order: Vec<String> = match var_order {
            Some(order) => order.to_vec(),
            None => first.variables().into_iter().map(String::from).collect(),
        };

        if let Some(bad) = models.iter().find(|m| !m.is_total_over(&order)) {
            return Err(QaspError::InvalidModels(format!(
                "model {bad} does not assign exactly the variables {order:?}"
            )));
        }

        let formula = models_to_formula(models, &order);
        let circuit = qasp_formula::phase_oracle(&formula, &order)?;
        debug!(
            models = models.len(),
            variables = order.len(),
            %formula,
            "oracle built from model set"
        );

        let accepted: BTreeSet<Model> = models.iter().cloned().collect();
        Ok(Self {
            predicate: Arc::new(move |candidate: &Model| accepted.contains(candidate)),
            circuit,
            qubit_names: order,
        })
    }

    /// Whether the classical predicate accepts `model`.
    pub fn accepts(&self, model: &Model) -> bool {
        (self.predicate)(model)
    }

    /// The phase-marking circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Variable name of each circuit qubit, in index order.
    pub fn qubit_names(&self) -> &[String] {
        &self.qubit_names
    }

    /// Number of qubits of the marking circuit.
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }

    /// Names of the qubits not listed in `aux_qubits`, in index order.
    pub fn search_variables(&self, aux_qubits: &[usize]) -> Vec<String> {
        self.qubit_names
            .iter()
            .enumerate()
            .filter(|(i, _)| !aux_qubits.contains(i))
            .map(|(_, name)| name.clone())
            .collect()
    }
}

impl fmt::Debug for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Oracle")
            .field("circuit", &self.circuit.name())
            .field("qubit_names", &self.qubit_names)
            .finish_non_exhaustive()
    }
}

/// Disjunction of one conjunction of literals per model.
fn models_to_formula(models: &[Model], order: &[String]) -> String {
    models
        .iter()
        .map(|model| {
            let literals: Vec<String> = order
                .iter()
                .map(|name| match model.value(name) {
                    Some(true) => name.clone(),
                    _ => format!("~{name}"),
                })
                .collect();
            format!("({})", literals.join(" & "))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
