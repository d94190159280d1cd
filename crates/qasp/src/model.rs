//! Truth assignments over named boolean variables.
//!
//! A [`Model`] is a set of [`Literal`]s. Equality is set equality, and
//! iteration follows variable name order, so models can be compared and
//! printed deterministically regardless of how they were built.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QaspError, QaspResult};

/// A variable together with its truth value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Variable name.
    pub name: String,
    /// Assigned value.
    pub value: bool,
}

impl Literal {
    /// Create a new literal.
    pub fn new(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value {
            write!(f, "{}", self.name)
        } else {
            write!(f, "~{}", self.name)
        }
    }
}

/// A set of literals, normally one per variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Model(BTreeSet<Literal>);

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: bool) -> bool {
        self.0.insert(Literal::new(name, value))
    }

    /// The value assigned to `name`, if exactly one literal mentions it.
    pub fn value(&self, name: &str) -> Option<bool> {
        let mut values = self.0.iter().filter(|l| l.name == name).map(|l| l.value);
        match (values.next(), values.next()) {
            (Some(v), None) => Some(v),
            _ => None,
        }
    }

    /// Variables mentioned by the model, in name order, without repetition.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.iter().map(|l| l.name.as_str()).collect();
        names.dedup();
        names
    }

    /// Literals in name order.
    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.0.iter()
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the model has no literals.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the model assigns exactly the variables in `names`, each once.
    pub fn is_total_over<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.len() == names.len() && names.iter().all(|n| self.value(n.as_ref()).is_some())
    }

    /// Encode as a bitstring whose character `k` is the value of `names[k]`.
    pub fn to_bits<S: AsRef<str>>(&self, names: &[S]) -> QaspResult<String> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.value(name)
                    .map(|v| if v { '1' } else { '0' })
                    .ok_or_else(|| {
                        QaspError::InvalidModels(format!(
                            "model {self} does not assign '{name}' exactly once"
                        ))
                    })
            })
            .collect()
    }

    /// Decode a measurement outcome; character `k` is the value of `names[k]`.
    pub fn from_bits<S: AsRef<str>>(outcome: &str, names: &[S]) -> QaspResult<Self> {
        if outcome.chars().count() != names.len() {
            return Err(QaspError::Decode {
                outcome: outcome.to_string(),
                reason: format!("expected {} bits", names.len()),
            });
        }

        let mut model = Model::new();
        for (c, name) in outcome.chars().zip(names) {
            let value = match c {
                '0' => false,
                '1' => true,
                other => {
                    return Err(QaspError::Decode {
                        outcome: outcome.to_string(),
                        reason: format!("unexpected character '{other}'"),
                    });
                }
            };
            model.insert(name.as_ref(), value);
        }
        Ok(model)
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Model {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| Literal::new(name, value))
                .collect(),
        )
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, literal) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{literal}")?;
        }
        write!(f, "}}")
    }
}
