//! Formula syntax tree.

use std::collections::BTreeSet;
use std::fmt;

/// A boolean formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `true` or `false`.
    Const(bool),
    /// A named variable.
    Var(String),
    /// Negation.
    Not(Box<Expr>),
    /// Conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Exclusive or.
    Xor(Box<Expr>, Box<Expr>),
    /// Disjunction.
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate under `value`, which gives the truth value of each variable.
    pub fn eval(&self, value: &impl Fn(&str) -> bool) -> bool {
        match self {
            Expr::Const(b) => *b,
            Expr::Var(name) => value(name),
            Expr::Not(e) => !e.eval(value),
            Expr::And(l, r) => l.eval(value) && r.eval(value),
            Expr::Xor(l, r) => l.eval(value) ^ r.eval(value),
            Expr::Or(l, r) => l.eval(value) || r.eval(value),
        }
    }

    /// Names of the variables occurring in the formula, sorted.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables<'a>(&'a self, vars: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(name) => {
                vars.insert(name.as_str());
            }
            Expr::Not(e) => e.collect_variables(vars),
            Expr::And(l, r) | Expr::Xor(l, r) | Expr::Or(l, r) => {
                l.collect_variables(vars);
                r.collect_variables(vars);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(b) => write!(f, "{b}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Not(e) => write!(f, "~{e}"),
            Expr::And(l, r) => write!(f, "({l} & {r})"),
            Expr::Xor(l, r) => write!(f, "({l} ^ {r})"),
            Expr::Or(l, r) => write!(f, "({l} | {r})"),
        }
    }
}
