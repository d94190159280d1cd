//! Boolean formulas to phase oracles.
//!
//! Parses formulas such as `(p & ~q & r) | (~p & q & r)` and compiles them
//! into circuits that multiply every satisfying basis state by -1.
//!
//! # Syntax
//!
//! | Construct | Syntax |
//! |-----------|--------|
//! | variable | `[A-Za-z_][A-Za-z0-9_]*` |
//! | constant | `true`, `false` |
//! | negation | `~x`, `!x` |
//! | conjunction | `x & y` |
//! | exclusive or | `x ^ y` |
//! | disjunction | `x \| y` |
//!
//! # Example
//!
//! ```rust
//! use qasp_formula::phase_oracle;
//!
//! let oracle = phase_oracle("(p & ~q) | (~p & q)", &["p", "q"]).unwrap();
//! assert_eq!(oracle.num_qubits(), 2);
//! ```

pub mod ast;
pub mod compile;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::Expr;
pub use compile::{MAX_VARIABLES, phase_oracle, phase_oracle_expr, satisfying_assignments};
pub use error::{FormulaError, FormulaResult};
pub use parser::parse;
