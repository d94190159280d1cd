//! Error types for the formula compiler.

use qasp_ir::IrError;
use thiserror::Error;

/// Errors that can occur while parsing or compiling a formula.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormulaError {
    /// Lexer error (invalid character).
    #[error("Lexer error at position {position}: {message}")]
    LexerError { position: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at position {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        position: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// No variables to build qubits from.
    #[error("Variable order is empty")]
    EmptyVariableOrder,

    /// A variable appears twice in the variable order.
    #[error("Duplicate variable in order: {0}")]
    DuplicateVariable(String),

    /// The formula mentions a variable missing from the order.
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// Truth-table synthesis over too many variables.
    #[error("Formula has {got} variables, at most {max} are supported")]
    TooManyVariables { got: usize, max: usize },

    /// Circuit construction failed.
    #[error(transparent)]
    Circuit(#[from] IrError),
}

/// Result type for formula operations.
pub type FormulaResult<T> = Result<T, FormulaError>;
