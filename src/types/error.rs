use thiserror::Error;

use super::value::ValueKind;
use crate::parse::ParseError;

/// Failure while building an engine from its rule list.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid condition for rule {index} ('{condition}'): {source}")]
    InvalidCondition {
        index: usize,
        condition: String,
        #[source]
        source: ParseError,
    },
}

/// Failure while evaluating conditions against a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("unknown column '{column}' (quote string values, e.g. '{column}')")]
    UnknownColumn { column: String },

    #[error("type mismatch: cannot apply '{op}' to {left} and {right}")]
    TypeMismatch {
        op: String,
        left: ValueKind,
        right: ValueKind,
    },

    #[error("condition must produce a boolean mask, found {found}")]
    NonBooleanCondition { found: ValueKind },
}

/// Failure while assembling a [`Table`](super::Table).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },

    #[error("column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
}
