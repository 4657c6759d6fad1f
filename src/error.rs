use thiserror::Error;

use crate::parse::ParseError;
use crate::{CompileError, EvaluationError, TableError};

/// Unified error type covering condition parsing, engine construction, table
/// construction and execution.
///
/// Every layer has its own error enum; this one exists so callers chaining
/// several steps can use a single `?`.
#[derive(Debug, Error)]
pub enum RulefoldError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Table(#[from] TableError),
}
