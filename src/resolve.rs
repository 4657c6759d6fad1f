use std::collections::HashMap;

use crate::types::{ColumnView, EvaluationError, Table, ValueKind};
use crate::{ArithOp, CompareOp, Expr};

/// Look up a column by name, borrowing its data from `table`.
///
/// # Errors
///
/// Returns [`EvaluationError::UnknownColumn`] if `name` is not in the table.
pub fn resolve<'t>(name: &str, table: &'t Table) -> Result<ColumnView<'t>, EvaluationError> {
    table
        .get(name)
        .map(|data| data.view())
        .ok_or_else(|| EvaluationError::UnknownColumn {
            column: name.to_owned(),
        })
}

/// Columns referenced by one expression, resolved up front so each name is
/// looked up once per evaluation.
pub(crate) struct Resolved<'t> {
    columns: HashMap<&'t str, ColumnView<'t>>,
}

impl<'t> Resolved<'t> {
    /// Resolve every column `expr` references, failing on the first unknown
    /// name in left-to-right order.
    pub(crate) fn new(expr: &'t Expr, table: &'t Table) -> Result<Self, EvaluationError> {
        let names = expr.columns();
        let mut columns = HashMap::with_capacity(names.len());
        for name in names {
            columns.insert(name, resolve(name, table)?);
        }
        Ok(Self { columns })
    }

    pub(crate) fn get(&self, name: &str) -> Result<ColumnView<'t>, EvaluationError> {
        self.columns
            .get(name)
            .copied()
            .ok_or_else(|| EvaluationError::UnknownColumn {
                column: name.to_owned(),
            })
    }
}

fn mismatch(op: impl ToString, left: ValueKind, right: ValueKind) -> EvaluationError {
    EvaluationError::TypeMismatch {
        op: op.to_string(),
        left,
        right,
    }
}

/// Arithmetic is defined on numbers only.
pub(crate) fn check_arith(
    op: ArithOp,
    left: ValueKind,
    right: ValueKind,
) -> Result<(), EvaluationError> {
    match (left, right) {
        (ValueKind::Number, ValueKind::Number) => Ok(()),
        _ => Err(mismatch(op, left, right)),
    }
}

pub(crate) fn check_negate(operand: ValueKind) -> Result<(), EvaluationError> {
    match operand {
        ValueKind::Number => Ok(()),
        other => Err(mismatch("-", other, other)),
    }
}

/// Operands must share a kind. Ordering is not defined on booleans.
pub(crate) fn check_compare(
    op: CompareOp,
    left: ValueKind,
    right: ValueKind,
) -> Result<(), EvaluationError> {
    if left != right || (op.is_ordering() && left == ValueKind::Boolean) {
        return Err(mismatch(op, left, right));
    }
    Ok(())
}

pub(crate) fn check_logical(
    op: &str,
    left: ValueKind,
    right: ValueKind,
) -> Result<(), EvaluationError> {
    match (left, right) {
        (ValueKind::Boolean, ValueKind::Boolean) => Ok(()),
        _ => Err(mismatch(op, left, right)),
    }
}
