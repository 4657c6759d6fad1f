use crate::resolve::{self, Resolved};
use crate::types::{ColumnView, EvaluationError, Mask, Table, ValueKind};
use crate::{ArithOp, CompareOp, Expr, Value};

/// Evaluate a condition against every row of `table` in one pass.
///
/// Each node produces a whole column of results; literals stay scalar until
/// combined with a column. Both sides of `and`/`or` are always evaluated.
///
/// # Errors
///
/// Returns [`EvaluationError`] if a referenced column is missing, an operator
/// is applied to incompatible kinds, or the condition is not boolean.
pub fn evaluate(expr: &Expr, table: &Table) -> Result<Mask, EvaluationError> {
    let resolved = Resolved::new(expr, table)?;
    let rows = table.num_rows();
    match eval_node(expr, &resolved, rows)? {
        Vector::Flags(flags) => Ok(flags.into_mask(rows)),
        other => Err(EvaluationError::NonBooleanCondition {
            found: other.kind(),
        }),
    }
}

enum Numbers<'a> {
    Scalar(f64),
    Borrowed(&'a [f64]),
    Owned(Vec<f64>),
}

enum Strings<'a> {
    Scalar(&'a str),
    Borrowed(&'a [String]),
}

enum Flags {
    Scalar(bool),
    Owned(Vec<bool>),
}

/// Intermediate result of one node, either broadcast or one value per row.
enum Vector<'a> {
    Numbers(Numbers<'a>),
    Strings(Strings<'a>),
    Flags(Flags),
}

impl Numbers<'_> {
    #[inline]
    fn get(&self, row: usize) -> f64 {
        match self {
            Numbers::Scalar(v) => *v,
            Numbers::Borrowed(v) => v[row],
            Numbers::Owned(v) => v[row],
        }
    }

    fn scalar(&self) -> Option<f64> {
        match self {
            Numbers::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

impl Strings<'_> {
    #[inline]
    fn get(&self, row: usize) -> &str {
        match self {
            Strings::Scalar(v) => v,
            Strings::Borrowed(v) => &v[row],
        }
    }
}

impl Flags {
    #[inline]
    fn get(&self, row: usize) -> bool {
        match self {
            Flags::Scalar(v) => *v,
            Flags::Owned(v) => v[row],
        }
    }

    fn scalar(&self) -> Option<bool> {
        match self {
            Flags::Scalar(v) => Some(*v),
            Flags::Owned(_) => None,
        }
    }

    fn into_mask(self, rows: usize) -> Mask {
        match self {
            Flags::Scalar(v) => Mask::splat(v, rows),
            Flags::Owned(v) => Mask::new(v),
        }
    }
}

impl Vector<'_> {
    fn kind(&self) -> ValueKind {
        match self {
            Vector::Numbers(_) => ValueKind::Number,
            Vector::Strings(_) => ValueKind::String,
            Vector::Flags(_) => ValueKind::Boolean,
        }
    }
}

fn eval_node<'a>(
    expr: &'a Expr,
    resolved: &Resolved<'a>,
    rows: usize,
) -> Result<Vector<'a>, EvaluationError> {
    Ok(match expr {
        Expr::Literal(Value::Number(v)) => Vector::Numbers(Numbers::Scalar(*v)),
        Expr::Literal(Value::String(v)) => Vector::Strings(Strings::Scalar(v)),
        Expr::Literal(Value::Bool(v)) => Vector::Flags(Flags::Scalar(*v)),
        Expr::Column(name) => match resolved.get(name)? {
            ColumnView::Numeric(v) => Vector::Numbers(Numbers::Borrowed(v)),
            ColumnView::Str(v) => Vector::Strings(Strings::Borrowed(v)),
        },
        Expr::Neg(inner) => {
            let inner = eval_node(inner, resolved, rows)?;
            resolve::check_negate(inner.kind())?;
            let Vector::Numbers(n) = inner else {
                unreachable!("kind checked above")
            };
            Vector::Numbers(map_numbers(&n, rows, |x| -x))
        }
        Expr::Arith { left, op, right } => {
            let l = eval_node(left, resolved, rows)?;
            let r = eval_node(right, resolved, rows)?;
            resolve::check_arith(*op, l.kind(), r.kind())?;
            match (l, r) {
                (Vector::Numbers(a), Vector::Numbers(b)) => {
                    Vector::Numbers(arith(*op, &a, &b, rows))
                }
                _ => unreachable!("kinds checked above"),
            }
        }
        Expr::Compare { left, op, right } => {
            let l = eval_node(left, resolved, rows)?;
            let r = eval_node(right, resolved, rows)?;
            resolve::check_compare(*op, l.kind(), r.kind())?;
            Vector::Flags(compare(*op, &l, &r, rows))
        }
        Expr::And(a, b) => {
            let (l, r) = eval_logical("and", a, b, resolved, rows)?;
            Vector::Flags(zip_flags(&l, &r, rows, |x, y| x && y))
        }
        Expr::Or(a, b) => {
            let (l, r) = eval_logical("or", a, b, resolved, rows)?;
            Vector::Flags(zip_flags(&l, &r, rows, |x, y| x || y))
        }
        Expr::Not(inner) => match eval_node(inner, resolved, rows)? {
            Vector::Flags(flags) => Vector::Flags(match flags {
                Flags::Scalar(v) => Flags::Scalar(!v),
                Flags::Owned(v) => Flags::Owned(v.into_iter().map(|x| !x).collect()),
            }),
            other => {
                return Err(EvaluationError::TypeMismatch {
                    op: "not".to_owned(),
                    left: other.kind(),
                    right: other.kind(),
                })
            }
        },
    })
}

fn eval_logical<'a>(
    op: &str,
    a: &'a Expr,
    b: &'a Expr,
    resolved: &Resolved<'a>,
    rows: usize,
) -> Result<(Flags, Flags), EvaluationError> {
    let l = eval_node(a, resolved, rows)?;
    let r = eval_node(b, resolved, rows)?;
    resolve::check_logical(op, l.kind(), r.kind())?;
    match (l, r) {
        (Vector::Flags(l), Vector::Flags(r)) => Ok((l, r)),
        _ => unreachable!("kinds checked above"),
    }
}

fn map_numbers<'a>(n: &Numbers<'_>, rows: usize, f: impl Fn(f64) -> f64) -> Numbers<'a> {
    match n.scalar() {
        Some(v) => Numbers::Scalar(f(v)),
        None => Numbers::Owned((0..rows).map(|i| f(n.get(i))).collect()),
    }
}

fn arith<'a>(op: ArithOp, a: &Numbers<'_>, b: &Numbers<'_>, rows: usize) -> Numbers<'a> {
    let f: fn(f64, f64) -> f64 = match op {
        ArithOp::Add => |x: f64, y: f64| x + y,
        ArithOp::Sub => |x: f64, y: f64| x - y,
        ArithOp::Mul => |x: f64, y: f64| x * y,
        ArithOp::Div => |x: f64, y: f64| x / y,
    };
    if let (Some(x), Some(y)) = (a.scalar(), b.scalar()) {
        return Numbers::Scalar(f(x, y));
    }
    Numbers::Owned((0..rows).map(|i| f(a.get(i), b.get(i))).collect())
}

fn zip_flags(a: &Flags, b: &Flags, rows: usize, f: impl Fn(bool, bool) -> bool) -> Flags {
    if let (Some(x), Some(y)) = (a.scalar(), b.scalar()) {
        return Flags::Scalar(f(x, y));
    }
    Flags::Owned((0..rows).map(|i| f(a.get(i), b.get(i))).collect())
}

/// IEEE-754 semantics: every ordering against NaN is false, `NaN != NaN`.
fn compare_f64(op: CompareOp, x: f64, y: f64) -> bool {
    match op {
        CompareOp::Eq => x == y,
        CompareOp::Neq => x != y,
        CompareOp::Gt => x > y,
        CompareOp::Gte => x >= y,
        CompareOp::Lt => x < y,
        CompareOp::Lte => x <= y,
    }
}

fn compare_ord<T: PartialOrd + ?Sized>(op: CompareOp, x: &T, y: &T) -> bool {
    match op {
        CompareOp::Eq => x == y,
        CompareOp::Neq => x != y,
        CompareOp::Gt => x > y,
        CompareOp::Gte => x >= y,
        CompareOp::Lt => x < y,
        CompareOp::Lte => x <= y,
    }
}

fn compare(op: CompareOp, l: &Vector<'_>, r: &Vector<'_>, rows: usize) -> Flags {
    match (l, r) {
        (Vector::Numbers(a), Vector::Numbers(b)) => {
            if let (Some(x), Some(y)) = (a.scalar(), b.scalar()) {
                return Flags::Scalar(compare_f64(op, x, y));
            }
            Flags::Owned((0..rows).map(|i| compare_f64(op, a.get(i), b.get(i))).collect())
        }
        (Vector::Strings(a), Vector::Strings(b)) => {
            if let (Strings::Scalar(x), Strings::Scalar(y)) = (a, b) {
                return Flags::Scalar(compare_ord(op, *x, *y));
            }
            Flags::Owned((0..rows).map(|i| compare_ord(op, a.get(i), b.get(i))).collect())
        }
        (Vector::Flags(a), Vector::Flags(b)) => {
            let eq = matches!(op, CompareOp::Eq);
            zip_flags(a, b, rows, |x, y| (x == y) == eq)
        }
        _ => unreachable!("kinds checked by caller"),
    }
}
