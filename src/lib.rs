//! Rule-based decisions over columnar data.
//!
//! A [`DecisionEngine`] holds an ordered list of `(condition, action)` rules
//! and a default action. [`execute()`](DecisionEngine::execute) evaluates every
//! condition as a vectorized boolean mask over a [`Table`] and produces one
//! output column: each row gets the action of the first rule whose condition
//! holds for it, or the default. An action that names a column of the table
//! emits that column's value for the row instead of the literal string.
//!
//! ```
//! use rulefold::{DecisionEngine, Table};
//!
//! let engine = DecisionEngine::new(
//!     "action",
//!     "fallback",
//!     [("score > 90 and tier == 'gold'", "vip"), ("score > 50", "preferred_label")],
//! )?;
//!
//! let table = Table::builder()
//!     .numeric("score", [95.0, 60.0, 10.0])
//!     .strings("tier", ["gold", "silver", "gold"])
//!     .strings("preferred_label", ["a", "b", "c"])
//!     .build()?;
//!
//! let column = engine.execute(&table)?;
//! assert_eq!(column.values(), ["vip", "b", "fallback"]);
//! # Ok::<(), rulefold::RulefoldError>(())
//! ```

mod apply;
mod compile;
mod error;
mod evaluate;
pub mod parse;
mod resolve;
mod types;

pub use error::RulefoldError;
pub use evaluate::evaluate;
pub use parse::ParseError;
pub use resolve::resolve;
pub use types::{
    ActionColumn, ActionValue, ArithOp, ColumnData, ColumnView, CompareOp, CompileError,
    DEFAULT_PARALLEL_MIN_ROWS, DecisionEngine, DecisionEngineBuilder, DecisionReport,
    EngineConfig, EvaluationError, Expr, Mask, ParallelConfig, Rule, RuleChain, Table,
    TableBuilder, TableError, Value, ValueKind, col, lit,
};
