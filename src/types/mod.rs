mod action;
mod config;
mod engine;
mod error;
mod expr;
mod mask;
mod output;
mod rule;
mod table;
mod value;

pub use action::ActionValue;
pub use config::{DEFAULT_PARALLEL_MIN_ROWS, EngineConfig, ParallelConfig};
pub use engine::{DecisionEngine, DecisionEngineBuilder};
pub use error::{CompileError, EvaluationError, TableError};
pub use expr::{ArithOp, CompareOp, Expr, col, lit};
pub use mask::Mask;
pub use output::{ActionColumn, DecisionReport};
pub use rule::{Rule, RuleChain};
pub use table::{ColumnData, ColumnView, Table, TableBuilder};
pub use value::{Value, ValueKind};
