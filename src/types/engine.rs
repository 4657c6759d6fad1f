use std::fmt;
use std::time::Instant;

use super::config::{EngineConfig, ParallelConfig};
use super::error::{CompileError, EvaluationError};
use super::expr::Expr;
use super::output::{ActionColumn, DecisionReport};
use super::rule::{Rule, RuleChain};
use super::table::Table;
use crate::compile::Condition;

/// A compiled decision engine: an ordered rule chain plus a default action,
/// producing one output column per table.
///
/// Conditions are parsed once, at construction. The engine is immutable
/// afterwards, so it can be shared behind `Arc` and used from many threads.
///
/// # Example
///
/// ```
/// use rulefold::{DecisionEngine, Table};
///
/// let engine = DecisionEngine::new(
///     "action",
///     "high",
///     [("score < 80", "low"), ("score <= 99", "medium"), ("score > 99", "high")],
/// )
/// .unwrap();
///
/// let table = Table::builder()
///     .numeric("score", [0, 50, 85, 95, 105])
///     .build()
///     .unwrap();
///
/// let column = engine.execute(&table).unwrap();
/// assert_eq!(column.name(), "action");
/// assert_eq!(column.values(), ["low", "low", "medium", "medium", "high"]);
/// ```
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    chain: RuleChain,
    parallel: ParallelConfig,
}

impl DecisionEngine {
    /// Compile `rules` (ordered `(condition, action)` pairs).
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidCondition`] for the first condition that
    /// fails to parse.
    pub fn new<C, A>(
        key: impl Into<String>,
        default_action: impl Into<String>,
        rules: impl IntoIterator<Item = (C, A)>,
    ) -> Result<Self, CompileError>
    where
        C: Into<String>,
        A: Into<String>,
    {
        let rules = rules
            .into_iter()
            .map(|(condition, action)| (Condition::Text(condition.into()), action.into()))
            .collect();
        let chain = crate::compile::compile(key.into(), default_action.into(), rules)?;
        Ok(Self {
            chain,
            parallel: ParallelConfig::default(),
        })
    }

    /// Compile an [`EngineConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`new()`](Self::new).
    pub fn from_config(config: EngineConfig) -> Result<Self, CompileError> {
        Self::new(config.key, config.default_action, config.rules)
    }

    #[must_use]
    pub fn builder(key: impl Into<String>) -> DecisionEngineBuilder {
        DecisionEngineBuilder::new(key)
    }

    /// Apply the rule chain to `table`, returning a column named after the
    /// engine key with one action per row.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] if any rule references an unknown column,
    /// applies an operator to the wrong kinds, or is not boolean. No partial
    /// output is produced.
    pub fn execute(&self, table: &Table) -> Result<ActionColumn, EvaluationError> {
        let _span = self.span(table).entered();
        let decisions = crate::apply::apply(&self.chain, table, &self.parallel)?;
        Ok(ActionColumn::new(self.chain.key.clone(), decisions.values))
    }

    /// Like [`execute()`](Self::execute), but also reports which rule decided
    /// each row and how long the call took.
    ///
    /// # Errors
    ///
    /// Same as [`execute()`](Self::execute).
    pub fn execute_detailed(&self, table: &Table) -> Result<DecisionReport, EvaluationError> {
        let _span = self.span(table).entered();
        let start = Instant::now();
        let decisions = crate::apply::apply(&self.chain, table, &self.parallel)?;
        let column = ActionColumn::new(self.chain.key.clone(), decisions.values);
        Ok(DecisionReport::new(
            column,
            decisions.decided_by,
            decisions.rule_hits,
            start.elapsed(),
        ))
    }

    fn span(&self, table: &Table) -> tracing::Span {
        tracing::debug_span!(
            "execute",
            key = %self.chain.key,
            rows = table.num_rows(),
            rules = self.chain.rules.len()
        )
    }

    #[must_use]
    pub fn key(&self) -> &str {
        self.chain.key()
    }

    #[must_use]
    pub fn default_action(&self) -> &str {
        self.chain.default_action()
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        self.chain.rules()
    }

    #[must_use]
    pub fn chain(&self) -> &RuleChain {
        &self.chain
    }

    #[must_use]
    pub fn parallel(&self) -> ParallelConfig {
        self.parallel
    }

    /// Every action the engine can emit before column indirection, including
    /// the default, sorted and deduplicated.
    #[must_use]
    pub fn possible_actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.chain.actions().iter().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }
}

impl fmt::Display for DecisionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecisionEngine({} rules, key '{}', default '{}')",
            self.chain.rules.len(),
            self.chain.key(),
            self.chain.default_action(),
        )
    }
}

/// Builder for a [`DecisionEngine`].
///
/// ```
/// use rulefold::{col, DecisionEngine, ParallelConfig};
///
/// let engine = DecisionEngine::builder("tier")
///     .default_action("standard")
///     .rule("spend > 1000 and region == 'eu'", "gold")
///     .rule_expr(col("spend").gt(500), "silver")
///     .parallel(ParallelConfig::disabled())
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.rules().len(), 2);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct DecisionEngineBuilder {
    key: String,
    default_action: String,
    rules: Vec<(Condition, String)>,
    parallel: ParallelConfig,
}

impl DecisionEngineBuilder {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default_action: String::new(),
            rules: Vec::new(),
            parallel: ParallelConfig::default(),
        }
    }

    pub fn default_action(mut self, action: impl Into<String>) -> Self {
        self.default_action = action.into();
        self
    }

    /// Append a rule whose condition is parsed at [`build()`](Self::build).
    pub fn rule(mut self, condition: impl Into<String>, action: impl Into<String>) -> Self {
        self.rules
            .push((Condition::Text(condition.into()), action.into()));
        self
    }

    /// Append a rule with an already-built condition.
    pub fn rule_expr(mut self, condition: Expr, action: impl Into<String>) -> Self {
        self.rules.push((Condition::Parsed(condition), action.into()));
        self
    }

    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// # Errors
    ///
    /// Returns [`CompileError::InvalidCondition`] for the first condition that
    /// fails to parse.
    pub fn build(self) -> Result<DecisionEngine, CompileError> {
        let chain = crate::compile::compile(self.key, self.default_action, self.rules)?;
        Ok(DecisionEngine {
            chain,
            parallel: self.parallel,
        })
    }
}
