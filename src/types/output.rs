use std::fmt;
use std::ops::Index;
use std::time::Duration;

/// The materialized output: one string per input row, named by the engine key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ActionColumn {
    name: String,
    values: Vec<String>,
}

impl ActionColumn {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, row: usize) -> Option<&str> {
        self.values.get(row).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl Index<usize> for ActionColumn {
    type Output = str;

    fn index(&self, row: usize) -> &str {
        &self.values[row]
    }
}

impl fmt::Display for ActionColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}]", self.name, self.values.join(", "))
    }
}

/// Output of [`DecisionEngine::execute_detailed()`](super::DecisionEngine::execute_detailed).
///
/// Besides the output column, records which rule decided each row and how
/// many rows each rule decided.
#[derive(Debug, Clone)]
#[must_use]
pub struct DecisionReport {
    column: ActionColumn,
    decided_by: Vec<Option<usize>>,
    rule_hits: Vec<usize>,
    duration: Duration,
}

impl DecisionReport {
    pub(crate) fn new(
        column: ActionColumn,
        decided_by: Vec<Option<usize>>,
        rule_hits: Vec<usize>,
        duration: Duration,
    ) -> Self {
        Self {
            column,
            decided_by,
            rule_hits,
            duration,
        }
    }

    pub fn column(&self) -> &ActionColumn {
        &self.column
    }

    pub fn into_column(self) -> ActionColumn {
        self.column
    }

    /// Position of the rule that decided each row; `None` where the default
    /// action was used.
    #[must_use]
    pub fn decided_by(&self) -> &[Option<usize>] {
        &self.decided_by
    }

    /// Rows decided by each rule, indexed by rule position.
    #[must_use]
    pub fn rule_hits(&self) -> &[usize] {
        &self.rule_hits
    }

    /// Rows that fell through to the default action.
    #[must_use]
    pub fn default_hits(&self) -> usize {
        self.decided_by.iter().filter(|d| d.is_none()).count()
    }

    /// Wall-clock duration of the call.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for DecisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows", self.column.len())?;
        let hits: Vec<String> = self
            .rule_hits
            .iter()
            .enumerate()
            .map(|(i, n)| format!("#{i}={n}"))
            .collect();
        write!(f, ", rule hits: [{}]", hits.join(", "))?;
        write!(f, ", default: {}", self.default_hits())?;
        write!(f, ", duration: {:?}", self.duration)
    }
}
