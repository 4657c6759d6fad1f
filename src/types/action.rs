use super::table::{ColumnView, Table};

/// An action string, resolved against one table.
///
/// An action that names a column of the table emits that column's value for
/// each row. Any other action is emitted verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionValue<'a> {
    Literal(&'a str),
    Column {
        name: &'a str,
        view: ColumnView<'a>,
    },
}

impl<'a> ActionValue<'a> {
    /// Decide once whether `action` is a literal or a column reference.
    #[must_use]
    pub fn resolve(action: &'a str, table: &'a Table) -> Self {
        match table.get(action) {
            Some(data) => {
                tracing::trace!(action, "action resolves to column");
                ActionValue::Column {
                    name: action,
                    view: data.view(),
                }
            }
            None => ActionValue::Literal(action),
        }
    }

    /// The value emitted for `row`.
    ///
    /// # Panics
    ///
    /// Panics if this is a column action and `row` is out of bounds.
    #[must_use]
    pub fn value_at(&self, row: usize) -> String {
        match self {
            ActionValue::Literal(s) => (*s).to_owned(),
            ActionValue::Column { view, .. } => view.render(row),
        }
    }

    #[must_use]
    pub fn is_column(&self) -> bool {
        matches!(self, ActionValue::Column { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::builder()
            .numeric("score", [0.0, 100.0])
            .strings("high_variable", ["high", "very_high"])
            .build()
            .unwrap()
    }

    #[test]
    fn literal_when_no_such_column() {
        let table = table();
        let action = ActionValue::resolve("low", &table);
        assert_eq!(action, ActionValue::Literal("low"));
        assert!(!action.is_column());
        assert_eq!(action.value_at(1), "low");
    }

    #[test]
    fn string_column_indirection() {
        let table = table();
        let action = ActionValue::resolve("high_variable", &table);
        assert!(action.is_column());
        assert_eq!(action.value_at(0), "high");
        assert_eq!(action.value_at(1), "very_high");
    }

    #[test]
    fn numeric_column_indirection_renders() {
        let table = table();
        let action = ActionValue::resolve("score", &table);
        assert_eq!(action.value_at(0), "0.0");
        assert_eq!(action.value_at(1), "100.0");
    }

    #[test]
    fn match_is_exact() {
        let table = table();
        assert!(!ActionValue::resolve("Score", &table).is_column());
        assert!(!ActionValue::resolve("score ", &table).is_column());
    }
}
