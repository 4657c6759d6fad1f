use std::collections::HashMap;

use super::error::TableError;
use super::value::ValueKind;

/// Homogeneously typed column data.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Str(Vec<String>),
}

impl ColumnData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Str(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            ColumnData::Numeric(_) => ValueKind::Number,
            ColumnData::Str(_) => ValueKind::String,
        }
    }

    #[must_use]
    pub fn view(&self) -> ColumnView<'_> {
        match self {
            ColumnData::Numeric(v) => ColumnView::Numeric(v),
            ColumnData::Str(v) => ColumnView::Str(v),
        }
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(v: Vec<f64>) -> Self {
        ColumnData::Numeric(v)
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(v: Vec<String>) -> Self {
        ColumnData::Str(v)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(v: Vec<&str>) -> Self {
        ColumnData::Str(v.into_iter().map(str::to_owned).collect())
    }
}

/// Borrowed, read-only view of one column. Valid for as long as the
/// [`Table`] it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnView<'t> {
    Numeric(&'t [f64]),
    Str(&'t [String]),
}

impl ColumnView<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnView::Numeric(v) => v.len(),
            ColumnView::Str(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            ColumnView::Numeric(_) => ValueKind::Number,
            ColumnView::Str(_) => ValueKind::String,
        }
    }

    /// Render the value at `row` as a string. Numbers keep their float form:
    /// `100.0` renders as `"100.0"`, NaN as `"NaN"`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn render(&self, row: usize) -> String {
        match self {
            ColumnView::Numeric(v) => format!("{:?}", v[row]),
            ColumnView::Str(v) => v[row].clone(),
        }
    }
}

/// Columnar input: an ordered mapping from column name to column data, all
/// columns sharing one row count.
///
/// Built with [`Table::builder()`], which validates names and lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<(String, ColumnData)>,
    index: HashMap<String, usize>,
    rows: usize,
}

impl Table {
    #[must_use]
    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    /// Number of rows. A table without columns has zero rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColumnData> {
        self.index.get(name).map(|&idx| &self.columns[idx].1)
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnData)> {
        self.columns.iter().map(|(name, data)| (name.as_str(), data))
    }
}

/// Builder for [`Table`].
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<(String, ColumnData)>,
}

impl TableBuilder {
    #[must_use]
    pub fn column(mut self, name: &str, data: impl Into<ColumnData>) -> Self {
        self.columns.push((name.to_owned(), data.into()));
        self
    }

    /// Add a numeric column. Accepts anything convertible to `f64`
    /// (`i32`, `u32`, `f32`, `f64`, ...).
    #[must_use]
    pub fn numeric<T: Into<f64>>(self, name: &str, values: impl IntoIterator<Item = T>) -> Self {
        let data: Vec<f64> = values.into_iter().map(Into::into).collect();
        self.column(name, ColumnData::Numeric(data))
    }

    #[must_use]
    pub fn strings<S: Into<String>>(
        self,
        name: &str,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        let data: Vec<String> = values.into_iter().map(Into::into).collect();
        self.column(name, ColumnData::Str(data))
    }

    /// Validate and build the table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] on a duplicate column name or when column
    /// lengths differ.
    pub fn build(self) -> Result<Table, TableError> {
        let rows = self.columns.first().map_or(0, |(_, data)| data.len());
        let mut index = HashMap::with_capacity(self.columns.len());

        for (position, (name, data)) in self.columns.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(TableError::DuplicateColumn { name: name.clone() });
            }
            if data.len() != rows {
                return Err(TableError::LengthMismatch {
                    column: name.clone(),
                    expected: rows,
                    found: data.len(),
                });
            }
        }

        Ok(Table {
            columns: self.columns,
            index,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_mixed_table() {
        let table = Table::builder()
            .numeric("score", [0, 50, 85])
            .strings("name", ["a", "b", "c"])
            .build()
            .unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), ["score", "name"]);
        assert_eq!(
            table.get("score"),
            Some(&ColumnData::Numeric(vec![0.0, 50.0, 85.0]))
        );
        assert!(table.contains("name"));
        assert!(!table.contains("missing"));
    }

    #[test]
    fn empty_table_has_zero_rows() {
        let table = Table::builder().build().unwrap();
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.num_columns(), 0);
    }

    #[test]
    fn duplicate_column_rejected() {
        let err = Table::builder()
            .numeric("x", [1.0])
            .numeric("x", [2.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { name } if name == "x"));
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = Table::builder()
            .numeric("x", [1.0, 2.0])
            .strings("y", ["a"])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::LengthMismatch { column, expected: 2, found: 1 } if column == "y"
        ));
    }

    #[test]
    fn render_numbers_and_strings() {
        let numbers = ColumnData::Numeric(vec![100.0, 2.5, f64::NAN, f64::INFINITY, -0.0]);
        let view = numbers.view();
        assert_eq!(view.render(0), "100.0");
        assert_eq!(view.render(1), "2.5");
        assert_eq!(view.render(2), "NaN");
        assert_eq!(view.render(3), "inf");
        assert_eq!(view.render(4), "-0.0");

        let strings = ColumnData::from(vec!["high"]);
        assert_eq!(strings.view().render(0), "high");
        assert_eq!(strings.view().kind(), ValueKind::String);
    }
}
