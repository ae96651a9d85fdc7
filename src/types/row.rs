use std::collections::VecDeque;

/// A single fetched row: column name to text value, NULL as `None`.
/// Columns keep the order of the result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<(String, Option<String>)>,
}

impl Row {
    /// Creates a new Row from column names and values.
    pub(crate) fn new(columns: &[String], values: Vec<Option<String>>) -> Self {
        let values = columns.iter().cloned().zip(values).collect();
        Self { values }
    }

    /// Gets a value by column name. NULL and missing columns both yield `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    /// True when the column exists and holds SQL NULL.
    pub fn is_null(&self, column: &str) -> bool {
        self.values
            .iter()
            .any(|(name, value)| name == column && value.is_none())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.iter().any(|(name, _)| name == column)
    }

    /// Returns all column names in this row.
    pub fn columns(&self) -> Vec<&str> {
        self.values.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result handle produced by a query.
///
/// Holds the rows the backend returned; each fetch hands out the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: VecDeque<Vec<Option<String>>>,
    affected_rows: u64,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            columns,
            rows: rows.into(),
            affected_rows: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_affected_rows(mut self, affected_rows: u64) -> Self {
        self.affected_rows = affected_rows;
        self
    }

    /// Starts a fresh set of rows under new column names.
    pub(crate) fn reset_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
        self.rows.clear();
    }

    pub(crate) fn push_row(&mut self, values: Vec<Option<String>>) {
        self.rows.push_back(values);
    }

    pub(crate) fn set_affected_rows(&mut self, affected_rows: u64) {
        self.affected_rows = affected_rows;
    }

    /// Pops the next row, `None` once the result is exhausted.
    pub(crate) fn next_row(&mut self) -> Option<Row> {
        self.rows
            .pop_front()
            .map(|values| Row::new(&self.columns, values))
    }

    /// Returns the column names from this result.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows affected by the statement that produced this result.
    pub fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    /// Number of rows not yet fetched.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.rows.is_empty()
    }
}
