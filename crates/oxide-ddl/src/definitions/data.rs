//! Row definitions for data expressions.

use crate::value::{SqlValue, ToSqlValue};

/// Ordered `column → value` pairs describing one row.
///
/// For deletions a [`SqlValue::Null`] entry matches rows where the column
/// is NULL.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowDefinition {
    values: Vec<(String, SqlValue)>,
}

impl RowDefinition {
    /// Creates an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Appends a column value, keeping insertion order.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl ToSqlValue) -> Self {
        self.push(column, value);
        self
    }

    /// Appends a column value in place.
    pub fn push(&mut self, column: impl Into<String>, value: impl ToSqlValue) {
        self.values.push((column.into(), value.to_sql_value()));
    }

    /// Iterates the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.values.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row names no column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RowDefinition
where
    K: Into<String>,
    V: ToSqlValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

/// Rows targeted by a delete-data expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeletionDataDefinition {
    /// Rows to match; each row becomes one DELETE statement.
    pub rows: Vec<RowDefinition>,
    /// Delete everything, ignoring `rows`.
    pub is_all_rows: bool,
}

/// Rows written by an insert-data expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertionDataDefinition {
    /// Rows to insert; each row becomes one INSERT statement.
    pub rows: Vec<RowDefinition>,
    /// Allow explicit values for identity columns where the dialect needs
    /// a switch for that.
    pub identity_insert: bool,
}

/// Assignments and row filter of an update-data expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateDataDefinition {
    /// Column values to assign.
    pub set: RowDefinition,
    /// Rows to update: every pair must match.
    pub condition: RowDefinition,
    /// Update every row, ignoring `condition`.
    pub is_all_rows: bool,
}
