//! Table definitions.

use super::column::ColumnDefinition;

/// A table being created, with its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Owning schema, if any.
    pub schema_name: Option<String>,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Creates a table with no columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Columns flagged as part of the primary key.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    /// Primary key constraint name: the first explicit name on a key
    /// column, else `PK_{table}`.
    #[must_use]
    pub fn primary_key_name(&self) -> String {
        self.primary_key_columns()
            .find_map(|c| c.primary_key_name.clone().filter(|n| !n.is_empty()))
            .unwrap_or_else(|| format!("PK_{}", self.name))
    }
}
