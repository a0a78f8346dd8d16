//! Index definitions.

/// Sort direction of an indexed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Physical layout of an index, honoured by dialects that distinguish them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexType {
    /// Clustered index.
    Clustered,
    /// Non-clustered index.
    #[default]
    NonClustered,
}

/// One column of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumnDefinition {
    /// Column name.
    pub name: String,
    /// Sort direction, dialect default when absent.
    pub direction: Option<Direction>,
}

impl IndexColumnDefinition {
    /// Creates an index column with the dialect's default direction.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: None,
        }
    }
}

/// An index over one or more columns of a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexDefinition {
    /// Index name; generated when absent.
    pub name: Option<String>,
    /// Owning schema, if any.
    pub schema_name: Option<String>,
    /// Indexed table.
    pub table_name: String,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Clustered or not.
    pub index_type: IndexType,
    /// Indexed columns, in key order.
    pub columns: Vec<IndexColumnDefinition>,
}

impl IndexDefinition {
    /// Returns the index name, generating `IX_{table}_{first column}`.
    #[must_use]
    pub fn resolved_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let first = self.columns.first().map_or("", |c| c.name.as_str());
        format!("IX_{}_{}", self.table_name, first)
    }
}
