//! SQLite dialect.
//!
//! SQLite cannot add or drop constraints or alter columns on an existing
//! table, so those templates are absent. Primary keys are declared inline
//! when the table is created.

use super::SqlSyntaxProvider;
use crate::definitions::{ColumnDefinition, ColumnType, ConstraintType, SystemMethod};
use crate::provider::DatabaseProvider;

/// SQLite dialect for migration SQL generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SqlSyntaxProvider for SqliteDialect {
    fn provider(&self) -> DatabaseProvider {
        DatabaseProvider::Sqlite
    }

    fn map_data_type(&self, column_type: &ColumnType) -> String {
        // SQLite has dynamic typing with type affinity
        match column_type {
            ColumnType::Smallint | ColumnType::Integer | ColumnType::Bigint => {
                "INTEGER".to_string()
            }
            ColumnType::Real | ColumnType::Double | ColumnType::Decimal { .. } => {
                "REAL".to_string()
            }
            ColumnType::Char(_) | ColumnType::Varchar(_) | ColumnType::Text | ColumnType::Guid => {
                "TEXT".to_string()
            }
            ColumnType::Blob => "BLOB".to_string(),
            ColumnType::Date
            | ColumnType::Time
            | ColumnType::DateTime
            | ColumnType::DateTimeOffset => "TEXT".to_string(),
            ColumnType::Boolean => "INTEGER".to_string(),
            ColumnType::Custom(name) => name.clone(),
        }
    }

    fn format_system_method(&self, method: SystemMethod) -> Option<&'static str> {
        match method {
            SystemMethod::NewGuid => None,
            SystemMethod::CurrentDateTime => Some("(datetime('now', 'localtime'))"),
            SystemMethod::CurrentUtcDateTime => Some("CURRENT_TIMESTAMP"),
        }
    }

    fn inline_primary_key(&self) -> bool {
        true
    }

    fn format_primary_key(&self, column: &ColumnDefinition) -> String {
        match (column.primary_key, column.identity) {
            (true, true) => String::from("PRIMARY KEY AUTOINCREMENT"),
            (true, false) => String::from("PRIMARY KEY"),
            _ => String::new(),
        }
    }

    // AUTOINCREMENT is only legal after PRIMARY KEY.
    fn format_identity(&self, _column: &ColumnDefinition) -> String {
        String::new()
    }

    fn add_column_format(&self) -> &'static str {
        "ALTER TABLE {0} ADD COLUMN {1}"
    }

    fn create_constraint_format(&self) -> Option<&'static str> {
        None
    }

    fn delete_constraint_format(&self, _kind: ConstraintType) -> Option<&'static str> {
        None
    }

    fn create_foreign_key_format(&self) -> Option<&'static str> {
        None
    }

    fn drop_foreign_key_format(&self) -> Option<&'static str> {
        None
    }

    fn alter_column_format(&self) -> Option<&'static str> {
        None
    }

    fn set_default_format(&self) -> Option<&'static str> {
        None
    }
}
