//! MySQL dialect.

use super::{render_template, SqlSyntaxProvider};
use crate::definitions::{ColumnDefinition, ColumnType, ConstraintType, SystemMethod};
use crate::provider::DatabaseProvider;

/// MySQL dialect for migration SQL generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SqlSyntaxProvider for MySqlDialect {
    fn provider(&self) -> DatabaseProvider {
        DatabaseProvider::MySql
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn escape_string(&self, value: &str) -> String {
        value.replace('\\', "\\\\").replace('\'', "''")
    }

    fn map_data_type(&self, column_type: &ColumnType) -> String {
        match column_type {
            ColumnType::Smallint => "SMALLINT".to_string(),
            ColumnType::Integer => "INT".to_string(),
            ColumnType::Bigint => "BIGINT".to_string(),
            ColumnType::Real => "FLOAT".to_string(),
            ColumnType::Double => "DOUBLE".to_string(),
            ColumnType::Decimal { precision, scale } => {
                format!("DECIMAL({},{})", precision.unwrap_or(20), scale.unwrap_or(9))
            }
            ColumnType::Char(len) => format!("CHAR({})", len.unwrap_or(1)),
            ColumnType::Varchar(len) => format!("VARCHAR({})", len.unwrap_or(255)),
            ColumnType::Text => "LONGTEXT".to_string(),
            ColumnType::Blob => "LONGBLOB".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time => "TIME".to_string(),
            ColumnType::DateTime | ColumnType::DateTimeOffset => "DATETIME".to_string(),
            ColumnType::Boolean => "TINYINT(1)".to_string(),
            ColumnType::Guid => "CHAR(36)".to_string(),
            ColumnType::Custom(name) => name.clone(),
        }
    }

    fn format_system_method(&self, method: SystemMethod) -> Option<&'static str> {
        Some(match method {
            SystemMethod::NewGuid => "(UUID())",
            SystemMethod::CurrentDateTime => "CURRENT_TIMESTAMP",
            SystemMethod::CurrentUtcDateTime => "(UTC_TIMESTAMP())",
        })
    }

    fn format_identity(&self, column: &ColumnDefinition) -> String {
        if column.identity {
            String::from("AUTO_INCREMENT")
        } else {
            String::new()
        }
    }

    fn drop_index_format(&self) -> &'static str {
        "DROP INDEX {0} ON {1}"
    }

    fn rename_table_format(&self) -> &'static str {
        "RENAME TABLE {0} TO {1}"
    }

    fn delete_constraint_format(&self, kind: ConstraintType) -> Option<&'static str> {
        match kind {
            ConstraintType::PrimaryKey => Some("ALTER TABLE {0} DROP PRIMARY KEY"),
            ConstraintType::Unique => Some("ALTER TABLE {0} DROP INDEX {1}"),
            ConstraintType::Check => Some("ALTER TABLE {0} DROP CHECK {1}"),
            ConstraintType::Default => None,
        }
    }

    fn drop_foreign_key_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} DROP FOREIGN KEY {1}")
    }

    fn delete_default_constraint_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} ALTER COLUMN {1} DROP DEFAULT")
    }

    fn alter_column_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} MODIFY COLUMN {1}")
    }

    // Without a schema on the target the table would move to the default
    // database.
    fn format_table_rename(&self, schema: Option<&str>, old_name: &str, new_name: &str) -> String {
        let old_table = self.quote_table(schema, old_name);
        let new_table = self.quote_table(schema, new_name);
        render_template(
            self.rename_table_format(),
            &[old_table.as_str(), new_table.as_str()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    #[test]
    fn test_mysql_quoting_and_escaping() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.quote_identifier("member"), "`member`");
        assert_eq!(
            dialect.quote_value(&SqlValue::Text("a\\b'c".into())).unwrap(),
            "'a\\\\b''c'"
        );
    }

    #[test]
    fn test_mysql_constraint_templates_depend_on_kind() {
        let dialect = MySqlDialect::new();
        assert_eq!(
            dialect.delete_constraint_format(ConstraintType::PrimaryKey),
            Some("ALTER TABLE {0} DROP PRIMARY KEY")
        );
        assert_eq!(dialect.delete_constraint_format(ConstraintType::Default), None);
    }

    #[test]
    fn test_mysql_rename_keeps_schema() {
        let dialect = MySqlDialect::new();
        assert_eq!(
            dialect.format_table_rename(Some("cms"), "a", "b"),
            "RENAME TABLE `cms`.`a` TO `cms`.`b`"
        );
    }
}
