//! SQL Server dialect.

use chrono::NaiveDateTime;

use super::{hex_upper, SqlSyntaxProvider};
use crate::definitions::{ColumnDefinition, ColumnType, IndexDefinition, IndexType, SystemMethod};
use crate::provider::DatabaseProvider;

/// SQL Server dialect for migration SQL generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SqlSyntaxProvider for SqlServerDialect {
    fn provider(&self) -> DatabaseProvider {
        DatabaseProvider::SqlServer
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }

    fn format_blob(&self, bytes: &[u8]) -> String {
        format!("0x{}", hex_upper(bytes))
    }

    // Unambiguous on every server regardless of language settings.
    fn format_date_time(&self, value: &NaiveDateTime) -> String {
        format!("'{}'", value.format("%Y%m%d %H:%M:%S"))
    }

    fn map_data_type(&self, column_type: &ColumnType) -> String {
        match column_type {
            ColumnType::Smallint => "SMALLINT".to_string(),
            ColumnType::Integer => "INT".to_string(),
            ColumnType::Bigint => "BIGINT".to_string(),
            ColumnType::Real => "REAL".to_string(),
            ColumnType::Double => "FLOAT".to_string(),
            ColumnType::Decimal { precision, scale } => {
                format!("DECIMAL({},{})", precision.unwrap_or(20), scale.unwrap_or(9))
            }
            ColumnType::Char(len) => format!("NCHAR({})", len.unwrap_or(1)),
            ColumnType::Varchar(len) => format!("NVARCHAR({})", len.unwrap_or(255)),
            ColumnType::Text => "NVARCHAR(MAX)".to_string(),
            ColumnType::Blob => "VARBINARY(MAX)".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time => "TIME".to_string(),
            ColumnType::DateTime => "DATETIME".to_string(),
            ColumnType::DateTimeOffset => "DATETIMEOFFSET(7)".to_string(),
            ColumnType::Boolean => "BIT".to_string(),
            ColumnType::Guid => "UNIQUEIDENTIFIER".to_string(),
            ColumnType::Custom(name) => name.clone(),
        }
    }

    fn format_system_method(&self, method: SystemMethod) -> Option<&'static str> {
        Some(match method {
            SystemMethod::NewGuid => "NEWID()",
            SystemMethod::CurrentDateTime => "GETDATE()",
            SystemMethod::CurrentUtcDateTime => "GETUTCDATE()",
        })
    }

    fn default_value_format(&self) -> &'static str {
        "DEFAULT ({0})"
    }

    fn format_default_constraint(&self, column: &ColumnDefinition) -> String {
        if column.default.is_none() && column.default_constraint_name.is_none() {
            return String::new();
        }
        format!(
            "CONSTRAINT {}",
            self.quote_name(&column.default_constraint_name())
        )
    }

    fn format_identity(&self, column: &ColumnDefinition) -> String {
        if column.identity {
            String::from("IDENTITY(1,1)")
        } else {
            String::new()
        }
    }

    fn index_type_prefix(&self, index: &IndexDefinition) -> String {
        let kind = match index.index_type {
            IndexType::Clustered => "CLUSTERED",
            IndexType::NonClustered => "NONCLUSTERED",
        };
        if index.unique {
            format!("UNIQUE {kind} ")
        } else {
            format!("{kind} ")
        }
    }

    fn drop_index_format(&self) -> &'static str {
        "DROP INDEX {0} ON {1}"
    }

    fn delete_default_constraint_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} DROP CONSTRAINT {2}")
    }

    fn set_default_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} ADD CONSTRAINT {3} DEFAULT ({2}) FOR {1}")
    }

    fn identity_insert_formats(&self) -> Option<(&'static str, &'static str)> {
        Some(("SET IDENTITY_INSERT {0} ON", "SET IDENTITY_INSERT {0} OFF"))
    }

    fn format_table_rename(&self, schema: Option<&str>, old_name: &str, new_name: &str) -> String {
        format!(
            "EXEC sp_rename '{}', '{}'",
            self.escape_string(&self.quote_table(schema, old_name)),
            self.escape_string(new_name)
        )
    }

    fn format_column_rename(
        &self,
        schema: Option<&str>,
        table: &str,
        old_name: &str,
        new_name: &str,
    ) -> String {
        let qualified = format!(
            "{}.{}",
            self.quote_table(schema, table),
            self.quote_identifier(old_name)
        );
        format!(
            "EXEC sp_rename '{}', '{}', 'COLUMN'",
            self.escape_string(&qualified),
            self.escape_string(new_name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::DefaultValue;
    use crate::value::SqlValue;

    #[test]
    fn test_sqlserver_quoting() {
        let dialect = SqlServerDialect::new();
        assert_eq!(dialect.quote_identifier("Member"), "[Member]");
        assert_eq!(dialect.quote_identifier("odd]name"), "[odd]]name]");
        assert_eq!(dialect.quote_table(Some("dbo"), "Member"), "[dbo].[Member]");
        assert_eq!(dialect.quote_value(&SqlValue::Bool(true)).unwrap(), "1");
        assert_eq!(dialect.quote_value(&SqlValue::Blob(vec![0xAB, 0x01])).unwrap(), "0xAB01");
    }

    #[test]
    fn test_sqlserver_column_with_default_constraint() {
        let dialect = SqlServerDialect::new();
        let mut col = ColumnDefinition::new("created")
            .on_table("Member")
            .with_type(ColumnType::DateTime);
        col.nullable = false;
        col.default = Some(DefaultValue::Method(SystemMethod::CurrentDateTime));

        assert_eq!(
            dialect.column_definition(&col).unwrap(),
            "[created] DATETIME NOT NULL CONSTRAINT [DF_Member_created] DEFAULT (GETDATE())"
        );
    }

    #[test]
    fn test_sqlserver_identity_column() {
        let dialect = SqlServerDialect::new();
        let mut col = ColumnDefinition::new("id").with_type(ColumnType::Integer);
        col.nullable = false;
        col.identity = true;
        assert_eq!(
            dialect.column_definition(&col).unwrap(),
            "[id] INT NOT NULL IDENTITY(1,1)"
        );
    }

    #[test]
    fn test_sqlserver_rename_uses_sp_rename() {
        let dialect = SqlServerDialect::new();
        assert_eq!(
            dialect.format_table_rename(None, "old", "new"),
            "EXEC sp_rename '[old]', 'new'"
        );
        assert_eq!(
            dialect.format_column_rename(None, "t", "a", "b"),
            "EXEC sp_rename '[t].[a]', 'b', 'COLUMN'"
        );
    }
}
