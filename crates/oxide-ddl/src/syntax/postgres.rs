//! PostgreSQL dialect.

use super::{hex_upper, SqlSyntaxProvider};
use crate::definitions::{ColumnDefinition, ColumnType, SystemMethod};
use crate::error::Result;
use crate::provider::DatabaseProvider;

/// PostgreSQL dialect for migration SQL generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SqlSyntaxProvider for PostgresDialect {
    fn provider(&self) -> DatabaseProvider {
        DatabaseProvider::PostgreSql
    }

    fn format_bool(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    fn format_blob(&self, bytes: &[u8]) -> String {
        format!("'\\x{}'", hex_upper(bytes))
    }

    fn map_data_type(&self, column_type: &ColumnType) -> String {
        match column_type {
            ColumnType::Smallint => "SMALLINT".to_string(),
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::Bigint => "BIGINT".to_string(),
            ColumnType::Real => "REAL".to_string(),
            ColumnType::Double => "DOUBLE PRECISION".to_string(),
            ColumnType::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => "DECIMAL".to_string(),
            },
            ColumnType::Char(len) => match len {
                Some(n) => format!("CHAR({n})"),
                None => "CHAR".to_string(),
            },
            ColumnType::Varchar(len) => match len {
                Some(n) => format!("VARCHAR({n})"),
                None => "VARCHAR".to_string(),
            },
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Blob => "BYTEA".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time => "TIME".to_string(),
            ColumnType::DateTime => "TIMESTAMP".to_string(),
            ColumnType::DateTimeOffset => "TIMESTAMPTZ".to_string(),
            ColumnType::Boolean => "BOOLEAN".to_string(),
            ColumnType::Guid => "UUID".to_string(),
            ColumnType::Custom(name) => name.clone(),
        }
    }

    fn format_system_method(&self, method: SystemMethod) -> Option<&'static str> {
        Some(match method {
            SystemMethod::NewGuid => "gen_random_uuid()",
            SystemMethod::CurrentDateTime => "CURRENT_TIMESTAMP",
            SystemMethod::CurrentUtcDateTime => "(now() at time zone 'utc')",
        })
    }

    fn format_identity(&self, column: &ColumnDefinition) -> String {
        if column.identity {
            String::from("GENERATED BY DEFAULT AS IDENTITY")
        } else {
            String::new()
        }
    }

    fn add_column_format(&self) -> &'static str {
        "ALTER TABLE {0} ADD COLUMN {1}"
    }

    fn delete_default_constraint_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} ALTER COLUMN {1} DROP DEFAULT")
    }

    // Type and nullability are separate actions of one ALTER TABLE.
    fn alter_column_clause(&self, column: &ColumnDefinition) -> Result<String> {
        let name = self.quote_identifier(&column.name);
        let nullability = if column.nullable {
            "DROP NOT NULL"
        } else {
            "SET NOT NULL"
        };
        Ok(format!(
            "{name} TYPE {}, ALTER COLUMN {name} {nullability}",
            self.column_type(column)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::DefaultValue;
    use crate::value::SqlValue;

    #[test]
    fn test_postgres_data_types() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.map_data_type(&ColumnType::Integer), "INTEGER");
        assert_eq!(
            dialect.map_data_type(&ColumnType::Varchar(Some(255))),
            "VARCHAR(255)"
        );
        assert_eq!(dialect.map_data_type(&ColumnType::Blob), "BYTEA");
        assert_eq!(dialect.map_data_type(&ColumnType::Guid), "UUID");
        assert_eq!(
            dialect.map_data_type(&ColumnType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }),
            "DECIMAL(10, 2)"
        );
    }

    #[test]
    fn test_postgres_literals() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.quote_value(&SqlValue::Bool(false)).unwrap(), "FALSE");
        assert_eq!(dialect.quote_value(&SqlValue::Blob(vec![0x0F])).unwrap(), "'\\x0F'");
        assert_eq!(dialect.quote_value(&SqlValue::Text("it's".into())).unwrap(), "'it''s'");
    }

    #[test]
    fn test_postgres_alter_column_clause() {
        let dialect = PostgresDialect::new();
        let mut col = ColumnDefinition::new("alias").with_type(ColumnType::Varchar(Some(100)));
        col.nullable = false;
        assert_eq!(
            dialect.alter_column_clause(&col).unwrap(),
            "\"alias\" TYPE VARCHAR(100), ALTER COLUMN \"alias\" SET NOT NULL"
        );
    }

    #[test]
    fn test_postgres_identity_with_default() {
        let dialect = PostgresDialect::new();
        let mut col = ColumnDefinition::new("key")
            .on_table("node")
            .with_type(ColumnType::Guid);
        col.nullable = false;
        col.default = Some(DefaultValue::Method(SystemMethod::NewGuid));
        assert_eq!(
            dialect.column_definition(&col).unwrap(),
            "\"key\" UUID NOT NULL DEFAULT gen_random_uuid()"
        );
    }
}
