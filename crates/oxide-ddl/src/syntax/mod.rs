//! Dialect-specific SQL rendering.
//!
//! Every dialect implements [`SqlSyntaxProvider`]: identifier quoting,
//! literal formatting, column clauses and a table of format-string
//! templates with positional `{0}`, `{1}`, … placeholders. Expressions only
//! talk to this trait, so swapping dialects never touches expression code.
//!
//! Templates that a dialect cannot express return `None`. Expressions are
//! expected to exclude such dialects from their provider set up front; the
//! `None` only surfaces when an expression was built by hand.

mod mysql;
mod postgres;
mod sqlite;
mod sqlserver;

pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::definitions::{
    ColumnDefinition, ColumnType, ConstraintType, DefaultValue, IndexColumnDefinition,
    IndexDefinition, Rule, SystemMethod,
};
use crate::error::{DdlError, Result};
use crate::provider::DatabaseProvider;
use crate::value::SqlValue;

/// Returns the shared syntax provider for `provider`.
#[must_use]
pub fn for_provider(provider: DatabaseProvider) -> Arc<dyn SqlSyntaxProvider> {
    match provider {
        DatabaseProvider::SqlServer => Arc::new(SqlServerDialect::new()),
        DatabaseProvider::Sqlite => Arc::new(SqliteDialect::new()),
        DatabaseProvider::PostgreSql => Arc::new(PostgresDialect::new()),
        DatabaseProvider::MySql => Arc::new(MySqlDialect::new()),
    }
}

/// Substitutes positional `{n}` placeholders in `template` with `args[n]`.
///
/// Placeholders without a matching argument become empty. Braces that do
/// not enclose a number are copied through, and substituted text is never
/// rescanned.
#[must_use]
pub fn render_template(template: &str, args: &[&str]) -> String {
    let capacity = template.len() + args.iter().map(|a| a.len()).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let index = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|i| (i, close)));
        match index {
            Some((i, close)) => {
                out.push_str(args.get(i).copied().unwrap_or_default());
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub(crate) fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02X}")).collect()
}

/// Rendering strategy for one SQL dialect.
pub trait SqlSyntaxProvider: fmt::Debug + Send + Sync {
    /// The provider this dialect renders for.
    fn provider(&self) -> DatabaseProvider;

    // =========================================================================
    // Quoting and literals
    // =========================================================================

    /// Quotes a bare identifier.
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Quotes a table name, qualified by `schema` when one is given.
    fn quote_table(&self, schema: Option<&str>, table: &str) -> String {
        match schema.filter(|s| !s.is_empty()) {
            Some(schema) => format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(table)
            ),
            None => self.quote_identifier(table),
        }
    }

    /// Quotes a constraint or index name.
    fn quote_name(&self, name: &str) -> String {
        self.quote_identifier(name)
    }

    /// Escapes the body of a string literal.
    fn escape_string(&self, value: &str) -> String {
        value.replace('\'', "''")
    }

    /// Boolean literal text.
    fn format_bool(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    /// Binary literal text.
    fn format_blob(&self, bytes: &[u8]) -> String {
        format!("X'{}'", hex_upper(bytes))
    }

    /// Date-time literal text, quotes included.
    fn format_date_time(&self, value: &NaiveDateTime) -> String {
        format!("'{}'", value.format("%Y-%m-%d %H:%M:%S"))
    }

    /// Renders a literal value.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Configuration`] for NaN or infinite floats, which
    /// have no literal form in any dialect.
    fn quote_value(&self, value: &SqlValue) -> Result<String> {
        Ok(match value {
            SqlValue::Null => String::from("NULL"),
            SqlValue::Bool(b) => self.format_bool(*b).to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(f) if f.is_finite() => f.to_string(),
            SqlValue::Float(f) => {
                return Err(DdlError::configuration(format!(
                    "float value {f} has no SQL literal"
                )));
            }
            SqlValue::Text(s) => format!("'{}'", self.escape_string(s)),
            SqlValue::Blob(b) => self.format_blob(b),
            SqlValue::DateTime(dt) => self.format_date_time(dt),
        })
    }

    // =========================================================================
    // Column clauses
    // =========================================================================

    /// Maps a logical column type to dialect type text.
    fn map_data_type(&self, column_type: &ColumnType) -> String;

    /// Function text for a system default, `None` when the dialect has none.
    fn format_system_method(&self, method: SystemMethod) -> Option<&'static str>;

    /// Template wrapping a rendered default: `{0}` = default text.
    fn default_value_format(&self) -> &'static str {
        "DEFAULT {0}"
    }

    /// NULL / NOT NULL clause.
    fn format_nullable(&self, column: &ColumnDefinition) -> &'static str {
        if column.nullable {
            "NULL"
        } else {
            "NOT NULL"
        }
    }

    /// Named default constraint clause. Empty for dialects that do not name
    /// defaults.
    fn format_default_constraint(&self, _column: &ColumnDefinition) -> String {
        String::new()
    }

    /// Renders a default value, `None` when the dialect cannot express it.
    ///
    /// # Errors
    ///
    /// Fails when a literal default cannot be rendered.
    fn render_default(&self, default: &DefaultValue) -> Result<Option<String>> {
        Ok(match default {
            DefaultValue::Literal(value) => Some(self.quote_value(value)?),
            DefaultValue::Method(method) => self.format_system_method(*method).map(String::from),
            DefaultValue::Expression(expr) => Some(expr.clone()),
        })
    }

    /// Renders the column's default, logging and returning `None` when the
    /// dialect cannot express it.
    ///
    /// # Errors
    ///
    /// Fails when a literal default cannot be rendered.
    fn column_default(&self, column: &ColumnDefinition) -> Result<Option<String>> {
        let Some(default) = &column.default else {
            return Ok(None);
        };
        let rendered = self.render_default(default)?;
        if rendered.is_none() {
            warn!(
                provider = %self.provider(),
                table = %column.table_name,
                column = %column.name,
                "default value has no rendering for this dialect; omitted"
            );
        }
        Ok(rendered)
    }

    /// DEFAULT clause.
    ///
    /// # Errors
    ///
    /// Fails when a literal default cannot be rendered.
    fn format_default(&self, column: &ColumnDefinition) -> Result<String> {
        Ok(self
            .column_default(column)?
            .map(|sql| render_template(self.default_value_format(), &[sql.as_str()]))
            .unwrap_or_default())
    }

    /// Whether a single-column primary key is declared on the column itself
    /// when creating a table.
    fn inline_primary_key(&self) -> bool {
        false
    }

    /// Inline PRIMARY KEY clause, used when [`Self::inline_primary_key`]
    /// holds.
    fn format_primary_key(&self, _column: &ColumnDefinition) -> String {
        String::new()
    }

    /// Identity / auto-increment clause.
    fn format_identity(&self, column: &ColumnDefinition) -> String;

    /// Dialect type text for a column, failing when no type was declared.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Configuration`] when the column has no type.
    fn column_type(&self, column: &ColumnDefinition) -> Result<String> {
        column
            .column_type
            .as_ref()
            .map(|column_type| self.map_data_type(column_type))
            .ok_or_else(|| {
                DdlError::configuration(format!(
                    "column '{}' on table '{}' has no type",
                    column.name, column.table_name
                ))
            })
    }

    /// Column clause: name, type, nullability, default constraint, default,
    /// inline primary key (only with `inline_primary_key`), identity. Empty
    /// clauses are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Configuration`] when the column has no type or
    /// its default cannot be rendered.
    fn format_column(&self, column: &ColumnDefinition, inline_primary_key: bool) -> Result<String> {
        let primary_key = if inline_primary_key {
            self.format_primary_key(column)
        } else {
            String::new()
        };
        let clauses = [
            self.quote_identifier(&column.name),
            self.column_type(column)?,
            self.format_nullable(column).to_string(),
            self.format_default_constraint(column),
            self.format_default(column)?,
            primary_key,
            self.format_identity(column),
        ];
        Ok(clauses
            .into_iter()
            .filter(|clause| !clause.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Column clause for adding a column to an existing table. Inline
    /// primary keys cannot be added after the fact and are omitted.
    ///
    /// # Errors
    ///
    /// See [`Self::format_column`].
    fn column_definition(&self, column: &ColumnDefinition) -> Result<String> {
        if column.primary_key && self.inline_primary_key() {
            warn!(
                provider = %self.provider(),
                table = %column.table_name,
                column = %column.name,
                "primary key cannot be added to an existing table; omitted"
            );
        }
        self.format_column(column, false)
    }

    /// Column clause used by `ALTER COLUMN`: name, type and nullability.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Configuration`] when the column has no type.
    fn alter_column_clause(&self, column: &ColumnDefinition) -> Result<String> {
        Ok(format!(
            "{} {} {}",
            self.quote_identifier(&column.name),
            self.column_type(column)?,
            self.format_nullable(column)
        ))
    }

    /// ` ON {on_what} {action}`, or empty for [`Rule::None`].
    fn format_cascade(&self, on_what: &str, rule: Rule) -> String {
        rule.as_sql()
            .map(|action| format!(" ON {on_what} {action}"))
            .unwrap_or_default()
    }

    /// Prefix placed before `INDEX`, trailing space included.
    fn index_type_prefix(&self, index: &IndexDefinition) -> String {
        if index.unique {
            String::from("UNIQUE ")
        } else {
            String::new()
        }
    }

    /// One column of an index column list.
    fn format_index_column(&self, column: &IndexColumnDefinition) -> String {
        match column.direction {
            Some(direction) => format!(
                "{} {}",
                self.quote_identifier(&column.name),
                direction.as_sql()
            ),
            None => self.quote_identifier(&column.name),
        }
    }

    // =========================================================================
    // Statement templates
    // =========================================================================

    /// `{0}` = table, `{1}` = comma-joined column and constraint clauses.
    fn create_table_format(&self) -> &'static str {
        "CREATE TABLE {0} ({1})"
    }

    /// Table-level primary key clause, `{0}` = constraint, `{1}` = columns.
    fn primary_key_clause_format(&self) -> &'static str {
        "CONSTRAINT {0} PRIMARY KEY ({1})"
    }

    /// `{0}` = table, `{1}` = column clause.
    fn add_column_format(&self) -> &'static str {
        "ALTER TABLE {0} ADD {1}"
    }

    /// `{0}` = table, `{1}` = column.
    fn drop_column_format(&self) -> &'static str {
        "ALTER TABLE {0} DROP COLUMN {1}"
    }

    /// `{0}` = table.
    fn drop_table_format(&self) -> &'static str {
        "DROP TABLE {0}"
    }

    /// `{0}` = index type prefix, `{1}` = index, `{2}` = table, `{3}` = columns.
    fn create_index_format(&self) -> &'static str {
        "CREATE {0}INDEX {1} ON {2} ({3})"
    }

    /// `{0}` = index, `{1}` = table.
    fn drop_index_format(&self) -> &'static str {
        "DROP INDEX {0}"
    }

    /// `{0}` = table, `{1}` = columns, `{2}` = values.
    fn insert_data_format(&self) -> &'static str {
        "INSERT INTO {0} ({1}) VALUES ({2})"
    }

    /// `{0}` = table, `{1}` = where clause.
    fn delete_data_format(&self) -> &'static str {
        "DELETE FROM {0} WHERE {1}"
    }

    /// `{0}` = table, `{1}` = assignments, `{2}` = where clause.
    fn update_data_format(&self) -> &'static str {
        "UPDATE {0} SET {1} WHERE {2}"
    }

    /// `{0}` = table, `{1}` = clause from [`Self::alter_column_clause`].
    fn alter_column_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} ALTER COLUMN {1}")
    }

    /// Sets a column default on an existing column. `{0}` = table,
    /// `{1}` = column, `{2}` = default text, `{3}` = default constraint.
    fn set_default_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} ALTER COLUMN {1} SET DEFAULT {2}")
    }

    /// `{0}` = old table, `{1}` = new table.
    fn rename_table_format(&self) -> &'static str {
        "ALTER TABLE {0} RENAME TO {1}"
    }

    /// `{0}` = table, `{1}` = old column, `{2}` = new column.
    fn rename_column_format(&self) -> &'static str {
        "ALTER TABLE {0} RENAME COLUMN {1} TO {2}"
    }

    /// `{0}` = table, `{1}` = constraint, `{2}` = kind keyword, `{3}` = columns.
    fn create_constraint_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} ADD CONSTRAINT {1} {2} ({3})")
    }

    /// `{0}` = table, `{1}` = constraint.
    fn delete_constraint_format(&self, _kind: ConstraintType) -> Option<&'static str> {
        Some("ALTER TABLE {0} DROP CONSTRAINT {1}")
    }

    /// `{0}` = foreign table, `{1}` = constraint, `{2}` = foreign columns,
    /// `{3}` = primary table, `{4}` = primary columns, `{5}` = on delete,
    /// `{6}` = on update.
    fn create_foreign_key_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} ADD CONSTRAINT {1} FOREIGN KEY ({2}) REFERENCES {3} ({4}){5}{6}")
    }

    /// `{0}` = foreign table, `{1}` = constraint.
    fn drop_foreign_key_format(&self) -> Option<&'static str> {
        Some("ALTER TABLE {0} DROP CONSTRAINT {1}")
    }

    /// `{0}` = table, `{1}` = column, `{2}` = constraint.
    fn delete_default_constraint_format(&self) -> Option<&'static str> {
        None
    }

    /// Statements bracketing an insert with explicit identity values,
    /// `{0}` = table.
    fn identity_insert_formats(&self) -> Option<(&'static str, &'static str)> {
        None
    }

    /// Renders a table rename.
    fn format_table_rename(&self, schema: Option<&str>, old_name: &str, new_name: &str) -> String {
        let old_table = self.quote_table(schema, old_name);
        let new_table = self.quote_identifier(new_name);
        render_template(self.rename_table_format(), &[old_table.as_str(), new_table.as_str()])
    }

    /// Renders a column rename.
    fn format_column_rename(
        &self,
        schema: Option<&str>,
        table: &str,
        old_name: &str,
        new_name: &str,
    ) -> String {
        let table = self.quote_table(schema, table);
        let old_column = self.quote_identifier(old_name);
        let new_column = self.quote_identifier(new_name);
        render_template(
            self.rename_column_format(),
            &[table.as_str(), old_column.as_str(), new_column.as_str()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_positional() {
        assert_eq!(
            render_template("ALTER TABLE {0} DROP COLUMN {1}", &["t", "c"]),
            "ALTER TABLE t DROP COLUMN c"
        );
        assert_eq!(render_template("{1} {0} {1}", &["a", "b"]), "b a b");
    }

    #[test]
    fn test_render_template_keeps_stray_braces() {
        assert_eq!(render_template("{x} {0}", &["a"]), "{x} a");
        assert_eq!(render_template("open {", &[]), "open {");
        assert_eq!(render_template("{3}", &["a"]), "");
    }

    #[test]
    fn test_render_template_does_not_rescan_arguments() {
        assert_eq!(render_template("{0}", &["{1}", "x"]), "{1}");
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        let dialect = for_provider(DatabaseProvider::PostgreSql);
        assert_eq!(dialect.quote_value(&SqlValue::Float(1.5)).unwrap(), "1.5");
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                dialect.quote_value(&SqlValue::Float(value)),
                Err(DdlError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_hex_upper() {
        assert_eq!(hex_upper(&[0x00, 0xAB, 0x7F]), "00AB7F");
        assert_eq!(hex_upper(&[]), "");
    }

    #[test]
    fn test_catalog_matches_provider() {
        for provider in DatabaseProvider::ALL {
            assert_eq!(for_provider(provider).provider(), provider);
        }
    }
}
