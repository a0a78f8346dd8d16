use super::{quote_columns, require_table, ExpressionEnv, MigrationExpression};
use crate::definitions::TableDefinition;
use crate::error::{DdlError, Result};
use crate::syntax::render_template;

/// `CREATE TABLE` with its columns and primary key.
///
/// A single-column primary key is declared on the column for dialects with
/// inline primary keys; any other key becomes a table-level constraint.
#[derive(Debug, Clone)]
pub struct CreateTable {
    env: ExpressionEnv,
    pub table: TableDefinition,
}

impl CreateTable {
    #[must_use]
    pub const fn new(env: ExpressionEnv, table: TableDefinition) -> Self {
        Self { env, table }
    }
}

impl MigrationExpression for CreateTable {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        let table = &self.table;
        require_table(&table.name, "table creation")?;
        if table.columns.is_empty() {
            return Err(DdlError::configuration(format!(
                "table '{}' has no columns",
                table.name
            )));
        }

        let syntax = self.env.syntax();
        let key_columns: Vec<&str> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
        let inline_key = syntax.inline_primary_key() && key_columns.len() == 1;

        let mut clauses = table
            .columns
            .iter()
            .map(|column| syntax.format_column(column, inline_key && column.primary_key))
            .collect::<Result<Vec<_>>>()?;
        if !inline_key && !key_columns.is_empty() {
            let name = syntax.quote_name(&table.primary_key_name());
            let columns = quote_columns(syntax, &key_columns);
            clauses.push(render_template(
                syntax.primary_key_clause_format(),
                &[name.as_str(), columns.as_str()],
            ));
        }

        let name = syntax.quote_table(table.schema_name.as_deref(), &table.name);
        let body = clauses.join(", ");
        Ok(render_template(
            syntax.create_table_format(),
            &[name.as_str(), body.as_str()],
        ))
    }
}

/// `DROP TABLE`.
#[derive(Debug, Clone)]
pub struct DeleteTable {
    env: ExpressionEnv,
    pub schema_name: Option<String>,
    pub table_name: String,
}

impl DeleteTable {
    #[must_use]
    pub fn new(env: ExpressionEnv, table: impl Into<String>) -> Self {
        Self {
            env,
            schema_name: None,
            table_name: table.into(),
        }
    }
}

impl MigrationExpression for DeleteTable {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        require_table(&self.table_name, "table deletion")?;
        let syntax = self.env.syntax();
        let table = syntax.quote_table(self.schema_name.as_deref(), &self.table_name);
        Ok(render_template(syntax.drop_table_format(), &[table.as_str()]))
    }
}

/// Renames a table within its schema.
#[derive(Debug, Clone)]
pub struct RenameTable {
    env: ExpressionEnv,
    pub schema_name: Option<String>,
    pub old_name: String,
    pub new_name: Option<String>,
}

impl RenameTable {
    #[must_use]
    pub fn new(env: ExpressionEnv, old_name: impl Into<String>) -> Self {
        Self {
            env,
            schema_name: None,
            old_name: old_name.into(),
            new_name: None,
        }
    }
}

impl MigrationExpression for RenameTable {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        let new_name = self.new_name.as_deref().ok_or_else(|| {
            DdlError::configuration(format!("rename of table '{}' has no new name", self.old_name))
        })?;
        Ok(self
            .env
            .syntax()
            .format_table_rename(self.schema_name.as_deref(), &self.old_name, new_name))
    }
}

/// Renames a column of a table.
#[derive(Debug, Clone)]
pub struct RenameColumn {
    env: ExpressionEnv,
    pub schema_name: Option<String>,
    pub table_name: String,
    pub old_name: String,
    pub new_name: Option<String>,
}

impl RenameColumn {
    #[must_use]
    pub fn new(env: ExpressionEnv, old_name: impl Into<String>) -> Self {
        Self {
            env,
            schema_name: None,
            table_name: String::new(),
            old_name: old_name.into(),
            new_name: None,
        }
    }
}

impl MigrationExpression for RenameColumn {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        let new_name = self.new_name.as_deref().ok_or_else(|| {
            DdlError::configuration(format!(
                "rename of column '{}' on table '{}' has no new name",
                self.old_name, self.table_name
            ))
        })?;
        Ok(self.env.syntax().format_column_rename(
            self.schema_name.as_deref(),
            &self.table_name,
            &self.old_name,
            new_name,
        ))
    }
}
