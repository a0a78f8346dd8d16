use super::{require_table, ExpressionEnv, MigrationExpression, STATEMENT_SEPARATOR};
use crate::definitions::{
    DeletionDataDefinition, InsertionDataDefinition, RowDefinition, UpdateDataDefinition,
};
use crate::error::{DdlError, Result};
use crate::syntax::{render_template, SqlSyntaxProvider};

const ALL_ROWS: &str = "1 = 1";

fn where_clause(syntax: &dyn SqlSyntaxProvider, row: &RowDefinition) -> Result<String> {
    let clauses = row
        .iter()
        .map(|(column, value)| {
            let column = syntax.quote_identifier(column);
            if value.is_null() {
                Ok(format!("{column} IS NULL"))
            } else {
                Ok(format!("{column} = {}", syntax.quote_value(value)?))
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(clauses.join(" AND "))
}

fn assignments(syntax: &dyn SqlSyntaxProvider, row: &RowDefinition) -> Result<String> {
    let assignments = row
        .iter()
        .map(|(column, value)| {
            Ok(format!(
                "{} = {}",
                syntax.quote_identifier(column),
                syntax.quote_value(value)?
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(assignments.join(", "))
}

/// `DELETE FROM`, one statement per row, or a single statement for all rows.
#[derive(Debug, Clone)]
pub struct DeleteData {
    env: ExpressionEnv,
    pub schema_name: Option<String>,
    pub table_name: String,
    pub data: DeletionDataDefinition,
}

impl DeleteData {
    #[must_use]
    pub fn new(env: ExpressionEnv) -> Self {
        Self {
            env,
            schema_name: None,
            table_name: String::new(),
            data: DeletionDataDefinition::default(),
        }
    }
}

impl MigrationExpression for DeleteData {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        if !self.data.is_all_rows && self.data.rows.is_empty() {
            return Ok(String::new());
        }
        require_table(&self.table_name, "delete data")?;

        let syntax = self.env.syntax();
        let table = syntax.quote_table(self.schema_name.as_deref(), &self.table_name);

        if self.data.is_all_rows {
            return Ok(render_template(
                syntax.delete_data_format(),
                &[table.as_str(), ALL_ROWS],
            ));
        }

        let mut statements = Vec::with_capacity(self.data.rows.len());
        for row in &self.data.rows {
            if row.is_empty() {
                return Err(DdlError::configuration(format!(
                    "delete from '{}' has a row without column values",
                    self.table_name
                )));
            }
            let clause = where_clause(syntax, row)?;
            statements.push(render_template(
                syntax.delete_data_format(),
                &[table.as_str(), clause.as_str()],
            ));
        }
        Ok(statements.join(STATEMENT_SEPARATOR))
    }
}

/// `INSERT INTO`, one statement per row.
#[derive(Debug, Clone)]
pub struct InsertData {
    env: ExpressionEnv,
    pub schema_name: Option<String>,
    pub table_name: String,
    pub data: InsertionDataDefinition,
}

impl InsertData {
    #[must_use]
    pub fn new(env: ExpressionEnv, table: impl Into<String>) -> Self {
        Self {
            env,
            schema_name: None,
            table_name: table.into(),
            data: InsertionDataDefinition::default(),
        }
    }
}

impl MigrationExpression for InsertData {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        require_table(&self.table_name, "insert data")?;
        let syntax = self.env.syntax();
        let table = syntax.quote_table(self.schema_name.as_deref(), &self.table_name);

        let mut statements = Vec::with_capacity(self.data.rows.len() + 2);
        for row in &self.data.rows {
            if row.is_empty() {
                return Err(DdlError::configuration(format!(
                    "insert into '{}' has a row without column values",
                    self.table_name
                )));
            }
            let mut columns = Vec::with_capacity(row.len());
            let mut values = Vec::with_capacity(row.len());
            for (column, value) in row.iter() {
                columns.push(syntax.quote_identifier(column));
                values.push(syntax.quote_value(value)?);
            }
            let columns = columns.join(", ");
            let values = values.join(", ");
            statements.push(render_template(
                syntax.insert_data_format(),
                &[table.as_str(), columns.as_str(), values.as_str()],
            ));
        }

        if self.data.identity_insert && !statements.is_empty() {
            if let Some((on, off)) = syntax.identity_insert_formats() {
                statements.insert(0, render_template(on, &[table.as_str()]));
                statements.push(render_template(off, &[table.as_str()]));
            }
        }
        Ok(statements.join(STATEMENT_SEPARATOR))
    }
}

/// `UPDATE .. SET .. WHERE`.
///
/// Every pair of the condition must match; NULL values compare with
/// `IS NULL`. An update without a condition must opt into all rows.
#[derive(Debug, Clone)]
pub struct UpdateData {
    env: ExpressionEnv,
    pub schema_name: Option<String>,
    pub table_name: String,
    pub data: UpdateDataDefinition,
}

impl UpdateData {
    #[must_use]
    pub fn new(env: ExpressionEnv, table: impl Into<String>) -> Self {
        Self {
            env,
            schema_name: None,
            table_name: table.into(),
            data: UpdateDataDefinition::default(),
        }
    }
}

impl MigrationExpression for UpdateData {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        require_table(&self.table_name, "update data")?;
        if self.data.set.is_empty() {
            return Err(DdlError::configuration(format!(
                "update of '{}' sets no columns",
                self.table_name
            )));
        }

        let syntax = self.env.syntax();
        let condition = if self.data.is_all_rows {
            String::from(ALL_ROWS)
        } else if self.data.condition.is_empty() {
            return Err(DdlError::configuration(format!(
                "update of '{}' has no condition; use all rows to update everything",
                self.table_name
            )));
        } else {
            where_clause(syntax, &self.data.condition)?
        };
        let table = syntax.quote_table(self.schema_name.as_deref(), &self.table_name);
        let assignments = assignments(syntax, &self.data.set)?;

        Ok(render_template(
            syntax.update_data_format(),
            &[table.as_str(), assignments.as_str(), condition.as_str()],
        ))
    }
}
