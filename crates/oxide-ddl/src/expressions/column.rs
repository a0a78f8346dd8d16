use super::{require_table, ExpressionEnv, MigrationExpression, STATEMENT_SEPARATOR};
use crate::definitions::ColumnDefinition;
use crate::error::{DdlError, Result};
use crate::syntax::render_template;

/// `ALTER TABLE .. ADD` for one column.
#[derive(Debug, Clone)]
pub struct CreateColumn {
    env: ExpressionEnv,
    pub column: ColumnDefinition,
}

impl CreateColumn {
    #[must_use]
    pub const fn new(env: ExpressionEnv, column: ColumnDefinition) -> Self {
        Self { env, column }
    }
}

impl MigrationExpression for CreateColumn {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        require_table(&self.column.table_name, format_args!("column '{}'", self.column.name))?;
        let syntax = self.env.syntax();
        let table = syntax.quote_table(self.column.schema_name.as_deref(), &self.column.table_name);
        let clause = syntax.column_definition(&self.column)?;
        Ok(render_template(
            syntax.add_column_format(),
            &[table.as_str(), clause.as_str()],
        ))
    }
}

/// Drops one or more columns from a table, one statement per column.
#[derive(Debug, Clone)]
pub struct DeleteColumn {
    env: ExpressionEnv,
    pub schema_name: Option<String>,
    pub table_name: String,
    pub column_names: Vec<String>,
}

impl DeleteColumn {
    #[must_use]
    pub fn new(env: ExpressionEnv, column: impl Into<String>) -> Self {
        Self {
            env,
            schema_name: None,
            table_name: String::new(),
            column_names: vec![column.into()],
        }
    }
}

impl MigrationExpression for DeleteColumn {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        if self.column_names.is_empty() {
            return Err(DdlError::configuration(format!(
                "column deletion on table '{}' names no columns",
                self.table_name
            )));
        }
        require_table(
            &self.table_name,
            format_args!("deletion of column '{}'", self.column_names[0]),
        )?;

        let syntax = self.env.syntax();
        let table = syntax.quote_table(self.schema_name.as_deref(), &self.table_name);
        let statements: Vec<String> = self
            .column_names
            .iter()
            .map(|name| {
                let column = syntax.quote_identifier(name);
                render_template(syntax.drop_column_format(), &[table.as_str(), column.as_str()])
            })
            .collect();
        Ok(statements.join(STATEMENT_SEPARATOR))
    }
}

/// Changes the type, nullability and default of an existing column.
///
/// The default, when present, is set by a second statement so dialects
/// with named default constraints can name it.
#[derive(Debug, Clone)]
pub struct AlterColumn {
    env: ExpressionEnv,
    pub column: ColumnDefinition,
}

impl AlterColumn {
    #[must_use]
    pub const fn new(env: ExpressionEnv, column: ColumnDefinition) -> Self {
        Self { env, column }
    }
}

impl MigrationExpression for AlterColumn {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        let column = &self.column;
        require_table(&column.table_name, format_args!("alteration of column '{}'", column.name))?;

        let syntax = self.env.syntax();
        let template = syntax
            .alter_column_format()
            .ok_or_else(|| self.env.unsupported("alter column"))?;
        let table = syntax.quote_table(column.schema_name.as_deref(), &column.table_name);
        let clause = syntax.alter_column_clause(column)?;
        let mut statements = vec![render_template(template, &[table.as_str(), clause.as_str()])];

        if let Some(default) = syntax.column_default(column)? {
            let template = syntax
                .set_default_format()
                .ok_or_else(|| self.env.unsupported("set column default"))?;
            let name = syntax.quote_identifier(&column.name);
            let constraint = syntax.quote_name(&column.default_constraint_name());
            statements.push(render_template(
                template,
                &[table.as_str(), name.as_str(), default.as_str(), constraint.as_str()],
            ));
        }
        Ok(statements.join(STATEMENT_SEPARATOR))
    }
}
