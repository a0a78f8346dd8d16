use super::{quote_columns, require_table, ExpressionEnv, MigrationExpression};
use crate::definitions::ConstraintDefinition;
use crate::error::{DdlError, Result};
use crate::syntax::render_template;

fn constraint_name(constraint: &ConstraintDefinition) -> Result<String> {
    constraint.resolved_name().ok_or_else(|| {
        DdlError::configuration(format!(
            "{:?} constraint on table '{}' has no name",
            constraint.constraint_type, constraint.table_name
        ))
    })
}

/// Adds a primary key or unique constraint over a column list.
#[derive(Debug, Clone)]
pub struct CreateConstraint {
    env: ExpressionEnv,
    pub constraint: ConstraintDefinition,
}

impl CreateConstraint {
    #[must_use]
    pub const fn new(env: ExpressionEnv, constraint: ConstraintDefinition) -> Self {
        Self { env, constraint }
    }
}

impl MigrationExpression for CreateConstraint {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        let constraint = &self.constraint;
        let keyword = constraint.constraint_type.as_sql().ok_or_else(|| {
            DdlError::configuration(format!(
                "{:?} constraints cannot be created from a column list",
                constraint.constraint_type
            ))
        })?;
        require_table(&constraint.table_name, format_args!("{keyword} constraint"))?;
        if constraint.columns.is_empty() {
            return Err(DdlError::configuration(format!(
                "{keyword} constraint on table '{}' has no columns",
                constraint.table_name
            )));
        }

        let syntax = self.env.syntax();
        let template = syntax
            .create_constraint_format()
            .ok_or_else(|| self.env.unsupported("create constraint"))?;
        let table = syntax.quote_table(constraint.schema_name.as_deref(), &constraint.table_name);
        let name = syntax.quote_name(&constraint_name(constraint)?);
        let columns = quote_columns(syntax, &constraint.columns);

        Ok(render_template(
            template,
            &[table.as_str(), name.as_str(), keyword, columns.as_str()],
        ))
    }
}

/// Drops a named constraint.
#[derive(Debug, Clone)]
pub struct DeleteConstraint {
    env: ExpressionEnv,
    pub constraint: ConstraintDefinition,
}

impl DeleteConstraint {
    #[must_use]
    pub const fn new(env: ExpressionEnv, constraint: ConstraintDefinition) -> Self {
        Self { env, constraint }
    }
}

impl MigrationExpression for DeleteConstraint {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        let constraint = &self.constraint;
        require_table(&constraint.table_name, "constraint deletion")?;
        let syntax = self.env.syntax();
        let template = syntax
            .delete_constraint_format(constraint.constraint_type)
            .ok_or_else(|| self.env.unsupported("delete constraint"))?;
        let table = syntax.quote_table(constraint.schema_name.as_deref(), &constraint.table_name);
        let name = syntax.quote_name(&constraint_name(constraint)?);
        Ok(render_template(template, &[table.as_str(), name.as_str()]))
    }
}

/// Drops the default bound to a column.
///
/// Dialects with named default constraints drop the constraint, falling
/// back to the conventional `DF_{table}_{column}` name; the others drop the
/// column default directly.
#[derive(Debug, Clone)]
pub struct DeleteDefaultConstraint {
    env: ExpressionEnv,
    pub schema_name: Option<String>,
    pub table_name: String,
    pub column_name: String,
    pub constraint_name: Option<String>,
}

impl DeleteDefaultConstraint {
    #[must_use]
    pub const fn new(env: ExpressionEnv) -> Self {
        Self {
            env,
            schema_name: None,
            table_name: String::new(),
            column_name: String::new(),
            constraint_name: None,
        }
    }
}

impl MigrationExpression for DeleteDefaultConstraint {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        if self.column_name.is_empty() {
            return Err(DdlError::configuration(format!(
                "default constraint on table '{}' has no column",
                self.table_name
            )));
        }
        require_table(
            &self.table_name,
            format_args!("default constraint on column '{}'", self.column_name),
        )?;

        let syntax = self.env.syntax();
        let template = syntax
            .delete_default_constraint_format()
            .ok_or_else(|| self.env.unsupported("delete default constraint"))?;
        let table = syntax.quote_table(self.schema_name.as_deref(), &self.table_name);
        let column = syntax.quote_identifier(&self.column_name);
        let name = self
            .constraint_name
            .clone()
            .unwrap_or_else(|| format!("DF_{}_{}", self.table_name, self.column_name));
        let name = syntax.quote_name(&name);

        Ok(render_template(
            template,
            &[table.as_str(), column.as_str(), name.as_str()],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::ConstraintType;
    use crate::expressions::test_support::env;
    use crate::provider::DatabaseProvider;

    fn primary_key() -> ConstraintDefinition {
        let mut pk = ConstraintDefinition::new(ConstraintType::PrimaryKey);
        pk.table_name = "Member".into();
        pk.columns = vec!["Id".into()];
        pk
    }

    #[test]
    fn test_create_primary_key_constraint() {
        let expr = CreateConstraint::new(env(DatabaseProvider::SqlServer), primary_key());
        assert_eq!(
            expr.to_sql().unwrap(),
            "ALTER TABLE [Member] ADD CONSTRAINT [PK_Member] PRIMARY KEY ([Id])"
        );
    }

    #[test]
    fn test_create_unique_constraint_generated_name() {
        let mut uq = ConstraintDefinition::new(ConstraintType::Unique);
        uq.table_name = "Member".into();
        uq.columns = vec!["Email".into(), "Site".into()];
        let expr = CreateConstraint::new(env(DatabaseProvider::PostgreSql), uq);
        assert_eq!(
            expr.to_sql().unwrap(),
            "ALTER TABLE \"Member\" ADD CONSTRAINT \"UQ_Member_Email_Site\" UNIQUE (\"Email\", \"Site\")"
        );
    }

    #[test]
    fn test_create_constraint_without_columns_fails() {
        let mut pk = primary_key();
        pk.columns.clear();
        let expr = CreateConstraint::new(env(DatabaseProvider::SqlServer), pk);
        assert!(matches!(expr.to_sql(), Err(DdlError::Configuration(_))));
    }

    #[test]
    fn test_delete_constraint_per_dialect() {
        let sqlserver = DeleteConstraint::new(env(DatabaseProvider::SqlServer), primary_key());
        assert_eq!(
            sqlserver.to_sql().unwrap(),
            "ALTER TABLE [Member] DROP CONSTRAINT [PK_Member]"
        );
        let mysql = DeleteConstraint::new(env(DatabaseProvider::MySql), primary_key());
        assert_eq!(mysql.to_sql().unwrap(), "ALTER TABLE `Member` DROP PRIMARY KEY");
    }

    #[test]
    fn test_delete_constraint_without_table_fails() {
        let mut pk = ConstraintDefinition::new(ConstraintType::PrimaryKey);
        pk.name = Some("PK_Member".into());
        let expr = DeleteConstraint::new(env(DatabaseProvider::SqlServer), pk);
        assert!(matches!(expr.to_sql(), Err(DdlError::Configuration(_))));

        let mut expr = DeleteDefaultConstraint::new(env(DatabaseProvider::SqlServer));
        expr.column_name = "Created".into();
        assert!(matches!(expr.to_sql(), Err(DdlError::Configuration(_))));
    }

    #[test]
    fn test_delete_default_constraint() {
        let mut expr = DeleteDefaultConstraint::new(env(DatabaseProvider::SqlServer));
        expr.table_name = "Member".into();
        expr.column_name = "Created".into();
        assert_eq!(
            expr.to_sql().unwrap(),
            "ALTER TABLE [Member] DROP CONSTRAINT [DF_Member_Created]"
        );

        let mut expr = DeleteDefaultConstraint::new(env(DatabaseProvider::PostgreSql));
        expr.table_name = "Member".into();
        expr.column_name = "Created".into();
        assert_eq!(
            expr.to_sql().unwrap(),
            "ALTER TABLE \"Member\" ALTER COLUMN \"Created\" DROP DEFAULT"
        );
    }
}
