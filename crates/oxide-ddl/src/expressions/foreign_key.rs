use super::{quote_columns, ExpressionEnv, MigrationExpression};
use crate::definitions::ForeignKeyDefinition;
use crate::error::{DdlError, Result};
use crate::syntax::render_template;

fn foreign_table(fk: &ForeignKeyDefinition) -> Result<&str> {
    fk.foreign_table.as_deref().filter(|t| !t.is_empty()).ok_or_else(|| {
        DdlError::configuration(format!(
            "foreign key '{}' has no foreign table",
            fk.name.as_deref().unwrap_or("<unnamed>")
        ))
    })
}

fn constraint_name(fk: &ForeignKeyDefinition) -> Result<String> {
    fk.resolved_name().ok_or_else(|| {
        DdlError::configuration("foreign key has no name and not enough information to derive one")
    })
}

/// `ALTER TABLE .. ADD CONSTRAINT .. FOREIGN KEY`.
#[derive(Debug, Clone)]
pub struct CreateForeignKey {
    env: ExpressionEnv,
    pub foreign_key: ForeignKeyDefinition,
}

impl CreateForeignKey {
    #[must_use]
    pub const fn new(env: ExpressionEnv, foreign_key: ForeignKeyDefinition) -> Self {
        Self { env, foreign_key }
    }
}

impl MigrationExpression for CreateForeignKey {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        let fk = &self.foreign_key;
        let foreign_table = foreign_table(fk)?;
        if fk.primary_columns.is_empty() || fk.primary_columns.len() != fk.foreign_columns.len() {
            return Err(DdlError::configuration(format!(
                "foreign key from '{foreign_table}' to '{}' has {} foreign and {} primary columns",
                fk.primary_table,
                fk.foreign_columns.len(),
                fk.primary_columns.len()
            )));
        }

        let syntax = self.env.syntax();
        let template = syntax
            .create_foreign_key_format()
            .ok_or_else(|| self.env.unsupported("create foreign key"))?;

        let foreign = syntax.quote_table(fk.foreign_table_schema.as_deref(), foreign_table);
        let name = syntax.quote_name(&constraint_name(fk)?);
        let foreign_columns = quote_columns(syntax, &fk.foreign_columns);
        let primary = syntax.quote_table(fk.primary_table_schema.as_deref(), &fk.primary_table);
        let primary_columns = quote_columns(syntax, &fk.primary_columns);
        let on_delete = syntax.format_cascade("DELETE", fk.on_delete);
        let on_update = syntax.format_cascade("UPDATE", fk.on_update);

        Ok(render_template(
            template,
            &[
                foreign.as_str(),
                name.as_str(),
                foreign_columns.as_str(),
                primary.as_str(),
                primary_columns.as_str(),
                on_delete.as_str(),
                on_update.as_str(),
            ],
        ))
    }
}

/// Drops a foreign key constraint from its foreign table.
#[derive(Debug, Clone)]
pub struct DeleteForeignKey {
    env: ExpressionEnv,
    pub foreign_key: ForeignKeyDefinition,
}

impl DeleteForeignKey {
    #[must_use]
    pub const fn new(env: ExpressionEnv, foreign_key: ForeignKeyDefinition) -> Self {
        Self { env, foreign_key }
    }
}

impl MigrationExpression for DeleteForeignKey {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        let fk = &self.foreign_key;
        let foreign_table = foreign_table(fk)?;
        let syntax = self.env.syntax();
        let template = syntax
            .drop_foreign_key_format()
            .ok_or_else(|| self.env.unsupported("delete foreign key"))?;

        let table = syntax.quote_table(fk.foreign_table_schema.as_deref(), foreign_table);
        let name = syntax.quote_name(&constraint_name(fk)?);
        Ok(render_template(template, &[table.as_str(), name.as_str()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::Rule;
    use crate::expressions::test_support::env;
    use crate::provider::DatabaseProvider;

    fn login_member() -> ForeignKeyDefinition {
        ForeignKeyDefinition {
            primary_table: "Member".into(),
            foreign_table: Some("Login".into()),
            primary_columns: vec!["Id".into()],
            foreign_columns: vec!["MemberId".into()],
            ..ForeignKeyDefinition::default()
        }
    }

    #[test]
    fn test_create_foreign_key() {
        let mut fk = login_member();
        fk.on_delete = Rule::Cascade;
        let expr = CreateForeignKey::new(env(DatabaseProvider::SqlServer), fk);
        assert_eq!(
            expr.to_sql().unwrap(),
            "ALTER TABLE [Login] ADD CONSTRAINT [FK_Login_Member_Id] FOREIGN KEY ([MemberId]) \
             REFERENCES [Member] ([Id]) ON DELETE CASCADE"
        );
    }

    #[test]
    fn test_create_foreign_key_mismatched_columns_fails() {
        let mut fk = login_member();
        fk.foreign_columns.push("Other".into());
        let expr = CreateForeignKey::new(env(DatabaseProvider::PostgreSql), fk);
        assert!(matches!(expr.to_sql(), Err(DdlError::Configuration(_))));
    }

    #[test]
    fn test_create_foreign_key_on_sqlite_is_unsupported() {
        let expr = CreateForeignKey::new(env(DatabaseProvider::Sqlite), login_member());
        assert!(matches!(
            expr.to_sql(),
            Err(DdlError::UnsupportedSyntax {
                provider: DatabaseProvider::Sqlite,
                ..
            })
        ));
    }

    #[test]
    fn test_delete_foreign_key_requires_foreign_table() {
        let fk = ForeignKeyDefinition::named("FK_Login_Member");
        let expr = DeleteForeignKey::new(env(DatabaseProvider::SqlServer), fk);
        assert!(matches!(expr.to_sql(), Err(DdlError::Configuration(_))));
    }

    #[test]
    fn test_delete_foreign_key_skipped_before_validation() {
        let fk = ForeignKeyDefinition::named("FK_Login_Member");
        let env = env(DatabaseProvider::Sqlite).without(&[DatabaseProvider::Sqlite]);
        let expr = DeleteForeignKey::new(env, fk);
        assert_eq!(expr.to_sql().unwrap(), "");
    }

    #[test]
    fn test_delete_foreign_key_per_dialect() {
        let mut fk = ForeignKeyDefinition::named("FK_Login_Member");
        fk.foreign_table = Some("Login".into());

        let sqlserver = DeleteForeignKey::new(env(DatabaseProvider::SqlServer), fk.clone());
        assert_eq!(
            sqlserver.to_sql().unwrap(),
            "ALTER TABLE [Login] DROP CONSTRAINT [FK_Login_Member]"
        );
        let mysql = DeleteForeignKey::new(env(DatabaseProvider::MySql), fk);
        assert_eq!(
            mysql.to_sql().unwrap(),
            "ALTER TABLE `Login` DROP FOREIGN KEY `FK_Login_Member`"
        );
    }
}
