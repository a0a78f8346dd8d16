//! Column creation builder.
//!
//! Stages: table (`on_table`) → type (`as_*`) → options. Options that need
//! a separate statement (index, unique, primary key, foreign key) push it
//! right after the column's own expression.

use std::marker::PhantomData;

use super::{HasTable, HasType, NoTable, NO_ALTER_CONSTRAINT};
use crate::context::{ExprId, MigrationContext};
use crate::definitions::{
    ColumnDefinition, ColumnType, ConstraintDefinition, ConstraintType, DefaultValue,
    ForeignKeyDefinition, IndexColumnDefinition, IndexDefinition, Rule, SystemMethod,
};
use crate::expressions::{CreateColumn, CreateConstraint, CreateForeignKey, CreateIndex, ExpressionEnv};
use crate::value::ToSqlValue;

/// Builder for a new column on an existing table.
#[derive(Debug)]
pub struct CreateColumnBuilder<'a, S> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
    id: ExprId<CreateColumn>,
    _state: PhantomData<S>,
}

impl<'a, S> CreateColumnBuilder<'a, S> {
    pub(crate) fn new(
        ctx: &'a mut MigrationContext,
        env: ExpressionEnv,
        id: ExprId<CreateColumn>,
    ) -> Self {
        Self {
            ctx,
            env,
            id,
            _state: PhantomData,
        }
    }

    fn column(&mut self) -> &mut ColumnDefinition {
        &mut self.ctx.get_mut(self.id).column
    }

    fn context(&mut self) -> &mut MigrationContext {
        self.ctx
    }

    const fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn into_state<T>(self) -> CreateColumnBuilder<'a, T> {
        CreateColumnBuilder {
            ctx: self.ctx,
            env: self.env,
            id: self.id,
            _state: PhantomData,
        }
    }

    /// Handle to the column expression.
    #[must_use]
    pub const fn id(&self) -> ExprId<CreateColumn> {
        self.id
    }
}

impl<'a> CreateColumnBuilder<'a, NoTable> {
    /// Sets the schema of the target table.
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.column().schema_name = Some(schema.into());
        self
    }

    /// Sets the target table.
    pub fn on_table(mut self, table: impl Into<String>) -> CreateColumnBuilder<'a, HasTable> {
        self.column().table_name = table.into();
        self.into_state()
    }
}

impl<'a> CreateColumnBuilder<'a, HasTable> {
    /// Declares the column type.
    pub fn as_type(mut self, column_type: ColumnType) -> CreateColumnBuilder<'a, HasType> {
        self.column().column_type = Some(column_type);
        self.into_state()
    }

    column_type_methods!(CreateColumnBuilder<'a, HasType>);
}

impl<'a> CreateColumnBuilder<'a, HasType> {
    column_value_options!();
    column_index_options!();
    column_foreign_key_options!(ColumnForeignKeyBuilder<'a>);

    /// Makes this column the table's primary key with a separate
    /// constraint statement.
    ///
    /// SQLite cannot add a primary key to an existing table; there the key
    /// is skipped. Declare it through `create().table(..)` instead.
    pub fn primary_key(self) -> Self {
        self.push_primary_key(None)
    }

    pub fn primary_key_named(self, name: impl Into<String>) -> Self {
        self.push_primary_key(Some(name.into()))
    }

    fn push_primary_key(mut self, name: Option<String>) -> Self {
        let column = self.column();
        column.primary_key = true;
        column.primary_key_name.clone_from(&name);
        column.nullable = false;

        let mut constraint = ConstraintDefinition::new(ConstraintType::PrimaryKey);
        constraint.name = name;
        constraint.schema_name = column.schema_name.clone();
        constraint.table_name = column.table_name.clone();
        constraint.columns = vec![column.name.clone()];

        let env = self.env.without(NO_ALTER_CONSTRAINT);
        self.ctx.push(CreateConstraint::new(env, constraint));
        self
    }
}

foreign_key_rules_stage! {
    /// Cascade stage of a foreign key declared while adding a column.
    ColumnForeignKeyBuilder => CreateColumnBuilder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::{Expression, MigrationExpression};
    use crate::provider::DatabaseProvider;

    fn kinds(ctx: &MigrationContext) -> Vec<&'static str> {
        ctx.expressions().iter().map(Expression::kind).collect()
    }

    #[test]
    fn test_column_definition_is_updated_in_place() {
        let mut ctx = MigrationContext::for_provider(DatabaseProvider::SqlServer, &[]);
        let id = ctx
            .create()
            .column("Created")
            .in_schema("dbo")
            .on_table("Member")
            .as_date_time()
            .not_nullable()
            .with_default(SystemMethod::CurrentDateTime)
            .id();

        let column = &ctx.get(id).column;
        assert_eq!(column.table_name, "Member");
        assert_eq!(column.schema_name.as_deref(), Some("dbo"));
        assert!(!column.nullable);
        assert_eq!(
            ctx.get(id).to_sql().unwrap(),
            "ALTER TABLE [dbo].[Member] ADD [Created] DATETIME NOT NULL \
             CONSTRAINT [DF_Member_Created] DEFAULT (GETDATE())"
        );
    }

    #[test]
    fn test_unique_queues_index_after_column() {
        let mut ctx = MigrationContext::for_provider(DatabaseProvider::SqlServer, &[]);
        ctx.create()
            .column("Email")
            .on_table("Member")
            .as_string()
            .unique();
        assert_eq!(kinds(&ctx), ["create column", "create index"]);
        assert!(ctx.expressions().iter().all(|e| !e.to_sql().unwrap().is_empty()));
    }

    #[test]
    fn test_options_are_not_deduplicated() {
        let mut ctx = MigrationContext::for_provider(DatabaseProvider::PostgreSql, &[]);
        ctx.create()
            .column("Alias")
            .on_table("Node")
            .as_string()
            .indexed()
            .indexed();
        assert_eq!(kinds(&ctx), ["create column", "create index", "create index"]);
    }

    #[test]
    fn test_primary_key_is_separate_outside_sqlite() {
        let mut ctx = MigrationContext::for_provider(DatabaseProvider::SqlServer, &[]);
        ctx.create()
            .column("Id")
            .on_table("Member")
            .as_int32()
            .identity()
            .primary_key();
        assert_eq!(
            ctx.render_all().unwrap(),
            [
                "ALTER TABLE [Member] ADD [Id] INT NOT NULL IDENTITY(1,1)",
                "ALTER TABLE [Member] ADD CONSTRAINT [PK_Member] PRIMARY KEY ([Id])",
            ]
        );

        let mut ctx = MigrationContext::for_provider(DatabaseProvider::Sqlite, &[]);
        ctx.create()
            .column("Id")
            .on_table("Member")
            .as_int32()
            .identity()
            .primary_key();
        assert_eq!(
            ctx.render_all().unwrap(),
            ["ALTER TABLE \"Member\" ADD COLUMN \"Id\" INTEGER NOT NULL", ""]
        );
    }

    #[test]
    fn test_cascade_applies_to_latest_foreign_key_only() {
        let mut ctx = MigrationContext::for_provider(DatabaseProvider::SqlServer, &[]);
        let first = ctx
            .create()
            .column("OwnerId")
            .on_table("Document")
            .as_int32()
            .foreign_key("FK_Document_Owner", "Member", "Id")
            .id();
        let builder = ctx
            .create()
            .column("EditorId")
            .on_table("Document")
            .as_int32()
            .foreign_key_to("Member", "Id");
        let second = builder.id();
        builder.on_delete(Rule::Cascade);

        assert_eq!(ctx.get(first).foreign_key.on_delete, Rule::None);
        assert_eq!(ctx.get(second).foreign_key.on_delete, Rule::Cascade);
        assert_eq!(ctx.get(second).foreign_key.on_update, Rule::None);
    }

    #[test]
    fn test_referenced_by_points_back_at_column() {
        let mut ctx = MigrationContext::for_provider(DatabaseProvider::PostgreSql, &[]);
        let id = ctx
            .create()
            .column("Id")
            .on_table("Member")
            .as_int32()
            .referenced_by("FK_Login_Member", "Login", "MemberId")
            .on_delete_or_update(Rule::SetNull)
            .id();
        assert_eq!(kinds(&ctx), ["create column", "create foreign key"]);
        assert_eq!(ctx.get(id).column.name, "Id");
        assert!(ctx.get(id).column.foreign_key);
        assert_eq!(
            ctx.expressions()[1].to_sql().unwrap(),
            "ALTER TABLE \"Login\" ADD CONSTRAINT \"FK_Login_Member\" FOREIGN KEY (\"MemberId\") \
             REFERENCES \"Member\" (\"Id\") ON DELETE SET NULL ON UPDATE SET NULL"
        );
    }
}
