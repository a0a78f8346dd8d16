//! Table creation builder.
//!
//! `create().table(name)` enqueues the `CREATE TABLE` at once; each
//! `with_column` appends a column to it. Indexes and foreign keys declared
//! on a column are queued after the table.

use std::marker::PhantomData;

use super::{HasTable, HasType, NO_ALTER_CONSTRAINT};
use crate::context::{ExprId, MigrationContext};
use crate::definitions::{
    ColumnDefinition, ColumnType, DefaultValue, ForeignKeyDefinition, IndexColumnDefinition,
    IndexDefinition, Rule, SystemMethod,
};
use crate::expressions::{CreateForeignKey, CreateIndex, CreateTable, ExpressionEnv};
use crate::value::ToSqlValue;

/// Builder for a new table.
#[derive(Debug)]
pub struct CreateTableBuilder<'a> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
    id: ExprId<CreateTable>,
}

impl<'a> CreateTableBuilder<'a> {
    pub(crate) fn new(
        ctx: &'a mut MigrationContext,
        env: ExpressionEnv,
        id: ExprId<CreateTable>,
    ) -> Self {
        Self { ctx, env, id }
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.ctx.get_mut(self.id).table.schema_name = Some(schema.into());
        self
    }

    /// Appends a column; its type comes next.
    pub fn with_column(mut self, name: impl Into<String>) -> CreateTableColumnBuilder<'a, HasTable> {
        let table = &mut self.ctx.get_mut(self.id).table;
        let mut column = ColumnDefinition::new(name).on_table(table.name.clone());
        column.schema_name.clone_from(&table.schema_name);
        table.columns.push(column);
        let index = table.columns.len() - 1;
        CreateTableColumnBuilder {
            table: self,
            index,
            _state: PhantomData,
        }
    }

    /// Handle to the table expression.
    #[must_use]
    pub const fn id(&self) -> ExprId<CreateTable> {
        self.id
    }
}

/// A column of a table being created.
#[derive(Debug)]
pub struct CreateTableColumnBuilder<'a, S> {
    table: CreateTableBuilder<'a>,
    index: usize,
    _state: PhantomData<S>,
}

impl<'a, S> CreateTableColumnBuilder<'a, S> {
    fn column(&mut self) -> &mut ColumnDefinition {
        &mut self.table.ctx.get_mut(self.table.id).table.columns[self.index]
    }

    fn context(&mut self) -> &mut MigrationContext {
        self.table.ctx
    }

    const fn env(&self) -> &ExpressionEnv {
        &self.table.env
    }

    fn into_state<T>(self) -> CreateTableColumnBuilder<'a, T> {
        CreateTableColumnBuilder {
            table: self.table,
            index: self.index,
            _state: PhantomData,
        }
    }

    /// Handle to the table expression.
    #[must_use]
    pub const fn id(&self) -> ExprId<CreateTable> {
        self.table.id
    }
}

impl<'a> CreateTableColumnBuilder<'a, HasTable> {
    /// Declares the column type.
    pub fn as_type(mut self, column_type: ColumnType) -> CreateTableColumnBuilder<'a, HasType> {
        self.column().column_type = Some(column_type);
        self.into_state()
    }

    column_type_methods!(CreateTableColumnBuilder<'a, HasType>);
}

impl<'a> CreateTableColumnBuilder<'a, HasType> {
    column_value_options!();
    column_index_options!();
    column_foreign_key_options!(TableForeignKeyBuilder<'a>);

    /// Adds this column to the table's primary key. Several key columns
    /// form a composite key.
    pub fn primary_key(mut self) -> Self {
        let column = self.column();
        column.primary_key = true;
        column.nullable = false;
        self
    }

    pub fn primary_key_named(mut self, name: impl Into<String>) -> Self {
        self.column().primary_key_name = Some(name.into());
        self.primary_key()
    }

    /// Appends the next column.
    pub fn with_column(self, name: impl Into<String>) -> CreateTableColumnBuilder<'a, HasTable> {
        self.table.with_column(name)
    }
}

foreign_key_rules_stage! {
    /// Cascade stage of a foreign key declared on a column of a new table.
    TableForeignKeyBuilder => CreateTableColumnBuilder
}
