//! Staged fluent builders using the typestate pattern.
//!
//! Each builder borrows the [`MigrationContext`] mutably and only exposes
//! the calls that are legal at its current stage. Expressions are pushed
//! onto the context as soon as they are created; later calls refine them in
//! place through a typed handle, so nothing needs finalizing.
//!
//! ```rust
//! use oxide_ddl::{DatabaseProvider, MigrationContext};
//!
//! let mut ctx = MigrationContext::for_provider(DatabaseProvider::SqlServer, &[]);
//! ctx.create()
//!     .column("Email")
//!     .on_table("Member")
//!     .as_string_with_length(255)
//!     .not_nullable()
//!     .unique();
//!
//! assert_eq!(ctx.expressions().len(), 2);
//! ```

// Builders are live once created; dropping one mid-chain is normal.
#![allow(clippy::return_self_not_must_use, clippy::must_use_candidate)]

#[macro_use]
mod options;

mod alter;
mod column;
mod constraint;
mod data;
mod delete;
mod foreign_key;
mod index;
mod rename;
mod table;

pub use alter::AlterColumnBuilder;
pub use column::{ColumnForeignKeyBuilder, CreateColumnBuilder};
pub use constraint::CreateConstraintBuilder;
pub use data::{InsertDataBuilder, UpdateDataBuilder};
pub use delete::{
    DeleteColumnBuilder, DeleteConstraintBuilder, DeleteDataBuilder,
    DeleteDefaultConstraintBuilder, DeleteForeignKeyBuilder, DeleteIndexBuilder,
    DeleteTableBuilder,
};
pub use foreign_key::CreateForeignKeyBuilder;
pub use index::CreateIndexBuilder;
pub use rename::{RenameColumnBuilder, RenameTableBuilder};
pub use table::{CreateTableBuilder, CreateTableColumnBuilder, TableForeignKeyBuilder};

use crate::context::MigrationContext;
use crate::definitions::{
    ColumnDefinition, ConstraintDefinition, ConstraintType, ForeignKeyDefinition, IndexDefinition,
    TableDefinition,
};
use crate::expressions::{
    AlterColumn, CreateColumn, CreateConstraint, CreateForeignKey, CreateIndex, CreateTable,
    DeleteColumn, DeleteConstraint, DeleteData, DeleteDefaultConstraint, DeleteForeignKey,
    DeleteIndex, DeleteTable, ExecuteSql, ExpressionEnv, InsertData, RenameColumn, RenameTable,
    UpdateData,
};
use crate::provider::DatabaseProvider;

// =============================================================================
// Typestate Markers
// =============================================================================

/// Marker: no table set yet.
#[derive(Debug, Clone, Copy)]
pub struct NoTable;

/// Marker: table set.
#[derive(Debug, Clone, Copy)]
pub struct HasTable;

/// Marker: column type declared; column options are available.
#[derive(Debug, Clone, Copy)]
pub struct HasType;

/// Marker: at least one column set.
#[derive(Debug, Clone, Copy)]
pub struct HasColumns;

/// Marker: foreign key referencing table set.
#[derive(Debug, Clone, Copy)]
pub struct HasForeignTable;

/// Marker: foreign key referencing columns set.
#[derive(Debug, Clone, Copy)]
pub struct HasForeignColumns;

/// Marker: foreign key referenced table set.
#[derive(Debug, Clone, Copy)]
pub struct HasPrimaryTable;

/// Marker: foreign key complete; cascade rules are available.
#[derive(Debug, Clone, Copy)]
pub struct HasPrimaryColumns;

/// Providers that cannot alter constraints on an existing table.
pub(crate) const NO_ALTER_CONSTRAINT: &[DatabaseProvider] = &[DatabaseProvider::Sqlite];

/// Providers that cannot change an existing column's definition.
pub(crate) const NO_ALTER_COLUMN: &[DatabaseProvider] = &[DatabaseProvider::Sqlite];

// =============================================================================
// Entry points
// =============================================================================

/// Entry point for create expressions.
#[derive(Debug)]
pub struct CreateBuilder<'a> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
}

impl<'a> CreateBuilder<'a> {
    pub(crate) fn new(ctx: &'a mut MigrationContext, env: ExpressionEnv) -> Self {
        Self { ctx, env }
    }

    /// Creates a table; columns follow with `with_column`.
    pub fn table(mut self, name: impl Into<String>) -> CreateTableBuilder<'a> {
        let id = self
            .ctx
            .push(CreateTable::new(self.env.clone(), TableDefinition::new(name)));
        CreateTableBuilder::new(self.ctx, self.env, id)
    }

    /// Adds a column to an existing table.
    pub fn column(mut self, name: impl Into<String>) -> CreateColumnBuilder<'a, NoTable> {
        let id = self
            .ctx
            .push(CreateColumn::new(self.env.clone(), ColumnDefinition::new(name)));
        CreateColumnBuilder::new(self.ctx, self.env, id)
    }

    /// Creates an index with a generated name.
    pub fn index(mut self) -> CreateIndexBuilder<'a, NoTable> {
        let id = self
            .ctx
            .push(CreateIndex::new(self.env, IndexDefinition::default()));
        CreateIndexBuilder::new(self.ctx, id)
    }

    /// Creates a named index.
    pub fn index_named(mut self, name: impl Into<String>) -> CreateIndexBuilder<'a, NoTable> {
        let index = IndexDefinition {
            name: Some(name.into()),
            ..IndexDefinition::default()
        };
        let id = self.ctx.push(CreateIndex::new(self.env, index));
        CreateIndexBuilder::new(self.ctx, id)
    }

    /// Creates a foreign key with a generated name.
    pub fn foreign_key(self) -> CreateForeignKeyBuilder<'a, NoTable> {
        self.foreign_key_from(ForeignKeyDefinition::default())
    }

    /// Creates a named foreign key.
    pub fn foreign_key_named(self, name: impl Into<String>) -> CreateForeignKeyBuilder<'a, NoTable> {
        self.foreign_key_from(ForeignKeyDefinition::named(name))
    }

    fn foreign_key_from(mut self, fk: ForeignKeyDefinition) -> CreateForeignKeyBuilder<'a, NoTable> {
        let env = self.env.without(NO_ALTER_CONSTRAINT);
        let id = self.ctx.push(CreateForeignKey::new(env, fk));
        CreateForeignKeyBuilder::new(self.ctx, id)
    }

    /// Adds a primary key constraint. An empty name is replaced by
    /// `PK_{table}`.
    pub fn primary_key(self, name: impl Into<String>) -> CreateConstraintBuilder<'a, NoTable> {
        self.constraint(ConstraintType::PrimaryKey, name.into())
    }

    /// Adds a unique constraint. An empty name is replaced by
    /// `UQ_{table}_{columns}`.
    pub fn unique_constraint(
        self,
        name: impl Into<String>,
    ) -> CreateConstraintBuilder<'a, NoTable> {
        self.constraint(ConstraintType::Unique, name.into())
    }

    fn constraint(
        mut self,
        kind: ConstraintType,
        name: String,
    ) -> CreateConstraintBuilder<'a, NoTable> {
        let mut constraint = ConstraintDefinition::new(kind);
        constraint.name = Some(name).filter(|n| !n.is_empty());
        let env = self.env.without(NO_ALTER_CONSTRAINT);
        let id = self.ctx.push(CreateConstraint::new(env, constraint));
        CreateConstraintBuilder::new(self.ctx, id)
    }
}

/// Entry point for delete expressions.
#[derive(Debug)]
pub struct DeleteBuilder<'a> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
}

impl<'a> DeleteBuilder<'a> {
    pub(crate) fn new(ctx: &'a mut MigrationContext, env: ExpressionEnv) -> Self {
        Self { ctx, env }
    }

    /// Drops a column; more columns of the same table can follow.
    pub fn column(mut self, name: impl Into<String>) -> DeleteColumnBuilder<'a, NoTable> {
        let id = self.ctx.push(DeleteColumn::new(self.env, name));
        DeleteColumnBuilder::new(self.ctx, id)
    }

    /// Drops a table.
    pub fn table(mut self, name: impl Into<String>) -> DeleteTableBuilder<'a> {
        let id = self.ctx.push(DeleteTable::new(self.env, name));
        DeleteTableBuilder::new(self.ctx, id)
    }

    /// Drops an index.
    pub fn index(mut self, name: impl Into<String>) -> DeleteIndexBuilder<'a, NoTable> {
        let index = IndexDefinition {
            name: Some(name.into()),
            ..IndexDefinition::default()
        };
        let id = self.ctx.push(DeleteIndex::new(self.env, index));
        DeleteIndexBuilder::new(self.ctx, id)
    }

    /// Drops a foreign key.
    pub fn foreign_key(mut self, name: impl Into<String>) -> DeleteForeignKeyBuilder<'a, NoTable> {
        let env = self.env.without(NO_ALTER_CONSTRAINT);
        let id = self
            .ctx
            .push(DeleteForeignKey::new(env, ForeignKeyDefinition::named(name)));
        DeleteForeignKeyBuilder::new(self.ctx, id)
    }

    /// Deletes rows.
    pub fn data(mut self) -> DeleteDataBuilder<'a, NoTable> {
        let id = self.ctx.push(DeleteData::new(self.env));
        DeleteDataBuilder::new(self.ctx, id)
    }

    /// Drops the default bound to a column.
    pub fn default_constraint(mut self) -> DeleteDefaultConstraintBuilder<'a, NoTable> {
        let env = self.env.without(NO_ALTER_CONSTRAINT);
        let id = self.ctx.push(DeleteDefaultConstraint::new(env));
        DeleteDefaultConstraintBuilder::new(self.ctx, id)
    }

    /// Drops a primary key constraint.
    pub fn primary_key(self, name: impl Into<String>) -> DeleteConstraintBuilder<'a, NoTable> {
        self.constraint(ConstraintType::PrimaryKey, name.into())
    }

    /// Drops a unique constraint.
    pub fn unique_constraint(
        self,
        name: impl Into<String>,
    ) -> DeleteConstraintBuilder<'a, NoTable> {
        self.constraint(ConstraintType::Unique, name.into())
    }

    fn constraint(mut self, kind: ConstraintType, name: String) -> DeleteConstraintBuilder<'a, NoTable> {
        let mut constraint = ConstraintDefinition::new(kind);
        constraint.name = Some(name).filter(|n| !n.is_empty());
        let env = self.env.without(NO_ALTER_CONSTRAINT);
        let id = self.ctx.push(DeleteConstraint::new(env, constraint));
        DeleteConstraintBuilder::new(self.ctx, id)
    }
}

/// Entry point for rename expressions.
#[derive(Debug)]
pub struct RenameBuilder<'a> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
}

impl<'a> RenameBuilder<'a> {
    pub(crate) fn new(ctx: &'a mut MigrationContext, env: ExpressionEnv) -> Self {
        Self { ctx, env }
    }

    /// Renames a table.
    pub fn table(mut self, old_name: impl Into<String>) -> RenameTableBuilder<'a> {
        let id = self.ctx.push(RenameTable::new(self.env, old_name));
        RenameTableBuilder::new(self.ctx, id)
    }

    /// Renames a column.
    pub fn column(mut self, old_name: impl Into<String>) -> RenameColumnBuilder<'a, NoTable> {
        let id = self.ctx.push(RenameColumn::new(self.env, old_name));
        RenameColumnBuilder::new(self.ctx, id)
    }
}

/// Entry point for insert expressions.
#[derive(Debug)]
pub struct InsertBuilder<'a> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
}

impl<'a> InsertBuilder<'a> {
    pub(crate) fn new(ctx: &'a mut MigrationContext, env: ExpressionEnv) -> Self {
        Self { ctx, env }
    }

    /// Inserts rows into `table`.
    pub fn into_table(mut self, table: impl Into<String>) -> InsertDataBuilder<'a> {
        let id = self.ctx.push(InsertData::new(self.env, table));
        InsertDataBuilder::new(self.ctx, id)
    }
}

/// Entry point for alter expressions.
#[derive(Debug)]
pub struct AlterBuilder<'a> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
}

impl<'a> AlterBuilder<'a> {
    pub(crate) fn new(ctx: &'a mut MigrationContext, env: ExpressionEnv) -> Self {
        Self { ctx, env }
    }

    /// Changes an existing column. Skipped on providers that cannot alter
    /// columns in place.
    pub fn column(mut self, name: impl Into<String>) -> AlterColumnBuilder<'a, NoTable> {
        let env = self.env.without(NO_ALTER_COLUMN);
        let id = self
            .ctx
            .push(AlterColumn::new(env, ColumnDefinition::new(name)));
        AlterColumnBuilder::new(self.ctx, id)
    }
}

/// Entry point for update expressions.
#[derive(Debug)]
pub struct UpdateBuilder<'a> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
}

impl<'a> UpdateBuilder<'a> {
    pub(crate) fn new(ctx: &'a mut MigrationContext, env: ExpressionEnv) -> Self {
        Self { ctx, env }
    }

    /// Updates rows of `table`.
    pub fn table(mut self, table: impl Into<String>) -> UpdateDataBuilder<'a> {
        let id = self.ctx.push(UpdateData::new(self.env, table));
        UpdateDataBuilder::new(self.ctx, id)
    }
}

/// Entry point for raw SQL.
#[derive(Debug)]
pub struct ExecuteBuilder<'a> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
}

impl<'a> ExecuteBuilder<'a> {
    pub(crate) fn new(ctx: &'a mut MigrationContext, env: ExpressionEnv) -> Self {
        Self { ctx, env }
    }

    /// Enqueues `sql` verbatim.
    pub fn sql(mut self, sql: impl Into<String>) {
        self.ctx.push(ExecuteSql::new(self.env, sql));
    }
}
