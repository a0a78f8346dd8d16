//! Builders for delete expressions.

use std::marker::PhantomData;

use super::{HasTable, NoTable};
use crate::context::{ExprId, MigrationContext};
use crate::definitions::RowDefinition;
use crate::expressions::{
    DeleteColumn, DeleteConstraint, DeleteData, DeleteDefaultConstraint, DeleteForeignKey,
    DeleteIndex, DeleteTable,
};
use crate::value::SqlValue;

/// Declares a staged builder over one queued expression.
macro_rules! staged_builder {
    ($(#[$meta:meta])* $name:ident => $expr:ty) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name<'a, S> {
            ctx: &'a mut MigrationContext,
            id: ExprId<$expr>,
            _state: PhantomData<S>,
        }

        impl<'a, S> $name<'a, S> {
            pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<$expr>) -> Self {
                Self {
                    ctx,
                    id,
                    _state: PhantomData,
                }
            }

            fn expression(&mut self) -> &mut $expr {
                self.ctx.get_mut(self.id)
            }

            fn into_state<T>(self) -> $name<'a, T> {
                $name::new(self.ctx, self.id)
            }

            #[must_use]
            pub const fn id(&self) -> ExprId<$expr> {
                self.id
            }
        }
    };
}

// =============================================================================
// Columns and tables
// =============================================================================

staged_builder! {
    /// Drops columns from a table.
    DeleteColumnBuilder => DeleteColumn
}

impl<'a> DeleteColumnBuilder<'a, NoTable> {
    /// Adds another column to drop.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.expression().column_names.push(name.into());
        self
    }

    pub fn from_table(mut self, table: impl Into<String>) -> DeleteColumnBuilder<'a, HasTable> {
        self.expression().table_name = table.into();
        self.into_state()
    }
}

impl DeleteColumnBuilder<'_, HasTable> {
    /// Adds another column to drop.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.expression().column_names.push(name.into());
        self
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.expression().schema_name = Some(schema.into());
        self
    }
}

/// Drops a table.
#[derive(Debug)]
pub struct DeleteTableBuilder<'a> {
    ctx: &'a mut MigrationContext,
    id: ExprId<DeleteTable>,
}

impl<'a> DeleteTableBuilder<'a> {
    pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<DeleteTable>) -> Self {
        Self { ctx, id }
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.ctx.get_mut(self.id).schema_name = Some(schema.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> ExprId<DeleteTable> {
        self.id
    }
}

// =============================================================================
// Indexes and constraints
// =============================================================================

staged_builder! {
    /// Drops an index.
    DeleteIndexBuilder => DeleteIndex
}

impl<'a> DeleteIndexBuilder<'a, NoTable> {
    pub fn on_table(mut self, table: impl Into<String>) -> DeleteIndexBuilder<'a, HasTable> {
        self.expression().index.table_name = table.into();
        self.into_state()
    }
}

impl DeleteIndexBuilder<'_, HasTable> {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.expression().index.schema_name = Some(schema.into());
        self
    }
}

staged_builder! {
    /// Drops a foreign key from its referencing table.
    DeleteForeignKeyBuilder => DeleteForeignKey
}

impl<'a> DeleteForeignKeyBuilder<'a, NoTable> {
    /// Sets the referencing table the constraint lives on.
    pub fn on_table(mut self, table: impl Into<String>) -> DeleteForeignKeyBuilder<'a, HasTable> {
        self.expression().foreign_key.foreign_table = Some(table.into());
        self.into_state()
    }
}

impl DeleteForeignKeyBuilder<'_, HasTable> {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.expression().foreign_key.foreign_table_schema = Some(schema.into());
        self
    }
}

staged_builder! {
    /// Drops a primary key or unique constraint.
    DeleteConstraintBuilder => DeleteConstraint
}

impl<'a> DeleteConstraintBuilder<'a, NoTable> {
    pub fn from_table(mut self, table: impl Into<String>) -> DeleteConstraintBuilder<'a, HasTable> {
        self.expression().constraint.table_name = table.into();
        self.into_state()
    }
}

impl DeleteConstraintBuilder<'_, HasTable> {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.expression().constraint.schema_name = Some(schema.into());
        self
    }
}

staged_builder! {
    /// Drops the default bound to a column.
    DeleteDefaultConstraintBuilder => DeleteDefaultConstraint
}

impl<'a> DeleteDefaultConstraintBuilder<'a, NoTable> {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.expression().schema_name = Some(schema.into());
        self
    }

    pub fn on_table(
        mut self,
        table: impl Into<String>,
    ) -> DeleteDefaultConstraintBuilder<'a, HasTable> {
        self.expression().table_name = table.into();
        self.into_state()
    }
}

impl DeleteDefaultConstraintBuilder<'_, HasTable> {
    pub fn on_column(mut self, column: impl Into<String>) -> Self {
        self.expression().column_name = column.into();
        self
    }

    /// Overrides the conventional `DF_{table}_{column}` constraint name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.expression().constraint_name = Some(name.into());
        self
    }
}

// =============================================================================
// Data
// =============================================================================

staged_builder! {
    /// Deletes rows matching column values, or every row.
    DeleteDataBuilder => DeleteData
}

impl<'a> DeleteDataBuilder<'a, NoTable> {
    pub fn from_table(mut self, table: impl Into<String>) -> DeleteDataBuilder<'a, HasTable> {
        self.expression().table_name = table.into();
        self.into_state()
    }
}

impl DeleteDataBuilder<'_, HasTable> {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.expression().schema_name = Some(schema.into());
        self
    }

    /// Deletes rows whose columns equal every value in `row`.
    pub fn row(mut self, row: RowDefinition) -> Self {
        self.expression().data.rows.push(row);
        self
    }

    /// Deletes rows where `column` is NULL.
    pub fn is_null(self, column: impl Into<String>) -> Self {
        self.row(RowDefinition::new().with(column, SqlValue::Null))
    }

    /// Deletes every row; queued rows are ignored.
    pub fn all_rows(mut self) -> Self {
        self.expression().data.is_all_rows = true;
        self
    }
}
