use std::marker::PhantomData;

use super::{HasTable, NoTable};
use crate::context::{ExprId, MigrationContext};
use crate::expressions::{RenameColumn, RenameTable};

/// Renames a table.
#[derive(Debug)]
pub struct RenameTableBuilder<'a> {
    ctx: &'a mut MigrationContext,
    id: ExprId<RenameTable>,
}

impl<'a> RenameTableBuilder<'a> {
    pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<RenameTable>) -> Self {
        Self { ctx, id }
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.ctx.get_mut(self.id).schema_name = Some(schema.into());
        self
    }

    /// Sets the new table name.
    pub fn to(mut self, new_name: impl Into<String>) -> ExprId<RenameTable> {
        self.ctx.get_mut(self.id).new_name = Some(new_name.into());
        self.id
    }
}

/// Renames a column.
#[derive(Debug)]
pub struct RenameColumnBuilder<'a, S> {
    ctx: &'a mut MigrationContext,
    id: ExprId<RenameColumn>,
    _state: PhantomData<S>,
}

impl<'a, S> RenameColumnBuilder<'a, S> {
    pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<RenameColumn>) -> Self {
        Self {
            ctx,
            id,
            _state: PhantomData,
        }
    }

    fn expression(&mut self) -> &mut RenameColumn {
        self.ctx.get_mut(self.id)
    }
}

impl<'a> RenameColumnBuilder<'a, NoTable> {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.expression().schema_name = Some(schema.into());
        self
    }

    pub fn on_table(mut self, table: impl Into<String>) -> RenameColumnBuilder<'a, HasTable> {
        self.expression().table_name = table.into();
        RenameColumnBuilder::new(self.ctx, self.id)
    }
}

impl RenameColumnBuilder<'_, HasTable> {
    /// Sets the new column name.
    pub fn to(mut self, new_name: impl Into<String>) -> ExprId<RenameColumn> {
        self.expression().new_name = Some(new_name.into());
        self.id
    }
}
