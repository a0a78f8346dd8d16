//! Column alteration builder.
//!
//! Stages: table (`on_table`) → type (`as_*`) → nullability and default.
//! The whole column is restated, so the type is required.

use std::marker::PhantomData;

use super::{HasTable, HasType, NoTable};
use crate::context::{ExprId, MigrationContext};
use crate::definitions::{ColumnDefinition, ColumnType, DefaultValue, SystemMethod};
use crate::expressions::AlterColumn;
use crate::value::ToSqlValue;

/// Builder changing an existing column.
#[derive(Debug)]
pub struct AlterColumnBuilder<'a, S> {
    ctx: &'a mut MigrationContext,
    id: ExprId<AlterColumn>,
    _state: PhantomData<S>,
}

impl<'a, S> AlterColumnBuilder<'a, S> {
    pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<AlterColumn>) -> Self {
        Self {
            ctx,
            id,
            _state: PhantomData,
        }
    }

    fn column(&mut self) -> &mut ColumnDefinition {
        &mut self.ctx.get_mut(self.id).column
    }

    fn into_state<T>(self) -> AlterColumnBuilder<'a, T> {
        AlterColumnBuilder::new(self.ctx, self.id)
    }

    #[must_use]
    pub const fn id(&self) -> ExprId<AlterColumn> {
        self.id
    }
}

impl<'a> AlterColumnBuilder<'a, NoTable> {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.column().schema_name = Some(schema.into());
        self
    }

    pub fn on_table(mut self, table: impl Into<String>) -> AlterColumnBuilder<'a, HasTable> {
        self.column().table_name = table.into();
        self.into_state()
    }
}

impl<'a> AlterColumnBuilder<'a, HasTable> {
    /// Declares the new column type.
    pub fn as_type(mut self, column_type: ColumnType) -> AlterColumnBuilder<'a, HasType> {
        self.column().column_type = Some(column_type);
        self.into_state()
    }

    column_type_methods!(AlterColumnBuilder<'a, HasType>);
}

impl AlterColumnBuilder<'_, HasType> {
    column_value_options!();
}
