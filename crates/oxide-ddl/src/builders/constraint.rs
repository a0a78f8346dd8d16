use std::marker::PhantomData;

use super::{HasTable, NoTable};
use crate::context::{ExprId, MigrationContext};
use crate::definitions::ConstraintDefinition;
use crate::expressions::CreateConstraint;

/// Builder for a primary key or unique constraint.
#[derive(Debug)]
pub struct CreateConstraintBuilder<'a, S> {
    ctx: &'a mut MigrationContext,
    id: ExprId<CreateConstraint>,
    _state: PhantomData<S>,
}

impl<'a, S> CreateConstraintBuilder<'a, S> {
    pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<CreateConstraint>) -> Self {
        Self {
            ctx,
            id,
            _state: PhantomData,
        }
    }

    fn constraint(&mut self) -> &mut ConstraintDefinition {
        &mut self.ctx.get_mut(self.id).constraint
    }

    #[must_use]
    pub const fn id(&self) -> ExprId<CreateConstraint> {
        self.id
    }
}

impl<'a> CreateConstraintBuilder<'a, NoTable> {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.constraint().schema_name = Some(schema.into());
        self
    }

    pub fn on_table(mut self, table: impl Into<String>) -> CreateConstraintBuilder<'a, HasTable> {
        self.constraint().table_name = table.into();
        CreateConstraintBuilder::new(self.ctx, self.id)
    }
}

impl CreateConstraintBuilder<'_, HasTable> {
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.constraint().columns.push(column.into());
        self
    }

    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.constraint()
            .columns
            .extend(columns.into_iter().map(Into::into));
        self
    }
}
