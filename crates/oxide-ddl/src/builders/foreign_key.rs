//! Standalone foreign key builder.
//!
//! Stages: referencing table → referencing columns → referenced table →
//! referenced columns → cascade rules.

use std::marker::PhantomData;

use super::{
    HasForeignColumns, HasForeignTable, HasPrimaryColumns, HasPrimaryTable, NoTable,
};
use crate::context::{ExprId, MigrationContext};
use crate::definitions::{ForeignKeyDefinition, Rule};
use crate::expressions::CreateForeignKey;

/// Builder for a foreign key between existing tables.
#[derive(Debug)]
pub struct CreateForeignKeyBuilder<'a, S> {
    ctx: &'a mut MigrationContext,
    id: ExprId<CreateForeignKey>,
    _state: PhantomData<S>,
}

impl<'a, S> CreateForeignKeyBuilder<'a, S> {
    pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<CreateForeignKey>) -> Self {
        Self {
            ctx,
            id,
            _state: PhantomData,
        }
    }

    fn foreign_key(&mut self) -> &mut ForeignKeyDefinition {
        &mut self.ctx.get_mut(self.id).foreign_key
    }

    fn into_state<T>(self) -> CreateForeignKeyBuilder<'a, T> {
        CreateForeignKeyBuilder {
            ctx: self.ctx,
            id: self.id,
            _state: PhantomData,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ExprId<CreateForeignKey> {
        self.id
    }
}

impl<'a> CreateForeignKeyBuilder<'a, NoTable> {
    /// Sets the referencing (foreign) table.
    pub fn from_table(
        mut self,
        table: impl Into<String>,
    ) -> CreateForeignKeyBuilder<'a, HasForeignTable> {
        self.foreign_key().foreign_table = Some(table.into());
        self.into_state()
    }
}

impl<'a> CreateForeignKeyBuilder<'a, HasForeignTable> {
    /// Schema of the referencing table.
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.foreign_key().foreign_table_schema = Some(schema.into());
        self
    }

    pub fn foreign_column(
        self,
        column: impl Into<String>,
    ) -> CreateForeignKeyBuilder<'a, HasForeignColumns> {
        self.foreign_columns([column])
    }

    pub fn foreign_columns<I, C>(mut self, columns: I) -> CreateForeignKeyBuilder<'a, HasForeignColumns>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.foreign_key()
            .foreign_columns
            .extend(columns.into_iter().map(Into::into));
        self.into_state()
    }
}

impl<'a> CreateForeignKeyBuilder<'a, HasForeignColumns> {
    /// Sets the referenced (primary) table.
    pub fn to_table(
        mut self,
        table: impl Into<String>,
    ) -> CreateForeignKeyBuilder<'a, HasPrimaryTable> {
        self.foreign_key().primary_table = table.into();
        self.into_state()
    }
}

impl<'a> CreateForeignKeyBuilder<'a, HasPrimaryTable> {
    /// Schema of the referenced table.
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.foreign_key().primary_table_schema = Some(schema.into());
        self
    }

    pub fn primary_column(
        self,
        column: impl Into<String>,
    ) -> CreateForeignKeyBuilder<'a, HasPrimaryColumns> {
        self.primary_columns([column])
    }

    pub fn primary_columns<I, C>(mut self, columns: I) -> CreateForeignKeyBuilder<'a, HasPrimaryColumns>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.foreign_key()
            .primary_columns
            .extend(columns.into_iter().map(Into::into));
        self.into_state()
    }
}

impl CreateForeignKeyBuilder<'_, HasPrimaryColumns> {
    pub fn on_delete(mut self, rule: Rule) -> Self {
        self.foreign_key().on_delete = rule;
        self
    }

    pub fn on_update(mut self, rule: Rule) -> Self {
        self.foreign_key().on_update = rule;
        self
    }

    pub fn on_delete_or_update(mut self, rule: Rule) -> Self {
        let fk = self.foreign_key();
        fk.on_delete = rule;
        fk.on_update = rule;
        self
    }
}
