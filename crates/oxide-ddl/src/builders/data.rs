use crate::context::{ExprId, MigrationContext};
use crate::definitions::RowDefinition;
use crate::expressions::{InsertData, UpdateData};

/// Inserts rows into a table.
#[derive(Debug)]
pub struct InsertDataBuilder<'a> {
    ctx: &'a mut MigrationContext,
    id: ExprId<InsertData>,
}

impl<'a> InsertDataBuilder<'a> {
    pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<InsertData>) -> Self {
        Self { ctx, id }
    }

    fn expression(&mut self) -> &mut InsertData {
        self.ctx.get_mut(self.id)
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.expression().schema_name = Some(schema.into());
        self
    }

    pub fn row(mut self, row: RowDefinition) -> Self {
        self.expression().data.rows.push(row);
        self
    }

    /// Allows explicit values for identity columns.
    pub fn enable_identity_insert(mut self) -> Self {
        self.expression().data.identity_insert = true;
        self
    }

    #[must_use]
    pub const fn id(&self) -> ExprId<InsertData> {
        self.id
    }
}

/// Updates rows matching a condition.
#[derive(Debug)]
pub struct UpdateDataBuilder<'a> {
    ctx: &'a mut MigrationContext,
    id: ExprId<UpdateData>,
}

impl<'a> UpdateDataBuilder<'a> {
    pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<UpdateData>) -> Self {
        Self { ctx, id }
    }

    fn expression(&mut self) -> &mut UpdateData {
        self.ctx.get_mut(self.id)
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.expression().schema_name = Some(schema.into());
        self
    }

    /// Column values to assign.
    pub fn set(mut self, values: RowDefinition) -> Self {
        self.expression().data.set = values;
        self
    }

    /// Rows to update: every pair must match.
    pub fn where_(mut self, condition: RowDefinition) -> Self {
        self.expression().data.condition = condition;
        self
    }

    /// Updates every row, ignoring any condition.
    pub fn all_rows(mut self) -> Self {
        self.expression().data.is_all_rows = true;
        self
    }

    #[must_use]
    pub const fn id(&self) -> ExprId<UpdateData> {
        self.id
    }
}
