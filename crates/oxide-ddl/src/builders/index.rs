use std::marker::PhantomData;

use super::{HasColumns, HasTable, NoTable};
use crate::context::{ExprId, MigrationContext};
use crate::definitions::{Direction, IndexColumnDefinition, IndexDefinition, IndexType};
use crate::expressions::CreateIndex;

/// Builder for a standalone index.
#[derive(Debug)]
pub struct CreateIndexBuilder<'a, S> {
    ctx: &'a mut MigrationContext,
    id: ExprId<CreateIndex>,
    _state: PhantomData<S>,
}

impl<'a, S> CreateIndexBuilder<'a, S> {
    pub(crate) const fn new(ctx: &'a mut MigrationContext, id: ExprId<CreateIndex>) -> Self {
        Self {
            ctx,
            id,
            _state: PhantomData,
        }
    }

    fn index(&mut self) -> &mut IndexDefinition {
        &mut self.ctx.get_mut(self.id).index
    }

    fn into_state<T>(self) -> CreateIndexBuilder<'a, T> {
        CreateIndexBuilder {
            ctx: self.ctx,
            id: self.id,
            _state: PhantomData,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ExprId<CreateIndex> {
        self.id
    }
}

impl<'a> CreateIndexBuilder<'a, NoTable> {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.index().schema_name = Some(schema.into());
        self
    }

    pub fn on_table(mut self, table: impl Into<String>) -> CreateIndexBuilder<'a, HasTable> {
        self.index().table_name = table.into();
        self.into_state()
    }
}

impl<'a> CreateIndexBuilder<'a, HasTable> {
    /// Adds the first indexed column.
    pub fn on_column(mut self, column: impl Into<String>) -> CreateIndexBuilder<'a, HasColumns> {
        self.index().columns.push(IndexColumnDefinition::new(column));
        self.into_state()
    }
}

impl CreateIndexBuilder<'_, HasColumns> {
    /// Adds another indexed column.
    pub fn on_column(mut self, column: impl Into<String>) -> Self {
        self.index().columns.push(IndexColumnDefinition::new(column));
        self
    }

    /// Sorts the most recently added column ascending.
    pub fn ascending(self) -> Self {
        self.direction(Direction::Ascending)
    }

    /// Sorts the most recently added column descending.
    pub fn descending(self) -> Self {
        self.direction(Direction::Descending)
    }

    fn direction(mut self, direction: Direction) -> Self {
        if let Some(column) = self.index().columns.last_mut() {
            column.direction = Some(direction);
        }
        self
    }

    pub fn unique(mut self) -> Self {
        self.index().unique = true;
        self
    }

    pub fn clustered(mut self) -> Self {
        self.index().index_type = IndexType::Clustered;
        self
    }

    pub fn non_clustered(mut self) -> Self {
        self.index().index_type = IndexType::NonClustered;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::MigrationExpression;
    use crate::provider::DatabaseProvider;

    #[test]
    fn test_multi_column_index() {
        let mut ctx = MigrationContext::for_provider(DatabaseProvider::SqlServer, &[]);
        let id = ctx
            .create()
            .index_named("IX_Node_Parent_Sort")
            .on_table("Node")
            .on_column("ParentId")
            .on_column("SortOrder")
            .descending()
            .unique()
            .clustered()
            .id();
        assert_eq!(
            ctx.get(id).to_sql().unwrap(),
            "CREATE UNIQUE CLUSTERED INDEX [IX_Node_Parent_Sort] ON [Node] \
             ([ParentId], [SortOrder] DESC)"
        );
    }

    #[test]
    fn test_generated_index_name() {
        let mut ctx = MigrationContext::for_provider(DatabaseProvider::MySql, &[]);
        let id = ctx
            .create()
            .index()
            .in_schema("cms")
            .on_table("Node")
            .on_column("Path")
            .ascending()
            .id();
        assert_eq!(
            ctx.get(id).to_sql().unwrap(),
            "CREATE INDEX `IX_Node_Path` ON `cms`.`Node` (`Path` ASC)"
        );
    }
}
