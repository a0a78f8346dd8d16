use super::{require_table, ExpressionEnv, MigrationExpression};
use crate::definitions::IndexDefinition;
use crate::error::{DdlError, Result};
use crate::syntax::render_template;

/// `CREATE INDEX`.
#[derive(Debug, Clone)]
pub struct CreateIndex {
    env: ExpressionEnv,
    pub index: IndexDefinition,
}

impl CreateIndex {
    #[must_use]
    pub const fn new(env: ExpressionEnv, index: IndexDefinition) -> Self {
        Self { env, index }
    }
}

impl MigrationExpression for CreateIndex {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        require_table(
            &self.index.table_name,
            format_args!("index '{}'", self.index.resolved_name()),
        )?;
        if self.index.columns.is_empty() {
            return Err(DdlError::configuration(format!(
                "index '{}' has no columns",
                self.index.resolved_name()
            )));
        }

        let syntax = self.env.syntax();
        let prefix = syntax.index_type_prefix(&self.index);
        let name = syntax.quote_name(&self.index.resolved_name());
        let table = syntax.quote_table(self.index.schema_name.as_deref(), &self.index.table_name);
        let columns = self
            .index
            .columns
            .iter()
            .map(|c| syntax.format_index_column(c))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(render_template(
            syntax.create_index_format(),
            &[prefix.as_str(), name.as_str(), table.as_str(), columns.as_str()],
        ))
    }
}

/// `DROP INDEX`.
#[derive(Debug, Clone)]
pub struct DeleteIndex {
    env: ExpressionEnv,
    pub index: IndexDefinition,
}

impl DeleteIndex {
    #[must_use]
    pub const fn new(env: ExpressionEnv, index: IndexDefinition) -> Self {
        Self { env, index }
    }
}

impl MigrationExpression for DeleteIndex {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        require_table(
            &self.index.table_name,
            format_args!("deletion of index '{}'", self.index.resolved_name()),
        )?;
        let syntax = self.env.syntax();
        let name = syntax.quote_name(&self.index.resolved_name());
        let table = syntax.quote_table(self.index.schema_name.as_deref(), &self.index.table_name);
        Ok(render_template(
            syntax.drop_index_format(),
            &[name.as_str(), table.as_str()],
        ))
    }
}
