use super::{ExpressionEnv, MigrationExpression};
use crate::error::Result;

/// Raw SQL passed through unchanged.
#[derive(Debug, Clone)]
pub struct ExecuteSql {
    env: ExpressionEnv,
    pub sql: String,
}

impl ExecuteSql {
    #[must_use]
    pub fn new(env: ExpressionEnv, sql: impl Into<String>) -> Self {
        Self {
            env,
            sql: sql.into(),
        }
    }
}

impl MigrationExpression for ExecuteSql {
    fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    fn build_sql(&self) -> Result<String> {
        Ok(self.sql.clone())
    }
}
