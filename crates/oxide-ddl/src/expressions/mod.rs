//! Renderable schema-change expressions.
//!
//! Each expression owns its definition plus an [`ExpressionEnv`]: the syntax
//! provider, the active provider and the set of providers the expression
//! applies to. Rendering under a provider outside that set yields an empty
//! string instead of an error.

mod column;
mod constraint;
mod data;
mod execute;
mod foreign_key;
mod index;
mod table;

pub use column::{AlterColumn, CreateColumn, DeleteColumn};
pub use constraint::{CreateConstraint, DeleteConstraint, DeleteDefaultConstraint};
pub use data::{DeleteData, InsertData, UpdateData};
pub use execute::ExecuteSql;
pub use foreign_key::{CreateForeignKey, DeleteForeignKey};
pub use index::{CreateIndex, DeleteIndex};
pub use table::{CreateTable, DeleteTable, RenameColumn, RenameTable};

use std::sync::Arc;

use crate::error::{DdlError, Result};
use crate::provider::{DatabaseProvider, ProviderSet};
use crate::syntax::SqlSyntaxProvider;

/// Separator placed between statements of a multi-item expression.
pub const STATEMENT_SEPARATOR: &str = "; ";

/// Rendering environment captured by every expression at creation time.
#[derive(Debug, Clone)]
pub struct ExpressionEnv {
    syntax: Arc<dyn SqlSyntaxProvider>,
    current: DatabaseProvider,
    supported: ProviderSet,
}

impl ExpressionEnv {
    /// Creates an environment rendering with `syntax` for the providers in
    /// `supported`.
    #[must_use]
    pub fn new(syntax: Arc<dyn SqlSyntaxProvider>, supported: ProviderSet) -> Self {
        let current = syntax.provider();
        Self {
            syntax,
            current,
            supported,
        }
    }

    /// The dialect used for rendering.
    #[must_use]
    pub fn syntax(&self) -> &dyn SqlSyntaxProvider {
        self.syntax.as_ref()
    }

    /// Shared handle to the dialect.
    #[must_use]
    pub fn syntax_arc(&self) -> Arc<dyn SqlSyntaxProvider> {
        Arc::clone(&self.syntax)
    }

    #[must_use]
    pub const fn current_provider(&self) -> DatabaseProvider {
        self.current
    }

    #[must_use]
    pub const fn supported_providers(&self) -> &ProviderSet {
        &self.supported
    }

    /// Whether the active provider is one this environment renders for.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.supported.contains(self.current)
    }

    /// Copy of this environment narrowed to `providers`.
    #[must_use]
    pub fn restricted_to(&self, providers: &[DatabaseProvider]) -> Self {
        Self {
            supported: self.supported.restrict_to(providers),
            ..self.clone()
        }
    }

    /// Copy of this environment excluding `providers`.
    #[must_use]
    pub fn without(&self, providers: &[DatabaseProvider]) -> Self {
        Self {
            supported: self.supported.without(providers),
            ..self.clone()
        }
    }

    pub(crate) fn unsupported(&self, operation: &'static str) -> DdlError {
        DdlError::UnsupportedSyntax {
            provider: self.current,
            operation,
        }
    }
}

/// A schema change that renders itself to SQL.
pub trait MigrationExpression {
    /// The environment this expression renders in.
    fn env(&self) -> &ExpressionEnv;

    /// Renders the statement(s) unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error when the definition is incomplete or the dialect
    /// lacks the required template.
    fn build_sql(&self) -> Result<String>;

    /// Renders the statement(s), or an empty string when the active
    /// provider is outside this expression's provider set.
    ///
    /// # Errors
    ///
    /// See [`MigrationExpression::build_sql`].
    fn to_sql(&self) -> Result<String> {
        if !self.env().is_supported() {
            return Ok(String::new());
        }
        self.build_sql()
    }
}

/// Typed access to one variant of [`Expression`].
pub trait ExpressionKind: Into<Expression> {
    fn from_expression(expression: &Expression) -> Option<&Self>;

    fn from_expression_mut(expression: &mut Expression) -> Option<&mut Self>;
}

macro_rules! expression_kinds {
    ($($variant:ident => $label:literal),* $(,)?) => {
        /// Any expression held by a migration context.
        #[derive(Debug, Clone)]
        pub enum Expression {
            $($variant($variant),)*
        }

        impl Expression {
            /// Short label of the expression kind, used in logs.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $label,)*
                }
            }
        }

        impl MigrationExpression for Expression {
            fn env(&self) -> &ExpressionEnv {
                match self {
                    $(Self::$variant(e) => e.env(),)*
                }
            }

            fn build_sql(&self) -> Result<String> {
                match self {
                    $(Self::$variant(e) => e.build_sql(),)*
                }
            }
        }

        $(
            impl From<$variant> for Expression {
                fn from(expression: $variant) -> Self {
                    Self::$variant(expression)
                }
            }

            impl ExpressionKind for $variant {
                fn from_expression(expression: &Expression) -> Option<&Self> {
                    match expression {
                        Expression::$variant(e) => Some(e),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn from_expression_mut(expression: &mut Expression) -> Option<&mut Self> {
                    match expression {
                        Expression::$variant(e) => Some(e),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*
    };
}

expression_kinds! {
    CreateTable => "create table",
    CreateColumn => "create column",
    AlterColumn => "alter column",
    DeleteColumn => "delete column",
    DeleteTable => "delete table",
    RenameTable => "rename table",
    RenameColumn => "rename column",
    CreateIndex => "create index",
    DeleteIndex => "delete index",
    CreateForeignKey => "create foreign key",
    DeleteForeignKey => "delete foreign key",
    CreateConstraint => "create constraint",
    DeleteConstraint => "delete constraint",
    DeleteDefaultConstraint => "delete default constraint",
    DeleteData => "delete data",
    InsertData => "insert data",
    UpdateData => "update data",
    ExecuteSql => "execute sql",
}

/// Fails when an expression was enqueued but its table was never named.
pub(crate) fn require_table(table_name: &str, what: impl std::fmt::Display) -> Result<()> {
    if table_name.is_empty() {
        return Err(DdlError::configuration(format!("{what} has no table")));
    }
    Ok(())
}

/// Quotes and comma-joins a list of column names.
pub(crate) fn quote_columns<S: AsRef<str>>(syntax: &dyn SqlSyntaxProvider, columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| syntax.quote_identifier(c.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}


#[cfg(test)]
mod tests {
    use super::test_support::env;
    use super::*;

    #[test]
    fn test_unsupported_provider_renders_empty() {
        let env = env(DatabaseProvider::PostgreSql)
            .restricted_to(&[DatabaseProvider::SqlServer, DatabaseProvider::Sqlite]);
        let expr = DeleteTable::new(env, "member");
        assert_eq!(expr.to_sql().unwrap(), "");
        assert_eq!(expr.build_sql().unwrap(), "DROP TABLE \"member\"");
    }

    #[test]
    fn test_enum_dispatch_and_kind() {
        let expr: Expression = DeleteTable::new(env(DatabaseProvider::SqlServer), "member").into();
        assert_eq!(expr.kind(), "delete table");
        assert_eq!(expr.to_sql().unwrap(), "DROP TABLE [member]");
        assert!(DeleteTable::from_expression(&expr).is_some());
        assert!(CreateColumn::from_expression(&expr).is_none());
    }

    #[test]
    fn test_env_narrowing() {
        let base = env(DatabaseProvider::Sqlite);
        assert!(base.is_supported());
        assert!(!base.without(&[DatabaseProvider::Sqlite]).is_supported());
        assert!(base.restricted_to(&[DatabaseProvider::Sqlite]).is_supported());
        assert_eq!(base.syntax().provider(), DatabaseProvider::Sqlite);
    }
}
