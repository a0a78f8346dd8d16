//! The migration context: an ordered, append-only expression queue.
//!
//! Builders hold a mutable borrow of the context and a typed [`ExprId`]
//! handle to the expression they are configuring. Every builder call that
//! produces a statement pushes it onto the queue immediately, so queue
//! order is execution order.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info};

use crate::builders::{
    AlterBuilder, CreateBuilder, DeleteBuilder, ExecuteBuilder, InsertBuilder, RenameBuilder,
    UpdateBuilder,
};
use crate::error::Result;
use crate::expressions::{Expression, ExpressionEnv, ExpressionKind, MigrationExpression};
use crate::provider::{DatabaseProvider, ProviderSet};
use crate::syntax::{self, SqlSyntaxProvider};

// =============================================================================
// Handles and executors
// =============================================================================

/// Typed handle to an expression stored in a [`MigrationContext`].
pub struct ExprId<E> {
    index: usize,
    _kind: PhantomData<fn() -> E>,
}

impl<E> ExprId<E> {
    /// Position of the expression in the queue.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl<E> Clone for ExprId<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for ExprId<E> {}

impl<E> fmt::Debug for ExprId<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExprId").field(&self.index).finish()
    }
}

/// Receives rendered statements during playback.
pub trait SqlExecutor {
    /// Executes one rendered statement.
    ///
    /// # Errors
    ///
    /// Implementations report failures as
    /// [`DdlError::Execution`](crate::DdlError::Execution).
    fn execute(&mut self, sql: &str) -> Result<()>;
}

/// Collects statements instead of running them.
impl SqlExecutor for Vec<String> {
    fn execute(&mut self, sql: &str) -> Result<()> {
        self.push(sql.to_string());
        Ok(())
    }
}

/// Counts reported after [`MigrationContext::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackSummary {
    pub executed: usize,
    pub skipped: usize,
}

// =============================================================================
// MigrationContext
// =============================================================================

/// Ordered collection of expressions for one migration run.
#[derive(Debug, Clone)]
pub struct MigrationContext {
    env: ExpressionEnv,
    expressions: Vec<Expression>,
}

impl MigrationContext {
    /// Creates a context rendering with `syntax`, for a migration that must
    /// stay portable across `supported` (empty means every provider).
    #[must_use]
    pub fn new(syntax: Arc<dyn SqlSyntaxProvider>, supported: &[DatabaseProvider]) -> Self {
        Self {
            env: ExpressionEnv::new(syntax, ProviderSet::of(supported)),
            expressions: Vec::new(),
        }
    }

    /// Creates a context using the catalog dialect for `current`.
    #[must_use]
    pub fn for_provider(current: DatabaseProvider, supported: &[DatabaseProvider]) -> Self {
        Self::new(syntax::for_provider(current), supported)
    }

    /// The environment new expressions inherit.
    #[must_use]
    pub const fn env(&self) -> &ExpressionEnv {
        &self.env
    }

    #[must_use]
    pub fn syntax(&self) -> &dyn SqlSyntaxProvider {
        self.env.syntax()
    }

    #[must_use]
    pub const fn current_provider(&self) -> DatabaseProvider {
        self.env.current_provider()
    }

    #[must_use]
    pub const fn supported_providers(&self) -> &ProviderSet {
        self.env.supported_providers()
    }

    /// Expressions in enqueue order.
    #[must_use]
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Appends an expression and returns a handle to it.
    pub fn push<E: ExpressionKind>(&mut self, expression: E) -> ExprId<E> {
        let expression: Expression = expression.into();
        debug!(
            kind = expression.kind(),
            index = self.expressions.len(),
            "Enqueued expression"
        );
        self.expressions.push(expression);
        ExprId {
            index: self.expressions.len() - 1,
            _kind: PhantomData,
        }
    }

    /// Returns the expression behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different context.
    #[must_use]
    pub fn get<E: ExpressionKind>(&self, id: ExprId<E>) -> &E {
        self.expressions
            .get(id.index)
            .and_then(E::from_expression)
            .expect("expression handle does not belong to this context")
    }

    // Handles are only issued by `push` and the queue never shrinks, so a
    // handle always resolves to its own variant.
    pub(crate) fn get_mut<E: ExpressionKind>(&mut self, id: ExprId<E>) -> &mut E {
        self.expressions
            .get_mut(id.index)
            .and_then(E::from_expression_mut)
            .expect("expression handle does not belong to this context")
    }

    /// Renders every expression in order. Skipped expressions render as
    /// empty strings.
    ///
    /// # Errors
    ///
    /// Returns the first rendering error.
    pub fn render_all(&self) -> Result<Vec<String>> {
        self.expressions.iter().map(MigrationExpression::to_sql).collect()
    }

    /// Renders every expression in order and hands each non-empty result to
    /// `executor`.
    ///
    /// # Errors
    ///
    /// Stops at the first rendering or execution error.
    pub fn play<X: SqlExecutor + ?Sized>(&self, executor: &mut X) -> Result<PlaybackSummary> {
        let mut summary = PlaybackSummary::default();
        for (index, expression) in self.expressions.iter().enumerate() {
            let sql = expression.to_sql()?;
            if sql.is_empty() {
                debug!(
                    index,
                    kind = expression.kind(),
                    provider = %self.current_provider(),
                    "Skipping expression with empty rendering for the current provider"
                );
                summary.skipped += 1;
                continue;
            }
            debug!(index, sql = %sql, "Executing SQL");
            executor.execute(&sql)?;
            summary.executed += 1;
        }

        info!(
            provider = %self.current_provider(),
            executed = summary.executed,
            skipped = summary.skipped,
            "Migration context played"
        );
        Ok(summary)
    }

    // =========================================================================
    // Builder entry points
    // =========================================================================

    /// Starts a create expression.
    pub fn create(&mut self) -> CreateBuilder<'_> {
        let env = self.env.clone();
        CreateBuilder::new(self, env)
    }

    /// Starts a delete expression.
    pub fn delete(&mut self) -> DeleteBuilder<'_> {
        let env = self.env.clone();
        DeleteBuilder::new(self, env)
    }

    /// Starts an alter expression.
    pub fn alter(&mut self) -> AlterBuilder<'_> {
        let env = self.env.clone();
        AlterBuilder::new(self, env)
    }

    /// Starts a rename expression.
    pub fn rename(&mut self) -> RenameBuilder<'_> {
        let env = self.env.clone();
        RenameBuilder::new(self, env)
    }

    /// Starts an insert expression.
    pub fn insert(&mut self) -> InsertBuilder<'_> {
        let env = self.env.clone();
        InsertBuilder::new(self, env)
    }

    /// Starts an update expression.
    pub fn update(&mut self) -> UpdateBuilder<'_> {
        let env = self.env.clone();
        UpdateBuilder::new(self, env)
    }

    /// Starts a raw SQL expression.
    pub fn execute(&mut self) -> ExecuteBuilder<'_> {
        let env = self.env.clone();
        ExecuteBuilder::new(self, env)
    }

    /// Scopes the following builder calls to `providers`, intersected with
    /// the migration's own provider set.
    pub fn if_database(&mut self, providers: &[DatabaseProvider]) -> DatabaseScope<'_> {
        let env = self.env.restricted_to(providers);
        DatabaseScope { ctx: self, env }
    }
}

/// Builder entry points restricted to a subset of providers.
#[derive(Debug)]
pub struct DatabaseScope<'a> {
    ctx: &'a mut MigrationContext,
    env: ExpressionEnv,
}

impl DatabaseScope<'_> {
    pub fn create(&mut self) -> CreateBuilder<'_> {
        CreateBuilder::new(self.ctx, self.env.clone())
    }

    pub fn delete(&mut self) -> DeleteBuilder<'_> {
        DeleteBuilder::new(self.ctx, self.env.clone())
    }

    pub fn alter(&mut self) -> AlterBuilder<'_> {
        AlterBuilder::new(self.ctx, self.env.clone())
    }

    pub fn rename(&mut self) -> RenameBuilder<'_> {
        RenameBuilder::new(self.ctx, self.env.clone())
    }

    pub fn insert(&mut self) -> InsertBuilder<'_> {
        InsertBuilder::new(self.ctx, self.env.clone())
    }

    pub fn update(&mut self) -> UpdateBuilder<'_> {
        UpdateBuilder::new(self.ctx, self.env.clone())
    }

    pub fn execute(&mut self) -> ExecuteBuilder<'_> {
        ExecuteBuilder::new(self.ctx, self.env.clone())
    }
}
