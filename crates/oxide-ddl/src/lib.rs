//! Dialect-aware schema migration expressions.
//!
//! `oxide-ddl` lets a migration describe schema changes once and render them
//! for SQL Server, SQLite, PostgreSQL or MySQL:
//! - Staged builders only expose calls that are legal at each step, so an
//!   incomplete column or foreign key does not compile
//! - Every builder call enqueues its expression immediately; queue order is
//!   execution order
//! - Expressions outside the migration's provider set render as empty
//!   strings and are skipped on playback
//!
//! # Architecture
//!
//! - **Definitions** - Plain column, index, foreign key, constraint and row data
//! - **Syntax** - One [`SqlSyntaxProvider`] per dialect: quoting, type mapping
//!   and statement templates
//! - **Expressions** - One type per schema change, rendering through the syntax
//!   provider
//! - **Context** - The ordered expression queue plus the active provider
//! - **Builders** - Typestate fluent API over the context
//!
//! # Example
//!
//! ```rust
//! use oxide_ddl::prelude::*;
//!
//! let mut ctx = MigrationContext::for_provider(
//!     DatabaseProvider::SqlServer,
//!     &[DatabaseProvider::SqlServer, DatabaseProvider::Sqlite],
//! );
//!
//! ctx.create()
//!     .column("Email")
//!     .on_table("Member")
//!     .as_string_with_length(255)
//!     .not_nullable()
//!     .unique();
//!
//! let mut executed = Vec::new();
//! let summary = ctx.play(&mut executed).unwrap();
//!
//! assert_eq!(summary.executed, 2);
//! assert_eq!(
//!     executed[0],
//!     "ALTER TABLE [Member] ADD [Email] NVARCHAR(255) NOT NULL"
//! );
//! assert_eq!(
//!     executed[1],
//!     "CREATE UNIQUE NONCLUSTERED INDEX [IX_Member_Email] ON [Member] ([Email])"
//! );
//! ```

pub mod builders;
pub mod config;
pub mod context;
pub mod definitions;
pub mod error;
pub mod expressions;
pub mod provider;
pub mod syntax;
pub mod value;

pub use config::MigrationSettings;
pub use context::{DatabaseScope, ExprId, MigrationContext, PlaybackSummary, SqlExecutor};
pub use error::{DdlError, Result};
pub use expressions::{Expression, MigrationExpression};
pub use provider::{DatabaseProvider, ProviderSet};
pub use syntax::SqlSyntaxProvider;
pub use value::{SqlValue, ToSqlValue};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::MigrationSettings;
    pub use crate::context::{MigrationContext, PlaybackSummary, SqlExecutor};
    pub use crate::definitions::{Direction, RowDefinition, Rule, SystemMethod};
    pub use crate::error::{DdlError, Result};
    pub use crate::expressions::{Expression, MigrationExpression};
    pub use crate::provider::DatabaseProvider;
    pub use crate::value::{SqlValue, ToSqlValue};
}
