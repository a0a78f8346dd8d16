#![allow(dead_code)]

use oxide_ddl::{DatabaseProvider, MigrationContext};

/// Providers most migrations in these tests declare support for.
pub const PORTABLE: &[DatabaseProvider] = &[DatabaseProvider::SqlServer, DatabaseProvider::Sqlite];

/// Routes `tracing` output through the test harness; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn context(provider: DatabaseProvider) -> MigrationContext {
    MigrationContext::for_provider(provider, PORTABLE)
}

pub fn render(ctx: &MigrationContext) -> Vec<String> {
    ctx.render_all()
        .unwrap_or_else(|e| panic!("Failed to render migration: {e}"))
}

/// Renders the same migration once per provider.
pub fn render_for<F>(providers: &[DatabaseProvider], migration: F) -> Vec<(DatabaseProvider, Vec<String>)>
where
    F: Fn(&mut MigrationContext),
{
    providers
        .iter()
        .map(|&provider| {
            let mut ctx = context(provider);
            migration(&mut ctx);
            (provider, render(&ctx))
        })
        .collect()
}
