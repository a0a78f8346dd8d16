//! One migration rendered by every bundled dialect.

mod common;

use common::render;
use oxide_ddl::prelude::*;

fn unrestricted(provider: DatabaseProvider) -> MigrationContext {
    MigrationContext::for_provider(provider, &[])
}

#[test]
fn test_drop_index_per_dialect() {
    let expected = [
        (DatabaseProvider::SqlServer, "DROP INDEX [IX_Node_Path] ON [Node]"),
        (DatabaseProvider::Sqlite, "DROP INDEX \"IX_Node_Path\""),
        (DatabaseProvider::PostgreSql, "DROP INDEX \"IX_Node_Path\""),
        (DatabaseProvider::MySql, "DROP INDEX `IX_Node_Path` ON `Node`"),
    ];
    for (provider, sql) in expected {
        let mut ctx = unrestricted(provider);
        ctx.delete().index("IX_Node_Path").on_table("Node");
        assert_eq!(render(&ctx), [sql], "provider: {provider}");
    }
}

#[test]
fn test_drop_default_per_dialect() {
    let expected = [
        (DatabaseProvider::SqlServer, "ALTER TABLE [Member] DROP CONSTRAINT [DF_Member_Created]"),
        (DatabaseProvider::Sqlite, ""),
        (
            DatabaseProvider::PostgreSql,
            "ALTER TABLE \"Member\" ALTER COLUMN \"Created\" DROP DEFAULT",
        ),
        (
            DatabaseProvider::MySql,
            "ALTER TABLE `Member` ALTER COLUMN `Created` DROP DEFAULT",
        ),
    ];
    for (provider, sql) in expected {
        let mut ctx = unrestricted(provider);
        ctx.delete().default_constraint().on_table("Member").on_column("Created");
        assert_eq!(render(&ctx), [sql], "provider: {provider}");
    }
}

#[test]
fn test_boolean_column_types() {
    let expected = [
        (DatabaseProvider::SqlServer, "BIT"),
        (DatabaseProvider::Sqlite, "INTEGER"),
        (DatabaseProvider::PostgreSql, "BOOLEAN"),
        (DatabaseProvider::MySql, "TINYINT(1)"),
    ];
    for (provider, column_type) in expected {
        let mut ctx = unrestricted(provider);
        ctx.create().column("Active").on_table("Member").as_boolean();
        let sql = render(&ctx).remove(0);
        assert!(
            sql.ends_with(&format!("{column_type} NULL")) || sql.ends_with(column_type),
            "provider: {provider}, sql: {sql}"
        );
    }
}

#[test]
fn test_guid_default_is_dialect_specific() {
    let mut ctx = unrestricted(DatabaseProvider::PostgreSql);
    ctx.create()
        .column("Key")
        .on_table("Node")
        .as_guid()
        .with_default(SystemMethod::NewGuid);
    let sql = render(&ctx).remove(0);
    assert!(sql.contains("UUID"), "{sql}");
    assert!(sql.contains("gen_random_uuid()"), "{sql}");

    // SQLite has no GUID generator; the default is omitted.
    let mut ctx = unrestricted(DatabaseProvider::Sqlite);
    ctx.create()
        .column("Key")
        .on_table("Node")
        .as_guid()
        .with_default(SystemMethod::NewGuid);
    let sql = render(&ctx).remove(0);
    assert!(!sql.contains("DEFAULT"), "{sql}");
}

#[test]
fn test_string_literals_are_escaped() {
    let mut ctx = unrestricted(DatabaseProvider::MySql);
    ctx.insert()
        .into_table("Note")
        .row(RowDefinition::new().with("Body", r"it's C:\temp"));
    assert_eq!(
        render(&ctx),
        [r"INSERT INTO `Note` (`Body`) VALUES ('it''s C:\\temp')"]
    );

    let mut ctx = unrestricted(DatabaseProvider::SqlServer);
    ctx.insert()
        .into_table("Note")
        .row(RowDefinition::new().with("Body", "it's"));
    assert_eq!(render(&ctx), ["INSERT INTO [Note] ([Body]) VALUES ('it''s')"]);
}
