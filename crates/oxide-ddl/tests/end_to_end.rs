//! Whole migrations driven through the public API.

mod common;

use common::{context, init_tracing, render, render_for, PORTABLE};
use oxide_ddl::prelude::*;

fn add_member_email(ctx: &mut MigrationContext) {
    ctx.create()
        .column("Email")
        .on_table("Member")
        .as_string_with_length(255)
        .not_nullable()
        .unique();
}

#[test]
fn test_member_email_on_sqlserver() {
    let mut ctx = context(DatabaseProvider::SqlServer);
    add_member_email(&mut ctx);

    assert_eq!(ctx.len(), 2);
    assert_eq!(
        render(&ctx),
        [
            "ALTER TABLE [Member] ADD [Email] NVARCHAR(255) NOT NULL",
            "CREATE UNIQUE NONCLUSTERED INDEX [IX_Member_Email] ON [Member] ([Email])",
        ]
    );
}

#[test]
fn test_member_email_on_sqlite() {
    let mut ctx = context(DatabaseProvider::Sqlite);
    add_member_email(&mut ctx);

    assert_eq!(
        render(&ctx),
        [
            "ALTER TABLE \"Member\" ADD COLUMN \"Email\" TEXT NOT NULL",
            "CREATE UNIQUE INDEX \"IX_Member_Email\" ON \"Member\" (\"Email\")",
        ]
    );
}

#[test]
fn test_unsupported_provider_renders_empty() {
    let mut ctx = context(DatabaseProvider::PostgreSql);
    add_member_email(&mut ctx);

    assert_eq!(render(&ctx), ["", ""]);

    let mut executed = Vec::new();
    let summary = ctx.play(&mut executed).unwrap();
    assert!(executed.is_empty());
    assert_eq!(summary, PlaybackSummary { executed: 0, skipped: 2 });
}

#[test]
fn test_queue_order_is_call_order() {
    init_tracing();

    let mut ctx = context(DatabaseProvider::SqlServer);
    ctx.create()
        .column("Id")
        .on_table("Login")
        .as_int32()
        .identity()
        .primary_key();
    ctx.create()
        .column("MemberId")
        .on_table("Login")
        .as_int32()
        .nullable()
        .foreign_key("FK_Login_Member", "Member", "Id")
        .on_delete(Rule::Cascade)
        .indexed();
    ctx.execute().sql("UPDATE [Login] SET [MemberId] = NULL");

    let kinds: Vec<_> = ctx.expressions().iter().map(Expression::kind).collect();
    assert_eq!(
        kinds,
        [
            "create column",
            "create constraint",
            "create column",
            "create foreign key",
            "create index",
            "execute sql",
        ]
    );

    let mut executed = Vec::new();
    let summary = ctx.play(&mut executed).unwrap();
    assert_eq!(summary.executed, 6);
    assert_eq!(executed[1], "ALTER TABLE [Login] ADD CONSTRAINT [PK_Login] PRIMARY KEY ([Id])");
    assert_eq!(
        executed[3],
        "ALTER TABLE [Login] ADD CONSTRAINT [FK_Login_Member] FOREIGN KEY ([MemberId]) \
         REFERENCES [Member] ([Id]) ON DELETE CASCADE"
    );
    assert_eq!(executed[5], "UPDATE [Login] SET [MemberId] = NULL");
}

#[test]
fn test_sqlite_skips_alter_constraints() {
    init_tracing();

    let rendered = render_for(PORTABLE, |ctx| {
        ctx.create()
            .foreign_key_named("FK_Login_Member")
            .from_table("Login")
            .foreign_column("MemberId")
            .to_table("Member")
            .primary_column("Id");
        ctx.delete().default_constraint().on_table("Member").on_column("Created");
    });

    let (_, sqlserver) = &rendered[0];
    assert_eq!(
        sqlserver,
        &[
            "ALTER TABLE [Login] ADD CONSTRAINT [FK_Login_Member] FOREIGN KEY ([MemberId]) \
             REFERENCES [Member] ([Id])",
            "ALTER TABLE [Member] DROP CONSTRAINT [DF_Member_Created]",
        ]
    );

    let (provider, sqlite) = &rendered[1];
    assert_eq!(*provider, DatabaseProvider::Sqlite);
    assert_eq!(sqlite, &["", ""]);
}

#[test]
fn test_if_database_scopes_following_calls() {
    let rendered = render_for(PORTABLE, |ctx| {
        ctx.if_database(&[DatabaseProvider::SqlServer])
            .execute()
            .sql("DBCC CHECKIDENT ('Member', RESEED, 0)");
        ctx.if_database(&[DatabaseProvider::Sqlite])
            .execute()
            .sql("VACUUM");
        ctx.delete().table("Legacy");
    });

    assert_eq!(
        rendered[0].1,
        ["DBCC CHECKIDENT ('Member', RESEED, 0)", "", "DROP TABLE [Legacy]"]
    );
    assert_eq!(rendered[1].1, ["", "VACUUM", "DROP TABLE \"Legacy\""]);
}

#[test]
fn test_if_database_cannot_widen_the_migration() {
    let mut ctx = context(DatabaseProvider::MySql);
    ctx.if_database(&[DatabaseProvider::MySql])
        .execute()
        .sql("OPTIMIZE TABLE `Member`");

    assert_eq!(render(&ctx), [""]);
}

#[test]
fn test_seed_data_then_cleanup() {
    let mut ctx = MigrationContext::for_provider(DatabaseProvider::PostgreSql, &[]);
    ctx.insert()
        .into_table("Lang")
        .in_schema("cms")
        .row(RowDefinition::new().with("Code", "en").with("Active", true))
        .row(RowDefinition::new().with("Code", "da").with("Active", false));
    ctx.delete()
        .data()
        .from_table("Lang")
        .in_schema("cms")
        .row(RowDefinition::new().with("Code", "da"));

    assert_eq!(
        render(&ctx),
        [
            "INSERT INTO \"cms\".\"Lang\" (\"Code\", \"Active\") VALUES ('en', TRUE); \
             INSERT INTO \"cms\".\"Lang\" (\"Code\", \"Active\") VALUES ('da', FALSE)",
            "DELETE FROM \"cms\".\"Lang\" WHERE \"Code\" = 'da'",
        ]
    );
}

#[test]
fn test_configuration_error_stops_playback() {
    let mut ctx = context(DatabaseProvider::SqlServer);
    ctx.execute().sql("SELECT 1");
    ctx.create().index_named("IX_Empty").on_table("Member");

    let mut executed = Vec::new();
    let err = ctx.play(&mut executed).unwrap_err();
    assert!(matches!(err, DdlError::Configuration(_)));
    assert_eq!(executed, ["SELECT 1"]);
}

#[test]
fn test_settings_drive_the_context() {
    let settings = MigrationSettings::from_json(
        r#"{ "provider": "sqlite", "supported_providers": ["sqlserver", "sqlite"] }"#,
    )
    .unwrap();
    let mut ctx = settings.into_context();
    add_member_email(&mut ctx);

    assert_eq!(ctx.current_provider(), DatabaseProvider::Sqlite);
    assert_eq!(
        render(&ctx)[0],
        "ALTER TABLE \"Member\" ADD COLUMN \"Email\" TEXT NOT NULL"
    );
}

#[test]
fn test_new_table_seeded_and_updated() {
    init_tracing();

    let rendered = render_for(PORTABLE, |ctx| {
        ctx.create()
            .table("Lang")
            .with_column("Id")
            .as_int32()
            .identity()
            .primary_key()
            .with_column("Code")
            .as_string_with_length(10)
            .not_nullable()
            .unique();
        ctx.insert()
            .into_table("Lang")
            .row(RowDefinition::new().with("Code", "en"));
        ctx.update()
            .table("Lang")
            .set(RowDefinition::new().with("Code", "en-US"))
            .where_(RowDefinition::new().with("Code", "en"));
        ctx.alter()
            .column("Code")
            .on_table("Lang")
            .as_string_with_length(20)
            .not_nullable();
    });

    let (_, sqlserver) = &rendered[0];
    assert_eq!(
        sqlserver,
        &[
            "CREATE TABLE [Lang] ([Id] INT NOT NULL IDENTITY(1,1), [Code] NVARCHAR(10) NOT NULL, \
             CONSTRAINT [PK_Lang] PRIMARY KEY ([Id]))",
            "CREATE UNIQUE NONCLUSTERED INDEX [IX_Lang_Code] ON [Lang] ([Code])",
            "INSERT INTO [Lang] ([Code]) VALUES ('en')",
            "UPDATE [Lang] SET [Code] = 'en-US' WHERE [Code] = 'en'",
            "ALTER TABLE [Lang] ALTER COLUMN [Code] NVARCHAR(20) NOT NULL",
        ]
    );

    let (_, sqlite) = &rendered[1];
    assert_eq!(
        sqlite[0],
        "CREATE TABLE \"Lang\" (\"Id\" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT, \
         \"Code\" TEXT NOT NULL)"
    );
    assert_eq!(sqlite[3], "UPDATE \"Lang\" SET \"Code\" = 'en-US' WHERE \"Code\" = 'en'");
    assert_eq!(sqlite[4], "");
}
