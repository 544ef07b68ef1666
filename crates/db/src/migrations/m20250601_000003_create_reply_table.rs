//! Create reply table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reply::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reply::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reply::ThreadId).string_len(32).not_null())
                    .col(ColumnDef::new(Reply::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(Reply::AuthorName).string_len(128).not_null())
                    .col(ColumnDef::new(Reply::AuthorAvatar).string_len(512).null())
                    .col(ColumnDef::new(Reply::Content).text().not_null())
                    .col(ColumnDef::new(Reply::ImageUrl).string_len(512).null())
                    .col(
                        ColumnDef::new(Reply::Votes)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reply::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Reply::UpdatedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_thread")
                            .from(Reply::Table, Reply::ThreadId)
                            .to(Thread::Table, Thread::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_author")
                            .from(Reply::Table, Reply::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: thread_id (for listing replies in a thread)
        manager
            .create_index(
                Index::create()
                    .name("idx_reply_thread_id")
                    .table(Reply::Table)
                    .col(Reply::ThreadId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reply::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reply {
    Table,
    Id,
    ThreadId,
    AuthorId,
    AuthorName,
    AuthorAvatar,
    Content,
    ImageUrl,
    Votes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Thread {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
