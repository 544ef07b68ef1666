//! Create thread table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Thread::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Thread::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Thread::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(Thread::AuthorName).string_len(128).not_null())
                    .col(ColumnDef::new(Thread::AuthorAvatar).string_len(512).null())
                    .col(ColumnDef::new(Thread::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Thread::Description).text().not_null())
                    .col(ColumnDef::new(Thread::ImageUrl).string_len(512).null())
                    .col(
                        ColumnDef::new(Thread::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Thread::Votes)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Thread::ReplyCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Thread::TrendingScore)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Thread::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Thread::UpdatedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Thread::LastRepliedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_thread_author")
                            .from(Thread::Table, Thread::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes for the listing sort orders
        manager
            .create_index(
                Index::create()
                    .name("idx_thread_author_id")
                    .table(Thread::Table)
                    .col(Thread::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_thread_votes")
                    .table(Thread::Table)
                    .col(Thread::Votes)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_thread_trending_score")
                    .table(Thread::Table)
                    .col(Thread::TrendingScore)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_thread_created_at")
                    .table(Thread::Table)
                    .col(Thread::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Thread::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Thread {
    Table,
    Id,
    AuthorId,
    AuthorName,
    AuthorAvatar,
    Title,
    Description,
    ImageUrl,
    Views,
    Votes,
    ReplyCount,
    TrendingScore,
    CreatedAt,
    UpdatedAt,
    LastRepliedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
