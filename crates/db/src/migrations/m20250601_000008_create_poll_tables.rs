//! Create poll, poll_option, and poll_vote tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Poll::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Poll::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Poll::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Poll::ImageUrl).string_len(512).null())
                    .col(ColumnDef::new(Poll::CreatedBy).string_len(32).not_null())
                    .col(ColumnDef::new(Poll::CreatorName).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Poll::TotalVotes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Poll::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poll_creator")
                            .from(Poll::Table, Poll::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PollOption::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PollOption::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PollOption::PollId).string_len(32).not_null())
                    .col(ColumnDef::new(PollOption::Idx).integer().not_null())
                    .col(ColumnDef::new(PollOption::Text).string_len(256).not_null())
                    .col(
                        ColumnDef::new(PollOption::Votes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poll_option_poll")
                            .from(PollOption::Table, PollOption::PollId)
                            .to(Poll::Table, Poll::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one row per position per poll
        manager
            .create_index(
                Index::create()
                    .name("idx_poll_option_poll_idx")
                    .table(PollOption::Table)
                    .col(PollOption::PollId)
                    .col(PollOption::Idx)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PollVote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PollVote::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PollVote::PollId).string_len(32).not_null())
                    .col(ColumnDef::new(PollVote::VoterId).string_len(64).not_null())
                    .col(ColumnDef::new(PollVote::Choice).integer().not_null())
                    .col(
                        ColumnDef::new(PollVote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PollVote::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poll_vote_poll")
                            .from(PollVote::Table, PollVote::PollId)
                            .to(Poll::Table, Poll::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one vote row per voter per poll.
        // Backstops concurrent first votes from the same identity.
        manager
            .create_index(
                Index::create()
                    .name("idx_poll_vote_poll_voter")
                    .table(PollVote::Table)
                    .col(PollVote::PollId)
                    .col(PollVote::VoterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PollVote::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PollOption::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Poll::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Poll {
    Table,
    Id,
    Title,
    ImageUrl,
    CreatedBy,
    CreatorName,
    TotalVotes,
    CreatedAt,
}

#[derive(Iden)]
enum PollOption {
    Table,
    Id,
    PollId,
    Idx,
    Text,
    Votes,
}

#[derive(Iden)]
enum PollVote {
    Table,
    Id,
    PollId,
    VoterId,
    Choice,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
