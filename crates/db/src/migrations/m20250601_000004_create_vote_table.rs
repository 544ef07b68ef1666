//! Create vote ledger table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vote::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vote::VoterId).string_len(64).not_null())
                    .col(ColumnDef::new(Vote::TargetKind).string_len(16).not_null())
                    .col(ColumnDef::new(Vote::TargetId).string_len(32).not_null())
                    .col(ColumnDef::new(Vote::Choice).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Vote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one write-once ledger entry per voter per item
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_voter_target")
                    .table(Vote::Table)
                    .col(Vote::VoterId)
                    .col(Vote::TargetKind)
                    .col(Vote::TargetId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: target (for cascade deletion and counts)
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_target")
                    .table(Vote::Table)
                    .col(Vote::TargetKind)
                    .col(Vote::TargetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vote::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vote {
    Table,
    Id,
    VoterId,
    TargetKind,
    TargetId,
    Choice,
    CreatedAt,
}
