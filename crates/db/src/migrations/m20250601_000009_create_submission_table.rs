//! Create submission table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submission::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submission::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(Submission::Subject).string_len(256).not_null())
                    .col(ColumnDef::new(Submission::Message).text().not_null())
                    .col(ColumnDef::new(Submission::Category).string_len(64).null())
                    .col(ColumnDef::new(Submission::ReportType).string_len(64).null())
                    .col(ColumnDef::new(Submission::ReportDetails).text().null())
                    .col(
                        ColumnDef::new(Submission::Priority)
                            .string_len(16)
                            .not_null()
                            .default("normal"),
                    )
                    .col(ColumnDef::new(Submission::UserId).string_len(64).null())
                    .col(ColumnDef::new(Submission::Email).string_len(256).null())
                    .col(
                        ColumnDef::new(Submission::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Submission::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: status (for the admin review queue)
        manager
            .create_index(
                Index::create()
                    .name("idx_submission_status")
                    .table(Submission::Table)
                    .col(Submission::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submission::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Submission {
    Table,
    Id,
    Kind,
    Subject,
    Message,
    Category,
    ReportType,
    ReportDetails,
    Priority,
    UserId,
    Email,
    Status,
    CreatedAt,
}
