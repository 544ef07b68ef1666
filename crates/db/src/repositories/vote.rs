//! Vote ledger repository.

use std::sync::Arc;

use crate::entities::{Vote, vote};
use buzz_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Vote ledger repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a ledger entry for a voter on a target.
    pub async fn find_by_voter_and_target(
        &self,
        voter_id: &str,
        target_kind: vote::TargetKind,
        target_id: &str,
    ) -> AppResult<Option<vote::Model>> {
        Vote::find()
            .filter(vote::Column::VoterId.eq(voter_id))
            .filter(vote::Column::TargetKind.eq(target_kind))
            .filter(vote::Column::TargetId.eq(target_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write a new ledger entry.
    pub async fn create(&self, model: vote::ActiveModel) -> AppResult<vote::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove all ledger entries for a target (item deletion cascade).
    pub async fn delete_by_target(
        &self,
        target_kind: vote::TargetKind,
        target_id: &str,
    ) -> AppResult<()> {
        Vote::delete_many()
            .filter(vote::Column::TargetKind.eq(target_kind))
            .filter(vote::Column::TargetId.eq(target_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
