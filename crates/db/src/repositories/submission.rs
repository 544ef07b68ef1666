//! Submission repository.

use std::sync::Arc;

use crate::entities::{Submission, submission};
use buzz_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Submission repository for database operations.
#[derive(Clone)]
pub struct SubmissionRepository {
    db: Arc<DatabaseConnection>,
}

impl SubmissionRepository {
    /// Create a new submission repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a submission by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<submission::Model>> {
        Submission::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a submission by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<submission::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Submission not found: {id}")))
    }

    /// Create a new submission.
    pub async fn create(&self, model: submission::ActiveModel) -> AppResult<submission::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a submission.
    pub async fn update(&self, model: submission::ActiveModel) -> AppResult<submission::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a submission.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Submission::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List submissions, newest first.
    pub async fn list(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<submission::Model>> {
        let mut query = Submission::find();
        if let Some(until) = until_id {
            query = query.filter(submission::Column::Id.lt(until));
        }
        query
            .order_by_desc(submission::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all submissions.
    pub async fn count(&self) -> AppResult<u64> {
        Submission::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
