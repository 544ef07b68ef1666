//! Reply repository.

use std::sync::Arc;

use crate::entities::{Reply, reply};
use buzz_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};

/// Reply repository for database operations.
#[derive(Clone)]
pub struct ReplyRepository {
    db: Arc<DatabaseConnection>,
}

impl ReplyRepository {
    /// Create a new reply repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a reply by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<reply::Model>> {
        Reply::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a reply by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<reply::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reply not found: {id}")))
    }

    /// List replies for a thread, oldest first.
    pub async fn find_by_thread(&self, thread_id: &str) -> AppResult<Vec<reply::Model>> {
        Reply::find()
            .filter(reply::Column::ThreadId.eq(thread_id))
            .order_by_asc(reply::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new reply.
    pub async fn create(&self, model: reply::ActiveModel) -> AppResult<reply::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a reply.
    pub async fn update(&self, model: reply::ActiveModel) -> AppResult<reply::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a reply.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Reply::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete all replies belonging to a thread.
    pub async fn delete_by_thread(&self, thread_id: &str) -> AppResult<()> {
        Reply::delete_many()
            .filter(reply::Column::ThreadId.eq(thread_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Apply a vote delta to the aggregate atomically (single UPDATE query).
    pub async fn apply_vote(&self, id: &str, delta: i64) -> AppResult<()> {
        Reply::update_many()
            .col_expr(
                reply::Column::Votes,
                Expr::col(reply::Column::Votes).add(delta),
            )
            .filter(reply::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
