//! Thread repository.

use std::sync::Arc;

use crate::entities::{Thread, thread};
use buzz_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::Expr,
};

/// Sort order for thread listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadSort {
    /// Most recently created first.
    #[default]
    Newest,
    /// Highest vote aggregate first.
    TopVoted,
    /// Most replies first.
    MostReplied,
    /// Highest trending score first.
    Trending,
}

/// Thread repository for database operations.
#[derive(Clone)]
pub struct ThreadRepository {
    db: Arc<DatabaseConnection>,
}

impl ThreadRepository {
    /// Create a new thread repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a thread by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<thread::Model>> {
        Thread::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a thread by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<thread::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ThreadNotFound(id.to_string()))
    }

    /// Create a new thread.
    pub async fn create(&self, model: thread::ActiveModel) -> AppResult<thread::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a thread.
    pub async fn update(&self, model: thread::ActiveModel) -> AppResult<thread::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a thread.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Thread::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List threads with the given sort order and id-based pagination.
    pub async fn list(
        &self,
        sort: ThreadSort,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<thread::Model>> {
        let mut query = Thread::find();
        if let Some(until) = until_id {
            query = query.filter(thread::Column::Id.lt(until));
        }
        query = match sort {
            ThreadSort::Newest => query.order_by_desc(thread::Column::CreatedAt),
            ThreadSort::TopVoted => query.order_by_desc(thread::Column::Votes),
            ThreadSort::MostReplied => query.order_by_desc(thread::Column::ReplyCount),
            ThreadSort::Trending => query.order_by_desc(thread::Column::TrendingScore),
        };
        query
            .order_by_desc(thread::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List threads created by a user.
    pub async fn find_by_author(&self, author_id: &str) -> AppResult<Vec<thread::Model>> {
        Thread::find()
            .filter(thread::Column::AuthorId.eq(author_id))
            .order_by_desc(thread::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record a thread view: views + 1, trending score + 2.
    /// Single UPDATE query, no fetch.
    pub async fn record_view(&self, id: &str) -> AppResult<()> {
        Thread::update_many()
            .col_expr(thread::Column::Views, Expr::col(thread::Column::Views).add(1))
            .col_expr(
                thread::Column::TrendingScore,
                Expr::col(thread::Column::TrendingScore).add(2),
            )
            .filter(thread::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Apply a vote delta to the aggregate atomically (single UPDATE query).
    /// The aggregate is signed and has no lower bound.
    pub async fn apply_vote(&self, id: &str, delta: i64) -> AppResult<()> {
        Thread::update_many()
            .col_expr(
                thread::Column::Votes,
                Expr::col(thread::Column::Votes).add(delta),
            )
            .filter(thread::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment reply count atomically and refresh the last-replied time.
    pub async fn increment_reply_count(&self, id: &str) -> AppResult<()> {
        Thread::update_many()
            .col_expr(
                thread::Column::ReplyCount,
                Expr::col(thread::Column::ReplyCount).add(1),
            )
            .col_expr(thread::Column::LastRepliedAt, Expr::current_timestamp().into())
            .filter(thread::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement reply count atomically, floored at 0.
    pub async fn decrement_reply_count(&self, id: &str) -> AppResult<()> {
        Thread::update_many()
            .col_expr(
                thread::Column::ReplyCount,
                Expr::cust("GREATEST(reply_count - 1, 0)"),
            )
            .filter(thread::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count all threads.
    pub async fn count(&self) -> AppResult<u64> {
        Thread::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
