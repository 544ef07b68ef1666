//! Post repository.

use std::sync::Arc;

use crate::entities::{Post, post};
use buzz_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Expr,
};

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a post by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post not found: {id}")))
    }

    /// List posts in a community, newest first.
    pub async fn find_by_community(
        &self,
        community_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<post::Model>> {
        let mut query = Post::find().filter(post::Column::CommunityId.eq(community_id));
        if let Some(until) = until_id {
            query = query.filter(post::Column::Id.lt(until));
        }
        query
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a post.
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a post.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Post::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Record a post view atomically (single UPDATE query, no fetch).
    pub async fn record_view(&self, id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(post::Column::Views, Expr::col(post::Column::Views).add(1))
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment the upvote counter atomically (single UPDATE query).
    pub async fn increment_upvotes(&self, id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::Upvotes,
                Expr::col(post::Column::Upvotes).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment the downvote counter atomically (single UPDATE query).
    pub async fn increment_downvotes(&self, id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::Downvotes,
                Expr::col(post::Column::Downvotes).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment comment count atomically (single UPDATE query, no fetch).
    pub async fn increment_comment_count(&self, id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::CommentCount,
                Expr::col(post::Column::CommentCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement comment count atomically, floored at 0.
    pub async fn decrement_comment_count(&self, id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::CommentCount,
                Expr::cust("GREATEST(comment_count - 1, 0)"),
            )
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete all posts in a community.
    pub async fn delete_by_community(&self, community_id: &str) -> AppResult<()> {
        Post::delete_many()
            .filter(post::Column::CommunityId.eq(community_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
