//! Poll repository.

use std::sync::Arc;

use crate::entities::{Poll, PollOption, PollVote, poll, poll_option, poll_vote};
use buzz_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::Expr,
};

/// Poll repository for database operations.
#[derive(Clone)]
pub struct PollRepository {
    db: Arc<DatabaseConnection>,
}

impl PollRepository {
    /// Create a new poll repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a poll by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<poll::Model>> {
        Poll::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a poll by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<poll::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Poll not found: {id}")))
    }

    /// Create a new poll.
    pub async fn create(&self, model: poll::ActiveModel) -> AppResult<poll::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a poll.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Poll::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List polls, newest first.
    pub async fn list(&self, limit: u64, until_id: Option<&str>) -> AppResult<Vec<poll::Model>> {
        let mut query = Poll::find();
        if let Some(until) = until_id {
            query = query.filter(poll::Column::Id.lt(until));
        }
        query
            .order_by_desc(poll::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List polls created by a user.
    pub async fn find_by_creator(&self, user_id: &str) -> AppResult<Vec<poll::Model>> {
        Poll::find()
            .filter(poll::Column::CreatedBy.eq(user_id))
            .order_by_desc(poll::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment the distinct-voter counter atomically (first votes only).
    pub async fn increment_total_votes(&self, id: &str) -> AppResult<()> {
        Poll::update_many()
            .col_expr(
                poll::Column::TotalVotes,
                Expr::col(poll::Column::TotalVotes).add(1),
            )
            .filter(poll::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count all polls.
    pub async fn count(&self) -> AppResult<u64> {
        Poll::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Poll option repository for database operations.
#[derive(Clone)]
pub struct PollOptionRepository {
    db: Arc<DatabaseConnection>,
}

impl PollOptionRepository {
    /// Create a new poll option repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List options for a poll in display order.
    pub async fn find_by_poll(&self, poll_id: &str) -> AppResult<Vec<poll_option::Model>> {
        PollOption::find()
            .filter(poll_option::Column::PollId.eq(poll_id))
            .order_by_asc(poll_option::Column::Idx)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create an option row.
    pub async fn create(&self, model: poll_option::ActiveModel) -> AppResult<poll_option::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment an option's vote counter atomically (single UPDATE query).
    pub async fn increment_votes(&self, poll_id: &str, idx: i32) -> AppResult<()> {
        PollOption::update_many()
            .col_expr(
                poll_option::Column::Votes,
                Expr::col(poll_option::Column::Votes).add(1),
            )
            .filter(poll_option::Column::PollId.eq(poll_id))
            .filter(poll_option::Column::Idx.eq(idx))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement an option's vote counter atomically, floored at 0.
    pub async fn decrement_votes(&self, poll_id: &str, idx: i32) -> AppResult<()> {
        PollOption::update_many()
            .col_expr(
                poll_option::Column::Votes,
                Expr::cust("GREATEST(votes - 1, 0)"),
            )
            .filter(poll_option::Column::PollId.eq(poll_id))
            .filter(poll_option::Column::Idx.eq(idx))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

/// Poll vote repository for database operations.
#[derive(Clone)]
pub struct PollVoteRepository {
    db: Arc<DatabaseConnection>,
}

impl PollVoteRepository {
    /// Create a new poll vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a voter's choice on a poll.
    pub async fn find_by_voter_and_poll(
        &self,
        voter_id: &str,
        poll_id: &str,
    ) -> AppResult<Option<poll_vote::Model>> {
        PollVote::find()
            .filter(poll_vote::Column::VoterId.eq(voter_id))
            .filter(poll_vote::Column::PollId.eq(poll_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record a first vote.
    pub async fn create(&self, model: poll_vote::ActiveModel) -> AppResult<poll_vote::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an existing vote to a new choice.
    pub async fn update(&self, model: poll_vote::ActiveModel) -> AppResult<poll_vote::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
