//! Community repository.

use std::sync::Arc;

use crate::entities::{Community, CommunityMember, community, community_member};
use buzz_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::Expr,
};

/// Community repository for database operations.
#[derive(Clone)]
pub struct CommunityRepository {
    db: Arc<DatabaseConnection>,
}

impl CommunityRepository {
    /// Create a new community repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a community by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<community::Model>> {
        Community::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a community by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<community::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Community not found: {id}")))
    }

    /// Create a new community.
    pub async fn create(&self, model: community::ActiveModel) -> AppResult<community::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a community.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Community::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List communities, newest first.
    pub async fn list(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<community::Model>> {
        let mut query = Community::find();
        if let Some(until) = until_id {
            query = query.filter(community::Column::Id.lt(until));
        }
        query
            .order_by_desc(community::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List communities a user belongs to.
    pub async fn find_by_member(&self, user_id: &str) -> AppResult<Vec<community::Model>> {
        let memberships = CommunityMember::find()
            .filter(community_member::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let ids: Vec<String> = memberships.into_iter().map(|m| m.community_id).collect();
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Community::find()
            .filter(community::Column::Id.is_in(ids))
            .order_by_desc(community::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a membership row.
    pub async fn find_membership(
        &self,
        community_id: &str,
        user_id: &str,
    ) -> AppResult<Option<community_member::Model>> {
        CommunityMember::find()
            .filter(community_member::Column::CommunityId.eq(community_id))
            .filter(community_member::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a user is a member of a community.
    pub async fn is_member(&self, community_id: &str, user_id: &str) -> AppResult<bool> {
        Ok(self.find_membership(community_id, user_id).await?.is_some())
    }

    /// Add a member.
    pub async fn add_member(
        &self,
        model: community_member::ActiveModel,
    ) -> AppResult<community_member::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a member.
    pub async fn remove_member(&self, community_id: &str, user_id: &str) -> AppResult<()> {
        CommunityMember::delete_many()
            .filter(community_member::Column::CommunityId.eq(community_id))
            .filter(community_member::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment member count atomically (single UPDATE query, no fetch).
    pub async fn increment_members_count(&self, id: &str) -> AppResult<()> {
        Community::update_many()
            .col_expr(
                community::Column::MembersCount,
                Expr::col(community::Column::MembersCount).add(1),
            )
            .filter(community::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement member count atomically, floored at 0.
    pub async fn decrement_members_count(&self, id: &str) -> AppResult<()> {
        Community::update_many()
            .col_expr(
                community::Column::MembersCount,
                Expr::cust("GREATEST(members_count - 1, 0)"),
            )
            .filter(community::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count all communities.
    pub async fn count(&self) -> AppResult<u64> {
        Community::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
