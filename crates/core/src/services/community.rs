//! Community service.

use buzz_common::{AppError, AppResult, IdGenerator};
use buzz_db::{
    entities::{community, community_member, user},
    repositories::CommunityRepository,
};
use chrono::Utc;
use sea_orm::Set;
use validator::Validate;

/// Community service for business logic.
#[derive(Clone)]
pub struct CommunityService {
    community_repo: CommunityRepository,
    id_gen: IdGenerator,
}

/// Input for creating a community.
#[derive(Debug, Validate)]
pub struct CreateCommunityInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(max = 4096))]
    pub description: Option<String>,
}

impl CommunityService {
    /// Create a new community service.
    #[must_use]
    pub const fn new(community_repo: CommunityRepository) -> Self {
        Self {
            community_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a community. The creator automatically becomes a member.
    pub async fn create(
        &self,
        creator: &user::Model,
        input: CreateCommunityInput,
    ) -> AppResult<community::Model> {
        input.validate()?;

        let model = community::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            description: Set(input.description),
            creator_id: Set(creator.id.clone()),
            members_count: Set(0),
            created_at: Set(Utc::now().into()),
        };
        let created = self.community_repo.create(model).await?;

        self.join(creator, &created.id).await?;

        Ok(created)
    }

    /// Get a community by ID.
    pub async fn get(&self, id: &str) -> AppResult<community::Model> {
        self.community_repo.get_by_id(id).await
    }

    /// List communities, newest first.
    pub async fn list(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<community::Model>> {
        self.community_repo.list(limit, until_id).await
    }

    /// List communities a user belongs to.
    pub async fn find_by_member(&self, user_id: &str) -> AppResult<Vec<community::Model>> {
        self.community_repo.find_by_member(user_id).await
    }

    /// Check whether a user is a member.
    pub async fn is_member(&self, community_id: &str, user_id: &str) -> AppResult<bool> {
        self.community_repo.is_member(community_id, user_id).await
    }

    /// Join a community. Joining twice is a no-op.
    pub async fn join(&self, user: &user::Model, community_id: &str) -> AppResult<()> {
        // Community must still exist
        self.community_repo.get_by_id(community_id).await?;

        if self.community_repo.is_member(community_id, &user.id).await? {
            return Ok(());
        }

        let model = community_member::ActiveModel {
            id: Set(self.id_gen.generate()),
            community_id: Set(community_id.to_string()),
            user_id: Set(user.id.clone()),
            created_at: Set(Utc::now().into()),
        };
        self.community_repo.add_member(model).await?;
        self.community_repo.increment_members_count(community_id).await?;

        Ok(())
    }

    /// Leave a community. Leaving a community you are not in is a no-op.
    pub async fn leave(&self, user: &user::Model, community_id: &str) -> AppResult<()> {
        if !self.community_repo.is_member(community_id, &user.id).await? {
            return Ok(());
        }

        self.community_repo.remove_member(community_id, &user.id).await?;
        self.community_repo.decrement_members_count(community_id).await?;

        Ok(())
    }

    /// Delete a community. Only the creator or an admin may delete.
    pub async fn delete(&self, actor: &user::Model, community_id: &str) -> AppResult<()> {
        let community = self.community_repo.get_by_id(community_id).await?;
        if community.creator_id != actor.id && !actor.is_admin {
            return Err(AppError::Forbidden(
                "Only the creator can delete this community".to_string(),
            ));
        }
        // Members and posts cascade with the community
        self.community_repo.delete(community_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user(id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: "tester".to_string(),
            username_lower: "tester".to_string(),
            email: None,
            password_hash: "x".to_string(),
            token: None,
            profile_image: None,
            bio: None,
            is_admin: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_community(id: &str, creator_id: &str) -> community::Model {
        community::Model {
            id: id.to_string(),
            name: "rustaceans".to_string(),
            description: None,
            creator_id: creator_id.to_string(),
            members_count: 1,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: MockDatabase) -> CommunityService {
        CommunityService::new(CommunityRepository::new(Arc::new(db.into_connection())))
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));
        let input = CreateCommunityInput {
            name: String::new(),
            description: None,
        };
        let result = svc.create(&test_user("u1"), input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_join_missing_community() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<community::Model>::new()]);
        let svc = service(db);

        let result = svc.join(&test_user("u1"), "missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_join_is_idempotent() {
        let membership = community_member::Model {
            id: "m1".to_string(),
            community_id: "c1".to_string(),
            user_id: "u1".to_string(),
            created_at: Utc::now().into(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_community("c1", "creator")]])
            .append_query_results([[membership]]);
        let svc = service(db);

        // Already a member: succeeds without inserting or bumping the count
        svc.join(&test_user("u1"), "c1").await.unwrap();
    }

    #[tokio::test]
    async fn test_leave_when_not_member_is_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<community_member::Model>::new()]);
        let svc = service(db);

        svc.leave(&test_user("u1"), "c1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_requires_creator() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_community("c1", "creator")]]);
        let svc = service(db);

        let result = svc.delete(&test_user("intruder"), "c1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
