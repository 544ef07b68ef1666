//! Community post service.

use buzz_common::{AppError, AppResult, IdGenerator};
use buzz_db::{
    entities::{post, user, vote::TargetKind},
    repositories::{CommentRepository, CommunityRepository, PostRepository, VoteRepository},
};
use chrono::Utc;
use sea_orm::Set;
use validator::Validate;

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    community_repo: CommunityRepository,
    comment_repo: CommentRepository,
    vote_repo: VoteRepository,
    id_gen: IdGenerator,
}

/// Input for creating a post.
#[derive(Debug, Validate)]
pub struct CreatePostInput {
    #[validate(length(min = 1, max = 40_000))]
    pub content: String,

    pub image_url: Option<String>,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        community_repo: CommunityRepository,
        comment_repo: CommentRepository,
        vote_repo: VoteRepository,
    ) -> Self {
        Self {
            post_repo,
            community_repo,
            comment_repo,
            vote_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a post in a community. Members only.
    pub async fn create(
        &self,
        author: &user::Model,
        community_id: &str,
        input: CreatePostInput,
    ) -> AppResult<post::Model> {
        input.validate()?;

        // Community must exist and the author must belong to it
        self.community_repo.get_by_id(community_id).await?;
        if !self
            .community_repo
            .is_member(community_id, &author.id)
            .await?
        {
            return Err(AppError::Forbidden(
                "Join the community to post".to_string(),
            ));
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            community_id: Set(community_id.to_string()),
            author_id: Set(author.id.clone()),
            author_name: Set(author.username.clone()),
            author_avatar: Set(author.profile_image.clone()),
            content: Set(input.content),
            image_url: Set(input.image_url),
            upvotes: Set(0),
            downvotes: Set(0),
            views: Set(0),
            comment_count: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };
        self.post_repo.create(model).await
    }

    /// Get a post by ID.
    pub async fn get(&self, id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(id).await
    }

    /// Get a post and record the view.
    pub async fn open(&self, id: &str) -> AppResult<post::Model> {
        let post = self.post_repo.get_by_id(id).await?;
        self.post_repo.record_view(id).await?;
        Ok(post)
    }

    /// List posts in a community, newest first.
    pub async fn list(
        &self,
        community_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<post::Model>> {
        self.post_repo
            .find_by_community(community_id, limit, until_id)
            .await
    }

    /// Edit a post. Only the author may edit.
    pub async fn update(
        &self,
        actor: &user::Model,
        post_id: &str,
        content: String,
    ) -> AppResult<post::Model> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != actor.id {
            return Err(AppError::Forbidden(
                "Only the author can edit this post".to_string(),
            ));
        }
        if content.trim().is_empty() {
            return Err(AppError::Validation("Post cannot be empty".to_string()));
        }

        let mut active: post::ActiveModel = post.into();
        active.content = Set(content);
        active.updated_at = Set(Some(Utc::now().into()));

        self.post_repo.update(active).await
    }

    /// Delete a post. Only the author or an admin may delete.
    ///
    /// Comments cascade with the post; ledger entries are cleared
    /// explicitly.
    pub async fn delete(&self, actor: &user::Model, post_id: &str) -> AppResult<()> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != actor.id && !actor.is_admin {
            return Err(AppError::Forbidden(
                "Only the author can delete this post".to_string(),
            ));
        }

        self.comment_repo.delete_by_post(post_id).await?;
        self.vote_repo
            .delete_by_target(TargetKind::Post, post_id)
            .await?;
        self.post_repo.delete(post_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use buzz_db::entities::{community, community_member};
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

    fn test_community(id: &str) -> community::Model {
        community::Model {
            id: id.to_string(),
            name: "rustaceans".to_string(),
            description: None,
            creator_id: "creator".to_string(),
            members_count: 1,
            created_at: Utc::now().into(),
        }
    }

    fn test_post(id: &str, author_id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            community_id: "c1".to_string(),
            author_id: author_id.to_string(),
            author_name: "tester".to_string(),
            author_avatar: None,
            content: "A post".to_string(),
            image_url: None,
            upvotes: 0,
            downvotes: 0,
            views: 0,
            comment_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(post_db: MockDatabase, community_db: MockDatabase) -> PostService {
        PostService::new(
            PostRepository::new(Arc::new(post_db.into_connection())),
            CommunityRepository::new(Arc::new(community_db.into_connection())),
            CommentRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            )),
            VoteRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            )),
        )
    }

    #[tokio::test]
    async fn test_create_requires_membership() {
        let community_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_community("c1")]])
            .append_query_results([Vec::<community_member::Model>::new()]);
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres), community_db);

        let input = CreatePostInput {
            content: "Hello".to_string(),
            image_url: None,
        };
        let result = svc.create(&test_user("outsider"), "c1", input).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_requires_author() {
        let post_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_post("p1", "owner")]]);
        let svc = service(post_db, MockDatabase::new(DatabaseBackend::Postgres));

        let result = svc
            .update(&test_user("intruder"), "p1", "edited".to_string())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let post_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()]);
        let svc = service(post_db, MockDatabase::new(DatabaseBackend::Postgres));

        let result = svc.get("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
