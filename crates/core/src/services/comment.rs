//! Post comment service.

use buzz_common::{AppError, AppResult, IdGenerator};
use buzz_db::{
    entities::{comment, user},
    repositories::{CommentRepository, CommunityRepository, PostRepository},
};
use chrono::Utc;
use sea_orm::Set;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    post_repo: PostRepository,
    community_repo: CommunityRepository,
    id_gen: IdGenerator,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(
        comment_repo: CommentRepository,
        post_repo: PostRepository,
        community_repo: CommunityRepository,
    ) -> Self {
        Self {
            comment_repo,
            post_repo,
            community_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a comment to a post. Members only.
    pub async fn create(
        &self,
        author: &user::Model,
        post_id: &str,
        content: String,
    ) -> AppResult<comment::Model> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        }

        let post = self.post_repo.get_by_id(post_id).await?;
        if !self
            .community_repo
            .is_member(&post.community_id, &author.id)
            .await?
        {
            return Err(AppError::Forbidden(
                "Join the community to comment".to_string(),
            ));
        }

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            post_id: Set(post_id.to_string()),
            author_id: Set(author.id.clone()),
            author_name: Set(author.username.clone()),
            author_avatar: Set(author.profile_image.clone()),
            content: Set(content),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };
        let created = self.comment_repo.create(model).await?;

        self.post_repo.increment_comment_count(post_id).await?;

        Ok(created)
    }

    /// List comments on a post, oldest first.
    pub async fn list(&self, post_id: &str) -> AppResult<Vec<comment::Model>> {
        self.comment_repo.find_by_post(post_id).await
    }

    /// Edit a comment. Only the author may edit.
    pub async fn update(
        &self,
        actor: &user::Model,
        comment_id: &str,
        content: String,
    ) -> AppResult<comment::Model> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;
        if comment.author_id != actor.id {
            return Err(AppError::Forbidden(
                "Only the author can edit this comment".to_string(),
            ));
        }
        if content.trim().is_empty() {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        }

        let mut active: comment::ActiveModel = comment.into();
        active.content = Set(content);
        active.updated_at = Set(Some(Utc::now().into()));

        self.comment_repo.update(active).await
    }

    /// Delete a comment. Only the author or an admin may delete.
    pub async fn delete(&self, actor: &user::Model, comment_id: &str) -> AppResult<()> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;
        if comment.author_id != actor.id && !actor.is_admin {
            return Err(AppError::Forbidden(
                "Only the author can delete this comment".to_string(),
            ));
        }

        self.comment_repo.delete(comment_id).await?;
        self.post_repo.decrement_comment_count(&comment.post_id).await?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use buzz_db::entities::post;
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

    fn test_comment(id: &str, author_id: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            post_id: "p1".to_string(),
            author_id: author_id.to_string(),
            author_name: "tester".to_string(),
            author_avatar: None,
            content: "A comment".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(comment_db: MockDatabase, post_db: MockDatabase) -> CommentService {
        CommentService::new(
            CommentRepository::new(Arc::new(comment_db.into_connection())),
            PostRepository::new(Arc::new(post_db.into_connection())),
            CommunityRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            )),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_blank_comment() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );
        let result = svc.create(&test_user("u1"), "p1", "  ".to_string()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_missing_post() {
        let post_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()]);
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres), post_db);

        let result = svc.create(&test_user("u1"), "missing", "Hi".to_string()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_requires_author() {
        let comment_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_comment("cm1", "owner")]]);
        let svc = service(comment_db, MockDatabase::new(DatabaseBackend::Postgres));

        let result = svc.delete(&test_user("intruder"), "cm1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
