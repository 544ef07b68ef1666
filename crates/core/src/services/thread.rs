//! Thread service.

use buzz_common::{AppError, AppResult, IdGenerator};
use buzz_db::{
    entities::{thread, user, vote::TargetKind},
    repositories::{ReplyRepository, ThreadRepository, ThreadSort, VoteRepository},
};
use chrono::Utc;
use sea_orm::Set;
use validator::Validate;

/// Thread service for business logic.
#[derive(Clone)]
pub struct ThreadService {
    thread_repo: ThreadRepository,
    reply_repo: ReplyRepository,
    vote_repo: VoteRepository,
    id_gen: IdGenerator,
}

/// Input for creating a thread.
#[derive(Debug, Validate)]
pub struct CreateThreadInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(min = 1, max = 40_000))]
    pub description: String,

    pub image_url: Option<String>,
}

/// Input for editing a thread.
#[derive(Debug, Validate)]
pub struct UpdateThreadInput {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 40_000))]
    pub description: Option<String>,
}

impl ThreadService {
    /// Create a new thread service.
    #[must_use]
    pub const fn new(
        thread_repo: ThreadRepository,
        reply_repo: ReplyRepository,
        vote_repo: VoteRepository,
    ) -> Self {
        Self {
            thread_repo,
            reply_repo,
            vote_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a thread.
    pub async fn create(
        &self,
        author: &user::Model,
        input: CreateThreadInput,
    ) -> AppResult<thread::Model> {
        input.validate()?;

        let model = thread::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author.id.clone()),
            author_name: Set(author.username.clone()),
            author_avatar: Set(author.profile_image.clone()),
            title: Set(input.title),
            description: Set(input.description),
            image_url: Set(input.image_url),
            views: Set(0),
            votes: Set(0),
            reply_count: Set(0),
            trending_score: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
            last_replied_at: Set(None),
        };
        self.thread_repo.create(model).await
    }

    /// Get a thread by ID.
    pub async fn get(&self, id: &str) -> AppResult<thread::Model> {
        self.thread_repo.get_by_id(id).await
    }

    /// Get a thread and record the view (views + 1, trending score + 2).
    ///
    /// The returned model reflects the state before the bump, matching
    /// what the caller was shown when they opened the thread.
    pub async fn open(&self, id: &str) -> AppResult<thread::Model> {
        let thread = self.thread_repo.get_by_id(id).await?;
        self.thread_repo.record_view(id).await?;
        Ok(thread)
    }

    /// List threads with the given sort order.
    pub async fn list(
        &self,
        sort: ThreadSort,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<thread::Model>> {
        self.thread_repo.list(sort, limit, until_id).await
    }

    /// List threads created by a user.
    pub async fn find_by_author(&self, author_id: &str) -> AppResult<Vec<thread::Model>> {
        self.thread_repo.find_by_author(author_id).await
    }

    /// Edit a thread. Only the author may edit.
    pub async fn update(
        &self,
        actor: &user::Model,
        id: &str,
        input: UpdateThreadInput,
    ) -> AppResult<thread::Model> {
        input.validate()?;

        let thread = self.thread_repo.get_by_id(id).await?;
        if thread.author_id != actor.id {
            return Err(AppError::Forbidden(
                "Only the author can edit this thread".to_string(),
            ));
        }

        let mut active: thread::ActiveModel = thread.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.thread_repo.update(active).await
    }

    /// Delete a thread. Only the author or an admin may delete.
    ///
    /// Replies cascade with the thread; ledger entries for the thread and
    /// its replies are cleared explicitly.
    pub async fn delete(&self, actor: &user::Model, id: &str) -> AppResult<()> {
        let thread = self.thread_repo.get_by_id(id).await?;
        if thread.author_id != actor.id && !actor.is_admin {
            return Err(AppError::Forbidden(
                "Only the author can delete this thread".to_string(),
            ));
        }

        for reply in self.reply_repo.find_by_thread(id).await? {
            self.vote_repo
                .delete_by_target(TargetKind::Reply, &reply.id)
                .await?;
        }
        self.vote_repo.delete_by_target(TargetKind::Thread, id).await?;

        self.thread_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user(id: &str, is_admin: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: "tester".to_string(),
            username_lower: "tester".to_string(),
            email: None,
            password_hash: "x".to_string(),
            token: None,
            profile_image: None,
            bio: None,
            is_admin,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_thread(id: &str, author_id: &str) -> thread::Model {
        thread::Model {
            id: id.to_string(),
            author_id: author_id.to_string(),
            author_name: "tester".to_string(),
            author_avatar: None,
            title: "Title".to_string(),
            description: "Body".to_string(),
            image_url: None,
            views: 0,
            votes: 0,
            reply_count: 0,
            trending_score: 0,
            created_at: Utc::now().into(),
            updated_at: None,
            last_replied_at: None,
        }
    }

    fn service(thread_db: MockDatabase) -> ThreadService {
        ThreadService::new(
            ThreadRepository::new(Arc::new(thread_db.into_connection())),
            ReplyRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            )),
            VoteRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            )),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));
        let input = CreateThreadInput {
            title: String::new(),
            description: "Body".to_string(),
            image_url: None,
        };
        let result = svc.create(&test_user("u1", false), input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_requires_author() {
        let thread_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_thread("t1", "owner")]]);
        let svc = service(thread_db);

        let input = UpdateThreadInput {
            title: Some("New title".to_string()),
            description: None,
        };
        let result = svc.update(&test_user("intruder", false), "t1", input).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_requires_author_or_admin() {
        let thread_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_thread("t1", "owner")]]);
        let svc = service(thread_db);

        let result = svc.delete(&test_user("intruder", false), "t1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_get_missing_thread() {
        let thread_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<thread::Model>::new()]);
        let svc = service(thread_db);

        let result = svc.get("missing").await;
        assert!(matches!(result, Err(AppError::ThreadNotFound(_))));
    }
}
