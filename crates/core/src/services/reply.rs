//! Reply service.

use buzz_common::{AppError, AppResult, IdGenerator};
use buzz_db::{
    entities::{reply, user, vote::TargetKind},
    repositories::{ReplyRepository, ThreadRepository, VoteRepository},
};
use chrono::Utc;
use sea_orm::Set;
use validator::Validate;

/// Reply service for business logic.
#[derive(Clone)]
pub struct ReplyService {
    reply_repo: ReplyRepository,
    thread_repo: ThreadRepository,
    vote_repo: VoteRepository,
    id_gen: IdGenerator,
}

/// Input for creating a reply.
#[derive(Debug, Validate)]
pub struct CreateReplyInput {
    #[validate(length(min = 1, max = 40_000))]
    pub content: String,

    pub image_url: Option<String>,
}

impl ReplyService {
    /// Create a new reply service.
    #[must_use]
    pub const fn new(
        reply_repo: ReplyRepository,
        thread_repo: ThreadRepository,
        vote_repo: VoteRepository,
    ) -> Self {
        Self {
            reply_repo,
            thread_repo,
            vote_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Post a reply to a thread.
    ///
    /// Bumps the thread's reply count and refreshes its last-replied time.
    pub async fn create(
        &self,
        author: &user::Model,
        thread_id: &str,
        input: CreateReplyInput,
    ) -> AppResult<reply::Model> {
        input.validate()?;

        // Thread must still exist
        self.thread_repo.get_by_id(thread_id).await?;

        let model = reply::ActiveModel {
            id: Set(self.id_gen.generate()),
            thread_id: Set(thread_id.to_string()),
            author_id: Set(author.id.clone()),
            author_name: Set(author.username.clone()),
            author_avatar: Set(author.profile_image.clone()),
            content: Set(input.content),
            image_url: Set(input.image_url),
            votes: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };
        let created = self.reply_repo.create(model).await?;

        self.thread_repo.increment_reply_count(thread_id).await?;

        Ok(created)
    }

    /// List replies in a thread, oldest first.
    pub async fn list(&self, thread_id: &str) -> AppResult<Vec<reply::Model>> {
        self.reply_repo.find_by_thread(thread_id).await
    }

    /// Edit a reply. Only the author may edit.
    pub async fn update(
        &self,
        actor: &user::Model,
        reply_id: &str,
        content: String,
    ) -> AppResult<reply::Model> {
        let reply = self.reply_repo.get_by_id(reply_id).await?;
        if reply.author_id != actor.id {
            return Err(AppError::Forbidden(
                "Only the author can edit this reply".to_string(),
            ));
        }
        if content.trim().is_empty() {
            return Err(AppError::Validation("Reply cannot be empty".to_string()));
        }

        let mut active: reply::ActiveModel = reply.into();
        active.content = Set(content);
        active.updated_at = Set(Some(Utc::now().into()));

        self.reply_repo.update(active).await
    }

    /// Delete a reply. Only the author or an admin may delete.
    ///
    /// Decrements the thread's reply count (floored at 0) and clears the
    /// reply's ledger entries.
    pub async fn delete(&self, actor: &user::Model, reply_id: &str) -> AppResult<()> {
        let reply = self.reply_repo.get_by_id(reply_id).await?;
        if reply.author_id != actor.id && !actor.is_admin {
            return Err(AppError::Forbidden(
                "Only the author can delete this reply".to_string(),
            ));
        }

        self.vote_repo
            .delete_by_target(TargetKind::Reply, reply_id)
            .await?;
        self.reply_repo.delete(reply_id).await?;
        self.thread_repo.decrement_reply_count(&reply.thread_id).await?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use buzz_db::entities::thread;
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

    fn test_reply(id: &str, author_id: &str) -> reply::Model {
        reply::Model {
            id: id.to_string(),
            thread_id: "t1".to_string(),
            author_id: author_id.to_string(),
            author_name: "tester".to_string(),
            author_avatar: None,
            content: "A reply".to_string(),
            image_url: None,
            votes: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(reply_db: MockDatabase, thread_db: MockDatabase) -> ReplyService {
        ReplyService::new(
            ReplyRepository::new(Arc::new(reply_db.into_connection())),
            ThreadRepository::new(Arc::new(thread_db.into_connection())),
            VoteRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            )),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_missing_thread() {
        let reply_db = MockDatabase::new(DatabaseBackend::Postgres);
        let thread_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<thread::Model>::new()]);
        let svc = service(reply_db, thread_db);

        let input = CreateReplyInput {
            content: "Hello".to_string(),
            image_url: None,
        };
        let result = svc.create(&test_user("u1"), "missing", input).await;
        assert!(matches!(result, Err(AppError::ThreadNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_requires_author() {
        let reply_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_reply("r1", "owner")]]);
        let thread_db = MockDatabase::new(DatabaseBackend::Postgres);
        let svc = service(reply_db, thread_db);

        let result = svc
            .update(&test_user("intruder"), "r1", "edited".to_string())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_content() {
        let reply_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_reply("r1", "u1")]]);
        let thread_db = MockDatabase::new(DatabaseBackend::Postgres);
        let svc = service(reply_db, thread_db);

        let result = svc.update(&test_user("u1"), "r1", "   ".to_string()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
