//! Vote accounting.
//!
//! Two ballot models coexist:
//!
//! - **Threads, replies, posts**: write-once. A voter's first vote is
//!   recorded in the ledger and applied to the aggregate; every later
//!   attempt from the same voter is rejected, including flips.
//! - **Polls**: switchable. A voter may move their vote between options at
//!   any time; the old option is debited and the new one credited, while
//!   the distinct-voter counter only moves on first votes.
//!
//! The decision logic is pure ([`plan_poll_vote`], [`ensure_first_vote`])
//! and applied through single-UPDATE counter bumps, so two voters hitting
//! the same item concurrently cannot overwrite each other's increments.

use buzz_common::{AppError, AppResult, IdGenerator};
use buzz_db::{
    entities::vote::{self, Choice, TargetKind},
    repositories::{PostRepository, ReplyRepository, ThreadRepository, VoteRepository},
};
use chrono::Utc;
use sea_orm::Set;

use crate::services::session::VoterId;

/// What a poll vote request should do to the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollVotePlan {
    /// First vote: credit the chosen option and the voter counter.
    First {
        /// Chosen option index.
        choice: i32,
    },
    /// Vote change: debit the old option, credit the new one.
    /// The voter counter is unchanged.
    Switch {
        /// Previously chosen option index.
        from: i32,
        /// Newly chosen option index.
        to: i32,
    },
    /// Re-vote for the currently held option: nothing to do.
    NoOp,
}

/// Decide what a poll vote does, given the voter's prior choice.
///
/// Rejects out-of-range option indexes. Never plans a transition back to
/// "not voted": once a voter has a choice recorded they always have one.
pub fn plan_poll_vote(
    prior: Option<i32>,
    choice: i32,
    option_count: usize,
) -> AppResult<PollVotePlan> {
    if choice < 0 || choice as usize >= option_count {
        return Err(AppError::BadRequest("Invalid choice".to_string()));
    }
    Ok(match prior {
        None => PollVotePlan::First { choice },
        Some(p) if p == choice => PollVotePlan::NoOp,
        Some(p) => PollVotePlan::Switch { from: p, to: choice },
    })
}

/// Reject a second vote on a write-once item.
pub const fn ensure_first_vote(prior: Option<&vote::Model>) -> AppResult<()> {
    match prior {
        Some(_) => Err(AppError::AlreadyVoted),
        None => Ok(()),
    }
}

/// Aggregate contribution of an up/down choice.
const fn vote_delta(choice: Choice) -> i64 {
    match choice {
        Choice::Up => 1,
        Choice::Down => -1,
    }
}

/// Ballot service for write-once votes on threads, replies, and posts.
#[derive(Clone)]
pub struct BallotService {
    vote_repo: VoteRepository,
    thread_repo: ThreadRepository,
    reply_repo: ReplyRepository,
    post_repo: PostRepository,
    id_gen: IdGenerator,
}

impl BallotService {
    /// Create a new ballot service.
    #[must_use]
    pub const fn new(
        vote_repo: VoteRepository,
        thread_repo: ThreadRepository,
        reply_repo: ReplyRepository,
        post_repo: PostRepository,
    ) -> Self {
        Self {
            vote_repo,
            thread_repo,
            reply_repo,
            post_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Cast a vote on a thread.
    pub async fn cast_thread_vote(
        &self,
        voter: &VoterId,
        thread_id: &str,
        choice: Choice,
    ) -> AppResult<vote::Model> {
        // Target must still exist
        self.thread_repo.get_by_id(thread_id).await?;

        let entry = self
            .record(voter, TargetKind::Thread, thread_id, choice)
            .await?;

        self.thread_repo
            .apply_vote(thread_id, vote_delta(choice))
            .await?;

        Ok(entry)
    }

    /// Cast a vote on a reply.
    pub async fn cast_reply_vote(
        &self,
        voter: &VoterId,
        reply_id: &str,
        choice: Choice,
    ) -> AppResult<vote::Model> {
        self.reply_repo.get_by_id(reply_id).await?;

        let entry = self
            .record(voter, TargetKind::Reply, reply_id, choice)
            .await?;

        self.reply_repo
            .apply_vote(reply_id, vote_delta(choice))
            .await?;

        Ok(entry)
    }

    /// Cast a vote on a community post. Requires an authenticated voter.
    pub async fn cast_post_vote(
        &self,
        voter: &VoterId,
        post_id: &str,
        choice: Choice,
    ) -> AppResult<vote::Model> {
        if !voter.is_user() {
            return Err(AppError::Unauthorized);
        }

        self.post_repo.get_by_id(post_id).await?;

        let entry = self.record(voter, TargetKind::Post, post_id, choice).await?;

        match choice {
            Choice::Up => self.post_repo.increment_upvotes(post_id).await?,
            Choice::Down => self.post_repo.increment_downvotes(post_id).await?,
        }

        Ok(entry)
    }

    /// Look up a voter's recorded choice on a target, if any.
    pub async fn find_choice(
        &self,
        voter: &VoterId,
        target_kind: TargetKind,
        target_id: &str,
    ) -> AppResult<Option<Choice>> {
        Ok(self
            .vote_repo
            .find_by_voter_and_target(voter.key(), target_kind, target_id)
            .await?
            .map(|v| v.choice))
    }

    /// Check the write-once rule and write the ledger entry.
    async fn record(
        &self,
        voter: &VoterId,
        target_kind: TargetKind,
        target_id: &str,
        choice: Choice,
    ) -> AppResult<vote::Model> {
        let prior = self
            .vote_repo
            .find_by_voter_and_target(voter.key(), target_kind, target_id)
            .await?;
        ensure_first_vote(prior.as_ref())?;

        let model = vote::ActiveModel {
            id: Set(self.id_gen.generate()),
            voter_id: Set(voter.key().to_string()),
            target_kind: Set(target_kind),
            target_id: Set(target_id.to_string()),
            choice: Set(choice),
            created_at: Set(Utc::now().into()),
        };
        let entry = self.vote_repo.create(model).await?;
        tracing::debug!(voter_id = %entry.voter_id, target_id = %entry.target_id, "Recorded vote");
        Ok(entry)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use buzz_db::entities::thread;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_thread(id: &str, author_id: &str) -> thread::Model {
        thread::Model {
            id: id.to_string(),
            author_id: author_id.to_string(),
            author_name: "author".to_string(),
            author_avatar: None,
            title: "Test thread".to_string(),
            description: "Body".to_string(),
            image_url: None,
            views: 0,
            votes: 0,
            reply_count: 0,
            trending_score: 0,
            created_at: chrono::Utc::now().into(),
            updated_at: None,
            last_replied_at: None,
        }
    }

    fn create_test_vote(voter_id: &str, target_id: &str, choice: Choice) -> vote::Model {
        vote::Model {
            id: "v1".to_string(),
            voter_id: voter_id.to_string(),
            target_kind: TargetKind::Thread,
            target_id: target_id.to_string(),
            choice,
            created_at: chrono::Utc::now().into(),
        }
    }

    fn service(thread_db: MockDatabase, vote_db: MockDatabase) -> BallotService {
        let reply_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        BallotService::new(
            VoteRepository::new(Arc::new(vote_db.into_connection())),
            ThreadRepository::new(Arc::new(thread_db.into_connection())),
            ReplyRepository::new(reply_db),
            PostRepository::new(post_db),
        )
    }

    // Pure decision logic

    #[test]
    fn test_ensure_first_vote_accepts_fresh_voter() {
        assert!(ensure_first_vote(None).is_ok());
    }

    #[test]
    fn test_ensure_first_vote_rejects_prior_entry() {
        let prior = create_test_vote("y", "t1", Choice::Up);
        match ensure_first_vote(Some(&prior)) {
            Err(AppError::AlreadyVoted) => {}
            other => panic!("Expected AlreadyVoted, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_first_vote_rejects_flip_attempt() {
        // An up-voter trying to downvote is still a second vote.
        let prior = create_test_vote("y", "t1", Choice::Up);
        assert!(matches!(
            ensure_first_vote(Some(&prior)),
            Err(AppError::AlreadyVoted)
        ));
    }

    #[test]
    fn test_vote_delta() {
        assert_eq!(vote_delta(Choice::Up), 1);
        assert_eq!(vote_delta(Choice::Down), -1);
    }

    // Service error paths

    #[tokio::test]
    async fn test_cast_thread_vote_thread_not_found() {
        let thread_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<thread::Model>::new()]);
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres);

        let svc = service(thread_db, vote_db);
        let voter = VoterId::User("y".to_string());

        let result = svc.cast_thread_vote(&voter, "missing", Choice::Up).await;
        match result {
            Err(AppError::ThreadNotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("Expected ThreadNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cast_thread_vote_already_voted() {
        let thread = create_test_thread("t1", "author1");
        let existing = create_test_vote("y", "t1", Choice::Up);

        let thread_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[thread]]);
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]]);

        let svc = service(thread_db, vote_db);
        let voter = VoterId::User("y".to_string());

        // Second vote is rejected even though it flips direction
        let result = svc.cast_thread_vote(&voter, "t1", Choice::Down).await;
        assert!(matches!(result, Err(AppError::AlreadyVoted)));
    }

    #[tokio::test]
    async fn test_cast_post_vote_requires_user() {
        let thread_db = MockDatabase::new(DatabaseBackend::Postgres);
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres);

        let svc = service(thread_db, vote_db);
        let voter = VoterId::Guest("guest-abc".to_string());

        let result = svc.cast_post_vote(&voter, "p1", Choice::Up).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_find_choice_none_for_fresh_voter() {
        let thread_db = MockDatabase::new(DatabaseBackend::Postgres);
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<vote::Model>::new()]);

        let svc = service(thread_db, vote_db);
        let voter = VoterId::Guest("guest-abc".to_string());

        let choice = svc
            .find_choice(&voter, TargetKind::Thread, "t1")
            .await
            .unwrap();
        assert_eq!(choice, None);
    }
}
