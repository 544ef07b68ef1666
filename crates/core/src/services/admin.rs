//! Admin panel service.
//!
//! The panel works over a closed set of entity kinds. Listing and deletion
//! dispatch on [`AdminCollection`], so every kind is handled by typed code
//! and an unknown kind is a request error, not a stringly-typed walk over
//! arbitrary collections.

use buzz_common::{AppError, AppResult};
use buzz_db::{
    entities::{community, poll, submission, thread, user},
    repositories::{
        CommunityRepository, PollRepository, SubmissionRepository, ThreadRepository,
        UserRepository,
    },
};
use serde::Serialize;

use crate::services::community::CommunityService;
use crate::services::poll::PollService;
use crate::services::thread::ThreadService;

/// The entity kinds the admin panel manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCollection {
    Users,
    Threads,
    Communities,
    Polls,
    Submissions,
}

impl AdminCollection {
    /// Parse a collection name from a request path.
    pub fn parse(name: &str) -> AppResult<Self> {
        match name {
            "users" => Ok(Self::Users),
            "threads" => Ok(Self::Threads),
            "communities" => Ok(Self::Communities),
            "polls" => Ok(Self::Polls),
            "submissions" => Ok(Self::Submissions),
            other => Err(AppError::BadRequest(format!(
                "Unknown collection: {other}"
            ))),
        }
    }

    /// The request-path name of this collection.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Threads => "threads",
            Self::Communities => "communities",
            Self::Polls => "polls",
            Self::Submissions => "submissions",
        }
    }
}

/// Per-collection row counts for the admin overview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub users: u64,
    pub threads: u64,
    pub communities: u64,
    pub polls: u64,
    pub submissions: u64,
}

/// A typed listing of one collection.
#[derive(Debug, Serialize)]
#[serde(tag = "collection", content = "items", rename_all = "camelCase")]
pub enum AdminListing {
    Users(Vec<user::Model>),
    Threads(Vec<thread::Model>),
    Communities(Vec<community::Model>),
    Polls(Vec<poll::Model>),
    Submissions(Vec<submission::Model>),
}

/// Admin service for business logic.
#[derive(Clone)]
pub struct AdminService {
    user_repo: UserRepository,
    thread_repo: ThreadRepository,
    community_repo: CommunityRepository,
    poll_repo: PollRepository,
    submission_repo: SubmissionRepository,
    thread_service: ThreadService,
    community_service: CommunityService,
    poll_service: PollService,
}

impl AdminService {
    /// Create a new admin service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        thread_repo: ThreadRepository,
        community_repo: CommunityRepository,
        poll_repo: PollRepository,
        submission_repo: SubmissionRepository,
        thread_service: ThreadService,
        community_service: CommunityService,
        poll_service: PollService,
    ) -> Self {
        Self {
            user_repo,
            thread_repo,
            community_repo,
            poll_repo,
            submission_repo,
            thread_service,
            community_service,
            poll_service,
        }
    }

    /// Require that the actor is an admin.
    pub fn require_admin(actor: &user::Model) -> AppResult<()> {
        if actor.is_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    /// Row counts per collection.
    pub async fn overview(&self, actor: &user::Model) -> AppResult<AdminOverview> {
        Self::require_admin(actor)?;

        Ok(AdminOverview {
            users: self.user_repo.count().await?,
            threads: self.thread_repo.count().await?,
            communities: self.community_repo.count().await?,
            polls: self.poll_repo.count().await?,
            submissions: self.submission_repo.count().await?,
        })
    }

    /// List a collection, newest first.
    pub async fn list(
        &self,
        actor: &user::Model,
        collection: AdminCollection,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<AdminListing> {
        Self::require_admin(actor)?;

        Ok(match collection {
            AdminCollection::Users => {
                AdminListing::Users(self.user_repo.list(limit, until_id).await?)
            }
            AdminCollection::Threads => AdminListing::Threads(
                self.thread_repo
                    .list(buzz_db::repositories::ThreadSort::Newest, limit, until_id)
                    .await?,
            ),
            AdminCollection::Communities => {
                AdminListing::Communities(self.community_repo.list(limit, until_id).await?)
            }
            AdminCollection::Polls => {
                AdminListing::Polls(self.poll_repo.list(limit, until_id).await?)
            }
            AdminCollection::Submissions => {
                AdminListing::Submissions(self.submission_repo.list(limit, until_id).await?)
            }
        })
    }

    /// Delete one item from a collection, with the same cascades as an
    /// owner-initiated delete.
    pub async fn delete(
        &self,
        actor: &user::Model,
        collection: AdminCollection,
        id: &str,
    ) -> AppResult<()> {
        Self::require_admin(actor)?;

        match collection {
            AdminCollection::Users => {
                self.user_repo.get_by_id(id).await?;
                self.user_repo.delete(id).await
            }
            AdminCollection::Threads => self.thread_service.delete(actor, id).await,
            AdminCollection::Communities => self.community_service.delete(actor, id).await,
            AdminCollection::Polls => self.poll_service.delete(actor, id).await,
            AdminCollection::Submissions => {
                self.submission_repo.get_by_id(id).await?;
                self.submission_repo.delete(id).await
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(is_admin: bool) -> user::Model {
        user::Model {
            id: "u1".to_string(),
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

    #[test]
    fn test_parse_known_collections() {
        for name in ["users", "threads", "communities", "polls", "submissions"] {
            let collection = AdminCollection::parse(name).unwrap();
            assert_eq!(collection.name(), name);
        }
    }

    #[test]
    fn test_parse_unknown_collection() {
        let result = AdminCollection::parse("drive_files");
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_require_admin() {
        assert!(AdminService::require_admin(&test_user(true)).is_ok());
        assert!(matches!(
            AdminService::require_admin(&test_user(false)),
            Err(AppError::Forbidden(_))
        ));
    }
}
