//! Poll service.

use buzz_common::{AppError, AppResult, IdGenerator};
use buzz_db::{
    entities::{poll, poll_option, poll_vote, user},
    repositories::{PollOptionRepository, PollRepository, PollVoteRepository},
};
use chrono::Utc;
use sea_orm::Set;
use validator::Validate;

use crate::services::ballot::{PollVotePlan, plan_poll_vote};
use crate::services::session::VoterId;

/// Poll service for business logic.
#[derive(Clone)]
pub struct PollService {
    poll_repo: PollRepository,
    option_repo: PollOptionRepository,
    vote_repo: PollVoteRepository,
    id_gen: IdGenerator,
}

/// Input for creating a poll.
#[derive(Debug, Validate)]
pub struct CreatePollInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    pub options: Vec<String>,
    pub image_url: Option<String>,
}

/// A poll with its options and the caller's current choice.
pub struct PollWithStatus {
    pub poll: poll::Model,
    pub options: Vec<poll_option::Model>,
    pub voter_choice: Option<i32>,
}

/// Display share of an option, in percent.
///
/// A poll nobody has voted on shows 0% everywhere rather than dividing
/// by zero.
#[must_use]
pub fn vote_share(votes: i32, total_votes: i32) -> f64 {
    f64::from(votes.max(0)) * 100.0 / f64::from(total_votes.max(1))
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub const fn new(
        poll_repo: PollRepository,
        option_repo: PollOptionRepository,
        vote_repo: PollVoteRepository,
    ) -> Self {
        Self {
            poll_repo,
            option_repo,
            vote_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a poll.
    pub async fn create(&self, creator: &user::Model, input: CreatePollInput) -> AppResult<poll::Model> {
        input.validate()?;

        // Validate options
        if input.options.len() < 2 {
            return Err(AppError::BadRequest(
                "Poll must have at least 2 options".to_string(),
            ));
        }
        if input.options.len() > 10 {
            return Err(AppError::BadRequest(
                "Poll cannot have more than 10 options".to_string(),
            ));
        }
        for option in &input.options {
            if option.trim().is_empty() {
                return Err(AppError::BadRequest(
                    "Poll options cannot be empty".to_string(),
                ));
            }
            if option.len() > 100 {
                return Err(AppError::BadRequest(
                    "Poll option is too long (max 100 chars)".to_string(),
                ));
            }
        }

        let poll_id = self.id_gen.generate();
        let model = poll::ActiveModel {
            id: Set(poll_id.clone()),
            title: Set(input.title),
            image_url: Set(input.image_url),
            created_by: Set(creator.id.clone()),
            creator_name: Set(creator.username.clone()),
            total_votes: Set(0),
            created_at: Set(Utc::now().into()),
        };
        let created = self.poll_repo.create(model).await?;

        for (idx, text) in input.options.into_iter().enumerate() {
            let option = poll_option::ActiveModel {
                id: Set(self.id_gen.generate()),
                poll_id: Set(poll_id.clone()),
                idx: Set(idx as i32),
                text: Set(text),
                votes: Set(0),
            };
            self.option_repo.create(option).await?;
        }

        Ok(created)
    }

    /// List polls, newest first.
    pub async fn list(&self, limit: u64, until_id: Option<&str>) -> AppResult<Vec<poll::Model>> {
        self.poll_repo.list(limit, until_id).await
    }

    /// List polls created by a user.
    pub async fn find_by_creator(&self, user_id: &str) -> AppResult<Vec<poll::Model>> {
        self.poll_repo.find_by_creator(user_id).await
    }

    /// Get a poll with its options and the caller's current choice.
    pub async fn get_with_status(
        &self,
        poll_id: &str,
        voter: Option<&VoterId>,
    ) -> AppResult<PollWithStatus> {
        let poll = self.poll_repo.get_by_id(poll_id).await?;
        let options = self.option_repo.find_by_poll(poll_id).await?;

        let voter_choice = if let Some(voter) = voter {
            self.vote_repo
                .find_by_voter_and_poll(voter.key(), poll_id)
                .await?
                .map(|v| v.choice)
        } else {
            None
        };

        Ok(PollWithStatus {
            poll,
            options,
            voter_choice,
        })
    }

    /// Vote on a poll, switching the voter's choice if one is already held.
    ///
    /// First votes credit the chosen option and the distinct-voter counter;
    /// switches debit the old option (floored at 0) and credit the new one,
    /// leaving the counter untouched; re-voting the held option is a no-op
    /// success. Counter bumps are single atomic UPDATEs.
    pub async fn vote(&self, voter: &VoterId, poll_id: &str, choice: i32) -> AppResult<()> {
        let poll = self.poll_repo.get_by_id(poll_id).await?;
        let options = self.option_repo.find_by_poll(&poll.id).await?;

        let prior = self
            .vote_repo
            .find_by_voter_and_poll(voter.key(), &poll.id)
            .await?;

        match plan_poll_vote(prior.as_ref().map(|v| v.choice), choice, options.len())? {
            PollVotePlan::First { choice } => {
                let model = poll_vote::ActiveModel {
                    id: Set(self.id_gen.generate()),
                    poll_id: Set(poll.id.clone()),
                    voter_id: Set(voter.key().to_string()),
                    choice: Set(choice),
                    created_at: Set(Utc::now().into()),
                    updated_at: Set(None),
                };
                self.vote_repo.create(model).await?;
                self.option_repo.increment_votes(&poll.id, choice).await?;
                self.poll_repo.increment_total_votes(&poll.id).await?;
                tracing::debug!(poll_id = %poll.id, choice, "Recorded first poll vote");
            }
            PollVotePlan::Switch { from, to } => {
                // prior is Some by construction of the plan
                let Some(prior) = prior else {
                    return Err(AppError::Internal("Vote switch without prior vote".to_string()));
                };
                let mut active: poll_vote::ActiveModel = prior.into();
                active.choice = Set(to);
                active.updated_at = Set(Some(Utc::now().into()));
                self.vote_repo.update(active).await?;

                self.option_repo.decrement_votes(&poll.id, from).await?;
                self.option_repo.increment_votes(&poll.id, to).await?;
                tracing::debug!(poll_id = %poll.id, from, to, "Switched poll vote");
            }
            PollVotePlan::NoOp => {}
        }

        Ok(())
    }

    /// Delete a poll. Only the creator or an admin may delete.
    pub async fn delete(&self, actor: &user::Model, poll_id: &str) -> AppResult<()> {
        let poll = self.poll_repo.get_by_id(poll_id).await?;
        if poll.created_by != actor.id && !actor.is_admin {
            return Err(AppError::Forbidden(
                "Only the creator can delete this poll".to_string(),
            ));
        }
        // Options and vote rows cascade with the poll
        self.poll_repo.delete(poll_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service(poll_db: MockDatabase, option_db: MockDatabase, vote_db: MockDatabase) -> PollService {
        PollService::new(
            PollRepository::new(Arc::new(poll_db.into_connection())),
            PollOptionRepository::new(Arc::new(option_db.into_connection())),
            PollVoteRepository::new(Arc::new(vote_db.into_connection())),
        )
    }

    fn test_poll(id: &str, total_votes: i32) -> poll::Model {
        poll::Model {
            id: id.to_string(),
            title: "Best color?".to_string(),
            image_url: None,
            created_by: "u1".to_string(),
            creator_name: "creator".to_string(),
            total_votes,
            created_at: Utc::now().into(),
        }
    }

    fn test_option(poll_id: &str, idx: i32, text: &str, votes: i32) -> poll_option::Model {
        poll_option::Model {
            id: format!("o{idx}"),
            poll_id: poll_id.to_string(),
            idx,
            text: text.to_string(),
            votes,
        }
    }

    // Percentage display

    #[test]
    fn test_vote_share_zero_total_is_zero_percent() {
        assert_eq!(vote_share(0, 0), 0.0);
    }

    #[test]
    fn test_vote_share_is_finite_for_any_input() {
        assert!(vote_share(0, 0).is_finite());
        assert!(vote_share(-1, -1).is_finite());
    }

    #[test]
    fn test_vote_share_basic() {
        assert_eq!(vote_share(1, 2), 50.0);
        assert_eq!(vote_share(2, 2), 100.0);
    }

    // Decision logic (scenarios A/B and switch conservation)

    #[test]
    fn test_first_vote_plan() {
        // Scenario A: fresh voter picks option 0
        let plan = plan_poll_vote(None, 0, 2).unwrap();
        assert_eq!(plan, PollVotePlan::First { choice: 0 });
    }

    #[test]
    fn test_switch_plan() {
        // Scenario B: the same voter moves to option 1
        let plan = plan_poll_vote(Some(0), 1, 2).unwrap();
        assert_eq!(plan, PollVotePlan::Switch { from: 0, to: 1 });
    }

    #[test]
    fn test_self_switch_is_noop() {
        let plan = plan_poll_vote(Some(1), 1, 2).unwrap();
        assert_eq!(plan, PollVotePlan::NoOp);
    }

    #[test]
    fn test_invalid_choice_rejected() {
        assert!(plan_poll_vote(None, 2, 2).is_err());
        assert!(plan_poll_vote(None, -1, 2).is_err());
        assert!(plan_poll_vote(Some(0), 5, 2).is_err());
    }

    #[test]
    fn test_vote_plans_conserve_totals() {
        // Apply a history of plans to in-memory counters and check that
        // option totals track the voter counter and never go negative.
        let mut options = vec![0i32; 3];
        let mut total = 0i32;
        let mut held: Option<i32> = None;

        for choice in [0, 2, 2, 1, 0, 0, 1] {
            match plan_poll_vote(held, choice, options.len()).unwrap() {
                PollVotePlan::First { choice } => {
                    options[choice as usize] += 1;
                    total += 1;
                    held = Some(choice);
                }
                PollVotePlan::Switch { from, to } => {
                    options[from as usize] = (options[from as usize] - 1).max(0);
                    options[to as usize] += 1;
                    held = Some(to);
                }
                PollVotePlan::NoOp => {}
            }
            assert_eq!(options.iter().sum::<i32>(), total);
            assert!(options.iter().all(|v| *v >= 0));
            assert_eq!(total, 1); // one voter, counted once
        }
        assert_eq!(held, Some(1));
    }

    // Poll creation validation

    fn creator() -> user::Model {
        user::Model {
            id: "u1".to_string(),
            username: "creator".to_string(),
            username_lower: "creator".to_string(),
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

    #[tokio::test]
    async fn test_create_rejects_single_option() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );
        let input = CreatePollInput {
            title: "Best color?".to_string(),
            options: vec!["Red".to_string()],
            image_url: None,
        };
        let result = svc.create(&creator(), input).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_option() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );
        let input = CreatePollInput {
            title: "Best color?".to_string(),
            options: vec!["Red".to_string(), "   ".to_string()],
            image_url: None,
        };
        let result = svc.create(&creator(), input).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_too_many_options() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );
        let input = CreatePollInput {
            title: "Best color?".to_string(),
            options: (0..11).map(|i| format!("Option {i}")).collect(),
            image_url: None,
        };
        let result = svc.create(&creator(), input).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    // Vote error paths

    #[tokio::test]
    async fn test_vote_poll_not_found() {
        let poll_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<poll::Model>::new()]);
        let svc = service(
            poll_db,
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );
        let voter = VoterId::Guest("guest-x".to_string());

        let result = svc.vote(&voter, "missing", 0).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_vote_invalid_choice() {
        let poll_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_poll("p1", 0)]]);
        let option_db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[
            test_option("p1", 0, "Red", 0),
            test_option("p1", 1, "Blue", 0),
        ]]);
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<poll_vote::Model>::new()]);

        let svc = service(poll_db, option_db, vote_db);
        let voter = VoterId::Guest("guest-x".to_string());

        let result = svc.vote(&voter, "p1", 5).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_self_switch_vote_succeeds_without_writes() {
        let poll_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_poll("p1", 1)]]);
        let option_db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[
            test_option("p1", 0, "Red", 1),
            test_option("p1", 1, "Blue", 0),
        ]]);
        let existing = poll_vote::Model {
            id: "pv1".to_string(),
            poll_id: "p1".to_string(),
            voter_id: "guest-x".to_string(),
            choice: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        };
        let vote_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]]);

        let svc = service(poll_db, option_db, vote_db);
        let voter = VoterId::Guest("guest-x".to_string());

        // No exec results are mocked: the no-op path must not touch counters
        svc.vote(&voter, "p1", 0).await.unwrap();
    }
}
