//! Feedback and report intake service.

use buzz_common::{AppError, AppResult, IdGenerator};
use buzz_db::{
    entities::submission::{self, Kind, Status},
    repositories::SubmissionRepository,
};
use chrono::Utc;
use sea_orm::Set;
use validator::Validate;

/// Feedback service for business logic.
#[derive(Clone)]
pub struct FeedbackService {
    submission_repo: SubmissionRepository,
    id_gen: IdGenerator,
}

/// Input for submitting feedback, a report, or a contact message.
#[derive(Debug, Validate)]
pub struct CreateSubmissionInput {
    pub kind: Kind,

    #[validate(length(min = 1, max = 256))]
    pub subject: String,

    #[validate(length(min = 1, max = 10_000))]
    pub message: String,

    #[validate(length(max = 64))]
    pub category: Option<String>,

    #[validate(length(max = 64))]
    pub report_type: Option<String>,

    #[validate(length(max = 10_000))]
    pub report_details: Option<String>,

    #[validate(length(max = 16))]
    pub priority: Option<String>,

    /// Submitter, if authenticated.
    pub user_id: Option<String>,

    #[validate(email)]
    pub email: Option<String>,
}

impl FeedbackService {
    /// Create a new feedback service.
    #[must_use]
    pub const fn new(submission_repo: SubmissionRepository) -> Self {
        Self {
            submission_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit feedback. Anonymous submissions are accepted.
    pub async fn submit(&self, input: CreateSubmissionInput) -> AppResult<submission::Model> {
        input.validate()?;

        // Reports must say what is being reported
        if input.kind == Kind::Report {
            if input.report_type.as_deref().is_none_or(str::is_empty) {
                return Err(AppError::BadRequest(
                    "Reports must include a report type".to_string(),
                ));
            }
            if input.report_details.as_deref().is_none_or(str::is_empty) {
                return Err(AppError::BadRequest(
                    "Reports must include details".to_string(),
                ));
            }
        }

        let model = submission::ActiveModel {
            id: Set(self.id_gen.generate()),
            kind: Set(input.kind),
            subject: Set(input.subject),
            message: Set(input.message),
            category: Set(input.category),
            report_type: Set(input.report_type),
            report_details: Set(input.report_details),
            priority: Set(input.priority.unwrap_or_else(|| "normal".to_string())),
            user_id: Set(input.user_id),
            email: Set(input.email),
            status: Set(Status::Pending),
            created_at: Set(Utc::now().into()),
        };

        self.submission_repo.create(model).await
    }

    /// List submissions for review, newest first.
    pub async fn list(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<submission::Model>> {
        self.submission_repo.list(limit, until_id).await
    }

    /// Move a submission to a new review status.
    pub async fn set_status(&self, id: &str, status: Status) -> AppResult<submission::Model> {
        let submission = self.submission_repo.get_by_id(id).await?;
        let mut active: submission::ActiveModel = submission.into();
        active.status = Set(status);
        self.submission_repo.update(active).await
    }

    /// Delete a submission.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.submission_repo.get_by_id(id).await?;
        self.submission_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service(db: MockDatabase) -> FeedbackService {
        FeedbackService::new(SubmissionRepository::new(Arc::new(db.into_connection())))
    }

    fn base_input(kind: Kind) -> CreateSubmissionInput {
        CreateSubmissionInput {
            kind,
            subject: "Subject".to_string(),
            message: "Message".to_string(),
            category: None,
            report_type: None,
            report_details: None,
            priority: None,
            user_id: None,
            email: None,
        }
    }

    #[tokio::test]
    async fn test_report_requires_type_and_details() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));

        let result = svc.submit(base_input(Kind::Report)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let mut input = base_input(Kind::Report);
        input.report_type = Some("spam".to_string());
        let result = svc.submit(input).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_subject() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));
        let mut input = base_input(Kind::Feedback);
        input.subject = String::new();

        let result = svc.submit(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_set_status_missing_submission() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<submission::Model>::new()]);
        let svc = service(db);

        let result = svc.set_status("missing", Status::Reviewed).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
