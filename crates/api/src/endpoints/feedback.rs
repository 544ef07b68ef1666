//! Feedback and report endpoints.

use axum::{Json, Router, extract::State, routing::post};
use buzz_common::{AppError, AppResult};
use buzz_core::AdminService;
use buzz_db::entities::submission::{self, Kind, Status};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// Submission response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: String,
    pub kind: Kind,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_details: Option<String>,
    pub priority: String,
    pub status: Status,
    pub created_at: String,
}

impl From<submission::Model> for SubmissionResponse {
    fn from(model: submission::Model) -> Self {
        Self {
            id: model.id,
            kind: model.kind,
            subject: model.subject,
            message: model.message,
            category: model.category,
            report_type: model.report_type,
            report_details: model.report_details,
            priority: model.priority,
            status: model.status,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Submit request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub kind: Kind,
    pub subject: String,
    pub message: String,
    pub category: Option<String>,
    pub report_type: Option<String>,
    pub report_details: Option<String>,
    pub priority: Option<String>,
    pub email: Option<String>,
}

/// Submit feedback, a report, or a contact message.
/// Anonymous submissions are accepted.
async fn submit(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> AppResult<ApiResponse<SubmissionResponse>> {
    let input = buzz_core::feedback::CreateSubmissionInput {
        kind: req.kind,
        subject: req.subject,
        message: req.message,
        category: req.category,
        report_type: req.report_type,
        report_details: req.report_details,
        priority: req.priority,
        user_id: maybe_user.as_ref().map(|u| u.id.clone()),
        email: req
            .email
            .or_else(|| maybe_user.and_then(|u| u.email)),
    };

    let submission = state.feedback_service.submit(input).await?;
    Ok(ApiResponse::ok(submission.into()))
}

/// List submissions request (admins only).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubmissionsRequest {
    pub limit: Option<u64>,
    pub until_id: Option<String>,
}

/// List submissions for review.
async fn list_submissions(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListSubmissionsRequest>,
) -> AppResult<ApiResponse<Vec<SubmissionResponse>>> {
    AdminService::require_admin(&user)?;

    let submissions = state
        .feedback_service
        .list(req.limit.unwrap_or(20).min(100), req.until_id.as_deref())
        .await?;
    Ok(ApiResponse::ok(
        submissions.into_iter().map(Into::into).collect(),
    ))
}

/// Set status request (admins only).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusRequest {
    pub submission_id: String,
    /// One of `pending`, `reviewed`, `resolved`.
    pub status: String,
}

fn parse_status(status: &str) -> AppResult<Status> {
    match status {
        "pending" => Ok(Status::Pending),
        "reviewed" => Ok(Status::Reviewed),
        "resolved" => Ok(Status::Resolved),
        other => Err(AppError::BadRequest(format!("Unknown status: {other}"))),
    }
}

/// Move a submission to a new review status.
async fn set_status(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SetStatusRequest>,
) -> AppResult<ApiResponse<SubmissionResponse>> {
    AdminService::require_admin(&user)?;

    let status = parse_status(&req.status)?;
    let submission = state
        .feedback_service
        .set_status(&req.submission_id, status)
        .await?;
    Ok(ApiResponse::ok(submission.into()))
}

/// Delete submission request (admins only).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubmissionRequest {
    pub submission_id: String,
}

/// Delete a submission.
async fn delete_submission(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteSubmissionRequest>,
) -> AppResult<ApiResponse<()>> {
    AdminService::require_admin(&user)?;

    state.feedback_service.delete(&req.submission_id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit))
        .route("/list", post(list_submissions))
        .route("/set-status", post(set_status))
        .route("/delete", post(delete_submission))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("pending").unwrap(), Status::Pending);
        assert_eq!(parse_status("reviewed").unwrap(), Status::Reviewed);
        assert_eq!(parse_status("resolved").unwrap(), Status::Resolved);
        assert!(parse_status("archived").is_err());
    }
}
