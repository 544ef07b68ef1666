//! Poll endpoints.

use axum::{Json, Router, extract::State, routing::post};
use buzz_common::AppResult;
use buzz_core::{PollWithStatus, vote_share};
use buzz_db::entities::poll;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, Voter},
    middleware::AppState,
    response::ApiResponse,
};

/// Poll summary response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub creator_name: String,
    pub total_votes: i32,
    pub created_at: String,
}

impl From<poll::Model> for PollResponse {
    fn from(model: poll::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            image_url: model.image_url,
            creator_name: model.creator_name,
            total_votes: model.total_votes,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Poll option response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionResponse {
    pub text: String,
    pub votes: i32,
    pub percentage: f64,
    pub is_chosen: bool,
}

/// Poll detail response with the caller's current choice.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollDetailResponse {
    #[serde(flatten)]
    pub poll: PollResponse,
    pub options: Vec<PollOptionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_choice: Option<i32>,
}

fn detail_response(status: PollWithStatus) -> PollDetailResponse {
    let total = status.poll.total_votes;
    let options = status
        .options
        .iter()
        .map(|option| PollOptionResponse {
            text: option.text.clone(),
            votes: option.votes,
            percentage: vote_share(option.votes, total),
            is_chosen: status.voter_choice == Some(option.idx),
        })
        .collect();

    PollDetailResponse {
        poll: status.poll.into(),
        options,
        my_choice: status.voter_choice,
    }
}

/// Create poll request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    pub title: String,
    pub options: Vec<String>,
    pub image_url: Option<String>,
}

/// Create a poll.
async fn create_poll(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePollRequest>,
) -> AppResult<ApiResponse<PollResponse>> {
    let input = buzz_core::poll::CreatePollInput {
        title: req.title,
        options: req.options,
        image_url: req.image_url,
    };
    let poll = state.poll_service.create(&user, input).await?;
    Ok(ApiResponse::ok(poll.into()))
}

/// List polls request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPollsRequest {
    pub limit: Option<u64>,
    pub until_id: Option<String>,
}

/// List polls, newest first.
async fn list_polls(
    State(state): State<AppState>,
    Json(req): Json<ListPollsRequest>,
) -> AppResult<ApiResponse<Vec<PollResponse>>> {
    let polls = state
        .poll_service
        .list(req.limit.unwrap_or(20).min(100), req.until_id.as_deref())
        .await?;
    Ok(ApiResponse::ok(polls.into_iter().map(Into::into).collect()))
}

/// Show poll request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPollRequest {
    pub poll_id: String,
}

/// Get poll details with the caller's current choice.
async fn show_poll(
    Voter(voter): Voter,
    State(state): State<AppState>,
    Json(req): Json<ShowPollRequest>,
) -> AppResult<ApiResponse<PollDetailResponse>> {
    let status = state
        .poll_service
        .get_with_status(&req.poll_id, Some(&voter))
        .await?;
    Ok(ApiResponse::ok(detail_response(status)))
}

/// Vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePollRequest {
    pub poll_id: String,
    pub choice: i32,
}

/// Poll vote response.
///
/// `voter_id` echoes the identity the vote was recorded under so clients
/// can persist a freshly issued guest identity.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePollResponse {
    pub voter_id: String,
    #[serde(flatten)]
    pub poll: PollDetailResponse,
}

/// Vote on a poll. Voting again moves the caller's vote.
async fn vote_poll(
    Voter(voter): Voter,
    State(state): State<AppState>,
    Json(req): Json<VotePollRequest>,
) -> AppResult<ApiResponse<VotePollResponse>> {
    state
        .poll_service
        .vote(&voter, &req.poll_id, req.choice)
        .await?;

    let status = state
        .poll_service
        .get_with_status(&req.poll_id, Some(&voter))
        .await?;

    Ok(ApiResponse::ok(VotePollResponse {
        voter_id: voter.key().to_string(),
        poll: detail_response(status),
    }))
}

/// Delete poll request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePollRequest {
    pub poll_id: String,
}

/// Delete a poll (creator or admin).
async fn delete_poll(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeletePollRequest>,
) -> AppResult<ApiResponse<()>> {
    state.poll_service.delete(&user, &req.poll_id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_poll))
        .route("/list", post(list_polls))
        .route("/show", post(show_poll))
        .route("/vote", post(vote_poll))
        .route("/delete", post(delete_poll))
}
