//! Reply endpoints.

use axum::{Json, Router, extract::State, routing::post};
use buzz_common::AppResult;
use buzz_db::entities::{reply, vote};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, Voter},
    middleware::AppState,
    response::ApiResponse,
};

/// Reply response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub id: String,
    pub thread_id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub votes: i64,
    pub created_at: String,
}

impl From<reply::Model> for ReplyResponse {
    fn from(model: reply::Model) -> Self {
        Self {
            id: model.id,
            thread_id: model.thread_id,
            author_id: model.author_id,
            author_name: model.author_name,
            author_avatar: model.author_avatar,
            content: model.content,
            image_url: model.image_url,
            votes: model.votes,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Create reply request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    pub thread_id: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// Post a reply.
async fn create_reply(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateReplyRequest>,
) -> AppResult<ApiResponse<ReplyResponse>> {
    let input = buzz_core::reply::CreateReplyInput {
        content: req.content,
        image_url: req.image_url,
    };
    let reply = state
        .reply_service
        .create(&user, &req.thread_id, input)
        .await?;
    Ok(ApiResponse::ok(reply.into()))
}

/// List replies request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRepliesRequest {
    pub thread_id: String,
}

/// List replies in a thread.
async fn list_replies(
    State(state): State<AppState>,
    Json(req): Json<ListRepliesRequest>,
) -> AppResult<ApiResponse<Vec<ReplyResponse>>> {
    let replies = state.reply_service.list(&req.thread_id).await?;
    Ok(ApiResponse::ok(replies.into_iter().map(Into::into).collect()))
}

/// Update reply request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReplyRequest {
    pub reply_id: String,
    pub content: String,
}

/// Edit a reply (author only).
async fn update_reply(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateReplyRequest>,
) -> AppResult<ApiResponse<ReplyResponse>> {
    let reply = state
        .reply_service
        .update(&user, &req.reply_id, req.content)
        .await?;
    Ok(ApiResponse::ok(reply.into()))
}

/// Delete reply request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReplyRequest {
    pub reply_id: String,
}

/// Delete a reply (author or admin).
async fn delete_reply(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteReplyRequest>,
) -> AppResult<ApiResponse<()>> {
    state.reply_service.delete(&user, &req.reply_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReplyRequest {
    pub reply_id: String,
    pub choice: vote::Choice,
}

/// Vote response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReplyResponse {
    pub voter_id: String,
    pub choice: vote::Choice,
}

/// Cast a write-once vote on a reply.
async fn vote_reply(
    Voter(voter): Voter,
    State(state): State<AppState>,
    Json(req): Json<VoteReplyRequest>,
) -> AppResult<ApiResponse<VoteReplyResponse>> {
    let entry = state
        .ballot_service
        .cast_reply_vote(&voter, &req.reply_id, req.choice)
        .await?;

    Ok(ApiResponse::ok(VoteReplyResponse {
        voter_id: entry.voter_id,
        choice: entry.choice,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_reply))
        .route("/list", post(list_replies))
        .route("/update", post(update_reply))
        .route("/delete", post(delete_reply))
        .route("/vote", post(vote_reply))
}
