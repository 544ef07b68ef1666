//! Thread endpoints.

use axum::{Json, Router, extract::State, routing::post};
use buzz_common::AppResult;
use buzz_db::{
    entities::{thread, vote},
    repositories::ThreadSort,
};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, Voter},
    middleware::AppState,
    response::ApiResponse,
};

/// Thread response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub views: i64,
    pub votes: i64,
    pub reply_count: i32,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_replied_at: Option<String>,
}

impl From<thread::Model> for ThreadResponse {
    fn from(model: thread::Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            author_name: model.author_name,
            author_avatar: model.author_avatar,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
            views: model.views,
            votes: model.votes,
            reply_count: model.reply_count,
            created_at: model.created_at.to_rfc3339(),
            last_replied_at: model.last_replied_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Create thread request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadRequest {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Start a new discussion.
async fn create_thread(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateThreadRequest>,
) -> AppResult<ApiResponse<ThreadResponse>> {
    let input = buzz_core::thread::CreateThreadInput {
        title: req.title,
        description: req.description,
        image_url: req.image_url,
    };
    let thread = state.thread_service.create(&user, input).await?;
    Ok(ApiResponse::ok(thread.into()))
}

/// List threads request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListThreadsRequest {
    /// One of `newest`, `top`, `replies`, `trending`.
    pub sort: Option<String>,
    pub limit: Option<u64>,
    pub until_id: Option<String>,
}

fn parse_sort(sort: Option<&str>) -> ThreadSort {
    match sort {
        Some("top") => ThreadSort::TopVoted,
        Some("replies") => ThreadSort::MostReplied,
        Some("trending") => ThreadSort::Trending,
        _ => ThreadSort::Newest,
    }
}

/// List discussions.
async fn list_threads(
    State(state): State<AppState>,
    Json(req): Json<ListThreadsRequest>,
) -> AppResult<ApiResponse<Vec<ThreadResponse>>> {
    let threads = state
        .thread_service
        .list(
            parse_sort(req.sort.as_deref()),
            req.limit.unwrap_or(20).min(100),
            req.until_id.as_deref(),
        )
        .await?;
    Ok(ApiResponse::ok(threads.into_iter().map(Into::into).collect()))
}

/// Show thread request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowThreadRequest {
    pub thread_id: String,
}

/// Thread detail response with the caller's vote state.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDetailResponse {
    #[serde(flatten)]
    pub thread: ThreadResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_vote: Option<vote::Choice>,
}

/// Open a discussion. Records the view.
async fn show_thread(
    Voter(voter): Voter,
    State(state): State<AppState>,
    Json(req): Json<ShowThreadRequest>,
) -> AppResult<ApiResponse<ThreadDetailResponse>> {
    let thread = state.thread_service.open(&req.thread_id).await?;
    let my_vote = state
        .ballot_service
        .find_choice(&voter, vote::TargetKind::Thread, &req.thread_id)
        .await?;

    Ok(ApiResponse::ok(ThreadDetailResponse {
        thread: thread.into(),
        my_vote,
    }))
}

/// Update thread request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThreadRequest {
    pub thread_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Edit a discussion (author only).
async fn update_thread(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateThreadRequest>,
) -> AppResult<ApiResponse<ThreadResponse>> {
    let input = buzz_core::thread::UpdateThreadInput {
        title: req.title,
        description: req.description,
    };
    let thread = state
        .thread_service
        .update(&user, &req.thread_id, input)
        .await?;
    Ok(ApiResponse::ok(thread.into()))
}

/// Delete thread request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteThreadRequest {
    pub thread_id: String,
}

/// Delete a discussion (author or admin).
async fn delete_thread(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteThreadRequest>,
) -> AppResult<ApiResponse<()>> {
    state.thread_service.delete(&user, &req.thread_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteThreadRequest {
    pub thread_id: String,
    pub choice: vote::Choice,
}

/// Vote response.
///
/// `voter_id` echoes the identity the vote was recorded under so clients
/// can persist a freshly issued guest identity.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteThreadResponse {
    pub voter_id: String,
    pub choice: vote::Choice,
    pub votes: i64,
}

/// Cast a write-once vote on a discussion.
async fn vote_thread(
    Voter(voter): Voter,
    State(state): State<AppState>,
    Json(req): Json<VoteThreadRequest>,
) -> AppResult<ApiResponse<VoteThreadResponse>> {
    let entry = state
        .ballot_service
        .cast_thread_vote(&voter, &req.thread_id, req.choice)
        .await?;
    let thread = state.thread_service.get(&req.thread_id).await?;

    Ok(ApiResponse::ok(VoteThreadResponse {
        voter_id: entry.voter_id,
        choice: entry.choice,
        votes: thread.votes,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_thread))
        .route("/list", post(list_threads))
        .route("/show", post(show_thread))
        .route("/update", post(update_thread))
        .route("/delete", post(delete_thread))
        .route("/vote", post(vote_thread))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort(Some("top")), ThreadSort::TopVoted);
        assert_eq!(parse_sort(Some("replies")), ThreadSort::MostReplied);
        assert_eq!(parse_sort(Some("trending")), ThreadSort::Trending);
        assert_eq!(parse_sort(Some("newest")), ThreadSort::Newest);
        assert_eq!(parse_sort(Some("bogus")), ThreadSort::Newest);
        assert_eq!(parse_sort(None), ThreadSort::Newest);
    }
}
