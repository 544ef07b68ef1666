//! Community post and comment endpoints.

use axum::{Json, Router, extract::State, routing::post};
use buzz_common::AppResult;
use buzz_db::entities::{comment, post, vote};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, Voter},
    middleware::AppState,
    response::ApiResponse,
};

/// Post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub community_id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub views: i64,
    pub comment_count: i32,
    pub created_at: String,
}

impl From<post::Model> for PostResponse {
    fn from(model: post::Model) -> Self {
        Self {
            id: model.id,
            community_id: model.community_id,
            author_id: model.author_id,
            author_name: model.author_name,
            author_avatar: model.author_avatar,
            content: model.content,
            image_url: model.image_url,
            upvotes: model.upvotes,
            downvotes: model.downvotes,
            views: model.views,
            comment_count: model.comment_count,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Comment response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub content: String,
    pub created_at: String,
}

impl From<comment::Model> for CommentResponse {
    fn from(model: comment::Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            author_id: model.author_id,
            author_name: model.author_name,
            author_avatar: model.author_avatar,
            content: model.content,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Create post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub community_id: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// Create a post in a community (members only).
async fn create_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let input = buzz_core::post::CreatePostInput {
        content: req.content,
        image_url: req.image_url,
    };
    let post = state
        .post_service
        .create(&user, &req.community_id, input)
        .await?;
    Ok(ApiResponse::ok(post.into()))
}

/// List posts request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsRequest {
    pub community_id: String,
    pub limit: Option<u64>,
    pub until_id: Option<String>,
}

/// List posts in a community, newest first.
async fn list_posts(
    State(state): State<AppState>,
    Json(req): Json<ListPostsRequest>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state
        .post_service
        .list(
            &req.community_id,
            req.limit.unwrap_or(20).min(100),
            req.until_id.as_deref(),
        )
        .await?;
    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Show post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPostRequest {
    pub post_id: String,
}

/// Post detail response with comments and the caller's vote state.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_vote: Option<vote::Choice>,
}

/// Open a post. Records the view.
async fn show_post(
    Voter(voter): Voter,
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> AppResult<ApiResponse<PostDetailResponse>> {
    let post = state.post_service.open(&req.post_id).await?;
    let comments = state.comment_service.list(&req.post_id).await?;
    let my_vote = state
        .ballot_service
        .find_choice(&voter, vote::TargetKind::Post, &req.post_id)
        .await?;

    Ok(ApiResponse::ok(PostDetailResponse {
        post: post.into(),
        comments: comments.into_iter().map(Into::into).collect(),
        my_vote,
    }))
}

/// Update post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub post_id: String,
    pub content: String,
}

/// Edit a post (author only).
async fn update_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state
        .post_service
        .update(&user, &req.post_id, req.content)
        .await?;
    Ok(ApiResponse::ok(post.into()))
}

/// Delete post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequest {
    pub post_id: String,
}

/// Delete a post (author or admin).
async fn delete_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeletePostRequest>,
) -> AppResult<ApiResponse<()>> {
    state.post_service.delete(&user, &req.post_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePostRequest {
    pub post_id: String,
    pub choice: vote::Choice,
}

/// Vote response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePostResponse {
    pub voter_id: String,
    pub choice: vote::Choice,
    pub upvotes: i64,
    pub downvotes: i64,
}

/// Cast a write-once vote on a post (authenticated users only).
async fn vote_post(
    Voter(voter): Voter,
    State(state): State<AppState>,
    Json(req): Json<VotePostRequest>,
) -> AppResult<ApiResponse<VotePostResponse>> {
    let entry = state
        .ballot_service
        .cast_post_vote(&voter, &req.post_id, req.choice)
        .await?;
    let post = state.post_service.get(&req.post_id).await?;

    Ok(ApiResponse::ok(VotePostResponse {
        voter_id: entry.voter_id,
        choice: entry.choice,
        upvotes: post.upvotes,
        downvotes: post.downvotes,
    }))
}

/// Create comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: String,
    pub content: String,
}

/// Comment on a post (members only).
async fn create_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state
        .comment_service
        .create(&user, &req.post_id, req.content)
        .await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Update comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub comment_id: String,
    pub content: String,
}

/// Edit a comment (author only).
async fn update_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateCommentRequest>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state
        .comment_service
        .update(&user, &req.comment_id, req.content)
        .await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Delete comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub comment_id: String,
}

/// Delete a comment (author or admin).
async fn delete_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteCommentRequest>,
) -> AppResult<ApiResponse<()>> {
    state.comment_service.delete(&user, &req.comment_id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_post))
        .route("/list", post(list_posts))
        .route("/show", post(show_post))
        .route("/update", post(update_post))
        .route("/delete", post(delete_post))
        .route("/vote", post(vote_post))
        .route("/comments/create", post(create_comment))
        .route("/comments/update", post(update_comment))
        .route("/comments/delete", post(delete_comment))
}
