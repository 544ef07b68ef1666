//! User profile endpoints.

use axum::{Json, Router, extract::State, routing::post};
use buzz_common::AppResult;
use buzz_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::communities::CommunityResponse,
    endpoints::polls::PollResponse,
    endpoints::threads::ThreadResponse,
    extractors::AuthUser,
    middleware::AppState,
    response::ApiResponse,
};

/// Public user response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            profile_image: model.profile_image,
            bio: model.bio,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Show profile request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowProfileRequest {
    pub username: String,
}

/// Profile page response: the user plus what they have created and joined.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub threads: Vec<ThreadResponse>,
    pub communities: Vec<CommunityResponse>,
    pub polls: Vec<PollResponse>,
}

/// Show a public profile.
async fn show_profile(
    State(state): State<AppState>,
    Json(req): Json<ShowProfileRequest>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let user = state.user_service.get_by_username(&req.username).await?;

    let threads = state.thread_service.find_by_author(&user.id).await?;
    let communities = state.community_service.find_by_member(&user.id).await?;
    let polls = state.poll_service.find_by_creator(&user.id).await?;

    Ok(ApiResponse::ok(ProfileResponse {
        user: user.into(),
        threads: threads.into_iter().map(Into::into).collect(),
        communities: communities.into_iter().map(Into::into).collect(),
        polls: polls.into_iter().map(Into::into).collect(),
    }))
}

/// Current-user response.
async fn me(AuthUser(user): AuthUser) -> AppResult<ApiResponse<UserResponse>> {
    Ok(ApiResponse::ok(user.into()))
}

/// Update profile request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

/// Update the caller's profile.
async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let input = buzz_core::user::UpdateProfileInput {
        bio: req.bio,
        profile_image: req.profile_image,
    };
    let updated = state.user_service.update_profile(&user.id, input).await?;
    Ok(ApiResponse::ok(updated.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/show", post(show_profile))
        .route("/me", post(me))
        .route("/update-profile", post(update_profile))
}
