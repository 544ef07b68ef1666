//! Community endpoints.

use axum::{Json, Router, extract::State, routing::post};
use buzz_common::AppResult;
use buzz_db::entities::community;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// Community response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub creator_id: String,
    pub members_count: i64,
    pub created_at: String,
}

impl From<community::Model> for CommunityResponse {
    fn from(model: community::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            creator_id: model.creator_id,
            members_count: model.members_count,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Create community request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Create a community.
async fn create_community(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCommunityRequest>,
) -> AppResult<ApiResponse<CommunityResponse>> {
    let input = buzz_core::community::CreateCommunityInput {
        name: req.name,
        description: req.description,
    };
    let community = state.community_service.create(&user, input).await?;
    Ok(ApiResponse::ok(community.into()))
}

/// List communities request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommunitiesRequest {
    pub limit: Option<u64>,
    pub until_id: Option<String>,
}

/// List communities, newest first.
async fn list_communities(
    State(state): State<AppState>,
    Json(req): Json<ListCommunitiesRequest>,
) -> AppResult<ApiResponse<Vec<CommunityResponse>>> {
    let communities = state
        .community_service
        .list(req.limit.unwrap_or(20).min(100), req.until_id.as_deref())
        .await?;
    Ok(ApiResponse::ok(
        communities.into_iter().map(Into::into).collect(),
    ))
}

/// Show community request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowCommunityRequest {
    pub community_id: String,
}

/// Community detail response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDetailResponse {
    #[serde(flatten)]
    pub community: CommunityResponse,
    pub is_member: bool,
}

/// Show a community and whether the caller belongs to it.
async fn show_community(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowCommunityRequest>,
) -> AppResult<ApiResponse<CommunityDetailResponse>> {
    let community = state.community_service.get(&req.community_id).await?;

    let is_member = if let Some(user) = maybe_user {
        state
            .community_service
            .is_member(&req.community_id, &user.id)
            .await?
    } else {
        false
    };

    Ok(ApiResponse::ok(CommunityDetailResponse {
        community: community.into(),
        is_member,
    }))
}

/// Join/leave request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub community_id: String,
}

/// Join a community.
async fn join_community(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MembershipRequest>,
) -> AppResult<ApiResponse<()>> {
    state.community_service.join(&user, &req.community_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Leave a community.
async fn leave_community(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MembershipRequest>,
) -> AppResult<ApiResponse<()>> {
    state.community_service.leave(&user, &req.community_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Delete a community (creator or admin).
async fn delete_community(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MembershipRequest>,
) -> AppResult<ApiResponse<()>> {
    state.community_service.delete(&user, &req.community_id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_community))
        .route("/list", post(list_communities))
        .route("/show", post(show_community))
        .route("/join", post(join_community))
        .route("/leave", post(leave_community))
        .route("/delete", post(delete_community))
}
