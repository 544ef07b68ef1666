//! Admin panel endpoints.

use axum::{Json, Router, extract::State, routing::post};
use buzz_common::AppResult;
use buzz_core::{AdminCollection, AdminListing, AdminOverview};
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Per-collection row counts.
async fn overview(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AdminOverview>> {
    let overview = state.admin_service.overview(&user).await?;
    Ok(ApiResponse::ok(overview))
}

/// List request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    /// One of `users`, `threads`, `communities`, `polls`, `submissions`.
    pub collection: String,
    pub limit: Option<u64>,
    pub until_id: Option<String>,
}

/// List one collection, newest first.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListRequest>,
) -> AppResult<ApiResponse<AdminListing>> {
    let collection = AdminCollection::parse(&req.collection)?;
    let listing = state
        .admin_service
        .list(
            &user,
            collection,
            req.limit.unwrap_or(50).min(200),
            req.until_id.as_deref(),
        )
        .await?;
    Ok(ApiResponse::ok(listing))
}

/// Delete request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub collection: String,
    pub id: String,
}

/// Delete one item from a collection.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> AppResult<ApiResponse<()>> {
    let collection = AdminCollection::parse(&req.collection)?;
    state.admin_service.delete(&user, collection, &req.id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", post(overview))
        .route("/list", post(list))
        .route("/delete", post(delete))
}
