//! API endpoints.

mod admin;
mod auth;
mod communities;
mod feedback;
mod polls;
mod posts;
mod replies;
mod threads;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/threads", threads::router())
        .nest("/replies", replies::router())
        .nest("/communities", communities::router())
        .nest("/posts", posts::router())
        .nest("/polls", polls::router())
        .nest("/feedback", feedback::router())
        .nest("/admin", admin::router())
}
