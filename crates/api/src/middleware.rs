//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use buzz_core::{
    AdminService, BallotService, CommentService, CommunityService, FeedbackService, PollService,
    PostService, ReplyService, ThreadService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub thread_service: ThreadService,
    pub reply_service: ReplyService,
    pub ballot_service: BallotService,
    pub community_service: CommunityService,
    pub post_service: PostService,
    pub comment_service: CommentService,
    pub poll_service: PollService,
    pub feedback_service: FeedbackService,
    pub admin_service: AdminService,
}

/// Authentication middleware.
///
/// Resolves a Bearer token to a user and stashes it in request extensions
/// for the extractors. Requests without a valid token pass through
/// unauthenticated.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.user_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
