//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use buzz_common::IdGenerator;
use buzz_core::{SessionContext, VoterId};
use buzz_db::entities::user;

/// Authenticated user extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get user from request extensions (set by auth middleware)
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

/// Optional authenticated user extractor.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<user::Model>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<user::Model>().cloned()))
    }
}

/// Voter identity extractor.
///
/// Authenticated requests vote as the user; anonymous requests vote under
/// the guest identity replayed in the `x-guest-id` header, or a freshly
/// issued one. Endpoints echo the identity back so the client can persist
/// a new guest ID across sessions.
#[derive(Debug, Clone)]
pub struct Voter(pub VoterId);

impl<S> FromRequestParts<S> for Voter
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<user::Model>().cloned();
        let guest_id = parts
            .headers
            .get("x-guest-id")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let session = SessionContext::new(user, guest_id);
        Ok(Self(session.resolve_voter(&IdGenerator::new())))
    }
}
