//! Session context and voter identity.
//!
//! The forum accepts votes from users who never sign up. Those voters get a
//! server-issued `guest-` pseudo-identity which the client persists and
//! replays on later requests, so anonymous voting eligibility is tracked
//! per device instead of collapsing every guest into one identity.

use buzz_common::{IdGenerator, is_guest_id};
use buzz_db::entities::user;

/// A stable voter identity: an authenticated user or a persistent guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoterId {
    /// Authenticated user ID.
    User(String),
    /// Guest pseudo-identity (`guest-` prefixed).
    Guest(String),
}

impl VoterId {
    /// The ledger key this identity votes under.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::User(id) | Self::Guest(id) => id,
        }
    }

    /// Whether this is an authenticated user.
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

/// Per-request session context with an explicit resolve lifecycle.
///
/// Built once at the edge of a request from the authenticated user (if any)
/// and the client-replayed guest identity (if any); the resolved voter
/// identity is handed to services rather than read from ambient state.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user: Option<user::Model>,
    guest_id: Option<String>,
}

impl SessionContext {
    /// Build a session context from request credentials.
    ///
    /// A replayed guest identity is only trusted if it carries the guest
    /// prefix; anything else is discarded so clients cannot vote under
    /// arbitrary user IDs.
    #[must_use]
    pub fn new(user: Option<user::Model>, guest_id: Option<String>) -> Self {
        let guest_id = guest_id.filter(|id| is_guest_id(id));
        Self { user, guest_id }
    }

    /// Resolve the voter identity, issuing a fresh guest identity when the
    /// request carries neither a user nor a replayable guest ID.
    ///
    /// Callers must echo a newly issued identity back to the client so it
    /// can be persisted and replayed across sessions.
    #[must_use]
    pub fn resolve_voter(&self, id_gen: &IdGenerator) -> VoterId {
        if let Some(user) = &self.user {
            return VoterId::User(user.id.clone());
        }
        match &self.guest_id {
            Some(id) => VoterId::Guest(id.clone()),
            None => VoterId::Guest(id_gen.generate_guest_id()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: "tester".to_string(),
            username_lower: "tester".to_string(),
            email: None,
            password_hash: "x".to_string(),
            token: None,
            profile_image: None,
            bio: None,
            is_admin: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_resolve_prefers_authenticated_user() {
        let ctx = SessionContext::new(Some(test_user("u1")), Some("guest-abc123".to_string()));
        let voter = ctx.resolve_voter(&IdGenerator::new());
        assert_eq!(voter, VoterId::User("u1".to_string()));
        assert!(voter.is_user());
    }

    #[test]
    fn test_resolve_replays_guest_identity() {
        let ctx = SessionContext::new(None, Some("guest-abc123".to_string()));
        let voter = ctx.resolve_voter(&IdGenerator::new());
        assert_eq!(voter, VoterId::Guest("guest-abc123".to_string()));
    }

    #[test]
    fn test_resolve_issues_fresh_guest_identity() {
        let ctx = SessionContext::new(None, None);
        let voter = ctx.resolve_voter(&IdGenerator::new());
        match voter {
            VoterId::Guest(id) => assert!(id.starts_with("guest-")),
            VoterId::User(_) => panic!("Expected a guest identity"),
        }
    }

    #[test]
    fn test_forged_guest_id_is_discarded() {
        // A client replaying a plain user ID must not vote as that user.
        let ctx = SessionContext::new(None, Some("u1".to_string()));
        let voter = ctx.resolve_voter(&IdGenerator::new());
        match voter {
            VoterId::Guest(id) => {
                assert!(id.starts_with("guest-"));
                assert_ne!(id, "u1");
            }
            VoterId::User(_) => panic!("Expected a guest identity"),
        }
    }
}
