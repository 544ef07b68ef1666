//! ID generation utilities.

use ulid::Ulid;
use uuid::Uuid;

/// Prefix for anonymous voter pseudo-identities.
pub const GUEST_ID_PREFIX: &str = "guest-";

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs are:
    /// - Lexicographically sortable
    /// - Monotonically increasing within the same millisecond
    /// - Shorter than UUIDs when represented as strings
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }

    /// Generate a cryptographically secure random token.
    #[must_use]
    pub fn generate_token(&self) -> String {
        // Use UUID v4 for tokens (no time component for security)
        Uuid::new_v4().simple().to_string()
    }

    /// Generate a pseudo-identity for an anonymous voter.
    ///
    /// Guest identities are issued once and replayed by the client across
    /// sessions, so anonymous voting eligibility can be tracked per device.
    #[must_use]
    pub fn generate_guest_id(&self) -> String {
        format!("{GUEST_ID_PREFIX}{}", self.generate())
    }
}

/// Returns whether an identity string is a guest pseudo-identity.
#[must_use]
pub fn is_guest_id(id: &str) -> bool {
    id.starts_with(GUEST_ID_PREFIX) && id.len() > GUEST_ID_PREFIX.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ulid() {
        let id_gen = IdGenerator::new();
        let id1 = id_gen.generate();
        let id2 = id_gen.generate();

        assert_eq!(id1.len(), 26);
        assert_eq!(id2.len(), 26);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generate_token() {
        let id_gen = IdGenerator::new();
        let token = id_gen.generate_token();

        assert_eq!(token.len(), 32); // Simple UUID without hyphens
    }

    #[test]
    fn test_generate_guest_id() {
        let id_gen = IdGenerator::new();
        let guest = id_gen.generate_guest_id();

        assert!(guest.starts_with(GUEST_ID_PREFIX));
        assert!(is_guest_id(&guest));
    }

    #[test]
    fn test_is_guest_id_rejects_plain_ids() {
        assert!(!is_guest_id("01h2xcejqtf2nbrexx3vqjhp41"));
        assert!(!is_guest_id("guest-"));
        assert!(!is_guest_id(""));
    }
}
