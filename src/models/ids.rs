//! Entity identifiers.
//!
//! Most records get a random UUID when created. Link records (a team's
//! membership in a group) use a SHA256-derived id so the same pair always
//! maps to the same row.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// An opaque entity ID.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new EntityId from an existing string.
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Mint a fresh random ID.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Derive a deterministic ID from input fields.
    /// Uses SHA256 and takes the first 16 hex characters.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

pub type TournamentId = EntityId;

pub type TeamId = EntityId;

pub type GroupId = EntityId;

pub type MatchId = EntityId;

pub type PlayerId = EntityId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = EntityId::generate(&["group-a", "team-1"]);
        let b = EntityId::generate(&["group-a", "team-1"]);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 16);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_field_order_matters() {
        let a = EntityId::generate(&["group-a", "team-1"]);
        let b = EntityId::generate(&["team-1", "group-a"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_ids_differ() {
        assert_ne!(EntityId::random(), EntityId::random());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = EntityId::from("team-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"team-1\"");

        let back: EntityId = serde_json::from_str("\"team-1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display_and_debug() {
        let id = EntityId::new("abc123".to_string());
        assert_eq!(format!("{}", id), "abc123");
        assert!(format!("{:?}", id).contains("abc123"));
    }
}
