//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provider-assigned fixture identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixtureId(String);

impl FixtureId {
    /// Create a new `FixtureId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the fixture ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FixtureId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for FixtureId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Team identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(String);

impl TeamId {
    /// Create a new `TeamId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the team ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TeamId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// League identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeagueId(String);

impl LeagueId {
    /// Create a new `LeagueId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the league ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LeagueId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for LeagueId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for a synchronization run.
///
/// Generated as UUID v4 for new runs, or constructed from an existing
/// string for persistence/deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncId(String);

impl SyncId {
    /// Create a new `SyncId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the sync ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SyncId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SyncId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SyncId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SyncId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_id_new_and_as_str() {
        let id = FixtureId::new("fx-1001");
        assert_eq!(id.as_str(), "fx-1001");
    }

    #[test]
    fn fixture_id_display() {
        let id = FixtureId::new("fx-display");
        assert_eq!(format!("{}", id), "fx-display");
    }

    #[test]
    fn team_id_from_string() {
        let id = TeamId::from("team-9".to_string());
        assert_eq!(id.as_str(), "team-9");
    }

    #[test]
    fn league_id_ordering_is_stable() {
        let mut ids = vec![LeagueId::new("b"), LeagueId::new("a"), LeagueId::new("c")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "a");
        assert_eq!(ids[2].as_str(), "c");
    }

    #[test]
    fn sync_id_generates_unique_ids() {
        let id1 = SyncId::new();
        let id2 = SyncId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn sync_id_as_str_returns_uuid_format() {
        let id = SyncId::new();
        // UUID v4 format: 8-4-4-4-12 hex chars
        assert_eq!(id.as_str().len(), 36);
        assert_eq!(id.as_str().chars().filter(|c| *c == '-').count(), 4);
    }

    #[test]
    fn sync_id_from_string_preserves_value() {
        let id = SyncId::from("existing-run");
        assert_eq!(id.as_str(), "existing-run");
    }
}
