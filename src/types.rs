//! Identifier types shared across the store, resolver, and facades.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, externally assigned identifier for a chat community.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommunityId(String);

impl CommunityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommunityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Opaque identifier for a single member account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Which principal a preference or artifact belongs to.
///
/// A closed two-variant type instead of a nullable owner field: community
/// scope is a variant, not an absent member id, so every operation matches
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Shared across the whole community.
    Community,
    /// Personal to one member of the community.
    Member(MemberId),
}

impl Scope {
    pub fn is_member(&self) -> bool {
        matches!(self, Scope::Member(_))
    }

    /// Short tag used in log fields and user-facing scope labels.
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Community => "community",
            Scope::Member(_) => "member",
        }
    }
}
