//! Scoped preference and artifact store.
//!
//! Three entity kinds persist here: community preferences, member
//! preferences, and named content artifacts. Uniqueness of
//! (community, scope, name) for artifacts is enforced at the storage layer,
//! so a racing pair of inserts resolves with exactly one winner.

pub mod persistence;

pub use persistence::SledScopedStore;

use crate::error::StorageError;
use crate::types::{CommunityId, MemberId, Scope};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stored default-model preference for a community.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityPrefRecord {
    pub community: CommunityId,
    pub default_model: Option<String>,
    pub created_at_ms: u64,
}

/// Stored default-model preference for a member, independent of any
/// community.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPrefRecord {
    pub member: MemberId,
    pub default_model: Option<String>,
    pub created_at_ms: u64,
}

/// A named, persisted piece of text content with provenance metadata.
///
/// Immutable between creation and deletion; there is no update-in-place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub community: CommunityId,
    pub scope: Scope,
    pub name: String,
    pub content: String,
    pub source_filename: String,
    pub file_type: String,
    pub created_at_ms: u64,
    /// Monotonic insert sequence; breaks listing-order ties between
    /// artifacts created in the same millisecond.
    pub seq: u64,
}

impl ArtifactRecord {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at_ms as i64)
    }
}

/// Artifact data supplied by the caller. The store assigns the creation
/// timestamp and sequence on insert.
#[derive(Debug, Clone)]
pub struct NewArtifact {
    pub community: CommunityId,
    pub scope: Scope,
    pub name: String,
    pub content: String,
    pub source_filename: String,
    pub file_type: String,
}

/// Scoped store interface
pub trait ScopedStore: Send + Sync {
    /// Upsert the community default model. Idempotent; overwrites any prior
    /// value and keeps the original creation timestamp.
    fn set_community_model(&self, community: &CommunityId, model: &str) -> Result<(), StorageError>;

    fn community_model(&self, community: &CommunityId) -> Result<Option<String>, StorageError>;

    /// Upsert the member default model with the same semantics as
    /// `set_community_model`.
    fn set_member_model(&self, member: &MemberId, model: &str) -> Result<(), StorageError>;

    fn member_model(&self, member: &MemberId) -> Result<Option<String>, StorageError>;

    /// Insert a new artifact. Fails with `DuplicateName` when a row with the
    /// same (community, scope, name) already exists; under concurrency
    /// exactly one of two racing inserts succeeds.
    fn insert_artifact(&self, artifact: NewArtifact) -> Result<ArtifactRecord, StorageError>;

    /// Exact-scope lookup, no fallback.
    fn artifact(
        &self,
        community: &CommunityId,
        scope: &Scope,
        name: &str,
    ) -> Result<Option<ArtifactRecord>, StorageError>;

    /// Bare-name lookup: the member's own artifact wins over the community's
    /// shared one. The ordered chain lives here so exact-scope lookups and
    /// the resolver share a single definition of precedence.
    fn artifact_prefer_member(
        &self,
        community: &CommunityId,
        member: &MemberId,
        name: &str,
    ) -> Result<Option<ArtifactRecord>, StorageError> {
        if let Some(record) = self.artifact(community, &Scope::Member(member.clone()), name)? {
            return Ok(Some(record));
        }
        self.artifact(community, &Scope::Community, name)
    }

    /// All artifacts for one exact scope, most recent first.
    fn list_artifacts(
        &self,
        community: &CommunityId,
        scope: &Scope,
    ) -> Result<Vec<ArtifactRecord>, StorageError>;

    /// Remove at most one row. Returns whether a row was removed; removing
    /// an absent artifact is a no-op, not an error.
    fn delete_artifact(
        &self,
        community: &CommunityId,
        scope: &Scope,
        name: &str,
    ) -> Result<bool, StorageError>;
}

/// Current wall-clock time in unix milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
