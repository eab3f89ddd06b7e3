//! Artifact catalog: scoping and lookup precedence over the persistent store.
//!
//! Stateless facade; every call re-reads the store, so there is no cache to
//! keep consistent. Authorization for community-scope mutations happens in
//! the caller (see [`crate::auth`]) before these methods are invoked.

use std::sync::Arc;
use tracing::info;

use crate::error::StorageError;
use crate::store::{ArtifactRecord, NewArtifact, ScopedStore};
use crate::types::{CommunityId, MemberId, Scope};

/// Outcome of adding an artifact. `truncated` signals that the content was
/// cut to the configured maximum before persisting; the add itself still
/// succeeded and the caller should inform the end user.
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub record: ArtifactRecord,
    pub truncated: bool,
}

pub struct ArtifactCatalog {
    store: Arc<dyn ScopedStore>,
    max_content_chars: usize,
}

impl ArtifactCatalog {
    pub fn new(store: Arc<dyn ScopedStore>, max_content_chars: usize) -> Self {
        Self {
            store,
            max_content_chars,
        }
    }

    /// Add a named artifact to one exact scope.
    ///
    /// Content is truncated to the configured maximum first; the store then
    /// rejects the insert with `DuplicateName` if the name is already taken
    /// in that scope. The same name may exist once per scope.
    pub fn add(
        &self,
        community: &CommunityId,
        scope: Scope,
        name: &str,
        content: String,
        source_filename: &str,
        file_type: &str,
    ) -> Result<AddOutcome, StorageError> {
        let (content, truncated) = truncate_content(content, self.max_content_chars);
        let record = self.store.insert_artifact(NewArtifact {
            community: community.clone(),
            scope,
            name: name.to_string(),
            content,
            source_filename: source_filename.to_string(),
            file_type: file_type.to_string(),
        })?;
        info!(
            community = %community,
            scope = record.scope.label(),
            name = %record.name,
            chars = record.content.chars().count(),
            truncated,
            "artifact added"
        );
        Ok(AddOutcome { record, truncated })
    }

    /// Exact-scope lookup; never falls back to the other scope.
    pub fn get(
        &self,
        community: &CommunityId,
        scope: &Scope,
        name: &str,
    ) -> Result<Option<ArtifactRecord>, StorageError> {
        self.store.artifact(community, scope, name)
    }

    /// Bare-name lookup with no explicit scope: the member's own artifacts
    /// win over the community's shared ones.
    pub fn find(
        &self,
        community: &CommunityId,
        member: &MemberId,
        name: &str,
    ) -> Result<Option<ArtifactRecord>, StorageError> {
        self.store.artifact_prefer_member(community, member, name)
    }

    /// All artifacts in one exact scope, most recent first.
    pub fn list(
        &self,
        community: &CommunityId,
        scope: &Scope,
    ) -> Result<Vec<ArtifactRecord>, StorageError> {
        self.store.list_artifacts(community, scope)
    }

    /// Remove from one exact scope. Returns whether anything was removed;
    /// an absent target is a normal negative result.
    pub fn remove(
        &self,
        community: &CommunityId,
        scope: &Scope,
        name: &str,
    ) -> Result<bool, StorageError> {
        let removed = self.store.delete_artifact(community, scope, name)?;
        if removed {
            info!(community = %community, scope = scope.label(), name, "artifact removed");
        }
        Ok(removed)
    }
}

/// Cut `content` to at most `max_chars` characters, reporting whether
/// anything was dropped. Splits on a character boundary, never mid-codepoint.
pub fn truncate_content(mut content: String, max_chars: usize) -> (String, bool) {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            content.truncate(byte_idx);
            (content, true)
        }
        None => (content, false),
    }
}
