//! Persistence layer for the scoped store.

use crate::error::StorageError;
use crate::store::{
    now_millis, ArtifactRecord, CommunityPrefRecord, MemberPrefRecord, NewArtifact, ScopedStore,
};
use crate::types::{CommunityId, MemberId, Scope};
use serde::Serialize;
use std::path::Path;

const COMMUNITY_PREFS_TREE: &str = "community_prefs";
const MEMBER_PREFS_TREE: &str = "member_prefs";
const ARTIFACTS_TREE: &str = "artifacts";

/// Composite key for artifact rows.
///
/// Bincode writes fields in declaration order with length prefixes, so the
/// encoded (community, owner) pair is a strict byte prefix of the full key
/// and scope listings are prefix scans. Community scope encodes as
/// `owner: None`; identifiers never collide across scopes because the
/// `Option` tag byte separates them.
#[derive(Serialize)]
struct ArtifactKey<'a> {
    community: &'a str,
    owner: Option<&'a str>,
    name: &'a str,
}

#[derive(Serialize)]
struct ScopePrefix<'a> {
    community: &'a str,
    owner: Option<&'a str>,
}

fn owner_of(scope: &Scope) -> Option<&str> {
    match scope {
        Scope::Community => None,
        Scope::Member(member) => Some(member.as_str()),
    }
}

/// Sled-based implementation of ScopedStore
///
/// One database, three trees. Sled's own log provides crash consistency;
/// the artifact uniqueness invariant is a single `compare_and_swap` per
/// insert, so no application-level locking is needed.
///
/// Values are stored as JSON so record evolution stays additive: a field
/// added with a serde default still reads rows written before it existed.
/// Keys use bincode for the prefix-scan property described above.
pub struct SledScopedStore {
    db: sled::Db,
    community_prefs: sled::Tree,
    member_prefs: sled::Tree,
    artifacts: sled::Tree,
}

impl SledScopedStore {
    /// Open (or create) the store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        let community_prefs = db.open_tree(COMMUNITY_PREFS_TREE)?;
        let member_prefs = db.open_tree(MEMBER_PREFS_TREE)?;
        let artifacts = db.open_tree(ARTIFACTS_TREE)?;
        Ok(Self {
            db,
            community_prefs,
            member_prefs,
            artifacts,
        })
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    fn artifact_key(
        community: &CommunityId,
        scope: &Scope,
        name: &str,
    ) -> Result<Vec<u8>, StorageError> {
        let key = ArtifactKey {
            community: community.as_str(),
            owner: owner_of(scope),
            name,
        };
        Ok(bincode::serialize(&key)?)
    }

    fn scope_prefix(community: &CommunityId, scope: &Scope) -> Result<Vec<u8>, StorageError> {
        let prefix = ScopePrefix {
            community: community.as_str(),
            owner: owner_of(scope),
        };
        Ok(bincode::serialize(&prefix)?)
    }
}

impl ScopedStore for SledScopedStore {
    fn set_community_model(&self, community: &CommunityId, model: &str) -> Result<(), StorageError> {
        // Upsert keeps the original creation timestamp.
        let created_at_ms = match self.community_prefs.get(community.as_str())? {
            Some(bytes) => serde_json::from_slice::<CommunityPrefRecord>(&bytes)?.created_at_ms,
            None => now_millis(),
        };
        let record = CommunityPrefRecord {
            community: community.clone(),
            default_model: Some(model.to_string()),
            created_at_ms,
        };
        self.community_prefs
            .insert(community.as_str(), serde_json::to_vec(&record)?)?;
        Ok(())
    }

    fn community_model(&self, community: &CommunityId) -> Result<Option<String>, StorageError> {
        match self.community_prefs.get(community.as_str())? {
            Some(bytes) => {
                let record: CommunityPrefRecord = serde_json::from_slice(&bytes)?;
                Ok(record.default_model)
            }
            None => Ok(None),
        }
    }

    fn set_member_model(&self, member: &MemberId, model: &str) -> Result<(), StorageError> {
        let created_at_ms = match self.member_prefs.get(member.as_str())? {
            Some(bytes) => serde_json::from_slice::<MemberPrefRecord>(&bytes)?.created_at_ms,
            None => now_millis(),
        };
        let record = MemberPrefRecord {
            member: member.clone(),
            default_model: Some(model.to_string()),
            created_at_ms,
        };
        self.member_prefs
            .insert(member.as_str(), serde_json::to_vec(&record)?)?;
        Ok(())
    }

    fn member_model(&self, member: &MemberId) -> Result<Option<String>, StorageError> {
        match self.member_prefs.get(member.as_str())? {
            Some(bytes) => {
                let record: MemberPrefRecord = serde_json::from_slice(&bytes)?;
                Ok(record.default_model)
            }
            None => Ok(None),
        }
    }

    fn insert_artifact(&self, artifact: NewArtifact) -> Result<ArtifactRecord, StorageError> {
        let key = Self::artifact_key(&artifact.community, &artifact.scope, &artifact.name)?;
        let record = ArtifactRecord {
            community: artifact.community,
            scope: artifact.scope,
            name: artifact.name,
            content: artifact.content,
            source_filename: artifact.source_filename,
            file_type: artifact.file_type,
            created_at_ms: now_millis(),
            seq: self.db.generate_id()?,
        };
        let value = serde_json::to_vec(&record)?;
        // Insert-if-absent; a racing insert for the same key loses here.
        match self
            .artifacts
            .compare_and_swap(key, None as Option<&[u8]>, Some(value))?
        {
            Ok(()) => Ok(record),
            Err(_) => Err(StorageError::DuplicateName(record.name)),
        }
    }

    fn artifact(
        &self,
        community: &CommunityId,
        scope: &Scope,
        name: &str,
    ) -> Result<Option<ArtifactRecord>, StorageError> {
        let key = Self::artifact_key(community, scope, name)?;
        match self.artifacts.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn list_artifacts(
        &self,
        community: &CommunityId,
        scope: &Scope,
    ) -> Result<Vec<ArtifactRecord>, StorageError> {
        let prefix = Self::scope_prefix(community, scope)?;
        let mut records = Vec::new();
        for item in self.artifacts.scan_prefix(prefix) {
            let (_, value) = item?;
            let record: ArtifactRecord = serde_json::from_slice(&value)?;
            records.push(record);
        }
        // Most recent first; the insert sequence breaks same-millisecond ties.
        records.sort_by(|a, b| {
            (b.created_at_ms, b.seq).cmp(&(a.created_at_ms, a.seq))
        });
        Ok(records)
    }

    fn delete_artifact(
        &self,
        community: &CommunityId,
        scope: &Scope,
        name: &str,
    ) -> Result<bool, StorageError> {
        let key = Self::artifact_key(community, scope, name)?;
        Ok(self.artifacts.remove(key)?.is_some())
    }
}
