//! Default-model preference facade.
//!
//! Resolves the effective model for a community + member pair through a
//! strict three-level fallback: member preference, then community
//! preference, then the process-wide default configured at startup. The
//! chain never comes up empty, so reads return a plain `String`.

use std::sync::Arc;
use tracing::info;

use crate::error::StorageError;
use crate::store::ScopedStore;
use crate::types::{CommunityId, MemberId};

pub struct PreferenceFacade {
    store: Arc<dyn ScopedStore>,
    system_default: String,
}

impl PreferenceFacade {
    pub fn new(store: Arc<dyn ScopedStore>, system_default: impl Into<String>) -> Self {
        Self {
            store,
            system_default: system_default.into(),
        }
    }

    /// Effective default model for a member acting in a community.
    ///
    /// An ordered chain returning on first hit; the configured system
    /// default closes it, so the result is never absent.
    pub fn default_model(
        &self,
        community: &CommunityId,
        member: &MemberId,
    ) -> Result<String, StorageError> {
        if let Some(model) = self.store.member_model(member)? {
            return Ok(model);
        }
        if let Some(model) = self.store.community_model(community)? {
            return Ok(model);
        }
        Ok(self.system_default.clone())
    }

    /// Set the member's personal default. No catalog validation happens
    /// here; callers validate against the live catalog first (see
    /// [`crate::catalog::match_model`]).
    pub fn set_member_model(&self, member: &MemberId, model: &str) -> Result<(), StorageError> {
        self.store.set_member_model(member, model)?;
        info!(member = %member, model, "member default model updated");
        Ok(())
    }

    /// Set the community-wide default. Callers authorize first; this layer
    /// only writes.
    pub fn set_community_model(
        &self,
        community: &CommunityId,
        model: &str,
    ) -> Result<(), StorageError> {
        self.store.set_community_model(community, model)?;
        info!(community = %community, model, "community default model updated");
        Ok(())
    }

    pub fn system_default(&self) -> &str {
        &self.system_default
    }
}
