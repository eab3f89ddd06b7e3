//! Community-scope authorization policy.
//!
//! Evaluated by the front-end before invoking community-scope mutations.
//! The store and the facades never authorize; they assume the caller
//! already did.

use std::collections::HashSet;

use crate::error::ApiError;
use crate::types::MemberId;

/// Allow-list plus elevated-role policy for community-scoped mutations.
pub struct AdminPolicy {
    allow_list: HashSet<String>,
}

impl AdminPolicy {
    pub fn new<I, S>(allow_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow_list: allow_list.into_iter().map(Into::into).collect(),
        }
    }

    /// Allow-listed actors, and actors the front-end reports as holding an
    /// elevated role in the community, may manage community-scoped state.
    pub fn can_manage_community_scope(&self, actor: &MemberId, has_elevated_role: bool) -> bool {
        has_elevated_role || self.allow_list.contains(actor.as_str())
    }

    /// Guard form producing the typed rejection, for mutation call sites.
    pub fn require_community_scope(
        &self,
        actor: &MemberId,
        has_elevated_role: bool,
    ) -> Result<(), ApiError> {
        if self.can_manage_community_scope(actor, has_elevated_role) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized(actor.to_string()))
        }
    }
}
