//! Integration tests for scope resolution precedence
//!
//! Tests cover:
//! - Personal and shared artifacts with the same name coexisting
//! - Explicit-scope lookups never falling back
//! - Bare-name lookups preferring the member's own artifact

use dossier::artifacts::ArtifactCatalog;
use dossier::store::SledScopedStore;
use dossier::types::{CommunityId, MemberId, Scope};
use std::sync::Arc;
use tempfile::TempDir;

fn catalog() -> (ArtifactCatalog, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SledScopedStore::new(temp_dir.path()).unwrap());
    (ArtifactCatalog::new(store, 100_000), temp_dir)
}

#[test]
fn same_name_coexists_and_explicit_scopes_stay_separate() {
    let (catalog, _dir) = catalog();
    let community = CommunityId::from("G1");
    let member = MemberId::from("U1");
    let member_scope = Scope::Member(member.clone());

    // The member adds "spec" personally; the community also has a shared
    // "spec". Neither add conflicts with the other.
    catalog
        .add(
            &community,
            member_scope.clone(),
            "spec",
            "personal copy".to_string(),
            "spec.md",
            "md",
        )
        .unwrap();
    catalog
        .add(
            &community,
            Scope::Community,
            "spec",
            "shared copy".to_string(),
            "spec.md",
            "md",
        )
        .unwrap();

    let personal = catalog.get(&community, &member_scope, "spec").unwrap().unwrap();
    assert_eq!(personal.content, "personal copy");

    let shared = catalog
        .get(&community, &Scope::Community, "spec")
        .unwrap()
        .unwrap();
    assert_eq!(shared.content, "shared copy");
}

#[test]
fn explicit_member_scope_does_not_see_community_rows() {
    let (catalog, _dir) = catalog();
    let community = CommunityId::from("G1");
    let member_scope = Scope::Member(MemberId::from("U1"));

    catalog
        .add(
            &community,
            Scope::Community,
            "handbook",
            "shared".to_string(),
            "handbook.txt",
            "txt",
        )
        .unwrap();

    assert!(catalog
        .get(&community, &member_scope, "handbook")
        .unwrap()
        .is_none());
}

#[test]
fn bare_name_lookup_prefers_member_then_falls_back() {
    let (catalog, _dir) = catalog();
    let community = CommunityId::from("G1");
    let member = MemberId::from("U1");

    catalog
        .add(
            &community,
            Scope::Community,
            "guide",
            "shared".to_string(),
            "guide.txt",
            "txt",
        )
        .unwrap();

    // No personal row yet: fallback reaches the community copy.
    let found = catalog.find(&community, &member, "guide").unwrap().unwrap();
    assert_eq!(found.content, "shared");

    catalog
        .add(
            &community,
            Scope::Member(member.clone()),
            "guide",
            "personal".to_string(),
            "guide.txt",
            "txt",
        )
        .unwrap();

    // Personal row wins once it exists.
    let found = catalog.find(&community, &member, "guide").unwrap().unwrap();
    assert_eq!(found.content, "personal");

    // Another member still falls through to the shared copy.
    let found = catalog
        .find(&community, &MemberId::from("U2"), "guide")
        .unwrap()
        .unwrap();
    assert_eq!(found.content, "shared");
}

#[test]
fn bare_name_lookup_reports_absent_when_neither_scope_has_it() {
    let (catalog, _dir) = catalog();
    assert!(catalog
        .find(&CommunityId::from("G1"), &MemberId::from("U1"), "missing")
        .unwrap()
        .is_none());
}

#[test]
fn removal_targets_one_exact_scope() {
    let (catalog, _dir) = catalog();
    let community = CommunityId::from("G1");
    let member_scope = Scope::Member(MemberId::from("U1"));

    catalog
        .add(
            &community,
            member_scope.clone(),
            "spec",
            "personal".to_string(),
            "spec.md",
            "md",
        )
        .unwrap();
    catalog
        .add(
            &community,
            Scope::Community,
            "spec",
            "shared".to_string(),
            "spec.md",
            "md",
        )
        .unwrap();

    assert!(catalog.remove(&community, &member_scope, "spec").unwrap());

    // The shared row is untouched, and the personal one is gone.
    assert!(catalog.get(&community, &member_scope, "spec").unwrap().is_none());
    assert!(catalog
        .get(&community, &Scope::Community, "spec")
        .unwrap()
        .is_some());
}
