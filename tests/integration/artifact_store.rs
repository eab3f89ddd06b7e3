//! Integration tests for the persistent artifact store
//!
//! Tests cover:
//! - Insert/get round-trips
//! - Scoped uniqueness under concurrency
//! - Deletion semantics
//! - Listing order

use dossier::error::StorageError;
use dossier::store::{NewArtifact, ScopedStore, SledScopedStore};
use dossier::types::{CommunityId, MemberId, Scope};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn open_store() -> (Arc<SledScopedStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SledScopedStore::new(temp_dir.path()).unwrap());
    (store, temp_dir)
}

fn artifact(community: &str, scope: Scope, name: &str, content: &str) -> NewArtifact {
    NewArtifact {
        community: CommunityId::from(community),
        scope,
        name: name.to_string(),
        content: content.to_string(),
        source_filename: format!("{name}.txt"),
        file_type: "txt".to_string(),
    }
}

#[test]
fn round_trip_is_byte_identical() -> anyhow::Result<()> {
    let (store, _dir) = open_store();
    let content = "line one\nline two\r\n\ttabbed\nünïcödé ✓\u{1F4C4}";

    store.insert_artifact(artifact("g1", Scope::Community, "doc", content))?;

    let fetched = store
        .artifact(&CommunityId::from("g1"), &Scope::Community, "doc")?
        .expect("artifact should exist after insert");
    assert_eq!(fetched.content.as_bytes(), content.as_bytes());
    Ok(())
}

#[test]
fn concurrent_inserts_admit_exactly_one_winner() {
    let (store, _dir) = open_store();
    let threads = 8;

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store.insert_artifact(artifact(
                    "g1",
                    Scope::Member(MemberId::from("u1")),
                    "contested",
                    &format!("writer {i}"),
                ))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    let losers = results
        .iter()
        .filter(|r| matches!(r, Err(StorageError::DuplicateName(_))))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(losers, threads - 1);

    // Exactly one row exists afterwards.
    let listed = store
        .list_artifacts(
            &CommunityId::from("g1"),
            &Scope::Member(MemberId::from("u1")),
        )
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn deleting_then_reinserting_same_key_succeeds() {
    let (store, _dir) = open_store();
    let community = CommunityId::from("g1");

    store
        .insert_artifact(artifact("g1", Scope::Community, "doc", "v1"))
        .unwrap();
    assert!(store
        .delete_artifact(&community, &Scope::Community, "doc")
        .unwrap());

    // The name is free again once the old row is gone.
    store
        .insert_artifact(artifact("g1", Scope::Community, "doc", "v2"))
        .unwrap();
    let fetched = store
        .artifact(&community, &Scope::Community, "doc")
        .unwrap()
        .unwrap();
    assert_eq!(fetched.content, "v2");
}

#[test]
fn listing_empty_scope_is_empty_not_an_error() {
    let (store, _dir) = open_store();
    let listed = store
        .list_artifacts(
            &CommunityId::from("nowhere"),
            &Scope::Member(MemberId::from("nobody")),
        )
        .unwrap();
    assert!(listed.is_empty());
}

#[test]
fn listing_orders_most_recent_first() {
    let (store, _dir) = open_store();
    let community = CommunityId::from("g1");

    for name in ["first", "second", "third"] {
        store
            .insert_artifact(artifact("g1", Scope::Community, name, name))
            .unwrap();
    }

    let listed = store.list_artifacts(&community, &Scope::Community).unwrap();
    let names: Vec<&str> = listed.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}
