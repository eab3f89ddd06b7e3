//! Integration tests for the preference facade and catalog validation

use dossier::catalog::{match_model, ModelCatalog, ModelMatch, StaticCatalog};
use dossier::prefs::PreferenceFacade;
use dossier::store::SledScopedStore;
use dossier::types::{CommunityId, MemberId};
use std::sync::Arc;
use tempfile::TempDir;

fn facade(system_default: &str) -> (PreferenceFacade, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SledScopedStore::new(temp_dir.path()).unwrap());
    (PreferenceFacade::new(store, system_default), temp_dir)
}

#[test]
fn default_model_never_fails() {
    let (facade, _dir) = facade("system-default");

    // No preferences anywhere: the configured default answers.
    for community in ["G1", "G2", "dm"] {
        let model = facade
            .default_model(&CommunityId::from(community), &MemberId::from("U1"))
            .unwrap();
        assert_eq!(model, "system-default");
    }
}

#[test]
fn chain_resolves_member_then_community_then_system() {
    let (facade, _dir) = facade("system-default");
    let community = CommunityId::from("G1");
    let member = MemberId::from("U1");

    facade.set_community_model(&community, "community-model").unwrap();
    assert_eq!(
        facade.default_model(&community, &member).unwrap(),
        "community-model"
    );

    facade.set_member_model(&member, "member-model").unwrap();
    assert_eq!(
        facade.default_model(&community, &member).unwrap(),
        "member-model"
    );

    // The member preference follows the member across communities.
    assert_eq!(
        facade
            .default_model(&CommunityId::from("G2"), &member)
            .unwrap(),
        "member-model"
    );
}

#[test]
fn upserts_overwrite_in_place() {
    let (facade, _dir) = facade("system-default");
    let member = MemberId::from("U1");

    facade.set_member_model(&member, "first").unwrap();
    facade.set_member_model(&member, "second").unwrap();
    assert_eq!(
        facade
            .default_model(&CommunityId::from("G1"), &member)
            .unwrap(),
        "second"
    );
}

#[tokio::test]
async fn preference_write_validates_against_the_catalog() {
    let (facade, _dir) = facade("system-default");
    let member = MemberId::from("U1");
    let catalog = StaticCatalog::new(["GPT-4o-mini", "Claude-Sonnet"]);

    // The front-end path: list the catalog, validate, then write the
    // canonical id.
    let models = catalog.list_models().await.unwrap();

    match match_model(&models, "claude-sonnet") {
        ModelMatch::Exact(id) | ModelMatch::CaseInsensitive(id) => {
            facade.set_member_model(&member, &id).unwrap();
        }
        ModelMatch::NotFound => panic!("expected a case-insensitive match"),
    }

    assert_eq!(
        facade
            .default_model(&CommunityId::from("G1"), &member)
            .unwrap(),
        "Claude-Sonnet"
    );

    assert_eq!(match_model(&models, "no-such-model"), ModelMatch::NotFound);
}
