//! Session and unit-of-work behaviour of the in-memory store, observed
//! through the ports only.

use domains::ports::{DataSession, SessionFactory};
use domains::{Ingredient, IngredientId};
use integration_tests::{contracts, seed_user, store};

fn boxed(store: &storage_adapters::InMemoryStore) -> Box<dyn DataSession> {
    store.open_session()
}

#[tokio::test]
async fn staged_changes_are_private_to_their_session() {
    contracts::staged_changes_are_private_to_their_session(&store()).await;
}

#[tokio::test]
async fn a_rejected_commit_applies_none_of_its_changes() {
    contracts::a_rejected_commit_applies_none_of_its_changes(&store()).await;
}

#[tokio::test]
async fn identifiers_are_never_reused() {
    contracts::identifiers_are_never_reused(&store()).await;
}

#[tokio::test]
async fn recipe_constraints_are_enforced_on_commit() {
    contracts::recipe_constraints_are_enforced_on_commit(&store()).await;
}

#[tokio::test]
async fn recipe_children_are_replaced_on_update() {
    contracts::recipe_children_are_replaced_on_update(&store()).await;
}

#[tokio::test]
async fn removing_a_recipe_cascades_to_its_children() {
    contracts::removing_a_recipe_cascades_to_its_children(&store()).await;
}

#[tokio::test]
async fn dropping_a_session_discards_its_staged_changes() {
    let store = store();
    {
        let abandoned = boxed(&store);
        abandoned
            .ingredients()
            .add(Ingredient::create(IngredientId::new(50), "nutmeg", None, None).unwrap());
    }
    let session = boxed(&store);
    assert_eq!(session.unit_of_work().save_changes().await.unwrap(), 0);
    assert!(session.ingredients().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn user_names_are_unique_in_the_store() {
    let store = store();
    seed_user(&store, "Ada").await;
    let session = boxed(&store);
    assert!(session.users().is_name_taken("Ada").await.unwrap());
    assert!(!session.users().is_name_taken("ada").await.unwrap());
}
