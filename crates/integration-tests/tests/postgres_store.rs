//! The store scenarios against PostgreSQL, plus checks on the rows the
//! adapter writes. Run with `--features db-postgres`; needs Docker.

use domains::ports::SessionFactory;
use integration_tests::postgres::start;
use integration_tests::{contracts, seed_recipe, seed_user};
use storage_adapters::PostgresStore;

async fn count(store: &PostgresStore, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(store.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn staged_changes_are_private_to_their_session() {
    let (_db, store) = start().await;
    contracts::staged_changes_are_private_to_their_session(&store).await;
}

#[tokio::test]
async fn a_rejected_commit_applies_none_of_its_changes() {
    let (_db, store) = start().await;
    contracts::a_rejected_commit_applies_none_of_its_changes(&store).await;
    assert_eq!(count(&store, "ingredients").await, 0);
}

#[tokio::test]
async fn identifiers_are_never_reused() {
    let (_db, store) = start().await;
    contracts::identifiers_are_never_reused(&store).await;
}

#[tokio::test]
async fn recipe_constraints_are_enforced_on_commit() {
    let (_db, store) = start().await;
    contracts::recipe_constraints_are_enforced_on_commit(&store).await;
}

#[tokio::test]
async fn recipe_children_are_replaced_on_update() {
    let (_db, store) = start().await;
    contracts::recipe_children_are_replaced_on_update(&store).await;
    assert_eq!(count(&store, "recipe_steps").await, 1);
    assert_eq!(count(&store, "recipe_ingredients").await, 2);
    assert_eq!(count(&store, "recipe_tags").await, 1);
}

#[tokio::test]
async fn removing_a_recipe_cascades_to_its_children() {
    let (_db, store) = start().await;
    contracts::removing_a_recipe_cascades_to_its_children(&store).await;
    // Only the childless replacement recipe is left.
    assert_eq!(count(&store, "recipes").await, 1);
    for table in ["recipe_steps", "recipe_ingredients", "recipe_tags"] {
        assert_eq!(count(&store, table).await, 0, "{table}");
    }
}

#[tokio::test]
async fn row_version_is_bumped_by_the_database() {
    let (_db, store) = start().await;
    let author = seed_user(&store, "Ada").await;
    let id = seed_recipe(&store, author, "Chili").await;

    for expected in 1..=2 {
        let session = store.open_session();
        let mut recipe = session.recipes().find_by_id(id).await.unwrap().unwrap();
        if expected == 1 {
            recipe.publish();
        } else {
            recipe.unpublish();
        }
        session.recipes().update(recipe);
        session.unit_of_work().save_changes().await.unwrap();

        let version = sqlx::query_scalar::<_, i64>("SELECT row_version FROM recipes WHERE id = $1")
            .bind(id.value())
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(version, expected);
    }
}
