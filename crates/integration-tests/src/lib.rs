//! Shared fixtures for the cross-crate tests: seeding through the real
//! handlers against any [`SessionFactory`], store scenarios every backend
//! must pass, and an HTTP client over the axum router driven with
//! `tower::ServiceExt::oneshot`.

use domains::ports::SessionFactory;
use domains::{IngredientId, MeasurementUnit, RecipeDifficulty, RecipeId, TagId, UserId};
use services::ingredients::{CreateIngredientCommand, CreateIngredientHandler};
use services::recipes::{CreateRecipeCommand, CreateRecipeHandler};
use services::tags::{CreateTagCommand, CreateTagHandler};
use services::users::{CreateUserCommand, CreateUserHandler};
use storage_adapters::InMemoryStore;

pub mod contracts;
#[cfg(feature = "web-axum")]
pub mod http;
#[cfg(feature = "db-postgres")]
pub mod postgres;

pub fn store() -> InMemoryStore {
    InMemoryStore::new()
}

pub async fn seed_user(store: &dyn SessionFactory, name: &str) -> UserId {
    let session = store.open_session();
    CreateUserHandler::from_session(session.as_ref())
        .handle(CreateUserCommand { name: name.to_owned() })
        .await
        .expect("seed user")
        .id
}

pub async fn seed_ingredient(store: &dyn SessionFactory, name: &str) -> IngredientId {
    let session = store.open_session();
    CreateIngredientHandler::from_session(session.as_ref())
        .handle(CreateIngredientCommand {
            name: name.to_owned(),
            plural_name: None,
            default_unit: Some(MeasurementUnit::Gram),
            is_active: true,
        })
        .await
        .expect("seed ingredient")
        .id
}

pub async fn seed_tag(store: &dyn SessionFactory, name: &str) -> TagId {
    let session = store.open_session();
    CreateTagHandler::from_session(session.as_ref())
        .handle(CreateTagCommand {
            name: name.to_owned(),
            slug: None,
        })
        .await
        .expect("seed tag")
        .id
}

pub fn recipe_command(author_id: UserId, title: &str) -> CreateRecipeCommand {
    CreateRecipeCommand {
        author_id,
        title: title.to_owned(),
        description: Some("Weeknight staple".to_owned()),
        prep_time_minutes: 15,
        cook_time_minutes: 45,
        servings: 4,
        difficulty: RecipeDifficulty::Medium,
        is_published: false,
    }
}

pub async fn seed_recipe(store: &dyn SessionFactory, author_id: UserId, title: &str) -> RecipeId {
    let session = store.open_session();
    CreateRecipeHandler::from_session(session.as_ref())
        .handle(recipe_command(author_id, title))
        .await
        .expect("seed recipe")
        .id
}
