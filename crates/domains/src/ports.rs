//! # Ports
//!
//! Persistence contracts implemented by `storage-adapters`.
//!
//! Reads are async and hit the committed state. Staging calls (`add`,
//! `update`, `remove`) only buffer a change in the current session; nothing
//! is written until [`UnitOfWork::save_changes`] commits the whole batch.

use async_trait::async_trait;

use crate::entities::{Ingredient, Recipe, Tag, User};
use crate::errors::DomainResult;
use crate::ids::{IngredientId, RecipeId, RecipeIngredientId, RecipeStepId, TagId, UserId};

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn next_id(&self) -> DomainResult<RecipeId>;
    async fn next_ingredient_entry_id(&self) -> DomainResult<RecipeIngredientId>;
    async fn next_step_id(&self) -> DomainResult<RecipeStepId>;

    /// Loads the recipe with its steps, ingredient entries and tag entries.
    async fn find_by_id(&self, id: RecipeId) -> DomainResult<Option<Recipe>>;

    /// All recipes ordered by title, each with its owned collections.
    async fn list(&self) -> DomainResult<Vec<Recipe>>;

    fn add(&self, recipe: Recipe);
    fn update(&self, recipe: Recipe);
    fn remove(&self, id: RecipeId);
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    async fn next_id(&self) -> DomainResult<IngredientId>;
    async fn find_by_id(&self, id: IngredientId) -> DomainResult<Option<Ingredient>>;
    async fn find_by_ids(&self, ids: &[IngredientId]) -> DomainResult<Vec<Ingredient>>;

    /// All ingredients ordered by name.
    async fn list(&self) -> DomainResult<Vec<Ingredient>>;

    /// Whether an ingredient other than `exclude` already has this exact
    /// (already normalized) name.
    async fn is_name_taken(&self, name: &str, exclude: Option<IngredientId>) -> DomainResult<bool>;

    fn add(&self, ingredient: Ingredient);
    fn update(&self, ingredient: Ingredient);
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn next_id(&self) -> DomainResult<TagId>;
    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>>;
    async fn find_by_ids(&self, ids: &[TagId]) -> DomainResult<Vec<Tag>>;

    /// All tags ordered by name.
    async fn list(&self) -> DomainResult<Vec<Tag>>;
    async fn is_slug_taken(&self, slug: &str) -> DomainResult<bool>;

    fn add(&self, tag: Tag);
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// All users ordered by name.
    async fn list(&self) -> DomainResult<Vec<User>>;
    async fn is_name_taken(&self, name: &str) -> DomainResult<bool>;

    fn add(&self, user: User);
}

/// Commits everything staged in the current session.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Applies all staged changes atomically and returns how many were
    /// applied. On error nothing is applied.
    async fn save_changes(&self) -> DomainResult<usize>;
}

/// The repositories and unit of work scoped to one request.
pub trait DataSession: Send + Sync {
    fn recipes(&self) -> &dyn RecipeRepository;
    fn ingredients(&self) -> &dyn IngredientRepository;
    fn tags(&self) -> &dyn TagRepository;
    fn users(&self) -> &dyn UserRepository;
    fn unit_of_work(&self) -> &dyn UnitOfWork;
}

/// Opens request-scoped sessions against a store.
pub trait SessionFactory: Send + Sync {
    fn open_session(&self) -> Box<dyn DataSession>;
}
