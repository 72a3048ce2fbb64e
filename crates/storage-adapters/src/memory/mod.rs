//! # In-memory store
//!
//! A process-local store with the same observable behaviour as the
//! PostgreSQL adapter: staged changes, all-or-nothing commits and the same
//! uniqueness and reference constraints. Used by the tests and when the
//! server runs without a database URL.

mod tables;

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use domains::ports::{
    DataSession, IngredientRepository, RecipeRepository, SessionFactory, TagRepository, UnitOfWork,
    UserRepository,
};
use domains::{
    DomainResult, Ingredient, IngredientId, Recipe, RecipeId, RecipeIngredientId, RecipeStepId,
    Tag, TagId, User, UserId,
};
use parking_lot::RwLock;

use self::tables::Tables;
use crate::changes::{ChangeSet, PendingChange};

#[derive(Debug)]
struct Sequence(AtomicI64);

impl Sequence {
    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self(AtomicI64::new(1))
    }
}

#[derive(Debug, Default)]
struct Sequences {
    recipes: Sequence,
    recipe_ingredients: Sequence,
    recipe_steps: Sequence,
    ingredients: Sequence,
    tags: Sequence,
}

#[derive(Debug, Default)]
struct Inner {
    tables: RwLock<Tables>,
    sequences: Sequences,
}

/// Shared handle to the in-memory store. Cloning shares the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session with a concrete type, for callers that want to keep
    /// the session without boxing it.
    pub fn session(&self) -> InMemorySession {
        InMemorySession {
            inner: Arc::clone(&self.inner),
            changes: ChangeSet::default(),
        }
    }
}

impl SessionFactory for InMemoryStore {
    fn open_session(&self) -> Box<dyn DataSession> {
        Box::new(self.session())
    }
}

/// One unit of work against an [`InMemoryStore`].
#[derive(Debug)]
pub struct InMemorySession {
    inner: Arc<Inner>,
    changes: ChangeSet,
}

impl DataSession for InMemorySession {
    fn recipes(&self) -> &dyn RecipeRepository {
        self
    }

    fn ingredients(&self) -> &dyn IngredientRepository {
        self
    }

    fn tags(&self) -> &dyn TagRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn unit_of_work(&self) -> &dyn UnitOfWork {
        self
    }
}

#[async_trait]
impl RecipeRepository for InMemorySession {
    async fn next_id(&self) -> DomainResult<RecipeId> {
        Ok(RecipeId::new(self.inner.sequences.recipes.next()))
    }

    async fn next_ingredient_entry_id(&self) -> DomainResult<RecipeIngredientId> {
        Ok(RecipeIngredientId::new(
            self.inner.sequences.recipe_ingredients.next(),
        ))
    }

    async fn next_step_id(&self) -> DomainResult<RecipeStepId> {
        Ok(RecipeStepId::new(self.inner.sequences.recipe_steps.next()))
    }

    async fn find_by_id(&self, id: RecipeId) -> DomainResult<Option<Recipe>> {
        Ok(self.inner.tables.read().recipes.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self.inner.tables.read().recipes.values().cloned().collect();
        recipes.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(recipes)
    }

    fn add(&self, recipe: Recipe) {
        self.changes.stage(PendingChange::AddRecipe(recipe));
    }

    fn update(&self, recipe: Recipe) {
        self.changes.stage(PendingChange::UpdateRecipe(recipe));
    }

    fn remove(&self, id: RecipeId) {
        self.changes.stage(PendingChange::RemoveRecipe(id));
    }
}

#[async_trait]
impl IngredientRepository for InMemorySession {
    async fn next_id(&self) -> DomainResult<IngredientId> {
        Ok(IngredientId::new(self.inner.sequences.ingredients.next()))
    }

    async fn find_by_id(&self, id: IngredientId) -> DomainResult<Option<Ingredient>> {
        Ok(self.inner.tables.read().ingredients.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[IngredientId]) -> DomainResult<Vec<Ingredient>> {
        let tables = self.inner.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| tables.ingredients.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> DomainResult<Vec<Ingredient>> {
        let mut ingredients: Vec<Ingredient> =
            self.inner.tables.read().ingredients.values().cloned().collect();
        ingredients.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(ingredients)
    }

    async fn is_name_taken(&self, name: &str, exclude: Option<IngredientId>) -> DomainResult<bool> {
        Ok(self
            .inner
            .tables
            .read()
            .ingredients
            .values()
            .any(|i| Some(i.id()) != exclude && i.name() == name))
    }

    fn add(&self, ingredient: Ingredient) {
        self.changes.stage(PendingChange::AddIngredient(ingredient));
    }

    fn update(&self, ingredient: Ingredient) {
        self.changes.stage(PendingChange::UpdateIngredient(ingredient));
    }
}

#[async_trait]
impl TagRepository for InMemorySession {
    async fn next_id(&self) -> DomainResult<TagId> {
        Ok(TagId::new(self.inner.sequences.tags.next()))
    }

    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        Ok(self.inner.tables.read().tags.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[TagId]) -> DomainResult<Vec<Tag>> {
        let tables = self.inner.tables.read();
        Ok(ids.iter().filter_map(|id| tables.tags.get(id).cloned()).collect())
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        let mut tags: Vec<Tag> = self.inner.tables.read().tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(tags)
    }

    async fn is_slug_taken(&self, slug: &str) -> DomainResult<bool> {
        Ok(self.inner.tables.read().tags.values().any(|t| t.slug() == slug))
    }

    fn add(&self, tag: Tag) {
        self.changes.stage(PendingChange::AddTag(tag));
    }
}

#[async_trait]
impl UserRepository for InMemorySession {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.inner.tables.read().users.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self.inner.tables.read().users.values().cloned().collect();
        users.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(users)
    }

    async fn is_name_taken(&self, name: &str) -> DomainResult<bool> {
        Ok(self.inner.tables.read().users.values().any(|u| u.name() == name))
    }

    fn add(&self, user: User) {
        self.changes.stage(PendingChange::AddUser(user));
    }
}

#[async_trait]
impl UnitOfWork for InMemorySession {
    async fn save_changes(&self) -> DomainResult<usize> {
        let changes = self.changes.take();
        if changes.is_empty() {
            return Ok(0);
        }
        let count = changes.len();

        let mut tables = self.inner.tables.write();
        let mut next = tables.clone();
        for change in changes {
            next.apply(change)?;
        }
        *tables = next;

        tracing::debug!(changes = count, "in-memory commit applied");
        Ok(count)
    }
}
