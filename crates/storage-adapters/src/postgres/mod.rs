//! # PostgreSQL store
//!
//! Runtime-checked `sqlx` queries against the schema in `migrations/`.
//! Reads go straight to the pool; staged changes are written in a single
//! transaction when the session commits.

mod commit;
mod rows;

use async_trait::async_trait;
use domains::ports::{
    DataSession, IngredientRepository, RecipeRepository, SessionFactory, TagRepository, UnitOfWork,
    UserRepository,
};
use domains::{
    DomainResult, Ingredient, IngredientId, Recipe, RecipeId, RecipeIngredientId, RecipeStepId,
    Tag, TagId, User, UserId,
};
use sqlx::postgres::{PgPool, PgPoolOptions};

use self::rows::{
    EntryRow, IngredientRow, RecipeChildren, RecipeRow, RecipeTagRow, StepRow, TagRow, UserRow,
};
use crate::changes::{ChangeSet, PendingChange};
use crate::error::StorageError;

const RECIPE_SELECT: &str = "SELECT id, author_id, slug, title, description, prep_time_minutes, \
     cook_time_minutes, servings, difficulty, is_published, created_at_utc, updated_at_utc, \
     row_version FROM recipes";
const INGREDIENT_SELECT: &str = "SELECT id, name, plural_name, default_unit, is_active, \
     created_at_utc, updated_at_utc FROM ingredients";
const TAG_SELECT: &str = "SELECT id, name, slug, created_at_utc, updated_at_utc FROM tags";
const USER_SELECT: &str = "SELECT id, name, created_at_utc, updated_at_utc FROM users";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies any pending migrations from `migrations/`.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl SessionFactory for PostgresStore {
    fn open_session(&self) -> Box<dyn DataSession> {
        Box::new(PostgresSession {
            pool: self.pool.clone(),
            changes: ChangeSet::default(),
        })
    }
}

pub struct PostgresSession {
    pool: PgPool,
    changes: ChangeSet,
}

impl PostgresSession {
    async fn next_value(&self, table: &str) -> Result<i64, StorageError> {
        let value = sqlx::query_scalar::<_, i64>("SELECT nextval(pg_get_serial_sequence($1, 'id'))")
            .bind(table)
            .fetch_one(&self.pool)
            .await?;
        Ok(value)
    }

    async fn load_recipes(&self, rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, StorageError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let steps = sqlx::query_as::<_, StepRow>(
            "SELECT id, recipe_id, step_number, instruction, duration_minutes, media_url \
             FROM recipe_steps WHERE recipe_id = ANY($1)",
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await?;
        let entries = sqlx::query_as::<_, EntryRow>(
            "SELECT id, recipe_id, ingredient_id, amount, unit, note \
             FROM recipe_ingredients WHERE recipe_id = ANY($1)",
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await?;
        let tags = sqlx::query_as::<_, RecipeTagRow>(
            "SELECT recipe_id, tag_id FROM recipe_tags WHERE recipe_id = ANY($1)",
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let mut children = RecipeChildren::collect(steps, entries, tags)?;
        rows.into_iter().map(|row| children.assemble(row)).collect()
    }
}

impl DataSession for PostgresSession {
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
impl RecipeRepository for PostgresSession {
    async fn next_id(&self) -> DomainResult<RecipeId> {
        Ok(RecipeId::new(self.next_value("recipes").await?))
    }

    async fn next_ingredient_entry_id(&self) -> DomainResult<RecipeIngredientId> {
        Ok(RecipeIngredientId::new(
            self.next_value("recipe_ingredients").await?,
        ))
    }

    async fn next_step_id(&self) -> DomainResult<RecipeStepId> {
        Ok(RecipeStepId::new(self.next_value("recipe_steps").await?))
    }

    async fn find_by_id(&self, id: RecipeId) -> DomainResult<Option<Recipe>> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!("{RECIPE_SELECT} WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.load_recipes(vec![row]).await?.pop())
    }

    async fn list(&self) -> DomainResult<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, RecipeRow>(&format!("{RECIPE_SELECT} ORDER BY title"))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(self.load_recipes(rows).await?)
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
impl IngredientRepository for PostgresSession {
    async fn next_id(&self) -> DomainResult<IngredientId> {
        Ok(IngredientId::new(self.next_value("ingredients").await?))
    }

    async fn find_by_id(&self, id: IngredientId) -> DomainResult<Option<Ingredient>> {
        let row = sqlx::query_as::<_, IngredientRow>(&format!("{INGREDIENT_SELECT} WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(IngredientRow::into_domain).transpose()?)
    }

    async fn find_by_ids(&self, ids: &[IngredientId]) -> DomainResult<Vec<Ingredient>> {
        let ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();
        let query = format!("{INGREDIENT_SELECT} WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, IngredientRow>(&query)
            .bind(ids.as_slice())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(IngredientRow::into_domain)
            .collect::<Result<_, _>>()?)
    }

    async fn list(&self) -> DomainResult<Vec<Ingredient>> {
        let rows = sqlx::query_as::<_, IngredientRow>(&format!("{INGREDIENT_SELECT} ORDER BY name"))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(IngredientRow::into_domain)
            .collect::<Result<_, _>>()?)
    }

    async fn is_name_taken(&self, name: &str, exclude: Option<IngredientId>) -> DomainResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM ingredients \
             WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude.map(IngredientId::value))
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(taken)
    }

    fn add(&self, ingredient: Ingredient) {
        self.changes.stage(PendingChange::AddIngredient(ingredient));
    }

    fn update(&self, ingredient: Ingredient) {
        self.changes.stage(PendingChange::UpdateIngredient(ingredient));
    }
}

#[async_trait]
impl TagRepository for PostgresSession {
    async fn next_id(&self) -> DomainResult<TagId> {
        Ok(TagId::new(self.next_value("tags").await?))
    }

    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>(&format!("{TAG_SELECT} WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(TagRow::into_domain))
    }

    async fn find_by_ids(&self, ids: &[TagId]) -> DomainResult<Vec<Tag>> {
        let ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();
        let rows = sqlx::query_as::<_, TagRow>(&format!("{TAG_SELECT} WHERE id = ANY($1)"))
            .bind(ids.as_slice())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(TagRow::into_domain).collect())
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>(&format!("{TAG_SELECT} ORDER BY name"))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(TagRow::into_domain).collect())
    }

    async fn is_slug_taken(&self, slug: &str) -> DomainResult<bool> {
        let taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM tags WHERE slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(taken)
    }

    fn add(&self, tag: Tag) {
        self.changes.stage(PendingChange::AddTag(tag));
    }
}

#[async_trait]
impl UserRepository for PostgresSession {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{USER_SELECT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(UserRow::into_domain))
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("{USER_SELECT} ORDER BY name"))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(UserRow::into_domain).collect())
    }

    async fn is_name_taken(&self, name: &str) -> DomainResult<bool> {
        let taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(taken)
    }

    fn add(&self, user: User) {
        self.changes.stage(PendingChange::AddUser(user));
    }
}

#[async_trait]
impl UnitOfWork for PostgresSession {
    async fn save_changes(&self) -> DomainResult<usize> {
        let changes = self.changes.take();
        if changes.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        for change in &changes {
            commit::apply(&mut *tx, change).await?;
        }
        tx.commit().await.map_err(StorageError::from)?;

        tracing::debug!(changes = changes.len(), "transaction committed");
        Ok(changes.len())
    }
}
