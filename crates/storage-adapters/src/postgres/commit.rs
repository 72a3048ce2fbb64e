//! Writes staged changes inside the commit transaction.
//!
//! Recipe children are replaced wholesale on update: the aggregate is the
//! unit of consistency, so its rows are rewritten from the entity.

use domains::{Ingredient, Recipe, Tag, User};
use sqlx::PgConnection;

use crate::changes::PendingChange;
use crate::error::StorageError;

pub(super) async fn apply(
    conn: &mut PgConnection,
    change: &PendingChange,
) -> Result<(), StorageError> {
    match change {
        PendingChange::AddRecipe(recipe) => insert_recipe(conn, recipe).await,
        PendingChange::UpdateRecipe(recipe) => update_recipe(conn, recipe).await,
        PendingChange::RemoveRecipe(id) => {
            let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
                .bind(id.value())
                .execute(&mut *conn)
                .await?;
            if result.rows_affected() == 0 {
                return Err(StorageError::missing("recipe", id));
            }
            Ok(())
        }
        PendingChange::AddIngredient(ingredient) => insert_ingredient(conn, ingredient).await,
        PendingChange::UpdateIngredient(ingredient) => update_ingredient(conn, ingredient).await,
        PendingChange::AddTag(tag) => insert_tag(conn, tag).await,
        PendingChange::AddUser(user) => insert_user(conn, user).await,
    }
}

async fn insert_recipe(conn: &mut PgConnection, recipe: &Recipe) -> Result<(), StorageError> {
    sqlx::query(
        "INSERT INTO recipes (id, author_id, slug, title, description, prep_time_minutes, \
         cook_time_minutes, servings, difficulty, is_published, created_at_utc, updated_at_utc, \
         row_version) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 0)",
    )
    .bind(recipe.id().value())
    .bind(recipe.author_id().as_uuid())
    .bind(recipe.slug())
    .bind(recipe.title())
    .bind(recipe.description())
    .bind(recipe.prep_time_minutes())
    .bind(recipe.cook_time_minutes())
    .bind(i16::from(recipe.servings()))
    .bind(recipe.difficulty().code())
    .bind(recipe.is_published())
    .bind(recipe.created_at())
    .bind(recipe.updated_at())
    .execute(&mut *conn)
    .await?;

    insert_children(conn, recipe).await
}

async fn update_recipe(conn: &mut PgConnection, recipe: &Recipe) -> Result<(), StorageError> {
    let result = sqlx::query(
        "UPDATE recipes SET slug = $2, title = $3, description = $4, prep_time_minutes = $5, \
         cook_time_minutes = $6, servings = $7, difficulty = $8, is_published = $9, \
         updated_at_utc = $10, row_version = row_version + 1 \
         WHERE id = $1",
    )
    .bind(recipe.id().value())
    .bind(recipe.slug())
    .bind(recipe.title())
    .bind(recipe.description())
    .bind(recipe.prep_time_minutes())
    .bind(recipe.cook_time_minutes())
    .bind(i16::from(recipe.servings()))
    .bind(recipe.difficulty().code())
    .bind(recipe.is_published())
    .bind(recipe.updated_at())
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(StorageError::missing("recipe", recipe.id()));
    }

    for table in ["recipe_steps", "recipe_ingredients", "recipe_tags"] {
        sqlx::query(&format!("DELETE FROM {table} WHERE recipe_id = $1"))
            .bind(recipe.id().value())
            .execute(&mut *conn)
            .await?;
    }
    insert_children(conn, recipe).await
}

async fn insert_children(conn: &mut PgConnection, recipe: &Recipe) -> Result<(), StorageError> {
    for step in recipe.steps() {
        sqlx::query(
            "INSERT INTO recipe_steps \
             (id, recipe_id, step_number, instruction, duration_minutes, media_url) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(step.id().value())
        .bind(recipe.id().value())
        .bind(step.step_number())
        .bind(step.instruction())
        .bind(step.duration_minutes())
        .bind(step.media_url())
        .execute(&mut *conn)
        .await?;
    }

    for entry in recipe.ingredients() {
        sqlx::query(
            "INSERT INTO recipe_ingredients (id, recipe_id, ingredient_id, amount, unit, note) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(entry.id().value())
        .bind(recipe.id().value())
        .bind(entry.ingredient_id().value())
        .bind(entry.amount())
        .bind(entry.unit().code())
        .bind(entry.note())
        .execute(&mut *conn)
        .await?;
    }

    for tag in recipe.tags() {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
            .bind(recipe.id().value())
            .bind(tag.tag_id().value())
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn insert_ingredient(
    conn: &mut PgConnection,
    ingredient: &Ingredient,
) -> Result<(), StorageError> {
    sqlx::query(
        "INSERT INTO ingredients \
         (id, name, plural_name, default_unit, is_active, created_at_utc, updated_at_utc) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(ingredient.id().value())
    .bind(ingredient.name())
    .bind(ingredient.plural_name())
    .bind(ingredient.default_unit().map(|u| u.code()))
    .bind(ingredient.is_active())
    .bind(ingredient.created_at())
    .bind(ingredient.updated_at())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn update_ingredient(
    conn: &mut PgConnection,
    ingredient: &Ingredient,
) -> Result<(), StorageError> {
    let result = sqlx::query(
        "UPDATE ingredients SET name = $2, plural_name = $3, default_unit = $4, is_active = $5, \
         updated_at_utc = $6 WHERE id = $1",
    )
    .bind(ingredient.id().value())
    .bind(ingredient.name())
    .bind(ingredient.plural_name())
    .bind(ingredient.default_unit().map(|u| u.code()))
    .bind(ingredient.is_active())
    .bind(ingredient.updated_at())
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(StorageError::missing("ingredient", ingredient.id()));
    }
    Ok(())
}

async fn insert_tag(conn: &mut PgConnection, tag: &Tag) -> Result<(), StorageError> {
    sqlx::query(
        "INSERT INTO tags (id, name, slug, created_at_utc, updated_at_utc) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(tag.id().value())
    .bind(tag.name())
    .bind(tag.slug())
    .bind(tag.created_at())
    .bind(tag.updated_at())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_user(conn: &mut PgConnection, user: &User) -> Result<(), StorageError> {
    sqlx::query(
        "INSERT INTO users (id, name, created_at_utc, updated_at_utc) VALUES ($1, $2, $3, $4)",
    )
    .bind(user.id().as_uuid())
    .bind(user.name())
    .bind(user.created_at())
    .bind(user.updated_at())
    .execute(&mut *conn)
    .await?;
    Ok(())
}
