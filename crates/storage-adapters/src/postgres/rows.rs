//! Row shapes read back from PostgreSQL and their mapping onto entities.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use domains::{
    Ingredient, IngredientId, IngredientParts, MeasurementUnit, Recipe, RecipeDifficulty, RecipeId,
    RecipeIngredient, RecipeIngredientId, RecipeParts, RecipeStep, RecipeStepId, RecipeTag, Tag,
    TagId, TagParts, User, UserId, UserParts,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::StorageError;

#[derive(Debug, sqlx::FromRow)]
pub(super) struct UserRow {
    id: Uuid,
    name: String,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: DateTime<Utc>,
}

impl UserRow {
    pub(super) fn into_domain(self) -> User {
        User::restore(UserParts {
            id: UserId::from_uuid(self.id),
            name: self.name,
            created_at: self.created_at_utc,
            updated_at: self.updated_at_utc,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct IngredientRow {
    id: i64,
    name: String,
    plural_name: Option<String>,
    default_unit: Option<i16>,
    is_active: bool,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: DateTime<Utc>,
}

impl IngredientRow {
    pub(super) fn into_domain(self) -> Result<Ingredient, StorageError> {
        let default_unit = self
            .default_unit
            .map(|code| unit_from_code("ingredients", code))
            .transpose()?;
        Ok(Ingredient::restore(IngredientParts {
            id: IngredientId::new(self.id),
            name: self.name,
            plural_name: self.plural_name,
            default_unit,
            is_active: self.is_active,
            created_at: self.created_at_utc,
            updated_at: self.updated_at_utc,
        }))
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct TagRow {
    id: i64,
    name: String,
    slug: String,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: DateTime<Utc>,
}

impl TagRow {
    pub(super) fn into_domain(self) -> Tag {
        Tag::restore(TagParts {
            id: TagId::new(self.id),
            name: self.name,
            slug: self.slug,
            created_at: self.created_at_utc,
            updated_at: self.updated_at_utc,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct RecipeRow {
    pub(super) id: i64,
    author_id: Uuid,
    slug: String,
    title: String,
    description: Option<String>,
    prep_time_minutes: i32,
    cook_time_minutes: i32,
    servings: i16,
    difficulty: i16,
    is_published: bool,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: DateTime<Utc>,
    row_version: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct StepRow {
    id: i64,
    recipe_id: i64,
    step_number: i32,
    instruction: String,
    duration_minutes: Option<i32>,
    media_url: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct EntryRow {
    id: i64,
    recipe_id: i64,
    ingredient_id: i64,
    amount: Decimal,
    unit: i16,
    note: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct RecipeTagRow {
    recipe_id: i64,
    tag_id: i64,
}

/// Child rows of a batch of recipes, grouped by recipe id.
#[derive(Default)]
pub(super) struct RecipeChildren {
    steps: HashMap<i64, Vec<RecipeStep>>,
    ingredients: HashMap<i64, Vec<RecipeIngredient>>,
    tags: HashMap<i64, Vec<RecipeTag>>,
}

impl RecipeChildren {
    pub(super) fn collect(
        steps: Vec<StepRow>,
        entries: Vec<EntryRow>,
        tags: Vec<RecipeTagRow>,
    ) -> Result<Self, StorageError> {
        let mut children = Self::default();
        for row in steps {
            children.steps.entry(row.recipe_id).or_default().push(RecipeStep::restore(
                RecipeStepId::new(row.id),
                row.step_number,
                row.instruction,
                row.duration_minutes,
                row.media_url,
            ));
        }
        for row in entries {
            let unit = unit_from_code("recipe_ingredients", row.unit)?;
            children
                .ingredients
                .entry(row.recipe_id)
                .or_default()
                .push(RecipeIngredient::restore(
                    RecipeIngredientId::new(row.id),
                    IngredientId::new(row.ingredient_id),
                    row.amount,
                    unit,
                    row.note,
                ));
        }
        for row in tags {
            children
                .tags
                .entry(row.recipe_id)
                .or_default()
                .push(RecipeTag::new(TagId::new(row.tag_id)));
        }
        Ok(children)
    }

    pub(super) fn assemble(&mut self, row: RecipeRow) -> Result<Recipe, StorageError> {
        let servings = u8::try_from(row.servings)
            .map_err(|_| StorageError::corrupt("recipes", format!("servings {}", row.servings)))?;
        let difficulty = RecipeDifficulty::from_code(row.difficulty).ok_or_else(|| {
            StorageError::corrupt("recipes", format!("difficulty {}", row.difficulty))
        })?;
        Ok(Recipe::restore(RecipeParts {
            id: RecipeId::new(row.id),
            author_id: UserId::from_uuid(row.author_id),
            slug: row.slug,
            title: row.title,
            description: row.description,
            prep_time_minutes: row.prep_time_minutes,
            cook_time_minutes: row.cook_time_minutes,
            servings,
            difficulty,
            is_published: row.is_published,
            created_at: row.created_at_utc,
            updated_at: row.updated_at_utc,
            version: row.row_version,
            steps: self.steps.remove(&row.id).unwrap_or_default(),
            ingredients: self.ingredients.remove(&row.id).unwrap_or_default(),
            tags: self.tags.remove(&row.id).unwrap_or_default(),
        }))
    }
}

fn unit_from_code(table: &'static str, code: i16) -> Result<MeasurementUnit, StorageError> {
    MeasurementUnit::from_code(code)
        .ok_or_else(|| StorageError::corrupt(table, format!("unit {code}")))
}
