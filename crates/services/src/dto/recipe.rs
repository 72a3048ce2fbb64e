use chrono::{DateTime, Utc};
use domains::{
    IngredientId, MeasurementUnit, Recipe, RecipeDifficulty, RecipeId, RecipeIngredientId,
    RecipeStep, RecipeStepId, TagId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummaryDto {
    pub id: RecipeId,
    pub title: String,
    pub description: Option<String>,
    pub prep_time_minutes: i32,
    pub cook_time_minutes: i32,
    pub servings: u8,
    pub difficulty: RecipeDifficulty,
    pub is_published: bool,
    pub updated_at_utc: DateTime<Utc>,
}

impl RecipeSummaryDto {
    pub fn from_domain(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id(),
            title: recipe.title().to_owned(),
            description: recipe.description().map(str::to_owned),
            prep_time_minutes: recipe.prep_time_minutes(),
            cook_time_minutes: recipe.cook_time_minutes(),
            servings: recipe.servings(),
            difficulty: recipe.difficulty(),
            is_published: recipe.is_published(),
            updated_at_utc: recipe.updated_at(),
        }
    }
}

/// Full view of one recipe with its collections, each in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailsDto {
    pub id: RecipeId,
    pub author_id: UserId,
    pub author_name: Option<String>,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub prep_time_minutes: i32,
    pub cook_time_minutes: i32,
    pub servings: u8,
    pub difficulty: RecipeDifficulty,
    pub is_published: bool,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
    pub ingredients: Vec<RecipeIngredientDto>,
    pub steps: Vec<RecipeStepDto>,
    pub tags: Vec<RecipeTagDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientDto {
    pub id: RecipeIngredientId,
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub unit: MeasurementUnit,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepDto {
    pub id: RecipeStepId,
    pub step_number: i32,
    pub instruction: String,
    pub duration_minutes: Option<i32>,
    pub media_url: Option<String>,
}

impl RecipeStepDto {
    pub fn from_domain(step: &RecipeStep) -> Self {
        Self {
            id: step.id(),
            step_number: step.step_number(),
            instruction: step.instruction().to_owned(),
            duration_minutes: step.duration_minutes(),
            media_url: step.media_url().map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeTagDto {
    pub tag_id: TagId,
    pub name: String,
    pub slug: String,
}
