use domains::ports::{DataSession, RecipeRepository, UnitOfWork, UserRepository};
use domains::{DomainError, Recipe, RecipeContent, RecipeDifficulty, UserId};
use thiserror::Error;

use crate::dto::RecipeSummaryDto;
use crate::slug::recipe_slug;
use crate::validation::{Validate, ValidationErrors};

/// Longest prep or cook time accepted from callers: one day.
pub const MAX_TIME_MINUTES: i32 = 1440;

#[derive(Debug, Clone)]
pub struct CreateRecipeCommand {
    pub author_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub prep_time_minutes: i32,
    pub cook_time_minutes: i32,
    pub servings: i32,
    pub difficulty: RecipeDifficulty,
    pub is_published: bool,
}

impl Validate for CreateRecipeCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("title", &self.title)
            .max_length("title", Some(&self.title), Recipe::MAX_TITLE_LENGTH)
            .max_length(
                "description",
                self.description.as_deref(),
                Recipe::MAX_DESCRIPTION_LENGTH,
            )
            .range("prepTimeMinutes", self.prep_time_minutes, 0, MAX_TIME_MINUTES)
            .range("cookTimeMinutes", self.cook_time_minutes, 0, MAX_TIME_MINUTES)
            .range("servings", self.servings, 1, i32::from(u8::MAX));
        errors.into_result()
    }
}

#[derive(Debug, Error)]
pub enum CreateRecipeError {
    #[error("author is missing or does not exist")]
    InvalidAuthor,
    #[error("recipe title must not be blank")]
    InvalidTitle,
    #[error("servings must be between 1 and 255")]
    InvalidServings,
    #[error("prep and cook times must not be negative")]
    InvalidTiming,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct CreateRecipeHandler<'a> {
    recipes: &'a dyn RecipeRepository,
    users: &'a dyn UserRepository,
    unit_of_work: &'a dyn UnitOfWork,
}

impl<'a> CreateRecipeHandler<'a> {
    pub fn new(
        recipes: &'a dyn RecipeRepository,
        users: &'a dyn UserRepository,
        unit_of_work: &'a dyn UnitOfWork,
    ) -> Self {
        Self {
            recipes,
            users,
            unit_of_work,
        }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.recipes(), session.users(), session.unit_of_work())
    }

    #[tracing::instrument(skip_all, fields(author_id = %command.author_id))]
    pub async fn handle(
        &self,
        command: CreateRecipeCommand,
    ) -> Result<RecipeSummaryDto, CreateRecipeError> {
        if command.author_id.is_nil() {
            return Err(CreateRecipeError::InvalidAuthor);
        }
        if command.title.trim().is_empty() {
            return Err(CreateRecipeError::InvalidTitle);
        }
        let servings = match u8::try_from(command.servings) {
            Ok(servings) if servings > 0 => servings,
            _ => return Err(CreateRecipeError::InvalidServings),
        };
        if command.prep_time_minutes < 0 || command.cook_time_minutes < 0 {
            return Err(CreateRecipeError::InvalidTiming);
        }
        if self.users.find_by_id(command.author_id).await?.is_none() {
            tracing::debug!("author does not exist");
            return Err(CreateRecipeError::InvalidAuthor);
        }

        let id = self.recipes.next_id().await?;
        let slug = recipe_slug(&command.title);
        let mut recipe = Recipe::create(
            id,
            command.author_id,
            &slug,
            RecipeContent {
                title: &command.title,
                description: command.description.as_deref(),
                prep_time_minutes: command.prep_time_minutes,
                cook_time_minutes: command.cook_time_minutes,
                servings,
                difficulty: command.difficulty,
            },
        )?;
        if command.is_published {
            recipe.publish();
        }

        let dto = RecipeSummaryDto::from_domain(&recipe);
        self.recipes.add(recipe);
        self.unit_of_work.save_changes().await?;

        tracing::info!(recipe_id = %id, %slug, "recipe created");
        Ok(dto)
    }
}
