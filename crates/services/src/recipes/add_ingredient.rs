use domains::ports::{DataSession, IngredientRepository, RecipeRepository, UnitOfWork};
use domains::{DomainError, IngredientId, MeasurementUnit, RecipeId, RecipeIngredient};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::dto::RecipeIngredientDto;
use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone)]
pub struct AddIngredientToRecipeCommand {
    pub recipe_id: RecipeId,
    pub ingredient_id: IngredientId,
    pub amount: Decimal,
    pub unit: MeasurementUnit,
    pub note: Option<String>,
}

impl AddIngredientToRecipeCommand {
    pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
    pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
}

impl Validate for AddIngredientToRecipeCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .range("ingredientId", self.ingredient_id.value(), 1, i64::MAX)
            .range("amount", self.amount, Self::MIN_AMOUNT, Self::MAX_AMOUNT)
            .max_length("note", self.note.as_deref(), RecipeIngredient::MAX_NOTE_LENGTH);
        errors.into_result()
    }
}

#[derive(Debug, Error)]
pub enum AddIngredientToRecipeError {
    #[error("recipe {0} not found")]
    RecipeNotFound(RecipeId),
    #[error("ingredient {0} not found")]
    IngredientNotFound(IngredientId),
    #[error("ingredient {ingredient_id} is already assigned in {unit:?}")]
    IngredientAlreadyAssigned {
        ingredient_id: IngredientId,
        unit: MeasurementUnit,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct AddIngredientToRecipeHandler<'a> {
    recipes: &'a dyn RecipeRepository,
    ingredients: &'a dyn IngredientRepository,
    unit_of_work: &'a dyn UnitOfWork,
}

impl<'a> AddIngredientToRecipeHandler<'a> {
    pub fn new(
        recipes: &'a dyn RecipeRepository,
        ingredients: &'a dyn IngredientRepository,
        unit_of_work: &'a dyn UnitOfWork,
    ) -> Self {
        Self {
            recipes,
            ingredients,
            unit_of_work,
        }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.recipes(), session.ingredients(), session.unit_of_work())
    }

    #[tracing::instrument(
        skip_all,
        fields(recipe_id = %command.recipe_id, ingredient_id = %command.ingredient_id)
    )]
    pub async fn handle(
        &self,
        command: AddIngredientToRecipeCommand,
    ) -> Result<RecipeIngredientDto, AddIngredientToRecipeError> {
        let Some(mut recipe) = self.recipes.find_by_id(command.recipe_id).await? else {
            return Err(AddIngredientToRecipeError::RecipeNotFound(command.recipe_id));
        };
        let Some(ingredient) = self.ingredients.find_by_id(command.ingredient_id).await? else {
            return Err(AddIngredientToRecipeError::IngredientNotFound(command.ingredient_id));
        };
        if recipe.has_ingredient(command.ingredient_id, command.unit) {
            return Err(AddIngredientToRecipeError::IngredientAlreadyAssigned {
                ingredient_id: command.ingredient_id,
                unit: command.unit,
            });
        }

        let entry_id = self.recipes.next_ingredient_entry_id().await?;
        let entry = recipe.add_ingredient(
            entry_id,
            command.ingredient_id,
            command.amount,
            command.unit,
            command.note.as_deref(),
        )?;
        let dto = RecipeIngredientDto {
            id: entry.id(),
            ingredient_id: ingredient.id(),
            ingredient_name: ingredient.name().to_owned(),
            amount: entry.amount(),
            unit: entry.unit(),
            note: entry.note().map(str::to_owned),
        };

        self.recipes.update(recipe);
        self.unit_of_work.save_changes().await?;

        tracing::info!(entry_id = %entry_id, "ingredient added to recipe");
        Ok(dto)
    }
}
