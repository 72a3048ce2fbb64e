use domains::ports::{DataSession, RecipeRepository, UnitOfWork};
use domains::{DomainError, RecipeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeleteRecipeError {
    #[error("recipe {0} not found")]
    NotFound(RecipeId),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Removes a recipe together with its steps, ingredient entries and tags.
pub struct DeleteRecipeHandler<'a> {
    recipes: &'a dyn RecipeRepository,
    unit_of_work: &'a dyn UnitOfWork,
}

impl<'a> DeleteRecipeHandler<'a> {
    pub fn new(recipes: &'a dyn RecipeRepository, unit_of_work: &'a dyn UnitOfWork) -> Self {
        Self {
            recipes,
            unit_of_work,
        }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.recipes(), session.unit_of_work())
    }

    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, recipe_id: RecipeId) -> Result<(), DeleteRecipeError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(DeleteRecipeError::NotFound(recipe_id));
        }
        self.recipes.remove(recipe_id);
        self.unit_of_work.save_changes().await?;
        tracing::info!("recipe deleted");
        Ok(())
    }
}
