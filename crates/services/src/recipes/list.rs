use domains::ports::{DataSession, RecipeRepository};
use domains::DomainResult;

use crate::dto::RecipeSummaryDto;

pub struct ListRecipesHandler<'a> {
    recipes: &'a dyn RecipeRepository,
}

impl<'a> ListRecipesHandler<'a> {
    pub fn new(recipes: &'a dyn RecipeRepository) -> Self {
        Self { recipes }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.recipes())
    }

    /// All recipes ordered by title.
    pub async fn handle(&self) -> DomainResult<Vec<RecipeSummaryDto>> {
        let recipes = self.recipes.list().await?;
        Ok(recipes.iter().map(RecipeSummaryDto::from_domain).collect())
    }
}
