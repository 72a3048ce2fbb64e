use domains::ports::{DataSession, IngredientRepository};
use domains::DomainResult;

use crate::dto::IngredientSummaryDto;

pub struct ListIngredientsHandler<'a> {
    ingredients: &'a dyn IngredientRepository,
}

impl<'a> ListIngredientsHandler<'a> {
    pub fn new(ingredients: &'a dyn IngredientRepository) -> Self {
        Self { ingredients }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.ingredients())
    }

    /// All ingredients ordered by name.
    pub async fn handle(&self) -> DomainResult<Vec<IngredientSummaryDto>> {
        let ingredients = self.ingredients.list().await?;
        Ok(ingredients.iter().map(IngredientSummaryDto::from_domain).collect())
    }
}
