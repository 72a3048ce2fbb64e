use std::collections::HashMap;

use domains::ports::{
    DataSession, IngredientRepository, RecipeRepository, TagRepository, UserRepository,
};
use domains::{DomainResult, IngredientId, RecipeId, TagId};

use crate::dto::{RecipeDetailsDto, RecipeIngredientDto, RecipeStepDto, RecipeTagDto};

/// Builds the details view of one recipe: the aggregate plus the display
/// names of its author, ingredients and tags.
pub struct GetRecipeByIdHandler<'a> {
    recipes: &'a dyn RecipeRepository,
    ingredients: &'a dyn IngredientRepository,
    tags: &'a dyn TagRepository,
    users: &'a dyn UserRepository,
}

impl<'a> GetRecipeByIdHandler<'a> {
    pub fn new(
        recipes: &'a dyn RecipeRepository,
        ingredients: &'a dyn IngredientRepository,
        tags: &'a dyn TagRepository,
        users: &'a dyn UserRepository,
    ) -> Self {
        Self {
            recipes,
            ingredients,
            tags,
            users,
        }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(
            session.recipes(),
            session.ingredients(),
            session.tags(),
            session.users(),
        )
    }

    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, recipe_id: RecipeId) -> DomainResult<Option<RecipeDetailsDto>> {
        let Some(recipe) = self.recipes.find_by_id(recipe_id).await? else {
            return Ok(None);
        };

        let author_name = self
            .users
            .find_by_id(recipe.author_id())
            .await?
            .map(|user| user.name().to_owned());

        let ingredient_ids: Vec<IngredientId> =
            recipe.ingredients().iter().map(|e| e.ingredient_id()).collect();
        let names: HashMap<IngredientId, String> = self
            .ingredients
            .find_by_ids(&ingredient_ids)
            .await?
            .into_iter()
            .map(|i| (i.id(), i.name().to_owned()))
            .collect();
        let mut ingredients: Vec<RecipeIngredientDto> = recipe
            .ingredients()
            .iter()
            .map(|entry| RecipeIngredientDto {
                id: entry.id(),
                ingredient_id: entry.ingredient_id(),
                ingredient_name: names.get(&entry.ingredient_id()).cloned().unwrap_or_default(),
                amount: entry.amount(),
                unit: entry.unit(),
                note: entry.note().map(str::to_owned),
            })
            .collect();
        ingredients.sort_by(|a, b| a.ingredient_name.cmp(&b.ingredient_name));

        let mut steps: Vec<RecipeStepDto> =
            recipe.steps().iter().map(RecipeStepDto::from_domain).collect();
        steps.sort_by_key(|s| s.step_number);

        let tag_ids: Vec<TagId> = recipe.tags().iter().map(|t| t.tag_id()).collect();
        let mut tags: Vec<RecipeTagDto> = self
            .tags
            .find_by_ids(&tag_ids)
            .await?
            .iter()
            .map(|tag| RecipeTagDto {
                tag_id: tag.id(),
                name: tag.name().to_owned(),
                slug: tag.slug().to_owned(),
            })
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Some(RecipeDetailsDto {
            id: recipe.id(),
            author_id: recipe.author_id(),
            author_name,
            slug: recipe.slug().to_owned(),
            title: recipe.title().to_owned(),
            description: recipe.description().map(str::to_owned),
            prep_time_minutes: recipe.prep_time_minutes(),
            cook_time_minutes: recipe.cook_time_minutes(),
            servings: recipe.servings(),
            difficulty: recipe.difficulty(),
            is_published: recipe.is_published(),
            created_at_utc: recipe.created_at(),
            updated_at_utc: recipe.updated_at(),
            ingredients,
            steps,
            tags,
        }))
    }
}
