use domains::ports::{DataSession, RecipeRepository, TagRepository, UnitOfWork};
use domains::{DomainError, RecipeId, TagId};
use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub struct RemoveTagFromRecipeCommand {
    pub recipe_id: RecipeId,
    pub tag_id: TagId,
}

#[derive(Debug, Error)]
pub enum RemoveTagFromRecipeError {
    #[error("recipe {0} not found")]
    RecipeNotFound(RecipeId),
    #[error("tag {0} not found")]
    TagNotFound(TagId),
    #[error("tag {0} is not assigned to this recipe")]
    TagNotAssigned(TagId),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct RemoveTagFromRecipeHandler<'a> {
    recipes: &'a dyn RecipeRepository,
    tags: &'a dyn TagRepository,
    unit_of_work: &'a dyn UnitOfWork,
}

impl<'a> RemoveTagFromRecipeHandler<'a> {
    pub fn new(
        recipes: &'a dyn RecipeRepository,
        tags: &'a dyn TagRepository,
        unit_of_work: &'a dyn UnitOfWork,
    ) -> Self {
        Self {
            recipes,
            tags,
            unit_of_work,
        }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.recipes(), session.tags(), session.unit_of_work())
    }

    #[tracing::instrument(
        skip_all,
        fields(recipe_id = %command.recipe_id, tag_id = %command.tag_id)
    )]
    pub async fn handle(
        &self,
        command: RemoveTagFromRecipeCommand,
    ) -> Result<(), RemoveTagFromRecipeError> {
        let Some(mut recipe) = self.recipes.find_by_id(command.recipe_id).await? else {
            return Err(RemoveTagFromRecipeError::RecipeNotFound(command.recipe_id));
        };
        if self.tags.find_by_id(command.tag_id).await?.is_none() {
            return Err(RemoveTagFromRecipeError::TagNotFound(command.tag_id));
        }
        if !recipe.remove_tag(command.tag_id) {
            return Err(RemoveTagFromRecipeError::TagNotAssigned(command.tag_id));
        }

        self.recipes.update(recipe);
        self.unit_of_work.save_changes().await?;
        tracing::info!("tag removed from recipe");
        Ok(())
    }
}
