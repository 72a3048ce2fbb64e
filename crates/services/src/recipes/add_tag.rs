use domains::ports::{DataSession, RecipeRepository, TagRepository, UnitOfWork};
use domains::{DomainError, RecipeId, TagId};
use thiserror::Error;

use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy)]
pub struct AddTagToRecipeCommand {
    pub recipe_id: RecipeId,
    pub tag_id: TagId,
}

impl Validate for AddTagToRecipeCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.range("tagId", self.tag_id.value(), 1, i64::MAX);
        errors.into_result()
    }
}

#[derive(Debug, Error)]
pub enum AddTagToRecipeError {
    #[error("recipe {0} not found")]
    RecipeNotFound(RecipeId),
    #[error("tag {0} not found")]
    TagNotFound(TagId),
    #[error("tag {0} is already assigned to this recipe")]
    TagAlreadyAssigned(TagId),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct AddTagToRecipeHandler<'a> {
    recipes: &'a dyn RecipeRepository,
    tags: &'a dyn TagRepository,
    unit_of_work: &'a dyn UnitOfWork,
}

impl<'a> AddTagToRecipeHandler<'a> {
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
    pub async fn handle(&self, command: AddTagToRecipeCommand) -> Result<(), AddTagToRecipeError> {
        let Some(mut recipe) = self.recipes.find_by_id(command.recipe_id).await? else {
            return Err(AddTagToRecipeError::RecipeNotFound(command.recipe_id));
        };
        if self.tags.find_by_id(command.tag_id).await?.is_none() {
            return Err(AddTagToRecipeError::TagNotFound(command.tag_id));
        }
        if !recipe.add_tag(command.tag_id) {
            return Err(AddTagToRecipeError::TagAlreadyAssigned(command.tag_id));
        }

        self.recipes.update(recipe);
        self.unit_of_work.save_changes().await?;
        tracing::info!("tag added to recipe");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::ports::{MockRecipeRepository, MockTagRepository, MockUnitOfWork};
    use domains::{Recipe, RecipeContent, RecipeDifficulty, Tag, UserId};

    fn soup(tags: &[TagId]) -> Recipe {
        let mut recipe = Recipe::create(
            RecipeId::new(3),
            UserId::generate(),
            "soup-12345678",
            RecipeContent {
                title: "Soup",
                description: None,
                prep_time_minutes: 5,
                cook_time_minutes: 30,
                servings: 2,
                difficulty: RecipeDifficulty::Easy,
            },
        )
        .unwrap();
        for tag in tags {
            recipe.add_tag(*tag);
        }
        recipe
    }

    fn cmd() -> AddTagToRecipeCommand {
        AddTagToRecipeCommand {
            recipe_id: RecipeId::new(3),
            tag_id: TagId::new(8),
        }
    }

    fn tags_with_vegan() -> MockTagRepository {
        let mut tags = MockTagRepository::new();
        tags.expect_find_by_id()
            .returning(|id| Ok(Some(Tag::create(id, "Vegan", "vegan").unwrap())));
        tags
    }

    #[tokio::test]
    async fn assigns_tag_and_commits() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_by_id().returning(|_| Ok(Some(soup(&[]))));
        recipes
            .expect_update()
            .withf(|r| r.has_tag(TagId::new(8)))
            .times(1)
            .return_const(());
        let tags = tags_with_vegan();
        let mut uow = MockUnitOfWork::new();
        uow.expect_save_changes().times(1).returning(|| Ok(1));

        AddTagToRecipeHandler::new(&recipes, &tags, &uow)
            .handle(cmd())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn already_assigned_is_rejected_without_commit() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(|_| Ok(Some(soup(&[TagId::new(8)]))));
        recipes.expect_update().times(0);
        let tags = tags_with_vegan();
        let mut uow = MockUnitOfWork::new();
        uow.expect_save_changes().times(0);

        let result = AddTagToRecipeHandler::new(&recipes, &tags, &uow).handle(cmd()).await;
        assert!(matches!(result, Err(AddTagToRecipeError::TagAlreadyAssigned(_))));
    }

    #[tokio::test]
    async fn unknown_tag_is_not_found() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_by_id().returning(|_| Ok(Some(soup(&[]))));
        let mut tags = MockTagRepository::new();
        tags.expect_find_by_id().returning(|_| Ok(None));
        let mut uow = MockUnitOfWork::new();
        uow.expect_save_changes().times(0);

        let result = AddTagToRecipeHandler::new(&recipes, &tags, &uow).handle(cmd()).await;
        assert!(matches!(result, Err(AddTagToRecipeError::TagNotFound(id)) if id == TagId::new(8)));
    }

    #[test]
    fn tag_id_must_be_positive() {
        let command = AddTagToRecipeCommand {
            tag_id: TagId::new(0),
            ..cmd()
        };
        assert!(command.validate().unwrap_err().contains("tagId"));
    }
}
