use domains::ports::{DataSession, IngredientRepository, UnitOfWork};
use domains::{DomainError, Ingredient, IngredientId};
use thiserror::Error;

use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone)]
pub struct RenameIngredientCommand {
    pub id: IngredientId,
    pub name: String,
    pub plural_name: Option<String>,
}

impl Validate for RenameIngredientCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("name", &self.name)
            .max_length(
                "name",
                Some(&Ingredient::normalize_name(&self.name)),
                Ingredient::MAX_NAME_LENGTH,
            )
            .max_length(
                "pluralName",
                self.plural_name.as_deref().map(Ingredient::normalize_name).as_deref(),
                Ingredient::MAX_NAME_LENGTH,
            );
        errors.into_result()
    }
}

#[derive(Debug, Error)]
pub enum RenameIngredientError {
    #[error(
        "ingredient names must not be blank or longer than {} characters",
        Ingredient::MAX_NAME_LENGTH
    )]
    InvalidName,
    #[error("ingredient {0} not found")]
    NotFound(IngredientId),
    #[error("an ingredient named '{0}' already exists")]
    NameAlreadyExists(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct RenameIngredientHandler<'a> {
    ingredients: &'a dyn IngredientRepository,
    unit_of_work: &'a dyn UnitOfWork,
}

impl<'a> RenameIngredientHandler<'a> {
    pub fn new(
        ingredients: &'a dyn IngredientRepository,
        unit_of_work: &'a dyn UnitOfWork,
    ) -> Self {
        Self {
            ingredients,
            unit_of_work,
        }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.ingredients(), session.unit_of_work())
    }

    #[tracing::instrument(skip_all, fields(ingredient_id = %command.id))]
    pub async fn handle(
        &self,
        command: RenameIngredientCommand,
    ) -> Result<(), RenameIngredientError> {
        let plural_fits = command
            .plural_name
            .as_deref()
            .is_none_or(Ingredient::fits_name_limit);
        if command.name.trim().is_empty()
            || !Ingredient::fits_name_limit(&command.name)
            || !plural_fits
        {
            return Err(RenameIngredientError::InvalidName);
        }

        let Some(mut ingredient) = self.ingredients.find_by_id(command.id).await? else {
            return Err(RenameIngredientError::NotFound(command.id));
        };

        let name = Ingredient::normalize_name(&command.name);
        if self.ingredients.is_name_taken(&name, Some(command.id)).await? {
            tracing::debug!(%name, "ingredient name already taken");
            return Err(RenameIngredientError::NameAlreadyExists(name));
        }

        ingredient.rename(&name, command.plural_name.as_deref())?;
        self.ingredients.update(ingredient);
        self.unit_of_work.save_changes().await?;

        tracing::info!("ingredient renamed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::ports::{MockIngredientRepository, MockUnitOfWork};

    fn tomato() -> Ingredient {
        Ingredient::create(IngredientId::new(2), "tomato", Some("tomatoes"), None).unwrap()
    }

    fn rename_to(name: &str) -> RenameIngredientCommand {
        RenameIngredientCommand {
            id: IngredientId::new(2),
            name: name.to_owned(),
            plural_name: None,
        }
    }

    #[tokio::test]
    async fn renames_and_commits_once() {
        let mut ingredients = MockIngredientRepository::new();
        ingredients
            .expect_find_by_id()
            .returning(|_| Ok(Some(tomato())));
        ingredients
            .expect_is_name_taken()
            .withf(|name, exclude| name == "roma tomato" && *exclude == Some(IngredientId::new(2)))
            .returning(|_, _| Ok(false));
        ingredients
            .expect_update()
            .withf(|i| i.name() == "roma tomato" && i.plural_name().is_none())
            .times(1)
            .return_const(());
        let mut uow = MockUnitOfWork::new();
        uow.expect_save_changes().times(1).returning(|| Ok(1));

        RenameIngredientHandler::new(&ingredients, &uow)
            .handle(rename_to(" Roma Tomato "))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn blank_name_wins_over_missing_ingredient() {
        let ingredients = MockIngredientRepository::new();
        let mut uow = MockUnitOfWork::new();
        uow.expect_save_changes().times(0);

        let result = RenameIngredientHandler::new(&ingredients, &uow)
            .handle(rename_to(" "))
            .await;
        assert!(matches!(result, Err(RenameIngredientError::InvalidName)));
    }

    #[tokio::test]
    async fn name_that_grows_when_lowercased_is_rejected() {
        let ingredients = MockIngredientRepository::new();
        let mut uow = MockUnitOfWork::new();
        uow.expect_save_changes().times(0);

        let command = rename_to(&"İ".repeat(100));
        assert!(command.validate().unwrap_err().contains("name"));
        let result = RenameIngredientHandler::new(&ingredients, &uow)
            .handle(command)
            .await;
        assert!(matches!(result, Err(RenameIngredientError::InvalidName)));
    }

    #[tokio::test]
    async fn missing_ingredient_is_not_found() {
        let mut ingredients = MockIngredientRepository::new();
        ingredients.expect_find_by_id().returning(|_| Ok(None));
        let mut uow = MockUnitOfWork::new();
        uow.expect_save_changes().times(0);

        let result = RenameIngredientHandler::new(&ingredients, &uow)
            .handle(rename_to("basil"))
            .await;
        assert!(matches!(
            result,
            Err(RenameIngredientError::NotFound(id)) if id == IngredientId::new(2)
        ));
    }

    #[tokio::test]
    async fn collision_with_another_ingredient_is_rejected() {
        let mut ingredients = MockIngredientRepository::new();
        ingredients
            .expect_find_by_id()
            .returning(|_| Ok(Some(tomato())));
        ingredients.expect_is_name_taken().returning(|_, _| Ok(true));
        ingredients.expect_update().times(0);
        let mut uow = MockUnitOfWork::new();
        uow.expect_save_changes().times(0);

        let result = RenameIngredientHandler::new(&ingredients, &uow)
            .handle(rename_to("Onion"))
            .await;
        assert!(matches!(result, Err(RenameIngredientError::NameAlreadyExists(n)) if n == "onion"));
    }
}
