use domains::ports::{DataSession, IngredientRepository, UnitOfWork};
use domains::{DomainError, Ingredient, MeasurementUnit};
use thiserror::Error;

use crate::dto::IngredientSummaryDto;
use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone)]
pub struct CreateIngredientCommand {
    pub name: String,
    pub plural_name: Option<String>,
    pub default_unit: Option<MeasurementUnit>,
    pub is_active: bool,
}

impl Validate for CreateIngredientCommand {
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
pub enum CreateIngredientError {
    #[error(
        "ingredient names must not be blank or longer than {} characters",
        Ingredient::MAX_NAME_LENGTH
    )]
    InvalidName,
    #[error("an ingredient named '{0}' already exists")]
    NameAlreadyExists(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct CreateIngredientHandler<'a> {
    ingredients: &'a dyn IngredientRepository,
    unit_of_work: &'a dyn UnitOfWork,
}

impl<'a> CreateIngredientHandler<'a> {
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

    #[tracing::instrument(skip_all, fields(name = %command.name))]
    pub async fn handle(
        &self,
        command: CreateIngredientCommand,
    ) -> Result<IngredientSummaryDto, CreateIngredientError> {
        let plural_fits = command
            .plural_name
            .as_deref()
            .is_none_or(Ingredient::fits_name_limit);
        if command.name.trim().is_empty()
            || !Ingredient::fits_name_limit(&command.name)
            || !plural_fits
        {
            return Err(CreateIngredientError::InvalidName);
        }

        let name = Ingredient::normalize_name(&command.name);
        if self.ingredients.is_name_taken(&name, None).await? {
            tracing::debug!("ingredient name already taken");
            return Err(CreateIngredientError::NameAlreadyExists(name));
        }

        let id = self.ingredients.next_id().await?;
        let mut ingredient = Ingredient::create(
            id,
            &name,
            command.plural_name.as_deref(),
            command.default_unit,
        )?;
        if !command.is_active {
            ingredient.set_status(false);
        }

        let dto = IngredientSummaryDto::from_domain(&ingredient);
        self.ingredients.add(ingredient);
        self.unit_of_work.save_changes().await?;

        tracing::info!(ingredient_id = %id, "ingredient created");
        Ok(dto)
    }
}
