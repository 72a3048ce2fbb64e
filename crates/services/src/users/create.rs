use domains::ports::{DataSession, UnitOfWork, UserRepository};
use domains::{DomainError, User, UserId};
use thiserror::Error;

use crate::dto::UserSummaryDto;
use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: String,
}

impl Validate for CreateUserCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("name", &self.name)
            .max_length("name", Some(&self.name), User::MAX_NAME_LENGTH);
        errors.into_result()
    }
}

#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("user name must be between 1 and 200 characters")]
    InvalidName,
    #[error("a user named '{0}' already exists")]
    NameAlreadyExists(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct CreateUserHandler<'a> {
    users: &'a dyn UserRepository,
    unit_of_work: &'a dyn UnitOfWork,
}

impl<'a> CreateUserHandler<'a> {
    pub fn new(users: &'a dyn UserRepository, unit_of_work: &'a dyn UnitOfWork) -> Self {
        Self {
            users,
            unit_of_work,
        }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.users(), session.unit_of_work())
    }

    #[tracing::instrument(skip_all)]
    pub async fn handle(
        &self,
        command: CreateUserCommand,
    ) -> Result<UserSummaryDto, CreateUserError> {
        let name = command.name.trim();
        if name.is_empty() || name.chars().count() > User::MAX_NAME_LENGTH {
            return Err(CreateUserError::InvalidName);
        }
        if self.users.is_name_taken(name).await? {
            tracing::debug!("user name already taken");
            return Err(CreateUserError::NameAlreadyExists(name.to_owned()));
        }

        let user = User::create(UserId::generate(), name)?;
        let dto = UserSummaryDto::from_domain(&user);
        self.users.add(user);
        self.unit_of_work.save_changes().await?;

        tracing::info!(user_id = %dto.id, "user created");
        Ok(dto)
    }
}
