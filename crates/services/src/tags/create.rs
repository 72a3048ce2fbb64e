use domains::ports::{DataSession, TagRepository, UnitOfWork};
use domains::{DomainError, Tag};
use thiserror::Error;

use crate::dto::TagSummaryDto;
use crate::slug::slugify;
use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, Clone)]
pub struct CreateTagCommand {
    pub name: String,
    /// Derived from the name when absent.
    pub slug: Option<String>,
}

impl Validate for CreateTagCommand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("name", &self.name)
            .max_length("name", Some(&self.name), Tag::MAX_NAME_LENGTH)
            .max_length("slug", self.slug.as_deref(), Tag::MAX_SLUG_LENGTH);
        errors.into_result()
    }
}

#[derive(Debug, Error)]
pub enum CreateTagError {
    #[error("tag name must not be blank")]
    InvalidName,
    #[error("tag slug must contain at least one letter or digit")]
    InvalidSlug,
    #[error("a tag with slug '{0}' already exists")]
    SlugAlreadyExists(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct CreateTagHandler<'a> {
    tags: &'a dyn TagRepository,
    unit_of_work: &'a dyn UnitOfWork,
}

impl<'a> CreateTagHandler<'a> {
    pub fn new(tags: &'a dyn TagRepository, unit_of_work: &'a dyn UnitOfWork) -> Self {
        Self { tags, unit_of_work }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.tags(), session.unit_of_work())
    }

    #[tracing::instrument(skip_all, fields(name = %command.name))]
    pub async fn handle(&self, command: CreateTagCommand) -> Result<TagSummaryDto, CreateTagError> {
        if command.name.trim().is_empty() {
            return Err(CreateTagError::InvalidName);
        }
        let slug = match command.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_lowercase(),
            _ => slugify(&command.name),
        };
        if slug.is_empty() {
            return Err(CreateTagError::InvalidSlug);
        }
        if self.tags.is_slug_taken(&slug).await? {
            return Err(CreateTagError::SlugAlreadyExists(slug));
        }

        let id = self.tags.next_id().await?;
        let tag = Tag::create(id, &command.name, &slug)?;
        let dto = TagSummaryDto::from_domain(&tag);
        self.tags.add(tag);
        self.unit_of_work.save_changes().await?;

        tracing::info!(tag_id = %id, %slug, "tag created");
        Ok(dto)
    }
}
