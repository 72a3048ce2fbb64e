use chrono::{DateTime, Utc};

use super::{normalized_slug, required_text};
use crate::errors::DomainResult;
use crate::ids::TagId;

/// A label recipes can be filed under. The slug is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    id: TagId,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TagParts {
    pub id: TagId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    pub const MAX_NAME_LENGTH: usize = 100;
    pub const MAX_SLUG_LENGTH: usize = 100;

    pub fn create(id: TagId, name: &str, slug: &str) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id,
            name: required_text("name", name, Self::MAX_NAME_LENGTH)?,
            slug: normalized_slug(slug, Self::MAX_SLUG_LENGTH)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(parts: TagParts) -> Self {
        Self {
            id: parts.id,
            name: parts.name,
            slug: parts.slug,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = required_text("name", name, Self::MAX_NAME_LENGTH)?;
        self.touch();
        Ok(())
    }

    pub fn set_slug(&mut self, slug: &str) -> DomainResult<()> {
        self.slug = normalized_slug(slug, Self::MAX_SLUG_LENGTH)?;
        self.touch();
        Ok(())
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
